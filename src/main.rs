//! clientdesk - client hierarchy directory from the command line.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use clientdesk::directory::{CompanyUpdate, NewClientInput, Status, SubsidiaryRequest};
use clientdesk::{Application, Command, Settings};
use std::path::PathBuf;

fn cli() -> ClapCommand {
    ClapCommand::new("clientdesk")
        .version(clientdesk::VERSION)
        .about("Browse and edit the client hierarchy directory")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (TOML)"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON snapshot to restore from and save to"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Seed for generated directory data"),
        )
        .arg(
            Arg::new("latency-ms")
                .long("latency-ms")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Artificial delay per directory call"),
        )
        .subcommand(
            ClapCommand::new("list")
                .about("List parent companies")
                .arg(Arg::new("query").long("query").short('q').default_value(""))
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_parser(value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            ClapCommand::new("children")
                .about("List subsidiaries of a parent")
                .arg(Arg::new("parent-id").required(true).index(1)),
        )
        .subcommand(
            ClapCommand::new("search")
                .about("Search parents and subsidiaries")
                .arg(Arg::new("query").required(true).index(1)),
        )
        .subcommand(
            ClapCommand::new("show")
                .about("Show one company")
                .arg(Arg::new("id").required(true).index(1)),
        )
        .subcommand(
            ClapCommand::new("create")
                .about("Create a parent company")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("cr").long("cr").help("Registration number"))
                .arg(
                    Arg::new("inline")
                        .long("inline")
                        .action(ArgAction::Append)
                        .help("New subsidiary to create under the company"),
                )
                .arg(
                    Arg::new("link")
                        .long("link")
                        .action(ArgAction::Append)
                        .help("Existing company id to copy in as a subsidiary"),
                ),
        )
        .subcommand(
            ClapCommand::new("update")
                .about("Update a company")
                .arg(Arg::new("id").required(true).index(1))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("status").long("status").help("active or inactive")),
        )
        .subcommand(
            ClapCommand::new("pick")
                .about("Run a search session and print the flattened table")
                .arg(Arg::new("query").long("query").short('q').default_value(""))
                .arg(Arg::new("select").long("select").help("Company id to auto-select")),
        )
}

#[cfg(feature = "config")]
fn base_settings(matches: &ArgMatches) -> Result<Settings> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Settings::load_default().context("loading default settings"),
    }
}

#[cfg(not(feature = "config"))]
fn base_settings(matches: &ArgMatches) -> Result<Settings> {
    if matches.get_one::<PathBuf>("config").is_some() {
        anyhow::bail!("settings files need the `config` feature");
    }
    Ok(Settings::default())
}

fn load_settings(matches: &ArgMatches) -> Result<Settings> {
    let mut settings = base_settings(matches)?;

    if let Some(path) = matches.get_one::<PathBuf>("snapshot") {
        settings.snapshot_path = Some(path.clone());
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        settings.seed = *seed;
    }
    if let Some(latency) = matches.get_one::<u64>("latency-ms") {
        settings.latency_ms = *latency;
    }
    Ok(settings)
}

fn string_arg(matches: &ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_default()
}

fn to_command(name: &str, matches: &ArgMatches) -> Result<Command> {
    let command = match name {
        "list" => Command::List {
            query: string_arg(matches, "query"),
            page: matches.get_one::<usize>("page").copied().unwrap_or(1),
            page_size: matches.get_one::<usize>("page-size").copied(),
        },
        "children" => Command::Children {
            parent_id: string_arg(matches, "parent-id"),
        },
        "search" => Command::Search {
            query: string_arg(matches, "query"),
        },
        "show" => Command::Show {
            id: string_arg(matches, "id"),
        },
        "create" => {
            let mut input = NewClientInput::named(string_arg(matches, "name"));
            input.cr_number = matches.get_one::<String>("cr").cloned();
            if let Some(names) = matches.get_many::<String>("inline") {
                input
                    .subsidiaries
                    .extend(names.map(|name| SubsidiaryRequest::inline(name.clone())));
            }
            if let Some(ids) = matches.get_many::<String>("link") {
                input
                    .subsidiaries
                    .extend(ids.map(|id| SubsidiaryRequest::existing(id.clone())));
            }
            Command::Create(input)
        }
        "update" => {
            let status = matches
                .get_one::<String>("status")
                .map(|raw| raw.parse::<Status>())
                .transpose()?;
            Command::Update {
                id: string_arg(matches, "id"),
                update: CompanyUpdate {
                    name: matches.get_one::<String>("name").cloned(),
                    status,
                    ..CompanyUpdate::default()
                },
            }
        }
        "pick" => Command::Pick {
            query: string_arg(matches, "query"),
            select: matches.get_one::<String>("select").cloned(),
        },
        other => anyhow::bail!("unknown command: {other}"),
    };
    Ok(command)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG controls verbosity
    env_logger::init();

    let matches = cli().get_matches();
    let settings = load_settings(&matches)?;

    let (name, sub_matches) = matches
        .subcommand()
        .context("a subcommand is required")?;
    let command = to_command(name, sub_matches)?;

    let app = Application::new(settings);
    let mut stdout = std::io::stdout().lock();
    app.execute(command, &mut stdout).await?;

    Ok(())
}
