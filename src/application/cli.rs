use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Dashboard;
use crate::domain::services::actions::help_text;
use crate::domain::services::DashboardStore;
use crate::domain::services::HistoryStore;
use crate::domain::services::Storage;
use crate::domain::services::StorageKey;
use crate::infrastructure::api::auth::AuthClient;
use crate::infrastructure::api::auth::LoginRequest;
use crate::infrastructure::api::auth::RegisterRequest;
use crate::infrastructure::transports;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut query = dashboard.query.split('\n').collect::<Vec<_>>()[0].to_string();
    if query.len() >= 70 {
        query = format!("{}...", &query[..67]);
    }

    return format!(
        "- (ID: {}) {}, {}: {}",
        dashboard.id, dashboard.created, dashboard.title, query
    );
}

/// Renders a saved chart as an aligned text table, labels down the first
/// column and one column per dataset.
fn render_table(dashboard: &Dashboard) -> String {
    let data = &dashboard.chart.data;

    let mut columns: Vec<Vec<String>> = vec![];
    let mut label_column = vec!["Label".to_string()];
    label_column.extend(data.labels.iter().map(|e| return e.to_string()));
    columns.push(label_column);

    for dataset in data.datasets.iter() {
        let mut column = vec![dataset.label.to_string()];
        column.extend(dataset.values.iter().map(|e| return e.to_string()));
        columns.push(column);
    }

    let widths = columns
        .iter()
        .map(|column| {
            return column
                .iter()
                .map(|cell| return cell.len())
                .max()
                .unwrap_or(0);
        })
        .collect::<Vec<usize>>();

    let mut lines: Vec<String> = vec![];
    for row in 0..columns[0].len() {
        let line = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                return format!("{cell:<width$}", cell = column[row], width = widths[idx]);
            })
            .collect::<Vec<String>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    return lines.join("\n");
}

async fn print_dashboards_list() -> Result<()> {
    let store = DashboardStore::load(Storage::default()).await?;
    let dashboards = store
        .list()
        .iter()
        .map(|dashboard| {
            return format_dashboard(dashboard);
        })
        .collect::<Vec<String>>();

    if dashboards.is_empty() {
        println!("There are no saved dashboards yet. Ask Alfred for a chart and run /save.");
    } else {
        println!("{}", dashboards.join("\n"));
    }

    return Ok(());
}

async fn show_dashboard(id: &str) -> Result<()> {
    let store = DashboardStore::load(Storage::default()).await?;
    let dashboard = match store.get(id) {
        Some(dashboard) => dashboard,
        None => bail!(format!("No dashboard found for id {id}")),
    };

    println!("{}", Paint::new(&dashboard.title).bold());
    println!(
        "{}",
        Paint::new(format!(
            "{chart_type} chart, saved {created}, from \"{query}\"",
            chart_type = dashboard.chart.chart_type,
            created = dashboard.created,
            query = dashboard.query
        ))
        .dimmed()
    );
    println!("\n{}", render_table(dashboard));

    return Ok(());
}

async fn delete_dashboard(id: &str) -> Result<()> {
    let mut store = DashboardStore::load(Storage::default()).await?;
    if store.delete(id).await? {
        println!("Deleted dashboard {id}");
    } else {
        println!("No dashboard found for id {id}");
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn register() -> Result<()> {
    let theme = ColorfulTheme::default();
    let name: String = Input::with_theme(&theme).with_prompt("Name").interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;
    let confirm = Password::with_theme(&theme)
        .with_prompt("Confirm password")
        .interact()?;

    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("All fields are required");
    }
    // A mismatch never reaches the server.
    if password != confirm {
        bail!("Passwords do not match");
    }
    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    AuthClient::default()
        .register(&RegisterRequest {
            name,
            email,
            password,
        })
        .await?;

    println!("Registered! You can now sign in with `alfred login`.");
    return Ok(());
}

async fn login() -> Result<()> {
    let theme = ColorfulTheme::default();
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let session = AuthClient::default()
        .login(&LoginRequest { email, password })
        .await?;

    Storage::default()
        .write(StorageKey::AuthToken, &session.token)
        .await?;

    println!(
        "Logged in as {name} <{email}>",
        name = session.user.name,
        email = session.user.email
    );
    return Ok(());
}

async fn logout() -> Result<()> {
    let storage = Storage::default();
    let token: Option<String> = storage.read(StorageKey::AuthToken).await?;
    if token.is_none() {
        println!("You are not logged in.");
        return Ok(());
    }

    let client = AuthClient::new(&Config::get(ConfigKey::ApiUrl), token);
    if let Err(err) = client.logout().await {
        // The token is dropped locally even when the server call fails.
        tracing::warn!(err = ?err, "Logout request failed");
    }

    storage.remove(StorageKey::AuthToken).await?;
    println!("Logged out.");
    return Ok(());
}

async fn whoami() -> Result<()> {
    let storage = Storage::default();
    let token: Option<String> = storage.read(StorageKey::AuthToken).await?;
    if token.is_none() {
        println!("You are not logged in.");
        return Ok(());
    }

    let client = AuthClient::new(&Config::get(ConfigKey::ApiUrl), token);
    match client.session().await {
        Ok(user) => {
            println!(
                "Logged in as {name} <{email}>",
                name = user.name,
                email = user.email
            );
        }
        Err(err) => {
            storage.remove(StorageKey::AuthToken).await?;
            bail!(format!("{err}. Cleared the stored session token."));
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(clap::ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_dashboards() -> Command {
    return Command::new("dashboards")
        .about("Manage saved dashboards.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the data directory dashboards are stored in."))
        .subcommand(Command::new("list").about("List all saved dashboards with their ids."))
        .subcommand(
            Command::new("show")
                .about("Render a saved dashboard as a table.")
                .arg(Arg::new("dashboard-id").help("Dashboard ID").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a saved dashboard by ID.")
                .arg(Arg::new("dashboard-id").help("Dashboard ID").required(true)),
        );
}

fn subcommand_history() -> Command {
    return Command::new("history")
        .about("Manage the persisted conversation.")
        .arg_required_else_help(true)
        .subcommand(Command::new("clear").about("Delete the saved chat history."));
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiUrl.to_string())
        .short('a')
        .long(ConfigKey::ApiUrl.to_string())
        .env("ALFRED_API_URL")
        .num_args(1)
        .help(format!(
            "The base URL of the Alfred analytics API. [default: {}]",
            Config::default(ConfigKey::ApiUrl)
        ))
        .global(true);
}

fn arg_origin_url() -> Arg {
    return Arg::new(ConfigKey::OriginUrl.to_string())
        .long(ConfigKey::OriginUrl.to_string())
        .env("ALFRED_ORIGIN_URL")
        .num_args(1)
        .help("Origin fronting the API for proxy setups, tried when direct requests fail.")
        .global(true);
}

fn arg_relay_url() -> Arg {
    return Arg::new(ConfigKey::RelayUrl.to_string())
        .long(ConfigKey::RelayUrl.to_string())
        .env("ALFRED_RELAY_URL")
        .num_args(1)
        .help(format!(
            "Public relay used as the last resort transport, with the target URL appended URL-encoded. [default: {}]",
            Config::default(ConfigKey::RelayUrl)
        ))
        .global(true);
}

fn arg_chat_timeout() -> Arg {
    return Arg::new(ConfigKey::ChatTimeout.to_string())
        .long(ConfigKey::ChatTimeout.to_string())
        .env("ALFRED_CHAT_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time in milliseconds before an in flight chat request is abandoned. [default: {}]",
            Config::default(ConfigKey::ChatTimeout)
        ))
        .global(true);
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("ALFRED_USERNAME")
        .num_args(1)
        .help("Your name as shown on your side of the conversation.")
        .global(true);
}

fn arg_data_dir() -> Arg {
    return Arg::new(ConfigKey::DataDir.to_string())
        .long(ConfigKey::DataDir.to_string())
        .env("ALFRED_DATA_DIR")
        .num_args(1)
        .help("Directory where chat history and saved dashboards are stored. Defaults to the platform data directory.")
        .global(true);
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start chatting with the assistant. This is the default when no command is given.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}")).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("alfred")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_dashboards())
        .subcommand(Command::new("doctor").about("Probe connectivity to the API and report the first method that works."))
        .subcommand(subcommand_history())
        .subcommand(Command::new("login").about("Sign in to the API and store the session token."))
        .subcommand(Command::new("logout").about("Sign out and clear the stored session token."))
        .subcommand(Command::new("register").about("Create a new account."))
        .subcommand(Command::new("whoami").about("Show who the stored session token belongs to."))
        .arg(arg_api_url())
        .arg(arg_origin_url())
        .arg(arg_relay_url())
        .arg(arg_chat_timeout())
        .arg(arg_username())
        .arg(arg_data_dir())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("ALFRED_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("dashboards", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("dir", _)) => {
                    let dir = Storage::default().data_dir.to_string_lossy().to_string();
                    println!("{dir}");
                }
                Some(("list", _)) => {
                    print_dashboards_list().await?;
                }
                Some(("show", show_matches)) => {
                    let id = show_matches.get_one::<String>("dashboard-id").unwrap();
                    show_dashboard(id).await?;
                }
                Some(("delete", delete_matches)) => {
                    let id = delete_matches.get_one::<String>("dashboard-id").unwrap();
                    delete_dashboard(id).await?;
                }
                _ => {
                    subcommand_dashboards().print_long_help()?;
                }
            }
            return Ok(false);
        }
        Some(("doctor", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let report = transports::test_connection().await?;
            println!("{}", Paint::green(report));
            return Ok(false);
        }
        Some(("history", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("clear", _)) => {
                    HistoryStore::new(Storage::default()).clear().await?;
                    println!("Cleared chat history.");
                }
                _ => {
                    subcommand_history().print_long_help()?;
                }
            }
            return Ok(false);
        }
        Some(("login", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            login().await?;
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            logout().await?;
            return Ok(false);
        }
        Some(("register", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            register().await?;
            return Ok(false);
        }
        Some(("whoami", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            whoami().await?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
