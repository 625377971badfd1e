use anyhow::bail;
use clap::Parser;
use salon_desk::args::{AppointmentsCommand, Args, Command, TransactionsCommand};
use salon_desk::notify::Severity;
use salon_desk::{commands, App, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<ExitCode> {
    trace!("{args:?}");
    let home = args.common().salon_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Gallery(gallery_args) => {
            let config = Config::load(home).await?;
            commands::gallery(&config, gallery_args.filter()).render()
        }

        Command::Schema => commands::schema().render(),

        command => {
            let mut app = App::open(Config::load(home).await?).await?;
            let result = dispatch(&mut app, command).await;

            // Handlers report their outcome in the notification area, it is printed once here.
            let notification = app.notifier().current();
            if let Some(notification) = &notification {
                notification.print();
            }
            return Ok(match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    let reported =
                        matches!(&notification, Some(n) if n.severity() == Severity::Error);
                    if reported {
                        debug!("Command failed: {e:#}");
                    } else {
                        error!("Exiting with error: {e:#}");
                    }
                    ExitCode::FAILURE
                }
            });
        }
    };
    Ok(ExitCode::SUCCESS)
}

/// Runs the commands that act on an open `App`.
async fn dispatch(app: &mut App, command: &Command) -> Result<()> {
    match command {
        Command::Services => commands::services(app).render(),
        Command::Select(select_args) => {
            commands::select(app, select_args.service_id())?.render()
        }
        Command::Book(book_args) => commands::book(app, book_args).await?.print_json(),
        Command::Login(login_args) => {
            commands::login(app, login_args.password()).await?.render()
        }
        Command::Logout => commands::logout(app).await?.print_json(),
        Command::Panel(panel_args) if panel_args.follow() => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Unable to listen for Ctrl-C, stop with a kill signal instead: {e}");
                    std::future::pending::<()>().await
                }
            };
            commands::follow_panel(app, shutdown, |view| println!("{view}\n"))
                .await?
                .print()
        }
        Command::Panel(_) => commands::panel(app).await?.render(),
        Command::Stats => commands::stats(app).await?.render(),
        Command::Transactions(transactions_args) => match transactions_args.command() {
            TransactionsCommand::List => commands::list_transactions(app).await?.render(),
            TransactionsCommand::Add(add_args) => {
                commands::add_transaction(app, add_args).await?.render()
            }
            TransactionsCommand::Delete(delete_args) => {
                commands::delete_transaction(app, delete_args.id())
                    .await?
                    .print_json()
            }
        },
        Command::Appointments(appointments_args) => match appointments_args.command() {
            AppointmentsCommand::List => commands::list_appointments(app).await?.render(),
            AppointmentsCommand::Delete(delete_args) => {
                commands::delete_appointment(app, delete_args.id())
                    .await?
                    .print_json()
            }
        },
        Command::Init | Command::Gallery(_) | Command::Schema => {
            bail!("The {command:?} command does not run against the collections")
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                "salon_desk",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
