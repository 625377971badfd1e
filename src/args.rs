//! These structs provide the CLI interface for the salon CLI.

use crate::model::Category;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// salon: bookings and bookkeeping for a small nail and beauty salon.
///
/// Customers pick a service from the catalog and book an appointment. Behind a password, the
/// admin records income and expenses, sees the running balance and manages the bookings. All data
/// stays on this machine under the salon home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the salon home directory with a default configuration.
    ///
    /// The configuration file holds the service catalog, the gallery, the currency symbol and the
    /// admin password. Edit it afterwards to fit your salon.
    Init,
    /// List the service catalog.
    Services,
    /// Preview the booking summary for a catalog service.
    Select(SelectArgs),
    /// Book an appointment.
    Book(BookArgs),
    /// Log in as the admin.
    Login(LoginArgs),
    /// Log out of the admin session.
    Logout,
    /// Show the admin panel: statistics, recent transactions and appointments.
    Panel(PanelArgs),
    /// Show income, expense and balance totals.
    Stats,
    /// List, add or delete income and expense transactions.
    Transactions(TransactionsArgs),
    /// List or delete booked appointments.
    Appointments(AppointmentsArgs),
    /// Show the portfolio gallery.
    Gallery(GalleryArgs),
    /// Print the JSON Schema of the stored collections.
    Schema,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where salon data and configuration is held. Defaults to ~/salon
    #[arg(long, env = "SALON_HOME", default_value_t = default_salon_home())]
    salon_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, salon_home: PathBuf) -> Self {
        Self {
            log_level,
            salon_home: salon_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn salon_home(&self) -> &DisplayPath {
        &self.salon_home
    }
}

/// Args for the `salon select` command.
#[derive(Debug, Parser, Clone)]
pub struct SelectArgs {
    /// The id of a catalog service, as listed by `salon services`.
    service_id: String,
}

impl SelectArgs {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

/// Args for the `salon book` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct BookArgs {
    /// The customer's name.
    #[arg(long)]
    pub name: String,

    /// The customer's phone number.
    #[arg(long)]
    pub phone: String,

    /// The customer's email address.
    #[arg(long)]
    pub email: Option<String>,

    /// The id of a catalog service. Its name and price are used for the appointment.
    #[arg(long, conflicts_with = "service")]
    pub service_id: Option<String>,

    /// A service that is not in the catalog, booked without a price.
    #[arg(long)]
    pub service: Option<String>,

    /// The appointment date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// The appointment time, HH:MM.
    #[arg(long)]
    pub time: String,

    /// Anything the salon should know.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Args for the `salon login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// The admin password from the configuration file.
    #[arg(long, env = "SALON_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Args for the `salon panel` command.
#[derive(Debug, Parser, Clone)]
pub struct PanelArgs {
    /// Keep running and re-render the panel from storage until Ctrl-C.
    #[arg(long)]
    follow: bool,
}

impl PanelArgs {
    pub fn new(follow: bool) -> Self {
        Self { follow }
    }

    pub fn follow(&self) -> bool {
        self.follow
    }
}

/// Args for the `salon transactions` command.
#[derive(Debug, Parser, Clone)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    command: TransactionsCommand,
}

impl TransactionsArgs {
    pub fn command(&self) -> &TransactionsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionsCommand {
    /// List the most recent transactions.
    List,
    /// Record an income or an expense.
    Add(AddTransactionArgs),
    /// Delete a transaction by id.
    Delete(DeleteArgs),
}

/// Args for the `salon transactions add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddTransactionArgs {
    /// Whether money came in or went out.
    #[arg(long, value_enum, default_value_t = Category::Income)]
    pub category: Category,

    /// A positive amount, e.g. 15.50
    #[arg(long)]
    pub amount: String,

    /// What the transaction was for.
    #[arg(long)]
    pub description: String,

    /// The transaction date, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

/// Args for the `salon appointments` command.
#[derive(Debug, Parser, Clone)]
pub struct AppointmentsArgs {
    #[command(subcommand)]
    command: AppointmentsCommand,
}

impl AppointmentsArgs {
    pub fn command(&self) -> &AppointmentsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AppointmentsCommand {
    /// List every booked appointment.
    List,
    /// Delete an appointment by id.
    Delete(DeleteArgs),
}

/// Args for the delete subcommands.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the record to delete.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `salon gallery` command.
#[derive(Debug, Parser, Clone)]
pub struct GalleryArgs {
    /// Only show work from this category, or `all`.
    #[arg(long)]
    filter: Option<String>,
}

impl GalleryArgs {
    pub fn new(filter: Option<String>) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

fn default_salon_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("salon"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --salon-home or SALON_HOME instead of relying on the default \
                salon home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("salon")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DisplayPath(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
