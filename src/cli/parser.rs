use crate::print::PrintFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for tajournal
/// CLI application to keep Travelling Allowance journals with SQLite
#[derive(Parser)]
#[command(
    name = "tajournal",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep Indian Railways Travelling Allowance journals and print them on the official form layout",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employee profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Open (create if missing) the journal of a month
    Open {
        /// Month of the journal (YYYY-MM)
        month: String,
    },

    /// Add a journey entry, or edit one with --edit
    Add {
        /// Date of the journey (YYYY-MM-DD)
        date: String,

        #[command(flatten)]
        fields: EntryArgs,

        /// Entry id to edit instead of creating a new entry
        #[arg(long = "edit", value_name = "ID")]
        edit: Option<i64>,
    },

    /// Delete a journey entry by id
    Del {
        /// Entry id (see `list`)
        id: i64,
    },

    /// Duplicate the last entry of a month
    Dup {
        /// Month of the journal (YYYY-MM)
        month: String,
    },

    /// List the entries of a month with their total
    List {
        /// Month of the journal (YYYY-MM), default current month
        month: Option<String>,
    },

    /// Print a month on the journal form
    Print {
        /// Month of the journal (YYYY-MM)
        month: String,

        #[arg(long, value_enum, default_value = "pdf")]
        format: PrintFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path, ~/ allowed)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a profile and make it the active one
    Add {
        #[command(flatten)]
        fields: ProfileArgs,
    },

    /// Change the given fields of a profile
    Edit {
        id: i64,

        #[command(flatten)]
        fields: ProfileArgs,
    },

    /// List profiles
    List,

    /// Make a profile the active one
    Switch { id: i64 },
}

#[derive(Args, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub designation: Option<String>,

    #[arg(long)]
    pub station: Option<String>,

    #[arg(long = "pay-level")]
    pub pay_level: Option<String>,

    #[arg(long = "basic-pay")]
    pub basic_pay: Option<String>,

    #[arg(long = "pf-number")]
    pub pf_number: Option<String>,

    #[arg(long)]
    pub headquarters: Option<String>,

    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long)]
    pub division: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct EntryArgs {
    #[arg(long = "train", help = "Train number")]
    pub train: Option<String>,

    #[arg(long = "dep", help = "Departure time (HH:MM, empty to clear)")]
    pub dep: Option<String>,

    #[arg(long = "arr", help = "Arrival time (HH:MM, empty to clear)")]
    pub arr: Option<String>,

    #[arg(long = "from", help = "From station")]
    pub from: Option<String>,

    #[arg(long = "to", help = "To station")]
    pub to: Option<String>,

    #[arg(long = "kms", help = "Distance in kilometres")]
    pub kms: Option<String>,

    #[arg(long = "dn", help = "Day/night percentage: 30%, 70% or 100%")]
    pub dn: Option<String>,

    #[arg(long = "purpose", help = "Object of journey")]
    pub purpose: Option<String>,

    #[arg(long = "rate", help = "Rate claimed")]
    pub rate: Option<String>,

    #[arg(long = "conveyance", help = "Conveyance distance")]
    pub conveyance: Option<String>,

    #[arg(long = "reference", help = "Reference / remarks")]
    pub reference: Option<String>,
}

impl From<&ProfileArgs> for crate::core::profile::ProfileFields {
    fn from(a: &ProfileArgs) -> Self {
        Self {
            name: a.name.clone(),
            designation: a.designation.clone(),
            station: a.station.clone(),
            pay_level: a.pay_level.clone(),
            basic_pay: a.basic_pay.clone(),
            pf_number: a.pf_number.clone(),
            headquarters: a.headquarters.clone(),
            branch: a.branch.clone(),
            division: a.division.clone(),
        }
    }
}

impl From<&EntryArgs> for crate::core::entry::EntryFields {
    fn from(a: &EntryArgs) -> Self {
        Self {
            date: None,
            train_no: a.train.clone(),
            departure: a.dep.clone(),
            arrival: a.arr.clone(),
            from_station: a.from.clone(),
            to_station: a.to.clone(),
            kms: a.kms.clone(),
            day_night: a.dn.clone(),
            purpose: a.purpose.clone(),
            rate: a.rate.clone(),
            conveyance_distance: a.conveyance.clone(),
            reference: a.reference.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn print_defaults_to_pdf() {
        let cli = Cli::parse_from(["tajournal", "print", "2025-03", "--file", "/tmp/x.pdf"]);
        match cli.command {
            Commands::Print { format, .. } => assert_eq!(format, PrintFormat::Pdf),
            _ => panic!("expected print"),
        }
    }
}
