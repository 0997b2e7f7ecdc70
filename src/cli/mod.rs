pub mod init;
pub mod refresh;

use clap::{Parser, Subcommand};

pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `month` is clap-validated to 1-12 before this is called.
pub(crate) fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month - 1) as usize]
}

#[derive(Parser)]
#[command(
    name = "trackbook",
    about = "Sync monthly bank exports into the Income & Expense workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up trackbook: choose a data directory and write default settings.
    Init {
        /// Path for tracker data (default: ~/Documents/trackbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Re-pull a month's bank exports and rewrite its tracker sheet.
    Refresh {
        /// Month to update (01-12)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
        /// Year to update (YYYY)
        #[arg(value_parser = clap::value_parser!(i32).range(2000..=9999))]
        year: i32,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
