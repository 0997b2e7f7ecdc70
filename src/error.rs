use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Workbook not found: {0}")]
    WorkbookNotFound(String),

    #[error("Sheet \"{0}\" not found in workbook")]
    SheetNotFound(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Unable to pull {account} transactions: {reason}")]
    DataPull { account: &'static str, reason: String },

    #[error("No transactions found for {month:02}/{year} in either account")]
    EmptyPeriod { month: u32, year: i32 },

    #[error("Section \"{0}\" already exists. To change it, replace the existing section instead.")]
    SectionExists(String),

    #[error("Section \"{0}\" does not exist")]
    SectionMissing(String),

    #[error("Section \"{name}\" matched {count} transactions but only has room for {capacity}")]
    SectionOverflow {
        name: String,
        count: usize,
        capacity: usize,
    },

    #[error("Replacement for section \"{0}\" is identical to the current one")]
    IdenticalReplacement(String),

    #[error("Tracker has no sections; register at least one before refreshing")]
    EmptyTracker,

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Update cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TrackerError {
    /// Validated failures exit with status 1; anything else exits 2.
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            TrackerError::Io(_) | TrackerError::Csv(_) | TrackerError::Workbook(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
