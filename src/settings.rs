use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory holding the yearly workbooks and raw export drops.
    pub data_dir: String,
    /// First year a tracker workbook exists for.
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default)]
    pub keywords: Keywords,
}

fn default_start_year() -> i32 {
    2022
}

/// Category keyword lists searched against transaction descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    /// Checking withdrawals matching these are credit-card payoffs, not spend.
    pub credit_card_payment: Vec<String>,
    pub primary_income: Vec<String>,
    pub rent_utilities: Vec<String>,
    pub groceries: Vec<String>,
    pub gasoline: Vec<String>,
    pub fixed_expenses: Vec<String>,
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            credit_card_payment: list(&["PAYMENT THANK YOU", "EPAY", "AUTOPAY"]),
            primary_income: list(&["PAYROLL", "DIRECT DEP"]),
            rent_utilities: list(&["RENT", "ELECTRIC", "WATER", "COLUMBIA GAS", "INTERNET"]),
            groceries: list(&["KROGER", "WHOLEFDS", "TRADER JOE", "ALDI"]),
            gasoline: list(&["SHELL", "CHEVRON", "EXXON", "MARATHON", "FUEL"]),
            fixed_expenses: list(&["NETFLIX", "SPOTIFY", "GYM", "INSURANCE"]),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            start_year: default_start_year(),
            keywords: Keywords::default(),
        }
    }
}

impl Settings {
    /// Path of the year's workbook: `{data_dir}/{year}/Income&Expenses{year}.xlsx`
    pub fn workbook_path(&self, year: i32) -> PathBuf {
        PathBuf::from(&self.data_dir)
            .join(year.to_string())
            .join(format!("Income&Expenses{year}.xlsx"))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("trackbook")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("trackbook")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TrackerError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
