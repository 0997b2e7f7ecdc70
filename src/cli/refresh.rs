use std::io::{self, Write};

use colored::Colorize;

use crate::cli::month_name;
use crate::error::{Result, TrackerError};
use crate::matcher::KeywordRule;
use crate::section::{Polarity, Section};
use crate::settings::{load_settings, Settings};
use crate::source::FlatFileSource;
use crate::tracker::Tracker;
use crate::workbook::XlsxWorkbook;

/// Marker cell holding the date of the most recent transaction (column T).
const AS_OF_CELL: (u32, u32) = (20, 1);

pub fn run(month: u32, year: i32, yes: bool) -> Result<()> {
    let settings = load_settings();
    if year < settings.start_year {
        return Err(TrackerError::InvalidPeriod(format!(
            "tracker workbooks start in {}, got {year}",
            settings.start_year
        )));
    }

    let month_name = month_name(month);
    if !yes {
        confirm(month_name, year)?;
    }

    println!("Connecting to {month_name} {year} Income & Expense Tracker...");
    let workbook = XlsxWorkbook::open(
        &settings.workbook_path(year),
        &format!("{month_name} {year}"),
    )?;
    let mut tracker = Tracker::new(month, year, workbook, AS_OF_CELL);
    register_standard_sections(&mut tracker, &settings)?;

    let source = FlatFileSource::new(settings.data_dir.clone());
    println!("Updating {month_name} {year} tracker sheet...");
    let outcome = tracker.refresh(&source, &settings.keywords.credit_card_payment);
    tracker.close();
    outcome?;

    println!(
        "{} {month_name} {year} Income & Expense Tracker updated",
        "Done:".green().bold()
    );
    Ok(())
}

/// The fixed sheet layout: two income sections on the left block, five
/// expense sections on the right, catch-alls last. Rows and columns mirror
/// the workbook template.
fn register_standard_sections(
    tracker: &mut Tracker<XlsxWorkbook>,
    settings: &Settings,
) -> Result<()> {
    let kw = &settings.keywords;

    tracker.add_section(Section::new(
        "Primary Income",
        Polarity::Income,
        KeywordRule::new(&kw.primary_income),
        7,
        8,
        2,
        8,
    ))?;
    tracker.add_section(Section::new(
        "Other Income",
        Polarity::Income,
        KeywordRule::new(&kw.primary_income).inverse(),
        12,
        166,
        2,
        8,
    ))?;
    tracker.add_section(Section::new(
        "Rent & Utilities",
        Polarity::Expense,
        KeywordRule::new(&kw.rent_utilities),
        7,
        14,
        10,
        16,
    ))?;
    tracker.add_section(Section::new(
        "Groceries",
        Polarity::Expense,
        KeywordRule::new(&kw.groceries).with_exceptions(&kw.gasoline),
        18,
        37,
        10,
        16,
    ))?;
    tracker.add_section(Section::new(
        "Gas",
        Polarity::Expense,
        KeywordRule::new(&kw.gasoline),
        41,
        50,
        10,
        16,
    ))?;
    tracker.add_section(Section::new(
        "Miscellaneous Fixed Expenses",
        Polarity::Expense,
        KeywordRule::new(&kw.fixed_expenses),
        54,
        63,
        10,
        16,
    ))?;

    // Everything not already categorized by the expense sections above
    let categorized: Vec<String> = [
        kw.rent_utilities.clone(),
        kw.groceries.clone(),
        kw.gasoline.clone(),
        kw.fixed_expenses.clone(),
    ]
    .concat();
    tracker.add_section(Section::new(
        "Other Expenses",
        Polarity::Expense,
        KeywordRule::new(&categorized).inverse(),
        67,
        166,
        10,
        16,
    ))?;

    Ok(())
}

fn confirm(month_name: &str, year: i32) -> Result<()> {
    loop {
        print!("Are you sure you want to update {month_name} {year} Income & Expenses? (y/n): ");
        io::stdout().flush()?;
        let mut input = String::new();
        let bytes = io::stdin().read_line(&mut input)?;
        if bytes == 0 {
            // stdin closed
            return Err(TrackerError::Cancelled);
        }
        let answer = input.trim().to_lowercase();
        if answer.starts_with('y') {
            return Ok(());
        }
        if answer.starts_with('n') {
            return Err(TrackerError::Cancelled);
        }
    }
}
