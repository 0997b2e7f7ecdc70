use crate::error::{Result, TrackerError};
use crate::matcher::KeywordRule;
use crate::models::TransactionRecord;
use crate::workbook::SheetCells;

/// Whether a section draws from the income set or the expense set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Income,
    Expense,
}

/// A named, fixed rectangle of worksheet cells holding one category's
/// transactions for the month.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub polarity: Polarity,
    pub rule: KeywordRule,
    pub min_row: u32,
    pub max_row: u32,
    pub min_col: u32,
    pub max_col: u32,
}

impl Section {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        polarity: Polarity,
        rule: KeywordRule,
        min_row: u32,
        max_row: u32,
        min_col: u32,
        max_col: u32,
    ) -> Self {
        Self {
            name: name.into(),
            polarity,
            rule,
            min_row,
            max_row,
            min_col,
            max_col,
        }
    }

    /// Number of transactions the rectangle can hold, one per row.
    pub fn capacity(&self) -> usize {
        (self.max_row - self.min_row + 1) as usize
    }

    /// Blank every cell in the rectangle. Cells outside it are untouched.
    pub fn clear(&self, sheet: &mut dyn SheetCells) {
        for row in self.min_row..=self.max_row {
            for col in self.min_col..=self.max_col {
                sheet.clear_cell(col, row);
            }
        }
    }

    /// Write the records that belong to this section, one per row from the
    /// top of the rectangle.
    ///
    /// Date, description, and amount land in the rectangle's first, second,
    /// and last columns; any middle columns are reserved for sheet-side
    /// formulas and notes. Fails before touching a single cell if the
    /// matching records outnumber the rows.
    pub fn write(&self, sheet: &mut dyn SheetCells, records: &[TransactionRecord]) -> Result<()> {
        let matched: Vec<&TransactionRecord> = records
            .iter()
            .filter(|r| self.rule.matches(&r.description))
            .collect();
        if matched.len() > self.capacity() {
            return Err(TrackerError::SectionOverflow {
                name: self.name.clone(),
                count: matched.len(),
                capacity: self.capacity(),
            });
        }

        for (offset, record) in matched.iter().enumerate() {
            let row = self.min_row + offset as u32;
            sheet.set_date(self.min_col, row, record.posting_date);
            sheet.set_text(self.min_col + 1, row, &record.description);
            sheet.set_number(self.max_col, row, record.amount);
        }
        Ok(())
    }
}
