use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};

/// Cell-level access to the single worksheet a tracker is bound to.
/// Columns and rows are 1-based, matching spreadsheet conventions.
pub trait SheetCells {
    fn set_text(&mut self, col: u32, row: u32, value: &str);
    fn set_number(&mut self, col: u32, row: u32, value: f64);
    fn set_date(&mut self, col: u32, row: u32, value: NaiveDate);
    fn clear_cell(&mut self, col: u32, row: u32);
}

/// A worksheet whose workbook can be persisted to stable storage.
pub trait Workbook: SheetCells {
    fn save(&mut self) -> Result<()>;
}

/// One sheet of an existing `.xlsx` workbook, opened for in-place update.
pub struct XlsxWorkbook {
    book: umya_spreadsheet::Spreadsheet,
    sheet: String,
    path: PathBuf,
}

impl XlsxWorkbook {
    pub fn open(path: &Path, sheet: &str) -> Result<Self> {
        if !path.exists() {
            return Err(TrackerError::WorkbookNotFound(path.display().to_string()));
        }
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| TrackerError::Workbook(format!("{e:?}")))?;
        if book.get_sheet_by_name(sheet).is_none() {
            return Err(TrackerError::SheetNotFound(sheet.to_string()));
        }
        Ok(Self {
            book,
            sheet: sheet.to_string(),
            path: path.to_path_buf(),
        })
    }

    fn sheet_mut(&mut self) -> &mut umya_spreadsheet::Worksheet {
        // Sheet presence is checked in open()
        self.book.get_sheet_by_name_mut(&self.sheet).unwrap()
    }
}

impl SheetCells for XlsxWorkbook {
    fn set_text(&mut self, col: u32, row: u32, value: &str) {
        self.sheet_mut().get_cell_mut((col, row)).set_value(value);
    }

    fn set_number(&mut self, col: u32, row: u32, value: f64) {
        self.sheet_mut().get_cell_mut((col, row)).set_value_number(value);
    }

    fn set_date(&mut self, col: u32, row: u32, value: NaiveDate) {
        let text = value.format("%Y-%m-%d").to_string();
        self.sheet_mut().get_cell_mut((col, row)).set_value(text);
    }

    fn clear_cell(&mut self, col: u32, row: u32) {
        self.sheet_mut().get_cell_mut((col, row)).set_value("");
    }
}

impl Workbook for XlsxWorkbook {
    fn save(&mut self) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path)
            .map_err(|e| TrackerError::Workbook(format!("{e:?}")))
    }
}
