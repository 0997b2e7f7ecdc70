use std::collections::BTreeMap;

use crate::classifier::classify;
use crate::error::{Result, TrackerError};
use crate::section::{Polarity, Section};
use crate::source::TransactionSource;
use crate::workbook::Workbook;

/// Orchestrates one (month, year) tracker sheet: a registry of uniquely
/// named sections plus the clear → classify → write → save refresh cycle.
pub struct Tracker<W: Workbook> {
    month: u32,
    year: i32,
    workbook: W,
    sections: BTreeMap<String, Section>,
    as_of_cell: (u32, u32),
}

impl<W: Workbook> Tracker<W> {
    pub fn new(month: u32, year: i32, workbook: W, as_of_cell: (u32, u32)) -> Self {
        Self {
            month,
            year,
            workbook,
            sections: BTreeMap::new(),
            as_of_cell,
        }
    }

    pub fn add_section(&mut self, section: Section) -> Result<()> {
        if self.sections.contains_key(&section.name) {
            return Err(TrackerError::SectionExists(section.name));
        }
        self.sections.insert(section.name.clone(), section);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn replace_section(&mut self, section: Section) -> Result<()> {
        match self.sections.get(&section.name) {
            None => Err(TrackerError::SectionMissing(section.name)),
            Some(current) if *current == section => {
                Err(TrackerError::IdenticalReplacement(section.name))
            }
            Some(_) => {
                self.sections.insert(section.name.clone(), section);
                Ok(())
            }
        }
    }

    #[allow(dead_code)]
    pub fn remove_section(&mut self, name: &str) -> Result<()> {
        self.sections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TrackerError::SectionMissing(name.to_string()))
    }

    #[allow(dead_code)]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Clear every section, reclassify the period, rewrite each section and
    /// the as-of marker cell, then save the workbook.
    ///
    /// The sequence is not transactional: a failure partway leaves the
    /// in-memory workbook cleared or partially rewritten, but the save is
    /// skipped, so the on-disk file keeps its last good state.
    pub fn refresh(
        &mut self,
        source: &dyn TransactionSource,
        cc_payment_keywords: &[String],
    ) -> Result<()> {
        if self.sections.is_empty() {
            return Err(TrackerError::EmptyTracker);
        }

        let (as_of_col, as_of_row) = self.as_of_cell;
        self.workbook.clear_cell(as_of_col, as_of_row);
        for section in self.sections.values() {
            section.clear(&mut self.workbook);
        }

        let classification = classify(source, self.month, self.year, cc_payment_keywords)?;

        self.workbook.set_date(as_of_col, as_of_row, classification.as_of);
        for section in self.sections.values() {
            let records = match section.polarity {
                Polarity::Income => &classification.income,
                Polarity::Expense => &classification.expenses,
            };
            section.write(&mut self.workbook, records)?;
        }

        self.workbook.save()
    }

    /// Release the workbook handle. Safe to call without a prior refresh.
    pub fn close(self) {}
}
