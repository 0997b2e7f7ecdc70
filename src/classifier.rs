use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::matcher::KeywordRule;
use crate::models::TransactionRecord;
use crate::source::TransactionSource;

/// One period's account activity split into income and expense streams,
/// each sorted ascending by posting date.
#[derive(Debug, Clone)]
pub struct Classification {
    pub income: Vec<TransactionRecord>,
    pub expenses: Vec<TransactionRecord>,
    pub as_of: NaiveDate,
}

/// Pull a period's raw activity and split it into income and expenses.
///
/// Checking withdrawals that merely pay off the credit card are dropped:
/// that spend is already captured row-by-row on the card side, and keeping
/// the transfer would double-count it.
pub fn classify(
    source: &dyn TransactionSource,
    month: u32,
    year: i32,
    cc_payment_keywords: &[String],
) -> Result<Classification> {
    let checking = source.pull_checking(month, year)?;
    let card = source.pull_credit_card(month, year)?;

    let payment_rule = KeywordRule::new(cc_payment_keywords);

    let mut expenses: Vec<TransactionRecord> = checking
        .iter()
        .filter(|r| r.details == "DEBIT")
        .filter(|r| !payment_rule.matches(&r.description))
        .map(|r| r.to_record())
        .collect();
    expenses.extend(
        card.iter()
            .filter(|r| r.card_type == "Sale")
            .map(|r| r.to_record()),
    );
    // Stable sort: equal dates keep checking-then-card concatenation order
    expenses.sort_by_key(|r| r.posting_date);

    // Card rows never contribute income; deposits only come from checking,
    // which the source already delivers date-sorted.
    let income: Vec<TransactionRecord> = checking
        .iter()
        .filter(|r| r.details == "CREDIT")
        .map(|r| r.to_record())
        .collect();

    let as_of = match (checking.last(), card.last()) {
        (Some(c), Some(k)) => c.posting_date.max(k.posting_date),
        (Some(c), None) => c.posting_date,
        (None, Some(k)) => k.posting_date,
        (None, None) => return Err(TrackerError::EmptyPeriod { month, year }),
    };

    Ok(Classification {
        income,
        expenses,
        as_of,
    })
}
