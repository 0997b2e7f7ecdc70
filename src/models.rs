use chrono::NaiveDate;

/// A classified transaction, ready to be written into a tracker section.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub posting_date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

/// Raw checking-account export row. `details` is `DEBIT` or `CREDIT`.
#[derive(Debug, Clone)]
pub struct CheckingRow {
    pub details: String,
    pub posting_date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl CheckingRow {
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            posting_date: self.posting_date,
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}

/// Raw credit-card export row. `card_type` is `Sale`, `Payment`, `Return`, etc.
#[derive(Debug, Clone)]
pub struct CardRow {
    pub card_type: String,
    pub posting_date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

impl CardRow {
    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            posting_date: self.posting_date,
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}
