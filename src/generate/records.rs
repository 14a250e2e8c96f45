//! Row types for the generated churn tables.

use crate::output::CsvRecord;
use chrono::NaiveDate;

/// Date format used in every CSV table.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One customer row.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub signup_date: NaiveDate,
    pub age: u32,
    pub income_segment: String,
    pub region: String,
    pub contract_type: String,
}

impl Customer {
    /// Format a 1-based index as `CUST000001`.
    pub fn id_for(index: usize) -> String {
        format!("CUST{:06}", index)
    }
}

impl CsvRecord for Customer {
    const HEADER: &'static [&'static str] = &[
        "customer_id",
        "signup_date",
        "age",
        "income_segment",
        "region",
        "contract_type",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.customer_id.clone(),
            self.signup_date.format(DATE_FORMAT).to_string(),
            self.age.to_string(),
            self.income_segment.clone(),
            self.region.clone(),
            self.contract_type.clone(),
        ]
    }
}

/// Kind of billing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Subscription,
    Purchase,
    Refund,
    Fee,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Subscription,
        TransactionType::Purchase,
        TransactionType::Refund,
        TransactionType::Fee,
    ];

    /// Sampling weights, aligned with [`TransactionType::ALL`].
    pub const WEIGHTS: [f64; 4] = [0.6, 0.3, 0.05, 0.05];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Subscription => "subscription",
            TransactionType::Purchase => "purchase",
            TransactionType::Refund => "refund",
            TransactionType::Fee => "fee",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: TransactionType,
}

impl Transaction {
    /// Format a 0-based sequence number as `TX00000000`.
    pub fn id_for(sequence: usize) -> String {
        format!("TX{:08}", sequence)
    }
}

impl CsvRecord for Transaction {
    const HEADER: &'static [&'static str] =
        &["transaction_id", "customer_id", "date", "amount", "type"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.transaction_id.clone(),
            self.customer_id.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            format!("{:.2}", self.amount),
            self.kind.to_string(),
        ]
    }
}

/// Reason a customer contacted support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    Technical,
    Billing,
    Account,
    Other,
}

impl IssueType {
    pub const ALL: [IssueType; 4] = [
        IssueType::Technical,
        IssueType::Billing,
        IssueType::Account,
        IssueType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Technical => "technical",
            IssueType::Billing => "billing",
            IssueType::Account => "account",
            IssueType::Other => "other",
        }
    }
}

/// One support-call row.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportCall {
    pub customer_id: String,
    pub date: NaiveDate,
    pub issue_type: IssueType,
    pub duration_minutes: u32,
    pub resolved: bool,
}

impl CsvRecord for SupportCall {
    const HEADER: &'static [&'static str] = &[
        "customer_id",
        "date",
        "issue_type",
        "duration_minutes",
        "resolved",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.customer_id.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            self.issue_type.as_str().to_string(),
            self.duration_minutes.to_string(),
            if self.resolved { "True" } else { "False" }.to_string(),
        ]
    }
}

/// One daily product-usage row.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub customer_id: String,
    pub date: NaiveDate,
    pub minutes_used: u32,
    pub features_accessed: u32,
    pub sessions: u32,
}

impl CsvRecord for UsageRecord {
    const HEADER: &'static [&'static str] = &[
        "customer_id",
        "date",
        "minutes_used",
        "features_accessed",
        "sessions",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.customer_id.clone(),
            self.date.format(DATE_FORMAT).to_string(),
            self.minutes_used.to_string(),
            self.features_accessed.to_string(),
            self.sessions.to_string(),
        ]
    }
}
