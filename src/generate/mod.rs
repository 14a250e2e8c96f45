//! Synthetic churn dataset generation.
//!
//! Produces four related tables from configuration values:
//! customers, their transactions, support calls and daily usage. All
//! randomness comes from one seeded `StdRng`, so a seed fully determines
//! the dataset.

mod records;
mod sampling;

pub use records::{
    Customer, DATE_FORMAT, IssueType, SupportCall, Transaction, TransactionType, UsageRecord,
};
pub use sampling::{PROBABILITY_TOLERANCE, WeightedTable, validate_probabilities};

use crate::config::ConfigLoader;
use crate::error::{ConfigError, ConfigResult};
use chrono::{Duration, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_distr::Normal;
use serde::Deserialize;
use tracing::{debug, info};

/// Transactions per eligible customer, half-open.
const TRANSACTIONS_PER_CUSTOMER: std::ops::Range<usize> = 5..50;
/// Transaction amount range, half-open.
const TRANSACTION_AMOUNT: std::ops::Range<f64> = 10.0..500.0;
/// Support-call duration in minutes, half-open.
const CALL_DURATION_MINUTES: std::ops::Range<u32> = 2..30;
/// Share of support calls that end resolved.
const RESOLVED_PROBABILITY: f64 = 0.8;
/// Upper bound on any configured row count.
///
/// Daily tables advance one day per row, so this also keeps their dates
/// inside the range `NaiveDate` can represent.
pub const MAX_RECORDS: usize = 10_000_000;

/// Normal distribution parameters and clamp bounds for customer ages.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AgeSettings {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl Default for AgeSettings {
    fn default() -> Self {
        Self {
            min: 18.0,
            max: 75.0,
            mean: 42.0,
            std: 12.0,
        }
    }
}

/// Everything the generator reads from configuration.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub seed: u64,
    pub num_customers: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub age: AgeSettings,
    pub income_segments: WeightedTable,
    pub regions: Vec<String>,
    pub contract_types: WeightedTable,
    pub support_calls: usize,
    pub support_calls_start: NaiveDate,
    pub usage_records: usize,
    pub usage_start: NaiveDate,
}

impl GeneratorSettings {
    /// Read settings, falling back to the stock values for missing keys.
    pub fn from_config(config: &ConfigLoader) -> ConfigResult<Self> {
        let settings = Self {
            seed: config.get_as_or("random.seed", 42)?,
            num_customers: config.get_as_or("data.num_customers", 1000)?,
            start_date: read_date(config, "data.start_date", "2022-01-01")?,
            end_date: read_date(config, "data.end_date", "2023-12-31")?,
            age: config.get_as_or("synthetic_data.customers.age", AgeSettings::default())?,
            income_segments: WeightedTable::from_config(
                config,
                "synthetic_data.customers.income_segments",
                None,
                &[("Low", 0.3), ("Medium", 0.5), ("High", 0.2)],
            )?,
            regions: config.get_as_or(
                "synthetic_data.customers.regions",
                ["North", "South", "East", "West"].map(String::from).to_vec(),
            )?,
            contract_types: WeightedTable::from_config(
                config,
                "synthetic_data.customers.contract_types",
                Some("probability"),
                &[("Monthly", 0.6), ("Annual", 0.3), ("TwoYear", 0.1)],
            )?,
            support_calls: config.get_as_or("synthetic_data.support_calls.count", 1000)?,
            support_calls_start: read_date(
                config,
                "synthetic_data.support_calls.start_date",
                "2023-01-01",
            )?,
            usage_records: config.get_as_or("synthetic_data.usage.count", 5000)?,
            usage_start: read_date(config, "synthetic_data.usage.start_date", "2023-06-01")?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.end_date < self.start_date {
            return Err(ConfigError::invalid_value(
                "data.end_date",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }

        for (key, count) in [
            ("data.num_customers", self.num_customers),
            ("synthetic_data.support_calls.count", self.support_calls),
            ("synthetic_data.usage.count", self.usage_records),
        ] {
            if count > MAX_RECORDS {
                return Err(ConfigError::invalid_value(
                    key,
                    format!("{count} exceeds the maximum of {MAX_RECORDS} records"),
                ));
            }
        }

        let age = &self.age;
        for (name, value) in [
            ("min", age.min),
            ("max", age.max),
            ("mean", age.mean),
            ("std", age.std),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid_value(
                    &format!("synthetic_data.customers.age.{name}"),
                    format!("must be a finite number, got {value}"),
                ));
            }
        }
        // Ages are whole years, so the bounds must admit at least one integer.
        let has_whole_age = age.min.ceil() <= age.max.floor();
        if !(age.min >= 0.0 && has_whole_age && age.max <= u32::MAX as f64) {
            return Err(ConfigError::invalid_value(
                "synthetic_data.customers.age",
                format!(
                    "need a whole age in 0 <= min <= max, got min={} max={}",
                    age.min, age.max
                ),
            ));
        }
        if age.std < 0.0 {
            return Err(ConfigError::invalid_value(
                "synthetic_data.customers.age.std",
                format!("standard deviation must be non-negative, got {}", age.std),
            ));
        }

        if self.regions.is_empty() {
            return Err(ConfigError::invalid_value(
                "synthetic_data.customers.regions",
                "at least one region is required",
            ));
        }
        Ok(())
    }
}

fn read_date(config: &ConfigLoader, key: &str, default: &str) -> ConfigResult<NaiveDate> {
    let raw: String = config.get_as_or(key, default.to_string())?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
        ConfigError::invalid_value(key, format!("'{raw}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// Row counts of a generated dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub customers: usize,
    pub transactions: usize,
    pub support_calls: usize,
    pub usage_records: usize,
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Customers: {}", self.customers)?;
        writeln!(f, "Transactions: {}", self.transactions)?;
        writeln!(f, "Support Calls: {}", self.support_calls)?;
        write!(f, "Usage Records: {}", self.usage_records)
    }
}

/// The four generated tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    pub support_calls: Vec<SupportCall>,
    pub usage: Vec<UsageRecord>,
}

impl Dataset {
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            customers: self.customers.len(),
            transactions: self.transactions.len(),
            support_calls: self.support_calls.len(),
            usage_records: self.usage.len(),
        }
    }
}

/// Seeded generator for churn tables.
pub struct DatasetGenerator {
    settings: GeneratorSettings,
    rng: StdRng,
    age: Normal<f64>,
    transaction_types: WeightedIndex<f64>,
}

impl DatasetGenerator {
    /// Create a generator from validated settings.
    pub fn new(settings: GeneratorSettings) -> ConfigResult<Self> {
        settings.validate()?;

        let age = Normal::new(settings.age.mean, settings.age.std).map_err(|e| {
            ConfigError::invalid_value("synthetic_data.customers.age", e.to_string())
        })?;
        let transaction_types = WeightedIndex::new(TransactionType::WEIGHTS)
            .map_err(|e| ConfigError::invalid_value("transaction types", e.to_string()))?;
        let rng = StdRng::seed_from_u64(settings.seed);

        Ok(Self {
            settings,
            rng,
            age,
            transaction_types,
        })
    }

    /// Read settings from `config` and build a generator.
    pub fn from_config(config: &ConfigLoader) -> ConfigResult<Self> {
        Self::new(GeneratorSettings::from_config(config)?)
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate every table in dependency order.
    pub fn generate(&mut self) -> Dataset {
        info!(
            seed = self.settings.seed,
            customers = self.settings.num_customers,
            "Generating synthetic churn dataset"
        );

        let customers = self.generate_customers();
        let transactions = self.generate_transactions(&customers);
        let support_calls = self.generate_support_calls(&customers);
        let usage = self.generate_usage(&customers);

        Dataset {
            customers,
            transactions,
            support_calls,
            usage,
        }
    }

    /// Customers with signup dates in `[start_date, end_date)`.
    pub fn generate_customers(&mut self) -> Vec<Customer> {
        let settings = &self.settings;
        let span = (settings.end_date - settings.start_date).num_days();
        let (min_age, max_age) = (settings.age.min.ceil(), settings.age.max.floor());
        let mut customers = Vec::with_capacity(settings.num_customers.min(MAX_RECORDS));

        for index in 1..=settings.num_customers {
            let offset = if span > 0 {
                self.rng.gen_range(0..span)
            } else {
                0
            };
            let age = self
                .age
                .sample(&mut self.rng)
                .round()
                .clamp(min_age, max_age) as u32;
            let income_segment = settings.income_segments.sample(&mut self.rng).to_string();
            let region = settings.regions[self.rng.gen_range(0..settings.regions.len())].clone();
            let contract_type = settings.contract_types.sample(&mut self.rng).to_string();

            customers.push(Customer {
                customer_id: Customer::id_for(index),
                signup_date: settings.start_date + Duration::days(offset),
                age,
                income_segment,
                region,
                contract_type,
            });
        }

        info!(count = customers.len(), "Generated customer records");
        customers
    }

    /// 5 to 49 transactions per customer, dated between signup and `end_date`.
    ///
    /// Customers who signed up on the last day get none.
    pub fn generate_transactions(&mut self, customers: &[Customer]) -> Vec<Transaction> {
        let end_date = self.settings.end_date;
        let mut transactions = Vec::new();

        for customer in customers {
            let count = self.rng.gen_range(TRANSACTIONS_PER_CUSTOMER);
            let span = (end_date - customer.signup_date).num_days();
            if span <= 0 {
                debug!(customer = %customer.customer_id, "No transaction window");
                continue;
            }

            for _ in 0..count {
                let date = customer.signup_date + Duration::days(self.rng.gen_range(0..span));
                let amount = self.rng.gen_range(TRANSACTION_AMOUNT);
                let kind = TransactionType::ALL[self.transaction_types.sample(&mut self.rng)];

                transactions.push(Transaction {
                    transaction_id: Transaction::id_for(transactions.len()),
                    customer_id: customer.customer_id.clone(),
                    date,
                    amount: (amount * 100.0).round() / 100.0,
                    kind,
                });
            }
        }

        info!(count = transactions.len(), "Generated transaction records");
        transactions
    }

    /// One call per day from `support_calls_start`, each for a random customer.
    pub fn generate_support_calls(&mut self, customers: &[Customer]) -> Vec<SupportCall> {
        if customers.is_empty() {
            return Vec::new();
        }

        let start = self.settings.support_calls_start;
        let calls: Vec<SupportCall> = (0..self.settings.support_calls)
            .map(|day| SupportCall {
                customer_id: pick_customer(&mut self.rng, customers),
                date: start + Duration::days(day as i64),
                issue_type: IssueType::ALL[self.rng.gen_range(0..IssueType::ALL.len())],
                duration_minutes: self.rng.gen_range(CALL_DURATION_MINUTES),
                resolved: self.rng.gen_bool(RESOLVED_PROBABILITY),
            })
            .collect();

        info!(count = calls.len(), "Generated support call records");
        calls
    }

    /// One usage row per day from `usage_start`, each for a random customer.
    pub fn generate_usage(&mut self, customers: &[Customer]) -> Vec<UsageRecord> {
        if customers.is_empty() {
            return Vec::new();
        }

        let start = self.settings.usage_start;
        let usage: Vec<UsageRecord> = (0..self.settings.usage_records)
            .map(|day| UsageRecord {
                customer_id: pick_customer(&mut self.rng, customers),
                date: start + Duration::days(day as i64),
                minutes_used: self.rng.gen_range(0..240),
                features_accessed: self.rng.gen_range(1..10),
                sessions: self.rng.gen_range(1..20),
            })
            .collect();

        info!(count = usage.len(), "Generated usage records");
        usage
    }
}

fn pick_customer(rng: &mut StdRng, customers: &[Customer]) -> String {
    customers[rng.gen_range(0..customers.len())]
        .customer_id
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDocument, LoadOptions, default_document};
    use std::path::Path;

    fn loader(yaml: &str) -> ConfigLoader {
        let doc = ConfigDocument::parse(yaml, Path::new("test.yaml")).unwrap();
        ConfigLoader::from_document(doc, LoadOptions::lenient())
    }

    fn default_loader() -> ConfigLoader {
        ConfigLoader::from_document(default_document().unwrap(), LoadOptions::lenient())
    }

    fn small_settings() -> GeneratorSettings {
        let mut settings = GeneratorSettings::from_config(&default_loader()).unwrap();
        settings.num_customers = 50;
        settings.support_calls = 40;
        settings.usage_records = 60;
        settings
    }

    #[test]
    fn test_settings_from_default_document() {
        let settings = GeneratorSettings::from_config(&default_loader()).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.num_customers, 1000);
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(settings.end_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(settings.age, AgeSettings::default());
        assert_eq!(settings.regions, ["North", "South", "East", "West"]);
        assert_eq!(settings.contract_types.names(), ["Monthly", "Annual", "TwoYear"]);
        assert_eq!(settings.support_calls, 1000);
        assert_eq!(settings.usage_records, 5000);
    }

    #[test]
    fn test_settings_fall_back_for_missing_keys() {
        let settings = GeneratorSettings::from_config(&loader("data:\n  num_customers: 3\n"))
            .unwrap();
        assert_eq!(settings.num_customers, 3);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.income_segments.names(), ["Low", "Medium", "High"]);
    }

    #[test]
    fn test_settings_reject_bad_dates() {
        let err = GeneratorSettings::from_config(&loader("data:\n  start_date: yesterday\n"))
            .unwrap_err();
        assert!(err.to_string().contains("data.start_date"));

        let err = GeneratorSettings::from_config(&loader(
            "data:\n  start_date: '2023-01-01'\n  end_date: '2022-01-01'\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("before start date"));
    }

    #[test]
    fn test_customers_respect_bounds() {
        let mut generator = DatasetGenerator::new(small_settings()).unwrap();
        let customers = generator.generate_customers();
        let settings = generator.settings();

        assert_eq!(customers.len(), 50);
        assert_eq!(customers[0].customer_id, "CUST000001");
        assert_eq!(customers[49].customer_id, "CUST000050");
        for c in &customers {
            assert!(c.signup_date >= settings.start_date);
            assert!(c.signup_date < settings.end_date);
            assert!((18..=75).contains(&c.age));
            assert!(settings.regions.contains(&c.region));
            assert!(settings.income_segments.names().contains(&c.income_segment));
            assert!(settings.contract_types.names().contains(&c.contract_type));
        }
    }

    #[test]
    fn test_transactions_within_customer_window() {
        let mut generator = DatasetGenerator::new(small_settings()).unwrap();
        let customers = generator.generate_customers();
        let transactions = generator.generate_transactions(&customers);
        let end = generator.settings().end_date;

        for (i, tx) in transactions.iter().enumerate() {
            assert_eq!(tx.transaction_id, Transaction::id_for(i));
            let customer = customers
                .iter()
                .find(|c| c.customer_id == tx.customer_id)
                .unwrap();
            assert!(tx.date >= customer.signup_date);
            assert!(tx.date < end);
            assert!(tx.amount >= 10.0 && tx.amount <= 500.0);
        }

        for customer in &customers {
            let n = transactions
                .iter()
                .filter(|t| t.customer_id == customer.customer_id)
                .count();
            assert!((5..50).contains(&n), "{} has {} transactions", customer.customer_id, n);
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = DatasetGenerator::new(small_settings()).unwrap().generate();
        let b = DatasetGenerator::new(small_settings()).unwrap().generate();
        assert_eq!(a, b);

        let mut other = small_settings();
        other.seed = 7;
        let c = DatasetGenerator::new(other).unwrap().generate();
        assert_ne!(a.customers, c.customers);
    }

    #[test]
    fn test_support_and_usage_are_daily() {
        let mut generator = DatasetGenerator::new(small_settings()).unwrap();
        let dataset = generator.generate();

        assert_eq!(dataset.support_calls.len(), 40);
        assert_eq!(
            dataset.support_calls[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(
            dataset.support_calls[39].date,
            NaiveDate::from_ymd_opt(2023, 2, 9).unwrap()
        );
        assert!(dataset
            .support_calls
            .iter()
            .all(|c| (2..30).contains(&c.duration_minutes)));

        assert_eq!(dataset.usage.len(), 60);
        assert_eq!(dataset.usage[0].date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert!(dataset.usage.iter().all(|u| u.minutes_used < 240
            && (1..10).contains(&u.features_accessed)
            && (1..20).contains(&u.sessions)));
    }

    #[test]
    fn test_zero_customers() {
        let mut settings = small_settings();
        settings.num_customers = 0;
        let dataset = DatasetGenerator::new(settings).unwrap().generate();
        assert_eq!(dataset.summary(), DatasetSummary::default());
    }

    #[test]
    fn test_single_day_range_has_no_transactions() {
        let mut settings = small_settings();
        settings.end_date = settings.start_date;
        let dataset = DatasetGenerator::new(settings.clone()).unwrap().generate();
        assert!(dataset.customers.iter().all(|c| c.signup_date == settings.start_date));
        assert!(dataset.transactions.is_empty());
    }

    fn age_loader(age: &str) -> ConfigLoader {
        loader(&format!(
            "data:\n  num_customers: 5\nsynthetic_data:\n  customers:\n    age: {age}\n"
        ))
    }

    #[test]
    fn test_non_finite_age_rejected() {
        for age in [
            "{min: 18, max: 75, mean: .nan, std: 12}",
            "{min: .nan, max: 75, mean: 42, std: 12}",
            "{min: 18, max: .inf, mean: 42, std: 12}",
            "{min: 18, max: 75, mean: 42, std: .inf}",
        ] {
            let err = GeneratorSettings::from_config(&age_loader(age)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { .. }),
                "{age}: {err:?}"
            );
        }
    }

    #[test]
    fn test_fractional_age_bounds_stay_inside() {
        let config = age_loader("{min: 18.5, max: 19.5, mean: 10, std: 3}");
        let mut generator = DatasetGenerator::from_config(&config).unwrap();
        let customers = generator.generate_customers();
        assert_eq!(customers.len(), 5);
        assert!(customers.iter().all(|c| c.age == 19));

        let narrow = age_loader("{min: 18.2, max: 18.8, mean: 18, std: 1}");
        let err = GeneratorSettings::from_config(&narrow).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let err = GeneratorSettings::from_config(&loader(
            "data:\n  num_customers: 1000000000000000000\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("data.num_customers"));

        let mut settings = small_settings();
        settings.usage_records = MAX_RECORDS + 1;
        let err = DatasetGenerator::new(settings).err().unwrap();
        assert!(err.to_string().contains("synthetic_data.usage.count"));

        let mut settings = small_settings();
        settings.support_calls = usize::MAX;
        assert!(DatasetGenerator::new(settings).is_err());
    }

    #[test]
    fn test_summary_display() {
        let summary = DatasetSummary {
            customers: 1,
            transactions: 2,
            support_calls: 3,
            usage_records: 4,
        };
        assert_eq!(
            summary.to_string(),
            "Customers: 1\nTransactions: 2\nSupport Calls: 3\nUsage Records: 4"
        );
    }
}
