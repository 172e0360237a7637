//! Deterministic synthetic data used when no backend is configured.
//!
//! Records are generated with a fixed status distribution and shuffled with a
//! seeded RNG, so the same seed always yields the same dataset. Queries are
//! answered by the shared engine, keeping counts and rows consistent.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::domain::gems::{GemsStatus, GemsTransaction};
use crate::domain::gpf::{GpfStatus, GpfTransaction};
use crate::domain::record::TransactionRecord;
use crate::domain::types::ISO_DATE_FORMAT;
use crate::engine::query::query;
use crate::engine::summary::StatusSummary;
use crate::repository::TransactionReader;
use crate::repository::errors::RepositoryResult;

pub const GEMS_DISTRIBUTION: &[(GemsStatus, usize)] = &[
    (GemsStatus::JsonSent, 234),
    (GemsStatus::PdfSent, 198),
    (GemsStatus::HrmsReceived, 185),
    (GemsStatus::DdoReceived, 156),
    (GemsStatus::HrmsRejected, 15),
    (GemsStatus::DdoRejected, 23),
];

pub const GPF_DISTRIBUTION: &[(GpfStatus, usize)] = &[
    (GpfStatus::JsonSent, 45),
    (GpfStatus::HrmsReceived, 60),
    (GpfStatus::HrmsRejected, 15),
];

const EVENT_NAMES: &[&str] = &[
    "New Employee Registration",
    "Salary Update",
    "Promotion",
    "Transfer",
    "Retirement",
    "Leave Application",
    "Grade Revision",
    "Pension Update",
    "Medical Benefits",
    "House Rent Allowance",
];

const FIRST_NAMES: &[&str] = &[
    "Anita", "Bharath", "Chitra", "Deepak", "Girish", "Kavya", "Manjunath", "Nandini", "Prakash",
    "Rekha", "Suresh", "Vidya",
];

const LAST_NAMES: &[&str] = &[
    "Gowda", "Hegde", "Kulkarni", "Naik", "Patil", "Rao", "Shetty", "Reddy",
];

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn random_date(rng: &mut StdRng, from: NaiveDate, to: NaiveDate) -> NaiveDate {
    let span = to.signed_duration_since(from).num_days().max(0) as u64;
    from.checked_add_days(Days::new(rng.random_range(0..=span)))
        .unwrap_or(from)
}

fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

fn digits(rng: &mut StdRng, width: u32) -> String {
    let upper = 10u64.pow(width);
    format!("{:0width$}", rng.random_range(0..upper), width = width as usize)
}

fn pick(rng: &mut StdRng, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Generates the GEMS dataset following [`GEMS_DISTRIBUTION`].
pub fn generate_gems(rng: &mut StdRng) -> Vec<GemsTransaction> {
    let year_start = ymd(2024, 1, 1);
    let year_end = ymd(2024, 12, 31);

    let mut transactions = Vec::new();
    let mut sequence = 0usize;

    for &(status, count) in GEMS_DISTRIBUTION {
        for _ in 0..count {
            sequence += 1;
            transactions.push(GemsTransaction {
                transaction_id: format!("TXN{sequence:06}"),
                ge_number: format!("GE2024{}", digits(rng, 4)),
                event_id: format!("EVT{}", digits(rng, 3)),
                event_name: pick(rng, EVENT_NAMES).to_string(),
                file_id: format!("FILE{sequence:03}"),
                pdf_file_name: Some(format!("document_{sequence:03}.pdf")),
                json_sent_date: format_date(random_date(rng, year_start, year_end)),
                status,
            });
        }
    }

    transactions.shuffle(rng);
    transactions
}

/// Generates the GPF dataset following [`GPF_DISTRIBUTION`].
pub fn generate_gpf(rng: &mut StdRng) -> Vec<GpfTransaction> {
    let year_start = ymd(2024, 1, 1);
    let year_end = ymd(2024, 12, 31);

    let mut transactions = Vec::new();
    let mut sequence = 0usize;

    for &(status, count) in GPF_DISTRIBUTION {
        for _ in 0..count {
            sequence += 1;
            let birth = random_date(rng, ymd(1960, 1, 1), ymd(1990, 12, 31));
            let joining = random_date(rng, ymd(1985, 1, 1), ymd(2020, 12, 31));
            let policy_start = random_date(rng, joining, year_end);
            let name = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));

            transactions.push(GpfTransaction {
                transaction_id: format!("GPF{sequence:06}"),
                gpf_id: format!("GPF{}", digits(rng, 5)),
                kgid: format!("KG{}", digits(rng, 7)),
                name,
                date_of_birth: format_date(birth),
                joining_date: format_date(joining),
                policy_no: Some(format!("POL{}", digits(rng, 8))),
                policy_start_date: Some(format_date(policy_start)),
                json_sent_date: format_date(random_date(rng, year_start, year_end)),
                status,
            });
        }
    }

    transactions.shuffle(rng);
    transactions
}

/// Both synthetic collections, generated once at startup.
#[derive(Clone, Debug)]
pub struct SyntheticDataset {
    gems: SyntheticReader<GemsTransaction>,
    gpf: SyntheticReader<GpfTransaction>,
}

impl SyntheticDataset {
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let gems = generate_gems(&mut rng);
        let gpf = generate_gpf(&mut rng);
        log::info!(
            "Generated synthetic dataset: {} GEMS and {} GPF transactions",
            gems.len(),
            gpf.len()
        );
        Self {
            gems: SyntheticReader::new(gems),
            gpf: SyntheticReader::new(gpf),
        }
    }

    pub fn gems(&self) -> &SyntheticReader<GemsTransaction> {
        &self.gems
    }

    pub fn gpf(&self) -> &SyntheticReader<GpfTransaction> {
        &self.gpf
    }
}

/// In-memory reader answering both fetch calls through the query engine.
#[derive(Debug)]
pub struct SyntheticReader<R> {
    records: Arc<Vec<R>>,
}

impl<R> Clone for SyntheticReader<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> SyntheticReader<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: TransactionRecord> TransactionReader<R> for SyntheticReader<R> {
    async fn fetch_status_summary(
        &self,
        criteria: &R::Criteria,
    ) -> RepositoryResult<StatusSummary<R::Status>> {
        Ok(query(&self.records, None, criteria).summary)
    }

    async fn fetch_transactions(
        &self,
        status: Option<R::Status>,
        criteria: &R::Criteria,
    ) -> RepositoryResult<Vec<R>> {
        Ok(query(&self.records, status, criteria).visible)
    }
}
