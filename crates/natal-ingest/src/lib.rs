//! Record loading and case-control balancing.
//!
//! This crate turns two CSV sources (a case extract and a control extract)
//! into the immutable [`BalancedDataset`](natal_model::BalancedDataset)
//! consumed by the view transforms.
//!
//! # Features
//!
//! - **Raw loading**: keep the whitelisted natality columns and rename them
//! - **Processed loading**: read already-balanced record-schema files verbatim
//! - **Balancing**: eligibility filter, seeded sampling without replacement,
//!   father-age outlier exclusion
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use natal_ingest::{LoadOptions, load};
//!
//! let options = LoadOptions::raw().with_seed(Some(42));
//! let dataset = load(Path::new("dead.csv"), Path::new("alive.csv"), &options)?;
//! println!("{} cases, {} controls", dataset.case_count(), dataset.control_count());
//! ```

pub mod balance;
mod csv;
mod error;
mod schema;
mod store;

// === Error Types ===
pub use error::{IngestError, Result};

// === Balancing ===
pub use balance::{BalanceReport, balance, balance_with_report};

// === Loading ===
pub use csv::{read_csv_frame, read_csv_header, write_csv_frame};
pub use schema::harmonise_dtypes;
pub use store::{LoadOptions, SourceMode, load, load_collection, write_dataset};
