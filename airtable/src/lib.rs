pub mod client;
pub mod types;

pub use client::{AirtableError, Client};
pub use types::{Record, RecordPage};
