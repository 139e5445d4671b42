pub mod types;

pub use types::{CanonicalRecord, Field};

/// Display header used when a source carries no header row.
pub static DEFAULT_HEADER: &[&str] = &[
    "Course",
    "Section",
    "Instructor",
    "Units",
    "Days",
    "Time",
    "Location",
];

pub fn default_header() -> Vec<String> {
    DEFAULT_HEADER.iter().map(|s| s.to_string()).collect()
}
