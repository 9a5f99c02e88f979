//! Data transfer objects
//!
//! Wire-level shapes read from disk before they become domain types.

pub mod scan_file;
