//! Core domain types
//!
//! These types describe one batch run: what to execute, the shared
//! context every job sees, and what each job produced.

pub mod config;
pub mod job;
pub mod outcome;
pub mod report;
