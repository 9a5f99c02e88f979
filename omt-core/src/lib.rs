//! OMT Core
//!
//! Core types shared by the OMT scan orchestrator.
//!
//! This crate contains:
//! - Domain types: jobs, run configuration, outcomes and reports
//! - DTOs: the on-disk scan file and its conversion into a run plan

pub mod domain;
pub mod dto;
