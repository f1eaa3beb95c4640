//! # qrap-core
//!
//! Core types, risk analysis, and error types for QRAP, the quantum risk
//! assessment platform.
//!
//! This crate provides the foundational types shared across all QRAP crates:
//! - Entity structs (organizations, assessments, findings)
//! - The assessment status enum with its state machine
//! - The finding synthesizer and risk aggregator
//! - The HNDL exposure calculator, PQC migration planner and standalone risk scorer
//! - Pagination, validation, clock and identity abstractions
//! - Cross-cutting error types

pub mod analysis;
pub mod clock;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod hndl;
pub mod ids;
pub mod migration;
pub mod pagination;
pub mod responses;
pub mod scoring;
pub mod validation;
