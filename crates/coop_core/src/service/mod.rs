//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the flock use-cases.
//! - Keep CLI and other callers decoupled from storage details.

pub mod flock_service;
pub mod stats_service;
