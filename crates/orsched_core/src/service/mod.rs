//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into roster-level use cases.
//! - Own schedule generation and draft editing.
//! - Keep callers decoupled from storage details.

pub mod nurse_service;
pub mod or_service;
pub mod schedule_service;
pub mod surgery_service;
