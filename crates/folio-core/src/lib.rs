//! # Folio Core
//!
//! The domain layer of Folio.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, validation rules, ports, and the services that orchestrate them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
