//! Domain model for contact records.
//!
//! # Responsibility
//! - Define the canonical contact shape shared by persistence and transport.
//! - Own field-level validation for drafts and partial updates.
//!
//! # Invariants
//! - Every persisted contact is identified by a stable `ContactId`.
//! - `first_name`, `last_name` and `email` are never empty on a valid record.

pub mod contact;
