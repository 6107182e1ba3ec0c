//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract for contact persistence.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Contact::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod contact_repo;
