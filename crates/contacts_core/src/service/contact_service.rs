//! Contact use-case service.
//!
//! # Responsibility
//! - Provide transport-agnostic CRUD entry points for contact records.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - A failed create or update persists nothing.

use crate::model::contact::{Contact, ContactId, ContactPatch, NewContact};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};

/// Use-case service wrapper for contact CRUD operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all contacts in store insertion order.
    pub fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts()
    }

    /// Gets one contact by stable id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Validates raw input and persists a new contact.
    ///
    /// # Contract
    /// - Returns the stored record with assigned id and both timestamps.
    /// - Validation failure persists nothing.
    pub fn create_contact(&self, input: NewContact) -> RepoResult<Contact> {
        let draft = input.into_draft()?;
        self.repo.create_contact(&draft)
    }

    /// Merges a partial update into an existing contact and persists it.
    ///
    /// # Contract
    /// - Fields omitted from the patch keep their current values; explicit
    ///   nulls clear optional fields and are rejected for required ones.
    /// - `updated_at` is refreshed by the store on the write.
    /// - Returns `NotFound` unchanged when the id is absent.
    pub fn update_contact(&self, id: ContactId, patch: ContactPatch) -> RepoResult<Contact> {
        let existing = self
            .repo
            .get_contact(id)?
            .ok_or(RepoError::NotFound(id))?;

        let merged = patch.apply_to(existing)?;
        self.repo.update_contact(&merged)
    }

    /// Deletes a contact and returns the removed record for confirmation.
    pub fn remove_contact(&self, id: ContactId) -> RepoResult<Contact> {
        self.repo.delete_contact(id)
    }
}
