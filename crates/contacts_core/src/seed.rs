//! First-run sample data.
//!
//! # Responsibility
//! - Populate an empty store with the fixed pair of sample contacts.
//!
//! # Invariants
//! - Seeding is a no-op on any store that already holds contacts.

use crate::model::contact::{Birthday, ContactDraft};
use crate::repo::contact_repo::{ContactRepository, RepoResult};
use log::info;

/// Inserts the two fixture contacts when the store is empty.
///
/// Returns how many records were inserted (0 or 2).
pub fn ensure_sample_contacts<R: ContactRepository>(repo: &R) -> RepoResult<usize> {
    if repo.count_contacts()? > 0 {
        info!("event=seed module=seed status=skip reason=store_not_empty");
        return Ok(0);
    }

    let fixtures = sample_drafts()?;
    for draft in &fixtures {
        repo.create_contact(draft)?;
    }

    info!(
        "event=seed module=seed status=ok inserted={}",
        fixtures.len()
    );
    Ok(fixtures.len())
}

fn sample_drafts() -> RepoResult<Vec<ContactDraft>> {
    Ok(vec![
        ContactDraft {
            first_name: "Happiness".to_string(),
            last_name: "Ncube".to_string(),
            email: "happiness@gmail.com".to_string(),
            favorite_color: Some("Blue".to_string()),
            birthday: Some(Birthday::parse("2000-01-01")?),
        },
        ContactDraft {
            first_name: "Thando".to_string(),
            last_name: "Ncube".to_string(),
            email: "thando@gmail.com".to_string(),
            favorite_color: Some("Pink".to_string()),
            birthday: Some(Birthday::parse("2014-03-07")?),
        },
    ])
}
