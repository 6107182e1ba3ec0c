//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the record-store CRUD API over the canonical `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Contact::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `created_at`/`updated_at` are owned by this layer; callers never set
//!   them directly.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::contact::{Birthday, Contact, ContactDraft, ContactId, ContactValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    uuid,
    first_name,
    last_name,
    email,
    favorite_color,
    birthday,
    created_at,
    updated_at
FROM contacts";

const CONTACTS_TABLE: &str = "contacts";

const REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "first_name",
    "last_name",
    "email",
    "favorite_color",
    "birthday",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store contract for contact CRUD operations.
///
/// Implementations assign ids and own both timestamps; callers hand in
/// validated drafts and full records only.
pub trait ContactRepository {
    /// Persists a draft, assigning a fresh id and both timestamps.
    /// Returns the full record as stored.
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact>;

    /// Fetches one contact by id, or `None` when absent.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;

    /// Lists all contacts in store insertion order.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;

    /// Writes the full record back under its id and refreshes `updated_at`.
    /// Returns the record as stored, or `NotFound` when the id is absent.
    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact>;

    /// Hard-deletes one contact and returns the removed record, or
    /// `NotFound` when the id is absent.
    fn delete_contact(&self, id: ContactId) -> RepoResult<Contact>;

    /// Counts all stored contacts.
    fn count_contacts(&self) -> RepoResult<u64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a connection after verifying it was bootstrapped.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match
    ///   what this binary expects.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the physical
    ///   schema lacks the contacts storage shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [CONTACTS_TABLE],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            return Err(RepoError::MissingRequiredTable(CONTACTS_TABLE));
        }

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({CONTACTS_TABLE});"))?;
        let mut present = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            present.push(row.get::<_, String>("name")?);
        }
        for column in REQUIRED_COLUMNS {
            if !present.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: CONTACTS_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }

    fn fetch_required(&self, id: ContactId) -> RepoResult<Contact> {
        self.get_contact(id)?.ok_or(RepoError::NotFound(id))
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        let id = Uuid::new_v4();

        self.conn.execute(
            "INSERT INTO contacts (
                uuid,
                first_name,
                last_name,
                email,
                favorite_color,
                birthday
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.email.as_str(),
                draft.favorite_color.as_deref(),
                draft.birthday.as_ref().map(Birthday::as_str),
            ],
        )?;

        // Read back so store-assigned timestamps reach the caller.
        self.fetch_required(id)
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE uuid = ?1;"))?;

        stmt.query_row([id.to_string()], |row| Ok(parse_contact_row(row)))
            .optional()?
            .transpose()
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY rowid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                favorite_color = ?4,
                birthday = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                contact.first_name.as_str(),
                contact.last_name.as_str(),
                contact.email.as_str(),
                contact.favorite_color.as_deref(),
                contact.birthday.as_ref().map(Birthday::as_str),
                contact.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(contact.id));
        }

        self.fetch_required(contact.id)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<Contact> {
        let removed = self.fetch_required(id)?;

        self.conn
            .execute("DELETE FROM contacts WHERE uuid = ?1;", [id.to_string()])?;

        Ok(removed)
    }

    fn count_contacts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in contacts.uuid"))
    })?;

    let birthday = match row.get::<_, Option<String>>("birthday")? {
        Some(value) => Some(Birthday::parse(&value).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid birthday value `{value}` in contacts.birthday"
            ))
        })?),
        None => None,
    };

    let contact = Contact {
        id,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        favorite_color: row.get("favorite_color")?,
        birthday,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    contact.validate()?;
    Ok(contact)
}
