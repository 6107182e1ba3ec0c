//! HTTP route layer for contact CRUD.
//!
//! # Responsibility
//! - Map verbs/paths onto `ContactService` calls.
//! - Shape every outcome into the `{success, message?, data?, error?}`
//!   envelope with the right status code.
//!
//! # Invariants
//! - This layer is the sole translator from repository errors to HTTP
//!   status codes; no error kind crosses the boundary untranslated.
//! - No business logic beyond parsing and response shaping.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::json;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use contacts_core::{
    core_version, Contact, ContactId, ContactPatch, ContactService, NewContact, RepoError,
    SqliteContactRepository,
};

/// Shared application state.
///
/// The store connection is the process's only shared mutable resource; it is
/// opened once at bootstrap and serialized behind an async mutex.
pub struct AppState {
    conn: Mutex<Connection>,
}

impl AppState {
    /// Wraps a bootstrapped store connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

/// Uniform response envelope for every route.
#[derive(Debug, Serialize)]
struct ApiEnvelope<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn ok<T: Serialize>(data: T) -> Json<ApiEnvelope<T>> {
    Json(ApiEnvelope {
        success: true,
        message: None,
        data: Some(data),
        error: None,
    })
}

fn ok_with_message<T: Serialize>(message: &str, data: T) -> Json<ApiEnvelope<T>> {
    Json(ApiEnvelope {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
        error: None,
    })
}

/// A translated failure, ready to render as an envelope with a status code.
#[derive(Debug)]
struct ApiFailure {
    status: StatusCode,
    message: String,
    error: Option<String>,
}

impl ApiFailure {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Contact not found".to_string(),
            error: None,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let envelope = ApiEnvelope::<()> {
            success: false,
            message: Some(self.message),
            data: None,
            error: self.error,
        };
        (self.status, Json(envelope)).into_response()
    }
}

/// Translates a repository error for one operation into an HTTP failure.
fn translate(err: RepoError, context: &str) -> ApiFailure {
    match err {
        RepoError::Validation(validation) => ApiFailure {
            status: StatusCode::BAD_REQUEST,
            message: context.to_string(),
            error: Some(validation.to_string()),
        },
        RepoError::NotFound(_) => ApiFailure::not_found(),
        other => {
            warn!("event=store_error module=http context=`{context}` error={other}");
            ApiFailure {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: context.to_string(),
                error: Some(other.to_string()),
            }
        }
    }
}

/// Parses a path id.
///
/// A string that is not a UUID cannot name a record, so malformed ids are
/// answered as not-found without touching the store.
fn parse_contact_id(raw: &str) -> Result<ContactId, ApiFailure> {
    Uuid::parse_str(raw).map_err(|_| ApiFailure::not_found())
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/contacts", get(list_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves until ctrl-c or SIGTERM.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_start module=http status=ok addr={addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=server_stop module=http reason=ctrl_c"),
        () = terminate => info!("event=server_stop module=http reason=sigterm"),
    }
}

async fn home() -> Json<ApiEnvelope<serde_json::Value>> {
    ok_with_message(
        "Contacts API",
        json!({
            "service": "contacts",
            "version": core_version(),
        }),
    )
}

async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiEnvelope<Vec<Contact>>>, ApiFailure> {
    let conn = state.conn.lock().await;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| translate(err, "Error fetching contacts"))?;
    let service = ContactService::new(repo);

    let contacts = service
        .list_contacts()
        .map_err(|err| translate(err, "Error fetching contacts"))?;
    Ok(ok(contacts))
}

async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<Contact>>, ApiFailure> {
    let id = parse_contact_id(&id)?;

    let conn = state.conn.lock().await;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| translate(err, "Error fetching contact"))?;
    let service = ContactService::new(repo);

    let contact = service
        .get_contact(id)
        .map_err(|err| translate(err, "Error fetching contact"))?
        .ok_or_else(ApiFailure::not_found)?;
    Ok(ok(contact))
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewContact>,
) -> Result<impl IntoResponse, ApiFailure> {
    let conn = state.conn.lock().await;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| translate(err, "Error creating contact"))?;
    let service = ContactService::new(repo);

    let created = service
        .create_contact(input)
        .map_err(|err| translate(err, "Error creating contact"))?;

    info!("event=contact_created module=http id={}", created.id);
    Ok((
        StatusCode::CREATED,
        ok_with_message("Contact created successfully", created),
    ))
}

async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ContactPatch>,
) -> Result<Json<ApiEnvelope<Contact>>, ApiFailure> {
    let id = parse_contact_id(&id)?;

    let conn = state.conn.lock().await;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| translate(err, "Error updating contact"))?;
    let service = ContactService::new(repo);

    let updated = service
        .update_contact(id, patch)
        .map_err(|err| translate(err, "Error updating contact"))?;

    info!("event=contact_updated module=http id={id}");
    Ok(ok_with_message("Contact updated successfully", updated))
}

async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<Contact>>, ApiFailure> {
    let id = parse_contact_id(&id)?;

    let conn = state.conn.lock().await;
    let repo = SqliteContactRepository::try_new(&conn)
        .map_err(|err| translate(err, "Error deleting contact"))?;
    let service = ContactService::new(repo);

    let removed = service
        .remove_contact(id)
        .map_err(|err| translate(err, "Error deleting contact"))?;

    info!("event=contact_deleted module=http id={id}");
    Ok(ok_with_message("Contact deleted successfully", removed))
}
