//! Process bootstrap for the contacts HTTP service.
//!
//! Startup is sequential: logging, store connection, seed data, then the
//! listener. A store that cannot be opened is fatal before any traffic is
//! accepted.

use std::process::ExitCode;
use std::sync::Arc;

use contacts_core::db::open_db;
use contacts_core::{ensure_sample_contacts, init_logging, SqliteContactRepository};
use contacts_server::{serve, AppState, ServerConfig};
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=startup module=main status=error stage=db_open error={err}");
            eprintln!("failed to open contact store `{}`: {err}", config.db_path);
            return ExitCode::FAILURE;
        }
    };

    let seeded = SqliteContactRepository::try_new(&conn)
        .map_err(|err| err.to_string())
        .and_then(|repo| ensure_sample_contacts(&repo).map_err(|err| err.to_string()));
    match seeded {
        Ok(inserted) => {
            info!("event=startup module=main status=ok stage=seed inserted={inserted}");
        }
        Err(err) => {
            error!("event=startup module=main status=error stage=seed error={err}");
            eprintln!("failed to seed contact store: {err}");
            return ExitCode::FAILURE;
        }
    }

    let addr = config.addr();
    let state = Arc::new(AppState::new(conn));

    println!("Contacts API listening on http://{addr}");
    if let Err(err) = serve(state, addr).await {
        error!("event=startup module=main status=error stage=listen error={err}");
        eprintln!("server error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
