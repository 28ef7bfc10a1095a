//! Best-effort dual-write persistence for the response ledger.
//!
//! Every change is written to the JSON files and, when configured, to the
//! SQLite document store. A failing sink is logged and never surfaces to the
//! guest or the admin.

pub mod file;

pub use file::{FileStore, LedgerDocuments};

use crate::database::connection::DatabaseManager;
use crate::invitation::{GuestResponse, Invitation, Ledger};
use crate::utils::logging::{log_store_error, log_store_write, log_system_event};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct Persistence {
    files: FileStore,
    documents: Option<DatabaseManager>,
}

impl Persistence {
    pub fn new(files: FileStore, documents: Option<DatabaseManager>) -> Self {
        Self { files, documents }
    }

    pub fn documents(&self) -> Option<&DatabaseManager> {
        self.documents.as_ref()
    }

    /// Loads the ledger from the files, falling back to the document store
    /// when the files hold no invitations.
    pub async fn load(&self) -> Ledger {
        let from_files = match self.files.load().await {
            Ok(ledger) => ledger,
            Err(e) => {
                log_store_error("load", "files", &e.to_string());
                Ledger::default()
            }
        };

        if !from_files.is_empty() {
            log_system_event(
                "Ledger loaded",
                Some(&format!(
                    "{} invitations from {}",
                    from_files.invitation_count(),
                    self.files.dir().display()
                )),
            );
            return from_files;
        }

        let Some(db) = &self.documents else {
            return from_files;
        };

        match db.load_ledger().await {
            Ok(ledger) => {
                if !ledger.is_empty() {
                    log_system_event(
                        "Ledger loaded",
                        Some(&format!(
                            "{} invitations from the document store",
                            ledger.invitation_count()
                        )),
                    );
                }
                ledger
            }
            Err(e) => {
                log_store_error("load", "document store", &e.to_string());
                from_files
            }
        }
    }

    pub async fn save_publication(&self, ledger: &Ledger, invitation: &Invitation) {
        match LedgerDocuments::encode(ledger) {
            Ok(documents) => match self.files.write_all(&documents).await {
                Ok(()) => log_store_write("publish", "files", &invitation.inv_id),
                Err(e) => log_store_error("publish", "files", &e.to_string()),
            },
            Err(e) => log_store_error("publish", "files", &e.to_string()),
        }

        if let Some(db) = &self.documents {
            match db.save_publication(invitation).await {
                Ok(()) => log_store_write("publish", "document store", &invitation.inv_id),
                Err(e) => log_store_error("publish", "document store", &e.to_string()),
            }
        }
    }

    pub async fn save_response(
        &self,
        ledger: &Ledger,
        inv_id: &str,
        user_id: i64,
        response: &GuestResponse,
    ) {
        let key = format!("{inv_id}/{user_id}");

        match LedgerDocuments::encode(ledger) {
            Ok(documents) => match self.files.write_responses(&documents).await {
                Ok(()) => log_store_write("response", "files", &key),
                Err(e) => log_store_error("response", "files", &e.to_string()),
            },
            Err(e) => log_store_error("response", "files", &e.to_string()),
        }

        if let Some(db) = &self.documents {
            match db.save_response(inv_id, user_id, response).await {
                Ok(()) => log_store_write("response", "document store", &key),
                Err(e) => log_store_error("response", "document store", &e.to_string()),
            }
        }
    }
}
