use super::StoreError;
use crate::invitation::{Invitation, Ledger, ResponseMap};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

const INVITATIONS_FILE: &str = "invitations.json";
const RESPONSES_FILE: &str = "responses.json";
const CURRENT_FILE: &str = "current.json";

/// Flat JSON copy of the ledger: `invitations.json` maps ids to invitations,
/// `responses.json` maps ids to per-user answers and `current.json` holds the
/// current invitation or `null`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

/// Pretty-printed contents of the three ledger files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDocuments {
    pub invitations: String,
    pub responses: String,
    pub current: String,
}

impl LedgerDocuments {
    pub fn encode(ledger: &Ledger) -> Result<Self, serde_json::Error> {
        let invitations: BTreeMap<&str, &Invitation> = ledger
            .invitations()
            .map(|inv| (inv.inv_id.as_str(), inv))
            .collect();

        Ok(Self {
            invitations: serde_json::to_string_pretty(&invitations)?,
            responses: serde_json::to_string_pretty(ledger.all_responses())?,
            current: serde_json::to_string_pretty(&ledger.current())?,
        })
    }
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Reads the ledger. Missing files count as empty; a file that fails to
    /// parse is reported as an error.
    pub async fn load(&self) -> Result<Ledger, StoreError> {
        let invitations: BTreeMap<String, Invitation> =
            self.read_json(INVITATIONS_FILE).await?.unwrap_or_default();
        let responses: BTreeMap<String, ResponseMap> =
            self.read_json(RESPONSES_FILE).await?.unwrap_or_default();
        let current = self
            .read_json::<Option<Invitation>>(CURRENT_FILE)
            .await?
            .flatten();

        Ok(Ledger::from_parts(
            invitations.into_values(),
            responses,
            current,
        ))
    }

    pub async fn write_all(&self, documents: &LedgerDocuments) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        self.write(INVITATIONS_FILE, &documents.invitations).await?;
        self.write(RESPONSES_FILE, &documents.responses).await?;
        self.write(CURRENT_FILE, &documents.current).await
    }

    pub async fn write_responses(&self, documents: &LedgerDocuments) -> Result<(), StoreError> {
        self.ensure_dir().await?;
        self.write(RESPONSES_FILE, &documents.responses).await
    }

    /// Writes through a temporary file and renames it into place, so an
    /// interrupted write never leaves a truncated ledger file behind.
    async fn write(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let tmp = self.dir.join(format!("{name}.tmp"));
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, self.dir.join(name)).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            warn!("{} is empty, treating it as missing", path.display());
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&raw)?))
    }
}
