//! JSON file structure store.
//!
//! All structures live in one JSON document that is rewritten on every
//! insert. Good enough for a single console host; not for concurrent
//! processes sharing the file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use doorwright_domain::{Player, Structure, StructureUid};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{PersistResult, RepoError, StructureStorePort};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    last_uid: i64,
    #[serde(default)]
    structures: Vec<Structure>,
}

pub struct JsonFileStructureStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStructureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreDocument, RepoError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default())
            }
            Err(e) => return Err(RepoError::storage("load_structures", e)),
        };
        if raw.trim().is_empty() {
            return Ok(StoreDocument::default());
        }
        serde_json::from_str(&raw).map_err(RepoError::serialization)
    }

    async fn save(&self, document: &StoreDocument) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| RepoError::storage("save_structures", e))?;
        }
        let json =
            serde_json::to_string_pretty(document).map_err(RepoError::serialization)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| RepoError::storage("save_structures", e))
    }

    /// Every stored structure, in insertion order.
    pub async fn list(&self) -> Result<Vec<Structure>, RepoError> {
        Ok(self.load().await?.structures)
    }
}

#[async_trait]
impl StructureStorePort for JsonFileStructureStore {
    async fn add_structure(
        &self,
        structure: Structure,
        creator: &Player,
    ) -> Result<PersistResult, RepoError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;

        let duplicate = document
            .structures
            .iter()
            .any(|s| s.world == structure.world && s.name.key() == structure.name.key());
        if duplicate {
            tracing::debug!(
                player = %creator.id,
                name = %structure.name,
                "Structure with the same name already exists in this world"
            );
            return Ok(PersistResult::cancelled());
        }

        document.last_uid += 1;
        let stored = structure.with_uid(StructureUid::new(document.last_uid));
        document.structures.push(stored.clone());
        self.save(&document).await?;

        tracing::debug!(
            player = %creator.id,
            uid = %stored.uid,
            path = %self.path.display(),
            "Structure written"
        );
        Ok(PersistResult::stored(stored))
    }
}
