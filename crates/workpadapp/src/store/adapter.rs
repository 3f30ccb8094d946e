use super::backend::KvBackend;
use crate::error::Result;
use crate::model::{Collaborator, Page};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

pub const PAGES_KEY: &str = "notion-clone-pages";
pub const COLLABORATORS_KEY: &str = "notion-clone-collaborators";
pub const CURRENT_USER_KEY: &str = "notion-clone-current-user";

/// The typed persistence boundary: whole collections in, whole collections
/// out, one fixed key per record.
///
/// Reads never fail — a missing or corrupt record is logged and treated as
/// the empty collection. Write failures propagate; the caller's in-memory
/// state is not rolled back, so callers re-read to observe truth.
pub struct StoreAdapter<B: KvBackend> {
    /// The underlying backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: KvBackend> StoreAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn read_pages(&self) -> Vec<Page> {
        self.read_collection(PAGES_KEY)
    }

    pub fn write_pages(&self, pages: &[Page]) -> Result<()> {
        self.write_collection(PAGES_KEY, pages)
    }

    pub fn read_collaborators(&self) -> Vec<Collaborator> {
        self.read_collection(COLLABORATORS_KEY)
    }

    pub fn write_collaborators(&self, collaborators: &[Collaborator]) -> Result<()> {
        self.write_collection(COLLABORATORS_KEY, collaborators)
    }

    /// The bootstrap collaborator id, stored as a bare string (not JSON).
    pub fn read_current_user(&self) -> Option<Uuid> {
        match self.backend.get(CURRENT_USER_KEY) {
            Ok(Some(raw)) => match Uuid::parse_str(raw.trim()) {
                Ok(id) => Some(id),
                Err(error) => {
                    warn!(key = CURRENT_USER_KEY, %error, "corrupt current-user record, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                warn!(key = CURRENT_USER_KEY, %error, "unreadable current-user record, ignoring");
                None
            }
        }
    }

    pub fn write_current_user(&self, id: Uuid) -> Result<()> {
        self.backend.set(CURRENT_USER_KEY, &id.to_string())
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(error) => {
                    warn!(key, %error, "corrupt record, recovering with empty collection");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(key, %error, "unreadable record, recovering with empty collection");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(key, &raw)
    }
}
