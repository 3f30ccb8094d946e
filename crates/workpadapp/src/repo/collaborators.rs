//! Collaborator repository: CRUD over the flat collaborator list plus the
//! local identity bootstrap.
//!
//! The workspace always has exactly one "current user": an id persisted
//! once under its own key and never reassigned. The matching admin
//! collaborator record is created on first access and re-created on any
//! read that finds it missing — the check runs on every read, not just the
//! first load, so a wiped collaborator record heals itself.

use crate::error::{Result, WorkpadError};
use crate::model::{now_ms, Collaborator, CollaboratorPatch, Role};
use crate::store::{KvBackend, StoreAdapter};
use tracing::debug;
use uuid::Uuid;

const BOOTSTRAP_NAME: &str = "You";
const BOOTSTRAP_EMAIL: &str = "user@local.com";

pub struct CollaboratorRepository<'a, B: KvBackend> {
    store: &'a StoreAdapter<B>,
}

impl<'a, B: KvBackend> CollaboratorRepository<'a, B> {
    pub fn new(store: &'a StoreAdapter<B>) -> Self {
        Self { store }
    }

    /// The bootstrap collaborator id. Allocated, persisted and backed by an
    /// admin collaborator record on first access; read-only ever after.
    pub fn current_user_id(&self) -> Result<Uuid> {
        if let Some(id) = self.store.read_current_user() {
            return Ok(id);
        }

        let id = Uuid::new_v4();
        self.store.write_current_user(id)?;

        let mut collaborators = self.store.read_collaborators();
        if !collaborators.iter().any(|c| c.id == id) {
            collaborators.push(bootstrap_collaborator(id));
            self.store.write_collaborators(&collaborators)?;
        }
        Ok(id)
    }

    /// Reads the full collection, healing a missing current-user record
    /// first. Persists only when it had to create one.
    pub fn all(&self) -> Result<Vec<Collaborator>> {
        let me = self.current_user_id()?;
        let mut collaborators = self.store.read_collaborators();
        if !collaborators.iter().any(|c| c.id == me) {
            collaborators.push(bootstrap_collaborator(me));
            self.store.write_collaborators(&collaborators)?;
        }
        Ok(collaborators)
    }

    pub fn get(&self, id: Uuid) -> Option<Collaborator> {
        self.store
            .read_collaborators()
            .into_iter()
            .find(|c| c.id == id)
    }

    /// Adds a collaborator. Emails are unique case-insensitively; a clash
    /// fails with `DuplicateEmail` and leaves the collection unchanged.
    pub fn add(&self, name: &str, email: &str, role: Role) -> Result<Collaborator> {
        let me = self.current_user_id()?;
        let mut collaborators = self.all()?;

        let needle = email.to_lowercase();
        if collaborators
            .iter()
            .any(|c| c.email.to_lowercase() == needle)
        {
            return Err(WorkpadError::DuplicateEmail(email.to_string()));
        }

        let collaborator = Collaborator {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
            role,
            added_at: now_ms(),
            added_by: me,
        };
        collaborators.push(collaborator.clone());
        self.store.write_collaborators(&collaborators)?;
        Ok(collaborator)
    }

    /// Merges the patch into the addressed collaborator. A missing id is a
    /// no-op. A patched email clashing with another collaborator fails with
    /// `DuplicateEmail`, same as `add`.
    pub fn update(&self, id: Uuid, patch: CollaboratorPatch) -> Result<()> {
        let mut collaborators = self.store.read_collaborators();
        if let Some(email) = &patch.email {
            let needle = email.to_lowercase();
            if collaborators
                .iter()
                .any(|c| c.id != id && c.email.to_lowercase() == needle)
            {
                return Err(WorkpadError::DuplicateEmail(email.clone()));
            }
        }
        let Some(collaborator) = collaborators.iter_mut().find(|c| c.id == id) else {
            debug!(%id, "update of missing collaborator ignored");
            return Ok(());
        };
        patch.apply(collaborator);
        self.store.write_collaborators(&collaborators)
    }

    /// Renames the bootstrap current user (and optionally its email).
    pub fn update_current_user(&self, name: &str, email: Option<&str>) -> Result<()> {
        let me = self.current_user_id()?;
        let mut patch = CollaboratorPatch::new().name(name);
        if let Some(email) = email {
            patch = patch.email(email);
        }
        self.update(me, patch)
    }

    /// Removes a collaborator. The current user cannot remove themselves;
    /// removing a missing id is a no-op.
    pub fn remove(&self, id: Uuid) -> Result<()> {
        let me = self.current_user_id()?;
        if id == me {
            return Err(WorkpadError::SelfRemoval);
        }

        let mut collaborators = self.store.read_collaborators();
        let before = collaborators.len();
        collaborators.retain(|c| c.id != id);
        if collaborators.len() == before {
            debug!(%id, "removal of missing collaborator ignored");
            return Ok(());
        }
        self.store.write_collaborators(&collaborators)
    }
}

fn bootstrap_collaborator(id: Uuid) -> Collaborator {
    Collaborator {
        id,
        name: BOOTSTRAP_NAME.to_string(),
        email: BOOTSTRAP_EMAIL.to_string(),
        avatar: None,
        role: Role::Admin,
        added_at: now_ms(),
        added_by: id,
    }
}
