//! # Domain Model: Pages, Blocks and Collaborators
//!
//! This module defines the core data structures of the workspace and the
//! patch types used for partial updates.
//!
//! ## The page tree
//!
//! Pages form a tree through a pair of redundant links:
//!
//! - `parent_id`: the owning page, or `None` for a root page.
//! - `children`: the ordered ids of the owned pages.
//!
//! Both ends must stay consistent: whenever `parent_id` of P is X, X's
//! `children` contains P's id, and every id in `children` names an existing
//! page whose `parent_id` points back. Only the page repository mutates
//! these links; [`crate::tree::verify_links`] checks them.
//!
//! ## Blocks
//!
//! A [`Block`] is a typed unit of content owned by exactly one page. Blocks
//! have no lifecycle of their own: they are created, reordered and destroyed
//! only by replacing a page's `content` sequence. Block text may embed
//! `[[Page Title]]` link markers; the model stores them as opaque text and
//! leaves interpretation to clients.
//!
//! ## Persisted shape
//!
//! The serialized form matches the on-disk contract: camelCase field names,
//! epoch-millisecond timestamps, and optional fields omitted when absent.
//! Collections round-trip losslessly through `serde_json`.
//!
//! ## Patches
//!
//! Partial updates are explicit structs with named optional fields
//! ([`PagePatch`], [`CollaboratorPatch`]) applied field by field — never a
//! blind merge. Patches cannot touch ids, timestamps or structural links;
//! those change only through repository operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time truncated to millisecond precision, matching what the store
/// persists. Stamping at full precision would make round-trips lossy.
pub(crate) fn now_ms() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// A node in the workspace tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    /// Short display string, usually an emoji.
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    /// Ordered blocks; sequence order is on-page order.
    pub content: Vec<Block>,
    pub parent_id: Option<Uuid>,
    /// Ordered ids of child pages.
    pub children: Vec<Uuid>,
    pub is_favorite: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Builds a page from creation fields. Structural placement (the parent
    /// side of the link) is the repository's job.
    pub fn new(fields: NewPage, parent_id: Option<Uuid>) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            icon: fields.icon,
            cover_color: fields.cover_color,
            content: fields.content,
            parent_id,
            children: Vec::new(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Caller-supplied fields for page creation.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: String,
    pub icon: String,
    pub cover_color: Option<String>,
    pub content: Vec<Block>,
}

impl NewPage {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: "📄".to_string(),
            cover_color: None,
            content: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_content(mut self, content: Vec<Block>) -> Self {
        self.content = content;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Heading1,
    Heading2,
    Heading3,
    List,
    Checklist,
    Code,
    Task,
    Note,
    Activity,
}

/// A typed unit of content belonging to exactly one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: BlockType,
    pub content: String,
    /// Meaningful only for checklist/task blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Set when the content represents a resolved page link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_page_id: Option<Uuid>,
}

impl Block {
    pub fn new(kind: BlockType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            checked: None,
            linked_page_id: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Default for Role {
    fn default() -> Self {
        Self::Editor
    }
}

/// An identity with a role in the workspace. Exactly one collaborator is
/// the bootstrap "current user"; see the collaborator repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: Uuid,
    pub name: String,
    /// Case-insensitive-unique across the collection.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    pub added_by: Uuid,
}

/// Partial update for a page. `None` fields are left untouched.
///
/// `cover_color` is doubly optional: the outer level is "change it or not",
/// the inner level is "set a color or clear it".
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub cover_color: Option<Option<String>>,
    pub content: Option<Vec<Block>>,
    pub is_favorite: Option<bool>,
}

impl PagePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn cover_color(mut self, color: Option<String>) -> Self {
        self.cover_color = Some(color);
        self
    }

    pub fn content(mut self, content: Vec<Block>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    /// Applies the patch field by field. Timestamps are the caller's job.
    pub fn apply(self, page: &mut Page) {
        if let Some(title) = self.title {
            page.title = title;
        }
        if let Some(icon) = self.icon {
            page.icon = icon;
        }
        if let Some(cover_color) = self.cover_color {
            page.cover_color = cover_color;
        }
        if let Some(content) = self.content {
            page.content = content;
        }
        if let Some(is_favorite) = self.is_favorite {
            page.is_favorite = is_favorite;
        }
    }
}

/// Partial update for a collaborator. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CollaboratorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub role: Option<Role>,
}

impl CollaboratorPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = Some(avatar);
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn apply(self, collaborator: &mut Collaborator) {
        if let Some(name) = self.name {
            collaborator.name = name;
        }
        if let Some(email) = self.email {
            collaborator.email = email;
        }
        if let Some(avatar) = self.avatar {
            collaborator.avatar = avatar;
        }
        if let Some(role) = self.role {
            collaborator.role = role;
        }
    }
}
