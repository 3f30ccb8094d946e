//! Tree traversal over the page collection and verification of the
//! parent/child link invariant.
//!
//! Pages store the tree redundantly on both ends (`parent_id` and
//! `children`). The repository keeps both sides in step; this module is the
//! read side — subtree collection for recursive deletion, descendant checks
//! for move validation, depth-first flattening for display, and
//! [`verify_links`] as the explicit invariant checker.

use crate::model::Page;
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

// Guard for the upward parent walk, which has no seen-set.
const MAX_DEPTH: usize = 1000;

/// A page paired with its nesting level, in depth-first order.
#[derive(Debug, Clone)]
pub struct TreeItem {
    pub page: Page,
    pub level: usize,
}

/// Collects `root` and all its transitive descendants, children listed
/// before their parent. Sibling order follows each page's `children`
/// sequence. Unknown ids are skipped.
///
/// The walk is iterative and exhaustive: depth is unbounded, and the
/// seen-set keeps corrupt cyclic trees from looping.
pub fn collect_subtree(pages: &[Page], root: Uuid) -> Vec<Uuid> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    // (id, expanded): the second visit emits the id, after its children.
    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            out.push(id);
            continue;
        }
        if !seen.insert(id) {
            continue;
        }
        let Some(page) = pages.iter().find(|p| p.id == id) else {
            continue;
        };
        stack.push((id, true));
        for child in page.children.iter().rev() {
            stack.push((*child, false));
        }
    }
    out
}

/// Whether `id` sits strictly below `ancestor` — walks up the parent links
/// from `id`, with a depth guard.
pub fn is_descendant(pages: &[Page], id: Uuid, ancestor: Uuid) -> bool {
    let mut current = id;
    for _ in 0..MAX_DEPTH {
        let Some(parent) = pages
            .iter()
            .find(|p| p.id == current)
            .and_then(|p| p.parent_id)
        else {
            return false;
        };
        if parent == ancestor {
            return true;
        }
        current = parent;
    }
    false
}

/// Depth-first flattening of the whole collection: roots in collection
/// order, each followed by its subtree in `children` order.
///
/// A page whose `parent_id` names a missing page is treated as a root so
/// corruption never makes data invisible; [`verify_links`] still reports
/// the broken link.
pub fn flatten(pages: &[Page]) -> Vec<TreeItem> {
    let known: HashSet<Uuid> = pages.iter().map(|p| p.id).collect();
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for page in pages {
        let rooted = match page.parent_id {
            None => true,
            Some(parent) => !known.contains(&parent),
        };
        if rooted {
            flatten_from(pages, page.id, &mut out, &mut seen);
        }
    }
    out
}

fn flatten_from(pages: &[Page], root: Uuid, out: &mut Vec<TreeItem>, seen: &mut HashSet<Uuid>) {
    let mut stack = vec![(root, 0usize)];
    while let Some((id, level)) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let Some(page) = pages.iter().find(|p| p.id == id) else {
            continue;
        };
        out.push(TreeItem {
            page: page.clone(),
            level,
        });
        for child in page.children.iter().rev() {
            stack.push((*child, level + 1));
        }
    }
}

/// A broken parent/child link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    /// `page.parent_id` references an id not in the collection.
    MissingParent { page: Uuid, parent: Uuid },
    /// The parent exists but its `children` does not list the page.
    UnlistedChild { page: Uuid, parent: Uuid },
    /// A `children` entry references an id not in the collection.
    DanglingChild { parent: Uuid, child: Uuid },
    /// The child exists but its `parent_id` does not point back.
    MisparentedChild { parent: Uuid, child: Uuid },
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParent { page, parent } => {
                write!(f, "page {page} names missing parent {parent}")
            }
            Self::UnlistedChild { page, parent } => {
                write!(f, "page {page} is not listed in children of {parent}")
            }
            Self::DanglingChild { parent, child } => {
                write!(f, "page {parent} lists missing child {child}")
            }
            Self::MisparentedChild { parent, child } => {
                write!(f, "child {child} of {parent} points at a different parent")
            }
        }
    }
}

/// Checks the bidirectional link invariant for the whole collection.
/// An empty result means the tree is consistent.
pub fn verify_links(pages: &[Page]) -> Vec<LinkViolation> {
    let mut violations = Vec::new();

    for page in pages {
        if let Some(parent_id) = page.parent_id {
            match pages.iter().find(|p| p.id == parent_id) {
                None => violations.push(LinkViolation::MissingParent {
                    page: page.id,
                    parent: parent_id,
                }),
                Some(parent) => {
                    if !parent.children.contains(&page.id) {
                        violations.push(LinkViolation::UnlistedChild {
                            page: page.id,
                            parent: parent_id,
                        });
                    }
                }
            }
        }

        for child_id in &page.children {
            match pages.iter().find(|p| p.id == *child_id) {
                None => violations.push(LinkViolation::DanglingChild {
                    parent: page.id,
                    child: *child_id,
                }),
                Some(child) => {
                    if child.parent_id != Some(page.id) {
                        violations.push(LinkViolation::MisparentedChild {
                            parent: page.id,
                            child: *child_id,
                        });
                    }
                }
            }
        }
    }

    violations
}
