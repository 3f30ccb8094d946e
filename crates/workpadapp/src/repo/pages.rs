//! Page repository: CRUD plus tree mutation over the page collection.
//!
//! Structural operations keep the `parent_id`/`children` links consistent
//! on both ends within a single collection write. Deletion is recursive
//! (children before parent, exhaustive over the subtree) and strips every
//! removed id from the surviving pages. Moves are cycle-checked: a page can
//! never become a descendant of itself.

use crate::error::{Result, WorkpadError};
use crate::model::{now_ms, Block, BlockType, NewPage, Page, PagePatch};
use crate::store::{KvBackend, StoreAdapter};
use crate::tree;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Title of the page seeded into an empty workspace.
pub const WELCOME_TITLE: &str = "Welcome to your workspace";

pub struct PageRepository<'a, B: KvBackend> {
    store: &'a StoreAdapter<B>,
}

impl<'a, B: KvBackend> PageRepository<'a, B> {
    pub fn new(store: &'a StoreAdapter<B>) -> Self {
        Self { store }
    }

    /// Reads the full collection. An empty workspace is seeded with the
    /// welcome page, persisted before returning.
    pub fn all(&self) -> Result<Vec<Page>> {
        let pages = self.store.read_pages();
        if pages.is_empty() {
            let seeded = vec![welcome_page()];
            self.store.write_pages(&seeded)?;
            return Ok(seeded);
        }
        Ok(pages)
    }

    pub fn get(&self, id: Uuid) -> Option<Page> {
        self.store.read_pages().into_iter().find(|p| p.id == id)
    }

    /// Creates a page and, when a parent is given, links it into the
    /// parent's `children` within the same write — there is no window where
    /// the page exists unlinked.
    pub fn create(&self, fields: NewPage, parent_id: Option<Uuid>) -> Result<Page> {
        let mut pages = self.store.read_pages();
        let page = Page::new(fields, parent_id);

        if let Some(parent_id) = parent_id {
            let parent = pages
                .iter_mut()
                .find(|p| p.id == parent_id)
                .ok_or(WorkpadError::PageNotFound(parent_id))?;
            parent.children.push(page.id);
            parent.updated_at = page.created_at;
        }

        pages.push(page.clone());
        self.store.write_pages(&pages)?;
        Ok(page)
    }

    /// Merges the patch into the addressed page and refreshes `updated_at`.
    /// A missing id is a no-op.
    pub fn update(&self, id: Uuid, patch: PagePatch) -> Result<()> {
        let mut pages = self.store.read_pages();
        let Some(page) = pages.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "update of missing page ignored");
            return Ok(());
        };
        patch.apply(page);
        page.updated_at = now_ms();
        self.store.write_pages(&pages)
    }

    /// Deletes the page and all transitive descendants, then strips every
    /// removed id from the remaining `children` sequences. One write.
    /// A missing id is a no-op.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let mut pages = self.store.read_pages();
        if !pages.iter().any(|p| p.id == id) {
            debug!(%id, "delete of missing page ignored");
            return Ok(());
        }

        let doomed: HashSet<Uuid> = tree::collect_subtree(&pages, id).into_iter().collect();
        pages.retain(|p| !doomed.contains(&p.id));
        for page in &mut pages {
            page.children.retain(|child| !doomed.contains(child));
        }

        self.store.write_pages(&pages)
    }

    /// Flips `is_favorite`. A missing id is a no-op.
    pub fn toggle_favorite(&self, id: Uuid) -> Result<()> {
        let mut pages = self.store.read_pages();
        let Some(page) = pages.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "favorite toggle of missing page ignored");
            return Ok(());
        };
        page.is_favorite = !page.is_favorite;
        page.updated_at = now_ms();
        self.store.write_pages(&pages)
    }

    /// Reparents a page: unlinks it from its old parent, links it under the
    /// new one (or makes it a root), all in one write.
    ///
    /// Fails with `InvalidMove` when the destination is the page itself or
    /// one of its descendants, and `PageNotFound` when the destination does
    /// not exist. Moving a missing page is a no-op.
    pub fn move_page(&self, id: Uuid, new_parent: Option<Uuid>) -> Result<()> {
        let mut pages = self.store.read_pages();
        let Some(page_idx) = pages.iter().position(|p| p.id == id) else {
            debug!(%id, "move of missing page ignored");
            return Ok(());
        };

        if let Some(dest) = new_parent {
            if dest == id || tree::is_descendant(&pages, dest, id) {
                return Err(WorkpadError::InvalidMove(id));
            }
            if !pages.iter().any(|p| p.id == dest) {
                return Err(WorkpadError::PageNotFound(dest));
            }
        }

        if pages[page_idx].parent_id == new_parent {
            return Ok(());
        }

        let now = now_ms();
        if let Some(old_parent_id) = pages[page_idx].parent_id {
            if let Some(old_parent) = pages.iter_mut().find(|p| p.id == old_parent_id) {
                old_parent.children.retain(|child| *child != id);
                old_parent.updated_at = now;
            }
        }
        if let Some(dest) = new_parent {
            if let Some(parent) = pages.iter_mut().find(|p| p.id == dest) {
                parent.children.push(id);
                parent.updated_at = now;
            }
        }

        let page = &mut pages[page_idx];
        page.parent_id = new_parent;
        page.updated_at = now;

        self.store.write_pages(&pages)
    }
}

/// The page seeded into an empty workspace: a short tour with a heading,
/// an intro and a checked-off feature list.
fn welcome_page() -> Page {
    let content = vec![
        Block::new(BlockType::Heading1, "Start organizing your ideas"),
        Block::new(
            BlockType::Text,
            "This is your first page. Press \"/\" to see every available command.",
        ),
        Block::new(BlockType::Heading2, "Features:"),
        Block::new(BlockType::Checklist, "Create pages and subpages").checked(true),
        Block::new(BlockType::Checklist, "Organize with drag & drop").checked(true),
        Block::new(BlockType::Checklist, "Add pages to favorites").checked(true),
        Block::new(BlockType::Checklist, "Search across your pages").checked(true),
    ];
    Page::new(
        NewPage::titled(WELCOME_TITLE)
            .with_icon("👋")
            .with_content(content),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemKv;
    use crate::tree::verify_links;

    fn store() -> StoreAdapter<MemKv> {
        StoreAdapter::new(MemKv::new())
    }

    #[test]
    fn test_empty_workspace_seeds_welcome_page() {
        let store = store();
        let repo = PageRepository::new(&store);

        let pages = repo.all().unwrap();
        assert_eq!(pages.len(), 1);

        let welcome = &pages[0];
        assert_eq!(welcome.title, WELCOME_TITLE);
        assert_eq!(welcome.content.len(), 7);
        let checked = welcome
            .content
            .iter()
            .filter(|b| b.kind == BlockType::Checklist && b.checked == Some(true))
            .count();
        assert_eq!(checked, 4);
        assert_eq!(welcome.parent_id, None);
        assert!(!welcome.is_favorite);
    }

    #[test]
    fn test_seeding_happens_once() {
        let store = store();
        let repo = PageRepository::new(&store);

        let first = repo.all().unwrap();
        let second = repo.all().unwrap();
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_seeding_write_failure_propagates() {
        let backend = MemKv::new();
        backend.set_simulate_write_error(true);
        let store = StoreAdapter::new(backend);
        let repo = PageRepository::new(&store);

        assert!(repo.all().is_err());
    }

    #[test]
    fn test_create_root_page() {
        let store = store();
        let repo = PageRepository::new(&store);

        let page = repo.create(NewPage::titled("Journal"), None).unwrap();
        assert_eq!(page.parent_id, None);
        assert_eq!(page.created_at, page.updated_at);

        let found = repo.get(page.id).unwrap();
        assert_eq!(found.title, "Journal");
    }

    #[test]
    fn test_create_child_links_both_ends() {
        let store = store();
        let repo = PageRepository::new(&store);

        let a = repo.create(NewPage::titled("A"), None).unwrap();
        let b = repo.create(NewPage::titled("B"), Some(a.id)).unwrap();

        let a_after = repo.get(a.id).unwrap();
        assert_eq!(a_after.children, vec![b.id]);
        assert_eq!(repo.get(b.id).unwrap().parent_id, Some(a.id));
        assert!(verify_links(&store.read_pages()).is_empty());
    }

    #[test]
    fn test_create_under_missing_parent_fails() {
        let store = store();
        let repo = PageRepository::new(&store);

        let ghost = Uuid::new_v4();
        match repo.create(NewPage::titled("Stray"), Some(ghost)) {
            Err(WorkpadError::PageNotFound(id)) => assert_eq!(id, ghost),
            other => panic!("expected PageNotFound, got {:?}", other),
        }
        // Nothing was persisted
        assert!(store.read_pages().is_empty());
    }

    #[test]
    fn test_update_merges_and_stamps() {
        let store = store();
        let repo = PageRepository::new(&store);

        let page = repo.create(NewPage::titled("Draft"), None).unwrap();
        repo.update(page.id, PagePatch::new().title("Final").favorite(true))
            .unwrap();

        let after = repo.get(page.id).unwrap();
        assert_eq!(after.title, "Final");
        assert!(after.is_favorite);
        assert!(after.updated_at >= page.updated_at);
        assert_eq!(after.created_at, page.created_at);
    }

    #[test]
    fn test_update_missing_page_is_noop() {
        let store = store();
        let repo = PageRepository::new(&store);
        repo.create(NewPage::titled("Only"), None).unwrap();

        repo.update(Uuid::new_v4(), PagePatch::new().title("Ghost"))
            .unwrap();
        assert_eq!(store.read_pages().len(), 1);
        assert_eq!(store.read_pages()[0].title, "Only");
    }

    #[test]
    fn test_delete_removes_whole_subtree() {
        let store = store();
        let repo = PageRepository::new(&store);

        let root = repo.create(NewPage::titled("Root"), None).unwrap();
        let mid = repo.create(NewPage::titled("Mid"), Some(root.id)).unwrap();
        let leaf = repo.create(NewPage::titled("Leaf"), Some(mid.id)).unwrap();
        let bystander = repo.create(NewPage::titled("Bystander"), None).unwrap();

        repo.delete(root.id).unwrap();

        let remaining = store.read_pages();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, bystander.id);
        for gone in [root.id, mid.id, leaf.id] {
            assert!(repo.get(gone).is_none());
        }
        assert!(verify_links(&remaining).is_empty());
    }

    #[test]
    fn test_delete_strips_dangling_references() {
        let store = store();
        let repo = PageRepository::new(&store);

        let parent = repo.create(NewPage::titled("Parent"), None).unwrap();
        let child = repo
            .create(NewPage::titled("Child"), Some(parent.id))
            .unwrap();

        repo.delete(child.id).unwrap();

        let parent_after = repo.get(parent.id).unwrap();
        assert!(parent_after.children.is_empty());
        assert!(verify_links(&store.read_pages()).is_empty());
    }

    #[test]
    fn test_delete_is_exhaustive_on_deep_chains() {
        let store = store();
        let repo = PageRepository::new(&store);

        // A single parent chain, each page the only child of the previous
        let mut chain: Vec<Page> = Vec::new();
        for i in 0..1100 {
            let parent_id = chain.last().map(|p| p.id);
            let page = Page::new(NewPage::titled(format!("Level {i}")), parent_id);
            if let Some(parent) = chain.last_mut() {
                parent.children.push(page.id);
            }
            chain.push(page);
        }
        store.write_pages(&chain).unwrap();

        repo.delete(chain[0].id).unwrap();

        // No orphans left behind, no matter how deep the chain
        assert!(store.read_pages().is_empty());
    }

    #[test]
    fn test_delete_missing_page_is_noop() {
        let store = store();
        let repo = PageRepository::new(&store);
        repo.create(NewPage::titled("Keep"), None).unwrap();

        repo.delete(Uuid::new_v4()).unwrap();
        assert_eq!(store.read_pages().len(), 1);
    }

    #[test]
    fn test_toggle_favorite_flips() {
        let store = store();
        let repo = PageRepository::new(&store);
        let page = repo.create(NewPage::titled("Fav"), None).unwrap();

        repo.toggle_favorite(page.id).unwrap();
        assert!(repo.get(page.id).unwrap().is_favorite);

        repo.toggle_favorite(page.id).unwrap();
        assert!(!repo.get(page.id).unwrap().is_favorite);
    }

    #[test]
    fn test_move_child_to_root() {
        let store = store();
        let repo = PageRepository::new(&store);

        let a = repo.create(NewPage::titled("A"), None).unwrap();
        let b = repo.create(NewPage::titled("B"), Some(a.id)).unwrap();

        repo.move_page(b.id, None).unwrap();

        let a_after = repo.get(a.id).unwrap();
        let b_after = repo.get(b.id).unwrap();
        assert!(!a_after.children.contains(&b.id));
        assert_eq!(b_after.parent_id, None);
        assert!(verify_links(&store.read_pages()).is_empty());
    }

    #[test]
    fn test_move_between_parents() {
        let store = store();
        let repo = PageRepository::new(&store);

        let a = repo.create(NewPage::titled("A"), None).unwrap();
        let b = repo.create(NewPage::titled("B"), None).unwrap();
        let child = repo.create(NewPage::titled("C"), Some(a.id)).unwrap();

        repo.move_page(child.id, Some(b.id)).unwrap();

        assert!(repo.get(a.id).unwrap().children.is_empty());
        assert_eq!(repo.get(b.id).unwrap().children, vec![child.id]);
        assert_eq!(repo.get(child.id).unwrap().parent_id, Some(b.id));
        assert!(verify_links(&store.read_pages()).is_empty());
    }

    #[test]
    fn test_move_into_itself_is_rejected() {
        let store = store();
        let repo = PageRepository::new(&store);
        let a = repo.create(NewPage::titled("A"), None).unwrap();

        match repo.move_page(a.id, Some(a.id)) {
            Err(WorkpadError::InvalidMove(id)) => assert_eq!(id, a.id),
            other => panic!("expected InvalidMove, got {:?}", other),
        }
    }

    #[test]
    fn test_move_into_descendant_is_rejected() {
        let store = store();
        let repo = PageRepository::new(&store);

        let root = repo.create(NewPage::titled("Root"), None).unwrap();
        let mid = repo.create(NewPage::titled("Mid"), Some(root.id)).unwrap();
        let leaf = repo.create(NewPage::titled("Leaf"), Some(mid.id)).unwrap();

        assert!(matches!(
            repo.move_page(root.id, Some(leaf.id)),
            Err(WorkpadError::InvalidMove(_))
        ));
        // Tree unchanged
        assert_eq!(repo.get(root.id).unwrap().parent_id, None);
        assert!(verify_links(&store.read_pages()).is_empty());
    }

    #[test]
    fn test_move_to_missing_destination_fails() {
        let store = store();
        let repo = PageRepository::new(&store);
        let a = repo.create(NewPage::titled("A"), None).unwrap();

        let ghost = Uuid::new_v4();
        match repo.move_page(a.id, Some(ghost)) {
            Err(WorkpadError::PageNotFound(id)) => assert_eq!(id, ghost),
            other => panic!("expected PageNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_move_missing_page_is_noop() {
        let store = store();
        let repo = PageRepository::new(&store);
        let a = repo.create(NewPage::titled("A"), None).unwrap();

        repo.move_page(Uuid::new_v4(), Some(a.id)).unwrap();
        assert!(repo.get(a.id).unwrap().children.is_empty());
    }

    #[test]
    fn test_links_stay_consistent_across_mixed_operations() {
        let store = store();
        let repo = PageRepository::new(&store);

        let a = repo.create(NewPage::titled("A"), None).unwrap();
        let b = repo.create(NewPage::titled("B"), Some(a.id)).unwrap();
        let c = repo.create(NewPage::titled("C"), Some(b.id)).unwrap();
        assert!(verify_links(&store.read_pages()).is_empty());

        repo.move_page(c.id, Some(a.id)).unwrap();
        assert!(verify_links(&store.read_pages()).is_empty());

        repo.delete(b.id).unwrap();
        assert!(verify_links(&store.read_pages()).is_empty());

        repo.move_page(c.id, None).unwrap();
        assert!(verify_links(&store.read_pages()).is_empty());

        repo.delete(a.id).unwrap();
        let remaining = store.read_pages();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, c.id);
        assert!(verify_links(&remaining).is_empty());
    }

    #[test]
    fn test_create_write_failure_propagates() {
        let store = store();
        let repo = PageRepository::new(&store);
        repo.create(NewPage::titled("First"), None).unwrap();

        // A failed write surfaces as Err and the stored collection is intact
        store.backend.set_simulate_write_error(true);
        assert!(repo.create(NewPage::titled("Second"), None).is_err());

        store.backend.set_simulate_write_error(false);
        let pages = store.read_pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "First");
    }
}
