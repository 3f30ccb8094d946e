//! # Workpad CLI
//!
//! A thin terminal client over the `workpadapp` library. This binary owns
//! argument parsing, page/collaborator lookup by human-friendly queries,
//! and rendering — all business logic and persistence live in the library.
//!
//! Data lives in a per-user directory (override with `--data-dir`); log
//! output is controlled through `RUST_LOG` and goes to stderr.

mod args;
mod render;

use anyhow::{bail, Context};
use args::{Cli, CollabCommands, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use uuid::Uuid;
use workpadapp::model::{Collaborator, NewPage, Page, PagePatch};
use workpadapp::repo::{CollaboratorRepository, PageRepository};
use workpadapp::store::{FsKv, StoreAdapter};
use workpadapp::tree;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };

    let store = StoreAdapter::new(FsKv::new(data_dir));
    let pages = PageRepository::new(&store);
    let collaborators = CollaboratorRepository::new(&store);

    match cli.command {
        Commands::List => {
            let all = pages.all()?;
            render::print_tree(&tree::flatten(&all));
        }
        Commands::Show { page } => {
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            let Some(found) = all.iter().find(|p| p.id == id) else {
                bail!("No page matching '{page}'");
            };
            render::print_page(found);
        }
        Commands::New {
            title,
            parent,
            icon,
        } => {
            let title = title.join(" ");
            if title.trim().is_empty() {
                bail!("A page needs a title");
            }
            let all = pages.all()?;
            let parent_id = parent.map(|q| resolve_page(&all, &q)).transpose()?;
            let mut fields = NewPage::titled(title);
            if let Some(icon) = icon {
                fields = fields.with_icon(icon);
            }
            let page = pages.create(fields, parent_id)?;
            println!("Created {} {}", page.icon, page.title);
        }
        Commands::Rename { page, title } => {
            let title = title.join(" ");
            if title.trim().is_empty() {
                bail!("A page needs a title");
            }
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            pages.update(id, PagePatch::new().title(title))?;
        }
        Commands::Icon { page, icon } => {
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            pages.update(id, PagePatch::new().icon(icon))?;
        }
        Commands::Delete { page } => {
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            let subtree = tree::collect_subtree(&all, id);
            pages.delete(id)?;
            println!("Deleted {} page(s)", subtree.len());
        }
        Commands::Move { page, to } => {
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            let dest = to.map(|q| resolve_page(&all, &q)).transpose()?;
            pages.move_page(id, dest)?;
        }
        Commands::Fav { page } => {
            let all = pages.all()?;
            let id = resolve_page(&all, &page)?;
            pages.toggle_favorite(id)?;
        }
        Commands::Check => {
            let all = pages.all()?;
            let violations = tree::verify_links(&all);
            if violations.is_empty() {
                println!("{} page(s), links consistent", all.len());
            } else {
                for violation in &violations {
                    eprintln!("{violation}");
                }
                bail!("{} broken link(s)", violations.len());
            }
        }
        Commands::Collab { command } => run_collab(&collaborators, command)?,
    }

    Ok(())
}

fn run_collab(
    repo: &CollaboratorRepository<'_, FsKv>,
    command: CollabCommands,
) -> anyhow::Result<()> {
    match command {
        CollabCommands::List => {
            let all = repo.all()?;
            let me = repo.current_user_id()?;
            render::print_collaborators(&all, me);
        }
        CollabCommands::Add { name, email, role } => {
            let added = repo.add(&name, &email, role.into())?;
            println!("Added {} <{}>", added.name, added.email);
        }
        CollabCommands::Rm { collaborator } => {
            let all = repo.all()?;
            let id = resolve_collaborator(&all, &collaborator)?;
            repo.remove(id)?;
        }
        CollabCommands::Role { collaborator, role } => {
            let all = repo.all()?;
            let id = resolve_collaborator(&all, &collaborator)?;
            repo.update(
                id,
                workpadapp::model::CollaboratorPatch::new().role(role.into()),
            )?;
        }
    }
    Ok(())
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "workpad", "workpad")
        .context("could not determine a data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolves a page query: a full or abbreviated id, an exact title
/// (case-insensitive), or a unique title prefix.
fn resolve_page(pages: &[Page], query: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(query) {
        if pages.iter().any(|p| p.id == id) {
            return Ok(id);
        }
        bail!("No page with id {id}");
    }

    let needle = query.to_lowercase();
    let id_matches: Vec<Uuid> = pages
        .iter()
        .filter(|p| p.id.to_string().starts_with(&needle))
        .map(|p| p.id)
        .collect();
    match id_matches.as_slice() {
        [id] => return Ok(*id),
        [] => {}
        _ => bail!("Ambiguous id prefix '{query}'"),
    }

    let exact: Vec<Uuid> = pages
        .iter()
        .filter(|p| p.title.to_lowercase() == needle)
        .map(|p| p.id)
        .collect();
    match exact.as_slice() {
        [id] => return Ok(*id),
        [] => {}
        _ => bail!("Several pages are titled '{query}'; use the id"),
    }

    let prefixed: Vec<Uuid> = pages
        .iter()
        .filter(|p| p.title.to_lowercase().starts_with(&needle))
        .map(|p| p.id)
        .collect();
    match prefixed.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No page matching '{query}'"),
        _ => bail!("'{query}' matches several pages; be more specific"),
    }
}

/// Resolves a collaborator query: id, id prefix, or email.
fn resolve_collaborator(collaborators: &[Collaborator], query: &str) -> anyhow::Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(query) {
        if collaborators.iter().any(|c| c.id == id) {
            return Ok(id);
        }
        bail!("No collaborator with id {id}");
    }

    let needle = query.to_lowercase();
    if let Some(found) = collaborators
        .iter()
        .find(|c| c.email.to_lowercase() == needle)
    {
        return Ok(found.id);
    }

    let id_matches: Vec<Uuid> = collaborators
        .iter()
        .filter(|c| c.id.to_string().starts_with(&needle))
        .map(|c| c.id)
        .collect();
    match id_matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("No collaborator matching '{query}'"),
        _ => bail!("Ambiguous id prefix '{query}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workpadapp::model::NewPage;

    fn sample_pages() -> Vec<Page> {
        vec![
            Page::new(NewPage::titled("Work"), None),
            Page::new(NewPage::titled("Workout plan"), None),
            Page::new(NewPage::titled("Journal"), None),
        ]
    }

    #[test]
    fn test_resolve_by_full_id() {
        let pages = sample_pages();
        let id = pages[2].id;
        assert_eq!(resolve_page(&pages, &id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_resolve_by_exact_title_beats_prefix() {
        let pages = sample_pages();
        // "work" is an exact (case-insensitive) match for "Work" even though
        // it also prefixes "Workout plan"
        assert_eq!(resolve_page(&pages, "work").unwrap(), pages[0].id);
    }

    #[test]
    fn test_resolve_by_unique_prefix() {
        let pages = sample_pages();
        assert_eq!(resolve_page(&pages, "jour").unwrap(), pages[2].id);
    }

    #[test]
    fn test_resolve_ambiguous_prefix_fails() {
        let mut pages = sample_pages();
        pages.push(Page::new(NewPage::titled("Journeys"), None));
        assert!(resolve_page(&pages, "jou").is_err());
    }

    #[test]
    fn test_resolve_unknown_fails() {
        let pages = sample_pages();
        assert!(resolve_page(&pages, "nothing").is_err());
    }

    #[test]
    fn test_resolve_unknown_uuid_fails() {
        let pages = sample_pages();
        assert!(resolve_page(&pages, &Uuid::new_v4().to_string()).is_err());
    }
}
