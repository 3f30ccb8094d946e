//! Terminal rendering. Everything user-facing goes through here; the rest
//! of the binary passes data structures around.

use console::style;
use uuid::Uuid;
use workpadapp::model::{Block, BlockType, Collaborator, Page};
use workpadapp::tree::TreeItem;

/// First segment of a UUID, enough to address pages on the command line.
pub fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

pub fn print_tree(items: &[TreeItem]) {
    for item in items {
        let indent = "  ".repeat(item.level);
        let star = if item.page.is_favorite { " ★" } else { "" };
        println!(
            "{}{} {}{}  {}",
            indent,
            item.page.icon,
            item.page.title,
            style(star).yellow(),
            style(short_id(item.page.id)).dim()
        );
    }
}

pub fn print_page(page: &Page) {
    println!(
        "{} {}  {}",
        page.icon,
        style(&page.title).bold(),
        style(short_id(page.id)).dim()
    );
    if let Some(color) = &page.cover_color {
        println!("{}", style(format!("cover: {}", color)).dim());
    }
    if !page.content.is_empty() {
        println!();
        for block in &page.content {
            println!("{}", block_line(block));
        }
    }
}

pub fn block_line(block: &Block) -> String {
    match block.kind {
        BlockType::Heading1 => format!("{}", style(format!("# {}", block.content)).bold()),
        BlockType::Heading2 => format!("{}", style(format!("## {}", block.content)).bold()),
        BlockType::Heading3 => format!("{}", style(format!("### {}", block.content)).bold()),
        BlockType::Text => block.content.clone(),
        BlockType::List => format!("• {}", block.content),
        BlockType::Checklist | BlockType::Task => {
            let mark = if block.checked == Some(true) { "x" } else { " " };
            format!("[{}] {}", mark, block.content)
        }
        BlockType::Code => format!("    {}", style(&block.content).dim()),
        BlockType::Note => format!("> {}", block.content),
        BlockType::Activity => format!("{}", style(format!("· {}", block.content)).dim()),
    }
}

pub fn print_collaborators(collaborators: &[Collaborator], current_user: Uuid) {
    for collaborator in collaborators {
        let you = if collaborator.id == current_user {
            " (you)"
        } else {
            ""
        };
        println!(
            "{} <{}>  {}{}  {}",
            style(&collaborator.name).bold(),
            collaborator.email,
            style(format!("{:?}", collaborator.role).to_lowercase()).cyan(),
            you,
            style(short_id(collaborator.id)).dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_is_first_segment() {
        let id = Uuid::new_v4();
        let short = short_id(id);
        assert_eq!(short.len(), 8);
        assert!(id.to_string().starts_with(&short));
    }

    #[test]
    fn test_checklist_block_marks() {
        let done = Block::new(BlockType::Checklist, "done").checked(true);
        let open = Block::new(BlockType::Checklist, "open").checked(false);
        assert_eq!(block_line(&done), "[x] done");
        assert_eq!(block_line(&open), "[ ] open");
    }

    #[test]
    fn test_unchecked_defaults_to_open() {
        let task = Block::new(BlockType::Task, "todo");
        assert_eq!(block_line(&task), "[ ] todo");
    }

    #[test]
    fn test_list_block() {
        let item = Block::new(BlockType::List, "milk");
        assert_eq!(block_line(&item), "• milk");
    }
}
