use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use workpadapp::model::Role;

#[derive(Parser, Debug)]
#[command(
    name = "workpad",
    bin_name = "workpad",
    version,
    disable_help_subcommand = true
)]
#[command(about = "A local-first page workspace for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the workspace data directory
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the page tree
    List,
    /// Print a page with its content blocks
    Show {
        /// Page id or title
        page: String,
    },
    /// Create a page
    New {
        /// Title of the new page
        title: Vec<String>,
        /// Create as a child of this page (id or title)
        #[arg(long)]
        parent: Option<String>,
        /// Icon for the new page
        #[arg(long)]
        icon: Option<String>,
    },
    /// Rename a page
    Rename {
        /// Page id or title
        page: String,
        /// The new title
        title: Vec<String>,
    },
    /// Change a page's icon
    Icon {
        /// Page id or title
        page: String,
        icon: String,
    },
    /// Delete a page and all its subpages
    Delete {
        /// Page id or title
        page: String,
    },
    /// Move a page under another page, or to the root
    Move {
        /// Page id or title
        page: String,
        /// Destination page (omit to move to the root)
        #[arg(long)]
        to: Option<String>,
    },
    /// Toggle a page's favorite flag
    Fav {
        /// Page id or title
        page: String,
    },
    /// Verify parent/child link consistency
    Check,
    /// Manage collaborators
    Collab {
        #[command(subcommand)]
        command: CollabCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollabCommands {
    /// List collaborators
    List,
    /// Add a collaborator
    Add {
        name: String,
        email: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Editor)]
        role: RoleArg,
    },
    /// Remove a collaborator (by id or email)
    Rm { collaborator: String },
    /// Change a collaborator's role
    Role {
        /// Collaborator id or email
        collaborator: String,
        role: RoleArg,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Editor,
    Viewer,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Editor => Role::Editor,
            RoleArg::Viewer => Role::Viewer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["workpad", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_parse_new_with_parent() {
        let cli =
            Cli::try_parse_from(["workpad", "new", "Meeting", "notes", "--parent", "Work"])
                .unwrap();
        match cli.command {
            Commands::New {
                title,
                parent,
                icon,
            } => {
                assert_eq!(title, vec!["Meeting", "notes"]);
                assert_eq!(parent.as_deref(), Some("Work"));
                assert!(icon.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_move_to_root() {
        let cli = Cli::try_parse_from(["workpad", "move", "Notes"]).unwrap();
        match cli.command {
            Commands::Move { page, to } => {
                assert_eq!(page, "Notes");
                assert!(to.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_collab_add_default_role() {
        let cli =
            Cli::try_parse_from(["workpad", "collab", "add", "Ada", "ada@example.com"]).unwrap();
        match cli.command {
            Commands::Collab {
                command: CollabCommands::Add { role, .. },
            } => assert_eq!(role, RoleArg::Editor),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_dir_flag() {
        let cli =
            Cli::try_parse_from(["workpad", "list", "--data-dir", "/tmp/ws"]).unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/ws")));
    }
}
