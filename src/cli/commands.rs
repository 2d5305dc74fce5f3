use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tg", about = concat!("taskgroups v", env!("CARGO_PKG_VERSION"), " - tasks in named groups"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data file to read and write (default: from config, else taskGroups.json)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Config file (default: <config dir>/taskgroups/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List task groups
    Groups,
    /// Add, rename or remove a task group
    Group(GroupCmd),
    /// List the tasks of a group, optionally filtered
    List(ListArgs),
    /// List the distinct tags used in a group
    Tags(TagsArgs),
    /// Add a task to a group
    Add(AddArgs),
    /// Change a task's text and tags
    Edit(EditArgs),
    /// Delete a task
    Rm(TaskRef),
    /// Toggle a task between done and not done
    Toggle(TaskRef),
    /// Write a copy of the data to a file
    Export(ExportArgs),
    /// Replace the data with the contents of a file
    Import(ImportArgs),
}

// ---------------------------------------------------------------------------
// Group management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GroupCmd {
    #[command(subcommand)]
    pub action: GroupAction,
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// Add a new group at the end
    Add {
        /// Group name
        name: String,
    },
    /// Rename a group
    Rename {
        /// Group index (as printed by `tg groups`)
        index: usize,
        /// New name
        name: String,
    },
    /// Remove a group and all its tasks
    Rm {
        /// Group index (as printed by `tg groups`)
        index: usize,
    },
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Group index
    pub group: usize,
    /// Case-insensitive text or tag search
    #[arg(short = 'q', long)]
    pub query: Option<String>,
    /// Require a tag (repeatable; all must be present)
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Group index
    pub group: usize,
}

#[derive(Args)]
pub struct AddArgs {
    /// Group index
    pub group: usize,
    /// Task text
    pub text: String,
    /// Comma-separated tags, e.g. "errand, outside"
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Group index
    pub group: usize,
    /// Task index within the group
    pub task: usize,
    /// New task text
    pub text: String,
    /// New comma-separated tags (kept unchanged if omitted)
    #[arg(long)]
    pub tags: Option<String>,
}

#[derive(Args)]
pub struct TaskRef {
    /// Group index
    pub group: usize,
    /// Task index within the group
    pub task: usize,
}

// ---------------------------------------------------------------------------
// Import / export
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Destination file
    pub dest: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Source file in the interchange format
    pub src: PathBuf,
}
