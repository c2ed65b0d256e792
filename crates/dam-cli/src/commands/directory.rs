//! Directory tree CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_core::types::DirectoryId;
use dam_entity::directory::{Directory, FileOrFolder};
use dam_service::directory::{
    CreateDirectoryRequest, DirectoryService, ListChildrenRequest, ListingService,
    MoveDirectoriesRequest,
};
use dam_service::RequestContext;

use super::parse_id;
use crate::output::{self, OutputFormat};

/// Arguments for directory commands
#[derive(Debug, Args)]
pub struct DirectoryArgs {
    /// Directory subcommand
    #[command(subcommand)]
    pub command: DirectoryCommand,
}

/// Directory subcommands
#[derive(Debug, Subcommand)]
pub enum DirectoryCommand {
    /// List the user's root directories
    Roots,
    /// Create a root directory
    CreateRoot {
        /// Directory name
        #[arg(short, long)]
        name: String,
    },
    /// Create a directory under a parent
    Create {
        /// Parent directory ID
        #[arg(short, long)]
        parent: String,
        /// Directory name
        #[arg(short, long)]
        name: String,
    },
    /// Show one directory
    Show {
        /// Directory ID
        id: String,
    },
    /// Rename a directory
    Rename {
        /// Directory ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
    },
    /// List a page of a directory's children
    Children {
        /// Directory ID
        id: String,
        /// `<field>[ <asc|desc>]` over created_at, updated_at, name
        #[arg(long)]
        order_by: Option<String>,
        /// Page size
        #[arg(long)]
        limit: Option<i64>,
        /// Items to skip
        #[arg(long)]
        offset: Option<i64>,
    },
    /// Move directories (with their subtrees) under a destination
    Move {
        /// Destination directory ID
        #[arg(short, long)]
        to: String,
        /// Directory IDs to move, applied in order
        #[arg(required = true)]
        sources: Vec<String>,
    },
}

/// Directory display row
#[derive(Debug, Serialize, Tabled)]
struct DirectoryRow {
    id: String,
    name: String,
    level: i32,
    full_path: String,
    created_at: String,
}

impl From<&Directory> for DirectoryRow {
    fn from(d: &Directory) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.name.clone(),
            level: d.level,
            full_path: d.full_path.clone(),
            created_at: super::short_time(&d.created_at),
        }
    }
}

/// Child display row
#[derive(Debug, Serialize, Tabled)]
struct ChildRow {
    kind: &'static str,
    id: String,
    name: String,
    updated_at: String,
}

impl From<&FileOrFolder> for ChildRow {
    fn from(c: &FileOrFolder) -> Self {
        Self {
            kind: if c.is_directory { "dir" } else { "file" },
            id: c.id.to_string(),
            name: c.name.clone(),
            updated_at: super::short_time(&c.updated_at),
        }
    }
}

fn print_directory(directory: &Directory, format: OutputFormat) {
    output::print_record(
        directory,
        &[
            ("ID", directory.id.to_string()),
            ("Name", directory.name.clone()),
            ("Owner", directory.user_id.to_string()),
            (
                "Parent",
                directory
                    .parent_directory_id
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Level", directory.level.to_string()),
            ("Full path", directory.full_path.clone()),
            ("Updated", super::short_time(&directory.updated_at)),
        ],
        format,
    );
}

/// Execute directory commands
pub async fn execute(
    args: &DirectoryArgs,
    config: &AppConfig,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repos = super::open_repositories(config).await?;
    let directories = DirectoryService::new(repos.directories.clone(), config.tree.clone());

    match &args.command {
        DirectoryCommand::Roots => {
            let roots = directories.list_roots(ctx).await?;
            let rows: Vec<DirectoryRow> = roots.iter().map(DirectoryRow::from).collect();
            output::print_list(&rows, format);
        }
        DirectoryCommand::CreateRoot { name } => {
            let root = directories.create_root(ctx, name).await?;
            output::print_success(&format!("Root directory '{}' created (id: {})", root.name, root.id));
        }
        DirectoryCommand::Create { parent, name } => {
            let directory = directories
                .create_directory(
                    ctx,
                    CreateDirectoryRequest {
                        name: name.clone(),
                        parent_directory_id: parse_id(parent, "parent directory")?,
                    },
                )
                .await?;
            output::print_success(&format!(
                "Directory '{}' created (id: {})",
                directory.name, directory.id
            ));
        }
        DirectoryCommand::Show { id } => {
            let directory = directories
                .get_directory(ctx, parse_id(id, "directory")?)
                .await?;
            print_directory(&directory, format);
        }
        DirectoryCommand::Rename { id, name } => {
            let directory = directories
                .rename_directory(ctx, parse_id(id, "directory")?, name)
                .await?;
            output::print_success(&format!("Directory {} renamed to '{}'", directory.id, directory.name));
        }
        DirectoryCommand::Children {
            id,
            order_by,
            limit,
            offset,
        } => {
            let listing = ListingService::new(repos.directories.clone(), config.listing.clone());
            let page = listing
                .list_children(
                    ctx,
                    parse_id(id, "directory")?,
                    ListChildrenRequest {
                        order_by: order_by.clone(),
                        limit: *limit,
                        offset: *offset,
                    },
                )
                .await?;

            let rows: Vec<ChildRow> = page.items.iter().map(ChildRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "Showing {} of {} (offset {}){}",
                    rows.len(),
                    page.total_items,
                    page.offset,
                    if page.has_more { ", more available" } else { "" }
                );
            }
        }
        DirectoryCommand::Move { to, sources } => {
            let source_directory_ids = sources
                .iter()
                .map(|s| parse_id::<DirectoryId>(s, "source directory"))
                .collect::<Result<Vec<_>, _>>()?;
            let moved = directories
                .move_directories(
                    ctx,
                    MoveDirectoriesRequest {
                        source_directory_ids,
                        destination_directory_id: parse_id(to, "destination directory")?,
                    },
                )
                .await?;
            let rows: Vec<DirectoryRow> = moved.iter().map(DirectoryRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
