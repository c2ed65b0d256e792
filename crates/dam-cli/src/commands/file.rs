//! File and version CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_core::types::FileId;
use dam_entity::file::{File, FileVersion};
use dam_service::file::{
    FileService, MoveFilesRequest, UpdateMetadataRequest, UploadFileRequest, UploadVersionRequest,
    VersionService,
};
use dam_service::RequestContext;

use super::parse_id;
use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// Register a new file (and its first version) in a directory
    Upload {
        /// Directory ID
        #[arg(short, long)]
        directory: String,
        /// File name
        #[arg(short, long)]
        name: String,
        /// Size in bytes
        #[arg(short, long)]
        size: i64,
        /// MIME type
        #[arg(short = 't', long, default_value = "application/octet-stream")]
        content_type: String,
    },
    /// Show one file
    Show {
        /// File ID
        id: String,
    },
    /// Replace a file's description and tags
    Tag {
        /// File ID
        id: String,
        /// Description; omit to clear
        #[arg(short, long)]
        description: Option<String>,
        /// Tag, repeatable
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Append a new version to a file
    AddVersion {
        /// File ID
        id: String,
        /// Size in bytes
        #[arg(short, long)]
        size: i64,
        /// MIME type
        #[arg(short = 't', long, default_value = "application/octet-stream")]
        content_type: String,
    },
    /// List a file's versions, oldest first
    Versions {
        /// File ID
        id: String,
    },
    /// Move files into a directory
    Move {
        /// Destination directory ID
        #[arg(short, long)]
        to: String,
        /// File IDs to move
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    id: String,
    name: String,
    size_bytes: i64,
    full_path: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            size_bytes: f.size_bytes,
            full_path: f.full_path.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    version: i32,
    id: String,
    size_bytes: i64,
    content_type: String,
    created_at: String,
}

impl From<&FileVersion> for VersionRow {
    fn from(v: &FileVersion) -> Self {
        Self {
            version: v.version_number,
            id: v.id.to_string(),
            size_bytes: v.size_bytes,
            content_type: v.content_type.clone(),
            created_at: super::short_time(&v.created_at),
        }
    }
}

fn print_file(file: &File, format: OutputFormat) {
    output::print_record(
        file,
        &[
            ("ID", file.id.to_string()),
            ("Name", file.name.clone()),
            ("Directory", file.directory_id.to_string()),
            ("Full path", file.full_path.clone()),
            ("Size", file.size_bytes.to_string()),
            ("Content type", file.content_type.clone()),
            (
                "Description",
                file.description.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("Tags", file.tags.join(", ")),
            (
                "Latest version",
                file.latest_version_id
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ],
        format,
    );
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let repos = super::open_repositories(config).await?;
    let files = FileService::new(repos.files.clone(), repos.directories.clone());
    let versions = VersionService::new(repos.files.clone(), repos.versions.clone());

    match &args.command {
        FileCommand::Upload {
            directory,
            name,
            size,
            content_type,
        } => {
            let file = files
                .upload_new_file(
                    ctx,
                    parse_id(directory, "directory")?,
                    UploadFileRequest {
                        name: name.clone(),
                        size_bytes: *size,
                        content_type: content_type.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("File '{}' created (id: {})", file.name, file.id));
        }
        FileCommand::Show { id } => {
            let file = files.get_file(ctx, parse_id(id, "file")?).await?;
            print_file(&file, format);
        }
        FileCommand::Tag {
            id,
            description,
            tags,
        } => {
            let file = files
                .update_metadata(
                    ctx,
                    parse_id(id, "file")?,
                    UpdateMetadataRequest {
                        description: description.clone(),
                        tags: tags.clone(),
                    },
                )
                .await?;
            print_file(&file, format);
        }
        FileCommand::AddVersion {
            id,
            size,
            content_type,
        } => {
            let version = versions
                .upload_new_version(
                    ctx,
                    parse_id(id, "file")?,
                    UploadVersionRequest {
                        size_bytes: *size,
                        content_type: content_type.clone(),
                    },
                )
                .await?;
            output::print_success(&format!(
                "Version {} created (id: {})",
                version.version_number, version.id
            ));
        }
        FileCommand::Versions { id } => {
            let history = versions.list_versions(ctx, parse_id(id, "file")?).await?;
            let rows: Vec<VersionRow> = history.versions.iter().map(VersionRow::from).collect();
            output::print_list(&rows, format);
        }
        FileCommand::Move { to, files: ids } => {
            let source_file_ids = ids
                .iter()
                .map(|s| parse_id::<FileId>(s, "file"))
                .collect::<Result<Vec<_>, _>>()?;
            let moved = files
                .move_files(
                    ctx,
                    MoveFilesRequest {
                        source_file_ids,
                        destination_directory_id: parse_id(to, "destination directory")?,
                    },
                )
                .await?;
            let rows: Vec<FileRow> = moved.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
