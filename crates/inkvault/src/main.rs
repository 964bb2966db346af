//! inkvault - chapter version history for novel manuscripts.
//!
//! The CLI mirrors the operations the editor UI drives: save chapters
//! through the snapshot policy, browse and restore the version timeline,
//! and diff any two versions with a summarized change description.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inkvault_core::{ChapterService, ChapterStatus, ChapterUpdate, SnapshotFlags, SnapshotOutcome};
use inkvault_provider::SummarizerConfig;
use inkvault_storage::JsonStorage;
use inkvault_util::log::{LogConfig, LogLevel};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "inkvault")]
#[command(author, version, about = "Chapter version history for novel manuscripts", long_about = None)]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Draft,
    InProgress,
    Completed,
}

impl From<StatusArg> for ChapterStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Draft => ChapterStatus::Draft,
            StatusArg::InProgress => ChapterStatus::InProgress,
            StatusArg::Completed => ChapterStatus::Completed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new chapter
    New {
        /// Chapter title
        title: String,
        /// Initial content (inline)
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Read initial content from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List all chapters
    List,
    /// Show a chapter
    Show {
        /// Chapter id
        chapter: String,
    },
    /// Save changes to a chapter (runs the snapshot policy)
    Save {
        /// Chapter id
        chapter: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content (inline)
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Read new content from a file
        #[arg(long)]
        file: Option<PathBuf>,
        /// New status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Snapshot regardless of the edit size
        #[arg(long)]
        force: bool,
        /// Never snapshot this save
        #[arg(long, conflicts_with = "force")]
        skip_snapshot: bool,
    },
    /// Delete a chapter and its versions
    Delete {
        /// Chapter id
        chapter: String,
    },
    /// List a chapter's version timeline, newest first
    History {
        /// Chapter id
        chapter: String,
        /// Maximum number of versions to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Force-capture a snapshot of the chapter's current state
    Snapshot {
        /// Chapter id
        chapter: String,
    },
    /// Restore a chapter to a past version
    Restore {
        /// Chapter id
        chapter: String,
        /// Version id to restore
        version: String,
    },
    /// Diff a version against its predecessor and summarize the change
    Diff {
        /// Version id (the newer side)
        version: String,
        /// Explicit older version id
        #[arg(long)]
        previous: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    inkvault_util::log::init(LogConfig {
        print: true,
        level: if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        },
        include_location: cli.verbose,
    });

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => dirs::data_local_dir()
            .context("could not determine a data directory, pass --data-dir")?
            .join("inkvault"),
    };

    let storage = Arc::new(JsonStorage::new(&data_dir));
    let config = SummarizerConfig::load(&data_dir.join("ai-config.json"));
    let service = ChapterService::new(storage, inkvault_provider::from_config(&config));

    run(&cli, &service).await
}

async fn run(cli: &Cli, service: &ChapterService) -> Result<()> {
    match &cli.command {
        Commands::New {
            title,
            content,
            file,
        } => {
            let content = read_content(content.as_deref(), file.as_deref())?.unwrap_or_default();
            let chapter = service.create_chapter(title, &content).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chapter)?);
            } else {
                println!("created {} \"{}\"", chapter.id, chapter.title);
            }
        }

        Commands::List => {
            let chapters = service.chapters().list().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chapters)?);
            } else {
                for chapter in chapters {
                    println!(
                        "{}  {:<30}  {} chars  updated {}",
                        chapter.id,
                        chapter.title,
                        chapter.word_count,
                        chapter.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }

        Commands::Show { chapter } => {
            let chapter = service.get_chapter(chapter).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&chapter)?);
            } else {
                println!("# {}\n\n{}", chapter.title, chapter.content);
            }
        }

        Commands::Save {
            chapter,
            title,
            content,
            file,
            status,
            force,
            skip_snapshot,
        } => {
            let mut update = ChapterUpdate::default();
            if let Some(title) = title {
                update = update.title(title.clone());
            }
            if let Some(content) = read_content(content.as_deref(), file.as_deref())? {
                update = update.content(content);
            }
            if let Some(status) = status {
                update = update.status((*status).into());
            }
            if update.is_empty() {
                bail!("nothing to save: pass --title, --content/--file, or --status");
            }

            let flags = SnapshotFlags {
                force: *force,
                skip: *skip_snapshot,
            };
            let result = service.save_chapter(chapter, update, flags).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.chapter)?);
            } else {
                match &result.snapshot {
                    SnapshotOutcome::Captured(version) => {
                        println!("saved {} (snapshot {})", result.chapter.id, version.id)
                    }
                    SnapshotOutcome::Skipped => println!("saved {}", result.chapter.id),
                    SnapshotOutcome::Failed(reason) => {
                        println!("saved {} (snapshot failed: {reason})", result.chapter.id)
                    }
                }
            }
        }

        Commands::Delete { chapter } => {
            if service.delete_chapter(chapter).await? {
                println!("deleted {chapter}");
            } else {
                bail!("chapter not found: {chapter}");
            }
        }

        Commands::History { chapter, limit } => {
            let versions = service.list_versions(chapter, *limit).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&versions)?);
            } else {
                for version in versions {
                    let summary = version.summary.as_deref().unwrap_or("-");
                    println!(
                        "{}  {}  {} chars  {}",
                        version.id,
                        version.created_at.format("%Y-%m-%d %H:%M:%S"),
                        version.word_count,
                        summary
                    );
                }
            }
        }

        Commands::Snapshot { chapter } => {
            let version = service.create_snapshot(chapter).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&version)?);
            } else {
                println!("captured {}", version.id);
            }
        }

        Commands::Restore { chapter, version } => {
            let result = service.restore_version(chapter, version).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result.chapter)?);
            } else {
                println!("restored {} to {}", result.chapter.id, version);
            }
        }

        Commands::Diff { version, previous } => {
            let analysis = service.diff_versions(version, previous.as_deref()).await?;
            if cli.json {
                let out = serde_json::json!({
                    "ops": analysis.ops,
                    "summary": analysis.summary,
                    "tags": analysis.tags,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print!("{}", render::render_ops(&analysis.ops));
                println!("\n{}", analysis.summary);
                println!("tags: {}", analysis.tags.join(", "));
            }
        }
    }

    Ok(())
}

/// Resolve content from an inline flag or a file path.
fn read_content(inline: Option<&str>, file: Option<&std::path::Path>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(content), _) => Ok(Some(content.to_string())),
        (None, Some(path)) => Ok(Some(std::fs::read_to_string(path).with_context(|| {
            format!("failed to read content from {}", path.display())
        })?)),
        (None, None) => Ok(None),
    }
}
