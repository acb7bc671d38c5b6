//! Command-line interface for the lesson catalog.
//!
//! A thin presentation layer: each command opens the stores, calls one
//! core operation and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::domain::{sample_lessons, Lesson, LessonId, LessonPatch};
use crate::library::{Catalog, PlaylistId, PlaylistManager};
use crate::sort::{SortDirection, SortEngine, SortField, SortStrategy};

/// lessons - video lesson catalog with playlists
#[derive(Parser, Debug)]
#[command(name = "lessons")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all lessons in current order
    List,

    /// Show one lesson in full
    Show {
        /// Lesson ID
        id: String,
    },

    /// Add a lesson
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        author: String,

        /// Length in minutes
        #[arg(long, default_value = "0")]
        duration: u32,

        #[arg(long)]
        category: String,
    },

    /// Edit a lesson; omitted fields are left unchanged, an empty value clears the field
    Edit {
        /// Lesson ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a lesson
    Delete {
        /// Lesson ID
        id: String,
    },

    /// List lessons matching category and/or author (case-insensitive)
    Filter {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        author: Option<String>,
    },

    /// Sort the catalog and save the new order
    Sort {
        /// Field to sort by
        #[arg(value_enum)]
        field: FieldArg,

        /// Algorithm (defaults to the configured strategy)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Sort in descending order
        #[arg(short, long)]
        desc: bool,
    },

    /// Add sample lessons if the catalog is empty
    Seed,

    /// Show resolved configuration (debug)
    Config,

    /// Manage playlists
    Playlist {
        #[command(subcommand)]
        command: PlaylistCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlaylistCommands {
    /// Create an empty playlist
    Create { name: String },

    /// List all playlists
    List,

    /// Show the lessons in a playlist
    Show { id: String },

    /// Delete a playlist
    Delete { id: String },

    /// Add a catalog lesson to a playlist
    Add { playlist_id: String, lesson_id: String },

    /// Remove a lesson from a playlist
    Remove { playlist_id: String, lesson_id: String },

    /// Rename a playlist
    Rename { id: String, name: String },

    /// Refresh a playlist's lesson copies from the catalog
    Sync { id: String },
}

/// Sort field for CLI (maps to SortField)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FieldArg {
    Title,
    Author,
    Category,
    Duration,
}

impl From<FieldArg> for SortField {
    fn from(f: FieldArg) -> Self {
        match f {
            FieldArg::Title => SortField::Title,
            FieldArg::Author => SortField::Author,
            FieldArg::Category => SortField::Category,
            FieldArg::Duration => SortField::Duration,
        }
    }
}

/// Sort algorithm for CLI (maps to SortStrategy)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Selection,
    Insertion,
    Quick,
    Natural,
    Standard,
}

impl From<StrategyArg> for SortStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Selection => SortStrategy::Selection,
            StrategyArg::Insertion => SortStrategy::Insertion,
            StrategyArg::Quick => SortStrategy::Quick,
            StrategyArg::Natural => SortStrategy::Natural,
            StrategyArg::Standard => SortStrategy::Standard,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::List => list_lessons(),
            Commands::Show { id } => show_lesson(&id),
            Commands::Add {
                title,
                description,
                author,
                duration,
                category,
            } => add_lesson(Lesson::new(title, description, author, duration, category)),
            Commands::Edit {
                id,
                title,
                description,
                author,
                duration,
                category,
            } => {
                let patch = LessonPatch {
                    title: title.into(),
                    description: description.into(),
                    author: author.into(),
                    duration: duration.into(),
                    category: category.into(),
                };
                edit_lesson(&id, patch)
            }
            Commands::Delete { id } => delete_lesson(&id),
            Commands::Filter { category, author } => {
                filter_lessons(category.as_deref(), author.as_deref())
            }
            Commands::Sort {
                field,
                strategy,
                desc,
            } => sort_lessons(field.into(), strategy.map(Into::into), desc),
            Commands::Seed => seed(),
            Commands::Config => show_config(),
            Commands::Playlist { command } => execute_playlist(command),
        }
    }
}

fn open_catalog() -> Result<Catalog> {
    let catalog = Catalog::open(config::catalog_path()?);
    if let Some(e) = catalog.load_error() {
        eprintln!("Warning: catalog could not be loaded ({}); starting empty", e);
    }
    Ok(catalog)
}

fn open_playlists() -> Result<PlaylistManager> {
    let manager = PlaylistManager::open(config::playlists_path()?);
    if let Some(e) = manager.load_error() {
        eprintln!("Warning: playlists could not be loaded ({}); starting empty", e);
    }
    Ok(manager)
}

fn print_table<'a>(lessons: impl IntoIterator<Item = &'a Lesson>) {
    println!(
        "{:<38} {:<32} {:<16} {:>5}  {:<16}",
        "ID", "TITLE", "AUTHOR", "MIN", "CATEGORY"
    );
    println!("{}", "-".repeat(112));

    for lesson in lessons {
        println!(
            "{:<38} {:<32} {:<16} {:>5}  {:<16}",
            lesson.id.as_str(),
            truncate(&lesson.title, 32),
            truncate(&lesson.author, 16),
            lesson.duration,
            truncate(&lesson.category, 16)
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn list_lessons() -> Result<()> {
    let catalog = open_catalog()?;

    if catalog.is_empty() {
        println!("Catalog is empty. Use 'lessons add' or 'lessons seed' to add lessons.");
        return Ok(());
    }

    print_table(catalog.lessons());
    println!("\nTotal: {} lessons", catalog.len());
    Ok(())
}

fn show_lesson(id: &str) -> Result<()> {
    let catalog = open_catalog()?;
    let lesson = catalog
        .get(&LessonId::from(id))
        .with_context(|| format!("Lesson not found: {}", id))?;

    println!("ID:          {}", lesson.id);
    println!("Title:       {}", lesson.title);
    println!("Author:      {}", lesson.author);
    println!("Category:    {}", lesson.category);
    println!("Duration:    {} min", lesson.duration);
    println!("Description: {}", lesson.description);
    Ok(())
}

fn add_lesson(lesson: Lesson) -> Result<()> {
    let mut catalog = open_catalog()?;
    let id = catalog.add(lesson)?;
    println!("Added lesson {}", id);
    Ok(())
}

fn edit_lesson(id: &str, patch: LessonPatch) -> Result<()> {
    let mut catalog = open_catalog()?;
    let lesson = catalog.edit(&LessonId::from(id), patch)?;
    println!("Updated: {}", lesson);
    Ok(())
}

fn delete_lesson(id: &str) -> Result<()> {
    let mut catalog = open_catalog()?;
    let removed = catalog.delete(&LessonId::from(id))?;
    println!("Deleted: {}", removed);
    Ok(())
}

fn filter_lessons(category: Option<&str>, author: Option<&str>) -> Result<()> {
    let catalog = open_catalog()?;
    let matches = catalog.filter(category, author);

    if matches.is_empty() {
        println!("No lessons match the given criteria.");
        return Ok(());
    }

    let count = matches.len();
    print_table(matches);
    println!("\nFound {} lesson(s)", count);
    Ok(())
}

fn sort_lessons(field: SortField, strategy: Option<SortStrategy>, desc: bool) -> Result<()> {
    let defaults = config::config()?.sort;
    let engine = SortEngine::new(
        strategy.unwrap_or(defaults.strategy),
        if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    );

    let mut catalog = open_catalog()?;
    let report = catalog.sort(field, engine)?;

    print_table(catalog.lessons());
    println!(
        "\nSorted {} lessons with {} in {:.6}s",
        report.count,
        report.strategy,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

fn seed() -> Result<()> {
    let mut catalog = open_catalog()?;

    if !catalog.is_empty() {
        println!("Catalog already has {} lessons; nothing to do.", catalog.len());
        return Ok(());
    }

    let added = catalog.extend(sample_lessons())?;
    println!("Added {} sample lessons", added);
    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Home:       {}", config.home.display());
    println!("Catalog:    {}", config.catalog.display());
    println!("Playlists:  {}", config.playlists.display());
    match &config.config_file {
        Some(path) => println!("Config:     {}", path.display()),
        None => println!("Config:     (none, using defaults)"),
    }
    println!(
        "Sort:       {} ({:?})",
        config.sort.strategy, config.sort.direction
    );
    Ok(())
}

fn execute_playlist(command: PlaylistCommands) -> Result<()> {
    let mut manager = open_playlists()?;

    match command {
        PlaylistCommands::Create { name } => {
            let id = manager.create(name)?;
            println!("Created playlist {}", id);
        }
        PlaylistCommands::List => {
            if manager.is_empty() {
                println!("No playlists yet. Use 'lessons playlist create <name>'.");
            }
            for playlist in manager.playlists() {
                println!(
                    "{:<38} {} ({} lessons)",
                    playlist.id.as_str(),
                    playlist.name,
                    playlist.len()
                );
            }
        }
        PlaylistCommands::Show { id } => {
            let playlist = manager
                .get(&PlaylistId::from(id.as_str()))
                .with_context(|| format!("Playlist not found: {}", id))?;

            println!("Playlist: {} ({})\n", playlist.name, playlist.id);
            if playlist.is_empty() {
                println!("Playlist is empty.");
            } else {
                print_table(&playlist.lessons);
            }
        }
        PlaylistCommands::Delete { id } => {
            let removed = manager.delete(&PlaylistId::from(id.as_str()))?;
            println!("Deleted playlist {}", removed.name);
        }
        PlaylistCommands::Add {
            playlist_id,
            lesson_id,
        } => {
            let catalog = open_catalog()?;
            let lesson = catalog
                .get(&LessonId::from(lesson_id.as_str()))
                .with_context(|| format!("Lesson not found: {}", lesson_id))?
                .clone();

            manager.add_lesson(&PlaylistId::from(playlist_id.as_str()), lesson)?;
            println!("Lesson added to playlist");
        }
        PlaylistCommands::Remove {
            playlist_id,
            lesson_id,
        } => {
            let removed = manager.remove_lesson(
                &PlaylistId::from(playlist_id.as_str()),
                &LessonId::from(lesson_id.as_str()),
            )?;
            println!("Removed: {}", removed);
        }
        PlaylistCommands::Rename { id, name } => {
            manager.rename(&PlaylistId::from(id.as_str()), name)?;
            println!("Playlist renamed");
        }
        PlaylistCommands::Sync { id } => {
            let catalog = open_catalog()?;
            let summary = manager.sync(&PlaylistId::from(id.as_str()), &catalog)?;

            println!("Refreshed {} lesson(s)", summary.updated);
            for missing in &summary.missing {
                println!("  not in catalog: {}", missing);
            }
        }
    }

    Ok(())
}
