//! Command-line interface for globalcare.
//!
//! Provides commands for listing and searching the content collections,
//! rendering card fragments, managing the theme preference, and inspecting
//! the resolved configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config;
use crate::content::{query, ContentStore};
use crate::controller::{ContentView, Controller, HtmlBuffer, MountRegistry};
use crate::prefs::{FileStore, PreferenceStore, Theme, ThemeManager, THEME_KEY};
use crate::render;

/// globalcare - content client for the GlobalCare Physio content origin
#[derive(Parser, Debug)]
#[command(name = "globalcare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List articles
    Articles {
        /// Only show articles in this category
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Substring search over title, category, and excerpt
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show a single article by id
    Article {
        /// Article id
        id: String,
    },

    /// List conditions
    Conditions {
        /// Substring search over title and description
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// List treatments
    Treatments,

    /// List glossary terms
    Terms {
        /// Only show terms starting with this letter
        #[arg(short, long, default_value = "all")]
        letter: String,

        /// Substring search over term and definition
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Render a collection as HTML card fragments
    Render {
        /// Collection name (articles, conditions, treatments, terms)
        collection: String,

        /// Render compact feature cards instead of full cards (articles only)
        #[arg(long)]
        featured: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the applied theme
    Show {
        /// System-level theme signal to fall back to
        #[arg(long, value_enum, default_value = "light")]
        system: ThemeArg,
    },

    /// Flip and persist the theme
    Toggle {
        /// System-level theme signal to fall back to
        #[arg(long, value_enum, default_value = "light")]
        system: ThemeArg,
    },

    /// Persist an explicit theme
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

/// Theme value for CLI (maps to Theme)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Articles { category, search } => list_articles(&category, &search).await,
            Commands::Article { id } => show_article(&id).await,
            Commands::Conditions { search } => list_conditions(&search).await,
            Commands::Treatments => list_treatments().await,
            Commands::Terms { letter, search } => list_terms(&letter, &search).await,
            Commands::Render {
                collection,
                featured,
                output,
            } => render_collection(&collection, featured, output).await,
            Commands::Theme { command } => execute_theme(command),
            Commands::Config => show_config(),
        }
    }
}

/// Build a store for the configured content origin
fn open_store() -> Result<ContentStore> {
    Ok(ContentStore::new(&config::config()?.content_url))
}

/// Open the persisted preference store
fn open_preferences() -> Result<FileStore> {
    Ok(FileStore::new(config::config()?.preferences_path()))
}

/// List articles, optionally filtered by category and search query
async fn list_articles(category: &str, search: &str) -> Result<()> {
    let store = open_store()?;
    let articles = store.articles().await;

    let by_category: Vec<_> = query::filter_by_category(&articles, category)
        .into_iter()
        .cloned()
        .collect();
    let results = query::search(&by_category, search);

    if results.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    for article in results {
        println!(
            "{}  [{}]  {}  ({})",
            article.id,
            article.category,
            article.title,
            render::format_date(&article.date)
        );
    }

    Ok(())
}

/// Show a single article
async fn show_article(id: &str) -> Result<()> {
    let store = open_store()?;

    match store.article(id).await {
        Some(article) => {
            println!("Title:    {}", article.title);
            println!("Category: {}", article.category);
            println!("Date:     {}", render::format_date(&article.date));
            println!("Read:     {}", article.read_time);
            println!("\n{}", article.excerpt);
        }
        None => {
            println!("Article not found: {}", id);
        }
    }

    Ok(())
}

/// List conditions, optionally searched
async fn list_conditions(search: &str) -> Result<()> {
    let store = open_store()?;
    let conditions = store.conditions().await;
    let results = query::search(&conditions, search);

    if results.is_empty() {
        println!("No conditions found.");
        return Ok(());
    }

    for condition in results {
        println!("{}  {}", condition.id, condition.title);
    }

    Ok(())
}

/// List all treatments
async fn list_treatments() -> Result<()> {
    let store = open_store()?;
    let treatments = store.treatments().await;

    if treatments.is_empty() {
        println!("No treatments found.");
        return Ok(());
    }

    for treatment in &treatments {
        println!("{}  ({})", treatment.title, treatment.benefits.join(", "));
    }

    Ok(())
}

/// List glossary terms, optionally filtered by letter and search query
async fn list_terms(letter: &str, search: &str) -> Result<()> {
    let store = open_store()?;
    let terms = store.terms().await;

    let by_letter: Vec<_> = query::filter_by_prefix(&terms, letter)
        .into_iter()
        .cloned()
        .collect();
    let results = query::search(&by_letter, search);

    if results.is_empty() {
        println!("No terms found.");
        return Ok(());
    }

    for term in results {
        println!("{}: {}", term.term, term.definition);
    }

    Ok(())
}

/// Render a collection's card fragments through a controller
async fn render_collection(collection: &str, featured: bool, output: Option<PathBuf>) -> Result<()> {
    let view: ContentView = collection.parse()?;
    let settings = config::config()?.presentation.clone();

    let html = if featured {
        if view != ContentView::Articles {
            anyhow::bail!("--featured only applies to articles");
        }

        let articles = open_store()?.articles().await;
        if articles.is_empty() {
            render::empty_state()
        } else {
            articles
                .iter()
                .map(render::featured_article)
                .collect::<Vec<_>>()
                .join("\n")
        }
    } else {
        let mut registry = MountRegistry::new();
        let handle = registry.register("output", Box::new(HtmlBuffer::new()));

        let controller =
            Controller::attach(Arc::new(open_store()?), view, &registry, "output", &settings)
                .context("Mount point 'output' is not registered")?;
        controller.refresh().await;

        let html = handle.lock().await.html().to_string();
        html
    };

    write_html(&html, view, output)
}

/// Write rendered fragments to a file or stdout
fn write_html(html: &str, view: ContentView, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            eprintln!("Wrote {} fragments to {}", view, path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

/// Execute theme subcommands
fn execute_theme(command: ThemeCommands) -> Result<()> {
    match command {
        ThemeCommands::Show { system } => {
            let manager = ThemeManager::init(Box::new(open_preferences()?), system.into());
            let (attr, value) = manager.attribute();
            println!("{} ({}=\"{}\")", manager.applied(), attr, value);
        }
        ThemeCommands::Toggle { system } => {
            let mut manager = ThemeManager::init(Box::new(open_preferences()?), system.into());
            let applied = manager.toggle();
            println!("{}", applied);
        }
        ThemeCommands::Set { theme } => {
            let theme: Theme = theme.into();
            open_preferences()?
                .set(THEME_KEY, theme.as_str())
                .context("Failed to persist theme preference")?;
            println!("{}", theme);
        }
    }

    Ok(())
}

/// Print the resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("Content origin: {}", config.content_url);
    println!("Home:           {}", config.home.display());
    println!("Preferences:    {}", config.preferences_path().display());
    println!(
        "Debounce:       {} ms",
        config.presentation.debounce.as_millis()
    );
    println!("Skeletons:      {}", config.presentation.skeleton_count);
    match &config.config_file {
        Some(path) => println!("Config file:    {}", path.display()),
        None => println!("Config file:    (none found)"),
    }

    Ok(())
}
