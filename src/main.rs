use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use pagesmith::config::{Backend, Settings};
use pagesmith::content::{ContentRepo, Listing};
use pagesmith::generator::{generate_html, RenderOptions};
use pagesmith::publish::{publish_site, PublishOptions};
use pagesmith::schema::{PageDocument, Theme};
use pagesmith::sitemap;
use pagesmith::store::{self, BlobStore, FsStore};

#[derive(Parser)]
#[command(name = "pagesmith", about = "HTML page templates to structured content and back")]
struct Cli {
    /// Settings file (default: ./pagesmith.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Content directory, for the fs backend
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    /// Directory the static site is published to
    #[arg(long, global = true)]
    output: Option<PathBuf>,
    /// Keep content in the SQLite database instead of a directory
    #[arg(long, global = true)]
    sqlite: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default structure, theme and home page where missing
    Init,
    /// Parse an HTML file or URL and store it as a page
    Import {
        /// Path or http(s) URL of the HTML page
        source: String,
        /// Page id to store the result under
        #[arg(short, long)]
        page: String,
        /// List the page in the site structure
        #[arg(long)]
        list: bool,
        /// Also add the page to the main navigation
        #[arg(long)]
        nav: bool,
        /// Make the theme found in the page the active theme
        #[arg(long)]
        set_theme: bool,
    },
    /// Parse every templates/*.html in the content store
    ImportTemplates,
    /// Create an empty page with the header/main/footer skeleton
    NewPage {
        id: String,
        /// Page title (defaults to the id)
        #[arg(short, long)]
        title: Option<String>,
        /// Also add the page to the main navigation
        #[arg(long)]
        nav: bool,
    },
    /// Append a starter block to a section of a stored page
    AddBlock {
        page: String,
        /// Section id, e.g. main-content
        section: String,
        /// Block type, e.g. heading, paragraph, serviceCard
        block_type: String,
    },
    /// Store a new theme, copied from a JSON file or from the active theme
    CreateTheme {
        id: String,
        /// Theme JSON file
        #[arg(long)]
        from: Option<PathBuf>,
        /// Theme name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Render one stored page to HTML
    Render {
        page: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate the static site from every published page
    Publish,
    /// List pages with their publication state
    Pages,
    /// Mark a page as published
    PublishPage { id: String },
    /// Mark a page as unpublished
    UnpublishPage { id: String },
    /// Delete a page (a version snapshot is kept)
    DeletePage { id: String },
    /// List stored themes and the active one
    Themes,
    /// List version snapshots, newest first
    Versions,
    /// Copy a version snapshot over a content file
    Restore {
        /// Version file, as listed by `versions`
        version: String,
        /// Content key to overwrite, e.g. pages/home.json
        target: String,
    },
    /// Print the sitemap the next publish would write
    Sitemap,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    info!(backend = ?settings.backend, content = ?settings.content_dir, "settings loaded");

    let store = store::open(&settings).context("Failed to open content store")?;
    let repo = ContentRepo::new(store);

    let result = match cli.command {
        Commands::Init => {
            if repo.init_defaults()? {
                println!("Default content created.");
            } else {
                println!("Content already initialised.");
            }
            Ok(())
        }
        Commands::Import {
            source,
            page,
            list,
            nav,
            set_theme,
        } => {
            let html = read_source(&source).await?;
            let doc = repo
                .import_template(&html, &page)
                .with_context(|| format!("Failed to import {}", source))?;
            let listing = match (list, nav) {
                (_, true) => Listing::MainNavigation,
                (true, false) => Listing::Pages,
                (false, false) => Listing::Unlisted,
            };
            if listing != Listing::Unlisted && repo.structure()?.page(&page).is_none() {
                repo.list_page(&page, &doc, listing)?;
            }
            if set_theme {
                if let Some(theme) = &doc.theme {
                    repo.set_active_theme(theme)?;
                }
            }
            println!(
                "Imported {} as page '{}' ({} sections, {} scripts).",
                source,
                page,
                doc.sections.len(),
                doc.scripts.len()
            );
            Ok(())
        }
        Commands::ImportTemplates => {
            let report = repo.import_templates()?;
            println!(
                "Imported {} templates ({} failed).",
                report.imported.len(),
                report.failed.len()
            );
            for (key, e) in &report.failed {
                println!("  {}: {}", key, e);
            }
            Ok(())
        }
        Commands::NewPage { id, title, nav } => {
            let doc = PageDocument::new_page(title.as_deref().unwrap_or(&id));
            let listing = if nav { Listing::MainNavigation } else { Listing::Pages };
            repo.create_page(&id, &doc, listing)?;
            println!("Created page '{}' (unpublished).", id);
            Ok(())
        }
        Commands::AddBlock {
            page,
            section,
            block_type,
        } => {
            let id = repo.add_block(&page, &section, &block_type)?;
            println!("Added {} block {} to {}/{}.", block_type, id, page, section);
            Ok(())
        }
        Commands::CreateTheme { id, from, name } => {
            let mut theme: Theme = match &from {
                Some(path) => {
                    let raw = std::fs::read(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    serde_json::from_slice(&raw)
                        .with_context(|| format!("Invalid theme JSON in {}", path.display()))?
                }
                None => repo.active_theme()?,
            };
            if let Some(name) = name {
                theme.name = name;
            }
            repo.create_theme(&id, &theme)?;
            println!("Created theme '{}'.", id);
            Ok(())
        }
        Commands::Render { page, out } => {
            let mut doc = repo.page(&page)?;
            if doc.theme.is_none() {
                doc.theme = Some(repo.active_theme()?);
            }
            let html = generate_html(&doc, &RenderOptions::current(&settings.site_name));
            match out {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }
        Commands::Publish => {
            let site = FsStore::new(&settings.output_dir)?;
            let root = site.root().to_path_buf();
            let output: Arc<dyn BlobStore> = Arc::new(site);
            let opts = PublishOptions::from_settings(&settings);
            let report = publish_site(&repo, output, &opts).await?;
            println!(
                "Published {} pages to {} ({} skipped).",
                report.pages.len(),
                root.display(),
                report.failed.len()
            );
            for (id, e) in &report.failed {
                println!("  {}: {}", id, e);
            }
            Ok(())
        }
        Commands::Pages => {
            let structure = repo.structure()?;
            println!("{:<20} | {:<32} | {:<20} | {}", "Id", "Title", "Path", "Published");
            println!("{}", "-".repeat(88));
            for p in &structure.pages {
                println!(
                    "{:<20} | {:<32} | {:<20} | {}",
                    truncate(&p.id, 20),
                    truncate(&p.title, 32),
                    truncate(&p.url_path(), 20),
                    if p.is_published { "yes" } else { "no" }
                );
            }
            let unlisted: Vec<String> = repo
                .page_ids()?
                .into_iter()
                .filter(|id| structure.page(id).is_none())
                .collect();
            if !unlisted.is_empty() {
                println!("\nUnlisted documents: {}", unlisted.join(", "));
            }
            Ok(())
        }
        Commands::PublishPage { id } => {
            repo.set_published(&id, true)?;
            println!("Page '{}' will be published.", id);
            Ok(())
        }
        Commands::UnpublishPage { id } => {
            repo.set_published(&id, false)?;
            println!("Page '{}' unpublished.", id);
            Ok(())
        }
        Commands::DeletePage { id } => {
            repo.delete_page(&id)?;
            println!("Page '{}' deleted.", id);
            Ok(())
        }
        Commands::Themes => {
            let active = repo.active_theme()?;
            let themes = repo.themes()?;
            println!("Active: {} ({})", active.name, active.id);
            for t in &themes {
                println!(
                    "  {:<16} {:<24} primary {} / accent {}",
                    t.id, truncate(&t.name, 24), t.colors.primary, t.colors.accent
                );
            }
            Ok(())
        }
        Commands::Versions => {
            let versions = repo.versions()?;
            if versions.is_empty() {
                println!("No versions.");
            }
            for v in &versions {
                println!("{}  {:<28}  {}", v.timestamp.format("%Y-%m-%d %H:%M:%S"), v.source, v.file);
            }
            Ok(())
        }
        Commands::Restore { version, target } => {
            repo.restore_version(&version, &target)?;
            println!("Restored {} from {}.", target, version);
            Ok(())
        }
        Commands::Sitemap => {
            let structure = repo.require_structure()?;
            let domain = repo
                .configured_domain()?
                .unwrap_or_else(|| settings.domain.clone());
            let pages: Vec<_> = structure.published().cloned().collect();
            let xml = sitemap::build_sitemap(&domain, &pages, chrono::Local::now().date_naive())?;
            println!("{}", xml);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(dir) = &cli.content {
        settings.content_dir = dir.clone();
    }
    if let Some(dir) = &cli.output {
        settings.output_dir = dir.clone();
    }
    if cli.sqlite {
        settings.backend = Backend::Sqlite;
    }
    Ok(settings)
}

/// Read a page from disk, or over HTTP for http(s) URLs.
async fn read_source(source: &str) -> anyhow::Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Fetching {}", source);
        let response = reqwest::Client::new()
            .get(source)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", source))?;
        if !response.status().is_success() {
            bail!("Fetching {} returned {}", source, response.status());
        }
        return response
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", source));
    }
    std::fs::read_to_string(Path::new(source)).with_context(|| format!("Failed to read {}", source))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("Équilibre", 3), "Équ...");
        assert_eq!(truncate("court", 10), "court");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(std::time::Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn cli_parses_import_flags() {
        let cli = Cli::try_parse_from([
            "pagesmith", "--sqlite", "import", "page.html", "--page", "soins", "--nav", "--set-theme",
        ])
        .unwrap();
        assert!(cli.sqlite);
        match cli.command {
            Commands::Import { source, page, list, nav, set_theme } => {
                assert_eq!(source, "page.html");
                assert_eq!(page, "soins");
                assert!(!list);
                assert!(nav && set_theme);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn cli_parses_editing_commands() {
        let cli = Cli::try_parse_from(["pagesmith", "new-page", "soins", "--title", "Nos soins", "--nav"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::NewPage { ref id, title: Some(ref t), nav: true } if id == "soins" && t == "Nos soins"
        ));

        let cli = Cli::try_parse_from(["pagesmith", "add-block", "soins", "main-content", "heading"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::AddBlock { ref block_type, .. } if block_type == "heading"
        ));

        let cli = Cli::try_parse_from(["pagesmith", "create-theme", "ocean", "--name", "Océan"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::CreateTheme { ref id, from: None, name: Some(_) } if id == "ocean"
        ));
    }

    #[tokio::test]
    async fn reads_local_source() {
        let html = read_source("tests/fixtures/ayurveda.html").await.unwrap();
        assert!(html.contains("<title>"));
        assert!(read_source("tests/fixtures/missing.html").await.is_err());
    }
}
