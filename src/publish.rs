use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::Settings;
use crate::content::{ContentRepo, PageRef, PublishLogEntry, HOME_PAGE_ID};
use crate::error::PublishError;
use crate::generator::{generate_html, site_css, site_js, RenderOptions};
use crate::schema::Theme;
use crate::sitemap::build_sitemap;
use crate::store::{content_type_for, BlobStore};

pub const STYLESHEET_PATH: &str = "css/main.css";
pub const SCRIPT_PATH: &str = "js/main.js";
pub const SITEMAP_PATH: &str = "sitemap.xml";

#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Pages rendered at the same time.
    pub concurrency: usize,
    /// Used when the content store has no domain setting.
    pub default_domain: String,
    pub render: RenderOptions,
    /// `lastmod` written into the sitemap.
    pub lastmod: NaiveDate,
    pub progress: bool,
}

impl PublishOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        PublishOptions {
            concurrency: settings.concurrency.max(1),
            default_domain: settings.domain.clone(),
            render: RenderOptions::current(&settings.site_name),
            lastmod: Local::now().date_naive(),
            progress: true,
        }
    }
}

/// Publish stats returned after completion.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Page ids written, in site structure order.
    pub pages: Vec<String>,
    /// Output keys written, pages first.
    pub files: Vec<String>,
    /// Pages skipped with the reason.
    pub failed: Vec<(String, String)>,
    pub log_key: Option<String>,
}

struct PageOutcome {
    page: PageRef,
    result: Result<String, String>,
}

/// Output key for a page: the home page is the site index.
pub fn output_path(page_id: &str) -> String {
    if page_id == HOME_PAGE_ID {
        "index.html".to_string()
    } else {
        format!("{}.html", page_id)
    }
}

/// Render every published page into `output`, then the shared assets and the
/// sitemap. A missing structure or active theme stops before anything is
/// written; a page that fails to render is skipped.
pub async fn publish_site(
    content: &ContentRepo,
    output: Arc<dyn BlobStore>,
    opts: &PublishOptions,
) -> Result<PublishReport, PublishError> {
    let structure = content.require_structure().map_err(PublishError::Manifest)?;
    let theme = Arc::new(content.require_active_theme().map_err(PublishError::Theme)?);
    let domain = match content.configured_domain() {
        Ok(Some(domain)) => domain,
        Ok(None) => opts.default_domain.clone(),
        Err(e) => {
            warn!(error = %e, "unreadable general settings, using default domain");
            opts.default_domain.clone()
        }
    };

    let pages: Vec<PageRef> = structure.published().cloned().collect();
    let total = pages.len();
    info!(pages = total, theme = %theme.id, domain = %domain, "publishing site");

    let pb = if opts.progress {
        ProgressBar::new(total as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let concurrency = opts.concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let render = Arc::new(opts.render.clone());
    let (tx, mut rx) = tokio::sync::mpsc::channel::<PageOutcome>(concurrency * 2);

    let mut handles = Vec::with_capacity(total);
    for page in pages {
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();
        let content = content.clone();
        let theme = Arc::clone(&theme);
        let render = Arc::clone(&render);

        handles.push(tokio::spawn(async move {
            let Ok(_permit) = sem.acquire_owned().await else {
                return;
            };
            let id = page.id.clone();
            let rendered =
                tokio::task::spawn_blocking(move || render_page(&content, &id, &theme, &render))
                    .await;
            let result = match rendered {
                Ok(result) => result,
                Err(e) => Err(format!("render task failed: {}", e)),
            };
            let _ = tx.send(PageOutcome { page, result }).await;
        }));
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish
    drop(tx);

    let mut written: HashMap<String, String> = HashMap::new();
    let mut report = PublishReport::default();

    while let Some(PageOutcome { page, result }) = rx.recv().await {
        match result {
            Ok(html) => {
                let key = output_path(&page.id);
                output.put(&key, html.as_bytes(), content_type_for(&key))?;
                info!(page = %page.id, file = %key, "page generated");
                written.insert(page.id, key);
            }
            Err(e) => {
                warn!(page = %page.id, error = %e, "page skipped");
                report.failed.push((page.id, e));
            }
        }
        pb.inc(1);
    }
    for handle in handles {
        handle.await?;
    }
    pb.finish_and_clear();

    let published: Vec<PageRef> = structure
        .published()
        .filter(|p| written.contains_key(&p.id))
        .cloned()
        .collect();
    for page in &published {
        report.pages.push(page.id.clone());
        if let Some(key) = written.remove(&page.id) {
            report.files.push(key);
        }
    }

    output.put(STYLESHEET_PATH, site_css(&theme).as_bytes(), content_type_for(STYLESHEET_PATH))?;
    output.put(SCRIPT_PATH, site_js().as_bytes(), content_type_for(SCRIPT_PATH))?;
    let sitemap = build_sitemap(&domain, &published, opts.lastmod).map_err(|e| {
        PublishError::Sitemap(e.to_string())
    })?;
    output.put(SITEMAP_PATH, sitemap.as_bytes(), content_type_for(SITEMAP_PATH))?;
    report.files.extend([STYLESHEET_PATH, SCRIPT_PATH, SITEMAP_PATH].map(String::from));

    let entry = PublishLogEntry {
        published_at: Utc::now(),
        status: if report.failed.is_empty() { "success" } else { "partial" }.to_string(),
        pages: report.pages.clone(),
        failed: report.failed.iter().map(|(id, _)| id.clone()).collect(),
    };
    match content.record_publish(&entry) {
        Ok(key) => report.log_key = Some(key),
        Err(e) => warn!(error = %e, "could not record publish log entry"),
    }

    info!(
        "Published {} pages ({} skipped, {} files)",
        report.pages.len(),
        report.failed.len(),
        report.files.len()
    );
    Ok(report)
}

/// Load one page and render it with the active theme in place of its own.
fn render_page(
    content: &ContentRepo,
    id: &str,
    theme: &Theme,
    render: &RenderOptions,
) -> Result<String, String> {
    let mut doc = content.page(id).map_err(|e| e.to_string())?;
    doc.theme = Some(theme.clone());
    Ok(generate_html(&doc, render))
}
