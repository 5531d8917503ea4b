use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ContentError, ContentResult, StoreError};
use crate::parser::parse_html_page;
use crate::schema::defaults::SITE_NAME;
use crate::schema::{Block, PageDocument, Section, SectionType, Theme};
use crate::store::{content_type_for, BlobStore, Version, VERSIONS_PREFIX};

pub const STRUCTURE_KEY: &str = "structure.json";
pub const ACTIVE_THEME_KEY: &str = "active-theme.json";
pub const GENERAL_SETTINGS_KEY: &str = "settings/general.json";
pub const HOME_PAGE_ID: &str = "home";
const PAGES_PREFIX: &str = "pages/";
const THEMES_PREFIX: &str = "themes/";
const TEMPLATES_PREFIX: &str = "templates/";
const PUBLISH_LOG_PREFIX: &str = "publish-log/";
const MAIN_NAVIGATION: &str = "main";
const SITE_INDEX_ID: &str = "index";

/// Site manifest: the page list and the named navigation menus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStructure {
    #[serde(default)]
    pub pages: Vec<PageRef>,
    #[serde(default)]
    pub navigation: BTreeMap<String, Vec<NavEntry>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRef {
    pub id: String,
    pub title: String,
    pub path: String,
    pub template: String,
    pub is_published: bool,
}

impl PageRef {
    /// Site-relative path, derived from the id when none is stored.
    pub fn url_path(&self) -> String {
        match self.path.trim() {
            "" if self.id == HOME_PAGE_ID => "/".to_string(),
            "" => format!("/{}", self.id),
            path => path.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
    pub path: String,
}

impl Default for SiteStructure {
    fn default() -> Self {
        let mut navigation = BTreeMap::new();
        navigation.insert(
            MAIN_NAVIGATION.to_string(),
            vec![NavEntry {
                id: HOME_PAGE_ID.into(),
                label: "Accueil".into(),
                path: "/".into(),
            }],
        );
        SiteStructure {
            pages: vec![PageRef {
                id: HOME_PAGE_ID.into(),
                title: "Accueil".into(),
                path: "/".into(),
                template: HOME_PAGE_ID.into(),
                is_published: true,
            }],
            navigation,
        }
    }
}

impl SiteStructure {
    pub fn page(&self, id: &str) -> Option<&PageRef> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn published(&self) -> impl Iterator<Item = &PageRef> {
        self.pages.iter().filter(|p| p.is_published)
    }
}

/// Where a newly created page is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    /// Only the page document is written.
    #[default]
    Unlisted,
    /// Added to `structure.pages`, unpublished.
    Pages,
    /// Also appended to the main navigation.
    MainNavigation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishLogEntry {
    pub published_at: DateTime<Utc>,
    pub status: String,
    pub pages: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Back-office operations over a content store.
#[derive(Clone)]
pub struct ContentRepo {
    store: Arc<dyn BlobStore>,
}

impl ContentRepo {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        ContentRepo { store }
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    // ── Structure ──

    /// Site structure, or the default one when none has been saved.
    pub fn structure(&self) -> ContentResult<SiteStructure> {
        Ok(self.read_json(STRUCTURE_KEY)?.unwrap_or_default())
    }

    /// Site structure; a missing file is an error.
    pub fn require_structure(&self) -> ContentResult<SiteStructure> {
        self.read_json(STRUCTURE_KEY)?
            .ok_or_else(|| ContentError::NotFound(STRUCTURE_KEY.into()))
    }

    pub fn save_structure(&self, structure: &SiteStructure) -> ContentResult<()> {
        self.write_json(STRUCTURE_KEY, structure, true)
    }

    // ── Pages ──

    pub fn page(&self, id: &str) -> ContentResult<PageDocument> {
        let key = page_key(id)?;
        let bytes = self
            .store
            .get(&key)?
            .ok_or_else(|| ContentError::NotFound(key.clone()))?;
        PageDocument::from_json(&bytes).map_err(|e| ContentError::invalid_json(key, e))
    }

    /// Ids of every stored page document.
    pub fn page_ids(&self) -> ContentResult<Vec<String>> {
        Ok(self
            .store
            .list(PAGES_PREFIX)?
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(PAGES_PREFIX)?
                    .strip_suffix(".json")
                    .map(str::to_string)
            })
            .collect())
    }

    pub fn save_page(&self, id: &str, doc: &PageDocument) -> ContentResult<()> {
        let key = page_key(id)?;
        self.store.snapshot(&key)?;
        let bytes = doc.to_json().map_err(|e| ContentError::invalid_json(&key, e))?;
        self.store.put(&key, &bytes, content_type_for(&key))?;
        debug!(page = id, "page saved");
        Ok(())
    }

    pub fn create_page(&self, id: &str, doc: &PageDocument, listing: Listing) -> ContentResult<()> {
        let key = page_key(id)?;
        if self.store.exists(&key)? {
            return Err(ContentError::Conflict(key));
        }
        let bytes = doc.to_json().map_err(|e| ContentError::invalid_json(&key, e))?;
        self.store.put(&key, &bytes, content_type_for(&key))?;

        self.list_page(id, doc, listing)?;
        info!(page = id, ?listing, "page created");
        Ok(())
    }

    /// Register a page in `structure.pages` (unpublished) and, for
    /// [`Listing::MainNavigation`], in the main menu.
    pub fn list_page(&self, id: &str, doc: &PageDocument, listing: Listing) -> ContentResult<()> {
        if listing == Listing::Unlisted {
            return Ok(());
        }
        let title = if doc.title.trim().is_empty() { id } else { doc.title.as_str() };
        let path = doc.path.clone().unwrap_or_else(|| format!("/{}", id));
        let mut structure = self.structure()?;
        structure.pages.retain(|p| p.id != id);
        structure.pages.push(PageRef {
            id: id.to_string(),
            title: title.to_string(),
            path: path.clone(),
            template: doc.template.clone().unwrap_or_else(|| "default".into()),
            is_published: false,
        });
        if listing == Listing::MainNavigation {
            let menu = structure
                .navigation
                .entry(MAIN_NAVIGATION.to_string())
                .or_default();
            menu.retain(|e| e.id != id);
            menu.push(NavEntry {
                id: id.to_string(),
                label: title.to_string(),
                path,
            });
        }
        self.save_structure(&structure)
    }

    /// Snapshot, delete, then drop the page from the page list and every menu.
    pub fn delete_page(&self, id: &str) -> ContentResult<()> {
        let key = page_key(id)?;
        if !self.store.exists(&key)? {
            return Err(ContentError::NotFound(key));
        }
        self.store.snapshot(&key)?;
        self.store.delete(&key)?;

        let mut structure = self.structure()?;
        structure.pages.retain(|p| p.id != id);
        for entries in structure.navigation.values_mut() {
            entries.retain(|e| e.id != id);
        }
        self.save_structure(&structure)?;
        info!(page = id, "page deleted");
        Ok(())
    }

    pub fn set_published(&self, id: &str, published: bool) -> ContentResult<()> {
        let mut structure = self.structure()?;
        let entry = structure
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ContentError::NotFound(format!("page {} in {}", id, STRUCTURE_KEY)))?;
        entry.is_published = published;
        self.save_structure(&structure)
    }

    /// Append a starter block of `type_name` to a section of a stored page and
    /// return the new block's id.
    pub fn add_block(&self, page_id: &str, section_id: &str, type_name: &str) -> ContentResult<String> {
        let block = Block::placeholder(type_name)
            .ok_or_else(|| ContentError::UnknownBlockType(type_name.to_string()))?;
        let mut doc = self.page(page_id)?;
        let section = doc
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| ContentError::NotFound(format!("section {} in page {}", section_id, page_id)))?;
        let id = block.id().to_string();
        section.content.push(block);
        self.save_page(page_id, &doc)?;
        debug!(page = page_id, section = section_id, block = %id, "block added");
        Ok(id)
    }

    // ── Themes ──

    /// Active theme, or the default theme when none has been saved.
    pub fn active_theme(&self) -> ContentResult<Theme> {
        Ok(self.read_json(ACTIVE_THEME_KEY)?.unwrap_or_default())
    }

    /// Active theme; a missing file is an error.
    pub fn require_active_theme(&self) -> ContentResult<Theme> {
        self.read_json(ACTIVE_THEME_KEY)?
            .ok_or_else(|| ContentError::NotFound(ACTIVE_THEME_KEY.into()))
    }

    pub fn set_active_theme(&self, theme: &Theme) -> ContentResult<()> {
        self.write_json(ACTIVE_THEME_KEY, theme, true)?;
        info!(theme = %theme.id, "active theme updated");
        Ok(())
    }

    /// Every readable `themes/*theme.json`. Unreadable files are skipped.
    pub fn themes(&self) -> ContentResult<Vec<Theme>> {
        let mut themes = Vec::new();
        for key in self.store.list(THEMES_PREFIX)? {
            if !key.ends_with("theme.json") {
                continue;
            }
            match self.read_json::<Theme>(&key) {
                Ok(Some(theme)) => themes.push(theme),
                Ok(None) => {}
                Err(e) => warn!(key = %key, error = %e, "skipping unreadable theme"),
            }
        }
        Ok(themes)
    }

    pub fn create_theme(&self, id: &str, theme: &Theme) -> ContentResult<()> {
        let key = format!("{}{}-theme.json", THEMES_PREFIX, checked_id(id)?);
        if self.store.exists(&key)? {
            return Err(ContentError::Conflict(key));
        }
        let mut theme = theme.clone();
        theme.id = id.to_string();
        self.write_json(&key, &theme, false)
    }

    // ── Versions ──

    /// Snapshots, newest first.
    pub fn versions(&self) -> ContentResult<Vec<Version>> {
        let mut versions: Vec<Version> = self
            .store
            .list(VERSIONS_PREFIX)?
            .iter()
            .filter_map(|key| Version::from_key(key))
            .collect();
        versions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.file.cmp(&b.file)));
        Ok(versions)
    }

    /// Copy a snapshot over `target`, snapshotting the current target first.
    pub fn restore_version(&self, version: &str, target: &str) -> ContentResult<()> {
        let version_key = format!("{}{}", VERSIONS_PREFIX, version);
        let bytes = self
            .store
            .get(&version_key)?
            .ok_or_else(|| ContentError::NotFound(version_key.clone()))?;
        self.store.snapshot(target)?;
        self.store.put(target, &bytes, content_type_for(target))?;
        info!(version, target, "version restored");
        Ok(())
    }

    // ── Settings and bootstrap ──

    /// `domain` from the general settings, when set.
    pub fn configured_domain(&self) -> ContentResult<Option<String>> {
        #[derive(Deserialize, Default)]
        #[serde(default)]
        struct General {
            domain: String,
        }
        let general: Option<General> = self.read_json(GENERAL_SETTINGS_KEY)?;
        Ok(general
            .map(|g| g.domain.trim().trim_end_matches('/').to_string())
            .filter(|d| !d.is_empty()))
    }

    /// Write the default structure, theme and home page where they are missing.
    /// Returns whether anything was written.
    pub fn init_defaults(&self) -> ContentResult<bool> {
        let mut wrote = false;
        if !self.store.exists(STRUCTURE_KEY)? {
            self.write_json(STRUCTURE_KEY, &SiteStructure::default(), false)?;
            wrote = true;
        }
        if !self.store.exists(ACTIVE_THEME_KEY)? {
            self.write_json(ACTIVE_THEME_KEY, &Theme::default(), false)?;
            wrote = true;
        }
        let home = page_key(HOME_PAGE_ID)?;
        if !self.store.exists(&home)? {
            self.write_json(&home, &default_home_page(), false)?;
            wrote = true;
        }
        if wrote {
            info!("default content initialised");
        }
        Ok(wrote)
    }

    pub fn record_publish(&self, entry: &PublishLogEntry) -> ContentResult<String> {
        let stamp = entry.published_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let key = format!("{}publish-{}.json", PUBLISH_LOG_PREFIX, stamp);
        self.write_json(&key, entry, false)?;
        Ok(key)
    }

    // ── Templates ──

    /// Parse an HTML page and store it as page `page_id`.
    pub fn import_template(&self, html: &str, page_id: &str) -> ContentResult<PageDocument> {
        let mut doc = parse_html_page(html)?;
        doc.ensure_ids();
        self.save_page(page_id, &doc)?;
        info!(page = page_id, sections = doc.sections.len(), "template imported");
        Ok(doc)
    }

    /// Parse every `templates/*.html` and store the structure beside it as
    /// `templates/*.json`. Failures are logged and reported, not fatal.
    pub fn import_templates(&self) -> ContentResult<ImportReport> {
        let keys: Vec<String> = self
            .store
            .list(TEMPLATES_PREFIX)?
            .into_iter()
            .filter(|k| k.ends_with(".html"))
            .collect();

        let results: Vec<(String, Result<(), String>)> = keys
            .par_iter()
            .map(|key| (key.clone(), self.import_one_template(key).map_err(|e| e.to_string())))
            .collect();

        let mut report = ImportReport::default();
        for (key, result) in results {
            match result {
                Ok(()) => report.imported.push(key),
                Err(e) => {
                    warn!(template = %key, error = %e, "template import failed");
                    report.failed.push((key, e));
                }
            }
        }
        info!(imported = report.imported.len(), failed = report.failed.len(), "templates processed");
        Ok(report)
    }

    fn import_one_template(&self, key: &str) -> ContentResult<()> {
        let bytes = self
            .store
            .get(key)?
            .ok_or_else(|| ContentError::NotFound(key.to_string()))?;
        let html = String::from_utf8_lossy(&bytes);
        let mut doc = parse_html_page(&html)?;
        doc.ensure_ids();
        let target = format!("{}.json", key.trim_end_matches(".html"));
        self.write_json(&target, &doc, false)
    }

    // ── JSON helpers ──

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> ContentResult<Option<T>> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        let mut value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ContentError::invalid_json(key, e))?;
        crate::schema::prune_nulls(&mut value);
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ContentError::invalid_json(key, e))
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T, snapshot: bool) -> ContentResult<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| ContentError::invalid_json(key, e))?;
        if snapshot {
            self.store.snapshot(key)?;
        }
        self.store.put(key, &bytes, content_type_for(key))?;
        Ok(())
    }
}

/// Store key of a page document. `index` is refused because publishing
/// writes the home page to `index.html`.
pub fn page_key(id: &str) -> ContentResult<String> {
    let id = checked_id(id)?;
    if id.eq_ignore_ascii_case(SITE_INDEX_ID) {
        return Err(StoreError::InvalidKey(id.to_string()).into());
    }
    Ok(format!("{}{}.json", PAGES_PREFIX, id))
}

fn checked_id(id: &str) -> ContentResult<&str> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id)
    } else {
        Err(StoreError::InvalidKey(id.to_string()).into())
    }
}

/// Home page skeleton; every section renders its placeholder content.
pub fn default_home_page() -> PageDocument {
    PageDocument {
        title: format!("Accueil | {}", SITE_NAME),
        sections: vec![
            Section::skeleton("header", SectionType::Header, "header"),
            Section::skeleton("accueil", SectionType::Section, "hero"),
            Section::skeleton("soins", SectionType::Section, "services"),
            Section::skeleton("philosophie", SectionType::Section, "philosophy"),
            Section::skeleton("temoignages", SectionType::Section, "testimonials"),
            Section::skeleton("contact", SectionType::Section, "contact"),
            Section::skeleton("footer", SectionType::Footer, "footer"),
        ],
        path: Some("/".into()),
        template: Some(HOME_PAGE_ID.into()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::blocks::Paragraph;
    use crate::store::SqliteStore;

    fn repo() -> ContentRepo {
        ContentRepo::new(Arc::new(SqliteStore::in_memory().unwrap()))
    }

    fn doc(title: &str) -> PageDocument {
        PageDocument {
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn init_is_idempotent() {
        let repo = repo();
        assert!(repo.init_defaults().unwrap());
        assert!(!repo.init_defaults().unwrap());
        let structure = repo.require_structure().unwrap();
        assert_eq!(structure, SiteStructure::default());
        assert_eq!(repo.require_active_theme().unwrap(), Theme::default());
        assert_eq!(repo.page(HOME_PAGE_ID).unwrap().sections.len(), 7);
        assert!(repo.versions().unwrap().is_empty());
    }

    #[test]
    fn missing_files_fall_back_or_fail() {
        let repo = repo();
        assert_eq!(repo.structure().unwrap(), SiteStructure::default());
        assert_eq!(repo.active_theme().unwrap(), Theme::default());
        assert!(matches!(repo.require_structure(), Err(ContentError::NotFound(_))));
        assert!(matches!(repo.require_active_theme(), Err(ContentError::NotFound(_))));
        assert!(matches!(repo.page("nope"), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn corrupt_json_is_reported() {
        let repo = repo();
        repo.store().put(STRUCTURE_KEY, b"{not json", "application/json").unwrap();
        assert!(matches!(repo.structure(), Err(ContentError::InvalidJson { .. })));
    }

    #[test]
    fn create_page_registers_in_navigation() {
        let repo = repo();
        repo.init_defaults().unwrap();
        repo.create_page("soins", &doc("Nos soins"), Listing::MainNavigation).unwrap();

        let structure = repo.structure().unwrap();
        let entry = structure.page("soins").unwrap();
        assert_eq!(entry.title, "Nos soins");
        assert_eq!(entry.path, "/soins");
        assert!(!entry.is_published);
        assert_eq!(structure.navigation["main"].last().unwrap().id, "soins");

        assert!(matches!(
            repo.create_page("soins", &doc("again"), Listing::Unlisted),
            Err(ContentError::Conflict(_))
        ));
    }

    #[test]
    fn unlisted_page_leaves_structure_alone() {
        let repo = repo();
        repo.init_defaults().unwrap();
        repo.create_page("draft", &doc(""), Listing::Unlisted).unwrap();
        assert!(repo.structure().unwrap().page("draft").is_none());
        assert_eq!(repo.page_ids().unwrap(), vec!["draft".to_string(), "home".to_string()]);
    }

    #[test]
    fn delete_page_prunes_every_menu() {
        let repo = repo();
        repo.init_defaults().unwrap();
        repo.create_page("blog", &doc("Blog"), Listing::MainNavigation).unwrap();
        let mut structure = repo.structure().unwrap();
        structure.navigation.insert(
            "footer".into(),
            vec![NavEntry {
                id: "blog".into(),
                label: "Blog".into(),
                path: "/blog".into(),
            }],
        );
        repo.save_structure(&structure).unwrap();

        repo.delete_page("blog").unwrap();
        let structure = repo.structure().unwrap();
        assert!(structure.page("blog").is_none());
        assert!(structure.navigation.values().flatten().all(|e| e.id != "blog"));
        assert!(matches!(repo.page("blog"), Err(ContentError::NotFound(_))));
        assert!(repo
            .versions()
            .unwrap()
            .iter()
            .any(|v| v.source == "pages/blog.json"));
        assert!(matches!(repo.delete_page("blog"), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn publish_flag_toggles() {
        let repo = repo();
        repo.init_defaults().unwrap();
        repo.create_page("contact", &doc("Contact"), Listing::Pages).unwrap();
        repo.set_published("contact", true).unwrap();
        assert!(repo.structure().unwrap().page("contact").unwrap().is_published);
        assert!(matches!(repo.set_published("ghost", true), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn save_restores_through_versions() {
        let repo = repo();
        let mut page = doc("v1");
        repo.save_page("about", &page).unwrap();
        page.title = "v2".into();
        repo.save_page("about", &page).unwrap();

        let versions = repo.versions().unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].source, "pages/about.json");

        repo.restore_version(&versions[0].file, "pages/about.json").unwrap();
        assert_eq!(repo.page("about").unwrap().title, "v1");
        // Restoring snapshots the overwritten v2 as well.
        assert_eq!(repo.versions().unwrap().len(), 2);
        assert!(matches!(
            repo.restore_version("pages/about.json-nope", "pages/about.json"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn themes_are_listed_and_unique() {
        let repo = repo();
        let mut zen = Theme::default();
        zen.colors.primary = "#123456".into();
        repo.create_theme("zen", &zen).unwrap();
        repo.create_theme("sable", &Theme::default()).unwrap();
        assert!(matches!(repo.create_theme("zen", &zen), Err(ContentError::Conflict(_))));
        repo.store().put("themes/broken-theme.json", b"[", "application/json").unwrap();

        let themes = repo.themes().unwrap();
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["sable", "zen"]);

        repo.set_active_theme(&themes[1]).unwrap();
        assert_eq!(repo.active_theme().unwrap().colors.primary, "#123456");
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let repo = repo();
        for id in ["", "../x", "a/b", "a b"] {
            assert!(matches!(
                repo.save_page(id, &doc("x")),
                Err(ContentError::Store(StoreError::InvalidKey(_)))
            ));
        }
    }

    #[test]
    fn add_block_appends_a_starter_block() {
        let repo = repo();
        repo.create_page("soins", &PageDocument::new_page("Soins"), Listing::Unlisted).unwrap();
        let id = repo.add_block("soins", "main-content", "heading").unwrap();
        assert!(id.starts_with("heading-"));

        let doc = repo.page("soins").unwrap();
        let main = doc.sections.iter().find(|s| s.id == "main-content").unwrap();
        let Block::Heading(h) = &main.content[0] else { panic!("expected heading") };
        assert_eq!(h.id, id);
        assert_eq!(h.text, "Titre");
        assert_eq!(repo.versions().unwrap().len(), 1);

        assert!(matches!(
            repo.add_block("soins", "main-content", "countdown"),
            Err(ContentError::UnknownBlockType(_))
        ));
        assert!(matches!(
            repo.add_block("soins", "sidebar", "heading"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn index_cannot_shadow_the_home_page() {
        let repo = repo();
        repo.init_defaults().unwrap();
        for id in ["index", "INDEX"] {
            assert!(matches!(
                repo.create_page(id, &doc("Index"), Listing::Pages),
                Err(ContentError::Store(StoreError::InvalidKey(_)))
            ));
        }
        assert!(repo.structure().unwrap().page("index").is_none());
        assert!(repo.store().list(PAGES_PREFIX).unwrap().iter().all(|k| k != "pages/index.json"));
    }

    #[test]
    fn domain_comes_from_general_settings() {
        let repo = repo();
        assert_eq!(repo.configured_domain().unwrap(), None);
        repo.store()
            .put(GENERAL_SETTINGS_KEY, br#"{"domain":"https://zen.example/","siteName":"Zen"}"#, "application/json")
            .unwrap();
        assert_eq!(repo.configured_domain().unwrap().as_deref(), Some("https://zen.example"));
    }

    #[test]
    fn import_template_stores_parsed_page() {
        let repo = repo();
        let html = std::fs::read_to_string("tests/fixtures/ayurveda.html").unwrap();
        let doc = repo.import_template(&html, "home").unwrap();
        let stored = repo.page("home").unwrap();
        assert_eq!(stored, doc);
        assert_eq!(stored.sections.len(), 8);
        assert!(matches!(repo.import_template("plain words", "x"), Err(ContentError::Parse(_))));
    }

    #[test]
    fn import_templates_skips_failures() {
        let repo = repo();
        let html = std::fs::read_to_string("tests/fixtures/ayurveda.html").unwrap();
        repo.store().put("templates/zen.html", html.as_bytes(), "text/html").unwrap();
        repo.store().put("templates/empty.html", b"   ", "text/html").unwrap();
        repo.store()
            .put(
                "templates/tiny.html",
                b"<html><body><section class=\"x\"><p>Bonjour</p></section></body></html>",
                "text/html",
            )
            .unwrap();

        let report = repo.import_templates().unwrap();
        let mut imported = report.imported.clone();
        imported.sort();
        assert_eq!(imported, vec!["templates/tiny.html".to_string(), "templates/zen.html".to_string()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "templates/empty.html");

        let bytes = repo.store().get("templates/tiny.json").unwrap().unwrap();
        let tiny = PageDocument::from_json(&bytes).unwrap();
        let Block::Paragraph(Paragraph { text, .. }) = &tiny.sections[0].content[0] else {
            panic!("expected paragraph")
        };
        assert_eq!(text, "Bonjour");
        assert!(!repo.store().exists("templates/empty.json").unwrap());
    }

    #[test]
    fn url_paths() {
        let page = |id: &str, path: &str| PageRef {
            id: id.into(),
            path: path.into(),
            ..Default::default()
        };
        assert_eq!(page("home", "").url_path(), "/");
        assert_eq!(page("soins", "").url_path(), "/soins");
        assert_eq!(page("soins", "/nos-soins").url_path(), "/nos-soins");
    }
}
