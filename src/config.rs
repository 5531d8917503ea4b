use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::schema::defaults::SITE_NAME;

pub const DEFAULT_DOMAIN: &str = "https://www.ayurveda-equilibre.com";
const CONFIG_FILE: &str = "pagesmith";
const ENV_PREFIX: &str = "PAGESMITH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Fs,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub backend: Backend,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub database_path: PathBuf,
    /// Used for the sitemap when `settings/general.json` has none.
    pub domain: String,
    pub site_name: String,
    /// Pages rendered at the same time while publishing.
    pub concurrency: usize,
}

impl Settings {
    /// Defaults, then `pagesmith.toml` (or the given file), then `PAGESMITH_*`
    /// environment variables.
    pub fn load(file: Option<&Path>) -> Result<Settings, ConfigError> {
        let builder = Self::defaults()?;
        let builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(CONFIG_FILE).required(false)),
        };
        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings.normalized())
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("backend", "fs")?
            .set_default("content_dir", "data/content")?
            .set_default("output_dir", "public")?
            .set_default("database_path", "data/pagesmith.sqlite")?
            .set_default("domain", DEFAULT_DOMAIN)?
            .set_default("site_name", SITE_NAME)?
            .set_default("concurrency", 4_i64)
    }

    fn normalized(mut self) -> Settings {
        self.concurrency = self.concurrency.max(1);
        self.domain = self.domain.trim().trim_end_matches('/').to_string();
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend: Backend::Fs,
            content_dir: PathBuf::from("data/content"),
            output_dir: PathBuf::from("public"),
            database_path: PathBuf::from("data/pagesmith.sqlite"),
            domain: DEFAULT_DOMAIN.to_string(),
            site_name: SITE_NAME.to_string(),
            concurrency: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default_impl() {
        let settings: Settings = Settings::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("pagesmith-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("site.toml");
        std::fs::write(
            &file,
            "backend = \"sqlite\"\ndomain = \"https://example.org/\"\nconcurrency = 0\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&file)).unwrap();
        assert_eq!(settings.backend, Backend::Sqlite);
        assert_eq!(settings.domain, "https://example.org");
        assert_eq!(settings.concurrency, 1);
        assert_eq!(settings.output_dir, PathBuf::from("public"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
