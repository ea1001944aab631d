//! bad-lemon: build-time content pipeline for a markdown technical blog
//!
//! Markdown posts are parsed once into a sorted [`content::PostRepository`],
//! which backs category/tag/archive browsing, client-side search and the RSS
//! feed written by the [`generator`].

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::TimestampConfig;
use content::{
    ContentLoader, MtimeSource, NoTimestamps, PostRepository, TimestampMap, TimestampSource,
};

/// Config file name, looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog being built
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Reader state store file
    pub store_path: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let store_path = base_dir.join(&config.store_file);

        Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
            store_path,
        }
    }

    /// Timestamp source selected by the config
    pub fn timestamp_source(&self) -> Result<Box<dyn TimestampSource>> {
        let source: Box<dyn TimestampSource> = match &self.config.timestamps {
            TimestampConfig::Mtime => Box::new(MtimeSource),
            TimestampConfig::None => Box::new(NoTimestamps),
            TimestampConfig::File(path) => {
                Box::new(TimestampMap::load(self.base_dir.join(path))?)
            }
        };
        Ok(source)
    }

    /// Load and sort every post
    pub fn load(&self) -> Result<PostRepository> {
        let loader = ContentLoader::new(&self.config, self.timestamp_source()?);
        Ok(loader.load_repository(&self.posts_dir)?)
    }

    /// Generate the build artifacts
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Open the reader state store
    pub fn store(&self) -> store::KvStore {
        store::KvStore::load(&self.store_path)
    }
}
