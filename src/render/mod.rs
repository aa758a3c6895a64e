//! Page rendering: the page shell, article pages and the listing page
//!
//! Every operation here is a pure function of its inputs and the content
//! store snapshot. Nothing is written to disk; that is the generator's job.

mod article;
mod listing;
mod seo;
mod shell;

pub use seo::seo_data;
pub use shell::PageShell;

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::{MarkdownCompiler, MarkdownRenderer};
use crate::error::Result;
use crate::templates::TemplateRenderer;

/// Per-page metadata handed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: Option<String>,
    /// Article (detail) page rather than a listing
    pub is_article: bool,
    /// Site path of the page, used for the canonical URL
    pub path: String,
}

/// A fully rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// Site path the page is served at
    pub path: String,
    /// Output file, relative to the public directory
    pub output: PathBuf,
    pub metadata: PageMetadata,
    pub html: String,
}

/// Renders listing and article pages for one site configuration
pub struct Renderer {
    config: SiteConfig,
    templates: TemplateRenderer,
    compiler: Box<dyn MarkdownCompiler>,
}

impl Renderer {
    /// Create a renderer using the built-in markdown compiler
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let compiler = MarkdownRenderer::with_options(&config.highlight);
        Self::with_compiler(config, Box::new(compiler))
    }

    /// Create a renderer with a custom markdown compiler
    pub fn with_compiler(config: &SiteConfig, compiler: Box<dyn MarkdownCompiler>) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            templates: TemplateRenderer::new()?,
            compiler,
        })
    }

    /// The shell every page is wrapped in
    pub fn shell(&self) -> PageShell<'_> {
        PageShell::new(&self.config, &self.templates)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}
