//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Document title template, `%s` is replaced by the page title
    pub title_template: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    /// Default social image, relative to `url`
    pub image: Option<String>,

    // Analytics
    pub tracking_id: Option<String>,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Layout
    pub brand: BrandConfig,
    pub footer_links: Vec<LinkConfig>,
    pub stylesheets: Vec<String>,

    // Listing page
    pub index_title: String,
    pub intro: String,
    pub community: LinkConfig,
    pub index_limit: usize,

    // Writing
    pub date_format: String,
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "GUSTV0".to_string(),
            title_template: "%s".to_string(),
            description: String::new(),
            language: "pt-BR".to_string(),

            url: "http://gustv0.com".to_string(),
            image: None,

            tracking_id: None,

            content_dir: "articles".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            brand: BrandConfig::default(),
            footer_links: vec![
                LinkConfig::new("QuebraDev", "https://twitter.com/quebradev"),
                LinkConfig::new("Twitter", "https://twitter.com/gustv0_"),
                LinkConfig::new("Linkedin", "https://www.linkedin.com/in/gucastiliao"),
                LinkConfig::new("GitHub", "https://github.com/gucastiliao"),
            ],
            stylesheets: vec!["/base.css".to_string(), "/prism.css".to_string()],

            index_title: "GUSTV0 - Artigos".to_string(),
            intro: "Alguns estudos pessoais sobre desenvolvimento de software. \
                    Também faço parte de um podcast,"
                .to_string(),
            community: LinkConfig::new("@quebradev", "https://twitter.com/quebradev"),
            index_limit: 1000,

            date_format: "DD/MM/YYYY".to_string(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply the title template to a page title
    pub fn document_title(&self, title: &str) -> String {
        if self.title_template.contains("%s") {
            self.title_template.replace("%s", title)
        } else {
            title.to_string()
        }
    }

    /// Absolute URL for a site path
    pub fn full_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// An outbound `{label, url}` link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub label: String,
    pub url: String,
}

impl LinkConfig {
    pub fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Header brand: a home link wrapping an image and a label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    pub image: String,
    pub alt: String,
    pub label: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            image: "/images/kafka.png".to_string(),
            alt: "Franz Kafka, A Metamorfose".to_string(),
            label: "Artigos".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
