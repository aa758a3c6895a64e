//! Content loader - reads articles from the content directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentStore, FrontMatter, Post};
use crate::error::Error;
use crate::Site;

/// Everything found in the content directory
#[derive(Debug, Default)]
pub struct LoadedContent {
    /// Posts that parsed, in file order
    pub store: ContentStore,
    /// Files that were rejected, one error per file
    pub failures: Vec<Error>,
    /// Non-markdown files, relative to the content directory
    pub assets: Vec<PathBuf>,
}

/// Loads articles from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all articles
    ///
    /// A file with broken front-matter, or a directory that cannot be read,
    /// is recorded in `failures` and skipped; it never prevents the others
    /// from loading.
    pub fn load(&self) -> Result<LoadedContent> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(LoadedContent::default());
        }

        let mut posts = Vec::new();
        let mut failures = Vec::new();
        let mut assets = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(content_dir).to_path_buf();
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    failures.push(Error::io(path, e.into()));
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || is_hidden(path) {
                continue;
            }

            if is_markdown_file(path) {
                match load_post(content_dir, path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                        failures.push(e);
                    }
                }
            } else if let Ok(relative) = path.strip_prefix(content_dir) {
                assets.push(relative.to_path_buf());
            }
        }

        tracing::debug!(
            "Loaded {} posts, {} rejected, {} assets",
            posts.len(),
            failures.len(),
            assets.len()
        );

        Ok(LoadedContent {
            store: ContentStore::from_posts(posts),
            failures,
            assets,
        })
    }
}

/// Load a single post from a file
fn load_post(content_dir: &Path, path: &Path) -> Result<Post, Error> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (fm, body) = FrontMatter::parse(&content, path)?;
    let fm = fm.validate(path)?;

    let asset_dir = path
        .parent()
        .and_then(|p| p.strip_prefix(content_dir).ok())
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    Ok(Post {
        slug: fm.slug,
        title: fm.title,
        date: fm.date,
        description: fm.description,
        body: body.to_string(),
        source: path.to_path_buf(),
        asset_dir,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
