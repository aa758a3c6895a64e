//! Content store - the snapshot of all posts for one generation run

use std::collections::HashMap;
use std::path::PathBuf;

use super::Post;
use crate::error::{Error, Result};

/// Read-only collection of posts, in file order
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    posts: Vec<Post>,
}

impl ContentStore {
    /// Build a store from posts already in file order
    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Resolve a slug to exactly one post
    pub fn resolve(&self, slug: &str) -> Result<&Post> {
        let wanted = normalize_lookup(slug);
        let mut matches = self.posts.iter().filter(|p| p.slug == wanted);

        let first = matches.next().ok_or_else(|| Error::NotFound {
            slug: slug.to_string(),
        })?;

        if matches.next().is_some() {
            return Err(Error::AmbiguousSlug {
                slug: first.slug.clone(),
                sources: self.sources_of(&first.slug),
            });
        }

        Ok(first)
    }

    /// Every slug claimed by more than one post, in order of first appearance
    pub fn duplicate_slugs(&self) -> Vec<(String, Vec<PathBuf>)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for post in &self.posts {
            *counts.entry(post.slug.as_str()).or_insert(0) += 1;
        }

        let mut seen = Vec::new();
        for post in &self.posts {
            if counts[post.slug.as_str()] > 1 && !seen.iter().any(|(s, _)| s == &post.slug) {
                seen.push((post.slug.clone(), self.sources_of(&post.slug)));
            }
        }
        seen
    }

    /// Distinct slugs in file order
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = Vec::with_capacity(self.posts.len());
        for post in &self.posts {
            if !slugs.contains(&post.slug.as_str()) {
                slugs.push(&post.slug);
            }
        }
        slugs
    }

    fn sources_of(&self, slug: &str) -> Vec<PathBuf> {
        self.posts
            .iter()
            .filter(|p| p.slug == slug)
            .map(|p| p.source.clone())
            .collect()
    }
}

/// Lookups accept slugs with or without the leading `/`
fn normalize_lookup(slug: &str) -> String {
    format!("/{}", slug.trim().trim_matches('/'))
}
