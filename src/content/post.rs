//! Post models

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// An authored article, as read from the content directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Site path of the article, always starting with `/`
    pub slug: String,

    /// Display title
    pub title: String,

    /// Publication date, used for ordering
    pub date: NaiveDate,

    /// Optional summary, used for SEO
    pub description: Option<String>,

    /// Raw markdown body (front-matter stripped)
    pub body: String,

    /// Full source file path
    pub source: PathBuf,

    /// Directory of the source relative to the content dir, `/`-separated.
    /// Relative image URLs in the body resolve against it.
    pub asset_dir: String,
}

impl Post {
    /// Output file of this post, relative to the public directory
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(self.slug.trim_start_matches('/')).join("index.html")
    }

    /// Project the post onto the fields listing pages need
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date,
        }
    }
}

/// A post whose body went through the markdown compiler
#[derive(Debug, Clone)]
pub struct CompiledPost<'a> {
    pub post: &'a Post,
    /// Compiled markup. Trusted: it comes from the site owner's own files.
    pub html: String,
}

/// Listing projection of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let post = Post {
            slug: "/o-padrao".to_string(),
            title: "O padrão".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            description: None,
            body: String::new(),
            source: PathBuf::from("articles/o-padrao.md"),
            asset_dir: String::new(),
        };
        assert_eq!(post.output_path(), PathBuf::from("o-padrao/index.html"));
        assert_eq!(post.index_entry().title, "O padrão");
    }
}
