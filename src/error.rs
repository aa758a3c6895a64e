//! Build errors
//!
//! Every error here is raised while generating the site. None of them abort a
//! run on their own: the generator records them per page and reports them all
//! at the end.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, indexing or rendering content
#[derive(Debug, Error)]
pub enum Error {
    /// The slug does not belong to any post
    #[error("no post with slug `{slug}`")]
    NotFound { slug: String },

    /// More than one post claims the same slug
    #[error("slug `{slug}` is claimed by {} posts: {}", .sources.len(), display_paths(.sources))]
    AmbiguousSlug { slug: String, sources: Vec<PathBuf> },

    /// Front-matter is missing, malformed or incomplete
    #[error("invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    /// The markdown compiler rejected the post body
    #[error("failed to compile {path:?}: {message}")]
    Compile { path: PathBuf, message: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn front_matter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FrontMatter {
            path: path.into(),
            message: message.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_ambiguous_slug_lists_sources() {
        let err = Error::AmbiguousSlug {
            slug: "/a".to_string(),
            sources: vec![PathBuf::from("one.md"), PathBuf::from("two.md")],
        };
        let display = err.to_string();
        assert!(display.contains("`/a`"));
        assert!(display.contains("2 posts"));
        assert!(display.contains("one.md, two.md"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "missing.md",
            std::io::Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("missing.md"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
