//! Content module - articles, the content store and its index

mod frontmatter;
mod index;
pub mod loader;
mod markdown;
mod post;
pub(crate) mod store;

pub use frontmatter::{normalize_slug, FrontMatter};
pub use index::build_index;
pub use loader::{ContentLoader, LoadedContent};
pub use markdown::{MarkdownCompiler, MarkdownRenderer};
pub use post::{CompiledPost, IndexEntry, Post};
pub use store::ContentStore;
