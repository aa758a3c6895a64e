//! Listing page

use std::path::PathBuf;
use tera::Context;

use super::{PageDocument, PageMetadata, Renderer};
use crate::content::{build_index, ContentStore};
use crate::error::Result;
use crate::templates::ListingData;

impl Renderer {
    /// Render the home page: intro paragraph and one link per post, newest first
    pub fn render_index(&self, store: &ContentStore) -> Result<PageDocument> {
        let entries = build_index(store, self.config.index_limit)?;

        let context = Context::from_serialize(ListingData {
            intro: &self.config.intro,
            community: &self.config.community,
            entries: &entries,
        })?;
        let body = self.templates.render("index.html", &context)?;

        let metadata = PageMetadata {
            title: self.config.index_title.clone(),
            description: None,
            is_article: false,
            path: "/".to_string(),
        };
        let html = self.shell().render_page(&metadata, &body)?;

        Ok(PageDocument {
            path: "/".to_string(),
            output: PathBuf::from("index.html"),
            metadata,
            html,
        })
    }
}
