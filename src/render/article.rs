//! Article pages

use tera::Context;

use super::{PageDocument, PageMetadata, Renderer};
use crate::content::{CompiledPost, ContentStore};
use crate::error::Result;
use crate::helpers::{date_xml, format_date};
use crate::templates::ArticleData;

impl Renderer {
    /// Render the page for one article
    ///
    /// Fails with `NotFound` or `AmbiguousSlug` when the slug does not resolve
    /// to exactly one post, and with `Compile` when the markdown compiler
    /// rejects the body. The compiled HTML is inserted verbatim: posts are
    /// written by the site owner, so they are trusted and never re-sanitised.
    pub fn render_article(&self, slug: &str, store: &ContentStore) -> Result<PageDocument> {
        let post = store.resolve(slug)?;
        let compiled = CompiledPost {
            post,
            html: self.compiler.compile(post)?,
        };

        let context = Context::from_serialize(ArticleData {
            title: &compiled.post.title,
            date: format_date(&compiled.post.date, &self.config.date_format),
            datetime: date_xml(&compiled.post.date),
            content: &compiled.html,
        })?;
        let body = self.templates.render("article.html", &context)?;

        let metadata = PageMetadata {
            title: post.title.clone(),
            description: post.description.clone(),
            is_article: true,
            path: post.slug.clone(),
        };
        let html = self.shell().render_page(&metadata, &body)?;

        Ok(PageDocument {
            path: post.slug.clone(),
            output: post.output_path(),
            metadata,
            html,
        })
    }
}
