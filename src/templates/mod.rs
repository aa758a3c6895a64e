//! Built-in page templates using the Tera template engine
//!
//! The templates are embedded in the binary. Autoescaping stays on: every
//! value reaches the markup escaped unless the template marks it `safe`, which
//! only the page slots and the compiled article body are.

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::{BrandConfig, LinkConfig};
use crate::content::IndexEntry;
use crate::error::Result;
use crate::helpers::html_escape;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Paths and URLs must survive escaping untouched, so `/` is left alone
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("shell/layout.html")),
            ("article.html", include_str!("shell/article.html")),
            ("index.html", include_str!("shell/index.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("shell/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("shell/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("shell/partials/footer.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SeoData {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_type: &'static str,
    pub image: Option<String>,
    pub site_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutData<'a> {
    pub language: &'a str,
    pub seo: SeoData,
    pub stylesheets: &'a [String],
    pub tracking_id: Option<&'a str>,
    pub header: &'a str,
    pub body: &'a str,
    pub footer: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderData<'a> {
    pub brand: &'a BrandConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterData<'a> {
    pub links: &'a [LinkConfig],
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData<'a> {
    pub title: &'a str,
    pub date: String,
    pub datetime: String,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingData<'a> {
    pub intro: &'a str,
    pub community: &'a LinkConfig,
    pub entries: &'a [IndexEntry],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_autoescape_keeps_paths() {
        let renderer = TemplateRenderer::new().unwrap();
        let links = vec![LinkConfig::new("<b>Me</b>", "https://example.com/a?x=1&y=2")];
        let context = Context::from_serialize(FooterData { links: &links }).unwrap();
        let html = renderer.render("partials/footer.html", &context).unwrap();
        assert!(html.contains("&lt;b&gt;Me&lt;/b&gt;"));
        assert!(html.contains(r#"href="https://example.com/a?x=1&amp;y=2""#));
    }
}
