//! Page shell: head metadata, header, content region and footer

use tera::Context;

use super::{seo_data, PageMetadata};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::templates::{FooterData, HeaderData, LayoutData, TemplateRenderer};

/// Wraps page bodies in the common site structure
pub struct PageShell<'a> {
    config: &'a SiteConfig,
    templates: &'a TemplateRenderer,
}

impl<'a> PageShell<'a> {
    pub fn new(config: &'a SiteConfig, templates: &'a TemplateRenderer) -> Self {
        Self { config, templates }
    }

    /// Assemble a full document from its slots
    ///
    /// The slots are inserted as markup; callers pass already rendered HTML.
    pub fn compose(
        &self,
        metadata: &PageMetadata,
        header: &str,
        body: &str,
        footer: &str,
    ) -> Result<String> {
        let data = LayoutData {
            language: &self.config.language,
            seo: seo_data(self.config, metadata),
            stylesheets: &self.config.stylesheets,
            tracking_id: self
                .config
                .tracking_id
                .as_deref()
                .filter(|id| !id.trim().is_empty()),
            header,
            body,
            footer,
        };
        let context = Context::from_serialize(data)?;
        self.templates.render("layout.html", &context)
    }

    /// Site header: a home link around the brand image and label
    pub fn header(&self) -> Result<String> {
        let context = Context::from_serialize(HeaderData {
            brand: &self.config.brand,
        })?;
        self.templates.render("partials/header.html", &context)
    }

    /// Site footer: the configured outbound links, in order
    pub fn footer(&self) -> Result<String> {
        let context = Context::from_serialize(FooterData {
            links: &self.config.footer_links,
        })?;
        self.templates.render("partials/footer.html", &context)
    }

    /// Compose a page with the standard header and footer
    pub fn render_page(&self, metadata: &PageMetadata, body: &str) -> Result<String> {
        let header = self.header()?;
        let footer = self.footer()?;
        self.compose(metadata, &header, body, &footer)
    }
}
