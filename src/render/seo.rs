//! SEO metadata for the document head

use super::PageMetadata;
use crate::config::SiteConfig;
use crate::templates::SeoData;

/// Build the head metadata for a page
///
/// Articles are published as `og:type=article`, everything else as
/// `website`. A page without a description falls back to the site's.
pub fn seo_data(config: &SiteConfig, metadata: &PageMetadata) -> SeoData {
    let description = metadata
        .description
        .clone()
        .unwrap_or_else(|| config.description.clone());

    let og_type = if metadata.is_article {
        "article"
    } else {
        "website"
    };

    SeoData {
        title: config.document_title(&metadata.title),
        description,
        canonical: config.full_url(&metadata.path),
        og_type,
        image: config.image.as_deref().map(|image| {
            if image.contains("://") {
                image.to_string()
            } else {
                config.full_url(image)
            }
        }),
        site_name: config.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(is_article: bool, description: Option<&str>) -> PageMetadata {
        PageMetadata {
            title: "Hello".to_string(),
            description: description.map(String::from),
            is_article,
            path: "/hello".to_string(),
        }
    }

    #[test]
    fn test_article_vs_website() {
        let config = SiteConfig::default();
        assert_eq!(seo_data(&config, &metadata(true, None)).og_type, "article");
        assert_eq!(seo_data(&config, &metadata(false, None)).og_type, "website");
    }

    #[test]
    fn test_title_template_and_canonical() {
        let config = SiteConfig {
            title_template: "%s | GUSTV0".to_string(),
            ..Default::default()
        };
        let seo = seo_data(&config, &metadata(true, None));
        assert_eq!(seo.title, "Hello | GUSTV0");
        assert_eq!(seo.canonical, "http://gustv0.com/hello");
    }

    #[test]
    fn test_description_fallback() {
        let config = SiteConfig {
            description: "Site wide".to_string(),
            image: Some("/images/card.png".to_string()),
            ..Default::default()
        };
        assert_eq!(seo_data(&config, &metadata(true, None)).description, "Site wide");
        let seo = seo_data(&config, &metadata(true, Some("Own")));
        assert_eq!(seo.description, "Own");
        assert_eq!(seo.image.as_deref(), Some("http://gustv0.com/images/card.png"));
    }
}
