//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{normalize_slug, FrontMatter};
use crate::Site;

/// Create a new article file in the content directory
///
/// The slug defaults to the slugified title; the file is named after the
/// slug's last segment.
pub fn create_post(
    site: &Site,
    title: &str,
    slug: Option<&str>,
    description: Option<&str>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    let slug = normalize_slug(&slug).map_err(|m| anyhow::anyhow!(m))?;

    let file_stem = slug.rsplit('/').next().unwrap_or("untitled");
    let file_path = site.content_dir.join(format!("{}.md", file_stem));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        slug: Some(slug),
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        description: description.map(String::from),
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    fs::create_dir_all(&site.content_dir)?;
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_round_trips_through_loader() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "O padrão: Special Case", None, Some("Resumo")).unwrap();
        assert_eq!(path.file_name().unwrap(), "o-padrao-special-case.md");

        let loaded = ContentLoader::new(&site).load().unwrap();
        let post = loaded.store.resolve("/o-padrao-special-case").unwrap();
        assert_eq!(post.title, "O padrão: Special Case");
        assert_eq!(post.description.as_deref(), Some("Resumo"));
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        create_post(&site, "Twice", Some("/twice"), None).unwrap();
        assert!(create_post(&site, "Twice again", Some("twice"), None).is_err());
    }
}
