//! Generator module - one full generation run over the content directory

use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{build_index, ContentLoader, ContentStore, IndexEntry};
use crate::error::Error;
use crate::render::{PageDocument, Renderer};
use crate::Site;

/// Name of the data-layer export written next to the pages
pub const DATA_FILE: &str = "posts.json";

/// A page or source file that could not be produced
#[derive(Debug)]
pub struct Failure {
    /// Route or source file the failure belongs to
    pub target: String,
    pub error: Error,
}

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Site paths of the pages written, listing first
    pub written: Vec<String>,
    pub failures: Vec<Failure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, target: impl Into<String>, error: Error) {
        let target = target.into();
        tracing::warn!("{}: {}", target, error);
        self.failures.push(Failure { target, error });
    }
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: Renderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = Renderer::new(&site.config)?;
        Ok(Self::with_renderer(site, renderer))
    }

    /// Create a generator around an existing renderer
    pub fn with_renderer(site: &Site, renderer: Renderer) -> Self {
        Self {
            site: site.clone(),
            renderer,
        }
    }

    /// Generate the entire site
    ///
    /// Failures are isolated: a broken post costs its own page and nothing
    /// else. Only problems with the output directory itself are returned as
    /// `Err`; everything else ends up in the report.
    ///
    /// The site is built into a staging directory that replaces the public
    /// directory once the run is over, so pages from earlier runs whose
    /// post now fails or no longer exists are not left behind.
    pub fn run(&self) -> Result<BuildReport> {
        let start = std::time::Instant::now();
        let mut report = BuildReport::default();

        let loaded = ContentLoader::new(&self.site).load()?;
        for error in loaded.failures {
            let target = failure_source(&error);
            report.fail(target, error);
        }
        let store = loaded.store;

        tracing::info!("Loaded {} posts", store.len());

        let staging = staging_dir(&self.site.public_dir);
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;

        // Listing page
        match self.renderer.render_index(&store) {
            Ok(doc) => write_page(&staging, &doc, &mut report),
            Err(e) => report.fail("/", e),
        }

        // Article pages, rendered independently
        let slugs = store.slugs();
        let documents: Vec<(&str, Result<PageDocument, Error>)> = slugs
            .par_iter()
            .map(|slug| (*slug, self.renderer.render_article(slug, &store)))
            .collect();

        for (slug, result) in documents {
            match result {
                Ok(doc) => write_page(&staging, &doc, &mut report),
                Err(e) => report.fail(slug, e),
            }
        }

        if let Err(e) = self.write_data_file(&staging, &store) {
            report.fail(DATA_FILE, e);
        }

        self.copy_static_dir(&staging, &mut report);
        self.copy_content_assets(&staging, &loaded.assets, &mut report);

        publish(&staging, &self.site.public_dir)?;

        tracing::info!(
            "Generated {} pages in {:.2}s ({} failed)",
            report.written.len(),
            start.elapsed().as_secs_f64(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Export the index as JSON, for tooling that wants the post list
    fn write_data_file(&self, out: &Path, store: &ContentStore) -> Result<(), Error> {
        let entries: Vec<IndexEntry> = build_index(store, self.site.config.index_limit)?;
        let output_path = out.join(DATA_FILE);
        let json = serde_json::to_string_pretty(&entries).map_err(|e| {
            Error::io(
                &output_path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        write_file(&output_path, json.as_bytes())
    }

    /// Copy the static directory (stylesheets, images) verbatim
    fn copy_static_dir(&self, out: &Path, report: &mut BuildReport) {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return;
        }

        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    report.fail(path.display().to_string(), Error::io(path, e.into()));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(static_dir) {
                copy_into(out, entry.path(), relative, report);
            }
        }
    }

    /// Copy images and other files living next to the articles
    fn copy_content_assets(&self, out: &Path, assets: &[PathBuf], report: &mut BuildReport) {
        for relative in assets {
            let source = self.site.content_dir.join(relative);
            copy_into(out, &source, relative, report);
        }
    }
}

fn write_page(out: &Path, doc: &PageDocument, report: &mut BuildReport) {
    let output_path = out.join(&doc.output);
    match write_file(&output_path, doc.html.as_bytes()) {
        Ok(()) => {
            tracing::debug!("Generated: {:?}", doc.output);
            report.written.push(doc.path.clone());
        }
        Err(e) => report.fail(doc.path.clone(), e),
    }
}

fn copy_into(out: &Path, source: &Path, relative: &Path, report: &mut BuildReport) {
    let dest = out.join(relative);
    let result = dest
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::copy(source, &dest).map(|_| ()));
    if let Err(e) = result {
        report.fail(source.display().to_string(), Error::io(source, e));
    }
}

/// Sibling of the public directory the next run is built in
pub(crate) fn staging_dir(public_dir: &Path) -> PathBuf {
    let name = public_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "public".to_string());
    public_dir.with_file_name(format!(".{name}.staging"))
}

/// Replace the public directory with a finished staging directory
fn publish(staging: &Path, public_dir: &Path) -> Result<(), Error> {
    if public_dir.exists() {
        fs::remove_dir_all(public_dir).map_err(|e| Error::io(public_dir, e))?;
    }
    fs::rename(staging, public_dir).map_err(|e| Error::io(public_dir, e))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}

fn failure_source(error: &Error) -> String {
    match error {
        Error::FrontMatter { path, .. } | Error::Compile { path, .. } | Error::Io { path, .. } => {
            path.display().to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MarkdownCompiler, MarkdownRenderer, Post};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn article(slug: &str, title: &str, date: &str) -> String {
        format!("---\nslug: {slug}\ntitle: {title}\ndate: {date}\n---\n\nBody of {title}.\n")
    }

    #[test]
    fn test_full_run() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "articles/a.md", &article("/a", "A", "2021-01-01"));
        write(dir.path(), "articles/b.md", &article("/b", "B", "2022-01-01"));
        write(dir.path(), "articles/images/pic.png", "png");
        write(dir.path(), "static/base.css", "body {}");

        let site = Site::new(dir.path()).unwrap();
        let report = Generator::new(&site).unwrap().run().unwrap();

        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.written, vec!["/", "/a", "/b"]);

        let public = dir.path().join("public");
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.find(">B</a>").unwrap() < index.find(">A</a>").unwrap());
        assert!(public.join("a/index.html").exists());
        assert!(public.join("b/index.html").exists());
        assert!(public.join("base.css").exists());
        assert!(public.join("images/pic.png").exists());

        let data = fs::read_to_string(public.join(DATA_FILE)).unwrap();
        let entries: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(entries[0]["slug"], "/b");
        assert_eq!(entries[1]["date"], "2021-01-01");
    }

    #[test]
    fn test_failures_are_isolated() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "articles/good.md", &article("/good", "Good", "2021-01-01"));
        write(dir.path(), "articles/no-slug.md", "---\ntitle: X\ndate: 2021-01-01\n---\n");
        write(dir.path(), "articles/dup1.md", &article("/dup", "Dup 1", "2021-01-01"));
        write(dir.path(), "articles/dup2.md", &article("/dup", "Dup 2", "2021-01-01"));

        let site = Site::new(dir.path()).unwrap();
        let report = Generator::new(&site).unwrap().run().unwrap();

        assert!(!report.is_success());
        assert_eq!(report.written, vec!["/good"]);

        let targets: Vec<&str> = report.failures.iter().map(|f| f.target.as_str()).collect();
        assert!(targets.iter().any(|t| t.ends_with("no-slug.md")));
        assert!(targets.contains(&"/"));
        assert!(targets.contains(&"/dup"));
        assert!(dir.path().join("public/good/index.html").exists());
        assert!(!dir.path().join("public/dup/index.html").exists());
    }

    #[test]
    fn test_rerun_drops_pages_that_now_fail() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "articles/x.md", &article("/x", "X", "2021-01-01"));

        let public = dir.path().join("public");
        let first = Generator::new(&Site::new(dir.path()).unwrap()).unwrap().run().unwrap();
        assert!(first.is_success());
        assert!(public.join("x/index.html").exists());

        write(dir.path(), "articles/y.md", &article("/x", "Y", "2021-01-02"));
        let second = Generator::new(&Site::new(dir.path()).unwrap()).unwrap().run().unwrap();

        assert!(second.written.is_empty());
        assert!(!public.join("x/index.html").exists());
        assert!(!public.join("index.html").exists());
        assert!(!public.join(DATA_FILE).exists());
        assert!(!dir.path().join(".public.staging").exists());
    }

    #[test]
    fn test_rerun_drops_deleted_posts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "articles/a.md", &article("/a", "A", "2021-01-01"));
        write(dir.path(), "articles/b.md", &article("/b", "B", "2022-01-01"));
        write(dir.path(), "articles/b.png", "png");

        let site = Site::new(dir.path()).unwrap();
        Generator::new(&site).unwrap().run().unwrap();
        let public = dir.path().join("public");
        assert!(public.join("b/index.html").exists());

        fs::remove_file(dir.path().join("articles/b.md")).unwrap();
        fs::remove_file(dir.path().join("articles/b.png")).unwrap();
        let report = Generator::new(&site).unwrap().run().unwrap();

        assert_eq!(report.written, vec!["/", "/a"]);
        assert!(public.join("a/index.html").exists());
        assert!(!public.join("b").exists());
        assert!(!public.join("b.png").exists());
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(!index.contains(">B</a>"));
    }

    #[test]
    fn test_staging_dir_is_a_hidden_sibling() {
        assert_eq!(
            staging_dir(Path::new("/site/public")),
            PathBuf::from("/site/.public.staging")
        );
    }

    struct FailOn(&'static str);

    impl MarkdownCompiler for FailOn {
        fn compile(&self, post: &Post) -> crate::error::Result<String> {
            if post.slug == self.0 {
                Err(Error::Compile {
                    path: post.source.clone(),
                    message: "broken".to_string(),
                })
            } else {
                MarkdownRenderer::new().compile(post)
            }
        }
    }

    #[test]
    fn test_compile_failure_only_costs_its_page() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "articles/a.md", &article("/a", "A", "2021-01-01"));
        write(dir.path(), "articles/b.md", &article("/b", "B", "2022-01-01"));

        let site = Site::new(dir.path()).unwrap();
        let renderer = Renderer::with_compiler(&site.config, Box::new(FailOn("/a"))).unwrap();
        let report = Generator::with_renderer(&site, renderer).run().unwrap();

        assert_eq!(report.written, vec!["/", "/b"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, "/a");
        assert!(matches!(report.failures[0].error, Error::Compile { .. }));
    }
}
