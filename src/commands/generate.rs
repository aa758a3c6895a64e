//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::{BuildReport, Generator};
use crate::{Site, CONFIG_FILE};

/// Quiet period after the last change before a rebuild starts
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
///
/// Per-page failures do not make this return `Err`; they are logged and left
/// in the report for the caller to decide on the exit status.
pub fn run(site: &Site) -> Result<BuildReport> {
    let generator = Generator::new(site)?;
    let report = generator.run()?;

    for failure in &report.failures {
        tracing::error!("{}: {}", failure.target, failure.error);
    }

    Ok(report)
}

/// Regenerate the site after every burst of source changes
///
/// Blocks the calling thread until the watcher goes away; run it on a
/// blocking task. The configuration is reloaded on each rebuild and
/// `on_rebuild` is called with every finished report.
pub fn watch<F>(site: &Site, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(&BuildReport),
{
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for dir in [&site.content_dir, &site.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events.iter().filter(|e| is_source_change(&e.path)).collect();
        if changed.is_empty() {
            continue;
        }
        for event in &changed {
            tracing::info!("Changed: {}", event.path.display());
        }

        match Site::new(&site.base_dir).and_then(|site| run(&site)) {
            Ok(report) => {
                if report.is_success() {
                    tracing::info!("Regenerated {} pages", report.written.len());
                } else {
                    tracing::warn!("Regenerated with {} failure(s)", report.failures.len());
                }
                on_rebuild(&report);
            }
            Err(e) => tracing::error!("Generation failed: {}", e),
        }
    }

    Ok(())
}

/// Editor swap files, VCS metadata and dotfiles don't trigger rebuilds
fn is_source_change(path: &Path) -> bool {
    let in_vcs = path.components().any(|c| c.as_os_str() == ".git");
    let ignored_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') || n.ends_with('~') || n.ends_with(".swp"))
        .unwrap_or(false);
    !in_vcs && !ignored_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_changes() {
        assert!(is_source_change(Path::new("/site/articles/a.md")));
        assert!(is_source_change(Path::new("/site/_config.yml")));
        assert!(is_source_change(Path::new("/home/me/.sites/blog/articles/a.md")));
    }

    #[test]
    fn test_ignored_changes() {
        assert!(!is_source_change(Path::new("/site/articles/.a.md.swp")));
        assert!(!is_source_change(Path::new("/site/articles/a.md~")));
        assert!(!is_source_change(Path::new("/site/.git/index")));
        assert!(!is_source_change(Path::new("/site/articles/.DS_Store")));
        assert!(!is_source_change(Path::new("/site/articles/a.md.swp")));
    }
}
