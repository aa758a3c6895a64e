//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const BASE_CSS: &str = r#"body {
  margin: 0 auto;
  max-width: 42rem;
  padding: 0 1rem;
  font-family: Georgia, serif;
  line-height: 1.6;
}

.site-header a {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  color: inherit;
  text-decoration: none;
}

.site-header img {
  width: 48px;
  height: 48px;
  border-radius: 50%;
}

footer {
  display: flex;
  gap: 1rem;
  margin: 3rem 0 2rem;
}
"#;

/// Initialize a new site in the given directory
///
/// Refuses to touch a directory that already has a configuration file.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    let config = SiteConfig::default();

    // Create directory structure
    fs::create_dir_all(target_dir.join(&config.content_dir))?;
    fs::create_dir_all(target_dir.join(&config.static_dir).join("images"))?;

    let config_content = format!(
        "# Site configuration\n\n{}",
        serde_yaml::to_string(&config)?
    );
    fs::write(&config_path, config_content)?;

    fs::write(target_dir.join(&config.static_dir).join("base.css"), BASE_CSS)?;
    fs::write(target_dir.join(&config.static_dir).join("prism.css"), "")?;

    // Create a sample article
    let today = chrono::Local::now().date_naive();
    let sample_post = format!(
        r#"---
slug: "/hello-world"
title: "Hello World"
date: {}
description: "The first article"
---

This is your first article. Edit it in `{}/hello-world.md` and run:

```bash
$ artigos generate
```
"#,
        today.format("%Y-%m-%d"),
        config.content_dir
    );

    fs::write(
        target_dir.join(&config.content_dir).join("hello-world.md"),
        sample_post,
    )?;

    Ok(())
}
