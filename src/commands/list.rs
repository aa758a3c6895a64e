//! List site content

use anyhow::Result;

use crate::content::{build_index, ContentLoader};
use crate::helpers::format_date;
use crate::Site;

/// Print the content index, newest first
pub fn run(site: &Site) -> Result<()> {
    let loaded = ContentLoader::new(site).load()?;
    for error in &loaded.failures {
        eprintln!("  skipped: {}", error);
    }

    let entries = build_index(&loaded.store, site.config.index_limit)?;
    println!("Posts ({}):", entries.len());
    for entry in entries {
        println!(
            "  {} - {} [{}]",
            format_date(&entry.date, &site.config.date_format),
            entry.title,
            entry.slug
        );
    }

    Ok(())
}
