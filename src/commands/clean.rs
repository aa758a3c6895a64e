//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::generator::staging_dir;
use crate::Site;

/// Remove the generated output, and any staging left by an interrupted run
pub fn run(site: &Site) -> Result<()> {
    for dir in [site.public_dir.clone(), staging_dir(&site.public_dir)] {
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            tracing::info!("Deleted: {:?}", dir);
        }
    }

    Ok(())
}
