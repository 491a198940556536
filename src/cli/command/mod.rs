pub mod extreme;
pub mod precipitation;
pub mod temperature;

use std::fs;
use std::path::Path;

use anyhow::Result;

pub use extreme::extreme;
pub use precipitation::precipitation;
pub use temperature::temperature;

use crate::store::QueryExecutor;

/// One cache and one output subdirectory per analysis domain.
pub const DOMAIN_SUBDIRS: [&str; 3] = ["temperature", "precipitation", "extreme_events"];

/// Everything an analysis command needs, with the warehouse client injected
/// by the caller.
pub struct AnalysisContext<'a> {
    pub executor: &'a dyn QueryExecutor,
    pub data_set: &'a str,
    pub label: &'a str,
    pub queries_dir: &'a Path,
    pub cache_dir: &'a Path,
    pub out_dir: &'a Path,
}

/// Creates the per-domain cache and output directories, announcing each one
/// it had to create.
pub fn prepare_directories(cache_dir: &Path, out_dir: &Path) -> Result<()> {
    for base in [cache_dir, out_dir] {
        for subdir in DOMAIN_SUBDIRS {
            let path = base.join(subdir);
            if !path.exists() {
                fs::create_dir_all(&path)?;
                println!("Created directory: {}", path.display());
            }
        }
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_create_domain_subdirectories() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");
        let out_dir = dir.path().join("visualizations");

        prepare_directories(&cache_dir, &out_dir).unwrap();

        for subdir in DOMAIN_SUBDIRS {
            assert!(cache_dir.join(subdir).is_dir());
            assert!(out_dir.join(subdir).is_dir());
        }
    }

    #[test]
    fn should_tolerate_existing_directories() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");
        let out_dir = dir.path().join("visualizations");

        prepare_directories(&cache_dir, &out_dir).unwrap();
        prepare_directories(&cache_dir, &out_dir).unwrap();
    }
}
