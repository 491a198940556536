//! Cache-or-fetch resolution of a query batch.
//!
//! Each query resolves to the CSV file derived from the cache directory, the
//! run label, and its position in the batch. A file that exists is taken as
//! valid and loaded; otherwise the query runs against the warehouse once and
//! the result is written before it is returned. Queries resolve strictly in
//! order, one at a time.

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::cli::create_spinner;
use crate::table::{Table, TableError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("warehouse query failed: {0}")]
    Remote(#[source] anyhow::Error),
    #[error("failed to write cache file {path}: {source}")]
    CachePersist {
        path: PathBuf,
        source: TableError,
    },
    #[error("failed to read cache file {path}: {source}")]
    CacheRead {
        path: PathBuf,
        source: TableError,
    },
}

/// The query-execution capability of the warehouse, injected by the caller.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Table>;
}

/// Cache file for the query at `index` (zero-based) in a batch.
pub fn cache_path(cache_dir: &Path, label: &str, index: usize) -> PathBuf {
    cache_dir.join(format!("df_{}_{}.csv", index + 1, label.to_lowercase()))
}

/// Resolves every query in the batch to a table, consulting and populating
/// the cache directory. The output is positionally aligned with `queries`;
/// the first failure aborts the whole batch.
pub async fn load_or_fetch(
    executor: &dyn QueryExecutor,
    cache_dir: &Path,
    label: &str,
    queries: &[String],
) -> Result<Vec<Table>, StoreError> {
    let mut tables = Vec::with_capacity(queries.len());

    for (index, query) in queries.iter().enumerate() {
        let path = cache_path(cache_dir, label, index);

        let table = if path.exists() {
            println!("Loading {} from cache...", path.display());
            Table::from_csv_path(&path).map_err(|source| StoreError::CacheRead {
                path: path.clone(),
                source,
            })?
        } else {
            let bar = create_spinner(format!("Running warehouse query {}...", index + 1));
            let table = executor.execute(query).await.map_err(StoreError::Remote)?;

            table
                .write_csv(&path)
                .map_err(|source| StoreError::CachePersist {
                    path: path.clone(),
                    source,
                })?;
            bar.finish_with_message(format!("Saved result to {}", path.display()));
            table
        };

        tables.push(table);
    }

    Ok(tables)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use tempfile::TempDir;

    use super::*;

    struct FakeWarehouse {
        tables: Vec<Table>,
        executed: Mutex<Vec<String>>,
    }

    impl FakeWarehouse {
        fn new(tables: Vec<Table>) -> Self {
            FakeWarehouse {
                tables,
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed(&self) -> usize {
            self.executed.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl QueryExecutor for FakeWarehouse {
        async fn execute(&self, query: &str) -> Result<Table> {
            let mut executed = self.executed.lock().unwrap();
            let table = self
                .tables
                .get(executed.len())
                .cloned()
                .ok_or_else(|| anyhow!("unexpected query: {query}"))?;
            executed.push(query.to_string());
            Ok(table)
        }
    }

    struct UnreachableWarehouse;

    #[async_trait]
    impl QueryExecutor for UnreachableWarehouse {
        async fn execute(&self, query: &str) -> Result<Table> {
            Err(anyhow!("executor should not run for `{query}`"))
        }
    }

    fn table_fixture(value: &str) -> Table {
        let mut table = Table::new(vec!["year".to_string(), "avg_temp".to_string()]);
        table.push_row(vec!["2023".to_string(), value.to_string()]);
        table
    }

    fn queries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("SELECT {i}")).collect()
    }

    #[test]
    fn should_derive_cache_path_from_label_and_index() {
        let path = cache_path(Path::new("cache/temperature"), "Portland", 0);

        assert_eq!(path, Path::new("cache/temperature/df_1_portland.csv"));
    }

    #[tokio::test]
    async fn should_fetch_and_persist_on_cache_miss() {
        let dir = TempDir::new().unwrap();
        let warehouse = FakeWarehouse::new(vec![table_fixture("51.0"), table_fixture("52.5")]);

        let tables = load_or_fetch(&warehouse, dir.path(), "pdx", &queries(2))
            .await
            .unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(warehouse.executed(), 2);
        assert!(cache_path(dir.path(), "pdx", 0).exists());
        assert!(cache_path(dir.path(), "pdx", 1).exists());
    }

    #[tokio::test]
    async fn should_not_execute_queries_on_second_run() {
        let dir = TempDir::new().unwrap();
        let warehouse = FakeWarehouse::new(vec![table_fixture("51.0"), table_fixture("52.5")]);
        let batch = queries(2);

        let first = load_or_fetch(&warehouse, dir.path(), "pdx", &batch)
            .await
            .unwrap();
        let second = load_or_fetch(&warehouse, dir.path(), "pdx", &batch)
            .await
            .unwrap();

        assert_eq!(warehouse.executed(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn should_load_preexisting_cache_file_without_touching_warehouse() {
        let dir = TempDir::new().unwrap();
        let cached = table_fixture("49.9");
        cached
            .write_csv(&cache_path(dir.path(), "pdx", 0))
            .unwrap();

        let tables = load_or_fetch(&UnreachableWarehouse, dir.path(), "pdx", &queries(1))
            .await
            .unwrap();

        assert_eq!(tables, vec![cached]);
    }

    #[tokio::test]
    async fn should_fail_on_corrupt_cache_file() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(dir.path(), "pdx", 0);
        std::fs::write(&path, "year,avg_temp\n2023\n").unwrap();

        let err = load_or_fetch(&UnreachableWarehouse, dir.path(), "pdx", &queries(1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::CacheRead { .. }));
    }

    #[tokio::test]
    async fn should_propagate_remote_failure() {
        let dir = TempDir::new().unwrap();

        let err = load_or_fetch(&UnreachableWarehouse, dir.path(), "pdx", &queries(1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Remote(_)));
        assert!(!cache_path(dir.path(), "pdx", 0).exists());
    }

    #[tokio::test]
    async fn should_fail_persist_when_cache_dir_is_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let warehouse = FakeWarehouse::new(vec![table_fixture("51.0")]);

        let err = load_or_fetch(&warehouse, &missing, "pdx", &queries(1))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::CachePersist { .. }));
    }
}
