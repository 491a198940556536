//! Loads a batch of query templates and formats them for a data set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The one placeholder recognised in query templates.
pub const DATASET_PLACEHOLDER: &str = "cleaned_data";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read query file {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("unknown placeholder `{{{0}}}` in query template")]
    UnknownPlaceholder(String),
    #[error("unbalanced brace in query template")]
    UnbalancedBrace,
}

/// Reads a semicolon-delimited batch file and substitutes the data set
/// identifier into each template.
///
/// Empty entries are dropped; the order of the remaining queries matches the
/// file, since each position is bound to a specific result table downstream.
pub fn load_queries(path: &Path, data_set: &str) -> Result<Vec<String>, QueryError> {
    if !path.exists() {
        return Err(QueryError::FileNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path).map_err(|source| QueryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    raw.split(';')
        .map(str::trim)
        .filter(|template| !template.is_empty())
        .map(|template| substitute(template, data_set))
        .collect()
}

// Replaces every `{cleaned_data}` occurrence. `{{` and `}}` are literal
// braces; any other placeholder name is an error.
fn substitute(template: &str, data_set: &str) -> Result<String, QueryError> {
    let mut out = String::with_capacity(template.len() + data_set.len());
    let mut rest = template;

    while let Some(i) = rest.find(['{', '}']) {
        out.push_str(&rest[..i]);
        let brace = rest.as_bytes()[i] as char;

        if rest[i + 1..].starts_with(brace) {
            // doubled brace escapes itself
            out.push(brace);
            rest = &rest[i + 2..];
            continue;
        }

        if brace == '}' {
            return Err(QueryError::UnbalancedBrace);
        }

        let close = rest[i + 1..]
            .find('}')
            .ok_or(QueryError::UnbalancedBrace)?
            + i
            + 1;
        let name = &rest[i + 1..close];
        if name != DATASET_PLACEHOLDER {
            return Err(QueryError::UnknownPlaceholder(name.to_string()));
        }

        out.push_str(data_set);
        rest = &rest[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn batch_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn should_format_each_query_in_the_batch() {
        let file = batch_file("SELECT * FROM {cleaned_data}.temp; SELECT * FROM {cleaned_data}.precip");

        let queries = load_queries(file.path(), "weather_2023").unwrap();

        assert_eq!(
            queries,
            vec![
                "SELECT * FROM weather_2023.temp".to_string(),
                "SELECT * FROM weather_2023.precip".to_string(),
            ]
        );
    }

    #[test]
    fn should_drop_blank_entries_but_keep_order() {
        let file = batch_file("SELECT 1;\n   ;\nSELECT 2;");

        let queries = load_queries(file.path(), "ds").unwrap();

        assert_eq!(queries, vec!["SELECT 1".to_string(), "SELECT 2".to_string()]);
    }

    #[test]
    fn should_substitute_every_occurrence() {
        let file = batch_file("SELECT a.x FROM {cleaned_data}.a JOIN {cleaned_data}.b USING (x)");

        let queries = load_queries(file.path(), "ds").unwrap();

        assert_eq!(queries[0], "SELECT a.x FROM ds.a JOIN ds.b USING (x)");
    }

    #[test]
    fn should_pass_through_doubled_braces() {
        let file = batch_file("SELECT '{{literal}}' FROM {cleaned_data}.t");

        let queries = load_queries(file.path(), "ds").unwrap();

        assert_eq!(queries[0], "SELECT '{literal}' FROM ds.t");
    }

    #[test]
    fn should_reject_unknown_placeholder() {
        let file = batch_file("SELECT * FROM {raw_data}.t");

        let err = load_queries(file.path(), "ds").unwrap_err();

        assert!(matches!(err, QueryError::UnknownPlaceholder(name) if name == "raw_data"));
    }

    #[test]
    fn should_reject_unclosed_placeholder() {
        let file = batch_file("SELECT * FROM {cleaned_data.t");

        let err = load_queries(file.path(), "ds").unwrap_err();

        assert!(matches!(err, QueryError::UnbalancedBrace));
    }

    #[test]
    fn should_fail_when_batch_file_is_missing() {
        let err = load_queries(Path::new("no/such/batch.sql"), "ds").unwrap_err();

        assert!(matches!(err, QueryError::FileNotFound(_)));
    }
}
