//! In-memory tabular query results and their CSV serialisation.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("no such column: `{0}`")]
    MissingColumn(String),
    #[error("column `{column}` holds non-numeric value `{value}`")]
    NonNumeric { column: String, value: String },
}

/// A query result: named columns over rows of text cells.
///
/// Cells are kept as text and parsed on access, so a table read back from a
/// cache file compares equal to the table the warehouse returned. Integer
/// columns widen to `f64` through [`Table::f64s`].
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Table {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// The named column as text cells, in row order.
    pub fn strs(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// The named column parsed as `f64`, in row order.
    pub fn f64s(&self, name: &str) -> Result<Vec<f64>, TableError> {
        let index = self.column_index(name)?;
        self.rows
            .iter()
            .map(|row| {
                row[index].trim().parse::<f64>().map_err(|_| TableError::NonNumeric {
                    column: name.to_string(),
                    value: row[index].clone(),
                })
            })
            .collect()
    }

    /// Distinct values of the named column, in first-appearance order.
    pub fn distinct(&self, name: &str) -> Result<Vec<String>, TableError> {
        let index = self.column_index(name)?;
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row[index]) {
                seen.push(row[index].clone());
            }
        }
        Ok(seen)
    }

    /// The rows whose named column equals `value`, as a new table.
    pub fn filter_eq(&self, name: &str, value: &str) -> Result<Table, TableError> {
        let index = self.column_index(name)?;
        Ok(Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row[index] == value)
                .cloned()
                .collect(),
        })
    }

    pub fn from_csv_path(path: &Path) -> Result<Table, TableError> {
        let file = File::open(path)?;
        Self::from_reader(csv::Reader::from_reader(file))
    }

    pub fn from_csv_str(text: &str) -> Result<Table, TableError> {
        Self::from_reader(csv::Reader::from_reader(text.as_bytes()))
    }

    fn from_reader<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Table, TableError> {
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Table { headers, rows })
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

// Aligned column layout for printing summary tables to the console.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        for (width, header) in widths.iter().zip(&self.headers) {
            write!(f, "{:<1$}  ", header, width)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            for (width, cell) in widths.iter().zip(row) {
                write!(f, "{:<1$}  ", cell, width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn fixture() -> Table {
        let mut table = Table::new(vec![
            "year".to_string(),
            "season".to_string(),
            "avg_temp".to_string(),
        ]);
        table.push_row(vec!["2014".into(), "Spring".into(), "55.2".into()]);
        table.push_row(vec!["2014".into(), "Summer".into(), "78".into()]);
        table.push_row(vec!["2015".into(), "Spring".into(), "56.1".into()]);
        table
    }

    #[test]
    fn should_round_trip_through_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        let table = fixture();

        table.write_csv(&path).unwrap();
        let restored = Table::from_csv_path(&path).unwrap();

        assert_eq!(restored, table);
    }

    #[test]
    fn should_widen_integer_cells_to_f64() {
        let table = fixture();

        let temps = table.f64s("avg_temp").unwrap();

        assert_eq!(temps, vec![55.2, 78.0, 56.1]);
    }

    #[test]
    fn should_error_on_missing_column() {
        let err = fixture().f64s("rainfall").unwrap_err();

        assert!(matches!(err, TableError::MissingColumn(name) if name == "rainfall"));
    }

    #[test]
    fn should_error_on_non_numeric_cell() {
        let err = fixture().f64s("season").unwrap_err();

        assert!(matches!(err, TableError::NonNumeric { .. }));
    }

    #[test]
    fn should_list_distinct_values_in_first_appearance_order() {
        let seasons = fixture().distinct("season").unwrap();

        assert_eq!(seasons, vec!["Spring".to_string(), "Summer".to_string()]);
    }

    #[test]
    fn should_filter_rows_by_value() {
        let spring = fixture().filter_eq("season", "Spring").unwrap();

        assert_eq!(spring.len(), 2);
        assert_eq!(spring.strs("year").unwrap(), vec!["2014", "2015"]);
    }

    #[test]
    fn should_parse_csv_text() {
        let table = Table::from_csv_str("a,b\n1,2\n3,4\n").unwrap();

        assert_eq!(table.headers(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn should_reject_ragged_csv() {
        assert!(Table::from_csv_str("a,b\n1\n").is_err());
    }

    #[test]
    fn should_align_columns_in_display() {
        let rendered = fixture().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("year  season"));
        assert!(lines[1].starts_with("2014  Spring"));
    }
}
