use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// An in-memory CSV sheet: a header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Table { columns: columns.iter().map(|c| c.to_string()).collect(), rows: Vec::new() }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Reads a CSV file. Quoted fields may contain commas, doubled
    /// quotes, and newlines.
    pub fn read_csv(path: &Path) -> Result<Table> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut records = parse_records(&text);
        if records.is_empty() {
            return Err(anyhow!("{} has no header row", path.display()));
        }
        let columns = records.remove(0);
        for (i, row) in records.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(anyhow!(
                    "{}: row {} has {} fields, expected {}",
                    path.display(),
                    i + 2,
                    row.len(),
                    columns.len()
                ));
            }
        }
        Ok(Table { columns, rows: records })
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", join_fields(&self.columns))?;
        for row in &self.rows {
            writeln!(writer, "{}", join_fields(row))?;
        }
        Ok(())
    }

    /// Index of a named column.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| anyhow!("Missing column '{}'", name))
    }

    /// Numeric values of a named column, row order preserved.
    pub fn numbers(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.column(name)?;
        self.rows
            .iter()
            .map(|row| {
                row[idx].trim().parse::<f64>().with_context(|| {
                    format!("Non-numeric value '{}' in column '{}'", row[idx], name)
                })
            })
            .collect()
    }
}

fn join_fields(fields: &[String]) -> String {
    fields.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(",")
}

/// Escape a field value for CSV format.
///
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    // A bare newline between records is not a record
                    if record.len() > 1 || !record[0].is_empty() {
                        records.push(std::mem::take(&mut record));
                    } else {
                        record.clear();
                    }
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}
