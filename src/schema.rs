//! Validation of a decoded document against an expected table-like shape: a
//! set of required top-level members ("tables"), each with required field
//! names ("columns"). Every mismatch is collected in one pass so a caller can
//! offer precise remediation, rather than stopping at the first category
//! found.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::{NbtFile, Value};

/// Expected shape: table name to required column names.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: IndexMap<String, Vec<String>>,
}

impl Schema {
    pub fn new() -> Schema {
        Schema::default()
    }

    /// Require a table with the given columns. Chainable.
    pub fn table<I, S>(mut self, name: impl Into<String>, columns: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Check `file`'s top-level members against this schema. On mismatch the
    /// returned [`Error::Schema`] carries every missing and extraneous table
    /// and column, with `path` for the diagnostic.
    pub fn check(&self, file: &NbtFile, path: impl AsRef<Path>) -> Result<()> {
        let mut problems = Vec::new();

        for (table, columns) in &self.tables {
            match file.root.get(table) {
                None => problems.push(SchemaProblem::MissingTable(table.clone())),
                Some(value) => {
                    let present = table_columns(value);
                    for column in columns {
                        if !present.iter().any(|c| c == column) {
                            problems.push(SchemaProblem::MissingColumn {
                                table: table.clone(),
                                column: column.clone(),
                            });
                        }
                    }
                    for column in &present {
                        if !columns.iter().any(|c| c == column) {
                            problems.push(SchemaProblem::ExtraColumn {
                                table: table.clone(),
                                column: column.clone(),
                            });
                        }
                    }
                }
            }
        }

        for (name, _) in file.root.iter() {
            if !self.tables.contains_key(name) {
                problems.push(SchemaProblem::ExtraTable(name.clone()));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Schema(SchemaReport {
                path: path.as_ref().to_path_buf(),
                problems,
            }))
        }
    }
}

/// Column names of a table member. A compound's columns are its keys; a
/// list of compounds is row-shaped, so its columns are the first row's keys.
/// Other shapes have no columns.
fn table_columns(value: &Value) -> Vec<String> {
    match value {
        Value::Compound(c) => c.keys().cloned().collect(),
        Value::List(list) => match list.get(0) {
            Some(Value::Compound(row)) => row.keys().cloned().collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// One schema mismatch. Missing and extraneous are distinct conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaProblem {
    MissingTable(String),
    ExtraTable(String),
    MissingColumn { table: String, column: String },
    ExtraColumn { table: String, column: String },
}

impl fmt::Display for SchemaProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaProblem::MissingTable(t) => write!(f, "missing table '{}'", t),
            SchemaProblem::ExtraTable(t) => write!(f, "unexpected table '{}'", t),
            SchemaProblem::MissingColumn { table, column } => {
                write!(f, "missing column '{}' in table '{}'", column, table)
            }
            SchemaProblem::ExtraColumn { table, column } => {
                write!(f, "unexpected column '{}' in table '{}'", column, table)
            }
        }
    }
}

/// Every mismatch found by one validation pass over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub path: PathBuf,
    pub problems: Vec<SchemaProblem>,
}

impl SchemaReport {
    pub fn contains(&self, problem: &SchemaProblem) -> bool {
        self.problems.contains(problem)
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema mismatch in {}:", self.path.display())?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, " {}", problem)?;
        }
        Ok(())
    }
}
