//! View builder: derived tables for each dashboard panel, plus the
//! declarative display instructions that accompany them.
//!
//! Every query borrows the canonical dataset and returns a fresh
//! [`DerivedView`]; nothing here holds state between calls.

pub mod aggregate;
pub mod chart;
pub mod queries;

use serde::Serialize;

use crate::data::model::Cell;

/// A small named-column table ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DerivedView {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        let mut view = Self::new(columns);
        view.rows = rows;
        view
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column; empty if the column does not exist.
    pub fn column(&self, name: &str) -> Vec<&Cell> {
        match self.column_index(name) {
            Some(idx) => self.rows.iter().filter_map(|row| row.get(idx)).collect(),
            None => Vec::new(),
        }
    }

    /// Numeric cells of one column, skipping anything non-numeric.
    pub fn numbers(&self, name: &str) -> Vec<f64> {
        self.column(name).into_iter().filter_map(Cell::as_f64).collect()
    }

    /// Text cells of one column, skipping anything that is not text.
    pub fn texts(&self, name: &str) -> Vec<&str> {
        self.column(name).into_iter().filter_map(Cell::as_str).collect()
    }
}
