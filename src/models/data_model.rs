// src/models/data_model.rs
// the JSON-based matrix data model

use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::models::{Cell, CellColor, GridError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatrixData {
    pub cells: Vec<Cell>,
    #[serde(rename = "totalRows")]
    pub total_rows: usize,
    #[serde(rename = "totalColumns")]
    pub total_columns: usize,
}

impl MatrixData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let data: MatrixData = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// A fully populated grid with random colors and values.
    pub fn random<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let value = rng.gen_range(0..100) as f64;
                let color = CellColor::new(
                    rng.gen_range(0..256),
                    rng.gen_range(0..256),
                    rng.gen_range(0..256),
                );
                cells.push(
                    Cell::new(format!("r{}c{}", row, column), row, column)
                        .with_color(color)
                        .with_value(value)
                        .with_label(format!("{}", value)),
                );
            }
        }

        Self {
            cells,
            total_rows: rows,
            total_columns: columns,
        }
    }

    /// Checks the invariants a GridView relies on: unique ids and
    /// every cell inside the declared dimensions.
    pub fn validate(&self) -> Result<(), GridError> {
        let mut seen = HashSet::with_capacity(self.cells.len());
        for cell in &self.cells {
            if !seen.insert(cell.id.as_str()) {
                return Err(GridError::DuplicateId(cell.id.clone()));
            }
            if cell.row >= self.total_rows || cell.column >= self.total_columns {
                return Err(GridError::CellOutOfBounds {
                    id: cell.id.clone(),
                    row: cell.row,
                    column: cell.column,
                    rows: self.total_rows,
                    columns: self.total_columns,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_matrix_is_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = MatrixData::random(3, 4, &mut rng);

        assert_eq!(data.cells.len(), 12);
        assert_eq!(data.total_rows, 3);
        assert_eq!(data.total_columns, 4);
        assert!(data.validate().is_ok());
        assert!(data
            .cells
            .iter()
            .all(|cell| cell.label == format!("{}", cell.value)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let data = MatrixData {
            cells: vec![Cell::new("a", 0, 0), Cell::new("a", 0, 1)],
            total_rows: 1,
            total_columns: 2,
        };
        assert_eq!(data.validate(), Err(GridError::DuplicateId("a".to_string())));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let data = MatrixData {
            cells: vec![Cell::new("a", 2, 0)],
            total_rows: 2,
            total_columns: 1,
        };
        assert!(matches!(
            data.validate(),
            Err(GridError::CellOutOfBounds { row: 2, .. })
        ));
    }

    #[test]
    fn test_parse_matrix_json() {
        let json = r#"{
            "totalRows": 1,
            "totalColumns": 2,
            "cells": [
                { "id": "x", "row": 0, "column": 0, "color": { "r": 1, "g": 2, "b": 3 }, "value": 1, "label": "1" },
                { "id": "y", "row": 0, "column": 1, "color": { "r": 4, "g": 5, "b": 6 }, "value": 2, "label": "2" }
            ]
        }"#;
        let data: MatrixData = serde_json::from_str(json).unwrap();
        assert_eq!(data.total_columns, 2);
        assert_eq!(data.cells[1].id, "y");
        assert!(data.validate().is_ok());
    }
}
