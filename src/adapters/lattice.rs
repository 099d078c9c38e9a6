//! Dense spacing matrix.

use serde::{Deserialize, Serialize};

use crate::ports::SpacingMatrix;

/// Row-major `n × n` matrix of desired inter-agent distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeMatrix {
    dimension: usize,
    cells: Vec<f64>,
}

impl LatticeMatrix {
    /// Matrix with every cell, diagonal included, set to `value`.
    pub fn filled(dimension: usize, value: f64) -> Self {
        Self {
            dimension,
            cells: vec![value; dimension * dimension],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Cells of row `source`.
    pub fn row(&self, source: usize) -> &[f64] {
        &self.cells[source * self.dimension..(source + 1) * self.dimension]
    }
}

impl SpacingMatrix for LatticeMatrix {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn spacing(&self, source: usize, neighbour: usize) -> f64 {
        self.cells[source * self.dimension + neighbour]
    }

    fn set_spacing(&mut self, source: usize, neighbour: usize, value: f64) {
        self.cells[source * self.dimension + neighbour] = value;
    }
}
