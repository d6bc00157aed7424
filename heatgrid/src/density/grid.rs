// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::ops::Index;

use crate::density::builder::DensityGridBuilder;
use crate::density::serialization;
use crate::error::Error;

/// Square grid of accumulated kernel density.
///
/// Cell `(i, j)` holds the density at `(i / (n - 1), j / (n - 1))` in the unit
/// square; `i` follows the x axis and `j` the y axis. Values are sums of kernel
/// contributions and are not normalized to a probability distribution.
///
/// See the [module documentation](super) for more details.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    resolution: usize,
    values: Vec<f64>,
}

impl DensityGrid {
    /// The largest supported number of cells along each axis.
    pub const MAX_RESOLUTION: usize = 4096;

    /// Returns a builder with the default Gaussian kernel.
    pub fn builder() -> DensityGridBuilder {
        DensityGridBuilder::new()
    }

    pub(super) fn from_values(resolution: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), resolution * resolution);
        Self { resolution, values }
    }

    /// Returns the number of cells along each axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns the value of cell `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not less than the resolution.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Returns the cells of `row`, ordered by column.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not less than the resolution.
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(
            row < self.resolution,
            "row {row} out of range for resolution {}",
            self.resolution
        );
        let start = row * self.resolution;
        &self.values[start..start + self.resolution]
    }

    /// Returns all cells in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns an iterator over `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.resolution;
        self.values
            .iter()
            .enumerate()
            .map(move |(index, value)| (index / n, index % n, *value))
    }

    /// Returns the largest cell value.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Returns the sum of all cells.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Returns true if every cell is zero.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Returns a copy with every cell mapped through `ln(1 + v)`.
    ///
    /// Compresses the range so a few dense cells do not flatten the rest.
    pub fn log_scaled(&self) -> Self {
        self.map(f64::ln_1p)
    }

    /// Returns a copy scaled so the largest cell is 1.
    ///
    /// A grid with no density stays all zero.
    pub fn normalized(&self) -> Self {
        let max = self.max();
        if max > 0.0 {
            self.map(|v| v / max)
        } else {
            self.clone()
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            resolution: self.resolution,
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Serializes the grid to a byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        serialization::serialize(self)
    }

    /// Deserializes a grid produced by [`serialize`](Self::serialize).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InsufficientData`](crate::error::ErrorKind::InsufficientData)
    /// if `bytes` is truncated, and
    /// [`ErrorKind::MalformedDeserializeData`](crate::error::ErrorKind::MalformedDeserializeData)
    /// if the preamble or cell values are invalid.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        serialization::deserialize(bytes)
    }
}

impl Index<(usize, usize)> for DensityGrid {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.resolution && col < self.resolution,
            "cell ({row}, {col}) out of range for resolution {}",
            self.resolution
        );
        &self.values[row * self.resolution + col]
    }
}
