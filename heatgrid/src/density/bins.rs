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

use crate::point::Point;

/// Points grouped by the grid cell they fall in, with their weights.
///
/// Cells are stored row-major in a flat array so lookup is a single index.
#[derive(Debug)]
pub(super) struct BinIndex {
    resolution: usize,
    cells: Vec<Vec<(Point, f64)>>,
    occupied: usize,
}

impl BinIndex {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            cells: vec![Vec::new(); resolution * resolution],
            occupied: 0,
        }
    }

    /// Returns the cell `(i, j)` a point in the unit square falls in.
    pub fn locate(&self, point: Point) -> (usize, usize) {
        let step = (self.resolution - 1) as f64;
        let i = (point.x * step).floor() as usize;
        let j = (point.y * step).floor() as usize;
        (i, j)
    }

    pub fn insert(&mut self, point: Point, weight: f64) {
        let (i, j) = self.locate(point);
        let cell = &mut self.cells[i * self.resolution + j];
        if cell.is_empty() {
            self.occupied += 1;
        }
        cell.push((point, weight));
    }

    pub fn cell(&self, i: usize, j: usize) -> &[(Point, f64)] {
        &self.cells[i * self.resolution + j]
    }

    /// Number of cells holding at least one point.
    pub fn occupied(&self) -> usize {
        self.occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_corners() {
        let bins = BinIndex::new(5);
        assert_eq!(bins.locate(Point::new(0.0, 0.0)), (0, 0));
        assert_eq!(bins.locate(Point::new(1.0, 1.0)), (4, 4));
        assert_eq!(bins.locate(Point::new(0.3, 0.74)), (1, 2));
    }

    #[test]
    fn test_insert_counts_occupied_cells() {
        let mut bins = BinIndex::new(3);
        bins.insert(Point::new(0.1, 0.1), 1.0);
        bins.insert(Point::new(0.2, 0.2), 2.0);
        bins.insert(Point::new(0.9, 0.1), 1.0);
        assert_eq!(bins.occupied(), 2);
        assert_eq!(bins.cell(0, 0).len(), 2);
        assert_eq!(bins.cell(1, 0).len(), 1);
        assert!(bins.cell(2, 2).is_empty());
    }
}
