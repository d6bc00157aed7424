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

use crate::density::bins::BinIndex;
use crate::density::grid::DensityGrid;
use crate::density::kernel::DensityKernel;
use crate::density::kernel::GaussianKernel;
use crate::error::Error;
use crate::point::Point;

/// Builder for [`DensityGrid`]s.
///
/// Every output cell sums kernel contributions from the points binned within
/// `neighborhood` cells of it (Chebyshev distance); points further away are
/// ignored even though the kernel tail is non-zero. This bounds the work to
/// `O(n² · m² · points per cell)` instead of `O(n² · points)`. Keep
/// `neighborhood / (resolution - 1)` comfortably above the kernel width (about
/// three standard deviations for the Gaussian kernel) when accuracy matters; a
/// warning is logged otherwise.
///
/// # Examples
///
/// ```
/// use heatgrid::DensityGrid;
/// use heatgrid::Point;
///
/// let points = [Point::new(0.25, 0.25), Point::new(0.75, 0.5)];
/// let grid = DensityGrid::builder()
///     .resolution(5)
///     .sigma_sq(0.01)
///     .neighborhood(2)
///     .build(&points)
///     .unwrap();
///
/// assert_eq!(grid.resolution(), 5);
/// assert!(grid.get(1, 1) > grid.get(4, 4));
/// ```
#[derive(Debug, Clone)]
pub struct DensityGridBuilder<K: DensityKernel = GaussianKernel> {
    resolution: usize,
    neighborhood: usize,
    kernel: K,
}

impl Default for DensityGridBuilder<GaussianKernel> {
    fn default() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
            neighborhood: Self::DEFAULT_NEIGHBORHOOD,
            kernel: GaussianKernel::default(),
        }
    }
}

impl DensityGridBuilder<GaussianKernel> {
    /// Creates a builder with the default Gaussian kernel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variance of the Gaussian kernel, in normalized units squared.
    ///
    /// Must be finite and greater than 0; checked by [`build`](Self::build).
    pub fn sigma_sq(mut self, sigma_sq: f64) -> Self {
        self.kernel = GaussianKernel::new(sigma_sq);
        self
    }
}

impl<K: DensityKernel> DensityGridBuilder<K> {
    /// The default grid resolution if one is not specified.
    pub const DEFAULT_RESOLUTION: usize = 20;
    /// The default neighborhood half-width if one is not specified.
    pub const DEFAULT_NEIGHBORHOOD: usize = 2;

    /// Replaces the kernel, keeping resolution and neighborhood.
    pub fn with_kernel<K2: DensityKernel>(self, kernel: K2) -> DensityGridBuilder<K2> {
        DensityGridBuilder {
            resolution: self.resolution,
            neighborhood: self.neighborhood,
            kernel,
        }
    }

    /// Sets the number of cells along each axis.
    ///
    /// Must be at least 2; checked by [`build`](Self::build).
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the neighborhood half-width, in cells.
    ///
    /// A value of 0 considers no bins, so every cell of the result is 0.
    pub fn neighborhood(mut self, neighborhood: usize) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Returns the configured kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Builds the density grid of `points`, each contributing with weight 1.
    ///
    /// Points must lie in the unit square, as produced by
    /// [`normalize_points`](crate::normalize_points).
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter)
    /// if the resolution is below 2 or above
    /// [`DensityGrid::MAX_RESOLUTION`], the kernel parameters are invalid, or a
    /// point lies outside the unit square, and
    /// [`ErrorKind::EmptyInput`](crate::error::ErrorKind::EmptyInput) if
    /// `points` is empty.
    pub fn build(&self, points: &[Point]) -> Result<DensityGrid, Error> {
        self.build_inner(points, |_| 1.0)
    }

    /// Builds the density grid of `points`, scaling each contribution by the
    /// matching entry of `weights`.
    ///
    /// # Errors
    ///
    /// Fails like [`build`](Self::build), and additionally with
    /// [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter)
    /// if `weights` and `points` differ in length or a weight is negative or
    /// not finite.
    pub fn build_weighted(&self, points: &[Point], weights: &[f64]) -> Result<DensityGrid, Error> {
        if weights.len() != points.len() {
            return Err(
                Error::invalid_parameter("weights must match points one to one")
                    .with_context("points", points.len())
                    .with_context("weights", weights.len()),
            );
        }
        if let Some((index, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(
                Error::invalid_parameter("weights must be finite and non-negative")
                    .with_context("index", index)
                    .with_context("weight", w),
            );
        }
        self.build_inner(points, |index| weights[index])
    }

    fn build_inner(
        &self,
        points: &[Point],
        weight_of: impl Fn(usize) -> f64,
    ) -> Result<DensityGrid, Error> {
        self.validate()?;
        if points.is_empty() {
            return Err(Error::empty_input("density grid"));
        }

        let mut bins = BinIndex::new(self.resolution);
        for (index, point) in points.iter().enumerate() {
            if !point.in_unit_square() {
                return Err(Error::invalid_parameter(
                    "points must be normalized into the unit square",
                )
                .with_context("index", index)
                .with_context("point", point));
            }
            bins.insert(*point, weight_of(index));
        }
        tracing::debug!(
            points = points.len(),
            occupied_cells = bins.occupied(),
            resolution = self.resolution,
            neighborhood = self.neighborhood,
            "binned points"
        );

        Ok(self.accumulate(&bins))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.resolution < 2 {
            return Err(Error::invalid_parameter("resolution must be at least 2")
                .with_context("resolution", self.resolution));
        }
        if self.resolution > DensityGrid::MAX_RESOLUTION {
            return Err(Error::invalid_parameter(format!(
                "resolution must be at most {}",
                DensityGrid::MAX_RESOLUTION
            ))
            .with_context("resolution", self.resolution));
        }
        self.kernel.validate()?;

        if let Some(radius) = self.kernel.support_radius() {
            let reach = self.neighborhood as f64 / (self.resolution - 1) as f64;
            if reach < radius {
                tracing::warn!(
                    reach,
                    kernel_radius = radius,
                    "neighborhood is narrower than the kernel; densities will be undercounted"
                );
            }
        }
        Ok(())
    }

    fn accumulate(&self, bins: &BinIndex) -> DensityGrid {
        let n = self.resolution;
        let m = self.neighborhood;
        let step = (n - 1) as f64;

        let mut values = vec![0.0; n * n];
        for i0 in 0..n {
            let rows = i0.saturating_sub(m)..i0.saturating_add(m).min(n);
            for j0 in 0..n {
                let cols = j0.saturating_sub(m)..j0.saturating_add(m).min(n);
                let center = Point::new(i0 as f64 / step, j0 as f64 / step);

                let mut density = 0.0;
                for i in rows.clone() {
                    for j in cols.clone() {
                        for (point, weight) in bins.cell(i, j) {
                            density += weight * self.kernel.evaluate(center, *point);
                        }
                    }
                }
                values[i0 * n + j0] = density;
            }
        }
        DensityGrid::from_values(n, values)
    }
}
