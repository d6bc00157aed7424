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

use crate::error::Error;
use crate::point::Point;

/// Kernel used to compute the density contribution of a point to a grid cell.
///
/// Implementations must return non-negative, finite values so that every
/// accumulated grid cell stays non-negative.
pub trait DensityKernel {
    /// Returns the kernel evaluation between a cell center and a data point.
    fn evaluate(&self, center: Point, point: Point) -> f64;

    /// Checks the kernel's parameters before a grid is built.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Distance beyond which contributions are negligible, in normalized units.
    ///
    /// Used to warn when the builder's neighborhood truncates the kernel.
    fn support_radius(&self) -> Option<f64> {
        None
    }
}

/// Gaussian kernel `exp(-d² / (2 * sigma_sq))` over squared Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    sigma_sq: f64,
}

impl Default for GaussianKernel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIGMA_SQ)
    }
}

impl GaussianKernel {
    /// The default variance if one is not specified.
    pub const DEFAULT_SIGMA_SQ: f64 = 1e-4;

    /// Creates a Gaussian kernel with variance `sigma_sq`.
    ///
    /// The value is checked when the grid is built, not here.
    pub const fn new(sigma_sq: f64) -> Self {
        Self { sigma_sq }
    }

    /// Returns the configured variance.
    pub fn sigma_sq(&self) -> f64 {
        self.sigma_sq
    }
}

impl DensityKernel for GaussianKernel {
    fn evaluate(&self, center: Point, point: Point) -> f64 {
        (-center.distance_squared(&point) / (2.0 * self.sigma_sq)).exp()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.sigma_sq.is_finite() && self.sigma_sq > 0.0 {
            Ok(())
        } else {
            Err(
                Error::invalid_parameter("sigma_sq must be finite and greater than 0")
                    .with_context("sigma_sq", self.sigma_sq),
            )
        }
    }

    fn support_radius(&self) -> Option<f64> {
        Some(3.0 * self.sigma_sq.sqrt())
    }
}
