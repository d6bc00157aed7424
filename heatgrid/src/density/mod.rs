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

//! Gaussian kernel density grids over normalized points.
//!
//! Points are binned into an `n x n` grid covering the unit square, and every
//! grid cell sums the kernel contributions of the points binned within a
//! bounded neighborhood of it. The resulting [`DensityGrid`] is dense and
//! unnormalized, ready to be mapped to bar heights or colors by a renderer.
//!
//! # Usage
//!
//! ```rust
//! # use heatgrid::density::DensityGrid;
//! # use heatgrid::Point;
//! let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
//! let grid = DensityGrid::builder()
//!     .resolution(2)
//!     .sigma_sq(1.0)
//!     .neighborhood(1)
//!     .build(&points)
//!     .unwrap();
//! assert!(grid.get(0, 0) > 0.0);
//! ```

mod bins;
mod builder;
mod grid;
mod kernel;
mod serialization;

pub use self::builder::DensityGridBuilder;
pub use self::grid::DensityGrid;
pub use self::kernel::DensityKernel;
pub use self::kernel::GaussianKernel;
