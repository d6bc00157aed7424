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

//! # heatgrid
//!
//! Turns scattered 2D points, typically geocoded locations, into a dense
//! kernel-density heatmap grid.
//!
//! The pipeline has three stages:
//!
//! 1. [`projection`]: project `(longitude, latitude)` onto a plane, for example
//!    with [`WebMercator`](projection::WebMercator).
//! 2. [`normalize_points`]: rescale the projected points into the unit square,
//!    preserving their aspect ratio.
//! 3. [`density`]: accumulate a Gaussian kernel density estimate on an
//!    `n x n` grid.
//!
//! ```rust
//! use heatgrid::DensityGrid;
//! use heatgrid::Point;
//! use heatgrid::normalize_points;
//! use heatgrid::projection::Projection;
//! use heatgrid::projection::WebMercator;
//!
//! let stations = [
//!     Point::new(-122.42, 37.77),
//!     Point::new(-122.41, 37.78),
//!     Point::new(-122.27, 37.80),
//! ];
//! let projected = WebMercator.project_all(&stations)?;
//! let normalized = normalize_points(&projected)?;
//! let grid = DensityGrid::builder()
//!     .resolution(50)
//!     .sigma_sq(5e-4)
//!     .neighborhood(4)
//!     .build(&normalized)?;
//! assert!(grid.max() > 0.0);
//! # Ok::<(), heatgrid::error::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod density;
pub mod error;
pub mod projection;

mod codec;
mod normalize;
mod point;

pub use self::density::DensityGrid;
pub use self::normalize::normalize_points;
pub use self::point::Bounds;
pub use self::point::Point;
