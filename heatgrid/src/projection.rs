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

//! Map projections from geographic coordinates to planar coordinates.
//!
//! Input points carry longitude in `x` and latitude in `y`, both in degrees.

use std::f64::consts::FRAC_PI_4;

use crate::error::Error;
use crate::point::Point;

/// Projects geographic coordinates onto a plane.
pub trait Projection {
    /// Projects a single `(longitude, latitude)` point.
    fn project(&self, lon_lat: Point) -> Result<Point, Error>;

    /// Projects every point, failing on the first one outside the projection's domain.
    fn project_all(&self, lon_lat: &[Point]) -> Result<Vec<Point>, Error> {
        lon_lat
            .iter()
            .enumerate()
            .map(|(index, p)| {
                self.project(*p)
                    .map_err(|err| err.with_context("index", index))
            })
            .collect()
    }
}

/// Spherical ("Web") Mercator, EPSG:3857 (formerly EPSG:3785). Output is in metres.
///
/// # Examples
///
/// ```
/// use heatgrid::Point;
/// use heatgrid::projection::Projection;
/// use heatgrid::projection::WebMercator;
///
/// let projected = WebMercator.project(Point::new(180.0, 0.0)).unwrap();
/// assert!((projected.x - std::f64::consts::PI * WebMercator::EARTH_RADIUS).abs() < 1e-6);
/// assert!(projected.y.abs() < 1e-6);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct WebMercator;

impl WebMercator {
    /// Radius of the projection sphere (WGS84 semi-major axis).
    pub const EARTH_RADIUS: f64 = 6_378_137.0;

    /// Latitude at which the projected map becomes square.
    pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;
}

impl Projection for WebMercator {
    fn project(&self, lon_lat: Point) -> Result<Point, Error> {
        let Point {
            x: longitude,
            y: latitude,
        } = lon_lat;
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(
                Error::invalid_parameter("coordinates must be finite").with_context("point", lon_lat)
            );
        }
        if latitude.abs() > Self::MAX_LATITUDE {
            return Err(Error::invalid_parameter(format!(
                "latitude must be within +/-{} degrees",
                Self::MAX_LATITUDE
            ))
            .with_context("latitude", latitude));
        }

        let x = Self::EARTH_RADIUS * longitude.to_radians();
        let y = Self::EARTH_RADIUS * (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln();
        Ok(Point::new(x, y))
    }
}
