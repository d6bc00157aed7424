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

//! Aspect-preserving normalization of point sets into the unit square.

use crate::error::Error;
use crate::point::Bounds;
use crate::point::Point;

/// Rescales `points` into `[0, 1] x [0, 1]` while preserving aspect ratio.
///
/// Both axes are divided by the larger bounding-box extent, so the dominant
/// axis spans the full unit interval and the other axis is centered around
/// 0.5. Output has the same length and order as the input.
///
/// # Errors
///
/// - [`ErrorKind::EmptyInput`](crate::error::ErrorKind::EmptyInput) if
///   `points` is empty.
/// - [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter)
///   if any coordinate is NaN or infinite.
/// - [`ErrorKind::DegenerateInput`](crate::error::ErrorKind::DegenerateInput)
///   if every point is identical, leaving no extent to scale by.
///
/// # Examples
///
/// ```
/// use heatgrid::Point;
/// use heatgrid::normalize_points;
///
/// let points = [Point::new(0.0, 0.0), Point::new(4.0, 2.0)];
/// let normalized = normalize_points(&points).unwrap();
/// assert_eq!(normalized[0], Point::new(0.0, 0.25));
/// assert_eq!(normalized[1], Point::new(1.0, 0.75));
/// ```
pub fn normalize_points(points: &[Point]) -> Result<Vec<Point>, Error> {
    if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(Error::invalid_parameter("point coordinates must be finite")
            .with_context("index", index)
            .with_context("point", p));
    }

    let bounds = Bounds::from_points(points).ok_or_else(|| Error::empty_input("normalization"))?;
    if bounds.dominant_extent() <= 0.0 {
        return Err(
            Error::degenerate_input("all points are identical; cannot derive a scale factor")
                .with_context("point", bounds.min),
        );
    }

    // finite points can still have an extent that overflows f64
    let shrink = if bounds.dominant_extent().is_finite() {
        1.0
    } else {
        0.5
    };
    let bounds = Bounds {
        min: Point::new(bounds.min.x * shrink, bounds.min.y * shrink),
        max: Point::new(bounds.max.x * shrink, bounds.max.y * shrink),
    };
    let scale = bounds.dominant_extent();
    let center = bounds.center();
    let normalized = points
        .iter()
        .map(|p| {
            Point::new(
                rescale(p.x * shrink, center.x, scale),
                rescale(p.y * shrink, center.y, scale),
            )
        })
        .collect();
    Ok(normalized)
}

fn rescale(value: f64, center: f64, scale: f64) -> f64 {
    // rounding can land the extremes a hair outside the unit interval
    ((value - center) / scale + 0.5).clamp(0.0, 1.0)
}
