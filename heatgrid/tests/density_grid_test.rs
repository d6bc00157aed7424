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

use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::ge;
use googletest::prelude::gt;
use googletest::prelude::near;
use heatgrid::Point;
use heatgrid::density::DensityGrid;
use heatgrid::density::DensityGridBuilder;
use heatgrid::density::DensityKernel;
use heatgrid::density::GaussianKernel;
use heatgrid::error::ErrorKind;

const NUMERIC_NOISE_TOLERANCE: f64 = 1e-12;

fn scattered_points(count: usize) -> Vec<Point> {
    // deterministic low-discrepancy scatter in the unit square
    (0..count)
        .map(|i| {
            let x = (i as f64 * 0.618_033_988_75).fract();
            let y = (i as f64 * 0.754_877_666_25).fract();
            Point::new(x, y)
        })
        .collect()
}

fn brute_force(points: &[Point], resolution: usize, sigma_sq: f64, row: usize, col: usize) -> f64 {
    let step = (resolution - 1) as f64;
    let center = Point::new(row as f64 / step, col as f64 / step);
    points
        .iter()
        .map(|p| (-center.distance_squared(p) / (2.0 * sigma_sq)).exp())
        .sum()
}

#[test]
fn test_closer_cell_is_denser() {
    let grid = DensityGrid::builder()
        .resolution(2)
        .sigma_sq(1.0)
        .neighborhood(1)
        .build(&[Point::new(0.0, 0.0)])
        .unwrap();

    assert_that!(grid.get(0, 0), gt(grid.get(1, 1)));
    assert_that!(grid.get(0, 0), near(1.0, NUMERIC_NOISE_TOLERANCE));
    assert_that!(grid.get(1, 1), near((-1.0f64).exp(), NUMERIC_NOISE_TOLERANCE));
    assert_that!(grid.get(0, 1), near((-0.5f64).exp(), NUMERIC_NOISE_TOLERANCE));
    assert_eq!(grid.get(1, 0), grid.get(0, 1));
}

#[test]
fn test_resolution_too_small() {
    for resolution in [0, 1] {
        let err = DensityGrid::builder()
            .resolution(resolution)
            .build(&[Point::new(0.5, 0.5)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_that!(err.message(), contains_substring("resolution"));
    }
}

#[test]
fn test_resolution_too_large() {
    let err = DensityGrid::builder()
        .resolution(DensityGrid::MAX_RESOLUTION + 1)
        .build(&[Point::new(0.5, 0.5)])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_that!(err.message(), contains_substring("at most"));
}

#[test]
fn test_invalid_sigma_sq() {
    for sigma_sq in [0.0, -1e-4, f64::NAN, f64::INFINITY] {
        let err = DensityGrid::builder()
            .sigma_sq(sigma_sq)
            .build(&[Point::new(0.5, 0.5)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_that!(err.message(), contains_substring("sigma_sq"));
    }
}

#[test]
fn test_empty_input() {
    let err = DensityGrid::builder().build(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
}

#[test]
fn test_parameters_checked_before_input() {
    let err = DensityGrid::builder().resolution(1).build(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_point_outside_unit_square() {
    for point in [
        Point::new(1.5, 0.5),
        Point::new(0.5, -0.1),
        Point::new(f64::NAN, 0.5),
    ] {
        let err = DensityGrid::builder()
            .build(&[Point::new(0.5, 0.5), point])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("index: 1"), "{err}");
    }
}

#[test]
fn test_defaults() {
    let builder = DensityGridBuilder::new();
    assert_eq!(builder.kernel(), &GaussianKernel::new(GaussianKernel::DEFAULT_SIGMA_SQ));

    let grid = builder.build(&scattered_points(100)).unwrap();
    assert_eq!(grid.resolution(), DensityGridBuilder::<GaussianKernel>::DEFAULT_RESOLUTION);
    assert_eq!(grid.values().len(), 20 * 20);
}

#[test]
fn test_non_negative() {
    let points = scattered_points(1000);
    let grid = DensityGrid::builder()
        .resolution(40)
        .sigma_sq(1e-3)
        .neighborhood(3)
        .build(&points)
        .unwrap();
    for (_, _, value) in grid.iter() {
        assert_that!(value, ge(0.0));
    }
    assert_that!(grid.max(), gt(0.0));
}

#[test]
fn test_zero_neighborhood_yields_empty_grid() {
    let grid = DensityGrid::builder()
        .resolution(10)
        .neighborhood(0)
        .build(&scattered_points(50))
        .unwrap();
    assert!(grid.is_empty());
    assert_eq!(grid.max(), 0.0);
}

#[test]
fn test_growing_neighborhood_never_decreases_density() {
    let points = scattered_points(300);
    let resolution = 12;
    let mut previous: Option<DensityGrid> = None;
    for neighborhood in 0..=resolution {
        let grid = DensityGrid::builder()
            .resolution(resolution)
            .sigma_sq(0.02)
            .neighborhood(neighborhood)
            .build(&points)
            .unwrap();
        if let Some(previous) = &previous {
            for (current, before) in grid.values().iter().zip(previous.values()) {
                assert_that!(*current, ge(before * (1.0 - NUMERIC_NOISE_TOLERANCE)));
            }
        }
        previous = Some(grid);
    }
}

#[test]
fn test_full_neighborhood_matches_direct_sum() {
    let points = scattered_points(200);
    let resolution = 8;
    let sigma_sq = 0.05;
    let grid = DensityGrid::builder()
        .resolution(resolution)
        .sigma_sq(sigma_sq)
        .neighborhood(resolution)
        .build(&points)
        .unwrap();

    for (row, col, value) in grid.iter() {
        let expected = brute_force(&points, resolution, sigma_sq, row, col);
        assert_that!(value, near(expected, 1e-9 * expected.max(1.0)));
    }
}

#[test]
fn test_truncation_drops_far_points() {
    let points = [Point::new(0.0, 0.0)];
    let truncated = DensityGrid::builder()
        .resolution(11)
        .sigma_sq(1.0)
        .neighborhood(2)
        .build(&points)
        .unwrap();
    let full = DensityGrid::builder()
        .resolution(11)
        .sigma_sq(1.0)
        .neighborhood(11)
        .build(&points)
        .unwrap();

    assert_eq!(truncated.get(0, 0), full.get(0, 0));
    assert_eq!(truncated.get(2, 2), full.get(2, 2));
    assert_eq!(truncated.get(3, 0), 0.0);
    assert_eq!(truncated.get(10, 10), 0.0);
    assert_that!(full.get(10, 10), gt(0.0));
}

#[test]
fn test_weighted_build() {
    let points = scattered_points(64);
    let builder = DensityGrid::builder()
        .resolution(16)
        .sigma_sq(5e-3)
        .neighborhood(3);

    let unweighted = builder.build(&points).unwrap();
    let ones = builder.build_weighted(&points, &vec![1.0; points.len()]).unwrap();
    assert_eq!(unweighted, ones);

    let twos = builder.build_weighted(&points, &vec![2.0; points.len()]).unwrap();
    for (double, single) in twos.values().iter().zip(unweighted.values()) {
        assert_eq!(*double, 2.0 * single);
    }

    let mut zeros = vec![0.0; points.len()];
    zeros[0] = 1.0;
    let single = builder.build_weighted(&points, &zeros).unwrap();
    let only_first = builder.build(&points[..1]).unwrap();
    assert_eq!(single, only_first);
}

#[test]
fn test_invalid_weights() {
    let points = scattered_points(4);
    let builder = DensityGrid::builder();

    let err = builder.build_weighted(&points, &[1.0, 1.0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_that!(err.message(), contains_substring("match"));

    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let err = builder
            .build_weighted(&points, &[1.0, 1.0, bad, 1.0])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.to_string().contains("index: 2"), "{err}");
    }
}

#[test]
fn test_row_and_index_agree() {
    let grid = DensityGrid::builder()
        .resolution(6)
        .sigma_sq(0.01)
        .build(&scattered_points(30))
        .unwrap();
    for row in 0..6 {
        for (col, value) in grid.row(row).iter().enumerate() {
            assert_eq!(*value, grid[(row, col)]);
            assert_eq!(*value, grid.get(row, col));
        }
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_out_of_range() {
    let grid = DensityGrid::builder()
        .resolution(3)
        .build(&[Point::new(0.5, 0.5)])
        .unwrap();
    let _ = grid.get(3, 0);
}

#[test]
fn test_log_scaled_and_normalized() {
    let grid = DensityGrid::builder()
        .resolution(10)
        .sigma_sq(0.01)
        .neighborhood(4)
        .build(&scattered_points(80))
        .unwrap();

    let logged = grid.log_scaled();
    for (value, original) in logged.values().iter().zip(grid.values()) {
        assert_that!(*value, near(original.ln_1p(), NUMERIC_NOISE_TOLERANCE));
        assert_that!(*value, ge(0.0));
    }

    let normalized = grid.normalized();
    assert_that!(normalized.max(), near(1.0, NUMERIC_NOISE_TOLERANCE));
    for value in normalized.values() {
        assert_that!(*value, ge(0.0));
    }
}

#[test]
fn test_normalized_empty_grid_stays_zero() {
    let grid = DensityGrid::builder()
        .resolution(4)
        .neighborhood(0)
        .build(&[Point::new(0.5, 0.5)])
        .unwrap();
    assert_eq!(grid.normalized(), grid);
}

#[derive(Clone, Copy)]
struct BoxKernel {
    radius_squared: f64,
}

impl DensityKernel for BoxKernel {
    fn evaluate(&self, center: Point, point: Point) -> f64 {
        if center.distance_squared(&point) <= self.radius_squared {
            1.0
        } else {
            0.0
        }
    }
}

#[test]
fn test_custom_kernel() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(0.05, 0.0),
        Point::new(1.0, 1.0),
    ];
    let grid = DensityGrid::builder()
        .resolution(11)
        .neighborhood(11)
        .with_kernel(BoxKernel {
            radius_squared: 0.005,
        })
        .build(&points)
        .unwrap();

    assert_eq!(grid.get(0, 0), 2.0);
    assert_eq!(grid.get(10, 10), 1.0);
    assert_eq!(grid.get(1, 0), 1.0);
    assert_eq!(grid.get(5, 5), 0.0);
    assert_eq!(grid.sum(), 4.0);
}
