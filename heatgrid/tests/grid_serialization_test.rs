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
use heatgrid::DensityGrid;
use heatgrid::Point;
use heatgrid::error::ErrorKind;

fn sample_grid() -> DensityGrid {
    let points: Vec<Point> = (0..40)
        .map(|i| {
            let t = i as f64 / 40.0;
            Point::new(t, (t * 7.0).fract())
        })
        .collect();
    DensityGrid::builder()
        .resolution(12)
        .sigma_sq(4e-3)
        .neighborhood(3)
        .build(&points)
        .unwrap()
}

#[test]
fn test_serialize_non_empty() {
    let grid = sample_grid();
    let bytes = grid.serialize();
    assert_eq!(bytes.len(), 8 + 12 * 12 * 8);

    let decoded = DensityGrid::deserialize(&bytes).unwrap();
    assert_eq!(decoded, grid);
    assert_eq!(decoded.serialize(), bytes);
}

#[test]
fn test_serialize_empty() {
    let grid = DensityGrid::builder()
        .resolution(5)
        .neighborhood(0)
        .build(&[Point::new(0.5, 0.5)])
        .unwrap();
    assert!(grid.is_empty());

    let bytes = grid.serialize();
    assert_eq!(bytes.len(), 8);
    let decoded = DensityGrid::deserialize(&bytes).unwrap();
    assert_eq!(decoded.resolution(), 5);
    assert!(decoded.is_empty());
}

#[test]
fn test_truncated_image() {
    let bytes = sample_grid().serialize();

    let err = DensityGrid::deserialize(&bytes[..6]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    assert_that!(err.message(), contains_substring("resolution"));

    let err = DensityGrid::deserialize(&bytes[..bytes.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    assert_that!(err.message(), contains_substring("cells"));

    let err = DensityGrid::deserialize(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = sample_grid().serialize();
    bytes.push(0);
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_wrong_family() {
    let mut bytes = sample_grid().serialize();
    bytes[2] = 7;
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("DENSITY_GRID"));
}

#[test]
fn test_wrong_serial_version() {
    let mut bytes = sample_grid().serialize();
    bytes[1] = 9;
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("serial version"));
}

#[test]
fn test_wrong_preamble() {
    let mut bytes = sample_grid().serialize();
    bytes[0] = 3;
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_degenerate_resolution() {
    let mut bytes = sample_grid().serialize();
    bytes[4..8].copy_from_slice(&1u32.to_le_bytes());
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("resolution"));
}

#[test]
fn test_resolution_above_limit() {
    let err = DensityGrid::deserialize(&[2, 1, 40, 4, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("resolution"));

    let mut bytes = vec![2, 1, 40, 4];
    bytes.extend_from_slice(&((DensityGrid::MAX_RESOLUTION + 1) as u32).to_le_bytes());
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
}

#[test]
fn test_empty_image_with_trailing_bytes() {
    let grid = DensityGrid::builder()
        .resolution(4)
        .neighborhood(0)
        .build(&[Point::new(0.5, 0.5)])
        .unwrap();
    let mut bytes = grid.serialize();
    bytes.extend_from_slice(&[0xAB; 3]);
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert!(err.to_string().contains("trailing_bytes: 3"), "{err}");
}

#[test]
fn test_negative_cell() {
    let mut bytes = sample_grid().serialize();
    bytes[8..16].copy_from_slice(&(-1.0f64).to_le_bytes());
    let err = DensityGrid::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert!(err.to_string().contains("cell: 0"), "{err}");
}
