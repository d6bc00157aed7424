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

use crate::codec::GridBytes;
use crate::codec::GridSlice;
use crate::codec::assert::ensure_preamble_ints_in;
use crate::codec::assert::ensure_serial_version_is;
use crate::codec::family::Family;
use crate::density::grid::DensityGrid;
use crate::error::Error;

const PREAMBLE_INTS: u8 = 2;
const SERIAL_VERSION: u8 = 1;
const FLAGS_IS_EMPTY: u8 = 1 << 2;
const VALUE_SIZE: usize = 8;

// Layout (little-endian):
//
//   byte 0: preamble ints | byte 1: serial version | byte 2: family id | byte 3: flags
//   bytes 4..8: resolution (u32)
//   then resolution² f64 cells in row-major order, omitted when the empty flag is set
pub(super) fn serialize(grid: &DensityGrid) -> Vec<u8> {
    let is_empty = grid.is_empty();
    let mut size_bytes = PREAMBLE_INTS as usize * 4;
    if !is_empty {
        size_bytes += grid.values().len() * VALUE_SIZE;
    }

    let mut bytes = GridBytes::with_capacity(size_bytes);
    bytes.write_u8(PREAMBLE_INTS);
    bytes.write_u8(SERIAL_VERSION);
    bytes.write_u8(Family::DENSITY_GRID.id);
    bytes.write_u8(if is_empty { FLAGS_IS_EMPTY } else { 0 });
    bytes.write_u32_le(grid.resolution() as u32);

    if !is_empty {
        for value in grid.values() {
            bytes.write_f64_le(*value);
        }
    }
    bytes.into_bytes()
}

pub(super) fn deserialize(bytes: &[u8]) -> Result<DensityGrid, Error> {
    fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
        move |_| Error::insufficient_data(tag)
    }

    let mut cursor = GridSlice::new(bytes);
    let preamble_ints = cursor.read_u8().map_err(make_error("preamble_ints"))?;
    let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
    let family_id = cursor.read_u8().map_err(make_error("family_id"))?;
    let flags = cursor.read_u8().map_err(make_error("flags"))?;
    let resolution = cursor.read_u32_le().map_err(make_error("resolution"))? as usize;

    Family::DENSITY_GRID.validate_id(family_id)?;
    ensure_serial_version_is(SERIAL_VERSION, serial_version)?;
    ensure_preamble_ints_in(&Family::DENSITY_GRID, preamble_ints)?;
    if !(2..=DensityGrid::MAX_RESOLUTION).contains(&resolution) {
        return Err(Error::deserial(format!(
            "resolution must be in [2, {}]. Found: {resolution}",
            DensityGrid::MAX_RESOLUTION
        )));
    }

    let num_cells = resolution * resolution;
    let values = if (flags & FLAGS_IS_EMPTY) != 0 {
        vec![0.0; num_cells]
    } else {
        read_cells(&mut cursor, num_cells)?
    };
    if cursor.remaining() != 0 {
        return Err(Error::deserial("trailing bytes after grid image")
            .with_context("trailing_bytes", cursor.remaining()));
    }

    Ok(DensityGrid::from_values(resolution, values))
}

fn read_cells(cursor: &mut GridSlice<'_>, num_cells: usize) -> Result<Vec<f64>, Error> {
    let expected = num_cells * VALUE_SIZE;
    let remaining = cursor.remaining();
    if remaining < expected {
        return Err(Error::insufficient_data("cells")
            .with_context("expected_bytes", expected)
            .with_context("remaining_bytes", remaining));
    }

    let mut values = Vec::with_capacity(num_cells);
    for _ in 0..num_cells {
        let value = cursor
            .read_f64_le()
            .map_err(|_| Error::insufficient_data("cells"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(Error::deserial(
                "cell values must be finite and non-negative",
            )
            .with_context("cell", values.len())
            .with_context("value", value));
        }
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_omits_cells() {
        let grid = DensityGrid::from_values(3, vec![0.0; 9]);
        let bytes = serialize(&grid);
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytes[3], FLAGS_IS_EMPTY);
        assert_eq!(deserialize(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_preamble_layout() {
        let grid = DensityGrid::from_values(2, vec![1.0, 0.0, 0.5, 2.0]);
        let bytes = serialize(&grid);
        assert_eq!(bytes.len(), 8 + 4 * VALUE_SIZE);
        assert_eq!(&bytes[..4], &[PREAMBLE_INTS, SERIAL_VERSION, Family::DENSITY_GRID.id, 0]);
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
        assert_eq!(&bytes[8..16], &1.0f64.to_le_bytes());
    }
}
