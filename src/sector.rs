// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::{BinReaderExt, BinResult, BinWrite};
use tracing::warn;

use crate::geometry::{Rect, rect_intersects_triangle};
use crate::polygon::Polygon;

/// Number of cells in a grid that spans `-num_sectors..=num_sectors` on both axes.
///
/// Saturates at `usize::MAX` for grids too large to address.
pub fn sector_count(num_sectors: i32) -> usize {
    let side = 2 * num_sectors as i128 + 1;
    usize::try_from(side * side).unwrap_or(usize::MAX)
}

/// Flat index of the cell at `(x, y)`, cells are stored column by column.
pub fn sector_index(num_sectors: i32, x: i32, y: i32) -> Option<usize> {
    if num_sectors < 0 {
        return None;
    }

    let range = -num_sectors..=num_sectors;
    if !range.contains(&x) || !range.contains(&y) {
        return None;
    }

    // every term is non-negative here, and the largest grid still fits in a u64
    let n = num_sectors as i64;
    let column = (n + x as i64) as u64;
    let row = (n + y as i64) as u64;
    let side = (2 * n + 1) as u64;
    usize::try_from(column * side + row).ok()
}

/// Converts a world coordinate, already divided by the sector size, to a cell coordinate.
///
/// The value goes through single precision before rounding half to even, which is what the game
/// does. Plain rounding puts polygons on a cell boundary into a different cell.
fn to_sector_coordinate(value: f64) -> i32 {
    (value as f32).round_ties_even() as i32
}

/// Buckets every colliding polygon into each cell of the grid it overlaps.
///
/// Cells hold 1-based indices into `polygons`, in ascending order. Each cell covers
/// `division` units, padded by one unit on every side.
pub fn generate_sectors(polygons: &[Polygon], division: i32, num_sectors: i32) -> Vec<Vec<u16>> {
    let mut sectors = vec![Vec::new(); sector_count(num_sectors)];

    if division <= 0 {
        warn!(division, "Sector division must be positive, leaving all sectors empty");
        return sectors;
    }

    // a negative grid has no cells to fill
    if num_sectors < 0 {
        return sectors;
    }

    let d = division as f64;
    let n = num_sectors;

    for (i, polygon) in polygons.iter().enumerate() {
        if !polygon.is_colliding() {
            continue;
        }

        let (min_x, min_y, max_x, max_y) = polygon.bounds();
        let x0 = to_sector_coordinate((min_x as f64 - 1.0) / d).max(-n);
        let x1 = to_sector_coordinate((max_x as f64 + 1.0) / d).min(n);
        let y0 = to_sector_coordinate((min_y as f64 - 1.0) / d).max(-n);
        let y1 = to_sector_coordinate((max_y as f64 + 1.0) / d).min(n);

        let triangle = polygon.triangle();
        // indices are u16 on disk
        let polygon_index = (i + 1) as u16;

        for x in x0..=x1 {
            for y in y0..=y1 {
                let rect = Rect::new(
                    d * (x as f64 - 0.5) - 1.0,
                    d * (y as f64 - 0.5) - 1.0,
                    d + 2.0,
                    d + 2.0,
                );

                if rect_intersects_triangle(&rect, &triangle) {
                    if let Some(index) = sector_index(n, x, y) {
                        sectors[index].push(polygon_index);
                    }
                }
            }
        }
    }

    sectors
}

#[binrw::parser(reader)]
pub(crate) fn read_sectors(num_sectors: i32) -> BinResult<Vec<Vec<u16>>> {
    let count = sector_count(num_sectors);

    let mut sectors = Vec::new();
    for _ in 0..count {
        let polygon_count = reader.read_le::<u16>()?;

        let mut sector = Vec::with_capacity(polygon_count as usize);
        for _ in 0..polygon_count {
            sector.push(reader.read_le::<u16>()?);
        }

        sectors.push(sector);
    }

    Ok(sectors)
}

#[binrw::writer(writer)]
pub(crate) fn write_sectors(sectors: &Vec<Vec<u16>>) -> BinResult<()> {
    for sector in sectors {
        (sector.len() as u16).write_le(writer)?;
        sector.write_le(writer)?;
    }

    Ok(())
}
