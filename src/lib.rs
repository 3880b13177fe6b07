// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::ptr_arg)] // binrw trips up another false positive

//! Reading and writing PMS polygon map files, and building the sector
//! tables used to cull their terrain.

/// A continuous block of memory which is not owned, and comes either from an in-memory location or from a file.
pub type ByteSpan<'a> = &'a [u8];

/// A continuous block of memory which is owned.
pub type ByteBuffer = Vec<u8>;

/// Reading and writing whole PMS maps.
pub mod map;

/// Terrain polygons and their vertices.
pub mod polygon;

/// Props, scenery, colliders, spawn points and waypoints.
pub mod objects;

/// Colors and their on-disk channel order.
pub mod color;

/// Bucketing terrain polygons into grid cells.
pub mod sector;

/// Point, segment, triangle and rectangle predicates used by sector generation.
pub mod geometry;

/// Error types.
pub mod error;

mod common_file_operations;
mod zero_fill;

pub use error::Error;
pub use map::{PmsFile, ReadPolicy};
