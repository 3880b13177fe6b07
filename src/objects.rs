// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(unused_variables)] // just binrw things with br(temp)

use std::io::SeekFrom;

use binrw::{BinReaderExt, BinResult, BinWrite, binrw};

use crate::color::Color;
use crate::common_file_operations::{
    read_bool_from, read_fixed_string, write_bool_as, write_fixed_string,
};

/// Waypoints always reserve room for this many connections on disk.
pub const MAX_WAYPOINT_CONNECTIONS: usize = 20;

/// Longest scenery file name that can be stored.
pub const MAX_SCENERY_NAME_LENGTH: usize = 50;

/// A decorative, non-interactive sprite placed in the map.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prop {
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    #[brw(pad_after = 1)]
    pub active: bool,
    /// Index into the map's scenery list.
    pub style: u16,
    pub width: i32,
    pub height: i32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    #[brw(pad_after = 3)]
    pub alpha: u8,
    pub color: Color,
    /// Which layer the prop is drawn on.
    #[brw(pad_after = 3)]
    pub level: u8,
}

impl Default for Prop {
    fn default() -> Self {
        Self {
            active: true,
            style: 0,
            width: 0,
            height: 0,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
            alpha: 0,
            color: Color::default(),
            level: 0,
        }
    }
}

/// Packed DOS-style time and date, kept as-is.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    pub time_value: u16,
    pub date_value: u16,
}

/// Reference to an external scenery image used by props.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenery {
    #[br(parse_with = read_fixed_string, args(MAX_SCENERY_NAME_LENGTH))]
    #[bw(write_with = write_fixed_string, args(MAX_SCENERY_NAME_LENGTH))]
    pub name: String,
    pub timestamp: Timestamp,
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider {
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    #[brw(pad_after = 3)]
    pub active: bool,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            active: true,
            x: 0.0,
            y: 0.0,
            radius: 0.0,
        }
    }
}

#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoint {
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    #[brw(pad_after = 3)]
    pub active: bool,
    pub x: i32,
    pub y: i32,
    pub team: u32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            active: true,
            x: 0,
            y: 0,
            team: 0,
        }
    }
}

#[binrw::parser(reader)]
fn read_connections(count: i32) -> BinResult<Vec<i32>> {
    let mut connections = Vec::with_capacity(count.clamp(0, MAX_WAYPOINT_CONNECTIONS as i32) as usize);
    for _ in 0..count {
        connections.push(reader.read_le::<i32>()?);
    }

    let unused_slots = (MAX_WAYPOINT_CONNECTIONS as i64 - count as i64).max(0);
    reader.seek(SeekFrom::Current(unused_slots * 4))?;

    Ok(connections)
}

#[binrw::writer(writer)]
fn write_connections(connections: &Vec<i32>) -> BinResult<()> {
    let stored = connections.len().min(MAX_WAYPOINT_CONNECTIONS);

    for connection in &connections[..stored] {
        connection.write_le(writer)?;
    }
    vec![0i32; MAX_WAYPOINT_CONNECTIONS - stored].write_le(writer)?;

    Ok(())
}

/// A node in the bot navigation graph.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayPoint {
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    #[brw(pad_after = 3)]
    pub active: bool,
    pub id: i32,
    pub x: i32,
    pub y: i32,
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    pub left: bool,
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    pub right: bool,
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    pub up: bool,
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    pub down: bool,
    #[br(map = read_bool_from::<u8>)]
    #[bw(map = write_bool_as::<u8>)]
    pub jet: bool,
    pub path: u8,
    pub action: u8,
    pub c2: u8,
    #[brw(pad_after = 3)]
    pub c3: u8,

    #[br(temp)]
    #[bw(calc = connections.len().min(MAX_WAYPOINT_CONNECTIONS) as i32)]
    connection_count: i32,
    /// Ids of the waypoints reachable from here. Only the first [`MAX_WAYPOINT_CONNECTIONS`] are saved.
    #[br(parse_with = read_connections, args(connection_count))]
    #[bw(write_with = write_connections)]
    pub connections: Vec<i32>,
}

impl Default for WayPoint {
    fn default() -> Self {
        Self {
            active: true,
            id: 0,
            x: 0,
            y: 0,
            left: false,
            right: false,
            up: false,
            down: false,
            jet: false,
            path: 0,
            action: 0,
            c2: 0,
            c3: 0,
            connections: Vec::new(),
        }
    }
}
