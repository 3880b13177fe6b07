// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(unused_variables)] // just binrw things with br(temp)

use std::io::Cursor;

use binrw::{BinRead, BinWrite, binrw};
use tracing::{debug, warn};

use crate::color::Color;
use crate::common_file_operations::{get_string_len, read_fixed_string, write_fixed_string};
use crate::error::Error;
use crate::objects::{Collider, MAX_WAYPOINT_CONNECTIONS, Prop, Scenery, SpawnPoint, WayPoint};
use crate::polygon::Polygon;
use crate::sector::{generate_sectors, read_sectors, sector_count, sector_index, write_sectors};
use crate::zero_fill::ZeroFillReader;
use crate::{ByteBuffer, ByteSpan};

/// Longest map name that can be stored.
pub const MAX_NAME_LENGTH: usize = 38;

/// Longest texture file name that can be stored.
pub const MAX_TEXTURE_LENGTH: usize = 24;

/// Grid half-extent of a freshly created map.
pub const DEFAULT_NUM_SECTORS: i32 = 25;

/// How to treat a buffer that ends before the map does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Reads past the end of the buffer produce zeroes, so a truncated map still loads with its
    /// trailing fields zeroed. This matches what the game accepts, but a corrupt file can load
    /// as a silently wrong map.
    #[default]
    Lenient,
    /// Truncated buffers and leftover bytes are errors.
    Strict,
}

/// A PMS polygon map.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PmsFile {
    /// Stored as-is, never interpreted.
    pub version: i32,
    /// Also known as the map description.
    #[br(parse_with = read_fixed_string, args(MAX_NAME_LENGTH))]
    #[bw(write_with = write_fixed_string, args(MAX_NAME_LENGTH))]
    pub name: String,
    /// File name of the texture used by all polygons.
    #[br(parse_with = read_fixed_string, args(MAX_TEXTURE_LENGTH))]
    #[bw(write_with = write_fixed_string, args(MAX_TEXTURE_LENGTH))]
    pub texture: String,
    pub background_color_top: Color,
    pub background_color_bottom: Color,
    pub jet_amount: i32,
    pub grenades: u8,
    pub medikits: u8,
    pub weather: u8,
    pub steps: u8,
    pub rand_id: i32,

    #[br(temp)]
    #[bw(calc = polygons.len() as i32)]
    polygon_count: i32,
    #[br(count = polygon_count.max(0) as usize)]
    pub polygons: Vec<Polygon>,

    /// Width and height of a single sector.
    pub sector_division: i32,
    /// The sector grid spans `-num_sectors..=num_sectors` on both axes.
    pub num_sectors: i32,
    /// `(2 * num_sectors + 1)²` cells of 1-based polygon indices, see [`PmsFile::sector_index`].
    #[br(parse_with = read_sectors, args(num_sectors))]
    #[bw(write_with = write_sectors)]
    pub sectors: Vec<Vec<u16>>,

    #[br(temp)]
    #[bw(calc = props.len() as i32)]
    prop_count: i32,
    #[br(count = prop_count.max(0) as usize)]
    pub props: Vec<Prop>,

    #[br(temp)]
    #[bw(calc = scenery.len() as i32)]
    scenery_count: i32,
    #[br(count = scenery_count.max(0) as usize)]
    pub scenery: Vec<Scenery>,

    #[br(temp)]
    #[bw(calc = colliders.len() as i32)]
    collider_count: i32,
    #[br(count = collider_count.max(0) as usize)]
    pub colliders: Vec<Collider>,

    #[br(temp)]
    #[bw(calc = spawn_points.len() as i32)]
    spawn_point_count: i32,
    #[br(count = spawn_point_count.max(0) as usize)]
    pub spawn_points: Vec<SpawnPoint>,

    #[br(temp)]
    #[bw(calc = way_points.len() as i32)]
    way_point_count: i32,
    #[br(count = way_point_count.max(0) as usize)]
    pub way_points: Vec<WayPoint>,
}

impl Default for PmsFile {
    fn default() -> Self {
        Self {
            version: 0,
            name: String::new(),
            texture: String::new(),
            background_color_top: Color::default(),
            background_color_bottom: Color::default(),
            jet_amount: 0,
            grenades: 0,
            medikits: 0,
            weather: 0,
            steps: 0,
            rand_id: 0,
            polygons: Vec::new(),
            sector_division: 0,
            num_sectors: DEFAULT_NUM_SECTORS,
            sectors: vec![Vec::new(); sector_count(DEFAULT_NUM_SECTORS)],
            props: Vec::new(),
            scenery: Vec::new(),
            colliders: Vec::new(),
            spawn_points: Vec::new(),
            way_points: Vec::new(),
        }
    }
}

impl PmsFile {
    /// Reads an existing PMS file.
    ///
    /// Uses [`ReadPolicy::Lenient`], so a truncated file still loads with its missing fields
    /// zeroed out.
    pub fn from_existing(buffer: ByteSpan) -> Option<PmsFile> {
        PmsFile::read_with_policy(buffer, ReadPolicy::Lenient).ok()
    }

    /// Reads an existing PMS file, failing if it is truncated or has trailing data.
    pub fn from_existing_strict(buffer: ByteSpan) -> Result<PmsFile, Error> {
        PmsFile::read_with_policy(buffer, ReadPolicy::Strict)
    }

    pub fn read_with_policy(buffer: ByteSpan, policy: ReadPolicy) -> Result<PmsFile, Error> {
        let map = match policy {
            ReadPolicy::Lenient => {
                let mut reader = ZeroFillReader::new(buffer);
                let map = PmsFile::read(&mut reader)?;

                if reader.overrun() {
                    warn!(
                        size = buffer.len(),
                        "Map data ended early, missing fields were filled with zeroes"
                    );
                }

                map
            }
            ReadPolicy::Strict => {
                let mut cursor = Cursor::new(buffer);
                let map = PmsFile::read(&mut cursor)?;

                // skipping padding can seek past the end without reading anything
                let position = cursor.position();
                if position > buffer.len() as u64 {
                    return Err(Error::UnexpectedEnd);
                }

                let remaining = buffer.len().saturating_sub(position as usize);
                if remaining > 0 {
                    return Err(Error::TrailingData { remaining });
                }

                map
            }
        };

        debug!(
            name = map.name.as_str(),
            polygons = map.polygons.len(),
            props = map.props.len(),
            scenery = map.scenery.len(),
            colliders = map.colliders.len(),
            spawn_points = map.spawn_points.len(),
            way_points = map.way_points.len(),
            "Read map"
        );

        Ok(map)
    }

    /// Writes the map to a new buffer.
    ///
    /// Names that don't fit are cut short, and waypoints only keep their first
    /// [`MAX_WAYPOINT_CONNECTIONS`] connections. `sectors` is written as-is, call
    /// [`PmsFile::update_sectors`] first if the polygons changed.
    pub fn write_to_buffer(&self) -> Option<ByteBuffer> {
        self.check_before_write();

        let mut cursor = Cursor::new(ByteBuffer::new());
        self.write(&mut cursor).ok()?;

        Some(cursor.into_inner())
    }

    fn check_before_write(&self) {
        if get_string_len(&self.name, MAX_NAME_LENGTH) < self.name.chars().count() {
            warn!(name = self.name.as_str(), "Map name is too long and will be truncated");
        }

        if get_string_len(&self.texture, MAX_TEXTURE_LENGTH) < self.texture.chars().count() {
            warn!(
                texture = self.texture.as_str(),
                "Texture name is too long and will be truncated"
            );
        }

        let expected_sectors = sector_count(self.num_sectors);
        if self.sectors.len() != expected_sectors {
            warn!(
                expected = expected_sectors,
                actual = self.sectors.len(),
                "Sector table doesn't match the grid size, the map won't read back correctly"
            );
        }

        for way_point in &self.way_points {
            if way_point.connections.len() > MAX_WAYPOINT_CONNECTIONS {
                warn!(
                    id = way_point.id,
                    connections = way_point.connections.len(),
                    "Waypoint has too many connections, extra ones are dropped"
                );
            }
        }
    }

    /// Builds a fresh sector table from the current polygons and grid settings.
    pub fn generate_sectors(&self) -> Vec<Vec<u16>> {
        generate_sectors(&self.polygons, self.sector_division, self.num_sectors)
    }

    /// Regenerates and stores the sector table.
    pub fn update_sectors(&mut self) {
        self.sectors = self.generate_sectors();
    }

    /// Position of the cell at `(x, y)` in [`PmsFile::sectors`].
    pub fn sector_index(&self, x: i32, y: i32) -> Option<usize> {
        sector_index(self.num_sectors, x, y)
    }

    /// The 1-based polygon indices in the cell at `(x, y)`.
    pub fn sector(&self, x: i32, y: i32) -> Option<&[u16]> {
        self.sectors
            .get(self.sector_index(x, y)?)
            .map(|sector| sector.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Timestamp;

    /// Size of the fixed header, before the polygon count.
    const HEADER_SIZE: usize =
        4 + (1 + MAX_NAME_LENGTH) + (1 + MAX_TEXTURE_LENGTH) + 4 + 4 + 4 + 4 + 4;

    #[test]
    fn test_invalid() {
        // Feeding it invalid data should not panic
        let invalid = vec![0xFFu8; 512];
        let map = PmsFile::from_existing(&invalid).unwrap();
        assert_eq!(map.name.chars().count(), 255);
        assert!(map.polygons.is_empty());

        assert!(PmsFile::from_existing_strict(&invalid).is_err());
    }

    #[test]
    fn empty_map_size() {
        let buffer = PmsFile::default().write_to_buffer().unwrap();

        assert_eq!(HEADER_SIZE, 88);
        assert_eq!(
            buffer.len(),
            HEADER_SIZE + 4 + 4 + 4 + 2 * sector_count(DEFAULT_NUM_SECTORS) + 5 * 4
        );
        assert_eq!(PmsFile::from_existing_strict(&buffer).unwrap(), PmsFile::default());
    }

    #[test]
    fn header_layout() {
        let map = PmsFile {
            version: 11,
            name: "ctf_Ash".to_string(),
            texture: "banana.bmp".to_string(),
            background_color_top: Color::rgba(1, 2, 3, 4),
            jet_amount: 190,
            grenades: 1,
            medikits: 2,
            weather: 3,
            steps: 4,
            rand_id: -7,
            ..Default::default()
        };

        let buffer = map.write_to_buffer().unwrap();
        assert_eq!(buffer[0..4], 11i32.to_le_bytes());
        assert_eq!(buffer[4], 7);
        assert_eq!(&buffer[5..12], b"ctf_Ash");
        assert!(buffer[12..43].iter().all(|b| *b == 0));
        assert_eq!(buffer[43], 10);
        assert_eq!(&buffer[44..54], b"banana.bmp");
        assert_eq!(buffer[68..72], [3, 2, 1, 4]);
        assert_eq!(buffer[76..80], 190i32.to_le_bytes());
        assert_eq!(buffer[80..84], [1, 2, 3, 4]);
        assert_eq!(buffer[84..88], (-7i32).to_le_bytes());

        assert_eq!(PmsFile::from_existing(&buffer).unwrap(), map);
    }

    #[test]
    fn name_of_max_length() {
        let map = PmsFile {
            name: "N".repeat(MAX_NAME_LENGTH),
            ..Default::default()
        };

        let buffer = map.write_to_buffer().unwrap();
        assert_eq!(PmsFile::from_existing(&buffer).unwrap().name, map.name);
    }

    #[test]
    fn long_name_is_truncated() {
        let name: String = ('a'..='z').chain('A'..='N').collect();
        assert_eq!(name.len(), 40);

        let map = PmsFile {
            name: name.clone(),
            ..Default::default()
        };

        let buffer = map.write_to_buffer().unwrap();
        assert_eq!(buffer.len(), PmsFile::default().write_to_buffer().unwrap().len());

        let read = PmsFile::from_existing_strict(&buffer).unwrap();
        assert_eq!(read.name, name[..MAX_NAME_LENGTH]);
    }

    #[test]
    fn truncated_header() {
        let map = PmsFile {
            version: 3,
            name: "short".to_string(),
            jet_amount: 100,
            ..Default::default()
        };
        let buffer = map.write_to_buffer().unwrap();

        // cut off in the middle of the texture name
        let read = PmsFile::from_existing(&buffer[..50]).unwrap();
        assert_eq!(read.version, 3);
        assert_eq!(read.name, "short");
        assert_eq!(read.jet_amount, 0);
        assert_eq!(read.rand_id, 0);
        assert_eq!(read.num_sectors, 0);
        assert_eq!(read.sectors, vec![Vec::<u16>::new()]);
        assert!(read.polygons.is_empty());
        assert!(read.way_points.is_empty());

        assert_eq!(
            PmsFile::from_existing_strict(&buffer[..50]),
            Err(Error::UnexpectedEnd)
        );
    }

    #[test]
    fn empty_buffer() {
        let read = PmsFile::from_existing(&[]).unwrap();

        assert_eq!(read.version, 0);
        assert!(read.name.is_empty());
        assert_eq!(read.sectors.len(), 1);
    }

    #[test]
    fn trailing_data() {
        let mut buffer = PmsFile::default().write_to_buffer().unwrap();
        buffer.extend_from_slice(&[1, 2, 3]);

        assert!(PmsFile::from_existing(&buffer).is_some());
        assert_eq!(
            PmsFile::from_existing_strict(&buffer),
            Err(Error::TrailingData { remaining: 3 })
        );
    }

    #[test]
    fn truncated_in_waypoint_padding() {
        let mut map = PmsFile::default();
        map.way_points.push(WayPoint::default());

        let buffer = map.write_to_buffer().unwrap();
        // the last bytes are unused connection slots, which are skipped rather than read
        let cut = &buffer[..buffer.len() - 4];

        assert_eq!(PmsFile::from_existing_strict(cut), Err(Error::UnexpectedEnd));
        assert_eq!(PmsFile::from_existing(cut).unwrap(), map);
    }

    #[test]
    fn huge_sector_grid() {
        let mut buffer = PmsFile::default().write_to_buffer().unwrap();
        // num_sectors sits after the header, the polygon count and the sector division
        let offset = HEADER_SIZE + 4 + 4;
        buffer[offset..offset + 4].copy_from_slice(&i32::MAX.to_le_bytes());

        assert_eq!(PmsFile::from_existing_strict(&buffer), Err(Error::UnexpectedEnd));
    }

    #[test]
    fn sector_lookup() {
        let mut map = PmsFile {
            sector_division: 10,
            num_sectors: 2,
            ..Default::default()
        };
        let mut polygon = Polygon::default();
        polygon.vertices[0].x = 9.0;
        polygon.vertices[0].y = 9.0;
        polygon.vertices[1].x = 11.0;
        polygon.vertices[1].y = 9.0;
        polygon.vertices[2].x = 10.0;
        polygon.vertices[2].y = 11.0;
        map.polygons.push(polygon);

        map.update_sectors();

        assert_eq!(map.sectors.len(), 25);
        assert_eq!(map.sector(1, 1), Some([1u16].as_slice()));
        assert_eq!(map.sector(0, 0), Some([].as_slice()));
        assert_eq!(map.sector(3, 0), None);
        assert_eq!(map.sector_index(-2, -2), Some(0));
    }

    #[test]
    fn scenery_round_trip() {
        let map = PmsFile {
            scenery: vec![Scenery {
                name: "tree.bmp".to_string(),
                timestamp: Timestamp {
                    time_value: 0x1234,
                    date_value: 0x5678,
                },
            }],
            ..Default::default()
        };

        let buffer = map.write_to_buffer().unwrap();
        assert_eq!(PmsFile::from_existing_strict(&buffer).unwrap(), map);
    }
}
