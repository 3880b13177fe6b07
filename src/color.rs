// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{Read, Seek, Write};

use binrw::{BinRead, BinResult, BinWrite, Endian};

/// An 8-bit per channel color.
///
/// Stored as RGBA in memory, but written to disk as BGRA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs a color from channels given in the on-disk order.
    pub const fn bgra(b: u8, g: u8, r: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}

impl From<[u8; 4]> for Color {
    fn from(rgba: [u8; 4]) -> Self {
        Color::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl BinRead for Color {
    type Args<'a> = ();

    fn read_options<R: Read + Seek>(
        reader: &mut R,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<Self> {
        // each channel is its own read, a color cut off by the end of the buffer keeps what's there
        let b = u8::read_options(reader, endian, ())?;
        let g = u8::read_options(reader, endian, ())?;
        let r = u8::read_options(reader, endian, ())?;
        let a = u8::read_options(reader, endian, ())?;

        Ok(Color::bgra(b, g, r, a))
    }
}

impl BinWrite for Color {
    type Args<'a> = ();

    fn write_options<W: Write + Seek>(
        &self,
        writer: &mut W,
        endian: Endian,
        _: Self::Args<'_>,
    ) -> BinResult<()> {
        self.to_bgra().write_options(writer, endian, ())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use binrw::{BinReaderExt, BinWriterExt};

    use super::*;

    #[test]
    fn channel_order() {
        let color = Color::bgra(1, 2, 3, 4);

        assert_eq!(color.to_rgba(), [3, 2, 1, 4]);
        assert_eq!(color, Color::rgba(3, 2, 1, 4));
        assert_eq!(color, Color::from([3, 2, 1, 4]));
    }

    #[test]
    fn written_as_bgra() {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&Color::rgba(0x11, 0x22, 0x33, 0x44)).unwrap();

        assert_eq!(cursor.into_inner(), vec![0x33, 0x22, 0x11, 0x44]);
    }

    #[test]
    fn read_back() {
        let color = Color::rgba(10, 20, 30, 255);

        let mut cursor = Cursor::new(Vec::new());
        cursor.write_le(&color).unwrap();
        cursor.set_position(0);

        assert_eq!(cursor.read_le::<Color>().unwrap(), color);
    }
}
