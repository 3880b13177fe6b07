// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use binrw::{BinReaderExt, BinResult, BinWrite};
use std::io::SeekFrom;

/// The length byte of a string field can't describe anything longer than this.
const MAX_STRING_LENGTH: usize = u8::MAX as usize;

pub(crate) fn read_bool_from<T: std::convert::From<u8> + std::cmp::PartialEq>(x: T) -> bool {
    x != T::from(0u8)
}

pub(crate) fn write_bool_as<T: std::convert::From<u8>>(x: &bool) -> T {
    if *x { T::from(1u8) } else { T::from(0u8) }
}

/// Reads a length-prefixed string that occupies `1 + max_length` bytes.
///
/// The length byte is trusted as-is, even if it is larger than `max_length`.
/// Bytes are Latin-1.
#[binrw::parser(reader)]
pub(crate) fn read_fixed_string(max_length: usize) -> BinResult<String> {
    let length = reader.read_le::<u8>()? as usize;

    let mut string = String::with_capacity(length);
    // byte by byte, so a string cut off by the end of the buffer keeps what's there
    for _ in 0..length {
        string.push(reader.read_le::<u8>()? as char);
    }

    let padding = max_length.saturating_sub(length);
    reader.seek(SeekFrom::Current(padding as i64))?;

    Ok(string)
}

/// Writes a length-prefixed string padded with zeroes to `1 + max_length` bytes.
///
/// Anything past `max_length` characters is dropped, and characters outside of Latin-1 are
/// truncated to their low byte.
#[binrw::writer(writer)]
pub(crate) fn write_fixed_string(str: &String, max_length: usize) -> BinResult<()> {
    let max_length = max_length.min(MAX_STRING_LENGTH);
    let bytes: Vec<u8> = str
        .chars()
        .take(max_length)
        .map(|c| c as u32 as u8)
        .collect();

    (bytes.len() as u8).write_le(writer)?;
    bytes.write_le(writer)?;
    vec![0u8; max_length - bytes.len()].write_le(writer)?;

    Ok(())
}

/// Number of characters a string field would actually store.
pub(crate) fn get_string_len(str: &str, max_length: usize) -> usize {
    str.chars().count().min(max_length).min(MAX_STRING_LENGTH)
}
