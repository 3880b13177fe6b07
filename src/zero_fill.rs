// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{Read, Seek, SeekFrom};

use crate::ByteSpan;

/// A byte source that never runs out.
///
/// Any read that would cross the end of the buffer fills the destination with zeroes and leaves
/// the position where it was, so a truncated map decodes into zero-valued trailing fields instead
/// of failing. Seeking past the end is allowed, later reads there are zero as well.
///
/// This is how the game's own editor reads maps, and files in the wild depend on it.
pub(crate) struct ZeroFillReader<'a> {
    buffer: ByteSpan<'a>,
    position: u64,
    overrun: bool,
}

impl<'a> ZeroFillReader<'a> {
    pub(crate) fn new(buffer: ByteSpan<'a>) -> Self {
        Self {
            buffer,
            position: 0,
            overrun: false,
        }
    }

    /// Whether any read was satisfied with zeroes.
    pub(crate) fn overrun(&self) -> bool {
        self.overrun
    }
}

impl Read for ZeroFillReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let start = self.position;
        let end = start + buf.len() as u64;

        if end <= self.buffer.len() as u64 {
            buf.copy_from_slice(&self.buffer[start as usize..end as usize]);
            self.position = end;
        } else {
            buf.fill(0);
            self.overrun = true;
        }

        Ok(buf.len())
    }
}

impl Seek for ZeroFillReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let new_position = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(offset) => self.position.checked_add_signed(offset),
            SeekFrom::End(offset) => (self.buffer.len() as u64).checked_add_signed(offset),
        };

        match new_position {
            Some(position) => {
                self.position = position;
                Ok(position)
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
