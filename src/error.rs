// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The buffer ended before the whole map could be read.
    UnexpectedEnd,
    /// The map was read successfully, but there were bytes left over.
    TrailingData {
        /// How many bytes were not consumed.
        remaining: usize,
    },
    /// There was an error while parsing the map.
    ParsingFailed {
        /// What binrw reported.
        reason: String,
    },
    /// There was an error while writing the map.
    WritingFailed {
        /// What binrw reported.
        reason: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::UnexpectedEnd => write!(f, "unexpected end of map data"),
            Error::TrailingData { remaining } => {
                write!(f, "{remaining} trailing bytes after map data")
            }
            Error::ParsingFailed { reason } => write!(f, "map parsing failed: {reason}"),
            Error::WritingFailed { reason } => write!(f, "map writing failed: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<binrw::Error> for Error {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Error::UnexpectedEnd
            }
            // binrw wraps field errors in a backtrace, look through it for the root cause
            binrw::Error::Backtrace(backtrace) => Error::from(*backtrace.error),
            other => Error::ParsingFailed {
                reason: other.to_string(),
            },
        }
    }
}
