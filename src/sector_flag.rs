/*
    imagedisk

    Copyright (c) 2024 The imagedisk authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

//! The per-sector-data-record flag byte, expressed as a tagged enum rather than a bare
//! `u8`. The on-wire byte <-> variant mapping is a pure function; the codec deals
//! exclusively in [`SectorFlag`] values and converts at the serialization boundary.

use crate::error::ImdError;

/// The flag byte that precedes every sector-data record.
///
/// `Normal { compressed, .. }` sectors with `compressed == true` are the "compressed
/// sector" variants from the format: the data that follows is a single byte rather than
/// a full sector_size run, and it is only ever legal to represent a sector this way when
/// every byte of that sector is in fact the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorFlag {
    /// Sector data was not available to the tool that produced this image (flag byte
    /// 0x00). The data buffer slot for this sector is filled with a caller-supplied fill
    /// byte, not real data.
    Unavailable,
    Normal {
        /// The sector's address mark is the "deleted data" mark rather than the normal
        /// one.
        dam: bool,
        /// The sector was read with a data CRC error.
        err: bool,
        /// The on-disk record stores a single repeating byte rather than `sector_size`
        /// distinct bytes.
        compressed: bool,
    },
}

impl SectorFlag {
    pub const NORMAL: SectorFlag = SectorFlag::Normal {
        dam: false,
        err: false,
        compressed: false,
    };

    /// Decode a track record's sector-data flag byte. Any value outside `0x00..=0x08` is
    /// not a sector-data record this format defines, and is rejected as a format error.
    pub fn from_byte(byte: u8) -> Result<Self, ImdError> {
        match byte {
            0x00 => Ok(SectorFlag::Unavailable),
            0x01..=0x08 => {
                let compressed = byte % 2 == 0;
                let group = (byte - 1) / 2;
                Ok(SectorFlag::Normal {
                    dam: group & 1 != 0,
                    err: group & 2 != 0,
                    compressed,
                })
            }
            other => Err(ImdError::InvalidFormat(format!(
                "unrecognized sector-data-record flag byte 0x{other:02X}"
            ))),
        }
    }

    /// Encode this flag back to its on-wire byte.
    pub fn to_byte(self) -> u8 {
        match self {
            SectorFlag::Unavailable => 0x00,
            SectorFlag::Normal { dam, err, compressed } => {
                let group = (err as u8) * 2 + (dam as u8);
                1 + group * 2 + (compressed as u8)
            }
        }
    }

    /// True for any flag other than `Unavailable`. A sector flagged both deleted and
    /// data-CRC-error still counts as "has data" here: the data buffer slot holds real
    /// bytes from the source media either way, only their trustworthiness differs.
    pub fn has_data(self) -> bool {
        !matches!(self, SectorFlag::Unavailable)
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, SectorFlag::Normal { compressed: true, .. })
    }

    pub fn has_dam(self) -> bool {
        matches!(self, SectorFlag::Normal { dam: true, .. })
    }

    pub fn has_err(self) -> bool {
        matches!(self, SectorFlag::Normal { err: true, .. })
    }

    /// Return the same flag with `compressed` forced to the given value, preserving
    /// `dam`/`err`. A no-op on `Unavailable`.
    pub fn with_compressed(self, compressed: bool) -> Self {
        match self {
            SectorFlag::Unavailable => self,
            SectorFlag::Normal { dam, err, .. } => SectorFlag::Normal { dam, err, compressed },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_byte_rejects_flag_byte_above_eight() {
        assert!(SectorFlag::from_byte(0x09).is_err());
        assert!(SectorFlag::from_byte(0xFF).is_err());
    }

    #[test]
    fn to_byte_round_trips_every_defined_flag() {
        for byte in 0x00..=0x08u8 {
            let flag = SectorFlag::from_byte(byte).unwrap();
            assert_eq!(flag.to_byte(), byte);
        }
    }

    #[test]
    fn compressed_variants_are_the_even_nonzero_bytes() {
        for byte in 0x00..=0x08u8 {
            let flag = SectorFlag::from_byte(byte).unwrap();
            assert_eq!(flag.is_compressed(), byte != 0 && byte % 2 == 0, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn has_data_is_true_for_deleted_with_error() {
        // 0x07: normal, deleted address mark, data CRC error. Still counts as data.
        let flag = SectorFlag::from_byte(0x07).unwrap();
        assert!(flag.has_data());
        assert!(flag.has_dam());
        assert!(flag.has_err());
        assert!(!flag.is_compressed());
    }

    #[test]
    fn with_compressed_preserves_dam_and_err() {
        let flag = SectorFlag::from_byte(0x05).unwrap(); // normal, error, not compressed
        let recompressed = flag.with_compressed(true);
        assert!(recompressed.is_compressed());
        assert!(recompressed.has_err());
        assert!(!recompressed.has_dam());
        assert_eq!(recompressed.to_byte(), 0x06);
    }

    #[test]
    fn with_compressed_is_a_no_op_on_unavailable() {
        assert_eq!(SectorFlag::Unavailable.with_compressed(true), SectorFlag::Unavailable);
    }
}
