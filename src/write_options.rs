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

//! Options controlling how a track is re-emitted to disk: compression policy, forced
//! flag clearing, the mode-translation table, and interleave.

use crate::sector_flag::SectorFlag;

/// How a sector's compressed/normal representation is chosen at emit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    /// Compress a sector iff its (possibly just-edited) data is uniform - this is also
    /// what a freshly-read, never-edited uniform sector gets re-emitted as, even when
    /// its original on-disk record was not compressed. A sector's compressed/normal
    /// representation is not itself meaningful data, so re-emitting a uniform sector
    /// compressed even if it was read as normal loses nothing.
    #[default]
    AsRead,
    /// Compress every uniform sector, same rule as `AsRead` - kept as a distinct,
    /// explicit variant so callers can request compression without relying on the
    /// as-read default.
    ForceCompress,
    /// Never compress, regardless of uniformity.
    ForceDecompress,
}

/// How physical sector order is chosen at emit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interleave {
    /// Keep the track's current physical sector order.
    #[default]
    AsRead,
    /// Permute to the given interleave factor (see [`crate::track::apply_interleave`]).
    Factor(u8),
    /// Estimate the factor from the track's current order (see
    /// [`crate::track::best_guess_interleave`]) and permute to that.
    BestGuess,
}

/// A translation table from a track's in-memory mode (0..6) to the mode byte actually
/// written to disk. Defaults to the identity mapping.
pub type ModeTranslation = [u8; 6];

pub const IDENTITY_MODE_TRANSLATION: ModeTranslation = [0, 1, 2, 3, 4, 5];

/// Controls how [`crate::track::emit_track`] (and, transitively,
/// [`crate::image::Image::write_sector`] / [`crate::image::Image::write_track`])
/// serializes a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    pub compression: CompressionMode,
    /// Clear the data-CRC-error bit on every sector regardless of its original flag.
    pub force_non_bad: bool,
    /// Clear the deleted-address-mark bit on every sector regardless of its original
    /// flag.
    pub force_non_deleted: bool,
    pub mode_translation: ModeTranslation,
    pub interleave: Interleave,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::default(),
            force_non_bad: false,
            force_non_deleted: false,
            mode_translation: IDENTITY_MODE_TRANSLATION,
            interleave: Interleave::default(),
        }
    }
}

/// Derive the flag a sector is emitted with, given its original (as-loaded) flag, the
/// uniformity of the data it is about to be written with, and the active options.
///
/// `Unavailable` sectors stay `Unavailable` regardless of options - there is no data to
/// compress or decompress, and no dam/err bit to force. Otherwise `dam`/`err` carry
/// through unless forced off, and the compressed bit follows `compression` (see the
/// `CompressionMode` variant docs for the as-read/force-compress equivalence).
pub fn derive_final_flag(original: SectorFlag, data_is_uniform: bool, options: &WriteOptions) -> SectorFlag {
    match original {
        SectorFlag::Unavailable => SectorFlag::Unavailable,
        SectorFlag::Normal { dam, err, .. } => {
            let dam = dam && !options.force_non_deleted;
            let err = err && !options.force_non_bad;
            let compressed = match options.compression {
                CompressionMode::ForceDecompress => false,
                CompressionMode::AsRead | CompressionMode::ForceCompress => data_is_uniform,
            };
            SectorFlag::Normal { dam, err, compressed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_sectors_never_change() {
        let options = WriteOptions {
            force_non_bad: true,
            force_non_deleted: true,
            compression: CompressionMode::ForceDecompress,
            ..Default::default()
        };
        assert_eq!(
            derive_final_flag(SectorFlag::Unavailable, true, &options),
            SectorFlag::Unavailable
        );
    }

    #[test]
    fn as_read_compresses_uniform_data_even_if_originally_uncompressed() {
        let original = SectorFlag::Normal {
            dam: false,
            err: false,
            compressed: false,
        };
        let options = WriteOptions::default();
        let derived = derive_final_flag(original, true, &options);
        assert!(derived.is_compressed());
    }

    #[test]
    fn as_read_decompresses_non_uniform_data_even_if_originally_compressed() {
        let original = SectorFlag::Normal {
            dam: false,
            err: false,
            compressed: true,
        };
        let options = WriteOptions::default();
        let derived = derive_final_flag(original, false, &options);
        assert!(!derived.is_compressed());
    }

    #[test]
    fn force_decompress_never_compresses() {
        let original = SectorFlag::Normal {
            dam: false,
            err: false,
            compressed: false,
        };
        let options = WriteOptions {
            compression: CompressionMode::ForceDecompress,
            ..Default::default()
        };
        assert!(!derive_final_flag(original, true, &options).is_compressed());
    }

    #[test]
    fn force_non_bad_and_force_non_deleted_clear_their_bits() {
        let original = SectorFlag::Normal {
            dam: true,
            err: true,
            compressed: false,
        };
        let options = WriteOptions {
            force_non_bad: true,
            force_non_deleted: true,
            ..Default::default()
        };
        let derived = derive_final_flag(original, false, &options);
        assert!(!derived.has_dam());
        assert!(!derived.has_err());
    }
}
