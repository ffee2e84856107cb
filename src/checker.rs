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

//! The one-pass consistency checker: scans a file using only the header/comment
//! parsers and the header-only (flags-only) track reader, and produces a failure
//! bitmask plus statistics. Ships a default rule table covering the common failure
//! conditions (short reads, malformed records, geometry mismatches, duplicate tracks)
//! so the checker is runnable standalone; a caller wanting a different or finer-grained
//! rule table can supply its own `CheckOptions` and interpret `CheckFailure` itself.

use std::fs::File;
use std::path::Path;

use bitflags::bitflags;
use log::{debug, warn};

use crate::comment::skip_comment;
use crate::error::ImdResult;
use crate::header::parse_header;
use crate::sector_flag::SectorFlag;
use crate::track::{best_guess_interleave_from_smap, read_track_flags};

bitflags! {
    /// One bit per condition the scan can detect. Used both as the set of "fatal"
    /// conditions in [`CheckOptions::error_mask`] and as the set of conditions actually
    /// observed, returned from [`check_image`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CheckFailure: u32 {
        const BAD_HEADER               = 1 << 0;
        const BAD_COMMENT              = 1 << 1;
        const BAD_TRACK_HEADER         = 1 << 2;
        const BAD_SECTOR_RECORD        = 1 << 3;
        const CYL_OUT_OF_RANGE         = 1 << 4;
        const HEAD_MISMATCH            = 1 << 5;
        const SECTOR_COUNT_OUT_OF_RANGE = 1 << 6;
        const DUPLICATE_TRACK          = 1 << 7;
        const SHORT_READ               = 1 << 8;
    }
}

/// Inputs to one [`check_image`] scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Failures in this mask abort the scan as soon as they're encountered; all other
    /// detected failures are merely recorded into the returned mask and scanning
    /// continues.
    pub error_mask: CheckFailure,
    pub max_cyl: Option<u8>,
    pub required_head: Option<u8>,
    pub max_sectors: Option<u8>,
}

/// Per-scan statistics accumulated alongside the failure mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckStats {
    pub tracks_read: u32,
    pub total_sectors: u32,
    pub unavailable_sectors: u32,
    pub deleted_sectors: u32,
    pub compressed_sectors: u32,
    pub data_error_sectors: u32,
    pub max_cyl_seen: u8,
    pub max_head_seen: u8,
    /// Best-guess interleave of the first scanned track with >= 2 sectors. `None` if no
    /// such track was read before the scan ended.
    pub detected_interleave: Option<u8>,
}

/// Classifies a track-codec error into the bit that best describes it, for a default
/// rule table with no access to the low-level parser's internal state. Errors
/// mentioning end-of-file are short reads (a truncated file); errors on the
/// sector-data flag byte are bad sector records; anything else during header/map
/// parsing is a bad track header.
fn classify_track_error(err: &crate::error::ImdError) -> CheckFailure {
    use crate::error::ImdError;
    match err {
        ImdError::Io(_) => CheckFailure::SHORT_READ,
        ImdError::InvalidFormat(msg) => {
            if msg.contains("end of file") {
                CheckFailure::SHORT_READ
            } else if msg.contains("sector-data-record flag") {
                CheckFailure::BAD_SECTOR_RECORD
            } else {
                CheckFailure::BAD_TRACK_HEADER
            }
        }
        _ => CheckFailure::BAD_TRACK_HEADER,
    }
}

/// Scans `path` read-only: parses the header and comment, then repeatedly calls the
/// header-only track reader until clean EOF, folding every track's header fields and
/// sector flags into [`CheckStats`] and testing each against `options`. Returns the
/// accumulated failure mask and the final statistics - the scan itself never fails;
/// every failure it detects is represented as a bit in the returned mask rather than an
/// `Err` (an `Err` here means the file could not even be opened).
pub fn check_image<P: AsRef<Path>>(path: P, options: &CheckOptions) -> ImdResult<(CheckFailure, CheckStats)> {
    let path = path.as_ref();
    debug!("checking IMD image {path:?}");
    let mut file = File::open(path)?;

    let mut mask = CheckFailure::empty();
    let mut stats = CheckStats::default();
    let mut seen_ch: std::collections::HashSet<(u8, u8)> = std::collections::HashSet::new();

    macro_rules! record_or_stop {
        ($bit:expr) => {{
            mask |= $bit;
            if options.error_mask.contains($bit) {
                warn!("check_image {path:?}: fatal failure {:?}, stopping scan", $bit);
                return Ok((mask, stats));
            }
        }};
    }

    if parse_header(&mut file).is_err() {
        record_or_stop!(CheckFailure::BAD_HEADER);
    }
    if skip_comment(&mut file).is_err() {
        record_or_stop!(CheckFailure::BAD_COMMENT);
    }

    loop {
        match read_track_flags(&mut file) {
            Ok(None) => break,
            Ok(Some(track)) => {
                stats.tracks_read += 1;
                stats.total_sectors += track.sflag.len() as u32;
                stats.max_cyl_seen = stats.max_cyl_seen.max(track.cyl);
                stats.max_head_seen = stats.max_head_seen.max(track.head);

                if stats.detected_interleave.is_none() && track.smap.len() >= 2 {
                    stats.detected_interleave = Some(best_guess_interleave_from_smap(&track.smap));
                }

                for flag in &track.sflag {
                    match flag {
                        SectorFlag::Unavailable => stats.unavailable_sectors += 1,
                        SectorFlag::Normal { dam, err, compressed } => {
                            if *dam {
                                stats.deleted_sectors += 1;
                            }
                            if *err {
                                stats.data_error_sectors += 1;
                            }
                            if *compressed {
                                stats.compressed_sectors += 1;
                            }
                        }
                    }
                }

                if let Some(max_cyl) = options.max_cyl {
                    if track.cyl > max_cyl {
                        record_or_stop!(CheckFailure::CYL_OUT_OF_RANGE);
                    }
                }
                if let Some(required_head) = options.required_head {
                    if track.head != required_head {
                        record_or_stop!(CheckFailure::HEAD_MISMATCH);
                    }
                }
                if let Some(max_sectors) = options.max_sectors {
                    if track.sflag.len() as u8 > max_sectors {
                        record_or_stop!(CheckFailure::SECTOR_COUNT_OUT_OF_RANGE);
                    }
                }
                if !seen_ch.insert((track.cyl, track.head)) {
                    record_or_stop!(CheckFailure::DUPLICATE_TRACK);
                }
            }
            Err(e) => {
                // The seek guard inside `read_track_flags` already rewound the stream
                // to the start of this (malformed) track; retrying would just hit the
                // same error forever, so the scan always stops here regardless of
                // whether the classified bit is in `error_mask`.
                let bit = classify_track_error(&e);
                mask |= bit;
                warn!("check_image {path:?}: {bit:?} ({e}), stopping scan");
                break;
            }
        }
    }

    debug!("check_image {path:?}: mask={mask:?} tracks_read={}", stats.tracks_read);
    Ok((mask, stats))
}
