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

//! # imagedisk
//!
//! `imagedisk` is a Rust library for reading, writing, and editing ImageDisk (`.imd`)
//! floppy-disk image files - a binary archival format for vintage diskettes produced by
//! Dave Dunfield's ImageDisk utility.
//!
//! The crate is organized bottom-up, mirroring the data flow through the container:
//!
//! - [`sector_size`] - the 3-bit sector-size code <-> byte-count table.
//! - [`sector_flag`] - the per-sector-data-record flag byte as a tagged enum.
//! - [`header`] - the ASCII header line (tool version, timestamp).
//! - [`comment`] - the free-form comment block terminated by `0x1A`.
//! - [`track`] - the track codec (parse/emit a single track record) and the track
//!   transforms (uniformity test, interleave estimation and application).
//! - [`write_options`] - options controlling how a track is re-emitted: compression
//!   policy, forced flag clearing, mode translation, interleave.
//! - [`image`] - the in-memory image model: [`image::Image`], the main entry point,
//!   wrapping the whole-file open/rewrite/truncate pipeline and the sector/track
//!   read/write operations.
//! - [`checker`] - the one-pass consistency checker.
//!
//! ```no_run
//! use imagedisk::image::Image;
//!
//! # fn main() -> imagedisk::error::ImdResult<()> {
//! let mut image = Image::open("disk.imd", false)?;
//! let mut sector = vec![0u8; 512];
//! image.read_sector(0, 0, 1, &mut sector)?;
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod comment;
pub mod cylhead;
pub mod error;
pub mod header;
pub mod image;
pub mod io;
pub mod sector_flag;
pub mod sector_size;
pub mod track;
pub mod write_options;

pub use crate::checker::{check_image, CheckFailure, CheckOptions, CheckStats};
pub use crate::cylhead::CylHead;
pub use crate::error::{ImdError, ImdResult};
pub use crate::image::{Geometry, Image, TrackInfo, GEOMETRY_UNUSED};
pub use crate::sector_flag::SectorFlag;
pub use crate::track::Track;
pub use crate::write_options::{CompressionMode, Interleave, WriteOptions};
