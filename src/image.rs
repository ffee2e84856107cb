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

//! The in-memory image model: the main public entry point to this crate. An [`Image`]
//! owns the backing file handle, the parsed header and comment, and the ordered track
//! list, and exposes the sector/track read/write operations. Every mutating operation
//! persists synchronously - there is no separate "save" call.

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::comment::{emit_comment, read_comment};
use crate::cylhead::CylHead;
use crate::error::{ImdError, ImdResult};
use crate::header::{emit_header, parse_header, HeaderInfo};
use crate::sector_size::code_to_bytes;
use crate::track::{emit_track, is_uniform, new_filled_track, read_track_full, Track};
use crate::write_options::{derive_final_flag, CompressionMode, WriteOptions};

/// Sentinel value for any [`Geometry`] field meaning "unused" / "no limit".
pub const GEOMETRY_UNUSED: u8 = 0xFF;

/// The fill byte used to materialize unavailable sectors' data-buffer slots when a file
/// is opened. Not specified by the container format itself (nothing on disk exists to
/// fill); `0x00` is chosen as the least surprising default.
const OPEN_FILL_BYTE: u8 = 0x00;

/// The mode stamped on a brand-new track created by [`Image::write_track`]. A new track
/// always starts at mode 0 (500 kbps FM); callers who need a different mode must read
/// the track back out and re-encode it with a mode translation.
const DEFAULT_WRITE_TRACK_MODE: u8 = 0;

/// The three geometry limits an [`Image`] can be configured with. `GEOMETRY_UNUSED`
/// (`0xFF`) in any field means that limit is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub max_cyl: u8,
    pub max_head: u8,
    pub max_spt: u8,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            max_cyl: GEOMETRY_UNUSED,
            max_head: GEOMETRY_UNUSED,
            max_spt: GEOMETRY_UNUSED,
        }
    }
}

/// A summary of one track's fixed header fields, without its sector data or flags -
/// returned by [`Image::get_track_info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackInfo {
    pub mode: u8,
    pub cyl: u8,
    pub head: u8,
    pub hflag: u8,
    pub sector_size_code: u8,
    pub sector_size: usize,
    pub num_sectors: usize,
}

/// A loaded ImageDisk image: backing file, header, comment, and the ordered track
/// list.
pub struct Image {
    file: File,
    path: PathBuf,
    header: HeaderInfo,
    comment: Vec<u8>,
    tracks: Vec<Track>,
    geometry: Geometry,
    write_protect: bool,
    read_only: bool,
}

impl Image {
    /// Opens `path`, parses the header and comment, and full-loads every track until a
    /// clean EOF. On any error, every buffer allocated so far is dropped along with the
    /// partially-built track list, and the file handle is closed.
    pub fn open<P: AsRef<Path>>(path: P, read_only: bool) -> ImdResult<Self> {
        let path = path.as_ref().to_path_buf();
        debug!("opening IMD image {path:?} (read_only={read_only})");

        let mut file = OpenOptions::new().read(true).write(!read_only).open(&path)?;
        file.seek(SeekFrom::Start(0))?;

        let header = parse_header(&mut file)?;
        let comment = read_comment(&mut file)?;

        let mut tracks: Vec<Track> = Vec::new();
        loop {
            match read_track_full(&mut file, OPEN_FILL_BYTE)? {
                Some(track) => {
                    let ch = CylHead::new(track.cyl, track.head);
                    if let Some(last) = tracks.last() {
                        let last_ch = CylHead::new(last.cyl, last.head);
                        if ch <= last_ch {
                            return Err(ImdError::InvalidFormat(format!(
                                "track {ch} is out of order or duplicates a prior track"
                            )));
                        }
                    }
                    trace!("loaded track {ch}: {} sectors", track.n());
                    tracks.push(track);
                }
                None => break,
            }
        }

        debug!("opened IMD image {path:?}: {} tracks", tracks.len());
        Ok(Self {
            file,
            path,
            header,
            comment,
            tracks,
            geometry: Geometry::default(),
            write_protect: false,
            read_only,
        })
    }

    /// Releases the backing file handle and every track buffer. Equivalent to dropping
    /// the `Image`; provided as an explicit, named operation for callers that want to
    /// close out an image without relying on scope exit.
    pub fn close(self) {
        debug!("closing IMD image {:?}", self.path);
    }

    pub fn get_geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn get_write_protect(&self) -> bool {
        self.write_protect
    }

    /// Setting `false` (clearing write-protect) fails when the image was opened
    /// read-only, regardless of the previous write-protect state.
    pub fn set_write_protect(&mut self, protect: bool) -> ImdResult<()> {
        if !protect && self.read_only {
            return Err(ImdError::WriteProtected);
        }
        self.write_protect = protect;
        Ok(())
    }

    pub fn get_header_info(&self) -> &HeaderInfo {
        &self.header
    }

    pub fn get_comment(&self) -> &[u8] {
        &self.comment
    }

    pub fn get_num_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn get_track_info(&self, index: usize) -> ImdResult<TrackInfo> {
        let track = self.tracks.get(index).ok_or(ImdError::TrackNotFound)?;
        Ok(TrackInfo {
            mode: track.mode,
            cyl: track.cyl,
            head: track.head,
            hflag: track.hflag,
            sector_size_code: track.sector_size_code,
            sector_size: track.sector_size,
            num_sectors: track.n(),
        })
    }

    /// Linear scan by `(cyl, head)`.
    pub fn find_track_by_ch(&self, cyl: u8, head: u8) -> Option<usize> {
        self.tracks.iter().position(|t| t.cyl == cyl && t.head == head)
    }

    /// Binary-search insertion point for a track at `(cyl, head)`: `Ok(i)` if a track
    /// already occupies that slot, `Err(i)` for the ordered position a new track
    /// belongs at.
    fn insertion_index(&self, cyl: u8, head: u8) -> Result<usize, usize> {
        self.tracks
            .binary_search_by_key(&CylHead::new(cyl, head), |t| CylHead::new(t.cyl, t.head))
    }

    fn check_geometry_ch(&self, cyl: u8, head: u8) -> ImdResult<()> {
        if self.geometry.max_cyl != GEOMETRY_UNUSED && cyl > self.geometry.max_cyl {
            return Err(ImdError::GeometryViolation);
        }
        if self.geometry.max_head != GEOMETRY_UNUSED && head > self.geometry.max_head {
            return Err(ImdError::GeometryViolation);
        }
        Ok(())
    }

    /// A configured `max_spt` rejects any logical sector id greater than it, except that
    /// id `0` is always allowed through regardless of `max_spt` - sector id 0 is used by
    /// some tools as a "don't care" placeholder rather than a real sectors-per-track
    /// count.
    fn check_geometry_sector(&self, logical_id: u8) -> ImdResult<()> {
        if self.geometry.max_spt != GEOMETRY_UNUSED && logical_id > self.geometry.max_spt && logical_id != 0 {
            return Err(ImdError::GeometryViolation);
        }
        Ok(())
    }

    /// Copies `sector_size` bytes of the requested sector's data into `buf`. Fails with
    /// [`ImdError::SectorUnavailable`] (not success-and-junk-bytes) if the sector's flag
    /// is `Unavailable`.
    pub fn read_sector(&self, cyl: u8, head: u8, logical_id: u8, buf: &mut [u8]) -> ImdResult<()> {
        self.check_geometry_ch(cyl, head)?;
        self.check_geometry_sector(logical_id)?;

        let track_idx = self.find_track_by_ch(cyl, head).ok_or(ImdError::TrackNotFound)?;
        let track = &self.tracks[track_idx];
        let phys = track.physical_index_of(logical_id).ok_or(ImdError::SectorNotFound)?;

        if !track.sflag[phys].has_data() {
            return Err(ImdError::SectorUnavailable);
        }
        if buf.len() < track.sector_size {
            return Err(ImdError::BufferTooSmall);
        }
        buf[..track.sector_size].copy_from_slice(track.sector_data(phys));
        Ok(())
    }

    /// Patches a sector's data in place and persists the change. If the sector was
    /// previously compressed and the new data is no longer uniform, the *whole track*
    /// is rewritten uncompressed (compressed records require uniform data); otherwise
    /// only the edited sector's flag is recomputed.
    pub fn write_sector(&mut self, cyl: u8, head: u8, logical_id: u8, buf: &[u8]) -> ImdResult<()> {
        if self.write_protect {
            return Err(ImdError::WriteProtected);
        }
        self.check_geometry_ch(cyl, head)?;
        self.check_geometry_sector(logical_id)?;

        let track_idx = self.find_track_by_ch(cyl, head).ok_or(ImdError::TrackNotFound)?;
        let phys = {
            let track = &self.tracks[track_idx];
            if buf.len() != track.sector_size {
                return Err(ImdError::SectorSizeMismatch);
            }
            track.physical_index_of(logical_id).ok_or(ImdError::SectorNotFound)?
        };

        let original_flag = self.tracks[track_idx].sflag[phys];
        let was_compressed = original_flag.is_compressed();

        self.tracks[track_idx].sector_data_mut(phys).copy_from_slice(buf);

        let (new_uniform, _) = is_uniform(self.tracks[track_idx].sector_data(phys));
        let force_whole_track_decompress = was_compressed && !new_uniform;

        let options = WriteOptions {
            compression: if force_whole_track_decompress {
                CompressionMode::ForceDecompress
            } else {
                CompressionMode::AsRead
            },
            ..Default::default()
        };

        trace!(
            "write_sector {cyl}/{head}/{logical_id}: was_compressed={was_compressed} new_uniform={new_uniform} \
             force_decompress={force_whole_track_decompress}"
        );

        self.rewrite(track_idx, &options)?;

        if force_whole_track_decompress {
            for flag in self.tracks[track_idx].sflag.iter_mut() {
                *flag = flag.with_compressed(false);
            }
        } else {
            let flag = &mut self.tracks[track_idx].sflag[phys];
            *flag = derive_final_flag(*flag, new_uniform, &options);
        }

        Ok(())
    }

    /// Creates or replaces the track at `(cyl, head)`, filled entirely with
    /// `fill_byte`, then immediately rewrites the file with that track compressed
    /// (since a uniformly-filled track is always compressible). `cmap`/`hmap` default
    /// to the track's cylinder/head when omitted.
    #[allow(clippy::too_many_arguments)]
    pub fn write_track(
        &mut self,
        cyl: u8,
        head: u8,
        n: usize,
        sector_size_code: u8,
        fill_byte: u8,
        smap: Vec<u8>,
        cmap: Option<Vec<u8>>,
        hmap: Option<Vec<u8>>,
    ) -> ImdResult<()> {
        if self.write_protect {
            return Err(ImdError::WriteProtected);
        }
        self.check_geometry_ch(cyl, head)?;

        if smap.len() != n {
            return Err(ImdError::InvalidArgument("smap length must equal n".into()));
        }
        if let Some(ref c) = cmap {
            if c.len() != n {
                return Err(ImdError::InvalidArgument("cmap length must equal n".into()));
            }
        }
        if let Some(ref h) = hmap {
            if h.len() != n {
                return Err(ImdError::InvalidArgument("hmap length must equal n".into()));
            }
        }
        code_to_bytes(sector_size_code)
            .ok_or_else(|| ImdError::InvalidArgument(format!("unrecognized sector-size code {sector_size_code}")))?;

        let new_track = new_filled_track(
            DEFAULT_WRITE_TRACK_MODE,
            cyl,
            head,
            sector_size_code,
            fill_byte,
            smap,
            cmap,
            hmap,
        )?;

        let (index, was_replace) = match self.insertion_index(cyl, head) {
            Ok(idx) => (idx, true),
            Err(idx) => (idx, false),
        };

        if was_replace {
            debug!("write_track: replacing existing track at ({cyl}, {head})");
            self.tracks[index] = new_track;
        } else {
            debug!("write_track: inserting new track at ({cyl}, {head}), position {index}");
            self.tracks.insert(index, new_track);
        }

        let options = WriteOptions {
            compression: CompressionMode::ForceCompress,
            ..Default::default()
        };
        match self.rewrite(index, &options) {
            Ok(()) => {
                for flag in self.tracks[index].sflag.iter_mut() {
                    *flag = flag.with_compressed(true);
                }
                Ok(())
            }
            Err(e) => {
                if !was_replace {
                    // Roll back the speculative insert: a freshly-inserted track that
                    // failed to persist should leave the in-memory track list exactly as
                    // it was before this call.
                    self.tracks.remove(index);
                }
                Err(e)
            }
        }
    }

    /// The whole-file rewrite + truncate pipeline: seeks to 0, emits the
    /// header, comment, and every track (the track at `modified_index` using
    /// `modified_options`, every other track using default options), flushes, then
    /// truncates the file to the new logical length. A failure to query the stream
    /// position or truncate after a successful emission is a non-fatal warning - the
    /// on-disk data is correct but trailing garbage may remain.
    fn rewrite(&mut self, modified_index: usize, modified_options: &WriteOptions) -> ImdResult<()> {
        self.file.seek(SeekFrom::Start(0))?;
        emit_header(&self.header, &mut self.file)?;
        emit_comment(&self.comment, &mut self.file)?;

        let default_options = WriteOptions::default();
        for (i, track) in self.tracks.iter().enumerate() {
            let options = if i == modified_index { modified_options } else { &default_options };
            emit_track(track, options, &mut self.file)?;
        }
        self.file.flush()?;

        match self.file.stream_position() {
            Ok(len) => {
                if let Err(e) = self.file.set_len(len) {
                    warn!(
                        "failed to truncate {:?} to {len} bytes after rewrite: {e} (on-disk data is correct; \
                         trailing garbage may remain)",
                        self.path
                    );
                }
            }
            Err(e) => {
                warn!("failed to query stream position after rewriting {:?}: {e}", self.path);
            }
        }
        self.file.flush()?;
        Ok(())
    }
}
