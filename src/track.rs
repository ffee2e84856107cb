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

//! The track codec: parses and emits a single IMD track record, and the track
//! transforms (uniformity test, interleave estimation/application) that operate on a
//! loaded [`Track`].
//!
//! A track record is a fixed 5-byte header, an `smap` of length `n`, optional `cmap`
//! and `hmap` of length `n`, then `n` sector-data records. Three read entry points
//! share the header-and-maps parser and differ only in what they do with the
//! sector-data records: [`skip_track_record`] (no allocation), [`read_track_flags`]
//! (collects flags only - used by the consistency checker), and [`read_track_full`]
//! (materializes sector data - used by [`crate::image::Image::open`]).

use std::io::{Read, Seek, SeekFrom, Write};

use binrw::{binrw, BinRead};

use crate::error::{ImdError, ImdResult};
use crate::io::SeekGuard;
use crate::sector_flag::SectorFlag;
use crate::sector_size::code_to_bytes;
use crate::write_options::{derive_final_flag, CompressionMode, Interleave, WriteOptions};

pub const CYL_MAP_PRESENT: u8 = 0x80;
pub const HEAD_MAP_PRESENT: u8 = 0x40;
/// The head byte value that signals the "proposed extension" per-sector size-map
/// variant, where each sector carries its own size instead of sharing one track-wide
/// size code. Implementing it for real would mean a track's data buffer is no longer
/// `n * sector_size` bytes, so this crate detects the sentinel during header parsing
/// and rejects it rather than relaxing that invariant.
pub const SECTOR_SIZE_MAP_SENTINEL: u8 = 0xFF;

#[binrw]
#[derive(Debug, Clone, Copy)]
struct TrackHeaderBytes {
    mode: u8,
    cyl: u8,
    head_byte: u8,
    n: u8,
    size_code: u8,
}

/// A single loaded IMD track: the fixed header fields, the four parallel per-sector
/// maps, the sector-flag vector, and (when [`Track::loaded`] is true) the contiguous
/// sector data buffer.
#[derive(Debug, Clone)]
pub struct Track {
    pub mode: u8,
    pub cyl: u8,
    pub head: u8,
    /// The raw header byte: head number in the low nibble, cylinder-map/head-map
    /// presence in bits 7/6. Kept verbatim (rather than re-derived at emit time) so a
    /// round-trip preserves whether the source file carried an explicit cmap/hmap.
    pub hflag: u8,
    pub sector_size_code: u8,
    pub sector_size: usize,
    pub smap: Vec<u8>,
    pub cmap: Vec<u8>,
    pub hmap: Vec<u8>,
    pub sflag: Vec<SectorFlag>,
    pub data: Vec<u8>,
    pub loaded: bool,
}

impl Track {
    pub fn n(&self) -> usize {
        self.smap.len()
    }

    pub fn has_cylinder_map(&self) -> bool {
        self.hflag & CYL_MAP_PRESENT != 0
    }

    pub fn has_head_map(&self) -> bool {
        self.hflag & HEAD_MAP_PRESENT != 0
    }

    /// Physical index of the sector whose logical id (as recorded in `smap`) is
    /// `logical_id`, or `None` if no sector on this track has that id.
    pub fn physical_index_of(&self, logical_id: u8) -> Option<usize> {
        self.smap.iter().position(|&id| id == logical_id)
    }

    pub fn sector_data(&self, physical_index: usize) -> &[u8] {
        let start = physical_index * self.sector_size;
        &self.data[start..start + self.sector_size]
    }

    pub fn sector_data_mut(&mut self, physical_index: usize) -> &mut [u8] {
        let start = physical_index * self.sector_size;
        let size = self.sector_size;
        &mut self.data[start..start + size]
    }
}

fn validate_header(header: &TrackHeaderBytes) -> ImdResult<()> {
    if header.head_byte == SECTOR_SIZE_MAP_SENTINEL {
        return Err(ImdError::InvalidFormat(
            "track header uses the proposed per-sector size-map extension (0xFF head byte), \
             which this crate does not support"
                .into(),
        ));
    }
    if header.mode >= 6 {
        return Err(ImdError::InvalidFormat(format!("invalid track mode {}", header.mode)));
    }
    if (header.head_byte & 0x0F) > 1 {
        return Err(ImdError::InvalidFormat(format!(
            "invalid head number {}",
            header.head_byte & 0x0F
        )));
    }
    if header.size_code >= 7 {
        return Err(ImdError::InvalidFormat(format!(
            "invalid sector-size code {}",
            header.size_code
        )));
    }
    Ok(())
}

fn read_exact_checked<R: Read>(source: &mut R, buf: &mut [u8], what: &str) -> ImdResult<()> {
    source.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => {
            ImdError::InvalidFormat(format!("unexpected end of file reading {what}"))
        }
        _ => ImdError::Io(e.to_string()),
    })
}

/// Reads the fixed 5-byte track header. Returns `Ok(None)` only when zero bytes could
/// be read before EOF - a clean EOF at a record boundary, which is a success, not an
/// error. Any other short read (1..=4 bytes available) is a format error.
fn read_track_header_bytes<R: Read>(source: &mut R) -> ImdResult<Option<TrackHeaderBytes>> {
    let mut buf = [0u8; 5];
    let mut filled = 0;
    loop {
        match source.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
        if filled == 5 {
            break;
        }
    }
    if filled == 0 {
        return Ok(None);
    }
    if filled < 5 {
        return Err(ImdError::InvalidFormat(
            "unexpected end of file reading track header".into(),
        ));
    }
    Ok(Some(TrackHeaderBytes::read_le(&mut std::io::Cursor::new(&buf[..]))?))
}

struct ParsedHeader {
    header: TrackHeaderBytes,
    smap: Vec<u8>,
    cmap: Vec<u8>,
    hmap: Vec<u8>,
    sector_size: usize,
}

fn parse_header_and_maps<R: Read>(source: &mut R) -> ImdResult<Option<ParsedHeader>> {
    let header = match read_track_header_bytes(source)? {
        Some(h) => h,
        None => return Ok(None),
    };
    validate_header(&header)?;

    let n = header.n as usize;
    let cyl = header.cyl;
    let head = header.head_byte & 0x0F;

    let mut smap = vec![0u8; n];
    read_exact_checked(source, &mut smap, "sector number map")?;

    let mut cmap = vec![cyl; n];
    if header.head_byte & CYL_MAP_PRESENT != 0 {
        read_exact_checked(source, &mut cmap, "cylinder map")?;
    }

    let mut hmap = vec![head; n];
    if header.head_byte & HEAD_MAP_PRESENT != 0 {
        read_exact_checked(source, &mut hmap, "head map")?;
    }

    let sector_size = code_to_bytes(header.size_code).expect("size code validated above");

    Ok(Some(ParsedHeader {
        header,
        smap,
        cmap,
        hmap,
        sector_size,
    }))
}

fn sector_payload_len(flag: SectorFlag, sector_size: usize) -> usize {
    match flag {
        SectorFlag::Unavailable => 0,
        SectorFlag::Normal { compressed: true, .. } => 1,
        SectorFlag::Normal { compressed: false, .. } => sector_size,
    }
}

/// Header-only read entry point: skips every sector-data record without allocating a
/// data buffer. Returns `Ok(false)` at a clean EOF (no more tracks), `Ok(true)` after
/// successfully skipping one track record.
pub fn skip_track_record<R: Read + Seek>(source: &mut R) -> ImdResult<bool> {
    let mut guard = SeekGuard::new(source)?;
    let result = (|| -> ImdResult<bool> {
        let stream = guard.get_mut();
        let parsed = match parse_header_and_maps(stream)? {
            Some(p) => p,
            None => return Ok(false),
        };
        let mut scratch = vec![0u8; parsed.sector_size.max(1)];
        for _ in 0..parsed.header.n {
            let mut flag_byte = [0u8; 1];
            read_exact_checked(stream, &mut flag_byte, "sector-data flag")?;
            let flag = SectorFlag::from_byte(flag_byte[0])?;
            let len = sector_payload_len(flag, parsed.sector_size);
            if len > 0 {
                read_exact_checked(stream, &mut scratch[..len], "sector-data payload")?;
            }
        }
        Ok(true)
    })();
    if result.is_ok() {
        guard.disarm();
    }
    result
}

/// The header, maps, and per-sector flags of a track, without the data buffer. Used
/// by the consistency checker.
pub struct TrackFlags {
    pub mode: u8,
    pub cyl: u8,
    pub head: u8,
    pub hflag: u8,
    pub sector_size_code: u8,
    pub sector_size: usize,
    pub smap: Vec<u8>,
    pub cmap: Vec<u8>,
    pub hmap: Vec<u8>,
    pub sflag: Vec<SectorFlag>,
}

/// Header-and-flags read entry point: records each sector's flag but skips (does not
/// materialize) the sector data. Returns `Ok(None)` at a clean EOF.
pub fn read_track_flags<R: Read + Seek>(source: &mut R) -> ImdResult<Option<TrackFlags>> {
    let mut guard = SeekGuard::new(source)?;
    let result = (|| -> ImdResult<Option<TrackFlags>> {
        let stream = guard.get_mut();
        let parsed = match parse_header_and_maps(stream)? {
            Some(p) => p,
            None => return Ok(None),
        };
        let mut scratch = vec![0u8; parsed.sector_size.max(1)];
        let mut sflag = Vec::with_capacity(parsed.header.n as usize);
        for _ in 0..parsed.header.n {
            let mut flag_byte = [0u8; 1];
            read_exact_checked(stream, &mut flag_byte, "sector-data flag")?;
            let flag = SectorFlag::from_byte(flag_byte[0])?;
            let len = sector_payload_len(flag, parsed.sector_size);
            if len > 0 {
                read_exact_checked(stream, &mut scratch[..len], "sector-data payload")?;
            }
            sflag.push(flag);
        }
        Ok(Some(TrackFlags {
            mode: parsed.header.mode,
            cyl: parsed.header.cyl,
            head: parsed.header.head_byte & 0x0F,
            hflag: parsed.header.head_byte,
            sector_size_code: parsed.header.size_code,
            sector_size: parsed.sector_size,
            smap: parsed.smap,
            cmap: parsed.cmap,
            hmap: parsed.hmap,
            sflag,
        }))
    })();
    if result.is_ok() {
        guard.disarm();
    }
    result
}

/// Full-load read entry point: materializes the sector data buffer, filling
/// unavailable sectors with `fill_byte`. Returns `Ok(None)` at a clean EOF.
pub fn read_track_full<R: Read + Seek>(source: &mut R, fill_byte: u8) -> ImdResult<Option<Track>> {
    let mut guard = SeekGuard::new(source)?;
    let result = (|| -> ImdResult<Option<Track>> {
        let stream = guard.get_mut();
        let parsed = match parse_header_and_maps(stream)? {
            Some(p) => p,
            None => return Ok(None),
        };
        let n = parsed.header.n as usize;
        let mut data = vec![0u8; n * parsed.sector_size];
        let mut sflag = Vec::with_capacity(n);
        for i in 0..n {
            let mut flag_byte = [0u8; 1];
            read_exact_checked(stream, &mut flag_byte, "sector-data flag")?;
            let flag = SectorFlag::from_byte(flag_byte[0])?;
            let slot = &mut data[i * parsed.sector_size..(i + 1) * parsed.sector_size];
            match flag {
                SectorFlag::Unavailable => slot.fill(fill_byte),
                SectorFlag::Normal { compressed: true, .. } => {
                    let mut b = [0u8; 1];
                    read_exact_checked(stream, &mut b, "compressed sector byte")?;
                    slot.fill(b[0]);
                }
                SectorFlag::Normal { compressed: false, .. } => {
                    read_exact_checked(stream, slot, "sector data")?;
                }
            }
            sflag.push(flag);
        }
        Ok(Some(Track {
            mode: parsed.header.mode,
            cyl: parsed.header.cyl,
            head: parsed.header.head_byte & 0x0F,
            hflag: parsed.header.head_byte,
            sector_size_code: parsed.header.size_code,
            sector_size: parsed.sector_size,
            smap: parsed.smap,
            cmap: parsed.cmap,
            hmap: parsed.hmap,
            sflag,
            data,
            loaded: true,
        }))
    })();
    if result.is_ok() {
        guard.disarm();
    }
    result
}

/// Returns `(true, b)` iff every byte of `data` equals `b`. Empty buffers are uniform
/// by convention.
pub fn is_uniform(data: &[u8]) -> (bool, u8) {
    match data.first() {
        None => (true, 0),
        Some(&first) => (data.iter().all(|&b| b == first), first),
    }
}

/// Estimate the interleave factor a track was most likely written with, by looking at
/// the physical distance between logically-adjacent sectors. Returns 1 when `n < 2` or
/// no positive distance occurs (e.g. a single-sector track, or one where every sector
/// is already contiguous).
pub fn best_guess_interleave(track: &Track) -> u8 {
    best_guess_interleave_from_smap(&track.smap)
}

/// The same estimator as [`best_guess_interleave`], operating directly on a track's
/// `smap` - used by the consistency checker, which only header-and-flags-loads tracks
/// and never materializes a full [`Track`].
pub fn best_guess_interleave_from_smap(smap: &[u8]) -> u8 {
    let n = smap.len();
    if n < 2 {
        return 1;
    }
    let mut logical_order: Vec<usize> = (0..n).collect();
    logical_order.sort_by_key(|&phys| smap[phys]);

    let mut counts: std::collections::BTreeMap<usize, usize> = std::collections::BTreeMap::new();
    for k in 0..n {
        let cur_phys = logical_order[k];
        let next_phys = logical_order[(k + 1) % n];
        let distance = (next_phys + n - cur_phys) % n;
        if distance > 0 {
            *counts.entry(distance).or_insert(0) += 1;
        }
    }

    let mut best_distance = 0usize;
    let mut best_count = 0usize;
    // BTreeMap iterates keys (distances) ascending, so the first distance to reach the
    // maximum count is necessarily the smallest one achieving it.
    for (&distance, &count) in counts.iter() {
        if count > best_count {
            best_count = count;
            best_distance = distance;
        }
    }

    if best_count == 0 {
        1
    } else {
        best_distance as u8
    }
}

/// Permutes `smap`, `cmap`, `hmap`, `sflag`, and `data` in place so that
/// logically-sorted sectors land at physical positions `0, k mod n, 2k mod n, ...`,
/// stepping to the next free physical slot on collision. A no-op when `n < 2`.
pub fn apply_interleave(track: &mut Track, k: u8) {
    let n = track.smap.len();
    if n < 2 {
        return;
    }
    let stride = (k as usize) % n;

    let mut logical_order: Vec<usize> = (0..n).collect();
    logical_order.sort_by_key(|&phys| track.smap[phys]);

    let mut occupied = vec![false; n];
    let mut new_physical_of_rank = vec![0usize; n];
    for rank in 0..n {
        let mut candidate = (rank * stride) % n;
        while occupied[candidate] {
            candidate = (candidate + 1) % n;
        }
        occupied[candidate] = true;
        new_physical_of_rank[rank] = candidate;
    }

    let mut new_smap = vec![0u8; n];
    let mut new_cmap = vec![0u8; n];
    let mut new_hmap = vec![0u8; n];
    let mut new_sflag = vec![SectorFlag::Unavailable; n];
    let mut new_data = vec![0u8; track.data.len()];

    for rank in 0..n {
        let src = logical_order[rank];
        let dst = new_physical_of_rank[rank];
        new_smap[dst] = track.smap[src];
        new_cmap[dst] = track.cmap[src];
        new_hmap[dst] = track.hmap[src];
        new_sflag[dst] = track.sflag[src];
        let src_range = src * track.sector_size..(src + 1) * track.sector_size;
        let dst_range = dst * track.sector_size..(dst + 1) * track.sector_size;
        new_data[dst_range].copy_from_slice(&track.data[src_range]);
    }

    track.smap = new_smap;
    track.cmap = new_cmap;
    track.hmap = new_hmap;
    track.sflag = new_sflag;
    track.data = new_data;
}

/// Emits a loaded track per `options`: interleave (if requested), mode translation,
/// per-sector flag re-derivation, then the header, maps, and sector-data records.
pub fn emit_track<W: Write>(track: &Track, options: &WriteOptions, out: &mut W) -> ImdResult<()> {
    let n = track.n();

    let interleaved_storage: Track;
    let working: &Track = if matches!(options.interleave, Interleave::AsRead) || n < 2 {
        track
    } else {
        let factor = match options.interleave {
            Interleave::Factor(k) => k,
            Interleave::BestGuess => best_guess_interleave(track),
            Interleave::AsRead => unreachable!(),
        };
        let mut copy = track.clone();
        apply_interleave(&mut copy, factor);
        interleaved_storage = copy;
        &interleaved_storage
    };

    let written_mode = options.mode_translation[working.mode as usize % 6];

    let mut final_flags = Vec::with_capacity(n);
    for i in 0..n {
        let (uniform, _) = is_uniform(working.sector_data(i));
        final_flags.push(derive_final_flag(working.sflag[i], uniform, options));
    }

    out.write_all(&[
        written_mode,
        working.cyl,
        working.hflag,
        working.smap.len() as u8,
        working.sector_size_code,
    ])?;
    out.write_all(&working.smap)?;
    if working.has_cylinder_map() {
        out.write_all(&working.cmap)?;
    }
    if working.has_head_map() {
        out.write_all(&working.hmap)?;
    }

    for i in 0..n {
        let flag = final_flags[i];
        out.write_all(&[flag.to_byte()])?;
        match flag {
            SectorFlag::Unavailable => {}
            SectorFlag::Normal { compressed: true, .. } => {
                out.write_all(&working.sector_data(i)[..1])?;
            }
            SectorFlag::Normal { compressed: false, .. } => {
                out.write_all(working.sector_data(i))?;
            }
        }
    }

    Ok(())
}

/// Build a brand-new track filled with `fill_byte` in every sector, as produced by
/// `Image::write_track` before the initial force-compress rewrite. All sflags start
/// as plain normal (uncompressed); the caller is expected to immediately rewrite with
/// [`CompressionMode::ForceCompress`] and then mark the in-memory sflags compressed to
/// match what that rewrite put on disk.
pub fn new_filled_track(
    mode: u8,
    cyl: u8,
    head: u8,
    sector_size_code: u8,
    fill_byte: u8,
    smap: Vec<u8>,
    cmap: Option<Vec<u8>>,
    hmap: Option<Vec<u8>>,
) -> ImdResult<Track> {
    let n = smap.len();
    let sector_size = code_to_bytes(sector_size_code)
        .ok_or_else(|| ImdError::InvalidArgument(format!("unrecognized sector-size code {sector_size_code}")))?;

    let mut hflag = head & 0x0F;
    let cmap = match cmap {
        Some(c) => {
            hflag |= CYL_MAP_PRESENT;
            c
        }
        None => vec![cyl; n],
    };
    let hmap = match hmap {
        Some(h) => {
            hflag |= HEAD_MAP_PRESENT;
            h
        }
        None => vec![head; n],
    };

    Ok(Track {
        mode,
        cyl,
        head,
        hflag,
        sector_size_code,
        sector_size,
        smap,
        cmap,
        hmap,
        sflag: vec![SectorFlag::NORMAL; n],
        data: vec![fill_byte; n * sector_size],
        loaded: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write_options::{CompressionMode, WriteOptions};
    use std::io::Cursor;

    fn sample_track(fill: u8, n: usize, size_code: u8) -> Track {
        new_filled_track(
            5,
            0,
            0,
            size_code,
            fill,
            (1..=n as u8).collect(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn is_uniform_true_for_empty_slice() {
        assert_eq!(is_uniform(&[]), (true, 0));
    }

    #[test]
    fn is_uniform_detects_mixed_bytes() {
        assert_eq!(is_uniform(&[1, 1, 1]), (true, 1));
        assert_eq!(is_uniform(&[1, 1, 2]), (false, 1));
    }

    #[test]
    fn force_compress_then_parse_round_trips_uniform_track() {
        let track = sample_track(0xE5, 4, 0);
        let options = WriteOptions {
            compression: CompressionMode::ForceCompress,
            ..Default::default()
        };
        let mut buf = Vec::new();
        emit_track(&track, &options, &mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let parsed = read_track_full(&mut cursor, 0).unwrap().unwrap();
        assert_eq!(parsed.smap, track.smap);
        assert_eq!(parsed.data, track.data);
        assert!(parsed.sflag.iter().all(|f| f.is_compressed()));
    }

    #[test]
    fn force_decompress_then_parse_has_no_compressed_sflags() {
        let track = sample_track(0xE5, 4, 0);
        let options = WriteOptions {
            compression: CompressionMode::ForceDecompress,
            ..Default::default()
        };
        let mut buf = Vec::new();
        emit_track(&track, &options, &mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        let parsed = read_track_full(&mut cursor, 0).unwrap().unwrap();
        assert_eq!(parsed.data, track.data);
        assert!(parsed.sflag.iter().all(|f| !f.is_compressed()));
    }

    #[test]
    fn apply_interleave_preserves_logical_sector_contents() {
        let mut track = sample_track(0, 4, 0);
        for (i, byte) in track.data.chunks_mut(track.sector_size).enumerate() {
            byte.fill(i as u8 + 1);
        }
        let before: Vec<(u8, Vec<u8>)> = (1..=4u8)
            .map(|id| {
                let phys = track.physical_index_of(id).unwrap();
                (id, track.sector_data(phys).to_vec())
            })
            .collect();

        apply_interleave(&mut track, 2);

        for (id, data) in before {
            let phys = track.physical_index_of(id).unwrap();
            assert_eq!(track.sector_data(phys), data.as_slice());
        }
    }

    #[test]
    fn best_guess_interleave_is_one_for_single_sector() {
        let track = sample_track(0, 1, 0);
        assert_eq!(best_guess_interleave(&track), 1);
    }

    #[test]
    fn best_guess_interleave_detects_stride_two() {
        let mut track = sample_track(0, 4, 0);
        apply_interleave(&mut track, 2);
        assert_eq!(best_guess_interleave(&track), 2);
    }

    #[test]
    fn clean_eof_at_record_boundary_yields_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(read_track_full(&mut cursor, 0).unwrap().is_none());
        assert!(read_track_flags(&mut cursor).unwrap().is_none());
        assert!(!skip_track_record(&mut cursor).unwrap());
    }

    #[test]
    fn eof_mid_record_is_an_error_and_rewinds() {
        let mut buf = Vec::new();
        let track = sample_track(0xAA, 2, 0);
        emit_track(&track, &WriteOptions::default(), &mut buf).unwrap();
        buf.truncate(buf.len() - 1);
        let mut cursor = Cursor::new(buf);
        let before = cursor.stream_position().unwrap();
        assert!(read_track_full(&mut cursor, 0).is_err());
        assert_eq!(cursor.stream_position().unwrap(), before);
    }

    #[test]
    fn sector_size_map_sentinel_is_rejected() {
        // mode, cyl, head_byte=0xFF, n, size_code
        let buf = vec![5u8, 0, 0xFF, 1, 0];
        let mut cursor = Cursor::new(buf);
        assert!(read_track_full(&mut cursor, 0).is_err());
    }
}
