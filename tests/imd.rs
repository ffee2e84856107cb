//! Black-box, file-level integration tests driven through
//! [`imagedisk::image::Image`] against a real temporary file so the
//! truncate-on-rewrite path is exercised against the filesystem, not just an
//! in-memory cursor.

use std::io::Write;

use imagedisk::checker::{check_image, CheckOptions};
use imagedisk::error::ImdError;
use imagedisk::image::Image;

fn init() {
    match env_logger::builder().is_test(true).try_init() {
        Ok(_) => log::debug!("logger initialized for test"),
        Err(e) => eprintln!("failed to initialize logger: {e}"),
    }
}

/// Writes a minimal, well-formed IMD file with one track (cyl 0, head 0, mode 5,
/// n=4, size code 0 => 128 bytes/sector), every sector filled with `fill`.
fn write_one_track_file(path: &std::path::Path, fill: u8) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(b"IMD 1.19: 01/01/2020 00:00:00\r\n").unwrap();
    file.write_all(b"test comment\x1A").unwrap();
    file.write_all(&[5, 0, 0, 4, 0]).unwrap(); // mode, cyl, head, n, size_code
    file.write_all(&[1, 2, 3, 4]).unwrap(); // smap
    for _ in 0..4 {
        file.write_all(&[0x02]).unwrap(); // compressed, normal
        file.write_all(&[fill]).unwrap();
    }
    file.flush().unwrap();
}

#[test]
fn scenario_1_open_reports_compressed_uniform_track() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario1.imd");
    write_one_track_file(&path, 0xE5);

    let image = Image::open(&path, true).unwrap();
    assert_eq!(image.get_num_tracks(), 1);
    let info = image.get_track_info(0).unwrap();
    assert_eq!(info.num_sectors, 4);
    assert!(!image.get_header_info().version.is_empty());

    for id in 1..=4u8 {
        let mut buf = [0u8; 128];
        image.read_sector(0, 0, id, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == 0xE5));
    }
}

#[test]
fn scenario_2_writing_non_uniform_sector_decompresses_the_track() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario2.imd");
    write_one_track_file(&path, 0xE5);

    let mut image = Image::open(&path, false).unwrap();
    let mut buf = [0xE5u8; 128];
    buf[0] = 0xAA;
    image.write_sector(0, 0, 2, &buf).unwrap();
    drop(image);

    let reopened = Image::open(&path, true).unwrap();
    let mut readback = [0u8; 128];
    reopened.read_sector(0, 0, 2, &mut readback).unwrap();
    assert_eq!(readback, buf);

    // The untouched sectors must still read back with their original fill byte - only
    // the flag representation (compressed -> normal), not the data, changed track-wide.
    for id in [1u8, 3, 4] {
        let mut other = [0u8; 128];
        reopened.read_sector(0, 0, id, &mut other).unwrap();
        assert!(other.iter().all(|&b| b == 0xE5));
    }
}

#[test]
fn scenario_3_comment_excludes_terminator() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario3.imd");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"IMD 1.19: 01/01/2020 00:00:00\r\n").unwrap();
    file.write_all(b"hello\x1A").unwrap();
    drop(file);

    let image = Image::open(&path, true).unwrap();
    assert_eq!(image.get_comment(), b"hello");
    assert_eq!(image.get_comment().len(), 5);
}

#[test]
fn scenario_4_write_track_sits_between_existing_tracks_in_order() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario4.imd");
    write_one_track_file(&path, 0xE5); // (0, 0)

    let mut image = Image::open(&path, false).unwrap();
    image
        .write_track(1, 0, 9, 1, 0x00, (1..=9).collect(), None, None)
        .unwrap();
    drop(image);

    let reopened = Image::open(&path, true).unwrap();
    assert_eq!(reopened.get_num_tracks(), 2);
    assert_eq!(reopened.find_track_by_ch(0, 0), Some(0));
    assert_eq!(reopened.find_track_by_ch(1, 0), Some(1));
    let info = reopened.get_track_info(1).unwrap();
    assert_eq!(info.hflag & 0xC0, 0, "neither cmap nor hmap should be recorded as present");
}

#[test]
fn scenario_5_write_protect_blocks_mutation_and_readonly_blocks_clearing() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario5.imd");
    write_one_track_file(&path, 0xE5);

    let mut image = Image::open(&path, false).unwrap();
    image.set_write_protect(true).unwrap();
    let buf = [0u8; 128];
    assert!(matches!(
        image.write_sector(0, 0, 1, &buf),
        Err(ImdError::WriteProtected)
    ));

    let mut readonly = Image::open(&path, true).unwrap();
    assert!(matches!(
        readonly.set_write_protect(false),
        Err(ImdError::WriteProtected)
    ));
}

#[test]
fn scenario_6_truncated_mid_sector_fails_to_open_cleanly() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario6.imd");
    write_one_track_file(&path, 0xE5);

    let mut bytes = std::fs::read(&path).unwrap();
    // Truncate into the middle of the last sector's data record.
    bytes.truncate(bytes.len() - 3);
    std::fs::write(&path, &bytes).unwrap();

    assert!(Image::open(&path, true).is_err());
}

#[test]
fn round_trip_law_rewrite_preserves_compressed_uniform_sectors() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip.imd");
    write_one_track_file(&path, 0xE5);

    let before = std::fs::read(&path).unwrap();
    let mut image = Image::open(&path, false).unwrap();
    // An immediate no-op edit (write the same bytes back) forces a rewrite without
    // changing sector content, to exercise the rewrite pipeline.
    let mut buf = [0xE5u8; 128];
    image.write_sector(0, 0, 1, &mut buf).unwrap();
    drop(image);
    let after = std::fs::read(&path).unwrap();

    // Header timestamp is regenerated on every rewrite, so bytes differ there, but the
    // comment and the sector records (still uniformly 0xE5, still compressed) should be
    // identical in shape - same total length at minimum, since compression is preserved.
    assert_eq!(before.len(), after.len());
}

#[test]
fn consistency_checker_reports_clean_stats_for_a_well_formed_file() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checked.imd");
    write_one_track_file(&path, 0xAA);

    let (mask, stats) = check_image(&path, &CheckOptions::default()).unwrap();
    assert!(mask.is_empty());
    assert_eq!(stats.tracks_read, 1);
    assert_eq!(stats.total_sectors, 4);
    assert_eq!(stats.compressed_sectors, 4);
    assert_eq!(stats.detected_interleave, Some(1));
}

#[test]
fn zero_sector_track_is_legal() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.imd");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"IMD 1.19: 01/01/2020 00:00:00\r\n").unwrap();
    file.write_all(b"\x1A").unwrap();
    file.write_all(&[5, 0, 0, 0, 0]).unwrap(); // n = 0: no maps, no sector records
    drop(file);

    let image = Image::open(&path, true).unwrap();
    assert_eq!(image.get_num_tracks(), 1);
    let info = image.get_track_info(0).unwrap();
    assert_eq!(info.num_sectors, 0);
}
