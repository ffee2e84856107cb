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

//! The ASCII header line: `IMD <version>: DD/MM/YYYY hh:mm:ss\r\n`. Parsing is
//! tolerant of CR/LF or LF/CR line termination and degrades to an "Unknown" version
//! and a zeroed timestamp on anything past the mandatory `IMD ` prefix that doesn't
//! match, rather than failing the whole open.

use std::io::Read;

use chrono::Local;
use log::{debug, trace, warn};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{ImdError, ImdResult};

/// A possibly-degraded timestamp parsed from the header line. All-zero when the line
/// was missing a timestamp, or carried one outside its calendar range (month 13,
/// hour 25, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    fn in_calendar_range(&self) -> bool {
        (1..=31).contains(&self.day)
            && (1..=12).contains(&self.month)
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59
    }
}

/// The decoded ASCII header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// The tool-version string between `IMD ` and the first `:`, truncated to 31
    /// characters. "Unknown" when the line could not be fully parsed.
    pub version: String,
    pub timestamp: Timestamp,
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self {
            version: "Unknown".to_string(),
            timestamp: Timestamp::default(),
        }
    }
}

const MANDATORY_PREFIX: &[u8] = b"IMD ";
const MAX_VERSION_LEN: usize = 31;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^IMD (?P<version>.*?): *(?P<day>\d{1,2})/(?P<month>\d{1,2})/(?P<year>\d{2,4}) +(?P<hour>\d{1,2}):(?P<minute>\d{1,2}):(?P<second>\d{1,2})\s*$",
        )
        .expect("static header regex is valid")
    })
}

/// Reads one line of the ASCII header, terminated by `\r\n` or `\n\r` (either order
/// tolerated), from `source`, byte by byte so no more of the stream is consumed than
/// the line itself plus its terminator.
fn read_header_line<R: Read>(source: &mut R) -> ImdResult<Vec<u8>> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte)? {
            0 => {
                if line.is_empty() {
                    return Err(ImdError::InvalidFormat("empty IMD file".into()));
                }
                break;
            }
            _ => {
                let b = byte[0];
                if b == b'\n' || b == b'\r' {
                    // Consume a lone trailing partner byte (CRLF or LFCR) if present.
                    let mut next = [0u8; 1];
                    match source.read(&mut next)? {
                        0 => {}
                        _ => {
                            let partner = if b == b'\n' { b'\r' } else { b'\n' };
                            if next[0] != partner {
                                return Err(ImdError::InvalidFormat(
                                    "header line terminator is not CR/LF or LF/CR".into(),
                                ));
                            }
                        }
                    }
                    break;
                }
                line.push(b);
            }
        }
    }
    Ok(line)
}

/// Parses the mandatory `IMD ` prefix and, on success, the rest of the header line.
/// A missing prefix is a fatal format error; anything else that fails to match
/// degrades to [`HeaderInfo::default`].
pub fn parse_header<R: Read>(source: &mut R) -> ImdResult<HeaderInfo> {
    let line = read_header_line(source)?;
    if line.len() < MANDATORY_PREFIX.len() || &line[..MANDATORY_PREFIX.len()] != MANDATORY_PREFIX {
        return Err(ImdError::InvalidFormat(
            "file does not begin with the mandatory 'IMD ' signature".into(),
        ));
    }

    let text = String::from_utf8_lossy(&line);
    let Some(captures) = header_regex().captures(&text) else {
        warn!("IMD header line did not match the expected version/timestamp layout, degrading to Unknown/zero");
        return Ok(HeaderInfo::default());
    };

    let version = &captures["version"];
    let version = if version.is_empty() {
        "Unknown".to_string()
    } else {
        version.chars().take(MAX_VERSION_LEN).collect()
    };

    let parse_u = |name: &str| captures[name].parse::<u32>().unwrap_or(u32::MAX);
    let mut year = parse_u("year");
    if year < 100 {
        year += 1900;
    }
    let timestamp = Timestamp {
        day: parse_u("day").min(255) as u8,
        month: parse_u("month").min(255) as u8,
        year: year.min(u16::MAX as u32) as u16,
        hour: parse_u("hour").min(255) as u8,
        minute: parse_u("minute").min(255) as u8,
        second: parse_u("second").min(255) as u8,
    };

    if !timestamp.in_calendar_range() {
        warn!("IMD header timestamp was out of calendar range, degrading to zero");
        return Ok(HeaderInfo {
            version,
            timestamp: Timestamp::default(),
        });
    }

    trace!("parsed IMD header: version={version:?} timestamp={timestamp:?}");
    Ok(HeaderInfo { version, timestamp })
}

/// Emits the ASCII header line. Substitutes a default version ("1.19") when `info`
/// carries no usable version, and stamps the current local time - this crate never
/// writes back a timestamp that was merely read, only one freshly generated at write
/// time, matching the reference tool's own behavior of re-stamping on every save.
pub fn emit_header<W: std::io::Write>(info: &HeaderInfo, out: &mut W) -> ImdResult<()> {
    let version = if info.version.is_empty() || info.version == "Unknown" {
        "1.19"
    } else {
        &info.version
    };
    let now = Local::now();
    let line = format!("IMD {}: {}\r\n", version, now.format("%d/%m/%Y %H:%M:%S"));
    debug!("emitting IMD header: {line:?}");
    out.write_all(line.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_a_well_formed_header_line() {
        let mut cursor = Cursor::new(b"IMD 1.18: 29/01/2018 23:59:59\r\n".to_vec());
        let header = parse_header(&mut cursor).unwrap();
        assert_eq!(header.version, "1.18");
        assert_eq!(header.timestamp.day, 29);
        assert_eq!(header.timestamp.month, 1);
        assert_eq!(header.timestamp.year, 2018);
        assert_eq!(header.timestamp.hour, 23);
        assert_eq!(header.timestamp.minute, 59);
        assert_eq!(header.timestamp.second, 59);
    }

    #[test]
    fn accepts_lf_cr_termination() {
        let mut cursor = Cursor::new(b"IMD 1.18: 29/01/2018 23:59:59\n\rtrailing".to_vec());
        let header = parse_header(&mut cursor).unwrap();
        assert_eq!(header.version, "1.18");
    }

    #[test]
    fn missing_prefix_is_fatal() {
        let mut cursor = Cursor::new(b"XYZ 1.18: 29/01/2018 23:59:59\r\n".to_vec());
        assert!(parse_header(&mut cursor).is_err());
    }

    #[test]
    fn malformed_timestamp_degrades_to_unknown_default() {
        let mut cursor = Cursor::new(b"IMD something weird\r\n".to_vec());
        let header = parse_header(&mut cursor).unwrap();
        assert_eq!(header, HeaderInfo::default());
    }

    #[test]
    fn out_of_range_calendar_fields_degrade_timestamp_only() {
        let mut cursor = Cursor::new(b"IMD 1.18: 32/13/2018 25:61:61\r\n".to_vec());
        let header = parse_header(&mut cursor).unwrap();
        assert_eq!(header.version, "1.18");
        assert_eq!(header.timestamp, Timestamp::default());
    }

    #[test]
    fn emit_then_parse_round_trips_the_version() {
        let info = HeaderInfo {
            version: "1.19".to_string(),
            timestamp: Timestamp::default(),
        };
        let mut buf = Vec::new();
        emit_header(&info, &mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let parsed = parse_header(&mut cursor).unwrap();
        assert_eq!(parsed.version, "1.19");
    }

    #[test]
    fn empty_stream_is_a_fatal_error() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(parse_header(&mut cursor).is_err());
    }
}
