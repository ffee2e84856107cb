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

//! The free-form comment block that follows the header line: an arbitrary run of
//! bytes terminated by the ASCII SUB character (`0x1A`), which is itself not part of
//! the comment.

use std::io::Read;

use log::trace;

use crate::error::{ImdError, ImdResult};

pub const COMMENT_TERMINATOR: u8 = 0x1A;

/// Reads the comment block, returning its bytes (without the terminator). Reaching
/// EOF before the terminator byte is found is a fatal read failure - the container is
/// truncated.
pub fn read_comment<R: Read>(source: &mut R) -> ImdResult<Vec<u8>> {
    let mut comment = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte)? {
            0 => {
                return Err(ImdError::InvalidFormat(
                    "end of file reached before the comment terminator (0x1A)".into(),
                ))
            }
            _ if byte[0] == COMMENT_TERMINATOR => break,
            _ => comment.push(byte[0]),
        }
    }
    trace!("read {} byte comment", comment.len());
    Ok(comment)
}

/// Like [`read_comment`] but discards the bytes as they're read, for callers (the
/// consistency checker) that only need to confirm the comment block is well-formed
/// and advance the stream past it.
pub fn skip_comment<R: Read>(source: &mut R) -> ImdResult<()> {
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte)? {
            0 => {
                return Err(ImdError::InvalidFormat(
                    "end of file reached before the comment terminator (0x1A)".into(),
                ))
            }
            _ if byte[0] == COMMENT_TERMINATOR => return Ok(()),
            _ => {}
        }
    }
}

/// Emits `comment` followed by the terminator byte.
pub fn emit_comment<W: std::io::Write>(comment: &[u8], out: &mut W) -> ImdResult<()> {
    out.write_all(comment)?;
    out.write_all(&[COMMENT_TERMINATOR])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_comment_up_to_but_not_including_terminator() {
        let mut cursor = Cursor::new(b"hello world\x1Atrailing data".to_vec());
        let comment = read_comment(&mut cursor).unwrap();
        assert_eq!(comment, b"hello world");
    }

    #[test]
    fn missing_terminator_is_an_error() {
        let mut cursor = Cursor::new(b"no terminator here".to_vec());
        assert!(read_comment(&mut cursor).is_err());
    }

    #[test]
    fn skip_comment_advances_past_terminator_without_allocating_output() {
        let mut cursor = Cursor::new(b"abc\x1Arest".to_vec());
        skip_comment(&mut cursor).unwrap();
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"rest");
    }

    #[test]
    fn emit_then_read_round_trips() {
        let mut buf = Vec::new();
        emit_comment(b"a round-trip comment", &mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_comment(&mut cursor).unwrap(), b"a round-trip comment");
    }
}
