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

//! Stream traits and the seek-restoring guard used by every track codec path
//! that touches the byte stream.

pub use std::io::{Read, Seek, SeekFrom, Write};

/// A stream the track/file codecs can read from and seek within.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// A stream the track/file codecs can read from, write to, and seek within.
pub trait ReadWriteSeek: Read + Write + Seek {}
impl<T: Read + Write + Seek> ReadWriteSeek for T {}

/// Records the stream's position on construction and, unless [`disarm`](SeekGuard::disarm)
/// is called, restores it on drop. Every track codec parse path wraps its reads in one of
/// these: a short read or a format violation anywhere in the track record leaves the stream
/// exactly where it was before the first byte of the record was consumed, so the caller can
/// retry or re-scan.
pub struct SeekGuard<'a, T: Seek> {
    stream: &'a mut T,
    start: u64,
    armed: bool,
}

impl<'a, T: Seek> SeekGuard<'a, T> {
    pub fn new(stream: &'a mut T) -> std::io::Result<Self> {
        let start = stream.stream_position()?;
        Ok(Self {
            stream,
            start,
            armed: true,
        })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    /// Borrow the wrapped stream to perform the guarded reads.
    pub fn get_mut(&mut self) -> &mut T {
        self.stream
    }

    /// Call on the success path so the guard does not rewind the stream on drop.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<'a, T: Seek> Drop for SeekGuard<'a, T> {
    fn drop(&mut self) {
        if self.armed {
            // Best-effort: if the rewind itself fails there is nothing more we can do from a
            // destructor, and the caller already has the original error to report.
            let _ = self.stream.seek(SeekFrom::Start(self.start));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn seek_guard_restores_position_unless_disarmed() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        cursor.seek(SeekFrom::Start(4)).unwrap();
        {
            let mut guard = SeekGuard::new(&mut cursor).unwrap();
            guard.get_mut().seek(SeekFrom::Start(12)).unwrap();
        }
        assert_eq!(cursor.stream_position().unwrap(), 4);
    }

    #[test]
    fn seek_guard_leaves_position_when_disarmed() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        cursor.seek(SeekFrom::Start(4)).unwrap();
        {
            let mut guard = SeekGuard::new(&mut cursor).unwrap();
            guard.get_mut().seek(SeekFrom::Start(12)).unwrap();
            guard.disarm();
        }
        assert_eq!(cursor.stream_position().unwrap(), 12);
    }
}
