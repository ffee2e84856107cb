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

//! The IMD sector-size code table: a 3-bit code indexes the shared static table of seven
//! sizes. Both directions are derived from this one table - nothing computes `128 << code`
//! ad hoc elsewhere in the crate.

/// `SECTOR_SIZES[code as usize]` is the byte count for sector-size code `code`, for
/// `code` in `0..SECTOR_SIZES.len()`.
pub const SECTOR_SIZES: [usize; 7] = [128, 256, 512, 1024, 2048, 4096, 8192];

/// Convert a 3-bit sector-size code to a byte count. `None` if `code` is not in `0..7`.
pub fn code_to_bytes(code: u8) -> Option<usize> {
    SECTOR_SIZES.get(code as usize).copied()
}

/// Convert a byte count back to its 3-bit code. `None` if `size` is not one of the seven
/// recognized sector sizes.
pub fn bytes_to_code(size: usize) -> Option<u8> {
    SECTOR_SIZES.iter().position(|&s| s == size).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_to_bytes_covers_the_whole_table() {
        assert_eq!(code_to_bytes(0), Some(128));
        assert_eq!(code_to_bytes(6), Some(8192));
        assert_eq!(code_to_bytes(7), None);
    }

    #[test]
    fn bytes_to_code_round_trips_with_code_to_bytes() {
        for code in 0..7u8 {
            let size = code_to_bytes(code).unwrap();
            assert_eq!(bytes_to_code(size), Some(code));
        }
    }

    #[test]
    fn bytes_to_code_rejects_unrecognized_sizes() {
        assert_eq!(bytes_to_code(129), None);
        assert_eq!(bytes_to_code(0), None);
    }
}
