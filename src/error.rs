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

//! Error kinds surfaced by this crate. Low-level codec errors (`std::io::Error`,
//! `binrw::Error`) are mapped once, at the image-layer boundary, into [`ImdError`] -
//! callers of the public API never see the low-level kind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImdError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("memory allocation failed")]
    AllocationFailure,
    #[error("an I/O error occurred reading or writing the disk image: {0}")]
    Io(String),
    #[error("invalid IMD format: {0}")]
    InvalidFormat(String),
    #[error("no sector with the requested logical id exists on this track")]
    SectorNotFound,
    #[error("no track exists at the requested cylinder/head")]
    TrackNotFound,
    #[error("the requested sector's data is unavailable (sflag 0x00)")]
    SectorUnavailable,
    #[error("supplied buffer is too small")]
    BufferTooSmall,
    #[error("supplied buffer length does not match the sector size")]
    SectorSizeMismatch,
    #[error("the disk image is write-protected")]
    WriteProtected,
    #[error("requested cylinder/head/sector exceeds configured geometry limits")]
    GeometryViolation,
}

impl From<std::io::Error> for ImdError {
    fn from(err: std::io::Error) -> Self {
        ImdError::Io(err.to_string())
    }
}

impl From<binrw::Error> for ImdError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(io_err) => ImdError::Io(io_err.to_string()),
            other => ImdError::InvalidFormat(other.to_string()),
        }
    }
}

pub type ImdResult<T> = Result<T, ImdError>;
