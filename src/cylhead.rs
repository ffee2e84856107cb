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

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// A (cylinder, head) pair. Tracks in an [`Image`](crate::image::Image) are ordered by
/// `Ord` on this type.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Default)]
pub struct CylHead {
    c: u8,
    h: u8,
}

impl CylHead {
    pub fn new(c: u8, h: u8) -> Self {
        Self { c, h }
    }

    pub fn c(&self) -> u8 {
        self.c
    }

    pub fn h(&self) -> u8 {
        self.h
    }
}

impl From<(u8, u8)> for CylHead {
    fn from((c, h): (u8, u8)) -> Self {
        Self { c, h }
    }
}

impl Display for CylHead {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[c:{} h:{}]", self.c, self.h)
    }
}

impl Ord for CylHead {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.c, self.h).cmp(&(other.c, other.h))
    }
}

impl PartialOrd for CylHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
