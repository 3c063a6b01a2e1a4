// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major walk over the strict lower triangle of a pair matrix.

/// Position in the sequence `(1,0), (2,0), (2,1), (3,0), …` over a buffer.
///
/// Every unordered pair of distinct indices below the buffer length is visited
/// exactly once, always as `(later, earlier)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PairCursor {
    i: usize,
    j: usize,
}

impl Default for PairCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PairCursor {
    /// A cursor at `(1, 0)`.
    pub const fn new() -> Self {
        Self { i: 1, j: 0 }
    }

    /// Rewind to `(1, 0)`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The pair under the cursor, or `None` once the walk is over for `len` items.
    pub fn current(&self, len: usize) -> Option<(usize, usize)> {
        (self.i < len).then_some((self.i, self.j))
    }

    /// Step to the next pair.
    pub fn advance(&mut self) {
        self.j += 1;
        if self.j >= self.i {
            self.i += 1;
            self.j = 0;
        }
    }

    /// Pairs left to visit for `len` items, including the current one.
    pub fn remaining(&self, len: usize) -> usize {
        if self.i >= len {
            return 0;
        }
        let total = len * (len - 1) / 2;
        let visited = self.i * (self.i - 1) / 2 + self.j;
        total - visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_row_major() {
        let mut cursor = PairCursor::new();
        let mut seen = Vec::new();
        while let Some(pair) = cursor.current(4) {
            seen.push(pair);
            cursor.advance();
        }
        assert_eq!(seen, [(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2)]);
    }

    #[test]
    fn short_buffers_have_no_pairs() {
        let cursor = PairCursor::new();
        assert_eq!(cursor.current(0), None);
        assert_eq!(cursor.current(1), None);
        assert_eq!(cursor.remaining(1), 0);
        assert_eq!(cursor.current(2), Some((1, 0)));
    }

    #[test]
    fn remaining_counts_down() {
        let mut cursor = PairCursor::new();
        for left in (1..=10).rev() {
            assert_eq!(cursor.remaining(5), left);
            cursor.advance();
        }
        assert_eq!(cursor.remaining(5), 0);
        cursor.reset();
        assert_eq!(cursor.remaining(5), 10);
    }
}
