/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the structures used for mapping byte offsets in
//! the parsed buffer back to human meaningful positions,
//! namely:
//!
//! - Which line does a byte offset sit on?
//! - How far into that line is it?
//! - Is a line blank, or comment only, and therefore safe
//!   to trim from the end of a collection's span?

/// An immutable view over the UTF-8 buffer being parsed,
/// with a precomputed index of line start offsets and of
/// which lines contain nothing but whitespace and/or a
/// comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Source<'de>
{
    buffer:       &'de str,
    line_offsets: Vec<usize>,
    trimmable:    Vec<bool>,
}

impl<'de> Source<'de>
{
    /// Index the given buffer.
    pub fn new(buffer: &'de str) -> Self
    {
        let bytes = buffer.as_bytes();
        let mut line_offsets = vec![0];
        let mut trimmable = Vec::new();
        let mut line_start = 0;

        for (i, &b) in bytes.iter().enumerate()
        {
            if b == b'\n'
            {
                trimmable.push(line_is_trimmable(&bytes[line_start..i]));
                line_start = i + 1;
                line_offsets.push(line_start);
            }
        }

        // The buffer may not end in a line break; treat the
        // remainder as a final line
        if line_start <= bytes.len()
        {
            trimmable.push(line_is_trimmable(&bytes[line_start..]));
        }

        // Trailing sentinel so lookups past the last break
        // stay in bounds
        line_offsets.push(buffer.len() + 1);

        Self {
            buffer,
            line_offsets,
            trimmable,
        }
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &'de str
    {
        self.buffer
    }

    /// Length of the underlying buffer, in bytes.
    pub fn len(&self) -> usize
    {
        self.buffer.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool
    {
        self.buffer.is_empty()
    }

    /// The line index (0 based) containing byte offset .at,
    /// found by binary search over the line start offsets.
    pub fn line_of(&self, at: usize) -> usize
    {
        debug_assert!(at <= self.buffer.len());

        match self.line_offsets.binary_search(&at)
        {
            Ok(line) if line + 1 == self.line_offsets.len() => line - 1,
            Ok(line) => line,
            Err(insert) => insert - 1,
        }
    }

    /// The byte offset at which the given line begins.
    pub fn line_start(&self, line: usize) -> usize
    {
        self.line_offsets[line]
    }

    /// The column (byte offset into its line) of .at.
    pub fn column_of(&self, at: usize) -> usize
    {
        at - self.line_offsets[self.line_of(at)]
    }

    /// (line, column) of .at, both 0 based.
    pub fn line_col(&self, at: usize) -> (usize, usize)
    {
        let line = self.line_of(at);

        (line, at - self.line_offsets[line])
    }

    /// Is the given line whitespace and/or comment only?
    pub fn is_trimmable(&self, line: usize) -> bool
    {
        self.trimmable.get(line).copied().unwrap_or(true)
    }

    /// Walk .at backwards while it sits at the start of a
    /// trimmable line, so that trailing blank or comment
    /// only lines do not visually belong to the span ending
    /// at .at.
    pub fn trim(&self, at: usize) -> usize
    {
        let mut at = at;

        loop
        {
            let line = self.line_of(at);

            if line == 0 || at != self.line_offsets[line] || !self.is_trimmable(line)
            {
                return at;
            }

            // Step to the start of the previous line, then past its
            // content if that line is not itself trimmable
            let prev = line - 1;
            let prev_start = self.line_offsets[prev];

            if self.is_trimmable(prev)
            {
                at = prev_start;
            }
            else
            {
                return at;
            }
        }
    }
}

/// A line is trimmable iff it holds only spaces, optionally
/// followed by a comment.
fn line_is_trimmable(line: &[u8]) -> bool
{
    let mut rest = line;

    while let [b' ', tail @ ..] = rest
    {
        rest = tail;
    }

    matches!(rest, [] | [b'#', ..] | [b'\r'])
}

/// A byte range into a [`Source`]'s buffer. The `end` is
/// exclusive, and `start <= end` always holds for ranges
/// produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location
{
    pub start: usize,
    pub end:   usize,
}

impl Location
{
    /// A span covering .start to .end.
    pub fn new(start: usize, end: usize) -> Self
    {
        debug_assert!(start <= end);

        Self { start, end }
    }

    /// A zero width span at .at.
    pub fn point(at: usize) -> Self
    {
        Self { start: at, end: at }
    }

    /// The smallest span covering both self and .other.
    pub fn join(self, other: Self) -> Self
    {
        Self {
            start: self.start.min(other.start),
            end:   self.end.max(other.end),
        }
    }

    /// A copy of self with `end` walked back over trailing
    /// blank/comment only lines.
    pub fn trim(self, source: &Source<'_>) -> Self
    {
        let end = source.trim(self.end).max(self.start);

        Self {
            start: self.start,
            end,
        }
    }

    /// Does this span strictly contain .other?
    pub fn contains(&self, other: &Self) -> bool
    {
        self.start <= other.start && other.end <= self.end
    }

    /// Does this span lie entirely before .at?
    pub fn is_before(&self, at: usize) -> bool
    {
        self.end <= at
    }

    /// Does this span lie entirely after .at?
    pub fn is_after(&self, at: usize) -> bool
    {
        self.start > at
    }
}
