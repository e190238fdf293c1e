/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The cursor owns the current byte position into the
//! parsed buffer, and is the only piece of parser state
//! that advances. Every grammar production reads through
//! it, and backtracking is nothing more than restoring a
//! previously saved position.

/// Byte position cursor over a UTF-8 buffer.
///
/// While `in_bare_document` is set, any advancing match is
/// refused at the start of a line beginning with `---` or
/// `...` followed by blank or EOF, so that no production
/// can swallow a document boundary mid grammar.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'de>
{
    buffer: &'de str,
    pos:    usize,

    in_bare_document: bool,
}

impl<'de> Cursor<'de>
{
    pub fn new(buffer: &'de str) -> Self
    {
        Self {
            buffer,
            pos: 0,
            in_bare_document: false,
        }
    }

    /// Current byte position.
    pub fn pos(&self) -> usize
    {
        self.pos
    }

    /// Restore a previously saved position.
    pub fn set_pos(&mut self, pos: usize)
    {
        debug_assert!(pos <= self.buffer.len());

        self.pos = pos;
    }

    /// Everything at and after the current position.
    pub fn rest(&self) -> &'de str
    {
        &self.buffer[self.pos..]
    }

    pub fn is_eof(&self) -> bool
    {
        self.pos >= self.buffer.len()
    }

    /// Toggle the document boundary guard, returning the
    /// previous setting.
    pub fn guard_document_boundary(&mut self, on: bool) -> bool
    {
        std::mem::replace(&mut self.in_bare_document, on)
    }

    /// Is the cursor at the very start of a line?
    pub fn at_line_start(&self) -> bool
    {
        self.pos == 0 || matches!(self.buffer.as_bytes()[self.pos - 1], b'\n')
    }

    /// Would an advancing match be refused here?
    pub fn blocked(&self) -> bool
    {
        self.in_bare_document && self.at_line_start() && at_document_boundary(self.rest())
    }

    /// Advance the cursor .amount bytes, without any guard
    /// check. Callers must only advance over bytes they
    /// have already matched.
    pub fn advance(&mut self, amount: usize)
    {
        debug_assert!(self.pos + amount <= self.buffer.len());

        self.pos += amount;
    }

    /// Match the single byte .b at the cursor, advancing
    /// over it on success.
    pub fn eat_char(&mut self, b: u8) -> bool
    {
        if self.blocked()
        {
            return false;
        }

        match self.rest().as_bytes()
        {
            [first, ..] if *first == b =>
            {
                self.pos += 1;

                true
            },
            _ => false,
        }
    }

    /// Match the literal .literal at the cursor, advancing
    /// over it on success.
    pub fn eat_str(&mut self, literal: &str) -> bool
    {
        if self.blocked()
        {
            return false;
        }

        if self.rest().starts_with(literal)
        {
            self.pos += literal.len();

            true
        }
        else
        {
            false
        }
    }

    /// Match a char class at the cursor, advancing over the
    /// full code point on success.
    pub fn eat_if<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        if self.blocked()
        {
            return false;
        }

        match self.rest().chars().next()
        {
            Some(c) if f(c) =>
            {
                self.pos += c.len_utf8();

                true
            },
            _ => false,
        }
    }

    /// Match a line break (\n, \r\n or lone \r), advancing
    /// over it on success.
    pub fn eat_break(&mut self) -> bool
    {
        if self.blocked()
        {
            return false;
        }

        match self.rest().as_bytes()
        {
            [b'\r', b'\n', ..] =>
            {
                self.pos += 2;

                true
            },
            [b'\n', ..] | [b'\r', ..] =>
            {
                self.pos += 1;

                true
            },
            _ => false,
        }
    }

    /// The char at the cursor, if any.
    pub fn peek_char(&self) -> Option<char>
    {
        self.rest().chars().next()
    }

    /// The byte at .offset bytes past the cursor, if any.
    pub fn peek_byte_at(&self, offset: usize) -> Option<u8>
    {
        self.rest().as_bytes().get(offset).copied()
    }

    /// Check a char class at the cursor without advancing.
    pub fn check<F>(&self, f: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        matches!(self.rest().chars().next(), Some(c) if f(c))
    }
}

/// Does .rest begin with a `---` or `...` document marker
/// followed by blank, break or EOF?
pub(crate) fn at_document_boundary(rest: &str) -> bool
{
    let bytes = rest.as_bytes();

    let marker = matches!(bytes, [b'-', b'-', b'-', ..] | [b'.', b'.', b'.', ..]);

    marker
        && matches!(
            bytes.get(3),
            None | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')
        )
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn eat_and_rewind()
    {
        let mut cursor = Cursor::new("abc");

        assert!(cursor.eat_char(b'a'));
        assert!(!cursor.eat_char(b'c'));

        let saved = cursor.pos();
        assert!(cursor.eat_str("bc"));
        assert!(cursor.is_eof());

        cursor.set_pos(saved);
        assert_eq!(cursor.rest(), "bc");
    }

    #[test]
    fn eat_break_variants()
    {
        let mut cursor = Cursor::new("\r\n\n\rx");

        assert!(cursor.eat_break());
        assert!(cursor.eat_break());
        assert!(cursor.eat_break());
        assert!(!cursor.eat_break());
        assert_eq!(cursor.peek_char(), Some('x'));
    }

    #[test]
    fn guard_refuses_document_markers()
    {
        let mut cursor = Cursor::new("--- x");

        assert!(cursor.eat_char(b'-'));

        cursor.set_pos(0);
        cursor.guard_document_boundary(true);

        assert!(!cursor.eat_char(b'-'));
        assert!(!cursor.eat_if(|c| c == '-'));

        // Not at line start: the guard does not apply
        cursor.guard_document_boundary(false);
        assert!(cursor.eat_char(b'-'));
        cursor.guard_document_boundary(true);
        assert!(cursor.eat_char(b'-'));
    }

    #[test]
    fn guard_requires_following_blank()
    {
        let mut cursor = Cursor::new("---x");

        cursor.guard_document_boundary(true);

        // `---x` is not a document marker
        assert!(cursor.eat_char(b'-'));
    }

    #[test]
    fn boundary_detection()
    {
        assert!(at_document_boundary("---"));
        assert!(at_document_boundary("--- a"));
        assert!(at_document_boundary("...\n"));
        assert!(!at_document_boundary("----"));
        assert!(!at_document_boundary("..a"));
    }
}
