/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Plain (unquoted) scalars.
//!
//! The strictest lexical rules of any scalar style: the
//! first character must not be an indicator, `#` only
//! attaches directly after a non-space, `:` only when
//! glued to another safe character, and flow contexts
//! additionally forbid the flow indicators.

use crate::{
    error::Result,
    event::{
        grammar::{c_indicator, is_blank, ns_char, ns_plain_safe, Context, Parser},
        types::{Handler, ScalarStyle, Slice},
    },
    source::Location,
};

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// ns-plain(n,c): one line in key contexts, folded
    /// multi line otherwise. Emits the scalar event on
    /// success.
    pub(in crate::event::grammar) fn ns_plain_scalar(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        let line = match self.plain_line(c, true)?
        {
            Some(line) => line,
            None => return Ok(false),
        };

        let mut end = self.cursor.pos();
        let mut scratch: Option<String> = None;

        if !c.is_key()
        {
            // ns-plain-multi-line: fold continuation lines into
            // the value
            loop
            {
                let saved = self.save();

                let folded = match self.s_flow_folded(n)?
                {
                    Some(folded) => folded,
                    None => break,
                };

                let next = match self.plain_line(c, false)?
                {
                    Some(next) => next,
                    None =>
                    {
                        self.restore(saved);

                        break;
                    },
                };

                let value = scratch.get_or_insert_with(|| line.to_string());

                match folded
                {
                    0 => value.push(' '),
                    k =>
                    {
                        for _ in 0..k
                        {
                            value.push('\n');
                        }
                    },
                }

                value.push_str(next);

                end = self.cursor.pos();
            }
        }

        let value = match scratch
        {
            Some(owned) => Slice::Owned(owned),
            None => Slice::Borrowed(line),
        };

        self.scalar_event(Location::new(start, end), value, ScalarStyle::Plain)?;

        Ok(true)
    }

    /// One line of plain content: its trimmed text, or None
    /// when no plain character starts here. The cursor ends
    /// after the last content character (trailing blanks
    /// stay unconsumed).
    fn plain_line(&mut self, c: Context, first_line: bool) -> Result<Option<&'de str>>
    {
        let start = self.cursor.pos();

        // A folded continuation behaves as if preceded by the
        // break it replaced, so '#' cannot start it
        let matched = match first_line
        {
            true => self.eat_plain_first(c),
            false => self.eat_plain_char(c, true),
        };

        if !matched
        {
            return Ok(None);
        }

        let mut end = self.cursor.pos();

        loop
        {
            let saved = self.cursor.pos();
            let mut saw_blank = false;

            while self.cursor.eat_if(is_blank)
            {
                saw_blank = true;
            }

            if !self.eat_plain_char(c, saw_blank)
            {
                self.cursor.set_pos(saved);

                break;
            }

            end = self.cursor.pos();
        }

        self.cursor.set_pos(end);

        Ok(Some(&self.buffer()[start..end]))
    }

    /// ns-plain-first(c): anything safe that is not an
    /// indicator, or `-`/`?`/`:` glued to a safe char.
    fn eat_plain_first(&mut self, c: Context) -> bool
    {
        if self.cursor.blocked()
        {
            return false;
        }

        match self.cursor.peek_char()
        {
            Some(ch @ ('-' | '?' | ':')) =>
            {
                if self.next_is_plain_safe(ch.len_utf8(), c)
                {
                    self.cursor.advance(ch.len_utf8());

                    true
                }
                else
                {
                    false
                }
            },
            Some(ch) if ns_char(ch) && !c_indicator(ch) =>
            {
                self.cursor.advance(ch.len_utf8());

                true
            },
            _ => false,
        }
    }

    /// ns-plain-char(c): a safe char, `#` directly after
    /// other content, or `:` glued to a safe char.
    fn eat_plain_char(&mut self, c: Context, after_blank: bool) -> bool
    {
        if self.cursor.blocked()
        {
            return false;
        }

        match self.cursor.peek_char()
        {
            Some('#') =>
            {
                // Only an ns-char directly before keeps '#' from
                // starting a comment
                if after_blank
                {
                    false
                }
                else
                {
                    self.cursor.advance(1);

                    true
                }
            },
            Some(':') =>
            {
                if self.next_is_plain_safe(1, c)
                {
                    self.cursor.advance(1);

                    true
                }
                else
                {
                    false
                }
            },
            Some(ch) if ns_plain_safe(ch, c) =>
            {
                self.cursor.advance(ch.len_utf8());

                true
            },
            _ => false,
        }
    }

    fn next_is_plain_safe(&self, offset: usize, c: Context) -> bool
    {
        match self.cursor.rest()[offset..].chars().next()
        {
            Some(ch) => ns_plain_safe(ch, c),
            None => false,
        }
    }
}
