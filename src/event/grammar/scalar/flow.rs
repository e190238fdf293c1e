/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Single and double quoted scalars.
//!
//! Both styles fold line breaks the way plain scalars do;
//! double quoting adds the escape sequences and the
//! `\<break>` line continuation. In key contexts only the
//! one line renditions are accepted, and a break is a soft
//! failure rather than an error.
//!
//! The decoded value borrows from the buffer until the
//! first escape, fold or quote pair forces a copy.

use crate::{
    error::{internal::ErrorCode, Result},
    event::{
        grammar::{is_blank, scalar::escape::flow_unescape, Context, Parser},
        types::{Handler, ScalarStyle, Slice},
    },
    source::Location,
};

/// nb-json: tab or anything from space up.
fn nb_json(c: char) -> bool
{
    c == '\t' || c >= '\u{20}'
}

fn nb_single_char(c: char) -> bool
{
    nb_json(c) && c != '\''
}

fn nb_double_char(c: char) -> bool
{
    nb_json(c) && c != '"' && c != '\\'
}

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// c-single-quoted(n,c)
    pub(in crate::event::grammar) fn c_single_quoted(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'\'')
        {
            return Ok(false);
        }

        let one_line = c.is_key();
        let mut scratch: Option<String> = None;
        let mut seg_start = self.cursor.pos();

        loop
        {
            if self.cursor.check(|ch| ch == '\'')
            {
                let seg_end = self.cursor.pos();

                self.cursor.advance(1);

                // A quote pair is an escaped quote, not the end
                if self.cursor.check(|ch| ch == '\'')
                {
                    let value = materialize(&mut scratch, self.buffer(), seg_start, seg_end);

                    value.push('\'');
                    self.cursor.advance(1);
                    seg_start = self.cursor.pos();

                    continue;
                }

                let value = finish(scratch, self.buffer(), seg_start, seg_end);

                self.scalar_event(
                    Location::new(start, self.cursor.pos()),
                    value,
                    ScalarStyle::SingleQuote,
                )?;

                return Ok(true);
            }

            if self.cursor.is_eof()
            {
                return Err(self.error_at(start, ErrorCode::UnterminatedScalar));
            }

            if self.cursor.check(|ch| ch == '\n' || ch == '\r')
            {
                if one_line
                {
                    return Ok(false);
                }

                self.quoted_fold(n, &mut scratch, &mut seg_start, true)?;

                continue;
            }

            if self.cursor.blocked()
            {
                return Err(self.error_at(start, ErrorCode::UnterminatedScalar));
            }

            if !self.cursor.eat_if(nb_single_char)
            {
                return Err(self.error(ErrorCode::InvalidFlowScalar));
            }
        }
    }

    /// c-double-quoted(n,c)
    pub(in crate::event::grammar) fn c_double_quoted(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'"')
        {
            return Ok(false);
        }

        let one_line = c.is_key();
        let mut scratch: Option<String> = None;
        let mut seg_start = self.cursor.pos();

        loop
        {
            if self.cursor.check(|ch| ch == '"')
            {
                let seg_end = self.cursor.pos();

                self.cursor.advance(1);

                let value = finish(scratch, self.buffer(), seg_start, seg_end);

                self.scalar_event(
                    Location::new(start, self.cursor.pos()),
                    value,
                    ScalarStyle::DoubleQuote,
                )?;

                return Ok(true);
            }

            if self.cursor.is_eof()
            {
                return Err(self.error_at(start, ErrorCode::UnterminatedScalar));
            }

            if self.cursor.check(|ch| ch == '\n' || ch == '\r')
            {
                if one_line
                {
                    return Ok(false);
                }

                self.quoted_fold(n, &mut scratch, &mut seg_start, true)?;

                continue;
            }

            if self.cursor.check(|ch| ch == '\\')
            {
                // An escaped break eats the line end, preserving any
                // blanks before the backslash
                if matches!(self.cursor.peek_byte_at(1), Some(b'\n') | Some(b'\r'))
                {
                    if one_line
                    {
                        return Ok(false);
                    }

                    let seg_end = self.cursor.pos();

                    materialize(&mut scratch, self.buffer(), seg_start, seg_end);
                    self.cursor.advance(1);
                    self.quoted_fold(n, &mut scratch, &mut seg_start, false)?;

                    continue;
                }

                let seg_end = self.cursor.pos();
                let value = materialize(&mut scratch, self.buffer(), seg_start, seg_end);

                let consumed = flow_unescape(self.cursor.rest(), value)
                    .map_err(|code| self.error(code))?;

                self.cursor.advance(consumed);
                seg_start = self.cursor.pos();

                continue;
            }

            if self.cursor.blocked()
            {
                return Err(self.error_at(start, ErrorCode::UnterminatedScalar));
            }

            if !self.cursor.eat_if(nb_double_char)
            {
                return Err(self.error(ErrorCode::InvalidFlowScalar));
            }
        }
    }

    /// Consume the break at the cursor plus following empty
    /// lines and the next line's prefix, pushing the folded
    /// characters. With .fold a single break becomes a
    /// space; an escaped break (.fold false) vanishes.
    /// Empty lines become line feeds either way.
    fn quoted_fold(
        &mut self,
        n: i32,
        scratch: &mut Option<String>,
        seg_start: &mut usize,
        fold: bool,
    ) -> Result<()>
    {
        if fold
        {
            // Trailing blanks before a folded break are stripped
            let seg = &self.buffer()[*seg_start..self.cursor.pos()];
            let trimmed = seg.trim_end_matches(is_blank);
            let seg_end = *seg_start + trimmed.len();

            materialize(scratch, self.buffer(), *seg_start, seg_end);
        }

        if !self.cursor.eat_break()
        {
            return Err(self.error(ErrorCode::UnterminatedScalar));
        }

        let mut empties = 0;

        while attempt!(self, self.l_empty(n, Context::FlowIn))
        {
            empties += 1;
        }

        if !self.s_flow_line_prefix(n)?
        {
            return Err(self.error(ErrorCode::UnterminatedScalar));
        }

        let value = scratch
            .as_mut()
            .unwrap_or_else(|| unreachable!("quoted fold materializes before folding"));

        match (fold, empties)
        {
            (true, 0) => value.push(' '),
            (_, k) =>
            {
                for _ in 0..k
                {
                    value.push('\n');
                }
            },
        }

        *seg_start = self.cursor.pos();

        Ok(())
    }
}

/// Append the borrowed segment to the scratch space,
/// creating it on first use.
fn materialize<'a>(
    scratch: &'a mut Option<String>,
    buffer: &str,
    seg_start: usize,
    seg_end: usize,
) -> &'a mut String
{
    let value = scratch.get_or_insert_with(String::new);

    value.push_str(&buffer[seg_start..seg_end]);

    value
}

/// The final value: borrowed when nothing forced a copy.
fn finish(scratch: Option<String>, buffer: &str, seg_start: usize, seg_end: usize)
    -> Slice<'_>
{
    match scratch
    {
        Some(mut value) =>
        {
            value.push_str(&buffer[seg_start..seg_end]);

            Slice::Owned(value)
        },
        None => Slice::Borrowed(&buffer[seg_start..seg_end]),
    }
}
