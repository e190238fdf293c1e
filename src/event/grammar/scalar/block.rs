/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Literal (`|`) and folded (`>`) block scalars.
//!
//! The header may carry an explicit indentation indicator
//! (1-9) and a chomping indicator (`-` strip, `+` keep,
//! default clip), in either order. Content is read line by
//! line at the detected absolute indent; folding and
//! chomping are applied once the lines are collected.

use crate::{
    error::{internal::ErrorCode, Result},
    event::{
        grammar::{nb_char, Parser},
        types::{Handler, ScalarStyle, Slice},
    },
    source::Location,
};

/// Policy for a block scalar's trailing line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping
{
    /// `-`: drop all trailing breaks
    Strip,
    /// default: exactly one trailing break, if any content
    Clip,
    /// `+`: preserve every trailing break
    Keep,
}

/// One line of block scalar content.
#[derive(Debug)]
enum Line<'de>
{
    /// Blank (or absent) after the content indent
    Empty,
    /// Verbatim text; .indented marks extra leading
    /// whitespace, which folding must not join
    Text
    {
        indented: bool,
        text:     &'de str,
    },
}

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// c-l+literal(n) / c-l+folded(n), dispatched on the
    /// indicator at the cursor.
    pub(in crate::event::grammar) fn c_l_block_scalar(&mut self, n: i32) -> Result<bool>
    {
        let start = self.cursor.pos();

        let folded = match self.cursor.peek_char()
        {
            Some('|') => false,
            Some('>') => true,
            _ => return Ok(false),
        };

        self.cursor.advance(1);

        let (indicator, chomping) = self.c_b_block_header()?;

        if !self.s_b_comment()?
        {
            return Err(self.error(ErrorCode::InvalidBlockHeader));
        }

        let m = match indicator
        {
            Some(m) => m,
            None => self.detect_scalar_indent(n)?,
        };

        // Absolute column content must reach
        let w = (n + m).max(0);

        let lines = self.block_scalar_lines(w)?;
        let end = self.cursor.pos();

        let value = match folded
        {
            false => assemble_literal(&lines, chomping),
            true => assemble_folded(&lines, chomping),
        };

        let style = match folded
        {
            false => ScalarStyle::Literal,
            true => ScalarStyle::Folded,
        };

        self.scalar_event(Location::new(start, end), Slice::Owned(value), style)?;

        Ok(true)
    }

    /// c-b-block-header(m,t): indentation and chomping
    /// indicators in either order.
    fn c_b_block_header(&mut self) -> Result<(Option<i32>, Chomping)>
    {
        let mut indicator = self.c_indentation_indicator()?;
        let chomping = self.c_chomping_indicator();

        if indicator.is_none()
        {
            indicator = self.c_indentation_indicator()?;
        }

        Ok((indicator, chomping))
    }

    fn c_indentation_indicator(&mut self) -> Result<Option<i32>>
    {
        match self.cursor.peek_char()
        {
            Some('0') => Err(self.error(ErrorCode::InvalidBlockHeader)),
            Some(c @ '1'..='9') =>
            {
                self.cursor.advance(1);

                Ok(Some(c as i32 - '0' as i32))
            },
            _ => Ok(None),
        }
    }

    fn c_chomping_indicator(&mut self) -> Chomping
    {
        if self.cursor.eat_char(b'-')
        {
            Chomping::Strip
        }
        else if self.cursor.eat_char(b'+')
        {
            Chomping::Keep
        }
        else
        {
            Chomping::Clip
        }
    }

    /// Collect content lines at absolute indent .w until a
    /// less indented non-empty line, a document boundary,
    /// or EOF. The cursor is left at the terminating line's
    /// start.
    fn block_scalar_lines(&mut self, w: i32) -> Result<Vec<Line<'de>>>
    {
        let mut lines = Vec::new();

        loop
        {
            if self.cursor.is_eof() || self.cursor.blocked()
            {
                break;
            }

            let line_start = self.cursor.pos();

            // Leading spaces up to the content indent
            let mut spaces = 0;

            while spaces < w && self.cursor.eat_char(b' ')
            {
                spaces += 1;
            }

            if isBreakZ!(self)
            {
                // Blank within the scalar (possibly shallower than
                // the indent)
                if !self.cursor.eat_break() && !self.cursor.is_eof()
                {
                    break;
                }

                lines.push(Line::Empty);

                continue;
            }

            if spaces < w
            {
                // Non-empty line shallower than the indent ends the
                // scalar
                self.cursor.set_pos(line_start);

                break;
            }

            let text_start = self.cursor.pos();
            let indented = matches!(self.cursor.peek_char(), Some(' ') | Some('\t'));

            while self.cursor.eat_if(nb_char) {}

            let text = &self.buffer()[text_start..self.cursor.pos()];

            if !(isBreakZ!(self))
            {
                // Some character no content production accepts
                return Err(self.error(ErrorCode::InvalidBlockScalar));
            }

            let _ = self.cursor.eat_break();

            lines.push(Line::Text { indented, text });
        }

        // A run of shallow blank lines consumed above may belong
        // to the construct that follows, but chomping renders the
        // distinction invisible in the value

        Ok(lines)
    }
}

/// Join literal lines: every break is preserved verbatim.
fn assemble_literal(lines: &[Line<'_>], chomping: Chomping) -> String
{
    let (body_lines, trailing) = split_trailing_empties(lines);

    let mut value = String::new();
    let mut pending_empties = 0;
    let mut any_text = false;

    for line in body_lines
    {
        match line
        {
            Line::Empty => pending_empties += 1,
            Line::Text { text, .. } =>
            {
                if any_text
                {
                    push_breaks(&mut value, pending_empties + 1);
                }
                else
                {
                    push_breaks(&mut value, pending_empties);
                }

                value.push_str(text);
                any_text = true;
                pending_empties = 0;
            },
        }
    }

    chomp(value, chomping, any_text, trailing)
}

/// Join folded lines: adjacent non-indented text lines fold
/// to a space, empty lines become breaks, indented lines
/// keep their breaks.
fn assemble_folded(lines: &[Line<'_>], chomping: Chomping) -> String
{
    let (body_lines, trailing) = split_trailing_empties(lines);

    let mut value = String::new();
    let mut pending_empties = 0;
    let mut last_indented: Option<bool> = None;

    for line in body_lines
    {
        match line
        {
            Line::Empty => pending_empties += 1,
            Line::Text { indented, text } =>
            {
                match last_indented
                {
                    None => push_breaks(&mut value, pending_empties),
                    Some(prev) =>
                    {
                        let joins = !prev && !*indented;

                        match (joins, pending_empties)
                        {
                            (true, 0) => value.push(' '),
                            (true, k) => push_breaks(&mut value, k),
                            (false, k) => push_breaks(&mut value, k + 1),
                        }
                    },
                }

                value.push_str(text);
                last_indented = Some(*indented);
                pending_empties = 0;
            },
        }
    }

    chomp(value, chomping, last_indented.is_some(), trailing)
}

/// Split off the run of trailing empty lines, returning the
/// body and the run's length.
fn split_trailing_empties<'a, 'de>(lines: &'a [Line<'de>]) -> (&'a [Line<'de>], usize)
{
    let mut body = lines.len();

    while body > 0 && matches!(lines[body - 1], Line::Empty)
    {
        body -= 1;
    }

    (&lines[..body], lines.len() - body)
}

/// Apply the chomping policy to the assembled body.
fn chomp(mut value: String, chomping: Chomping, any_text: bool, trailing: usize) -> String
{
    match chomping
    {
        Chomping::Strip => (),
        Chomping::Clip =>
        {
            if any_text
            {
                value.push('\n');
            }
        },
        Chomping::Keep =>
        {
            let total = match any_text
            {
                true => trailing + 1,
                false => trailing,
            };

            push_breaks(&mut value, total);
        },
    }

    value
}

fn push_breaks(value: &mut String, count: usize)
{
    for _ in 0..count
    {
        value.push('\n');
    }
}
