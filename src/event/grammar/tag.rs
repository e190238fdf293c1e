/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Node properties: anchors (`&name`), tags (`!<uri>`,
//! `!handle!suffix`, `!`), aliases (`*name`) and the handle
//! and prefix scans shared with the %TAG directive.
//!
//! Parsed properties land in the parser's pending slot and
//! are flushed onto the next node event; see the property
//! handling in the parent module.

use crate::{
    error::{internal::ErrorCode, Result},
    event::{
        grammar::{
            ns_anchor_char, ns_tag_char, ns_uri_char, ns_word_char, Context, Parser, PendingTag,
        },
        types::{Alias, EventData, Handler, Slice},
    },
    source::Location,
};

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// c-ns-properties(n,c): a tag optionally followed by
    /// an anchor, or an anchor optionally followed by a
    /// tag.
    pub(in crate::event::grammar) fn c_ns_properties(
        &mut self,
        n: i32,
        c: Context,
    ) -> Result<bool>
    {
        if attempt!(self, self.c_ns_tag_property())
        {
            let _ = attempt!(self, self.props_sep_anchor(n, c));

            return Ok(true);
        }

        if attempt!(self, self.c_ns_anchor_property())
        {
            let _ = attempt!(self, self.props_sep_tag(n, c));

            return Ok(true);
        }

        Ok(false)
    }

    fn props_sep_anchor(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.c_ns_anchor_property()?)
    }

    fn props_sep_tag(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.c_ns_tag_property()?)
    }

    /// c-ns-anchor-property: `&` then one or more anchor
    /// characters.
    pub(in crate::event::grammar) fn c_ns_anchor_property(&mut self) -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'&')
        {
            return Ok(false);
        }

        let name = self.scan_anchor_name()?;
        let location = Location::new(start, self.cursor.pos());

        self.set_pending_anchor(name, location);

        Ok(true)
    }

    /// c-ns-alias-node: `*` then an anchor name, emitted
    /// immediately as an Alias event.
    pub(in crate::event::grammar) fn c_ns_alias_node(&mut self) -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'*')
        {
            return Ok(false);
        }

        let name = self.scan_anchor_name()?;
        let location = Location::new(start, self.cursor.pos());

        self.push_event(location, EventData::Alias(Alias { name }))?;

        Ok(true)
    }

    fn scan_anchor_name(&mut self) -> Result<Slice<'de>>
    {
        let start = self.cursor.pos();

        while self.cursor.eat_if(ns_anchor_char) {}

        let end = self.cursor.pos();

        if start == end
        {
            return Err(self.error_at(start, ErrorCode::InvalidAnchorName));
        }

        Ok(Slice::Borrowed(&self.buffer()[start..end]))
    }

    /// c-ns-tag-property: verbatim `!<uri>`, a shorthand
    /// `!handle!suffix`, or the non-specific lone `!`.
    pub(in crate::event::grammar) fn c_ns_tag_property(&mut self) -> Result<bool>
    {
        if !self.cursor.check(|c| c == '!')
        {
            return Ok(false);
        }

        let start = self.cursor.pos();

        if self.cursor.eat_str("!<")
        {
            return self.verbatim_tag(start).map(|()| true);
        }

        // Shorthand handle disambiguation: named (!x!), then
        // secondary (!!), then primary (!)
        let handle = self.scan_tag_handle()?;
        let suffix = self.scan_tag_suffix()?;

        let location = Location::new(start, self.cursor.pos());

        match (handle.as_ref(), suffix)
        {
            // A lone `!` is the non-specific tag
            ("!", None) => self.set_pending_tag(PendingTag::NonSpecific, location),
            (_, None) =>
            {
                return Err(self.error_at(start, ErrorCode::InvalidTagSuffix));
            },
            (_, Some(suffix)) =>
            {
                self.set_pending_tag(PendingTag::Shorthand { handle, suffix }, location)
            },
        }

        Ok(true)
    }

    fn verbatim_tag(&mut self, start: usize) -> Result<()>
    {
        let body_start = self.cursor.pos();

        while self.cursor.eat_if(ns_uri_char) {}

        let body_end = self.cursor.pos();

        if body_start == body_end || !self.cursor.eat_char(b'>')
        {
            return Err(self.error_at(start, ErrorCode::InvalidTagSuffix));
        }

        let uri = percent_decode(&self.buffer()[body_start..body_end])
            .ok_or_else(|| self.error_at(body_start, ErrorCode::InvalidTagSuffix))?;

        let location = Location::new(start, self.cursor.pos());

        self.set_pending_tag(PendingTag::Verbatim(uri), location);

        Ok(())
    }

    /// c-tag-handle: `!`, `!!` or `!word-chars!`. The
    /// cursor sits on the leading `!`.
    pub(in crate::event::grammar) fn scan_tag_handle(&mut self) -> Result<Slice<'de>>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'!')
        {
            return Err(self.error_at(start, ErrorCode::InvalidTagHandle));
        }

        // Named: !word-chars!
        let named = attempt_scan(self, |parser| {
            let word_start = parser.cursor.pos();

            while parser.cursor.eat_if(ns_word_char) {}

            if parser.cursor.pos() > word_start && parser.cursor.eat_char(b'!')
            {
                Some(())
            }
            else
            {
                None
            }
        });

        if named.is_none()
        {
            // Not a named handle; a second `!` makes this the
            // secondary handle, otherwise it stays primary
            let _ = self.cursor.eat_char(b'!');
        }

        Ok(Slice::Borrowed(&self.buffer()[start..self.cursor.pos()]))
    }

    /// ns-tag-char+ with percent decoding. None when no
    /// suffix characters follow the handle.
    fn scan_tag_suffix(&mut self) -> Result<Option<Slice<'de>>>
    {
        let start = self.cursor.pos();

        while self.cursor.eat_if(ns_tag_char) {}

        let end = self.cursor.pos();

        if start == end
        {
            return Ok(None);
        }

        let decoded = percent_decode(&self.buffer()[start..end])
            .ok_or_else(|| self.error_at(start, ErrorCode::InvalidTagSuffix))?;

        Ok(Some(decoded))
    }

    /// ns-tag-prefix for the %TAG directive: either a local
    /// `!...` prefix or a global URI.
    pub(in crate::event::grammar) fn scan_tag_prefix(&mut self) -> Result<Slice<'de>>
    {
        let start = self.cursor.pos();

        if self.cursor.eat_char(b'!')
        {
            while self.cursor.eat_if(ns_uri_char) {}
        }
        else
        {
            if !self.cursor.eat_if(ns_tag_char)
            {
                return Err(self.error_at(start, ErrorCode::InvalidTagSuffix));
            }

            while self.cursor.eat_if(ns_uri_char) {}
        }

        Ok(Slice::Borrowed(&self.buffer()[start..self.cursor.pos()]))
    }
}

/// Cursor-only save/restore for scans that return data
/// instead of bool.
fn attempt_scan<'de, 'h, H, T, F>(parser: &mut Parser<'de, 'h, H>, f: F) -> Option<T>
where
    H: Handler<'de>,
    F: FnOnce(&mut Parser<'de, 'h, H>) -> Option<T>,
{
    let saved = parser.cursor.pos();
    let result = f(parser);

    if result.is_none()
    {
        parser.cursor.set_pos(saved);
    }

    result
}

/// Decode %HH escapes, borrowing when none are present.
/// None for truncated or non-hex escapes, or escapes that
/// produce invalid UTF-8.
fn percent_decode(raw: &str) -> Option<Slice<'_>>
{
    if !raw.contains('%')
    {
        return Some(Slice::Borrowed(raw));
    }

    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len()
    {
        match bytes[i]
        {
            b'%' =>
            {
                let high = as_hex(*bytes.get(i + 1)?)?;
                let low = as_hex(*bytes.get(i + 2)?)?;

                decoded.push((high << 4) | low);
                i += 3;
            },
            b =>
            {
                decoded.push(b);
                i += 1;
            },
        }
    }

    String::from_utf8(decoded).ok().map(Slice::Owned)
}

fn as_hex(b: u8) -> Option<u8>
{
    match b
    {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
