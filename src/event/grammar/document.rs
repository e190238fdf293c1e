/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Stream and document framing:
//!
//! ```text
//! l-yaml-stream ::= l-document-prefix* l-any-document?
//!                   ( l-document-suffix+ l-document-prefix* l-any-document?
//!                   | l-document-prefix* l-explicit-document? )*
//! ```
//!
//! `---` queues an explicit DocumentStart that the first
//! content event flushes; `...` fires the armed DocumentEnd
//! and resets the per document directive table.

use atoi::atoi;

use crate::{
    cursor::at_document_boundary,
    error::{internal::ErrorCode, Result},
    event::{
        grammar::{ns_char, Context, DocumentFrame, Parser},
        types::{Handler, VersionDirective},
    },
    source::Location,
};

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// The whole stream. Consuming less than the full
    /// buffer is an error even when every production so far
    /// succeeded.
    pub(in crate::event::grammar) fn l_yaml_stream(&mut self) -> Result<()>
    {
        self.stream_start_event()?;

        star!(self, self.l_document_prefix());
        attempt!(self, self.l_any_document());
        star!(self, self.l_document_next());

        let end = self.source().len();
        let trimmed = self.source().trim(end);

        self.close_document(true, Location::point(trimmed))?;
        self.stream_end_event()?;

        if !self.cursor.is_eof()
        {
            return Err(self.error(ErrorCode::TrailingContent));
        }

        Ok(())
    }

    /// One iteration of the stream tail: either suffixes
    /// followed by any document, or prefixes followed by an
    /// explicit document.
    fn l_document_next(&mut self) -> Result<bool>
    {
        if attempt!(self, self.l_document_suffixed())
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.l_document_explicit_only()))
    }

    fn l_document_suffixed(&mut self) -> Result<bool>
    {
        if !plus!(self, self.l_document_suffix())
        {
            return Ok(false);
        }

        star!(self, self.l_document_prefix());
        attempt!(self, self.l_any_document());

        Ok(true)
    }

    fn l_document_explicit_only(&mut self) -> Result<bool>
    {
        star!(self, self.l_document_prefix());

        // A directive here belongs to a document that was never
        // closed; '---' (or a preceding '...') is required
        if self.cursor.at_line_start() && self.cursor.check(|c| c == '%')
        {
            return Err(self.error(ErrorCode::MissingDocumentStart));
        }

        self.l_explicit_document()
    }

    /// l-document-prefix: an optional byte order mark and
    /// any number of comment lines.
    fn l_document_prefix(&mut self) -> Result<bool>
    {
        let start = self.cursor.pos();

        let _ = self.cursor.eat_if(|c| c == '\u{FEFF}');

        star!(self, self.l_comment());

        Ok(self.cursor.pos() > start)
    }

    /// l-document-suffix: `...` and the rest of its line.
    fn l_document_suffix(&mut self) -> Result<bool>
    {
        if !self.c_document_end()?
        {
            return Ok(false);
        }

        if !self.s_l_comments()?
        {
            // Content on the '...' line itself; nothing can parse it
            return Err(self.error(ErrorCode::TrailingContent));
        }

        Ok(true)
    }

    /// c-document-end: `...` at column 0, closing the open
    /// document explicitly.
    fn c_document_end(&mut self) -> Result<bool>
    {
        if !(self.cursor.at_line_start() && self.cursor.rest().starts_with("..."))
        {
            return Ok(false);
        }

        if !at_document_boundary(self.cursor.rest())
        {
            return Ok(false);
        }

        let start = self.cursor.pos();

        self.cursor.advance(3);
        self.close_document(false, Location::new(start, start + 3))?;

        Ok(true)
    }

    /// c-directives-end: `---` at column 0. Closes any open
    /// document implicitly and queues an explicit start.
    fn c_directives_end(&mut self) -> Result<bool>
    {
        if !(self.cursor.at_line_start() && self.cursor.rest().starts_with("---"))
        {
            return Ok(false);
        }

        if !at_document_boundary(self.cursor.rest())
        {
            return Ok(false);
        }

        let start = self.cursor.pos();
        let trimmed = self.source().trim(start);

        self.close_document(true, Location::point(trimmed))?;
        self.cursor.advance(3);
        self.queue_document(false, start);

        Ok(true)
    }

    fn queue_document(&mut self, implicit: bool, at: usize)
    {
        self.set_document_frame(DocumentFrame::Queued { implicit, at });
    }

    /// l-any-document: directive, explicit or bare.
    fn l_any_document(&mut self) -> Result<bool>
    {
        if attempt!(self, self.l_directive_document())
        {
            return Ok(true);
        }

        if attempt!(self, self.l_explicit_document())
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.l_bare_document()))
    }

    /// l-directive-document: one or more directives, then a
    /// required explicit document.
    fn l_directive_document(&mut self) -> Result<bool>
    {
        if !plus!(self, self.l_directive())
        {
            return Ok(false);
        }

        if !self.l_explicit_document()?
        {
            return Err(self.error(ErrorCode::MissingDocumentStart));
        }

        Ok(true)
    }

    /// l-explicit-document: `---` then a bare document or
    /// an empty node.
    fn l_explicit_document(&mut self) -> Result<bool>
    {
        if !self.c_directives_end()?
        {
            return Ok(false);
        }

        if attempt!(self, self.l_bare_document())
        {
            return Ok(true);
        }

        // '---' with no content: the document holds an empty
        // scalar. Whatever follows that this cannot explain is
        // reported at the stream level.
        self.e_node()?;
        let _ = self.s_l_comments()?;

        Ok(true)
    }

    /// l-bare-document: block node at indent -1, with the
    /// document boundary guard active so no production can
    /// run through a `---`/`...` line.
    fn l_bare_document(&mut self) -> Result<bool>
    {
        let prev = self.cursor.guard_document_boundary(true);
        let result = self.s_l_block_node(-1, Context::BlockIn);

        self.cursor.guard_document_boundary(prev);

        result
    }

    /// l-directive: `%` at column 0, then YAML, TAG or a
    /// reserved directive (which is skipped).
    fn l_directive(&mut self) -> Result<bool>
    {
        if !(self.cursor.at_line_start() && self.cursor.eat_char(b'%'))
        {
            return Ok(false);
        }

        let name_start = self.cursor.pos();

        while self.cursor.eat_if(ns_char) {}

        let name = &self.buffer()[name_start..self.cursor.pos()];

        match name
        {
            "YAML" => self.ns_yaml_directive()?,
            "TAG" => self.ns_tag_directive()?,
            // Reserved directives are skipped: consume their
            // parameters and move on
            _ => self.ns_reserved_directive()?,
        }

        if !self.s_l_comments()?
        {
            return Err(self.error(ErrorCode::UnknownDirective));
        }

        Ok(true)
    }

    /// ns-yaml-directive: `%YAML <major>.<minor>`.
    fn ns_yaml_directive(&mut self) -> Result<()>
    {
        if self.version_directive().is_some()
        {
            return Err(self.error(ErrorCode::DuplicateVersion));
        }

        if !self.s_separate_in_line()?
        {
            return Err(self.error(ErrorCode::InvalidVersion));
        }

        let major = self.directive_number()?;

        if !self.cursor.eat_char(b'.')
        {
            return Err(self.error(ErrorCode::InvalidVersion));
        }

        let minor = self.directive_number()?;

        self.set_version_directive(VersionDirective { major, minor });

        Ok(())
    }

    fn directive_number(&mut self) -> Result<u8>
    {
        let start = self.cursor.pos();

        while self.cursor.eat_if(|c| c.is_ascii_digit()) {}

        let digits = &self.buffer()[start..self.cursor.pos()];

        if digits.is_empty()
        {
            return Err(self.error_at(start, ErrorCode::InvalidVersion));
        }

        atoi::<u8>(digits.as_bytes()).ok_or_else(|| self.error_at(start, ErrorCode::IntOverflow))
    }

    /// ns-tag-directive: `%TAG <handle> <prefix>`.
    fn ns_tag_directive(&mut self) -> Result<()>
    {
        if !self.s_separate_in_line()?
        {
            return Err(self.error(ErrorCode::InvalidTagHandle));
        }

        let handle = self.scan_tag_handle()?;

        if !self.s_separate_in_line()?
        {
            return Err(self.error(ErrorCode::InvalidTagSuffix));
        }

        let prefix = self.scan_tag_prefix()?;

        if self.has_directive(&handle)
        {
            return Err(self.error(ErrorCode::DuplicateTagDirective));
        }

        self.push_directive(handle, prefix);

        Ok(())
    }

    /// ns-reserved-directive: parameters are consumed and
    /// ignored.
    fn ns_reserved_directive(&mut self) -> Result<()>
    {
        loop
        {
            let at = self.cursor.pos();

            if !self.s_separate_in_line()?
            {
                break;
            }

            if !self.cursor.eat_if(ns_char)
            {
                self.cursor.set_pos(at);

                break;
            }

            while self.cursor.eat_if(ns_char) {}
        }

        Ok(())
    }
}
