/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The grammar engine: a backtracking recursive descent
//! parser over the YAML 1.2 productions.
//!
//! Productions are methods named after their grammar rules
//! (`l_yaml_stream`, `ns_flow_node`, `c_l_block_scalar`,
//! ...) returning `Result<bool>`: `Ok(false)` drives
//! backtracking via the macros in [`macros`], `Err(_)` is a
//! hard syntax error that aborts the parse.
//!
//! Anything the engine emits goes through the event cache,
//! so speculative branches can be rolled back without the
//! consumer ever observing them.

// Note that this module must come before all others, as
// they depend on the macros which expand into this scope
#[macro_use]
mod macros;

mod block;
mod document;
mod flow;
mod scalar;
mod tag;

#[cfg(test)]
mod tests;

use crate::{
    cursor::Cursor,
    error::{
        internal::{self, ErrorCode, SourceError},
        Error, Result,
    },
    event::{
        cache::{EventCache, Flushed},
        comment::{Comment, CommentMap},
        flag::{Flags, O_COMMENTS},
        types::{
            CollectionStart, CollectionStyle, DocumentEnd, DocumentStart, Event, EventData,
            Handler, ScalarEvent, ScalarStyle, Slice, StreamStart, StreamEncoding,
            VersionDirective,
        },
    },
    source::{Location, Source},
};

/// Nesting deeper than this aborts the parse rather than
/// risking the thread's stack.
const RECURSION_LIMIT: usize = 512;

/// Longest byte length an implicit mapping key may have.
const MAX_IMPLICIT_KEY_LENGTH: usize = 1024;

/// The six grammar contexts threaded through most
/// productions, selecting which sub-rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context
{
    BlockOut,
    BlockIn,
    BlockKey,
    FlowOut,
    FlowIn,
    FlowKey,
}

impl Context
{
    /// The context collections pass to their entries:
    /// flow-out demotes to flow-in, block-key to flow-key.
    pub fn in_flow(self) -> Self
    {
        match self
        {
            Context::FlowOut | Context::FlowIn => Context::FlowIn,
            Context::BlockKey | Context::FlowKey => Context::FlowKey,
            // Block contexts never reach a flow collection's
            // entries directly
            Context::BlockOut | Context::BlockIn => Context::FlowIn,
        }
    }

    /// Key contexts restrict scalars to a single line.
    pub fn is_key(self) -> bool
    {
        matches!(self, Context::BlockKey | Context::FlowKey)
    }
}

/// Indentation handed to a nested block sequence: one less
/// when the parent is a block-out context, so zero indented
/// sequences can sit under their mapping key.
pub(in crate::event::grammar) fn seq_spaces(n: i32, c: Context) -> i32
{
    match c
    {
        Context::BlockOut => n - 1,
        _ => n,
    }
}

/// Kind marker for collection start events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::event::grammar) enum Collection
{
    Sequence,
    Mapping,
}

/// A tag property as parsed, before resolution against the
/// document's directives.
#[derive(Debug, Clone, PartialEq)]
pub(in crate::event::grammar) enum PendingTag<'de>
{
    /// `!<uri>`, percent escapes already decoded
    Verbatim(Slice<'de>),
    /// handle + suffix, resolved when the property is
    /// flushed onto its node's event
    Shorthand
    {
        handle: Slice<'de>,
        suffix: Slice<'de>,
    },
    /// A lone `!`
    NonSpecific,
}

/// Anchor/tag properties parsed but not yet attached to a
/// node event. Part of the backtracking state: a failed
/// branch restores the values saved before it started.
#[derive(Debug, Clone, Default)]
pub(in crate::event::grammar) struct Pending<'de>
{
    pub anchor: Option<(Slice<'de>, Location)>,
    pub tag:    Option<(PendingTag<'de>, Location)>,
}

/// Tracks the queued DocumentStart and armed DocumentEnd of
/// the document currently being framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::event::grammar) enum DocumentFrame
{
    /// No document queued or open
    Clear,
    /// A start event is queued, flushed by the first
    /// content event
    Queued
    {
        implicit: bool,
        at:       usize,
    },
    /// Content has been seen; a DocumentEnd is armed
    Open,
}

/// Everything restored when a speculative branch fails.
#[derive(Debug)]
pub(in crate::event::grammar) struct SavedState<'de>
{
    pos:            usize,
    pending:        Pending<'de>,
    version:        Option<VersionDirective>,
    directives_len: usize,
    document:       DocumentFrame,
    cache_depth:    usize,
}

/// One parser instance owns one cursor, one event cache,
/// one pending property pair, one directive table and one
/// comment map; nothing is shared between instances.
pub(crate) struct Parser<'de, 'h, H>
{
    source: Source<'de>,

    pub(in crate::event::grammar) cursor: Cursor<'de>,
    pub(in crate::event::grammar) cache:  EventCache<'de>,

    pending:    Pending<'de>,
    version:    Option<VersionDirective>,
    directives: Vec<(Slice<'de>, Slice<'de>)>,
    document:   DocumentFrame,
    comments:   CommentMap<'de>,
    flags:      Flags,
    depth:      usize,

    handler: &'h mut H,
}

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    pub fn new(buffer: &'de str, flags: Flags, handler: &'h mut H) -> Self
    {
        Self {
            source: Source::new(buffer),
            cursor: Cursor::new(buffer),
            cache: EventCache::new(),
            pending: Pending::default(),
            version: None,
            directives: Vec::new(),
            document: DocumentFrame::Clear,
            comments: CommentMap::new(),
            flags,
            depth: 0,
            handler,
        }
    }

    /// Parse the whole stream, delivering events (and
    /// comment records) to the handler. See
    /// [`document`](self::document) for the stream level
    /// productions.
    pub fn parse_stream(&mut self) -> Result<()>
    {
        self.l_yaml_stream()
    }

    /*
     * ==== Backtracking state ====
     */

    pub(in crate::event::grammar) fn save(&self) -> SavedState<'de>
    {
        SavedState {
            pos:            self.cursor.pos(),
            pending:        self.pending.clone(),
            version:        self.version,
            directives_len: self.directives.len(),
            document:       self.document,
            cache_depth:    self.cache.depth(),
        }
    }

    pub(in crate::event::grammar) fn restore(&mut self, saved: SavedState<'de>)
    {
        self.cursor.set_pos(saved.pos);
        self.pending = saved.pending;
        self.version = saved.version;
        self.directives.truncate(saved.directives_len);
        self.document = saved.document;
        self.cache.truncate(saved.cache_depth);
    }

    /*
     * ==== Event emission ====
     */

    /// Buffer .data in the current cache frame, or deliver
    /// it when no speculation is in progress.
    pub(in crate::event::grammar) fn push_event(
        &mut self,
        location: Location,
        data: EventData<'de>,
    ) -> Result<()>
    {
        match self.cache.push(Event::new(location, data))
        {
            None => Ok(()),
            Some(event) => self.emit_event(event),
        }
    }

    /// Commit the top cache frame, delivering its events if
    /// it was the bottom one.
    pub(in crate::event::grammar) fn flush_top_frame(&mut self) -> Result<()>
    {
        match self.cache.flush_frame()
        {
            Flushed::Parent => Ok(()),
            Flushed::Deliver(events) =>
            {
                for event in events
                {
                    self.emit_event(event)?;
                }

                Ok(())
            },
        }
    }

    /// The first content event of a pending document
    /// flushes the queued DocumentStart before itself.
    fn emit_event(&mut self, event: Event<'de>) -> Result<()>
    {
        if event.is_content()
        {
            self.flush_document_start(event.location().start)?;
        }

        self.deliver(event)
    }

    fn deliver(&mut self, event: Event<'de>) -> Result<()>
    {
        event.accept(&self.source, &mut *self.handler)
    }

    fn flush_document_start(&mut self, at: usize) -> Result<()>
    {
        loop
        {
            match self.document
            {
                DocumentFrame::Open => return Ok(()),
                DocumentFrame::Clear =>
                {
                    // Bare content with no framing at all: the document
                    // is implied at the content's position
                    self.document = DocumentFrame::Queued { implicit: true, at };
                },
                DocumentFrame::Queued { implicit, at: start } =>
                {
                    let location = match implicit
                    {
                        true => Location::point(start),
                        false => Location::new(start, start + 3),
                    };

                    let data = EventData::DocumentStart(DocumentStart {
                        version: self.version,
                        directives: self.directives.clone(),
                        implicit,
                    });

                    self.document = DocumentFrame::Open;

                    return self.deliver(Event::new(location, data));
                },
            }
        }
    }

    /// Emit the armed DocumentEnd (if a document is open)
    /// and reset per document directive state.
    pub(in crate::event::grammar) fn close_document(
        &mut self,
        implicit: bool,
        location: Location,
    ) -> Result<()>
    {
        if let DocumentFrame::Queued { .. } = self.document
        {
            // A '---' was seen but no content production ran; give
            // the document an empty root so the stream stays well
            // bracketed
            self.flush_document_start(location.start)?;
            self.deliver(Event::new(
                Location::point(location.start),
                EventData::Scalar(ScalarEvent {
                    value:           Slice::Borrowed(""),
                    anchor:          None,
                    tag:             None,
                    plain_implicit:  true,
                    quoted_implicit: false,
                    style:           ScalarStyle::Plain,
                }),
            ))?;
        }

        if self.document == DocumentFrame::Clear
        {
            return Ok(());
        }

        self.document = DocumentFrame::Clear;
        self.version = None;
        self.directives.clear();

        self.deliver(Event::new(
            location,
            EventData::DocumentEnd(DocumentEnd { implicit }),
        ))
    }

    pub(in crate::event::grammar) fn stream_start_event(&mut self) -> Result<()>
    {
        self.deliver(Event::new(
            Location::point(0),
            EventData::StreamStart(StreamStart {
                encoding: StreamEncoding::UTF8,
            }),
        ))
    }

    pub(in crate::event::grammar) fn stream_end_event(&mut self) -> Result<()>
    {
        let end = self.source.len();

        self.deliver(Event::new(Location::point(end), EventData::StreamEnd))
    }

    /*
     * ==== Node properties ====
     */

    pub(in crate::event::grammar) fn set_pending_anchor(
        &mut self,
        name: Slice<'de>,
        location: Location,
    )
    {
        self.pending.anchor = Some((name, location));
    }

    pub(in crate::event::grammar) fn set_pending_tag(
        &mut self,
        tag: PendingTag<'de>,
        location: Location,
    )
    {
        self.pending.tag = Some((tag, location));
    }

    /// Move the pending properties onto the node event
    /// being built, resolving the tag against the current
    /// directives. Returns the resolved pair plus the span
    /// the properties covered.
    fn take_properties(&mut self)
        -> Result<(Option<Slice<'de>>, Option<Slice<'de>>, Option<Location>)>
    {
        let mut span: Option<Location> = None;
        let mut join = |location: Location, span: &mut Option<Location>| {
            *span = Some(match span
            {
                Some(prior) => prior.join(location),
                None => location,
            });
        };

        let anchor = self.pending.anchor.take().map(|(name, location)| {
            join(location, &mut span);

            name
        });

        let tag = match self.pending.tag.take()
        {
            Some((tag, location)) =>
            {
                join(location, &mut span);

                Some(self.resolve_tag(tag, location)?)
            },
            None => None,
        };

        Ok((anchor, tag, span))
    }

    fn resolve_tag(&self, tag: PendingTag<'de>, at: Location) -> Result<Slice<'de>>
    {
        match tag
        {
            PendingTag::Verbatim(uri) => Ok(uri),
            PendingTag::NonSpecific => Ok(Slice::Borrowed("!")),
            PendingTag::Shorthand { handle, suffix } =>
            {
                let prefix = self
                    .lookup_handle(&handle)
                    .ok_or_else(|| self.error_at(at.start, ErrorCode::UndefinedTagHandle))?;

                let mut resolved = String::with_capacity(prefix.len() + suffix.len());
                resolved.push_str(prefix);
                resolved.push_str(&suffix);

                Ok(Slice::Owned(resolved))
            },
        }
    }

    fn lookup_handle(&self, handle: &str) -> Option<&str>
    {
        use crate::event::types::DEFAULT_TAGS;

        self.directives
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, prefix)| prefix.as_ref())
            .or_else(|| {
                DEFAULT_TAGS
                    .iter()
                    .find(|(h, _)| *h == handle)
                    .map(|(_, prefix)| *prefix)
            })
    }

    pub(in crate::event::grammar) fn has_directive(&self, handle: &str) -> bool
    {
        self.directives.iter().any(|(h, _)| h == handle)
    }

    pub(in crate::event::grammar) fn push_directive(
        &mut self,
        handle: Slice<'de>,
        prefix: Slice<'de>,
    )
    {
        self.directives.push((handle, prefix));
    }

    pub(in crate::event::grammar) fn set_document_frame(&mut self, frame: DocumentFrame)
    {
        self.document = frame;
    }

    pub(in crate::event::grammar) fn version_directive(&self) -> Option<VersionDirective>
    {
        self.version
    }

    pub(in crate::event::grammar) fn set_version_directive(&mut self, version: VersionDirective)
    {
        self.version = Some(version);
    }

    /*
     * ==== Node events ====
     */

    /// Emit a scalar event, flushing pending properties
    /// onto it.
    pub(in crate::event::grammar) fn scalar_event(
        &mut self,
        location: Location,
        value: Slice<'de>,
        style: ScalarStyle,
    ) -> Result<()>
    {
        let (anchor, tag, props) = self.take_properties()?;
        let location = match props
        {
            Some(span) => span.join(location),
            None => location,
        };

        let untagged = tag.is_none();
        let plain = style == ScalarStyle::Plain;

        self.push_event(
            location,
            EventData::Scalar(ScalarEvent {
                value,
                anchor,
                tag,
                plain_implicit: untagged && plain,
                quoted_implicit: untagged && !plain,
                style,
            }),
        )
    }

    /// Emit an empty plain scalar, flushing pending
    /// properties onto it. The `e-node` production.
    pub(in crate::event::grammar) fn e_node(&mut self) -> Result<bool>
    {
        let at = self.cursor.pos();

        self.scalar_event(Location::point(at), Slice::Borrowed(""), ScalarStyle::Plain)?;

        Ok(true)
    }

    /// Emit a collection start event, flushing pending
    /// properties onto it.
    pub(in crate::event::grammar) fn collection_start_event(
        &mut self,
        location: Location,
        kind: Collection,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let (anchor, tag, props) = self.take_properties()?;
        let location = match props
        {
            Some(span) => span.join(location),
            None => location,
        };

        let start = CollectionStart { anchor, tag, style };
        let data = match kind
        {
            Collection::Sequence => EventData::SequenceStart(start),
            Collection::Mapping => EventData::MappingStart(start),
        };

        self.push_event(location, data)
    }

    /// Emit a collection start that must not consume
    /// pending properties (the synthetic mapping wrapped
    /// around a flow pair).
    pub(in crate::event::grammar) fn bare_collection_start_event(
        &mut self,
        location: Location,
        kind: Collection,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let start = CollectionStart {
            anchor: None,
            tag: None,
            style,
        };
        let data = match kind
        {
            Collection::Sequence => EventData::SequenceStart(start),
            Collection::Mapping => EventData::MappingStart(start),
        };

        self.push_event(location, data)
    }

    pub(in crate::event::grammar) fn collection_end_event(
        &mut self,
        location: Location,
        kind: Collection,
    ) -> Result<()>
    {
        let data = match kind
        {
            Collection::Sequence => EventData::SequenceEnd,
            Collection::Mapping => EventData::MappingEnd,
        };

        self.push_event(location, data)
    }

    /*
     * ==== Errors ====
     */

    pub(in crate::event::grammar) fn error(&self, code: ErrorCode) -> Error
    {
        self.error_at(self.cursor.pos(), code)
    }

    pub(in crate::event::grammar) fn error_at(&self, at: usize, code: ErrorCode) -> Error
    {
        let (line, column) = self.source.line_col(at);

        Error::new(internal::Error::with_context(code, at, line + 1, column))
    }

    pub(in crate::event::grammar) fn internal_error(&self, what: &'static str) -> Error
    {
        let at = self.cursor.pos();
        let (line, column) = self.source.line_col(at);

        Error::new(internal::Error::with_context(
            SourceError::Internal(what),
            at,
            line + 1,
            column,
        ))
    }

    /*
     * ==== Recursion guard ====
     */

    pub(in crate::event::grammar) fn descend(&mut self) -> Result<()>
    {
        self.depth += 1;

        if self.depth > RECURSION_LIMIT
        {
            return Err(self.error(ErrorCode::RecursionLimitExceeded));
        }

        Ok(())
    }

    pub(in crate::event::grammar) fn ascend(&mut self)
    {
        self.depth -= 1;
    }

    /*
     * ==== Whitespace, breaks & comments ====
     */

    pub(in crate::event::grammar) fn s_separate(&mut self, n: i32, c: Context) -> Result<bool>
    {
        match c
        {
            Context::BlockKey | Context::FlowKey => self.s_separate_in_line(),
            _ => self.s_separate_lines(n),
        }
    }

    fn s_separate_lines(&mut self, n: i32) -> Result<bool>
    {
        if attempt!(self, self.s_separate_lines_multi(n))
        {
            return Ok(true);
        }

        self.s_separate_in_line()
    }

    fn s_separate_lines_multi(&mut self, n: i32) -> Result<bool>
    {
        Ok(self.s_l_comments()? && self.s_flow_line_prefix(n)?)
    }

    /// One or more blanks, or the start of a line.
    pub(in crate::event::grammar) fn s_separate_in_line(&mut self) -> Result<bool>
    {
        if isBlank!(self)
        {
            while self.cursor.eat_if(is_blank) {}

            return Ok(true);
        }

        Ok(self.cursor.at_line_start())
    }

    /// Exactly .n spaces. Trivially true for n <= 0.
    pub(in crate::event::grammar) fn s_indent(&mut self, n: i32) -> Result<bool>
    {
        if n <= 0
        {
            return Ok(true);
        }

        let saved = self.cursor.pos();

        for _ in 0..n
        {
            if !self.cursor.eat_char(b' ')
            {
                self.cursor.set_pos(saved);

                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Fewer than .n spaces, up to the first non-space.
    pub(in crate::event::grammar) fn s_indent_lt(&mut self, n: i32) -> Result<bool>
    {
        let saved = self.cursor.pos();
        let mut count = 0;

        while count + 1 < n && self.cursor.eat_char(b' ')
        {
            count += 1;
        }

        if self.cursor.check(|c| c == ' ')
        {
            self.cursor.set_pos(saved);

            return Ok(false);
        }

        Ok(true)
    }

    pub(in crate::event::grammar) fn s_flow_line_prefix(&mut self, n: i32) -> Result<bool>
    {
        if !self.s_indent(n)?
        {
            return Ok(false);
        }

        let _ = self.s_separate_in_line()?;

        Ok(true)
    }

    fn s_line_prefix(&mut self, n: i32, c: Context) -> Result<bool>
    {
        match c
        {
            Context::BlockOut | Context::BlockIn => self.s_indent(n),
            _ => self.s_flow_line_prefix(n),
        }
    }

    /// An empty line within an indented scope: less than
    /// the scope's indent (or exactly its line prefix),
    /// then a break.
    pub(in crate::event::grammar) fn l_empty(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(attempt!(self, self.l_empty_inner(n, c)))
    }

    fn l_empty_inner(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let prefixed = attempt!(self, self.s_line_prefix(n, c)) || self.s_indent_lt(n)?;

        Ok(prefixed && self.cursor.eat_break())
    }

    /// A break or EOF.
    pub(in crate::event::grammar) fn b_comment(&mut self) -> bool
    {
        self.cursor.is_eof() || self.cursor.eat_break()
    }

    /// Optional trailing blanks and comment, then a break
    /// or EOF.
    pub(in crate::event::grammar) fn s_b_comment(&mut self) -> Result<bool>
    {
        Ok(attempt!(self, self.s_b_comment_inner()))
    }

    fn s_b_comment_inner(&mut self) -> Result<bool>
    {
        let inline = !self.cursor.at_line_start();

        if self.s_separate_in_line()? && self.cursor.check(|c| c == '#')
        {
            self.c_nb_comment_text(inline)?;
        }

        Ok(self.b_comment())
    }

    /// A full comment (or blank) line.
    pub(in crate::event::grammar) fn l_comment(&mut self) -> Result<bool>
    {
        Ok(attempt!(self, self.l_comment_inner()))
    }

    fn l_comment_inner(&mut self) -> Result<bool>
    {
        if !self.s_separate_in_line()?
        {
            return Ok(false);
        }

        if self.cursor.check(|c| c == '#')
        {
            self.c_nb_comment_text(false)?;
        }

        Ok(self.b_comment())
    }

    /// Comment and blank lines to the next content, after
    /// an optional trailing comment on the current line.
    pub(in crate::event::grammar) fn s_l_comments(&mut self) -> Result<bool>
    {
        if !(self.s_b_comment()? || self.cursor.at_line_start())
        {
            return Ok(false);
        }

        star!(self, self.l_comment());

        Ok(true)
    }

    /// Record the `# ...` text at the cursor. Dedup by
    /// start offset keeps retried branches from producing a
    /// second record.
    fn c_nb_comment_text(&mut self, inline: bool) -> Result<()>
    {
        let start = self.cursor.pos();

        while self.cursor.eat_if(nb_char) {}

        if !self.flags.contains(O_COMMENTS)
        {
            return Ok(());
        }

        let end = self.cursor.pos();
        let comment = Comment {
            location: Location::new(start, end),
            text:     Slice::Borrowed(&self.source.buffer()[start..end]),
            inline,
        };

        if self.comments.insert(comment.clone())
        {
            self.handler.comment(&comment)?;
        }

        Ok(())
    }

    /*
     * ==== Folding ====
     */

    /// Fold a break (plus any empty lines) inside a flow
    /// scalar, requiring the next line to carry the scope's
    /// indent. `Some(0)` folds to a space, `Some(k)` to k
    /// line feeds.
    pub(in crate::event::grammar) fn s_flow_folded(&mut self, n: i32) -> Result<Option<usize>>
    {
        let saved = self.save();

        let _ = self.s_separate_in_line()?;

        if !self.cursor.eat_break()
        {
            self.restore(saved);

            return Ok(None);
        }

        let mut empties = 0;

        while attempt!(self, self.l_empty(n, Context::FlowIn))
        {
            empties += 1;
        }

        if !self.s_flow_line_prefix(n)?
        {
            self.restore(saved);

            return Ok(None);
        }

        Ok(Some(empties))
    }

    /*
     * ==== Indentation detection ====
     */

    /// The relative indent of the first entry line of a
    /// block collection below indent .n. The cursor must
    /// sit at the start of a line; blank and comment only
    /// lines ahead are skipped. A result < 1 means no
    /// following block can parse.
    pub(in crate::event::grammar) fn detect_collection_indent(&self, n: i32) -> i32
    {
        let bytes = self.source.buffer().as_bytes();
        let mut p = self.cursor.pos();

        loop
        {
            let line_start = p;

            while bytes.get(p) == Some(&b' ')
            {
                p += 1;
            }

            match bytes.get(p)
            {
                None => return 0,
                Some(b'#') | Some(b'\n') | Some(b'\r') =>
                {
                    while bytes.get(p).map_or(false, |b| *b != b'\n')
                    {
                        p += 1;
                    }

                    match bytes.get(p)
                    {
                        Some(_) => p += 1,
                        None => return 0,
                    }
                },
                Some(_) => return (p - line_start) as i32 - n,
            }
        }
    }

    /// Blanks between a `-`/`?`/`:` indicator and a compact
    /// collection on the same line. Zero when the rest of
    /// the line is blank or a comment.
    pub(in crate::event::grammar) fn detect_entry_indent(&self) -> i32
    {
        let bytes = self.source.buffer().as_bytes();
        let mut p = self.cursor.pos();
        let mut m = 0;

        while bytes.get(p) == Some(&b' ')
        {
            p += 1;
            m += 1;
        }

        match bytes.get(p)
        {
            None | Some(b'\n') | Some(b'\r') | Some(b'#') => 0,
            Some(_) => m,
        }
    }

    /// Auto-detect the indentation indicator of a block
    /// scalar whose header carried none: the indent of the
    /// first non-empty line relative to .n, at least 1. A
    /// leading empty line deeper than that first content
    /// line is a header error.
    pub(in crate::event::grammar) fn detect_scalar_indent(&self, n: i32) -> Result<i32>
    {
        let bytes = self.source.buffer().as_bytes();
        let mut p = self.cursor.pos();
        let mut max_empty = 0;

        loop
        {
            let line_start = p;

            while bytes.get(p) == Some(&b' ')
            {
                p += 1;
            }

            let spaces = p - line_start;

            match bytes.get(p)
            {
                None => return Ok(1),
                Some(b'\n') =>
                {
                    max_empty = max_empty.max(spaces);
                    p += 1;
                },
                Some(b'\r') =>
                {
                    max_empty = max_empty.max(spaces);
                    p += 1;

                    if bytes.get(p) == Some(&b'\n')
                    {
                        p += 1;
                    }
                },
                Some(_) =>
                {
                    if max_empty > spaces
                    {
                        return Err(
                            self.error_at(line_start, ErrorCode::InvalidBlockHeader)
                        );
                    }

                    return Ok((spaces as i32 - n).max(1));
                },
            }
        }
    }

    /*
     * ==== Shared access for sibling modules ====
     */

    pub(in crate::event::grammar) fn source(&self) -> &Source<'de>
    {
        &self.source
    }

    pub(in crate::event::grammar) fn buffer(&self) -> &'de str
    {
        self.source.buffer()
    }
}

/*
 * ==== Character classes ====
 */

pub(in crate::event::grammar) fn is_break(c: char) -> bool
{
    matches!(c, '\n' | '\r')
}

pub(in crate::event::grammar) fn is_blank(c: char) -> bool
{
    matches!(c, ' ' | '\t')
}

/// c-printable from the character set productions.
pub(in crate::event::grammar) fn is_printable(c: char) -> bool
{
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{7E}'
        | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Printable, but not a break (content inside one line).
pub(in crate::event::grammar) fn nb_char(c: char) -> bool
{
    is_printable(c) && !is_break(c) && c != '\u{FEFF}'
}

/// Printable, not a break, not a blank.
pub(in crate::event::grammar) fn ns_char(c: char) -> bool
{
    nb_char(c) && !is_blank(c)
}

pub(in crate::event::grammar) fn c_indicator(c: char) -> bool
{
    matches!(
        c,
        '-' | '?'
            | ':'
            | ','
            | '['
            | ']'
            | '{'
            | '}'
            | '#'
            | '&'
            | '*'
            | '!'
            | '|'
            | '>'
            | '\''
            | '"'
            | '%'
            | '@'
            | '`'
    )
}

pub(in crate::event::grammar) fn c_flow_indicator(c: char) -> bool
{
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// Safe plain scalar characters for the given context: flow
/// contexts additionally exclude the flow indicators.
pub(in crate::event::grammar) fn ns_plain_safe(c: char, ctx: Context) -> bool
{
    match ctx
    {
        Context::FlowOut | Context::BlockKey | Context::BlockOut | Context::BlockIn =>
        {
            ns_char(c)
        },
        Context::FlowIn | Context::FlowKey => ns_char(c) && !c_flow_indicator(c),
    }
}

pub(in crate::event::grammar) fn ns_anchor_char(c: char) -> bool
{
    ns_char(c) && !c_flow_indicator(c)
}

pub(in crate::event::grammar) fn ns_word_char(c: char) -> bool
{
    c.is_ascii_alphanumeric() || c == '-'
}

/// URI characters as allowed in tags; percent escapes are
/// validated separately.
pub(in crate::event::grammar) fn ns_uri_char(c: char) -> bool
{
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '#' | ';'
                | '/'
                | '?'
                | ':'
                | '@'
                | '&'
                | '='
                | '+'
                | '$'
                | ','
                | '_'
                | '.'
                | '!'
                | '~'
                | '*'
                | '\''
                | '('
                | ')'
                | '['
                | ']'
                | '-'
                | '%'
        )
}

/// Tag shorthand suffix characters: URI characters minus
/// `!` and the flow indicators.
pub(in crate::event::grammar) fn ns_tag_char(c: char) -> bool
{
    ns_uri_char(c) && c != '!' && !c_flow_indicator(c)
}
