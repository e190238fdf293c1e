/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the various types used by [Event]s to represent
//! YAML, and the [Handler] contract through which events
//! are delivered to a consumer.

use std::borrow::Cow;

use crate::{
    error::Result,
    event::comment::Comment,
    source::{Location, Source},
};

pub type Slice<'de> = Cow<'de, str>;

/// The tag shorthands every document starts with, unless
/// overridden by a %TAG directive
pub const DEFAULT_TAGS: [(&str, &str); 2] = [("!", "!"), ("!!", "tag:yaml.org,2002:")];

/// The version implied when a document carries no %YAML
/// directive
pub const DEFAULT_VERSION: VersionDirective = VersionDirective { major: 1, minor: 2 };

/// Specific YAML productions found in the YAML stream. Each
/// Event has a byte range indicating the span of the stream
/// represented by the given Event. See [EventData] for all
/// of the possible Event variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'de>
{
    location: Location,
    inner:    EventData<'de>,
}

impl<'de> Event<'de>
{
    pub fn new(location: Location, event: EventData<'de>) -> Self
    {
        Self {
            location,
            inner: event,
        }
    }

    pub fn location(&self) -> Location
    {
        self.location
    }

    pub fn data(&self) -> &EventData<'de>
    {
        &self.inner
    }

    /// Is this event document content, rather than stream
    /// or document framing?
    pub fn is_content(&self) -> bool
    {
        matches!(
            self.inner,
            EventData::Alias(_)
                | EventData::Scalar(_)
                | EventData::MappingStart(_)
                | EventData::MappingEnd
                | EventData::SequenceStart(_)
                | EventData::SequenceEnd
        )
    }

    /// Dispatch this event to the matching [Handler]
    /// callback, preceded by the location callbacks.
    pub fn accept<H>(self, source: &Source<'de>, handler: &mut H) -> Result<()>
    where
        H: Handler<'de>,
    {
        let location = self.location;
        let (start_line, start_col) = source.line_col(location.start);
        let (end_line, end_col) = source.line_col(location.end);

        handler.event_span(location)?;
        handler.event_location(start_line, start_col, end_line, end_col)?;

        match self.inner
        {
            EventData::StreamStart(event) => handler.start_stream(event.encoding),
            EventData::StreamEnd => handler.end_stream(),
            EventData::DocumentStart(event) =>
            {
                handler.start_document(event.version, &event.directives, event.implicit)
            },
            EventData::DocumentEnd(event) => handler.end_document(event.implicit),
            EventData::Alias(event) => handler.alias(event.name),
            EventData::Scalar(event) => handler.scalar(event),
            EventData::MappingStart(event) =>
            {
                let implicit = event.tag.is_none();

                handler.start_mapping(event.anchor, event.tag, implicit, event.style)
            },
            EventData::MappingEnd => handler.end_mapping(),
            EventData::SequenceStart(event) =>
            {
                let implicit = event.tag.is_none();

                handler.start_sequence(event.anchor, event.tag, implicit, event.style)
            },
            EventData::SequenceEnd => handler.end_sequence(),
        }
    }
}

/// The possible variants of an [Event]. See the
/// documentation on each variant for an explanation of what
/// each variant represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData<'de>
{
    /// Beginning of event stream, always the first event
    /// produced, and only produced once per stream
    StreamStart(StreamStart),
    /// End of events, always the last event produced, and
    /// no more events will be produced after it
    StreamEnd,

    /// Start of document content; tag resolution and
    /// version specific behavior should use the attached
    /// directives until the matching DocumentEnd
    DocumentStart(DocumentStart<'de>),
    /// End of document content, followed either by another
    /// DocumentStart or by StreamEnd
    DocumentEnd(DocumentEnd),

    /// An alias point connected to a previously seen
    /// anchor; the consumer keeps track of anchors, the
    /// parser does not validate the connection
    Alias(Alias<'de>),
    /// A scalar leaf node
    Scalar(ScalarEvent<'de>),

    /// Start of a YAML key value production, followed by
    /// alternating key/value nodes until a MappingEnd
    MappingStart(CollectionStart<'de>),
    /// End of a YAML key value production
    MappingEnd,
    /// Start of a YAML array production, followed by zero
    /// or more nodes until a SequenceEnd
    SequenceStart(CollectionStart<'de>),
    /// End of a YAML array production
    SequenceEnd,
}

/// StreamStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStart
{
    /// Encoding used in the YAML byte stream
    pub encoding: StreamEncoding,
}

/// DocumentStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStart<'de>
{
    /// %YAML directive attached to this document (if any)
    pub version:    Option<VersionDirective>,
    /// %TAG directives attached to this document, in
    /// stream order, excluding the built in defaults
    pub directives: Vec<(Slice<'de>, Slice<'de>)>,
    /// Was this event inferred, or present in the stream
    /// as a '---'?
    pub implicit:   bool,
}

/// DocumentEnd [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEnd
{
    /// Was this event inferred, or present in the stream
    /// as a '...'?
    pub implicit: bool,
}

/// Alias [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Alias<'de>
{
    /// Name of the anchor this alias refers to
    pub name: Slice<'de>,
}

/// Scalar [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarEvent<'de>
{
    /// The decoded (unescaped, folded, chomped) content
    pub value: Slice<'de>,

    /// The anchor applied to this node (if any)
    pub anchor: Option<Slice<'de>>,
    /// The resolved tag applied to this node (if any)
    pub tag:    Option<Slice<'de>>,

    /// May an untagged plain rendition of this node be
    /// resolved by the consumer's schema?
    pub plain_implicit:  bool,
    /// May an untagged quoted rendition of this node be
    /// resolved to a string?
    pub quoted_implicit: bool,

    /// Style this node was expressed with in the stream
    pub style: ScalarStyle,
}

/// MappingStart / SequenceStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStart<'de>
{
    /// The anchor applied to this node (if any)
    pub anchor: Option<Slice<'de>>,
    /// The resolved tag applied to this node (if any)
    pub tag:    Option<Slice<'de>>,
    /// Style this node was expressed with in the stream
    pub style:  CollectionStyle,
}

/// %YAML directive representation, containing the .major
/// and .minor version of the current document in the YAML
/// stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDirective
{
    pub major: u8,
    pub minor: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEncoding
{
    UTF8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle
{
    Plain,
    SingleQuote,
    DoubleQuote,
    Literal,
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStyle
{
    Block,
    Flow,
}

/// The contract between the event producer and a consumer.
///
/// The parser calls `event_span` and `event_location`
/// immediately before each of the other callbacks, with the
/// span of the event about to be delivered. All callbacks
/// are fallible; the first error returned aborts the parse
/// and is propagated to the caller unchanged.
///
/// Every method has a default no-op body so observers only
/// implement what they care about.
pub trait Handler<'de>
{
    /// Byte range of the next event. Precedes every other
    /// callback, paired with `event_location`.
    fn event_span(&mut self, location: Location) -> Result<()>
    {
        let _ = location;

        Ok(())
    }

    /// Line/column range (0 based) of the next event.
    fn event_location(
        &mut self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Result<()>
    {
        let _ = (start_line, start_col, end_line, end_col);

        Ok(())
    }

    fn start_stream(&mut self, encoding: StreamEncoding) -> Result<()>
    {
        let _ = encoding;

        Ok(())
    }

    fn end_stream(&mut self) -> Result<()>
    {
        Ok(())
    }

    fn start_document(
        &mut self,
        version: Option<VersionDirective>,
        directives: &[(Slice<'de>, Slice<'de>)],
        implicit: bool,
    ) -> Result<()>
    {
        let _ = (version, directives, implicit);

        Ok(())
    }

    fn end_document(&mut self, implicit: bool) -> Result<()>
    {
        let _ = implicit;

        Ok(())
    }

    /// .implicit marks a collection whose type the schema
    /// must infer (it carries no tag).
    fn start_mapping(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let _ = (anchor, tag, implicit, style);

        Ok(())
    }

    fn end_mapping(&mut self) -> Result<()>
    {
        Ok(())
    }

    fn start_sequence(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let _ = (anchor, tag, implicit, style);

        Ok(())
    }

    fn end_sequence(&mut self) -> Result<()>
    {
        Ok(())
    }

    fn scalar(&mut self, scalar: ScalarEvent<'de>) -> Result<()>
    {
        let _ = scalar;

        Ok(())
    }

    fn alias(&mut self, name: Slice<'de>) -> Result<()>
    {
        let _ = name;

        Ok(())
    }

    /// A comment record. Delivered when first encountered;
    /// re-parses of a backtracked region do not deliver the
    /// same comment twice.
    fn comment(&mut self, comment: &Comment<'de>) -> Result<()>
    {
        let _ = comment;

        Ok(())
    }
}
