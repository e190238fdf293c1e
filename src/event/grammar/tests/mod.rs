/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test support for the grammar engine: an event sink that
//! records the delivered stream, re-checks the structural
//! invariants every parse must uphold, and the assertion
//! macros built on top of it.


mod anchor;
mod collection;
mod comment;
mod document;
mod scalar;

use pretty_assertions::assert_eq;

use crate::{
    error::Result,
    event::{
        comment::Comment,
        types::{
            CollectionStyle, Handler, ScalarEvent, ScalarStyle, Slice, StreamEncoding,
            VersionDirective,
        },
    },
    source::Location,
};

/// Flattened, owned rendition of a delivered event, easy to
/// write expectations against.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Ev
{
    StreamStart,
    StreamEnd,
    DocStart
    {
        implicit: bool,
        version:  Option<(u8, u8)>,
    },
    DocEnd
    {
        implicit: bool,
    },
    SeqStart
    {
        anchor: Option<String>,
        tag:    Option<String>,
        flow:   bool,
    },
    SeqEnd,
    MapStart
    {
        anchor: Option<String>,
        tag:    Option<String>,
        flow:   bool,
    },
    MapEnd,
    Scalar
    {
        value:  String,
        style:  ScalarStyle,
        anchor: Option<String>,
        tag:    Option<String>,
    },
    Alias
    {
        name: String,
    },
}

/* === Expectation builders === */

pub(super) fn stream_start() -> Ev
{
    Ev::StreamStart
}

pub(super) fn stream_end() -> Ev
{
    Ev::StreamEnd
}

pub(super) fn doc() -> Ev
{
    Ev::DocStart {
        implicit: true,
        version:  None,
    }
}

pub(super) fn doc_explicit() -> Ev
{
    Ev::DocStart {
        implicit: false,
        version:  None,
    }
}

pub(super) fn doc_version(major: u8, minor: u8) -> Ev
{
    Ev::DocStart {
        implicit: false,
        version:  Some((major, minor)),
    }
}

pub(super) fn doc_end() -> Ev
{
    Ev::DocEnd { implicit: true }
}

pub(super) fn doc_end_explicit() -> Ev
{
    Ev::DocEnd { implicit: false }
}

pub(super) fn scalar(value: &str) -> Ev
{
    styled(value, ScalarStyle::Plain)
}

pub(super) fn styled(value: &str, style: ScalarStyle) -> Ev
{
    Ev::Scalar {
        value: value.into(),
        style,
        anchor: None,
        tag: None,
    }
}

pub(super) fn anchored(value: &str, anchor: &str) -> Ev
{
    Ev::Scalar {
        value:  value.into(),
        style:  ScalarStyle::Plain,
        anchor: Some(anchor.into()),
        tag:    None,
    }
}

pub(super) fn tagged(value: &str, tag: &str) -> Ev
{
    Ev::Scalar {
        value:  value.into(),
        style:  ScalarStyle::Plain,
        anchor: None,
        tag:    Some(tag.into()),
    }
}

pub(super) fn alias(name: &str) -> Ev
{
    Ev::Alias { name: name.into() }
}

pub(super) fn seq() -> Ev
{
    Ev::SeqStart {
        anchor: None,
        tag:    None,
        flow:   false,
    }
}

pub(super) fn seq_flow() -> Ev
{
    Ev::SeqStart {
        anchor: None,
        tag:    None,
        flow:   true,
    }
}

pub(super) fn seq_end() -> Ev
{
    Ev::SeqEnd
}

pub(super) fn map() -> Ev
{
    Ev::MapStart {
        anchor: None,
        tag:    None,
        flow:   false,
    }
}

pub(super) fn map_flow() -> Ev
{
    Ev::MapStart {
        anchor: None,
        tag:    None,
        flow:   true,
    }
}

pub(super) fn map_end() -> Ev
{
    Ev::MapEnd
}

/// Records the delivered stream while re-checking well
/// bracketing and per depth location monotonicity.
#[derive(Default)]
pub(super) struct EventSink
{
    pub events:   Vec<Ev>,
    pub comments: Vec<(String, bool)>,

    span:       Option<Location>,
    ends:       Vec<usize>,
    violations: Vec<String>,
}

impl EventSink
{
    pub fn new() -> Self
    {
        Self {
            // Depth 0 is the stream itself
            ends: vec![0],
            ..Self::default()
        }
    }

    /// Panic on any structural violation observed during
    /// the parse.
    pub fn check(&self)
    {
        assert_eq!(self.violations, Vec::<String>::new());
        assert_eq!(self.ends.len(), 1, "unbalanced start/end events");
        assert_eq!(self.events.first(), Some(&Ev::StreamStart));
        assert_eq!(self.events.last(), Some(&Ev::StreamEnd));
    }

    fn record(&mut self, event: Ev)
    {
        self.events.push(event);
    }

    /// A same-depth event must not begin before the
    /// previous one at that depth ended.
    fn mark(&mut self)
    {
        let span = match self.span.take()
        {
            Some(span) => span,
            None =>
            {
                self.violations.push("event delivered without a span".into());

                return;
            },
        };

        if let Some(last) = self.ends.last_mut()
        {
            if span.start < *last
            {
                self.violations.push(format!(
                    "event at {} begins before the previous event at this depth ended ({})",
                    span.start, last
                ));
            }

            *last = (*last).max(span.end);
        }
    }

    fn open(&mut self)
    {
        self.mark();
        self.ends.push(0);
    }

    fn close(&mut self)
    {
        if self.ends.len() < 2
        {
            self.violations.push("end event without matching start".into());

            return;
        }

        let inner = self.ends.pop().unwrap_or_default();

        if let Some(last) = self.ends.last_mut()
        {
            *last = (*last).max(inner);
        }

        self.span = None;
    }
}

impl<'de> Handler<'de> for EventSink
{
    fn event_span(&mut self, location: Location) -> Result<()>
    {
        self.span = Some(location);

        Ok(())
    }

    fn start_stream(&mut self, _encoding: StreamEncoding) -> Result<()>
    {
        self.mark();
        self.record(Ev::StreamStart);

        Ok(())
    }

    fn end_stream(&mut self) -> Result<()>
    {
        self.span = None;
        self.record(Ev::StreamEnd);

        Ok(())
    }

    fn start_document(
        &mut self,
        version: Option<VersionDirective>,
        _directives: &[(Slice<'de>, Slice<'de>)],
        implicit: bool,
    ) -> Result<()>
    {
        self.span = None;
        self.record(Ev::DocStart {
            implicit,
            version: version.map(|v| (v.major, v.minor)),
        });

        Ok(())
    }

    fn end_document(&mut self, implicit: bool) -> Result<()>
    {
        self.span = None;
        self.record(Ev::DocEnd { implicit });

        Ok(())
    }

    fn start_sequence(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        _implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        self.open();
        self.record(Ev::SeqStart {
            anchor: anchor.map(Into::into),
            tag:    tag.map(Into::into),
            flow:   style == CollectionStyle::Flow,
        });

        Ok(())
    }

    fn end_sequence(&mut self) -> Result<()>
    {
        self.close();
        self.record(Ev::SeqEnd);

        Ok(())
    }

    fn start_mapping(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        _implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        self.open();
        self.record(Ev::MapStart {
            anchor: anchor.map(Into::into),
            tag:    tag.map(Into::into),
            flow:   style == CollectionStyle::Flow,
        });

        Ok(())
    }

    fn end_mapping(&mut self) -> Result<()>
    {
        self.close();
        self.record(Ev::MapEnd);

        Ok(())
    }

    fn scalar(&mut self, scalar: ScalarEvent<'de>) -> Result<()>
    {
        self.mark();
        self.record(Ev::Scalar {
            value:  scalar.value.into(),
            style:  scalar.style,
            anchor: scalar.anchor.map(Into::into),
            tag:    scalar.tag.map(Into::into),
        });

        Ok(())
    }

    fn alias(&mut self, name: Slice<'de>) -> Result<()>
    {
        self.mark();
        self.record(Ev::Alias { name: name.into() });

        Ok(())
    }

    fn comment(&mut self, comment: &Comment<'de>) -> Result<()>
    {
        self.comments
            .push((comment.text.clone().into(), comment.inline));

        Ok(())
    }
}

/* === Stream level cases === */

#[test]
fn empty_stream()
{
    events!("" => stream_start(), stream_end());
}

#[test]
fn comment_only_stream()
{
    events!("# nothing here\n" => stream_start(), stream_end());
}

#[test]
fn bare_scalar_document()
{
    events!("1" =>
        stream_start(),
        doc(),
        scalar("1"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn explicit_document_markers()
{
    events!("---\na\n...\n" =>
        stream_start(),
        doc_explicit(),
        scalar("a"),
        doc_end_explicit(),
        stream_end(),
    );
}

#[test]
fn empty_explicit_document()
{
    events!("---\n" =>
        stream_start(),
        doc_explicit(),
        scalar(""),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn trailing_garbage_is_an_error()
{
    expect_syntax_error!("- a\n- b\n bad: indent\n", "before end of input");
}
