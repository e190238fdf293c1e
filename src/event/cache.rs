/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A stack of pending event lists used to hide speculative
//! parses from the consumer.
//!
//! Grammar rules that may fail after emitting inner events
//! open a frame before doing so; on success the frame is
//! flushed into its parent (or handed to the caller for
//! delivery when it was the bottom frame), on failure it is
//! discarded wholesale.

use crate::event::types::Event;

/// Outcome of flushing the top frame.
#[derive(Debug)]
pub(crate) enum Flushed<'de>
{
    /// The frame's events were appended to its parent
    /// frame; nothing reached the consumer yet
    Parent,
    /// The bottom frame closed; the caller must deliver
    /// these events to the consumer
    Deliver(Vec<Event<'de>>),
}

#[derive(Debug, Default)]
pub(crate) struct EventCache<'de>
{
    frames: Vec<Vec<Event<'de>>>,
}

impl<'de> EventCache<'de>
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Open a new speculative frame. Until the frame is
    /// flushed or discarded, pushed events accumulate in
    /// it rather than reaching the consumer.
    pub fn push_frame(&mut self)
    {
        self.frames.push(Vec::new());
    }

    /// Commit the top frame.
    pub fn flush_frame(&mut self) -> Flushed<'de>
    {
        let events = self
            .frames
            .pop()
            .unwrap_or_default();

        match self.frames.last_mut()
        {
            Some(parent) =>
            {
                parent.extend(events);

                Flushed::Parent
            },
            None => Flushed::Deliver(events),
        }
    }

    /// Throw away the top frame and everything in it.
    pub fn discard_frame(&mut self)
    {
        self.frames.pop();
    }

    /// Discard frames until only .depth remain. Used when a
    /// failed speculation is unwound past rules that opened
    /// frames of their own.
    pub fn truncate(&mut self, depth: usize)
    {
        self.frames.truncate(depth);
    }

    pub fn depth(&self) -> usize
    {
        self.frames.len()
    }

    /// Buffer .event in the top frame, or return it when no
    /// frame is open and it should go straight to the
    /// consumer.
    pub fn push(&mut self, event: Event<'de>) -> Option<Event<'de>>
    {
        match self.frames.last_mut()
        {
            Some(frame) =>
            {
                frame.push(event);

                None
            },
            None => Some(event),
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        event::types::{EventData, ScalarEvent, ScalarStyle},
        source::Location,
    };

    fn scalar(value: &str) -> Event<'_>
    {
        Event::new(
            Location::point(0),
            EventData::Scalar(ScalarEvent {
                value:           value.into(),
                anchor:          None,
                tag:             None,
                plain_implicit:  true,
                quoted_implicit: false,
                style:           ScalarStyle::Plain,
            }),
        )
    }

    #[test]
    fn push_without_frame_passes_through()
    {
        let mut cache = EventCache::new();

        assert!(cache.push(scalar("a")).is_some());
    }

    #[test]
    fn frames_buffer_and_flush_to_parent()
    {
        let mut cache = EventCache::new();

        cache.push_frame();
        cache.push_frame();
        assert!(cache.push(scalar("a")).is_none());

        assert!(matches!(cache.flush_frame(), Flushed::Parent));
        assert_eq!(cache.depth(), 1);

        match cache.flush_frame()
        {
            Flushed::Deliver(events) => assert_eq!(events.len(), 1),
            Flushed::Parent => panic!("expected delivery from the bottom frame"),
        }
    }

    #[test]
    fn discard_drops_buffered_events()
    {
        let mut cache = EventCache::new();

        cache.push_frame();
        cache.push(scalar("a"));
        cache.push(scalar("b"));
        cache.discard_frame();

        assert_eq!(cache.depth(), 0);
        assert!(cache.push(scalar("c")).is_some());
    }
}
