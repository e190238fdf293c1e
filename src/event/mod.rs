/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes methods for directly interacting
//! with YAML event streams.
//!
//! ## Understanding Events
//!
//! Each event delivered to a [`Handler`] represents an
//! important semantic change in the underlying YAML byte
//! stream. Broadly, these can be categorized into three
//! spaces:
//!
//! 1. Virtual / Marker
//!     - `start_stream` / `end_stream`
//!     - `start_document` / `end_document`
//!
//! 2. Nesting change (+-)
//!     - `start_mapping` / `end_mapping`
//!     - `start_sequence` / `end_sequence`
//!
//! 3. Data / Alias
//!     - `scalar`
//!     - `alias`
//!
//! Together, these are used to produce the following
//! productions:
//!
//! ```text
//! stream          := start_stream document* end_stream
//! document        := start_document content? end_document
//! content         := scalar | collection
//! collection      := sequence | mapping
//! sequence        := start_sequence node* end_sequence
//! mapping         := start_mapping (node node)* end_mapping
//! node            := alias | content
//!
//! ?               => 0 or 1 of prefix
//! *               => 0 or more of prefix
//! ```
//!
//! Every callback is preceded by `event_span` and
//! `event_location` with the byte and line/column range of
//! the event about to be delivered, and `comment` records
//! arrive interleaved when [`flag::O_COMMENTS`] is set.
//!
//! [`Handler`]: types::Handler

pub mod comment;
pub mod flag;
pub mod types;

pub(crate) mod cache;
pub(crate) mod grammar;

use crate::{
    error::Result,
    event::{flag::Flags, types::Handler},
};

/// Parse .source, delivering the event stream to .handler
/// with the default flag set.
///
/// See [`parse_events_with`] for more information.
///
/// ## Examples
///
/// ```rust
/// use yodel::{
///     error::Result,
///     event::{parse_events, types::*},
/// };
///
/// struct Scalars(Vec<String>);
///
/// impl<'de> Handler<'de> for Scalars
/// {
///     fn scalar(&mut self, scalar: ScalarEvent<'de>) -> Result<()>
///     {
///         self.0.push(scalar.value.into_owned());
///
///         Ok(())
///     }
/// }
///
/// let mut scalars = Scalars(Vec::new());
///
/// parse_events("[a yaml, event sequence]", &mut scalars)?;
///
/// assert_eq!(scalars.0, ["a yaml", "event sequence"]);
/// # Ok::<(), yodel::error::Error>(())
/// ```
pub fn parse_events<'de, H>(source: &'de str, handler: &mut H) -> Result<()>
where
    H: Handler<'de>,
{
    parse_events_with(source, flag::O_NIL, handler)
}

/// Parse .source, delivering the event stream to .handler.
///
/// The events delivered to the handler have their lifetime
/// bound to the source reference, and any scalar content
/// that needed no decoding borrows from it directly.
///
/// ## Examples
///
/// ```rust
/// use yodel::event::{
///     flag::O_COMMENTS,
///     parse_events_with,
///     types::Handler,
/// };
///
/// struct Nop;
///
/// impl<'de> Handler<'de> for Nop {}
///
/// parse_events_with("key: value # with a comment\n", O_COMMENTS, &mut Nop)?;
/// # Ok::<(), yodel::error::Error>(())
/// ```
pub fn parse_events_with<'de, H>(source: &'de str, flags: Flags, handler: &mut H) -> Result<()>
where
    H: Handler<'de>,
{
    let mut parser = grammar::Parser::new(source, flags, handler);

    parser.parse_stream()
}
