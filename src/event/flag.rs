/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Configuration flags used to control aspects of the event
//! production pipeline.
//!
//! Read the documentation on each flag's `O_*` constant for
//! an explanation of it's purpose.
//!
//! ```
//! # use yodel::event::flag::*;
//! // You can use bitwise operators
//! let bitwise = O_NIL | O_COMMENTS;
//!
//! // Or if you prefer, method chaining
//! let chaining = Flags::new().comments();
//!
//! assert_eq!(bitwise, chaining);
//! ```

use bitflags::bitflags;

/// An empty, zeroed flag set. This is the default set,
/// with all other flags disabled.
pub const O_NIL: Flags = Flags::empty();

/// Set to collect comment records during the parse.
///
/// Each `# ...` sequence in the stream is recorded with its
/// byte span and an inline marker, delivered to the
/// handler's `comment` callback, and kept for attachment to
/// the document tree once the stream ends. When unset,
/// comments are skipped over like any other ignored
/// whitespace.
pub const O_COMMENTS: Flags = Flags::COMMENTS;

impl Flags
{
    /// Instantiates a new, empty flag set
    pub const fn new() -> Self
    {
        O_NIL
    }

    /// Nulls the flag set, resetting it to empty
    pub const fn nil(self) -> Self
    {
        O_NIL
    }

    /// Applies [`O_COMMENTS`] to this flag set
    pub const fn comments(self) -> Self
    {
        self.union(O_COMMENTS)
    }

    /// Removes [`O_COMMENTS`] from this flag set
    pub const fn no_comments(self) -> Self
    {
        self.difference(O_COMMENTS)
    }
}

bitflags! {
    /// Controls aspects of event production, read each flag for
    /// more information.
    #[derive(Default)]
    pub struct Flags: u32 {
        /// See [`O_COMMENTS`]
        const COMMENTS      = 0b00000001;
    }
}
