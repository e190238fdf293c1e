/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Comment records collected during a parse.
//!
//! The grammar engine may visit the same `#` several times
//! while speculating, so records are keyed by their start
//! byte with insert-if-absent semantics; only the first
//! encounter produces (and delivers) a record.

use std::collections::BTreeMap;

use crate::{event::types::Slice, source::Location};

/// A single `# ...` comment, including the leading `#` but
/// excluding the line break.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment<'de>
{
    /// Span of the comment text in the stream
    pub location: Location,
    /// The raw text, `#` included
    pub text:     Slice<'de>,
    /// Did the comment share its line with node content to
    /// its left?
    pub inline:   bool,
}

/// Offset keyed store of every comment seen by the grammar
/// engine, deduplicated across backtracking retries.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommentMap<'de>
{
    map: BTreeMap<usize, Comment<'de>>,
}

impl<'de> CommentMap<'de>
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Record .comment, returning whether this was its
    /// first encounter. A retry re-parsing an already known
    /// comment leaves the original record untouched.
    pub fn insert(&mut self, comment: Comment<'de>) -> bool
    {
        use std::collections::btree_map::Entry;

        match self.map.entry(comment.location.start)
        {
            Entry::Vacant(slot) =>
            {
                slot.insert(comment);

                true
            },
            Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize
    {
        self.map.len()
    }
}
