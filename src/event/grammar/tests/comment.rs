/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for comment capture: inline detection and
//! deduplication across backtracking retries.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn full_line_comment_is_not_inline()
{
    let sink = events!("# leading\na\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end(),
        stream_end(),
    );

    assert_eq!(sink.comments, vec![("# leading".to_string(), false)]);
}

#[test]
fn trailing_comment_is_inline()
{
    let sink = events!("a # trailing\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end(),
        stream_end(),
    );

    assert_eq!(sink.comments, vec![("# trailing".to_string(), true)]);
}

#[test]
fn indented_comment_line_is_not_inline()
{
    let sink = events!("a:\n  # note\n  b: 1\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        map(),
        scalar("b"),
        scalar("1"),
        map_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );

    assert_eq!(sink.comments, vec![("# note".to_string(), false)]);
}

#[test]
fn comments_survive_backtracking_once()
{
    // The value's trailing comment region is parsed more
    // than once while the mapping entry speculates; the
    // record must not duplicate
    let sink = events!("a: 1 # once\nb: 2\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        scalar("1"),
        scalar("b"),
        scalar("2"),
        map_end(),
        doc_end(),
        stream_end(),
    );

    assert_eq!(sink.comments, vec![("# once".to_string(), true)]);
}

#[test]
fn comment_between_documents()
{
    let sink = events!("a\n...\n# between\n---\nb\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end_explicit(),
        doc_explicit(),
        scalar("b"),
        doc_end(),
        stream_end(),
    );

    assert_eq!(sink.comments, vec![("# between".to_string(), false)]);
}

#[test]
fn multiple_comments_in_order()
{
    let sink = events!("# one\na: 1 # two\n# three\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        scalar("1"),
        map_end(),
        doc_end(),
        stream_end(),
    );

    assert_eq!(
        sink.comments,
        vec![
            ("# one".to_string(), false),
            ("# two".to_string(), true),
            ("# three".to_string(), false),
        ]
    );
}
