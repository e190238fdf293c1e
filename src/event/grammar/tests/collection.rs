/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for block and flow collections specifically.
//! Note that many other event types are used in this module
//! due to the nature of collections.

use super::*;

/* === BLOCK COLLECTION TESTS === */

#[test]
fn block_sequence()
{
    events!("- a\n- block\n- sequence\n" =>
        stream_start(),
        doc(),
        seq(),
        scalar("a"),
        scalar("block"),
        scalar("sequence"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn block_mapping()
{
    events!("a: 1\nb: 2\n" =>
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
}

#[test]
fn block_mapping_empty_value()
{
    events!("a:\nb: 2\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        scalar(""),
        scalar("b"),
        scalar("2"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn nested_block_mapping()
{
    events!("outer:\n  inner: value\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("outer"),
        map(),
        scalar("inner"),
        scalar("value"),
        map_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn zero_indented_sequence_under_key()
{
    events!("key:\n- a\n- b\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        seq(),
        scalar("a"),
        scalar("b"),
        seq_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn indented_sequence_under_key()
{
    events!("key:\n  - a\n  - b\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        seq(),
        scalar("a"),
        scalar("b"),
        seq_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn compact_sequence_in_sequence()
{
    events!("- - a\n  - b\n" =>
        stream_start(),
        doc(),
        seq(),
        seq(),
        scalar("a"),
        scalar("b"),
        seq_end(),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn compact_mapping_in_sequence()
{
    events!("- a: 1\n  b: 2\n" =>
        stream_start(),
        doc(),
        seq(),
        map(),
        scalar("a"),
        scalar("1"),
        scalar("b"),
        scalar("2"),
        map_end(),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn explicit_block_mapping_entry()
{
    events!("? key\n: value\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        scalar("value"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn explicit_entry_without_value()
{
    events!("? key\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        scalar(""),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn empty_sequence_entries()
{
    events!("-\n-\n" =>
        stream_start(),
        doc(),
        seq(),
        scalar(""),
        scalar(""),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn quoted_keys()
{
    events!("\"a key\": 1\n'another': 2\n" =>
        stream_start(),
        doc(),
        map(),
        styled("a key", crate::event::types::ScalarStyle::DoubleQuote),
        scalar("1"),
        styled("another", crate::event::types::ScalarStyle::SingleQuote),
        scalar("2"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

/* === FLOW COLLECTION TESTS === */

#[test]
fn flow_sequence()
{
    events!("[1, 2, 3]" =>
        stream_start(),
        doc(),
        seq_flow(),
        scalar("1"),
        scalar("2"),
        scalar("3"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn empty_flow_collections()
{
    events!("[]" =>
        stream_start(),
        doc(),
        seq_flow(),
        seq_end(),
        doc_end(),
        stream_end(),
    );

    events!("{}" =>
        stream_start(),
        doc(),
        map_flow(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_mapping()
{
    events!("{a: 1, b: 2}" =>
        stream_start(),
        doc(),
        map_flow(),
        scalar("a"),
        scalar("1"),
        scalar("b"),
        scalar("2"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_mapping_missing_values()
{
    events!("{a, b: 1, : c}" =>
        stream_start(),
        doc(),
        map_flow(),
        scalar("a"),
        scalar(""),
        scalar("b"),
        scalar("1"),
        scalar(""),
        scalar("c"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_nested()
{
    events!("[[1], {a: 2}]" =>
        stream_start(),
        doc(),
        seq_flow(),
        seq_flow(),
        scalar("1"),
        seq_end(),
        map_flow(),
        scalar("a"),
        scalar("2"),
        map_end(),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_multiline()
{
    events!("[a,\n b,\n c]\n" =>
        stream_start(),
        doc(),
        seq_flow(),
        scalar("a"),
        scalar("b"),
        scalar("c"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_pair_becomes_synthetic_mapping()
{
    events!("[a: 1, b]" =>
        stream_start(),
        doc(),
        seq_flow(),
        map_flow(),
        scalar("a"),
        scalar("1"),
        map_end(),
        scalar("b"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_json_key_adjacent_value()
{
    events!("{\"a\":1}" =>
        stream_start(),
        doc(),
        map_flow(),
        styled("a", crate::event::types::ScalarStyle::DoubleQuote),
        scalar("1"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_explicit_empty_pair()
{
    events!("{? }" =>
        stream_start(),
        doc(),
        map_flow(),
        scalar(""),
        scalar(""),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn flow_in_block_mapping_value()
{
    events!("servers: [a, b]\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("servers"),
        seq_flow(),
        scalar("a"),
        scalar("b"),
        seq_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn unclosed_flow_sequence()
{
    let error = expect_syntax_error!("servers: [a, b", "flow sequence");

    assert!(error.has_context());
}

#[test]
fn unclosed_flow_mapping()
{
    expect_syntax_error!("{a: 1", "flow mapping");
}

#[test]
fn multiline_flow_sequence_as_block_entry()
{
    // The entry is first probed as a compact mapping key,
    // which must back out cleanly when the brackets span
    // lines
    events!("- [a,\n  b]\n" =>
        stream_start(),
        doc(),
        seq(),
        seq_flow(),
        scalar("a"),
        scalar("b"),
        seq_end(),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn mixed_block_and_flow()
{
    events!("top:\n  - {k: v}\n  - [x]\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("top"),
        seq(),
        map_flow(),
        scalar("k"),
        scalar("v"),
        map_end(),
        seq_flow(),
        scalar("x"),
        seq_end(),
        seq_end(),
        map_end(),
        doc_end(),
        stream_end(),
    );
}
