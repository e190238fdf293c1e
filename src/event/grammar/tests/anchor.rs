/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for node properties: anchors, aliases and
//! tags in their various spellings.

use super::*;
use crate::event::types::ScalarStyle;

#[test]
fn anchor_and_alias_in_sequence()
{
    events!("- &a 1\n- *a\n" =>
        stream_start(),
        doc(),
        seq(),
        anchored("1", "a"),
        alias("a"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn anchored_collection()
{
    events!("&list\n- 1\n" =>
        stream_start(),
        doc(),
        Ev::SeqStart {
            anchor: Some("list".into()),
            tag:    None,
            flow:   false,
        },
        scalar("1"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn anchor_in_flow()
{
    events!("[&x 1, *x]" =>
        stream_start(),
        doc(),
        seq_flow(),
        anchored("1", "x"),
        alias("x"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn secondary_tag_shorthand()
{
    events!("!!str 1\n" =>
        stream_start(),
        doc(),
        tagged("1", "tag:yaml.org,2002:str"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn primary_tag_shorthand()
{
    events!("!local 1\n" =>
        stream_start(),
        doc(),
        tagged("1", "!local"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn verbatim_tag()
{
    events!("!<tag:example.com,2000:thing> 1\n" =>
        stream_start(),
        doc(),
        tagged("1", "tag:example.com,2000:thing"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn non_specific_tag()
{
    events!("! 1\n" =>
        stream_start(),
        doc(),
        tagged("1", "!"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn percent_escaped_tag_suffix()
{
    events!("!e%21 1\n" =>
        stream_start(),
        doc(),
        tagged("1", "!e!"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn tag_then_anchor_and_anchor_then_tag()
{
    events!("!!str &a 1\n" =>
        stream_start(),
        doc(),
        Ev::Scalar {
            value:  "1".into(),
            style:  ScalarStyle::Plain,
            anchor: Some("a".into()),
            tag:    Some("tag:yaml.org,2002:str".into()),
        },
        doc_end(),
        stream_end(),
    );

    events!("&a !!str 1\n" =>
        stream_start(),
        doc(),
        Ev::Scalar {
            value:  "1".into(),
            style:  ScalarStyle::Plain,
            anchor: Some("a".into()),
            tag:    Some("tag:yaml.org,2002:str".into()),
        },
        doc_end(),
        stream_end(),
    );
}

#[test]
fn properties_with_empty_scalar()
{
    events!("key: &empty\nother: 1\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        anchored("", "empty"),
        scalar("other"),
        scalar("1"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn tagged_flow_collection()
{
    events!("!!set {a, b}\n" =>
        stream_start(),
        doc(),
        Ev::MapStart {
            anchor: None,
            tag:    Some("tag:yaml.org,2002:set".into()),
            flow:   true,
        },
        scalar("a"),
        scalar(""),
        scalar("b"),
        scalar(""),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn anchor_name_stops_at_flow_indicators()
{
    events!("[&a 1]" =>
        stream_start(),
        doc(),
        seq_flow(),
        anchored("1", "a"),
        seq_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn bare_anchor_is_an_error()
{
    expect_syntax_error!("& x\n", "invalid characters");
}
