/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for scalars of every style: plain folding,
//! quote escapes, and block scalar chomping.

use super::*;
use pretty_assertions::assert_eq;
use crate::event::types::ScalarStyle::*;

/* === Plain scalars === */

#[test]
fn plain_single_line()
{
    events!("hello world" =>
        stream_start(),
        doc(),
        scalar("hello world"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_trailing_blanks_dropped()
{
    events!("hello   \n" =>
        stream_start(),
        doc(),
        scalar("hello"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_folds_single_break_to_space()
{
    events!("a\nb\n" =>
        stream_start(),
        doc(),
        scalar("a b"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_folds_break_run_to_fewer_breaks()
{
    // One break folds to a space; k+1 breaks fold to k
    events!("a\n\nb\n" =>
        stream_start(),
        doc(),
        scalar("a\nb"),
        doc_end(),
        stream_end(),
    );

    events!("a\n\n\nb\n" =>
        stream_start(),
        doc(),
        scalar("a\n\nb"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_embedded_colon_and_hash()
{
    events!("a:b#c" =>
        stream_start(),
        doc(),
        scalar("a:b#c"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_stops_at_comment()
{
    events!("value # note\n" =>
        stream_start(),
        doc(),
        scalar("value"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn plain_leading_indicator_with_safe_follower()
{
    events!("-1" =>
        stream_start(),
        doc(),
        scalar("-1"),
        doc_end(),
        stream_end(),
    );

    events!(":x" =>
        stream_start(),
        doc(),
        scalar(":x"),
        doc_end(),
        stream_end(),
    );
}

/* === Single quoted === */

#[test]
fn single_quoted_simple()
{
    events!("'hello'" =>
        stream_start(),
        doc(),
        styled("hello", SingleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn single_quoted_quote_pair()
{
    events!("'it''s'" =>
        stream_start(),
        doc(),
        styled("it's", SingleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn single_quoted_folds()
{
    events!("'a\nb'" =>
        stream_start(),
        doc(),
        styled("a b", SingleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn single_quoted_preserves_indicators()
{
    events!("'[not, a, list]'" =>
        stream_start(),
        doc(),
        styled("[not, a, list]", SingleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn single_quoted_unterminated()
{
    expect_syntax_error!("'never closed", "never terminated");
}

/* === Double quoted === */

#[test]
fn double_quoted_escapes()
{
    events!(r#""a\tb\nc\\d\"e""# =>
        stream_start(),
        doc(),
        styled("a\tb\nc\\d\"e", DoubleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn double_quoted_unicode_escapes()
{
    events!(r#""\x41☃\U0001F600""# =>
        stream_start(),
        doc(),
        styled("A\u{2603}\u{1F600}", DoubleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn double_quoted_folds()
{
    events!("\"a\nb\"" =>
        stream_start(),
        doc(),
        styled("a b", DoubleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn double_quoted_escaped_break_continuation()
{
    // The escaped break vanishes, keeping the blanks before
    // it and eating the next line's indentation
    events!("\"fold \\\n  me\"" =>
        stream_start(),
        doc(),
        styled("fold me", DoubleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn double_quoted_escaped_space_survives_folding()
{
    events!("\"a\\ \nb\"" =>
        stream_start(),
        doc(),
        styled("a  b", DoubleQuote),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn double_quoted_unknown_escape()
{
    expect_syntax_error!(r#""\q""#, "unknown escape");
}

/* === Block scalars === */

#[test]
fn literal_keeps_breaks()
{
    events!("|\n a\n b\n" =>
        stream_start(),
        doc(),
        styled("a\nb\n", Literal),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn folded_joins_lines()
{
    events!(">\n a\n b\n" =>
        stream_start(),
        doc(),
        styled("a b\n", Folded),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn folded_empty_line_becomes_break()
{
    events!(">\n a\n\n b\n" =>
        stream_start(),
        doc(),
        styled("a\nb\n", Folded),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn folded_more_indented_lines_keep_breaks()
{
    events!(">\n a\n  b\n c\n" =>
        stream_start(),
        doc(),
        styled("a\n b\nc\n", Folded),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn chomping_strip_clip_keep()
{
    events!("|-\n a\n\n\n" =>
        stream_start(),
        doc(),
        styled("a", Literal),
        doc_end(),
        stream_end(),
    );

    events!("|\n a\n\n\n" =>
        stream_start(),
        doc(),
        styled("a\n", Literal),
        doc_end(),
        stream_end(),
    );

    events!("|+\n a\n\n\n" =>
        stream_start(),
        doc(),
        styled("a\n\n\n", Literal),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn explicit_indentation_indicator()
{
    // The indicator is relative to the parent node's
    // indent; deeper content keeps its extra spaces
    events!("key: |2\n  a\n   b\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        styled("a\n b\n", Literal),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn indicator_and_chomping_either_order()
{
    events!("key: |2-\n  a\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        styled("a", Literal),
        map_end(),
        doc_end(),
        stream_end(),
    );

    events!("key: |-2\n  a\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        styled("a", Literal),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn literal_in_mapping_value()
{
    events!("key: |\n  line1\n  line2\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("key"),
        styled("line1\nline2\n", Literal),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn block_scalar_leading_empty_too_deep()
{
    expect_syntax_error!("|\n    \n a\n", "block scalar header");
}

#[test]
fn zero_indentation_indicator_rejected()
{
    expect_syntax_error!("|0\n a\n", "block scalar header");
}

/* === Implicit key limit === */

#[test]
fn implicit_key_under_limit_parses()
{
    let key = "k".repeat(1024);
    let yaml = format!("{}: 1\n", key);

    events!(yaml.as_str() =>
        stream_start(),
        doc(),
        map(),
        scalar(&key),
        scalar("1"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn implicit_key_over_limit_fails()
{
    let key = "k".repeat(1025);
    let yaml = format!("{}: 1\n", key);

    expect_syntax_error!(yaml.as_str(), "before end of input");
}
