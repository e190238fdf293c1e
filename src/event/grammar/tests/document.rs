/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Test cases for stream framing: directives, document
//! markers and the boundary guard.

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn yaml_directive_sets_version()
{
    events!("%YAML 1.2\n---\na\n" =>
        stream_start(),
        doc_version(1, 2),
        scalar("a"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn directives_require_document_start()
{
    expect_syntax_error!("%YAML 1.2\na\n", "document start");
}

#[test]
fn duplicate_version_directive()
{
    expect_syntax_error!("%YAML 1.2\n%YAML 1.2\n---\na\n", "duplicate %YAML");
}

#[test]
fn reserved_directives_are_skipped()
{
    events!("%FOO bar baz\n---\na\n" =>
        stream_start(),
        doc_explicit(),
        scalar("a"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn tag_directive_resolves_named_handles()
{
    events!("%TAG !e! tag:example.com,2000:app/\n---\n!e!thing a\n" =>
        stream_start(),
        doc_explicit(),
        tagged("a", "tag:example.com,2000:app/thing"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn duplicate_tag_directive()
{
    expect_syntax_error!(
        "%TAG !e! tag:one/\n%TAG !e! tag:two/\n---\na\n",
        "duplicate %TAG"
    );
}

#[test]
fn undefined_named_handle()
{
    expect_syntax_error!("!e!thing a\n", "undefined handle");
}

#[test]
fn multiple_documents()
{
    events!("a\n---\nb\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end(),
        doc_explicit(),
        scalar("b"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn document_suffix_closes_explicitly()
{
    events!("a\n...\nb\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end_explicit(),
        doc(),
        scalar("b"),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn tag_directives_reset_between_documents()
{
    expect_syntax_error!(
        "%TAG !e! tag:example.com,2000:\n---\n!e!a x\n...\n!e!b y\n",
        "undefined handle"
    );
}

#[test]
fn boundary_guard_stops_plain_scalars()
{
    // Without the guard the plain scalar would swallow the
    // marker line as folded content
    events!("a\n...\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end_explicit(),
        stream_end(),
    );
}

#[test]
fn boundary_guard_inside_mapping()
{
    events!("a: 1\n---\nb: 2\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        scalar("1"),
        map_end(),
        doc_end(),
        doc_explicit(),
        map(),
        scalar("b"),
        scalar("2"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn dashes_inside_content_are_not_markers()
{
    events!("a: --- b\n" =>
        stream_start(),
        doc(),
        map(),
        scalar("a"),
        scalar("--- b"),
        map_end(),
        doc_end(),
        stream_end(),
    );
}

#[test]
fn document_end_with_trailing_comment()
{
    events!("a\n... # done\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end_explicit(),
        stream_end(),
    );
}

#[test]
fn bom_is_accepted_in_prefix()
{
    events!("\u{FEFF}a\n" =>
        stream_start(),
        doc(),
        scalar("a"),
        doc_end(),
        stream_end(),
    );
}
