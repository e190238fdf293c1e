/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Block context productions: block nodes, sequences,
//! mappings and the compact in-line collections that may
//! follow a `-`, `?` or `:` indicator.
//!
//! Collection productions emit their start event before the
//! first entry is known to parse, so each runs inside an
//! event cache frame.

use crate::{
    error::Result,
    event::{
        grammar::{ns_char, seq_spaces, Collection, Context, Parser},
        types::{CollectionStyle, Handler},
    },
    source::Location,
};

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// s-l+block-node(n,c)
    pub(in crate::event::grammar) fn s_l_block_node(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        self.descend()?;

        let result = self.s_l_block_node_inner(n, c);

        self.ascend();

        result
    }

    fn s_l_block_node_inner(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if attempt!(self, self.s_l_block_in_block(n, c))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.s_l_flow_in_block(n)))
    }

    fn s_l_block_in_block(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if attempt!(self, self.s_l_block_scalar(n, c))
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.s_l_block_collection(n, c)))
    }

    /// s-l+block-scalar(n,c): separation, optional
    /// properties, then a literal or folded scalar.
    fn s_l_block_scalar(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.s_separate(n + 1, c)?
        {
            return Ok(false);
        }

        let _ = attempt!(self, self.block_scalar_props(n + 1, c));

        if !self.cursor.check(|ch| ch == '|' || ch == '>')
        {
            return Ok(false);
        }

        self.c_l_block_scalar(n)
    }

    fn block_scalar_props(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.c_ns_properties(n, c)? && self.s_separate(n, c)?)
    }

    /// s-l+block-collection(n,c): optional properties, the
    /// rest of the line, then a sequence or mapping below.
    fn s_l_block_collection(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let _ = attempt!(self, self.block_collection_props(n + 1, c));

        if !self.s_l_comments()?
        {
            return Ok(false);
        }

        if attempt!(self, self.l_block_sequence(seq_spaces(n, c)))
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.l_block_mapping(n)))
    }

    fn block_collection_props(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.c_ns_properties(n, c)?)
    }

    /// l+block-sequence(n): entries at the detected indent
    /// below .n.
    pub(in crate::event::grammar) fn l_block_sequence(&mut self, n: i32) -> Result<bool>
    {
        Ok(framed!(self, self.l_block_sequence_inner(n)))
    }

    fn l_block_sequence_inner(&mut self, n: i32) -> Result<bool>
    {
        let m = self.detect_collection_indent(n);

        if m < 1
        {
            return Ok(false);
        }

        let start = self.cursor.pos();

        self.collection_start_event(
            Location::point(start),
            Collection::Sequence,
            CollectionStyle::Block,
        )?;

        if !plus!(self, self.block_seq_entry(n + m))
        {
            return Ok(false);
        }

        let end = self.source().trim(self.cursor.pos());

        self.collection_end_event(Location::point(end), Collection::Sequence)?;

        Ok(true)
    }

    fn block_seq_entry(&mut self, n: i32) -> Result<bool>
    {
        if !self.s_indent(n)?
        {
            return Ok(false);
        }

        self.c_l_block_seq_entry(n)
    }

    /// c-l-block-seq-entry(n): `-` not followed by content
    /// on the same byte, then the indented node.
    fn c_l_block_seq_entry(&mut self, n: i32) -> Result<bool>
    {
        if !self.cursor.eat_char(b'-')
        {
            return Ok(false);
        }

        // `-1` and friends are plain scalars, not entries
        if self.cursor.check(ns_char)
        {
            return Ok(false);
        }

        self.s_l_block_indented(n, Context::BlockIn)
    }

    /// s-l+block-indented(n,c): a compact collection on the
    /// indicator's line, a full block node, or nothing.
    pub(in crate::event::grammar) fn s_l_block_indented(
        &mut self,
        n: i32,
        c: Context,
    ) -> Result<bool>
    {
        if attempt!(self, self.compact_collection(n))
        {
            return Ok(true);
        }

        if attempt!(self, self.s_l_block_node(n, c))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.block_indented_empty()))
    }

    fn compact_collection(&mut self, n: i32) -> Result<bool>
    {
        let m = self.detect_entry_indent();

        if m < 1
        {
            return Ok(false);
        }

        if !self.s_indent(m)?
        {
            return Ok(false);
        }

        if framed!(self, self.ns_l_compact_sequence(n + 1 + m))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.ns_l_compact_mapping(n + 1 + m)))
    }

    fn block_indented_empty(&mut self) -> Result<bool>
    {
        self.e_node()?;

        self.s_l_comments()
    }

    /// ns-l-compact-sequence(n): first entry on the current
    /// line, further entries at the same indent.
    fn ns_l_compact_sequence(&mut self, n: i32) -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.check(|c| c == '-')
        {
            return Ok(false);
        }

        self.collection_start_event(
            Location::point(start),
            Collection::Sequence,
            CollectionStyle::Block,
        )?;

        if !self.c_l_block_seq_entry(n)?
        {
            return Ok(false);
        }

        star!(self, self.block_seq_entry(n));

        let end = self.source().trim(self.cursor.pos());

        self.collection_end_event(Location::point(end), Collection::Sequence)?;

        Ok(true)
    }

    /// ns-l-compact-mapping(n): first entry on the current
    /// line, further entries at the same indent.
    fn ns_l_compact_mapping(&mut self, n: i32) -> Result<bool>
    {
        let start = self.cursor.pos();

        self.collection_start_event(
            Location::point(start),
            Collection::Mapping,
            CollectionStyle::Block,
        )?;

        if !self.ns_l_block_map_entry(n)?
        {
            return Ok(false);
        }

        star!(self, self.block_map_entry_line(n));

        let end = self.source().trim(self.cursor.pos());

        self.collection_end_event(Location::point(end), Collection::Mapping)?;

        Ok(true)
    }

    /// l+block-mapping(n): entries at the detected indent
    /// below .n.
    pub(in crate::event::grammar) fn l_block_mapping(&mut self, n: i32) -> Result<bool>
    {
        Ok(framed!(self, self.l_block_mapping_inner(n)))
    }

    fn l_block_mapping_inner(&mut self, n: i32) -> Result<bool>
    {
        let m = self.detect_collection_indent(n);

        if m < 1
        {
            return Ok(false);
        }

        let start = self.cursor.pos();

        self.collection_start_event(
            Location::point(start),
            Collection::Mapping,
            CollectionStyle::Block,
        )?;

        if !plus!(self, self.block_map_entry_line(n + m))
        {
            return Ok(false);
        }

        let end = self.source().trim(self.cursor.pos());

        self.collection_end_event(Location::point(end), Collection::Mapping)?;

        Ok(true)
    }

    fn block_map_entry_line(&mut self, n: i32) -> Result<bool>
    {
        if !self.s_indent(n)?
        {
            return Ok(false);
        }

        self.ns_l_block_map_entry(n)
    }

    /// ns-l-block-map-entry(n): explicit `? key` form or an
    /// implicit single line key.
    fn ns_l_block_map_entry(&mut self, n: i32) -> Result<bool>
    {
        if framed!(self, self.block_map_explicit_entry(n))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.block_map_implicit_entry(n)))
    }

    fn block_map_explicit_entry(&mut self, n: i32) -> Result<bool>
    {
        if !self.block_map_explicit_key(n)?
        {
            return Ok(false);
        }

        if !attempt!(self, self.block_map_explicit_value(n))
        {
            self.e_node()?;
        }

        Ok(true)
    }

    /// c-l-block-map-explicit-key(n): `?` then the indented
    /// key node.
    fn block_map_explicit_key(&mut self, n: i32) -> Result<bool>
    {
        if !self.cursor.eat_char(b'?')
        {
            return Ok(false);
        }

        if self.cursor.check(ns_char)
        {
            return Ok(false);
        }

        self.s_l_block_indented(n, Context::BlockOut)
    }

    /// l-block-map-explicit-value(n): `:` at the entry's
    /// indent, then the indented value node.
    fn block_map_explicit_value(&mut self, n: i32) -> Result<bool>
    {
        if !self.s_indent(n)?
        {
            return Ok(false);
        }

        if !self.cursor.eat_char(b':')
        {
            return Ok(false);
        }

        if self.cursor.check(ns_char)
        {
            return Ok(false);
        }

        self.s_l_block_indented(n, Context::BlockOut)
    }

    /// ns-l-block-map-implicit-entry(n): a single line key
    /// (or nothing), then `: value`.
    fn block_map_implicit_entry(&mut self, n: i32) -> Result<bool>
    {
        if !attempt!(self, self.ns_s_block_map_implicit_key())
        {
            self.e_node()?;
        }

        self.block_map_implicit_value(n)
    }

    fn ns_s_block_map_implicit_key(&mut self) -> Result<bool>
    {
        // Framed: a bracketed key probe may emit collection
        // events before discovering it cannot close on the line
        if framed!(self, self.c_s_implicit_json_key(Context::BlockKey))
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.ns_s_implicit_yaml_key(Context::BlockKey)))
    }

    /// c-l-block-map-implicit-value(n): `:` then a block
    /// node, or nothing to the end of the line.
    fn block_map_implicit_value(&mut self, n: i32) -> Result<bool>
    {
        if !self.cursor.eat_char(b':')
        {
            return Ok(false);
        }

        if attempt!(self, self.s_l_block_node(n, Context::BlockOut))
        {
            return Ok(true);
        }

        self.e_node()?;

        self.s_l_comments()
    }

    /// s-l+flow-in-block(n): a flow node on its own line(s)
    /// inside block context.
    fn s_l_flow_in_block(&mut self, n: i32) -> Result<bool>
    {
        if !self.s_separate(n + 1, Context::FlowOut)?
        {
            return Ok(false);
        }

        if !self.ns_flow_node(n + 1, Context::FlowOut)?
        {
            return Ok(false);
        }

        self.s_l_comments()
    }
}
