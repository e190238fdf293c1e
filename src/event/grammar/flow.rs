/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Flow context productions: bracketed sequences and
//! mappings, their entries, and the single-pair form that
//! wraps itself in a synthetic mapping.
//!
//! A `[` or `{` commits the production: a missing terminus
//! or continuation is a hard error, never a backtrack.

use crate::{
    error::{internal::ErrorCode, Result},
    event::{
        grammar::{ns_plain_safe, Collection, Context, Parser, MAX_IMPLICIT_KEY_LENGTH},
        types::{CollectionStyle, Handler},
    },
    source::Location,
};

impl<'de, 'h, H> Parser<'de, 'h, H>
where
    H: Handler<'de>,
{
    /// ns-flow-node(n,c): alias, content, or properties
    /// with optional content.
    pub(in crate::event::grammar) fn ns_flow_node(&mut self, n: i32, c: Context) -> Result<bool>
    {
        self.descend()?;

        let result = self.ns_flow_node_inner(n, c);

        self.ascend();

        result
    }

    fn ns_flow_node_inner(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if attempt!(self, self.c_ns_alias_node())
        {
            return Ok(true);
        }

        if attempt!(self, self.ns_flow_content(n, c))
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.flow_props_node(n, c)))
    }

    fn flow_props_node(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.c_ns_properties(n, c)?
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_sep_content(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_sep_content(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.ns_flow_content(n, c)?)
    }

    /// ns-flow-yaml-node(n,c): like ns-flow-node but the
    /// content may only be a plain scalar. Used for
    /// mapping keys.
    pub(in crate::event::grammar) fn ns_flow_yaml_node(
        &mut self,
        n: i32,
        c: Context,
    ) -> Result<bool>
    {
        if attempt!(self, self.c_ns_alias_node())
        {
            return Ok(true);
        }

        if attempt!(self, self.ns_plain_scalar(n, c))
        {
            return Ok(true);
        }

        Ok(attempt!(self, self.flow_props_yaml_node(n, c)))
    }

    fn flow_props_yaml_node(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.c_ns_properties(n, c)?
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_sep_plain(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_sep_plain(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.ns_plain_scalar(n, c)?)
    }

    /// c-flow-json-node(n,c): optional properties then
    /// bracketed or quoted content.
    pub(in crate::event::grammar) fn c_flow_json_node(
        &mut self,
        n: i32,
        c: Context,
    ) -> Result<bool>
    {
        let _ = attempt!(self, self.json_node_props(n, c));

        self.c_flow_json_content(n, c)
    }

    fn json_node_props(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.c_ns_properties(n, c)? && self.s_separate(n, c)?)
    }

    /// ns-flow-content(n,c): plain scalar or JSON-ish
    /// content.
    fn ns_flow_content(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if attempt!(self, self.ns_plain_scalar(n, c))
        {
            return Ok(true);
        }

        self.c_flow_json_content(n, c)
    }

    /// c-flow-json-content(n,c): flow collection or quoted
    /// scalar.
    fn c_flow_json_content(&mut self, n: i32, c: Context) -> Result<bool>
    {
        match self.cursor.peek_char()
        {
            Some('[') => self.c_flow_sequence(n, c),
            Some('{') => self.c_flow_mapping(n, c),
            Some('\'') => self.c_single_quoted(n, c),
            Some('"') => self.c_double_quoted(n, c),
            _ => Ok(false),
        }
    }

    /// c-flow-sequence(n,c)
    pub(in crate::event::grammar) fn c_flow_sequence(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'[')
        {
            return Ok(false);
        }

        self.collection_start_event(
            Location::new(start, start + 1),
            Collection::Sequence,
            CollectionStyle::Flow,
        )?;

        let _ = self.s_separate(n, c)?;

        self.flow_seq_entries(n, c.in_flow())?;

        if !self.cursor.eat_char(b']')
        {
            // Key contexts are single line probes; give the other
            // interpretations a chance instead of erroring
            if c.is_key()
            {
                return Ok(false);
            }

            return Err(self.error(ErrorCode::MissingFlowSequenceEntryOrEnd));
        }

        let end = self.cursor.pos();

        self.collection_end_event(Location::new(end - 1, end), Collection::Sequence)?;

        Ok(true)
    }

    fn flow_seq_entries(&mut self, n: i32, c: Context) -> Result<()>
    {
        loop
        {
            if !attempt!(self, self.ns_flow_seq_entry(n, c))
            {
                break;
            }

            let _ = self.s_separate(n, c)?;

            if !self.cursor.eat_char(b',')
            {
                break;
            }

            let _ = self.s_separate(n, c)?;
        }

        Ok(())
    }

    /// ns-flow-seq-entry(n,c): a single pair (wrapped in a
    /// synthetic mapping) or a plain node.
    fn ns_flow_seq_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if framed!(self, self.ns_flow_pair(n, c))
        {
            return Ok(true);
        }

        self.ns_flow_node(n, c)
    }

    /// c-flow-mapping(n,c)
    pub(in crate::event::grammar) fn c_flow_mapping(&mut self, n: i32, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.cursor.eat_char(b'{')
        {
            return Ok(false);
        }

        self.collection_start_event(
            Location::new(start, start + 1),
            Collection::Mapping,
            CollectionStyle::Flow,
        )?;

        let _ = self.s_separate(n, c)?;

        self.flow_map_entries(n, c.in_flow())?;

        if !self.cursor.eat_char(b'}')
        {
            if c.is_key()
            {
                return Ok(false);
            }

            return Err(self.error(ErrorCode::MissingFlowMappingEntryOrEnd));
        }

        let end = self.cursor.pos();

        self.collection_end_event(Location::new(end - 1, end), Collection::Mapping)?;

        Ok(true)
    }

    fn flow_map_entries(&mut self, n: i32, c: Context) -> Result<()>
    {
        loop
        {
            if !attempt!(self, self.ns_flow_map_entry(n, c))
            {
                break;
            }

            let _ = self.s_separate(n, c)?;

            if !self.cursor.eat_char(b',')
            {
                break;
            }

            let _ = self.s_separate(n, c)?;
        }

        Ok(())
    }

    /// ns-flow-map-entry(n,c)
    fn ns_flow_map_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if attempt!(self, self.flow_map_explicit(n, c))
        {
            return Ok(true);
        }

        self.ns_flow_map_implicit_entry(n, c)
    }

    /// `? ` introduced entry; the pair itself may be
    /// entirely empty.
    fn flow_map_explicit(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.cursor.eat_char(b'?')
        {
            return Ok(false);
        }

        if !self.s_separate(n, c)?
        {
            return Ok(false);
        }

        if framed!(self, self.ns_flow_map_implicit_entry(n, c))
        {
            return Ok(true);
        }

        self.e_node()?;
        self.e_node()?;

        Ok(true)
    }

    /// ns-flow-map-implicit-entry(n,c): yaml key, empty
    /// key, or json key entry.
    fn ns_flow_map_implicit_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if framed!(self, self.flow_map_yaml_key_entry(n, c))
        {
            return Ok(true);
        }

        if framed!(self, self.flow_map_empty_key_entry(n, c))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.flow_map_json_key_entry(n, c)))
    }

    fn flow_map_yaml_key_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.ns_flow_yaml_node(n, c)?
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_map_separate_value_opt_sep(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_map_separate_value_opt_sep(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let _ = self.s_separate(n, c)?;

        self.c_ns_flow_map_separate_value(n, c)
    }

    fn flow_map_empty_key_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        self.e_node()?;

        self.c_ns_flow_map_separate_value(n, c)
    }

    fn flow_map_json_key_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.c_flow_json_node(n, c)?
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_map_adjacent_value_opt_sep(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_map_adjacent_value_opt_sep(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let _ = self.s_separate(n, c)?;

        self.c_ns_flow_map_adjacent_value(n, c)
    }

    /// c-ns-flow-map-separate-value(n,c): `:` that is not
    /// the start of a plain scalar, then a separated value
    /// or nothing.
    fn c_ns_flow_map_separate_value(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.cursor.eat_char(b':')
        {
            return Ok(false);
        }

        // A ':' glued to a plain-safe char belongs to a plain
        // scalar, not to this entry
        if matches!(self.cursor.peek_char(), Some(ch) if ns_plain_safe(ch, c))
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_value_node(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_value_node(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.s_separate(n, c)? && self.ns_flow_node(n, c)?)
    }

    /// c-ns-flow-map-adjacent-value(n,c): `:` directly
    /// after a JSON-ish key.
    fn c_ns_flow_map_adjacent_value(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.cursor.eat_char(b':')
        {
            return Ok(false);
        }

        if attempt!(self, self.flow_adjacent_value_node(n, c))
        {
            return Ok(true);
        }

        self.e_node()
    }

    fn flow_adjacent_value_node(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let _ = self.s_separate(n, c)?;

        self.ns_flow_node(n, c)
    }

    /// ns-flow-pair(n,c): a single key/value pair acting as
    /// a sequence entry, wrapped in a synthetic mapping.
    /// The caller must run this inside a frame.
    fn ns_flow_pair(&mut self, n: i32, c: Context) -> Result<bool>
    {
        let start = self.cursor.pos();

        if peek!(self, self.flow_pair_explicit_probe(n, c))
        {
            self.bare_collection_start_event(
                Location::point(start),
                Collection::Mapping,
                CollectionStyle::Flow,
            )?;

            if !self.flow_pair_explicit_probe(n, c)?
            {
                return Err(self.internal_error("flow pair probe diverged from its re-parse"));
            }

            if !self.ns_flow_map_explicit_pair(n, c)?
            {
                return Ok(false);
            }
        }
        else
        {
            self.bare_collection_start_event(
                Location::point(start),
                Collection::Mapping,
                CollectionStyle::Flow,
            )?;

            if !self.ns_flow_pair_entry(n, c)?
            {
                return Ok(false);
            }
        }

        let end = self.cursor.pos();

        self.collection_end_event(Location::point(end), Collection::Mapping)?;

        Ok(true)
    }

    fn flow_pair_explicit_probe(&mut self, n: i32, c: Context) -> Result<bool>
    {
        Ok(self.cursor.eat_char(b'?') && self.s_separate(n, c)?)
    }

    fn ns_flow_map_explicit_pair(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if framed!(self, self.ns_flow_map_implicit_entry(n, c))
        {
            return Ok(true);
        }

        self.e_node()?;
        self.e_node()?;

        Ok(true)
    }

    /// ns-flow-pair-entry(n,c): implicit-key limited
    /// variants of the mapping entries.
    fn ns_flow_pair_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if framed!(self, self.flow_pair_yaml_key_entry(n, c))
        {
            return Ok(true);
        }

        if framed!(self, self.flow_map_empty_key_entry(n, c))
        {
            return Ok(true);
        }

        Ok(framed!(self, self.flow_pair_json_key_entry(n, c)))
    }

    fn flow_pair_yaml_key_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.ns_s_implicit_yaml_key(Context::FlowKey)?
        {
            return Ok(false);
        }

        self.c_ns_flow_map_separate_value(n, c)
    }

    fn flow_pair_json_key_entry(&mut self, n: i32, c: Context) -> Result<bool>
    {
        if !self.c_s_implicit_json_key(Context::FlowKey)?
        {
            return Ok(false);
        }

        self.c_ns_flow_map_adjacent_value(n, c)
    }

    /// ns-s-implicit-yaml-key(c): a single line plain key
    /// of at most 1024 bytes.
    pub(in crate::event::grammar) fn ns_s_implicit_yaml_key(&mut self, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.ns_flow_yaml_node(0, c)?
        {
            return Ok(false);
        }

        let end = self.cursor.pos();

        let _ = self.s_separate_in_line()?;

        Ok(end - start <= MAX_IMPLICIT_KEY_LENGTH)
    }

    /// c-s-implicit-json-key(c): a single line quoted or
    /// bracketed key of at most 1024 bytes.
    pub(in crate::event::grammar) fn c_s_implicit_json_key(&mut self, c: Context)
        -> Result<bool>
    {
        let start = self.cursor.pos();

        if !self.c_flow_json_node(0, c)?
        {
            return Ok(false);
        }

        let end = self.cursor.pos();

        let _ = self.s_separate_in_line()?;

        Ok(end - start <= MAX_IMPLICIT_KEY_LENGTH)
    }
}
