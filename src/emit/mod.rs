/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Serialisation of values and parsed documents back into
//! YAML text.
//!
//! Plain [`Value`]s emit deterministically in block style.
//! Parsed [`Document`] trees additionally re-emit comments,
//! keep flow styling, and write anchors for nodes that are
//! referenced more than once: node identity is the slotmap
//! key, so a repeated [`NodeId`] *is* a repeated object.

mod layout;

use slotmap::SecondaryMap;

use crate::{
    error::{
        internal::{self, SourceError},
        Error, Result,
    },
    event::{
        comment::Comment,
        types::{CollectionStyle, ScalarStyle},
    },
    node::{Document, Node, NodeId, Tree},
    value::{resolve_plain, Value},
};

use layout::Layout;

/// Options accepted by the dump family.
#[derive(Debug, Clone)]
pub struct DumpOptions
{
    /// Spaces per nesting level
    pub indentation:     usize,
    /// Column budget for breakable separators
    pub line_width:      usize,
    /// Indent block sequences below their mapping key
    pub sequence_indent: bool,
    /// Permit anchors and aliases when emitting trees
    pub aliases:         bool,
    /// Allow-list of application tags; None permits all
    pub permitted_tags:  Option<Vec<String>>,
}

impl Default for DumpOptions
{
    fn default() -> Self
    {
        Self {
            indentation:     2,
            line_width:      79,
            sequence_indent: false,
            aliases:         true,
            permitted_tags:  None,
        }
    }
}

/// Serialise .value as one YAML document.
///
/// ## Examples
///
/// ```rust
/// use yodel::Value;
///
/// let value = Value::Sequence(vec![Value::Int(1), Value::Int(2)]);
///
/// assert_eq!(yodel::dump(&value), "---\n- 1\n- 2\n");
/// ```
pub fn dump(value: &Value) -> String
{
    dump_with(value, &DumpOptions::default())
}

/// Serialise .value as one YAML document with the given
/// options.
pub fn dump_with(value: &Value, options: &DumpOptions) -> String
{
    let mut layout = Layout::new(options.line_width);

    value_document(&mut layout, value, options);

    layout.finish()
}

/// Serialise every value as its own document in one stream.
pub fn dump_stream(values: &[Value]) -> String
{
    let options = DumpOptions::default();
    let mut layout = Layout::new(options.line_width);

    for value in values
    {
        value_document(&mut layout, value, &options);
    }

    layout.finish()
}

/// Re-emit a parsed (and possibly edited) document,
/// including its comments, styles and anchors.
pub fn dump_document(document: &Document<'_>) -> Result<String>
{
    dump_document_with(document, &DumpOptions::default())
}

/// Re-emit a parsed document with the given options.
pub fn dump_document_with(document: &Document<'_>, options: &DumpOptions) -> Result<String>
{
    let root = match document.root()
    {
        Some(root) => root,
        None => return Ok(String::new()),
    };

    let mut emitter = TreeEmitter::new(document.tree(), options);

    emitter.analyze(root)?;

    let mut layout = Layout::new(options.line_width);

    if !document.implicit_start
    {
        layout.text("---");

        match is_inline_node(document.tree(), root)
        {
            true => layout.text(" "),
            false => layout.break_line(),
        }
    }

    emitter.emit_leading_comments(&mut layout, root);
    emitter.emit_node(&mut layout, root)?;
    emitter.emit_trailing_comments(&mut layout, root);

    Ok(layout.finish())
}

/// [`dump_document`] restricted to an allow-list of tags,
/// with aliases forbidden.
pub fn safe_dump_document(document: &Document<'_>, permitted_tags: &[&str]) -> Result<String>
{
    dump_document_with(
        document,
        &DumpOptions {
            aliases: false,
            permitted_tags: Some(permitted_tags.iter().map(|s| s.to_string()).collect()),
            ..DumpOptions::default()
        },
    )
}

/*
 * ==== Value emission ====
 */

fn value_document(layout: &mut Layout, value: &Value, options: &DumpOptions)
{
    match value
    {
        Value::Sequence(items) if !items.is_empty() =>
        {
            layout.text("---");
            layout.break_line();
            block_value(layout, value, options);
        },
        Value::Mapping(entries) if !entries.is_empty() =>
        {
            layout.text("---");
            layout.break_line();
            block_value(layout, value, options);
        },
        _ =>
        {
            layout.text("--- ");
            block_value(layout, value, options);
        },
    }

    layout.break_line();
}

/// Emit .value starting at the current position, ending
/// after its last visible character.
fn block_value(layout: &mut Layout, value: &Value, options: &DumpOptions)
{
    match value
    {
        Value::Null => layout.text("null"),
        Value::Bool(true) => layout.text("true"),
        Value::Bool(false) => layout.text("false"),
        Value::Int(i) => layout.text(&i.to_string()),
        Value::Float(f) => layout.text(&render_float(*f)),
        Value::Str(s) => emit_string(layout, s, options),
        Value::Sequence(items) if items.is_empty() => layout.text("[]"),
        Value::Mapping(entries) if entries.is_empty() => layout.text("{}"),
        Value::Sequence(items) =>
        {
            for (i, item) in items.iter().enumerate()
            {
                if i > 0
                {
                    layout.break_line();
                }

                layout.text("- ");
                layout.nest(2, |layout| block_value(layout, item, options));
            }
        },
        Value::Mapping(entries) =>
        {
            for (i, (key, value)) in entries.iter().enumerate()
            {
                if i > 0
                {
                    layout.break_line();
                }

                emit_value_key(layout, key, options);
                emit_value_entry_value(layout, value, options);
            }
        },
    }
}

fn emit_value_key(layout: &mut Layout, key: &Value, options: &DumpOptions)
{
    match key
    {
        Value::Sequence(s) if !s.is_empty() =>
        {
            layout.text("? ");
            layout.nest(2, |layout| block_value(layout, key, options));
            layout.break_line();
        },
        Value::Mapping(m) if !m.is_empty() =>
        {
            layout.text("? ");
            layout.nest(2, |layout| block_value(layout, key, options));
            layout.break_line();
        },
        Value::Str(s) if s.contains('\n') =>
        {
            layout.text(&double_quoted(s));
            layout.text(":");
        },
        _ =>
        {
            block_value(layout, key, options);
            layout.text(":");
        },
    }
}

fn emit_value_entry_value(layout: &mut Layout, value: &Value, options: &DumpOptions)
{
    match value
    {
        Value::Sequence(items) if !items.is_empty() =>
        {
            let indent = match options.sequence_indent
            {
                true => options.indentation,
                false => 0,
            };

            layout.break_line();
            layout.nest(indent, |layout| block_value(layout, value, options));
        },
        Value::Mapping(entries) if !entries.is_empty() =>
        {
            layout.break_line();
            layout.nest(options.indentation, |layout| {
                block_value(layout, value, options)
            });
        },
        _ =>
        {
            layout.text(" ");
            block_value(layout, value, options);
        },
    }
}

/*
 * ==== Scalar rendition ====
 */

fn render_float(f: f64) -> String
{
    if f.is_nan()
    {
        return ".nan".to_string();
    }

    if f.is_infinite()
    {
        return match f > 0.0
        {
            true => ".inf".to_string(),
            false => "-.inf".to_string(),
        };
    }

    // Debug formatting keeps a decimal point on integral
    // floats, so the value reloads as a float
    format!("{:?}", f)
}

fn emit_string(layout: &mut Layout, s: &str, options: &DumpOptions)
{
    if literal_applicable(s)
    {
        literal_block(layout, s, options);
    }
    else
    {
        layout.text(&render_scalar(s));
    }
}

/// A multi line string can round trip through a literal
/// block unless its lines would confuse the indentation or
/// framing scans.
fn literal_applicable(s: &str) -> bool
{
    if !s.contains('\n')
    {
        return false;
    }

    if s.chars().any(|c| c != '\n' && c.is_control())
    {
        return false;
    }

    s.lines().all(|line| {
        !line.starts_with(' ')
            && !line.starts_with('\t')
            && !crate::cursor::at_document_boundary(line)
    })
}

fn literal_block(layout: &mut Layout, s: &str, _options: &DumpOptions)
{
    let body = s.trim_end_matches('\n');
    let trailing = s.len() - body.len();

    let header = match trailing
    {
        0 => "|-",
        1 => "|",
        _ => "|+",
    };

    layout.text(header);

    for line in body.split('\n')
    {
        layout.break_line();

        if !line.is_empty()
        {
            layout.text(line);
        }
    }

    // Keep chomping preserves every trailing break beyond
    // the first
    for _ in 1..trailing
    {
        layout.break_line();
    }
}

/// Render a single line string from a [`Value`], quoting
/// whenever a plain rendition would reload as something
/// else.
fn render_scalar(s: &str) -> String
{
    if s.is_empty()
    {
        return "''".to_string();
    }

    if s.chars().any(char::is_control)
    {
        return double_quoted(s);
    }

    if !matches!(resolve_plain(s, false), Value::Str(_)) || structurally_unsafe(s)
    {
        return single_quoted(s);
    }

    s.to_string()
}

/// Render a scalar that was plain in the source: its type
/// is whatever the schema resolves, so only structural
/// conflicts force quotes.
fn render_plain_source(s: &str) -> String
{
    if s.is_empty()
    {
        return "''".to_string();
    }

    if s.chars().any(char::is_control)
    {
        return double_quoted(s);
    }

    if structurally_unsafe(s)
    {
        return single_quoted(s);
    }

    s.to_string()
}

/// Would this text be cut short, or start something else
/// entirely, if emitted as a plain scalar?
fn structurally_unsafe(s: &str) -> bool
{
    let first = match s.chars().next()
    {
        Some(c) => c,
        None => return true,
    };

    matches!(
        first,
        '-' | '?'
            | ':'
            | ','
            | '['
            | ']'
            | '{'
            | '}'
            | '#'
            | '&'
            | '*'
            | '!'
            | '|'
            | '>'
            | '\''
            | '"'
            | '%'
            | '@'
            | '`'
            | ' '
    ) || s.ends_with(' ')
        || s.contains(": ")
        || s.ends_with(':')
        || s.contains(" #")
        || s.contains(&['[', ']', '{', '}', ','][..])
        || s.contains('\n')
}

fn single_quoted(s: &str) -> String
{
    let mut out = String::with_capacity(s.len() + 2);

    out.push('\'');

    for c in s.chars()
    {
        if c == '\''
        {
            out.push('\'');
        }

        out.push(c);
    }

    out.push('\'');

    out
}

fn double_quoted(s: &str) -> String
{
    let mut out = String::with_capacity(s.len() + 2);

    out.push('"');

    for c in s.chars()
    {
        match c
        {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }

    out.push('"');

    out
}

fn render_tag(tag: &str) -> String
{
    if tag == "!"
    {
        return "!".to_string();
    }

    if let Some(suffix) = tag.strip_prefix("tag:yaml.org,2002:")
    {
        return format!("!!{}", suffix);
    }

    if tag.starts_with('!')
    {
        return tag.to_string();
    }

    format!("!<{}>", tag)
}

/*
 * ==== Tree emission ====
 */

/// Does the node fit after `--- ` on the marker line?
fn is_inline_node(tree: &Tree<'_>, id: NodeId) -> bool
{
    match tree.get(id)
    {
        Some(Node::Scalar(node)) => !node.value.contains('\n'),
        Some(Node::Alias(_)) => true,
        Some(Node::Sequence(node)) =>
        {
            node.style == CollectionStyle::Flow || node.children.is_empty()
        },
        Some(Node::Mapping(node)) =>
        {
            node.style == CollectionStyle::Flow || node.entries.is_empty()
        },
        None => true,
    }
}

struct TreeEmitter<'a, 'de>
{
    tree:    &'a Tree<'de>,
    options: &'a DumpOptions,

    /// Anchor names for nodes referenced more than once
    names:   SecondaryMap<NodeId, String>,
    /// Nodes whose first emission already happened
    emitted: SecondaryMap<NodeId, ()>,

    next_anchor: u32,
}

impl<'a, 'de> TreeEmitter<'a, 'de>
{
    fn new(tree: &'a Tree<'de>, options: &'a DumpOptions) -> Self
    {
        Self {
            tree,
            options,
            names: SecondaryMap::new(),
            emitted: SecondaryMap::new(),
            next_anchor: 0,
        }
    }

    fn node(&self, id: NodeId) -> Result<&'a Node<'de>>
    {
        self.tree
            .get(id)
            .ok_or_else(|| bug("emitter hit an id outside the tree"))
    }

    /// First walk: find repeated nodes, check aliases are
    /// permitted, check tags against the allow-list, and
    /// assign anchor names.
    fn analyze(&mut self, root: NodeId) -> Result<()>
    {
        let mut seen: SecondaryMap<NodeId, ()> = SecondaryMap::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop()
        {
            let node = self.node(id)?;

            if seen.insert(id, ()).is_some()
            {
                // Second visit: the node needs an anchor, and we do
                // not descend into it again
                if !self.options.aliases
                {
                    return Err(bad_alias(node));
                }

                self.assign_anchor(id);

                continue;
            }

            self.check_tag(node)?;

            match node
            {
                Node::Scalar(_) => (),
                Node::Alias(alias) =>
                {
                    if !self.options.aliases
                    {
                        return Err(Error::new(internal::Error::new(SourceError::BadAlias(
                            alias.name.clone().into_owned(),
                        ))));
                    }
                },
                Node::Sequence(sequence) => stack.extend(sequence.children.iter().copied()),
                Node::Mapping(mapping) =>
                {
                    for (key, value) in &mapping.entries
                    {
                        stack.push(*key);
                        stack.push(*value);
                    }
                },
            }
        }

        Ok(())
    }

    fn assign_anchor(&mut self, id: NodeId)
    {
        if self.names.contains_key(id)
        {
            return;
        }

        let name = match self.tree.get(id).and_then(|node| node.anchor())
        {
            Some(anchor) => anchor.to_string(),
            None =>
            {
                self.next_anchor += 1;

                self.next_anchor.to_string()
            },
        };

        self.names.insert(id, name);
    }

    fn check_tag(&self, node: &Node<'de>) -> Result<()>
    {
        let tag = match node.tag()
        {
            Some(tag) => tag.as_ref(),
            None => return Ok(()),
        };

        if tag == "!" || tag.starts_with("tag:yaml.org,2002:")
        {
            return Ok(());
        }

        match &self.options.permitted_tags
        {
            None => Ok(()),
            Some(permitted) if permitted.iter().any(|p| p == tag) => Ok(()),
            Some(_) => Err(Error::new(internal::Error::new(
                SourceError::DisallowedTag(tag.to_string()),
            ))),
        }
    }

    /// Is this an already emitted node that collapses to an
    /// alias reference?
    fn is_repeat(&self, id: NodeId) -> bool
    {
        self.names.contains_key(id) && self.emitted.contains_key(id)
    }

    /// `&name`/`&anchor`/tag text prefixed to the node, or
    /// empty.
    fn render_props(&self, id: NodeId, node: &Node<'de>) -> String
    {
        let mut props = String::new();

        let anchor = self
            .names
            .get(id)
            .map(String::as_str)
            .or_else(|| node.anchor().map(|a| a.as_ref()));

        if let Some(anchor) = anchor
        {
            props.push('&');
            props.push_str(anchor);
        }

        if let Some(tag) = node.tag()
        {
            if !props.is_empty()
            {
                props.push(' ');
            }

            props.push_str(&render_tag(tag));
        }

        props
    }

    /// Emit the node at the current position, ending after
    /// its last visible character.
    fn emit_node(&mut self, layout: &mut Layout, id: NodeId) -> Result<()>
    {
        if self.is_repeat(id)
        {
            // Match arm ordering in analyze guarantees a name here
            if let Some(name) = self.names.get(id)
            {
                layout.text(&format!("*{}", name));
            }

            return Ok(());
        }

        self.emitted.insert(id, ());

        let node = self.node(id)?;
        let props = self.render_props(id, node);

        match node
        {
            Node::Alias(alias) =>
            {
                layout.text(&format!("*{}", alias.name));

                Ok(())
            },
            Node::Scalar(scalar) =>
            {
                if !props.is_empty()
                {
                    layout.text(&props);
                    layout.text(" ");
                }

                self.emit_scalar_node(layout, &scalar.value, scalar.style);

                Ok(())
            },
            Node::Sequence(sequence) =>
            {
                if sequence.children.is_empty()
                {
                    inline_props(layout, &props);
                    layout.text("[]");

                    return Ok(());
                }

                match sequence.style
                {
                    CollectionStyle::Flow =>
                    {
                        inline_props(layout, &props);

                        self.emit_flow_sequence(layout, sequence.children.clone())
                    },
                    CollectionStyle::Block =>
                    {
                        if !props.is_empty()
                        {
                            layout.text(&props);
                            layout.break_line();
                        }

                        self.emit_block_sequence(layout, sequence.children.clone())
                    },
                }
            },
            Node::Mapping(mapping) =>
            {
                if mapping.entries.is_empty()
                {
                    inline_props(layout, &props);
                    layout.text("{}");

                    return Ok(());
                }

                match mapping.style
                {
                    CollectionStyle::Flow =>
                    {
                        inline_props(layout, &props);

                        self.emit_flow_mapping(layout, mapping.entries.clone())
                    },
                    CollectionStyle::Block =>
                    {
                        if !props.is_empty()
                        {
                            layout.text(&props);
                            layout.break_line();
                        }

                        self.emit_block_mapping(layout, mapping.entries.clone())
                    },
                }
            },
        }
    }

    fn emit_scalar_node(&self, layout: &mut Layout, value: &str, style: ScalarStyle)
    {
        match style
        {
            ScalarStyle::SingleQuote
                if !value.contains('\n') && !value.chars().any(char::is_control) =>
            {
                layout.text(&single_quoted(value));
            },
            ScalarStyle::DoubleQuote => layout.text(&double_quoted(value)),
            ScalarStyle::Literal | ScalarStyle::Folded if literal_applicable(value) =>
            {
                literal_block(layout, value, self.options);
            },
            _ =>
            {
                if literal_applicable(value)
                {
                    literal_block(layout, value, self.options);
                }
                else
                {
                    layout.text(&render_plain_source(value));
                }
            },
        }
    }

    fn emit_flow_sequence(&mut self, layout: &mut Layout, children: Vec<NodeId>)
        -> Result<()>
    {
        layout.text("[");

        for (i, child) in children.iter().enumerate()
        {
            if i > 0
            {
                layout.breakable(", ");
            }

            self.emit_node(layout, *child)?;
        }

        layout.text("]");

        Ok(())
    }

    fn emit_flow_mapping(
        &mut self,
        layout: &mut Layout,
        entries: Vec<(NodeId, NodeId)>,
    ) -> Result<()>
    {
        layout.text("{");

        for (i, (key, value)) in entries.iter().enumerate()
        {
            if i > 0
            {
                layout.breakable(", ");
            }

            self.emit_node(layout, *key)?;
            layout.text(": ");
            self.emit_node(layout, *value)?;
        }

        layout.text("}");

        Ok(())
    }

    fn emit_block_sequence(&mut self, layout: &mut Layout, children: Vec<NodeId>)
        -> Result<()>
    {
        for (i, child) in children.iter().enumerate()
        {
            if i > 0
            {
                layout.break_line();
            }

            self.emit_leading_comments(layout, *child);
            layout.text("- ");
            layout.nest(2, |layout| self.emit_node(layout, *child))?;
            self.emit_trailing_comments(layout, *child);
        }

        Ok(())
    }

    fn emit_block_mapping(
        &mut self,
        layout: &mut Layout,
        entries: Vec<(NodeId, NodeId)>,
    ) -> Result<()>
    {
        for (i, (key, value)) in entries.iter().enumerate()
        {
            if i > 0
            {
                layout.break_line();
            }

            self.emit_leading_comments(layout, *key);
            self.emit_entry_key(layout, *key)?;
            self.emit_entry_value(layout, *value)?;
            self.emit_trailing_comments(layout, *value);
        }

        Ok(())
    }

    fn emit_entry_key(&mut self, layout: &mut Layout, key: NodeId) -> Result<()>
    {
        let complex = match self.node(key)?
        {
            Node::Scalar(node) => node.value.contains('\n'),
            Node::Alias(_) => false,
            Node::Sequence(node) =>
            {
                node.style == CollectionStyle::Block && !node.children.is_empty()
            },
            Node::Mapping(node) =>
            {
                node.style == CollectionStyle::Block && !node.entries.is_empty()
            },
        };

        if complex
        {
            layout.text("? ");
            layout.nest(2, |layout| self.emit_node(layout, key))?;
            layout.break_line();
            layout.text(":");
        }
        else
        {
            self.emit_node(layout, key)?;
            layout.text(":");
        }

        Ok(())
    }

    fn emit_entry_value(&mut self, layout: &mut Layout, value: NodeId) -> Result<()>
    {
        let node = self.node(value)?;

        let block_collection = !self.is_repeat(value)
            && match node
            {
                Node::Sequence(n) =>
                {
                    n.style == CollectionStyle::Block && !n.children.is_empty()
                },
                Node::Mapping(n) => n.style == CollectionStyle::Block && !n.entries.is_empty(),
                _ => false,
            };

        if block_collection
        {
            // Anchors and tags stay on the key's line; the entries
            // start below it
            self.emitted.insert(value, ());

            let props = self.render_props(value, node);

            if !props.is_empty()
            {
                layout.text(" ");
                layout.text(&props);
            }

            let indent = match node
            {
                Node::Sequence(_) if !self.options.sequence_indent => 0,
                _ => self.options.indentation,
            };

            layout.break_line();

            match node
            {
                Node::Sequence(n) =>
                {
                    let children = n.children.clone();

                    layout.nest(indent, |layout| {
                        self.emit_leading_comments(layout, value);

                        self.emit_block_sequence(layout, children)
                    })
                },
                Node::Mapping(n) =>
                {
                    let entries = n.entries.clone();

                    layout.nest(indent, |layout| {
                        self.emit_leading_comments(layout, value);

                        self.emit_block_mapping(layout, entries)
                    })
                },
                _ => Err(bug("block collection entry changed shape mid emit")),
            }
        }
        else
        {
            layout.text(" ");
            self.emit_node(layout, value)
        }
    }

    fn emit_leading_comments(&self, layout: &mut Layout, id: NodeId)
    {
        if let Some(set) = self.tree.comments(id)
        {
            for comment in &set.leading
            {
                layout.text(&comment.text);
                layout.break_line();
            }
        }
    }

    fn emit_trailing_comments(&self, layout: &mut Layout, id: NodeId)
    {
        if let Some(set) = self.tree.comments(id)
        {
            for comment in &set.trailing
            {
                trail(layout, comment);
            }
        }
    }
}

fn inline_props(layout: &mut Layout, props: &str)
{
    if !props.is_empty()
    {
        layout.text(props);
        layout.text(" ");
    }
}

fn trail(layout: &mut Layout, comment: &Comment<'_>)
{
    if comment.inline
    {
        layout.trailer(&comment.text);
    }
    else
    {
        layout.break_line();
        layout.text(&comment.text);
    }
}

fn bug(what: &'static str) -> Error
{
    Error::new(internal::Error::new(SourceError::Internal(what)))
}

fn bad_alias(node: &Node<'_>) -> Error
{
    let name = node
        .anchor()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "unnamed node".to_string());

    Error::new(internal::Error::new(SourceError::BadAlias(name)))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        load::{load, parse_with, ParseOptions},
        node::Node,
    };

    #[test]
    fn dump_scalars()
    {
        assert_eq!(dump(&Value::Null), "--- null\n");
        assert_eq!(dump(&Value::Bool(true)), "--- true\n");
        assert_eq!(dump(&Value::Int(42)), "--- 42\n");
        assert_eq!(dump(&Value::Float(1.0)), "--- 1.0\n");
        assert_eq!(dump(&Value::Str("hi".into())), "--- hi\n");
    }

    #[test]
    fn dump_quotes_ambiguous_strings()
    {
        assert_eq!(dump(&Value::Str("true".into())), "--- 'true'\n");
        assert_eq!(dump(&Value::Str("1".into())), "--- '1'\n");
        assert_eq!(dump(&Value::Str("".into())), "--- ''\n");
        assert_eq!(dump(&Value::Str("- x".into())), "--- '- x'\n");
    }

    #[test]
    fn dump_block_collections()
    {
        let value = Value::Mapping(vec![
            (Value::Str("a".into()), Value::Int(1)),
            (
                Value::Str("b".into()),
                Value::Sequence(vec![Value::Int(2), Value::Int(3)]),
            ),
        ]);

        assert_eq!(dump(&value), "---\na: 1\nb:\n- 2\n- 3\n");
    }

    #[test]
    fn sequence_indent_option()
    {
        let value = Value::Mapping(vec![(
            Value::Str("b".into()),
            Value::Sequence(vec![Value::Int(2)]),
        )]);

        let options = DumpOptions {
            sequence_indent: true,
            ..DumpOptions::default()
        };

        assert_eq!(dump_with(&value, &options), "---\nb:\n  - 2\n");
    }

    #[test]
    fn nested_mappings_indent()
    {
        let value = Value::Mapping(vec![(
            Value::Str("outer".into()),
            Value::Mapping(vec![(Value::Str("inner".into()), Value::Int(1))]),
        )]);

        assert_eq!(dump(&value), "---\nouter:\n  inner: 1\n");
    }

    #[test]
    fn multiline_strings_use_literal_blocks()
    {
        let value = Value::Str("line1\nline2\n".into());

        assert_eq!(dump(&value), "--- |\nline1\nline2\n");
    }

    #[test]
    fn dump_stream_concatenates_documents()
    {
        let values = [Value::Int(1), Value::Int(2)];

        assert_eq!(dump_stream(&values), "--- 1\n--- 2\n");
    }

    #[test]
    fn dump_is_deterministic()
    {
        let value = load("a: [1, 2]\nb: {c: 3}\n")
            .expect("parses")
            .expect("value");

        assert_eq!(dump(&value), dump(&value));
    }

    #[test]
    fn dump_load_round_trip()
    {
        let cases = [
            "---\n- 1\n- two\n- 3.5\n",
            "---\na: 1\nb:\n- x\n- y\n",
            "--- |\nline1\nline2\n",
        ];

        for yaml in cases
        {
            let value = load(yaml).expect(yaml).expect("value");

            assert_eq!(
                load(&dump(&value)).expect("reload"),
                Some(value),
                "{:?}",
                yaml
            );
        }
    }

    fn parse_comments(source: &str) -> crate::node::Document<'_>
    {
        parse_with(
            source,
            &ParseOptions {
                comments: true,
                aliases: false,
                filename: None,
            },
        )
        .expect("parses")
        .expect("document")
    }

    #[test]
    fn document_round_trip_preserves_comments()
    {
        let source = "- a # comment1\n- c # comment2\n";
        let document = parse_comments(source);

        assert_eq!(dump_document(&document).expect("emits"), source);
    }

    #[test]
    fn edited_document_keeps_comments()
    {
        let source = "- a # comment1\n- c # comment2\n";
        let mut document = parse_comments(source);

        let root = document.root().expect("root");

        document
            .tree_mut()
            .sequence_insert(root, 1, Node::scalar("b"))
            .expect("inserts");

        assert_eq!(
            dump_document(&document).expect("emits"),
            "- a # comment1\n- b\n- c # comment2\n"
        );
    }

    #[test]
    fn removed_entries_leave_no_residue()
    {
        let source = "- a\n- b\n- c\n";
        let mut document = parse_comments(source);
        let root = document.root().expect("root");

        document
            .tree_mut()
            .sequence_remove(root, 1)
            .expect("removes");

        assert_eq!(dump_document(&document).expect("emits"), "- a\n- c\n");
    }

    fn parse_resolved(source: &str) -> crate::node::Document<'_>
    {
        parse_with(
            source,
            &ParseOptions {
                comments: false,
                aliases: true,
                filename: None,
            },
        )
        .expect("parses")
        .expect("document")
    }

    #[test]
    fn repeated_nodes_get_anchors()
    {
        let document = parse_resolved("- &a 1\n- *a\n");

        assert_eq!(dump_document(&document).expect("emits"), "- &a 1\n- *a\n");
    }

    #[test]
    fn aliases_can_be_forbidden()
    {
        let document = parse_resolved("- &a 1\n- *a\n");
        let error = safe_dump_document(&document, &[]).expect_err("must fail");

        assert_eq!(error.classify(), crate::error::Category::Alias);
    }

    #[test]
    fn flow_styles_survive()
    {
        let document = parse_comments("servers: [a, b]\n");

        assert_eq!(
            dump_document(&document).expect("emits"),
            "servers: [a, b]\n"
        );
    }

    #[test]
    fn explicit_document_marker_kept()
    {
        let document = parse_comments("---\na: 1\n");

        assert_eq!(dump_document(&document).expect("emits"), "---\na: 1\n");
    }

    #[test]
    fn mapping_comment_round_trip()
    {
        let source = "# top\na: 1 # inline\nb: 2\n";
        let document = parse_comments(source);

        assert_eq!(dump_document(&document).expect("emits"), source);
    }
}
