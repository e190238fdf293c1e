/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The event consumer that builds document trees.
//!
//! Consumes the handler callbacks into slotmap nodes,
//! resolving aliases against the anchors seen so far in the
//! current document, and attaching the collected comments
//! once each document ends.

use std::collections::HashMap;

use crate::{
    error::{
        internal::{self, SourceError},
        Error, Result,
    },
    event::{
        comment::Comment,
        types::{
            CollectionStyle, Handler, ScalarEvent, Slice, StreamEncoding, VersionDirective,
        },
    },
    node::{
        comment::attach_comments, AliasNode, Document, MappingNode, Node, NodeId, ScalarNode,
        SequenceNode, Tree,
    },
    source::Location,
};

/// Where the next finished node is placed.
#[derive(Debug, Clone, Copy)]
enum Frame
{
    Sequence(NodeId),
    Mapping
    {
        id:  NodeId,
        key: Option<NodeId>,
    },
}

/// A [`Handler`] that converts the event stream into
/// [`Document`]s.
///
/// ## Examples
///
/// ```rust
/// use yodel::{event::parse_events, node::TreeBuilder};
///
/// let mut builder = TreeBuilder::new(true);
///
/// parse_events("- 1\n- 2\n", &mut builder)?;
///
/// let documents = builder.into_documents();
///
/// assert_eq!(documents.len(), 1);
/// # Ok::<(), yodel::error::Error>(())
/// ```
pub struct TreeBuilder<'de>
{
    documents: Vec<Document<'de>>,

    tree:    Tree<'de>,
    root:    Option<NodeId>,
    stack:   Vec<Frame>,
    anchors: HashMap<Slice<'de>, NodeId>,

    version:       Option<VersionDirective>,
    doc_start:     Location,
    doc_implicit:  bool,
    in_document:   bool,

    comments:        Vec<Comment<'de>>,
    resolve_aliases: bool,

    span: Location,
}

impl<'de> TreeBuilder<'de>
{
    /// With .resolve_aliases set, alias events attach the
    /// anchored node itself (sharing its [`NodeId`]);
    /// otherwise they become [`AliasNode`]s.
    pub fn new(resolve_aliases: bool) -> Self
    {
        Self {
            documents: Vec::new(),
            tree: Tree::new(),
            root: None,
            stack: Vec::new(),
            anchors: HashMap::new(),
            version: None,
            doc_start: Location::point(0),
            doc_implicit: true,
            in_document: false,
            comments: Vec::new(),
            resolve_aliases,
            span: Location::point(0),
        }
    }

    /// The finished documents, in stream order.
    pub fn into_documents(self) -> Vec<Document<'de>>
    {
        self.documents
    }

    fn place(&mut self, id: NodeId) -> Result<()>
    {
        match self.stack.last_mut()
        {
            None => match self.root
            {
                None =>
                {
                    self.root = Some(id);

                    Ok(())
                },
                Some(_) => Err(bug("second root node in one document")),
            },
            Some(Frame::Sequence(seq)) =>
            {
                let seq = *seq;

                match self.tree.get_mut(seq)
                {
                    Some(Node::Sequence(node)) =>
                    {
                        node.children.push(id);

                        Ok(())
                    },
                    _ => Err(bug("sequence frame points at a non-sequence")),
                }
            },
            Some(Frame::Mapping { id: map, key }) =>
            {
                match key.take()
                {
                    None =>
                    {
                        *key = Some(id);

                        Ok(())
                    },
                    Some(k) =>
                    {
                        let map = *map;

                        match self.tree.get_mut(map)
                        {
                            Some(Node::Mapping(node)) =>
                            {
                                node.entries.push((k, id));

                                Ok(())
                            },
                            _ => Err(bug("mapping frame points at a non-mapping")),
                        }
                    },
                }
            },
        }
    }

    fn register_anchor(&mut self, anchor: &Option<Slice<'de>>, id: NodeId)
    {
        if let Some(name) = anchor
        {
            // A later anchor of the same name shadows the earlier
            // one for the rest of the document
            self.anchors.insert(name.clone(), id);
        }
    }

    fn close_collection(&mut self) -> Result<()>
    {
        let frame = match self.stack.pop()
        {
            Some(frame) => frame,
            None => return Err(bug("collection end without matching start")),
        };

        let id = match frame
        {
            Frame::Sequence(id) => id,
            Frame::Mapping { id, key: None } => id,
            Frame::Mapping { key: Some(_), .. } =>
            {
                return Err(bug("mapping closed with a dangling key"));
            },
        };

        // Stretch the node's span to the closing event
        let end = self.span.end;

        if let Some(node) = self.tree.get_mut(id)
        {
            let location = match node
            {
                Node::Sequence(n) => &mut n.location,
                Node::Mapping(n) => &mut n.location,
                _ => return Err(bug("collection frame points at a leaf")),
            };

            location.end = location.end.max(end);
        }

        Ok(())
    }
}

impl<'de> Handler<'de> for TreeBuilder<'de>
{
    fn event_span(&mut self, location: Location) -> Result<()>
    {
        self.span = location;

        Ok(())
    }

    fn start_stream(&mut self, _encoding: StreamEncoding) -> Result<()>
    {
        Ok(())
    }

    fn start_document(
        &mut self,
        version: Option<VersionDirective>,
        _directives: &[(Slice<'de>, Slice<'de>)],
        implicit: bool,
    ) -> Result<()>
    {
        self.tree = Tree::new();
        self.root = None;
        self.stack.clear();
        self.anchors.clear();
        self.version = version;
        self.doc_start = self.span;
        self.doc_implicit = implicit;
        self.in_document = true;

        Ok(())
    }

    fn end_document(&mut self, implicit: bool) -> Result<()>
    {
        if !self.in_document
        {
            return Err(bug("document end without matching start"));
        }

        if !self.stack.is_empty()
        {
            return Err(bug("document ended inside an open collection"));
        }

        let tree = std::mem::take(&mut self.tree);
        let root = self.root.take();
        let comments = std::mem::take(&mut self.comments);

        let mut document = Document {
            tree,
            root,
            version: self.version.take(),
            implicit_start: self.doc_implicit,
            implicit_end: implicit,
            location: self.doc_start.join(self.span),
        };

        if let Some(root) = document.root
        {
            attach_comments(&mut document.tree, root, comments)?;
        }

        self.anchors.clear();
        self.in_document = false;
        self.documents.push(document);

        Ok(())
    }

    fn scalar(&mut self, scalar: ScalarEvent<'de>) -> Result<()>
    {
        let node = ScalarNode {
            value:    scalar.value,
            style:    scalar.style,
            anchor:   scalar.anchor,
            tag:      scalar.tag,
            location: self.span,
        };

        let anchor = node.anchor.clone();
        let id = self.tree.insert(Node::Scalar(node));

        self.register_anchor(&anchor, id);

        self.place(id)
    }

    fn alias(&mut self, name: Slice<'de>) -> Result<()>
    {
        let target = self.anchors.get(&name).copied();

        let id = match (self.resolve_aliases, target)
        {
            (true, Some(target)) => target,
            (true, None) =>
            {
                return Err(Error::new(internal::Error::new(SourceError::BadAlias(
                    name.into_owned(),
                ))));
            },
            (false, _) => self.tree.insert(Node::Alias(AliasNode {
                name,
                target,
                location: self.span,
            })),
        };

        self.place(id)
    }

    fn start_sequence(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        _implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let node = SequenceNode {
            children: Vec::new(),
            style,
            anchor,
            tag,
            location: self.span,
        };

        let anchor = node.anchor.clone();
        let id = self.tree.insert(Node::Sequence(node));

        self.register_anchor(&anchor, id);
        self.place(id)?;
        self.stack.push(Frame::Sequence(id));

        Ok(())
    }

    fn end_sequence(&mut self) -> Result<()>
    {
        self.close_collection()
    }

    fn start_mapping(
        &mut self,
        anchor: Option<Slice<'de>>,
        tag: Option<Slice<'de>>,
        _implicit: bool,
        style: CollectionStyle,
    ) -> Result<()>
    {
        let node = MappingNode {
            entries: Vec::new(),
            style,
            anchor,
            tag,
            location: self.span,
        };

        let anchor = node.anchor.clone();
        let id = self.tree.insert(Node::Mapping(node));

        self.register_anchor(&anchor, id);
        self.place(id)?;
        self.stack.push(Frame::Mapping { id, key: None });

        Ok(())
    }

    fn end_mapping(&mut self) -> Result<()>
    {
        self.close_collection()
    }

    fn comment(&mut self, comment: &Comment<'de>) -> Result<()>
    {
        self.comments.push(comment.clone());

        Ok(())
    }
}

fn bug(what: &'static str) -> Error
{
    Error::new(internal::Error::new(SourceError::Internal(what)))
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::parse_events;

    fn build(yaml: &str) -> Vec<Document<'_>>
    {
        let mut builder = TreeBuilder::new(true);

        parse_events(yaml, &mut builder).expect(yaml);

        builder.into_documents()
    }

    #[test]
    fn scalar_document()
    {
        let docs = build("hello\n");

        assert_eq!(docs.len(), 1);

        let root = docs[0].root_node().expect("root");

        assert_eq!(root.as_scalar().map(|s| s.value.as_ref()), Some("hello"));
    }

    #[test]
    fn sequence_document()
    {
        let docs = build("- 1\n- 2\n");
        let doc = &docs[0];

        let seq = doc.root_node().and_then(Node::as_sequence).expect("sequence");

        assert_eq!(seq.children.len(), 2);
    }

    #[test]
    fn alias_shares_node_identity()
    {
        let docs = build("- &a 1\n- *a\n");
        let doc = &docs[0];

        let seq = doc.root_node().and_then(Node::as_sequence).expect("sequence");

        assert_eq!(seq.children[0], seq.children[1]);
    }

    #[test]
    fn unresolved_alias_nodes_kept_when_disabled()
    {
        let mut builder = TreeBuilder::new(false);

        parse_events("- &a 1\n- *a\n", &mut builder).expect("parse");

        let docs = builder.into_documents();
        let doc = &docs[0];
        let seq = doc.root_node().and_then(Node::as_sequence).expect("sequence");

        assert_ne!(seq.children[0], seq.children[1]);

        match doc.tree().get(seq.children[1])
        {
            Some(Node::Alias(alias)) =>
            {
                assert_eq!(alias.name, "a");
                assert_eq!(alias.target, Some(seq.children[0]));
            },
            other => panic!("expected an alias node, got {:?}", other),
        }
    }

    #[test]
    fn unknown_alias_is_an_error()
    {
        let mut builder = TreeBuilder::new(true);
        let error = parse_events("- *nope\n", &mut builder).expect_err("must fail");

        assert_eq!(error.classify(), crate::error::Category::Alias);
    }

    #[test]
    fn multiple_documents()
    {
        let docs = build("a\n---\nb\n");

        assert_eq!(docs.len(), 2);
        assert!(docs[0].implicit_start);
        assert!(!docs[1].implicit_start);
    }

    #[test]
    fn anchors_reset_per_document()
    {
        let mut builder = TreeBuilder::new(true);
        let error = parse_events("&a 1\n---\n*a\n", &mut builder).expect_err("must fail");

        assert_eq!(error.classify(), crate::error::Category::Alias);
    }
}
