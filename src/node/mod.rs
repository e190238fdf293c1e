/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The document tree produced by consuming an event stream.
//!
//! Nodes live in a slotmap keyed arena; node identity *is*
//! the key, so an aliased node appears under the same
//! [`NodeId`] everywhere it is referenced, which is what
//! anchor-on-repeat detection keys on when a tree is
//! emitted again.

mod builder;
mod comment;

pub use builder::TreeBuilder;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::{
    event::{
        comment::Comment,
        types::{CollectionStyle, ScalarStyle, Slice, VersionDirective},
    },
    source::Location,
};

new_key_type! {
    /// Identifier used for locating [Node]s in a document
    /// tree.
    ///
    /// An invariant of this type is that one should never
    /// use [NodeId]s as indexes into trees that did not
    /// generate the [NodeId]. Behavior is safe and cannot
    /// cause UB, but is unspecified, and never what you
    /// want.
    pub struct NodeId;
}

/// Possible nodes one can encounter while traversing a
/// document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'de>
{
    /// Data container, storing a single scalar node
    Scalar(ScalarNode<'de>),
    /// List node, storing a sequence of nodes
    Sequence(SequenceNode<'de>),
    /// Mapping node, storing key value node pairs
    Mapping(MappingNode<'de>),
    /// Alias node left unresolved because alias resolution
    /// was disabled
    Alias(AliasNode<'de>),
}

impl<'de> Node<'de>
{
    /// A synthetic plain scalar, for tree edits.
    pub fn scalar<T>(value: T) -> Self
    where
        T: Into<Slice<'de>>,
    {
        Node::Scalar(ScalarNode {
            value:    value.into(),
            style:    ScalarStyle::Plain,
            anchor:   None,
            tag:      None,
            location: Location::point(0),
        })
    }

    pub fn location(&self) -> Location
    {
        match self
        {
            Node::Scalar(node) => node.location,
            Node::Sequence(node) => node.location,
            Node::Mapping(node) => node.location,
            Node::Alias(node) => node.location,
        }
    }

    pub fn anchor(&self) -> Option<&Slice<'de>>
    {
        match self
        {
            Node::Scalar(node) => node.anchor.as_ref(),
            Node::Sequence(node) => node.anchor.as_ref(),
            Node::Mapping(node) => node.anchor.as_ref(),
            Node::Alias(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&Slice<'de>>
    {
        match self
        {
            Node::Scalar(node) => node.tag.as_ref(),
            Node::Sequence(node) => node.tag.as_ref(),
            Node::Mapping(node) => node.tag.as_ref(),
            Node::Alias(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarNode<'de>>
    {
        match self
        {
            Node::Scalar(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceNode<'de>>
    {
        match self
        {
            Node::Sequence(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&MappingNode<'de>>
    {
        match self
        {
            Node::Mapping(node) => Some(node),
            _ => None,
        }
    }
}

/// A scalar leaf and how it was spelled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarNode<'de>
{
    pub value:    Slice<'de>,
    pub style:    ScalarStyle,
    pub anchor:   Option<Slice<'de>>,
    pub tag:      Option<Slice<'de>>,
    pub location: Location,
}

/// An ordered sequence of child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceNode<'de>
{
    pub children: Vec<NodeId>,
    pub style:    CollectionStyle,
    pub anchor:   Option<Slice<'de>>,
    pub tag:      Option<Slice<'de>>,
    pub location: Location,
}

/// Ordered key/value entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingNode<'de>
{
    pub entries:  Vec<(NodeId, NodeId)>,
    pub style:    CollectionStyle,
    pub anchor:   Option<Slice<'de>>,
    pub tag:      Option<Slice<'de>>,
    pub location: Location,
}

/// A `*name` reference kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasNode<'de>
{
    pub name:     Slice<'de>,
    /// The anchored node, when the name was known at parse
    /// time
    pub target:   Option<NodeId>,
    pub location: Location,
}

/// Comments attached to a node after parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentSet<'de>
{
    /// Comments on the lines before the node (or at its
    /// position, for inline comments with nothing to their
    /// left)
    pub leading:  Vec<Comment<'de>>,
    /// Comments following the node, most often inline on
    /// its last line
    pub trailing: Vec<Comment<'de>>,
}

impl CommentSet<'_>
{
    pub fn is_empty(&self) -> bool
    {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

/// Node storage for one document.
#[derive(Debug, Clone, Default)]
pub struct Tree<'de>
{
    nodes:    SlotMap<NodeId, Node<'de>>,
    comments: SecondaryMap<NodeId, CommentSet<'de>>,
}

impl<'de> Tree<'de>
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn insert(&mut self, node: Node<'de>) -> NodeId
    {
        self.nodes.insert(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<'de>>
    {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<'de>>
    {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize
    {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.nodes.is_empty()
    }

    /// Comments attached to .id, if any.
    pub fn comments(&self, id: NodeId) -> Option<&CommentSet<'de>>
    {
        self.comments.get(id)
    }

    /// The comment set of .id, created on first use.
    pub fn comments_mut(&mut self, id: NodeId) -> &mut CommentSet<'de>
    {
        if !self.comments.contains_key(id)
        {
            self.comments.insert(id, CommentSet::default());
        }

        &mut self.comments[id]
    }

    /// Insert .node as a child of the sequence .seq at
    /// .index, returning the new id. None when .seq is not
    /// a sequence or .index is out of bounds.
    pub fn sequence_insert(
        &mut self,
        seq: NodeId,
        index: usize,
        node: Node<'de>,
    ) -> Option<NodeId>
    {
        match self.nodes.get(seq)
        {
            Some(Node::Sequence(sequence)) if index <= sequence.children.len() => (),
            _ => return None,
        }

        let id = self.nodes.insert(node);

        if let Some(Node::Sequence(sequence)) = self.nodes.get_mut(seq)
        {
            sequence.children.insert(index, id);
        }

        Some(id)
    }

    /// Detach the .index'th child of the sequence .seq,
    /// returning its id.
    pub fn sequence_remove(&mut self, seq: NodeId, index: usize) -> Option<NodeId>
    {
        match self.nodes.get_mut(seq)
        {
            Some(Node::Sequence(sequence)) if index < sequence.children.len() =>
            {
                Some(sequence.children.remove(index))
            },
            _ => None,
        }
    }

    /// Detach the entry of the mapping .map whose key is a
    /// scalar equal to .key.
    pub fn mapping_remove(&mut self, map: NodeId, key: &str) -> Option<(NodeId, NodeId)>
    {
        let index = match self.nodes.get(map)
        {
            Some(Node::Mapping(mapping)) => mapping.entries.iter().position(|(k, _)| {
                matches!(self.nodes.get(*k), Some(Node::Scalar(node)) if node.value == key)
            })?,
            _ => return None,
        };

        match self.nodes.get_mut(map)
        {
            Some(Node::Mapping(mapping)) => Some(mapping.entries.remove(index)),
            _ => None,
        }
    }
}

/// One parsed document: its tree, root and framing
/// metadata.
#[derive(Debug, Clone)]
pub struct Document<'de>
{
    pub(crate) tree: Tree<'de>,
    pub(crate) root: Option<NodeId>,

    /// %YAML directive attached to the document, if any
    pub version:        Option<VersionDirective>,
    /// Was the document started without a '---'?
    pub implicit_start: bool,
    /// Was the document ended without a '...'?
    pub implicit_end:   bool,

    pub(crate) location: Location,
}

impl<'de> Document<'de>
{
    pub fn tree(&self) -> &Tree<'de>
    {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree<'de>
    {
        &mut self.tree
    }

    pub fn root(&self) -> Option<NodeId>
    {
        self.root
    }

    pub fn location(&self) -> Location
    {
        self.location
    }

    /// The root node, when the document has one.
    pub fn root_node(&self) -> Option<&Node<'de>>
    {
        self.root.and_then(|id| self.tree.get(id))
    }
}
