/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Attachment of collected comments to the finished tree.
//!
//! Each comment descends from the root by binary search
//! over the current level's children (ordered by source
//! position): a child whose span contains the comment is
//! entered, otherwise the nearest child before and after
//! are remembered and decide the placement. Any other
//! overlap cannot happen against a well formed tree and is
//! an internal error, never a syntax error.

use crate::{
    error::{
        internal::{self, SourceError},
        Error, Result,
    },
    event::comment::Comment,
    node::{Node, NodeId, Tree},
};

/// Attach every comment in .comments to exactly one node of
/// .tree as either leading or trailing.
pub(crate) fn attach_comments<'de>(
    tree: &mut Tree<'de>,
    root: NodeId,
    mut comments: Vec<Comment<'de>>,
) -> Result<()>
{
    comments.sort_by_key(|comment| comment.location.start);

    for comment in comments
    {
        attach_one(tree, root, comment)?;
    }

    Ok(())
}

/// Where a comment ended up relative to the nodes around
/// it.
struct Placement
{
    preceding: Option<NodeId>,
    following: Option<NodeId>,
    enclosing: NodeId,
}

fn attach_one<'de>(tree: &mut Tree<'de>, root: NodeId, comment: Comment<'de>) -> Result<()>
{
    let placement = locate(tree, root, &comment)?;

    let Placement {
        preceding,
        following,
        enclosing,
    } = placement;

    if comment.inline
    {
        match preceding
        {
            Some(node) => tree.comments_mut(node).trailing.push(comment),
            None =>
            {
                let node = following.unwrap_or(enclosing);

                tree.comments_mut(node).leading.push(comment);
            },
        }

        return Ok(());
    }

    match (following, preceding)
    {
        (Some(node), _) => tree.comments_mut(node).leading.push(comment),
        (None, Some(node)) => tree.comments_mut(node).trailing.push(comment),
        (None, None) => tree.comments_mut(enclosing).leading.push(comment),
    }

    Ok(())
}

/// Descend from .root to the level that owns the comment's
/// position.
fn locate<'de>(tree: &Tree<'de>, root: NodeId, comment: &Comment<'de>) -> Result<Placement>
{
    let mut enclosing = root;
    let mut preceding = None;
    let mut following = None;

    // The first level holds the root itself: a comment
    // before or after the whole tree belongs to the root
    // node, not inside it
    let mut children = vec![root];

    loop
    {
        let mut lo = 0;
        let mut hi = children.len();
        let mut descend = None;

        while lo < hi
        {
            let mid = lo + (hi - lo) / 2;
            let child = children[mid];

            let span = match tree.get(child)
            {
                Some(node) => node.location(),
                None => return Err(bug("tree child id is not in the arena")),
            };

            if span.contains(&comment.location)
            {
                descend = Some(child);

                break;
            }
            else if span.is_before(comment.location.start)
            {
                preceding = Some(child);
                lo = mid + 1;
            }
            else if span.is_after(comment.location.start)
            {
                following = Some(child);
                hi = mid;
            }
            else
            {
                return Err(bug("comment position overlaps a node boundary"));
            }
        }

        match descend
        {
            Some(child) =>
            {
                enclosing = child;
                children = level_children(tree, child);
            },
            None =>
            {
                return Ok(Placement {
                    preceding,
                    following,
                    enclosing,
                });
            },
        }
    }
}

/// The ordered children of one tree level. Mapping levels
/// interleave keys and values in source order.
fn level_children<'de>(tree: &Tree<'de>, id: NodeId) -> Vec<NodeId>
{
    match tree.get(id)
    {
        Some(Node::Sequence(node)) => node.children.clone(),
        Some(Node::Mapping(node)) => node
            .entries
            .iter()
            .flat_map(|(k, v)| [*k, *v])
            .collect(),
        _ => Vec::new(),
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

    use crate::{event::parse_events_with, event::flag::O_COMMENTS, node::*};

    fn build(yaml: &str) -> Document<'_>
    {
        let mut builder = TreeBuilder::new(true);

        parse_events_with(yaml, O_COMMENTS, &mut builder).expect(yaml);

        builder
            .into_documents()
            .into_iter()
            .next()
            .expect("one document")
    }

    fn seq_children(doc: &Document<'_>) -> Vec<NodeId>
    {
        doc.root_node()
            .and_then(Node::as_sequence)
            .expect("sequence root")
            .children
            .clone()
    }

    #[test]
    fn inline_comment_trails_preceding_node()
    {
        let doc = build("- a # one\n- b\n");
        let children = seq_children(&doc);

        let set = doc.tree().comments(children[0]).expect("comments on a");

        assert_eq!(set.trailing.len(), 1);
        assert_eq!(set.trailing[0].text, "# one");
        assert!(set.trailing[0].inline);
    }

    #[test]
    fn full_line_comment_leads_following_node()
    {
        let doc = build("- a\n# lead\n- b\n");
        let children = seq_children(&doc);

        let set = doc.tree().comments(children[1]).expect("comments on b");

        assert_eq!(set.leading.len(), 1);
        assert_eq!(set.leading[0].text, "# lead");
        assert!(!set.leading[0].inline);
    }

    #[test]
    fn trailing_comment_after_last_node()
    {
        // The sequence's span is trimmed past the comment
        // line, so the comment trails the collection itself
        let doc = build("- a\n- b\n# after\n");
        let root = doc.root().expect("root");

        let set = doc.tree().comments(root).expect("comments on root");

        assert_eq!(set.trailing.len(), 1);
        assert_eq!(set.trailing[0].text, "# after");
    }

    #[test]
    fn comment_descends_into_nested_mapping()
    {
        let doc = build("outer:\n  a: 1\n  # note\n  b: 2\n");

        let root = doc.root_node().and_then(Node::as_mapping).expect("mapping");
        let (_, inner_id) = root.entries[0];

        let inner = doc
            .tree()
            .get(inner_id)
            .and_then(Node::as_mapping)
            .expect("inner mapping");

        // The note leads the key "b"
        let (b_key, _) = inner.entries[1];
        let set = doc.tree().comments(b_key).expect("comments on b");

        assert_eq!(set.leading.len(), 1);
        assert_eq!(set.leading[0].text, "# note");
    }

    #[test]
    fn leading_comment_before_root()
    {
        let doc = build("# first\n- a\n");
        let root = doc.root().expect("root");

        let set = doc.tree().comments(root).expect("comments on root");

        assert_eq!(set.leading.len(), 1);
        assert_eq!(set.leading[0].text, "# first");
    }

    #[test]
    fn comment_on_scalar_document_attaches_to_root()
    {
        let doc = build("value # inline\n");
        let root = doc.root().expect("root");

        let set = doc.tree().comments(root).expect("comments on root");

        assert_eq!(set.trailing.len(), 1);
        assert!(set.trailing[0].inline);
    }
}
