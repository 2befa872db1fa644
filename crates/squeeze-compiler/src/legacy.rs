//! Mutable traversal for legacy mutating plugins.
//!
//! The walk owns a private copy of the root handle and edits it in place
//! with `Arc::make_mut`, so nodes shared with other trees are cloned on
//! first write and the caller's tree is never observed changing. Subtrees
//! the plugin leaves alone keep their identity.

use std::sync::Arc;

use squeeze_core::{Node, NodeRef, PathFragment};

use crate::plugin::MutatingRewrite;

/// Mutable handle on one node during a legacy walk.
pub struct NodePath<'a> {
    slot: &'a mut NodeRef,
    fragment: Option<PathFragment>,
    ancestors: &'a [&'static str],
    skip_children: bool,
}

impl<'a> NodePath<'a> {
    pub fn node(&self) -> &Node {
        self.slot
    }

    /// Mutable access; clones the node first if it is shared.
    pub fn node_mut(&mut self) -> &mut Node {
        Arc::make_mut(self.slot)
    }

    pub fn replace_with(&mut self, node: NodeRef) {
        *self.slot = node;
    }

    /// Fragment under the parent, `None` at the root.
    pub fn fragment(&self) -> Option<PathFragment> {
        self.fragment
    }

    /// Kind name of the parent node, `None` at the root.
    pub fn parent_kind(&self) -> Option<&'static str> {
        self.ancestors.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Do not descend into this node after `enter`.
    pub fn skip_children(&mut self) {
        self.skip_children = true;
    }
}

/// Runs `plugin` over the tree rooted at `root` and returns the new root.
///
/// `enter` runs before the children are walked and `exit` after. Children
/// are those of the node as it stands after `enter`.
pub fn apply_mutating(root: &NodeRef, plugin: &dyn MutatingRewrite) -> NodeRef {
    let mut root = Arc::clone(root);
    let mut ancestors = Vec::new();
    walk(&mut root, None, &mut ancestors, plugin);
    root
}

fn walk(
    slot: &mut NodeRef,
    fragment: Option<PathFragment>,
    ancestors: &mut Vec<&'static str>,
    plugin: &dyn MutatingRewrite,
) {
    let skip = {
        let mut path = NodePath {
            slot: &mut *slot,
            fragment,
            ancestors: ancestors.as_slice(),
            skip_children: false,
        };
        plugin.enter(&mut path);
        path.skip_children
    };

    if !skip {
        ancestors.push(slot.name());
        for child_fragment in slot.child_fragments() {
            let Some(original) = slot.child(child_fragment) else {
                continue;
            };
            let mut child = Arc::clone(original);
            walk(&mut child, Some(child_fragment), ancestors, plugin);
            if Arc::ptr_eq(&child, original) {
                continue;
            }
            if let Some(target) = Arc::make_mut(slot).child_mut(child_fragment) {
                *target = child;
            }
        }
        ancestors.pop();
    }

    let mut path = NodePath {
        slot,
        fragment,
        ancestors: ancestors.as_slice(),
        skip_children: false,
    };
    plugin.exit(&mut path);
}
