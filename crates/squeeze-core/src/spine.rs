//! Immutable, path-aware handles onto IR nodes.
//!
//! A [`Spine`] is a node plus its ancestor chain. Children own their parents
//! (never the reverse) and copy the root handle from their parent, so the
//! chain is acyclic and `root()` is O(1).
//!
//! Edits never mutate: they return a new spine whose ancestors up to the
//! `Program` are shallow copies, while every subtree off the edited path
//! keeps pointer identity with the original tree.

use std::sync::Arc;

use crate::fragment::PathFragment;
use crate::invariants;
use crate::node::{Node, NodeRef};

#[derive(Clone)]
pub struct Spine(Arc<SpineInner>);

struct SpineInner {
    node: NodeRef,
    parent: Option<Spine>,
    fragment: Option<PathFragment>,
    /// `None` on the root spine itself.
    root: Option<Spine>,
}

impl std::fmt::Debug for Spine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spine")
            .field("kind", &self.node().name())
            .field("path", &self.path())
            .finish()
    }
}

impl Spine {
    /// Root spine over a `Program` node.
    ///
    /// # Panics
    /// Panics if `program` is not of kind `Program`.
    pub fn from_program(program: NodeRef) -> Self {
        invariants::ensure_program_root(&program);
        Self(Arc::new(SpineInner {
            node: program,
            parent: None,
            fragment: None,
            root: None,
        }))
    }

    fn descend(parent: &Spine, fragment: PathFragment, node: NodeRef) -> Self {
        Self(Arc::new(SpineInner {
            node,
            parent: Some(parent.clone()),
            fragment: Some(fragment),
            root: Some(parent.root()),
        }))
    }

    pub fn node(&self) -> &NodeRef {
        &self.0.node
    }

    pub fn parent(&self) -> Option<&Spine> {
        self.0.parent.as_ref()
    }

    pub fn fragment(&self) -> Option<PathFragment> {
        self.0.fragment
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    pub fn root(&self) -> Spine {
        self.0.root.clone().unwrap_or_else(|| self.clone())
    }

    /// The `Program` node of the tree this spine lives in.
    pub fn program(&self) -> &NodeRef {
        match &self.0.root {
            Some(root) => root.node(),
            None => self.node(),
        }
    }

    /// Fragments from the root down to this node.
    pub fn path(&self) -> Vec<PathFragment> {
        let mut path = Vec::new();
        let mut current = Some(self);
        while let Some(spine) = current {
            if let Some(fragment) = spine.fragment() {
                path.push(fragment);
            }
            current = spine.parent();
        }
        path.reverse();
        path
    }

    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |s| s.parent()).count()
    }

    /// Spine of the child at `fragment`.
    ///
    /// # Panics
    /// Panics if this node's shape has no child at `fragment`.
    pub fn child(&self, fragment: PathFragment) -> Spine {
        let node = self
            .node()
            .child(fragment)
            .unwrap_or_else(|| invariants::missing_fragment(self.node(), fragment))
            .clone();
        Self::descend(self, fragment, node)
    }

    /// Spines of all present children, in canonical order.
    pub fn children(&self) -> Vec<Spine> {
        self.node()
            .slots()
            .into_iter()
            .map(|(fragment, node)| Self::descend(self, fragment, node.clone()))
            .collect()
    }

    /// This node, shallow-copied with `new_child` at `fragment`, rebuilt up
    /// to the root.
    ///
    /// Returns `self` when `new_child` already sits at `fragment`.
    pub fn with_child_replaced(&self, new_child: NodeRef, fragment: PathFragment) -> Spine {
        let current = self
            .node()
            .child(fragment)
            .unwrap_or_else(|| invariants::missing_fragment(self.node(), fragment));
        if Arc::ptr_eq(current, &new_child) {
            return self.clone();
        }
        let node = match self.node().with_child(fragment, new_child) {
            Some(node) => Arc::new(node),
            None => invariants::missing_fragment(self.node(), fragment),
        };
        match (&self.0.parent, self.0.fragment) {
            (Some(parent), Some(own)) => {
                let parent = parent.with_child_replaced(Arc::clone(&node), own);
                Self::descend(&parent, own, node)
            }
            _ => Self::from_program(node),
        }
    }

    /// Spine over `new_node` placed where this node was, in the new tree.
    ///
    /// # Panics
    /// Panics when replacing the root with a non-`Program` node, or when
    /// placing a `Block` directly under a `Block`.
    pub fn replaced_with(&self, new_node: NodeRef) -> Spine {
        match (&self.0.parent, self.0.fragment) {
            (Some(parent), Some(fragment)) => {
                if new_node.is_block() && parent.node().is_block() {
                    invariants::nested_block(parent.node(), fragment);
                }
                parent
                    .with_child_replaced(new_node, fragment)
                    .child(fragment)
            }
            _ => {
                invariants::ensure_root_replacement(&new_node);
                Self::from_program(new_node)
            }
        }
    }

    /// Lazy pre-order walk over this spine and all of its descendants.
    pub fn descendants(&self) -> Descendants {
        Descendants {
            stack: vec![self.clone()],
        }
    }

    /// Lazy pre-order sequence of visitor results.
    ///
    /// A `None` result contributes nothing; traversal still enters the
    /// node's children.
    pub fn visit<T, F>(&self, visitor: F) -> Visit<F>
    where
        F: FnMut(&Spine) -> Option<T>,
    {
        Visit {
            inner: self.descendants(),
            visitor,
        }
    }

    /// True when `predicate` holds everywhere; stops at the first failure.
    pub fn every_node(&self, mut predicate: impl FnMut(&Spine) -> bool) -> bool {
        self.visit(|s| Some(predicate(s))).all(|ok| ok)
    }

    /// True when `predicate` holds somewhere; stops at the first witness.
    pub fn some_node(&self, mut predicate: impl FnMut(&Spine) -> bool) -> bool {
        self.visit(|s| Some(predicate(s))).any(|ok| ok)
    }

    /// Depth-first rewrite of this subtree.
    ///
    /// Where `replacer` returns a node, it is substituted and only its
    /// children are revisited; the replacement itself is never offered to
    /// `replacer` again. Sibling edits are spliced into the running
    /// accumulator left to right.
    pub fn with_replacer<F>(&self, mut replacer: F) -> Spine
    where
        F: FnMut(&Node, &Spine) -> Option<NodeRef>,
    {
        self.replace_from(&mut replacer, false)
    }

    fn replace_from<F>(&self, replacer: &mut F, skip_self: bool) -> Spine
    where
        F: FnMut(&Node, &Spine) -> Option<NodeRef>,
    {
        let replacement = if skip_self {
            None
        } else {
            replacer(self.node(), self)
        };
        if let Some(new_node) = replacement {
            return self.replaced_with(new_node).replace_from(replacer, true);
        }
        let mut current = self.clone();
        for child in self.children() {
            let rewritten = child.replace_from(replacer, false);
            if Arc::ptr_eq(rewritten.node(), child.node()) {
                continue;
            }
            let Some(fragment) = child.fragment() else {
                unreachable!("child spines always carry a fragment");
            };
            current = current.with_child_replaced(Arc::clone(rewritten.node()), fragment);
        }
        current
    }
}

/// Pre-order iterator returned by [`Spine::descendants`].
pub struct Descendants {
    stack: Vec<Spine>,
}

impl Iterator for Descendants {
    type Item = Spine;

    fn next(&mut self) -> Option<Spine> {
        let spine = self.stack.pop()?;
        self.stack.extend(spine.children().into_iter().rev());
        Some(spine)
    }
}

/// Iterator returned by [`Spine::visit`].
pub struct Visit<F> {
    inner: Descendants,
    visitor: F,
}

impl<T, F> Iterator for Visit<F>
where
    F: FnMut(&Spine) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for spine in self.inner.by_ref() {
            if let Some(value) = (self.visitor)(&spine) {
                return Some(value);
            }
        }
        None
    }
}
