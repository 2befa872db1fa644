//! The plugin contract.
//!
//! Three shapes, used by different pipeline stages:
//! - [`Rewrite`]: pure single-node rewrite, applied through `Spine::with_replacer`
//! - [`GolfRewrite`]: lazy alternatives at a spine position, explored by the search
//! - [`MutatingRewrite`]: legacy enter/exit hooks over a [`NodePath`], only
//!   reachable through [`crate::legacy::apply_mutating`]

use std::fmt;
use std::sync::Arc;

use squeeze_core::{Node, NodeRef, Spine};

use crate::legacy::NodePath;

/// Pure rewrite: `Some` replaces the node, `None` leaves it alone.
pub trait Rewrite: Send + Sync {
    fn name(&self) -> &str;
    fn rewrite(&self, node: &Node, spine: &Spine) -> Option<NodeRef>;
}

/// Golf rewrite: zero or more replacement nodes for the spine's position.
///
/// Each yielded node stands for the whole program obtained by swapping it
/// in; the search does the substitution.
pub trait GolfRewrite: Send + Sync {
    fn name(&self) -> &str;
    fn golf<'a>(&'a self, spine: &'a Spine) -> Box<dyn Iterator<Item = NodeRef> + 'a>;
}

/// Legacy rewrite over a mutable path.
pub trait MutatingRewrite: Send + Sync {
    fn name(&self) -> &str;

    fn enter(&self, _path: &mut NodePath<'_>) {}

    fn exit(&self, _path: &mut NodePath<'_>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginTag {
    Rewrite,
    Mutating,
    Golf,
}

/// Any plugin, tagged by shape. Emit-time plugin lists hold these.
#[derive(Clone)]
pub enum Plugin {
    Rewrite(Arc<dyn Rewrite>),
    Mutating(Arc<dyn MutatingRewrite>),
    Golf(Arc<dyn GolfRewrite>),
}

impl Plugin {
    pub fn name(&self) -> &str {
        match self {
            Plugin::Rewrite(p) => p.name(),
            Plugin::Mutating(p) => p.name(),
            Plugin::Golf(p) => p.name(),
        }
    }

    pub fn tag(&self) -> PluginTag {
        match self {
            Plugin::Rewrite(_) => PluginTag::Rewrite,
            Plugin::Mutating(_) => PluginTag::Mutating,
            Plugin::Golf(_) => PluginTag::Golf,
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.tag(), self.name())
    }
}

impl From<Arc<dyn Rewrite>> for Plugin {
    fn from(p: Arc<dyn Rewrite>) -> Self {
        Plugin::Rewrite(p)
    }
}

impl From<Arc<dyn GolfRewrite>> for Plugin {
    fn from(p: Arc<dyn GolfRewrite>) -> Self {
        Plugin::Golf(p)
    }
}

impl From<Arc<dyn MutatingRewrite>> for Plugin {
    fn from(p: Arc<dyn MutatingRewrite>) -> Self {
        Plugin::Mutating(p)
    }
}

struct FnRewrite<F> {
    name: String,
    f: F,
}

impl<F> Rewrite for FnRewrite<F>
where
    F: Fn(&Node, &Spine) -> Option<NodeRef> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn rewrite(&self, node: &Node, spine: &Spine) -> Option<NodeRef> {
        (self.f)(node, spine)
    }
}

/// A named [`Rewrite`] from a closure.
pub fn rewrite_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn Rewrite>
where
    F: Fn(&Node, &Spine) -> Option<NodeRef> + Send + Sync + 'static,
{
    Arc::new(FnRewrite {
        name: name.into(),
        f,
    })
}

struct FnGolf<F> {
    name: String,
    f: F,
}

impl<F> GolfRewrite for FnGolf<F>
where
    F: Fn(&Spine) -> Vec<NodeRef> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn golf<'a>(&'a self, spine: &'a Spine) -> Box<dyn Iterator<Item = NodeRef> + 'a> {
        Box::new((self.f)(spine).into_iter())
    }
}

/// A named [`GolfRewrite`] from a closure returning its alternatives.
pub fn golf_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn GolfRewrite>
where
    F: Fn(&Spine) -> Vec<NodeRef> + Send + Sync + 'static,
{
    Arc::new(FnGolf {
        name: name.into(),
        f,
    })
}
