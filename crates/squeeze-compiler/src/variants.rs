//! Variant expansion.
//!
//! A `Variants` node lists alternative lowerings of one construct. A
//! program with `Variants` nodes stands for the cartesian product of their
//! choices; each choice is golfed on its own.

use std::sync::Arc;

use squeeze_core::build::block;
use squeeze_core::{NodeKind, NodeRef, PathFragment, Spine};

use crate::invariants;

/// Every `Variants`-free program `program` stands for.
///
/// The first `Variants` node in pre-order is resolved first, alternatives
/// in declared order. A `Block` alternative chosen directly under a `Block`
/// is spliced into its parent, since blocks never nest.
///
/// # Panics
/// Panics on a `Variants` node with no alternatives.
pub fn expand_variants(program: &NodeRef) -> Vec<NodeRef> {
    let spine = Spine::from_program(Arc::clone(program));
    let site = spine.descendants().find_map(|s| match &s.node().kind {
        NodeKind::Variants { alternatives } => Some((s.clone(), alternatives.clone())),
        _ => None,
    });
    let Some((site, alternatives)) = site else {
        return vec![Arc::clone(program)];
    };
    if alternatives.is_empty() {
        invariants::empty_variants(&site);
    }
    alternatives
        .iter()
        .flat_map(|alt| expand_variants(&choose(&site, alt)))
        .collect()
}

/// The program with `site` replaced by `alt`.
fn choose(site: &Spine, alt: &NodeRef) -> NodeRef {
    if let NodeKind::Block { children } = &alt.kind
        && let Some(parent) = site.parent()
        && let NodeKind::Block { children: siblings } = &parent.node().kind
        && let Some(PathFragment::Index(_, index)) = site.fragment()
    {
        let mut merged = Vec::with_capacity(siblings.len() + children.len());
        merged.extend(siblings[..index].iter().cloned());
        merged.extend(children.iter().cloned());
        merged.extend(siblings[index + 1..].iter().cloned());
        return Arc::clone(parent.replaced_with(block(merged)).root().node());
    }
    Arc::clone(site.replaced_with(Arc::clone(alt)).root().node())
}
