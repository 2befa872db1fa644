//! Lowering of literal table lookups.

use std::collections::HashSet;
use std::sync::Arc;

use num_bigint::BigInt;
use squeeze_core::build::{call, int, list, op, table, text};
use squeeze_core::types::type_of;
use squeeze_core::{Node, NodeKind, NodeRef, OpCode, Type};

use crate::plugin::{Rewrite, rewrite_fn};

/// Largest modulus tried by [`table_hashing`] unless configured otherwise.
pub const DEFAULT_MAX_MOD: u32 = 9999;

/// Behaviour of a target's builtin string hash.
pub type HashFn = fn(&str) -> u32;

/// Replaces `table_get(<table literal>, key)` with a list lookup indexed by
/// `hash(key) % mod % width`, where `hash` is the target's builtin.
///
/// `width` is the smallest list length with a collision-free placement,
/// scanned from the key count upward, and for each width `mod` is scanned
/// from `width` up to `max_mod`. Unused slots hold the value type's default.
/// When `mod == width` the inner `% mod` is dropped.
pub fn table_hashing(hash: HashFn, hash_call: &str, max_mod: u32) -> Arc<dyn Rewrite> {
    named_table_hashing("table_hashing", hash, hash_call.to_owned(), max_mod)
}

/// [`table_hashing`] with the Java string hash and a `hash` builtin.
pub fn test_table_hashing(max_mod: u32) -> Arc<dyn Rewrite> {
    named_table_hashing(
        &format!("test_table_hashing({max_mod})"),
        java_hash,
        "hash".to_owned(),
        max_mod,
    )
}

fn named_table_hashing(
    name: &str,
    hash: HashFn,
    hash_call: String,
    max_mod: u32,
) -> Arc<dyn Rewrite> {
    rewrite_fn(name, move |node, spine| {
        let (literal, pairs, key) = table_lookup(node)?;
        let Type::Table { key: key_ty, value } = type_of(literal, spine) else {
            return None;
        };
        if *key_ty != Type::Text {
            return None;
        }
        let mut hashed = Vec::with_capacity(pairs.len());
        for (k, v) in &pairs {
            hashed.push((hash(k.as_text()?), v.clone()));
        }
        let (slots, modulus) = find_hash(&hashed, max_mod)?;
        let width = slots.len();
        let default = default_value(&value)?;
        let items = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| default.clone()))
            .collect();

        let hashed_key = Arc::new(
            (*call(hash_call.clone(), vec![key.clone()]))
                .clone()
                .with_ty(Type::integer(0, u32::MAX)),
        );
        let index = if modulus as usize == width {
            hashed_key
        } else {
            op(OpCode::Mod, vec![hashed_key, int(modulus)])
        };
        Some(op(
            OpCode::ListGet,
            vec![list(items), op(OpCode::Mod, vec![index, int(width)])],
        ))
    })
}

/// `table_get(values, list_find(keys, key))` for literal tables whose keys
/// are distinct integer or text literals.
pub fn table_to_list_lookup() -> Arc<dyn Rewrite> {
    rewrite_fn("table_to_list_lookup", |node, _| {
        let (_, pairs, key) = table_lookup(node)?;
        let mut seen = HashSet::new();
        for (k, _) in &pairs {
            let literal = match &k.kind {
                NodeKind::Integer { value } => format!("{value}n"),
                NodeKind::Text { value } => format!("{value:?}"),
                _ => return None,
            };
            if !seen.insert(literal) {
                return None;
            }
        }
        let (keys, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Some(op(
            OpCode::ListGet,
            vec![
                list(values),
                op(OpCode::ListFind, vec![list(keys), key.clone()]),
            ],
        ))
    })
}

/// Table literal, its key/value pairs and the looked-up key of
/// `table_get(<table literal>, key)`.
fn table_lookup(node: &Node) -> Option<(&NodeRef, Vec<(NodeRef, NodeRef)>, &NodeRef)> {
    let [literal, key] = node.as_op(OpCode::TableGet)? else {
        return None;
    };
    let NodeKind::Table { pairs } = &literal.kind else {
        return None;
    };
    let pairs = pairs
        .iter()
        .map(|pair| match &pair.kind {
            NodeKind::KeyValue { key, value } => Some((key.clone(), value.clone())),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some((literal, pairs, key))
}

/// Smallest collision-free placement of `hashed` entries.
///
/// Returns the slots (`None` for holes) and the modulus used.
fn find_hash(hashed: &[(u32, NodeRef)], max_mod: u32) -> Option<(Vec<Option<NodeRef>>, u32)> {
    let n = hashed.len();
    for width in n..n * 4 {
        let first_mod = u32::try_from(width).ok()?;
        'modulus: for modulus in first_mod..=max_mod {
            let mut slots: Vec<Option<NodeRef>> = vec![None; width];
            for (h, value) in hashed {
                let i = ((h % modulus) as usize) % width;
                if slots[i].is_some() {
                    continue 'modulus;
                }
                slots[i] = Some(value.clone());
            }
            return Some((slots, modulus));
        }
    }
    None
}

/// Filler for unused list slots.
fn default_value(ty: &Type) -> Option<NodeRef> {
    match ty {
        Type::Integer(range) => {
            let zero = BigInt::from(0);
            let positive = range.low.as_ref().is_some_and(|l| *l > zero);
            let negative = range.high.as_ref().is_some_and(|h| *h < zero);
            match (positive, negative) {
                (true, _) => range.low.clone().map(|v| int(v)),
                (_, true) => range.high.clone().map(|v| int(v)),
                _ => Some(int(0)),
            }
        }
        Type::Text => Some(text("")),
        Type::List { .. } => Some(list(Vec::new())),
        Type::Table { .. } => Some(table(Vec::new())),
        Type::Void | Type::Boolean => None,
    }
}

/// The Java `String.hashCode`, as an unsigned 32-bit value.
pub fn java_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(c)))
        as u32
}
