//! Building blocks for target-language emitters.
//!
//! Emitters produce a [`TokenTree`]; a detokenizer flattens it to text. The
//! helpers here cover the parts most targets share:
//! - literal rendering that picks the shortest valid spelling
//! - precedence-driven parenthesization for infix targets
//! - `else if` chain flattening

mod error;
mod literals;
mod precedence;
mod token;


pub use error::EmitError;
pub use literals::{DOUBLE_QUOTED, TextOption, emit_int_literal, emit_text_literal, no_restriction};
pub use precedence::{IfChain, if_chain, needs_parens};
pub use token::{TokenTree, detokenize, detokenize_with, is_ident_char, join_groups};
