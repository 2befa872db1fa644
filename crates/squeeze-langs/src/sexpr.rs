//! Helpers for parenthesized targets.

use squeeze_compiler::emit::{TokenTree, detokenize_with};

/// `(head item...)`.
pub(crate) fn list(
    head: impl Into<TokenTree>,
    items: impl IntoIterator<Item = TokenTree>,
) -> TokenTree {
    let mut out = vec![TokenTree::from("("), head.into()];
    out.extend(items);
    out.push(TokenTree::from(")"));
    TokenTree::Group(out)
}

pub(crate) fn is_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}')
}

/// Tokens separated by one space, none next to a bracket.
pub(crate) fn detokenize(tree: &TokenTree) -> String {
    detokenize_with(tree, |prev, next| !is_bracket(prev) && !is_bracket(next))
}
