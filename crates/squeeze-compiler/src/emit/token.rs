/// Nested token sequence produced by emitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenTree {
    Token(String),
    Group(Vec<TokenTree>),
}

impl TokenTree {
    pub fn group<T: Into<TokenTree>>(items: impl IntoIterator<Item = T>) -> Self {
        TokenTree::Group(items.into_iter().map(Into::into).collect())
    }

    pub fn empty() -> Self {
        TokenTree::Group(Vec::new())
    }

    /// Non-empty tokens in order.
    pub fn tokens(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TokenTree::Token(t) if t.is_empty() => {}
            TokenTree::Token(t) => out.push(t),
            TokenTree::Group(items) => {
                for item in items {
                    item.collect_tokens(out);
                }
            }
        }
    }
}

impl From<&str> for TokenTree {
    fn from(s: &str) -> Self {
        TokenTree::Token(s.to_owned())
    }
}

impl From<String> for TokenTree {
    fn from(s: String) -> Self {
        TokenTree::Token(s)
    }
}

impl From<Vec<TokenTree>> for TokenTree {
    fn from(items: Vec<TokenTree>) -> Self {
        TokenTree::Group(items)
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Default detokenizer: a space only where two identifier characters meet.
pub fn detokenize(tree: &TokenTree) -> String {
    detokenize_with(tree, |prev, next| is_ident_char(prev) && is_ident_char(next))
}

/// Concatenates tokens, inserting a space where `needs_space(last, first)`
/// holds for the last char so far and the first char of the next token.
pub fn detokenize_with(tree: &TokenTree, needs_space: impl Fn(char, char) -> bool) -> String {
    let mut out = String::new();
    for token in tree.tokens() {
        if let (Some(prev), Some(next)) = (out.chars().next_back(), token.chars().next())
            && needs_space(prev, next)
        {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Groups separated by `sep`.
pub fn join_groups(groups: impl IntoIterator<Item = TokenTree>, sep: &str) -> TokenTree {
    let mut out = Vec::new();
    for (i, group) in groups.into_iter().enumerate() {
        if i > 0 {
            out.push(TokenTree::from(sep));
        }
        out.push(group);
    }
    TokenTree::Group(out)
}
