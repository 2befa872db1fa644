use num_bigint::BigInt;
use num_traits::Signed;

/// One way of spelling a text literal in a target language.
#[derive(Clone, Copy)]
pub struct TextOption {
    pub open: &'static str,
    pub close: &'static str,
    /// Characters replaced by an escape sequence, in order.
    pub escapes: &'static [(char, &'static str)],
    /// Values this option cannot represent.
    pub forbidden: fn(&str) -> bool,
}

pub fn no_restriction(_: &str) -> bool {
    false
}

pub const DOUBLE_QUOTED: TextOption = TextOption {
    open: "\"",
    close: "\"",
    escapes: &[('\\', "\\\\"), ('\n', "\\n"), ('\r', "\\r"), ('"', "\\\"")],
    forbidden: no_restriction,
};

impl TextOption {
    fn render(&self, value: &str) -> String {
        let mut out = String::from(self.open);
        for c in value.chars() {
            match self.escapes.iter().find(|(from, _)| *from == c) {
                Some((_, to)) => out.push_str(to),
                None => out.push(c),
            }
        }
        out.push_str(self.close);
        out
    }
}

/// Shortest spelling of `value` over the applicable options.
///
/// Ties go to the earlier option. `None` when every option forbids the value.
pub fn emit_text_literal(value: &str, options: &[TextOption]) -> Option<String> {
    let mut best: Option<String> = None;
    for option in options {
        if (option.forbidden)(value) {
            continue;
        }
        let current = option.render(value);
        if best
            .as_ref()
            .is_none_or(|b| current.chars().count() < b.chars().count())
        {
            best = Some(current);
        }
    }
    best
}

/// Shortest rendering of `value` over `(radix, prefix)` bases.
///
/// Ties go to the earlier base; the sign precedes the prefix.
pub fn emit_int_literal(value: &BigInt, bases: &[(u32, &str)]) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let mut best: Option<String> = None;
    for (radix, prefix) in bases {
        let current = format!("{sign}{prefix}{}", value.magnitude().to_str_radix(*radix));
        if best.as_ref().is_none_or(|b| current.len() < b.len()) {
            best = Some(current);
        }
    }
    best.unwrap_or_else(|| value.to_string())
}
