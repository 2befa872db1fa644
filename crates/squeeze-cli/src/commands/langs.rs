use squeeze_langs::Lang;

pub fn run() {
    print!("{}", listing(&squeeze_langs::all()));
}

fn listing(langs: &[Lang]) -> String {
    let mut out = format!("Supported languages ({}):\n", langs.len());
    for lang in langs {
        let marker = if lang.is_identity() { "  (ir)" } else { "" };
        out.push_str(&format!("  {:<12}.{}{}\n", lang.name(), lang.extension(), marker));
    }
    out
}
