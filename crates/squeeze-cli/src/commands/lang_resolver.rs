use std::path::Path;

use squeeze_langs::Lang;

/// Resolve the target from an explicit flag, or infer it from the output
/// file's extension: `out.janet` → janet, `golf.mjs` → javascript.
pub fn resolve_lang(explicit: Option<&str>, output: Option<&Path>) -> Option<Lang> {
    if let Some(name) = explicit {
        return squeeze_langs::from_name(name);
    }

    let ext = output?.extension()?.to_str()?;
    squeeze_langs::from_ext(ext)
}

/// Resolve a language name, returning an error message if unknown.
pub fn resolve_lang_required(lang_name: &str) -> Result<Lang, String> {
    squeeze_langs::from_name(lang_name).ok_or_else(|| format!("unknown language: '{lang_name}'"))
}

/// Resolve the target with user-friendly error handling.
/// Exits with an error message if the language cannot be determined.
pub fn require_lang(explicit: Option<&str>, output: Option<&Path>, command: &str) -> Lang {
    if let Some(lang_name) = explicit {
        match resolve_lang_required(lang_name) {
            Ok(l) => return l,
            Err(msg) => {
                eprintln!("error: {msg}");
                if let Some(suggestion) = suggest_language(lang_name) {
                    eprintln!();
                    eprintln!("Did you mean '{suggestion}'?");
                }
                eprintln!();
                eprintln!("Run 'squeeze langs' for the full list.");
                std::process::exit(1);
            }
        }
    }

    if let Some(l) = resolve_lang(None, output) {
        return l;
    }

    eprintln!("error: target language is required for {command}");
    eprintln!();
    eprintln!("hint: use -l <language>, or an --output file with a known extension");
    std::process::exit(1);
}

/// Suggest a language name close to a typo.
pub fn suggest_language(input: &str) -> Option<String> {
    let input = input.to_lowercase();
    squeeze_langs::all()
        .into_iter()
        .map(|lang| (edit_distance(lang.name(), &input), lang.name()))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_owned())
}

/// Levenshtein distance over chars, one row at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}
