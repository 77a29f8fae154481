//! Cosmetic transform pipeline from a raw file path to a display title.
//!
//! Stages run in a fixed order, each independently toggleable. Bracket
//! stripping runs before dot replacement and extension stripping so that
//! names carrying both release tags and dotted words behave predictably.

use crate::config::PresentationConfig;

/// Maximum length of a presented title.
const MAX_TITLE_LEN: usize = 128;

/// Build the display title for a raw file path.
pub fn present(path: &str, opts: &PresentationConfig) -> String {
    let mut name = final_component(path).to_string();

    if opts.replace_underscores {
        name = name.replace('_', " ");
    }
    if opts.strip_brackets {
        name = strip_bracket_tags(&name);
    }
    if opts.replace_dots {
        name = replace_inner_dots(&name);
    }
    if opts.strip_extension {
        name = strip_extension(&name);
    }

    truncate_with_ellipsis(name.trim(), MAX_TITLE_LEN)
}

// ── Path stripping ────────────────────────────────────────────────────

/// Keep only the final path component; both separator conventions show up
/// depending on how the file was opened.
fn final_component(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

// ── Bracketed release tags ────────────────────────────────────────────

/// Remove every space-prefixed `[...]` group.
///
/// The removal is kept only when the stripped name still contains a dot;
/// a bracket that happens to carry the extension-bearing dot must survive.
fn strip_bracket_tags(name: &str) -> String {
    let stripped = remove_bracket_groups(name);
    if stripped.contains('.') {
        stripped
    } else {
        name.to_string()
    }
}

/// Drop each run of spaces followed by a closed `[...]` group. Unclosed
/// brackets are left alone.
fn remove_bracket_groups(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == ' ' || chars[i] == '[' {
            let mut j = i;
            while j < chars.len() && chars[j] == ' ' {
                j += 1;
            }
            if j < chars.len() && chars[j] == '[' {
                if let Some(close) = chars[j + 1..].iter().position(|&c| c == ']') {
                    i = j + 1 + close + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

// ── Scene-release dots ────────────────────────────────────────────────

/// Replace every dot except the last one with a space, keeping a trailing
/// extension separator intact.
fn replace_inner_dots(name: &str) -> String {
    match name.rfind('.') {
        Some(last) => {
            let (head, tail) = name.split_at(last);
            format!("{}{tail}", head.replace('.', " "))
        }
        None => name.to_string(),
    }
}

// ── Extension ─────────────────────────────────────────────────────────

/// Truncate at the last dot, dropping the extension.
fn strip_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(last) => name[..last].to_string(),
        None => name.to_string(),
    }
}

// ── Length cap ────────────────────────────────────────────────────────

/// Cap at `max` characters; a capped title ends in "..." and is exactly
/// `max` characters long.
fn truncate_with_ellipsis(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
