//! Glob matching on item codes and load-time wildcard fan-out.

use hewing_core::types::normalize_code;

use crate::items::ItemCatalog;
use crate::output::extract_variant_token;
use crate::recipe::RecipeDef;

pub fn is_wildcard(code: &str) -> bool {
    code.contains('*')
}

/// Match `text` against `pattern`, where `*` matches any run of characters
/// (including none). Comparison is ASCII case-insensitive.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let t: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut star_ti = 0usize;

    while ti < t.len() {
        if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

/// Text captured by the single `*` of `pattern` when matching `text`.
/// Returns None if the pattern does not have exactly one `*` or does not match.
pub fn capture(pattern: &str, text: &str) -> Option<String> {
    let (prefix, suffix) = pattern.split_once('*')?;
    if suffix.contains('*') {
        return None;
    }
    if text.len() < prefix.len() + suffix.len() {
        return None;
    }
    let head = text.get(..prefix.len())?;
    let tail = text.get(text.len() - suffix.len()..)?;
    if !head.eq_ignore_ascii_case(prefix) || !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    text.get(prefix.len()..text.len() - suffix.len())
        .map(str::to_string)
}

/// Replace `{name}` in `template` with `value`.
pub fn fill_placeholder(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}

/// Whether filling `variant` into the output template names a known item.
fn output_resolves(def: &RecipeDef, variant: &str, items: &dyn ItemCatalog) -> bool {
    let code = fill_placeholder(&def.output.code, &def.ingredient.name, variant);
    items.contains(&normalize_code(&code))
}

/// Fan a wildcard recipe out into one concrete recipe per matching item.
///
/// Each child has a concrete ingredient code, the variant filled into the
/// output placeholder and the code `<code>-<variant>`. The variant is the
/// text the `*` captured, or the item's species token when only the token
/// names a known output. Returns an empty list when the ingredient is not a
/// wildcard or nothing matches.
pub fn expand(def: &RecipeDef, items: &dyn ItemCatalog) -> Vec<RecipeDef> {
    let pattern = normalize_code(&def.ingredient.code);
    if !is_wildcard(&pattern) {
        return Vec::new();
    }
    let templated = def
        .output
        .code
        .contains(&format!("{{{}}}", def.ingredient.name));

    let mut children = Vec::new();
    for code in items.matching(&pattern) {
        let Some(captured) = capture(&pattern, &code) else {
            continue;
        };
        let variant = if !templated || output_resolves(def, &captured, items) {
            captured
        } else {
            match extract_variant_token(&code) {
                Some(token) if output_resolves(def, &token, items) => token,
                _ => captured,
            }
        };
        if variant.is_empty() {
            continue;
        }
        let mut child = def.clone();
        child.code = format!("{}-{}", def.code, variant);
        child.ingredient.code = code;
        child.output.code = fill_placeholder(&def.output.code, &def.ingredient.name, &variant);
        children.push(child);
    }
    children
}
