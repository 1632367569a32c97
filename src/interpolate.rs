//! Placeholder grammar shared by variable resolution and file-content substitution.
//!
//! A placeholder is `{{`, optional whitespace, an identifier, optional whitespace, `}}`.
//! Identifiers follow `[A-Za-z_][A-Za-z0-9_]*`.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::resolver::VariableContext;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Returns true if `name` can appear inside a placeholder.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Replaces every placeholder in `template` with its value from `context`.
///
/// Unknown names interpolate to the empty string.
pub fn interpolate(template: &str, context: &VariableContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            context.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Replaces placeholders naming variables present in `context`, leaving any other
/// placeholder untouched. Returns `Cow::Borrowed` when nothing was replaced.
pub fn substitute_declared<'t>(content: &'t str, context: &VariableContext) -> Cow<'t, str> {
    PLACEHOLDER.replace_all(content, |caps: &Captures| match context.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    })
}
