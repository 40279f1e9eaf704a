//! Helpers for deriving and checking company codes.

use regex::Regex;

lazy_static::lazy_static! {
    static ref NON_ALNUM_RUN: Regex = Regex::new(r"[^\p{Alphabetic}\p{M}\p{Nd}]+").unwrap();
}

/// Lower-cases `name` and collapses every run of non-alphanumeric characters
/// into a single hyphen. Leading and trailing hyphens are dropped.
/// Letters and digits of any script count as alphanumeric.
///
/// `"Apple Computer, Inc."` becomes `"apple-computer-inc"`, `"Café Müller GmbH"`
/// becomes `"café-müller-gmbh"`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Returns the explicit code when one was supplied, otherwise the slug of `name`.
/// `None` means neither produced a usable code.
pub fn resolve_company_code(code: Option<&str>, name: &str) -> Option<String> {
    let code = match code.map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => slugify(name),
    };
    (!code.is_empty()).then_some(code)
}
