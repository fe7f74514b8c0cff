//! Name canonicalizer: compute the single replacement name for a violation.
//!
//! Every repair is pure and deterministic, and re-checking the repaired name
//! against the same facts reports nothing. `None` means the fixer declines:
//! the diagnostic stands but no rename is offered.

use super::casing::{camel_join, capitalize, find_ignore_case, pascal_join, remove_ignore_case};
use super::classify::STATIC_MARKER;
use super::facts::SymbolFacts;
use super::policy::ResolvedPrefix;
use super::rules::{Violation, ViolationRule};

/// Produce the canonical name for a violating symbol.
pub fn repair(facts: &SymbolFacts, violation: &Violation) -> Option<String> {
    let name = facts.name.as_str();

    let repaired = match violation.rule {
        ViolationRule::InteriorUnderscore => strip_interior_underscores(name),
        ViolationRule::StaticPrefixInteriorUnderscore => repair_static(name)?,
        ViolationRule::AllowedMethodPrefixCasing
        | ViolationRule::AllowedMethodPrefixUnderscore
        | ViolationRule::MissingAllowedMethodPrefix => {
            repair_method(name, violation.method_prefix?)?
        }
        ViolationRule::FieldPrefixMismatch => {
            repair_field(name, violation.field_prefix.as_ref()?, facts)?
        }
    };

    (repaired != name).then_some(repaired)
}

/// Keep the first and last character, drop every underscore between them.
pub fn strip_interior_underscores(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 2 {
        return name.to_string();
    }

    let last = chars.len() - 1;
    let mut out = String::with_capacity(name.len());
    out.push(chars[0]);
    out.extend(chars[1..last].iter().filter(|c| **c != '_'));
    out.push(chars[last]);
    out
}

fn repair_static(name: &str) -> Option<String> {
    let remainder = name.strip_prefix(STATIC_MARKER)?;
    Some(format!("{}{}", STATIC_MARKER, remainder.replace('_', "")))
}

/// Cut the prefix's bare form out of the name, camel-join what is left around
/// it, capitalize, and put the exact prefix in front.
///
/// When underscores split the bare form (`on_click_x`), the name is
/// camel-joined first so the match can be located.
fn repair_method(name: &str, prefix: &str) -> Option<String> {
    let bare = prefix.trim_end_matches('_');
    let source = match find_ignore_case(name, bare) {
        Some(_) => name.to_string(),
        None => camel_join(name),
    };
    let pos = find_ignore_case(&source, bare)?;

    let joined = format!("{}{}", &source[..pos], &source[pos + bare.len()..]);
    let remainder = if joined.contains('_') {
        camel_join(&joined)
    } else {
        joined
    };
    let remainder = capitalize(&remainder);

    if remainder.is_empty() {
        return None;
    }

    Some(format!("{}{}", prefix, remainder))
}

/// Strip the prefix and all underscores to get a bare stem, then rebuild the
/// name in the expected form for the field's accessibility.
fn repair_field(name: &str, prefix: &ResolvedPrefix, facts: &SymbolFacts) -> Option<String> {
    let stripped = remove_ignore_case(name, prefix.bare());
    let stem = pascal_join(&stripped);

    if stem.is_empty() {
        return None;
    }

    Some(format!("{}{}", prefix.expected_for(facts.accessibility), stem))
}
