//! Per-category violation rules.
//!
//! Each category has one ordered decision path, so at most one rule fires
//! for a symbol and the same facts always produce the same answer.

use serde::Serialize;

use super::casing::{find_ignore_case, is_fixable_lowercase, starts_with_ignore_case};
use super::classify::{classify, Category, STATIC_MARKER};
use super::facts::{Accessibility, SymbolFacts};
use super::policy::{NamingPolicy, ResolvedPrefix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    /// Underscore strictly between the first and last character.
    InteriorUnderscore,
    /// Underscore after the `s_` static marker.
    StaticPrefixInteriorUnderscore,
    /// Allow-listed method prefix followed by a lowercase letter.
    AllowedMethodPrefixCasing,
    /// Allow-listed method prefix followed by text containing `_`.
    AllowedMethodPrefixUnderscore,
    /// Method looks like an allow-listed handler but lacks the exact prefix.
    MissingAllowedMethodPrefix,
    /// Field does not start with its type-derived prefix.
    FieldPrefixMismatch,
}

impl ViolationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::InteriorUnderscore => "interior_underscore",
            ViolationRule::StaticPrefixInteriorUnderscore => "static_prefix_interior_underscore",
            ViolationRule::AllowedMethodPrefixCasing => "allowed_method_prefix_casing",
            ViolationRule::AllowedMethodPrefixUnderscore => "allowed_method_prefix_underscore",
            ViolationRule::MissingAllowedMethodPrefix => "missing_allowed_method_prefix",
            ViolationRule::FieldPrefixMismatch => "field_prefix_mismatch",
        }
    }
}

/// A fired rule plus the policy context the fixer needs to repair it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule: ViolationRule,
    /// The allow-listed method prefix involved, for method rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_prefix: Option<&'static str>,
    /// The resolved field prefix, for `FieldPrefixMismatch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_prefix: Option<ResolvedPrefix>,
}

impl Violation {
    fn plain(rule: ViolationRule) -> Self {
        Self {
            rule,
            method_prefix: None,
            field_prefix: None,
        }
    }

    fn method(rule: ViolationRule, prefix: &'static str) -> Self {
        Self {
            rule,
            method_prefix: Some(prefix),
            field_prefix: None,
        }
    }

    fn field(prefix: ResolvedPrefix) -> Self {
        Self {
            rule: ViolationRule::FieldPrefixMismatch,
            method_prefix: None,
            field_prefix: Some(prefix),
        }
    }
}

/// Classify and evaluate in one step.
pub fn check(facts: &SymbolFacts, policy: &NamingPolicy) -> Option<Violation> {
    evaluate(facts, classify(facts), policy)
}

/// Decide whether a classified symbol violates its category's rule.
pub fn evaluate(facts: &SymbolFacts, category: Category, policy: &NamingPolicy) -> Option<Violation> {
    let name = facts.name.as_str();

    match category {
        Category::PropertyAccessor => None,
        Category::TypedField => evaluate_field(facts, policy),
        Category::AllowListableMethod => evaluate_method(name, policy),
        Category::StaticMarkedSymbol => evaluate_static(name),
        Category::ScopedLocal if name.starts_with(STATIC_MARKER) => evaluate_static(name),
        Category::ScopedLocal | Category::LoopVariable | Category::GenericSymbol => {
            interior_underscore(name)
        }
    }
}

/// True when the text strictly between the first and last character holds `_`.
pub fn has_interior_underscore(name: &str) -> bool {
    let chars: Vec<char> = name.chars().collect();
    chars.len() > 2 && chars[1..chars.len() - 1].contains(&'_')
}

fn interior_underscore(name: &str) -> Option<Violation> {
    has_interior_underscore(name).then(|| Violation::plain(ViolationRule::InteriorUnderscore))
}

fn evaluate_static(name: &str) -> Option<Violation> {
    let remainder = name.strip_prefix(STATIC_MARKER)?;
    remainder
        .contains('_')
        .then(|| Violation::plain(ViolationRule::StaticPrefixInteriorUnderscore))
}

fn evaluate_method(name: &str, policy: &NamingPolicy) -> Option<Violation> {
    let allow = &policy.method_prefixes;

    if let Some(prefix) = allow.exact_match(name) {
        let remainder = &name[prefix.len()..];
        if remainder.chars().next().is_some_and(is_fixable_lowercase) {
            return Some(Violation::method(ViolationRule::AllowedMethodPrefixCasing, prefix));
        }
        if remainder.contains('_') {
            return Some(Violation::method(
                ViolationRule::AllowedMethodPrefixUnderscore,
                prefix,
            ));
        }
        return None;
    }

    if let Some(prefix) = allow.fuzzy_match(name) {
        return Some(Violation::method(ViolationRule::MissingAllowedMethodPrefix, prefix));
    }

    interior_underscore(name)
}

fn evaluate_field(facts: &SymbolFacts, policy: &NamingPolicy) -> Option<Violation> {
    let declared = facts.declared_type.as_ref()?;
    let name = facts.name.as_str();

    if !declared.is_class {
        return interior_underscore(name);
    }

    let Some(prefix) = policy.prefixes.resolve(&declared.name, facts.accessibility) else {
        return interior_underscore(name);
    };

    if field_prefix_compliant(name, &prefix, facts.accessibility) {
        None
    } else {
        Some(Violation::field(prefix))
    }
}

/// A field complies when it starts with its expected prefix and has no
/// further underscore. Public fields also accept the prefix anywhere in the
/// name, in any case, as long as it holds the only underscore.
pub(crate) fn field_prefix_compliant(
    name: &str,
    prefix: &ResolvedPrefix,
    accessibility: Accessibility,
) -> bool {
    let expected = prefix.expected_for(accessibility);
    if let Some(rest) = name.strip_prefix(expected.as_str()) {
        if !rest.contains('_') {
            return true;
        }
    }

    if accessibility == Accessibility::Public {
        let public_form = prefix.public_form();
        if let Some(pos) = find_ignore_case(name, &public_form) {
            let mut without = name.to_string();
            without.replace_range(pos..pos + public_form.len(), "");
            return !without.contains('_');
        }
    }

    false
}

/// Whether `name` already carries the prefix in some casing. Used by the
/// report to distinguish "wrong case" from "absent".
pub fn carries_prefix_loosely(name: &str, prefix: &ResolvedPrefix) -> bool {
    let trimmed = name.trim_start_matches('_');
    starts_with_ignore_case(trimmed, prefix.bare())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::facts::SymbolKind;

    fn policy() -> &'static NamingPolicy {
        NamingPolicy::standard()
    }

    fn rule_of(facts: &SymbolFacts) -> Option<ViolationRule> {
        check(facts, policy()).map(|v| v.rule)
    }

    #[test]
    fn interior_underscore_ignores_edges() {
        assert!(has_interior_underscore("temp_count"));
        assert!(!has_interior_underscore("_count"));
        assert!(!has_interior_underscore("count_"));
        assert!(!has_interior_underscore("a_"));
        assert!(!has_interior_underscore("_"));
        assert!(!has_interior_underscore(""));
        assert!(has_interior_underscore("a_b"));
    }

    #[test]
    fn generic_symbols_use_interior_rule() {
        let param = SymbolFacts::new(SymbolKind::Parameter, "max_hp");
        assert_eq!(rule_of(&param), Some(ViolationRule::InteriorUnderscore));

        let ty = SymbolFacts::new(SymbolKind::TypeDecl, "PlayerController");
        assert_eq!(rule_of(&ty), None);
    }

    #[test]
    fn static_marker_checks_only_remainder() {
        let field = SymbolFacts::field("s_instance", "Manager", Accessibility::NonPublic);
        assert_eq!(rule_of(&field), None);

        let field = SymbolFacts::field("s_my_value", "Manager", Accessibility::NonPublic);
        assert_eq!(
            rule_of(&field),
            Some(ViolationRule::StaticPrefixInteriorUnderscore)
        );
    }

    #[test]
    fn scoped_local_honours_static_marker() {
        let local = SymbolFacts::new(SymbolKind::LocalVariable, "s_cache");
        assert_eq!(rule_of(&local), None);

        let local = SymbolFacts::new(SymbolKind::LocalVariable, "s_my_cache");
        assert_eq!(
            rule_of(&local),
            Some(ViolationRule::StaticPrefixInteriorUnderscore)
        );
    }

    #[test]
    fn loop_variable_gets_no_static_exemption() {
        let item = SymbolFacts::new(SymbolKind::LoopVariable, "s_item");
        assert_eq!(rule_of(&item), Some(ViolationRule::InteriorUnderscore));
    }

    #[test]
    fn allowed_prefix_casing_then_underscore() {
        let casing = SymbolFacts::new(SymbolKind::Method, "BtnClick_submit");
        let violation = check(&casing, policy()).unwrap();
        assert_eq!(violation.rule, ViolationRule::AllowedMethodPrefixCasing);
        assert_eq!(violation.method_prefix, Some("BtnClick_"));

        // Casing is checked before the underscore rule.
        let both = SymbolFacts::new(SymbolKind::Method, "OnClick_start_game");
        assert_eq!(rule_of(&both), Some(ViolationRule::AllowedMethodPrefixCasing));

        let underscore = SymbolFacts::new(SymbolKind::Method, "OnClick_Start_Game");
        assert_eq!(
            rule_of(&underscore),
            Some(ViolationRule::AllowedMethodPrefixUnderscore)
        );

        let ok = SymbolFacts::new(SymbolKind::Method, "RPC_SyncState");
        assert_eq!(rule_of(&ok), None);
    }

    #[test]
    fn allowed_prefix_tolerates_caseless_first_char() {
        let digit = SymbolFacts::new(SymbolKind::Method, "RPC_2Players");
        assert_eq!(rule_of(&digit), None);

        let bare = SymbolFacts::new(SymbolKind::Method, "OnClick_");
        assert_eq!(rule_of(&bare), None);
    }

    #[test]
    fn fuzzy_prefix_fires_missing_rule() {
        let method = SymbolFacts::new(SymbolKind::Method, "onclick_start");
        let violation = check(&method, policy()).unwrap();
        assert_eq!(violation.rule, ViolationRule::MissingAllowedMethodPrefix);
        assert_eq!(violation.method_prefix, Some("OnClick_"));

        let camel = SymbolFacts::new(SymbolKind::Method, "HandleRpcCall");
        assert_eq!(rule_of(&camel), Some(ViolationRule::MissingAllowedMethodPrefix));
    }

    #[test]
    fn plain_methods_fall_through_to_interior_rule() {
        let method = SymbolFacts::new(SymbolKind::Method, "load_level");
        assert_eq!(rule_of(&method), Some(ViolationRule::InteriorUnderscore));

        let method = SymbolFacts::new(SymbolKind::Method, "Update");
        assert_eq!(rule_of(&method), None);
    }

    #[test]
    fn private_field_needs_underscore_and_lower_prefix() {
        let field = SymbolFacts::field("_my_button", "Button", Accessibility::NonPublic);
        let violation = check(&field, policy()).unwrap();
        assert_eq!(violation.rule, ViolationRule::FieldPrefixMismatch);
        assert_eq!(violation.field_prefix.unwrap().private_form(), "btn");

        let ok = SymbolFacts::field("_btnSubmit", "Button", Accessibility::NonPublic);
        assert_eq!(rule_of(&ok), None);

        let wrong_case = SymbolFacts::field("_BtnSubmit", "Button", Accessibility::NonPublic);
        assert_eq!(rule_of(&wrong_case), Some(ViolationRule::FieldPrefixMismatch));

        let trailing = SymbolFacts::field("_btnMy_Thing", "Button", Accessibility::NonPublic);
        assert_eq!(rule_of(&trailing), Some(ViolationRule::FieldPrefixMismatch));
    }

    #[test]
    fn public_field_prefix_and_tolerated_variants() {
        let ok = SymbolFacts::field("Btn_Submit", "Button", Accessibility::Public);
        assert_eq!(rule_of(&ok), None);

        let tolerated = SymbolFacts::field("btn_Submit", "Button", Accessibility::Public);
        assert_eq!(rule_of(&tolerated), None);

        let embedded = SymbolFacts::field("MainBtn_Submit", "Button", Accessibility::Public);
        assert_eq!(rule_of(&embedded), None);

        let missing = SymbolFacts::field("SubmitButton", "Button", Accessibility::Public);
        assert_eq!(rule_of(&missing), Some(ViolationRule::FieldPrefixMismatch));

        let extra = SymbolFacts::field("Btn_Submit_Main", "Button", Accessibility::Public);
        assert_eq!(rule_of(&extra), Some(ViolationRule::FieldPrefixMismatch));
    }

    #[test]
    fn value_typed_field_uses_interior_rule() {
        let field = SymbolFacts::new(SymbolKind::Field, "_max_hp").with_type("Int32", false);
        assert_eq!(rule_of(&field), Some(ViolationRule::InteriorUnderscore));

        let field = SymbolFacts::new(SymbolKind::Field, "_hp").with_type("Int32", false);
        assert_eq!(rule_of(&field), None);
    }

    #[test]
    fn unknown_class_type_uses_interior_rule() {
        let field = SymbolFacts::field("_save_data", "SaveData", Accessibility::NonPublic);
        assert_eq!(rule_of(&field), Some(ViolationRule::InteriorUnderscore));
    }

    #[test]
    fn field_without_declared_type_has_no_rule() {
        let field = SymbolFacts::new(SymbolKind::Field, "_my_button");
        assert_eq!(rule_of(&field), None);
    }

    #[test]
    fn property_accessor_never_violates() {
        let accessor = SymbolFacts::new(SymbolKind::Method, "get_Value").property_accessor();
        assert_eq!(rule_of(&accessor), None);
    }

    #[test]
    fn loose_prefix_detection() {
        let prefix = policy()
            .prefixes
            .resolve("Button", Accessibility::NonPublic)
            .unwrap();
        assert!(carries_prefix_loosely("_BtnSubmit", &prefix));
        assert!(!carries_prefix_loosely("_my_button", &prefix));
    }
}
