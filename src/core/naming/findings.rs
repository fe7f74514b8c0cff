//! Turn violations into diagnostics and proposed renames.

use serde::Serialize;

use super::facts::{Location, SymbolFacts, SymbolKind};
use super::fixer::repair;
use super::rules::{carries_prefix_loosely, Violation, ViolationRule};

/// Identifier every naming diagnostic is reported under.
pub const RULE_ID: &str = "IDE99999";

pub const RULE_TITLE: &str = "Names must not contain underscores";

pub const RULE_CATEGORY: &str = "Naming";

pub const HELP_LINK: &str = "https://notes.duckode.com/?user=IDE&category=IDE99999&categoryID=0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Naming violations always fail the build.
    Error,
}

/// A single `(old, new)` rename for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedFix {
    pub old_name: String,
    pub new_name: String,
    /// Declaration site of the symbol being renamed.
    pub location: Location,
    /// Short label for hosts that list fixes, e.g. in a code-action menu.
    pub title: String,
}

impl ProposedFix {
    pub fn new(
        old_name: impl Into<String>,
        new_name: impl Into<String>,
        location: Location,
    ) -> Self {
        let new_name = new_name.into();
        Self {
            title: format!("Fix naming violation: {}", new_name),
            old_name: old_name.into(),
            new_name,
            location,
        }
    }
}

/// One reported naming violation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub help_link: &'static str,
    pub rule: ViolationRule,
    pub severity: Severity,
    pub symbol: String,
    pub kind: SymbolKind,
    pub message: String,
    pub location: Location,
    /// Absent when the fixer declines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<ProposedFix>,
}

/// Build the diagnostic for a violating symbol, attaching a fix when one exists.
pub fn build_diagnostic(facts: &SymbolFacts, violation: &Violation) -> Diagnostic {
    let fix = repair(facts, violation)
        .map(|new_name| ProposedFix::new(&facts.name, new_name, facts.location.clone()));

    Diagnostic {
        rule_id: RULE_ID,
        title: RULE_TITLE,
        category: RULE_CATEGORY,
        help_link: HELP_LINK,
        rule: violation.rule,
        severity: Severity::Error,
        symbol: facts.name.clone(),
        kind: facts.kind,
        message: message_for(facts, violation),
        location: facts.location.clone(),
        fix,
    }
}

fn message_for(facts: &SymbolFacts, violation: &Violation) -> String {
    let name = &facts.name;

    match violation.rule {
        ViolationRule::InteriorUnderscore | ViolationRule::StaticPrefixInteriorUnderscore => {
            format!("Symbol '{}' contains an underscore '_'", name)
        }
        ViolationRule::AllowedMethodPrefixCasing
        | ViolationRule::AllowedMethodPrefixUnderscore
        | ViolationRule::MissingAllowedMethodPrefix => format!(
            "Method '{}' must start with '{}' followed by an uppercase letter and no further underscores",
            name,
            violation.method_prefix.unwrap_or_default()
        ),
        ViolationRule::FieldPrefixMismatch => {
            let Some(prefix) = violation.field_prefix.as_ref() else {
                return format!("Field '{}' does not match its type prefix", name);
            };
            let expected = prefix.expected_for(facts.accessibility);
            if carries_prefix_loosely(name, prefix) {
                format!(
                    "Field '{}' should start with '{}' (prefix has the wrong case or separator)",
                    name, expected
                )
            } else {
                format!("Field '{}' should start with '{}'", name, expected)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::facts::Accessibility;
    use crate::naming::policy::NamingPolicy;
    use crate::naming::rules::check;

    fn diagnose(facts: &SymbolFacts) -> Diagnostic {
        let violation = check(facts, NamingPolicy::standard()).unwrap();
        build_diagnostic(facts, &violation)
    }

    #[test]
    fn underscore_message_and_fix() {
        let facts = SymbolFacts::new(SymbolKind::LocalVariable, "temp_count").at("Game.cs", 12, 9);
        let diagnostic = diagnose(&facts);

        assert_eq!(diagnostic.rule_id, "IDE99999");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "Symbol 'temp_count' contains an underscore '_'");
        assert_eq!(diagnostic.location.line, 12);

        let fix = diagnostic.fix.unwrap();
        assert_eq!(fix.old_name, "temp_count");
        assert_eq!(fix.new_name, "tempcount");
        assert_eq!(fix.location.file, "Game.cs");
        assert_eq!(fix.title, "Fix naming violation: tempcount");
    }

    #[test]
    fn diagnostic_carries_descriptor_metadata() {
        let facts = SymbolFacts::new(SymbolKind::Parameter, "item_x");
        let diagnostic = diagnose(&facts);

        assert_eq!(diagnostic.category, "Naming");
        assert!(diagnostic.help_link.contains("IDE99999"));

        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["title"], "Names must not contain underscores");
        assert_eq!(json["helpLink"], HELP_LINK);
        assert_eq!(json["fix"]["title"], "Fix naming violation: itemx");
    }

    #[test]
    fn method_message_names_prefix() {
        let facts = SymbolFacts::new(SymbolKind::Method, "BtnClick_submit");
        let diagnostic = diagnose(&facts);
        assert_eq!(
            diagnostic.message,
            "Method 'BtnClick_submit' must start with 'BtnClick_' followed by an uppercase letter and no further underscores"
        );
    }

    #[test]
    fn field_message_names_expected_form() {
        let facts = SymbolFacts::field("_my_button", "Button", Accessibility::NonPublic);
        assert_eq!(
            diagnose(&facts).message,
            "Field '_my_button' should start with '_btn'"
        );

        let facts = SymbolFacts::field("_BtnSubmit", "Button", Accessibility::NonPublic);
        assert!(diagnose(&facts)
            .message
            .starts_with("Field '_BtnSubmit' should start with '_btn' (prefix has the wrong case"));
    }

    #[test]
    fn declined_repair_keeps_diagnostic_without_fix() {
        let facts = SymbolFacts::new(SymbolKind::Method, "OnClick");
        let diagnostic = diagnose(&facts);
        assert_eq!(diagnostic.rule, ViolationRule::MissingAllowedMethodPrefix);
        assert!(diagnostic.fix.is_none());
    }
}
