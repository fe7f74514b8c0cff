//! Identifier naming conventions for game-engine scripts.
//!
//! Checks declared identifiers against an underscore policy plus
//! type-derived field prefixes and allow-listed handler prefixes, and
//! proposes a single canonical rename for each violation. Works by:
//!
//! 1. Pulling symbol facts from a host-supplied [`SymbolSource`]
//! 2. Classifying each symbol into a rule category
//! 3. Evaluating the category's rule (at most one fires)
//! 4. Repairing the name, or declining when nothing meaningful is left
//! 5. Reporting diagnostics with their proposed fixes

pub(crate) mod casing;
pub mod classify;
pub mod facts;
pub mod findings;
pub mod fixer;
pub mod policy;
pub mod rules;

pub use classify::{classify, Category, STATIC_MARKER};
pub use facts::{
    collect_symbols, Accessibility, DeclaredType, JsonFactsSource, Location, SymbolFacts,
    SymbolKind, SymbolSource,
};
pub use findings::{build_diagnostic, Diagnostic, ProposedFix, Severity, RULE_ID};
pub use fixer::repair;
pub use policy::{MethodPrefixAllowList, NamingPolicy, PrefixPolicy, ResolvedPrefix};
pub use rules::{check, evaluate, Violation, ViolationRule};

use crate::Result;

/// Helper for `skip_serializing_if` on zero-value usize fields.
fn is_zero(v: &usize) -> bool {
    *v == 0
}

/// Summary counts for a naming report.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingSummary {
    pub symbols_scanned: usize,
    /// Property accessors and other categories that are never evaluated.
    #[serde(skip_serializing_if = "is_zero")]
    pub symbols_skipped: usize,
    pub violations: usize,
    pub fixable: usize,
    /// Violations the fixer declined to rename.
    #[serde(skip_serializing_if = "is_zero")]
    pub declined: usize,
}

/// Complete result of checking a batch of symbols.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct NamingReport {
    pub summary: NamingSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl NamingReport {
    pub fn has_violations(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Every proposed rename, in report order.
    pub fn fixes(&self) -> Vec<ProposedFix> {
        self.diagnostics
            .iter()
            .filter_map(|d| d.fix.clone())
            .collect()
    }
}

/// What the engine decided about a single symbol.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolVerdict {
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

// ============================================================================
// Public API
// ============================================================================

/// Classify, evaluate and repair one symbol.
pub fn inspect(facts: &SymbolFacts, policy: &NamingPolicy) -> SymbolVerdict {
    let category = classify(facts);
    let violation = evaluate(facts, category, policy);
    let diagnostic = violation.as_ref().map(|v| build_diagnostic(facts, v));

    SymbolVerdict {
        category,
        violation,
        diagnostic,
    }
}

/// Drain a symbol source and report every violation.
///
/// A malformed record aborts the run; the source decides what counts as
/// malformed. Diagnostics keep source order.
pub fn analyze(source: &mut dyn SymbolSource, policy: &NamingPolicy) -> Result<NamingReport> {
    log_status!("check", "Reading symbol facts...");
    let symbols = collect_symbols(source)?;
    Ok(analyze_symbols(&symbols, policy))
}

/// Report every violation in an in-memory batch.
pub fn analyze_symbols(symbols: &[SymbolFacts], policy: &NamingPolicy) -> NamingReport {
    let mut summary = NamingSummary::default();
    let mut diagnostics = Vec::new();

    for facts in symbols {
        summary.symbols_scanned += 1;

        let verdict = inspect(facts, policy);
        if !verdict.category.is_checked() {
            summary.symbols_skipped += 1;
            continue;
        }

        let Some(diagnostic) = verdict.diagnostic else {
            continue;
        };

        summary.violations += 1;
        if diagnostic.fix.is_some() {
            summary.fixable += 1;
        } else {
            summary.declined += 1;
        }
        diagnostics.push(diagnostic);
    }

    log_status!(
        "check",
        "Complete: {} symbols, {} violations ({} fixable)",
        summary.symbols_scanned,
        summary.violations,
        summary.fixable
    );

    NamingReport {
        summary,
        diagnostics,
    }
}

// ============================================================================
// Tests
// ============================================================================
