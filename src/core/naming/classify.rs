//! Map symbol facts to the rule category that governs them.

use serde::Serialize;

use super::facts::{SymbolFacts, SymbolKind};

/// Marker for class/file-static names. Only the text after it is checked.
pub const STATIC_MARKER: &str = "s_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Compiler-generated get/set method. Never checked.
    PropertyAccessor,
    AllowListableMethod,
    TypedField,
    StaticMarkedSymbol,
    GenericSymbol,
    ScopedLocal,
    LoopVariable,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PropertyAccessor => "property_accessor",
            Category::AllowListableMethod => "allow_listable_method",
            Category::TypedField => "typed_field",
            Category::StaticMarkedSymbol => "static_marked_symbol",
            Category::GenericSymbol => "generic_symbol",
            Category::ScopedLocal => "scoped_local",
            Category::LoopVariable => "loop_variable",
        }
    }

    /// Whether symbols in this category are evaluated at all.
    pub fn is_checked(&self) -> bool {
        !matches!(self, Category::PropertyAccessor)
    }
}

/// Classify a symbol. Order matters:
///
/// 1. Property accessors short-circuit.
/// 2. Locals and loop variables are categorized by construct, before the
///    static marker, because loop variables get no `s_` exemption and locals
///    apply it themselves.
/// 3. Any other symbol starting with `s_` follows the static convention.
/// 4. Methods and fields get their own categories; everything else is generic.
pub fn classify(facts: &SymbolFacts) -> Category {
    if facts.is_property_accessor {
        return Category::PropertyAccessor;
    }

    match facts.kind {
        SymbolKind::LocalVariable => Category::ScopedLocal,
        SymbolKind::LoopVariable => Category::LoopVariable,
        _ if facts.name.starts_with(STATIC_MARKER) => Category::StaticMarkedSymbol,
        SymbolKind::Method => Category::AllowListableMethod,
        SymbolKind::Field => Category::TypedField,
        SymbolKind::TypeDecl | SymbolKind::Property | SymbolKind::Parameter => {
            Category::GenericSymbol
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::facts::Accessibility;

    #[test]
    fn property_accessor_short_circuits() {
        let facts = SymbolFacts::new(SymbolKind::Method, "get_Value").property_accessor();
        assert_eq!(classify(&facts), Category::PropertyAccessor);
        assert!(!classify(&facts).is_checked());
    }

    #[test]
    fn static_marker_applies_to_fields_and_methods() {
        let field = SymbolFacts::field("s_my_value", "Button", Accessibility::NonPublic);
        assert_eq!(classify(&field), Category::StaticMarkedSymbol);

        let method = SymbolFacts::new(SymbolKind::Method, "s_init");
        assert_eq!(classify(&method), Category::StaticMarkedSymbol);
    }

    #[test]
    fn locals_and_loop_variables_keep_their_category() {
        let local = SymbolFacts::new(SymbolKind::LocalVariable, "s_cache");
        assert_eq!(classify(&local), Category::ScopedLocal);

        let looped = SymbolFacts::new(SymbolKind::LoopVariable, "s_item");
        assert_eq!(classify(&looped), Category::LoopVariable);
    }

    #[test]
    fn methods_fields_and_the_rest() {
        assert_eq!(
            classify(&SymbolFacts::new(SymbolKind::Method, "OnClick_Start")),
            Category::AllowListableMethod
        );
        assert_eq!(
            classify(&SymbolFacts::new(SymbolKind::Field, "_count")),
            Category::TypedField
        );
        for kind in [SymbolKind::TypeDecl, SymbolKind::Property, SymbolKind::Parameter] {
            assert_eq!(
                classify(&SymbolFacts::new(kind, "some_name")),
                Category::GenericSymbol
            );
        }
    }
}
