//! Compiled-in naming policy: type-derived field prefixes and allow-listed
//! method prefixes.
//!
//! Both tables are ordered slices. Lookup order is part of the contract, so
//! nothing here is stored in a hash map.

use std::sync::OnceLock;

use serde::Serialize;

use super::casing::{capitalize, contains_ignore_case, decapitalize};
use super::facts::Accessibility;

/// Field prefixes for public fields: title-case stem plus `_`.
const PUBLIC_FIELD_PREFIXES: &[(&str, &str)] = &[
    ("Button", "Btn_"),
    ("Image", "Img_"),
    ("RawImage", "RawImg_"),
    ("Text", "Txt_"),
    ("TextMeshProUGUI", "Tmp_"),
    ("TMP_Text", "Tmp_"),
    ("Toggle", "Tgl_"),
    ("Slider", "Sld_"),
    ("Scrollbar", "Sb_"),
    ("ScrollRect", "Scr_"),
    ("Dropdown", "Dd_"),
    ("InputField", "Inp_"),
    ("Canvas", "Cvs_"),
    ("CanvasGroup", "Cg_"),
    ("RectTransform", "Rt_"),
    ("Transform", "Tf_"),
    ("GameObject", "Go_"),
    ("Animator", "Anim_"),
    ("AudioSource", "Audio_"),
    ("Camera", "Cam_"),
];

/// Field prefixes for non-public fields: lower-camel stem, written after `_`.
const PRIVATE_FIELD_PREFIXES: &[(&str, &str)] = &[
    ("Button", "btn"),
    ("Image", "img"),
    ("RawImage", "rawImg"),
    ("Text", "txt"),
    ("TextMeshProUGUI", "tmp"),
    ("Toggle", "tgl"),
    ("Slider", "sld"),
    ("ScrollRect", "scr"),
    ("Dropdown", "dd"),
    ("InputField", "inp"),
    ("CanvasGroup", "cg"),
    ("RectTransform", "rt"),
    ("Transform", "tf"),
    ("GameObject", "go"),
    ("Animator", "anim"),
    ("Rigidbody", "rb"),
    ("Collider", "col"),
    ("SpriteRenderer", "sr"),
];

/// Event and RPC handler prefixes. No entry may be a prefix of another.
const METHOD_PREFIXES: &[&str] = &[
    "OnClick_",
    "BtnClick_",
    "OnValueChanged_",
    "OnToggle_",
    "RPC_",
];

/// Which table a prefix came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixTable {
    Public,
    Private,
}

/// How the key matched the declared type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
    Exact,
    Substring,
}

/// A field prefix resolved for one declared type.
///
/// Stores the bare stem (`Btn`, `rawImg`) so either accessibility form can be
/// produced no matter which table supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrefix {
    pub key: &'static str,
    pub table: PrefixTable,
    pub matched: PrefixMatch,
    stem: String,
}

impl ResolvedPrefix {
    fn new(key: &'static str, prefix: &str, table: PrefixTable, matched: PrefixMatch) -> Self {
        Self {
            key,
            table,
            matched,
            stem: prefix.trim_end_matches('_').to_string(),
        }
    }

    /// `Btn_`
    pub fn public_form(&self) -> String {
        format!("{}_", capitalize(&self.stem))
    }

    /// `btn`
    pub fn private_form(&self) -> String {
        decapitalize(&self.stem)
    }

    /// The stem with no separator, used for case-insensitive stripping.
    pub fn bare(&self) -> &str {
        &self.stem
    }

    /// The leading text a compliant field name must start with.
    pub fn expected_for(&self, accessibility: Accessibility) -> String {
        match accessibility {
            Accessibility::Public => self.public_form(),
            Accessibility::NonPublic => format!("_{}", self.private_form()),
        }
    }
}

/// Type-name → prefix tables for public and non-public fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixPolicy {
    public_prefixes: Vec<(&'static str, &'static str)>,
    private_prefixes: Vec<(&'static str, &'static str)>,
}

impl PrefixPolicy {
    pub fn new(
        public_prefixes: &[(&'static str, &'static str)],
        private_prefixes: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            public_prefixes: public_prefixes.to_vec(),
            private_prefixes: private_prefixes.to_vec(),
        }
    }

    pub fn public_prefixes(&self) -> &[(&'static str, &'static str)] {
        &self.public_prefixes
    }

    pub fn private_prefixes(&self) -> &[(&'static str, &'static str)] {
        &self.private_prefixes
    }

    /// Resolve the expected prefix for a field's declared type.
    ///
    /// Accessibility picks the primary table; the other is the fallback.
    /// Exact (case-insensitive) key matches are tried in both tables before
    /// any substring match. Substring matching scans primary then fallback,
    /// each in declaration order, and the first hit wins. A composite type
    /// name such as `MyRawImage` therefore resolves through `Image`, which is
    /// declared before `RawImage`.
    pub fn resolve(&self, type_name: &str, accessibility: Accessibility) -> Option<ResolvedPrefix> {
        let (primary, primary_table, fallback, fallback_table) = match accessibility {
            Accessibility::Public => (
                &self.public_prefixes,
                PrefixTable::Public,
                &self.private_prefixes,
                PrefixTable::Private,
            ),
            Accessibility::NonPublic => (
                &self.private_prefixes,
                PrefixTable::Private,
                &self.public_prefixes,
                PrefixTable::Public,
            ),
        };

        let ordered = primary
            .iter()
            .map(|entry| (entry, primary_table))
            .chain(fallback.iter().map(|entry| (entry, fallback_table)));

        let mut substring_hit = None;
        for (&(key, prefix), table) in ordered {
            if key.eq_ignore_ascii_case(type_name) {
                return Some(ResolvedPrefix::new(key, prefix, table, PrefixMatch::Exact));
            }
            if substring_hit.is_none() && contains_ignore_case(type_name, key) {
                substring_hit = Some(ResolvedPrefix::new(
                    key,
                    prefix,
                    table,
                    PrefixMatch::Substring,
                ));
            }
        }

        substring_hit
    }
}

/// Ordered, exact-cased method prefixes for event and RPC handlers.
#[derive(Debug, Clone, Serialize)]
pub struct MethodPrefixAllowList {
    prefixes: Vec<&'static str>,
}

impl MethodPrefixAllowList {
    pub fn new(prefixes: &[&'static str]) -> Self {
        Self {
            prefixes: prefixes.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.prefixes.iter().copied()
    }

    /// First prefix the name starts with, exactly cased.
    pub fn exact_match(&self, name: &str) -> Option<&'static str> {
        self.iter().find(|prefix| name.starts_with(prefix))
    }

    /// First prefix whose underscore-free form appears anywhere in the name,
    /// ignoring case. Underscores in the name are skipped too, so stripping
    /// them from a method name can never uncover a new match.
    pub fn fuzzy_match(&self, name: &str) -> Option<&'static str> {
        let compact = name.replace('_', "");
        self.iter()
            .find(|prefix| contains_ignore_case(&compact, prefix.trim_end_matches('_')))
    }
}

/// The full policy handed to the evaluator and fixer. Immutable once built.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingPolicy {
    pub prefixes: PrefixPolicy,
    pub method_prefixes: MethodPrefixAllowList,
}

impl NamingPolicy {
    pub fn new(prefixes: PrefixPolicy, method_prefixes: MethodPrefixAllowList) -> Self {
        Self {
            prefixes,
            method_prefixes,
        }
    }

    /// The compiled-in policy, built on first use and shared for the process.
    pub fn standard() -> &'static NamingPolicy {
        static POLICY: OnceLock<NamingPolicy> = OnceLock::new();

        POLICY.get_or_init(|| {
            NamingPolicy::new(
                PrefixPolicy::new(PUBLIC_FIELD_PREFIXES, PRIVATE_FIELD_PREFIXES),
                MethodPrefixAllowList::new(METHOD_PREFIXES),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> &'static NamingPolicy {
        NamingPolicy::standard()
    }

    #[test]
    fn exact_match_uses_primary_table() {
        let resolved = policy()
            .prefixes
            .resolve("Button", Accessibility::NonPublic)
            .unwrap();
        assert_eq!(resolved.table, PrefixTable::Private);
        assert_eq!(resolved.matched, PrefixMatch::Exact);
        assert_eq!(resolved.private_form(), "btn");
        assert_eq!(resolved.expected_for(Accessibility::NonPublic), "_btn");
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let resolved = policy()
            .prefixes
            .resolve("button", Accessibility::Public)
            .unwrap();
        assert_eq!(resolved.public_form(), "Btn_");
    }

    #[test]
    fn falls_back_to_other_table() {
        let resolved = policy()
            .prefixes
            .resolve("Rigidbody", Accessibility::Public)
            .unwrap();
        assert_eq!(resolved.table, PrefixTable::Private);
        assert_eq!(resolved.public_form(), "Rb_");

        let resolved = policy()
            .prefixes
            .resolve("Camera", Accessibility::NonPublic)
            .unwrap();
        assert_eq!(resolved.table, PrefixTable::Public);
        assert_eq!(resolved.private_form(), "cam");
    }

    #[test]
    fn exact_in_fallback_beats_substring_in_primary() {
        // The private table only has "Text", a substring of "TMP_Text";
        // the public table has the exact key.
        let resolved = policy()
            .prefixes
            .resolve("TMP_Text", Accessibility::NonPublic)
            .unwrap();
        assert_eq!(resolved.key, "TMP_Text");
        assert_eq!(resolved.matched, PrefixMatch::Exact);
        assert_eq!(resolved.table, PrefixTable::Public);
        assert_eq!(resolved.private_form(), "tmp");
    }

    #[test]
    fn substring_match_takes_first_declared_key() {
        let resolved = policy()
            .prefixes
            .resolve("MyRawImage", Accessibility::NonPublic)
            .unwrap();
        assert_eq!(resolved.key, "Image");
        assert_eq!(resolved.matched, PrefixMatch::Substring);
        assert_eq!(resolved.private_form(), "img");
    }

    #[test]
    fn exact_key_wins_over_earlier_substring() {
        let resolved = policy()
            .prefixes
            .resolve("RawImage", Accessibility::Public)
            .unwrap();
        assert_eq!(resolved.public_form(), "RawImg_");
        assert_eq!(resolved.private_form(), "rawImg");
    }

    #[test]
    fn unknown_type_resolves_nothing() {
        assert!(policy()
            .prefixes
            .resolve("Dictionary", Accessibility::Public)
            .is_none());
    }

    #[test]
    fn method_prefix_matching() {
        let allow = &policy().method_prefixes;
        assert_eq!(allow.exact_match("BtnClick_submit"), Some("BtnClick_"));
        assert_eq!(allow.exact_match("btnclick_submit"), None);
        assert_eq!(allow.fuzzy_match("btnclick_submit"), Some("BtnClick_"));
        assert_eq!(allow.fuzzy_match("HandleRpcCall"), Some("RPC_"));
        assert_eq!(allow.fuzzy_match("Update"), None);
    }

    #[test]
    fn no_method_prefix_shadows_another() {
        let prefixes: Vec<&str> = policy().method_prefixes.iter().collect();
        for a in &prefixes {
            for b in &prefixes {
                if a != b {
                    assert!(!b.starts_with(a), "{} shadows {}", a, b);
                }
            }
        }
    }
}
