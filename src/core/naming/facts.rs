//! Symbol facts supplied by the host front end.
//!
//! The engine never looks at syntax. A host (compiler plugin, language server,
//! or an offline dump) resolves each declared identifier into a `SymbolFacts`
//! record and hands it over through a [`SymbolSource`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What kind of declaration the identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    TypeDecl,
    Method,
    Field,
    Property,
    Parameter,
    /// Declarator nested directly under a local-declaration statement.
    LocalVariable,
    /// Foreach iteration variable.
    LoopVariable,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::TypeDecl => "type_decl",
            SymbolKind::Method => "method",
            SymbolKind::Field => "field",
            SymbolKind::Property => "property",
            SymbolKind::Parameter => "parameter",
            SymbolKind::LocalVariable => "local_variable",
            SymbolKind::LoopVariable => "loop_variable",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "type_decl" | "type" => Ok(SymbolKind::TypeDecl),
            "method" => Ok(SymbolKind::Method),
            "field" => Ok(SymbolKind::Field),
            "property" => Ok(SymbolKind::Property),
            "parameter" => Ok(SymbolKind::Parameter),
            "local_variable" | "local" => Ok(SymbolKind::LocalVariable),
            "loop_variable" | "loop" => Ok(SymbolKind::LoopVariable),
            _ => Err(Error::validation_invalid_argument(
                "kind",
                format!("Unknown symbol kind '{}'", s),
                None,
                Some(
                    [
                        "type_decl",
                        "method",
                        "field",
                        "property",
                        "parameter",
                        "local_variable",
                        "loop_variable",
                    ]
                    .iter()
                    .map(|k| k.to_string())
                    .collect(),
                ),
            )),
        }
    }
}

/// Declared accessibility, collapsed to the two families the policy cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    #[default]
    NonPublic,
}

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredType {
    /// Simple type name, e.g. `Button` or `RawImage`.
    pub name: String,
    /// True for class (reference) types; false for primitives and value types.
    #[serde(default)]
    pub is_class: bool,
}

/// Declaration site of a symbol. Opaque to the engine; carried through to
/// diagnostics and used by the rename dispatcher to anchor the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the project root.
    pub file: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: &str, line: u32, column: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
        }
    }
}

/// Everything the engine knows about one declared identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFacts {
    pub kind: SymbolKind,
    pub name: String,
    /// Fields only. A field record without it gets no rule applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<DeclaredType>,
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Compiler-generated get/set method of a property.
    #[serde(default)]
    pub is_property_accessor: bool,
    #[serde(default)]
    pub location: Location,
}

impl SymbolFacts {
    pub fn new(kind: SymbolKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            declared_type: None,
            accessibility: Accessibility::NonPublic,
            is_property_accessor: false,
            location: Location::default(),
        }
    }

    pub fn field(name: &str, type_name: &str, accessibility: Accessibility) -> Self {
        Self::new(SymbolKind::Field, name)
            .with_type(type_name, true)
            .with_accessibility(accessibility)
    }

    pub fn with_type(mut self, type_name: &str, is_class: bool) -> Self {
        self.declared_type = Some(DeclaredType {
            name: type_name.to_string(),
            is_class,
        });
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn property_accessor(mut self) -> Self {
        self.is_property_accessor = true;
        self
    }

    pub fn at(mut self, file: &str, line: u32, column: u32) -> Self {
        self.location = Location::new(file, line, column);
        self
    }

    /// Same facts under a different identifier. Used to re-check a repaired name.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }
}

/// Pull-based supplier of symbol facts.
pub trait SymbolSource {
    fn next_symbol(&mut self) -> Result<Option<SymbolFacts>>;
}

impl<I> SymbolSource for I
where
    I: Iterator<Item = SymbolFacts>,
{
    fn next_symbol(&mut self) -> Result<Option<SymbolFacts>> {
        Ok(self.next())
    }
}

/// Adapter over a JSON array of fact records, as dumped by a host front end.
///
/// Records are decoded lazily so a bad record is reported by index without
/// discarding the ones before it.
pub struct JsonFactsSource {
    records: std::vec::IntoIter<serde_json::Value>,
    index: usize,
}

impl JsonFactsSource {
    pub fn from_str(content: &str) -> Result<Self> {
        let records: Vec<serde_json::Value> = serde_json::from_str(content).map_err(|e| {
            Error::validation_invalid_json(e, Some("parse symbol facts".to_string()))
        })?;

        Ok(Self {
            records: records.into_iter(),
            index: 0,
        })
    }

    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let content = crate::utils::io::read_file(path, &format!("read {}", path.display()))?;
        Self::from_str(&content)
    }
}

impl SymbolSource for JsonFactsSource {
    fn next_symbol(&mut self) -> Result<Option<SymbolFacts>> {
        let Some(record) = self.records.next() else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;

        serde_json::from_value(record)
            .map(Some)
            .map_err(|e| Error::facts_invalid_record(index, e.to_string()))
    }
}

/// Drain a source into memory.
pub fn collect_symbols(source: &mut dyn SymbolSource) -> Result<Vec<SymbolFacts>> {
    let mut symbols = Vec::new();
    while let Some(facts) = source.next_symbol()? {
        symbols.push(facts);
    }
    Ok(symbols)
}
