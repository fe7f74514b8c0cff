use clap::Args;
use serde::Serialize;

use namecheck::naming::{self, Accessibility, NamingPolicy, SymbolFacts, SymbolKind, SymbolVerdict};
use namecheck::validation;

use super::CmdResult;

#[derive(Args)]
pub struct ExplainArgs {
    /// Symbol kind: type_decl, method, field, property, parameter, local_variable, loop_variable
    pub kind: String,

    /// Identifier to explain
    pub name: String,

    /// Declared type name (fields only)
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: Option<String>,

    /// The declared type is a class type (requires --type)
    #[arg(long)]
    pub class: bool,

    /// The symbol is public
    #[arg(long)]
    pub public: bool,

    /// The method is a compiler-generated property accessor
    #[arg(long)]
    pub accessor: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "command", rename = "explain")]
pub struct ExplainOutput {
    pub facts: SymbolFacts,
    #[serde(flatten)]
    pub verdict: SymbolVerdict,
}

pub fn run_json(args: ExplainArgs) -> CmdResult<ExplainOutput> {
    let kind = SymbolKind::from_str(&args.kind)?;
    let name = validation::require_identifier(&args.name, "name")?;

    let mut facts = SymbolFacts::new(kind, name);
    if args.class {
        let type_name = validation::require(
            args.type_name.as_deref(),
            "type",
            "--class describes the declared type; pass it with --type",
        )?;
        facts = facts.with_type(type_name, true);
    } else if let Some(type_name) = args.type_name.as_deref() {
        facts = facts.with_type(type_name, false);
    }
    if args.public {
        facts = facts.with_accessibility(Accessibility::Public);
    }
    if args.accessor {
        facts = facts.property_accessor();
    }

    let verdict = naming::inspect(&facts, NamingPolicy::standard());
    let exit_code = if verdict.violation.is_some() { 1 } else { 0 };

    Ok((ExplainOutput { facts, verdict }, exit_code))
}
