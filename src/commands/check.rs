use clap::Args;
use serde::Serialize;

use namecheck::naming::{self, NamingPolicy, NamingReport};

use super::CmdResult;

#[derive(Args)]
pub struct CheckArgs {
    /// Symbol-facts JSON file (or - for stdin)
    pub facts: String,

    /// Only print the summary counts
    #[arg(long)]
    pub summary: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum CheckOutput {
    #[serde(rename = "check")]
    Full(NamingReport),

    #[serde(rename = "check.summary")]
    Summary(naming::NamingSummary),
}

pub fn run(args: CheckArgs, _global: &super::GlobalArgs) -> CmdResult<CheckOutput> {
    let mut source = super::open_facts(&args.facts)?;
    let report = naming::analyze(&mut source, NamingPolicy::standard())?;

    let exit_code = if report.has_violations() { 1 } else { 0 };

    if args.summary {
        return Ok((CheckOutput::Summary(report.summary), exit_code));
    }

    Ok((CheckOutput::Full(report), exit_code))
}
