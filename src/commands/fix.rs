use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use namecheck::config;
use namecheck::naming::{self, Diagnostic, NamingPolicy, NamingSummary};
use namecheck::refactor::{RenameDispatcher, TextRenamer};

use super::CmdResult;

#[derive(Args)]
pub struct FixArgs {
    /// Symbol-facts JSON file (or - for stdin)
    pub facts: String,

    /// Source root the facts' locations are relative to
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Apply renames to disk (default is dry-run)
    #[arg(long)]
    pub write: bool,
}

#[derive(Serialize)]
#[serde(tag = "command", rename = "fix")]
pub struct FixOutput {
    pub root: String,
    pub dry_run: bool,
    pub summary: NamingSummary,
    pub renames: Vec<RenameSummary>,
    pub edits: Vec<EditSummary>,
    pub total_references: usize,
    pub total_files: usize,
    /// Violations reported without a rename.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub declined: Vec<Diagnostic>,
    pub applied: bool,
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub from: String,
    pub to: String,
    pub file: String,
    pub line: u32,
}

#[derive(Serialize)]
pub struct EditSummary {
    pub file: String,
    pub replacements: usize,
}

pub fn run(args: FixArgs, _global: &super::GlobalArgs) -> CmdResult<FixOutput> {
    if !args.root.is_dir() {
        return Err(namecheck::Error::validation_invalid_argument(
            "root",
            format!("Not a directory: {}", args.root.display()),
            None,
            None,
        ));
    }

    let mut source = super::open_facts(&args.facts)?;
    let report = naming::analyze(&mut source, NamingPolicy::standard())?;
    let fixes = report.fixes();

    let project_config = config::load(&args.root)?;
    let renamer = TextRenamer::new(&args.root, project_config).apply(args.write);
    let result = renamer.rename_all(&fixes)?;

    let declined: Vec<Diagnostic> = report
        .diagnostics
        .into_iter()
        .filter(|d| d.fix.is_none())
        .collect();

    // Anything left unfixed on disk keeps the exit code non-zero.
    let exit_code = if declined.is_empty() && (result.applied || fixes.is_empty()) {
        0
    } else {
        1
    };

    Ok((
        FixOutput {
            root: args.root.display().to_string(),
            dry_run: !args.write,
            summary: report.summary,
            renames: result
                .fixes
                .iter()
                .map(|f| RenameSummary {
                    from: f.old_name.clone(),
                    to: f.new_name.clone(),
                    file: f.location.file.clone(),
                    line: f.location.line,
                })
                .collect(),
            edits: result
                .edits
                .iter()
                .map(|e| EditSummary {
                    file: e.file.clone(),
                    replacements: e.replacements,
                })
                .collect(),
            total_references: result.total_references,
            total_files: result.total_files,
            declined,
            applied: result.applied,
        },
        exit_code,
    ))
}
