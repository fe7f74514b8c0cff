//! Text rename dispatcher: apply a batch of identifier renames across a
//! source tree.
//!
//! For hosts without a semantic rename engine. Given the proposed fixes,
//! this dispatcher:
//! 1. Walks the source tree using the project config (extensions, skip dirs)
//! 2. Anchors every fix at its declaration site
//! 3. Finds identifier-boundary references and builds per-file edits
//! 4. Refuses the whole batch on any unresolved declaration or name conflict
//! 5. Stages every edit in a temp file, then moves them all into place
//!    (or returns a dry-run preview)

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::config::NamecheckConfig;
use crate::error::{Error, Result};
use crate::naming::{Location, ProposedFix};
use crate::utils::io;

// ============================================================================
// Types
// ============================================================================

/// Host capability that carries out a batch of renames.
///
/// Either every fix is applied or none is. Implementations backed by a
/// semantic model should fail with `rename.unresolved_reference` when a
/// symbol cannot be bound, rather than renaming text.
pub trait RenameDispatcher {
    fn rename_all(&self, fixes: &[ProposedFix]) -> Result<RenameResult>;
}

/// A single reference found in the source tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// File path relative to root.
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    pub old_name: String,
    pub new_name: String,
    /// The full line content for context.
    pub context: String,
}

/// An edit to apply to a file's content.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Number of replacements in this file.
    pub replacements: usize,
    /// New content after all replacements.
    #[serde(skip)]
    pub new_content: String,
    /// Content the plan was computed from, restored if a later write fails.
    #[serde(skip)]
    pub original_content: String,
}

/// The full result of a rename batch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameResult {
    /// The fixes that were planned, duplicates removed.
    pub fixes: Vec<ProposedFix>,
    pub references: Vec<Reference>,
    pub edits: Vec<FileEdit>,
    pub total_references: usize,
    pub total_files: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// A fix with every declaration site that proposed it.
#[derive(Debug)]
struct UniqueFix {
    fix: ProposedFix,
    sites: Vec<Location>,
}

/// One fix with its compiled matchers.
struct PlannedFix<'a> {
    fix: &'a ProposedFix,
    sites: &'a [Location],
    old_pattern: Regex,
    new_pattern: Regex,
}

// ============================================================================
// Text renamer
// ============================================================================

/// Reference dispatcher that renames identifiers textually.
pub struct TextRenamer {
    root: PathBuf,
    config: NamecheckConfig,
    apply: bool,
}

impl TextRenamer {
    /// Dry-run renamer over `root`.
    pub fn new(root: &Path, config: NamecheckConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            apply: false,
        }
    }

    /// Write edits to disk instead of only previewing them.
    pub fn apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    /// Compute every edit without touching the disk.
    pub fn plan(&self, fixes: &[ProposedFix]) -> Result<RenameResult> {
        let fixes = dedupe_fixes(fixes)?;
        if fixes.is_empty() {
            return Ok(RenameResult::default());
        }

        let planned = fixes
            .iter()
            .map(|UniqueFix { fix, sites }| {
                Ok(PlannedFix {
                    fix,
                    sites,
                    old_pattern: identifier_pattern(&fix.old_name)?,
                    new_pattern: identifier_pattern(&fix.new_name)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let sources = self.read_sources()?;

        for plan in &planned {
            for site in plan.sites {
                verify_declaration(plan, site, &sources)?;
            }
        }

        let mut references = Vec::new();
        let mut edits = Vec::new();

        for (file, content) in &sources {
            let mut matches: Vec<(usize, usize, &str)> = Vec::new();

            for plan in &planned {
                let found: Vec<_> = plan.old_pattern.find_iter(content).collect();
                if found.is_empty() {
                    continue;
                }

                if plan.new_pattern.is_match(content) {
                    return Err(Error::rename_conflict(
                        &plan.fix.old_name,
                        &plan.fix.new_name,
                        Some(file.clone()),
                        format!("'{}' is already declared or used in this file", plan.fix.new_name),
                    ));
                }

                for m in found {
                    references.push(reference_at(file, content, m.start(), plan.fix));
                    matches.push((m.start(), m.end(), plan.fix.new_name.as_str()));
                }
            }

            if matches.is_empty() {
                continue;
            }

            // Replace from the end so earlier offsets stay valid.
            matches.sort_by(|a, b| b.0.cmp(&a.0));
            let mut new_content = content.clone();
            for (start, end, replacement) in &matches {
                new_content.replace_range(*start..*end, replacement);
            }

            edits.push(FileEdit {
                file: file.clone(),
                replacements: matches.len(),
                new_content,
                original_content: content.clone(),
            });
        }

        references.sort_by(|a, b| (&a.file, a.line, a.column).cmp(&(&b.file, b.line, b.column)));

        Ok(RenameResult {
            total_references: references.len(),
            total_files: edits.len(),
            fixes: fixes.iter().map(|unique| unique.fix.clone()).collect(),
            references,
            edits,
            applied: false,
        })
    }

    /// Read every source file under the root, keyed by normalized relative path.
    fn read_sources(&self) -> Result<BTreeMap<String, String>> {
        let mut files = Vec::new();
        walk_recursive(&self.root, &self.config, &mut files)?;

        let mut sources = BTreeMap::new();
        for path in files {
            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_string_lossy()
                .to_string();
            let content = io::read_file(&path, &format!("read {}", path.display()))?;
            sources.insert(normalize_path(&relative), content);
        }

        Ok(sources)
    }

    /// Stage every edit first, then move the staged files into place.
    ///
    /// A failed stage removes the temp files written so far. A failed move
    /// restores the files already replaced. Either way the tree keeps its
    /// original content.
    fn write_edits(&self, edits: &[FileEdit]) -> Result<()> {
        let mut staged: Vec<(PathBuf, PathBuf, &FileEdit)> = Vec::with_capacity(edits.len());

        for edit in edits {
            let path = self.root.join(&edit.file);
            let operation = format!("write {}", path.display());
            match io::stage_file(&path, &edit.new_content, &operation) {
                Ok(tmp_path) => staged.push((tmp_path, path, edit)),
                Err(err) => {
                    discard_staged(&staged);
                    return Err(err);
                }
            }
        }

        for (index, (tmp_path, path, _)) in staged.iter().enumerate() {
            let operation = format!("write {}", path.display());
            if let Err(err) = io::commit_staged(tmp_path, path, &operation) {
                discard_staged(&staged[index + 1..]);
                restore_committed(&staged[..index]);
                return Err(err);
            }
        }

        Ok(())
    }
}

fn discard_staged(staged: &[(PathBuf, PathBuf, &FileEdit)]) {
    for (tmp_path, _, _) in staged {
        let _ = std::fs::remove_file(tmp_path);
    }
}

fn restore_committed(committed: &[(PathBuf, PathBuf, &FileEdit)]) {
    for (_, path, edit) in committed {
        let operation = format!("restore {}", path.display());
        if let Err(err) = io::write_file_atomic(path, &edit.original_content, &operation) {
            log_status!("fix", "Could not restore {}: {}", path.display(), err);
        }
    }
}

impl RenameDispatcher for TextRenamer {
    fn rename_all(&self, fixes: &[ProposedFix]) -> Result<RenameResult> {
        log_status!(
            "fix",
            "Planning {} rename(s) under {}",
            fixes.len(),
            self.root.display()
        );

        let mut result = self.plan(fixes)?;

        if self.apply {
            self.write_edits(&result.edits)?;
            result.applied = true;
            log_status!(
                "fix",
                "Renamed {} reference(s) in {} file(s)",
                result.total_references,
                result.total_files
            );
        } else {
            log_status!(
                "fix",
                "Dry run: {} reference(s) in {} file(s) would change",
                result.total_references,
                result.total_files
            );
        }

        Ok(result)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Merge exact duplicates and reject batches that disagree about a name.
///
/// A merged fix keeps the declaration site of every duplicate so each one is
/// still verified.
fn dedupe_fixes(fixes: &[ProposedFix]) -> Result<Vec<UniqueFix>> {
    let mut by_old: HashMap<&str, usize> = HashMap::new();
    let mut by_new: HashMap<&str, &str> = HashMap::new();
    let mut unique: Vec<UniqueFix> = Vec::new();

    for fix in fixes {
        if fix.old_name == fix.new_name {
            continue;
        }

        if let Some(&index) = by_old.get(fix.old_name.as_str()) {
            let existing = &mut unique[index];
            if existing.fix.new_name != fix.new_name {
                return Err(Error::rename_conflict(
                    &fix.old_name,
                    &fix.new_name,
                    None,
                    format!("also proposed to become '{}'", existing.fix.new_name),
                ));
            }
            if !existing.sites.contains(&fix.location) {
                existing.sites.push(fix.location.clone());
            }
            continue;
        }

        if let Some(existing_old) = by_new.get(fix.new_name.as_str()) {
            return Err(Error::rename_conflict(
                &fix.old_name,
                &fix.new_name,
                None,
                format!("'{}' is also the target for '{}'", fix.new_name, existing_old),
            ));
        }

        by_old.insert(&fix.old_name, unique.len());
        by_new.insert(&fix.new_name, &fix.old_name);
        unique.push(UniqueFix {
            fix: fix.clone(),
            sites: vec![fix.location.clone()],
        });
    }

    Ok(unique)
}

/// The declaration line must still contain the old name as an identifier.
/// A location with line 0 only anchors the file.
fn verify_declaration(
    plan: &PlannedFix,
    location: &Location,
    sources: &BTreeMap<String, String>,
) -> Result<()> {
    let fix = plan.fix;
    let unresolved = || {
        Error::rename_unresolved_reference(
            &fix.old_name,
            &fix.new_name,
            &location.file,
            location.line,
        )
    };

    let content = sources
        .get(&normalize_path(&location.file))
        .ok_or_else(unresolved)?;

    let found = if location.line == 0 {
        plan.old_pattern.is_match(content)
    } else {
        content
            .lines()
            .nth(location.line as usize - 1)
            .is_some_and(|line| plan.old_pattern.is_match(line))
    };

    if found {
        Ok(())
    } else {
        Err(unresolved())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn identifier_pattern(name: &str) -> Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(name)))
        .map_err(|e| Error::internal_unexpected(format!("identifier pattern for '{}': {}", name, e)))
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.strip_prefix("./").unwrap_or(&path).to_string()
}

fn reference_at(file: &str, content: &str, offset: usize, fix: &ProposedFix) -> Reference {
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[offset..]
        .find('\n')
        .map_or(content.len(), |i| offset + i);

    Reference {
        file: file.to_string(),
        line: content[..offset].matches('\n').count() + 1,
        column: offset - line_start + 1,
        old_name: fix.old_name.clone(),
        new_name: fix.new_name.clone(),
        context: content[line_start..line_end].trim_end_matches('\r').to_string(),
    }
}

/// Collect source files in sorted order. An unreadable directory fails the
/// walk, since references inside it could not be renamed.
fn walk_recursive(dir: &Path, config: &NamecheckConfig, files: &mut Vec<PathBuf>) -> Result<()> {
    let operation = || Some(format!("read directory {}", dir.display()));

    let entries =
        std::fs::read_dir(dir).map_err(|e| Error::internal_io(e.to_string(), operation()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::internal_io(e.to_string(), operation()))?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if config.is_skipped_dir(&name) {
                continue;
            }
            walk_recursive(&path, config, files)?;
        } else if config.is_source_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
