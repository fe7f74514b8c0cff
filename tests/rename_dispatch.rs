use std::fs;
use std::path::Path;

use namecheck::config::{self, CONFIG_FILE};
use namecheck::naming::{analyze, JsonFactsSource, NamingPolicy};
use namecheck::refactor::{RenameDispatcher, TextRenamer};

const MENU_CS: &str = "\
using UnityEngine.UI;

public class Menu : MonoBehaviour
{
    private Button _my_button;

    void Start()
    {
        int temp_count = 0;
        _my_button.onClick.AddListener(BtnClick_submit);
        temp_count++;
    }

    void BtnClick_submit() { }
}
";

const HUD_CS: &str = "\
public class Hud
{
    public Menu menu;

    void Refresh() { menu.BtnClick_submit(); }
}
";

const FACTS: &str = r#"[
    {"kind": "field", "name": "_my_button", "declaredType": {"name": "Button", "isClass": true},
     "accessibility": "non_public", "location": {"file": "Assets/Menu.cs", "line": 5, "column": 20}},
    {"kind": "local_variable", "name": "temp_count",
     "location": {"file": "Assets/Menu.cs", "line": 9, "column": 13}},
    {"kind": "method", "name": "BtnClick_submit",
     "location": {"file": "Assets/Menu.cs", "line": 14, "column": 10}},
    {"kind": "method", "name": "Start", "location": {"file": "Assets/Menu.cs", "line": 7, "column": 10}},
    {"kind": "method", "name": "OnClick", "location": {"file": "Assets/Menu.cs", "line": 3, "column": 1}}
]"#;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Assets")).unwrap();
    fs::write(dir.path().join("Assets/Menu.cs"), MENU_CS).unwrap();
    fs::write(dir.path().join("Assets/Hud.cs"), HUD_CS).unwrap();
    dir
}

fn renamer(root: &Path, write: bool) -> TextRenamer {
    TextRenamer::new(root, config::load(root).unwrap()).apply(write)
}

fn fixes_from(facts: &str) -> Vec<namecheck::naming::ProposedFix> {
    let mut source = JsonFactsSource::from_str(facts).unwrap();
    analyze(&mut source, NamingPolicy::standard()).unwrap().fixes()
}

#[test]
fn declined_fix_is_not_dispatched() {
    let mut source = JsonFactsSource::from_str(FACTS).unwrap();
    let report = analyze(&mut source, NamingPolicy::standard()).unwrap();

    assert_eq!(report.summary.symbols_scanned, 5);
    assert_eq!(report.summary.violations, 4);
    assert_eq!(report.summary.fixable, 3);
    assert_eq!(report.summary.declined, 1);
    assert!(report.fixes().iter().all(|f| f.old_name != "OnClick"));
}

#[test]
fn apply_all_renames_every_reference() {
    let dir = project();
    let fixes = fixes_from(FACTS);

    let result = renamer(dir.path(), true).rename_all(&fixes).unwrap();

    assert!(result.applied);
    assert_eq!(result.total_files, 2);
    assert_eq!(result.total_references, 7);

    let menu = fs::read_to_string(dir.path().join("Assets/Menu.cs")).unwrap();
    assert!(menu.contains("private Button _btnMyButton;"));
    assert!(menu.contains("int tempcount = 0;"));
    assert!(menu.contains("AddListener(BtnClick_Submit)"));
    assert!(!menu.contains("_my_button"));

    let hud = fs::read_to_string(dir.path().join("Assets/Hud.cs")).unwrap();
    assert!(hud.contains("menu.BtnClick_Submit();"));
}

#[test]
fn renamed_project_checks_clean_with_renamed_facts() {
    let dir = project();
    let fixes = fixes_from(FACTS);
    renamer(dir.path(), true).rename_all(&fixes).unwrap();

    let mut renamed = FACTS.to_string();
    for fix in &fixes {
        renamed = renamed.replace(&format!("\"{}\"", fix.old_name), &format!("\"{}\"", fix.new_name));
    }

    let mut source = JsonFactsSource::from_str(&renamed).unwrap();
    let report = analyze(&mut source, NamingPolicy::standard()).unwrap();
    assert_eq!(report.summary.violations, 1);
    assert_eq!(report.diagnostics[0].symbol, "OnClick");
}

#[test]
fn dry_run_leaves_files_untouched() {
    let dir = project();
    let fixes = fixes_from(FACTS);

    let result = renamer(dir.path(), false).rename_all(&fixes).unwrap();

    assert!(!result.applied);
    assert_eq!(result.total_files, 2);
    assert!(result.edits[0].new_content.contains("BtnClick_Submit"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Assets/Menu.cs")).unwrap(),
        MENU_CS
    );
}

#[test]
fn stale_location_fails_whole_batch() {
    let dir = project();
    let stale = FACTS.replace("\"line\": 9", "\"line\": 10");
    let fixes = fixes_from(&stale);

    let err = renamer(dir.path(), true).rename_all(&fixes).unwrap_err();

    assert_eq!(err.code.as_str(), "rename.unresolved_reference");
    assert_eq!(err.details["oldName"], "temp_count");
    assert_eq!(
        fs::read_to_string(dir.path().join("Assets/Menu.cs")).unwrap(),
        MENU_CS
    );
}

#[test]
fn existing_target_fails_whole_batch() {
    let dir = project();
    fs::write(
        dir.path().join("Assets/Hud.cs"),
        HUD_CS.replace(
            "public Menu menu;",
            "public Menu menu;\n    int tempcount; // was temp_count",
        ),
    )
    .unwrap();

    let err = renamer(dir.path(), true)
        .rename_all(&fixes_from(FACTS))
        .unwrap_err();

    assert_eq!(err.code.as_str(), "rename.conflict");
    assert_eq!(err.details["file"], "Assets/Hud.cs");
    assert_eq!(
        fs::read_to_string(dir.path().join("Assets/Menu.cs")).unwrap(),
        MENU_CS
    );
}

#[test]
fn project_config_limits_the_walk() {
    let dir = project();
    fs::write(
        dir.path().join(CONFIG_FILE),
        r#"{"sourceExtensions": ["cs"], "skipDirs": ["Generated"]}"#,
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("Generated")).unwrap();
    fs::write(dir.path().join("Generated/Menu.g.cs"), "// _my_button\n").unwrap();

    let result = renamer(dir.path(), false)
        .rename_all(&fixes_from(FACTS))
        .unwrap();

    assert!(result.edits.iter().all(|e| !e.file.starts_with("Generated")));
}
