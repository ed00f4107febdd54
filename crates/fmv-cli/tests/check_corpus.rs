//! Integration test: validate a small on-disk site through the check
//! subcommand's handlers.
//!
//! Builds a temporary corpus with a config file, clean and broken
//! documents, an excluded drafts directory, and an unparsable document.

use std::fs;
use std::path::Path;

use fmv_cli::check::{self, CheckArgs, Format};
use fmv_core::{DocumentId, RuntimeKind};
use fmv_engine::ViolationReport;
use fmv_schema::Violation;
use tempfile::TempDir;

const CONFIG: &str = r#"
root: site
exclude: ["drafts/**"]
schema:
  title:  { required: true, type: String }
  date:   { type: Date }
  layout: { type: String, allowed: [post, page] }
  tags:   { type: Array }
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "fmv.yaml", CONFIG);
    write(
        root,
        "site/index.md",
        "---\ntitle: Home\nlayout: page\n---\n# Welcome\n",
    );
    write(
        root,
        "site/posts/first.md",
        "---\ntitle: First\ndate: 2024-03-01\ntags: [rust]\nlayout: post\n---\nBody\n",
    );
    write(
        root,
        "site/posts/broken.md",
        "---\ndate: soon\nlayout: essay\nauthor: me\n---\nBody\n",
    );
    write(root, "site/no-frontmatter.md", "# Just text\n");
    write(root, "site/drafts/wip.md", "---\nnonsense: true\n---\n");
    write(root, "site/bad-yaml.md", "---\ntitle: [unclosed\n---\n");
    write(root, "site/notes.txt", "---\nignored: true\n---\n");
    dir
}

fn args(dir: &TempDir) -> CheckArgs {
    CheckArgs {
        config: Some(dir.path().join("fmv.yaml")),
        root: None,
        exclude: Vec::new(),
        strict: false,
        dump: None,
        format: Format::Human,
        no_color: true,
    }
}

fn violations(report: &ViolationReport, id: &str) -> Vec<Violation> {
    report
        .get(&DocumentId::from(id))
        .map(<[Violation]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_check_reports_per_document() {
    let dir = site();
    let config = args(&dir).resolve_config().unwrap();
    let outcome = check::validate(&config).unwrap();
    let report = &outcome.report;

    assert_eq!(report.document_count(), 2, "report: {report:?}");
    assert_eq!(
        violations(report, "/posts/broken.md"),
        vec![
            Violation::MissingKey {
                field: "title".into()
            },
            Violation::InvalidType {
                field: "date".into(),
                expected: "Date".into(),
                actual: RuntimeKind::String,
            },
            Violation::InvalidValue {
                field: "layout".into(),
                allowed: vec!["post".into(), "page".into()],
                actual: "essay".into(),
            },
            Violation::InvalidKey {
                field: "author".into()
            },
        ]
    );
    assert_eq!(
        violations(report, "/no-frontmatter.md"),
        vec![Violation::MissingKey {
            field: "title".into()
        }]
    );

    // Excluded and unparsable documents leave no trace.
    assert!(report.get(&DocumentId::from("/drafts/wip.md")).is_none());
    assert!(report.get(&DocumentId::from("/bad-yaml.md")).is_none());
    assert_eq!(outcome.context.excluded, 1);
    assert_eq!(outcome.context.validated, 4);
}

#[test]
fn test_cli_exclude_flag_adds_patterns() {
    let dir = site();
    let mut args = args(&dir);
    args.exclude = vec!["posts/*".to_string()];
    let outcome = check::validate(&args.resolve_config().unwrap()).unwrap();
    assert!(outcome
        .report
        .get(&DocumentId::from("/posts/broken.md"))
        .is_none());
    assert_eq!(outcome.context.excluded, 3);
}

#[test]
fn test_strict_mode_fails_and_dumps() {
    let dir = site();
    let mut args = args(&dir);
    args.strict = true;
    args.format = Format::Json;
    args.dump = Some(dir.path().join("out/report.json"));

    assert!(check::run(&args).unwrap());

    let dumped: ViolationReport = serde_json::from_str(
        &fs::read_to_string(dir.path().join("out/report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(dumped.document_count(), 2);
}

#[test]
fn test_flag_paths_resolve_against_working_directory() {
    let dir = site();
    let mut args = args(&dir);
    args.root = Some("content".into());
    args.dump = Some("reports/r.json".into());

    let config = args.resolve_config().unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(config.root_dir(), cwd.join("content"));
    assert_eq!(config.dump, Some(cwd.join("reports/r.json")));
}

#[test]
fn test_config_paths_resolve_against_config_directory() {
    let dir = site();
    let config = args(&dir).resolve_config().unwrap();
    assert_eq!(config.root_dir(), dir.path().join("site"));
}

#[test]
fn test_non_strict_mode_succeeds_with_violations() {
    let dir = site();
    assert!(!check::run(&args(&dir)).unwrap());
}

#[test]
fn test_malformed_schema_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "fmv.yaml", "schema: [title]\n");
    write(dir.path(), "a.md", "---\ntitle: x\n---\n");
    let err = check::run(&args(&dir)).unwrap_err();
    assert!(
        format!("{err:#}").contains("must be a mapping"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_missing_schema_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "fmv.yaml", "strict: true\nroot: does-not-exist\n");
    let mut args = args(&dir);
    args.strict = true;
    assert!(!check::run(&args).unwrap());
}
