//! Full-pass pipeline tests: dataset plus a small corpus in a temporary
//! directory, driven through `pipeline::run`.

use std::fs;
use std::path::Path;
use taxo_cli::pipeline::RunError;
use taxo_cli::{pipeline, RunConfig};
use taxo_core::ComponentCheck;

const DATASET: &str = "\
;TC1;TC2;Process;Process step;TC3;;LT;OI;PI;DT
0;rv;x,x,X;Requirementanalyseproces;Verzamelen requirements;8;;x,x,x;x,x,x;x,x,x;x,x,x
1;oa;x,x,x;Ontwerpproces;Opstellen ontwerp;3;;x,x,x;X,X,X;x,x,x;x,x,x
";

fn workspace(files: &[(&str, &str)]) -> (tempfile::TempDir, RunConfig) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dataset.csv"), DATASET).unwrap();

    for (name, content) in files {
        let path = dir.path().join("content").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    let config = RunConfig {
        source_dir: dir.path().join("content"),
        build_dir: dir.path().join("build"),
        dataset_path: dir.path().join("dataset.csv"),
        coverage_report_path: dir.path().join("coverage_report.md"),
        content_report_path: dir.path().join("content_report.md"),
        skip_link_check: false,
        component_check: None,
        ignore_folders: vec!["schrijfwijze".to_string()],
    };
    (dir, config)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn clean_file_is_emitted_with_generated_tags() {
    let (dir, config) = workspace(&[(
        "requirements.md",
        "---\ntaxonomie:\n- rv.1.8.OI\ntags:\n- zelfstudie\n---\nBody text\n",
    )]);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.drafts, 0);

    let built = read(&dir.path().join("build/requirements.md"));
    assert!(built.contains("title: requirements"));
    assert!(built.contains("- rv.1.8.OI"));
    assert!(!built.contains("draft:"));
    assert!(built.ends_with("Body text\n"));

    // Level tag first, then byte order, existing tag kept.
    let niveau = built.find("- niveau-1").unwrap();
    let subject = built.find("- 8").unwrap();
    let zelfstudie = built.find("- zelfstudie").unwrap();
    assert!(niveau < subject && subject < zelfstudie);
}

#[test]
fn files_with_findings_become_drafts() {
    let (dir, config) = workspace(&[
        ("no_codes.md", "---\ntags:\n- iets\n---\nBody\n"),
        (
            "wip.md",
            "---\ntaxonomie:\n- rv.1.8.OI\n---\nStill -=TODO=- here\n",
        ),
    ]);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.drafts, 2);

    assert!(read(&dir.path().join("build/no_codes.md")).contains("draft: true"));
    assert!(read(&dir.path().join("build/wip.md")).contains("draft: true"));

    let report = read(&config.content_report_path);
    let failed = report.split("## Failed files").nth(1).unwrap();
    assert!(failed.contains("no_codes.md"));
    let wip = report.split("## Failed files").next().unwrap();
    assert!(wip.contains("wip.md"));
}

#[test]
fn coverage_report_reflects_processed_codes() {
    let (_dir, config) = workspace(&[(
        "requirements.md",
        "---\ntaxonomie:\n- rv.1.8.OI\n---\nBody\n",
    )]);

    pipeline::run(&config).unwrap();

    let report = read(&config.coverage_report_path);
    assert!(report.starts_with("---\ndraft: true\n---\n"));
    assert!(report.contains("## Report 1 - Process steps"));
    assert!(report.contains("## Report 2 - Subject catalogue"));
    assert!(report.contains("Requirementanalyseproces"));
    // Level 1 covered, level 2 untouched, level 3 not offered.
    assert!(report.contains("✅"));
    assert!(report.contains("⛔️"));
    assert!(report.contains("🏳️"));
}

#[test]
fn not_offered_code_is_refused_and_reported() {
    let (dir, config) = workspace(&[(
        "too_high.md",
        "---\ntaxonomie:\n- rv.3.8.OI\n---\nBody\n",
    )]);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.drafts, 1);

    let report = read(&config.content_report_path);
    assert!(report.contains("not offered at this level"));
    assert!(report.contains("rv.3.8.OI"));
    assert!(read(&dir.path().join("build/too_high.md")).contains("draft: true"));
}

#[test]
fn ignored_folders_are_left_out_of_the_pass() {
    let (dir, config) = workspace(&[
        ("keep.md", "---\ntaxonomie:\n- rv.1.8.OI\n---\nBody\n"),
        ("schrijfwijze/skip.md", "---\n---\nBody\n"),
    ]);

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.files_processed, 1);
    assert!(!dir.path().join("build/schrijfwijze/skip.md").exists());
}

#[test]
fn missing_dataset_is_fatal() {
    let (_dir, mut config) = workspace(&[("a.md", "---\n---\n")]);
    config.dataset_path = config.dataset_path.with_file_name("absent.csv");
    assert!(pipeline::run(&config).is_err());
}

#[test]
fn build_dir_equal_to_source_is_refused_and_corpus_survives() {
    let (dir, mut config) = workspace(&[("a.md", "---\ntaxonomie:\n- rv.1.8.OI\n---\nBody\n")]);
    config.build_dir = config.source_dir.clone();

    let result = pipeline::run(&config);
    assert!(matches!(
        result,
        Err(RunError::BuildDirOverlapsSource { .. })
    ));
    assert!(dir.path().join("content/a.md").exists());
}

#[test]
fn build_dir_inside_source_is_refused() {
    let (dir, mut config) = workspace(&[("a.md", "---\n---\nBody\n")]);
    config.build_dir = config.source_dir.join("build");

    assert!(matches!(
        pipeline::run(&config),
        Err(RunError::BuildDirOverlapsSource { .. })
    ));
    assert!(dir.path().join("content/a.md").exists());
}

#[test]
fn source_inside_build_dir_is_refused() {
    let (dir, mut config) = workspace(&[("a.md", "---\n---\nBody\n")]);
    config.build_dir = dir.path().to_path_buf();

    assert!(matches!(
        pipeline::run(&config),
        Err(RunError::BuildDirOverlapsSource { .. })
    ));
    assert!(dir.path().join("content/a.md").exists());
}

#[test]
fn configured_component_check_flags_misplaced_files() {
    let (_dir, mut config) = workspace(&[(
        "Leertaken/requirements.md",
        "---\ntaxonomie:\n- rv.1.8.OI\n---\nBody\n",
    )]);
    config.component_check = Some(ComponentCheck::standard());

    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.drafts, 1);

    let report = read(&config.content_report_path);
    assert!(report.contains("Ondersteunende-informatie"));
}

#[test]
fn build_dir_is_recreated_each_run() {
    let (dir, config) = workspace(&[("a.md", "---\ntaxonomie:\n- rv.1.8.OI\n---\nBody\n")]);
    fs::create_dir_all(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build/stale.md"), "old output").unwrap();

    pipeline::run(&config).unwrap();
    assert!(!dir.path().join("build/stale.md").exists());
    assert!(dir.path().join("build/a.md").exists());
}
