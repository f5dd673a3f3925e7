use std::{fs, path::PathBuf};

use tempfile::tempdir;

use tilegrid::TilegridError;
use tilegrid_cli::{Args, Format, run};

/// Collects all .toml scenes from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn demos_path() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: String, output: String, format: Format) -> Args {
    Args {
        input,
        output,
        format,
        config: None,
        diagnostics: true,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_demo_scenes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scenes = collect_scene_files(demos_path());

    assert!(!scenes.is_empty(), "No demo scenes found in demos/");

    let mut failed_scenes = Vec::new();

    for scene_path in &scenes {
        let stem = scene_path.file_stem().unwrap().to_string_lossy().to_string();
        for (format, extension) in [(Format::Svg, "svg"), (Format::Text, "txt")] {
            let output_path = temp_dir.path().join(format!("{stem}.{extension}"));
            let args = args(
                scene_path.to_string_lossy().to_string(),
                output_path.to_string_lossy().to_string(),
                format,
            );

            match run(&args) {
                Ok(()) => {
                    let output = fs::read_to_string(&output_path).expect("Output was not written");
                    assert!(!output.is_empty(), "{} produced empty output", stem);
                }
                Err(e) => failed_scenes.push((scene_path.clone(), e)),
            }
        }
    }

    if !failed_scenes.is_empty() {
        eprintln!("\nDemo scenes that failed:");
        for (path, err) in &failed_scenes {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene run(s) failed", failed_scenes.len());
    }
}

#[test]
fn e2e_invalid_scene_reports_span() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input_path = temp_dir.path().join("broken.toml");
    let source = "[[actions]]\nkind = \"close\"\nbox = 3\n";
    fs::write(&input_path, source).expect("Failed to write scene");

    let args = args(
        input_path.to_string_lossy().to_string(),
        temp_dir.path().join("out.svg").to_string_lossy().to_string(),
        Format::Svg,
    );

    match run(&args) {
        Err(TilegridError::Scene { message, span, .. }) => {
            assert_eq!(message, "no box with index 3");
            assert_eq!(&source[span.expect("Scene error should carry a span")], "3");
        }
        other => panic!("Expected a scene error, got {other:?}"),
    }
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args(
        temp_dir.path().join("missing.toml").to_string_lossy().to_string(),
        temp_dir.path().join("out.svg").to_string_lossy().to_string(),
        Format::Svg,
    );

    assert!(matches!(run(&args), Err(TilegridError::Io(_))));
}
