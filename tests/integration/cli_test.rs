//! Command-line front end, from parsed flags to written output

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use pydeptree::{
    cli::{commands::exit_code, Args, Command},
    config::{load_config, CliArgs},
    models::config::OutputFormat,
    PyDepTreeError, Result,
};
use tempfile::tempdir;

use crate::common::create_layered_project;

fn parse(argv: &[&str]) -> Args {
    let mut full = vec!["pydeptree"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).expect("valid arguments")
}

#[test]
fn test_flags_become_settings() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let main_arg = main.display().to_string();
    let root_arg = dir.path().display().to_string();

    let args = parse(&[
        &main_arg,
        "--depth",
        "3",
        "--root",
        &root_arg,
        "--output",
        "json",
        "--no-check-lint",
        "--show-external",
        "--threads",
        "2",
    ]);
    let settings = load_config(CliArgs::from_args(&args))?;

    assert_eq!(settings.entries, vec![main]);
    assert_eq!(settings.depth, 3);
    assert_eq!(settings.max_depth(), 2);
    assert_eq!(settings.project_root, Some(dir.path().to_path_buf()));
    assert_eq!(settings.output_format, OutputFormat::Json);
    assert!(!settings.check_lint);
    assert!(settings.show_external);
    assert_eq!(settings.thread_count(), 2);
    Ok(())
}

#[test]
fn test_analyze_writes_json_report() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let out = dir.path().join("deps.json");

    let main_arg = main.display().to_string();
    let out_arg = out.display().to_string();
    let command = Command::from_args(parse(&[
        &main_arg,
        "--output",
        "json",
        "--output-file",
        &out_arg,
        "--no-check-lint",
        "--no-progress",
        "--quiet",
    ]));
    command.execute()?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    assert_eq!(json["max_depth"], 1);
    assert_eq!(json["roots"][0]["path"], "main.py");
    assert_eq!(json["roots"][0]["role"], "main");
    assert_eq!(json["roots"][0]["children"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["summary"]["files"], 5);
    Ok(())
}

#[test]
fn test_analyze_writes_text_report_without_colors() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let out = dir.path().join("deps.txt");

    let main_arg = main.display().to_string();
    let out_arg = out.display().to_string();
    let command = Command::from_args(parse(&[
        &main_arg,
        "--depth",
        "1",
        "--output-file",
        &out_arg,
        "--no-check-lint",
        "--no-progress",
        "--show-code",
    ]));
    assert_eq!(command.run(), 0);

    let text = fs::read_to_string(&out)?;
    assert!(text.starts_with("Python Dependency Analyzer"));
    assert!(text.contains("🚀 main.py"));
    assert!(text.contains("├── 📊 models/__init__.py"));
    assert!(text.contains("└── ⚙️ config.py"));
    assert!(text.contains("Import Statements:"));
    assert!(text.contains("    from models import User"));
    assert!(text.contains("File Statistics Summary"));
    assert!(!text.contains('\u{1b}'));
    Ok(())
}

#[test]
fn test_failures_map_to_exit_codes() -> Result<()> {
    let dir = tempdir()?;
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not python")?;

    let notes_arg = notes.display().to_string();
    let command = Command::from_args(parse(&[&notes_arg, "--no-check-lint", "--no-progress"]));
    assert!(matches!(command.execute(), Err(PyDepTreeError::NotPythonFile { .. })));
    assert_eq!(command.run(), 1);

    let missing = dir.path().join("missing.py").display().to_string();
    let command = Command::from_args(parse(&[&missing, "--no-check-lint", "--no-progress"]));
    assert_eq!(command.run(), 1);

    let main = dir.path().join("main.py");
    fs::write(&main, "")?;
    let main_arg = main.display().to_string();
    let command = Command::from_args(parse(&[&main_arg, "--config", "/nonexistent/pydeptree.toml"]));
    let err = command.execute().unwrap_err();
    assert_eq!(exit_code(&err), 2);
    Ok(())
}

#[test]
fn test_config_file_supplies_defaults() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let config = dir.path().join("pydeptree.toml");
    fs::write(
        &config,
        format!(
            "entries = [\"{}\"]\ndepth = 4\noutput_format = \"csv\"\ncheck_lint = false\n",
            main.display()
        ),
    )?;

    let config_arg = config.display().to_string();
    let settings = load_config(CliArgs::from_args(&parse(&["--config", &config_arg, "--depth", "2"])))?;

    assert_eq!(settings.entries, vec![PathBuf::from(&main)]);
    assert_eq!(settings.depth, 2);
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert!(!settings.check_lint);
    Ok(())
}
