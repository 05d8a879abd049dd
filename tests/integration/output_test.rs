//! Rendering real trees in every output format

use pydeptree::{
    build_graph,
    output::{create_writer, CsvFormatter, Formatter, JsonFormatter, TextFormatter},
    Result,
};
use tempfile::tempdir;

use crate::common::{create_layered_project, write_file};

#[test]
fn test_text_tree_marks_back_references() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let tree = build_graph(&[main], dir.path(), 1)?;

    let text = TextFormatter::new(false, true).format(&tree)?;
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("🚀 main.py ["));
    assert!(lines[1].starts_with("├── 📊 models/__init__.py ["));
    assert_eq!(lines[2], "│   └── 🔧 utils/__init__.py ↺ (see above)");
    assert!(lines[3].starts_with("├── 🌐 services/__init__.py ["));
    assert_eq!(lines[4], "│   └── 📊 models/__init__.py ↺ (see above)");
    assert!(lines[5].starts_with("├── 🔧 utils/__init__.py ["));
    assert!(lines[6].starts_with("└── ⚙️ config.py ["));
    assert_eq!(lines.len(), 7);
    Ok(())
}

#[test]
fn test_unreadable_file_in_every_format() -> Result<()> {
    let dir = tempdir()?;
    let main = write_file(dir.path(), "main.py", "import legacy\n")?;
    // Not valid UTF-8
    std::fs::write(dir.path().join("legacy.py"), [0xff, 0xfe, 0x00, 0x41])?;

    let tree = build_graph(&[main], dir.path(), 1)?;

    let text = TextFormatter::new(false, true).format(&tree)?;
    assert!(text.contains("└── 📄 legacy.py (unreadable)"));

    let csv = CsvFormatter::new().format(&tree)?;
    assert!(csv.lines().any(|line| line == "legacy.py,other,1,0,0,0,0,0,false"));

    let json: serde_json::Value = serde_json::from_str(&JsonFormatter::new(false).format(&tree)?)?;
    let legacy = &json["roots"][0]["children"][0];
    assert_eq!(legacy["readable"], false);
    assert_eq!(legacy["lines"], 0);
    Ok(())
}

#[test]
fn test_csv_rows_follow_discovery_order() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let tree = build_graph(&[main], dir.path(), 1)?;

    let csv = CsvFormatter::new().format(&tree)?;
    let paths: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(
        paths,
        vec!["main.py", "models/__init__.py", "services/__init__.py", "utils/__init__.py", "config.py"]
    );
    Ok(())
}

#[test]
fn test_report_written_to_file() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let tree = build_graph(&[main], dir.path(), 1)?;
    let out = dir.path().join("report.json");

    let content = JsonFormatter::new(true).format(&tree)?;
    create_writer(Some(&out)).write(&content)?;

    let written = std::fs::read_to_string(&out)?;
    assert_eq!(written, content);
    assert!(written.contains("\"external_packages\""));
    Ok(())
}
