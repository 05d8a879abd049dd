//! Output formatting functionality
//!
//! This module renders an import tree as a text tree, JSON or CSV.

use crate::core::cycles::find_import_cycles;
use crate::error::{PyDepTreeError, Result};
use crate::models::import_tree::{Child, FileNode, ImportTree, NodeId};
use crate::models::role::FileRole;
use ansi_term::Colour::{Red, Yellow};
use ansi_term::Style;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Format a byte count as `<n>B`, `<x.y>KB` or `<x.y>MB`
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    if bytes < 1024 {
        format!("{}B", bytes)
    } else if (bytes as f64) < MB {
        format!("{:.1}KB", bytes as f64 / KB)
    } else {
        format!("{:.1}MB", bytes as f64 / MB)
    }
}

fn paint(text: &str, style: Style, use_colors: bool) -> String {
    if use_colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// One tree label, without guides
pub fn format_node_label(tree: &ImportTree, node: &FileNode, back_ref: bool, use_colors: bool) -> String {
    let path = tree.relative_path(&node.path).display().to_string();
    let dimmed = Style::new().dimmed();
    let mut label = format!("{} {}", node.role.icon(), paint(&path, node.role.style(), use_colors));

    if back_ref {
        label.push(' ');
        label.push_str(&paint("↺ (see above)", dimmed, use_colors));
        return label;
    }

    if !node.readable {
        label.push(' ');
        label.push_str(&paint("(unreadable)", Red.normal(), use_colors));
        return label;
    }

    let metrics = &node.metrics;
    let badges = format!(
        "[{}] [{}L] [{}↓]",
        format_size(metrics.size_bytes),
        metrics.lines,
        metrics.imports
    );
    label.push(' ');
    label.push_str(&paint(&badges, dimmed, use_colors));

    if metrics.lint_errors > 0 {
        label.push(' ');
        label.push_str(&paint(&format!("[E:{}]", metrics.lint_errors), Red.bold(), use_colors));
    }
    if metrics.lint_warnings > 0 {
        label.push(' ');
        label.push_str(&paint(&format!("[W:{}]", metrics.lint_warnings), Yellow.normal(), use_colors));
    }

    label
}

/// Render every root with its subtree
pub fn format_tree_text(tree: &ImportTree, use_colors: bool) -> String {
    let mut output = String::new();

    for (idx, root) in tree.roots().iter().enumerate() {
        if idx > 0 {
            output.push('\n');
        }
        output.push_str(&format_node_label(tree, tree.node(*root), false, use_colors));
        output.push('\n');
        render_children(tree, *root, "", use_colors, &mut output);
    }

    output
}

fn render_children(tree: &ImportTree, id: NodeId, prefix: &str, use_colors: bool, output: &mut String) {
    let children: Vec<(Child, &FileNode)> = tree.children(id).collect();
    let count = children.len();

    for (idx, (child, node)) in children.into_iter().enumerate() {
        let is_last = idx + 1 == count;
        output.push_str(prefix);
        output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        output.push_str(&format_node_label(tree, node, child.is_back_ref(), use_colors));
        output.push('\n');

        if let Child::Owned(child_id) = child {
            let next_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            render_children(tree, child_id, &next_prefix, use_colors, output);
        }
    }
}

/// Import statements of every file that has any
pub fn format_import_statements(tree: &ImportTree) -> String {
    let mut output = String::from("Import Statements:\n");
    let mut any = false;

    for node in tree.nodes() {
        if node.import_statements.is_empty() {
            continue;
        }
        any = true;
        output.push_str(&format!("  {}:\n", tree.relative_path(&node.path).display()));
        for statement in &node.import_statements {
            output.push_str(&format!("    {}\n", statement));
        }
    }

    if !any {
        output.push_str("  (none)\n");
    }
    output
}

/// Sorted external package names on one line
pub fn format_external_packages(tree: &ImportTree) -> String {
    let packages = tree.external_packages();
    if packages.is_empty() {
        return "External packages: (none)\n".to_string();
    }
    let names: Vec<String> = packages.into_iter().collect();
    format!("External packages: {}\n", names.join(", "))
}

/// Per-role aggregate used by the summary table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleStats {
    pub count: usize,
    pub total_lines: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl RoleStats {
    /// Mean line count, rounded
    pub fn avg_lines(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.total_lines + self.count / 2) / self.count
        }
    }

    fn add(&mut self, other: &RoleStats) {
        self.count += other.count;
        self.total_lines += other.total_lines;
        self.errors += other.errors;
        self.warnings += other.warnings;
    }
}

/// Aggregate owned nodes by role, in role order
pub fn role_stats(tree: &ImportTree) -> BTreeMap<FileRole, RoleStats> {
    let mut stats: BTreeMap<FileRole, RoleStats> = BTreeMap::new();
    for node in tree.nodes() {
        let entry = stats.entry(node.role).or_default();
        entry.count += 1;
        entry.total_lines += node.metrics.lines;
        entry.errors += node.metrics.lint_errors;
        entry.warnings += node.metrics.lint_warnings;
    }
    stats
}

/// Summary table, lint total line and cycle report
pub fn format_summary_text(tree: &ImportTree, cycles: &[Vec<PathBuf>], use_colors: bool) -> String {
    let mut output = String::new();
    let stats = role_stats(tree);

    output.push_str(&paint("File Statistics Summary", Style::new().bold(), use_colors));
    output.push('\n');
    output.push_str(&format!(
        "{:<10} {:>6} {:>12} {:>10} {:>7} {:>9}\n",
        "Type", "Count", "Total Lines", "Avg Lines", "Errors", "Warnings"
    ));

    let mut total = RoleStats::default();
    for (role, row) in &stats {
        total.add(row);
        let name = format!("{:<10}", role.name());
        output.push_str(&format!(
            "{} {:>6} {:>12} {:>10} {:>7} {:>9}\n",
            paint(&name, role.style(), use_colors),
            row.count,
            row.total_lines,
            row.avg_lines(),
            row.errors,
            row.warnings
        ));
    }
    output.push_str(&format!(
        "{:<10} {:>6} {:>12} {:>10} {:>7} {:>9}\n",
        "total",
        total.count,
        total.total_lines,
        total.avg_lines(),
        total.errors,
        total.warnings
    ));

    if total.errors > 0 || total.warnings > 0 {
        let line = format!(
            "Lint Issues: {} error(s), {} warning(s)",
            total.errors, total.warnings
        );
        let style = if total.errors > 0 { Red.bold() } else { Yellow.normal() };
        output.push('\n');
        output.push_str(&paint(&line, style, use_colors));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_cycles_text(tree, cycles, use_colors));
    output
}

/// Import cycle report
pub fn format_cycles_text(tree: &ImportTree, cycles: &[Vec<PathBuf>], use_colors: bool) -> String {
    if cycles.is_empty() {
        return "Import cycles: none\n".to_string();
    }

    let mut output = paint(
        &format!("Import cycles: {}", cycles.len()),
        Yellow.bold(),
        use_colors,
    );
    output.push('\n');
    for cycle in cycles {
        let names: Vec<String> = cycle
            .iter()
            .map(|path| tree.relative_path(path).display().to_string())
            .collect();
        output.push_str(&format!("  ↺ {}\n", names.join(" ↔ ")));
    }
    output
}

#[derive(Serialize)]
struct JsonReport {
    generated_at: DateTime<Utc>,
    project_root: String,
    max_depth: usize,
    summary: JsonSummary,
    roots: Vec<JsonNode>,
    cycles: Vec<Vec<String>>,
    external_packages: Vec<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    back_references: usize,
    lint_errors: usize,
    lint_warnings: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonNode {
    File(Box<JsonFile>),
    BackReference { path: String, back_reference: bool },
}

#[derive(Serialize)]
struct JsonFile {
    path: String,
    role: FileRole,
    depth: usize,
    readable: bool,
    size_bytes: u64,
    lines: usize,
    imports: usize,
    lint_errors: usize,
    lint_warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    import_statements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    external_imports: Vec<String>,
    children: Vec<JsonNode>,
}

fn json_node(tree: &ImportTree, id: NodeId) -> JsonNode {
    let node = tree.node(id);
    let children = tree
        .children(id)
        .map(|(child, target)| match child {
            Child::Owned(child_id) => json_node(tree, child_id),
            Child::BackRef(_) => JsonNode::BackReference {
                path: tree.relative_path(&target.path).display().to_string(),
                back_reference: true,
            },
        })
        .collect();

    JsonNode::File(Box::new(JsonFile {
        path: tree.relative_path(&node.path).display().to_string(),
        role: node.role,
        depth: node.depth,
        readable: node.readable,
        size_bytes: node.metrics.size_bytes,
        lines: node.metrics.lines,
        imports: node.metrics.imports,
        lint_errors: node.metrics.lint_errors,
        lint_warnings: node.metrics.lint_warnings,
        import_statements: node.import_statements.clone(),
        external_imports: node.external_imports.clone(),
        children,
    }))
}

/// Format the tree as a JSON document
pub fn format_results_json(tree: &ImportTree, pretty: bool) -> Result<String> {
    let cycles: Vec<Vec<String>> = find_import_cycles(tree)
        .into_iter()
        .map(|cycle| {
            cycle
                .iter()
                .map(|path| tree.relative_path(path).display().to_string())
                .collect()
        })
        .collect();

    let report = JsonReport {
        generated_at: Utc::now(),
        project_root: tree.project_root().display().to_string(),
        max_depth: tree.max_depth(),
        summary: JsonSummary {
            files: tree.len(),
            back_references: tree.back_reference_count(),
            lint_errors: tree.nodes().iter().map(|n| n.metrics.lint_errors).sum(),
            lint_warnings: tree.nodes().iter().map(|n| n.metrics.lint_warnings).sum(),
        },
        roots: tree.roots().iter().map(|id| json_node(tree, *id)).collect(),
        cycles,
        external_packages: tree.external_packages().into_iter().collect(),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}

#[derive(Serialize)]
struct CsvRow {
    path: String,
    role: FileRole,
    depth: usize,
    size_bytes: u64,
    lines: usize,
    imports: usize,
    lint_errors: usize,
    lint_warnings: usize,
    readable: bool,
}

/// Format the tree as CSV, one row per file in discovery order
pub fn format_results_csv(tree: &ImportTree) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    for node in tree.nodes() {
        writer.serialize(CsvRow {
            path: tree.relative_path(&node.path).display().to_string(),
            role: node.role,
            depth: node.depth,
            size_bytes: node.metrics.size_bytes,
            lines: node.metrics.lines,
            imports: node.metrics.imports,
            lint_errors: node.metrics.lint_errors,
            lint_warnings: node.metrics.lint_warnings,
            readable: node.readable,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| PyDepTreeError::io_error(err.into_error()))?;
    String::from_utf8(bytes).map_err(|source| PyDepTreeError::CsvSerialize { source })
}
