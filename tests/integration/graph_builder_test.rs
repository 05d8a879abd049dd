//! End-to-end tree building over a realistic project layout

use std::path::Path;
use std::sync::{Arc, Mutex};

use pydeptree::{
    build_graph, classify, find_import_cycles, Child, FileRole, GraphBuilder, GraphBuilderConfig, LintCounts,
    LintSource, PyDepTreeError, Result,
};
use tempfile::tempdir;

use crate::common::{create_layered_project, names, write_file};

#[test]
fn test_layered_project_tree() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let root = dir.path().canonicalize()?;

    let tree = build_graph(&[main], dir.path(), 1)?;
    assert_eq!(tree.roots().len(), 1);

    let main_node = tree.node(tree.roots()[0]);
    assert_eq!(main_node.role, FileRole::Main);
    assert_eq!(main_node.metrics.imports, 7);
    assert_eq!(main_node.external_imports, vec!["os", "sys", "requests"]);

    let children: Vec<(String, FileRole, bool)> = tree
        .children(tree.roots()[0])
        .map(|(child, node)| {
            (
                tree.relative_path(&node.path).display().to_string(),
                node.role,
                child.is_back_ref(),
            )
        })
        .collect();
    assert_eq!(
        children,
        vec![
            ("models/__init__.py".to_string(), FileRole::Model, false),
            ("services/__init__.py".to_string(), FileRole::Service, false),
            ("utils/__init__.py".to_string(), FileRole::Utils, false),
            ("config.py".to_string(), FileRole::Config, false),
        ]
    );

    // Siblings at the same depth point at each other instead of nesting
    let models = tree.get(&root.join("models/__init__.py")).expect("models node");
    assert_eq!(models.children.len(), 1);
    assert!(models.children[0].is_back_ref());

    let services = tree.get(&root.join("services/__init__.py")).expect("services node");
    assert!(matches!(services.children.as_slice(), [Child::BackRef(_)]));

    let externals: Vec<String> = tree.external_packages().into_iter().collect();
    assert_eq!(externals, vec!["json", "os", "requests", "sys"]);
    assert!(find_import_cycles(&tree).is_empty());
    Ok(())
}

#[test]
fn test_depth_zero_lists_direct_imports_without_expanding() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;

    let tree = build_graph(&[main], dir.path(), 0)?;
    let root = tree.roots()[0];
    assert_eq!(tree.node(root).children.len(), 4);
    for (_, node) in tree.children(root) {
        assert!(node.children.is_empty(), "{} was expanded", node.path.display());
    }
    Ok(())
}

#[test]
fn test_second_entry_refers_back_to_shared_module() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;
    let test_entry = dir.path().join("tests/test_api.py");

    let tree = build_graph(&[main, test_entry], dir.path(), 2)?;
    assert_eq!(tree.roots().len(), 2);

    let test_root = tree.node(tree.roots()[1]);
    assert_eq!(test_root.role, FileRole::Test);
    assert_eq!(test_root.children.len(), 1);
    assert!(test_root.children[0].is_back_ref());
    let shared = tree.node(test_root.children[0].id());
    assert_eq!(tree.relative_path(&shared.path), Path::new("services/__init__.py"));
    Ok(())
}

#[test]
fn test_cycles_are_reported() -> Result<()> {
    let dir = tempdir()?;
    let main = write_file(dir.path(), "main.py", "import orders\n")?;
    write_file(dir.path(), "orders.py", "import billing\n")?;
    write_file(dir.path(), "billing.py", "import orders\nimport billing\n")?;
    let root = dir.path().canonicalize()?;

    let tree = build_graph(&[main], dir.path(), 5)?;
    assert_eq!(tree.len(), 3);

    let cycles = find_import_cycles(&tree);
    assert_eq!(cycles.len(), 1);
    assert_eq!(names(&root, &cycles[0]), vec!["billing.py", "orders.py"]);
    Ok(())
}

#[test]
fn test_relative_imports_inside_package() -> Result<()> {
    let dir = tempdir()?;
    let main = write_file(dir.path(), "main.py", "import shop\n")?;
    write_file(dir.path(), "shop/__init__.py", "from . import cart\n")?;
    write_file(dir.path(), "shop/cart.py", "from . import pricing\nfrom ..helpers import fmt\n")?;
    write_file(dir.path(), "shop/pricing.py", "")?;
    write_file(dir.path(), "helpers.py", "")?;
    let root = dir.path().canonicalize()?;

    let tree = build_graph(&[main], dir.path(), 3)?;
    let cart = tree.get(&root.join("shop/cart.py")).expect("cart node");
    let targets: Vec<_> = cart.children.iter().map(|c| tree.node(c.id()).path.clone()).collect();
    assert_eq!(names(&root, &targets), vec!["shop/pricing.py", "helpers.py"]);

    // Relative imports never count as external packages
    assert!(cart.external_imports.is_empty());
    Ok(())
}

#[test]
fn test_relative_import_cannot_leave_project_root() -> Result<()> {
    let dir = tempdir()?;
    let main = write_file(dir.path(), "proj/main.py", "from .. import outside
")?;
    write_file(dir.path(), "outside.py", "")?;
    let root = dir.path().join("proj");

    let tree = build_graph(&[main], &root, 1)?;
    let canonical_root = root.canonicalize()?;
    assert_eq!(tree.len(), 1);
    assert!(tree.nodes().iter().all(|node| node.path.starts_with(&canonical_root)));
    assert!(tree.external_packages().is_empty());
    Ok(())
}

#[test]
fn test_classify_against_project_root() {
    let root = Path::new("/srv/app");
    assert_eq!(classify(Path::new("/srv/app/main.py"), root), FileRole::Main);
    assert_eq!(classify(Path::new("/srv/app/models/settings.py"), root), FileRole::Config);
    assert_eq!(classify(Path::new("/srv/app/db_config.py"), root), FileRole::Config);
    assert_eq!(classify(Path::new("/srv/app/tests/test_user.py"), root), FileRole::Test);
    assert_eq!(classify(Path::new("/srv/app/services/payment.py"), root), FileRole::Service);
    assert_eq!(classify(Path::new("/srv/app/helper.py"), root), FileRole::Other);
    // Directories above the root are not considered
    assert_eq!(classify(Path::new("/srv/models/app/x.py"), Path::new("/srv/models")), FileRole::Other);
}

#[test]
fn test_lint_source_sees_every_readable_file() -> Result<()> {
    let dir = tempdir()?;
    let main = create_layered_project(dir.path())?;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let lint: Arc<dyn LintSource> = Arc::new(move |path: &Path| {
        recorder.lock().unwrap().push(path.to_path_buf());
        if path.ends_with("services/__init__.py") {
            LintCounts::new(2, 1)
        } else {
            LintCounts::default()
        }
    });

    let config = GraphBuilderConfig {
        max_depth: 1,
        parallel: true,
        threads: Some(3),
        ..GraphBuilderConfig::default()
    };
    let tree = GraphBuilder::new(dir.path(), config, lint)?.build(&[main])?;

    assert_eq!(seen.lock().unwrap().len(), tree.len());
    let api = tree
        .nodes()
        .iter()
        .find(|n| n.path.ends_with("services/__init__.py"))
        .expect("api node");
    assert_eq!(api.metrics.lint(), LintCounts::new(2, 1));
    Ok(())
}

#[test]
fn test_entry_validation_errors() -> Result<()> {
    let dir = tempdir()?;
    write_file(dir.path(), "README.md", "# docs\n")?;

    let err = build_graph(&[dir.path().join("README.md")], dir.path(), 1).unwrap_err();
    assert!(matches!(err, PyDepTreeError::NotPythonFile { .. }));
    assert!(!err.is_critical());

    let err = build_graph(&[dir.path().join("absent.py")], dir.path(), 1).unwrap_err();
    assert!(matches!(err, PyDepTreeError::InvalidEntry { .. }));
    Ok(())
}
