//! Import cycle detection over a built tree

use crate::models::ImportTree;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::path::PathBuf;

/// Find groups of files that import each other
///
/// Both owned edges and back-references are considered, so cycles cut by the
/// tree are still reported. Each cycle is sorted, and so is the list.
pub fn find_import_cycles(tree: &ImportTree) -> Vec<Vec<PathBuf>> {
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(tree.len(), tree.len());
    let indices: Vec<NodeIndex> = (0..tree.len()).map(|idx| graph.add_node(idx)).collect();

    let mut self_loops = vec![false; tree.len()];
    for (from, child) in tree.edges() {
        let to = child.id();
        if from == to {
            self_loops[from.0] = true;
        }
        graph.update_edge(indices[from.0], indices[to.0], ());
    }

    let mut cycles: Vec<Vec<PathBuf>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| component.len() > 1 || self_loops[graph[component[0]]])
        .map(|component| {
            let mut paths: Vec<PathBuf> = component
                .into_iter()
                .map(|idx| tree.nodes()[graph[idx]].path.clone())
                .collect();
            paths.sort();
            paths
        })
        .collect();

    cycles.sort();
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph_builder::build_graph;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_two_file_cycle() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("b.py"), "import a\nimport c\n").unwrap();
        fs::write(dir.path().join("c.py"), "").unwrap();

        let tree = build_graph(&[dir.path().join("a.py")], dir.path(), 3).unwrap();
        let cycles = find_import_cycles(&tree);
        assert_eq!(cycles.len(), 1);
        let names: Vec<String> = cycles[0]
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.py"]);
    }

    #[test]
    fn test_self_import_is_a_cycle() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "import main\n").unwrap();

        let tree = build_graph(&[dir.path().join("main.py")], dir.path(), 1).unwrap();
        assert_eq!(find_import_cycles(&tree).len(), 1);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "import a\nimport b\n").unwrap();
        fs::write(dir.path().join("a.py"), "import shared\n").unwrap();
        fs::write(dir.path().join("b.py"), "import shared\n").unwrap();
        fs::write(dir.path().join("shared.py"), "").unwrap();

        let tree = build_graph(&[dir.path().join("main.py")], dir.path(), 3).unwrap();
        assert!(tree.back_reference_count() > 0);
        assert!(find_import_cycles(&tree).is_empty());
    }
}
