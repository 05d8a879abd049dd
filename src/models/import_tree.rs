//! Arena-backed import tree
//!
//! Every visited path owns exactly one [`FileNode`] in the arena. Repeated
//! references to a path (cycles, diamond imports) are recorded as
//! [`Child::BackRef`] edges that point at the owned node and are never
//! expanded again.

use super::metrics::FileMetrics;
use super::role::FileRole;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Edge from a node to one of its imports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Child {
    /// Subtree owned by the parent
    Owned(NodeId),
    /// Display-only pointer to a node owned elsewhere
    BackRef(NodeId),
}

impl Child {
    /// Target node of this edge
    pub fn id(&self) -> NodeId {
        match self {
            Child::Owned(id) | Child::BackRef(id) => *id,
        }
    }

    /// Whether this edge is a back-reference
    pub fn is_back_ref(&self) -> bool {
        matches!(self, Child::BackRef(_))
    }
}

/// One visited file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    /// Absolute path
    pub path: PathBuf,
    /// Classified role (`Other` when the file could not be read)
    pub role: FileRole,
    /// Size, line, import and lint figures
    pub metrics: FileMetrics,
    /// False when the file could not be read or decoded
    pub readable: bool,
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Imports in source discovery order
    pub children: Vec<Child>,
    /// Import statements as written in the source
    pub import_statements: Vec<String>,
    /// Top-level names that resolved outside the project
    pub external_imports: Vec<String>,
}

impl FileNode {
    /// Create a node with no children
    pub fn new(path: PathBuf, role: FileRole, metrics: FileMetrics, depth: usize) -> Self {
        Self {
            path,
            role,
            metrics,
            readable: true,
            depth,
            children: Vec::new(),
            import_statements: Vec::new(),
            external_imports: Vec::new(),
        }
    }

    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Owned children only
    pub fn owned_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().filter_map(|child| match child {
            Child::Owned(id) => Some(*id),
            Child::BackRef(_) => None,
        })
    }
}

/// Rooted, depth-bounded import tree for one analysis run
#[derive(Debug, Clone)]
pub struct ImportTree {
    project_root: PathBuf,
    max_depth: usize,
    nodes: Vec<FileNode>,
    roots: Vec<NodeId>,
    index: HashMap<PathBuf, NodeId>,
}

impl ImportTree {
    /// Create an empty tree
    pub fn new(project_root: impl Into<PathBuf>, max_depth: usize) -> Self {
        Self {
            project_root: project_root.into(),
            max_depth,
            nodes: Vec::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert an owned node; the path must not be present yet
    pub(crate) fn insert(&mut self, node: FileNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.path.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Register a node as a root
    pub(crate) fn push_root(&mut self, id: NodeId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Append an edge to a node's child list
    pub(crate) fn push_child(&mut self, parent: NodeId, child: Child) {
        self.nodes[parent.0].children.push(child);
    }

    /// Project root the tree was built against
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Maximum expansion depth used for the build
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.0]
    }

    /// Root ids in entry order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All owned nodes in creation order
    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    /// Owned node for a path
    pub fn get(&self, path: &Path) -> Option<&FileNode> {
        self.index.get(path).map(|id| self.node(*id))
    }

    /// Id of the owned node for a path
    pub fn id_of(&self, path: &Path) -> Option<NodeId> {
        self.index.get(path).copied()
    }

    /// Number of owned nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a node paired with their target nodes
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (Child, &FileNode)> + '_ {
        self.node(id)
            .children
            .iter()
            .map(move |child| (*child, self.node(child.id())))
    }

    /// Every edge in the tree, owned and back-references alike
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, Child)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(idx, node)| node.children.iter().map(move |child| (NodeId(idx), *child)))
    }

    /// Path relative to the project root, or the path itself when outside it
    pub fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }

    /// Sorted, deduplicated external top-level names across all nodes
    pub fn external_packages(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .flat_map(|node| node.external_imports.iter().cloned())
            .collect()
    }

    /// Total number of back-reference edges
    pub fn back_reference_count(&self) -> usize {
        self.edges().filter(|(_, child)| child.is_back_ref()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str, depth: usize) -> FileNode {
        FileNode::new(PathBuf::from(path), FileRole::Other, FileMetrics::default(), depth)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = ImportTree::new("/project", 1);
        let root = tree.insert(node("/project/main.py", 0));
        let child = tree.insert(node("/project/helper.py", 1));
        tree.push_root(root);
        tree.push_child(root, Child::Owned(child));
        tree.push_child(child, Child::BackRef(root));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(tree.id_of(Path::new("/project/helper.py")), Some(child));
        assert_eq!(tree.back_reference_count(), 1);

        let children: Vec<_> = tree.children(root).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].1.file_name(), "helper.py");
        assert_eq!(tree.node(root).owned_children().collect::<Vec<_>>(), vec![child]);
    }

    #[test]
    fn test_relative_path() {
        let tree = ImportTree::new("/project", 0);
        assert_eq!(
            tree.relative_path(Path::new("/project/models/user.py")),
            Path::new("models/user.py")
        );
        assert_eq!(
            tree.relative_path(Path::new("/elsewhere/x.py")),
            Path::new("/elsewhere/x.py")
        );
    }

    #[test]
    fn test_external_packages_are_deduplicated() {
        let mut tree = ImportTree::new("/project", 0);
        let mut a = node("/project/a.py", 0);
        a.external_imports = vec!["os".to_string(), "requests".to_string()];
        let mut b = node("/project/b.py", 1);
        b.external_imports = vec!["os".to_string()];
        tree.insert(a);
        tree.insert(b);

        let packages: Vec<_> = tree.external_packages().into_iter().collect();
        assert_eq!(packages, vec!["os".to_string(), "requests".to_string()]);
    }
}
