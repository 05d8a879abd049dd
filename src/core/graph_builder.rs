//! Import tree construction from entry files
//!
//! Building happens in two phases. Discovery walks breadth-first from all
//! entries at once and records the shortest depth at which every local file
//! is reachable, analyzing each level's files in parallel. Placement then
//! walks depth-first over the cached analyses in source order: a file becomes
//! an owned node the first time it is reached at its shortest depth, and every
//! other reference to it becomes a back-reference.

use super::classifier::classify;
use super::lint::{LintSource, NoLint};
use super::metrics::{collect, FileAnalysis};
use super::parallel::{build_pool, process_batch, ProgressCallback};
use crate::error::{PyDepTreeError, Result};
use crate::models::{Child, FileNode, FileRole, ImportTree, NodeId};
use crate::utils::module_resolver::{ModuleResolver, Resolution};
use dashmap::DashMap;
use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Configuration for import tree building
#[derive(Debug, Clone)]
pub struct GraphBuilderConfig {
    /// Nodes at depth `d` are expanded iff `d <= max_depth`
    pub max_depth: usize,
    /// Glob patterns for local files that are left out of the tree
    pub exclude_patterns: Vec<String>,
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for GraphBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            exclude_patterns: vec![
                "**/venv/**".to_string(),
                "**/.venv/**".to_string(),
                "**/site-packages/**".to_string(),
            ],
            parallel: true,
            threads: None,
        }
    }
}

/// A file's analysis together with its classified and resolved imports
#[derive(Debug)]
struct NodeAnalysis {
    analysis: FileAnalysis,
    role: FileRole,
    /// Resolved local imports, deduplicated, in source order
    locals: Vec<PathBuf>,
    externals: Vec<String>,
}

/// Builds import trees rooted at Python entry files
pub struct GraphBuilder {
    project_root: PathBuf,
    resolver: ModuleResolver,
    lint: Arc<dyn LintSource>,
    config: GraphBuilderConfig,
    excludes: Vec<Pattern>,
    progress: Option<ProgressCallback>,
}

impl GraphBuilder {
    /// Create a builder for a project root
    pub fn new(project_root: &Path, config: GraphBuilderConfig, lint: Arc<dyn LintSource>) -> Result<Self> {
        let project_root = project_root
            .canonicalize()
            .map_err(|_| PyDepTreeError::InvalidPath {
                path: project_root.to_path_buf(),
            })?;
        if !project_root.is_dir() {
            return Err(PyDepTreeError::InvalidPath { path: project_root });
        }

        let excludes = config
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            resolver: ModuleResolver::new(&project_root),
            project_root,
            lint,
            config,
            excludes,
            progress: None,
        })
    }

    /// Report per-file progress during discovery
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Canonical project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the import tree for the given entry files
    ///
    /// All entries are validated before anything is read. Duplicate entries
    /// are collapsed; an entry reachable from another entry stays a root.
    pub fn build(&self, entries: &[PathBuf]) -> Result<ImportTree> {
        if entries.is_empty() {
            return Err(PyDepTreeError::NoEntry);
        }

        let mut roots: Vec<PathBuf> = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = validate_entry(entry)?;
            if !roots.contains(&entry) {
                roots.push(entry);
            }
        }

        let pool = match (self.config.parallel, self.config.threads) {
            (false, _) => None,
            (true, threads) => Some(build_pool(threads.unwrap_or_else(num_cpus::get))?),
        };

        let depths: DashMap<PathBuf, usize> = DashMap::new();
        let analyses: DashMap<PathBuf, Arc<NodeAnalysis>> = DashMap::new();
        let order = self.discover(&roots, &depths, &analyses, pool.as_ref());

        tracing::debug!(
            cached_lookups = self.resolver.cache_len(),
            "discovered {} files from {} entries",
            order.len(),
            roots.len()
        );

        Ok(self.place(&roots, &order, &depths, &analyses))
    }

    /// Breadth-first discovery; returns paths in discovery order
    fn discover(
        &self,
        roots: &[PathBuf],
        depths: &DashMap<PathBuf, usize>,
        analyses: &DashMap<PathBuf, Arc<NodeAnalysis>>,
        pool: Option<&rayon::ThreadPool>,
    ) -> Vec<PathBuf> {
        let mut order: Vec<PathBuf> = Vec::new();
        let mut frontier: Vec<PathBuf> = roots.to_vec();
        for root in roots {
            depths.insert(root.clone(), 0);
        }

        let mut level = 0;
        while !frontier.is_empty() {
            let analyzed = process_batch(&frontier, pool, |path| self.analyze(path), self.progress.as_ref());
            for (path, node) in frontier.iter().zip(analyzed) {
                analyses.insert(path.clone(), Arc::new(node));
            }
            order.extend(frontier.iter().cloned());

            if level > self.config.max_depth {
                break;
            }

            let mut next = Vec::new();
            for path in &frontier {
                let Some(node) = analyses.get(path).map(|n| Arc::clone(n.value())) else {
                    continue;
                };
                for local in &node.locals {
                    if !depths.contains_key(local) {
                        depths.insert(local.clone(), level + 1);
                        next.push(local.clone());
                    }
                }
            }

            frontier = next;
            level += 1;
        }

        order
    }

    /// Read, measure, classify and resolve one file
    fn analyze(&self, path: &Path) -> NodeAnalysis {
        let analysis = collect(path, self.lint.as_ref());
        if !analysis.readable {
            return NodeAnalysis {
                analysis,
                role: FileRole::Other,
                locals: Vec::new(),
                externals: Vec::new(),
            };
        }

        let mut locals: Vec<PathBuf> = Vec::new();
        let mut externals: Vec<String> = Vec::new();
        for reference in &analysis.imports.references {
            match self.resolver.resolve_reference(reference, path) {
                Resolution::Local(target) => {
                    if self.is_excluded(&target) {
                        tracing::debug!("excluded {}", target.display());
                    } else if !locals.contains(&target) {
                        locals.push(target);
                    }
                }
                Resolution::External => {
                    // Unresolved relative imports are not packages
                    if !reference.is_relative() {
                        externals.push(reference.top_level().to_string());
                    }
                }
            }
        }

        NodeAnalysis {
            role: classify(path, &self.project_root),
            analysis,
            locals,
            externals,
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.project_root).unwrap_or(path);
        self.excludes
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }

    /// Depth-first placement over the discovered files
    fn place(
        &self,
        roots: &[PathBuf],
        order: &[PathBuf],
        depths: &DashMap<PathBuf, usize>,
        analyses: &DashMap<PathBuf, Arc<NodeAnalysis>>,
    ) -> ImportTree {
        let mut tree = ImportTree::new(&self.project_root, self.config.max_depth);

        for path in order {
            let depth = depths.get(path).map(|d| *d).unwrap_or(0);
            let node = match analyses.get(path) {
                Some(entry) => to_file_node(entry.value(), depth),
                None => FileNode::new(path.clone(), FileRole::Other, Default::default(), depth),
            };
            tree.insert(node);
        }

        let mut placed: HashSet<NodeId> = HashSet::new();
        let root_ids: Vec<NodeId> = roots.iter().filter_map(|r| tree.id_of(r)).collect();
        for id in &root_ids {
            tree.push_root(*id);
            placed.insert(*id);
        }
        for id in root_ids {
            self.attach_children(&mut tree, id, analyses, &mut placed);
        }

        tree
    }

    fn attach_children(
        &self,
        tree: &mut ImportTree,
        id: NodeId,
        analyses: &DashMap<PathBuf, Arc<NodeAnalysis>>,
        placed: &mut HashSet<NodeId>,
    ) {
        let depth = tree.node(id).depth;
        if depth > self.config.max_depth {
            return;
        }

        let Some(node) = analyses.get(&tree.node(id).path).map(|n| Arc::clone(n.value())) else {
            return;
        };

        for local in &node.locals {
            let Some(child) = tree.id_of(local) else {
                continue;
            };

            let owned = child != id && !placed.contains(&child) && tree.node(child).depth == depth + 1;
            if owned {
                placed.insert(child);
                tree.push_child(id, Child::Owned(child));
                self.attach_children(tree, child, analyses, placed);
            } else {
                tree.push_child(id, Child::BackRef(child));
            }
        }
    }
}

fn to_file_node(node: &NodeAnalysis, depth: usize) -> FileNode {
    let mut file = FileNode::new(node.analysis.path.clone(), node.role, node.analysis.metrics, depth);
    file.readable = node.analysis.readable;
    file.import_statements = node.analysis.imports.statements.clone();
    file.external_imports = node.externals.clone();
    file
}

/// Check that an entry exists and is a Python file; returns its canonical path
pub fn validate_entry(path: &Path) -> Result<PathBuf> {
    if !path.exists() || path.is_dir() {
        return Err(PyDepTreeError::InvalidEntry {
            path: path.to_path_buf(),
        });
    }
    if path.extension().and_then(|e| e.to_str()) != Some("py") {
        return Err(PyDepTreeError::NotPythonFile {
            path: path.to_path_buf(),
        });
    }
    path.canonicalize().map_err(|_| PyDepTreeError::InvalidEntry {
        path: path.to_path_buf(),
    })
}

/// Build an import tree without linting, using default exclusions
pub fn build_graph(entries: &[PathBuf], project_root: &Path, max_depth: usize) -> Result<ImportTree> {
    let config = GraphBuilderConfig {
        max_depth,
        ..GraphBuilderConfig::default()
    };
    GraphBuilder::new(project_root, config, Arc::new(NoLint))?.build(entries)
}
