//! Module name resolution against the project tree

use crate::parsers::import_extractor::ImportReference;
use lru::LruCache;
use parking_lot::Mutex;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CACHE_CAPACITY: usize = 1024;

/// Outcome of resolving one import name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file inside the project (a module or a package's `__init__.py`)
    Local(PathBuf),
    /// Anything that is not found on disk next to the importer or under the root
    External,
}

impl Resolution {
    pub fn is_local(&self) -> bool {
        matches!(self, Resolution::Local(_))
    }
}

/// Resolves import names to files with a shared LRU cache
///
/// Lookups are keyed by (search directory, candidate name) so that the same
/// name imported from different directories is probed once per directory.
#[derive(Clone)]
pub struct ModuleResolver {
    project_root: PathBuf,
    cache: Arc<Mutex<LruCache<(PathBuf, String), Option<PathBuf>>>>,
}

impl ModuleResolver {
    /// Create a resolver anchored at the project root
    pub fn new(project_root: &Path) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            project_root: project_root.to_path_buf(),
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Project root this resolver searches
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a dotted module name imported by `importing_file`
    ///
    /// Only the top-level component is looked up. The importing file's
    /// directory is searched before the project root.
    pub fn resolve(&self, name: &str, importing_file: &Path) -> Resolution {
        let candidate = top_level(name);
        if !is_identifier(candidate) {
            return Resolution::External;
        }

        let importer_dir = importing_file.parent().unwrap_or(&self.project_root);
        for dir in self.search_dirs(importer_dir) {
            if let Some(path) = self.lookup(dir, candidate) {
                tracing::debug!("{} -> {}", name, path.display());
                return Resolution::Local(path);
            }
        }

        Resolution::External
    }

    /// Resolve an extracted reference, honoring relative-import levels
    ///
    /// `from .x import y` searches only the importer's package directory,
    /// `from ..x import y` its parent, and so on. Levels that climb above
    /// the project root resolve to nothing.
    pub fn resolve_reference(&self, reference: &ImportReference, importing_file: &Path) -> Resolution {
        if !reference.is_relative() {
            return self.resolve(&reference.name, importing_file);
        }

        let candidate = reference.top_level();
        if !is_identifier(candidate) {
            return Resolution::External;
        }

        let importer_dir = importing_file.parent();
        let mut base = importer_dir;
        for _ in 1..reference.level {
            base = base.and_then(Path::parent);
        }

        let base = base.filter(|dir| Some(*dir) == importer_dir || dir.starts_with(&self.project_root));
        match base.and_then(|dir| self.lookup(dir, candidate)) {
            Some(path) => Resolution::Local(path),
            None => Resolution::External,
        }
    }

    fn search_dirs<'a>(&'a self, importer_dir: &'a Path) -> Vec<&'a Path> {
        if importer_dir == self.project_root {
            vec![importer_dir]
        } else {
            vec![importer_dir, self.project_root.as_path()]
        }
    }

    /// Probe one directory for `candidate`, memoized
    fn lookup(&self, dir: &Path, candidate: &str) -> Option<PathBuf> {
        let key = (dir.to_path_buf(), candidate.to_string());
        if let Some(cached) = self.cache.lock().get(&key) {
            return cached.clone();
        }

        let found = probe_dir(dir, candidate);
        self.cache.lock().put(key, found.clone());
        found
    }

    /// Number of memoized lookups
    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }
}

/// Whether `name` resolves to a local module relative to `root` alone
pub fn is_project_module(name: &str, root: &Path) -> bool {
    let candidate = top_level(name);
    is_identifier(candidate) && probe_dir(root, candidate).is_some()
}

/// Package directory with `__init__.py` first, then `<candidate>.py`
fn probe_dir(dir: &Path, candidate: &str) -> Option<PathBuf> {
    let package_init = dir.join(candidate).join("__init__.py");
    if package_init.is_file() {
        return Some(package_init);
    }

    let module = dir.join(format!("{}.py", candidate));
    // symlink_metadata so that a dangling link still counts as present
    match fs::symlink_metadata(&module) {
        Ok(meta) if !meta.is_dir() => Some(module),
        _ => None,
    }
}

fn top_level(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Python identifier check (ASCII letters, digits, underscore; no leading digit)
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
