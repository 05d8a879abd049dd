//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use pydeptree::Result;

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// A small layered project
///
/// ```text
/// main.py               -> models, services, utils, config
/// models/__init__.py    -> utils
/// services/__init__.py  -> models
/// utils/__init__.py     -> (json only)
/// config.py
/// tests/test_api.py     -> services
/// ```
pub fn create_layered_project(root: &Path) -> Result<PathBuf> {
    let main = write_file(
        root,
        "main.py",
        "\"\"\"Application entry point.\"\"\"\n\
         import os\n\
         import sys\n\
         import requests\n\
         from models import User\n\
         from services import fetch\n\
         from utils import pretty\n\
         import config\n\
         \n\
         def run():\n\
         \x20   print(pretty(fetch(User())))\n",
    )?;
    write_file(root, "models/__init__.py", "from utils import pretty\n\nclass User:\n    pass\n")?;
    write_file(
        root,
        "services/__init__.py",
        "import requests\nfrom models import User\n\ndef fetch(user):\n    return user\n",
    )?;
    write_file(root, "utils/__init__.py", "import json\n\ndef pretty(value):\n    return json.dumps(value)\n")?;
    write_file(root, "config.py", "DEBUG = True\n")?;
    write_file(root, "tests/test_api.py", "from services import fetch\n")?;
    Ok(main)
}

/// Relative file names of a path list, for order-sensitive assertions
pub fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .collect()
}
