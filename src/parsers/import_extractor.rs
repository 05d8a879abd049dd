//! Lexical import extraction for Python sources
//!
//! Only the two statement shapes below are recognized, and only when they
//! start in column 0:
//!
//! - `import X[.Y][ as Z][, W]`
//! - `from X[.Y] import A[, B]` (including relative `from .X import A`)
//!
//! Indented imports (inside `if`/`try`/function bodies), continuation lines,
//! and text inside triple-quoted strings are ignored. Each recognized
//! statement counts once towards [`ExtractedImports::statement_count`], no
//! matter how many names it imports.

use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^import\s+(.+)$").expect("valid import regex"));

static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from\s+(\.*)\s*([A-Za-z_][\w.]*)?\s+import\s+(.+)$").expect("valid from regex")
});

static DOTTED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_]\w*(\.[A-Za-z_]\w*)*$").expect("valid dotted name regex")
});

/// A name referenced by an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// Dotted module name as written (without leading dots)
    pub name: String,
    /// 1-based source line
    pub line: usize,
    /// Number of leading dots of a relative import (0 for absolute)
    pub level: usize,
}

impl ImportReference {
    /// Leading component of the dotted name
    pub fn top_level(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    /// Whether this came from a relative `from .x import y` statement
    pub fn is_relative(&self) -> bool {
        self.level > 0
    }
}

/// Result of scanning one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedImports {
    /// References in textual order, unique by top-level name
    pub references: Vec<ImportReference>,
    /// Number of recognized import statements
    pub statement_count: usize,
    /// Recognized statements as written, comments stripped
    pub statements: Vec<String>,
}

impl ExtractedImports {
    /// Whether no import statement was found
    pub fn is_empty(&self) -> bool {
        self.statement_count == 0
    }
}

/// Extract imports from Python source text
pub fn extract_imports(source: &str) -> ExtractedImports {
    let mut extracted = ExtractedImports::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut open_string: Option<&'static str> = None;
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;

        if open_string.is_some() {
            open_string = open_string_after(raw_line, open_string);
            continue;
        }

        let statement = strip_trailing(raw_line);
        let mut names: Vec<(String, usize)> = Vec::new();
        let mut recognized = false;

        if let Some(caps) = IMPORT_RE.captures(statement) {
            for part in caps[1].split(',') {
                if let Some(name) = imported_module(part) {
                    names.push((name.to_string(), 0));
                    recognized = true;
                }
            }
        } else if let Some(caps) = FROM_RE.captures(statement) {
            let level = caps.get(1).map_or(0, |m| m.as_str().len());
            match caps.get(2) {
                Some(module) if DOTTED_NAME_RE.is_match(module.as_str()) => {
                    names.push((module.as_str().to_string(), level));
                    recognized = true;
                }
                Some(_) => {}
                None if level > 0 => {
                    // `from . import a, b` names sibling modules directly
                    recognized = true;
                    let symbols = caps[3].trim_matches(|c| c == '(' || c == ')');
                    for part in symbols.split(',') {
                        if let Some(name) = imported_module(part) {
                            if !name.contains('.') {
                                names.push((name.to_string(), level));
                            }
                        }
                    }
                }
                None => {}
            }
        }

        if recognized {
            extracted.statement_count += 1;
            extracted.statements.push(statement.to_string());
            for (name, level) in names {
                let top = name.split('.').next().unwrap_or(&name).to_string();
                if seen.insert(top) {
                    extracted.references.push(ImportReference {
                        name,
                        line: line_no,
                        level,
                    });
                }
            }
            continue;
        }

        open_string = open_string_after(raw_line, None);
    }

    extracted
}

/// Extract imports from a file, yielding an empty result when it cannot be read
pub fn extract_from_file(path: &Path) -> ExtractedImports {
    match fs::read_to_string(path) {
        Ok(source) => extract_imports(&source),
        Err(err) => {
            tracing::debug!("cannot read {}: {}", path.display(), err);
            ExtractedImports::default()
        }
    }
}

/// Drop a trailing comment and anything after a statement separator
fn strip_trailing(line: &str) -> &str {
    let line = line.split('#').next().unwrap_or("");
    let line = line.split(';').next().unwrap_or("");
    line.trim_end()
}

/// Module name from one comma-separated segment, without any `as` alias
fn imported_module(segment: &str) -> Option<&str> {
    let name = segment.split_whitespace().next()?;
    if DOTTED_NAME_RE.is_match(name) {
        Some(name)
    } else {
        None
    }
}

const TRIPLE_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Triple-quote delimiter still open at the end of `line`
///
/// `open` is the delimiter left open by the previous line. Comments and
/// single-quoted strings are skipped so that a `"""` inside them does not
/// count.
fn open_string_after(line: &str, mut open: Option<&'static str>) -> Option<&'static str> {
    let bytes = line.as_bytes();
    let mut short_quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];
        if let Some(delim) = open {
            if rest[0] == b'\\' {
                i += 2;
            } else if rest.starts_with(delim.as_bytes()) {
                open = None;
                i += delim.len();
            } else {
                i += 1;
            }
            continue;
        }

        if let Some(quote) = short_quote {
            if rest[0] == b'\\' {
                i += 2;
                continue;
            }
            if rest[0] == quote {
                short_quote = None;
            }
            i += 1;
            continue;
        }

        match rest[0] {
            b'#' => break,
            b'"' | b'\'' => {
                match TRIPLE_QUOTES.iter().copied().find(|delim| rest.starts_with(delim.as_bytes())) {
                    Some(delim) => {
                        open = Some(delim);
                        i += delim.len();
                    }
                    None => {
                        short_quote = Some(rest[0]);
                        i += 1;
                    }
                }
            }
            _ => i += 1,
        }
    }

    open
}
