//! Command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::Args;
use crate::config::{create_default_config, load_config, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::graph_builder::{GraphBuilder, GraphBuilderConfig};
use crate::core::lint::{LintSource, NoLint, RuffLinter};
use crate::error::{ErrorSeverity, OptionExt, PyDepTreeError, Result};
use crate::models::config::{OutputFormat, Settings};
use crate::models::import_tree::ImportTree;
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the import tree of one or more entry files
    Analyze(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                let settings = load_config(CliArgs::from_args(args))?;
                tracing::debug!(?settings, "resolved settings");

                let reporter = Arc::new(ProgressReporter::new(progress_enabled(&settings), settings.quiet));
                let tree = analyze(&settings, &reporter)?;

                let output = create_formatter(&settings).format(&tree)?;
                let writer = create_writer(settings.output_file.as_ref());
                writer.write(&output)?;

                if settings.output_file.is_some() {
                    reporter.print_notice(&format!("Output written to {}", writer.destination()));
                }
                Ok(())
            }
            Command::Init => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if init_config(&config_path)? {
                    println!("Created default configuration file at: {}", config_path.display());
                    println!("Edit it to change the defaults for this project.");
                } else {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                }
                Ok(())
            }
        }
    }

    /// Run the command, report any error and return the exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                report_error(&err);
                exit_code(&err)
            }
        }
    }
}

/// Exit code for a failed run: 2 for critical errors, 1 otherwise
pub fn exit_code(err: &PyDepTreeError) -> i32 {
    match err.severity() {
        ErrorSeverity::Critical => 2,
        ErrorSeverity::Warning | ErrorSeverity::Error => 1,
    }
}

fn report_error(err: &PyDepTreeError) {
    eprintln!("Error: {}", err.user_message());

    let suggestion = match err {
        PyDepTreeError::NoEntry => Some("Pass a Python file, e.g. `pydeptree main.py`"),
        PyDepTreeError::NotPythonFile { .. } => Some("Entry files must end in .py"),
        PyDepTreeError::InvalidPath { .. } => Some("Check that the path exists and is a directory"),
        PyDepTreeError::ConfigNotFound { .. } => {
            Some("Create one with `pydeptree --init` or point --config at an existing file")
        }
        PyDepTreeError::PermissionDenied { .. } => Some("Check the file permissions"),
        _ => None,
    };
    if let Some(suggestion) = suggestion {
        eprintln!("Suggestion: {}", suggestion);
    }
}

fn progress_enabled(settings: &Settings) -> bool {
    // Machine-readable output on stdout is usually piped somewhere
    let machine_output_on_stdout =
        settings.output_format != OutputFormat::Text && settings.output_file.is_none();
    settings.show_progress && !settings.quiet && !machine_output_on_stdout
}

/// Project root from settings, or the directory of the first entry
pub fn resolve_project_root(settings: &Settings) -> Result<PathBuf> {
    if let Some(root) = &settings.project_root {
        return Ok(root.clone());
    }

    let first = settings.entries.first().ok_or_error(|| PyDepTreeError::NoEntry)?;
    match first.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(PathBuf::from(".")),
    }
}

/// Pick the lint collaborator for these settings
///
/// Falls back to `NoLint` with a notice when ruff is not installed.
pub fn select_linter(settings: &Settings, reporter: &ProgressReporter) -> Arc<dyn LintSource> {
    if !settings.check_lint {
        return Arc::new(NoLint);
    }

    let ruff = RuffLinter::new(Duration::from_secs(settings.lint_timeout_secs));
    if ruff.is_available() {
        Arc::new(ruff)
    } else {
        reporter.print_notice("ruff not found, lint checking disabled");
        Arc::new(NoLint)
    }
}

/// Build the import tree described by `settings`
pub fn analyze(settings: &Settings, reporter: &Arc<ProgressReporter>) -> Result<ImportTree> {
    if settings.entries.is_empty() {
        return Err(PyDepTreeError::NoEntry);
    }

    let project_root = resolve_project_root(settings)?;
    let lint = select_linter(settings, reporter);
    let config = GraphBuilderConfig {
        max_depth: settings.max_depth(),
        exclude_patterns: settings.exclude_patterns.clone(),
        parallel: settings.parallel,
        threads: Some(settings.thread_count()),
    };

    let builder = GraphBuilder::new(&project_root, config, lint)?
        .with_progress(create_progress_callback(Arc::clone(reporter)));

    reporter.start(&format!("Analyzing imports under {}", builder.project_root().display()));
    let result = builder.build(&settings.entries);
    reporter.finish();

    let tree = result?;
    tracing::debug!(
        files = tree.len(),
        back_references = tree.back_reference_count(),
        "import tree built"
    );
    Ok(tree)
}

/// Write the default configuration file unless one already exists
///
/// Returns `false` when the file was left untouched.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    create_default_config(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn settings_for(entries: Vec<PathBuf>) -> Settings {
        Settings {
            entries,
            check_lint: false,
            show_progress: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_args() {
        let args = Args::try_parse_from(["pydeptree", "--init"]).unwrap();
        assert!(matches!(Command::from_args(args), Command::Init));

        let args = Args::try_parse_from(["pydeptree", "main.py"]).unwrap();
        assert!(matches!(Command::from_args(args), Command::Analyze(_)));
    }

    #[test]
    fn test_resolve_project_root() {
        let settings = settings_for(vec![PathBuf::from("src/app/main.py")]);
        assert_eq!(resolve_project_root(&settings).unwrap(), PathBuf::from("src/app"));

        let settings = settings_for(vec![PathBuf::from("main.py")]);
        assert_eq!(resolve_project_root(&settings).unwrap(), PathBuf::from("."));

        let settings = Settings {
            project_root: Some(PathBuf::from("/srv/project")),
            ..settings_for(vec![PathBuf::from("main.py")])
        };
        assert_eq!(resolve_project_root(&settings).unwrap(), PathBuf::from("/srv/project"));

        assert!(matches!(
            resolve_project_root(&settings_for(vec![])),
            Err(PyDepTreeError::NoEntry)
        ));
    }

    #[test]
    fn test_analyze_uses_display_depth() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.py"), "import a\n").unwrap();
        fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("b.py"), "import c\n").unwrap();
        fs::write(dir.path().join("c.py"), "").unwrap();

        let reporter = Arc::new(ProgressReporter::hidden());
        let mut settings = settings_for(vec![dir.path().join("main.py")]);
        settings.depth = 1;
        let tree = analyze(&settings, &reporter).unwrap();
        // main and a only
        assert_eq!(tree.len(), 2);

        settings.depth = 2;
        let tree = analyze(&settings, &reporter).unwrap();
        assert_eq!(tree.len(), 3);
        assert!(reporter.files_analyzed() > 0);
    }

    #[test]
    fn test_analyze_without_entries() {
        let reporter = Arc::new(ProgressReporter::hidden());
        let result = analyze(&settings_for(vec![]), &reporter);
        assert!(matches!(result, Err(PyDepTreeError::NoEntry)));
    }

    #[test]
    fn test_select_linter_disabled() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("x.py");
        fs::write(&file, "import os\n").unwrap();

        let linter = select_linter(&settings_for(vec![]), &ProgressReporter::hidden());
        assert_eq!(linter.lint_counts(&file).total(), 0);
    }

    #[test]
    fn test_init_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        assert!(init_config(&path).unwrap());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("depth"));

        fs::write(&path, "depth = 7\n").unwrap();
        assert!(!init_config(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "depth = 7\n");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&PyDepTreeError::NoEntry), 1);
        assert_eq!(
            exit_code(&PyDepTreeError::InvalidEntry {
                path: PathBuf::from("missing.py")
            }),
            1
        );
        assert_eq!(
            exit_code(&PyDepTreeError::ConfigNotFound {
                path: PathBuf::from("x.toml")
            }),
            2
        );
    }
}
