use crate::error::Result;
use crate::generate;
use crate::install;
use crate::pyproject;
use crate::settings::{self, Selection, SettingsFile};
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

/// CLI tool that generates pre-commit and linter configuration files.
///
/// Existing configuration files are never deleted; remove stale ones
/// manually if necessary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the pre-commit configuration and hook config files
    Generate(GenerateArgs),

    /// Merge tool configuration tables into an existing pyproject.toml
    Pyproject(PyprojectArgs),
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Create the settings file (default: false, meaning an existing
    /// settings file is required)
    #[arg(long)]
    pub create: bool,

    /// Overwrite existing hook configuration files (default: false, meaning
    /// existing files are not overwritten)
    #[arg(long)]
    pub overwrite: bool,

    /// The destination directory to install the configuration files into.
    /// Intended to be used by scripts that update more than one project at
    /// a time
    #[arg(long, default_value = ".")]
    pub dest: PathBuf,

    /// Skip running 'pre-commit install'. This should only be done in CI
    #[arg(long)]
    pub skip_install: bool,

    /// Exclude mypy from the pre-commit configuration. Requires --create
    #[arg(long, requires = "create")]
    pub no_mypy: bool,

    /// Include clang-format in the pre-commit configuration
    #[arg(long)]
    pub with_clang_format: bool,

    /// Include format-xmllint in the pre-commit configuration
    #[arg(long)]
    pub with_format_xmllint: bool,

    /// Include ruff in the pre-commit configuration
    #[arg(long)]
    pub with_ruff: bool,

    /// Include towncrier in the pre-commit configuration
    #[arg(long)]
    pub with_towncrier: bool,
}

impl GenerateArgs {
    /// The hook selection expressed by the flags alone.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        selection.set_enabled_by_name("mypy", !self.no_mypy);
        selection.set_enabled_by_name("clang-format", self.with_clang_format);
        selection.set_enabled_by_name("format-xmllint", self.with_format_xmllint);
        selection.set_enabled_by_name("ruff", self.with_ruff);
        selection.set_enabled_by_name("towncrier", self.with_towncrier);
        selection
    }
}

#[derive(Args, Debug)]
pub struct PyprojectArgs {
    /// Add a mypy section to pyproject.toml and the pre-commit config
    #[arg(long)]
    pub mypy: bool,

    /// Add a pyproject-flake8 section to pyproject.toml and the pre-commit
    /// config
    #[arg(long)]
    pub pflake8: bool,

    /// The destination directory
    #[arg(long, default_value = ".")]
    pub dest: PathBuf,
}

/// CLI application
pub struct App {
    /// Whether a user is attached who can answer prompts.
    interactive: bool,
}

impl App {
    /// Create a new CLI application
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    #[cfg(test)]
    fn non_interactive() -> Self {
        Self { interactive: false }
    }

    /// Run the selected command
    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Generate(args) => self.generate(args).await,
            Commands::Pyproject(args) => pyproject::run(&args.dest, args.mypy, args.pflake8),
        }
    }

    /// Run the generate pipeline: settings file, pre-commit configuration,
    /// hook config files, .gitignore, `pre-commit install`.
    async fn generate(&self, args: GenerateArgs) -> Result<()> {
        let mut selection = args.selection();

        settings::ensure_settings_file(&args.dest, args.create, self.interactive, &selection)?;
        let settings_file = SettingsFile::load(&args.dest)?;
        settings_file.validate()?;
        settings_file.apply(&mut selection);
        info!(
            "Active hooks: {:?}",
            selection.active_hooks().map(|h| h.name).collect::<Vec<_>>()
        );

        generate::write_pre_commit_config(&args.dest, &selection, args.overwrite)?;
        generate::write_hook_configs(&args.dest, &selection, args.overwrite)?;
        generate::update_gitignore(&args.dest, &selection)?;
        install::run_pre_commit_install(&args.dest, args.skip_install).await?;

        println!("{}", generate::summary_table(&selection));
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::generate::{DOT_GITIGNORE, PRE_COMMIT_CONFIG_FILE_NAME};
    use crate::hooks::lookup;
    use crate::settings::{settings_path, SETTINGS_FILE_NAME};
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> clap::error::Result<Cli> {
        Cli::try_parse_from(std::iter::once("precommit-gen").chain(args.iter().copied()))
    }

    fn generate_args(dir: &std::path::Path, extra: &[&str]) -> GenerateArgs {
        let dest = dir.to_string_lossy().into_owned();
        let mut argv = vec!["generate", "--skip-install", "--dest", dest.as_str()];
        argv.extend(extra.iter().copied());
        match parse(&argv).unwrap().command {
            Commands::Generate(args) => args,
            other => panic!("Expected generate command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let args = generate_args(std::path::Path::new("."), &[]);
        assert!(!args.create);
        assert!(!args.overwrite);
        assert!(!args.no_mypy);
        assert_eq!(args.dest, PathBuf::from("."));
    }

    #[test]
    fn test_no_mypy_requires_create() {
        assert!(parse(&["generate", "--no-mypy"]).is_err());
        assert!(parse(&["generate", "--no-mypy", "--create"]).is_ok());
    }

    #[test]
    fn test_selection_from_flags() {
        let args = generate_args(std::path::Path::new("."), &["--create", "--no-mypy", "--with-ruff"]);
        let selection = args.selection();
        assert!(!selection.is_active(lookup("mypy").unwrap()));
        assert!(selection.is_active(lookup("ruff").unwrap()));
        assert!(!selection.is_active(lookup("towncrier").unwrap()));
    }

    #[test]
    fn test_parse_pyproject_flags() {
        let cli = parse(&["pyproject", "--mypy"]).unwrap();
        match cli.command {
            Commands::Pyproject(args) => {
                assert!(args.mypy);
                assert!(!args.pflake8);
                assert_eq!(args.dest, PathBuf::from("."));
            },
            other => panic!("Expected pyproject command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_pipeline_with_create() {
        let dir = tempdir().unwrap();
        let args = generate_args(dir.path(), &["--create", "--no-mypy", "--with-ruff"]);
        App::non_interactive().generate(args).await.unwrap();

        assert!(settings_path(dir.path()).exists());
        let config = fs::read_to_string(dir.path().join(PRE_COMMIT_CONFIG_FILE_NAME)).unwrap();
        assert!(!config.contains("mirrors-mypy"));
        assert!(config.contains("ruff-pre-commit"));
        assert!(dir.path().join(".ruff.toml").exists());
        assert!(!dir.path().join(".mypy.ini").exists());

        let gitignore = fs::read_to_string(dir.path().join(DOT_GITIGNORE)).unwrap();
        assert!(gitignore.contains(".ruff.toml"));
        assert!(!gitignore.contains(".mypy.ini"));
    }

    #[tokio::test]
    async fn test_generate_fails_without_settings_file() {
        let dir = tempdir().unwrap();
        let args = generate_args(dir.path(), &[]);
        let err = App::non_interactive().generate(args).await.unwrap_err();
        match err {
            AppError::Settings(message) => assert!(message.contains("copying and pasting")),
            other => panic!("Expected Settings error, got {other:?}"),
        }
        assert!(!dir.path().join(PRE_COMMIT_CONFIG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_generate_settings_override_flags() {
        let dir = tempdir().unwrap();
        // First run creates the settings file with mypy disabled.
        let args = generate_args(dir.path(), &["--create", "--no-mypy"]);
        App::non_interactive().generate(args).await.unwrap();

        // A later run without flags follows the recorded settings.
        fs::remove_file(dir.path().join(PRE_COMMIT_CONFIG_FILE_NAME)).unwrap();
        let args = generate_args(dir.path(), &[]);
        App::non_interactive().generate(args).await.unwrap();
        let config = fs::read_to_string(dir.path().join(PRE_COMMIT_CONFIG_FILE_NAME)).unwrap();
        assert!(!config.contains("mirrors-mypy"));
    }

    #[tokio::test]
    async fn test_generate_rejects_tampered_settings() {
        let dir = tempdir().unwrap();
        let args = generate_args(dir.path(), &["--create"]);
        App::non_interactive().generate(args).await.unwrap();

        let path = settings_path(dir.path());
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("unexpected: true\n");
        fs::write(&path, contents).unwrap();

        let args = generate_args(dir.path(), &[]);
        let err = App::non_interactive().generate(args).await.unwrap_err();
        match err {
            AppError::Settings(message) => assert!(message.contains("unexpected")),
            other => panic!("Expected Settings error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_create_twice_fails() {
        let dir = tempdir().unwrap();
        let args = generate_args(dir.path(), &["--create"]);
        App::non_interactive().generate(args).await.unwrap();

        let args = generate_args(dir.path(), &["--create"]);
        let err = App::non_interactive().generate(args).await.unwrap_err();
        match err {
            AppError::Cli(message) => {
                assert!(message.contains(SETTINGS_FILE_NAME));
                assert!(message.contains("already exists"));
            },
            other => panic!("Expected Cli error, got {other:?}"),
        }
    }
}
