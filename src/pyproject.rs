//! Merges tool configuration tables into an existing `pyproject.toml`.
//!
//! Projects that keep their tool configuration in `pyproject.toml` instead
//! of standalone files use this command. It inserts the `isort` table (plus
//! `mypy` and `pyproject-flake8` tables on request) under `[tool]`, writes a
//! matching `.pre-commit-config.yaml` and `.flake8`, and records the
//! generated file names in `.gitignore`.

use crate::error::{AppError, Result};
use crate::generate::{append_gitignore_entries, DOT_GITIGNORE, PRE_COMMIT_CONFIG_FILE_NAME};
use crate::hooks::lookup;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The project manifest file this command modifies.
pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";

// Tool tables merged under `[tool]` in pyproject.toml.
const ISORT_TABLE: &str = "[isort]
profile = \"black\"
";

const MYPY_TABLE: &str = "[mypy]
disallow_untyped_defs = true
ignore_missing_imports = true
exclude = \"version.py\"
";

const PFLAKE8_TABLE: &str = "[flake8]
extend-ignore = \"E133, E203, E226, E228, N802, N803, N806, N812, N813, N815, N816, W503\"
max-line-length = 110
max-doc-length = 79
exclude = \"__init__.py\"
";

// pyproject-flake8 adds pyproject.toml support to flake8, so its hook
// replaces the plain flake8 one in this command's pre-commit config.
const PFLAKE8_SNIPPET: &str = "
  - repo: https://github.com/csachs/pyproject-flake8
    rev: v6.1.0
    hooks:
      - id: pyproject-flake8
";

/// Run the pyproject command: merge the tool tables, write the standalone
/// config files and update `.gitignore`.
pub fn run(dest: &Path, mypy: bool, pflake8: bool) -> Result<()> {
    let path = dest.join(PYPROJECT_FILE_NAME);
    if !path.exists() {
        return Err(AppError::Cli(format!(
            "No {PYPROJECT_FILE_NAME} found in {}.",
            dest.display()
        )));
    }
    info!("Modifying {}", path.display());

    let total = 4 + u64::from(mypy) + u64::from(pflake8);
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    bar.set_message(format!("modifying {PYPROJECT_FILE_NAME}"));

    let mut doc: toml::Table = fs::read_to_string(&path)?.parse()?;
    {
        let tool = doc
            .entry("tool")
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let tool = tool.as_table_mut().ok_or_else(|| {
            AppError::Cli(format!("'tool' in {PYPROJECT_FILE_NAME} is not a table."))
        })?;

        merge_fragment(tool, ISORT_TABLE)?;
        bar.inc(1);
        bar.set_message("added isort table");
        if mypy {
            merge_fragment(tool, MYPY_TABLE)?;
            bar.inc(1);
            bar.set_message("added mypy table");
        }
        if pflake8 {
            merge_fragment(tool, PFLAKE8_TABLE)?;
            bar.inc(1);
            bar.set_message("added flake8 table");
        }
    }
    fs::write(&path, toml::to_string_pretty(&doc)?)?;
    bar.inc(1);
    bar.set_message(format!("{PYPROJECT_FILE_NAME} modified"));

    let flake8 = lookup("flake8")
        .and_then(|hook| hook.config)
        .ok_or_else(|| AppError::Cli("The flake8 hook carries no config file.".to_string()))?;
    fs::write(dest.join(flake8.name), flake8.contents)?;
    fs::write(
        dest.join(PRE_COMMIT_CONFIG_FILE_NAME),
        render_pre_commit_config(mypy, pflake8),
    )?;
    bar.inc(1);
    bar.set_message("pre-commit config written");

    let mut entries = vec![PRE_COMMIT_CONFIG_FILE_NAME, flake8.name, ".isort.cfg"];
    if mypy {
        entries.push(".mypy.ini");
    }
    append_gitignore_entries(dest, &entries)?;
    bar.inc(1);
    bar.finish_with_message(format!("{DOT_GITIGNORE} updated"));
    Ok(())
}

/// Render the `.pre-commit-config.yaml` contents for the pyproject command:
/// the base hooks plus isort, and mypy/pyproject-flake8 on request.
fn render_pre_commit_config(mypy: bool, pflake8: bool) -> String {
    let mut contents = String::from("repos:");
    for name in ["black", "pre-commit-hooks", "isort"] {
        if let Some(hook) = lookup(name) {
            contents.push_str(&hook.rendered_snippet());
        }
    }
    if mypy {
        if let Some(hook) = lookup("mypy") {
            contents.push_str(&hook.rendered_snippet());
        }
    }
    if pflake8 {
        contents.push_str(PFLAKE8_SNIPPET);
    }
    contents
}

/// Merge a TOML fragment's top-level tables into the `[tool]` table,
/// replacing entries of the same name.
fn merge_fragment(tool: &mut toml::Table, fragment: &str) -> Result<()> {
    let fragment: toml::Table = fragment.parse()?;
    for (key, value) in fragment {
        debug!("Merging [tool.{key}]");
        tool.insert(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PYPROJECT: &str = "[project]
name = \"demo\"
version = \"1.2.3\"

[tool.black]
line-length = 110
";

    fn write_pyproject(dir: &Path) {
        fs::write(dir.join(PYPROJECT_FILE_NAME), PYPROJECT).unwrap();
    }

    fn load_pyproject(dir: &Path) -> toml::Table {
        fs::read_to_string(dir.join(PYPROJECT_FILE_NAME))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_run_requires_pyproject() {
        let dir = tempdir().unwrap();
        let err = run(dir.path(), false, false).unwrap_err();
        match err {
            AppError::Cli(message) => assert!(message.contains(PYPROJECT_FILE_NAME)),
            other => panic!("Expected Cli error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_merges_isort_and_keeps_existing_tables() {
        let dir = tempdir().unwrap();
        write_pyproject(dir.path());
        run(dir.path(), false, false).unwrap();

        let doc = load_pyproject(dir.path());
        let tool = doc["tool"].as_table().unwrap();
        assert_eq!(
            tool["isort"]["profile"].as_str(),
            Some("black"),
            "isort table must be merged"
        );
        assert_eq!(tool["black"]["line-length"].as_integer(), Some(110));
        assert_eq!(doc["project"]["name"].as_str(), Some("demo"));
        assert!(!tool.contains_key("mypy"));
        assert!(!tool.contains_key("flake8"));
    }

    #[test]
    fn test_run_with_mypy_and_pflake8() {
        let dir = tempdir().unwrap();
        write_pyproject(dir.path());
        run(dir.path(), true, true).unwrap();

        let doc = load_pyproject(dir.path());
        let tool = doc["tool"].as_table().unwrap();
        assert_eq!(
            tool["mypy"]["disallow_untyped_defs"].as_bool(),
            Some(true)
        );
        assert_eq!(
            tool["flake8"]["max-line-length"].as_integer(),
            Some(110)
        );
    }

    #[test]
    fn test_run_creates_tool_table_when_absent() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(PYPROJECT_FILE_NAME),
            "[project]\nname = \"demo\"\n",
        )
        .unwrap();
        run(dir.path(), false, false).unwrap();
        let doc = load_pyproject(dir.path());
        assert!(doc["tool"]["isort"].is_table());
    }

    #[test]
    fn test_run_writes_config_files() {
        let dir = tempdir().unwrap();
        write_pyproject(dir.path());
        run(dir.path(), false, false).unwrap();
        assert!(dir.path().join(".flake8").exists());
        let config = fs::read_to_string(dir.path().join(PRE_COMMIT_CONFIG_FILE_NAME)).unwrap();
        assert!(config.contains("https://github.com/psf/black"));
        assert!(config.contains("https://github.com/pycqa/isort"));
        assert!(!config.contains("mirrors-mypy"));
        assert!(!config.contains("pyproject-flake8"));
    }

    #[test]
    fn test_render_includes_optional_hooks() {
        let contents = render_pre_commit_config(true, true);
        assert!(contents.contains("mirrors-mypy"));
        assert!(contents.contains("pyproject-flake8"));
    }

    #[test]
    fn test_run_updates_gitignore() {
        let dir = tempdir().unwrap();
        write_pyproject(dir.path());
        run(dir.path(), true, false).unwrap();
        let gitignore = fs::read_to_string(dir.path().join(DOT_GITIGNORE)).unwrap();
        assert!(gitignore.contains(PRE_COMMIT_CONFIG_FILE_NAME));
        assert!(gitignore.contains(".flake8"));
        assert!(gitignore.contains(".isort.cfg"));
        assert!(gitignore.contains(".mypy.ini"));
    }

    #[test]
    fn test_run_without_mypy_skips_mypy_ini_entry() {
        let dir = tempdir().unwrap();
        write_pyproject(dir.path());
        run(dir.path(), false, false).unwrap();
        let gitignore = fs::read_to_string(dir.path().join(DOT_GITIGNORE)).unwrap();
        assert!(!gitignore.contains(".mypy.ini"));
    }
}
