//! The static registry of pre-commit hooks.
//!
//! Every hook carries:
//! - a YAML snippet template for `.pre-commit-config.yaml` with the pinned
//!   upstream revision substituted in,
//! - an optional standalone configuration file (name plus contents),
//! - an inclusion policy (`RuleType`).

/// Inclusion policy for a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// Always included; projects cannot disable it.
    Mandatory,
    /// Excluded unless a project explicitly enables it.
    OptIn,
    /// Included unless a project explicitly disables it.
    OptOut,
}

impl RuleType {
    /// Human readable policy label, used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            RuleType::Mandatory => "mandatory",
            RuleType::OptIn => "opt-in",
            RuleType::OptOut => "opt-out",
        }
    }
}

/// A standalone configuration file contributed by a hook.
///
/// Name and contents always come in pairs, so a hook either has a complete
/// config file or none at all.
#[derive(Debug, Clone, Copy)]
pub struct ConfigFile {
    /// File name relative to the destination directory, e.g. `.flake8`.
    pub name: &'static str,
    /// Full file contents.
    pub contents: &'static str,
}

/// Metadata for a single pre-commit hook.
#[derive(Debug, Clone, Copy)]
pub struct HookMetadata {
    /// The hook name, as used in CLI flags and the settings file.
    pub name: &'static str,
    /// Pinned upstream revision, substituted into `snippet`.
    pub rev: &'static str,
    /// YAML fragment template for `.pre-commit-config.yaml`. Starts and ends
    /// with a newline so fragments concatenate after `repos:` into valid YAML.
    pub snippet: &'static str,
    /// The hook's standalone configuration file, if it has one.
    pub config: Option<ConfigFile>,
    /// Inclusion policy.
    pub rule_type: RuleType,
}

impl HookMetadata {
    /// The `.pre-commit-config.yaml` fragment with the revision filled in.
    pub fn rendered_snippet(&self) -> String {
        self.snippet.replace("{rev}", self.rev)
    }
}

/// The name of the aggregate hook providing the `check-yaml` and `check-xml`
/// checks. It is represented in the settings file by those two check names
/// rather than by its own name.
pub const AGGREGATE_HOOK_NAME: &str = "pre-commit-hooks";

/// Settings file keys contributed by [`AGGREGATE_HOOK_NAME`].
pub const AGGREGATE_CHECK_KEYS: [&str; 2] = ["check-yaml", "check-xml"];

// The registry, alphabetically sorted by hook name. Iteration order is relied
// on by the generator so that generated files are deterministic.
static REGISTRY: [HookMetadata; 9] = [
    HookMetadata {
        name: "black",
        rev: "23.10.1",
        snippet: "
  - repo: https://github.com/psf/black
    rev: {rev}
    hooks:
      - id: black
",
        config: None,
        rule_type: RuleType::Mandatory,
    },
    HookMetadata {
        name: "clang-format",
        rev: "v17.0.3",
        snippet: "
  - repo: https://github.com/pre-commit/mirrors-clang-format
    rev: {rev}
    hooks:
      - id: clang-format
",
        config: Some(ConfigFile {
            name: ".clang-format",
            contents: "Language: Cpp
BasedOnStyle: Google
ColumnLimit: 110
IndentWidth: 4
AccessModifierOffset: -4
SortIncludes: false
ConstructorInitializerIndentWidth: 8
ContinuationIndentWidth: 8
",
        }),
        rule_type: RuleType::OptIn,
    },
    HookMetadata {
        name: "flake8",
        rev: "6.1.0",
        snippet: "
  - repo: https://github.com/pycqa/flake8
    rev: {rev}
    hooks:
      - id: flake8
",
        config: Some(ConfigFile {
            name: ".flake8",
            contents: "[flake8]
extend-ignore = E133, E203, E226, E228, N802, N803, N806, N812, N813, N815, N816, W503
max-line-length = 110
max-doc-length = 79
exclude = __init__.py
",
        }),
        rule_type: RuleType::Mandatory,
    },
    HookMetadata {
        name: "format-xmllint",
        rev: "v1.0.0",
        snippet: "
  - repo: https://github.com/example-org/pre-commit-xmllint
    rev: {rev}
    hooks:
      - id: format-xmllint
",
        config: None,
        rule_type: RuleType::OptIn,
    },
    HookMetadata {
        name: "isort",
        rev: "5.12.0",
        snippet: "
  - repo: https://github.com/pycqa/isort
    rev: {rev}
    hooks:
      - id: isort
        name: isort (python)
",
        config: Some(ConfigFile {
            name: ".isort.cfg",
            contents: "[settings]
profile=black
",
        }),
        rule_type: RuleType::Mandatory,
    },
    HookMetadata {
        name: "mypy",
        rev: "v1.6.1",
        snippet: "
  - repo: https://github.com/pre-commit/mirrors-mypy
    rev: {rev}
    hooks:
      - id: mypy
        additional_dependencies: [types-PyYAML==6]
",
        config: Some(ConfigFile {
            name: ".mypy.ini",
            contents: "[mypy]
disallow_untyped_defs = True
ignore_missing_imports = True
exclude = version.py
",
        }),
        rule_type: RuleType::OptOut,
    },
    HookMetadata {
        name: "pre-commit-hooks",
        rev: "v4.5.0",
        snippet: "
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: {rev}
    hooks:
      - id: check-yaml
        exclude: conda/meta.yaml
      - id: check-xml
",
        config: None,
        rule_type: RuleType::Mandatory,
    },
    HookMetadata {
        name: "ruff",
        rev: "v0.1.2",
        snippet: "
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: {rev}
    hooks:
      - id: ruff
",
        config: Some(ConfigFile {
            name: ".ruff.toml",
            contents: "ignore = [
  \"E203\", \"E226\", \"E228\", \"E999\", \"N802\", \"N803\", \"N806\", \"N812\", \"N813\", \"N815\", \"N816\"
]
line-length = 110
exclude = [\"__init__.py\"]
select = [\"E\", \"F\", \"N\", \"W\"]
[pycodestyle]
max-doc-length = 79
[pydocstyle]
convention = \"numpy\"
",
        }),
        rule_type: RuleType::OptIn,
    },
    HookMetadata {
        name: "towncrier",
        rev: "23.10.0",
        snippet: "
  - repo: https://github.com/twisted/towncrier
    rev: {rev}
    hooks:
      - id: towncrier-check
",
        config: Some(ConfigFile {
            name: "towncrier.toml",
            contents: "[tool.towncrier]
package_dir = \"python\"
filename = \"doc/version_history.rst\"
directory = \"doc/news\"
filename_format = \"{name}.{type}.rst|{name}.{type}.md\"
title_format = \"{version} ({project_date})\"
issue_format = \"`{issue} <https://jira.example.org/browse/{issue}>`_\"

[[tool.towncrier.type]]
    directory = \"feature\"
    name = \"New Features\"
    showcontent = true

[[tool.towncrier.type]]
    directory = \"bugfix\"
    name = \"Bug Fixes\"
    showcontent = true

[[tool.towncrier.type]]
    directory = \"perf\"
    name = \"Performance Enhancement\"
    showcontent = true

[[tool.towncrier.type]]
    directory = \"doc\"
    name = \"Documentation\"
    showcontent = true

[[tool.towncrier.type]]
    directory = \"removal\"
    name = \"API Removal or Deprecation\"
    showcontent = true

[[tool.towncrier.type]]
    directory = \"misc\"
    name = \"Other Changes and Additions\"
    showcontent = true
",
        }),
        rule_type: RuleType::OptIn,
    },
];

/// All managed hooks, alphabetically sorted by name.
pub fn registry() -> &'static [HookMetadata] {
    &REGISTRY
}

/// Look up a hook by name.
pub fn lookup(name: &str) -> Option<&'static HookMetadata> {
    REGISTRY.iter().find(|hook| hook.name == name)
}
