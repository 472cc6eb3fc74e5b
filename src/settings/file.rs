//! Reading, writing and validating the tool's settings file.
//!
//! The settings file is a flat YAML mapping of hook name to bool, stored in
//! the project being configured. The aggregate `pre-commit-hooks` hook is
//! represented by its two check names (`check-yaml`, `check-xml`) instead of
//! its own name.

use crate::error::{AppError, Result};
use crate::hooks::{registry, RuleType, AGGREGATE_CHECK_KEYS, AGGREGATE_HOOK_NAME};
use crate::settings::Selection;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The YAML file holding the per-project settings for this tool.
pub const SETTINGS_FILE_NAME: &str = ".precommit-gen.yaml";

/// The parsed settings file: hook name (or check name) to enabled flag.
/// `BTreeMap` keeps the keys sorted, which also fixes the on-disk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile(pub BTreeMap<String, bool>);

/// Path of the settings file inside the destination directory.
pub fn settings_path(dest: &Path) -> PathBuf {
    dest.join(SETTINGS_FILE_NAME)
}

impl SettingsFile {
    /// Build the settings contents reflecting a hook selection: mandatory
    /// hooks `true`, optional hooks according to the selection, and the two
    /// aggregate check keys always `true`.
    pub fn from_selection(selection: &Selection) -> Self {
        let mut map = BTreeMap::new();
        for hook in registry() {
            if hook.name == AGGREGATE_HOOK_NAME {
                for key in AGGREGATE_CHECK_KEYS {
                    map.insert(key.to_string(), true);
                }
            } else {
                map.insert(hook.name.to_string(), selection.is_active(hook));
            }
        }
        Self(map)
    }

    /// Load the settings file from the destination directory.
    pub fn load(dest: &Path) -> Result<Self> {
        let path = settings_path(dest);
        debug!("Loading settings file {}", path.display());
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Write the settings file into the destination directory.
    pub fn save(&self, dest: &Path) -> Result<()> {
        let path = settings_path(dest);
        fs::write(&path, serde_yaml::to_string(self)?)?;
        info!("Wrote settings file {}", path.display());
        Ok(())
    }

    /// Validate the settings contents against the registry.
    ///
    /// Fails with one combined message when mandatory hooks are missing or
    /// not set to `true`, or when unknown keys are present. The aggregate
    /// check keys are accepted but not otherwise validated.
    pub fn validate(&self) -> Result<()> {
        let mut allowed: Vec<&str> = Vec::new();
        let mut mandatory: Vec<&str> = Vec::new();
        for hook in registry() {
            if hook.name == AGGREGATE_HOOK_NAME {
                allowed.extend(AGGREGATE_CHECK_KEYS);
            } else {
                allowed.push(hook.name);
                if hook.rule_type == RuleType::Mandatory {
                    mandatory.push(hook.name);
                }
            }
        }

        let missing: Vec<&str> = mandatory
            .iter()
            .filter(|name| !self.0.contains_key(**name))
            .copied()
            .collect();
        let not_true: Vec<&str> = mandatory
            .iter()
            .filter(|name| self.0.get(**name) != Some(&true))
            .copied()
            .collect();
        let additional: Vec<&str> = self
            .0
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .map(String::as_str)
            .collect();

        let mut messages = Vec::new();
        if !missing.is_empty() {
            messages.push(format!(
                "The following pre-commit hooks are missing: {missing:?}"
            ));
        }
        if !not_true.is_empty() {
            messages.push(format!(
                "The following mandatory pre-commit hooks are not set to 'true': {not_true:?}"
            ));
        }
        if !additional.is_empty() {
            messages.push(format!(
                "Please remove the following additional lines: {additional:?}"
            ));
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::Settings(messages.join("\n")))
        }
    }

    /// Override a selection with the settings contents. Optional hooks
    /// missing from the file fall back to their default state (opt-out
    /// enabled, opt-in disabled), also when a CLI flag said otherwise.
    pub fn apply(&self, selection: &mut Selection) {
        for hook in registry() {
            let default = match hook.rule_type {
                RuleType::Mandatory => continue,
                RuleType::OptOut => true,
                RuleType::OptIn => false,
            };
            let enabled = self.0.get(hook.name).copied().unwrap_or(default);
            selection.set_enabled(hook, enabled);
        }
    }
}

/// Verify that the settings file exists, creating it or failing with
/// instructions depending on `create`.
///
/// - file exists and `create` was given: error, nothing is changed;
/// - file exists otherwise: no action;
/// - file missing and `create` was given: the file is written from the
///   selection;
/// - file missing otherwise: with `interactive` the user may confirm to
///   create it anyway; otherwise the error message contains the exact lines
///   to paste into a new settings file.
pub fn ensure_settings_file(
    dest: &Path,
    create: bool,
    interactive: bool,
    selection: &Selection,
) -> Result<()> {
    let path = settings_path(dest);
    if path.exists() {
        if create {
            return Err(AppError::Cli(format!(
                "Settings file {SETTINGS_FILE_NAME} already exists, no action performed."
            )));
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("No settings file {SETTINGS_FILE_NAME} found.").yellow()
    );
    if !create && !(interactive && confirm_create()?) {
        return Err(AppError::Settings(instructions(selection)?));
    }
    println!("{}", "Creating one now.".green());
    SettingsFile::from_selection(selection).save(dest)
}

/// Instructions for creating a settings file by hand, reflecting the
/// current selection.
pub fn instructions(selection: &Selection) -> Result<String> {
    let lines = serde_yaml::to_string(&SettingsFile::from_selection(selection))?;
    Ok(format!(
        "Create one by copying and pasting the following lines:\n\n{lines}"
    ))
}

/// Ask the user whether to create the missing settings file.
fn confirm_create() -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Create one now with the current flags?")
        .default(false)
        .interact()?)
}
