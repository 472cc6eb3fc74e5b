//! Writes the generated configuration files into the destination directory.

use crate::error::Result;
use crate::hooks::registry;
use crate::settings::Selection;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Table};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The YAML file holding the configurations for the pre-commit hooks.
pub const PRE_COMMIT_CONFIG_FILE_NAME: &str = ".pre-commit-config.yaml";

/// The Git ignore file.
pub const DOT_GITIGNORE: &str = ".gitignore";

/// Render the contents of `.pre-commit-config.yaml` for the given selection:
/// `repos:` followed by the snippet of every active hook in registry order.
pub fn render_pre_commit_config(selection: &Selection) -> String {
    let mut contents = String::from("repos:");
    for hook in selection.active_hooks() {
        contents.push_str(&hook.rendered_snippet());
    }
    contents
}

/// Write `.pre-commit-config.yaml` into the destination directory, honoring
/// the overwrite flag.
pub fn write_pre_commit_config(dest: &Path, selection: &Selection, overwrite: bool) -> Result<()> {
    let path = dest.join(PRE_COMMIT_CONFIG_FILE_NAME);
    write_guarded(&path, &render_pre_commit_config(selection), overwrite)?;
    Ok(())
}

/// Write the standalone config file of every active hook that has one,
/// honoring the overwrite flag.
pub fn write_hook_configs(dest: &Path, selection: &Selection, overwrite: bool) -> Result<()> {
    for (hook, config) in selection
        .active_hooks()
        .filter_map(|hook| hook.config.map(|config| (hook, config)))
    {
        debug!("Writing config file for hook {}", hook.name);
        write_guarded(&dest.join(config.name), config.contents, overwrite)?;
    }
    Ok(())
}

/// Write `contents` to `path` unless the file exists and overwriting was not
/// requested. Returns whether the file was written.
fn write_guarded(path: &Path, contents: &str, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        println!(
            "{}",
            format!("Not overwriting existing {}", path.display()).yellow()
        );
        return Ok(false);
    }
    let action = if path.exists() {
        "Overwriting existing"
    } else {
        "Creating"
    };
    println!("{}", format!("{action} {}.", path.display()).green());
    fs::write(path, contents)?;
    info!("{action} {}", path.display());
    Ok(true)
}

/// Update `.gitignore` in the destination directory so that it lists the
/// pre-commit configuration and the config files of the active hooks. The
/// file is created when missing; lines already present are not duplicated.
pub fn update_gitignore(dest: &Path, selection: &Selection) -> Result<()> {
    let mut entries = vec![PRE_COMMIT_CONFIG_FILE_NAME];
    entries.extend(
        selection
            .active_hooks()
            .filter_map(|hook| hook.config.map(|config| config.name)),
    );
    append_gitignore_entries(dest, &entries)
}

/// Append the given file names to `.gitignore`, creating it when missing and
/// skipping names already listed. Shared between the generate and pyproject
/// commands.
pub fn append_gitignore_entries(dest: &Path, entries: &[&str]) -> Result<()> {
    let path = dest.join(DOT_GITIGNORE);
    let existing = if path.exists() {
        fs::read_to_string(&path)?
    } else {
        String::new()
    };
    let mut present: BTreeSet<&str> = existing.lines().map(str::trim).collect();

    let mut contents = existing.clone();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    for entry in entries.iter().copied() {
        if present.insert(entry) {
            contents.push_str(entry);
            contents.push('\n');
        }
    }

    if contents != existing || !path.exists() {
        fs::write(&path, contents)?;
        info!("Updated {}", path.display());
    }
    Ok(())
}

/// A table summarizing every registered hook and whether it is active under
/// the given selection.
pub fn summary_table(selection: &Selection) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["hook", "policy", "active", "config file"]);
    for hook in registry() {
        table.add_row(vec![
            hook.name,
            hook.rule_type.label(),
            if selection.is_active(hook) { "yes" } else { "no" },
            hook.config.map(|config| config.name).unwrap_or("-"),
        ]);
    }
    table
}
