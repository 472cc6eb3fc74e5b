//! Runs the external `pre-commit install` command.

use crate::error::{AppError, Result};
use colored::*;
use std::path::Path;
use tokio::process::Command;
use tracing::{error, info};

/// Run `pre-commit install` with the destination directory as working
/// directory, so that the hooks are installed into that project's Git
/// repository.
///
/// With `skip` the invocation is reported and skipped; this is meant for CI
/// environments where Git hooks are never executed.
pub async fn run_pre_commit_install(dest: &Path, skip: bool) -> Result<()> {
    if skip {
        println!("{}", "Not running 'pre-commit install'.".yellow());
        info!("Skipping 'pre-commit install'");
        return Ok(());
    }

    info!("Running 'pre-commit install' in {}", dest.display());
    let output = Command::new("pre-commit")
        .arg("install")
        .current_dir(dest)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::Install("could not find the pre-commit executable on PATH".to_string())
            } else {
                AppError::from(e)
            }
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if output.status.success() {
        if !stdout.is_empty() {
            println!("{stdout}");
        }
        info!("'pre-commit install' completed successfully");
        Ok(())
    } else {
        error!("'pre-commit install' failed with status {}", output.status);
        let message = if stdout.is_empty() { stderr } else { stdout };
        Err(AppError::Install(message))
    }
}
