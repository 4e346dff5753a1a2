use std::path::{Path, PathBuf};

use thiserror::Error;

pub const TEMPLATE_DIR: &str = "template";
const APP_DIR: &str = "create-electron-vite-app";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template directory {} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("could not locate the bundled template directory (searched: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Finds the template tree that ships with the tool. An explicit directory
/// wins and must exist; otherwise the install locations are probed in order.
pub fn resolve_template_dir(explicit: Option<&Path>) -> Result<PathBuf, TemplateError> {
    if let Some(dir) = explicit {
        if dir.is_dir() {
            return Ok(dir.to_path_buf());
        }
        return Err(TemplateError::Missing(dir.to_path_buf()));
    }

    let searched = candidate_dirs();
    for candidate in &searched {
        if candidate.is_dir() {
            tracing::debug!(path = %candidate.display(), "using template directory");
            return Ok(candidate.clone());
        }
        tracing::debug!(path = %candidate.display(), "template candidate not found");
    }

    Err(TemplateError::NotFound { searched })
}

fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(TEMPLATE_DIR));
        candidates.push(exe_dir.join("..").join("share").join(APP_DIR).join(TEMPLATE_DIR));
    }

    if let Some(data_dir) = dirs::data_dir() {
        candidates.push(data_dir.join(APP_DIR).join(TEMPLATE_DIR));
    }

    candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_DIR));
    candidates
}
