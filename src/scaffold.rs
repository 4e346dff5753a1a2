use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::answers::AnswerSet;
use crate::manifest::{MANIFEST_FILE, ManifestError, load_manifest, save_manifest};
use crate::readme::{README_FILE, render_readme, write_readme};

/// Where the project gets created and what it gets created from.
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub base_dir: PathBuf,
    pub template_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestStatus {
    Updated,
    Missing,
}

#[derive(Debug)]
pub struct ScaffoldReport {
    pub dir_name: String,
    pub project_path: PathBuf,
    pub manifest: ManifestStatus,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("removing existing file {}", path.display())]
    RemoveFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("creating directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("walking template directory {}", path.display())]
    WalkTemplate {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("copying {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("writing {}", path.display())]
    WriteReadme {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Creates `<base_dir>/<dir_name>` from the template and rewrites its
/// manifest and README. Any failure aborts; nothing is rolled back.
pub fn apply(answers: &AnswerSet, ctx: &ScaffoldContext) -> Result<ScaffoldReport, ScaffoldError> {
    let dir_name = answers.dir_name();
    let project_path = ctx.base_dir.join(&dir_name);

    prepare_target(&project_path)?;
    copy_tree(&ctx.template_dir, &project_path)?;

    let manifest_path = project_path.join(MANIFEST_FILE);
    let (status, title, description) = if manifest_path.is_file() {
        let mut manifest = load_manifest(&manifest_path)?;
        manifest.apply_answers(answers)?;
        save_manifest(&manifest_path, &manifest)?;
        tracing::debug!(path = %manifest_path.display(), "manifest updated");
        (
            ManifestStatus::Updated,
            manifest.name().unwrap_or(&answers.project_name).to_string(),
            manifest
                .description()
                .unwrap_or(&answers.description)
                .to_string(),
        )
    } else {
        tracing::error!(
            path = %manifest_path.display(),
            "package.json file does not exist, skipping manifest update"
        );
        (
            ManifestStatus::Missing,
            answers.project_name.clone(),
            answers.description.clone(),
        )
    };

    write_readme(&project_path, &render_readme(&title, &description)).map_err(|source| {
        ScaffoldError::WriteReadme {
            path: project_path.join(README_FILE),
            source,
        }
    })?;

    Ok(ScaffoldReport {
        dir_name,
        project_path,
        manifest: status,
    })
}

/// A plain file in the way is removed; an existing directory is reused.
fn prepare_target(project_path: &Path) -> Result<(), ScaffoldError> {
    if project_path.exists() && !project_path.is_dir() {
        tracing::debug!(path = %project_path.display(), "removing file in place of project");
        fs::remove_file(project_path).map_err(|source| ScaffoldError::RemoveFile {
            path: project_path.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir_all(project_path).map_err(|source| ScaffoldError::CreateDir {
        path: project_path.to_path_buf(),
        source,
    })
}

/// Recursive copy that overwrites whatever is already at the destination.
fn copy_tree(from: &Path, to: &Path) -> Result<usize, ScaffoldError> {
    let mut copied = 0;

    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(|source| ScaffoldError::WalkTemplate {
            path: from.to_path_buf(),
            source,
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .expect("walkdir yields paths under its root");
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| ScaffoldError::CreateDir {
                path: target.clone(),
                source,
            })?;
            continue;
        }

        fs::copy(entry.path(), &target).map_err(|source| ScaffoldError::Copy {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source,
        })?;
        copied += 1;
    }

    tracing::debug!(files = copied, from = %from.display(), to = %to.display(), "template copied");
    Ok(copied)
}
