use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::answers::{AnswerSet, OptionalDependency};

pub const MANIFEST_FILE: &str = "package.json";

pub const SASS_VERSION: &str = "^1.83.1";
pub const CONCURRENTLY_VERSION: &str = "^9.1.2";
pub const BOOTSTRAP_ICONS_VERSION: &str = "^1.11.3";
pub const FLATICON_UICONS_VERSION: &str = "^3.3.1";

pub const SASS_SCRIPT: &str =
    "sass src/renderer/assets/sass:src/renderer/assets/css --style compressed";
pub const SASS_WATCH_SCRIPT: &str =
    "sass -w src/renderer/assets/sass:src/renderer/assets/css --style compressed";
pub const DEV_SCRIPT: &str =
    r#"concurrently --kill-others-on-fail "npm run sass:watch" "electron-vite dev""#;

const SCRIPTS: &str = "scripts";
const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

/// A `package.json` kept as an ordered JSON object. Fields are rewritten in
/// place, so keys the scaffolder never touches keep their value and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectManifest(Map<String, Value>);

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading manifest at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing manifest at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("manifest field '{0}' is not an object")]
    NotAnObject(&'static str),
    #[error("serializing manifest for {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("writing manifest to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectManifest {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    /// Overwrites the metadata fields, whatever the template held there, and
    /// merges in the entries the selected optional dependencies need.
    pub fn apply_answers(&mut self, answers: &AnswerSet) -> Result<(), ManifestError> {
        self.set_field("name", &answers.project_name);
        self.set_field("version", &answers.version);
        self.set_field("description", &answers.description);
        self.set_field("author", &answers.author);
        self.set_field("homepage", &answers.homepage);
        self.set_field("license", answers.license.as_str());

        for dependency in OptionalDependency::ALL {
            if answers.wants(dependency) {
                self.add_dependency(dependency)?;
            }
        }
        Ok(())
    }

    fn set_field(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
    }

    fn add_dependency(&mut self, dependency: OptionalDependency) -> Result<(), ManifestError> {
        match dependency {
            OptionalDependency::Sass => {
                let dev = self.section(DEV_DEPENDENCIES)?;
                set_entry(dev, "sass", SASS_VERSION);
                set_entry(dev, "concurrently", CONCURRENTLY_VERSION);

                let scripts = self.section(SCRIPTS)?;
                set_entry(scripts, "sass", SASS_SCRIPT);
                set_entry(scripts, "sass:watch", SASS_WATCH_SCRIPT);
                set_entry(scripts, "dev", DEV_SCRIPT);
            }
            OptionalDependency::BootstrapIcons => set_entry(
                self.section(DEPENDENCIES)?,
                dependency.package_name(),
                BOOTSTRAP_ICONS_VERSION,
            ),
            OptionalDependency::FlaticonUicons => set_entry(
                self.section(DEPENDENCIES)?,
                dependency.package_name(),
                FLATICON_UICONS_VERSION,
            ),
        }
        Ok(())
    }

    /// Nested string map such as `scripts`, created empty when absent.
    fn section(&mut self, key: &'static str) -> Result<&mut Map<String, Value>, ManifestError> {
        self.0
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or(ManifestError::NotAnObject(key))
    }

    /// Two-space indented JSON without a trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn set_entry(entries: &mut Map<String, Value>, key: &str, value: &str) {
    entries.insert(key.to_string(), Value::String(value.to_string()));
}

pub fn load_manifest(path: &Path) -> Result<ProjectManifest, ManifestError> {
    let data = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes to a sibling temp file first and renames it over `path`, so a
/// failed write never leaves a truncated manifest behind.
pub fn save_manifest(path: &Path, manifest: &ProjectManifest) -> Result<(), ManifestError> {
    let data = manifest.to_json().map_err(|source| ManifestError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, data).map_err(|source| ManifestError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}
