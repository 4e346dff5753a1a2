use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

pub const DEFAULT_PROJECT_NAME: &str = "electron-vite-project";
pub const DEFAULT_AUTHOR: &str = "anonymous";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "Electron-Vite application with Typescript";

/// Everything the operator told us about the new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    pub project_name: String,
    pub author: String,
    pub version: String,
    pub description: String,
    pub homepage: String,
    pub license: License,
    pub dependencies: BTreeSet<OptionalDependency>,
}

impl AnswerSet {
    pub fn dir_name(&self) -> String {
        dir_name_for(&self.project_name)
    }

    pub fn wants(&self, dependency: OptionalDependency) -> bool {
        self.dependencies.contains(&dependency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum License {
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    None,
}

impl License {
    pub const ALL: [License; 5] = [
        License::Mit,
        License::Apache2,
        License::Gpl3,
        License::Bsd3Clause,
        License::None,
    ];

    /// SPDX identifier written to `package.json`. `None` is written literally.
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Apache2 => "Apache-2.0",
            License::Gpl3 => "GPL-3.0",
            License::Bsd3Clause => "BSD-3-Clause",
            License::None => "None",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionalDependency {
    Sass,
    BootstrapIcons,
    FlaticonUicons,
}

impl OptionalDependency {
    pub const ALL: [OptionalDependency; 3] = [
        OptionalDependency::Sass,
        OptionalDependency::BootstrapIcons,
        OptionalDependency::FlaticonUicons,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OptionalDependency::Sass => "Sass",
            OptionalDependency::BootstrapIcons => "Bootstrap Icons",
            OptionalDependency::FlaticonUicons => "FlatIcon Uicons",
        }
    }

    pub fn package_name(&self) -> &'static str {
        match self {
            OptionalDependency::Sass => "sass",
            OptionalDependency::BootstrapIcons => "bootstrap-icons",
            OptionalDependency::FlaticonUicons => "@flaticon/flaticon-uicons",
        }
    }

    pub fn selected_by_default(&self) -> bool {
        matches!(self, OptionalDependency::Sass)
    }
}

/// Lower-cases `project_name` and replaces each run of whitespace with a
/// single `-`. Leading and trailing runs become hyphens too.
pub fn dir_name_for(project_name: &str) -> String {
    let mut out = String::with_capacity(project_name.len());
    let mut in_whitespace = false;
    for ch in project_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        out.extend(ch.to_lowercase());
    }
    out
}
