//! Build info input documents (`buildinfo.toml` / `buildinfo.json`).

use crate::info::{AggregateBuildInfo, DependencyBuildInfo};
use crate::settings::{CompilerExpectation, CompilerVendor, Settings};
use crate::{BuildError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Characters that would corrupt a CMake variable name.
const RESERVED_IDENTIFIER_CHARS: &[char] = &['"', '$', ';', '(', ')', '{', '}', '\\', '#'];

/// MSVC runtimes accepted for `settings.runtime`.
const RUNTIMES: &[&str] = &["MT", "MTd", "MD", "MDd"];

/// Root of an input document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfoFile {
    /// Compiler settings (optional).
    #[serde(default)]
    pub settings: Option<SettingsSection>,

    /// Resolved dependencies, in document order.
    #[serde(default)]
    pub dependencies: IndexMap<String, DependencyBuildInfo>,
}

/// `[settings]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsSection {
    /// Declared compiler vendor.
    #[serde(default)]
    pub compiler: Option<CompilerVendor>,

    /// Declared compiler version.
    #[serde(default)]
    pub compiler_version: Option<String>,

    /// MSVC runtime.
    #[serde(default)]
    pub runtime: Option<String>,
}

impl BuildInfoFile {
    /// Load an input document, choosing the format from the extension.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %path.display(), json = is_json, "loading build info");

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: BuildInfoFile = toml::from_str(content)?;
        Ok(file)
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: BuildInfoFile = serde_json::from_str(content)?;
        Ok(file)
    }

    /// Check the document before it reaches the renderer.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (name, dep) in &self.dependencies {
            validate_identifier(name)?;

            if !seen.insert(name.to_uppercase()) {
                return Err(BuildError::DuplicateDependency(name.clone()));
            }

            if dep.rootpath.is_empty() {
                return Err(BuildError::Validation(format!(
                    "dependency '{}' has no rootpath",
                    name
                )));
            }
            if dep.rootpath.contains('"') {
                return Err(BuildError::Validation(format!(
                    "dependency '{}' rootpath contains a double quote",
                    name
                )));
            }

            for (field, value) in dep.cpp_info.values() {
                if value.contains('"') {
                    return Err(BuildError::Validation(format!(
                        "dependency '{}' {} entry contains a double quote: {}",
                        name, field, value
                    )));
                }
            }
        }

        if let Some(settings) = &self.settings {
            settings.validate()?;
        }

        Ok(())
    }

    /// Validate and convert into the aggregate plus settings.
    pub fn into_build_info(self) -> Result<(AggregateBuildInfo, Settings)> {
        self.validate()?;

        let settings = match self.settings {
            Some(section) => section.into_settings(),
            None => Settings::default(),
        };
        let aggregate = AggregateBuildInfo::from_dependencies(self.dependencies);

        tracing::debug!(
            dependencies = aggregate.dependencies.len(),
            "loaded build info"
        );

        Ok((aggregate, settings))
    }
}

impl SettingsSection {
    fn validate(&self) -> Result<()> {
        match (&self.compiler, &self.compiler_version) {
            (Some(compiler), None) => {
                return Err(BuildError::Validation(format!(
                    "compiler '{}' declared without compiler_version",
                    compiler
                )));
            }
            (None, Some(version)) => {
                return Err(BuildError::Validation(format!(
                    "compiler_version '{}' declared without compiler",
                    version
                )));
            }
            _ => {}
        }

        if let Some(runtime) = &self.runtime {
            if !RUNTIMES.contains(&runtime.as_str()) {
                return Err(BuildError::Validation(format!(
                    "unknown runtime '{}', expected one of {}",
                    runtime,
                    RUNTIMES.join(", ")
                )));
            }
        }

        Ok(())
    }

    fn into_settings(self) -> Settings {
        let compiler = match (self.compiler, self.compiler_version) {
            (Some(vendor), Some(version)) => Some(CompilerExpectation::new(vendor, version)),
            _ => None,
        };

        Settings {
            compiler,
            runtime: self.runtime,
        }
    }
}

fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BuildError::Validation(
            "dependency identifier is empty".to_string(),
        ));
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || RESERVED_IDENTIFIER_CHARS.contains(&c))
    {
        return Err(BuildError::Validation(format!(
            "dependency identifier '{}' contains characters not allowed in a CMake variable name",
            name
        )));
    }

    Ok(())
}
