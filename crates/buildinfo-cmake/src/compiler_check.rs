//! Compiler compatibility decision table.
//!
//! The generated CMake evaluates this table at configure time; this module
//! evaluates the same rules in Rust so they can be checked ahead of a build.

use buildinfo_model::{CompilerExpectation, CompilerVendor};
use miette::Diagnostic;
use thiserror::Error;

/// Declared Visual Studio version to the required `MSVC` major version.
///
/// Declared versions missing from this table are not version-checked and
/// report [`CompilerCheck::VersionUnmapped`].
pub const MSVC_VERSIONS: &[(&str, &str)] = &[
    ("14", "19"),
    ("12", "18"),
    ("11", "17"),
    ("10", "16"),
    ("9", "15"),
    ("8", "14"),
    ("7", "13"),
    ("6", "12"),
];

/// Compiler as detected by CMake (`CMAKE_CXX_COMPILER_ID` and friends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCompiler {
    /// `CMAKE_CXX_COMPILER_ID`, e.g. `GNU`, `MSVC`, `AppleClang`.
    pub id: String,
    /// `CMAKE_CXX_COMPILER_VERSION`, e.g. `7.3.0`, `19.0.24215.1`.
    pub version: String,
    /// Whether the host is an Apple platform.
    pub apple: bool,
}

impl DetectedCompiler {
    /// Create a detected compiler on a non-Apple host.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            apple: false,
        }
    }

    /// Mark the host as Apple.
    pub fn on_apple(mut self, apple: bool) -> Self {
        self.apple = apple;
        self
    }

    /// Split the version into its first two dot-separated components.
    pub fn major_minor(&self) -> (&str, &str) {
        let mut parts = self.version.split('.');
        let major = parts.next().unwrap_or("");
        let minor = parts.next().unwrap_or("");
        (major, minor)
    }

    /// `major.minor` as reported in mismatch messages, or just `major` when
    /// the detected version has a single component.
    pub fn short_version(&self) -> String {
        match self.major_minor() {
            (major, "") => major.to_string(),
            (major, minor) => format!("{}.{}", major, minor),
        }
    }

    /// Detected compiler family.
    pub fn family(&self) -> CompilerFamily {
        CompilerFamily::from_cmake_id(&self.id)
    }
}

/// Vendor grouping that selects the version comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerFamily {
    Msvc,
    Gnu,
    Clang,
    Other,
}

impl CompilerFamily {
    /// Classify a `CMAKE_CXX_COMPILER_ID`.
    pub fn from_cmake_id(id: &str) -> Self {
        match id {
            "MSVC" => CompilerFamily::Msvc,
            "GNU" => CompilerFamily::Gnu,
            id if id.contains("Clang") => CompilerFamily::Clang,
            _ => CompilerFamily::Other,
        }
    }
}

/// Successful outcome of [`check_compiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerCheck {
    /// Vendor matched and the version rule passed.
    Verified,
    /// No compiler was declared, or the detected compiler has no version
    /// rule; only a notice is printed.
    VersionSkipped,
    /// MSVC was detected but the declared Visual Studio version is missing
    /// from [`MSVC_VERSIONS`], so the version was not compared.
    VersionUnmapped,
}

/// Which rule rejected the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    Vendor,
    Version,
}

/// The declared compiler is not the one the build system detected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(buildinfo::compiler_mismatch),
    help(
        "packages must be built with the compiler used to consume them; \
         reinstall them for '{detected_id}' or select the declared compiler"
    )
)]
pub struct CompilerMismatch {
    pub message: String,
    pub kind: MismatchKind,
    pub declared_vendor: String,
    pub declared_version: String,
    pub detected_id: String,
    pub detected_version: String,
}

impl CompilerMismatch {
    fn new(
        kind: MismatchKind,
        declared: &CompilerExpectation,
        detected: &DetectedCompiler,
    ) -> Self {
        let detected_version = detected.short_version();

        let message = match kind {
            MismatchKind::Vendor => format!(
                "Incorrect '{}', is not the one detected by CMake: '{}'",
                declared.vendor, detected.id
            ),
            MismatchKind::Version => format!(
                "Incorrect '{}' version 'compiler.version={}' \
                 is not the one detected by CMake: '{}={}'",
                declared.vendor, declared.version, detected.id, detected_version
            ),
        };

        Self {
            message,
            kind,
            declared_vendor: declared.vendor.to_string(),
            declared_version: declared.version.clone(),
            detected_id: detected.id.clone(),
            detected_version,
        }
    }
}

/// Decide whether `detected` satisfies `declared`.
///
/// Nothing is checked when no compiler was declared.
pub fn check_compiler(
    declared: Option<&CompilerExpectation>,
    detected: &DetectedCompiler,
) -> Result<CompilerCheck, CompilerMismatch> {
    let Some(declared) = declared else {
        tracing::info!("Skipping compiler checking, no compiler declared...");
        return Ok(CompilerCheck::VersionSkipped);
    };

    let family = detected.family();

    let vendor_matches = match &declared.vendor {
        CompilerVendor::VisualStudio => family == CompilerFamily::Msvc,
        CompilerVendor::Gcc => family == CompilerFamily::Gnu,
        CompilerVendor::AppleClang => detected.apple && family == CompilerFamily::Clang,
        CompilerVendor::Clang => family == CompilerFamily::Clang,
        CompilerVendor::Other(_) => true,
    };

    if !vendor_matches {
        tracing::debug!(
            declared = %declared.vendor,
            detected = %detected.id,
            "compiler vendor mismatch"
        );
        return Err(CompilerMismatch::new(MismatchKind::Vendor, declared, detected));
    }

    let (major, minor) = detected.major_minor();

    match family {
        CompilerFamily::Msvc => {
            let required = MSVC_VERSIONS
                .iter()
                .find(|(code, _)| *code == declared.version)
                .map(|(_, required)| *required);

            match required {
                Some(required) if required != major => Err(CompilerMismatch::new(
                    MismatchKind::Version,
                    declared,
                    detected,
                )),
                Some(_) => Ok(CompilerCheck::Verified),
                None => {
                    tracing::info!(
                        version = %declared.version,
                        "no MSVC version mapping, version not checked"
                    );
                    Ok(CompilerCheck::VersionUnmapped)
                }
            }
        }
        CompilerFamily::Gnu | CompilerFamily::Clang => {
            if format!("{}.{}", major, minor) == declared.version {
                Ok(CompilerCheck::Verified)
            } else {
                Err(CompilerMismatch::new(MismatchKind::Version, declared, detected))
            }
        }
        CompilerFamily::Other => {
            tracing::info!("Skipping version checking of not detected compiler...");
            Ok(CompilerCheck::VersionSkipped)
        }
    }
}
