//! Declared compiler settings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Compiler vendor as declared in package settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompilerVendor {
    /// Microsoft Visual Studio (`"Visual Studio"`).
    VisualStudio,
    /// GNU compiler collection (`"gcc"`).
    Gcc,
    /// LLVM clang (`"clang"`).
    Clang,
    /// Apple's clang distribution (`"apple-clang"`).
    AppleClang,
    /// Any vendor outside the fixed table; the vendor rule accepts it.
    Other(String),
}

impl CompilerVendor {
    /// Map a declared name onto the fixed table, falling back to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Visual Studio" => CompilerVendor::VisualStudio,
            "gcc" => CompilerVendor::Gcc,
            "clang" => CompilerVendor::Clang,
            "apple-clang" => CompilerVendor::AppleClang,
            other => CompilerVendor::Other(other.to_string()),
        }
    }

    /// The declared name, as written in settings and emitted into CMake.
    pub fn as_str(&self) -> &str {
        match self {
            CompilerVendor::VisualStudio => "Visual Studio",
            CompilerVendor::Gcc => "gcc",
            CompilerVendor::Clang => "clang",
            CompilerVendor::AppleClang => "apple-clang",
            CompilerVendor::Other(name) => name,
        }
    }
}

impl fmt::Display for CompilerVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerVendor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl Serialize for CompilerVendor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CompilerVendor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// The compiler a package set was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerExpectation {
    /// Declared vendor.
    pub vendor: CompilerVendor,

    /// Declared version (e.g. `"7.3"` for gcc, `"14"` for Visual Studio).
    pub version: String,
}

impl CompilerExpectation {
    /// Create a new expectation.
    pub fn new(vendor: CompilerVendor, version: impl Into<String>) -> Self {
        Self {
            vendor,
            version: version.into(),
        }
    }
}

/// Settings baked into the generated artifact next to the dependency data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Expected compiler, checked by `conan_check_compiler()`.
    pub compiler: Option<CompilerExpectation>,

    /// MSVC runtime (`MT`, `MTd`, `MD`, `MDd`) replacing the default `/MD` flags.
    pub runtime: Option<String>,
}

impl Settings {
    /// Whether there is anything to emit.
    pub fn is_empty(&self) -> bool {
        self.compiler.is_none() && self.runtime.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_names() {
        for name in ["Visual Studio", "gcc", "clang", "apple-clang"] {
            let vendor: CompilerVendor = name.parse().unwrap();
            assert_eq!(vendor.to_string(), name);
            assert!(!matches!(vendor, CompilerVendor::Other(_)));
        }
    }

    #[test]
    fn test_unknown_vendor_is_other() {
        let vendor: CompilerVendor = "sun-cc".parse().unwrap();
        assert_eq!(vendor, CompilerVendor::Other("sun-cc".to_string()));
        assert_eq!(vendor.as_str(), "sun-cc");
    }

    #[test]
    fn test_vendor_deserialize() {
        let expectation: CompilerExpectation =
            serde_json::from_str(r#"{"vendor": "Visual Studio", "version": "14"}"#).unwrap();
        assert_eq!(expectation.vendor, CompilerVendor::VisualStudio);
        assert_eq!(expectation.version, "14");
    }

    #[test]
    fn test_settings_is_empty() {
        assert!(Settings::default().is_empty());

        let settings = Settings {
            compiler: None,
            runtime: Some("MT".to_string()),
        };
        assert!(!settings.is_empty());
    }
}
