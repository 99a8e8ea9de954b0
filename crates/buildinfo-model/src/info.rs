//! Per-dependency and aggregated build metadata.

use serde::{Deserialize, Serialize};

/// Build metadata shared by a single dependency and the aggregate.
///
/// Every field is ordered: include/lib/bin search order and link order are
/// significant, and duplicates are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CppInfo {
    /// Include directories.
    pub include_paths: Vec<String>,

    /// Library search paths.
    pub lib_paths: Vec<String>,

    /// Binary directories.
    pub bin_paths: Vec<String>,

    /// Libraries to link against, in link order.
    pub libs: Vec<String>,

    /// Preprocessor definitions (`NAME` or `NAME=VALUE`, no `-D`).
    pub defines: Vec<String>,

    /// C++ compiler flags.
    pub cppflags: Vec<String>,

    /// C compiler flags.
    pub cflags: Vec<String>,

    /// Shared library linker flags.
    pub sharedlinkflags: Vec<String>,

    /// Executable linker flags.
    pub exelinkflags: Vec<String>,
}

impl CppInfo {
    /// Append every field of `other` after the values already held.
    pub fn extend_from(&mut self, other: &CppInfo) {
        self.include_paths.extend(other.include_paths.iter().cloned());
        self.lib_paths.extend(other.lib_paths.iter().cloned());
        self.bin_paths.extend(other.bin_paths.iter().cloned());
        self.libs.extend(other.libs.iter().cloned());
        self.defines.extend(other.defines.iter().cloned());
        self.cppflags.extend(other.cppflags.iter().cloned());
        self.cflags.extend(other.cflags.iter().cloned());
        self.sharedlinkflags.extend(other.sharedlinkflags.iter().cloned());
        self.exelinkflags.extend(other.exelinkflags.iter().cloned());
    }

    /// Iterate over every string value held, tagged with its field name.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let fields: [(&'static str, &Vec<String>); 9] = [
            ("include_paths", &self.include_paths),
            ("lib_paths", &self.lib_paths),
            ("bin_paths", &self.bin_paths),
            ("libs", &self.libs),
            ("defines", &self.defines),
            ("cppflags", &self.cppflags),
            ("cflags", &self.cflags),
            ("sharedlinkflags", &self.sharedlinkflags),
            ("exelinkflags", &self.exelinkflags),
        ];

        fields
            .into_iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name, v.as_str())))
    }
}

/// Build metadata of one resolved dependency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyBuildInfo {
    /// Search paths, libraries, defines and flags.
    #[serde(flatten)]
    pub cpp_info: CppInfo,

    /// Install root of the dependency.
    #[serde(default)]
    pub rootpath: String,
}

impl DependencyBuildInfo {
    /// Create dependency metadata rooted at `rootpath`.
    pub fn new(rootpath: impl Into<String>) -> Self {
        Self {
            cpp_info: CppInfo::default(),
            rootpath: rootpath.into(),
        }
    }

    /// Set include directories.
    pub fn with_include_paths(mut self, paths: &[&str]) -> Self {
        self.cpp_info.include_paths = to_strings(paths);
        self
    }

    /// Set library search paths.
    pub fn with_lib_paths(mut self, paths: &[&str]) -> Self {
        self.cpp_info.lib_paths = to_strings(paths);
        self
    }

    /// Set binary directories.
    pub fn with_bin_paths(mut self, paths: &[&str]) -> Self {
        self.cpp_info.bin_paths = to_strings(paths);
        self
    }

    /// Set libraries.
    pub fn with_libs(mut self, libs: &[&str]) -> Self {
        self.cpp_info.libs = to_strings(libs);
        self
    }

    /// Set preprocessor definitions.
    pub fn with_defines(mut self, defines: &[&str]) -> Self {
        self.cpp_info.defines = to_strings(defines);
        self
    }

    /// Set C++ compiler flags.
    pub fn with_cppflags(mut self, flags: &[&str]) -> Self {
        self.cpp_info.cppflags = to_strings(flags);
        self
    }

    /// Set C compiler flags.
    pub fn with_cflags(mut self, flags: &[&str]) -> Self {
        self.cpp_info.cflags = to_strings(flags);
        self
    }

    /// Set shared library linker flags.
    pub fn with_sharedlinkflags(mut self, flags: &[&str]) -> Self {
        self.cpp_info.sharedlinkflags = to_strings(flags);
        self
    }

    /// Set executable linker flags.
    pub fn with_exelinkflags(mut self, flags: &[&str]) -> Self {
        self.cpp_info.exelinkflags = to_strings(flags);
        self
    }
}

/// The union of all dependencies' metadata plus the ordered dependency list.
///
/// The aggregate has no identifier and no root path of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateBuildInfo {
    /// Concatenated metadata of every dependency.
    pub cpp_info: CppInfo,

    /// `(identifier, metadata)` pairs in resolution order.
    pub dependencies: Vec<(String, DependencyBuildInfo)>,
}

impl AggregateBuildInfo {
    /// Wrap an externally computed aggregate.
    pub fn new(cpp_info: CppInfo, dependencies: Vec<(String, DependencyBuildInfo)>) -> Self {
        Self {
            cpp_info,
            dependencies,
        }
    }

    /// Build the aggregate by concatenating every dependency in order.
    pub fn from_dependencies<I, S>(dependencies: I) -> Self
    where
        I: IntoIterator<Item = (S, DependencyBuildInfo)>,
        S: Into<String>,
    {
        let dependencies: Vec<(String, DependencyBuildInfo)> = dependencies
            .into_iter()
            .map(|(name, info)| (name.into(), info))
            .collect();

        let mut cpp_info = CppInfo::default();
        for (_, dep) in &dependencies {
            cpp_info.extend_from(&dep.cpp_info);
        }

        Self {
            cpp_info,
            dependencies,
        }
    }

    /// Dependency identifiers in order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|(name, _)| name.as_str())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_concatenates_in_order() {
        let zlib = DependencyBuildInfo::new("/opt/zlib")
            .with_include_paths(&["/opt/zlib/include"])
            .with_libs(&["z"]);
        let openssl = DependencyBuildInfo::new("/opt/openssl")
            .with_include_paths(&["/opt/openssl/include", "/opt/zlib/include"])
            .with_libs(&["ssl", "crypto"]);

        let aggregate = AggregateBuildInfo::from_dependencies(vec![
            ("zlib", zlib),
            ("OpenSSL", openssl),
        ]);

        assert_eq!(
            aggregate.cpp_info.include_paths,
            vec!["/opt/zlib/include", "/opt/openssl/include", "/opt/zlib/include"]
        );
        assert_eq!(aggregate.cpp_info.libs, vec!["z", "ssl", "crypto"]);
        assert_eq!(
            aggregate.dependency_names().collect::<Vec<_>>(),
            vec!["zlib", "OpenSSL"]
        );
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregate =
            AggregateBuildInfo::from_dependencies(Vec::<(String, DependencyBuildInfo)>::new());

        assert!(aggregate.dependencies.is_empty());
        assert_eq!(aggregate.cpp_info, CppInfo::default());
    }

    #[test]
    fn test_values_tags_fields() {
        let dep = DependencyBuildInfo::new("/root")
            .with_defines(&["NDEBUG"])
            .with_cflags(&["-O2"]);

        let values: Vec<_> = dep.cpp_info.values().collect();
        assert_eq!(values, vec![("defines", "NDEBUG"), ("cflags", "-O2")]);
    }
}
