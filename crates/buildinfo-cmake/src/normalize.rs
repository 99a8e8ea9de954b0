//! CMake-ready string form of one metadata bundle.

use buildinfo_model::{CppInfo, DependencyBuildInfo};

/// Separator between list items inside a multi-line `set()`.
const LIST_SEPARATOR: &str = "\n\t\t\t";

/// Normalized, joined values of one [`CppInfo`], ready for substitution.
///
/// Built right before a block is rendered and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedView {
    pub include_paths: String,
    pub lib_paths: String,
    pub bin_paths: String,
    pub libs: String,
    pub defines: String,
    pub cppflags: String,
    pub cflags: String,
    pub sharedlinkflags: String,
    pub exelinkflags: String,
    /// Quoted root path; only dependencies have one.
    pub rootpath: Option<String>,
}

impl NormalizedView {
    /// Normalize aggregate (or root-less) metadata.
    pub fn new(info: &CppInfo) -> Self {
        Self {
            include_paths: join_paths(&info.include_paths),
            lib_paths: join_paths(&info.lib_paths),
            bin_paths: join_paths(&info.bin_paths),
            libs: info.libs.join(" "),
            defines: info
                .defines
                .iter()
                .map(|d| format!("-D{}", d))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            cppflags: info.cppflags.join(" "),
            cflags: info.cflags.join(" "),
            sharedlinkflags: info.sharedlinkflags.join(" "),
            exelinkflags: info.exelinkflags.join(" "),
            rootpath: None,
        }
    }

    /// Normalize one dependency, including its root path.
    pub fn for_dependency(dep: &DependencyBuildInfo) -> Self {
        Self {
            rootpath: Some(quote_path(&dep.rootpath)),
            ..Self::new(&dep.cpp_info)
        }
    }

    /// The quoted root path, or an empty string for the aggregate.
    pub fn rootpath(&self) -> &str {
        self.rootpath.as_deref().unwrap_or("")
    }
}

/// Replace every backslash with a forward slash.
///
/// A literal substitution, independent of the host's path conventions.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Double-quote a path after normalizing its separators.
pub fn quote_path(path: &str) -> String {
    format!("\"{}\"", to_forward_slashes(path))
}

fn join_paths(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| quote_path(p))
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}
