//! `conanbuildinfo.cmake` generation.
//!
//! The output is three segments joined by newlines:
//!
//! ```text
//! per-dependency blocks  set(CONAN_INCLUDE_DIRS_ZLIB ...)      one per dependency, input order
//! aggregate block        set(CONAN_INCLUDE_DIRS ... ${CONAN_INCLUDE_DIRS})
//! macro library          macro(CONAN_BASIC_SETUP) ...          static
//! ```
//!
//! An optional settings block sits between the aggregate and the macros.

use crate::macros::CMAKE_MACROS;
use crate::normalize::NormalizedView;
use buildinfo_model::{AggregateBuildInfo, DependencyBuildInfo, Settings};

/// File name the consuming `CMakeLists.txt` includes.
pub const BUILD_INFO_CMAKE: &str = "conanbuildinfo.cmake";

/// A build-system generator: one file name, one rendered text.
pub trait Generator {
    /// Name of the file the caller should write.
    fn filename(&self) -> &str;

    /// Rendered file content.
    fn content(&self) -> String;
}

/// Generator for the CMake build info file.
#[derive(Debug, Clone)]
pub struct CMakeGenerator<'a> {
    build_info: &'a AggregateBuildInfo,
    settings: Option<&'a Settings>,
}

impl<'a> CMakeGenerator<'a> {
    pub fn new(build_info: &'a AggregateBuildInfo) -> Self {
        Self {
            build_info,
            settings: None,
        }
    }

    /// Also emit `CONAN_COMPILER`, `CONAN_COMPILER_VERSION` and `CONAN_LINK_RUNTIME`.
    pub fn with_settings(mut self, settings: &'a Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Block assigning the ten `CONAN_*_<DEP>` variables of one dependency.
    pub fn dependency_block(name: &str, dep: &DependencyBuildInfo) -> String {
        let dep_name = name.to_uppercase();
        let deps = NormalizedView::for_dependency(dep);

        let mut block = String::new();
        block.push_str(&format!("set(CONAN_{}_ROOT {})\n", dep_name, deps.rootpath()));
        block.push_str(&format!("set(CONAN_INCLUDE_DIRS_{} {})\n", dep_name, deps.include_paths));
        block.push_str(&format!("set(CONAN_LIB_DIRS_{} {})\n", dep_name, deps.lib_paths));
        block.push_str(&format!("set(CONAN_BIN_DIRS_{} {})\n", dep_name, deps.bin_paths));
        block.push_str(&format!("set(CONAN_LIBS_{} {})\n", dep_name, deps.libs));
        block.push_str(&format!("set(CONAN_DEFINES_{} {})\n", dep_name, deps.defines));
        block.push_str(&format!("set(CONAN_CXX_FLAGS_{} \"{}\")\n", dep_name, deps.cppflags));
        block.push_str(&format!(
            "set(CONAN_SHARED_LINKER_FLAGS_{} \"{}\")\n",
            dep_name, deps.sharedlinkflags
        ));
        block.push_str(&format!(
            "set(CONAN_EXE_LINKER_FLAGS_{} \"{}\")\n",
            dep_name, deps.exelinkflags
        ));
        block.push_str(&format!("set(CONAN_C_FLAGS_{} \"{}\")\n", dep_name, deps.cflags));
        block
    }

    /// Block merging the aggregate in front of whatever the project already set.
    ///
    /// The last line has no trailing newline.
    pub fn aggregate_block(build_info: &AggregateBuildInfo) -> String {
        let deps = NormalizedView::new(&build_info.cpp_info);

        let module_paths = build_info
            .dependencies
            .iter()
            .map(|(_, dep)| NormalizedView::for_dependency(dep).rootpath().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let lines = [
            prepend_list("CONAN_INCLUDE_DIRS", &deps.include_paths),
            prepend_list("CONAN_LIB_DIRS", &deps.lib_paths),
            prepend_list("CONAN_BIN_DIRS", &deps.bin_paths),
            prepend_list("CONAN_LIBS", &deps.libs),
            prepend_list("CONAN_DEFINES", &deps.defines),
            prepend_flags("CONAN_CXX_FLAGS", &deps.cppflags),
            prepend_flags("CONAN_SHARED_LINKER_FLAGS", &deps.sharedlinkflags),
            prepend_flags("CONAN_EXE_LINKER_FLAGS", &deps.exelinkflags),
            prepend_flags("CONAN_C_FLAGS", &deps.cflags),
            prepend_list("CONAN_CMAKE_MODULE_PATH", &module_paths),
        ];

        lines.join("\n")
    }

    /// Block with the declared compiler and runtime; empty for empty settings.
    pub fn settings_block(settings: &Settings) -> String {
        let mut block = String::new();

        if let Some(compiler) = &settings.compiler {
            block.push_str(&format!("set(CONAN_COMPILER \"{}\")\n", compiler.vendor));
            block.push_str(&format!("set(CONAN_COMPILER_VERSION \"{}\")\n", compiler.version));
        }
        if let Some(runtime) = &settings.runtime {
            block.push_str(&format!("set(CONAN_LINK_RUNTIME /{})\n", runtime));
        }

        block
    }
}

impl Generator for CMakeGenerator<'_> {
    fn filename(&self) -> &str {
        BUILD_INFO_CMAKE
    }

    fn content(&self) -> String {
        let dependencies = &self.build_info.dependencies;
        let mut sections = Vec::with_capacity(dependencies.len() + 3);

        for (name, dep) in dependencies {
            tracing::debug!(dependency = %name, "rendering dependency block");
            sections.push(Self::dependency_block(name, dep));
        }

        sections.push(Self::aggregate_block(self.build_info));

        if let Some(settings) = self.settings.filter(|s| !s.is_empty()) {
            sections.push(Self::settings_block(settings));
        }

        sections.push(CMAKE_MACROS.to_string());

        let content = sections.join("\n");
        tracing::debug!(
            dependencies = dependencies.len(),
            bytes = content.len(),
            "rendered {}",
            BUILD_INFO_CMAKE
        );
        content
    }
}

/// Render the build info file for `build_info`.
pub fn render(build_info: &AggregateBuildInfo) -> String {
    CMakeGenerator::new(build_info).content()
}

/// Render the build info file, including the settings block.
pub fn render_with_settings(build_info: &AggregateBuildInfo, settings: &Settings) -> String {
    CMakeGenerator::new(build_info)
        .with_settings(settings)
        .content()
}

/// Reference to the value `var` held before this file was included.
///
/// Left for CMake to expand; never resolved here.
fn prior_value(var: &str) -> String {
    format!("${{{}}}", var)
}

/// `set(VAR new... ${VAR})` for list variables.
fn prepend_list(var: &str, value: &str) -> String {
    format!("set({} {} {})", var, value, prior_value(var))
}

/// `set(VAR "new ${VAR}")` for flag strings.
fn prepend_flags(var: &str, value: &str) -> String {
    format!("set({} \"{} {}\")", var, value, prior_value(var))
}
