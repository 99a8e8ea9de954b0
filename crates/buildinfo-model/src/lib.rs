//! Dependency build metadata for build-system generators.
//!
//! This crate provides:
//! - Per-dependency and aggregated build metadata ([`DependencyBuildInfo`],
//!   [`AggregateBuildInfo`])
//! - Declared compiler settings ([`Settings`], [`CompilerExpectation`])
//! - Input document loading and validation (`buildinfo.toml` / `.json`)
//!
//! # Example
//!
//! ```toml
//! # buildinfo.toml
//! [settings]
//! compiler = "gcc"
//! compiler_version = "7.3"
//!
//! [dependencies.zlib]
//! rootpath = "/home/user/.conan/data/zlib/1.2.11/package/abc"
//! include_paths = ["/home/user/.conan/data/zlib/1.2.11/package/abc/include"]
//! lib_paths = ["/home/user/.conan/data/zlib/1.2.11/package/abc/lib"]
//! libs = ["z"]
//! ```

mod document;
mod error;
mod info;
mod settings;

pub use document::{BuildInfoFile, SettingsSection};
pub use error::{BuildError, Result};
pub use info::{AggregateBuildInfo, CppInfo, DependencyBuildInfo};
pub use settings::{CompilerExpectation, CompilerVendor, Settings};
