//! End-to-end rendering tests for `conanbuildinfo.cmake`.

use buildinfo_cmake::{render, render_with_settings, CMakeGenerator, NormalizedView, CMAKE_MACROS};
use buildinfo_model::{AggregateBuildInfo, DependencyBuildInfo, Settings};

fn zlib() -> DependencyBuildInfo {
    DependencyBuildInfo::new(r"C:\conan\data\zlib\package\abc")
        .with_include_paths(&[r"C:\conan\data\zlib\package\abc\include"])
        .with_lib_paths(&[r"C:\conan\data\zlib\package\abc\lib"])
        .with_bin_paths(&[r"C:\conan\data\zlib\package\abc\bin"])
        .with_libs(&["zlib"])
}

fn openssl() -> DependencyBuildInfo {
    DependencyBuildInfo::new("/opt/conan/openssl")
        .with_include_paths(&["/opt/conan/openssl/include"])
        .with_lib_paths(&["/opt/conan/openssl/lib"])
        .with_libs(&["ssl", "crypto"])
        .with_defines(&["OPENSSL_NO_ASM", "OPENSSL_API=0x10100000L"])
        .with_cppflags(&["-fPIC"])
        .with_cflags(&["-fPIC"])
        .with_sharedlinkflags(&["-Wl,-z,defs"])
}

fn poco() -> DependencyBuildInfo {
    DependencyBuildInfo::new("/opt/conan/poco")
        .with_include_paths(&["/opt/conan/poco/include"])
        .with_libs(&["PocoNet", "PocoFoundation"])
        .with_exelinkflags(&["-pthread"])
}

/// Everything before the macro library.
fn variables(content: &str) -> &str {
    let end = content
        .find("\nmacro(CONAN_BASIC_SETUP)")
        .expect("macro library missing");
    &content[..end]
}

#[test]
fn test_render_snapshot() {
    let build_info =
        AggregateBuildInfo::from_dependencies(vec![("zlib", zlib()), ("OpenSSL", openssl())]);
    let content = render(&build_info);

    insta::assert_snapshot!("zlib_openssl", variables(&content));
}

#[test]
fn test_dependency_blocks_follow_input_order() {
    let orders = [
        vec![("zlib", zlib()), ("OpenSSL", openssl()), ("Poco", poco())],
        vec![("Poco", poco()), ("zlib", zlib()), ("OpenSSL", openssl())],
    ];

    for deps in orders {
        let names: Vec<String> = deps.iter().map(|(n, _)| n.to_uppercase()).collect();
        let content = render(&AggregateBuildInfo::from_dependencies(deps));

        let positions: Vec<usize> = names
            .iter()
            .map(|n| content.find(&format!("set(CONAN_{}_ROOT ", n)).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "order broken for {:?}", names);
    }
}

#[test]
fn test_render_is_idempotent() {
    let build_info =
        AggregateBuildInfo::from_dependencies(vec![("zlib", zlib()), ("Poco", poco())]);

    assert_eq!(render(&build_info), render(&build_info));
}

#[test]
fn test_rendered_paths_use_forward_slashes() {
    let build_info = AggregateBuildInfo::from_dependencies(vec![("zlib", zlib())]);
    let content = variables(&render(&build_info)).to_string();

    assert!(!content.contains('\\'));
    assert!(content.contains("set(CONAN_ZLIB_ROOT \"C:/conan/data/zlib/package/abc\")"));
    assert!(content.contains("\"C:/conan/data/zlib/package/abc/include\""));
}

#[test]
fn test_aggregate_contains_every_dependency_in_order() {
    let deps = vec![("zlib", zlib()), ("OpenSSL", openssl()), ("Poco", poco())];
    let build_info = AggregateBuildInfo::from_dependencies(deps.clone());
    let aggregate = CMakeGenerator::aggregate_block(&build_info);

    let libs_line = aggregate
        .lines()
        .find(|l| l.starts_with("set(CONAN_LIBS "))
        .unwrap();
    let expected_libs = deps
        .iter()
        .map(|(_, d)| NormalizedView::for_dependency(d).libs)
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(libs_line, format!("set(CONAN_LIBS {} ${{CONAN_LIBS}})", expected_libs));

    let include_start = aggregate.find("set(CONAN_INCLUDE_DIRS ").unwrap();
    let prior = aggregate.find("${CONAN_INCLUDE_DIRS}").unwrap();
    let mut cursor = include_start;
    for (_, dep) in &deps {
        let value = NormalizedView::for_dependency(dep).include_paths;
        let at = aggregate[cursor..].find(&value).unwrap() + cursor;
        assert!(at < prior);
        cursor = at + value.len();
    }
}

#[test]
fn test_module_path_lists_every_root() {
    let build_info =
        AggregateBuildInfo::from_dependencies(vec![("OpenSSL", openssl()), ("Poco", poco())]);
    let content = render(&build_info);

    assert!(content.contains(
        "set(CONAN_CMAKE_MODULE_PATH \"/opt/conan/openssl\" \"/opt/conan/poco\" \
         ${CONAN_CMAKE_MODULE_PATH})"
    ));
}

#[test]
fn test_empty_dependency_list() {
    let content = render(&AggregateBuildInfo::default());

    assert!(!content.contains("_ROOT "));
    assert!(content.starts_with("set(CONAN_INCLUDE_DIRS  ${CONAN_INCLUDE_DIRS})\n"));
    assert!(content.contains("set(CONAN_C_FLAGS \" ${CONAN_C_FLAGS}\")\n"));
    assert!(content.ends_with(CMAKE_MACROS));
}

#[test]
fn test_macro_library_is_constant() {
    let small = render(&AggregateBuildInfo::from_dependencies(vec![("zlib", zlib())]));
    let large = render(&AggregateBuildInfo::from_dependencies(vec![
        ("zlib", zlib()),
        ("OpenSSL", openssl()),
        ("Poco", poco()),
    ]));

    assert!(small.ends_with(&format!("${{CONAN_CMAKE_MODULE_PATH}})\n{}", CMAKE_MACROS)));
    assert!(large.ends_with(&format!("${{CONAN_CMAKE_MODULE_PATH}})\n{}", CMAKE_MACROS)));
}

#[test]
fn test_external_aggregate_used_verbatim() {
    let mut cpp_info = zlib().cpp_info;
    cpp_info.libs = vec!["custom".to_string()];
    let build_info = AggregateBuildInfo::new(cpp_info, vec![("zlib".to_string(), zlib())]);

    let content = render(&build_info);
    assert!(content.contains("set(CONAN_LIBS_ZLIB zlib)\n"));
    assert!(content.contains("set(CONAN_LIBS custom ${CONAN_LIBS})\n"));
}

/// Body of the `CONAN_CHECK_COMPILER` macro as rendered.
fn check_compiler_macro(content: &str) -> &str {
    let start = content
        .find("macro(CONAN_CHECK_COMPILER)")
        .expect("check macro missing");
    let body = &content[start..];
    &body[..body.find("endmacro()").unwrap()]
}

/// Without a declared compiler the artifact must not fail configuration:
/// `conan_basic_setup()` reaches the check with `CONAN_COMPILER` unset.
#[test]
fn test_undeclared_compiler_skips_check() {
    let build_info = AggregateBuildInfo::from_dependencies(vec![("zlib", zlib())]);
    let runtime_only = Settings {
        compiler: None,
        runtime: Some("MT".to_string()),
    };

    for content in [
        render(&build_info),
        render_with_settings(&build_info, &runtime_only),
    ] {
        assert!(!content.contains("set(CONAN_COMPILER "));
        assert!(!content.contains("set(CONAN_COMPILER_VERSION "));

        let check = check_compiler_macro(&content);
        let guard = check.find("if(NOT CONAN_COMPILER)").unwrap();
        let vendor_rule = check.find("FATAL_ERROR").unwrap();
        let version_rule = check.find("CHECK_COMPILER_VERSION()").unwrap();
        assert!(guard < vendor_rule && guard < version_rule);
    }

    let content = render_with_settings(&build_info, &runtime_only);
    assert!(content.contains("set(CONAN_LINK_RUNTIME /MT)\n"));
}
