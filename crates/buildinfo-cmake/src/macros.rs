//! Static CMake macro library appended to every generated file.
//!
//! The text is a fixed asset: nothing is substituted into it. It consumes the
//! `CONAN_*` variables set by the generated blocks above it, plus
//! `CONAN_COMPILER`, `CONAN_COMPILER_VERSION` and `CONAN_LINK_RUNTIME` when
//! they are defined.
//!
//! `CHECK_COMPILER_VERSION` and `CONAN_CHECK_COMPILER` implement the same
//! decision table as [`crate::check_compiler`]. Without a declared
//! `CONAN_COMPILER` both rules are skipped.

/// Entry points: `conan_basic_setup()` and `conan_flags_setup()`.
pub const CMAKE_MACROS: &str = r##"macro(CONAN_BASIC_SETUP)
    conan_check_compiler()
    conan_output_dirs_setup()
    conan_flags_setup()
    # Find modules shipped in package roots
    set(CMAKE_MODULE_PATH ${CONAN_CMAKE_MODULE_PATH} ${CMAKE_MODULE_PATH})
endmacro()

macro(CONAN_FLAGS_SETUP)
    include_directories(SYSTEM ${CONAN_INCLUDE_DIRS})
    link_directories(${CONAN_LIB_DIRS})
    add_definitions(${CONAN_DEFINES})

    # Search paths for find_path() and find_library()
    set(CMAKE_INCLUDE_PATH ${CONAN_INCLUDE_DIRS} ${CMAKE_INCLUDE_PATH})
    set(CMAKE_LIBRARY_PATH ${CONAN_LIB_DIRS} ${CMAKE_LIBRARY_PATH})

    set(CMAKE_CXX_FLAGS "${CMAKE_CXX_FLAGS} ${CONAN_CXX_FLAGS}")
    set(CMAKE_C_FLAGS "${CMAKE_C_FLAGS} ${CONAN_C_FLAGS}")
    set(CMAKE_SHARED_LINKER_FLAGS "${CMAKE_SHARED_LINKER_FLAGS} ${CONAN_SHARED_LINKER_FLAGS}")
    set(CMAKE_EXE_LINKER_FLAGS "${CMAKE_EXE_LINKER_FLAGS} ${CONAN_EXE_LINKER_FLAGS}")

    if(APPLE)
        # Dylibs reference each other by bare name and are resolved from the
        # linker search path, so no rpath is embedded.
        set(CMAKE_SKIP_RPATH 1)
    endif()
    if(CONAN_LINK_RUNTIME)
        string(REPLACE "/MD" ${CONAN_LINK_RUNTIME} CMAKE_CXX_FLAGS_RELEASE ${CMAKE_CXX_FLAGS_RELEASE})
        string(REPLACE "/MDd" ${CONAN_LINK_RUNTIME} CMAKE_CXX_FLAGS_DEBUG ${CMAKE_CXX_FLAGS_DEBUG})
        string(REPLACE "/MD" ${CONAN_LINK_RUNTIME} CMAKE_C_FLAGS_RELEASE ${CMAKE_C_FLAGS_RELEASE})
        string(REPLACE "/MDd" ${CONAN_LINK_RUNTIME} CMAKE_C_FLAGS_DEBUG ${CMAKE_C_FLAGS_DEBUG})
    endif()
endmacro()

macro(CONAN_OUTPUT_DIRS_SETUP)
    set(CMAKE_RUNTIME_OUTPUT_DIRECTORY ${CMAKE_CURRENT_BINARY_DIR}/bin)
    set(CMAKE_RUNTIME_OUTPUT_DIRECTORY_RELEASE ${CMAKE_RUNTIME_OUTPUT_DIRECTORY})
    set(CMAKE_RUNTIME_OUTPUT_DIRECTORY_DEBUG ${CMAKE_RUNTIME_OUTPUT_DIRECTORY})

    set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY ${CMAKE_CURRENT_BINARY_DIR}/lib)
    set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY_RELEASE ${CMAKE_ARCHIVE_OUTPUT_DIRECTORY})
    set(CMAKE_ARCHIVE_OUTPUT_DIRECTORY_DEBUG ${CMAKE_ARCHIVE_OUTPUT_DIRECTORY})
endmacro()

macro(CONAN_SPLIT_VERSION VERSION_STRING MAJOR MINOR)
    string(REPLACE "." ";" VERSION_LIST ${${VERSION_STRING}})

    list(GET VERSION_LIST 0 ${MAJOR})
    list(GET VERSION_LIST 1 ${MINOR})
endmacro()

macro(ERROR_COMPILER_VERSION)
    message(FATAL_ERROR "Incorrect '${CONAN_COMPILER}' version 'compiler.version=${CONAN_COMPILER_VERSION}'"
                        " is not the one detected by CMake: '${CMAKE_CXX_COMPILER_ID}=${VERSION_MAJOR}.${VERSION_MINOR}'")
endmacro()

macro(CHECK_COMPILER_VERSION)

    CONAN_SPLIT_VERSION(CMAKE_CXX_COMPILER_VERSION VERSION_MAJOR VERSION_MINOR)

    if("${CMAKE_CXX_COMPILER_ID}" STREQUAL "MSVC")
        # https://cmake.org/cmake/help/v3.2/variable/MSVC_VERSION.html
        if( (${CONAN_COMPILER_VERSION} STREQUAL "14" AND NOT ${VERSION_MAJOR} STREQUAL "19") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "12" AND NOT ${VERSION_MAJOR} STREQUAL "18") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "11" AND NOT ${VERSION_MAJOR} STREQUAL "17") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "10" AND NOT ${VERSION_MAJOR} STREQUAL "16") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "9" AND NOT ${VERSION_MAJOR} STREQUAL "15") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "8" AND NOT ${VERSION_MAJOR} STREQUAL "14") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "7" AND NOT ${VERSION_MAJOR} STREQUAL "13") OR
            (${CONAN_COMPILER_VERSION} STREQUAL "6" AND NOT ${VERSION_MAJOR} STREQUAL "12") )
            ERROR_COMPILER_VERSION()
        endif()
    elseif("${CMAKE_CXX_COMPILER_ID}" STREQUAL "GNU" OR "${CMAKE_CXX_COMPILER_ID}" MATCHES "Clang")
        if(NOT "${VERSION_MAJOR}.${VERSION_MINOR}" STREQUAL "${CONAN_COMPILER_VERSION}")
            ERROR_COMPILER_VERSION()
        endif()
    else()
        message("Skipping version checking of not detected compiler...")
    endif()
endmacro()

macro(CONAN_CHECK_COMPILER)
    if(NOT CONAN_COMPILER)
        message("Skipping compiler checking, no compiler declared...")
    else()
        if( ("${CONAN_COMPILER}" STREQUAL "Visual Studio" AND NOT "${CMAKE_CXX_COMPILER_ID}" STREQUAL "MSVC") OR
            ("${CONAN_COMPILER}" STREQUAL "gcc" AND NOT "${CMAKE_CXX_COMPILER_ID}" STREQUAL "GNU") OR
            ("${CONAN_COMPILER}" STREQUAL "apple-clang" AND (NOT APPLE OR NOT "${CMAKE_CXX_COMPILER_ID}" MATCHES "Clang")) OR
            ("${CONAN_COMPILER}" STREQUAL "clang" AND NOT "${CMAKE_CXX_COMPILER_ID}" MATCHES "Clang") )
            message(FATAL_ERROR "Incorrect '${CONAN_COMPILER}', is not the one detected by CMake: '${CMAKE_CXX_COMPILER_ID}'")
        endif()
        CHECK_COMPILER_VERSION()
    endif()
endmacro()
"##;
