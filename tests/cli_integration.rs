//! CLI integration tests for pbxgen.
//!
//! These tests drive the binary over temporary project trees, from single
//! projects through composite builds.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the pbxgen binary command.
fn pbxgen() -> Command {
    Command::cargo_bin("pbxgen").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Capitalize a project name into a module name.
fn module_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lay down a project with one executable component.
fn write_executable_project(dir: &Path, name: &str, members: &[&str]) {
    fs::create_dir_all(dir.join("Sources")).unwrap();
    fs::write(dir.join("Sources/main.swift"), "print(\"hi\")\n").unwrap();

    let workspace = if members.is_empty() {
        String::new()
    } else {
        format!(
            "[workspace]\nmembers = [{}]\n\n",
            members
                .iter()
                .map(|m| format!("\"{m}\""))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    let module = module_name(name);
    fs::write(
        dir.join("Pbxgen.toml"),
        format!(
            "[project]\nname = \"{name}\"\n\n{workspace}\
             [components.{module}]\n\
             kind = \"executable\"\n\
             sources = [\"Sources/**/*.swift\"]\n\
             debug-binary = \"build/debug/{module}\"\n\
             release-binary = \"build/release/{module}\"\n"
        ),
    )
    .unwrap();
}

/// Lay down a project with one test-bundle component.
fn write_test_bundle_project(dir: &Path, name: &str) {
    fs::create_dir_all(dir.join("Tests")).unwrap();
    fs::write(dir.join("Tests/SmokeTests.swift"), "").unwrap();

    fs::write(
        dir.join("Pbxgen.toml"),
        format!(
            "[project]\nname = \"{name}\"\n\n\
             [components.SmokeTests]\n\
             kind = \"test-bundle\"\n\
             sources = [\"Tests/**/*.swift\"]\n\
             bundle-dir = \"build/bundle/SmokeTests.xctest\"\n"
        ),
    )
    .unwrap();
}

// ============================================================================
// pbxgen generate
// ============================================================================

#[test]
fn test_generate_single_project() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "myapp", &[]);

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated myapp"));

    assert!(tmp.path().join("myapp.xcodeproj/project.pbxproj").is_file());
    assert!(tmp
        .path()
        .join("myapp.xcodeproj/project.xcworkspace/xcshareddata/WorkspaceSettings.xcsettings")
        .is_file());
    assert!(tmp
        .path()
        .join("myapp.xcodeproj/xcshareddata/xcschemes/Myapp Executable.xcscheme")
        .is_file());
    assert!(tmp
        .path()
        .join("myapp.xcworkspace/contents.xcworkspacedata")
        .is_file());
}

#[test]
fn test_generate_fails_without_manifest() {
    let tmp = temp_dir();

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Pbxgen.toml"));
}

#[test]
fn test_generate_composite_build() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "root", &["alpha", "beta"]);
    write_executable_project(&tmp.path().join("alpha"), "alpha", &[]);
    write_executable_project(&tmp.path().join("beta"), "beta", &[]);

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let contents =
        fs::read_to_string(tmp.path().join("root.xcworkspace/contents.xcworkspacedata")).unwrap();
    assert_eq!(contents.matches("<FileRef").count(), 3);
    assert!(contents.contains("alpha.xcodeproj"));
    assert!(contents.contains("beta.xcodeproj"));

    assert!(tmp
        .path()
        .join("alpha/alpha.xcodeproj/project.pbxproj")
        .is_file());
}

#[test]
fn test_generate_reports_broken_member_and_continues() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "root", &["good", "bad"]);
    write_executable_project(&tmp.path().join("good"), "good", &[]);

    // No files match the source patterns.
    fs::create_dir_all(tmp.path().join("bad")).unwrap();
    fs::write(
        tmp.path().join("bad/Pbxgen.toml"),
        "[project]\nname = \"bad\"\n\n\
         [components.Bad]\n\
         kind = \"executable\"\n\
         sources = [\"Sources/**/*.swift\"]\n\
         debug-binary = \"build/debug/Bad\"\n\
         release-binary = \"build/release/Bad\"\n",
    )
    .unwrap();

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("skipped project `bad`"))
        .stderr(predicate::str::contains("no source files"));

    // The sibling generated and the partial workspace covers it.
    assert!(tmp.path().join("good/good.xcodeproj/project.pbxproj").is_file());
    let contents =
        fs::read_to_string(tmp.path().join("root.xcworkspace/contents.xcworkspacedata")).unwrap();
    assert!(contents.contains("good.xcodeproj"));
    assert!(!contents.contains("bad.xcodeproj"));
}

#[test]
fn test_generate_twice_is_byte_identical() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "myapp", &[]);

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let first = fs::read_to_string(tmp.path().join("myapp.xcodeproj/project.pbxproj")).unwrap();
    let first_scheme = fs::read_to_string(
        tmp.path()
            .join("myapp.xcodeproj/xcshareddata/xcschemes/Myapp Executable.xcscheme"),
    )
    .unwrap();

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let second = fs::read_to_string(tmp.path().join("myapp.xcodeproj/project.pbxproj")).unwrap();
    let second_scheme = fs::read_to_string(
        tmp.path()
            .join("myapp.xcodeproj/xcshareddata/xcschemes/Myapp Executable.xcscheme"),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first_scheme, second_scheme);
}

#[test]
fn test_built_products_dir_does_not_leak_into_output() {
    let tmp = temp_dir();
    write_test_bundle_project(tmp.path(), "tested");

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();
    let without_env =
        fs::read_to_string(tmp.path().join("tested.xcodeproj/project.pbxproj")).unwrap();

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .env("BUILT_PRODUCTS_DIR", tmp.path().join("xcode-products"))
        .assert()
        .success();
    let with_env =
        fs::read_to_string(tmp.path().join("tested.xcodeproj/project.pbxproj")).unwrap();

    // The sync destination is resolved at invocation time from the
    // environment; serialized output must not depend on it.
    assert_eq!(without_env, with_env);
}

#[test]
fn test_test_bundle_target_has_no_scheme() {
    let tmp = temp_dir();
    write_test_bundle_project(tmp.path(), "tested");

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let pbxproj = fs::read_to_string(tmp.path().join("tested.xcodeproj/project.pbxproj")).unwrap();
    assert!(pbxproj.contains("SmokeTests XCTestBundle"));
    assert!(pbxproj.contains("com.apple.product-type.bundle.unit-test"));

    let schemes_dir = tmp.path().join("tested.xcodeproj/xcshareddata/xcschemes");
    assert!(!schemes_dir.exists());
}

// ============================================================================
// pbxgen clean
// ============================================================================

#[test]
fn test_clean_removes_generated_files() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "myapp", &[]);

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();

    pbxgen()
        .args(["clean"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    assert!(!tmp.path().join("myapp.xcodeproj").exists());
    assert!(!tmp.path().join("myapp.xcworkspace").exists());
    assert!(tmp.path().join("Sources/main.swift").exists());
}

#[test]
fn test_clean_composite_build() {
    let tmp = temp_dir();
    write_executable_project(tmp.path(), "root", &["alpha"]);
    write_executable_project(&tmp.path().join("alpha"), "alpha", &[]);

    pbxgen()
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success();

    pbxgen()
        .args(["clean"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(!tmp.path().join("root.xcodeproj").exists());
    assert!(!tmp.path().join("alpha/alpha.xcodeproj").exists());
    assert!(!tmp.path().join("root.xcworkspace").exists());
}
