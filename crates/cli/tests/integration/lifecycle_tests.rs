use std::path::Path;

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

fn demo() -> TestEnv {
  TestEnv::with_manifest(&json!({
    "name": "demo",
    "version": "1.0.0",
    "dependencies": { "a": "1.0.0", "b": "^2.0.0" },
    "devDependencies": { "tap": "^16.0.0" }
  }))
}

#[test]
fn init_links_package_json_to_master() {
  let env = demo();

  env
    .pkgswap_cmd()
    .arg("init")
    .assert()
    .success()
    .stdout(predicate::str::contains("Initialized"));

  assert!(env.master_path().is_file());
  assert_eq!(env.live_target(), env.master_path());
  assert_eq!(env.read_json(Path::new("package.json"))["name"], json!("demo"));
}

#[test]
fn init_from_subdirectory_finds_root() {
  let env = demo();
  let nested = env.root().join("src").join("deep");
  std::fs::create_dir_all(&nested).unwrap();

  env.pkgswap_cmd().current_dir(&nested).arg("init").assert().success();

  assert!(env.master_path().is_file());
}

#[test]
fn init_with_stale_master_needs_force() {
  let env = demo();
  env.write_json(Path::new(".pkgswap.package.json"), &json!({ "dependencies": {} }));

  env
    .pkgswap_cmd()
    .arg("init")
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"))
    .stdout(predicate::str::contains("--force"));

  env.pkgswap_cmd().args(["init", "--force"]).assert().success();
  assert_eq!(
    env.read_json(Path::new(".pkgswap.package.json"))["dependencies"]["a"],
    json!("1.0.0")
  );
}

#[test]
fn create_before_init_fails() {
  let env = demo();

  env
    .pkgswap_cmd()
    .args(["create", "test"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn create_copies_master() {
  let env = demo();
  env.init();

  env
    .pkgswap_cmd()
    .args(["create", "test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created variant test"));

  assert_eq!(
    std::fs::read(env.variant_path("test")).unwrap(),
    std::fs::read(env.master_path()).unwrap()
  );
  assert_eq!(env.live_target(), env.master_path());
}

#[test]
fn create_twice_without_force_fails() {
  let env = demo();
  env.init();
  env.pkgswap_cmd().args(["create", "test"]).assert().success();

  env
    .pkgswap_cmd()
    .args(["create", "test"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));

  env.pkgswap_cmd().args(["create", "test", "--force"]).assert().success();
}

#[test]
fn create_enable_then_disable() {
  let env = demo();
  env.init();

  env.pkgswap_cmd().args(["create", "test", "--enable"]).assert().success();
  assert_eq!(env.live_target(), env.variant_path("test"));

  env
    .pkgswap_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("Variant test enabled"));

  env.pkgswap_cmd().arg("disable").assert().success();
  assert_eq!(env.live_target(), env.master_path());
}

#[test]
fn enable_by_name_and_master_keyword() {
  let env = demo();
  env.init();
  env.pkgswap_cmd().args(["create", "other"]).assert().success();

  env.pkgswap_cmd().args(["enable", "other"]).assert().success();
  assert_eq!(env.live_target(), env.variant_path("other"));

  env.pkgswap_cmd().args(["enable", "master"]).assert().success();
  assert_eq!(env.live_target(), env.master_path());
}

#[test]
fn enable_missing_variant_fails() {
  let env = demo();
  env.init();

  env
    .pkgswap_cmd()
    .args(["enable", "ghost"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
  assert_eq!(env.live_target(), env.master_path());
}

#[test]
fn init_again_switches_back_to_master() {
  let env = demo();
  env.init();
  env.pkgswap_cmd().args(["create", "foo", "--enable"]).assert().success();

  env
    .pkgswap_cmd()
    .arg("init")
    .assert()
    .success()
    .stdout(predicate::str::contains("Already initialized"));
  assert_eq!(env.live_target(), env.master_path());
}

#[test]
fn status_json_reports_state() {
  let env = demo();

  env
    .pkgswap_cmd()
    .args(["status", "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"state\": \"uninitialized\""));

  env.init();
  env
    .pkgswap_cmd()
    .args(["status", "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"state\": \"initialized_on_master\""));
}

#[test]
fn list_marks_active_variant() {
  let env = demo();
  env.init();
  env.pkgswap_cmd().args(["create", "beta"]).assert().success();
  env.pkgswap_cmd().args(["create", "alpha", "--enable"]).assert().success();

  env
    .pkgswap_cmd()
    .args(["list", "-o", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"name\": \"alpha\""))
    .stdout(predicate::str::contains("\"active\": true"))
    .stdout(predicate::str::contains("\"name\": \"beta\""));
}
