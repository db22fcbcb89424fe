use std::path::Path;

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

fn initialized() -> TestEnv {
  let env = TestEnv::with_manifest(&json!({
    "name": "demo",
    "dependencies": { "a": "1.0.0", "b": "1.0.0" },
    "devDependencies": { "a": "1.0.0" }
  }));
  env.init();
  env
}

#[test]
fn create_with_blacklist_records_sources() {
  let env = initialized();

  env
    .pkgswap_cmd()
    .args(["create", "test", "--blacklist", "a"])
    .assert()
    .success()
    .stdout(predicate::str::contains("a (dependencies, devDependencies)"));

  let variant = env.read_json(Path::new(".pkgswap.test.json"));
  assert!(variant["dependencies"].get("a").is_none());
  assert!(variant["devDependencies"].get("a").is_none());
  assert_eq!(variant["dependencies"]["b"], json!("1.0.0"));
  assert_eq!(
    variant["pkgswap"]["blacklist"],
    json!([{ "name": "a", "sources": ["dependencies", "devDependencies"] }])
  );

  let master = env.read_json(Path::new(".pkgswap.package.json"));
  assert_eq!(master["dependencies"]["a"], json!("1.0.0"));
  assert!(master.get("pkgswap").is_none());
}

#[test]
fn blacklist_defaults_to_enabled_variant() {
  let env = initialized();
  env.pkgswap_cmd().args(["create", "test", "--enable"]).assert().success();

  env.pkgswap_cmd().args(["blacklist", "b"]).assert().success();

  let live = env.read_json(Path::new("package.json"));
  assert!(live["dependencies"].get("b").is_none());
}

#[test]
fn blacklist_twice_keeps_single_entry() {
  let env = initialized();
  env.pkgswap_cmd().args(["create", "test"]).assert().success();

  for _ in 0..2 {
    env
      .pkgswap_cmd()
      .args(["blacklist", "a", "--variant", "test"])
      .assert()
      .success();
  }

  let variant = env.read_json(Path::new(".pkgswap.test.json"));
  assert_eq!(variant["pkgswap"]["blacklist"].as_array().unwrap().len(), 1);
}

#[test]
fn blacklist_on_master_is_refused() {
  let env = initialized();

  env
    .pkgswap_cmd()
    .args(["blacklist", "a"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("master is enabled"));

  env
    .pkgswap_cmd()
    .args(["blacklist", "a", "--dest", ".pkgswap.package.json"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("refusing to modify master"));
}

#[test]
fn unblacklist_keeps_package_out_by_default() {
  let env = initialized();
  env
    .pkgswap_cmd()
    .args(["create", "test", "--blacklist", "a,b"])
    .assert()
    .success();

  env
    .pkgswap_cmd()
    .args(["unblacklist", "a", "--variant", "test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed 1 blacklist entry"));

  let variant = env.read_json(Path::new(".pkgswap.test.json"));
  assert!(variant["dependencies"].get("a").is_none());
  assert_eq!(
    variant["pkgswap"]["blacklist"],
    json!([{ "name": "b", "sources": ["dependencies"] }])
  );
}

#[test]
fn unblacklist_restore_brings_package_back() {
  let env = initialized();
  env
    .pkgswap_cmd()
    .args(["create", "test", "--blacklist", "a"])
    .assert()
    .success();

  env
    .pkgswap_cmd()
    .args(["unblacklist", "a", "--variant", "test", "--restore"])
    .assert()
    .success();

  let variant = env.read_json(Path::new(".pkgswap.test.json"));
  assert_eq!(variant["dependencies"]["a"], json!("1.0.0"));
  assert_eq!(variant["devDependencies"]["a"], json!("1.0.0"));
  assert!(variant.get("pkgswap").is_none());
}

#[test]
fn blacklist_through_live_path_keeps_link() {
  let env = initialized();
  env.pkgswap_cmd().args(["create", "test", "--enable"]).assert().success();

  env
    .pkgswap_cmd()
    .args(["blacklist", "b", "--dest", "package.json"])
    .assert()
    .success();

  assert!(env.live_path().symlink_metadata().unwrap().file_type().is_symlink());
  assert_eq!(env.live_target(), env.variant_path("test"));
  let variant = env.read_json(Path::new(".pkgswap.test.json"));
  assert!(variant["dependencies"].get("b").is_none());

  env
    .pkgswap_cmd()
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("Variant test enabled"));
}
