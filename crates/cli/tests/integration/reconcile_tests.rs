use std::path::Path;

use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

fn initialized() -> TestEnv {
  let env = TestEnv::with_manifest(&json!({
    "name": "demo",
    "dependencies": { "a": "1.0.0" }
  }));
  env.init();
  env
}

#[test]
fn reconcile_propagates_upgrades_and_additions() {
  let env = initialized();
  env.pkgswap_cmd().args(["create", "test", "--enable"]).assert().success();
  env.write_json(
    Path::new(".pkgswap.test.json"),
    &json!({ "name": "demo", "dependencies": { "a": "2.0.0", "b": "1.0.0" } }),
  );

  env
    .pkgswap_cmd()
    .arg("reconcile")
    .assert()
    .success()
    .stdout(predicate::str::contains("Reconciled 2 change(s)"));

  let master = env.read_json(Path::new(".pkgswap.package.json"));
  assert_eq!(master["dependencies"], json!({ "a": "2.0.0", "b": "1.0.0" }));
}

#[test]
fn reconcile_ignores_blacklisted_omissions() {
  let env = initialized();
  env
    .pkgswap_cmd()
    .args(["create", "slim", "--blacklist", "a"])
    .assert()
    .success();

  env
    .pkgswap_cmd()
    .args(["reconcile", "--variant", "slim"])
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));

  let master = env.read_json(Path::new(".pkgswap.package.json"));
  assert_eq!(master["dependencies"]["a"], json!("1.0.0"));
}

#[test]
fn reconcile_twice_is_a_no_op() {
  let env = initialized();
  env.pkgswap_cmd().args(["create", "test"]).assert().success();
  env.write_json(
    Path::new(".pkgswap.test.json"),
    &json!({ "dependencies": { "a": "1.1.0" } }),
  );

  env.pkgswap_cmd().args(["reconcile", "-n", "test"]).assert().success();
  let first = std::fs::read(env.master_path()).unwrap();

  env
    .pkgswap_cmd()
    .args(["reconcile", "-n", "test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));
  assert_eq!(std::fs::read(env.master_path()).unwrap(), first);
}
