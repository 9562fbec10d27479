use assert_cmd::Command;
use predicates::prelude::*;

fn vitrine() -> Command {
    Command::cargo_bin("vitrine").expect("binary builds")
}

#[test]
fn tree_renders_the_builtin_schema() {
    vitrine()
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("general — General"))
        .stdout(predicate::str::contains("payment — Payment Methods"))
        .stdout(predicate::str::contains("base_url"));
}

#[test]
fn tree_can_focus_one_section() {
    vitrine()
        .args(["tree", "--section", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web — Web"))
        .stdout(predicate::str::contains("catalog").not());
}

#[test]
fn tree_rejects_unknown_section() {
    vitrine()
        .args(["tree", "--section", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no section `nope`"));
}

#[test]
fn get_falls_back_to_schema_defaults() {
    vitrine()
        .args(["get", "catalog/frontend/list_per_page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12"))
        .stdout(predicate::str::contains("schema default"));
}

#[test]
fn get_resolves_seeded_overrides_through_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("seed.toml");
    std::fs::write(
        &seed,
        "[websites.1]\nweb.unsecure.base_url = \"http://eu.shop.example/\"\n",
    )
    .unwrap();

    vitrine()
        .args([
            "--seed",
            seed.to_str().unwrap(),
            "--website-of",
            "2=1",
            "get",
            "web/unsecure/base_url",
            "--scope",
            "stores/2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://eu.shop.example/"))
        .stdout(predicate::str::contains("from websites/1"));
}

#[test]
fn get_masks_obscured_values() {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("seed.toml");
    // Seeds are raw storage rows, so the secret is stored in its masked
    // base64 form ("c2VjcmV0" == "secret").
    std::fs::write(&seed, "[default]\npayment.card.api_key = \"c2VjcmV0\"\n").unwrap();

    vitrine()
        .args([
            "--seed",
            seed.to_str().unwrap(),
            "get",
            "payment/card/api_key",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[obscured]"))
        .stdout(predicate::str::contains("secret").not());

    vitrine()
        .args([
            "--seed",
            seed.to_str().unwrap(),
            "get",
            "payment/card/api_key",
            "--reveal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret"));
}

#[test]
fn set_rejects_values_outside_the_options() {
    vitrine()
        .args(["set", "catalog/frontend/default_sort_by", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an option"));
}

#[test]
fn set_rejects_scope_deeper_than_the_field_allows() {
    vitrine()
        .args([
            "set",
            "general/locale/timezone",
            "UTC",
            "--scope",
            "stores/1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not writable"));
}

#[test]
fn unset_reports_missing_overrides() {
    vitrine()
        .args(["unset", "web/unsecure/base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing stored"));
}

#[test]
fn defaults_dump_as_toml_and_json() {
    vitrine()
        .args(["defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[default]").or(predicate::str::contains("[default.")))
        .stdout(predicate::str::contains("base_url"));

    vitrine()
        .args(["defaults", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"web/unsecure/base_url\""));
}

#[test]
fn malformed_route_is_a_usage_error() {
    vitrine()
        .args(["get", "not-a-route"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a section/group/field route"));
}
