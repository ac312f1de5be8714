//! Property-based tests for build-target generation.
//!
//! These hold for any package name, peer dependency set and `unpkg` value.

use proptest::prelude::*;
use rollgen::{ModuleFormat, Overrides, PackageDescriptor, generate};
use serde_json::{Value, json};
use std::collections::BTreeSet;

fn package_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}"
}

fn peers_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9-]{0,12}", 0..=6)
}

fn unpkg_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        Just(Some(json!(null))),
        Just(Some(json!(false))),
        Just(Some(json!(""))),
        Just(Some(json!(0))),
        Just(Some(json!(true))),
        "[a-z/.]{1,20}".prop_map(|s| Some(json!(s))),
    ]
}

fn package(name: &str, peers: &[String], unpkg: Option<Value>) -> PackageDescriptor {
    let mut package = PackageDescriptor::new(name);
    for peer in peers {
        package = package.with_peer_dependency(peer.clone(), "*");
    }
    package.unpkg = unpkg;
    package
}

fn expected_files(name: &str, browser: bool) -> Vec<String> {
    let mut files = vec![format!("lib/{name}.js"), format!("es/{name}.js")];
    if browser {
        files.push(format!("es/{name}.mjs"));
        files.push(format!("dist/{name}.js"));
        files.push(format!("dist/{name}.min.js"));
    }
    files
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Two jobs without a browser distribution, five with one, in fixed order
    #[test]
    fn prop_job_count_and_order(
        name in package_name_strategy(),
        peers in peers_strategy(),
        unpkg in unpkg_strategy(),
    ) {
        let package = package(&name, &peers, unpkg);
        let browser = package.browser_targets_enabled();
        let jobs = generate(&package, "Global", &Overrides::default());

        let files: Vec<String> = jobs.iter().filter_map(|j| j.output_file()).map(String::from).collect();
        prop_assert_eq!(files, expected_files(&name, browser));
        prop_assert_eq!(jobs.len(), if browser { 5 } else { 2 });
    }

    /// Every job's external set equals the peer dependency names
    #[test]
    fn prop_external_matches_peers(
        name in package_name_strategy(),
        peers in peers_strategy(),
        unpkg in unpkg_strategy(),
    ) {
        let package = package(&name, &peers, unpkg);
        let expected: BTreeSet<&str> = peers.iter().map(String::as_str).collect();

        for job in generate(&package, "Global", &Overrides::default()) {
            let external = job.external.typed().expect("generated external set");
            let actual: BTreeSet<&str> = external.iter().collect();
            prop_assert_eq!(&actual, &expected);
        }
    }

    /// The global name appears on UMD jobs and nowhere else
    #[test]
    fn prop_global_name_only_on_umd(
        name in package_name_strategy(),
        global in "[A-Za-z_$][A-Za-z0-9_$]{0,12}",
        unpkg in unpkg_strategy(),
    ) {
        let package = package(&name, &[], unpkg);
        for job in generate(&package, &global, &Overrides::default()) {
            if job.format() == Some(ModuleFormat::Umd) {
                prop_assert_eq!(job.global_name(), Some(global.as_str()));
            } else {
                prop_assert_eq!(job.global_name(), None);
            }
        }
    }

    /// Same inputs, same output
    #[test]
    fn prop_generation_is_deterministic(
        name in package_name_strategy(),
        peers in peers_strategy(),
        unpkg in unpkg_strategy(),
    ) {
        let package = package(&name, &peers, unpkg);
        let first = generate(&package, "Global", &Overrides::default());
        let second = generate(&package, "Global", &Overrides::default());
        prop_assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}
