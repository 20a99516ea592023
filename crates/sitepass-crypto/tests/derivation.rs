//! Cross-version properties of the derivation pipeline.

use proptest::prelude::*;

use sitepass_crypto::version::{Aleph, Alpha, Gamma};
use sitepass_crypto::{PasswordVersion, VersionRegistry, PASSWORD_LEN};

#[test]
fn resolved_version_reproduces_a_password() {
    let registry = VersionRegistry::builtin();
    let version = registry.resolve("aleph").unwrap();

    let first = version
        .generate(b"s3cret", b"example.com", b"alice")
        .unwrap();
    let second = version
        .generate(b"s3cret", b"example.com", b"alice")
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), PASSWORD_LEN);
}

#[test]
fn latest_matches_an_explicit_aleph_lookup() {
    let registry = VersionRegistry::builtin();
    let latest = registry.latest();
    let explicit = registry.resolve("ALEPH").unwrap();

    assert_eq!(
        latest.generate(b"pw", b"site", b"user").unwrap(),
        explicit.generate(b"pw", b"site", b"user").unwrap()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn versions_disagree_on_random_triples(
        secret in proptest::collection::vec(any::<u8>(), 0..48),
        site in proptest::collection::vec(any::<u8>(), 0..48),
        username in proptest::collection::vec(any::<u8>(), 0..48),
    ) {
        let alpha = Alpha.generate(&secret, &site, &username).unwrap();
        let gamma = Gamma.generate(&secret, &site, &username).unwrap();
        let aleph = Aleph.generate(&secret, &site, &username).unwrap();

        prop_assert_ne!(&alpha, &gamma);
        prop_assert_ne!(&alpha, &aleph);
        prop_assert_ne!(&gamma, &aleph);
    }

    #[test]
    fn every_version_is_deterministic(
        secret in proptest::collection::vec(any::<u8>(), 0..48),
        site in proptest::collection::vec(any::<u8>(), 0..48),
        username in proptest::collection::vec(any::<u8>(), 0..48),
    ) {
        let registry = VersionRegistry::builtin();
        let names: Vec<String> = registry.names().map(str::to_owned).collect();
        for name in names {
            let version = registry.resolve(&name).unwrap();
            prop_assert_eq!(
                version.generate(&secret, &site, &username).unwrap(),
                version.generate(&secret, &site, &username).unwrap()
            );
        }
    }
}
