use algconf::config::RunOptions;
use algconf::paths::{PathEnvironment, PathSource, XmlPathResolver};
use algconf::pool::ConfigPool;
use algconf::tune::Tune;
use tempfile::TempDir;

use crate::integration::support::{alg_conf, master_config, param_set, write_file};

const TUNE: &str = "G18_02a_00_000";

/// `$GENIE/config` with a master file, base algorithm files, and a tune tree.
fn genie_tree(root: &std::path::Path, with_tune_dir: bool) {
    let config = root.join("config");
    write_file(
        &config,
        "master_config.xml",
        &master_config(&[("genie::A", "A.xml"), ("genie::B", "B.xml")], &[]),
    );
    write_file(&config, "A.xml", &alg_conf(&[param_set("Default", &[("string", "From", "base")])]));
    write_file(&config, "B.xml", &alg_conf(&[param_set("Default", &[("string", "From", "base")])]));
    write_file(&config, "G18_02a/A.xml", &alg_conf(&[param_set("Default", &[("string", "From", "cmc")])]));
    if with_tune_dir {
        write_file(
            &config,
            &format!("G18_02a/{}/A.xml", TUNE),
            &alg_conf(&[param_set("Default", &[("string", "From", "tune")])]),
        );
    }
}

fn validated_resolver(root: &std::path::Path) -> XmlPathResolver {
    let env = PathEnvironment::from_vars([("GENIE", root.to_string_lossy().into_owned())]);
    let options = RunOptions::default().with_tune(Tune::new(TUNE).unwrap());
    let mut resolver = XmlPathResolver::new(env, options);
    assert!(resolver.validate_tune().unwrap());
    resolver
}

#[test]
fn tune_directory_overrides_cmc_and_default() {
    let root = TempDir::new().unwrap();
    genie_tree(root.path(), true);
    let resolver = validated_resolver(root.path());

    let sources: Vec<PathSource> = resolver
        .path_list(true)
        .unwrap()
        .segments()
        .iter()
        .map(|s| s.source)
        .collect();
    assert_eq!(
        &sources[..3],
        &[PathSource::TuneDirectory, PathSource::CmcDirectory, PathSource::Default]
    );

    let pool = ConfigPool::load(&resolver).unwrap();
    let a = pool.find_registry("genie::A", "Default").unwrap();
    assert_eq!(a.get_string("From").unwrap(), "tune");
    let b = pool.find_registry("genie::B", "Default").unwrap();
    assert_eq!(b.get_string("From").unwrap(), "base");
}

#[test]
fn configuration_only_tune_uses_cmc_directory() {
    let root = TempDir::new().unwrap();
    genie_tree(root.path(), false);
    let resolver = validated_resolver(root.path());

    let tune = resolver.options().tune.as_ref().unwrap();
    assert!(tune.only_configuration());
    let list = resolver.path_list(true).unwrap();
    assert!(list
        .segments()
        .iter()
        .all(|s| s.source != PathSource::TuneDirectory));

    let pool = ConfigPool::load(&resolver).unwrap();
    let a = pool.find_registry("genie::A", "Default").unwrap();
    assert_eq!(a.get_string("From").unwrap(), "cmc");
}

#[test]
fn explicit_xml_path_still_beats_tune() {
    let root = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    genie_tree(root.path(), true);
    write_file(site.path(), "A.xml", &alg_conf(&[param_set("Default", &[("string", "From", "site")])]));

    let env = PathEnvironment::from_vars([
        ("GENIE", root.path().to_string_lossy().into_owned()),
        ("GXMLPATH", site.path().to_string_lossy().into_owned()),
    ]);
    let options = RunOptions::default().with_tune(Tune::new(TUNE).unwrap());
    let mut resolver = XmlPathResolver::new(env, options);
    assert!(resolver.validate_tune().unwrap());

    let pool = ConfigPool::load(&resolver).unwrap();
    let a = pool.find_registry("genie::A", "Default").unwrap();
    assert_eq!(a.get_string("From").unwrap(), "site");
}

#[test]
fn failed_validation_keeps_reporting() {
    let root = TempDir::new().unwrap();
    let env = PathEnvironment::from_vars([("GENIE", root.path().to_string_lossy().into_owned())]);
    let options = RunOptions::default().with_tune(Tune::new(TUNE).unwrap());
    let mut resolver = XmlPathResolver::new(env, options);

    assert!(!resolver.validate_tune().unwrap());
    assert!(resolver.path_list(true).is_err());
    assert!(resolver.path_list(true).is_err());
    assert!(resolver.path_list(false).is_ok());
}
