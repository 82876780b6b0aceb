use algconf::config::RunOptions;
use algconf::error::ApiError;
use algconf::paths::{PathEnvironment, XmlPathResolver};
use algconf::pool::ConfigPool;
use algconf::registry::RegistryItem;
use algconf::tune::Tune;
use algconf::types::AlgId;
use tempfile::TempDir;

use crate::integration::support::{
    alg_conf, config_file, env_with_xml_path, master_config, param_set, write_file,
};

fn resolver_for(dirs: &[&std::path::Path]) -> XmlPathResolver {
    XmlPathResolver::new(env_with_xml_path(dirs), RunOptions::default())
}

fn standard_tree(dir: &std::path::Path) {
    write_file(
        dir,
        "master_config.xml",
        &master_config(
            &[("genie::QELXSec", "QELXSec.xml"), ("genie::Decayer", "Decayer.xml")],
            &[("Param", "CommonParam.xml")],
        ),
    );
    write_file(
        dir,
        "QELXSec.xml",
        &alg_conf(&[
            param_set(
                "Default",
                &[
                    ("double", "Mass", "0.938"),
                    ("int", "NIntegrationSteps", "200"),
                    ("alg", "FormFactors", "genie::DipoleFF/Default"),
                ],
            ),
            param_set("CC", &[("bool", "IsCC", "true")]),
        ]),
    );
    write_file(
        dir,
        "Decayer.xml",
        &alg_conf(&[param_set("Default", &[("string", "Mode", "inhibit")])]),
    );
    write_file(
        dir,
        "CommonParam.xml",
        &config_file(
            "common_param_list",
            &[param_set("Default", &[("double", "CKM-Vud", "0.97377")])],
        ),
    );
}

#[test]
fn loads_every_listed_file() {
    let dir = TempDir::new().unwrap();
    standard_tree(dir.path());

    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();
    assert_eq!(pool.len(), 4);
    assert_eq!(
        pool.keys().collect::<Vec<_>>(),
        vec![
            "ParamList/Default",
            "genie::Decayer/Default",
            "genie::QELXSec/CC",
            "genie::QELXSec/Default",
        ]
    );

    let qel = pool.find_registry("genie::QELXSec", "Default").unwrap();
    assert_eq!(qel.get_double("Mass").unwrap(), 0.938);
    assert_eq!(qel.get_int("NIntegrationSteps").unwrap(), 200);
    assert_eq!(
        qel.get_alg("FormFactors").unwrap(),
        &AlgId::new("genie::DipoleFF", "Default")
    );
    assert!(qel.is_locked());

    let common = pool.common_list("Param", "Default").unwrap();
    assert_eq!(common.get("CKM-Vud"), Some(&RegistryItem::Double(0.97377)));

    let report = pool.report();
    assert_eq!(report.files_loaded, 3);
    assert_eq!(report.files_skipped, 0);
    assert_eq!(report.registries_loaded, 4);
    assert_eq!(report.master_file, Some(dir.path().join("master_config.xml")));
}

#[test]
fn repeated_lookup_returns_cached_registry() {
    let dir = TempDir::new().unwrap();
    standard_tree(dir.path());
    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();

    let first = pool.find_registry("genie::Decayer", "Default").unwrap();
    let second = pool.find_registry_for(&AlgId::new("genie::Decayer", "Default")).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(pool.find_registry("genie::Decayer", "Missing").is_none());
}

#[test]
fn bad_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "master_config.xml",
        &master_config(
            &[
                ("genie::Good", "Good.xml"),
                ("genie::Broken", "Broken.xml"),
                ("genie::BadValue", "BadValue.xml"),
                ("genie::Absent", "Absent.xml"),
            ],
            &[],
        ),
    );
    write_file(dir.path(), "Good.xml", &alg_conf(&[param_set("Default", &[("int", "N", "1")])]));
    write_file(dir.path(), "Broken.xml", "<alg_conf><param_set name=\"Default\">");
    write_file(dir.path(), "BadValue.xml", &alg_conf(&[param_set("Default", &[("int", "N", "one")])]));

    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();
    assert_eq!(pool.len(), 1);
    assert!(pool.find_registry("genie::Good", "Default").is_some());
    assert!(pool.find_registry("genie::Broken", "Default").is_none());
    assert_eq!(pool.report().files_loaded, 1);
    assert_eq!(pool.report().files_skipped, 3);
}

#[test]
fn malformed_master_entry_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "master_config.xml",
        r#"<master_config>
  <config alg="genie::A">A.xml</config>
  <config alg="genie::B"/>
</master_config>"#,
    );
    write_file(dir.path(), "A.xml", &alg_conf(&[param_set("Default", &[("int", "N", "1")])]));

    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.find_registry("genie::A", "Default").unwrap().get_int("N").unwrap(), 1);
    assert_eq!(pool.report().files_loaded, 1);
    assert_eq!(pool.report().files_skipped, 1);
}

#[test]
fn missing_master_leaves_pool_empty() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Good.xml", &alg_conf(&[param_set("Default", &[("int", "N", "1")])]));

    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();
    assert!(pool.is_empty());
    assert_eq!(pool.report().master_file, None);
}

#[test]
fn files_are_resolved_across_search_path() {
    let site = TempDir::new().unwrap();
    let base = TempDir::new().unwrap();
    standard_tree(base.path());
    // The site directory overrides one algorithm file only.
    write_file(
        site.path(),
        "Decayer.xml",
        &alg_conf(&[param_set("Default", &[("string", "Mode", "site")])]),
    );

    let pool = ConfigPool::load(&resolver_for(&[site.path(), base.path()])).unwrap();
    let decayer = pool.find_registry("genie::Decayer", "Default").unwrap();
    assert_eq!(decayer.get_string("Mode").unwrap(), "site");
    assert!(pool.find_registry("genie::QELXSec", "Default").is_some());
}

#[test]
fn duplicate_keys_last_file_wins() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "master_config.xml",
        &master_config(&[("genie::A", "First.xml"), ("genie::A", "Second.xml")], &[]),
    );
    write_file(dir.path(), "First.xml", &alg_conf(&[param_set("Default", &[("int", "N", "1")])]));
    write_file(dir.path(), "Second.xml", &alg_conf(&[param_set("Default", &[("int", "N", "2")])]));

    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.find_registry("genie::A", "Default").unwrap().get_int("N").unwrap(), 2);
    assert_eq!(pool.report().registries_loaded, 2);
}

#[test]
fn unvalidated_tune_fails_the_load() {
    let dir = TempDir::new().unwrap();
    standard_tree(dir.path());
    let options = RunOptions::default().with_tune(Tune::new("G18_02a_00_000").unwrap());
    let resolver = XmlPathResolver::new(env_with_xml_path(&[dir.path()]), options);

    let err = ConfigPool::load(&resolver).unwrap_err();
    assert!(matches!(err, ApiError::TuneNotValidated { .. }));
}

#[test]
fn print_writes_all_registries() {
    let dir = TempDir::new().unwrap();
    standard_tree(dir.path());
    let pool = ConfigPool::load(&resolver_for(&[dir.path()])).unwrap();

    let mut out = Vec::new();
    pool.print(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    for key in pool.keys() {
        assert!(text.contains(key), "missing {key} in dump");
    }
    assert!(text.contains("NIntegrationSteps"));
}

#[test]
fn empty_environment_loads_nothing() {
    let resolver = XmlPathResolver::new(PathEnvironment::default(), RunOptions::default());
    let pool = ConfigPool::load(&resolver).unwrap();
    assert!(pool.is_empty());
}
