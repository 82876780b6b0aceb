use algconf::config::RunOptions;
use algconf::paths::{PathEnvironment, Resolution, XmlPathResolver, DEFAULT_XML_PATH, FLUX_NTUPLE_PATH};
use proptest::prelude::*;
use tempfile::TempDir;

use crate::integration::support::write_file;

#[test]
fn gxmlpath_preferred_over_default_directory() {
    let site = TempDir::new().unwrap();
    let genie = TempDir::new().unwrap();
    write_file(site.path(), "Alg.xml", "<alg_conf/>");
    write_file(genie.path(), "config/Alg.xml", "<alg_conf/>");
    write_file(genie.path(), "config/OnlyDefault.xml", "<alg_conf/>");

    let env = PathEnvironment::from_vars([
        ("GXMLPATH", site.path().to_string_lossy().into_owned()),
        ("GENIE", genie.path().to_string_lossy().into_owned()),
    ]);
    let resolver = XmlPathResolver::new(env, RunOptions::default());

    assert_eq!(
        resolver.resolve_file("Alg.xml").unwrap(),
        Resolution::Found(site.path().join("Alg.xml"))
    );
    assert_eq!(
        resolver.resolve_file("OnlyDefault.xml").unwrap(),
        Resolution::Found(genie.path().join("config").join("OnlyDefault.xml"))
    );
}

#[test]
fn run_option_path_beats_environment() {
    let cli_dir = TempDir::new().unwrap();
    let env_dir = TempDir::new().unwrap();
    write_file(cli_dir.path(), "Alg.xml", "<alg_conf/>");
    write_file(env_dir.path(), "Alg.xml", "<alg_conf/>");

    let env = PathEnvironment::from_vars([(
        "GXMLPATH",
        env_dir.path().to_string_lossy().into_owned(),
    )]);
    let options = RunOptions::default().with_xml_path(cli_dir.path().to_string_lossy());
    let resolver = XmlPathResolver::new(env, options);

    let found = resolver.resolve_file("Alg.xml").unwrap();
    assert_eq!(found.found(), Some(cli_dir.path().join("Alg.xml").as_path()));
}

#[test]
fn reweight_and_flux_directories_are_searched_last() {
    let reweight = TempDir::new().unwrap();
    let genie = TempDir::new().unwrap();
    write_file(reweight.path(), "config/Rw.xml", "<alg_conf/>");
    write_file(genie.path(), "src/Tools/Flux/GNuMINtuple/GNuMIFlux.xml", "<gnumi_config/>");

    let env = PathEnvironment::from_vars([
        ("GENIE_REWEIGHT", reweight.path().to_string_lossy().into_owned()),
        ("GENIE", genie.path().to_string_lossy().into_owned()),
    ]);
    let resolver = XmlPathResolver::new(env, RunOptions::default());

    assert_eq!(
        resolver.file_path("Rw.xml").unwrap(),
        reweight.path().join("config").join("Rw.xml").to_string_lossy()
    );
    assert_eq!(
        resolver.file_path("GNuMIFlux.xml").unwrap(),
        genie
            .path()
            .join("src/Tools/Flux/GNuMINtuple")
            .join("GNuMIFlux.xml")
            .to_string_lossy()
    );
}

#[test]
fn unset_genie_leaves_default_unresolvable() {
    let resolver = XmlPathResolver::new(PathEnvironment::default(), RunOptions::default());
    assert_eq!(
        resolver.resolve_file("Alg.xml").unwrap(),
        Resolution::Unresolved("Alg.xml".to_string())
    );
}

#[test]
fn empty_basename_is_never_resolved() {
    let dir = TempDir::new().unwrap();
    let env = PathEnvironment::from_vars([("GXMLPATH", dir.path().to_string_lossy().into_owned())]);
    let resolver = XmlPathResolver::new(env, RunOptions::default());
    assert_eq!(resolver.file_path("").unwrap(), "");
}

const VARS: [&str; 3] = ["GXMLPATH", "GXMLPATHS", "GALGCONF"];

proptest! {
    #[test]
    fn path_list_follows_precedence(
        present in proptest::collection::vec(any::<bool>(), 4),
        with_reweight in any::<bool>(),
    ) {
        let mut env = PathEnvironment::default();
        let mut expected = Vec::new();
        let mut options = RunOptions::default();
        if present[3] {
            options = options.with_xml_path("/cli");
            expected.push("/cli".to_string());
        }
        for (i, var) in VARS.iter().enumerate() {
            if present[i] {
                let dir = format!("/{}", var.to_lowercase());
                env = env.with_var(*var, dir.clone());
                expected.push(dir);
            }
        }
        expected.push(DEFAULT_XML_PATH.to_string());
        if with_reweight {
            env = env.with_var("GENIE_REWEIGHT", "/rw");
            expected.push("/rw/config".to_string());
        }
        expected.push(FLUX_NTUPLE_PATH.to_string());

        let resolver = XmlPathResolver::new(env, options);
        let first = resolver.path_list(true).unwrap();
        let second = resolver.path_list(true).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.directories(), expected);
    }
}
