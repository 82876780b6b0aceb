use algconf::paths::PathEnvironment;
use std::fs;
use std::path::Path;

/// Write `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Master file listing `(alg, file)` algorithm entries and `(id, file)` common lists.
pub fn master_config(algs: &[(&str, &str)], common: &[(&str, &str)]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<master_config>\n");
    for (alg, file) in algs {
        out.push_str(&format!("  <config alg=\"{}\">{}</config>\n", alg, file));
    }
    for (id, file) in common {
        out.push_str(&format!(
            "  <common_param_list name=\"{}\">{}</common_param_list>\n",
            id, file
        ));
    }
    out.push_str("</master_config>\n");
    out
}

/// One `<param_set>` block from `(type, name, value)` triples.
pub fn param_set(name: &str, params: &[(&str, &str, &str)]) -> String {
    let mut out = format!("  <param_set name=\"{}\">\n", name);
    for (ty, param, value) in params {
        out.push_str(&format!(
            "    <param type=\"{}\" name=\"{}\"> {} </param>\n",
            ty, param, value
        ));
    }
    out.push_str("  </param_set>\n");
    out
}

pub fn config_file(root: &str, sets: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<{root}>\n{}</{root}>\n",
        sets.concat(),
        root = root
    )
}

pub fn alg_conf(sets: &[String]) -> String {
    config_file("alg_conf", sets)
}

/// Snapshot whose only search-path variable is `GXMLPATH` listing `dirs`.
pub fn env_with_xml_path(dirs: &[&Path]) -> PathEnvironment {
    let joined = dirs
        .iter()
        .map(|d| d.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(":");
    PathEnvironment::from_vars([("GXMLPATH", joined)])
}
