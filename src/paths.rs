//! XML Search Path
//!
//! Builds the ordered list of directories that may hold configuration files and
//! resolves a file basename against it. The list is recomputed on every call from
//! an environment snapshot and the run options, so the result is deterministic for
//! a fixed snapshot.

pub mod environment;
pub mod expand;
pub mod list;
pub mod resolver;

pub use environment::PathEnvironment;
pub use expand::expand_path_name;
pub use list::{split_path_list, PathList, PathSource, PATH_DELIMITERS};
pub use resolver::{Resolution, XmlPathResolver, DEFAULT_XML_PATH, FLUX_NTUPLE_PATH};
