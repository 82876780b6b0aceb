//! Ordered search path and delimiter handling.

use serde::Serialize;
use std::fmt;

/// Characters accepted as separators between search-path entries.
pub const PATH_DELIMITERS: [char; 3] = [':', ';', ','];

/// Where a search-path segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// `--xml-path` run option
    RunOption,
    /// `GXMLPATH`, `GXMLPATHS` or `GALGCONF`
    Environment(&'static str),
    TuneDirectory,
    CmcDirectory,
    Default,
    Reweight,
    FluxNtuple,
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSource::RunOption => f.write_str("--xml-path"),
            PathSource::Environment(var) => write!(f, "${}", var),
            PathSource::TuneDirectory => f.write_str("tune"),
            PathSource::CmcDirectory => f.write_str("cmc"),
            PathSource::Default => f.write_str("default"),
            PathSource::Reweight => f.write_str("reweight"),
            PathSource::FluxNtuple => f.write_str("flux"),
        }
    }
}

/// One appended source value. It may itself hold several delimited entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub source: PathSource,
    pub value: String,
}

/// Search path in precedence order: earlier segments win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathList {
    segments: Vec<PathSegment>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: PathSource, value: impl Into<String>) {
        self.segments.push(PathSegment {
            source,
            value: value.into(),
        });
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Individual candidate directories (unexpanded), in search order.
    pub fn directories(&self) -> Vec<String> {
        split_path_list(&self.to_string())
    }
}

/// Colon-joined form, e.g. `/opt/cfg:$GENIE/config`.
impl fmt::Display for PathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            f.write_str(&segment.value)?;
        }
        Ok(())
    }
}

/// Split on any of `:`, `;`, `,`, dropping empty entries.
pub fn split_path_list(text: &str) -> Vec<String> {
    text.split(&PATH_DELIMITERS[..])
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
