//! Path-name expansion: leading `~`, `$NAME` and `${NAME}`.

use super::PathEnvironment;
use std::path::PathBuf;

/// Expand one search-path entry against the snapshot.
///
/// Returns `None` when the entry references a variable the snapshot does not
/// define, or an unterminated `${`. Whitespace is kept as part of the entry.
pub fn expand_path_name(path: &str, env: &PathEnvironment) -> Option<PathBuf> {
    let mut out = String::with_capacity(path.len());

    let rest = if path == "~" || path.starts_with("~/") {
        out.push_str(&home_dir(env)?);
        &path[1..]
    } else {
        path
    };

    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some((_, '{')) => {
                let start = i + 2;
                let end = rest[start..].find('}')? + start;
                out.push_str(env.get(&rest[start..end])?);
                while let Some((j, _)) = chars.next() {
                    if j == end {
                        break;
                    }
                }
            }
            Some((_, n)) if is_name_char(*n) => {
                let start = i + 1;
                let mut end = rest.len();
                while let Some((j, n)) = chars.peek() {
                    if !is_name_char(*n) {
                        end = *j;
                        break;
                    }
                    chars.next();
                }
                out.push_str(env.get(&rest[start..end])?);
            }
            _ => out.push('$'),
        }
    }

    Some(PathBuf::from(out))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn home_dir(env: &PathEnvironment) -> Option<String> {
    if let Some(home) = env.home() {
        return Some(home.to_string());
    }
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_string_lossy().into_owned())
}
