use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use thiserror::Error;

pub const LONLAT_EXTENSION: &str = "lonlat";
pub const DEFAULT_DIR_PATTERN: &str = "*.lonlat";

const WILDCARDS: [char; 4] = ['*', '?', '[', ']'];

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("target not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no .lonlat files matched")]
    NoMatches,
    #[error("invalid glob pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// What the user pointed the tool at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Contains a wildcard, expanded as a glob as-is.
    Pattern(String),
    Directory(PathBuf),
    File(PathBuf),
}

impl Target {
    pub fn detect(raw: &str) -> Result<Self, TargetError> {
        if has_wildcard(raw) {
            return Ok(Self::Pattern(raw.to_owned()));
        }
        let path = PathBuf::from(raw);
        if path.is_dir() {
            Ok(Self::Directory(path))
        } else if path.is_file() {
            Ok(Self::File(path))
        } else {
            Err(TargetError::NotFound(path))
        }
    }

    /// Every path the target names, before any extension filtering.
    /// `dir_pattern` is only used for [`Target::Directory`].
    pub fn candidates(
        &self,
        dir_pattern: &str,
    ) -> Result<Vec<PathBuf>, TargetError> {
        match self {
            // hidden files only match a pattern that names the dot
            Self::Pattern(pattern) => expand(
                pattern,
                MatchOptions {
                    require_literal_leading_dot: true,
                    ..MatchOptions::new()
                },
            ),
            Self::Directory(dir) => {
                let base = glob::Pattern::escape(&dir.to_string_lossy());
                let pattern = Path::new(&base).join(dir_pattern);
                expand(&pattern.to_string_lossy(), MatchOptions::new())
            }
            Self::File(path) => Ok(vec![path.clone()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// Pattern applied inside a directory target.
    pub dir_pattern: String,
    /// Ignore files named like a previous split's output (`<stem>_<n>`).
    pub skip_split_outputs: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            dir_pattern: DEFAULT_DIR_PATTERN.to_owned(),
            skip_split_outputs: false,
        }
    }
}

/// Resolve `raw` into the lonlat files to split, in lexical order.
pub fn select_inputs(
    raw: &str,
    options: &SelectOptions,
) -> Result<Vec<PathBuf>, TargetError> {
    let target = Target::detect(raw)?;
    let inputs: Vec<PathBuf> = target
        .candidates(&options.dir_pattern)?
        .into_iter()
        .filter(|path| {
            let accepted = path.is_file()
                && is_lonlat(path)
                && !(options.skip_split_outputs && is_split_output(path));
            if !accepted {
                log::debug!("ignoring {}", path.display());
            }
            accepted
        })
        .collect();
    if inputs.is_empty() {
        return Err(TargetError::NoMatches);
    }
    Ok(inputs)
}

pub fn has_wildcard(raw: &str) -> bool {
    raw.contains(WILDCARDS)
}

/// Case-insensitive check for the `.lonlat` extension.
pub fn is_lonlat(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LONLAT_EXTENSION))
}

/// True for names produced by splitting, like `G2_3.lonlat`.
pub fn is_split_output(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
        return false;
    };
    match stem.rsplit_once('_') {
        Some((base, index)) => {
            !base.is_empty()
                && !index.is_empty()
                && index.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn expand(
    pattern: &str,
    options: MatchOptions,
) -> Result<Vec<PathBuf>, TargetError> {
    let entries = glob::glob_with(pattern, options).map_err(|source| {
        TargetError::Pattern {
            pattern: pattern.to_owned(),
            source,
        }
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                log::debug!("unreadable {}: {}", err.path().display(), err);
                None
            }
        })
        .collect();
    paths.sort();
    Ok(paths)
}
