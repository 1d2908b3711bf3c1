//! File-system stat primitives used by the staleness oracle.
//!
//! Nothing in this crate parses source files — parsing a class file into a
//! `ClassFile` is the job of the external compiler this analyser drives (see
//! the workspace root's `ClassFileCompiler` trait). This crate only answers
//! "does this path exist, and when was it last modified" in a form that is
//! stable enough to compare and persist across runs.

use std::fmt;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

/// A file modification time, truncated to whole seconds.
///
/// Whole-second truncation matches what most source trees actually need:
/// two writes within the same second are vanishingly rare for hand-edited
/// class files, and it keeps the persisted `db.json` free of
/// platform-dependent nanosecond jitter that would otherwise make "did this
/// change" comparisons flaky across filesystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Mtime(u64);

impl Mtime {
    #[inline]
    pub fn from_system_time(time: SystemTime) -> Self {
        let secs = time.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);

        Self(secs)
    }

    #[inline]
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Mtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of statting a path: whether it exists, and its mtime if so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStat {
    pub exists: bool,
    pub mtime: Option<Mtime>,
}

impl PathStat {
    pub const MISSING: PathStat = PathStat { exists: false, mtime: None };

    /// Stats `path`, returning `MISSING` (not an error) when the path does
    /// not exist. Any other I/O failure (permissions, broken symlink, …) is
    /// surfaced to the caller.
    pub fn of(path: &Path) -> io::Result<Self> {
        match std::fs::metadata(path) {
            Ok(metadata) => {
                let mtime = metadata.modified()?;

                Ok(Self { exists: true, mtime: Some(Mtime::from_system_time(mtime)) })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::MISSING),
            Err(err) => Err(err),
        }
    }

    /// `true` iff the path exists and `self.mtime >= other` component-wise.
    pub fn is_at_least_as_new_as(&self, other: Mtime) -> bool {
        matches!(self.mtime, Some(mtime) if mtime >= other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_reported_without_erroring() {
        let stat = PathStat::of(Path::new("/does/not/exist/anywhere.js")).unwrap();

        assert!(!stat.exists);
        assert_eq!(stat.mtime, None);
    }

    #[test]
    fn existing_path_reports_mtime() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let stat = PathStat::of(file.path()).unwrap();

        assert!(stat.exists);
        assert!(stat.mtime.is_some());
    }

    #[test]
    fn freshness_comparison_is_inclusive() {
        let mtime = Mtime(100);
        let stat = PathStat { exists: true, mtime: Some(Mtime(100)) };

        assert!(stat.is_at_least_as_new_as(mtime));
        assert!(!PathStat::MISSING.is_at_least_as_new_as(mtime));
    }
}
