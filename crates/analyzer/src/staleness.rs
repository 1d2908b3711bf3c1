//! Component C — the Staleness Oracle (`spec.md` §4.C).

use atelier_database::ClassInfo;
use atelier_source::PathStat;

/// What the oracle needs to decide freshness: the three file stats plus
/// whatever `ClassInfo` the DB currently holds for this class, if any.
/// `source` must report `exists` — the caller checks that first, since only
/// it has the class name needed to raise `NoClassFile` (`spec.md` §4.C:
/// "the source file not existing is a terminal error").
pub struct StalenessInputs<'a> {
    pub source: PathStat,
    pub output: PathStat,
    pub output_meta: PathStat,
    pub class_info: Option<&'a ClassInfo>,
    pub force_scan: bool,
}

/// A class is **fresh** iff all of: a `ClassInfo` row exists, its `mtime`
/// matches the source exactly, the compiled output and meta files both
/// exist, and the output is at least as new as the source (`spec.md`
/// §4.C). `force_scan` short-circuits straight to stale.
pub fn check(inputs: &StalenessInputs) -> bool {
    debug_assert!(inputs.source.exists, "caller must reject a missing source before calling check()");

    if inputs.force_scan {
        return false;
    }

    let Some(class_info) = inputs.class_info else {
        return false;
    };

    let Some(source_mtime) = inputs.source.mtime else {
        return false;
    };

    class_info.mtime == source_mtime
        && inputs.output.exists
        && inputs.output_meta.exists
        && inputs.output.is_at_least_as_new_as(source_mtime)
}

#[cfg(test)]
mod tests {
    use atelier_atom::Atom;
    use atelier_source::Mtime;

    use super::*;

    fn info_at(secs: u64) -> ClassInfo {
        ClassInfo::stub(Mtime::from_system_time(std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs)), Atom::new("app"))
    }

    fn stat_at(secs: u64) -> PathStat {
        PathStat { exists: true, mtime: Some(Mtime::from_system_time(std::time::UNIX_EPOCH + std::time::Duration::from_secs(secs))) }
    }

    #[test]
    fn no_class_info_is_stale() {
        let inputs = StalenessInputs {
            source: stat_at(10),
            output: stat_at(10),
            output_meta: stat_at(10),
            class_info: None,
            force_scan: false,
        };

        assert!(!check(&inputs));
    }

    #[test]
    fn matching_mtimes_and_present_outputs_is_fresh() {
        let info = info_at(10);
        let inputs = StalenessInputs {
            source: stat_at(10),
            output: stat_at(10),
            output_meta: stat_at(10),
            class_info: Some(&info),
            force_scan: false,
        };

        assert!(check(&inputs));
    }

    #[test]
    fn touched_source_is_stale_even_with_present_outputs() {
        let info = info_at(10);
        let inputs = StalenessInputs {
            source: stat_at(20),
            output: stat_at(10),
            output_meta: stat_at(10),
            class_info: Some(&info),
            force_scan: false,
        };

        assert!(!check(&inputs));
    }

    #[test]
    fn missing_meta_file_is_stale() {
        let info = info_at(10);
        let inputs = StalenessInputs {
            source: stat_at(10),
            output: stat_at(10),
            output_meta: PathStat::MISSING,
            class_info: Some(&info),
            force_scan: false,
        };

        assert!(!check(&inputs));
    }

    #[test]
    fn force_scan_is_always_stale() {
        let info = info_at(10);
        let inputs = StalenessInputs {
            source: stat_at(10),
            output: stat_at(10),
            output_meta: stat_at(10),
            class_info: Some(&info),
            force_scan: true,
        };

        assert!(!check(&inputs));
    }
}
