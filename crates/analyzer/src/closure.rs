//! Component E — Dependency Closure (`spec.md` §4.E), plus the level-batched
//! diagnostic pass SPEC_FULL.md §11 adds on top: the worklist itself stays
//! strictly sequential (one outstanding compile at a time, `spec.md` §5);
//! `ClosureReport::levels` only reuses the teacher's level-computation
//! algorithm read-only, after the fact, for observability.

use atelier_atom::Atom;
use atelier_atom::AtomMap;
use atelier_atom::AtomSet;
use atelier_database::ClassInfo;
use atelier_database::LibraryIndex;
use atelier_reporting::AnalyserError;

/// Either a bare class name or a whole library namespace — expanding a
/// namespace to every class the library index currently knows about lets a
/// driver seed "all of library X" in one call (SPEC_FULL.md §11).
pub enum ClosureSeed {
    Class(Atom),
    Library(Atom),
}

impl ClosureSeed {
    fn expand(self, libraries: &LibraryIndex) -> Vec<Atom> {
        match self {
            ClosureSeed::Class(name) => vec![name],
            ClosureSeed::Library(namespace) => match libraries.find_library(namespace) {
                Some(library) => library.scan_for_classes(),
                None => Vec::new(),
            },
        }
    }
}

/// The outcome of draining a closure: every class visited, its final
/// `ClassInfo`, and the dependency levels realized among them.
pub struct ClosureReport {
    pub visited: AtomMap<ClassInfo>,
    pub levels: Vec<Vec<Atom>>,
}

/// Drains a worklist seeded from `seeds`, invoking `compile` (component D)
/// for each class in insertion order with de-duplication. `NoClassFile` is
/// logged and the class is skipped; any other error aborts the whole
/// closure (`spec.md` §4.E).
pub fn drain<F>(seeds: Vec<ClosureSeed>, libraries: &LibraryIndex, mut compile: F) -> Result<ClosureReport, AnalyserError>
where
    F: FnMut(Atom) -> Result<ClassInfo, AnalyserError>,
{
    let mut queued = AtomSet::default();
    let mut worklist: Vec<Atom> = Vec::new();

    for seed in seeds {
        for class_name in seed.expand(libraries) {
            if queued.insert(class_name) {
                worklist.push(class_name);
            }
        }
    }

    let mut visited: AtomMap<ClassInfo> = AtomMap::default();
    let mut cursor = 0;

    while cursor < worklist.len() {
        let class_name = worklist[cursor];
        cursor += 1;

        let info = match compile(class_name) {
            Ok(info) => info,
            Err(err) if err.is_recoverable_in_closure() => {
                tracing::warn!(class = %class_name, error = %err, "skipping class in dependency closure");
                continue;
            }
            Err(err) => return Err(err),
        };

        for (dependency, _flags) in info.depends_on.iter() {
            if queued.insert(*dependency) {
                worklist.push(*dependency);
            }
        }

        visited.insert(class_name, info);
    }

    lift_indirect_load_dependencies(&mut visited);

    let levels = compute_levels(&visited);

    Ok(ClosureReport { visited, levels })
}

/// "For every class `C` in the closure, for every `D` such that
/// `C.dependsOn[D].load`, copy the `construct`-flagged deps of `D` into
/// `C.dependsOn[*].load = true`" (`spec.md` §4.E). Runs once, after the
/// worklist has fully drained, since it needs every class's final
/// `dependsOn` map.
fn lift_indirect_load_dependencies(visited: &mut AtomMap<ClassInfo>) {
    let construct_deps_of: AtomMap<Vec<Atom>> = visited
        .iter()
        .map(|(name, info)| {
            let constructs =
                info.depends_on.iter().filter(|(_, flags)| flags.construct).map(|(dep, _)| *dep).collect();
            (*name, constructs)
        })
        .collect();

    let class_names: Vec<Atom> = visited.keys().copied().collect();
    for class_name in class_names {
        let load_targets: Vec<Atom> = visited[&class_name]
            .depends_on
            .iter()
            .filter(|(_, flags)| flags.load)
            .map(|(dep, _)| *dep)
            .collect();

        let mut lifted = Vec::new();
        for load_target in load_targets {
            if let Some(constructs) = construct_deps_of.get(&load_target) {
                lifted.extend(constructs.iter().copied());
            }
        }

        let info = visited.get_mut(&class_name).expect("class_name came from visited.keys()");
        for dep in lifted {
            info.depends_on.entry(dep).or_default().load = true;
        }
    }
}

/// Groups the closure by dependency depth, the same memoized-DFS shape as
/// the teacher's `DependencyGraph::build` (`mago-codex/src/dependency/mod.rs`),
/// read-only and after the fact: level 0 is every class with no `dependsOn`
/// edge inside the closure; level N+1 depends on at least one level-N class.
fn compute_levels(visited: &AtomMap<ClassInfo>) -> Vec<Vec<Atom>> {
    if visited.is_empty() {
        return Vec::new();
    }

    let mut depths: AtomMap<usize> = AtomMap::default();
    let mut visiting = AtomSet::default();

    let names: Vec<Atom> = visited.keys().copied().collect();
    for name in &names {
        compute_depth(*name, visited, &mut depths, &mut visiting);
    }

    let max_depth = depths.values().copied().max().unwrap_or(0);
    let mut levels: Vec<Vec<Atom>> = vec![Vec::new(); max_depth + 1];
    for (name, depth) in &depths {
        levels[*depth].push(*name);
    }
    for level in &mut levels {
        level.sort_by_key(|atom| atom.to_string());
    }

    levels
}

fn compute_depth(class_name: Atom, visited: &AtomMap<ClassInfo>, depths: &mut AtomMap<usize>, visiting: &mut AtomSet) -> usize {
    if let Some(&depth) = depths.get(&class_name) {
        return depth;
    }
    if visiting.contains(&class_name) {
        return 0;
    }

    visiting.insert(class_name);

    let Some(info) = visited.get(&class_name) else {
        visiting.remove(&class_name);
        depths.insert(class_name, 0);
        return 0;
    };

    let deps_in_closure: Vec<Atom> = info.depends_on.keys().copied().filter(|dep| visited.contains_key(dep)).collect();

    let depth = if deps_in_closure.is_empty() {
        0
    } else {
        1 + deps_in_closure.into_iter().map(|dep| compute_depth(dep, visited, depths, visiting)).max().unwrap_or(0)
    };

    visiting.remove(&class_name);
    depths.insert(class_name, depth);
    depth
}

#[cfg(test)]
mod tests {
    use atelier_database::DependencyFlags;
    use atelier_source::Mtime;

    use super::*;

    fn stub(name: &str) -> ClassInfo {
        ClassInfo::stub(Mtime::from_system_time(std::time::UNIX_EPOCH), Atom::new(name))
    }

    #[test]
    fn closure_visits_unseen_transitive_dependencies_exactly_once() {
        let libraries = LibraryIndex::new();
        let mut call_count: AtomMap<usize> = AtomMap::default();

        let report = drain(vec![ClosureSeed::Class(Atom::new("app.F"))], &libraries, |class_name| {
            *call_count.entry(class_name).or_default() += 1;

            let mut info = stub("app");
            if class_name == Atom::new("app.F") {
                info.depends_on.insert(Atom::new("app.G"), DependencyFlags::load());
            }
            Ok(info)
        })
        .unwrap();

        assert_eq!(report.visited.len(), 2);
        assert_eq!(call_count.get(&Atom::new("app.F")), Some(&1));
        assert_eq!(call_count.get(&Atom::new("app.G")), Some(&1));
    }

    #[test]
    fn no_class_file_is_logged_and_skipped_not_fatal() {
        let libraries = LibraryIndex::new();

        let report = drain(vec![ClosureSeed::Class(Atom::new("app.Missing"))], &libraries, |class_name| {
            Err(AnalyserError::NoClassFile { class_name })
        })
        .unwrap();

        assert!(report.visited.is_empty());
    }

    #[test]
    fn parse_error_aborts_the_whole_closure() {
        let libraries = LibraryIndex::new();

        let result = drain(vec![ClosureSeed::Class(Atom::new("app.Bad"))], &libraries, |class_name| {
            Err(AnalyserError::Parse { class_name, message: "syntax error".to_string() })
        });

        assert!(matches!(result, Err(AnalyserError::Parse { .. })));
    }

    #[test]
    fn indirect_load_lift_copies_construct_deps_of_a_load_dependency() {
        let libraries = LibraryIndex::new();

        let report = drain(vec![ClosureSeed::Class(Atom::new("app.F"))], &libraries, |class_name| {
            let mut info = stub("app");
            if class_name == Atom::new("app.F") {
                info.depends_on.insert(Atom::new("app.G"), DependencyFlags::load());
            } else if class_name == Atom::new("app.G") {
                info.depends_on.insert(Atom::new("app.H"), DependencyFlags::construct());
            }
            Ok(info)
        })
        .unwrap();

        let f_deps = &report.visited[&Atom::new("app.F")].depends_on;
        assert!(f_deps.get(&Atom::new("app.H")).unwrap().load);
    }

    #[test]
    fn levels_place_a_dependency_before_its_dependent() {
        let libraries = LibraryIndex::new();

        let report = drain(vec![ClosureSeed::Class(Atom::new("app.B"))], &libraries, |class_name| {
            let mut info = stub("app");
            if class_name == Atom::new("app.B") {
                info.depends_on.insert(Atom::new("app.A"), DependencyFlags::construct());
            }
            Ok(info)
        })
        .unwrap();

        assert_eq!(report.levels[0], vec![Atom::new("app.A")]);
        assert_eq!(report.levels[1], vec![Atom::new("app.B")]);
    }
}
