//! Drives `open` / `analyse_classes` over a small on-disk library with a
//! real inheritance chain, across two separate runs, to exercise staleness,
//! the ancestor walk, and descendant fixup together rather than in
//! isolation.

use std::path::Path;

use atelier_analyzer::open;
use atelier_analyzer::ClassFileCompiler;
use atelier_analyzer::ClosureSeed;
use atelier_analyzer::CompiledClass;
use atelier_analyzer::OpenOptions;
use atelier_atom::Atom;
use atelier_database::ClassInfo;
use atelier_database::Library;
use atelier_reflection::ClassLikeKind;
use atelier_reflection::ClassMeta;
use atelier_reflection::EntityKind;
use atelier_reflection::MemberEntry;
use atelier_reporting::AnalyserError;
use atelier_source::Mtime;

/// Recognises the same tiny directive syntax as the CLI's demo compiler,
/// kept self-contained here so this test does not depend on the binary
/// crate.
struct DirectiveCompiler;

impl ClassFileCompiler for DirectiveCompiler {
    fn load(&mut self, class_name: Atom, source_path: &Path) -> Result<CompiledClass, AnalyserError> {
        let source =
            std::fs::read_to_string(source_path).map_err(|source| AnalyserError::SourceIo { class_name, source })?;
        let modified = std::fs::metadata(source_path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| AnalyserError::SourceIo { class_name, source })?;

        let mut info = ClassInfo::stub(Mtime::from_system_time(modified), Atom::new("app"));
        let mut kind = ClassLikeKind::Class;
        let mut members = Vec::new();

        for line in source.lines() {
            let Some(rest) = line.trim_start().strip_prefix('#') else { continue };
            let rest = rest.trim();

            if let Some(name) = rest.strip_prefix("extends:") {
                info.extends = Some(Atom::new(name.trim()));
            } else if let Some(name) = rest.strip_prefix("implement:") {
                info.implement = vec![Atom::new(name.trim())];
            } else if rest == "kind: interface" {
                kind = ClassLikeKind::Interface;
            } else if let Some(name) = rest.strip_prefix("member:") {
                members.push(name.trim().to_string());
            }
        }

        let mut meta = ClassMeta::new(kind);
        meta.super_class = info.extends;
        meta.interfaces = info.implement.clone();
        for member in members {
            meta.members.insert(Atom::new(member.as_str()), MemberEntry::declared(&member, EntityKind::Function));
        }

        Ok(CompiledClass { info, meta })
    }
}

#[test]
fn a_class_inherits_its_interfaces_members_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(&src).unwrap();

    std::fs::write(src.join("IWidget.js"), "# kind: interface\n# member: fireEvent\n").unwrap();
    std::fs::write(src.join("Base.js"), "// no directives\n").unwrap();
    std::fs::write(src.join("Widget.js"), "# extends: app.Base\n# implement: app.IWidget\n").unwrap();

    let db_path = dir.path().join("db.json");
    let output_dir = dir.path().join("out");

    let mut session = open(OpenOptions {
        db_path: db_path.clone(),
        output_dir: output_dir.clone(),
        process_resources: false,
        libraries: vec![Library::new("app", src.clone(), "1.0.0")],
    })
    .unwrap();

    let report = session
        .analyse_classes(vec![ClosureSeed::Class(Atom::new("app.Widget"))], false, &mut DirectiveCompiler)
        .unwrap();

    assert!(report.visited.contains_key(&Atom::new("app.Widget")));
    assert!(report.visited.contains_key(&Atom::new("app.Base")));
    assert!(report.visited.contains_key(&Atom::new("app.IWidget")));

    let widget_meta_path = output_dir.join("app/Widget.meta.json");
    let raw = std::fs::read_to_string(&widget_meta_path).unwrap();
    let meta: ClassMeta = serde_json::from_str(&raw).unwrap();
    assert!(meta.members.contains_key(&Atom::new("fireEvent")), "Widget should inherit IWidget's member");

    // Re-open and re-run unchanged: nothing should need recompiling, and the
    // closure should still report every visited class from cache.
    drop(session);
    let mut session = open(OpenOptions {
        db_path,
        output_dir,
        process_resources: false,
        libraries: vec![Library::new("app", src, "1.0.0")],
    })
    .unwrap();

    let report = session
        .analyse_classes(vec![ClosureSeed::Class(Atom::new("app.Widget"))], false, &mut DirectiveCompiler)
        .unwrap();
    assert!(report.visited.contains_key(&Atom::new("app.Widget")));
}
