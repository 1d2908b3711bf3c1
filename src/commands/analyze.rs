use std::path::Path;
use std::path::PathBuf;

use clap::Parser;

use atelier_analyzer::open;
use atelier_analyzer::ClassFileCompiler;
use atelier_analyzer::ClosureSeed;
use atelier_analyzer::CompiledClass;
use atelier_analyzer::OpenOptions;
use atelier_atom::Atom;
use atelier_database::ClassInfo;
use atelier_database::DependencyFlags;
use atelier_database::Library;
use atelier_reflection::ClassLikeKind;
use atelier_reflection::ClassMeta;
use atelier_reporting::AnalyserError;
use atelier_source::Mtime;

use crate::config::Configuration;
use crate::error::Error;

#[derive(Parser, Debug)]
pub struct AnalyzeCommand {
    /// Namespace of the library rooted at the workspace directory. Defaults
    /// to the workspace directory's own name.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Fully-qualified class names to seed the dependency closure. If none
    /// are given, every class under the library is scanned.
    #[arg(long = "class", value_name = "CLASS_NAME")]
    pub classes: Vec<String>,

    /// Recompile every class in the closure regardless of cached freshness.
    #[arg(long)]
    pub force_scan: bool,
}

impl AnalyzeCommand {
    pub fn execute(self, workspace: PathBuf, configuration: Configuration) -> Result<(), Error> {
        let output_dir = configuration.output_dir.clone().ok_or(Error::OutputDirRequired)?;
        let namespace = self.namespace.unwrap_or_else(|| default_namespace(&workspace));

        let mut session = open(OpenOptions {
            db_path: configuration.db_path(&workspace),
            output_dir,
            process_resources: configuration.process_resources,
            libraries: vec![Library::new(namespace.clone(), workspace.clone(), "0.0.0")],
        })?;

        let seeds = if self.classes.is_empty() {
            vec![ClosureSeed::Library(Atom::new(namespace.as_str()))]
        } else {
            self.classes.iter().map(|name| ClosureSeed::Class(Atom::new(name.as_str()))).collect()
        };

        let mut compiler = DeclarationScanningCompiler { track_line_numbers: configuration.track_line_numbers };
        let report = session.analyse_classes(seeds, self.force_scan, &mut compiler)?;

        println!("compiled {} class(es) across {} dependency level(s)", report.visited.len(), report.levels.len());
        for (depth, level) in report.levels.iter().enumerate() {
            let mut names: Vec<&str> = level.iter().map(Atom::as_str).collect();
            names.sort_unstable();
            println!("  level {depth}: {}", names.join(", "));
        }

        Ok(())
    }
}

fn default_namespace(workspace: &Path) -> String {
    workspace.file_name().and_then(|name| name.to_str()).unwrap_or("app").to_string()
}

/// A line-oriented stand-in for the external front-end compiler (`spec.md`
/// §1, §9 treat it as an opaque collaborator reached only through
/// [`ClassFileCompiler`]). This binary has no real parser for the source
/// language, so it recognises a minimal directive syntax, one per line,
/// sufficient to drive the analyser end-to-end:
///
/// ```text
/// # kind: interface | mixin
/// # extends: app.Base
/// # implement: app.IWidget, app.IOther
/// # include: app.MMixin
/// # depends: app.Helper load construct
/// ```
struct DeclarationScanningCompiler {
    #[allow(dead_code)]
    track_line_numbers: bool,
}

impl ClassFileCompiler for DeclarationScanningCompiler {
    fn load(&mut self, class_name: Atom, source_path: &Path) -> Result<CompiledClass, AnalyserError> {
        let source =
            std::fs::read_to_string(source_path).map_err(|source| AnalyserError::SourceIo { class_name, source })?;
        let modified = std::fs::metadata(source_path)
            .and_then(|metadata| metadata.modified())
            .map_err(|source| AnalyserError::SourceIo { class_name, source })?;

        let library_name = class_name.as_str().split('.').next().unwrap_or(class_name.as_str());
        let mut info = ClassInfo::stub(Mtime::from_system_time(modified), Atom::new(library_name));
        let mut kind = ClassLikeKind::Class;

        for line in source.lines() {
            let Some(directive) = line.trim_start().strip_prefix('#') else { continue };
            let directive = directive.trim();

            if let Some(rest) = directive.strip_prefix("kind:") {
                kind = match rest.trim() {
                    "interface" => ClassLikeKind::Interface,
                    "mixin" => ClassLikeKind::Mixin,
                    _ => ClassLikeKind::Class,
                };
            } else if let Some(rest) = directive.strip_prefix("extends:") {
                info.extends = Some(Atom::new(rest.trim()));
            } else if let Some(rest) = directive.strip_prefix("implement:") {
                info.implement = split_names(rest);
            } else if let Some(rest) = directive.strip_prefix("include:") {
                info.include = split_names(rest);
            } else if let Some(rest) = directive.strip_prefix("depends:") {
                record_dependency(&mut info, rest);
            }
        }

        // The meta's own ancestor fields are what the merger walks; a real
        // compiler keeps these in lockstep with the `ClassInfo` row it writes.
        let mut meta = ClassMeta::new(kind);
        meta.super_class = info.extends;
        meta.interfaces = info.implement.clone();
        meta.mixins = info.include.clone();

        Ok(CompiledClass { info, meta })
    }
}

fn record_dependency(info: &mut ClassInfo, rest: &str) {
    let mut parts = rest.split_whitespace();
    let Some(name) = parts.next() else { return };

    let mut flags = DependencyFlags::default();
    for flag in parts {
        match flag {
            "load" => flags.merge(DependencyFlags::load()),
            "construct" => flags.merge(DependencyFlags::construct()),
            _ => {}
        }
    }

    info.depends_on.entry(Atom::new(name)).or_default().merge(flags);
}

fn split_names(rest: &str) -> Vec<Atom> {
    rest.split(',').map(str::trim).filter(|name| !name.is_empty()).map(Atom::new).collect()
}
