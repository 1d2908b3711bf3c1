//! The `compilingClass` / `compiledClass` observable events (`spec.md`
//! §4.D, §5: "`compilingClass` strictly precedes `compiledClass` for the
//! same class"). Modeled as typed, ordered listener registries the same
//! way `atelier_database::SaveDatabaseListeners` models `saveDatabase`.

use atelier_atom::Atom;
use atelier_database::ClassInfo;

/// Fired once a class has been determined stale, just before the external
/// compiler is invoked. `old` is a snapshot of whatever `ClassInfo` existed
/// before this compile (absent on a class's first compile); `new` is the
/// minimal stub row `{mtime, libraryName}` written ahead of the compile.
pub struct CompilingClass<'a> {
    pub class_name: Atom,
    pub old: Option<&'a ClassInfo>,
    pub new: &'a ClassInfo,
}

/// Fired once the external compiler has produced a result. `new` is the
/// fully populated row about to be written to the DB; listeners may still
/// mutate it (via `on_compiled`'s `&mut ClassInfo`) before it lands.
pub struct CompiledClass<'a> {
    pub class_name: Atom,
    pub old: Option<&'a ClassInfo>,
}

pub type CompilingListener = Box<dyn FnMut(&CompilingClass) + Send>;
pub type CompiledListener = Box<dyn FnMut(&CompiledClass, &mut ClassInfo) + Send>;

#[derive(Default)]
pub struct DispatchListeners {
    compiling: Vec<CompilingListener>,
    compiled: Vec<CompiledListener>,
}

impl DispatchListeners {
    pub fn on_compiling(&mut self, listener: CompilingListener) {
        self.compiling.push(listener);
    }

    pub fn on_compiled(&mut self, listener: CompiledListener) {
        self.compiled.push(listener);
    }

    pub(crate) fn fire_compiling(&mut self, event: &CompilingClass) {
        for listener in &mut self.compiling {
            listener(event);
        }
    }

    pub(crate) fn fire_compiled(&mut self, event: &CompiledClass, info: &mut ClassInfo) {
        for listener in &mut self.compiled {
            listener(event, info);
        }
    }
}
