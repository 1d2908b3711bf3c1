use std::path::PathBuf;

use clap::Parser;

use atelier_atom::Atom;
use atelier_reflection::ClassMeta;

use crate::config::Configuration;
use crate::error::Error;

#[derive(Parser, Debug)]
pub struct InspectCommand {
    /// The fully-qualified class name whose merged meta to dump.
    pub class_name: String,
}

impl InspectCommand {
    pub fn execute(self, workspace: PathBuf, configuration: Configuration) -> Result<(), Error> {
        let output_dir = configuration.output_dir.clone().ok_or(Error::OutputDirRequired)?;
        let class_name = Atom::new(self.class_name.as_str());

        let relative = class_name.as_str().replace('.', "/");
        let path = output_dir.join(format!("{relative}.meta.json"));

        let raw = std::fs::read_to_string(&path).map_err(|_| Error::NoSuchClass(class_name))?;
        let meta: ClassMeta = serde_json::from_str(&raw)?;

        println!("{}", serde_json::to_string_pretty(&meta)?);

        let _ = workspace;
        Ok(())
    }
}
