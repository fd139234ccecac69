//! Companion load-script generation for the external numeric tool.
//!
//! Every data file an experiment writes is registered here; at the end a
//! single script is emitted that `cd`s into the output directory and loads
//! each file, so the whole run can be pulled into the plotting environment
//! in one step.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// Collects the data files of one experiment run and writes their
/// load-script.
///
/// Created with an output directory, which is wiped and recreated so every
/// run starts clean. [`ScriptBuilder::file`] registers a name and hands
/// back the path to write the data to; [`ScriptBuilder::write_script`]
/// emits the loader with one `load` line per registered file.
#[derive(Debug)]
pub struct ScriptBuilder {
    dir: PathBuf,
    files: Vec<String>,
}

impl ScriptBuilder {
    /// Wipe and recreate `dir` as the run's output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: Vec::new(),
        })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Register a data file and return the path to write it to.
    ///
    /// Names without an extension get `.txt` appended, matching the flat
    /// text dumps of [`save_signal`](crate::save_signal).
    pub fn file(&mut self, name: &str) -> PathBuf {
        let file_name = if name.contains('.') {
            name.to_owned()
        } else {
            format!("{name}.txt")
        };
        self.files.push(file_name.clone());
        self.dir.join(file_name)
    }

    /// Write the load-script listing every registered file.
    pub fn write_script(&self) -> Result<PathBuf> {
        let path = self.dir.join("load_all.m");
        let mut script = fs::File::create(&path)?;

        writeln!(script, "cd {}", self.dir.display())?;
        for name in &self.files {
            writeln!(script, "load('{name}');")?;
        }

        info!(
            script = %path.display(),
            files = self.files.len(),
            "wrote companion load-script"
        );
        Ok(path)
    }
}
