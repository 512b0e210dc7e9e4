use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use crate::model::module::ModuleRecord;

pub const DEFAULT_MODULES_DIR_NAME: &str = "modules";

/// Enumerates parsed module descriptor records. Layering between descriptor
/// roots is the source's concern; consumers receive one record per module
/// file, ready for registration.
pub trait DescriptorSource {
    fn records(&mut self) -> anyhow::Result<Vec<ModuleRecord>>;
}

/// Reads `<dir>/<modules_dir_name>/*.toml` descriptor files from a home
/// directory, with an optional base directory whose files replace home files
/// of the same file name wholesale. Enumeration is in sorted file-name order.
pub struct DirectorySource {
    home_dir: PathBuf,
    base_dir: Option<PathBuf>,
    modules_dir_name: PathBuf,
}

impl DirectorySource {
    pub fn new(home_dir: impl Into<PathBuf>, base_dir: Option<PathBuf>) -> Self {
        DirectorySource {
            home_dir: home_dir.into(),
            base_dir,
            modules_dir_name: PathBuf::from(DEFAULT_MODULES_DIR_NAME),
        }
    }

    pub fn modules_dir_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.modules_dir_name = name.into();
        self
    }

    fn descriptor_files(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let dir = root.join(&self.modules_dir_name);
        if !dir.is_dir() {
            debug!("No module descriptor directory at {}", dir.display());
            return Ok(vec![]);
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("could not read module directory {}", dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DescriptorSource for DirectorySource {
    fn records(&mut self) -> anyhow::Result<Vec<ModuleRecord>> {
        let mut files = self.descriptor_files(&self.home_dir)?;

        if let Some(base_dir) = &self.base_dir {
            for override_file in self.descriptor_files(base_dir)? {
                if files.iter().any(|f| f.file_name() == override_file.file_name()) {
                    debug!("Descriptor {} overrides home copy", override_file.display());
                    files.retain(|f| f.file_name() != override_file.file_name());
                }
                files.push(override_file);
            }
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        files
            .iter()
            .map(|file| {
                ModuleRecord::from_file(file)
                    .with_context(|| format!("invalid module descriptor {}", file.display()))
            })
            .collect()
    }
}

/// In-memory source, for embedding and tests.
pub struct StaticSource(Vec<ModuleRecord>);

impl StaticSource {
    pub fn new(records: Vec<ModuleRecord>) -> Self {
        StaticSource(records)
    }
}

impl DescriptorSource for StaticSource {
    fn records(&mut self) -> anyhow::Result<Vec<ModuleRecord>> {
        Ok(std::mem::take(&mut self.0))
    }
}
