use std::{env, error::Error, path::PathBuf};

use crate::{source::DirectorySource, Modules};

/// Loads descriptors from a layered directory pair and returns a session with
/// the graph already built, ready for enable calls.
#[derive(Default)]
pub struct ModulesBuilder {
    home_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    modules_dir_name: Option<PathBuf>,
}

impl ModulesBuilder {
    /// Server home directory holding the stock module descriptors.
    ///
    /// Defaults to the current directory.
    pub fn home_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(path.into());
        self
    }

    /// Override directory; its descriptor files replace home files of the
    /// same name.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Name of the descriptor directory under each root.
    ///
    /// Defaults to `modules`.
    pub fn modules_dir_name(mut self, name: impl Into<PathBuf>) -> Self {
        self.modules_dir_name = Some(name.into());
        self
    }

    pub fn try_build(self) -> Result<Modules, Box<dyn Error>> {
        let home_dir = match self.home_dir {
            Some(home_dir) => home_dir,
            None => env::current_dir()?,
        };

        let mut source = DirectorySource::new(home_dir, self.base_dir);
        if let Some(name) = self.modules_dir_name {
            source = source.modules_dir_name(name);
        }

        let mut modules = Modules::new();
        modules.register_all(&mut source)?;
        modules.build_graph()?;
        Ok(modules)
    }
}
