use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::{
    model::module::{Module, ModuleName, ModuleRecord},
    source::DescriptorSource,
};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("module `{0}` is already registered")]
    DuplicateModule(ModuleName),
    #[error("error while draining descriptor source: {0}")]
    Source(#[from] anyhow::Error),
}

/// Owns the set of registered modules. Structure is append-only until the
/// graph is built, at which point the registry is consumed.
#[derive(Default)]
pub struct Registry {
    modules: Vec<Module>,
    index: HashMap<ModuleName, usize>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers one parsed descriptor record under its unique name.
    pub fn register(&mut self, record: ModuleRecord) -> Result<(), RegistryError> {
        if self.index.contains_key(&record.name) {
            return Err(RegistryError::DuplicateModule(record.name));
        }
        debug!("Registering module {}", record.name);
        let module = Module::new(record);
        self.index.insert(module.name().clone(), self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    /// Drains the descriptor source and registers every record. Any failure
    /// aborts the whole load and leaves the registry exactly as it was.
    pub fn register_all(&mut self, source: &mut dyn DescriptorSource) -> Result<(), RegistryError> {
        let records = source.records()?;

        let mut staged = Registry::new();
        for record in records {
            if self.index.contains_key(&record.name) {
                return Err(RegistryError::DuplicateModule(record.name));
            }
            staged.register(record)?;
        }

        for module in staged.modules {
            self.index.insert(module.name().clone(), self.modules.len());
            self.modules.push(module);
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.modules.len()
    }

    pub fn lookup(&self, name: &ModuleName) -> Option<&Module> {
        self.index.get(name).map(|&idx| &self.modules[idx])
    }

    pub(crate) fn into_parts(self) -> (Vec<Module>, HashMap<ModuleName, usize>) {
        (self.modules, self.index)
    }

    pub(crate) fn index_of(&self, name: &ModuleName) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn modules(&self) -> &[Module] {
        &self.modules
    }
}
