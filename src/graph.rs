use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::{
    model::module::{Module, ModuleName},
    registry::Registry,
};

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("module `{module}` depends on unknown module `{missing}`")]
    MissingDependency {
        module: ModuleName,
        missing: ModuleName,
    },
}

/// The registry with every declared dependency name resolved to a module
/// index. Edge vectors are parallel to the module vector and preserve
/// declaration order. Structure is immutable once built; only the `enabled`
/// flags change afterwards, via the activation engine.
#[derive(Debug)]
pub struct ModuleGraph {
    modules: Vec<Module>,
    index: HashMap<ModuleName, usize>,
    requires: Vec<Vec<usize>>,
    optional: Vec<Vec<usize>>,
}

impl ModuleGraph {
    /// Resolves every `requires`/`optional` entry of every registered module,
    /// failing on the first name with no registered module. Does not touch
    /// `enabled` flags; cycle detection is deferred to resolution.
    pub fn build(registry: Registry) -> Result<ModuleGraph, GraphError> {
        let mut requires = Vec::with_capacity(registry.count());
        let mut optional = Vec::with_capacity(registry.count());

        for module in registry.modules() {
            requires.push(resolve_edges(&registry, module, module.requires())?);
            optional.push(resolve_edges(&registry, module, module.optional())?);
        }

        debug!("Built dependency graph over {} modules", registry.count());
        let (modules, index) = registry.into_parts();
        Ok(ModuleGraph {
            modules,
            index,
            requires,
            optional,
        })
    }

    pub fn count(&self) -> usize {
        self.modules.len()
    }

    pub fn lookup(&self, name: &ModuleName) -> Option<&Module> {
        self.index_of(name).map(|idx| &self.modules[idx])
    }

    pub(crate) fn index_of(&self, name: &ModuleName) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn module(&self, idx: usize) -> &Module {
        &self.modules[idx]
    }

    pub(crate) fn module_mut(&mut self, idx: usize) -> &mut Module {
        &mut self.modules[idx]
    }

    pub(crate) fn requires_of(&self, idx: usize) -> &[usize] {
        &self.requires[idx]
    }

    pub(crate) fn optional_of(&self, idx: usize) -> &[usize] {
        &self.optional[idx]
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }
}

fn resolve_edges(
    registry: &Registry,
    module: &Module,
    names: &[ModuleName],
) -> Result<Vec<usize>, GraphError> {
    names
        .iter()
        .map(|name| {
            registry
                .index_of(name)
                .ok_or_else(|| GraphError::MissingDependency {
                    module: module.name().clone(),
                    missing: name.clone(),
                })
        })
        .collect()
}
