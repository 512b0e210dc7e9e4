use thiserror::Error;

use crate::{
    activation::{ActivationEngine, ActivationError},
    graph::{GraphError, ModuleGraph},
    model::module::{Module, ModuleName, ModuleRecord},
    registry::{Registry, RegistryError},
    resources,
    source::DescriptorSource,
};

mod builder;

pub use builder::ModulesBuilder;

#[derive(Error, Debug)]
pub enum StartError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Activation(#[from] ActivationError),
    #[error("dependency graph has not been built")]
    GraphNotBuilt,
    #[error("dependency graph has already been built")]
    GraphAlreadyBuilt,
}

enum State {
    Registering(Registry),
    Built(ActivationEngine),
    /// A failed graph build lands here; no partial graph is usable.
    Poisoned,
}

/// One resolution session: registration, a single graph build, then
/// enable/resolve calls. Constructed explicitly; independent sessions do not
/// interfere.
pub struct Modules {
    state: State,
}

impl Default for Modules {
    fn default() -> Self {
        Modules::new()
    }
}

impl Modules {
    pub fn new() -> Modules {
        Modules {
            state: State::Registering(Registry::new()),
        }
    }

    pub fn builder() -> ModulesBuilder {
        ModulesBuilder::default()
    }

    /// Registers one parsed descriptor record.
    pub fn register(&mut self, record: ModuleRecord) -> Result<(), StartError> {
        match &mut self.state {
            State::Registering(registry) => Ok(registry.register(record)?),
            State::Built(_) => Err(StartError::GraphAlreadyBuilt),
            State::Poisoned => Err(StartError::GraphNotBuilt),
        }
    }

    /// Drains the descriptor source into the registry; any failure aborts the
    /// whole load without exposing a partial registry.
    pub fn register_all(&mut self, source: &mut dyn DescriptorSource) -> Result<(), StartError> {
        match &mut self.state {
            State::Registering(registry) => Ok(registry.register_all(source)?),
            State::Built(_) => Err(StartError::GraphAlreadyBuilt),
            State::Poisoned => Err(StartError::GraphNotBuilt),
        }
    }

    /// Wires declared dependency names into validated edges. Must be called
    /// exactly once, after all registration; on failure the session is
    /// unusable.
    pub fn build_graph(&mut self) -> Result<(), StartError> {
        match std::mem::replace(&mut self.state, State::Poisoned) {
            State::Registering(registry) => {
                let graph = ModuleGraph::build(registry)?;
                self.state = State::Built(ActivationEngine::new(graph));
                Ok(())
            }
            State::Built(engine) => {
                self.state = State::Built(engine);
                Err(StartError::GraphAlreadyBuilt)
            }
            State::Poisoned => Err(StartError::GraphNotBuilt),
        }
    }

    pub fn count(&self) -> usize {
        match &self.state {
            State::Registering(registry) => registry.count(),
            State::Built(engine) => engine.graph().count(),
            State::Poisoned => 0,
        }
    }

    pub fn lookup(&self, name: &ModuleName) -> Option<&Module> {
        match &self.state {
            State::Registering(registry) => registry.lookup(name),
            State::Built(engine) => engine.graph().lookup(name),
            State::Poisoned => None,
        }
    }

    /// All registered modules, in registration order.
    pub fn modules(&self) -> Vec<&Module> {
        match &self.state {
            State::Registering(registry) => registry.modules().iter().collect(),
            State::Built(engine) => engine.graph().modules().collect(),
            State::Poisoned => vec![],
        }
    }

    pub fn enable(&mut self, name: &ModuleName) -> Result<(), StartError> {
        match &mut self.state {
            State::Built(engine) => Ok(engine.enable(name)?),
            _ => Err(StartError::GraphNotBuilt),
        }
    }

    pub fn resolve_enabled(&self) -> Result<Vec<&Module>, StartError> {
        match &self.state {
            State::Built(engine) => Ok(engine.resolve_enabled()?),
            _ => Err(StartError::GraphNotBuilt),
        }
    }

    pub fn normalize_libs(&self, resolved: &[&Module]) -> Vec<String> {
        resources::normalize_libs(resolved)
    }

    pub fn normalize_xmls(&self, resolved: &[&Module]) -> Vec<String> {
        resources::normalize_xmls(resolved)
    }
}
