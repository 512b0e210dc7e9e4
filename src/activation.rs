use log::debug;
use thiserror::Error;

use crate::{
    graph::ModuleGraph,
    model::module::{Module, ModuleName},
};

#[derive(Error, Debug)]
pub enum ActivationError {
    #[error("unknown module `{0}`")]
    UnknownModule(ModuleName),
    #[error("cyclic required-dependency chain: {0}")]
    CyclicDependency(String),
}

#[derive(Clone, Copy, PartialEq)]
enum Visit {
    New,
    InProgress,
    Done,
}

/// Tracks which modules have been enabled and computes the resolution order.
///
/// Enabling never force-activates dependencies; the enabled closure is
/// inferred entirely during `resolve_enabled`, which walks the enable-call
/// history in call order. The same set of enabled modules can resolve to
/// different orders depending on that call order, and that is the contract:
/// the first root visited decides which branch's dependencies are emitted
/// first.
pub struct ActivationEngine {
    graph: ModuleGraph,
    enable_order: Vec<usize>,
}

impl ActivationEngine {
    pub fn new(graph: ModuleGraph) -> ActivationEngine {
        ActivationEngine {
            graph,
            enable_order: Vec::new(),
        }
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    /// Marks a module enabled. Idempotent: re-enabling records nothing new.
    pub fn enable(&mut self, name: &ModuleName) -> Result<(), ActivationError> {
        let idx = self
            .graph
            .index_of(name)
            .ok_or_else(|| ActivationError::UnknownModule(name.clone()))?;

        if self.graph.module(idx).is_enabled() {
            debug!("Module {name} already enabled");
            return Ok(());
        }
        debug!("Enabling module {name}");
        self.graph.module_mut(idx).mark_enabled();
        self.enable_order.push(idx);
        Ok(())
    }

    /// Computes the resolved sequence: a post-order depth-first walk of the
    /// enable-call history over required edges, in declared order. Optional
    /// edges are followed only towards modules that are themselves enabled;
    /// they order, they never activate. Pure: repeatable any number of times
    /// over the current enabled set.
    pub fn resolve_enabled(&self) -> Result<Vec<&Module>, ActivationError> {
        fn go(
            graph: &ModuleGraph,
            marks: &mut [Visit],
            stack: &mut Vec<usize>,
            output: &mut Vec<usize>,
            idx: usize,
        ) -> Result<(), ActivationError> {
            match marks[idx] {
                Visit::Done => return Ok(()),
                Visit::InProgress => return Err(cycle_error(graph, stack, idx)),
                Visit::New => {}
            }
            marks[idx] = Visit::InProgress;
            stack.push(idx);

            for &dep in graph.requires_of(idx) {
                go(graph, marks, stack, output, dep)?;
            }
            for &dep in graph.optional_of(idx) {
                // Ordering hint only: follow the edge when the target is
                // enabled and not yet placed; an in-progress target is left
                // alone (optional edges never report cycles).
                if graph.module(dep).is_enabled() && marks[dep] == Visit::New {
                    go(graph, marks, stack, output, dep)?;
                }
            }

            stack.pop();
            marks[idx] = Visit::Done;
            output.push(idx);
            Ok(())
        }

        let mut marks = vec![Visit::New; self.graph.count()];
        let mut stack = Vec::new();
        let mut output = Vec::new();

        for &root in &self.enable_order {
            if marks[root] == Visit::New {
                go(&self.graph, &mut marks, &mut stack, &mut output, root)?;
            }
        }

        Ok(output.into_iter().map(|idx| self.graph.module(idx)).collect())
    }
}

fn cycle_error(graph: &ModuleGraph, stack: &[usize], idx: usize) -> ActivationError {
    let start = stack.iter().position(|&i| i == idx).unwrap_or(0);
    let mut path: Vec<&str> = stack[start..]
        .iter()
        .map(|&i| graph.module(i).name().as_str())
        .collect();
    path.push(graph.module(idx).name().as_str());
    ActivationError::CyclicDependency(path.join(" -> "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::module::ModuleRecord, registry::Registry};
    use pretty_assertions::assert_eq;

    fn record(name: &str, requires: &[&str], optional: &[&str]) -> ModuleRecord {
        ModuleRecord {
            name: ModuleName::from(name),
            requires: requires.iter().map(|&n| ModuleName::from(n)).collect(),
            optional: optional.iter().map(|&n| ModuleName::from(n)).collect(),
            libs: vec![],
            xmls: vec![],
        }
    }

    fn engine(records: Vec<ModuleRecord>) -> ActivationEngine {
        let mut registry = Registry::new();
        for r in records {
            registry.register(r).unwrap();
        }
        ActivationEngine::new(ModuleGraph::build(registry).unwrap())
    }

    fn resolved_names(engine: &ActivationEngine) -> Vec<String> {
        engine
            .resolve_enabled()
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    #[test]
    fn dependencies_resolve_before_dependents() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("server", &["base"], &[]),
            record("http", &["server"], &[]),
        ]);
        engine.enable(&ModuleName::from("http")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["base", "server", "http"]);
    }

    #[test]
    fn enable_order_decides_branch_order() {
        let records = || {
            vec![
                record("base", &[], &[]),
                record("left", &["base"], &[]),
                record("right", &["base"], &[]),
            ]
        };

        let mut first = engine(records());
        first.enable(&ModuleName::from("left")).unwrap();
        first.enable(&ModuleName::from("right")).unwrap();
        assert_eq!(resolved_names(&first), vec!["base", "left", "right"]);

        let mut second = engine(records());
        second.enable(&ModuleName::from("right")).unwrap();
        second.enable(&ModuleName::from("left")).unwrap();
        assert_eq!(resolved_names(&second), vec!["base", "right", "left"]);
    }

    #[test]
    fn enable_is_idempotent() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("server", &["base"], &[]),
        ]);
        engine.enable(&ModuleName::from("server")).unwrap();
        engine.enable(&ModuleName::from("server")).unwrap();
        engine.enable(&ModuleName::from("base")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["base", "server"]);
    }

    #[test]
    fn enable_does_not_force_activate_dependencies() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("server", &["base"], &[]),
        ]);
        engine.enable(&ModuleName::from("server")).unwrap();

        let graph = engine.graph();
        assert!(graph.lookup(&ModuleName::from("server")).unwrap().is_enabled());
        assert!(!graph.lookup(&ModuleName::from("base")).unwrap().is_enabled());
    }

    #[test]
    fn unknown_module_fails_enable() {
        let mut engine = engine(vec![record("base", &[], &[])]);
        let err = engine.enable(&ModuleName::from("missing")).unwrap_err();
        assert!(matches!(err, ActivationError::UnknownModule(name) if name.as_str() == "missing"));
    }

    #[test]
    fn required_cycle_fails_resolution() {
        let mut engine = engine(vec![
            record("a", &["b"], &[]),
            record("b", &["a"], &[]),
        ]);
        engine.enable(&ModuleName::from("a")).unwrap();

        let err = engine.resolve_enabled().unwrap_err();
        match err {
            ActivationError::CyclicDependency(path) => assert_eq!(path, "a -> b -> a"),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn optional_target_enabled_earlier_orders_before_dependent() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("jmx", &["base"], &[]),
            record("deploy", &["base"], &["jmx"]),
        ]);
        engine.enable(&ModuleName::from("jmx")).unwrap();
        engine.enable(&ModuleName::from("deploy")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["base", "jmx", "deploy"]);
    }

    #[test]
    fn optional_target_enabled_later_still_orders_before_dependent() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("jmx", &["base"], &[]),
            record("deploy", &["base"], &["jmx"]),
        ]);
        engine.enable(&ModuleName::from("deploy")).unwrap();
        engine.enable(&ModuleName::from("jmx")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["base", "jmx", "deploy"]);
    }

    #[test]
    fn optional_target_never_force_activated() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("jmx", &["base"], &[]),
            record("deploy", &["base"], &["jmx"]),
        ]);
        engine.enable(&ModuleName::from("deploy")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["base", "deploy"]);
    }

    #[test]
    fn optional_cycle_is_ignored() {
        let mut engine = engine(vec![
            record("a", &[], &["b"]),
            record("b", &[], &["a"]),
        ]);
        engine.enable(&ModuleName::from("a")).unwrap();
        engine.enable(&ModuleName::from("b")).unwrap();
        assert_eq!(resolved_names(&engine), vec!["b", "a"]);
    }

    #[test]
    fn nothing_enabled_resolves_empty() {
        let engine = engine(vec![record("base", &[], &[])]);
        assert!(engine.resolve_enabled().unwrap().is_empty());
    }

    #[test]
    fn resolution_is_repeatable() {
        let mut engine = engine(vec![
            record("base", &[], &[]),
            record("server", &["base"], &[]),
        ]);
        engine.enable(&ModuleName::from("server")).unwrap();
        let first = resolved_names(&engine);
        let second = resolved_names(&engine);
        assert_eq!(first, second);
    }
}
