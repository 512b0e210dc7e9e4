pub mod activation;
pub mod cli;
pub mod config;
pub mod graph;
pub mod model;
pub mod registry;
pub mod resources;
pub mod source;

mod api;

pub use api::{Modules, ModulesBuilder, StartError};
