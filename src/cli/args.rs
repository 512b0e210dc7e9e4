use std::path::PathBuf;

use clap::Parser;

/// Module activation resolver for modular server startup.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Server home directory holding the stock module descriptors
    #[clap(long, global = true)]
    pub home_dir: Option<PathBuf>,
    /// Override directory whose descriptors replace home descriptors
    #[clap(long, global = true)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub enum Command {
    ///Lists registered modules and their dependency declarations
    List,
    ///Resolves the activation order and aggregated resources for the given modules
    Resolve {
        /// Module to enable; repeatable, enable order is resolution order
        #[clap(short, long = "module", required = true)]
        modules: Vec<String>,
    },
}
