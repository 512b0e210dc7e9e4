use std::error::Error;

use clap::Parser;

use modstart::{
    cli::{
        args::{CliArgs, Command},
        command_handlers::{do_list, do_resolve},
    },
    config::ModstartConfig,
};

fn run() -> Result<(), Box<dyn Error>> {
    let cli_args = CliArgs::parse();
    let config = ModstartConfig::load()?;

    let home_dir = cli_args.home_dir.or(config.home_dir);
    let base_dir = cli_args.base_dir.or(config.base_dir);

    match cli_args.cmd {
        Command::List => do_list(home_dir, base_dir),
        Command::Resolve { modules } => do_resolve(home_dir, base_dir, &modules),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
