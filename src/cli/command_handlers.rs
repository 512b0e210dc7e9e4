use log::info;

use crate::{model::module::ModuleName, resources, Modules};
use std::{error::Error, path::PathBuf};

/// Handler to list command
pub fn do_list(home_dir: Option<PathBuf>, base_dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let modules = load_modules(home_dir, base_dir)?;

    info!("Registered {} modules", modules.count());
    for module in modules.modules() {
        let mut line = module.name().to_string();
        if !module.requires().is_empty() {
            line.push_str(&format!(" requires: {}", join_names(module.requires())));
        }
        if !module.optional().is_empty() {
            line.push_str(&format!(" optional: {}", join_names(module.optional())));
        }
        println!("{line}");
    }

    Ok(())
}

/// Handler to resolve command
/// Enables the requested modules in flag order and prints the resolved
/// activation order with the aggregated library and XML lists
pub fn do_resolve(
    home_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    module_names: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut modules = load_modules(home_dir, base_dir)?;

    for name in module_names {
        modules.enable(&ModuleName::from(name.as_str()))?;
    }

    let active = modules.resolve_enabled()?;
    let libs = modules.normalize_libs(&active);
    let xmls = modules.normalize_xmls(&active);

    println!("Modules:");
    for module in &active {
        println!("  {}", module.name());
    }
    println!("Libraries:");
    for lib in &libs {
        println!("  {lib}");
    }
    println!("XML fragments:");
    for xml in &xmls {
        println!("  {xml}");
    }

    let properties =
        resources::placeholder_names(libs.iter().chain(xmls.iter()).map(String::as_str));
    if !properties.is_empty() {
        info!(
            "Properties left for the launcher to define: {}",
            properties.join(", ")
        );
    }

    Ok(())
}

fn load_modules(
    home_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
) -> Result<Modules, Box<dyn Error>> {
    let mut builder = Modules::builder();
    if let Some(home_dir) = home_dir {
        builder = builder.home_dir(home_dir);
    }
    if let Some(base_dir) = base_dir {
        builder = builder.base_dir(base_dir);
    }
    builder.try_build()
}

fn join_names(names: &[ModuleName]) -> String {
    names
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
