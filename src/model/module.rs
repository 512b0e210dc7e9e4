use std::{fmt::Display, path::Path};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::model::ParseError;

#[derive(Clone, Hash, Deserialize, Serialize, Debug, PartialEq, Eq, Ord, PartialOrd)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(s: String) -> Self {
        ModuleName(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        ModuleName(s)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        ModuleName(s.to_string())
    }
}

/// One parsed module descriptor record, as handed over by a descriptor
/// source. Sequence order of every list field is declaration order and is
/// semantically significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRecord {
    pub name: ModuleName,
    #[serde(default)]
    pub requires: Vec<ModuleName>,
    #[serde(default)]
    pub optional: Vec<ModuleName>,
    #[serde(default)]
    pub libs: Vec<String>,
    #[serde(default)]
    pub xmls: Vec<String>,
}

impl ModuleRecord {
    pub fn from_file(path: &Path) -> Result<ModuleRecord, ParseError> {
        debug!(
            "Attempting to read module record from descriptor file {}",
            path.display()
        );
        let contents = std::fs::read_to_string(path)?;

        let record = ModuleRecord::from_toml_str(&contents);
        if let Err(err) = &record {
            error!(
                "Could not build a valid module record from descriptor file {} due to err {err}",
                path.display()
            )
        }
        record
    }

    pub fn from_toml_str(data: &str) -> Result<ModuleRecord, ParseError> {
        let record = toml::from_str::<ModuleRecord>(data)?;
        if record.name.as_str().is_empty() {
            return Err(ParseError::EmptyName);
        }
        Ok(record)
    }
}

/// A registered module. Owned by the registry (and later the graph); callers
/// only ever see shared references, and only the activation engine flips
/// `enabled`, false to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    name: ModuleName,
    requires: Vec<ModuleName>,
    optional: Vec<ModuleName>,
    libs: Vec<String>,
    xmls: Vec<String>,
    enabled: bool,
}

impl Module {
    pub(crate) fn new(record: ModuleRecord) -> Module {
        Module {
            name: record.name,
            requires: record.requires,
            optional: record.optional,
            libs: record.libs,
            xmls: record.xmls,
            enabled: false,
        }
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn requires(&self) -> &[ModuleName] {
        &self.requires
    }

    pub fn optional(&self) -> &[ModuleName] {
        &self.optional
    }

    pub fn libs(&self) -> &[String] {
        &self.libs
    }

    pub fn xmls(&self) -> &[String] {
        &self.xmls
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn mark_enabled(&mut self) {
        self.enabled = true;
    }
}
