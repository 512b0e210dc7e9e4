use std::collections::HashSet;

use regex_lite::Regex;

use crate::model::module::Module;

/// Concatenates the library entries of a resolved module sequence, dropping
/// exact repeats and keeping the position of the first occurrence. No
/// placeholder expansion: `${...}` tokens pass through verbatim.
pub fn normalize_libs(resolved: &[&Module]) -> Vec<String> {
    normalize(resolved.iter().flat_map(|module| module.libs()))
}

/// Same as `normalize_libs`, for XML configuration fragments.
pub fn normalize_xmls(resolved: &[&Module]) -> Vec<String> {
    normalize(resolved.iter().flat_map(|module| module.xmls()))
}

fn normalize<'a>(entries: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut output = Vec::new();
    for entry in entries {
        if seen.insert(entry.as_str()) {
            output.push(entry.clone());
        }
    }
    output
}

/// Distinct `${identifier}` tokens across the given resource entries, in
/// first-occurrence order. Discovery only; substitution is the launcher's
/// property-resolution stage.
pub fn placeholder_names<'a>(entries: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for entry in entries {
        for capture in re.captures_iter(entry) {
            let name = capture[1].to_string();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}
