//! PEP 508-ish dependency strings from `pyproject.toml`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_\-.]+(\[[a-zA-Z0-9_,\-]+\])?)\s*")
        .expect("dependency name regex is valid")
});

static SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([<>=!~]+)\s*(.+)$").expect("specifier regex is valid"));

/// One version constraint of a declared dependency.
///
/// A dependency with several comma-separated specifiers yields one entry
/// per specifier, all sharing the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Name including extras, e.g. `uvicorn[standard]`.
    pub name: String,
    pub operator: String,
    pub version: String,
}

impl Dependency {
    fn unconstrained(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            operator: String::new(),
            version: String::new(),
        }
    }
}

pub fn parse(requirement: &str) -> Vec<Dependency> {
    let (name, rest) = match NAME.captures(requirement) {
        Some(caps) => {
            let name = caps.get(1).map_or(requirement, |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (name, &requirement[end..])
        }
        None => (requirement, ""),
    };

    let specs: Vec<&str> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if specs.is_empty() {
        return vec![Dependency::unconstrained(name)];
    }

    specs
        .into_iter()
        .map(|spec| match SPECIFIER.captures(spec) {
            Some(caps) => Dependency {
                name: name.to_owned(),
                operator: caps[1].to_owned(),
                version: caps[2].to_owned(),
            },
            None => Dependency::unconstrained(name),
        })
        .collect()
}

pub fn parse_all<'a>(requirements: impl IntoIterator<Item = &'a str>) -> Vec<Dependency> {
    requirements.into_iter().flat_map(parse).collect()
}
