use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    buttons: HashMap<String, String>,
    #[serde(default)]
    scripts: HashMap<String, ScriptEntry>,
}

/// A command script, optionally paired with the button config it runs against.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        button: Option<String>,
    },
}

impl ScriptEntry {
    fn as_path(&self) -> &str {
        match self {
            ScriptEntry::Path(path) => path,
            ScriptEntry::Detailed { path, .. } => path,
        }
    }

    fn button(&self) -> Option<&str> {
        match self {
            ScriptEntry::Path(_) => None,
            ScriptEntry::Detailed { button, .. } => button.as_deref(),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Button configuration documents.
pub mod buttons {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.buttons.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.buttons, "button", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.buttons, "button", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.buttons, "button", name)?;
        Ok(resolve_path(rel))
    }
}

/// Timed command scripts replayed against a button.
pub mod scripts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scripts.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.scripts, "script", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.scripts, "script", name)?;
        super::load_json(entry.as_path())
    }

    /// Config JSON of the button the script targets, if it names one.
    pub fn button_json(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.scripts, "script", name)?;
        match entry.button() {
            Some(button) => super::buttons::json(button).map(Some),
            None => Ok(None),
        }
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.scripts, "script", name)?;
        Ok(resolve_path(entry.as_path()))
    }
}
