use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    effects::filter::FilterId,
    foundation::error::{GridError, GridResult},
    layout::model::{AspectRatio, Layout, OutputSpec},
};

/// The four fields a preset restores together.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PresetSnapshot {
    pub layout: Layout,
    pub aspect_ratio: AspectRatio,
    pub resolution: u32,
    pub filter: FilterId,
}

impl PresetSnapshot {
    pub fn output(&self) -> OutputSpec {
        OutputSpec::new(self.aspect_ratio, self.resolution)
    }

    pub fn validate(&self) -> GridResult<()> {
        self.layout.validate()?;
        self.output().output_size()?;
        Ok(())
    }
}

/// A named snapshot with its save time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Preset {
    pub name: String,
    pub layout: Layout,
    pub aspect_ratio: AspectRatio,
    pub resolution: u32,
    pub filter: FilterId,
    pub saved_at: DateTime<Utc>,
}

impl Preset {
    pub fn snapshot(&self) -> PresetSnapshot {
        PresetSnapshot {
            layout: self.layout.clone(),
            aspect_ratio: self.aspect_ratio,
            resolution: self.resolution,
            filter: self.filter,
        }
    }
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,
}

/// Presets persisted as one JSON document.
#[derive(Debug)]
pub struct PresetStore {
    path: PathBuf,
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Open `path`; a missing file is an empty store.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref().to_path_buf();
        let presets = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let file: PresetFile = serde_json::from_str(&text).map_err(|e| {
                    GridError::serde(format!("presets '{}': {e}", path.display()))
                })?;
                file.presets
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("read presets '{}'", path.display()))
                    .into());
            }
        };
        tracing::debug!(count = presets.len(), "presets loaded");
        Ok(Self { path, presets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Presets in save order.
    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Insert or replace the preset called `name`. Not persisted until [`PresetStore::flush`].
    pub fn save(
        &mut self,
        name: &str,
        snapshot: PresetSnapshot,
        now: DateTime<Utc>,
    ) -> GridResult<&Preset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GridError::validation("preset name must be non-empty"));
        }
        snapshot.validate()?;

        let preset = Preset {
            name: name.to_string(),
            layout: snapshot.layout,
            aspect_ratio: snapshot.aspect_ratio,
            resolution: snapshot.resolution,
            filter: snapshot.filter,
            saved_at: now,
        };
        let idx = match self.presets.iter().position(|p| p.name == name) {
            Some(i) => {
                self.presets[i] = preset;
                i
            }
            None => {
                self.presets.push(preset);
                self.presets.len() - 1
            }
        };
        Ok(&self.presets[idx])
    }

    /// Remove the preset called `name`; returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        self.presets.len() != before
    }

    /// Write the store back to its file, creating parent directories.
    pub fn flush(&self) -> GridResult<()> {
        let file = PresetFile {
            presets: self.presets.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create presets directory '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("write presets '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/presets/store.rs"]
mod tests;
