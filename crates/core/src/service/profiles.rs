//! Preset and user-defined mapping profiles.
//!
//! Presets are read-only and never written back. Custom profiles live in a
//! JSON file, `~/.mapscope/custom-profiles.json` by default.

use crate::error::Result;
use crate::paths::mapscope_home;
use mapscope_api::{ApiError, ApiResult, MappingProfile, ProjectSettings};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CUSTOM_PROFILES_FILE: &str = "custom-profiles.json";

#[derive(Debug, Clone)]
pub struct ProfileStore {
    presets: Vec<MappingProfile>,
    custom: Vec<MappingProfile>,
    custom_path: PathBuf,
}

impl ProfileStore {
    /// [`CUSTOM_PROFILES_FILE`] under the state directory, when one is known.
    pub fn default_custom_path() -> Option<PathBuf> {
        mapscope_home().map(|home| home.join(CUSTOM_PROFILES_FILE))
    }

    /// Store with the given presets and no custom profiles loaded yet.
    pub fn new(presets: Vec<MappingProfile>, custom_path: impl Into<PathBuf>) -> Self {
        let presets = presets
            .into_iter()
            .map(|mut p| {
                p.preset = true;
                p
            })
            .collect();
        Self {
            presets,
            custom: Vec::new(),
            custom_path: custom_path.into(),
        }
    }

    /// Read presets (if a file is given) and the custom-profile file (if it
    /// exists).
    pub fn load(presets_path: Option<&Path>, custom_path: impl Into<PathBuf>) -> Result<Self> {
        let presets = match presets_path {
            Some(path) => read_profiles(path)?,
            None => Vec::new(),
        };
        let mut store = Self::new(presets, custom_path);

        if store.custom_path.exists() {
            store.custom = read_profiles(&store.custom_path)?;
        }
        info!(
            presets = store.presets.len(),
            custom = store.custom.len(),
            "loaded mapping profiles"
        );
        Ok(store)
    }

    pub fn custom_path(&self) -> &Path {
        &self.custom_path
    }

    /// Presets first, then custom profiles, each in file order.
    pub fn profiles(&self) -> impl Iterator<Item = &MappingProfile> + '_ {
        self.presets.iter().chain(self.custom.iter())
    }

    pub fn get(&self, id: &str) -> Option<&MappingProfile> {
        self.profiles().find(|p| p.id == id)
    }

    /// The profile a project has selected. No selection is `Ok(None)`; a
    /// selection naming an unknown profile is an error.
    pub fn selected(&self, settings: &ProjectSettings) -> ApiResult<Option<&MappingProfile>> {
        match settings.selected_profile.as_deref() {
            None => Ok(None),
            Some(id) => self
                .get(id)
                .map(Some)
                .ok_or_else(|| ApiError::UnknownProfile(id.to_string())),
        }
    }

    pub fn add_custom(&mut self, mut profile: MappingProfile) -> ApiResult<()> {
        if self.get(&profile.id).is_some() {
            return Err(ApiError::DuplicateProfile(profile.id));
        }
        profile.preset = false;
        debug!(profile = %profile.id, "adding custom profile");
        self.custom.push(profile);
        Ok(())
    }

    pub fn remove_custom(&mut self, id: &str) -> ApiResult<MappingProfile> {
        if self.presets.iter().any(|p| p.id == id) {
            return Err(ApiError::ReadOnlyProfile(id.to_string()));
        }
        let index = self
            .custom
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ApiError::UnknownProfile(id.to_string()))?;
        debug!(profile = id, "removing custom profile");
        Ok(self.custom.remove(index))
    }

    /// Write the custom profiles, creating the parent directory if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.custom_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.custom)?;
        std::fs::write(&self.custom_path, json)?;
        debug!(path = %self.custom_path.display(), count = self.custom.len(), "saved custom profiles");
        Ok(())
    }
}

fn read_profiles(path: &Path) -> Result<Vec<MappingProfile>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
