use clap::Args;
use mapscope_api::{MappingFormat, MappingProfile, MappingSource};
use mapscope_core::service::load_pair;
use mapscope_core::{FsFetcher, MappingPair, ParseOptions, ProfileStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where to read the community/canonical pair from: a stored profile or
/// explicit files.
#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    /// Use a stored profile instead of explicit files
    #[arg(long, conflicts_with_all = ["community", "canonical"])]
    pub profile: Option<String>,

    /// Community class list (flat) or mapping file (retrace)
    #[arg(long, value_name = "FILE", required_unless_present = "profile")]
    pub community: Option<PathBuf>,

    /// Community member list (flat only)
    #[arg(long, value_name = "FILE")]
    pub community_members: Option<PathBuf>,

    #[arg(long, default_value_t = MappingFormat::Flat)]
    pub community_format: MappingFormat,

    /// Canonical mapping file
    #[arg(long, value_name = "FILE", required_unless_present = "profile")]
    pub canonical: Option<PathBuf>,

    #[arg(long, default_value_t = MappingFormat::Retrace)]
    pub canonical_format: MappingFormat,

    /// Fail on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

impl PairArgs {
    fn options(&self) -> ParseOptions {
        if self.strict {
            ParseOptions::strict()
        } else {
            ParseOptions::default()
        }
    }

    /// The profile these arguments describe, either looked up or assembled
    /// from the file flags.
    pub fn to_profile(
        &self,
        presets: Option<&Path>,
    ) -> Result<MappingProfile, Box<dyn std::error::Error>> {
        if let Some(id) = &self.profile {
            let store = profile_store(presets)?;
            return store
                .get(id)
                .cloned()
                .ok_or_else(|| mapscope_api::ApiError::UnknownProfile(id.clone()).into());
        }

        let (Some(community), Some(canonical)) = (&self.community, &self.canonical) else {
            return Err("either --profile or both --community and --canonical are required".into());
        };
        Ok(MappingProfile::new(
            "command-line",
            MappingSource {
                format: self.community_format,
                location: path_text(community),
                members: self.community_members.as_deref().map(path_text),
            },
            MappingSource {
                format: self.canonical_format,
                location: path_text(canonical),
                members: None,
            },
        ))
    }

    pub fn load(&self, presets: Option<&Path>) -> Result<MappingPair, Box<dyn std::error::Error>> {
        let profile = self.to_profile(presets)?;
        let pair = load_pair(&FsFetcher::new(), &profile, &self.options())?;
        info!(
            profile = %pair.profile_id(),
            community = pair.community.len(),
            canonical = pair.canonical.len(),
            "mapping pair loaded"
        );
        Ok(pair)
    }
}

pub(crate) fn profile_store(presets: Option<&Path>) -> Result<ProfileStore, Box<dyn std::error::Error>> {
    let custom_path = ProfileStore::default_custom_path()
        .ok_or("cannot locate the home directory for custom profiles")?;
    Ok(ProfileStore::load(presets, custom_path)?)
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
