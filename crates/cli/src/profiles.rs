use crate::pair::profile_store;
use clap::Subcommand;
use mapscope_api::{MappingFormat, MappingProfile, MappingSource};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List preset and custom profiles
    List,
    /// Add a custom profile
    Add {
        id: String,
        /// Community class list (flat) or mapping file (retrace)
        #[arg(long, value_name = "LOCATION")]
        community: String,
        #[arg(long, value_name = "LOCATION")]
        community_members: Option<String>,
        #[arg(long, default_value_t = MappingFormat::Flat)]
        community_format: MappingFormat,
        #[arg(long, value_name = "LOCATION")]
        canonical: String,
        #[arg(long, default_value_t = MappingFormat::Retrace)]
        canonical_format: MappingFormat,
    },
    /// Remove a custom profile
    Remove { id: String },
    /// Print the JSON schema of a profile entry
    Schema,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Community")]
    community: String,
    #[tabled(rename = "Canonical")]
    canonical: String,
}

fn describe_source(source: &MappingSource) -> String {
    match &source.members {
        Some(members) => format!("{} {} + {}", source.format, source.location, members),
        None => format!("{} {}", source.format, source.location),
    }
}

pub fn run(cmd: ProfileCommands, presets: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProfileCommands::List => {
            let store = profile_store(presets)?;
            let rows: Vec<ProfileRow> = store
                .profiles()
                .map(|p| ProfileRow {
                    id: p.id.clone(),
                    kind: if p.is_preset() { "preset" } else { "custom" },
                    community: describe_source(&p.community),
                    canonical: describe_source(&p.canonical),
                })
                .collect();
            if rows.is_empty() {
                println!("No profiles found.");
            } else {
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
        ProfileCommands::Add {
            id,
            community,
            community_members,
            community_format,
            canonical,
            canonical_format,
        } => {
            let profile = MappingProfile::new(
                id,
                MappingSource {
                    format: community_format,
                    location: community,
                    members: community_members,
                },
                MappingSource {
                    format: canonical_format,
                    location: canonical,
                    members: None,
                },
            );
            let id = profile.id.clone();
            let mut store = profile_store(presets)?;
            store.add_custom(profile)?;
            store.save()?;
            println!("Added profile '{}' to {}", id, store.custom_path().display());
        }
        ProfileCommands::Remove { id } => {
            let mut store = profile_store(presets)?;
            store.remove_custom(&id)?;
            store.save()?;
            println!("Removed profile '{}'", id);
        }
        ProfileCommands::Schema => {
            let schema = schemars::schema_for!(MappingProfile);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}
