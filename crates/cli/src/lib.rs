mod pair;
mod profiles;
mod resolve;
mod stats;

use clap::{Parser, Subcommand};
use mapscope_api::MappingFormat;
use std::path::PathBuf;

pub use pair::PairArgs;
pub use profiles::ProfileCommands;

#[derive(Parser)]
#[command(
    name = "mapscope",
    version,
    about = "Translate obfuscated JVM symbols through a pair of mapping tables",
    long_about = "Mapscope reads a community mapping (names seen in recompiled source) and a canonical \
                  mapping (human-readable names) that share their obfuscated side, and translates \
                  classes, fields and methods from the first namespace into the second."
)]
pub struct Cli {
    /// Preset profile file (JSON array of profiles)
    #[arg(long, global = true, value_name = "FILE")]
    pub presets: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse one mapping and print table statistics
    Stats {
        /// Class list (flat) or whole mapping file (retrace)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Member list for the flat format
        #[arg(long, value_name = "FILE")]
        members: Option<PathBuf>,
        #[arg(long, default_value_t = MappingFormat::Flat)]
        format: MappingFormat,
        /// Fail on the first malformed record instead of skipping it
        #[arg(long)]
        strict: bool,
    },
    /// Translate a class name
    Class {
        /// Declared community class name
        name: String,
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Translate a field name
    Field {
        /// Declared community name of the owning class
        owner: String,
        name: String,
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Translate a method name, matching overloads by argument types
    Method {
        /// Declared community name of the owning class
        owner: String,
        name: String,
        /// Argument type, in call order (repeatable)
        #[arg(long = "arg", value_name = "TYPE")]
        arguments: Vec<String>,
        /// JSON object mapping a class name to its direct supertypes
        #[arg(long, value_name = "FILE")]
        hierarchy: Option<PathBuf>,
        #[command(flatten)]
        pair: PairArgs,
    },
    /// List every name a class or field is known under
    Describe {
        /// Class name from either table, either naming side
        name: String,
        /// Describe this field of the class instead
        #[arg(long)]
        field: Option<String>,
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Manage mapping profiles
    #[command(subcommand)]
    Profiles(ProfileCommands),
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = mapscope_core::logging::init_logging("cli", cli.verbose);

    let presets = cli.presets.as_deref();
    match cli.command {
        Commands::Stats {
            file,
            members,
            format,
            strict,
        } => stats::run(&file, members.as_deref(), format, strict),
        Commands::Class { name, pair } => resolve::class(&pair, presets, &name),
        Commands::Field { owner, name, pair } => resolve::field(&pair, presets, &owner, &name),
        Commands::Method {
            owner,
            name,
            arguments,
            hierarchy,
            pair,
        } => resolve::method(
            &pair,
            presets,
            &owner,
            &name,
            &arguments,
            hierarchy.as_deref(),
        ),
        Commands::Describe { name, field, pair } => {
            resolve::describe(&pair, presets, &name, field.as_deref())
        }
        Commands::Profiles(cmd) => profiles::run(cmd, presets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_arguments_parse() {
        let cli = Cli::try_parse_from([
            "mapscope",
            "method",
            "net.minecraft.server.Block",
            "m",
            "--arg",
            "int",
            "--arg",
            "net.minecraft.server.World",
            "--community",
            "classes.csrg",
            "--community-members",
            "members.csrg",
            "--canonical",
            "server.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::Method {
                arguments, pair, ..
            } => {
                assert_eq!(arguments, vec!["int", "net.minecraft.server.World"]);
                assert_eq!(pair.community_format, MappingFormat::Flat);
                assert_eq!(pair.canonical_format, MappingFormat::Retrace);
                assert!(pair.profile.is_none());
            }
            _ => panic!("expected method command"),
        }
    }

    #[test]
    fn test_pair_needs_profile_or_files() {
        assert!(Cli::try_parse_from(["mapscope", "class", "Foo"]).is_err());
        assert!(Cli::try_parse_from(["mapscope", "class", "Foo", "--profile", "1.19"]).is_ok());
        assert!(
            Cli::try_parse_from([
                "mapscope",
                "class",
                "Foo",
                "--profile",
                "1.19",
                "--canonical",
                "server.txt"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_format_aliases() {
        let cli = Cli::try_parse_from(["mapscope", "stats", "server.txt", "--format", "proguard"])
            .unwrap();
        match cli.command {
            Commands::Stats { format, .. } => assert_eq!(format, MappingFormat::Retrace),
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_command_line_profile_from_files() {
        let cli = Cli::try_parse_from([
            "mapscope",
            "class",
            "Foo",
            "--community",
            "a.txt",
            "--community-format",
            "retrace",
            "--canonical",
            "b.txt",
        ])
        .unwrap();
        let Commands::Class { pair, .. } = cli.command else {
            panic!("expected class command");
        };
        let profile = pair.to_profile(None).unwrap();
        assert_eq!(profile.community.format, MappingFormat::Retrace);
        assert_eq!(profile.community.location, "a.txt");
        assert_eq!(profile.canonical.location, "b.txt");
    }
}
