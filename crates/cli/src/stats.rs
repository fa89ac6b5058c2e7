use mapscope_api::{MappingFormat, MappingSource};
use mapscope_core::service::load_table;
use mapscope_core::{FsFetcher, ParseOptions};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

pub fn run(
    file: &Path,
    members: Option<&Path>,
    format: MappingFormat,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = MappingSource {
        format,
        location: file.to_string_lossy().into_owned(),
        members: members.map(|m| m.to_string_lossy().into_owned()),
    };
    let options = if strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    let table = load_table(&FsFetcher::new(), &source, &options)?;
    let stats = table.stats();

    let rows = vec![
        StatRow { metric: "classes", count: stats.classes },
        StatRow { metric: "fields", count: stats.fields },
        StatRow { metric: "methods", count: stats.methods },
        StatRow { metric: "malformed records", count: stats.malformed_records },
        StatRow { metric: "unresolved members", count: stats.unresolved_members },
        StatRow { metric: "constructors skipped", count: stats.constructors_skipped },
        StatRow { metric: "ignored lines", count: stats.ignored_lines },
    ];
    println!("{} ({})", file.display(), format);
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}
