use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::catalog::store::VersionList;
use crate::cli::OutputFormat;
use crate::core::types::{Identification, MatchType};
use crate::fetch::http::{FetchConfig, HttpFetcher};
use crate::matching::engine::MatchingConfig;
use crate::matching::identifier::{IdentificationReport, VersionIdentifier};

#[derive(Args)]
pub struct IdentifyArgs {
    /// Base URL of the target, e.g. <https://blog.example.com/>
    #[arg(required = true)]
    pub target: String,

    /// Path to the signature catalog (JSON, optionally gzipped)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Number of candidate versions to show
    #[arg(short = 'n', long, default_value = "5")]
    pub max_candidates: usize,

    /// Only report exact matches
    #[arg(long)]
    pub exact_only: bool,

    /// Requests in flight at once
    #[arg(long, default_value = "8", value_parser = clap::value_parser!(u16).range(1..=256))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the HTTP client cannot be built.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = VersionList::load_from_file(&args.catalog)?;

    if verbose {
        eprintln!(
            "Loaded catalog '{}' with {} versions, {} paths to fetch",
            catalog.key,
            catalog.len(),
            catalog.required_paths().len()
        );
    }

    if catalog.is_empty() {
        eprintln!("Warning: Catalog is empty, no versions to match against.");
    }

    let mut fetch_config = FetchConfig {
        concurrency: usize::from(args.concurrency),
        timeout: Duration::from_secs(args.timeout),
        ..FetchConfig::default()
    };
    if let Some(user_agent) = &args.user_agent {
        fetch_config.user_agent.clone_from(user_agent);
    }

    let matching_config = MatchingConfig {
        exact_only: args.exact_only,
        max_candidates: args.max_candidates,
    };

    let fetcher = HttpFetcher::new(fetch_config)?;
    let identifier = VersionIdentifier::with_catalog(fetcher, catalog).with_config(matching_config);

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(identifier.identify_version_report(&args.target));

    match format {
        OutputFormat::Text => print_text_report(&report, verbose),
        OutputFormat::Json => print_json_report(&report)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn describe(identification: &Identification) -> String {
    match identification {
        Identification::Exact { version } => format!("{version} (exact match)"),
        Identification::Closest {
            version,
            matched,
            total,
        } => format!("{version} (closest match, {matched}/{total} signatures)"),
        Identification::Unknown => "unknown".to_string(),
    }
}

fn print_text_report(report: &IdentificationReport, verbose: bool) {
    println!("Target:   {}", report.target);
    println!("Product:  {}", report.product);
    println!("Version:  {}", describe(&report.identification));
    println!(
        "Files:    {}/{} fetched",
        report.files_fetched, report.paths_requested
    );

    if report.identification.match_type() == MatchType::Closest {
        println!("\nNo version matched every signature; files may be missing or modified.");
    }

    if verbose && !report.candidates.is_empty() {
        println!("\nCandidates:");
        for (i, candidate) in report.candidates.iter().enumerate() {
            println!(
                "  {}. {:<16} {}/{} ({:.1}%){}",
                i + 1,
                candidate.version,
                candidate.matched,
                candidate.total,
                candidate.fraction() * 100.0,
                if candidate.exact { " exact" } else { "" }
            );
        }
    }
}

fn print_json_report(report: &IdentificationReport) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_tsv_report(report: &IdentificationReport) {
    println!("target\tversion\tmatch_type\tmatched\ttotal\tfiles_fetched\tpaths_requested");

    let (matched, total) = match &report.identification {
        Identification::Exact { version } => report
            .candidates
            .iter()
            .find(|c| &c.version == version)
            .map_or((0, 0), |c| (c.matched, c.total)),
        Identification::Closest { matched, total, .. } => (*matched, *total),
        Identification::Unknown => (0, 0),
    };

    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        report.target,
        report.identification.label(),
        report.identification.match_type(),
        matched,
        total,
        report.files_fetched,
        report.paths_requested
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&Identification::Exact {
                version: "4.9.1".to_string()
            }),
            "4.9.1 (exact match)"
        );
        assert_eq!(
            describe(&Identification::Closest {
                version: "4.9".to_string(),
                matched: 3,
                total: 4
            }),
            "4.9 (closest match, 3/4 signatures)"
        );
        assert_eq!(describe(&Identification::Unknown), "unknown");
    }
}
