use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use sbom_triage::cli::{Args, OutputFormat};
use sbom_triage::config::{self, ConfigFile};
use sbom_triage::prelude::*;
use sbom_triage::shared::ExitCode;

#[tokio::main]
async fn main() {
    // Parse command-line arguments first to catch argument errors early
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Print the error message (clap formats these nicely)
            let _ = e.print();

            // Use exit code 0 for help/version, exit code 2 for actual argument errors
            let exit_code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(exit_code.as_i32());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(has_critical_findings) => {
            if has_critical_findings {
                process::exit(ExitCode::CriticalFindings.as_i32());
            }
            process::exit(ExitCode::Success.as_i32());
        }
        Err(e) => {
            eprintln!();
            eprintln!("❌ An error occurred:");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("Caused by: {}", cause);
            }

            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Runs the analysis pipeline.
///
/// Returns `Ok(true)` when the emitted result contains critical
/// findings, so CI integrations can gate on the exit code.
async fn run(args: Args) -> Result<bool> {
    display_banner();

    let sbom_path = PathBuf::from(&args.sbom);
    let sbom_content = std::fs::read_to_string(&sbom_path).map_err(|e| {
        anyhow::anyhow!("Failed to read SBOM file {}: {}", sbom_path.display(), e)
    })?;
    let sbom_data: serde_json::Value = serde_json::from_str(&sbom_content)
        .map_err(|e| anyhow::anyhow!("SBOM file is not valid JSON: {}", e))?;

    let config = load_config(&args, &sbom_path)?;
    let settings = merge_config(&args, &config);

    // Create adapters (Dependency Injection)
    let osv_client = OsvClient::new(settings.osv_base_url.clone())?;
    let depsdev_client = DepsDevClient::new(settings.depsdev_base_url.clone())?;
    let threat_intel = ThreatIntelClient::new(
        settings.epss_base_url.clone(),
        settings.kev_catalog_url.clone(),
    )?;
    let repository = InMemoryAnalysisRepository::new();
    let progress_reporter = StderrProgressReporter::new();

    if settings.sync_kev {
        progress_reporter.report("Refreshing known-exploited-vulnerabilities catalog...");
        if let Err(e) = threat_intel.sync_data().await {
            progress_reporter
                .report_error("⚠️  KEV refresh failed; continuing with the prior snapshot.");
            tracing::warn!("KEV refresh failed: {}", e);
        }
    }

    let sbom_id = repository.save_sbom(&sbom_data, "upload").await?;

    let ingest = IngestSbomUseCase::new(osv_client, depsdev_client, progress_reporter.clone());
    let (components, dependencies) = ingest.execute(&sbom_data).await?;

    let prioritize =
        PrioritizeAnalysisUseCase::new(AdjacencyGraphAnalyzer::new(), threat_intel, repository);
    let result = prioritize
        .execute(&sbom_id, components, &dependencies)
        .await?;

    progress_reporter.report_completion(&format!(
        "✅ Analyzed {} components: {} findings, {} critical",
        result.total_components, result.total_vulnerabilities, result.critical_findings
    ));

    let report = AnalysisReport::from(&result);
    let formatter: Box<dyn ReportFormatter> = match settings.format {
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
    };
    let formatted = formatter.format(&report)?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(ref path) => Box::new(FilePresenter::new(PathBuf::from(path))),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted)?;

    Ok(result.critical_findings > 0)
}

fn display_banner() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "{} {} {}",
        "🔎".bright_yellow(),
        "sbom-triage".bright_cyan().bold(),
        format!("v{}", version).bright_green()
    );
    eprintln!();
}

/// Effective settings after combining CLI arguments and config file values.
struct EffectiveSettings {
    osv_base_url: String,
    depsdev_base_url: String,
    epss_base_url: String,
    kev_catalog_url: String,
    sync_kev: bool,
    format: OutputFormat,
}

/// Load a config file from an explicit path or via auto-discovery next
/// to the SBOM file.
fn load_config(args: &Args, sbom_path: &Path) -> Result<Option<ConfigFile>> {
    if let Some(ref config_path) = args.config {
        let path = Path::new(config_path);
        let cfg = config::load_config_from_path(path)?;
        eprintln!("📄 Loaded config from: {}", path.display());
        Ok(Some(cfg))
    } else {
        let dir = sbom_path.parent().unwrap_or_else(|| Path::new("."));
        let cfg = config::discover_config(dir)?;
        if cfg.is_some() {
            eprintln!("📄 Auto-discovered config file next to the SBOM.");
        }
        Ok(cfg)
    }
}

/// Merge CLI arguments with config file values.
///
/// Priority: CLI > config file > defaults. The format flag always wins
/// when explicitly different from the default.
fn merge_config(args: &Args, config: &Option<ConfigFile>) -> EffectiveSettings {
    let defaults = EffectiveSettings {
        osv_base_url: config::DEFAULT_OSV_BASE_URL.to_string(),
        depsdev_base_url: config::DEFAULT_DEPSDEV_BASE_URL.to_string(),
        epss_base_url: config::DEFAULT_EPSS_BASE_URL.to_string(),
        kev_catalog_url: config::DEFAULT_KEV_CATALOG_URL.to_string(),
        sync_kev: !args.no_sync,
        format: args.format,
    };

    let config = match config {
        Some(c) => c,
        None => return defaults,
    };

    let format = if let Some(ref config_format) = config.format {
        if args.format != OutputFormat::Json {
            args.format
        } else {
            config_format.parse::<OutputFormat>().unwrap_or(args.format)
        }
    } else {
        args.format
    };

    EffectiveSettings {
        osv_base_url: config
            .osv_base_url
            .clone()
            .unwrap_or(defaults.osv_base_url),
        depsdev_base_url: config
            .depsdev_base_url
            .clone()
            .unwrap_or(defaults.depsdev_base_url),
        epss_base_url: config
            .epss_base_url
            .clone()
            .unwrap_or(defaults.epss_base_url),
        kev_catalog_url: config
            .kev_catalog_url
            .clone()
            .unwrap_or(defaults.kev_catalog_url),
        sync_kev: !args.no_sync && config.sync_kev.unwrap_or(true),
        format,
    }
}
