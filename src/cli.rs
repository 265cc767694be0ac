use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "invalid format: {}. Expected 'json' or 'markdown'",
                s
            )),
        }
    }
}

/// Analyze a CycloneDX SBOM and rank its vulnerabilities
#[derive(Parser, Debug)]
#[command(name = "sbom-triage")]
#[command(version)]
#[command(about = "Analyze a CycloneDX SBOM and rank its vulnerabilities", long_about = None)]
pub struct Args {
    /// Path to the CycloneDX JSON file to analyze
    pub sbom: String,

    /// Output format: json or markdown
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to a config file (defaults to auto-discovery next to the SBOM)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Skip the known-exploited-vulnerabilities catalog refresh
    #[arg(long)]
    pub no_sync: bool,
}
