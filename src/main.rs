// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot CLI - WCAG color contrast auditing for design tokens

use contrastbot::analyzers::contrast::{contrast_issue, invalid_color_issue};
use contrastbot::config::{load_config, Config};
use contrastbot::palette::{self, Personality};
use contrastbot::report::{generate_report, OutputFormat};
use contrastbot::{check_contrast, parse_hex, scanner, ComplianceReport, WcagLevel};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG color contrast auditing for design tokens
#[derive(Parser)]
#[command(name = "contrastbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single token document
    Check {
        /// Token document (JSON)
        file: PathBuf,

        #[command(flatten)]
        audit: AuditArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Audit every token document under a directory
    Scan {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        audit: AuditArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Check a single foreground/background pair
    Contrast {
        /// Foreground color (hex)
        foreground: String,

        /// Background color (hex)
        background: String,

        /// WCAG conformance level
        #[arg(long, default_value = "aa")]
        level: WcagLevelArg,

        /// Use the large-text thresholds
        #[arg(long)]
        large_text: bool,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Generate a color theme and self-check it at AA
    Palette {
        /// Personality profile (innovative, reliable, bold, minimal, creative)
        #[arg(long, default_value = "innovative", conflicts_with = "hue")]
        personality: String,

        /// Base hue in degrees, instead of a personality
        #[arg(long, requires = "saturation")]
        hue: Option<f64>,

        /// Base saturation in [0, 1], used with --hue
        #[arg(long, requires = "hue")]
        saturation: Option<f64>,

        /// Theme name
        #[arg(long)]
        name: Option<String>,

        /// What to print
        #[arg(long, default_value = "tokens")]
        emit: EmitArg,

        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args)]
struct AuditArgs {
    /// WCAG conformance level (overrides config)
    #[arg(long)]
    level: Option<WcagLevelArg>,

    /// Use the large-text thresholds
    #[arg(long)]
    large_text: bool,

    /// Skip design-token structure rules
    #[arg(long)]
    no_structure: bool,

    /// Configuration file
    #[arg(long, default_value = "contrastbot.toml")]
    config: PathBuf,
}

impl AuditArgs {
    fn resolve(&self) -> anyhow::Result<Config> {
        let mut config = load_config(&self.config)?;
        if let Some(level) = self.level {
            config.level = level.into();
        }
        if self.large_text {
            config.large_text = true;
        }
        if self.no_structure {
            config.structure_checks = false;
        }
        Ok(config)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    format: FormatArg,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

/// WCAG conformance level CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WcagLevelArg {
    /// Level A - minimum
    A,
    /// Level AA - standard
    Aa,
    /// Level AAA - enhanced
    Aaa,
}

impl From<WcagLevelArg> for WcagLevel {
    fn from(arg: WcagLevelArg) -> Self {
        match arg {
            WcagLevelArg::A => WcagLevel::A,
            WcagLevelArg::Aa => WcagLevel::AA,
            WcagLevelArg::Aaa => WcagLevel::AAA,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

/// Palette output selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitArg {
    /// The theme as a token document
    Tokens,
    /// The theme's AA self-check report
    Report,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("contrastbot=debug")
    } else {
        EnvFilter::new("contrastbot=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Commands::Check { file, audit, out } => {
            init_logging(out.verbose);
            let config = audit.resolve()?;
            let report = scanner::audit_file(&file, &config)?;
            emit_report(&report, &out)?;
            report
        }

        Commands::Scan { dir, audit, out } => {
            init_logging(out.verbose);
            let config = audit.resolve()?;
            let report = scanner::scan_directory(&dir, &config)?;
            emit_report(&report, &out)?;
            report
        }

        Commands::Contrast {
            foreground,
            background,
            level,
            large_text,
            out,
        } => {
            init_logging(out.verbose);
            run_contrast(&foreground, &background, level.into(), large_text, &out)?
        }

        Commands::Palette {
            personality,
            hue,
            saturation,
            name,
            emit,
            out,
        } => {
            init_logging(out.verbose);
            let profile = match (hue, saturation) {
                (Some(hue), Some(saturation)) => Personality {
                    name: "custom",
                    hue,
                    saturation,
                    description: "custom",
                },
                _ => *palette::personality(&personality)?,
            };

            let theme = palette::generate_theme(&profile, name.as_deref());
            let mut report = ComplianceReport::new();
            let grade = palette::validate_theme(&theme, &mut report);

            match emit {
                EmitArg::Tokens => {
                    let mut document = theme.to_token_document();
                    document["accessibility"] = serde_json::json!({
                        "complianceLevel": grade,
                        "issues": report.len(),
                    });
                    let tokens = serde_json::to_string_pretty(&document)?;
                    write_output(&tokens, out.output.as_deref())?;
                }
                EmitArg::Report => emit_report(&report, &out)?,
            }
            report
        }
    };

    if report.blocks_release() {
        std::process::exit(1);
    }

    Ok(())
}

/// Ad hoc pair query; every outcome is also recorded as a report
fn run_contrast(
    foreground: &str,
    background: &str,
    level: WcagLevel,
    large_text: bool,
    out: &OutputArgs,
) -> anyhow::Result<ComplianceReport> {
    let mut report = ComplianceReport::new();

    let fg = parse_hex(foreground);
    let bg = parse_hex(background);
    if let Err(ref e) = fg {
        tracing::warn!("{}", e);
        report.add_issue(invalid_color_issue(foreground, "foreground", level));
    }
    if let Err(ref e) = bg {
        tracing::warn!("{}", e);
        report.add_issue(invalid_color_issue(background, "background", level));
    }

    if let (Ok(fg), Ok(bg)) = (fg, bg) {
        let result = check_contrast(fg, bg, level, large_text);
        if !result.passes {
            report.add_issue(contrast_issue(&fg.to_hex(), &bg.to_hex(), &result));
        }
        if matches!(out.format, FormatArg::Text) {
            write_output(&format!("{} on {}: {}", fg, bg, result), out.output.as_deref())?;
            return Ok(report);
        }
    }

    emit_report(&report, out)?;
    Ok(report)
}

fn emit_report(report: &ComplianceReport, out: &OutputArgs) -> anyhow::Result<()> {
    let rendered = generate_report(report, out.format.into());
    write_output(&rendered, out.output.as_deref())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
