//! CLI for the pattern doctor.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pattern_doctor::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pattern-doctor")]
#[command(author, version, about = "Diagnose and fix structural search patterns", long_about = None)]
struct Cli {
    /// Analyzer config file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a pattern and report problems
    Analyze {
        /// The pattern to analyze
        pattern: String,

        /// Language of the code the pattern targets
        #[arg(short, long)]
        language: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Source file the pattern was meant to match
        #[arg(long)]
        code_file: Option<PathBuf>,

        /// Error message reported by the matching engine
        #[arg(long)]
        engine_error: Option<String>,
    },

    /// Apply automatic fixes and show the diff
    Fix {
        /// The pattern to fix
        pattern: String,

        /// Language of the code the pattern targets
        #[arg(short, long)]
        language: String,

        /// Show a colored before/after diff instead of inline markers
        #[arg(long)]
        color: bool,
    },

    /// List ranked rewrite suggestions
    Suggest {
        /// The pattern to improve
        pattern: String,

        /// Language of the code the pattern targets
        #[arg(short, long)]
        language: String,
    },

    /// List rewrites addressing one kind of finding
    QuickFix {
        /// The pattern to fix
        pattern: String,

        /// Language of the code the pattern targets
        #[arg(short, long)]
        language: String,

        /// Finding kind, e.g. unclosed_bracket or missing_dollar
        #[arg(short, long)]
        kind: String,
    },

    /// Show the canonical pattern library
    Library {
        /// Only show this language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show supported languages
    Languages,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = PatternAnalyzer::with_config(config).context("Failed to build analyzer")?;

    match cli.command {
        Commands::Analyze {
            pattern,
            language,
            json,
            code_file,
            engine_error,
        } => cmd_analyze(&analyzer, &pattern, &language, json, code_file, engine_error),
        Commands::Fix {
            pattern,
            language,
            color,
        } => cmd_fix(&analyzer, &pattern, &language, color),
        Commands::Suggest { pattern, language } => cmd_suggest(&analyzer, &pattern, &language),
        Commands::QuickFix {
            pattern,
            language,
            kind,
        } => cmd_quick_fix(&analyzer, &pattern, &language, &kind),
        Commands::Library { language } => cmd_library(&analyzer, language),
        Commands::Languages => cmd_languages(&analyzer),
    }
}

fn cmd_analyze(
    analyzer: &PatternAnalyzer,
    pattern: &str,
    language: &str,
    json: bool,
    code_file: Option<PathBuf>,
    engine_error: Option<String>,
) -> Result<ExitCode> {
    let code = match code_file {
        Some(path) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let report = analyzer.report(pattern, language, code.as_deref(), engine_error.as_deref());

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else if let Some(help) = &report.help_message {
        println!("{help}");
    } else {
        println!("Pattern is valid for {}", report.language);
        for error in &report.errors {
            println!("  [{}] {}", error.severity, error.message);
        }
        if let Some(fix) = &report.corrected_pattern {
            println!("Suggested fix: {fix}");
        }
    }

    Ok(if report.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_fix(
    analyzer: &PatternAnalyzer,
    pattern: &str,
    language: &str,
    color: bool,
) -> Result<ExitCode> {
    let diagnostic = analyzer.analyze_pattern(pattern, language, None);

    let Some(corrected) = &diagnostic.corrected_pattern else {
        println!("No automatic fix available");
        return Ok(ExitCode::SUCCESS);
    };

    println!("{corrected}");
    if color {
        println!("\n{}", colorized_diff(pattern, corrected));
    } else {
        println!("\n{}", inline_diff(pattern, corrected));
    }
    println!(
        "\n{} (confidence {:.0}%)",
        DiffSummary::from_diff(pattern, corrected),
        diagnostic.confidence_score * 100.0
    );

    Ok(ExitCode::SUCCESS)
}

fn cmd_suggest(analyzer: &PatternAnalyzer, pattern: &str, language: &str) -> Result<ExitCode> {
    let suggestions = analyzer.suggest_corrections(pattern, language);

    if suggestions.is_empty() {
        println!("{}", analyzer.no_match_message(pattern, language));
        return Ok(ExitCode::SUCCESS);
    }

    println!("Pattern correction suggestions:");
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("\n{}. {}", i + 1, suggestion.suggested);
        println!("   Confidence: {:.0}%", suggestion.confidence * 100.0);
        println!("   Reason: {}", suggestion.reason);
        if !suggestion.applied_fixes.is_empty() {
            println!("   Fixes: {}", suggestion.applied_fixes.join(", "));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_quick_fix(
    analyzer: &PatternAnalyzer,
    pattern: &str,
    language: &str,
    kind: &str,
) -> Result<ExitCode> {
    let Some(kind) = ErrorKind::parse(kind) else {
        bail!("Unknown finding kind '{kind}'");
    };

    let fixes = analyzer.quick_fixes(pattern, language, kind);
    if fixes.is_empty() {
        println!("No quick fixes for {kind}");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Quick fixes for {kind}:");
    for fix in fixes {
        println!("  {fix}");
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_library(analyzer: &PatternAnalyzer, language: Option<String>) -> Result<ExitCode> {
    let library = analyzer.library();
    let languages: Vec<String> = match language {
        Some(name) => vec![analyzer.registry().canonical_name(&name)],
        None => library.languages().map(str::to_string).collect(),
    };

    for lang in languages {
        let entries = library.entries(&lang);
        if entries.is_empty() {
            println!("{lang}: no patterns");
            continue;
        }
        println!("{lang}:");
        for entry in entries {
            println!("  {:<28} {}", entry.name, entry.pattern.replace('\n', "\\n"));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_languages(analyzer: &PatternAnalyzer) -> Result<ExitCode> {
    println!("Supported languages:");
    for lang in analyzer.registry().all() {
        println!(
            "  {} (extensions: {})",
            lang.name(),
            lang.extensions().join(", ")
        );
    }
    Ok(ExitCode::SUCCESS)
}
