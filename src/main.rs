use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use text_humanizer::api::{self, AnalyzeOptions};
use text_humanizer::models::{AiPreferences, AnalysisMode, AnalysisResult, WritingStyle};
use text_humanizer::services::config_store::ConfigStore;
use text_humanizer::services::scoring::top_keywords;
use text_humanizer::services::session::Session;

#[derive(Parser, Debug)]
#[command(name = "text-humanizer")]
#[command(about = "Score text for AI-likeness and rewrite it in a chosen style", long_about = None)]
#[command(version)]
struct Cli {
    /// Config directory (defaults to the platform config dir)
    #[arg(long, global = true, env = "TEXT_HUMANIZER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze text (reads stdin if neither TEXT nor --file is given)
    Analyze {
        text: Option<String>,

        /// Read input from a .txt, .md, .docx or .pdf file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Modes to run
        #[arg(short, long, value_enum, value_delimiter = ',', default_value = "detect")]
        mode: Vec<ModeArg>,

        /// Writing style for humanize/rephrase (defaults to the configured style)
        #[arg(short, long)]
        style: Option<WritingStyle>,

        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List the available writing styles
    Styles,
    /// Inspect or change the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config with API keys masked
    Show,
    /// Store the Gemini API key
    SetKey { key: String },
    /// Remove the stored Gemini API key
    DeleteKey,
    /// Override the Gemini base URL
    SetUrl { url: String },
    /// Set the default writing style
    SetStyle { style: WritingStyle },
}

/// Generation preferences; anything unset falls back to the config file
#[derive(Args, Debug, Default)]
struct PreferenceArgs {
    /// Tone strength, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    tone_strength: Option<u8>,

    /// Creativity level, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    creativity: Option<u8>,

    #[arg(long, overrides_with = "no_preserve_keywords")]
    preserve_keywords: bool,

    #[arg(long, overrides_with = "preserve_keywords")]
    no_preserve_keywords: bool,

    #[arg(long, overrides_with = "no_enhance_seo")]
    enhance_seo: bool,

    #[arg(long, overrides_with = "enhance_seo")]
    no_enhance_seo: bool,
}

fn flag_override(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl PreferenceArgs {
    fn apply(&self, base: AiPreferences) -> AiPreferences {
        AiPreferences {
            tone_strength: self.tone_strength.unwrap_or(base.tone_strength),
            creativity_level: self.creativity.unwrap_or(base.creativity_level),
            preserve_keywords: flag_override(self.preserve_keywords, self.no_preserve_keywords)
                .unwrap_or(base.preserve_keywords),
            enhance_seo: flag_override(self.enhance_seo, self.no_enhance_seo)
                .unwrap_or(base.enhance_seo),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Detect,
    Humanize,
    Plagiarism,
    Rephrase,
    /// Every mode
    All,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn resolve_modes(args: &[ModeArg]) -> Vec<AnalysisMode> {
    if args.contains(&ModeArg::All) {
        return AnalysisMode::ALL.to_vec();
    }
    let mut modes: Vec<AnalysisMode> = args
        .iter()
        .filter_map(|m| match m {
            ModeArg::Detect => Some(AnalysisMode::Detect),
            ModeArg::Humanize => Some(AnalysisMode::Humanize),
            ModeArg::Plagiarism => Some(AnalysisMode::Plagiarism),
            ModeArg::Rephrase => Some(AnalysisMode::Rephrase),
            ModeArg::All => None,
        })
        .collect();
    modes.sort();
    modes.dedup();
    modes
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    text_humanizer::init_logging();
    let cli = Cli::parse();

    let store = match cli.config_dir {
        Some(dir) => ConfigStore::new(dir),
        None => ConfigStore::open_default(),
    };

    match cli.command {
        Commands::Analyze {
            text,
            file,
            mode,
            style,
            prefs,
            format,
            out,
        } => {
            let input = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => api::preprocess_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            if input.trim().is_empty() {
                bail!("No input text");
            }

            let base = store.load().context("Failed to load config")?.preferences;
            let preferences = prefs.apply(base);

            let opts = AnalyzeOptions {
                modes: resolve_modes(&mode),
                style,
                preferences: Some(preferences),
            };
            let mut session = Session::new();
            let result = api::analyze_text(&store, &mut session, &input, opts).await?;

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => render_report(&result),
            };
            match out {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", rendered),
            }

            for failure in &result.errors {
                eprintln!("{} failed ({:?}): {}", failure.mode, failure.kind, failure.message);
            }
            if result.has_errors() {
                return Ok(ExitCode::from(2));
            }
        }
        Commands::Styles => {
            println!("{}", serde_json::to_string_pretty(&api::list_styles())?);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = api::get_config(&store)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::SetKey { key } => {
                api::store_api_key(&store, &key)?;
                eprintln!("API key saved to {}", store.config_file().display());
            }
            ConfigAction::DeleteKey => {
                api::delete_api_key(&store)?;
                eprintln!("API key removed");
            }
            ConfigAction::SetUrl { url } => {
                api::set_provider_url(&store, &url)?;
                eprintln!("Base URL set to {}", url.trim());
            }
            ConfigAction::SetStyle { style } => {
                api::set_default_style(&store, style)?;
                eprintln!("Default style set to {}", style);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if let Some(score) = result.ai_score {
        let _ = writeln!(
            out,
            "AI score: {:.0}% ({})",
            score * 100.0,
            result.verdict_label.as_deref().unwrap_or("-")
        );
    }
    if let Some(b) = &result.content_breakdown {
        let _ = writeln!(
            out,
            "  natural flow {}%  complexity {}%  authenticity {}%",
            b.natural_flow, b.complexity, b.authenticity
        );
    }
    if let Some(trust) = result.trust_score {
        let _ = writeln!(out, "Trust score: {:.0}/100", trust);
    }
    if let (Some(r), Some(c)) = (result.readability_score, result.clarity_score) {
        let _ = writeln!(out, "Readability: {:.0}%  Clarity: {:.0}%", r * 100.0, c * 100.0);
    }
    if let Some(tone) = &result.tone_analysis {
        let _ = writeln!(out, "Tone: {:?} ({:.2})", tone.sentiment, tone.score);
    }
    if let Some(density) = &result.keyword_density {
        let words: Vec<String> = top_keywords(density, 5)
            .iter()
            .map(|(k, v)| format!("{} {:.1}%", k, v * 100.0))
            .collect();
        if !words.is_empty() {
            let _ = writeln!(out, "Keywords: {}", words.join(", "));
        }
    }
    if let Some(tips) = result.suggestions.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "Suggestions:");
        for tip in tips {
            let _ = writeln!(out, "  - {}", tip);
        }
    }
    if let Some(matches) = &result.plagiarism_results {
        let _ = writeln!(out, "Repeated phrases: {}", matches.len());
        for m in matches {
            let _ = writeln!(out, "  \"{}\" x{}", m.phrase, m.matches);
        }
    }
    if let Some(text) = &result.humanized_text {
        let _ = writeln!(out, "\nHumanized:\n{}", text);
        if let Some(pct) = result.modified_percentage {
            let _ = writeln!(out, "({:.1}% of words changed)", pct);
        }
    }
    if let Some(versions) = &result.rephrased_versions {
        let _ = writeln!(out, "\nRephrased:");
        for (i, v) in versions.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, v);
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "text-humanizer",
            "analyze",
            "Hello there.",
            "--mode",
            "detect,humanize",
            "--style",
            "Academic",
            "--tone-strength",
            "80",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { text, mode, style, prefs, .. } => {
                assert_eq!(text.as_deref(), Some("Hello there."));
                assert_eq!(
                    resolve_modes(&mode),
                    vec![AnalysisMode::Detect, AnalysisMode::Humanize]
                );
                assert_eq!(style, Some(WritingStyle::Academic));
                assert_eq!(prefs.tone_strength, Some(80));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        assert!(Cli::try_parse_from(["text-humanizer", "analyze", "x", "--style", "poetic"]).is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_tone() {
        assert!(
            Cli::try_parse_from(["text-humanizer", "analyze", "x", "--tone-strength", "150"]).is_err()
        );
    }

    fn parse_prefs(flags: &[&str]) -> PreferenceArgs {
        let mut argv = vec!["text-humanizer", "analyze", "x"];
        argv.extend_from_slice(flags);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Analyze { prefs, .. } => prefs,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_flags_can_disable_configured_preferences() {
        let base = AiPreferences {
            preserve_keywords: true,
            enhance_seo: true,
            ..Default::default()
        };

        let unchanged = parse_prefs(&[]).apply(base.clone());
        assert!(unchanged.preserve_keywords && unchanged.enhance_seo);

        let disabled = parse_prefs(&["--no-preserve-keywords", "--no-enhance-seo"]).apply(base.clone());
        assert!(!disabled.preserve_keywords);
        assert!(!disabled.enhance_seo);

        // Last flag wins
        let flipped = parse_prefs(&["--no-enhance-seo", "--enhance-seo"]).apply(AiPreferences::default());
        assert!(flipped.enhance_seo);
        assert!(!flipped.preserve_keywords);
    }

    #[test]
    fn test_resolve_all_modes() {
        assert_eq!(resolve_modes(&[ModeArg::Detect, ModeArg::All]), AnalysisMode::ALL.to_vec());
    }

    #[test]
    fn test_render_report() {
        let result = AnalysisResult {
            ai_score: Some(0.42),
            verdict_label: Some("Mixed".to_string()),
            trust_score: Some(71.0),
            humanized_text: Some("Plain words.".to_string()),
            ..Default::default()
        };
        let report = render_report(&result);
        assert!(report.contains("AI score: 42% (Mixed)"));
        assert!(report.contains("Trust score: 71/100"));
        assert!(report.contains("Plain words."));
    }
}
