use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use adgen_completion::{CompletionClient, CompletionContext, PollPolicy};
use adgen_core::{Brief, CancelToken, RawBriefInput};
use adgen_perf::{PerformanceInput, VisualFlags};

#[derive(Debug, Parser)]
#[command(name = "adgen-cli")]
#[command(about = "Adgen creative pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a raw brief (JSON from file or stdin) and print it with
    /// its heuristic audience profile. Runs entirely offline.
    Analyze {
        /// Path to the raw brief JSON; reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Score ad copy text offline with the deterministic copy scorer.
    Score {
        #[arg(long)]
        headline: String,
        #[arg(long, default_value = "")]
        subheadline: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        cta: String,
        /// Offer text to check the description echoes, if any.
        #[arg(long)]
        offer: Option<String>,
    },
    /// Predict performance for one creative offline.
    Predict {
        #[arg(long)]
        headline: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        cta: String,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long, default_value = "friendly")]
        tone: String,
        #[arg(long)]
        has_image: bool,
    },
    /// Run the full generation pipeline against the configured
    /// completion backend and print the ranked creatives.
    Generate {
        /// Path to the raw brief JSON; reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { input } => {
            let brief = read_brief(input.as_deref())?;
            let profile = adgen_psych::heuristic_profile(&brief);
            let out = serde_json::json!({ "brief": brief, "profile": profile });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Score {
            headline,
            subheadline,
            description,
            cta,
            offer,
        } => {
            let scores = adgen_copy::score(
                &adgen_copy::VariantText {
                    headline: &headline,
                    subheadline: &subheadline,
                    description: &description,
                    cta: &cta,
                },
                offer.as_deref(),
            );
            println!("{}", serde_json::to_string_pretty(&scores)?);
        }
        Commands::Predict {
            headline,
            description,
            cta,
            industry,
            tone,
            has_image,
        } => {
            let report = adgen_perf::predict(&PerformanceInput {
                headline,
                description,
                cta,
                industry,
                tone: adgen_core::Tone::parse_or_default(&tone),
                visual: VisualFlags {
                    has_image,
                    ..VisualFlags::default()
                },
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Generate { input } => {
            let brief = read_brief(input.as_deref())?;
            generate(brief).await?;
        }
    }

    Ok(())
}

/// Reads and normalizes a raw brief from a file or stdin.
fn read_brief(path: Option<&std::path::Path>) -> anyhow::Result<Brief> {
    let raw_text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let raw: RawBriefInput = serde_json::from_str(&raw_text)?;
    Ok(Brief::from_raw(&raw)?)
}

/// Full pipeline: audience profile, per-angle copy fan-out, performance
/// report per variant. Prints one pretty-JSON document.
async fn generate(brief: Brief) -> anyhow::Result<()> {
    let config = adgen_core::load_app_config()?;
    let client = CompletionClient::from_config(&config)?;
    let ctx = CompletionContext::new(CancelToken::new(), PollPolicy::from_config(&config));

    let psychology = adgen_psych::analyze(&client, &config.completion_model, &brief, &ctx).await;
    let variants =
        adgen_copy::generate_variants(&client, &config.completion_model, &brief, &ctx).await?;

    let visual = VisualFlags {
        has_image: brief.image_ref.is_some(),
        ..VisualFlags::default()
    };
    let creatives: Vec<serde_json::Value> = variants
        .into_iter()
        .map(|variant| {
            let performance = adgen_perf::predict(&PerformanceInput {
                headline: variant.headline.clone(),
                description: variant.description.clone(),
                cta: variant.cta.clone(),
                industry: brief.industry.clone(),
                tone: brief.tone,
                visual,
            });
            serde_json::json!({ "variant": variant, "performance": performance })
        })
        .collect();

    let out = serde_json::json!({
        "brief": brief,
        "psychology": psychology,
        "creatives": creatives,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
