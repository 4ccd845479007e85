mod gemini;
mod input;
mod levels;
mod parser;
mod prompt;
mod render;
mod roadmap;
mod verify;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use gemini::{GeminiClient, GenerationSettings};
use verify::{HttpVerifier, LinkVerifier, SyntaxOnlyVerifier};

#[derive(Parser)]
#[command(name = "resource_rover", about = "Learning paths for any skill, with verified resource links")]
struct Cli {
    /// Debug-level logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the three level names chosen for a skill
    Levels { skill: String },
    /// Print the generation prompt for a skill
    Prompt { skill: String },
    /// List Gemini models that support generateContent
    Models {
        #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Check that each URL answers a HEAD request with status < 400
    Verify {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Extract a learning path from a saved model response
    Parse {
        /// File holding the raw model output
        file: PathBuf,
        /// Skill the response was generated for (selects the level names)
        #[arg(short, long)]
        skill: String,
        /// Print JSON instead of the formatted view
        #[arg(long)]
        json: bool,
        /// Accept any well-formed URL without probing it
        #[arg(long)]
        no_verify: bool,
    },
    /// Print the roadmap.sh supplement for a skill
    Roadmap { skill: String },
    /// Generate, verify and save a learning path
    Generate {
        skill: String,
        #[command(flatten)]
        generation: GenerationArgs,
        #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Directory for the Markdown file
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Skip the roadmap.sh lookup
        #[arg(long)]
        no_roadmap: bool,
    },
}

#[derive(Args)]
struct GenerationArgs {
    #[arg(long, default_value = gemini::DEFAULT_MODEL)]
    model: String,
    /// 0.0 - 1.0
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,
    /// 0.0 - 1.0
    #[arg(long, default_value_t = 0.9)]
    top_p: f32,
    /// 1 - 50
    #[arg(long, default_value_t = 40)]
    top_k: u32,
    /// 1000 - 8000
    #[arg(long, default_value_t = 4096)]
    max_output_tokens: u32,
}

impl From<GenerationArgs> for GenerationSettings {
    fn from(a: GenerationArgs) -> Self {
        Self {
            model: a.model,
            temperature: a.temperature,
            top_p: a.top_p,
            top_k: a.top_k,
            max_output_tokens: a.max_output_tokens,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "resource_rover=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let t0 = Instant::now();

    let result = match cli.command {
        Commands::Levels { skill } => {
            let skill = input::validate_skill(&skill)?;
            for (i, name) in levels::level_names(skill).iter().enumerate() {
                println!("{}. {}", i + 1, name);
            }
            Ok(())
        }
        Commands::Prompt { skill } => {
            let skill = input::validate_skill(&skill)?;
            println!("{}", prompt::build(skill, &levels::level_names(skill)));
            Ok(())
        }
        Commands::Models { api_key } => {
            let key = input::validate_api_key(api_key.as_deref())?;
            let client = GeminiClient::new(key)?;
            for model in client.list_models().await? {
                println!("{}", model);
            }
            Ok(())
        }
        Commands::Verify { urls } => {
            let verifier = HttpVerifier::new()?;
            let mut failed = 0usize;
            for url in &urls {
                let ok = verifier.verify(url).await;
                if !ok {
                    failed += 1;
                }
                println!("{:<4} {}", if ok { "ok" } else { "fail" }, url);
            }
            println!("\n{} of {} links verified", urls.len() - failed, urls.len());
            Ok(())
        }
        Commands::Parse {
            file,
            skill,
            json,
            no_verify,
        } => {
            let skill = input::validate_skill(&skill)?;
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if no_verify {
                parse_saved(&text, skill, json, &SyntaxOnlyVerifier).await
            } else {
                parse_saved(&text, skill, json, &HttpVerifier::new()?).await
            }
        }
        Commands::Roadmap { skill } => {
            let skill = input::validate_skill(&skill)?;
            let client = roadmap::client()?;
            match roadmap::fetch_roadmap(&client, roadmap::ROADMAP_BASE_URL, skill).await {
                Some(md) => println!("{}", md),
                None => println!("roadmap.sh could not be reached."),
            }
            Ok(())
        }
        Commands::Generate {
            skill,
            generation,
            api_key,
            output,
            no_roadmap,
        } => {
            let skill = input::validate_skill(&skill)?;
            let key = input::validate_api_key(api_key.as_deref())?;
            let settings = GenerationSettings::from(generation);
            settings.validate()?;
            generate(skill, key, &settings, &output, !no_roadmap).await
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn parse_saved<V: LinkVerifier>(text: &str, skill: &str, json: bool, verifier: &V) -> Result<()> {
    let levels = levels::level_names(skill);
    let path = parser::extract(text, &levels, verifier).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
    } else {
        print!("{}", render::terminal(skill, &levels, &path, None, verifier).await);
    }
    Ok(())
}

async fn generate(
    skill: &str,
    api_key: &str,
    settings: &GenerationSettings,
    output: &Path,
    with_roadmap: bool,
) -> Result<()> {
    let levels = levels::level_names(skill);
    let prompt = prompt::build(skill, &levels);
    let client = GeminiClient::new(api_key)?;
    let verifier = HttpVerifier::new()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let started = Instant::now();
    spinner.set_message(format!("Generating your personalized learning path for {}...", skill));
    let response = client.generate(&prompt, settings).await;
    let response = match response {
        Ok(text) => text,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.context("Failed to generate content. Check your API key and try again."));
        }
    };

    let roadmap = if with_roadmap {
        spinner.set_message("Looking up roadmap.sh...");
        let client = roadmap::client()?;
        roadmap::fetch_roadmap(&client, roadmap::ROADMAP_BASE_URL, skill).await
    } else {
        None
    };

    spinner.set_message("Verifying resource links...");
    let path = parser::extract(&response, &levels, &verifier).await;
    spinner.finish_and_clear();
    println!("✨ Generated in {:.2} seconds!\n", started.elapsed().as_secs_f64());

    print!("{}", render::terminal(skill, &levels, &path, roadmap.as_deref(), &verifier).await);

    if path.is_empty() {
        anyhow::bail!("The model output had no recognizable levels. Please try again.");
    }
    if path.len() < levels.as_slice().len() {
        warn!(
            found = path.len(),
            "Some levels are missing from the model output; run generate again to retry"
        );
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let file = output.join(render::file_name(skill));
    let md = render::markdown(skill, &levels, &path, chrono::Local::now());
    std::fs::write(&file, md).with_context(|| format!("Failed to write {}", file.display()))?;
    info!(path = %file.display(), "Saved learning path");
    println!("💾 Saved to {}", file.display());

    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
