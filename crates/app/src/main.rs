mod print;
mod shell;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use planner_core::model::{MAX_WEEKS, MentorStyle, PlanRequest};
use services::config::DEFAULT_SECRETS_FILE;
use services::export::{self, PDF_FILE_NAME, plan_title};
use services::{AiSettings, Clock, PlanGenerator, PlanSource, PlannerSession};

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser)]
#[command(
    name = "planner",
    about = "Turn big goals into an actionable weekly study plan"
)]
struct Cli {
    /// TOML file holding OPENAI_API_KEY (checked before the environment)
    #[arg(long, global = true, default_value = DEFAULT_SECRETS_FILE)]
    secrets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a plan, print it and write the PDF and JSON exports
    Generate {
        #[command(flatten)]
        plan: PlanArgs,
        /// Directory for agentic_plan.pdf and agentic_plan.json
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Generate a plan and track it interactively
    Session {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Spread an exported plan's tasks over a new number of weeks
    Recompress {
        /// Plan JSON file
        plan: PathBuf,
        /// Remaining weeks
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WEEKS)))]
        weeks: u32,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print flashcards for one week of an exported plan
    Flashcards {
        /// Plan JSON file
        plan: PathBuf,
        #[arg(long, default_value_t = 1)]
        week: u32,
        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render an exported plan to PDF
    Render {
        /// Plan JSON file
        plan: PathBuf,
        #[arg(long, default_value = "Agentic Plan")]
        title: String,
        #[arg(long, default_value = PDF_FILE_NAME)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct PlanArgs {
    /// What you want to achieve
    #[arg(long)]
    goal: String,
    /// Timeframe in weeks
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WEEKS)))]
    weeks: u32,
    #[arg(long, value_enum, default_value_t = Mentor::Coach)]
    mentor: Mentor,
    /// Seed for the template plan's tips
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the model and use the template plan
    #[arg(long)]
    offline: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mentor {
    Coach,
    ZenMonk,
    TechBro,
}

impl From<Mentor> for MentorStyle {
    fn from(mentor: Mentor) -> Self {
        match mentor {
            Mentor::Coach => MentorStyle::Coach,
            Mentor::ZenMonk => MentorStyle::ZenMonk,
            Mentor::TechBro => MentorStyle::TechBro,
        }
    }
}

/// Validate input and run the generator once.
async fn generate(secrets: &Path, args: &PlanArgs) -> anyhow::Result<(PlanRequest, PlannerSession)> {
    let request = PlanRequest::new(
        args.goal.as_str(),
        args.weeks,
        MentorStyle::from(args.mentor).label(),
    )?;

    let settings = if args.offline {
        None
    } else {
        AiSettings::load(secrets).context("loading AI settings")?
    };
    let generator = PlanGenerator::from_settings(settings).with_tip_seed(args.seed);

    eprintln!("Generating plan...");
    let outcome = generator.generate(&request).await;
    match (&outcome.source, &outcome.warning) {
        (PlanSource::Model, _) => eprintln!("Plan generated!"),
        (PlanSource::Fallback, Some(err)) if generator.has_model() => {
            eprintln!("Model call failed or returned invalid JSON. Using fallback plan. ({err})");
        }
        (PlanSource::Fallback, _) => eprintln!("Plan generated from the built-in template."),
    }

    let mut session = PlannerSession::new();
    session.install_plan(outcome.plan);
    Ok((request, session))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Generate { plan, out_dir } => {
            let (request, session) = generate(&cli.secrets, &plan).await?;
            print::plan(&mut out, &session)?;
            print::progress(&mut out, &session.progress())?;

            if let Some(plan) = session.plan() {
                let paths = export::write_exports(
                    &out_dir,
                    plan,
                    &plan_title(request.goal()),
                    Clock::default_clock(),
                )?;
                writeln!(out, "\nWrote {} and {}", paths.pdf.display(), paths.json.display())?;
            }
        }
        Command::Session { plan } => {
            let (request, mut session) = generate(&cli.secrets, &plan).await?;
            print::plan(&mut out, &session)?;
            let title = plan_title(request.goal());
            shell::run(
                &mut session,
                &title,
                Clock::default_clock(),
                io::stdin().lock(),
                &mut out,
            )?;
        }
        Command::Recompress { plan, weeks, out: target } => {
            let loaded = export::load_plan(&plan)?;
            let recompressed = planner_core::recompress::recompress(loaded, weeks);
            let json = export::plan_to_json(&recompressed)?;
            match target {
                Some(path) => export::write_file(&path, json.as_bytes())?,
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Flashcards { plan, week, json } => {
            let loaded = export::load_plan(&plan)?;
            let cards = planner_core::model::flashcards(&loaded, week);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?;
            } else {
                print::flashcards(&mut out, week, &cards)?;
            }
        }
        Command::Render { plan, title, out: target } => {
            let loaded = export::load_plan(&plan)?;
            let bytes = export::render_pdf(&loaded, &title, Clock::default_clock().now());
            export::write_file(&target, &bytes)?;
            tracing::info!(path = %target.display(), "plan rendered");
        }
    }
    Ok(())
}

/// `RUST_LOG` directives, or `info` when unset or unparsable.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    if let Err(err) = run(Cli::parse()).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
