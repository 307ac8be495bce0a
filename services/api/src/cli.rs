use crate::server;
use clap::{Args, Parser, Subcommand};
use gummy_mummy::engine::{AdviceEngine, Payload, Section};
use gummy_mummy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Gummy Mummy Advisory Service",
    about = "Run the maternal-care advisory service or evaluate a section from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate one section payload offline and print the assessment
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Section to evaluate (mothercare, sleep, feeding, hygiene, triage, development)
    #[arg(long)]
    pub(crate) section: String,
    /// Questionnaire payload as a JSON object
    #[arg(long, default_value = "{}")]
    pub(crate) payload: String,
    /// Baby age in months, injected into the payload when set
    #[arg(long)]
    pub(crate) baby_age: Option<i64>,
    /// Pin the narrative sentence choice for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
    }
}

fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let mut payload: Payload = serde_json::from_str(&args.payload)?;
    if let Some(months) = args.baby_age {
        payload.insert("baby_age_months".to_string(), months.into());
    }

    let engine = match args.seed {
        Some(seed) => AdviceEngine::seeded(seed),
        None => AdviceEngine::new(),
    };

    let section = Section::from_name(&args.section);
    let assessment = engine.evaluate(&section, None, &payload);

    println!("Section: {}", section.name());
    println!(
        "Score: {} | Status: {} | Urgency: {}",
        assessment.score,
        assessment.status,
        assessment.urgency.label()
    );
    if let Some(diagnosis) = &assessment.diagnosis {
        println!("Diagnosis: {diagnosis}");
    }
    println!("\n{}", assessment.advice);

    Ok(())
}
