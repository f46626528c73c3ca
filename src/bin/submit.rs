use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use formsink::client::{FormSubmitter, SubmitOutcome};
use formsink::models::SubmissionPayload;

/// Submit a form payload to a formsink server.
#[derive(Parser)]
#[command(name = "submit", version)]
struct Cli {
    /// Base URL of the formsink server.
    #[arg(long, env = "FORMSINK_BASE_URL", default_value = "http://localhost:4000")]
    base_url: String,

    /// Value for the category field.
    #[arg(long)]
    category: String,

    /// Value for the text field.
    #[arg(long)]
    text: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let submitter = match FormSubmitter::new(&cli.base_url) {
        Ok(submitter) => submitter,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let payload = SubmissionPayload {
        category: cli.category,
        text: cli.text,
    };

    match submitter.submit(&payload).await {
        Ok(SubmitOutcome::Accepted) => {
            println!("accepted");
            ExitCode::SUCCESS
        }
        Ok(SubmitOutcome::Rejected(status)) => {
            println!("rejected ({status})");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
