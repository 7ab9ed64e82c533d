use anyhow::{Context, Result};
use tracing::info;

use tripsmith::collaborators::{Collaborators, UnavailableGenerator};
use tripsmith::{Agent, TripsmithConfig, handle_plan, logging};

fn main() -> Result<()> {
    let config = TripsmithConfig::load()?;
    logging::init(&config.logging)?;

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    info!(version = tripsmith::VERSION, "Planning trip");

    // No language model is wired in, so every generative stage takes its fallback path
    let collaborators = Collaborators::offline(Box::new(UnavailableGenerator));
    let mut agent = Agent::new(collaborators, config.planner);

    let response = handle_plan(&mut agent, &text);
    let body = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
    println!("{body}");

    if response.status_code() != 200 {
        std::process::exit(1);
    }
    Ok(())
}
