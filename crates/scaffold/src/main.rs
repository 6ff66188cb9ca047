use crate::prelude::*;
use clap::Parser;

mod dispatcher;
mod error;
mod extract;
mod generate;
mod prelude;
mod providers;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Relay prompts to LLM providers and browse the generated project files"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "SCAFFOLD_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the generation API (and optionally the built front-end)
    Serve(crate::server::ServeOptions),

    /// Generate a project from a prompt with one provider call
    Generate(crate::generate::GenerateOptions),

    /// Extract the project files from a saved model response
    Extract(crate::extract::ExtractOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Extract(options) => crate::extract::run(options, app.global).await,
    }
}
