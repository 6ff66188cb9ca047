use scaffold_core::models::default_model;
use scaffold_core::request::{GenerateBody, Provider};

use crate::dispatcher::Dispatcher;
use crate::extract::{render, Output, OutputFlags};
use crate::prelude::{eprintln, println, *};
use crate::providers::{ProviderEndpoints, Registry};

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateOptions {
    /// What to build
    #[arg(value_name = "PROMPT")]
    pub prompt: String,

    /// openai, anthropic, gemini, cohere, ollama or local
    #[arg(short, long, env = "SCAFFOLD_PROVIDER", default_value = "openai")]
    pub provider: String,

    /// Defaults to the provider's first catalog model
    #[arg(short, long, env = "SCAFFOLD_MODEL")]
    pub model: Option<String>,

    /// Provider API key; optional for ollama and local
    #[arg(long, env = "SCAFFOLD_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Endpoint for ollama and local
    #[arg(long, env = "SCAFFOLD_API_URL")]
    pub api_url: Option<String>,

    #[clap(flatten)]
    pub output: OutputFlags,

    #[clap(flatten)]
    pub endpoints: ProviderEndpoints,
}

impl GenerateOptions {
    fn body(&self, provider: Provider) -> GenerateBody {
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| default_model(provider).to_string());

        GenerateBody {
            prompt: Some(self.prompt.clone()),
            model: Some(model),
            api_key: self.api_key.clone(),
            provider: Some(self.provider.clone()),
            api_url: self.api_url.clone(),
        }
    }
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let provider: Provider = options.provider.parse()?;
    let body = options.body(provider);

    if global.verbose {
        eprintln!(
            "Generating with {} ({})",
            provider,
            body.model.as_deref().unwrap_or_default()
        );
    }

    let dispatcher = Dispatcher::new(Registry::from_endpoints(&options.endpoints));
    let text = dispatcher.generate(body).await?;

    println!("{}", render(&text, options.output.output(Output::Raw))?);

    Ok(())
}
