//! `postfast` CLI entry-point.
//!
//! Available sub-commands:
//! - `run`               — run one node operation over a batch of items.
//! - `check-credentials` — validate the configured API key.
//! - `operations`        — list the supported resources and operations.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nodes::{ExecutableNode, ExecutionContext, NodeItem};
use postfast::credentials::DEFAULT_BASE_URL;
use postfast::description::{describe, subtitle};
use postfast::{classify, ItemFailure, Operation, PostFastClient, PostFastCredentials, PostFastNode};

#[derive(Parser)]
#[command(
    name = "postfast",
    about = "Schedule and manage social media posts through the PostFast API",
    version
)]
struct Cli {
    /// PostFast API key.
    #[arg(long, env = "POSTFAST_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API host; override for staging or self-hosted instances.
    #[arg(long, env = "POSTFAST_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a node operation and print the output items as JSON.
    Run {
        /// JSON object holding the node parameters.
        #[arg(long)]
        params: PathBuf,
        /// JSON array of input items (defaults to one empty item).
        #[arg(long)]
        items: Option<PathBuf>,
        /// Overrides `resource` from the parameter file.
        #[arg(long)]
        resource: Option<String>,
        /// Overrides `operation` from the parameter file.
        #[arg(long)]
        operation: Option<String>,
        /// Emit an error item for a failing input item instead of aborting.
        #[arg(long)]
        continue_on_fail: bool,
    },
    /// Check that the API key is accepted.
    CheckCredentials,
    /// List resources and their operations.
    Operations,
}

impl Cli {
    fn credentials(&self) -> anyhow::Result<PostFastCredentials> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .context("an API key is required (--api-key or POSTFAST_API_KEY)")?;
        Ok(PostFastCredentials::new(api_key).with_base_url(&self.base_url))
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Run {
            params,
            items,
            resource,
            operation,
            continue_on_fail,
        } => {
            let mut params = read_json(params)?;
            let fields = params
                .as_object_mut()
                .context("the parameter file must contain a JSON object")?;
            if let Some(resource) = resource {
                fields.insert("resource".into(), Value::String(resource.clone()));
            }
            if let Some(operation) = operation {
                fields.insert("operation".into(), Value::String(operation.clone()));
            }

            let items: Vec<NodeItem> = match items {
                Some(path) => match read_json(path)? {
                    Value::Array(values) => values.into_iter().map(NodeItem::new).collect(),
                    _ => return Err(anyhow!("{} must contain a JSON array", path.display())),
                },
                None => vec![NodeItem::empty()],
            };

            let node = PostFastNode::new(PostFastClient::new(cli.credentials()?));
            let ctx = ExecutionContext::new("PostFast").with_continue_on_fail(*continue_on_fail);
            info!("Running execution {} with {} item(s)", ctx.execution_id, items.len());

            let output = node
                .execute(items, &params, &ctx)
                .await
                .map_err(|e| anyhow!("{} ({})", e, e.description()))?;

            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::CheckCredentials => {
            let client = PostFastClient::new(cli.credentials()?);
            match client.test_credentials().await {
                Ok(()) => println!("✅ Credentials accepted by {}", cli.base_url),
                Err(e) => {
                    let failure = classify(&ItemFailure::Request(e), Operation::GetAll);
                    eprintln!("❌ Credential check failed: {failure}");
                    std::process::exit(1);
                }
            }
        }
        Command::Operations => {
            let desc = describe();
            println!("{} (v{})", desc.display_name, desc.version);
            for resource in &desc.resources {
                println!("{} — {}", resource.value, resource.description);
                for op in &resource.operations {
                    println!(
                        "  {:<24} {}",
                        subtitle(resource.value, op.value),
                        op.description
                    );
                }
            }
        }
    }

    Ok(())
}
