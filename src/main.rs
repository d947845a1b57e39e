//! Atlas Kubernetes Exporter
//!
//! Entry point: load the run configuration, export one Atlas project and
//! write the manifest stream to stdout or a file. Logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use atlas_k8s_exporter::{atlas::HttpAtlasClient, config::ExportConfig, export::Exporter};

/// Export a MongoDB Atlas project as Atlas Kubernetes Operator manifests
#[derive(Parser)]
#[command(name = "atlas-k8s-exporter", version, long_about = None)]
struct Args {
    /// Export configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Atlas project id; overrides the configuration file
    #[arg(short, long)]
    project_id: Option<String>,

    /// Target namespace; overrides the configuration file
    #[arg(short, long)]
    namespace: Option<String>,

    /// Write manifests to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Atlas Admin API access token
    #[arg(long, env = "ATLAS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExportConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ExportConfig::for_project(String::new()),
    };
    if let Some(project_id) = args.project_id {
        config.project_id = project_id;
    }
    if let Some(namespace) = args.namespace {
        config.namespace = namespace;
    }
    config.validate()?;

    info!(project_id = %config.project_id, namespace = %config.namespace, "Starting Atlas export");

    let client = HttpAtlasClient::new(config.base_url.clone(), args.access_token)?;
    let mut exporter = Exporter::new(&client, &config);
    let stream = exporter.export_yaml().await?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &stream).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Wrote manifests");
        }
        None => print!("{}", stream),
    }

    Ok(())
}

/// Initialize tracing subscriber on stderr
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
