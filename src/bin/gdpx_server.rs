//! gdpx API server binary

use clap::Parser;
use gdpx::api::{run_api_server, server::ApiConfig};
use gdpx::config::ConverterConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gdpx-server")]
#[command(version)]
#[command(about = "gdpx API Server - HTTP API for GDP currency conversion")]
#[command(long_about = r#"
gdpx API Server

Endpoints:
  - POST /api/v1/countries - List countries in a GDP workbook
  - POST /api/v1/convert   - Convert a workbook, write <input>_output.xlsx
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  gdpx-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/convert \
    -H "Content-Type: application/json" \
    -d '{"file_path": "upload.xlsx", "shared_currency": ["France", "Germany"]}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "GDPX_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "GDPX_PORT")]
    port: u16,

    /// YAML config file
    #[arg(short, long, env = "GDPX_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gdpx_server=info,gdpx=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let converter = ConverterConfig::load(args.config.as_deref())?;

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        converter,
    };

    run_api_server(config).await
}
