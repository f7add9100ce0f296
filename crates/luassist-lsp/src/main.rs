use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

mod capabilities;
mod document;
mod handlers;
mod server;

#[derive(Parser)]
#[command(name = "luassist-lsp")]
#[command(about = "Language server for embedded Lua code intelligence")]
struct Cli {
    /// Use stdio for communication (required)
    #[arg(long)]
    stdio: bool,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // stdout carries the LSP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if !args.stdio {
        eprintln!("Error: --stdio flag is required");
        std::process::exit(1);
    }

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::build(|client| server::Backend::new(client, args.debug))
        .custom_method(
            "luassist/runtimeDiagnostic",
            server::Backend::runtime_diagnostic,
        )
        .finish();

    Server::new(stdin, stdout, socket).serve(service).await;
}
