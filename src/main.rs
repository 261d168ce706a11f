//! require() completion language server executable
//!
//! Runs over stdio for editor integration. Logs go to stderr.

use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use require_lsp::{LspServer, PluginRegistry, RequirePlugin};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting require() completion server");

    let mut registry = PluginRegistry::new();
    match RequirePlugin::new() {
        Ok(plugin) => registry.register(plugin),
        Err(e) => tracing::error!("Failed to load require plugin: {}", e),
    }

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| LspServer::new(client, registry));
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        let version = env!("CARGO_PKG_VERSION");
        assert!(!version.is_empty());
    }
}
