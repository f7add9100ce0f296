use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::warn;

use luassist_catalog::{ApiFile, CompletionProvider};
use luassist_scanner::RuntimeDiagnostic;

use crate::capabilities;
use crate::document::Document;
use crate::handlers;

pub struct Backend {
    client: Client,
    documents: DashMap<Url, Document>,
    provider: CompletionProvider,
    debug: bool,
}

/// Configuration pushed by the host: paths are plain strings, persistence
/// is the host's problem.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiConfig {
    api_file: Option<String>,
    api_root: Option<String>,
}

/// Payload of the `luassist/runtimeDiagnostic` custom method: the host's
/// interpreter callback after a failed run. The offset, when present, is a
/// flat character offset into the script.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDiagnosticParams {
    pub uri: Url,
    pub message: String,
    #[serde(default)]
    pub offset: Option<usize>,
}

impl Backend {
    pub fn new(client: Client, debug: bool) -> Self {
        Self {
            client,
            documents: DashMap::new(),
            provider: CompletionProvider::new(),
            debug,
        }
    }

    async fn log_debug(&self, message: &str) {
        if self.debug {
            self.client
                .log_message(MessageType::INFO, format!("[DEBUG] {}", message))
                .await;
        }
    }

    /// Map a runtime diagnostic from the host onto the document and publish
    /// the resulting marker.
    pub async fn runtime_diagnostic(&self, params: RuntimeDiagnosticParams) -> Result<()> {
        let diagnostics = match self.documents.get(&params.uri) {
            Some(doc) => {
                let markers = self.provider.error_markers(
                    doc.text(),
                    Some(RuntimeDiagnostic {
                        message: params.message,
                        offset: params.offset,
                    }),
                );
                markers
                    .into_iter()
                    .map(handlers::diagnostics::marker_to_diagnostic)
                    .collect()
            }
            None => {
                warn!(uri = %params.uri, "runtime diagnostic for unknown document");
                Vec::new()
            }
        };

        self.client
            .publish_diagnostics(params.uri, diagnostics, None)
            .await;
        Ok(())
    }

    async fn reload_api(&self, file: &str, root: &str) {
        match self.provider.reload_dynamic(&ApiFile::new(file, root)) {
            Ok(warnings) => {
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!(
                            "loaded API description {} ({} entries, {} warnings)",
                            file,
                            self.provider.catalog().dynamic_snapshot().len(),
                            warnings.len()
                        ),
                    )
                    .await;
                for warning in warnings {
                    self.client
                        .log_message(
                            MessageType::WARNING,
                            format!(
                                "{}:{}: {}",
                                warning.file.display(),
                                warning.line,
                                warning.reason
                            ),
                        )
                        .await;
                }
            }
            // the catalog keeps its previous dynamic set on failure
            Err(error) => {
                self.client
                    .show_message(
                        MessageType::ERROR,
                        format!("Could not load API description: {}", error),
                    )
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        self.log_debug("Initializing luassist LSP server").await;

        Ok(InitializeResult {
            capabilities: capabilities::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "luassist-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "luassist LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.log_debug("Shutting down server").await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        self.log_debug(&format!("Document opened: {}", uri)).await;
        self.documents
            .insert(uri, Document::new(params.text_document.text));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        self.log_debug(&format!("Document changed: {}", uri)).await;

        if let Some(mut doc) = self.documents.get_mut(&uri) {
            // Apply changes (for full sync, we just replace the entire text)
            for change in params.content_changes {
                doc.update_text(change.text);
            }
            drop(doc); // Release the lock before async call

            // runtime diagnostics refer to the executed text; an edit makes
            // them stale
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.log_debug(&format!("Document closed: {}", uri)).await;
        self.documents.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings = params
            .settings
            .get("luassist")
            .cloned()
            .unwrap_or(params.settings);
        let config: ApiConfig = match serde_json::from_value(settings) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "ignoring malformed configuration");
                return;
            }
        };

        if let (Some(file), Some(root)) = (config.api_file, config.api_root) {
            self.reload_api(&file, &root).await;
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        self.log_debug(&format!("Completion request at {:?}", position))
            .await;

        if let Some(doc) = self.documents.get(uri) {
            let items = handlers::completion::get_completions(&doc, position, &self.provider);
            Ok(Some(CompletionResponse::Array(items)))
        } else {
            Ok(None)
        }
    }

    async fn signature_help(&self, params: SignatureHelpParams) -> Result<Option<SignatureHelp>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        self.log_debug(&format!("Signature help request at {:?}", position))
            .await;

        if let Some(doc) = self.documents.get(uri) {
            Ok(handlers::signature_help::get_signature_help(
                &doc,
                position,
                &self.provider,
            ))
        } else {
            Ok(None)
        }
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let uri = &params.text_document.uri;

        self.log_debug(&format!("Folding range request for: {}", uri))
            .await;

        if let Some(doc) = self.documents.get(uri) {
            Ok(Some(handlers::folding::get_folding_ranges(
                &doc,
                &self.provider,
            )))
        } else {
            Ok(None)
        }
    }
}
