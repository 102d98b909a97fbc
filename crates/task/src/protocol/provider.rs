//! MCP server over line-delimited stdio

use super::types::{error_codes, JsonRpcError};
use crate::service::ThingsService;
use thingsctl_core::{Error, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// MCP server exposing the Things operations as tools
pub struct McpServer {
    pub(crate) service: ThingsService,
}

impl McpServer {
    pub fn new(service: ThingsService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ThingsService {
        &self.service
    }

    /// Serve stdin/stdout until stdin closes
    pub async fn serve_stdio(&mut self) -> Result<()> {
        tracing::info!("MCP server started in stdio mode");
        let result = self
            .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await;
        tracing::info!("MCP server stopped");
        result
    }

    /// Serve one request per line until the reader is exhausted
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::configuration(format!("Failed to read request: {e}")))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<serde_json::Value>(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable request");
                    Some(
                        JsonRpcError::new(error_codes::PARSE_ERROR, format!("Parse error: {e}"))
                            .into_response(serde_json::Value::Null),
                    )
                }
            };

            let Some(response) = response else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;

            writer
                .write_all(format!("{response_json}\n").as_bytes())
                .await
                .map_err(|e| Error::configuration(format!("Failed to write response: {e}")))?;

            writer
                .flush()
                .await
                .map_err(|e| Error::configuration(format!("Failed to flush output: {e}")))?;
        }

        Ok(())
    }
}
