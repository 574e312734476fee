use std::path::Path;

use crate::action_executor::{PathOpener, SystemOpener};
use crate::config::Config;
use crate::contract::DisplayEntry;
use crate::error::PluginError;
use crate::parser::parse_query_output;
use crate::projection;
use crate::query_dsl::Command;
use crate::ranking_tool::{resolve_tool_path, RankingToolClient};

/// Classifies launcher input and drives the ranking tool client.
///
/// The tool path is resolved once at construction and never re-resolved.
pub struct QueryRouter {
    configured_tool: String,
    client: Option<RankingToolClient>,
    opener: Box<dyn PathOpener>,
}

impl QueryRouter {
    pub fn new(config: &Config) -> Self {
        let client = match resolve_tool_path(&config.tool_path) {
            Ok(tool) => {
                tracing::debug!(tool = %tool.as_path().display(), "ranking tool resolved");
                Some(RankingToolClient::new(tool))
            }
            Err(error) => {
                tracing::warn!(%error, "ranking tool unavailable");
                None
            }
        };
        Self::with_parts(&config.tool_path, client, Box::new(SystemOpener))
    }

    pub fn with_parts(
        configured_tool: &str,
        client: Option<RankingToolClient>,
        opener: Box<dyn PathOpener>,
    ) -> Self {
        Self {
            configured_tool: configured_tool.to_string(),
            client,
            opener,
        }
    }

    pub fn has_tool(&self) -> bool {
        self.client.is_some()
    }

    /// Errors come back as a single error row, never as an empty list.
    pub fn handle_query(&self, raw_input: &str) -> Vec<DisplayEntry> {
        let Some(client) = &self.client else {
            return vec![projection::tool_missing_entry()];
        };

        let command = Command::parse(raw_input);
        tracing::debug!(?command, "routed query");
        let routed = match &command {
            Command::Lookup(text) => lookup(client, text),
            Command::RegisterAndOpen(path) => Ok(register_and_open(path)),
        };

        routed.unwrap_or_else(|error| {
            tracing::info!(kind = error.kind(), %error, "query failed");
            vec![projection::plugin_error_entry(&error)]
        })
    }

    /// Opens the directory, then records the access. An add failure, or a
    /// missing tool, is reported after the directory has already been opened.
    pub fn handle_open(&self, path: &str) -> Result<(), PluginError> {
        let target = Path::new(path);
        if !target.exists() {
            return Err(PluginError::DirectoryNotFound {
                path: path.to_string(),
            });
        }

        self.opener
            .open_path(target)
            .map_err(|error| PluginError::Open {
                path: path.to_string(),
                message: error.to_string(),
            })?;
        self.require_client()?.add(path)
    }

    pub fn handle_delete(&self, path: &str) -> Result<(), PluginError> {
        self.require_client()?.remove(path)
    }

    pub fn handle_context_menu(&self, path: &str) -> Vec<DisplayEntry> {
        projection::context_menu_entries(path)
    }

    fn require_client(&self) -> Result<&RankingToolClient, PluginError> {
        self.client.as_ref().ok_or_else(|| PluginError::ToolNotFound {
            path: self.configured_tool.clone(),
        })
    }
}

fn lookup(client: &RankingToolClient, text: &str) -> Result<Vec<DisplayEntry>, PluginError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let output = client.query(text)?;
    let ranked = parse_query_output(&output)?;
    tracing::debug!(query = text, matches = ranked.len(), "lookup finished");
    Ok(projection::ranked_entries(&ranked))
}

fn register_and_open(path: &str) -> Vec<DisplayEntry> {
    if path.trim().is_empty() {
        return Vec::new();
    }

    if Path::new(path).is_dir() {
        vec![projection::register_entry(path)]
    } else {
        vec![projection::invalid_directory_entry(path)]
    }
}
