use serde_json::Value;
use thiserror::Error;

use crate::config::{self, Config, ConfigError};
use crate::contract::{RpcRequest, RpcResponse};
use crate::projection;
use crate::query_router::QueryRouter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    /// Answers with a list of rows.
    Query,
    /// Runs for its side effect and answers with nothing.
    Action,
}

#[derive(Debug, Clone, Copy)]
pub struct MethodSpec {
    pub name: &'static str,
    pub class: MethodClass,
    pub min_params: usize,
    pub max_params: usize,
    pub build: fn(String) -> PluginRequest,
}

/// Every method the host may call. Action methods accept a trailing tool
/// path that older result rows still carry; it is ignored.
pub const METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "query",
        class: MethodClass::Query,
        min_params: 1,
        max_params: 1,
        build: PluginRequest::Query,
    },
    MethodSpec {
        name: "context_menu",
        class: MethodClass::Query,
        min_params: 1,
        max_params: 1,
        build: PluginRequest::ContextMenu,
    },
    MethodSpec {
        name: "open_directory",
        class: MethodClass::Action,
        min_params: 1,
        max_params: 2,
        build: PluginRequest::OpenDirectory,
    },
    MethodSpec {
        name: "delete_directory",
        class: MethodClass::Action,
        min_params: 1,
        max_params: 2,
        build: PluginRequest::DeleteDirectory,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0}")]
    InvalidJson(String),
    #[error("unknown method '{0}'")]
    UnknownMethod(String),
    #[error("invalid parameters for '{method}': {message}")]
    InvalidParams { method: String, message: String },
}

impl RequestError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "InvalidJson",
            Self::UnknownMethod(_) => "UnknownMethod",
            Self::InvalidParams { .. } => "InvalidParams",
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A validated host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRequest {
    Query(String),
    ContextMenu(String),
    OpenDirectory(String),
    DeleteDirectory(String),
}

impl PluginRequest {
    pub fn from_rpc(request: &RpcRequest) -> Result<Self, RequestError> {
        let spec = method_spec(&request.method)
            .ok_or_else(|| RequestError::UnknownMethod(request.method.clone()))?;
        let params = validate_params(spec, &request.parameters)?;
        let first = params.into_iter().next().unwrap_or_default();
        Ok((spec.build)(first))
    }
}

pub fn method_spec(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().find(|spec| spec.name == name)
}

fn validate_params(spec: &MethodSpec, params: &[Value]) -> Result<Vec<String>, RequestError> {
    let invalid = |message: String| RequestError::InvalidParams {
        method: spec.name.to_string(),
        message,
    };

    if params.len() < spec.min_params || params.len() > spec.max_params {
        let expected = if spec.min_params == spec.max_params {
            spec.min_params.to_string()
        } else {
            format!("{}..={}", spec.min_params, spec.max_params)
        };
        return Err(invalid(format!(
            "expected {expected} parameter(s), got {}",
            params.len()
        )));
    }

    params
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(format!("parameter {index} must be a string")))
        })
        .collect()
}

pub fn parse_request(payload: &str) -> Result<RpcRequest, RequestError> {
    serde_json::from_str(payload).map_err(|error| RequestError::InvalidJson(error.to_string()))
}

/// Runs one host call. Query-class calls always answer; action-class calls
/// answer with `None` and log their failures.
pub fn handle_request(router: &QueryRouter, request: &RpcRequest) -> Option<RpcResponse> {
    let call = match PluginRequest::from_rpc(request) {
        Ok(call) => call,
        Err(error) => return request_error_response(request, &error),
    };
    tracing::info!(method = %request.method, "handling request");

    match call {
        PluginRequest::Query(text) => Some(router.handle_query(&text).into()),
        PluginRequest::ContextMenu(path) => Some(router.handle_context_menu(&path).into()),
        PluginRequest::OpenDirectory(path) => {
            if let Err(error) = router.handle_open(&path) {
                tracing::error!(kind = error.kind(), %error, path = %path, "open_directory failed");
            }
            None
        }
        PluginRequest::DeleteDirectory(path) => {
            if let Err(error) = router.handle_delete(&path) {
                tracing::error!(kind = error.kind(), %error, path = %path, "delete_directory failed");
            }
            None
        }
    }
}

/// Answers one raw host payload. The request's settings are layered over
/// `config` before the tool is resolved. `None` means nothing is written to
/// stdout.
pub fn respond(mut config: Config, payload: &str) -> Result<Option<String>, TransportError> {
    let response = match parse_request(payload) {
        Ok(request) => {
            if let Some(settings) = &request.settings {
                config.apply_host_settings(settings);
            }
            config::validate(&config)?;
            tracing::debug!(
                tool_path = %config.tool_path,
                config_path = %config.config_path.display(),
                "configuration loaded"
            );

            let router = QueryRouter::new(&config);
            tracing::debug!(tool_available = router.has_tool(), "router ready");
            handle_request(&router, &request)
        }
        Err(error) => {
            tracing::warn!(%error, "unparseable request");
            Some(error_response(&error))
        }
    };

    match response {
        Some(response) => Ok(Some(serde_json::to_string(&response)?)),
        None => Ok(None),
    }
}

pub fn error_response(error: &RequestError) -> RpcResponse {
    vec![projection::error_entry(error.kind(), &error.to_string())].into()
}

fn request_error_response(request: &RpcRequest, error: &RequestError) -> Option<RpcResponse> {
    let is_action = method_spec(&request.method)
        .is_some_and(|spec| spec.class == MethodClass::Action);
    if is_action {
        tracing::error!(kind = error.kind(), %error, "rejected action request");
        return None;
    }
    tracing::warn!(kind = error.kind(), %error, "rejected query request");
    Some(error_response(error))
}
