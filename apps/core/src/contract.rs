use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const METHOD_OPEN_DIRECTORY: &str = "open_directory";
pub const METHOD_DELETE_DIRECTORY: &str = "delete_directory";
pub const HOST_COPY_TO_CLIPBOARD: &str = "Flow.Launcher.CopyToClipboard";
pub const HOST_OPEN_URL: &str = "Flow.Launcher.OpenUrl";

/// Named operation the host invokes when a row is activated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionDescriptor {
    pub method: String,
    pub parameters: Vec<Value>,
}

impl ActionDescriptor {
    pub fn new(method: &str, parameters: Vec<Value>) -> Self {
        Self {
            method: method.to_string(),
            parameters,
        }
    }

    pub fn open_directory(path: &str) -> Self {
        Self::new(METHOD_OPEN_DIRECTORY, vec![Value::from(path)])
    }

    pub fn delete_directory(path: &str) -> Self {
        Self::new(METHOD_DELETE_DIRECTORY, vec![Value::from(path)])
    }

    pub fn copy_to_clipboard(text: &str) -> Self {
        Self::new(
            HOST_COPY_TO_CLIPBOARD,
            vec![Value::from(text), Value::from(false), Value::from(true)],
        )
    }

    pub fn open_url(url: &str) -> Self {
        Self::new(HOST_OPEN_URL, vec![Value::from(url)])
    }
}

/// Launcher-facing result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayEntry {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "SubTitle")]
    pub subtitle: String,
    #[serde(rename = "IcoPath")]
    pub icon: String,
    #[serde(rename = "Score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(
        rename = "JsonRPCAction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub action: Option<ActionDescriptor>,
    #[serde(rename = "ContextData", default, skip_serializing_if = "Option::is_none")]
    pub context_data: Option<String>,
}

/// Request as delivered by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub parameters: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RpcResponse {
    pub result: Vec<DisplayEntry>,
}

impl From<Vec<DisplayEntry>> for RpcResponse {
    fn from(result: Vec<DisplayEntry>) -> Self {
        Self { result }
    }
}
