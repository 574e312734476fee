use thiserror::Error;

/// Request-scoped failures raised while serving a launcher request.
///
/// None of these are fatal to the process. Query-class requests render them
/// as a single error row; action-class requests log them.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Zoxide not found at path: {path}")]
    ToolNotFound { path: String },
    #[error("Zoxide query failed for '{query}': {message}")]
    Query { query: String, message: String },
    #[error("Failed to add path '{path}' to zoxide: {message}")]
    Add { path: String, message: String },
    #[error("Failed to remove path '{path}' from zoxide: {message}")]
    Remove { path: String, message: String },
    #[error("Failed to parse zoxide result: {line}")]
    ResultParse { line: String },
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open '{path}': {message}")]
    Open { path: String, message: String },
}

impl PluginError {
    /// Name shown as the title of an error row.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolNotFound { .. } => "ToolNotFound",
            Self::Query { .. } => "QueryError",
            Self::Add { .. } => "AddError",
            Self::Remove { .. } => "RemoveError",
            Self::ResultParse { .. } => "ResultParseError",
            Self::DirectoryNotFound { .. } => "DirectoryNotFound",
            Self::Spawn { .. } => "ToolSpawnError",
            Self::Open { .. } => "OpenError",
        }
    }
}
