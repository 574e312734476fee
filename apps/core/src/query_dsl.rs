pub const REGISTER_PREFIX: &str = "cd ";

/// Routed interpretation of the text typed after the plugin keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup(String),
    RegisterAndOpen(String),
}

impl Command {
    pub fn parse(raw: &str) -> Self {
        let working = raw.trim_start();
        if let Some(rest) = working.strip_prefix(REGISTER_PREFIX) {
            return Self::RegisterAndOpen(rest.trim().to_string());
        }
        Self::Lookup(working.trim_end().to_string())
    }
}
