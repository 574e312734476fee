/// One directory reported by the ranking tool, with its integer rank weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPath {
    pub path: String,
    pub score: i64,
}

impl RankedPath {
    pub fn new(path: impl Into<String>, score: i64) -> Self {
        Self {
            path: path.into(),
            score,
        }
    }

    /// Scales a frecency score by ten and truncates toward zero, keeping one
    /// decimal digit as an integer ordering key.
    pub fn score_from_frecency(frecency: f64) -> i64 {
        (frecency * 10.0) as i64
    }
}

/// Final segment of a path, accepting either separator so Windows paths
/// render the same on every host. Roots and bare drives (`C:`) render as
/// the full path.
pub fn display_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() || is_bare_drive(trimmed) {
        return path;
    }
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

fn is_bare_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
