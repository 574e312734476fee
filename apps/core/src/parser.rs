use crate::error::PluginError;
use crate::model::RankedPath;

/// Parses `query --list --score` output into ranked paths, keeping the tool's
/// order.
///
/// Blank lines are skipped. Any other malformed line aborts the whole parse
/// and no partial list is returned.
pub fn parse_query_output(output: &str) -> Result<Vec<RankedPath>, PluginError> {
    let mut paths = Vec::new();
    for raw_line in output.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        paths.push(parse_line(line)?);
    }
    Ok(paths)
}

fn parse_line(line: &str) -> Result<RankedPath, PluginError> {
    let malformed = || PluginError::ResultParse {
        line: line.to_string(),
    };

    let (score_text, path) = line.split_once(' ').ok_or_else(malformed)?;
    let frecency: f64 = score_text.parse().map_err(|_| malformed())?;
    if !frecency.is_finite() || path.is_empty() {
        return Err(malformed());
    }

    Ok(RankedPath::new(path, RankedPath::score_from_frecency(frecency)))
}
