//! Renders ranked paths, routed commands and errors into launcher rows.

use crate::contract::{ActionDescriptor, DisplayEntry};
use crate::error::PluginError;
use crate::icons::Icon;
use crate::model::{display_name, RankedPath};

pub const TOOL_INSTALL_URL: &str = "https://github.com/ajeetdsouza/zoxide";

pub fn ranked_entry(ranked: &RankedPath) -> DisplayEntry {
    DisplayEntry {
        title: display_name(&ranked.path).to_string(),
        subtitle: format!("Path: {}", ranked.path),
        icon: Icon::Folder.path().to_string(),
        score: Some(ranked.score),
        action: Some(ActionDescriptor::open_directory(&ranked.path)),
        context_data: Some(ranked.path.clone()),
    }
}

pub fn ranked_entries(ranked: &[RankedPath]) -> Vec<DisplayEntry> {
    ranked.iter().map(ranked_entry).collect()
}

pub fn register_entry(path: &str) -> DisplayEntry {
    DisplayEntry {
        title: path.to_string(),
        subtitle: "Add this directory to zoxide and open it".to_string(),
        icon: Icon::Folder.path().to_string(),
        score: None,
        action: Some(ActionDescriptor::open_directory(path)),
        context_data: None,
    }
}

pub fn invalid_directory_entry(path: &str) -> DisplayEntry {
    DisplayEntry {
        title: format!("Invalid directory: {path}"),
        subtitle: "Please provide a valid directory path".to_string(),
        icon: Icon::Folder.path().to_string(),
        score: None,
        action: None,
        context_data: None,
    }
}

pub fn tool_missing_entry() -> DisplayEntry {
    DisplayEntry {
        title: "Zoxide not found".to_string(),
        subtitle: "Download and install zoxide".to_string(),
        icon: Icon::WebSearch.path().to_string(),
        score: None,
        action: Some(ActionDescriptor::open_url(TOOL_INSTALL_URL)),
        context_data: None,
    }
}

/// Copy-path first, then remove-from-index.
pub fn context_menu_entries(path: &str) -> Vec<DisplayEntry> {
    vec![
        DisplayEntry {
            title: "Copy path".to_string(),
            subtitle: format!("Copy {path} to clipboard"),
            icon: Icon::Copy.path().to_string(),
            score: None,
            action: Some(ActionDescriptor::copy_to_clipboard(path)),
            context_data: None,
        },
        DisplayEntry {
            title: "Remove from zoxide".to_string(),
            subtitle: format!("Remove {path} from zoxide database"),
            icon: Icon::RecycleBin.path().to_string(),
            score: None,
            action: Some(ActionDescriptor::delete_directory(path)),
            context_data: None,
        },
    ]
}

pub fn error_entry(kind: &str, message: &str) -> DisplayEntry {
    DisplayEntry {
        title: kind.to_string(),
        subtitle: message.to_string(),
        icon: Icon::Error.path().to_string(),
        score: None,
        action: None,
        context_data: None,
    }
}

pub fn plugin_error_entry(error: &PluginError) -> DisplayEntry {
    error_entry(error.kind(), &error.to_string())
}
