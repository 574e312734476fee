use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("empty path")]
    EmptyPath,
    #[error("path does not exist: {}", .0.display())]
    MissingPath(PathBuf),
    #[error("{message}")]
    LaunchFailed { message: String, code: Option<i32> },
}

/// Opens a path with the platform's default handler.
pub trait PathOpener {
    fn open_path(&self, path: &Path) -> Result<(), LaunchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl PathOpener for SystemOpener {
    fn open_path(&self, path: &Path) -> Result<(), LaunchError> {
        let target = validate_launch_path(path.to_string_lossy().as_ref())?;
        open_with_default_handler(&target)
    }
}

pub fn validate_launch_path(path: &str) -> Result<PathBuf, LaunchError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyPath);
    }

    let candidate = Path::new(trimmed);
    if !candidate.exists() {
        return Err(LaunchError::MissingPath(candidate.to_path_buf()));
    }

    Ok(candidate.to_path_buf())
}

#[cfg(target_os = "windows")]
fn open_with_default_handler(target: &Path) -> Result<(), LaunchError> {
    use windows_sys::Win32::UI::Shell::ShellExecuteW;
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

    let operation = to_wide("open");
    let file = to_wide(target.to_string_lossy().as_ref());

    let result = unsafe {
        ShellExecuteW(
            std::ptr::null_mut(),
            operation.as_ptr(),
            file.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            SW_SHOWNORMAL,
        )
    } as isize;

    // ShellExecuteW reports failure as a value <= 32.
    if result <= 32 {
        return Err(LaunchError::LaunchFailed {
            message: format!("ShellExecuteW failed for '{}'", target.display()),
            code: Some(result as i32),
        });
    }
    Ok(())
}

#[cfg(target_os = "windows")]
fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(not(target_os = "windows"))]
fn open_with_default_handler(target: &Path) -> Result<(), LaunchError> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    let status = std::process::Command::new(opener)
        .arg(target)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map_err(|e| LaunchError::LaunchFailed {
            message: format!("failed to run {opener}: {e}"),
            code: None,
        })?;

    if !status.success() {
        return Err(LaunchError::LaunchFailed {
            message: format!("{opener} exited with status {status}"),
            code: status.code(),
        });
    }
    Ok(())
}
