//! External tool discovery
//!
//! yt-dlp does the fetching and ffmpeg does the post-processing. Both are resolved once at
//! startup so a missing tool is reported before the user starts a download rather than
//! halfway through one.
//!
//! Search order for each tool:
//! 1. Explicit path from settings
//! 2. Environment override (`TUBEFETCH_YTDLP` / `TUBEFETCH_FFMPEG`)
//! 3. Bundled next to the executable
//! 4. System PATH
//! 5. Common installation paths

use crate::utils::config::AppSettings;
use crate::utils::error::TubefetchError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const YTDLP_ENV: &str = "TUBEFETCH_YTDLP";
pub const FFMPEG_ENV: &str = "TUBEFETCH_FFMPEG";

/// Resolved locations of the external tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf,
}

impl Toolchain {
    /// Resolve both tools, failing on the first one that cannot be found
    pub fn discover(settings: &AppSettings) -> Result<Self, TubefetchError> {
        let ytdlp = find_tool(
            "yt-dlp",
            settings.ytdlp_location.as_deref(),
            std::env::var_os(YTDLP_ENV),
        )
        .ok_or(TubefetchError::YtDlpNotFound)?;

        let ffmpeg = find_tool(
            "ffmpeg",
            settings.ffmpeg_location.as_deref(),
            std::env::var_os(FFMPEG_ENV),
        )
        .ok_or(TubefetchError::FfmpegNotFound)?;

        info!("✓ Using yt-dlp: {:?}, ffmpeg: {:?}", ytdlp, ffmpeg);
        Ok(Self { ytdlp, ffmpeg })
    }
}

/// Find `binary` following the search order in the module docs
pub fn find_tool(
    binary: &str,
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        match resolve_candidate(path, binary) {
            Some(found) => return Some(found),
            None => warn!("Configured {} location {:?} is not usable", binary, path),
        }
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        match resolve_candidate(&path, binary) {
            Some(found) => return Some(found),
            None => warn!("Environment {} location {:?} is not usable", binary, path),
        }
    }

    if let Some(bundled) = find_bundled(binary) {
        info!("✓ Using bundled {}: {:?}", binary, bundled);
        return Some(bundled);
    }

    if let Ok(path) = which::which(binary) {
        debug!("Found {} in PATH: {:?}", binary, path);
        return Some(path);
    }

    let found = common_dirs()
        .into_iter()
        .find_map(|dir| resolve_candidate(&dir, binary));
    if found.is_none() {
        warn!("✗ {} not found anywhere!", binary);
    }
    found
}

/// Accept either the binary itself or a directory containing it
pub fn resolve_candidate(path: &Path, binary: &str) -> Option<PathBuf> {
    let candidate = if path.is_dir() {
        path.join(executable_name(binary))
    } else {
        path.to_path_buf()
    };

    if candidate.is_file() && is_executable(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

/// Look next to the running executable (portable installs, development builds)
fn find_bundled(binary: &str) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;
    resolve_candidate(exe_dir, binary)
}

fn common_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin"),
        // macOS Homebrew (Intel), manual installs
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/bin"),
    ];
    if let Some(home) = dirs::home_dir() {
        // pip --user
        dirs.push(home.join(".local").join("bin"));
    }
    if cfg!(windows) {
        dirs.push(PathBuf::from(r"C:\ffmpeg\bin"));
    }
    dirs
}

fn executable_name(binary: &str) -> String {
    format!("{}{}", binary, std::env::consts::EXE_SUFFIX)
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}
