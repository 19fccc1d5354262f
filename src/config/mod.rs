pub mod engine;

use std::path::PathBuf;

const APP_IDENTIFIER: &str = "com.mathpath.app";

/// Platform-specific application data directory.
/// Falls back to the working directory when no home is known.
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    PathBuf::from(".")
}
