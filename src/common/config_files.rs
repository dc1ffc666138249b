use std::path::{Path, PathBuf};

/// Environment variable that overrides where the config file lives.
pub const CONFIG_ENV: &str = "TOOL_LAUNCHER_CONFIG";
pub const CONFIG_FILE_NAME: &str = "ToolLauncher.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFileResult {
    Opened { path: PathBuf },
    Created { path: PathBuf },
}

/// Resolve the config file location.
///
/// Order: `$TOOL_LAUNCHER_CONFIG`, then `<config dir>/ToolLauncher/ToolLauncher.conf`,
/// then the executable's directory, then the working directory.
pub fn resolve_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }
    if let Some(dir) = dirs_next::config_dir() {
        return dir.join(crate::APP_NAME).join(CONFIG_FILE_NAME);
    }
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_FILE_NAME)
}

/// Create `path` with `default_contents` unless it already exists.
pub fn ensure_config_file(path: &Path, default_contents: &str) -> std::io::Result<ConfigFileResult> {
    if path.exists() {
        return Ok(ConfigFileResult::Opened {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, default_contents)?;
    Ok(ConfigFileResult::Created {
        path: path.to_path_buf(),
    })
}
