use std::path::{Path, PathBuf};

use crate::common::strip_prefix_ci;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetClass {
    Url,
    Local,
}

/// `Url` when the target starts with `http://`, `https://` or `www.`
/// (case-insensitive), otherwise `Local`.
pub fn classify(target: &str) -> TargetClass {
    let target = target.trim();
    let is_url = ["http://", "https://", "www."]
        .iter()
        .any(|prefix| strip_prefix_ci(target, prefix).is_some());
    if is_url {
        TargetClass::Url
    } else {
        TargetClass::Local
    }
}

/// Host capabilities used to start a tool.
pub trait Opener {
    /// Open a URL in the default browser.
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
    /// Open an existing file or directory the way a double click would.
    fn open_path(&self, path: &Path) -> anyhow::Result<()>;
    /// Spawn `program` with `args`, working in `cwd`.
    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> anyhow::Result<()>;
}

/// What [`Launcher::launch`] handed the target to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Url(String),
    Path(PathBuf),
    Command { program: String, args: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("tool has an empty target")]
    EmptyTarget,
    #[error("could not split command line '{0}'")]
    Unparseable(String),
    #[error("failed to launch '{target}': {source}")]
    Failed {
        target: String,
        #[source]
        source: anyhow::Error,
    },
}

pub struct Launcher<O> {
    opener: O,
    base_dir: PathBuf,
}

impl<O: Opener> Launcher<O> {
    pub fn new(opener: O, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            opener,
            base_dir: base_dir.into(),
        }
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Relative paths are taken relative to the base directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Start `target`. URLs go to the browser, existing paths to the system
    /// handler and anything else is run as a command line.
    pub fn launch(&self, target: &str) -> Result<LaunchOutcome, LaunchError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(LaunchError::EmptyTarget);
        }
        let failed = |source| LaunchError::Failed {
            target: target.to_string(),
            source,
        };

        match classify(target) {
            TargetClass::Url => {
                let url = match strip_prefix_ci(target, "www.") {
                    Some(_) => format!("https://{target}"),
                    None => target.to_string(),
                };
                tracing::debug!(%url, "opening url");
                self.opener.open_url(&url).map_err(failed)?;
                Ok(LaunchOutcome::Url(url))
            }
            TargetClass::Local => {
                let resolved = self.resolve(target);
                if resolved.exists() {
                    tracing::debug!(path = %resolved.display(), "opening path");
                    self.opener.open_path(&resolved).map_err(failed)?;
                    return Ok(LaunchOutcome::Path(resolved));
                }

                let mut parts = split_command_line(target)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| LaunchError::Unparseable(target.to_string()))?;
                let first = parts.remove(0);
                let local = self.resolve(&first);
                let program = if local.is_file() {
                    local.to_string_lossy().into_owned()
                } else {
                    first
                };
                tracing::debug!(%program, args = ?parts, "running command");
                self.opener
                    .run_command(&program, &parts, &self.base_dir)
                    .map_err(failed)?;
                Ok(LaunchOutcome::Command {
                    program,
                    args: parts,
                })
            }
        }
    }
}

fn split_command_line(line: &str) -> Option<Vec<String>> {
    // Backslashes are path separators on Windows, not escapes.
    #[cfg(windows)]
    let line = &line.replace('\\', "\\\\");
    shlex::split(line)
}

/// The real host: `open` for URLs and documents, direct spawning for
/// executables and command lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        open::that(url).map_err(|e| e.into())
    }

    fn open_path(&self, path: &Path) -> anyhow::Result<()> {
        if is_executable(path) {
            let cwd = path.parent().unwrap_or_else(|| Path::new("."));
            std::process::Command::new(path)
                .current_dir(cwd)
                .spawn()
                .map(|_| ())
                .map_err(|e| e.into())
        } else {
            open::that(path).map_err(|e| e.into())
        }
    }

    fn run_command(&self, program: &str, args: &[String], cwd: &Path) -> anyhow::Result<()> {
        let mut command = std::process::Command::new(program);
        command.args(args);
        if cwd.is_dir() {
            command.current_dir(cwd);
        }
        command.spawn().map(|_| ()).map_err(|e| e.into())
    }
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("exe") || e.eq_ignore_ascii_case("com"))
            .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(any(unix, windows)))]
fn is_executable(_path: &Path) -> bool {
    false
}
