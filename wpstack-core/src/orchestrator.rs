//! External orchestrator integration.
//!
//! Each lifecycle action maps to exactly one docker-compose invocation, run
//! in the site's directory with inherited stdio so the orchestrator's own
//! output is what the user sees. The child's exit status is surfaced
//! unmodified through `WpstackError::OrchestratorFailed`.

use crate::config::Config;
use crate::error::{Result, WpstackError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, instrument};

const INSTALL_HINT: &str =
    "Install Docker Compose and ensure it is on PATH: https://docs.docker.com/compose/install/";

/// One orchestrator operation per lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    /// Create containers and start them in the background (`up -d`).
    Up,
    /// Start existing stopped containers (`start`).
    Start,
    /// Stop running containers without removing them (`stop`).
    Stop,
    /// Stop and remove containers, networks, and volumes (`down --volumes`).
    Down,
}

impl LifecycleOp {
    /// The docker-compose arguments for this operation.
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Up => &["up", "-d"],
            Self::Start => &["start"],
            Self::Stop => &["stop"],
            Self::Down => &["down", "--volumes"],
        }
    }

    /// Subcommand name, for logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to the external docker-compose binary.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    binary_path: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator, honoring a configured binary override and
    /// otherwise auto-detecting the binary location.
    pub fn new(config: &Config) -> Result<Self> {
        match &config.compose_binary {
            Some(path) => Self::with_path(PathBuf::from(path)),
            None => Ok(Self { binary_path: Self::find_compose_binary()? }),
        }
    }

    /// Create an orchestrator with a specific binary path.
    pub fn with_path(binary_path: PathBuf) -> Result<Self> {
        if !binary_path.exists() {
            return Err(WpstackError::OrchestratorNotFound {
                hint: format!("{:?} does not exist. {}", binary_path, INSTALL_HINT),
            });
        }
        Ok(Self { binary_path })
    }

    /// Find the docker-compose binary in common locations.
    fn find_compose_binary() -> Result<PathBuf> {
        // Check PATH first using `which`
        if let Ok(output) = std::process::Command::new("which").arg("docker-compose").output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(PathBuf::from(path));
                }
            }
        }

        // Check common installation locations
        let common_paths = [
            "/usr/local/bin/docker-compose",
            "/usr/bin/docker-compose",
            "/opt/homebrew/bin/docker-compose",
        ];

        for path in common_paths {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(WpstackError::OrchestratorNotFound { hint: INSTALL_HINT.to_string() })
    }

    /// Get the orchestrator version string (availability check).
    pub async fn version(&self) -> Result<String> {
        let output = Command::new(&self.binary_path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| WpstackError::io(&self.binary_path, e))?;

        if !output.status.success() {
            return Err(WpstackError::OrchestratorFailed {
                action: "--version".to_string(),
                code: output.status.code().unwrap_or(1),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run one lifecycle operation in a site directory, waiting for it to
    /// complete. Stdio is inherited, so the orchestrator's output and
    /// failure messages go straight to the user.
    #[instrument(skip(self, site_dir), fields(op = %op))]
    pub async fn run(&self, op: LifecycleOp, site_dir: &Path) -> Result<()> {
        info!(dir = %site_dir.display(), "Running docker-compose {}", op);

        let status = Command::new(&self.binary_path)
            .args(op.args())
            .current_dir(site_dir)
            .status()
            .await
            .map_err(|e| WpstackError::io(&self.binary_path, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(WpstackError::OrchestratorFailed {
                action: op.as_str().to_string(),
                code: status.code().unwrap_or(1),
            })
        }
    }

    /// Path of the binary this orchestrator invokes.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_op_args() {
        assert_eq!(LifecycleOp::Up.args(), ["up", "-d"]);
        assert_eq!(LifecycleOp::Start.args(), ["start"]);
        assert_eq!(LifecycleOp::Stop.args(), ["stop"]);
        assert_eq!(LifecycleOp::Down.args(), ["down", "--volumes"]);
    }

    #[test]
    fn test_with_path_rejects_missing_binary() {
        let result = Orchestrator::with_path(PathBuf::from("/nonexistent/docker-compose"));
        assert!(matches!(result, Err(WpstackError::OrchestratorNotFound { .. })));
    }

    #[test]
    fn test_configured_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("docker-compose");
        std::fs::write(&fake, "#!/bin/sh\n").unwrap();

        let mut config = Config::default();
        config.compose_binary = Some(fake.to_string_lossy().to_string());

        let orchestrator = Orchestrator::new(&config).unwrap();
        assert_eq!(orchestrator.binary_path(), fake.as_path());
    }

    #[tokio::test]
    async fn test_run_surfaces_exit_code() {
        // `false` ignores its arguments and exits 1, standing in for a
        // failing orchestrator.
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_path(PathBuf::from("/bin/false")).unwrap();

        let err = orchestrator.run(LifecycleOp::Up, dir.path()).await.unwrap_err();
        match err {
            WpstackError::OrchestratorFailed { action, code } => {
                assert_eq!(action, "up");
                assert_eq!(code, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_succeeds_on_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_path(PathBuf::from("/bin/true")).unwrap();
        orchestrator.run(LifecycleOp::Stop, dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn test_version_captures_stdout() {
        // `echo --version` prints its argument back, standing in for a
        // binary that reports a version string.
        let orchestrator = Orchestrator::with_path(PathBuf::from("/bin/echo")).unwrap();
        assert_eq!(orchestrator.version().await.unwrap(), "--version");
    }
}
