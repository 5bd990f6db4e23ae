//! Transfer Execution
//!
//! Shells out to `cp` and `scp` with piped stdio and a per-copy timeout.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

/// Runs copies for one batch against a fixed assets directory.
pub struct TransferRunner {
    assets_dir: PathBuf,
    timeout: Duration,
}

impl TransferRunner {
    pub fn new(assets_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            assets_dir,
            timeout,
        }
    }

    /// Full destination path for an entry inside the assets directory.
    pub fn destination(&self, destination: &str) -> PathBuf {
        self.assets_dir.join(destination)
    }

    /// Copy a local file or directory.
    pub async fn copy_local(&self, source: &str, dest: &Path) -> Result<(), String> {
        ensure_parent(dest)?;
        let source = expand_home(source);
        self.run_copy("cp", local_args(&source, dest)).await
    }

    /// Copy a file or directory from a remote host via scp. The source path
    /// is passed through untouched for the remote side to interpret.
    pub async fn copy_remote(
        &self,
        source: &str,
        dest: &Path,
        user: &str,
        host: &str,
    ) -> Result<(), String> {
        ensure_parent(dest)?;
        self.run_copy("scp", remote_args(source, dest, user, host))
            .await
    }

    async fn run_copy(&self, program: &str, args: Vec<String>) -> Result<(), String> {
        debug!("Running {} {:?}", program, args);

        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("failed to run {}: {}", program, e))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => return Err(format!("{} error: {}", program, e)),
            Err(_) => {
                return Err(format!(
                    "{} timed out after {}s",
                    program,
                    self.timeout.as_secs()
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            warn!("{} exited with {}: {}", program, output.status, stderr);
            if stderr.is_empty() {
                return Err(format!("{} exited with {}", program, output.status));
            }
            return Err(stderr.to_string());
        }

        Ok(())
    }
}

/// Arguments for a recursive local copy.
fn local_args(source: &str, dest: &Path) -> Vec<String> {
    vec![
        "-r".to_string(),
        source.to_string(),
        dest.display().to_string(),
    ]
}

/// Arguments for a recursive secure copy from a remote host.
fn remote_args(source: &str, dest: &Path, user: &str, host: &str) -> Vec<String> {
    vec![
        "-r".to_string(),
        format!("{}@{}:{}", user, host, source),
        dest.display().to_string(),
    ]
}

fn ensure_parent(dest: &Path) -> Result<(), String> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
    }
    Ok(())
}

/// Expand a leading `~/` against the user's home directory.
fn expand_home(source: &str) -> String {
    if let Some(rest) = source.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).display().to_string();
        }
    }
    source.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("courier-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_local_args() {
        let args = local_args("logo.svg", Path::new("assets/branding/logo.svg"));
        assert_eq!(args, vec!["-r", "logo.svg", "assets/branding/logo.svg"]);
    }

    #[test]
    fn test_remote_args() {
        let args = remote_args(
            "/srv/builds/app.tar",
            Path::new("assets/app.tar"),
            "ci",
            "build01",
        );
        assert_eq!(
            args,
            vec!["-r", "ci@build01:/srv/builds/app.tar", "assets/app.tar"]
        );
    }

    #[test]
    fn test_expand_home_passthrough() {
        assert_eq!(expand_home("relative/path"), "relative/path");
        assert_eq!(expand_home("/absolute/path"), "/absolute/path");
    }

    #[test]
    fn test_expand_home_tilde() {
        let expanded = expand_home("~/projects/logo.svg");
        assert!(!expanded.starts_with("~/"));
        assert!(expanded.ends_with("projects/logo.svg"));
    }

    #[test]
    fn test_destination_joins_assets_dir() {
        let runner = TransferRunner::new(PathBuf::from("assets"), Duration::from_secs(60));
        assert_eq!(
            runner.destination("branding/logo.svg"),
            Path::new("assets/branding/logo.svg")
        );
    }

    #[tokio::test]
    async fn test_copy_local_file() {
        let dir = scratch_dir("copy");
        let source = dir.join("source.txt");
        std::fs::write(&source, "payload").unwrap();

        let runner = TransferRunner::new(dir.join("assets"), Duration::from_secs(60));
        let dest = runner.destination("nested/copied.txt");
        runner
            .copy_local(source.to_str().unwrap(), &dest)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "payload");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_copy_local_missing_source_fails() {
        let dir = scratch_dir("missing");
        let runner = TransferRunner::new(dir.join("assets"), Duration::from_secs(60));
        let dest = runner.destination("never.txt");

        let err = runner
            .copy_local(dir.join("no-such-file").to_str().unwrap(), &dest)
            .await
            .unwrap_err();
        assert!(!err.is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_missing_program_is_a_copy_error() {
        let runner = TransferRunner::new(PathBuf::from("assets"), Duration::from_secs(60));
        let err = runner
            .run_copy("courier-no-such-binary", vec!["-r".to_string()])
            .await
            .unwrap_err();
        assert!(err.starts_with("failed to run"));
    }
}
