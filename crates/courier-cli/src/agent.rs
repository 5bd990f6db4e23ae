//! SSH Agent Probe
//!
//! Lists the keys held by the running ssh-agent before any remote copy.

use std::process::Stdio;

use tokio::process::Command;
use tracing::warn;

/// Print the keys the agent holds. The probe is advisory: on any failure
/// the remote copies are still attempted.
pub async fn report_loaded_keys() {
    match list_keys().await {
        Ok(keys) => {
            println!("The following SSH keys will be attempted for secure copy:");
            println!("{}", keys);
        }
        Err(output) => {
            warn!("ssh-add -l failed: {}", output);
            println!("Warning: Could not list SSH keys. ssh-agent may not be running.");
            if !output.is_empty() {
                println!("  {}", output);
            }
        }
    }
}

async fn list_keys() -> Result<String, String> {
    let output = Command::new("ssh-add")
        .arg("-l")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| format!("failed to run ssh-add: {}", e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if output.status.success() {
        Ok(stdout)
    } else if stdout.is_empty() {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    } else {
        Err(stdout)
    }
}
