//! Host capability checks

use tokio::process::Command;
use tracing::info;

/// Check that `program` can be executed by probing it with `probe_arg`
pub async fn check_command_available(program: &str, probe_arg: &str) -> Result<(), String> {
    Command::new(program)
        .arg(probe_arg)
        .output()
        .await
        .map_err(|e| format!("{} is not available: {}", program, e))?;

    info!("{} is available", program);
    Ok(())
}
