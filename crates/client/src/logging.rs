//! File logging for a client session.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "client.log";
const DEFAULT_FILTER: &str = "info";

/// Installs a file-backed subscriber and returns the session directory.
///
/// Output goes to `<log dir>/<session>/client.log` only, so it never mixes
/// with the battle narration on stdout. `RUST_LOG` overrides the filter.
pub fn setup_logging(session_id: Option<&str>) -> Result<PathBuf> {
    let session = session_name(session_id, SystemTime::now());
    let session_dir = log_directory().join(&session);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("creating log directory {}", session_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&session_dir, LOG_FILE));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    std::mem::forget(guard);

    tracing::info!(
        %session,
        file = %log_file(&session_dir).display(),
        "Logging initialized"
    );
    Ok(session_dir)
}

/// Explicit id, or `session_<unix seconds>` when none was configured.
fn session_name(session_id: Option<&str>, now: SystemTime) -> String {
    match session_id {
        Some(id) => id.to_owned(),
        None => {
            let secs = now
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{secs}")
        }
    }
}

fn log_file(session_dir: &Path) -> PathBuf {
    session_dir.join(LOG_FILE)
}

/// Platform cache directory, or `./logs` when none can be determined.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "battle")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn session_name_prefers_the_configured_id() {
        let now = UNIX_EPOCH + Duration::from_secs(1_700);
        assert_eq!(session_name(Some("run-7"), now), "run-7");
        assert_eq!(session_name(None, now), "session_1700");
    }

    #[test]
    fn log_file_lives_in_the_session_dir() {
        let dir = Path::new("logs").join("run-7");
        assert_eq!(log_file(&dir), dir.join("client.log"));
    }
}
