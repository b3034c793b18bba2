use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

/// Best-effort removal of session artifacts.
///
/// A missing file is a no-op, which makes the whole operation idempotent.
/// A failed deletion is logged and skipped; it never aborts the remaining
/// deletions and never reaches the caller, since a leftover file does not
/// affect the correctness of a returned transcript.
pub async fn remove_artifacts(paths: &[&Path]) {
    for path in paths {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("Removed artifact: {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove artifact {}: {}", path.display(), e),
        }
    }
}
