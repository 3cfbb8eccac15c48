use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use checkin_domain::{AttemptFilter, AttemptLog, CheckinAttempt};

fn newest_first(attempts: &[CheckinAttempt], filter: &AttemptFilter) -> Vec<CheckinAttempt> {
    attempts
        .iter()
        .rev()
        .filter(|attempt| filter.matches(attempt))
        .take(filter.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

#[derive(Default)]
pub struct InMemoryAttemptLog {
    attempts: RwLock<Vec<CheckinAttempt>>,
}

impl InMemoryAttemptLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptLog for InMemoryAttemptLog {
    async fn append(&self, attempt: &CheckinAttempt) -> anyhow::Result<()> {
        self.attempts.write().await.push(attempt.clone());
        Ok(())
    }

    async fn list(&self, filter: &AttemptFilter) -> anyhow::Result<Vec<CheckinAttempt>> {
        Ok(newest_first(&self.attempts.read().await, filter))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Durable attempt log: one JSON object per line, append-only. Existing
/// lines are replayed on open so the audit view survives restarts.
pub struct JsonlAttemptLog {
    path: PathBuf,
    file: Mutex<LogFile>,
    attempts: RwLock<Vec<CheckinAttempt>>,
}

struct LogFile {
    file: File,
    /// Bytes known to end on a complete line.
    len: u64,
}

impl JsonlAttemptLog {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let (attempts, len) = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            // A torn last line from an interrupted write is dropped so the
            // next append starts on a fresh line.
            let complete = content.rfind('\n').map_or(0, |index| index + 1);
            if complete < content.len() {
                warn!(
                    "discarding {} trailing bytes of partial line in {}",
                    content.len() - complete,
                    path.display()
                );
            }
            (replay(&path, &content[..complete]), complete as u64)
        } else {
            (Vec::new(), 0)
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("open attempt log {}", path.display()))?;
        file.set_len(len)
            .await
            .with_context(|| format!("truncate attempt log {}", path.display()))?;
        info!(
            "attempt log {} opened with {} records",
            path.display(),
            attempts.len()
        );

        Ok(Self {
            path,
            file: Mutex::new(LogFile { file, len }),
            attempts: RwLock::new(attempts),
        })
    }
}

fn replay(path: &Path, content: &str) -> Vec<CheckinAttempt> {
    let mut attempts = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CheckinAttempt>(line) {
            Ok(attempt) => attempts.push(attempt),
            Err(err) => warn!(
                "skipping malformed line {} in {}: {}",
                index + 1,
                path.display(),
                err
            ),
        }
    }
    attempts
}

#[async_trait]
impl AttemptLog for JsonlAttemptLog {
    async fn append(&self, attempt: &CheckinAttempt) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(attempt)?;
        line.push('\n');

        // Held across the cache push so file order and cache order agree.
        let mut log = self.file.lock().await;
        let written = match log.file.write_all(line.as_bytes()).await {
            Ok(()) => log.file.flush().await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            let len = log.len;
            if let Err(truncate_err) = log.file.set_len(len).await {
                warn!(
                    "failed to roll back partial write in {}: {}",
                    self.path.display(),
                    truncate_err
                );
            }
            return Err(err).with_context(|| format!("append to {}", self.path.display()));
        }
        log.len += line.len() as u64;
        self.attempts.write().await.push(attempt.clone());
        Ok(())
    }

    async fn list(&self, filter: &AttemptFilter) -> anyhow::Result<Vec<CheckinAttempt>> {
        Ok(newest_first(&self.attempts.read().await, filter))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        fs::metadata(&self.path)
            .await
            .with_context(|| format!("attempt log {} unavailable", self.path.display()))?;
        Ok(())
    }
}
