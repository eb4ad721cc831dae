use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Decoded preview of a staged image, held in memory for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Holder for the asynchronous file-to-preview decode. Each `start` bumps a
/// generation counter and aborts the previous read, and a stale task that
/// still reaches delivery is discarded by the generation check, so a reset
/// or a re-selection can never be overwritten by a late-arriving preview.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    generation: Arc<AtomicU64>,
    current: Arc<Mutex<Option<Preview>>>,
    task: Option<JoinHandle<()>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kick off an asynchronous decode of the file at `path`. Returns
    /// immediately; the preview appears in the slot when the read finishes,
    /// unless a newer `start`/`reset` superseded it first.
    pub fn start(&mut self, path: PathBuf, content_type: String) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();

        let gen_handle = Arc::clone(&self.generation);
        let slot = Arc::clone(&self.current);

        self.task = Some(tokio::spawn(async move {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Preview decode failed for {}: {}", path.display(), e);
                    return;
                }
            };

            // Deliver only if nothing superseded this decode
            if gen_handle.load(Ordering::SeqCst) == generation {
                *slot.lock().unwrap() = Some(Preview { content_type, bytes });
            }
        }));
    }

    /// Show an already-available image (e.g. the stored picture URL's
    /// placeholder) without a decode.
    pub fn set_immediate(&mut self, preview: Preview) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
        *self.current.lock().unwrap() = Some(preview);
    }

    /// Drop the preview and invalidate any in-flight decode
    pub fn reset(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
        *self.current.lock().unwrap() = None;
    }

    pub fn get(&self) -> Option<Preview> {
        self.current.lock().unwrap().clone()
    }

    /// Wait for the pending decode to settle; test and CLI convenience
    pub async fn settle(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_image(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("storefront-preview-{}-{}", std::process::id(), name));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn preview_appears_after_decode() {
        let path = temp_image("a.png", b"png-bytes").await;

        let mut slot = PreviewSlot::new();
        slot.start(path.clone(), "image/png".into());
        slot.settle().await;

        let preview = slot.get().expect("preview should be delivered");
        assert_eq!(preview.bytes, b"png-bytes");
        assert_eq!(preview.content_type, "image/png");

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn reset_discards_late_arriving_decode() {
        let path = temp_image("b.png", b"late-bytes").await;

        let mut slot = PreviewSlot::new();
        slot.start(path.clone(), "image/png".into());
        // Reset immediately; even if the read completes it must not land
        slot.reset();
        slot.settle().await;

        assert!(slot.get().is_none(), "reset slot must stay empty");

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn newer_selection_wins_over_older_one() {
        let first = temp_image("c1.png", b"first").await;
        let second = temp_image("c2.png", b"second").await;

        let mut slot = PreviewSlot::new();
        slot.start(first.clone(), "image/png".into());
        slot.start(second.clone(), "image/png".into());
        slot.settle().await;

        // Whatever happened to the first read, only the second may land
        if let Some(preview) = slot.get() {
            assert_eq!(preview.bytes, b"second");
        }

        let _ = tokio::fs::remove_file(first).await;
        let _ = tokio::fs::remove_file(second).await;
    }
}
