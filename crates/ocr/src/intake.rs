use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::{Event, EventKind};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::handoff::SharedImageSlot;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// Share inbox queue depth. Paths wait here while an earlier image is scanned.
pub const SHARE_QUEUE_CAPACITY: usize = 64;

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// The image a watcher event hands over, once its bytes are all on disk.
///
/// A create event fires before the writer has written anything, so only a
/// closed writer or a file renamed into the inbox counts.
fn completed_share(event: &Event) -> Option<&PathBuf> {
    let path = match event.kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write))
        | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event.paths.first(),
        _ => None,
    }?;
    is_image_path(path).then_some(path)
}

/// Read a shared file into `slot`. Returns `Ok(false)` for files that are not
/// images.
pub async fn receive_shared_file(path: &Path, slot: &SharedImageSlot) -> std::io::Result<bool> {
    if !is_image_path(path) {
        return Ok(false);
    }
    let bytes = tokio::fs::read(path).await?;
    if slot.offer(bytes) {
        warn!("Shared image replaced one that was never scanned: {}", path.display());
    }
    Ok(true)
}

/// Watch `inbox_dir` and send the path of each finished screenshot to `tx`.
/// Files are reported once their writer closes them or once they are moved
/// into the inbox. Watching stops when the returned watcher is dropped.
pub fn spawn_share_receiver(
    inbox_dir: &Path,
    tx: mpsc::Sender<PathBuf>,
) -> notify::Result<impl notify::Watcher> {
    use notify::{RecursiveMode, Watcher};

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
        let ev = match event {
            Ok(ev) => ev,
            Err(e) => {
                warn!("Share inbox watch error: {e}");
                return;
            }
        };
        let Some(path) = completed_share(&ev) else { return };
        debug!("Shared image ready: {}", path.display());
        // Runs on the notify thread, so waiting for queue room is fine.
        if tx.blocking_send(path.clone()).is_err() {
            debug!("Share inbox consumer is gone; dropping {}", path.display());
        }
    })?;

    watcher.watch(inbox_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
