use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Quiet period that ends a burst of file events.
const SETTLE: Duration = Duration::from_millis(150);

/// Sends one [`AppEvent::ConfigReload`] per burst of writes, creations or
/// removals of `config_path`. Watches the parent directory so editors
/// that replace the file are still seen.
pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                let open = settle(&bridge_rx).await;
                log::debug!("{} changed, reloading", config_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() || !open {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

/// Whether `event` changes the file at `config_path`.
fn touches_config(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Swallows events until none arrive for [`SETTLE`]. Returns `false` if
/// the channel closed meanwhile.
async fn settle<T>(rx: &Receiver<T>) -> bool {
    loop {
        match tokio::time::timeout(SETTLE, rx.recv()).await {
            Err(_) => return true,
            Ok(Ok(_)) => {}
            Ok(Err(_)) => return false,
        }
    }
}
