//! Access-session lifecycle: connect, balance check, listing, previews,
//! downloads. Background work reports back through `AppEvent`s.

use super::events::AppEvent;
use super::state::App;
use crate::access::{BalanceQuery, ChainError, ChainReader};
use crate::gallery::download::Downloader;
use crate::gallery::DownloadRejected;
use crate::preview::PreviewLoader;
use crate::storage::{PhotoId, PhotoSource};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// Clients the session drives, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub chain: Arc<dyn ChainReader>,
    pub photos: Arc<dyn PhotoSource>,
    pub downloader: Arc<Downloader>,
    pub previews: Arc<PreviewLoader>,
    pub preview_permits: Arc<Semaphore>,
    pub events: mpsc::Sender<AppEvent>,
}

pub fn connect(app: &mut App, services: &Services, address: &str) -> Result<(), ChainError> {
    app.wallet.connect(address)?;
    info!(address = address.trim(), "wallet connected");
    check_access(app, services);
    Ok(())
}

pub fn disconnect(app: &mut App) {
    app.renew_session();
    app.wallet.disconnect();
    app.balance = BalanceQuery::Idle;
    app.token_name = None;
    app.reset_gallery();
    info!("wallet disconnected");
}

/// (Re)reads the connected account's balance. Any photos shown are dropped
/// until access is confirmed again.
pub fn check_access(app: &mut App, services: &Services) {
    let Some(address) = app.wallet.address().map(str::to_string) else {
        return;
    };
    let (session, token) = app.renew_session();
    app.balance = BalanceQuery::Pending;
    app.reset_gallery();
    debug!(session, %address, contract = services.chain.contract(), "checking token balance");

    let chain = services.chain.clone();
    let tx = services.events.clone();
    let balance_token = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = balance_token.cancelled() => debug!(session, "balance check cancelled"),
            result = chain.balance_of(&address) => {
                let _ = tx.send(AppEvent::BalanceResolved { session, result }).await;
            }
        }
    });

    if app.token_name.is_none() {
        let chain = services.chain.clone();
        let tx = services.events.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = chain.token_name() => match result {
                    Ok(name) => {
                        let _ = tx.send(AppEvent::TokenNameResolved { session, name }).await;
                    }
                    Err(e) => debug!(error = %e, "token name unavailable"),
                },
            }
        });
    }
}

fn start_listing(app: &mut App, services: &Services) {
    if app.listing_requested {
        return;
    }
    app.listing_requested = true;
    app.gallery.begin_loading();

    let session = app.session;
    let token = app.session_token();
    let source = services.photos.clone();
    let tx = services.events.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => debug!(session, "photo listing cancelled"),
            photos = source.list_photos() => {
                let _ = tx.send(AppEvent::PhotosLoaded { session, photos }).await;
            }
        }
    });
}

pub fn request_download(app: &mut App, services: &Services, id: PhotoId) {
    let photo = match app.gallery.begin_download(id) {
        Ok(photo) => photo.clone(),
        Err(DownloadRejected::Busy(_)) => {
            app.show_toast("⏳ Download in progress");
            return;
        }
        Err(DownloadRejected::UnknownPhoto) => return,
    };
    app.show_toast(&format!("⬇ Saving {}", photo.name));

    let session = app.session;
    let downloader = services.downloader.clone();
    let tx = services.events.clone();
    tokio::spawn(async move {
        let result = downloader.download(&photo).await;
        let _ = tx
            .send(AppEvent::DownloadFinished {
                session,
                id: photo.id,
                result,
            })
            .await;
    });
}

/// Fetches previews for the open photo and every tile drawn last frame.
pub fn request_previews(app: &mut App, services: &Services) {
    let mut wanted: Vec<PhotoId> = app.tile_areas.iter().map(|(_, id)| *id).collect();
    if let Some(id) = app.gallery.selection() {
        wanted.insert(0, id);
    }

    for id in wanted {
        let Some(url) = app.gallery.photo(id).map(|p| p.url.clone()) else {
            continue;
        };
        if !app.previews.mark_loading(id) {
            continue;
        }

        let session = app.session;
        let token = app.session_token();
        let loader = services.previews.clone();
        let permits = services.preview_permits.clone();
        let tx = services.events.clone();
        tokio::spawn(async move {
            let _permit = tokio::select! {
                _ = token.cancelled() => return,
                permit = permits.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
            };
            let image = tokio::select! {
                _ = token.cancelled() => return,
                result = loader.load(&url) => match result {
                    Ok(image) => Some(image),
                    Err(e) => {
                        debug!(%id, error = %e, "preview failed");
                        None
                    }
                },
            };
            let _ = tx.send(AppEvent::PreviewLoaded { session, id, image }).await;
        });
    }

    sync_viewer(app);
}

/// Clears the viewer's loading flag if the open photo's preview is in cache.
pub fn sync_viewer(app: &mut App) {
    if let Some(id) = app.gallery.selection() {
        if app.previews.is_settled(id) {
            app.gallery.viewer.image_settled(id);
        }
    }
}

/// Applies a background result to the app.
pub fn handle_app_event(app: &mut App, services: &Services, event: AppEvent) {
    match event {
        AppEvent::BalanceResolved { session, result } => {
            if !app.is_current(session) {
                debug!(session, "stale balance result dropped");
                return;
            }
            app.balance = match result {
                Ok(balance) => {
                    info!(%balance, "balance resolved");
                    BalanceQuery::Resolved(balance)
                }
                Err(e) => {
                    warn!(error = %e, "balance check failed, treating as zero");
                    BalanceQuery::Failed(e.to_string())
                }
            };

            let decision = app.access_decision();
            info!(?decision, "access evaluated");
            if decision.has_access() {
                start_listing(app, services);
            }
        }
        AppEvent::TokenNameResolved { session, name } => {
            if app.is_current(session) {
                app.token_name = Some(name);
            }
        }
        AppEvent::PhotosLoaded { session, photos } => {
            if app.is_current(session) {
                app.gallery.populate(photos);
            }
        }
        AppEvent::PreviewLoaded { session, id, image } => {
            if app.is_current(session) {
                app.previews.store(id, image);
                app.gallery.viewer.image_settled(id);
            }
        }
        AppEvent::DownloadFinished {
            session,
            id,
            result,
        } => {
            // The slot outlives re-checks, so free it whichever session started it
            app.gallery.finish_download(id);
            if !app.is_current(session) {
                debug!(session, %id, "download from an earlier session finished");
            }
            match result {
                Ok(path) => app.show_toast(&format!("✔ Saved {}", path.display())),
                Err(e) => {
                    warn!(%id, error = %e, "download failed");
                    app.show_toast("❌ Download failed");
                }
            }
        }
        AppEvent::Tick => app.on_tick(),
        AppEvent::Input(_) => {}
    }
}
