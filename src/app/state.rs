use super::config::AppConfig;
use super::keys::KeyConfig;
use crate::access::{evaluate_access, AccessDecision, Allowlist, BalanceQuery, WalletSession};
use crate::gallery::Gallery;
use crate::preview::PreviewCache;
use crate::storage::PhotoId;
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Below this a full screen of tiles could evict its own previews.
const MIN_PREVIEW_CACHE: usize = 32;

/// Generic Input Popup Mode 📝
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    ConnectWallet,
}

/// Generic Input Popup State 📝
#[derive(Debug, Clone)]
pub struct InputState {
    pub mode: InputMode,
    pub title: String,
    pub value: String,
}

impl InputState {
    pub fn new(mode: InputMode, title: &str, initial_value: &str) -> Self {
        Self {
            mode,
            title: title.to_string(),
            value: initial_value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub start_time: Instant,
    pub deadline: Instant,
}

pub struct App {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,

    /// Access gate 🔐
    pub wallet: WalletSession,
    pub allowlist: Allowlist,
    pub balance: BalanceQuery,
    pub contract: String,
    pub token_name: Option<String>,
    pub walletconnect_project_id: Option<String>,

    /// Gallery + viewer 🖼️
    pub gallery: Gallery,
    pub previews: PreviewCache,
    pub drag_units_per_row: f32,
    /// Columns of the layout drawn last frame; cursor moves use it.
    pub grid_columns: usize,
    /// Tiles drawn in the last frame, for mouse hits and preview prefetch.
    pub tile_areas: Vec<(Rect, PhotoId)>,
    /// Viewer image area drawn in the last frame.
    pub viewer_area: Option<Rect>,

    /// UI State
    pub show_keyhints: bool,
    pub input_state: Option<InputState>,
    pub toast: Option<Toast>,

    /// Access session generation; bumped on connect, re-check and disconnect.
    pub session: u64,
    session_token: CancellationToken,
    pub(crate) listing_requested: bool,
}

impl App {
    pub fn new(config: &AppConfig, theme: Theme) -> Self {
        Self {
            theme,
            keys: config.keys.clone(),
            is_running: true,

            wallet: WalletSession::disconnected(),
            allowlist: Allowlist::new(&config.access.admin_addresses),
            balance: BalanceQuery::Idle,
            contract: config.chain.contract.clone(),
            token_name: None,
            walletconnect_project_id: config.access.walletconnect_project_id.clone(),

            gallery: Gallery::new(config.gallery.view_mode),
            previews: PreviewCache::new(config.gallery.preview_cache_size.max(MIN_PREVIEW_CACHE)),
            drag_units_per_row: config.gallery.drag_units_per_row,
            grid_columns: 1,
            tile_areas: Vec::new(),
            viewer_area: None,

            show_keyhints: false,
            input_state: None,
            toast: None,

            session: 0,
            session_token: CancellationToken::new(),
            listing_requested: false,
        }
    }

    pub fn access_decision(&self) -> AccessDecision {
        evaluate_access(&self.wallet, &self.balance, &self.allowlist)
    }

    pub fn is_current(&self, session: u64) -> bool {
        self.session == session
    }

    /// Cancels the running session's background work and starts a new one.
    pub(crate) fn renew_session(&mut self) -> (u64, CancellationToken) {
        self.session_token.cancel();
        self.session += 1;
        self.session_token = CancellationToken::new();
        self.listing_requested = false;
        (self.session, self.session_token.clone())
    }

    pub(crate) fn session_token(&self) -> CancellationToken {
        self.session_token.clone()
    }

    /// Drops everything tied to the current access session.
    pub(crate) fn reset_gallery(&mut self) {
        self.gallery.begin_loading();
        self.previews.clear();
        self.tile_areas.clear();
        self.viewer_area = None;
    }

    pub fn show_toast(&mut self, message: &str) {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(2500);

        if let Some(ref mut current) = self.toast {
            // Keep start_time so a quick update doesn't replay the entrance slide.
            current.message = message.to_string();
            current.deadline = deadline;
        } else {
            self.toast = Some(Toast {
                message: message.to_string(),
                start_time: now,
                deadline,
            });
        }
    }

    /// Called every tick to update state
    pub fn on_tick(&mut self) {
        if let Some(ref toast) = self.toast {
            if Instant::now() > toast.deadline {
                self.toast = None;
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.session_token.cancel();
        self.is_running = false;
    }
}
