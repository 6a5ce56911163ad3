//! Playback frame model.
//!
//! Tracks the attributes of the embedding frame so that applying a resolved
//! playback removes a stale CSP, and turns frame load/error events into
//! overlay changes.

use crate::core::effects::RenderEffect;
use crate::core::resolver::ResolvedPlayback;

/// Overlay text shown when the frame fails to load.
pub const LOAD_ERROR_MESSAGE: &str =
    "Error loading video. Please try another server or check your connection.";

/// Loading overlay state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Hidden,
    Loading(String),
    Error(String),
}

/// Current attributes of the embedding frame.
#[derive(Debug, Clone)]
pub struct PlaybackFrame {
    src: Option<String>,
    sandbox: Option<String>,
    csp: Option<String>,
    visible: bool,
    overlay: Overlay,
    handlers_attached: u64,
}

impl Default for PlaybackFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackFrame {
    pub fn new() -> Self {
        Self {
            src: None,
            sandbox: None,
            csp: None,
            visible: false,
            overlay: Overlay::Hidden,
            handlers_attached: 0,
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn sandbox(&self) -> Option<&str> {
        self.sandbox.as_deref()
    }

    pub fn csp(&self) -> Option<&str> {
        self.csp.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// How many times load/error handlers have been registered.
    pub fn handler_registrations(&self) -> u64 {
        self.handlers_attached
    }

    /// Show the loading overlay and hide the frame.
    pub fn begin_loading(&mut self, message: impl Into<String>) -> Vec<RenderEffect> {
        let message = message.into();
        self.overlay = Overlay::Loading(message.clone());
        self.visible = false;
        vec![RenderEffect::ShowLoading { message }, RenderEffect::HideFrame]
    }

    /// Point the frame at a resolved playback.
    pub fn apply(&mut self, resolved: &ResolvedPlayback) -> Vec<RenderEffect> {
        let mut effects = Vec::new();

        if !matches!(self.overlay, Overlay::Loading(_)) {
            effects.extend(self.begin_loading("Loading..."));
        } else if self.visible {
            self.visible = false;
            effects.push(RenderEffect::HideFrame);
        }

        self.sandbox = Some(resolved.sandbox_flags.clone());
        effects.push(RenderEffect::SetSandbox {
            flags: resolved.sandbox_flags.clone(),
        });

        match &resolved.csp {
            Some(policy) => {
                self.csp = Some(policy.clone());
                effects.push(RenderEffect::SetCsp {
                    policy: policy.clone(),
                });
            }
            None => {
                if self.csp.take().is_some() {
                    tracing::debug!("Removed CSP for provider {}", resolved.provider_id);
                    effects.push(RenderEffect::RemoveCsp);
                }
            }
        }

        self.src = Some(resolved.url.clone());
        effects.push(RenderEffect::SetFrameSource {
            url: resolved.url.clone(),
        });

        self.handlers_attached += 1;
        effects.push(RenderEffect::AttachFrameHandlers);

        effects
    }

    /// The frame finished loading.
    pub fn on_load(&mut self) -> Vec<RenderEffect> {
        tracing::debug!("Player frame loaded: {}", self.src.as_deref().unwrap_or(""));
        self.overlay = Overlay::Hidden;
        self.visible = true;
        vec![RenderEffect::HideLoading, RenderEffect::ShowFrame]
    }

    /// The frame failed to load. Not retried automatically.
    pub fn on_error(&mut self) -> Vec<RenderEffect> {
        tracing::error!(
            "Error loading player frame: {}",
            self.src.as_deref().unwrap_or("")
        );
        self.overlay = Overlay::Error(LOAD_ERROR_MESSAGE.to_string());
        self.visible = false;
        vec![
            RenderEffect::ShowError {
                message: LOAD_ERROR_MESSAGE.to_string(),
            },
            RenderEffect::HideFrame,
        ]
    }
}
