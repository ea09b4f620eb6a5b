//! Font load detection sessions
//!
//! A session renders its text in two probes, one listing the target family
//! before `sans-serif` and one before `serif`. As long as both probes keep
//! the width of their generic fallback the font has not taken effect. The
//! session polls those widths until they diverge or its timeout elapses.

use crate::capabilities::EngineCapabilities;
use crate::config::WatcherConfig;
use crate::fallback::{FallbackWidths, GenericFamily, WidthClass};
use crate::host::{MeasurementHost, Ruler};
use crate::{LoadError, Result};
use css_value::FontDeclarations;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Shared flag asking running sessions to stop
///
/// Sessions observe it after each poll delay, so a cancelled session
/// rejects at its next tick at the latest.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    MeasuringBaseline,
    Polling,
    Resolved,
    Rejected,
}

impl SessionState {
    pub fn is_finished(self) -> bool {
        matches!(self, SessionState::Resolved | SessionState::Rejected)
    }
}

/// Detection engine bound to one measurement host
///
/// Capabilities are evaluated once at construction and shared by reference
/// with every session the watcher creates.
pub struct FontWatcher<'h, H: MeasurementHost> {
    host: &'h H,
    capabilities: EngineCapabilities,
    config: WatcherConfig,
}

impl<'h, H: MeasurementHost> FontWatcher<'h, H> {
    /// Create a watcher for the engine identified by `user_agent`
    pub fn new(host: &'h H, user_agent: &str) -> Self {
        Self::with_capabilities(host, EngineCapabilities::from_user_agent(user_agent))
    }

    pub fn with_capabilities(host: &'h H, capabilities: EngineCapabilities) -> Self {
        Self {
            host,
            capabilities,
            config: WatcherConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn capabilities(&self) -> &EngineCapabilities {
        &self.capabilities
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Create an idle session for `family`
    ///
    /// Any family list in `style` is ignored. Without `text` the configured
    /// default test string is rendered.
    pub fn session(
        &self,
        family: &str,
        style: &FontDeclarations,
        text: Option<&str>,
    ) -> Session<'_, H> {
        Session {
            host: self.host,
            capabilities: &self.capabilities,
            config: &self.config,
            family: family.to_string(),
            style: style.without_family(),
            text: text.unwrap_or(&self.config.default_test_string).to_string(),
            state: SessionState::Idle,
            baseline: None,
            probes: None,
            started: None,
        }
    }

    /// Wait until `family` renders, resolving with the family name
    pub async fn watch(
        &self,
        family: &str,
        style: &FontDeclarations,
        text: Option<&str>,
    ) -> Result<String> {
        self.watch_with_cancel(family, style, text, &CancelToken::new()).await
    }

    /// Like [`watch`](Self::watch), rejecting with `Cancelled` once `cancel` is set
    pub async fn watch_with_cancel(
        &self,
        family: &str,
        style: &FontDeclarations,
        text: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<String> {
        self.session(family, style, text).run(cancel).await
    }
}

/// One detection run for one family, style and text
pub struct Session<'w, H: MeasurementHost> {
    host: &'w H,
    capabilities: &'w EngineCapabilities,
    config: &'w WatcherConfig,
    family: String,
    style: FontDeclarations,
    text: String,
    state: SessionState,
    baseline: Option<FallbackWidths>,
    /// Probes falling back to sans-serif and serif
    probes: Option<(Ruler<'w, H>, Ruler<'w, H>)>,
    started: Option<Instant>,
}

impl<'w, H: MeasurementHost> Session<'w, H> {
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn baseline(&self) -> Option<&FallbackWidths> {
        self.baseline.as_ref()
    }

    /// Number of probes the session currently holds in the host
    pub fn live_probes(&self) -> usize {
        if self.probes.is_some() {
            2
        } else {
            0
        }
    }

    /// Time since polling started
    pub fn elapsed(&self) -> Duration {
        self.started.map_or(Duration::ZERO, |started| started.elapsed())
    }

    /// Measure the generic family widths once
    pub fn measure_baseline(&mut self) -> FallbackWidths {
        if let Some(baseline) = self.baseline {
            return baseline;
        }
        self.state = SessionState::MeasuringBaseline;
        let baseline = FallbackWidths::measure(self.host, &self.text, &self.style);
        self.baseline = Some(baseline);
        baseline
    }

    /// Measure the baseline if needed and insert the two polling probes
    ///
    /// Does nothing once the session is polling or finished.
    pub fn start(&mut self) {
        if !matches!(self.state, SessionState::Idle | SessionState::MeasuringBaseline) {
            return;
        }
        tracing::info!(
            "Watching font \"{}\" (webkit fallback bug: {})",
            self.family,
            self.capabilities.webkit_fallback_bug
        );

        self.measure_baseline();
        let host = self.host;
        let sans_serif = self
            .style
            .with_family([self.family.as_str(), GenericFamily::SansSerif.name()]);
        let serif = self
            .style
            .with_family([self.family.as_str(), GenericFamily::Serif.name()]);
        self.probes = Some((
            Ruler::insert(host, &self.text, &sans_serif),
            Ruler::insert(host, &self.text, &serif),
        ));
        self.started = Some(Instant::now());
        self.state = SessionState::Polling;
    }

    /// Read both probes and classify their widths
    ///
    /// Starts an idle session first. A finished session reports its outcome
    /// without measuring: `Loaded` once resolved, `Fallback` once rejected.
    pub fn check(&mut self) -> WidthClass {
        self.start();
        match (&self.probes, &self.baseline) {
            (Some((a, b)), Some(baseline)) => {
                baseline.classify(a.width(), b.width(), self.capabilities)
            }
            _ if self.state == SessionState::Resolved => WidthClass::Loaded,
            _ => WidthClass::Fallback,
        }
    }

    fn finish(&mut self, state: SessionState) {
        self.probes = None;
        self.state = state;
    }

    /// Poll until the font renders, the timeout elapses or `cancel` is set
    ///
    /// Both probes are removed from the host before this returns, whatever
    /// the outcome.
    pub async fn run(mut self, cancel: &CancelToken) -> Result<String> {
        let timeout = self.config.timeout();
        let interval = self.config.poll_interval();

        loop {
            if self.check().is_loaded() {
                self.finish(SessionState::Resolved);
                tracing::info!("Font \"{}\" loaded after {:?}", self.family, self.elapsed());
                return Ok(self.family);
            }

            let elapsed = self.elapsed();
            if elapsed >= timeout {
                self.finish(SessionState::Rejected);
                tracing::warn!(
                    "Timeout while loading font \"{}\" after {:?}",
                    self.family,
                    elapsed
                );
                return Err(LoadError::Timeout {
                    family: self.family,
                    elapsed,
                });
            }

            tokio::time::sleep(interval).await;

            if cancel.is_cancelled() {
                self.finish(SessionState::Rejected);
                tracing::debug!("Watching font \"{}\" cancelled", self.family);
                return Err(LoadError::Cancelled { family: self.family });
            }
        }
    }
}
