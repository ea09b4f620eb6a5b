//! Loading every family of a font shorthand
//!
//! [`FontLoader`] starts one detection session per family of a `font`
//! value. Sessions run concurrently on the calling task and complete in any
//! order; progress is reported through [`LoadEvent`]s.

use crate::font_face::FontFaceDescriptors;
use crate::host::{MeasurementHost, StyleSheetHost};
use crate::watcher::{CancelToken, FontWatcher};
use crate::{LoadError, Result};
use css_value::{parse_src, FontValue};
use futures_util::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::cell::Cell;

/// Longest family name legacy engines accept
pub const MAX_FAMILY_NAME_LEN: usize = 31;

/// Progress notification from [`FontLoader::load_font`]
#[derive(Debug)]
pub enum LoadEvent {
    /// Loading begins, carrying the first family
    Loading(String),
    /// A session for the family started
    LoadStart(String),
    /// The family rendered
    Load(String),
    /// The family failed to render
    Error { family: String, error: LoadError },
    /// Every session finished, carrying the last family
    LoadingDone(String),
}

impl LoadEvent {
    pub fn family(&self) -> &str {
        match self {
            LoadEvent::Loading(family)
            | LoadEvent::LoadStart(family)
            | LoadEvent::Load(family)
            | LoadEvent::Error { family, .. }
            | LoadEvent::LoadingDone(family) => family,
        }
    }

    /// DOM style event name
    pub fn name(&self) -> &'static str {
        match self {
            LoadEvent::Loading(_) => "loading",
            LoadEvent::LoadStart(_) => "loadstart",
            LoadEvent::Load(_) => "load",
            LoadEvent::Error { .. } => "error",
            LoadEvent::LoadingDone(_) => "loadingdone",
        }
    }
}

/// Outcome of loading every family of a font value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Families in completion order
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Decrements the active load count when a load ends or is dropped
struct ActiveLoad<'a>(&'a Cell<usize>);

impl<'a> ActiveLoad<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for ActiveLoad<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Loads fonts through a [`FontWatcher`]
pub struct FontLoader<'h, H: MeasurementHost> {
    watcher: FontWatcher<'h, H>,
    active: Cell<usize>,
}

impl<'h, H: MeasurementHost> FontLoader<'h, H> {
    pub fn new(watcher: FontWatcher<'h, H>) -> Self {
        Self {
            watcher,
            active: Cell::new(0),
        }
    }

    pub fn watcher(&self) -> &FontWatcher<'h, H> {
        &self.watcher
    }

    /// True while at least one load is in progress
    pub fn is_loading(&self) -> bool {
        self.active.get() > 0
    }

    /// Load every family of the `font` shorthand
    ///
    /// Fails only when `font` does not parse. Per family failures are
    /// reported through `on_event` and in the returned report.
    pub async fn load_font<F>(
        &self,
        font: &str,
        text: Option<&str>,
        on_event: F,
    ) -> Result<LoadReport>
    where
        F: FnMut(LoadEvent),
    {
        self.load_font_with_cancel(font, text, &CancelToken::new(), on_event)
            .await
    }

    /// Like [`load_font`](Self::load_font), cancelling every session once
    /// `cancel` is set
    pub async fn load_font_with_cancel<F>(
        &self,
        font: &str,
        text: Option<&str>,
        cancel: &CancelToken,
        mut on_event: F,
    ) -> Result<LoadReport>
    where
        F: FnMut(LoadEvent),
    {
        let font: FontValue = font.parse()?;
        let (first, last) = match (font.family.first(), font.family.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return Err(LoadError::NoFamilies),
        };
        let style = font.declarations().without_family();
        let _active = ActiveLoad::enter(&self.active);

        on_event(LoadEvent::Loading(first));

        let mut pending = FuturesUnordered::new();
        for family in &font.family {
            if family.chars().count() > MAX_FAMILY_NAME_LEN {
                tracing::warn!(
                    "Font \"{}\" is longer than {} characters and may be ignored by some engines",
                    family,
                    MAX_FAMILY_NAME_LEN
                );
            }
            on_event(LoadEvent::LoadStart(family.clone()));

            let session = self.watcher.session(family, &style, text);
            pending.push(async move { (family, session.run(cancel).await) });
        }

        let mut report = LoadReport::default();
        while let Some((family, result)) = pending.next().await {
            match result {
                Ok(_) => {
                    report.loaded.push(family.clone());
                    on_event(LoadEvent::Load(family.clone()));
                }
                Err(error) => {
                    report.failed.push(family.clone());
                    on_event(LoadEvent::Error {
                        family: family.clone(),
                        error,
                    });
                }
            }
        }

        on_event(LoadEvent::LoadingDone(last));
        Ok(report)
    }

    /// Insert `face` through `sheet` and wait until it renders
    ///
    /// `src` must name at least one `url()` source. On success the rule
    /// stays in the sheet and its handle is returned; on failure the rule is
    /// removed again.
    pub async fn load_face<S: StyleSheetHost>(
        &self,
        sheet: &S,
        face: &FontFaceDescriptors,
        src: &str,
    ) -> Result<S::Handle> {
        let text = face.test_string()?;
        let sources = parse_src(src);
        if sources.is_empty() {
            return Err(LoadError::NoSources {
                family: face.family.clone(),
            });
        }
        tracing::debug!("Loading font face {} from {} source(s)", face.family, sources.len());
        let handle = sheet.insert_declaration(&face.to_css(src));

        let _active = ActiveLoad::enter(&self.active);
        match self
            .watcher
            .watch(&face.family, &face.declarations(), Some(&text))
            .await
        {
            Ok(_) => Ok(handle),
            Err(error) => {
                sheet.remove_declaration(handle);
                Err(error)
            }
        }
    }
}
