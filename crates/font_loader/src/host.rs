//! Host interfaces
//!
//! The engine never renders anything itself. It asks a measurement host
//! to lay out text in hidden probes and report their widths, and a style
//! sheet host to make `@font-face` rules visible to that layout.

use css_value::FontDeclarations;

/// Font size every probe is rendered at, large enough to make small width
/// differences between fonts visible
pub const RULER_FONT_SIZE: &str = "300px";

/// Fixed layout declarations applied to every probe
pub const RULER_DECLARATIONS: [(&str, &str); 8] = [
    ("visibility", "hidden"),
    ("position", "absolute"),
    ("width", "auto"),
    ("margin", "0"),
    ("padding", "0"),
    ("top", "0"),
    ("left", "0"),
    ("white-space", "nowrap"),
];

/// Renders text in hidden probes and reports their width
///
/// Methods take `&self`; hosts are expected to use interior mutability, as
/// several probes of several sessions are alive at the same time.
pub trait MeasurementHost {
    /// Handle to one live probe
    type Probe;

    /// Insert a hidden probe rendering `text` with `style`
    fn insert_probe(&self, text: &str, style: &ProbeStyle) -> Self::Probe;

    /// Replace the style of a live probe
    fn set_probe_style(&self, probe: &Self::Probe, style: &ProbeStyle);

    /// Current rendered width of a probe, in host units
    fn probe_width(&self, probe: &Self::Probe) -> f64;

    /// Remove a probe from the host
    fn remove_probe(&self, probe: Self::Probe);

    /// Width of `text` rendered once with `style`
    fn measure_width(&self, text: &str, style: &FontDeclarations) -> f64 {
        let probe = self.insert_probe(text, &ProbeStyle::new(style));
        let width = self.probe_width(&probe);
        self.remove_probe(probe);
        width
    }
}

/// Makes style sheet text visible to the measurement host
pub trait StyleSheetHost {
    type Handle;

    fn insert_declaration(&self, css_text: &str) -> Self::Handle;

    fn remove_declaration(&self, handle: Self::Handle);
}

/// Complete style of a probe
///
/// Wraps the caller's font declarations with the probe size forced to
/// [`RULER_FONT_SIZE`]. Hosts either read the font declarations or apply
/// [`ProbeStyle::css_text`] as the probe's inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeStyle {
    font: FontDeclarations,
}

impl ProbeStyle {
    pub fn new(style: &FontDeclarations) -> Self {
        let mut font = style.clone();
        font.size = Some(RULER_FONT_SIZE.to_string());
        Self { font }
    }

    /// Font declarations at the probe size
    pub fn font(&self) -> &FontDeclarations {
        &self.font
    }

    /// Inline style text, font and layout declarations all marked important
    pub fn css_text(&self) -> String {
        let mut css = self.font.serialize(true);
        for (property, value) in RULER_DECLARATIONS {
            if !css.is_empty() {
                css.push(';');
            }
            css.push_str(property);
            css.push(':');
            css.push_str(value);
            css.push_str("!important");
        }
        css
    }
}

/// A live probe that is removed from its host when dropped
pub struct Ruler<'h, H: MeasurementHost> {
    host: &'h H,
    probe: Option<H::Probe>,
}

impl<'h, H: MeasurementHost> Ruler<'h, H> {
    /// Insert a probe into the host
    pub fn insert(host: &'h H, text: &str, style: &FontDeclarations) -> Self {
        Self {
            host,
            probe: Some(host.insert_probe(text, &ProbeStyle::new(style))),
        }
    }

    pub fn set_style(&self, style: &FontDeclarations) {
        if let Some(probe) = &self.probe {
            self.host.set_probe_style(probe, &ProbeStyle::new(style));
        }
    }

    pub fn width(&self) -> f64 {
        match &self.probe {
            Some(probe) => self.host.probe_width(probe),
            None => 0.0,
        }
    }

    /// Remove the probe now instead of at end of scope
    pub fn remove(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(probe) = self.probe.take() {
            self.host.remove_probe(probe);
        }
    }
}

impl<H: MeasurementHost> Drop for Ruler<'_, H> {
    fn drop(&mut self) {
        self.release();
    }
}
