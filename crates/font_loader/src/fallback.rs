//! Generic family baselines
//!
//! While a web font is still loading the host renders the next family in
//! the list. Measuring the test text once in each generic family gives the
//! widths a probe shows until the target font takes effect.

use crate::capabilities::EngineCapabilities;
use crate::host::{MeasurementHost, Ruler};
use css_value::FontDeclarations;
use serde::{Deserialize, Serialize};

/// Generic families used as width baselines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
}

impl GenericFamily {
    pub const ALL: [GenericFamily; 3] = [
        GenericFamily::Serif,
        GenericFamily::SansSerif,
        GenericFamily::Monospace,
    ];

    /// CSS keyword
    pub fn name(self) -> &'static str {
        match self {
            GenericFamily::Serif => "serif",
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Monospace => "monospace",
        }
    }
}

/// How a pair of probe widths relates to the baselines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthClass {
    /// Both probes still show their generic fallback
    Fallback,
    /// Both probes collapsed onto one baseline
    LastResort,
    /// The target font is rendering
    Loaded,
}

impl WidthClass {
    pub fn is_loaded(self) -> bool {
        self == WidthClass::Loaded
    }
}

/// Width of the test text in each generic family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackWidths {
    pub serif: f64,
    pub sans_serif: f64,
    pub monospace: f64,
}

impl FallbackWidths {
    pub fn new(serif: f64, sans_serif: f64, monospace: f64) -> Self {
        Self {
            serif,
            sans_serif,
            monospace,
        }
    }

    /// Measure `text` in every generic family with the remaining `style`
    ///
    /// One probe is inserted and restyled per family; it is removed before
    /// returning.
    pub fn measure<H: MeasurementHost>(host: &H, text: &str, style: &FontDeclarations) -> Self {
        let ruler = Ruler::insert(host, text, &style.with_family([GenericFamily::Serif.name()]));
        let serif = ruler.width();
        ruler.set_style(&style.with_family([GenericFamily::SansSerif.name()]));
        let sans_serif = ruler.width();
        ruler.set_style(&style.with_family([GenericFamily::Monospace.name()]));
        let monospace = ruler.width();
        ruler.remove();

        let widths = Self::new(serif, sans_serif, monospace);
        tracing::debug!(
            "Fallback widths: serif={} sans-serif={} monospace={}",
            widths.serif,
            widths.sans_serif,
            widths.monospace
        );
        widths
    }

    pub fn width(&self, family: GenericFamily) -> f64 {
        match family {
            GenericFamily::Serif => self.serif,
            GenericFamily::SansSerif => self.sans_serif,
            GenericFamily::Monospace => self.monospace,
        }
    }

    /// Probe widths still match the fallback each probe lists
    ///
    /// `a` is the probe falling back to sans-serif, `b` the one falling
    /// back to serif.
    pub fn is_fallback(&self, a: f64, b: f64) -> bool {
        a == self.sans_serif && b == self.serif
    }

    /// Both probe widths equal one and the same baseline
    pub fn is_last_resort(&self, a: f64, b: f64) -> bool {
        GenericFamily::ALL
            .into_iter()
            .any(|family| a == self.width(family) && b == self.width(family))
    }

    /// Classify one pair of probe widths
    ///
    /// The last resort check only applies to engines with the WebKit
    /// fallback bug.
    pub fn classify(&self, a: f64, b: f64, capabilities: &EngineCapabilities) -> WidthClass {
        if self.is_fallback(a, b) {
            WidthClass::Fallback
        } else if capabilities.webkit_fallback_bug && self.is_last_resort(a, b) {
            WidthClass::LastResort
        } else {
            WidthClass::Loaded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ProbeStyle;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};

    fn baseline() -> FallbackWidths {
        FallbackWidths::new(12.0, 10.0, 15.0)
    }

    #[test]
    fn test_is_fallback() {
        let widths = baseline();
        assert!(widths.is_fallback(10.0, 12.0));
        assert!(!widths.is_fallback(12.0, 10.0));
        assert!(!widths.is_fallback(10.0, 13.0));
    }

    #[test]
    fn test_is_last_resort() {
        let widths = baseline();
        assert!(widths.is_last_resort(15.0, 15.0));
        assert!(widths.is_last_resort(10.0, 10.0));
        assert!(widths.is_last_resort(12.0, 12.0));
        assert!(!widths.is_last_resort(10.0, 12.0));
        assert!(!widths.is_last_resort(11.0, 11.0));
    }

    #[test]
    fn test_classify() {
        let widths = baseline();
        let plain = EngineCapabilities::default();
        let buggy = EngineCapabilities::default().with_webkit_fallback_bug(true);

        assert_eq!(widths.classify(10.0, 12.0, &plain), WidthClass::Fallback);
        assert_eq!(widths.classify(10.0, 12.0, &buggy), WidthClass::Fallback);
        assert_eq!(widths.classify(11.0, 13.0, &plain), WidthClass::Loaded);
        assert_eq!(widths.classify(11.0, 13.0, &buggy), WidthClass::Loaded);
        assert_eq!(widths.classify(15.0, 15.0, &buggy), WidthClass::LastResort);
        assert_eq!(widths.classify(15.0, 15.0, &plain), WidthClass::Loaded);
        assert!(!widths.classify(15.0, 15.0, &buggy).is_loaded());
    }

    /// Reports a fixed width per generic family
    #[derive(Default)]
    struct GenericHost {
        inserted: Cell<usize>,
        live: Cell<usize>,
    }

    impl MeasurementHost for GenericHost {
        type Probe = RefCell<FontDeclarations>;

        fn insert_probe(&self, _text: &str, style: &ProbeStyle) -> Self::Probe {
            self.inserted.set(self.inserted.get() + 1);
            self.live.set(self.live.get() + 1);
            RefCell::new(style.font().clone())
        }

        fn set_probe_style(&self, probe: &Self::Probe, style: &ProbeStyle) {
            *probe.borrow_mut() = style.font().clone();
        }

        fn probe_width(&self, probe: &Self::Probe) -> f64 {
            let style = probe.borrow();
            assert_eq!(style.weight.as_deref(), Some("bold"));
            match style.family.first().map(String::as_str) {
                Some("serif") => 12.0,
                Some("sans-serif") => 10.0,
                Some("monospace") => 15.0,
                _ => 0.0,
            }
        }

        fn remove_probe(&self, _probe: Self::Probe) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_measure() {
        let host = GenericHost::default();
        let style = FontDeclarations {
            weight: Some("bold".into()),
            ..Default::default()
        };
        let widths = FallbackWidths::measure(&host, "BESbswy", &style);
        assert_eq!(widths, baseline());
        assert_eq!(host.inserted.get(), 1);
        assert_eq!(host.live.get(), 0);
    }

    #[test]
    fn test_generic_names() {
        let names: Vec<_> = GenericFamily::ALL.iter().map(|family| family.name()).collect();
        assert_eq!(names, ["serif", "sans-serif", "monospace"]);
        assert_eq!(baseline().width(GenericFamily::SansSerif), 10.0);
    }

    proptest! {
        #[test]
        fn prop_fallback_pair_never_loaded(
            serif in 1.0f64..500.0,
            sans_serif in 1.0f64..500.0,
            monospace in 1.0f64..500.0,
            bug in any::<bool>()
        ) {
            let widths = FallbackWidths::new(serif, sans_serif, monospace);
            let capabilities = EngineCapabilities::default().with_webkit_fallback_bug(bug);
            prop_assert_eq!(widths.classify(sans_serif, serif, &capabilities), WidthClass::Fallback);
        }

        #[test]
        fn prop_off_baseline_widths_are_loaded(a in 501.0f64..1000.0, b in 501.0f64..1000.0) {
            let buggy = EngineCapabilities::default().with_webkit_fallback_bug(true);
            prop_assert!(baseline().classify(a, b, &buggy).is_loaded());
        }
    }
}
