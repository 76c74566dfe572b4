//! Screen classification.
//!
//! Screen-type suppression rules need to know what kind of display a pass is
//! drawing for. The classifier is supplied by the embedding application; an
//! index with no display behind it classifies as [`ScreenKind::Invalid`].

/// What a display actually is.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScreenKind {
    /// No display at this index.
    Invalid,
    Raster,
    Vector,
    Lcd,
    /// Vector artwork rendered to a raster surface; raster-like for rules.
    Svg,
}

/// Target classification a screen rule checks against.
///
/// Filters form a small lattice over the concrete kinds so one rule can
/// accept several related display types at once.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ScreenFilter {
    /// Matches no display at all.
    None,
    Raster,
    Vector,
    VectorOrRaster,
    Lcd,
    LcdOrRaster,
    LcdOrVector,
    #[default]
    Any,
}

impl ScreenFilter {
    /// True when `kind` falls under this filter.
    ///
    /// [`ScreenKind::Invalid`] never matches, not even `Any`.
    pub fn matches(self, kind: ScreenKind) -> bool {
        use ScreenFilter::*;
        match kind {
            ScreenKind::Invalid => false,
            ScreenKind::Raster | ScreenKind::Svg => {
                matches!(self, Raster | VectorOrRaster | LcdOrRaster | Any)
            }
            ScreenKind::Vector => matches!(self, Vector | VectorOrRaster | LcdOrVector | Any),
            ScreenKind::Lcd => matches!(self, Lcd | LcdOrRaster | LcdOrVector | Any),
        }
    }

    /// Resolves a configuration name. Unrecognized names fall back to `Any`.
    pub fn from_name(name: &str) -> ScreenFilter {
        match name {
            "none" => ScreenFilter::None,
            "raster" => ScreenFilter::Raster,
            "vector" => ScreenFilter::Vector,
            "vectorraster" => ScreenFilter::VectorOrRaster,
            "lcd" => ScreenFilter::Lcd,
            "lcdraster" => ScreenFilter::LcdOrRaster,
            "lcdvector" => ScreenFilter::LcdOrVector,
            _ => ScreenFilter::Any,
        }
    }
}

/// Answers what category of display a given screen index is.
pub trait ScreenClassifier {
    fn classify(&self, screen_index: u32) -> ScreenKind;
}

/// A plain list of screens, indexed in order. Handy for embedders with a
/// static screen layout, and for tests.
impl ScreenClassifier for [ScreenKind] {
    fn classify(&self, screen_index: u32) -> ScreenKind {
        self.get(screen_index as usize)
            .copied()
            .unwrap_or(ScreenKind::Invalid)
    }
}

impl ScreenClassifier for Vec<ScreenKind> {
    fn classify(&self, screen_index: u32) -> ScreenKind {
        self.as_slice().classify(screen_index)
    }
}
