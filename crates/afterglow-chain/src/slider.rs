//! Adjustable parameters ("sliders").
//!
//! Sliders are owned by the chain manager and mutated by a UI/input layer
//! between frames; this subsystem only ever reads the value current at the
//! instant of evaluation. Multi-component parameters (vectors, colors) are
//! registered as consecutive scalar entries named `base0`..`baseN`.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

/// Value shape of an adjustable parameter.
///
/// The shape is fixed at creation and determines how many scalar components
/// a comparison must inspect.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SliderKind {
    /// Integer-valued scalar (stored as float).
    Int,
    /// Float scalar.
    Float,
    /// Two-component vector.
    Vec2,
    /// Color triple (RGB).
    Color,
}

impl SliderKind {
    /// Number of scalar components behind a parameter of this kind.
    #[inline]
    pub fn component_count(self) -> usize {
        match self {
            SliderKind::Int | SliderKind::Float => 1,
            SliderKind::Vec2 => 2,
            SliderKind::Color => 3,
        }
    }
}

/// One live tunable value.
///
/// Reads and writes happen on the frame thread in the agreed frame-boundary
/// ordering, so interior mutability via [`Cell`] is sufficient.
#[derive(Debug)]
pub struct Slider {
    name: String,
    kind: SliderKind,
    min: f32,
    default: f32,
    max: f32,
    value: Cell<f32>,
}

impl Slider {
    pub fn new(
        name: impl Into<String>,
        kind: SliderKind,
        min: f32,
        default: f32,
        max: f32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            min,
            default,
            max,
            value: Cell::new(default),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SliderKind {
        self.kind
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    /// Current value, as last committed by the UI layer.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    /// Sets the value, clamped to the slider's bounds.
    pub fn set(&self, v: f32) {
        self.value.set(v.clamp(self.min, self.max));
    }

    /// Restores the default value.
    pub fn reset(&self) {
        self.value.set(self.default);
    }
}

/// Name-keyed registry of sliders.
///
/// Rules never hold slider references; they keep the full component names
/// and re-read through this table on every evaluation.
#[derive(Debug, Default)]
pub struct SliderTable {
    sliders: HashMap<String, Rc<Slider>>,
}

impl SliderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single slider under its own name.
    pub fn insert(&mut self, slider: Slider) -> Rc<Slider> {
        let slider = Rc::new(slider);
        self.sliders
            .insert(slider.name().to_owned(), Rc::clone(&slider));
        slider
    }

    /// Registers one scalar entry per component of `kind`, named
    /// `base0`..`baseN`, all sharing the same bounds and default.
    pub fn register(&mut self, base: &str, kind: SliderKind, min: f32, default: f32, max: f32) {
        for index in 0..kind.component_count() {
            self.insert(Slider::new(format!("{base}{index}"), kind, min, default, max));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Slider>> {
        self.sliders.get(name)
    }

    /// Current value of the named slider, if registered.
    pub fn value(&self, name: &str) -> Option<f32> {
        self.sliders.get(name).map(|slider| slider.value())
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clamps_to_bounds() {
        let slider = Slider::new("gamma0", SliderKind::Float, 0.0, 1.0, 2.0);
        slider.set(5.0);
        assert_eq!(slider.value(), 2.0);
        slider.set(-1.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn reset_restores_default() {
        let slider = Slider::new("gamma0", SliderKind::Float, 0.0, 1.0, 2.0);
        slider.set(1.7);
        slider.reset();
        assert_eq!(slider.value(), 1.0);
    }

    #[test]
    fn register_creates_one_entry_per_component() {
        let mut table = SliderTable::new();
        table.register("tint", SliderKind::Color, 0.0, 1.0, 1.0);
        assert_eq!(table.len(), 3);
        assert!(table.get("tint0").is_some());
        assert!(table.get("tint2").is_some());
        assert!(table.get("tint3").is_none());
    }

    #[test]
    fn table_reads_live_values() {
        let mut table = SliderTable::new();
        let slider = table.insert(Slider::new("scanline0", SliderKind::Float, 0.0, 0.0, 1.0));
        assert_eq!(table.value("scanline0"), Some(0.0));
        slider.set(0.25);
        assert_eq!(table.value("scanline0"), Some(0.25));
        assert_eq!(table.value("missing"), None);
    }
}
