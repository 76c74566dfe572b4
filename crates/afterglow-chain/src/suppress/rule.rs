use crate::screen::{ScreenClassifier, ScreenFilter};
use crate::slider::SliderTable;

/// Comparison applied by a suppression rule.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Condition {
    #[default]
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Condition {
    /// True for the ordering family. Screen rules reject these at load time.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Condition::Less | Condition::LessEqual | Condition::Greater | Condition::GreaterEqual
        )
    }
}

/// How sibling rules guarding the same pass merge.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CombineMode {
    And,
    #[default]
    Or,
}

/// Tolerance absorbing float noise in the equality family.
pub const CONDITION_TOLERANCE: f32 = 1e-5;

/// A predicate deciding whether a pass is skipped this frame.
///
/// The rule set is closed, so the variants are a plain enum dispatched in
/// [`Suppressor::evaluate`] rather than trait objects. Rules store slider
/// component names, never references; values are re-read through the table
/// on every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Suppressor {
    /// Compares live slider components against stored operands.
    Slider {
        /// Full component names, `base0`..`baseN`.
        names: Vec<String>,
        /// Operand vector, same arity as `names`.
        values: Vec<f32>,
        condition: Condition,
        combine: CombineMode,
    },
    /// Checks the classification of the display the pass draws for.
    Screen {
        filter: ScreenFilter,
        condition: Condition,
        combine: CombineMode,
    },
}

impl Suppressor {
    pub fn combine(&self) -> CombineMode {
        match self {
            Suppressor::Slider { combine, .. } | Suppressor::Screen { combine, .. } => *combine,
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            Suppressor::Slider { condition, .. } | Suppressor::Screen { condition, .. } => {
                *condition
            }
        }
    }

    /// Returns true when the guarded pass should be skipped this frame.
    ///
    /// `screen_index` is only consulted by screen rules; it is part of the
    /// signature so both variants evaluate uniformly.
    pub fn evaluate(
        &self,
        sliders: &SliderTable,
        screens: &dyn ScreenClassifier,
        screen_index: u32,
    ) -> bool {
        match self {
            Suppressor::Slider {
                names,
                values,
                condition,
                ..
            } => evaluate_slider(names, values, *condition, sliders),
            Suppressor::Screen {
                filter, condition, ..
            } => {
                let kind = screens.classify(screen_index);
                match condition {
                    Condition::Equal => filter.matches(kind),
                    Condition::NotEqual => !filter.matches(kind),
                    // ordering makes no sense for screen types; rejected at
                    // load time, and inert if one sneaks through
                    _ => false,
                }
            }
        }
    }
}

fn evaluate_slider(
    names: &[String],
    values: &[f32],
    condition: Condition,
    sliders: &SliderTable,
) -> bool {
    for (name, &operand) in names.iter().zip(values) {
        let Some(value) = sliders.value(name) else {
            log::warn!("suppression rule references unknown slider '{name}'; pass will run");
            return false;
        };
        match condition {
            // the equality family aggregates across every component
            Condition::Equal => {
                if (value - operand).abs() > CONDITION_TOLERANCE {
                    return false;
                }
            }
            // "not equal" holds only when every component differs
            Condition::NotEqual => {
                if (value - operand).abs() <= CONDITION_TOLERANCE {
                    return false;
                }
            }
            // ordering is decided by the first component examined
            Condition::Less => return value < operand,
            Condition::LessEqual => return value <= operand,
            Condition::Greater => return value > operand,
            Condition::GreaterEqual => return value >= operand,
        }
    }
    true
}

/// Merges one pass's rule list into a single skip/run decision.
///
/// OR rules suppress the pass if any of them fires; AND rules suppress it
/// only if all of them fire. An empty list never suppresses, so a pass
/// without rules always runs.
pub fn combine_all(
    rules: &[Suppressor],
    sliders: &SliderTable,
    screens: &dyn ScreenClassifier,
    screen_index: u32,
) -> bool {
    let mut and_total = 0usize;
    let mut and_fired = 0usize;
    for rule in rules {
        let fired = rule.evaluate(sliders, screens, screen_index);
        match rule.combine() {
            CombineMode::Or => {
                if fired {
                    return true;
                }
            }
            CombineMode::And => {
                and_total += 1;
                if fired {
                    and_fired += 1;
                }
            }
        }
    }
    and_total > 0 && and_fired == and_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ScreenKind;
    use crate::slider::SliderKind;

    fn table_with(base: &str, kind: SliderKind, values: &[f32]) -> SliderTable {
        let mut table = SliderTable::new();
        table.register(base, kind, -100.0, 0.0, 100.0);
        for (index, &value) in values.iter().enumerate() {
            table
                .get(&format!("{base}{index}"))
                .unwrap()
                .set(value);
        }
        table
    }

    fn slider_rule(base: &str, count: usize, values: Vec<f32>, condition: Condition) -> Suppressor {
        Suppressor::Slider {
            names: (0..count).map(|i| format!("{base}{i}")).collect(),
            values,
            condition,
            combine: CombineMode::Or,
        }
    }

    /// Classifier for a machine with no screens: every index is invalid.
    struct NoScreens;

    impl ScreenClassifier for NoScreens {
        fn classify(&self, _screen_index: u32) -> ScreenKind {
            ScreenKind::Invalid
        }
    }

    // ── equality family ───────────────────────────────────────────────────

    #[test]
    fn equal_fires_within_tolerance() {
        let table = table_with("gain", SliderKind::Float, &[0.5 + 0.5e-5]);
        let rule = slider_rule("gain", 1, vec![0.5], Condition::Equal);
        assert!(rule.evaluate(&table, &NoScreens, 0));
    }

    #[test]
    fn equal_rejects_outside_tolerance() {
        let table = table_with("gain", SliderKind::Float, &[0.5002]);
        let rule = slider_rule("gain", 1, vec![0.5], Condition::Equal);
        assert!(!rule.evaluate(&table, &NoScreens, 0));
    }

    #[test]
    fn notequal_fires_outside_tolerance() {
        let table = table_with("gain", SliderKind::Float, &[0.75]);
        let rule = slider_rule("gain", 1, vec![0.5], Condition::NotEqual);
        assert!(rule.evaluate(&table, &NoScreens, 0));
    }

    #[test]
    fn notequal_rejects_within_tolerance() {
        let table = table_with("gain", SliderKind::Float, &[0.5]);
        let rule = slider_rule("gain", 1, vec![0.5], Condition::NotEqual);
        assert!(!rule.evaluate(&table, &NoScreens, 0));
    }

    #[test]
    fn equal_requires_every_component() {
        let table = table_with("tint", SliderKind::Color, &[1.0, 1.0, 0.9]);
        let rule = slider_rule("tint", 3, vec![1.0, 1.0, 1.0], Condition::Equal);
        assert!(!rule.evaluate(&table, &NoScreens, 0));
    }

    // "all components differ" semantics: one matching component defeats the
    // whole rule, even though the others differ.
    #[test]
    fn notequal_requires_every_component_to_differ() {
        let table = table_with("tint", SliderKind::Color, &[0.2, 1.0, 0.2]);
        let rule = slider_rule("tint", 3, vec![1.0, 1.0, 1.0], Condition::NotEqual);
        assert!(!rule.evaluate(&table, &NoScreens, 0));

        let table = table_with("tint", SliderKind::Color, &[0.2, 0.3, 0.4]);
        let rule = slider_rule("tint", 3, vec![1.0, 1.0, 1.0], Condition::NotEqual);
        assert!(rule.evaluate(&table, &NoScreens, 0));
    }

    // ── ordering family ───────────────────────────────────────────────────

    #[test]
    fn ordering_boundaries_match_numeric_comparison() {
        let table = table_with("width", SliderKind::Float, &[2.0]);
        let less = slider_rule("width", 1, vec![2.0], Condition::Less);
        let less_equal = slider_rule("width", 1, vec![2.0], Condition::LessEqual);
        let greater = slider_rule("width", 1, vec![2.0], Condition::Greater);
        let greater_equal = slider_rule("width", 1, vec![2.0], Condition::GreaterEqual);
        assert!(!less.evaluate(&table, &NoScreens, 0));
        assert!(less_equal.evaluate(&table, &NoScreens, 0));
        assert!(!greater.evaluate(&table, &NoScreens, 0));
        assert!(greater_equal.evaluate(&table, &NoScreens, 0));
    }

    // Regression: for vector sliders only component 0 decides an ordering
    // condition. Moving component 1 must not change the outcome.
    #[test]
    fn ordering_is_decided_by_component_zero_only() {
        let table = table_with("offset", SliderKind::Vec2, &[1.0, 5.0]);
        let rule = slider_rule("offset", 2, vec![1.0, 2.0], Condition::Less);
        assert!(!rule.evaluate(&table, &NoScreens, 0));

        table.get("offset1").unwrap().set(-5.0);
        assert!(!rule.evaluate(&table, &NoScreens, 0));

        table.get("offset0").unwrap().set(0.5);
        assert!(rule.evaluate(&table, &NoScreens, 0));
    }

    #[test]
    fn missing_slider_never_suppresses() {
        let table = SliderTable::new();
        let rule = slider_rule("ghost", 1, vec![1.0], Condition::Equal);
        assert!(!rule.evaluate(&table, &NoScreens, 0));
    }

    // ── screen rules ──────────────────────────────────────────────────────

    #[test]
    fn screen_equal_uses_supertype_equivalence() {
        let table = SliderTable::new();
        let screens = vec![ScreenKind::Lcd];
        let rule = Suppressor::Screen {
            filter: ScreenFilter::LcdOrRaster,
            condition: Condition::Equal,
            combine: CombineMode::Or,
        };
        assert!(rule.evaluate(&table, &screens, 0));
    }

    #[test]
    fn screen_notequal_inverts_the_match() {
        let table = SliderTable::new();
        let screens = vec![ScreenKind::Vector];
        let rule = Suppressor::Screen {
            filter: ScreenFilter::Raster,
            condition: Condition::NotEqual,
            combine: CombineMode::Or,
        };
        assert!(rule.evaluate(&table, &screens, 0));
    }

    #[test]
    fn screen_out_of_range_index_is_invalid() {
        let table = SliderTable::new();
        let screens = vec![ScreenKind::Raster];
        let rule = Suppressor::Screen {
            filter: ScreenFilter::Any,
            condition: Condition::Equal,
            combine: CombineMode::Or,
        };
        assert!(!rule.evaluate(&table, &screens, 3));
    }

    #[test]
    fn screen_ordering_condition_is_inert() {
        let table = SliderTable::new();
        let screens = vec![ScreenKind::Raster];
        let rule = Suppressor::Screen {
            filter: ScreenFilter::Raster,
            condition: Condition::Less,
            combine: CombineMode::Or,
        };
        assert!(!rule.evaluate(&table, &screens, 0));
    }

    // ── combine policy ────────────────────────────────────────────────────

    fn or_rule(base: &str, operand: f32) -> Suppressor {
        slider_rule(base, 1, vec![operand], Condition::Equal)
    }

    fn and_rule(base: &str, operand: f32) -> Suppressor {
        Suppressor::Slider {
            names: vec![format!("{base}0")],
            values: vec![operand],
            condition: Condition::Equal,
            combine: CombineMode::And,
        }
    }

    #[test]
    fn empty_rule_list_never_suppresses() {
        let table = SliderTable::new();
        assert!(!combine_all(&[], &table, &NoScreens, 0));
    }

    #[test]
    fn any_firing_or_rule_suppresses() {
        let mut table = SliderTable::new();
        table.register("a", SliderKind::Float, 0.0, 0.0, 1.0);
        table.register("b", SliderKind::Float, 0.0, 1.0, 1.0);
        let rules = [or_rule("a", 0.5), or_rule("b", 1.0)];
        assert!(combine_all(&rules, &table, &NoScreens, 0));
    }

    #[test]
    fn and_rules_must_all_fire() {
        let mut table = SliderTable::new();
        table.register("a", SliderKind::Float, 0.0, 1.0, 1.0);
        table.register("b", SliderKind::Float, 0.0, 0.0, 1.0);
        let rules = [and_rule("a", 1.0), and_rule("b", 1.0)];
        assert!(!combine_all(&rules, &table, &NoScreens, 0));

        table.get("b0").unwrap().set(1.0);
        assert!(combine_all(&rules, &table, &NoScreens, 0));
    }
}
