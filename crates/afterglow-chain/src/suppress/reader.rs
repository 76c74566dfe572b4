//! Builds suppression rules from configuration records.
//!
//! Records are JSON values already parsed by the embedding configuration
//! layer; this module only validates the suppression schema and resolves
//! slider names against the live table.

use serde_json::Value;

use crate::error::ReadError;
use crate::screen::ScreenFilter;
use crate::slider::SliderTable;

use super::{CombineMode, Condition, Suppressor};

const CONDITION_NAMES: &[(&str, Condition)] = &[
    ("equal", Condition::Equal),
    ("notequal", Condition::NotEqual),
    ("less", Condition::Less),
    ("lessequal", Condition::LessEqual),
    ("greater", Condition::Greater),
    ("greaterequal", Condition::GreaterEqual),
];

const COMBINE_NAMES: &[(&str, CombineMode)] =
    &[("and", CombineMode::And), ("or", CombineMode::Or)];

/// Builds one suppression rule from a configuration record.
///
/// `prefix` identifies the owning chain/pass and is prepended to every
/// diagnostic. Returns `Ok(None)` for an unrecognized rule type: the pass
/// then carries no rule and always runs.
pub fn read_suppressor(
    record: &Value,
    prefix: &str,
    sliders: &SliderTable,
) -> Result<Option<Suppressor>, ReadError> {
    let Some(kind) = record.get("type").and_then(Value::as_str) else {
        return Err(ReadError::new(prefix, "Must have string value 'type'"));
    };
    if kind != "screen" && !record.get("name").is_some_and(Value::is_string) {
        return Err(ReadError::new(prefix, "Must have string value 'name'"));
    }
    let Some(operand) = record.get("value") else {
        return Err(ReadError::new(
            prefix,
            "Must have numeric or array value 'value'",
        ));
    };
    if !operand.is_number() && !operand.is_array() {
        return Err(ReadError::new(
            prefix,
            "Value 'value' must be a number or an array the size of the corresponding slider type",
        ));
    }

    let condition = lookup_enum(record, "condition", CONDITION_NAMES, Condition::Equal);
    let combine = lookup_enum(record, "combine", COMBINE_NAMES, CombineMode::Or);

    match kind {
        "slider" => {
            let Some(base) = record.get("name").and_then(Value::as_str) else {
                return Err(ReadError::new(prefix, "Must have string value 'name'"));
            };
            read_slider_rule(prefix, sliders, base, operand, condition, combine).map(Some)
        }
        "screen" => {
            if condition.is_ordering() {
                return Err(ReadError::new(
                    prefix,
                    "Screen-type rules only support 'equal' and 'notequal' conditions",
                ));
            }
            let Some(name) = record.get("screen").and_then(Value::as_str) else {
                return Err(ReadError::new(prefix, "Must have string value 'screen'"));
            };
            Ok(Some(Suppressor::Screen {
                filter: ScreenFilter::from_name(name),
                condition,
                combine,
            }))
        }
        other => {
            log::warn!("{prefix}Unknown suppressor type '{other}', pass will not be suppressed");
            Ok(None)
        }
    }
}

fn read_slider_rule(
    prefix: &str,
    sliders: &SliderTable,
    base: &str,
    operand: &Value,
    condition: Condition,
    combine: CombineMode,
) -> Result<Suppressor, ReadError> {
    // arity comes from the already-registered first component
    let first = format!("{base}0");
    let Some(slider) = sliders.get(&first) else {
        return Err(ReadError::new(prefix, format!("Unknown slider '{first}'")));
    };
    let count = slider.kind().component_count();

    let mut names = Vec::with_capacity(count);
    names.push(first);
    let mut values = Vec::with_capacity(count);

    if count > 1 {
        let Some(array) = operand.as_array() else {
            return Err(ReadError::new(
                prefix,
                format!("Expected {count} values, got 1"),
            ));
        };
        if array.len() != count {
            return Err(ReadError::new(
                prefix,
                format!("Expected {count} values, got {}", array.len()),
            ));
        }
        for (index, entry) in array.iter().enumerate() {
            let Some(number) = entry.as_f64() else {
                return Err(ReadError::new(
                    prefix,
                    format!("Value 'value[{index}]' must be a number"),
                ));
            };
            values.push(number as f32);
        }
        for index in 1..count {
            let name = format!("{base}{index}");
            if sliders.get(&name).is_none() {
                return Err(ReadError::new(prefix, format!("Unknown slider '{name}'")));
            }
            names.push(name);
        }
    } else {
        let Some(number) = operand.as_f64() else {
            return Err(ReadError::new(prefix, "Value 'value' must be a number"));
        };
        values.push(number as f32);
    }

    Ok(Suppressor::Slider {
        names,
        values,
        condition,
        combine,
    })
}

fn lookup_enum<T: Copy>(record: &Value, field: &str, names: &[(&str, T)], default: T) -> T {
    let Some(name) = record.get(field).and_then(Value::as_str) else {
        return default;
    };
    names
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, value)| value)
        .unwrap_or(default)
}
