//! Layered configuration resolution
//!
//! Formatting options are resolved per key through three layers: a call-level
//! patch, an instance-level patch held by a [`crate::Calculator`], and the
//! process-global layer managed by [`set_config`]/[`reset_config`]. Missing
//! keys fall through to the built-in defaults. The global layer is the only
//! ambient state in the crate and is confined to this module.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use dcalc_math::Scale;

/// Errors produced by the dynamic configuration surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Payload was not a JSON object or failed to deserialize
    #[error("malformed configuration payload: {0}")]
    MalformedPayload(String),
    /// Payload contained a key that is not a configuration option
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
    /// A known key carried a value of the wrong type
    #[error("configuration key '{key}' expects {expected}")]
    TypeMismatch {
        /// The offending key
        key: String,
        /// Human-readable expected type
        expected: &'static str,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where a unit or currency symbol is placed relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPosition {
    /// Before the number, e.g. `$1,234.56`
    Prefix,
    /// After the number, e.g. `42km`
    Suffix,
}

/// Fully resolved formatting options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Decimal places used by rounding and display
    pub precision: Scale,
    /// Group the integer part in threes
    pub thousands_separator: bool,
    /// Separator character for thousands grouping
    pub thousands_separator_char: char,
    /// Character between integer and fractional parts
    pub decimal_separator: char,
    /// Unit string appended or prepended by `format`
    pub unit: String,
    /// Placement of the unit or currency symbol
    pub unit_position: UnitPosition,
    /// Uppercase the formatted text
    pub uppercase: bool,
    /// Render the value as Chinese numerals
    pub chinese_number: bool,
    /// Render the value as RMB capital numerals
    pub chinese_capital: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            precision: 2,
            thousands_separator: false,
            thousands_separator_char: ',',
            decimal_separator: '.',
            unit: String::new(),
            unit_position: UnitPosition::Prefix,
            uppercase: false,
            chinese_number: false,
            chinese_capital: false,
        }
    }
}

/// A partial options layer; unset keys fall through to the next layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsPatch {
    /// See [`Options::precision`]
    pub precision: Option<Scale>,
    /// See [`Options::thousands_separator`]
    pub thousands_separator: Option<bool>,
    /// See [`Options::thousands_separator_char`]
    pub thousands_separator_char: Option<char>,
    /// See [`Options::decimal_separator`]
    pub decimal_separator: Option<char>,
    /// See [`Options::unit`]
    pub unit: Option<String>,
    /// See [`Options::unit_position`]
    pub unit_position: Option<UnitPosition>,
    /// See [`Options::uppercase`]
    pub uppercase: Option<bool>,
    /// See [`Options::chinese_number`]
    pub chinese_number: Option<bool>,
    /// See [`Options::chinese_capital`]
    pub chinese_capital: Option<bool>,
}

impl OptionsPatch {
    /// A patch carrying only a precision override
    pub fn precision(precision: Scale) -> Self {
        Self { precision: Some(precision), ..Self::default() }
    }

    /// Overlay every set key of this patch onto `target`
    pub fn apply(&self, target: &mut Options) {
        if let Some(v) = self.precision {
            target.precision = v;
        }
        if let Some(v) = self.thousands_separator {
            target.thousands_separator = v;
        }
        if let Some(v) = self.thousands_separator_char {
            target.thousands_separator_char = v;
        }
        if let Some(v) = self.decimal_separator {
            target.decimal_separator = v;
        }
        if let Some(ref v) = self.unit {
            target.unit = v.clone();
        }
        if let Some(v) = self.unit_position {
            target.unit_position = v;
        }
        if let Some(v) = self.uppercase {
            target.uppercase = v;
        }
        if let Some(v) = self.chinese_number {
            target.chinese_number = v;
        }
        if let Some(v) = self.chinese_capital {
            target.chinese_capital = v;
        }
    }
}

const KNOWN_KEYS: &[(&str, &'static str)] = &[
    ("precision", "an unsigned integer"),
    ("thousands_separator", "a boolean"),
    ("thousands_separator_char", "a single-character string"),
    ("decimal_separator", "a single-character string"),
    ("unit", "a string"),
    ("unit_position", "\"prefix\" or \"suffix\""),
    ("uppercase", "a boolean"),
    ("chinese_number", "a boolean"),
    ("chinese_capital", "a boolean"),
];

static GLOBAL_LAYER: Lazy<RwLock<Value>> = Lazy::new(|| RwLock::new(default_layer()));

fn default_layer() -> Value {
    serde_json::to_value(Options::default()).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn validate(payload: &Map<String, Value>) -> ConfigResult<()> {
    for (key, value) in payload {
        let expected = KNOWN_KEYS
            .iter()
            .find(|(name, _)| *name == key.as_str())
            .map(|(_, expected)| *expected)
            .ok_or_else(|| ConfigError::UnknownKey(key.clone()))?;
        let mut probe = Map::new();
        probe.insert(key.clone(), value.clone());
        if serde_json::from_value::<OptionsPatch>(Value::Object(probe)).is_err() {
            return Err(ConfigError::TypeMismatch { key: key.clone(), expected });
        }
    }
    Ok(())
}

/// Merge `payload` into the global layer.
///
/// With `merge = true` each payload key overwrites the corresponding key of
/// the layer; with `merge = false` the payload replaces the layer wholesale.
/// Returns `true` on success.
///
/// # Errors
/// [`ConfigError`] when the payload is not an object, names an unknown key,
/// or carries a wrongly typed value; the layer is left untouched.
pub fn set_config(payload: Value, merge: bool) -> ConfigResult<bool> {
    let object = match payload {
        Value::Object(object) => object,
        other => {
            return Err(ConfigError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                other
            )))
        }
    };
    validate(&object)?;

    let mut layer = GLOBAL_LAYER.write();
    if merge {
        if let Value::Object(existing) = &mut *layer {
            for (key, value) in object {
                existing.insert(key, value);
            }
        }
    } else {
        *layer = Value::Object(object);
    }
    Ok(true)
}

/// Look up a value in the global layer by dotted path.
///
/// An empty path returns the entire layer. A missing path returns `default`,
/// or `Value::Null` when no default is given.
pub fn get_config(path: &str, default: Option<Value>) -> Value {
    let layer = GLOBAL_LAYER.read();
    if path.is_empty() {
        return layer.clone();
    }
    let mut node = &*layer;
    for segment in path.split('.') {
        match node.get(segment) {
            Some(child) => node = child,
            None => return default.unwrap_or(Value::Null),
        }
    }
    node.clone()
}

/// Restore the global layer to the built-in defaults. Returns `true`.
pub fn reset_config() -> bool {
    *GLOBAL_LAYER.write() = default_layer();
    true
}

fn global_patch() -> OptionsPatch {
    serde_json::from_value(GLOBAL_LAYER.read().clone()).unwrap_or_default()
}

/// Resolve the effective options for one call.
///
/// Each key is resolved independently: call patch, then instance patch, then
/// the global layer, then the built-in default.
pub fn resolve(instance: Option<&OptionsPatch>, call: Option<&OptionsPatch>) -> Options {
    let mut options = Options::default();
    global_patch().apply(&mut options);
    if let Some(patch) = instance {
        patch.apply(&mut options);
    }
    if let Some(patch) = call {
        patch.apply(&mut options);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // The global layer is process-wide; tests that touch it restore the
    // defaults before asserting so they stay order-independent.

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.precision, 2);
        assert!(!options.thousands_separator);
        assert_eq!(options.thousands_separator_char, ',');
        assert_eq!(options.unit_position, UnitPosition::Prefix);
    }

    #[test]
    fn test_patch_apply_is_per_key() {
        let mut options = Options::default();
        let patch = OptionsPatch {
            precision: Some(4),
            uppercase: Some(true),
            ..OptionsPatch::default()
        };
        patch.apply(&mut options);
        assert_eq!(options.precision, 4);
        assert!(options.uppercase);
        // untouched keys keep their previous values
        assert_eq!(options.thousands_separator_char, ',');
    }

    #[test]
    fn test_resolution_order() {
        let instance = OptionsPatch::precision(3);
        let call = OptionsPatch::precision(6);

        let resolved = resolve(Some(&instance), Some(&call));
        assert_eq!(resolved.precision, 6);

        let resolved = resolve(Some(&instance), None);
        assert_eq!(resolved.precision, 3);

        let resolved = resolve(None, None);
        assert_eq!(resolved.precision, get_config("precision", None).as_u64().unwrap() as u32);
    }

    #[test]
    fn test_set_config_rejects_unknown_key() {
        assert_eq!(
            set_config(json!({"percision": 3}), true),
            Err(ConfigError::UnknownKey("percision".to_string()))
        );
    }

    #[test]
    fn test_set_config_rejects_wrong_type() {
        let err = set_config(json!({"precision": "high"}), true).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn test_set_config_rejects_non_object() {
        let err = set_config(json!(42), true).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedPayload(_)));
    }

    #[test]
    fn test_get_config_default_fallback() {
        assert_eq!(
            get_config("no.such.path", Some(json!("fallback"))),
            json!("fallback")
        );
        assert_eq!(get_config("no.such.path", None), Value::Null);
    }

    #[test]
    fn test_set_get_reset_roundtrip() {
        reset_config();
        assert!(set_config(json!({"unit": "km", "unit_position": "suffix"}), true).unwrap());
        assert_eq!(get_config("unit", None), json!("km"));

        let resolved = resolve(None, None);
        assert_eq!(resolved.unit, "km");
        assert_eq!(resolved.unit_position, UnitPosition::Suffix);

        assert!(reset_config());
        assert_eq!(get_config("unit", None), json!(""));
    }
}
