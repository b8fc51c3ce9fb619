//! Engine options and their environment overrides.
//!
//! Options are always passed explicitly per call. The environment is only read by
//! [`EngineOptions::from_env`], which front-ends call once at startup.
//!
//! Recognized keys (a `.env` file is loaded first if present):
//!
//! - `IM_LIKERT_MIN`, `IM_LIKERT_MAX`: response scale bounds (default 1..7)
//! - `IM_INNER9_NONLINEAR_ENABLED`: `true`/`1` enables the harmony interaction term
//! - `IM_INNER9_TYPOLOGY_MODIFIER`: `true` for the default magnitude, or a number
//! - `IM_INNER9_NINE_TYPE_MODIFIER`: same, for the nine-type modifier

use serde::{Deserialize, Serialize};

use crate::domain::LikertScale;
use crate::error::ScoringError;
use crate::inner9::{DEFAULT_NINE_TYPE_BETA, DEFAULT_TYPOLOGY_ALPHA, Inner9Config};

pub const ENV_LIKERT_MIN: &str = "IM_LIKERT_MIN";
pub const ENV_LIKERT_MAX: &str = "IM_LIKERT_MAX";
pub const ENV_NONLINEAR: &str = "IM_INNER9_NONLINEAR_ENABLED";
pub const ENV_TYPOLOGY_MODIFIER: &str = "IM_INNER9_TYPOLOGY_MODIFIER";
pub const ENV_NINE_TYPE_MODIFIER: &str = "IM_INNER9_NINE_TYPE_MODIFIER";

/// Per-call engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    pub scale: LikertScale,
    pub inner9: Inner9Config,
}

impl EngineOptions {
    /// Defaults overridden by `.env` and the process environment.
    pub fn from_env() -> Result<Self, ScoringError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each recognized key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScoringError> {
        let mut options = Self::default();

        let min = parse_int(ENV_LIKERT_MIN, lookup(ENV_LIKERT_MIN))?.unwrap_or(options.scale.min);
        let max = parse_int(ENV_LIKERT_MAX, lookup(ENV_LIKERT_MAX))?.unwrap_or(options.scale.max);
        options.scale = LikertScale::new(min, max)?;

        if let Some(raw) = lookup(ENV_NONLINEAR) {
            options.inner9.nonlinear = parse_flag(ENV_NONLINEAR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TYPOLOGY_MODIFIER) {
            options.inner9.typology_modifier = parse_modifier(ENV_TYPOLOGY_MODIFIER, &raw, DEFAULT_TYPOLOGY_ALPHA)?;
        }
        if let Some(raw) = lookup(ENV_NINE_TYPE_MODIFIER) {
            options.inner9.nine_type_modifier = parse_modifier(ENV_NINE_TYPE_MODIFIER, &raw, DEFAULT_NINE_TYPE_BETA)?;
        }

        Ok(options)
    }
}

fn invalid(key: &str, value: &str) -> ScoringError {
    ScoringError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_int(key: &str, raw: Option<String>) -> Result<Option<i32>, ScoringError> {
    match raw {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| invalid(key, &raw)),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ScoringError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

/// A flag selects the default magnitude; a number sets it explicitly.
fn parse_modifier(key: &str, raw: &str, default: f64) -> Result<Option<f64>, ScoringError> {
    if let Ok(enabled) = parse_flag(key, raw) {
        return Ok(enabled.then_some(default));
    }
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(invalid(key, raw)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let options = EngineOptions::from_lookup(lookup(&[])).unwrap();
        assert_eq!(options, EngineOptions::default());
        assert_eq!(options.scale, LikertScale::SEVEN_POINT);
        assert!(!options.inner9.nonlinear);
    }

    #[test]
    fn overrides_are_applied() {
        let options = EngineOptions::from_lookup(lookup(&[
            (ENV_LIKERT_MAX, "5"),
            (ENV_NONLINEAR, "true"),
            (ENV_TYPOLOGY_MODIFIER, "1"),
            (ENV_NINE_TYPE_MODIFIER, "2.5"),
        ]))
        .unwrap();
        assert_eq!(options.scale, LikertScale::FIVE_POINT);
        assert!(options.inner9.nonlinear);
        assert_eq!(options.inner9.typology_modifier, Some(DEFAULT_TYPOLOGY_ALPHA));
        assert_eq!(options.inner9.nine_type_modifier, Some(2.5));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = EngineOptions::from_lookup(lookup(&[(ENV_LIKERT_MIN, "one")])).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfig { .. }));

        let err = EngineOptions::from_lookup(lookup(&[(ENV_LIKERT_MIN, "7")])).unwrap_err();
        assert_eq!(err, ScoringError::InvalidScale { min: 7, max: 7 });

        let err = EngineOptions::from_lookup(lookup(&[(ENV_LIKERT_MAX, "2147483647")])).unwrap_err();
        assert!(matches!(err, ScoringError::ScaleTooWide { .. }));

        let err = EngineOptions::from_lookup(lookup(&[(ENV_NINE_TYPE_MODIFIER, "-1")])).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfig { .. }));
    }
}
