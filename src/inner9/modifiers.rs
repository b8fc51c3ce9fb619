//! Bounded Inner9 adjustments from the typology code and the primary nine-type.
//!
//! Both are opt-in. Deltas are small relative to the `[0, 100]` range and every
//! touched dimension is re-clamped.

use crate::domain::{Axis, Inner9Dimension, Inner9Scores, NineType, TypeCode};
use crate::inner9::mapper::Inner9Config;
use crate::math::score100;

use Inner9Dimension::*;

fn apply_deltas(base: Inner9Scores, deltas: &[(Inner9Dimension, f64)]) -> Inner9Scores {
    let mut out = base;
    for &(dim, delta) in deltas {
        let slot = out.get_mut(dim);
        *slot = score100(f64::from(*slot) + delta);
    }
    out
}

/// One letter per axis; `alpha` is the full delta magnitude.
///
/// A malformed code leaves the scores unchanged.
pub fn apply_typology_modifier(base: Inner9Scores, code: &TypeCode, alpha: f64) -> Inner9Scores {
    if !code.is_well_formed() {
        return base;
    }
    let is = |axis: Axis| code.letter(axis) == Some(axis.positive_letter());
    let mut deltas = Vec::with_capacity(6);

    if is(Axis::Ei) {
        deltas.push((Expression, alpha));
    } else {
        deltas.push((Sensitivity, alpha));
    }

    if is(Axis::Sn) {
        deltas.push((Insight, alpha));
    } else {
        deltas.push((Balance, alpha));
    }

    if is(Axis::Tf) {
        deltas.push((Will, (alpha * 0.6).round()));
        deltas.push((Creation, (alpha * 0.4).round()));
    } else {
        deltas.push((Harmony, alpha));
    }

    if is(Axis::Jp) {
        deltas.push((Balance, (alpha * 0.7).round()));
        deltas.push((Resilience, (alpha * 0.3).round()));
    } else {
        deltas.push((Resilience, (alpha * 0.7).round()));
    }

    apply_deltas(base, &deltas)
}

/// Dimensions each nine-type reinforces.
pub fn nine_type_targets(t: NineType) -> [Inner9Dimension; 2] {
    match t {
        NineType::One => [Balance, Will],
        NineType::Two => [Harmony, Sensitivity],
        NineType::Three => [Expression, Will],
        NineType::Four => [Sensitivity, Creation],
        NineType::Five => [Insight, Balance],
        NineType::Six => [Resilience, Balance],
        NineType::Seven => [Growth, Expression],
        NineType::Eight => [Will, Resilience],
        NineType::Nine => [Harmony, Balance],
    }
}

pub fn apply_nine_type_modifier(base: Inner9Scores, primary: NineType, beta: f64) -> Inner9Scores {
    let deltas = nine_type_targets(primary).map(|dim| (dim, beta));
    apply_deltas(base, &deltas)
}

/// Apply whichever modifiers `config` enables, typology first.
pub fn apply_modifiers(base: Inner9Scores, config: &Inner9Config, code: &TypeCode, primary: NineType) -> Inner9Scores {
    let mut out = base;
    if let Some(alpha) = config.typology_modifier {
        out = apply_typology_modifier(out, code, alpha);
    }
    if let Some(beta) = config.nine_type_modifier {
        out = apply_nine_type_modifier(out, primary, beta);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PerAxis;
    use crate::inner9::mapper::{DEFAULT_NINE_TYPE_BETA, DEFAULT_TYPOLOGY_ALPHA};

    fn flat(v: u8) -> Inner9Scores {
        let mut s = Inner9Scores::default();
        for dim in Inner9Dimension::ALL {
            *s.get_mut(dim) = v;
        }
        s
    }

    fn code(ei: f64, sn: f64, tf: f64, jp: f64) -> TypeCode {
        TypeCode::from_axes(&PerAxis { ei, sn, tf, jp })
    }

    #[test]
    fn entj_deltas() {
        let out = apply_typology_modifier(flat(50), &code(0.9, 0.9, 0.9, 0.9), DEFAULT_TYPOLOGY_ALPHA);
        assert_eq!(out.expression, 55);
        assert_eq!(out.insight, 55);
        assert_eq!(out.will, 53);
        assert_eq!(out.creation, 52);
        // round(3.5) + nothing else on balance
        assert_eq!(out.balance, 54);
        assert_eq!(out.resilience, 52);
        assert_eq!(out.sensitivity, 50);
        assert_eq!(out.harmony, 50);
    }

    #[test]
    fn isfp_deltas() {
        let out = apply_typology_modifier(flat(50), &code(0.1, 0.1, 0.1, 0.1), DEFAULT_TYPOLOGY_ALPHA);
        assert_eq!(out.sensitivity, 55);
        assert_eq!(out.balance, 55);
        assert_eq!(out.harmony, 55);
        assert_eq!(out.resilience, 54);
        assert_eq!(out.expression, 50);
    }

    #[test]
    fn nine_type_deltas_clamp() {
        let out = apply_nine_type_modifier(flat(98), NineType::Seven, DEFAULT_NINE_TYPE_BETA);
        assert_eq!(out.growth, 100);
        assert_eq!(out.expression, 100);
        assert_eq!(out.will, 98);
    }

    #[test]
    fn disabled_by_default() {
        let base = flat(40);
        let out = apply_modifiers(base, &Inner9Config::default(), &code(0.9, 0.9, 0.9, 0.9), NineType::Five);
        assert_eq!(out, base);
    }

    #[test]
    fn enabled_modifiers_stack() {
        let config = Inner9Config {
            typology_modifier: Some(DEFAULT_TYPOLOGY_ALPHA),
            nine_type_modifier: Some(DEFAULT_NINE_TYPE_BETA),
            ..Inner9Config::default()
        };
        let out = apply_modifiers(flat(50), &config, &code(0.9, 0.9, 0.9, 0.9), NineType::Five);
        assert_eq!(out.insight, 59);
        assert_eq!(out.balance, 58);
    }
}
