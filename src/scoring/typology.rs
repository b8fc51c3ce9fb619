//! Typological aggregator: four bipolar axes and the 4-letter code.
//!
//! Each typological item declares one axis and the pole its statement describes.
//! Responses are normalized, flipped for negative-pole items, and averaged per axis
//! with the item weight. An axis with no items sits at the neutral midpoint.

use crate::catalog::ItemCatalog;
use crate::domain::{
    Axis, AxisSign, LikertScale, PerAxis, ResponseSet, TypeCode, TypologyConfidence,
    TypologyResult,
};
use crate::math::{boundary, confidence, mean, to01, to100};
use crate::scoring::accumulator::WeightedMean;

/// Per-axis `[0, 1]` values before thresholding.
pub fn aggregate_axes(responses: &ResponseSet, catalog: &ItemCatalog, scale: LikertScale) -> PerAxis<f64> {
    let mut acc = PerAxis::<WeightedMean>::default();

    for item in catalog.items() {
        let Some(loading) = item.axis else { continue };
        // Unanswered items contribute nothing.
        let Some(response) = responses.get(item.id) else { continue };

        let axis_value = to01(response, item.reverse, scale);
        let adjusted = match loading.sign {
            AxisSign::Positive => axis_value,
            AxisSign::Negative => 1.0 - axis_value,
        };
        acc.get_mut(loading.axis).add(adjusted, item.weight);
    }

    acc.map(WeightedMean::value_or_neutral)
}

/// Derive code, scaled values, confidence and boundary flags from axis values.
pub fn typology_from_axes(axis01: PerAxis<f64>) -> TypologyResult {
    let axis100 = axis01.map(|&v| to100(v));
    let axes = axis100.map(|&s| confidence(s));
    let boundary_flags = axis100.map(|&s| boundary(s));
    let overall = mean(&Axis::ALL.map(|a| *axes.get(a))).clamp(0.0, 1.0);

    TypologyResult {
        code: TypeCode::from_axes(&axis01),
        axis01,
        axis100,
        confidence: TypologyConfidence {
            overall,
            axes,
            boundary: boundary_flags,
        },
    }
}

pub fn score_typology(responses: &ResponseSet, catalog: &ItemCatalog, scale: LikertScale) -> TypologyResult {
    typology_from_axes(aggregate_axes(responses, catalog, scale))
}

impl TypologyResult {
    /// Axes whose scaled value falls in the boundary band.
    ///
    /// An item-delivery layer uses these to decide whether to ask a few
    /// disambiguating follow-up items.
    pub fn boundary_axes(&self) -> Vec<Axis> {
        Axis::ALL
            .into_iter()
            .filter(|&a| *self.confidence.boundary.get(a))
            .collect()
    }

    /// Code with every boundary axis written as `chosen/other`, e.g. `E/INT/FJ`.
    ///
    /// `None` when no axis is on the boundary.
    pub fn alternative_code(&self) -> Option<String> {
        if self.boundary_axes().is_empty() {
            return None;
        }
        let mut out = String::new();
        for axis in Axis::ALL {
            let chosen = self.code.letter(axis)?;
            out.push(chosen);
            if *self.confidence.boundary.get(axis) {
                let other = if chosen == axis.positive_letter() {
                    axis.negative_letter()
                } else {
                    axis.positive_letter()
                };
                out.push('/');
                out.push(other);
            }
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemMeta;

    fn two_axis_catalog() -> ItemCatalog {
        ItemCatalog::new(vec![
            ItemMeta::new(1).axis(Axis::Ei, AxisSign::Positive),
            ItemMeta::new(2).axis(Axis::Ei, AxisSign::Negative),
            ItemMeta::new(3).axis(Axis::Tf, AxisSign::Positive).weight(3.0),
            ItemMeta::new(4).axis(Axis::Tf, AxisSign::Positive),
        ])
        .unwrap()
    }

    #[test]
    fn negative_pole_items_are_flipped() {
        let catalog = two_axis_catalog();
        // Strong E on item 1, strong disagreement with the I statement on item 2.
        let responses = ResponseSet::from_positional(&[7, 1, 4, 4]);
        let axes = aggregate_axes(&responses, &catalog, LikertScale::SEVEN_POINT);
        assert_eq!(axes.ei, 1.0);
    }

    #[test]
    fn item_weight_scales_contribution() {
        let catalog = two_axis_catalog();
        let responses = ResponseSet::from_positional(&[4, 4, 7, 1]);
        let axes = aggregate_axes(&responses, &catalog, LikertScale::SEVEN_POINT);
        assert_eq!(axes.tf, 0.75);
    }

    #[test]
    fn axes_without_items_are_neutral() {
        let catalog = two_axis_catalog();
        let responses = ResponseSet::from_positional(&[1, 7, 1, 1]);
        let result = score_typology(&responses, &catalog, LikertScale::SEVEN_POINT);
        assert_eq!(result.axis01.sn, 0.5);
        assert_eq!(result.axis01.jp, 0.5);
        assert_eq!(result.axis100.sn, 50);
        assert_eq!(result.code.as_str(), "INFJ");
        assert_eq!(result.boundary_axes(), vec![Axis::Sn, Axis::Jp]);
    }

    #[test]
    fn confidence_and_boundary_follow_scaled_values() {
        let result = typology_from_axes(PerAxis { ei: 0.9, sn: 0.46, tf: 0.2, jp: 0.55 });
        assert_eq!(result.axis100, PerAxis { ei: 90, sn: 46, tf: 20, jp: 55 });
        assert_eq!(result.confidence.boundary, PerAxis { ei: false, sn: true, tf: false, jp: true });
        assert!((result.confidence.axes.ei - 0.8).abs() < 1e-12);
        assert!((result.confidence.axes.tf - 0.6).abs() < 1e-12);
        let expected_overall = (0.8 + 0.08 + 0.6 + 0.1) / 4.0;
        assert!((result.confidence.overall - expected_overall).abs() < 1e-12);
        assert_eq!(result.code.as_str(), "ESFJ");
    }

    #[test]
    fn alternative_code_marks_boundary_axes() {
        let result = typology_from_axes(PerAxis { ei: 0.52, sn: 0.9, tf: 0.47, jp: 0.9 });
        assert_eq!(result.code.as_str(), "ENFJ");
        assert_eq!(result.alternative_code().as_deref(), Some("E/INF/TJ"));

        let clear = typology_from_axes(PerAxis { ei: 0.9, sn: 0.1, tf: 0.9, jp: 0.1 });
        assert_eq!(clear.alternative_code(), None);
    }
}
