//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bars, fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - score bars: `#` on a `.` track, one row per label
//! - boundary band on axis bars: `|` at the 45 and 55 marks
//! - column charts: `#` columns on a grid, tallest at the top row

use crate::domain::{Axis, Big5Trait, Inner9Scores, NineTypeResult, PerAxis, PerTrait};
use crate::math::{BOUNDARY_HIGH, BOUNDARY_LOW};

/// Horizontal bars for `[0, 100]` scores.
pub fn render_score_bars(title: &str, rows: &[(String, u8)], width: usize) -> String {
    let width = width.max(10);
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{title}\n"));
    for (label, score) in rows {
        let filled = map_x(f64::from(*score), 100.0, width);
        let bar: String = (0..width).map(|i| if i < filled { '#' } else { '.' }).collect();
        out.push_str(&format!("{label:<label_width$} {bar} {score:>3}\n"));
    }
    out
}

pub fn render_big5_bars(scores: &PerTrait<u8>, width: usize) -> String {
    let rows: Vec<(String, u8)> = Big5Trait::ALL
        .iter()
        .map(|&t| (t.display_name().to_string(), *scores.get(t)))
        .collect();
    render_score_bars("Big5", &rows, width)
}

pub fn render_inner9_bars(scores: &Inner9Scores, width: usize) -> String {
    let rows: Vec<(String, u8)> = scores
        .iter()
        .map(|(dim, v)| (dim.display_name().to_string(), v))
        .collect();
    render_score_bars("Inner9", &rows, width)
}

/// Bipolar axis bars: negative letter on the left, positive on the right.
///
/// The boundary band edges are drawn as `|` so near-neutral axes stand out.
pub fn render_axis_bars(axis100: &PerAxis<u8>, width: usize) -> String {
    let width = width.max(10);
    let lo = map_x(f64::from(BOUNDARY_LOW), 100.0, width);
    let hi = map_x(f64::from(BOUNDARY_HIGH), 100.0, width);

    let mut out = String::new();
    out.push_str("Axes\n");
    for axis in Axis::ALL {
        let score = *axis100.get(axis);
        let pos = map_x(f64::from(score), 100.0, width).min(width - 1);
        let bar: String = (0..width)
            .map(|i| {
                if i == pos {
                    'o'
                } else if i == lo || i == hi {
                    '|'
                } else {
                    '-'
                }
            })
            .collect();
        out.push_str(&format!(
            "{} {bar} {} {score:>3}\n",
            axis.negative_letter(),
            axis.positive_letter()
        ));
    }
    out
}

/// Nine-type probabilities as bars, in type order.
pub fn render_nine_type_bars(result: &NineTypeResult, width: usize) -> String {
    let mut rows: Vec<(String, u8)> = result
        .distribution
        .iter()
        .map(|e| (format!("type {}", e.nine_type), (e.p * 100.0).round().clamp(0.0, 100.0) as u8))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    render_score_bars("Nine-type (%)", &rows, width)
}

/// Vertical column chart of counts, one column per label.
pub fn render_column_chart(title: &str, counts: &[(String, usize)], height: usize) -> String {
    let height = height.max(3);
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let col_width = counts.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(1).max(1);

    let mut grid = vec![vec![' '; counts.len() * (col_width + 1)]; height];
    for (i, (_, count)) in counts.iter().enumerate() {
        let filled = if max == 0 {
            0
        } else {
            map_x(*count as f64, max as f64, height)
        };
        let x = i * (col_width + 1) + col_width / 2;
        for row in 0..filled {
            grid[height - 1 - row][x] = '#';
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{title} (max={max})\n"));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    let labels: Vec<String> = counts.iter().map(|(l, _)| format!("{l:^col_width$}")).collect();
    out.push_str(labels.join(" ").trim_end());
    out.push('\n');
    out
}

/// Scale `v` in `[0, max]` onto `0..=cells`.
fn map_x(v: f64, max: f64, cells: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    let u = (v / max).clamp(0.0, 1.0);
    (u * cells as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bars_fill_proportionally() {
        let out = render_score_bars("T", &[("a".to_string(), 50), ("bb".to_string(), 100)], 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], "a  #####.....  50");
        assert_eq!(lines[2], "bb ########## 100");
    }

    #[test]
    fn axis_bars_mark_the_boundary_band() {
        let axes = PerAxis { ei: 50, sn: 0, tf: 100, jp: 80 };
        let out = render_axis_bars(&axes, 20);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("I "));
        assert!(lines[1].ends_with("E  50"));
        assert!(lines[2].starts_with("S o"));
        assert_eq!(lines[1].matches('|').count(), 2);
    }

    #[test]
    fn column_chart_is_deterministic() {
        let counts = vec![("1".to_string(), 2), ("2".to_string(), 4), ("3".to_string(), 0)];
        let out = render_column_chart("C", &counts, 4);
        let expected = "C (max=4)\n  #\n  #\n# #\n# #\n1 2 3\n";
        assert_eq!(out, expected);
    }
}
