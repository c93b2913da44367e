//! Radar (polar) chart geometry for intelligence scores.
//!
//! [`RadarChart::geometry`] does all of the numeric work and returns plain
//! coordinates; [`RadarChart::to_svg`] serializes them. Keeping the two apart
//! lets tests assert on points instead of parsing SVG.
//!
//! Axes start at the top (−90°) and proceed clockwise:
//! `angle[i] = -π/2 + i·2π/N`. Scores are clamped to `[5, 100]` so a zero
//! still produces a visible vertex.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::utils::format::escape_html;

/// Lowest rendered score.
pub const MIN_SCORE: f64 = 5.0;
/// Highest rendered score.
pub const MAX_SCORE: f64 = 100.0;
/// Grid rings as fractions of the usable radius.
pub const GRID_LEVELS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];
/// Space reserved around the chart for axis labels.
const LABEL_MARGIN: f64 = 30.0;
/// Space reserved when no labels are drawn.
const PLAIN_MARGIN: f64 = 4.0;
/// Distance past the outer ring where labels sit.
const LABEL_OFFSET: f64 = 13.0;
/// `|cos(angle)|` below this counts as a vertical axis.
const VERTICAL_COS: f64 = 0.1;
const MARKER_RADIUS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// SVG `text-anchor` for an axis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    /// Pick the anchor from the cosine of the axis angle: near-vertical
    /// axes center, the left half ends, the right half starts.
    pub fn for_angle(angle: f64) -> Self {
        let cos = angle.cos();
        if cos.abs() < VERTICAL_COS {
            Self::Middle
        } else if cos < 0.0 {
            Self::End
        } else {
            Self::Start
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: Point,
    pub anchor: Anchor,
    pub text: String,
}

/// Computed chart coordinates.
///
/// Every ring and the data polygon are closed: the last point repeats the
/// first, so an N-axis chart yields N+1 points per polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub center: Point,
    pub radius: f64,
    pub angles: Vec<f64>,
    pub rings: Vec<Vec<Point>>,
    pub spokes: Vec<Point>,
    pub polygon: Vec<Point>,
    pub markers: Vec<Point>,
    pub labels: Vec<Label>,
}

/// Input to the radar engine.
#[derive(Debug, Clone)]
pub struct RadarChart<'a> {
    pub size: f64,
    pub values: &'a [f64],
    pub labels: Option<&'a [String]>,
    pub color: &'a str,
}

impl<'a> RadarChart<'a> {
    pub fn new(size: f64, values: &'a [f64], color: &'a str) -> Self {
        Self {
            size,
            values,
            labels: None,
            color,
        }
    }

    pub fn with_labels(mut self, labels: &'a [String]) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn geometry(&self) -> RadarGeometry {
        let n = self.values.len();
        let half = self.size / 2.0;
        let center = Point { x: half, y: half };
        let margin = if self.labels.is_some() {
            LABEL_MARGIN
        } else {
            PLAIN_MARGIN
        };
        let radius = (half - margin).max(0.0);

        let angles: Vec<f64> = (0..n)
            .map(|i| -FRAC_PI_2 + i as f64 * 2.0 * PI / n as f64)
            .collect();

        let rings = GRID_LEVELS
            .iter()
            .map(|level| close(polar_points(center, &angles, |_| radius * level)))
            .collect();

        let spokes = polar_points(center, &angles, |_| radius);

        let markers = polar_points(center, &angles, |i| {
            radius * clamp_score(self.values[i]) / MAX_SCORE
        });
        let polygon = close(markers.clone());

        let labels = match self.labels {
            Some(texts) => angles
                .iter()
                .enumerate()
                .map(|(i, &angle)| Label {
                    at: along(center, angle, radius + LABEL_OFFSET),
                    anchor: Anchor::for_angle(angle),
                    text: texts.get(i).cloned().unwrap_or_default(),
                })
                .collect(),
            None => Vec::new(),
        };

        RadarGeometry {
            center,
            radius,
            angles,
            rings,
            spokes,
            polygon,
            markers,
            labels,
        }
    }

    /// Serialize the chart as an inline SVG element.
    ///
    /// With no values only the center dot is drawn.
    pub fn to_svg(&self) -> String {
        let g = self.geometry();
        let color = escape_html(self.color);
        let mut svg = format!(
            r#"<svg class="radar" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = fmt(self.size)
        );

        if !g.angles.is_empty() {
            for ring in &g.rings {
                svg.push_str(&format!(
                    r#"<polygon class="radar-grid" points="{}" fill="none"/>"#,
                    points_attr(ring)
                ));
            }
            for spoke in &g.spokes {
                svg.push_str(&format!(
                    r#"<line class="radar-spoke" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
                    fmt(g.center.x),
                    fmt(g.center.y),
                    fmt(spoke.x),
                    fmt(spoke.y)
                ));
            }
            svg.push_str(&format!(
                r#"<polygon class="radar-data" points="{}" fill="{color}" fill-opacity="0.25" stroke="{color}" stroke-width="2"/>"#,
                points_attr(&g.polygon)
            ));
            for m in &g.markers {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
                    fmt(m.x),
                    fmt(m.y),
                    fmt(MARKER_RADIUS)
                ));
            }
            for label in &g.labels {
                svg.push_str(&format!(
                    r#"<text class="radar-label" x="{}" y="{}" text-anchor="{}">{}</text>"#,
                    fmt(label.at.x),
                    fmt(label.at.y + 4.0),
                    label.anchor.as_str(),
                    escape_html(&label.text)
                ));
            }
        }

        svg.push_str(&format!(
            r#"<circle class="radar-center" cx="{}" cy="{}" r="2" fill="{color}"/>"#,
            fmt(g.center.x),
            fmt(g.center.y)
        ));
        svg.push_str("</svg>");
        svg
    }
}

/// Clamp a score into the rendered range. NaN renders as the floor.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        MIN_SCORE
    } else {
        value.clamp(MIN_SCORE, MAX_SCORE)
    }
}

fn along(center: Point, angle: f64, r: f64) -> Point {
    Point {
        x: center.x + r * angle.cos(),
        y: center.y + r * angle.sin(),
    }
}

fn polar_points(center: Point, angles: &[f64], r: impl Fn(usize) -> f64) -> Vec<Point> {
    angles
        .iter()
        .enumerate()
        .map(|(i, &a)| along(center, a, r(i)))
        .collect()
}

fn close(mut points: Vec<Point>) -> Vec<Point> {
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One decimal place; keeps markup stable and small.
fn fmt(v: f64) -> String {
    let s = format!("{v:.1}");
    if s == "-0.0" { "0.0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_axis_points_up() {
        let values = [50.0, 50.0, 50.0, 50.0];
        let g = RadarChart::new(200.0, &values, "#fff").geometry();
        assert!(approx(g.angles[0], -FRAC_PI_2));
        assert!(approx(g.spokes[0].x, 100.0));
        assert!(g.spokes[0].y < 100.0);
    }

    #[test]
    fn axes_proceed_clockwise() {
        let values = [50.0, 50.0, 50.0, 50.0];
        let g = RadarChart::new(200.0, &values, "#fff").geometry();
        // Second axis of four sits at 0 rad, to the right of center.
        assert!(approx(g.angles[1], 0.0));
        assert!(g.spokes[1].x > 100.0);
    }

    #[test]
    fn radius_reserves_label_margin() {
        let values = [10.0, 20.0, 30.0];
        let labels = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let plain = RadarChart::new(200.0, &values, "#fff").geometry();
        let labeled = RadarChart::new(200.0, &values, "#fff")
            .with_labels(&labels)
            .geometry();
        assert!(approx(plain.radius, 96.0));
        assert!(approx(labeled.radius, 70.0));
        assert_eq!(labeled.labels.len(), 3);
        assert!(plain.labels.is_empty());
    }

    #[test]
    fn label_anchor_follows_cosine() {
        assert_eq!(Anchor::for_angle(-FRAC_PI_2), Anchor::Middle);
        assert_eq!(Anchor::for_angle(FRAC_PI_2), Anchor::Middle);
        assert_eq!(Anchor::for_angle(0.0), Anchor::Start);
        assert_eq!(Anchor::for_angle(PI), Anchor::End);
    }

    #[test]
    fn labels_sit_past_outer_ring() {
        let values = [80.0, 80.0, 80.0];
        let labels = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let g = RadarChart::new(200.0, &values, "#fff")
            .with_labels(&labels)
            .geometry();
        let top = g.labels[0].at;
        assert!(approx(g.center.y - top.y, g.radius + LABEL_OFFSET));
    }

    #[test]
    fn empty_chart_draws_center_only() {
        let svg = RadarChart::new(120.0, &[], "#0f0").to_svg();
        assert!(svg.contains("radar-center"));
        assert!(!svg.contains("radar-data"));
        assert!(!svg.contains("radar-grid"));
    }

    #[test]
    fn nan_scores_render_at_floor() {
        assert_eq!(clamp_score(f64::NAN), MIN_SCORE);
    }

    #[test]
    fn label_text_is_escaped() {
        let values = [50.0, 50.0, 50.0];
        let labels = vec!["<b>".to_string(), "ok".to_string(), "ok".to_string()];
        let svg = RadarChart::new(200.0, &values, "#fff")
            .with_labels(&labels)
            .to_svg();
        assert!(svg.contains("&lt;b&gt;"));
        assert!(!svg.contains("<b>"));
    }
}
