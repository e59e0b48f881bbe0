//! SVG line charts for monthly series.

use super::escape;
use insight_facade::Month;

const WIDTH: f64 = 860.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 40.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 8;

/// X coordinate of a month; consecutive months are one unit apart.
pub fn month_x(month: Month) -> f64 {
    month.ordinal() as f64
}

/// One named line.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub points: Vec<(f64, f64)>,
    pub dashed: bool,
}

impl Series {
    pub fn line(name: impl Into<String>, color: &'static str, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            color,
            points,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Shaded area between two lines, e.g. an uncertainty interval.
#[derive(Debug, Clone)]
pub struct Band {
    pub name: String,
    pub color: &'static str,
    pub lower: Vec<(f64, f64)>,
    pub upper: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn px(&self, x: f64) -> f64 {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + (x - self.x_min) / (self.x_max - self.x_min) * plot_w
    }

    fn py(&self, y: f64) -> f64 {
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (1.0 - (y - self.y_min) / (self.y_max - self.y_min)) * plot_h
    }
}

/// Line chart with optional bands, rendered as inline SVG.
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    series: Vec<Series>,
    bands: Vec<Band>,
    x_labels: Vec<(f64, String)>,
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            bands: Vec::new(),
            x_labels: Vec::new(),
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    /// Label months on the x axis; thinned out when there are many.
    pub fn month_labels(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.x_labels = months
            .into_iter()
            .map(|m| (month_x(m), m.to_string()))
            .collect();
        self
    }

    fn bounds(&self) -> Option<Bounds> {
        let points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .chain(self.bands.iter().flat_map(|b| b.lower.iter().chain(b.upper.iter())))
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut bounds: Option<Bounds> = None;
        for &(x, y) in points {
            bounds = Some(match bounds {
                None => Bounds { x_min: x, x_max: x, y_min: y, y_max: y },
                Some(b) => Bounds {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            });
        }

        bounds.map(|mut b| {
            if b.x_max == b.x_min {
                b.x_min -= 1.0;
                b.x_max += 1.0;
            }
            let pad = if b.y_max == b.y_min {
                b.y_max.abs().max(1.0) * 0.1
            } else {
                (b.y_max - b.y_min) * 0.05
            };
            b.y_min -= pad;
            b.y_max += pad;
            b
        })
    }

    pub fn render(&self) -> String {
        let title = escape(&self.title);
        let Some(bounds) = self.bounds() else {
            return format!(
                "<div class=\"chart\"><h3>{title}</h3><p class=\"empty\">No data to plot.</p></div>"
            );
        };

        let mut svg = format!(
            "<div class=\"chart\"><h3>{title}</h3><svg viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
             role=\"img\" aria-label=\"{title}\" xmlns=\"http://www.w3.org/2000/svg\">"
        );
        svg.push_str(&self.render_axes(&bounds));

        for band in &self.bands {
            let outline: Vec<(f64, f64)> = band
                .upper
                .iter()
                .chain(band.lower.iter().rev())
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            if outline.len() < 3 {
                continue;
            }
            svg.push_str(&format!(
                "<polygon fill=\"{}\" fill-opacity=\"0.18\" stroke=\"none\" points=\"{}\"/>",
                band.color,
                point_list(&bounds, &outline)
            ));
        }

        for series in &self.series {
            let points: Vec<(f64, f64)> = series
                .points
                .iter()
                .copied()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect();
            match points.as_slice() {
                [] => {}
                [(x, y)] => svg.push_str(&format!(
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"4\" fill=\"{}\"/>",
                    bounds.px(*x),
                    bounds.py(*y),
                    series.color
                )),
                _ => svg.push_str(&format!(
                    "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\"{} points=\"{}\"/>",
                    series.color,
                    if series.dashed { " stroke-dasharray=\"6 4\"" } else { "" },
                    point_list(&bounds, &points)
                )),
            }
        }

        svg.push_str(&self.render_legend());
        svg.push_str("</svg></div>");
        svg
    }

    fn render_axes(&self, bounds: &Bounds) -> String {
        let mut out = String::new();
        let left = MARGIN_LEFT;
        let right = WIDTH - MARGIN_RIGHT;
        let bottom = HEIGHT - MARGIN_BOTTOM;

        for i in 0..Y_TICKS {
            let value = bounds.y_min + (bounds.y_max - bounds.y_min) * i as f64 / (Y_TICKS - 1) as f64;
            let y = bounds.py(value);
            out.push_str(&format!(
                "<line x1=\"{left}\" y1=\"{y:.1}\" x2=\"{right}\" y2=\"{y:.1}\" stroke=\"#e5e7eb\"/>\
                 <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"#6b7280\">{:.0}</text>",
                left - 6.0,
                y + 4.0,
                value
            ));
        }

        let step = self.x_labels.len().div_ceil(MAX_X_LABELS).max(1);
        for (x, label) in self.x_labels.iter().step_by(step) {
            if *x < bounds.x_min || *x > bounds.x_max {
                continue;
            }
            out.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\" fill=\"#6b7280\">{}</text>",
                bounds.px(*x),
                bottom + 18.0,
                escape(label)
            ));
        }

        out.push_str(&format!(
            "<line x1=\"{left}\" y1=\"{bottom}\" x2=\"{right}\" y2=\"{bottom}\" stroke=\"#9ca3af\"/>"
        ));
        out
    }

    fn render_legend(&self) -> String {
        let entries = self
            .series
            .iter()
            .map(|s| (s.name.as_str(), s.color))
            .chain(self.bands.iter().map(|b| (b.name.as_str(), b.color)));

        let mut out = String::new();
        let mut x = MARGIN_LEFT;
        for (name, color) in entries {
            out.push_str(&format!(
                "<rect x=\"{x:.1}\" y=\"10\" width=\"12\" height=\"12\" fill=\"{color}\"/>\
                 <text x=\"{:.1}\" y=\"20\" font-size=\"12\" fill=\"#374151\">{}</text>",
                x + 16.0,
                escape(name)
            ));
            x += 28.0 + 7.0 * name.chars().count() as f64;
        }
        out
    }
}

fn point_list(bounds: &Bounds, points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|&(x, y)| format!("{:.1},{:.1}", bounds.px(x), bounds.py(y)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months(n: i64) -> Vec<Month> {
        let start = Month::new(2023, 1).unwrap();
        (0..n).map(|i| start.offset(i)).collect()
    }

    #[test]
    fn test_empty_chart_has_message() {
        let html = LineChart::new("Revenue").render();
        assert!(html.contains("No data to plot"));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn test_series_and_band_rendered() {
        let m = months(4);
        let actual: Vec<(f64, f64)> = m.iter().map(|&m| (month_x(m), 100.0)).collect();
        let band = Band {
            name: "80% interval".to_string(),
            color: "#f59e0b",
            lower: actual.iter().map(|&(x, y)| (x, y - 10.0)).collect(),
            upper: actual.iter().map(|&(x, y)| (x, y + 10.0)).collect(),
        };

        let html = LineChart::new("Forecast")
            .series(Series::line("Actual", "#2563eb", actual.clone()))
            .series(Series::line("Forecast", "#f59e0b", actual).dashed())
            .band(band)
            .month_labels(m)
            .render();

        assert_eq!(html.matches("<polyline").count(), 2);
        assert_eq!(html.matches("<polygon").count(), 1);
        assert!(html.contains("stroke-dasharray"));
        assert!(html.contains("2023-01"));
        assert!(html.contains("80% interval"));
    }

    #[test]
    fn test_single_point_and_non_finite() {
        let x = month_x(Month::new(2024, 2).unwrap());
        let html = LineChart::new("One month")
            .series(Series::line("Margin", "#16a34a", vec![(x, 5.0), (x + 1.0, f64::NAN)]))
            .render();

        assert!(html.contains("<circle"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn test_labels_are_thinned() {
        let m = months(36);
        let points: Vec<(f64, f64)> = m.iter().map(|&m| (month_x(m), 1.0)).collect();
        let html = LineChart::new("Long")
            .series(Series::line("Actual", "#2563eb", points))
            .month_labels(m)
            .render();

        let labels = html.matches("text-anchor=\"middle\"").count();
        assert!(labels <= MAX_X_LABELS);
        assert!(labels >= 2);
    }
}
