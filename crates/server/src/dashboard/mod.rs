//! HTML dashboard: page layout and the three views.

mod layout;
mod tabs;

pub use layout::page;
pub use tabs::{render_comparison, render_forecast, render_overview};

use insight_facade::{Persisted, SeasonalForecast, SeasonalForecastRow, TrendForecastRow};

/// Dashboard views, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Forecast,
    Comparison,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Forecast, Tab::Comparison]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Forecast => "Seasonal Forecast",
            Tab::Comparison => "Comparison",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Tab::Overview => "/",
            Tab::Forecast => "/forecast",
            Tab::Comparison => "/comparison",
        }
    }
}

const RUN_HINT: &str = "Run `insight analyze` to generate it.";

/// Seasonal rows to plot, or the reason there are none.
pub fn seasonal_rows(persisted: &Persisted<SeasonalForecast>) -> Result<&[SeasonalForecastRow], String> {
    match persisted {
        Persisted::Loaded(SeasonalForecast::Available { rows }) => Ok(rows.as_slice()),
        Persisted::Loaded(SeasonalForecast::Unavailable { reason }) => Err(format!(
            "The seasonal forecast is unavailable: {reason}. Enable the seasonal model and run `insight analyze` again."
        )),
        Persisted::Missing => Err(format!("No seasonal forecast has been saved yet. {RUN_HINT}")),
        Persisted::Invalid(e) => Err(format!(
            "The saved seasonal forecast could not be read ({e}). Run `insight analyze` to regenerate it."
        )),
    }
}

/// Trend rows to plot, or the reason there are none.
pub fn trend_rows(persisted: &Persisted<Vec<TrendForecastRow>>) -> Result<&[TrendForecastRow], String> {
    match persisted {
        Persisted::Loaded(rows) => Ok(rows.as_slice()),
        Persisted::Missing => Err(format!("No trend forecast has been saved yet. {RUN_HINT}")),
        Persisted::Invalid(e) => Err(format!(
            "The saved trend forecast could not be read ({e}). Run `insight analyze` to regenerate it."
        )),
    }
}

/// Inline message shown in place of a chart or table.
pub fn notice(message: &str) -> String {
    format!("<div class=\"notice\">{}</div>", crate::widgets::escape(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_paths_unique() {
        let paths: Vec<&str> = Tab::all().iter().map(Tab::path).collect();
        assert_eq!(paths, vec!["/", "/forecast", "/comparison"]);
    }

    #[test]
    fn test_seasonal_messages_point_to_analyze() {
        let cases = [
            Persisted::Missing,
            Persisted::Invalid("Schema mismatch".to_string()),
            Persisted::Loaded(SeasonalForecast::unavailable("disabled in configuration")),
        ];
        for case in &cases {
            let message = seasonal_rows(case).unwrap_err();
            assert!(message.contains("insight analyze"), "{message}");
        }
    }

    #[test]
    fn test_trend_loaded() {
        let persisted = Persisted::Loaded(vec![TrendForecastRow {
            month_index: 2,
            forecast_revenue: 10.0,
        }]);
        assert_eq!(trend_rows(&persisted).unwrap().len(), 1);
    }
}
