//! Actuals against both forecast producers.

use super::forecast::future_of;
use crate::dashboard::{notice, seasonal_rows, trend_rows};
use crate::state::AppState;
use crate::widgets::{money, month_x, LineChart, Series, Table};
use insight_facade::{Month, TrendForecastRow};

pub fn render_comparison(state: &AppState) -> String {
    let monthly = state.monthly();
    let Some(last_observed) = monthly.last().map(|m| m.month) else {
        return notice("There is no sales history to compare against.");
    };

    let mut body = String::new();
    let mut months: Vec<Month> = monthly.iter().map(|m| m.month).collect();
    let actual = monthly.iter().map(|m| (month_x(m.month), m.revenue)).collect();
    let mut chart = LineChart::new("Actual revenue vs. forecasts")
        .series(Series::line("Actual", "#2563eb", actual));

    let mut trend_table = Table::new(&["Month", "Month index", "Forecast revenue"])
        .caption("Trend forecast (linear)");
    match trend_rows(&state.reports().trend) {
        Ok(rows) if !counted_over(rows, monthly.len()) => {
            let counted = rows.first().map_or(0, |r| r.month_index);
            body.push_str(&notice(&format!(
                "The saved trend forecast was computed over {counted} month(s) of sales, but {} are loaded now. Run `insight analyze` to refresh it.",
                monthly.len()
            )));
        }
        Ok(rows) => {
            let mut points = Vec::with_capacity(rows.len());
            for row in rows {
                let month = row.month_for(last_observed, monthly.len());
                points.push((month_x(month), row.forecast_revenue));
                months.push(month);
                trend_table.push_row(vec![
                    month.to_string(),
                    row.month_index.to_string(),
                    money(row.forecast_revenue),
                ]);
            }
            chart = chart.series(Series::line("Trend forecast", "#dc2626", points).dashed());
        }
        Err(message) => body.push_str(&notice(&message)),
    }

    let mut seasonal_table = Table::new(&["Month", "Forecast", "Lower bound", "Upper bound"])
        .caption("Seasonal forecast");
    match seasonal_rows(&state.reports().seasonal) {
        Ok(rows) => {
            let future = future_of(rows, last_observed);
            let points = future.iter().map(|r| (month_x(r.month), r.point_estimate)).collect();
            for row in &future {
                months.push(row.month);
                seasonal_table.push_row(vec![
                    row.month.to_string(),
                    money(row.point_estimate),
                    money(row.lower_bound),
                    money(row.upper_bound),
                ]);
            }
            chart = chart.series(Series::line("Seasonal forecast", "#d97706", points).dashed());
        }
        Err(message) => body.push_str(&notice(&message)),
    }

    months.sort();
    months.dedup();
    body.push_str(&chart.month_labels(months).render());

    if !trend_table.is_empty() {
        body.push_str(&trend_table.render());
    }
    if !seasonal_table.is_empty() {
        body.push_str(&seasonal_table.render());
    }
    body
}

/// Trend rows index months from the start of the history they were fit on,
/// so they only place correctly against a history of the same length.
fn counted_over(rows: &[TrendForecastRow], history_len: usize) -> bool {
    rows.first().map_or(true, |r| r.month_index == history_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(indices: std::ops::Range<usize>) -> Vec<TrendForecastRow> {
        indices
            .map(|month_index| TrendForecastRow {
                month_index,
                forecast_revenue: 100.0,
            })
            .collect()
    }

    #[test]
    fn test_trend_must_follow_loaded_history() {
        assert!(counted_over(&trend(3..6), 3));
        assert!(!counted_over(&trend(30..33), 3));
        assert!(!counted_over(&trend(2..5), 3));
        assert!(counted_over(&[], 3));
    }
}
