//! Seasonal forecast view with the horizon selector.

use crate::dashboard::{notice, seasonal_rows};
use crate::state::AppState;
use crate::widgets::{money, month_x, Band, LineChart, Series, Table};
use insight_facade::{Month, SeasonalForecastRow, HORIZON_CHOICES};

pub fn render_forecast(state: &AppState, horizon: usize) -> String {
    let monthly = state.monthly();
    let mut body = horizon_selector(horizon);
    let Some(last_observed) = monthly.last().map(|m| m.month) else {
        body.push_str(&notice(
            "There is no sales history to place a forecast against. Add sales records and run `insight analyze`.",
        ));
        return body;
    };

    let rows = match seasonal_rows(&state.reports().seasonal) {
        Ok(rows) => rows,
        Err(message) => {
            body.push_str(&notice(&message));
            let actual = monthly.iter().map(|m| (month_x(m.month), m.revenue)).collect();
            body.push_str(
                &LineChart::new("Monthly revenue")
                    .series(Series::line("Actual", "#2563eb", actual))
                    .month_labels(monthly.iter().map(|m| m.month))
                    .render(),
            );
            return body;
        }
    };

    let available = future_of(rows, last_observed);
    let future: Vec<SeasonalForecastRow> = available.iter().take(horizon).copied().collect();
    if future.is_empty() {
        body.push_str(&notice(
            "The saved seasonal forecast has no months after the latest sales data. Run `insight analyze` to refresh it.",
        ));
    } else if future.len() < horizon {
        body.push_str(&notice(&format!(
            "Only {} forecast month(s) were saved. Set forecast.seasonal_horizon = {} and run `insight analyze` for the full view.",
            future.len(),
            horizon
        )));
    }

    let level = state.config().forecast.interval_level;
    let actual = monthly.iter().map(|m| (month_x(m.month), m.revenue)).collect();
    let fitted = rows
        .iter()
        .filter(|r| r.month <= last_observed)
        .map(|r| (month_x(r.month), r.point_estimate))
        .collect();
    let point = future.iter().map(|r| (month_x(r.month), r.point_estimate)).collect();
    let band = Band {
        name: format!("{:.0}% interval", level * 100.0),
        color: "#f59e0b",
        lower: future.iter().map(|r| (month_x(r.month), r.lower_bound)).collect(),
        upper: future.iter().map(|r| (month_x(r.month), r.upper_bound)).collect(),
    };

    let months: Vec<Month> = monthly
        .iter()
        .map(|m| m.month)
        .chain(future.iter().map(|r| r.month))
        .collect();
    body.push_str(
        &LineChart::new(format!("Revenue forecast, next {horizon} months"))
            .series(Series::line("Actual", "#2563eb", actual))
            .series(Series::line("Model fit", "#9ca3af", fitted).dashed())
            .series(Series::line("Forecast", "#d97706", point).dashed())
            .band(band)
            .month_labels(months)
            .render(),
    );

    let mut table = Table::new(&["Month", "Forecast", "Lower bound", "Upper bound"])
        .caption("Seasonal forecast");
    for row in &future {
        table.push_row(vec![
            row.month.to_string(),
            money(row.point_estimate),
            money(row.lower_bound),
            money(row.upper_bound),
        ]);
    }
    if !table.is_empty() {
        body.push_str(&table.render());
    }
    body
}

/// Rows after the last observed month.
pub(crate) fn future_of(rows: &[SeasonalForecastRow], last_observed: Month) -> Vec<SeasonalForecastRow> {
    rows.iter()
        .filter(|r| r.month > last_observed)
        .copied()
        .collect()
}

fn horizon_selector(selected: usize) -> String {
    let options: String = HORIZON_CHOICES
        .iter()
        .map(|h| {
            let attr = if *h == selected { " selected" } else { "" };
            format!("<option value=\"{h}\"{attr}>{h} months</option>")
        })
        .collect();
    format!(
        "<form class=\"controls\" method=\"get\" action=\"/forecast\">\
         <label>Forecast horizon <select name=\"horizon\">{options}</select></label> \
         <button type=\"submit\">Show</button></form>"
    )
}
