//! Overview view: headline cards, monthly revenue, products and segments.

use crate::dashboard::notice;
use crate::state::AppState;
use crate::widgets::{escape, money, month_x, percent, LineChart, Series, Table};
use insight_facade::breakdown::{overview_totals, product_revenue, segment_summary};
use insight_facade::{KpiSummary, MonthlyAggregate, Persisted};

const TOP_PRODUCTS: usize = 10;

pub fn render_overview(state: &AppState) -> String {
    let dataset = state.dataset();
    let monthly = state.monthly();
    let totals = overview_totals(&dataset.sales, &dataset.customers);

    let mut body = String::from("<div class=\"cards\">");
    body.push_str(&card("Total revenue", &money(totals.total_revenue)));
    body.push_str(&card("Total profit", &money(totals.total_profit)));
    body.push_str(&card("Average CLV", &money(totals.avg_clv)));
    body.push_str(&card("Churn rate", &percent(totals.churn_rate)));
    if let Some(last) = monthly.last() {
        body.push_str(&card(&format!("Revenue {}", last.month), &money(last.revenue)));
    }
    body.push_str("</div>");

    body.push_str(&saved_kpis(&state.reports().kpis));
    body.push_str(&revenue_chart(&monthly));

    let mut products = Table::new(&["Product", "Revenue"]).caption("Top products by revenue");
    for p in product_revenue(&dataset.sales).into_iter().take(TOP_PRODUCTS) {
        products.push_row(vec![p.product, money(p.revenue)]);
    }
    body.push_str(&products.render());

    let mut segments = Table::new(&["Segment", "Customers", "Average CLV", "Churn rate"])
        .caption("Customer segments");
    for s in segment_summary(&dataset.customers) {
        segments.push_row(vec![
            s.segment,
            s.customers.to_string(),
            money(s.avg_clv),
            percent(s.churn_rate),
        ]);
    }
    body.push_str(&segments.render());

    let mut months = Table::new(&["Month", "Revenue", "Profit", "Quantity", "Margin", "Growth"])
        .caption("Monthly performance");
    for m in &monthly {
        months.push_row(vec![
            m.month.to_string(),
            money(m.revenue),
            money(m.profit),
            m.quantity.to_string(),
            percent(m.profit_margin),
            percent(m.revenue_growth),
        ]);
    }
    body.push_str(&months.render());
    body
}

fn card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
        escape(label),
        escape(value)
    )
}

fn saved_kpis(kpis: &Persisted<KpiSummary>) -> String {
    match kpis {
        Persisted::Loaded(k) => {
            let mut table = Table::new(&["Customers", "Churn rate", "Average CLV", "Latest revenue", "Latest profit"])
                .caption("KPI summary from the last analysis run");
            table.push_row(vec![
                k.total_customers.to_string(),
                percent(k.churn_rate),
                money(k.avg_clv),
                money(k.latest_month_revenue),
                money(k.latest_month_profit),
            ]);
            table.render()
        }
        Persisted::Missing => notice("No KPI summary has been saved yet. Run `insight analyze` to generate it."),
        Persisted::Invalid(e) => notice(&format!(
            "The saved KPI summary could not be read ({e}). Run `insight analyze` to regenerate it."
        )),
    }
}

fn revenue_chart(monthly: &[MonthlyAggregate]) -> String {
    let revenue = monthly.iter().map(|m| (month_x(m.month), m.revenue)).collect();
    let profit = monthly.iter().map(|m| (month_x(m.month), m.profit)).collect();
    LineChart::new("Monthly revenue and profit")
        .series(Series::line("Revenue", "#2563eb", revenue))
        .series(Series::line("Profit", "#16a34a", profit))
        .month_labels(monthly.iter().map(|m| m.month))
        .render()
}
