//! View bodies, one module per tab.

mod comparison;
mod forecast;
mod overview;

pub use comparison::render_comparison;
pub use forecast::render_forecast;
pub use overview::render_overview;
