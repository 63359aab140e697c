//! covid_trend
//!
//! Fetch historical COVID-19 counts from the disease.sh API, turn the
//! cumulative series into day-over-day deltas, and chart them. Pairs with the
//! `covid-trend` CLI and the `covid-trend-gui` viewer.
//!
//! ### Features
//! - Global or per-country history for the last N days
//! - Daily deltas for confirmed cases, recoveries, or deaths
//! - SVG/PNG line charts styled per category
//! - CSV/JSON export and quick summary statistics
//!
//! ### Example
//! ```no_run
//! use covid_trend::{Category, Client, ChartOptions, Query, graph, viz};
//!
//! let client = Client::new()?;
//! let deltas = graph::load(&client, &Query::default(), Category::Deaths)?;
//! if let Some(chart) = viz::chart(&deltas, Category::Deaths, ChartOptions::default()) {
//!     viz::render_to_file(&chart, "deaths.svg", 1000, 600)?;
//! }
//! println!("{:#?}", covid_trend::stats::summary(&deltas));
//! # Ok::<(), covid_trend::Error>(())
//! ```

pub mod api;
pub mod error;
pub mod graph;
pub mod models;
pub mod stats;
pub mod storage;
pub mod transform;
pub mod viz;

pub use api::{Client, HistoricalSource};
pub use error::{DataError, Error, Result};
pub use graph::{GraphState, LineGraph, Ticket};
pub use models::{Category, DeltaPoint, DeltaSeries, Query, RawSeries};
pub use viz::{Chart, ChartOptions};
