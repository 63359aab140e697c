//! The line graph component: which category is selected, what is on screen,
//! and which in-flight fetch is allowed to update it.
//!
//! Every mount / category change issues a [`Ticket`] carrying a generation
//! number. Only the completion of the latest ticket is applied; anything older
//! is dropped, so out-of-order responses never overwrite a newer selection.

use crate::api::HistoricalSource;
use crate::error::{Error, Result};
use crate::models::{Category, DeltaPoint, DeltaSeries, Query};
use crate::transform::delta_series;
use crate::viz::{self, Chart, ChartOptions};

/// Handle for one fetch; hand it back to [`LineGraph::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphState {
    /// Not mounted yet.
    Idle,
    Loading(Category),
    /// The last fetch failed or produced no points.
    NoData { category: Category, reason: String },
    Ready { category: Category, series: DeltaSeries },
}

#[derive(Debug, Clone)]
pub struct LineGraph {
    category: Category,
    generation: u64,
    state: GraphState,
}

impl LineGraph {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            generation: 0,
            state: GraphState::Idle,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, GraphState::Loading(_))
    }

    /// Start the first fetch for the current category.
    pub fn mount(&mut self) -> Ticket {
        self.issue()
    }

    /// Switch category. Returns `None` when nothing changes.
    pub fn select(&mut self, category: Category) -> Option<Ticket> {
        if category == self.category && self.state != GraphState::Idle {
            return None;
        }
        self.category = category;
        Some(self.issue())
    }

    /// Refetch the current category, e.g. after the query changed.
    pub fn refresh(&mut self) -> Ticket {
        self.issue()
    }

    fn issue(&mut self) -> Ticket {
        self.generation += 1;
        self.state = GraphState::Loading(self.category);
        Ticket {
            generation: self.generation,
            category: self.category,
        }
    }

    /// Apply the outcome of a fetch. Returns `false` if `ticket` was superseded.
    pub fn complete(&mut self, ticket: Ticket, result: Result<DeltaSeries>) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding stale {} response (generation {} < {})",
                ticket.category,
                ticket.generation,
                self.generation
            );
            return false;
        }

        let category = ticket.category;
        self.state = match result {
            Ok(series) if series.is_empty() => GraphState::NoData {
                category,
                reason: Error::EmptyData.to_string(),
            },
            Ok(series) => GraphState::Ready { category, series },
            Err(e) => {
                log::warn!("no {category} data: {e}");
                GraphState::NoData {
                    category,
                    reason: e.to_string(),
                }
            }
        };
        true
    }

    pub fn series(&self) -> Option<&[DeltaPoint]> {
        match &self.state {
            GraphState::Ready { series, .. } => Some(series.as_slice()),
            _ => None,
        }
    }

    /// Chart for the current data, or `None` while there is nothing to draw.
    pub fn chart(&self, options: ChartOptions) -> Option<Chart> {
        match &self.state {
            GraphState::Ready { category, series } => viz::chart(series, *category, options),
            _ => None,
        }
    }
}

/// Fetch, transform, and reject empty results.
pub fn load<S>(source: &S, query: &Query, category: Category) -> Result<DeltaSeries>
where
    S: HistoricalSource + ?Sized,
{
    let raw = source.fetch_historical(query)?;
    let series = delta_series(&raw, category)?;
    if series.is_empty() {
        return Err(Error::EmptyData);
    }
    Ok(series)
}
