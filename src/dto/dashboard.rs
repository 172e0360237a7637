use serde::Serialize;

use crate::forms::FieldErrors;
use crate::forms::filters::FilterQuery;
use crate::pagination::Paginated;

/// One clickable status card.
#[derive(Debug, Serialize)]
pub struct StatusCard {
    pub status: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub selected: bool,
    /// Link applying the selection this card toggles to.
    pub toggle_url: String,
}

/// Data series of the status chart, in card order.
#[derive(Debug, Default, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<&'static str>,
    pub values: Vec<usize>,
    pub colors: Vec<&'static str>,
}

/// Data required to render a dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData<Q: FilterQuery> {
    pub title: &'static str,
    pub endpoint: &'static str,
    pub cards: Vec<StatusCard>,
    /// Transactions matching the filters, whatever their status.
    pub total: usize,
    pub chart: ChartSeries,
    pub selected_status: Option<&'static str>,
    pub transactions: Paginated<Q::Record>,
    /// Submitted filters echoed back to the form.
    pub filters: Q,
    pub errors: FieldErrors,
    /// Query string of the current view without the page number.
    pub page_query: String,
    pub reset_url: String,
    pub export_url: String,
}
