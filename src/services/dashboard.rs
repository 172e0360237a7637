use serde::Serialize;

use crate::dashboard::{FetchOutcome, load_view};
use crate::domain::record::{TransactionRecord, TransactionStatus};
use crate::dto::dashboard::{ChartSeries, DashboardPageData, StatusCard};
use crate::engine::query::StatusSelection;
use crate::export::export_csv;
use crate::forms::filters::FilterQuery;
use crate::pagination::paginate;
use crate::repository::TransactionReader;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

fn query_string<Q: Serialize>(query: &Q) -> ServiceResult<String> {
    serde_html_form::to_string(query)
        .map_err(|e| ServiceError::Internal(format!("Failed to build query string: {e}")))
}

fn link(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Loads summary cards, chart series and the requested page of a dashboard.
///
/// Fetch failures render as an empty dashboard; an expired session is
/// reported as [`ServiceError::Unauthorized`].
pub async fn load_dashboard<Q, D>(
    reader: &D,
    query: Q,
    page_size: usize,
) -> ServiceResult<DashboardPageData<Q>>
where
    Q: FilterQuery,
    D: TransactionReader<Q::Record>,
{
    let input = query.parse();

    let (summary, visible) = match load_view(reader, input.status, &input.criteria).await {
        FetchOutcome::Loaded { summary, visible } => (summary, visible),
        FetchOutcome::Unauthorized => return Err(ServiceError::Unauthorized),
    };

    let endpoint = <Q::Record as TransactionRecord>::ENDPOINT;
    let path = format!("/{endpoint}");
    let selection = StatusSelection::of(input.status);

    // Drop unusable status values so links do not carry them along.
    let mut filters = query.without_page();
    filters.set_status(input.status.map(TransactionStatus::as_str));

    let mut cards = Vec::new();
    let mut chart = ChartSeries::default();
    for (status, count) in summary.iter() {
        let next = selection.toggled(Some(status)).get();
        let toggled = filters.with_status(next.map(TransactionStatus::as_str));
        cards.push(StatusCard {
            status: status.as_str(),
            label: status.label(),
            color: status.color(),
            count,
            selected: selection.is_selected(Some(status)),
            toggle_url: link(&path, &query_string(&toggled)?),
        });
        chart.labels.push(status.label());
        chart.values.push(count);
        chart.colors.push(status.color());
    }

    let page_query = query_string(&filters)?;
    let reset_url = link(&path, &query_string(&filters.with_status(None))?);
    let export_url = link(&format!("{path}/export"), &page_query);

    Ok(DashboardPageData {
        title: <Q::Record as TransactionRecord>::TITLE,
        endpoint,
        cards,
        total: summary.total(),
        chart,
        selected_status: input.status.map(TransactionStatus::as_str),
        transactions: paginate(&visible, input.page, page_size),
        filters,
        errors: input.errors,
        page_query,
        reset_url,
        export_url,
    })
}

/// Serializes the rows visible under `query` as CSV; `None` when there are none.
pub async fn export_transactions<Q, D>(reader: &D, query: &Q) -> ServiceResult<Option<Vec<u8>>>
where
    Q: FilterQuery,
    D: TransactionReader<Q::Record>,
{
    let input = query.parse();
    let records = match reader.fetch_transactions(input.status, &input.criteria).await {
        Ok(records) => records,
        Err(RepositoryError::Unauthorized) => return Err(ServiceError::Unauthorized),
        Err(err) => {
            log::error!(
                "Failed to fetch {} transactions for export: {err}",
                <Q::Record as TransactionRecord>::TITLE
            );
            Vec::new()
        }
    };

    export_csv(&records).map_err(|err| {
        log::error!("Failed to export transactions: {err}");
        ServiceError::from(err)
    })
}
