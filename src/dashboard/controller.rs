use std::time::Duration;

use tokio::sync::mpsc;

use crate::dashboard::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::dashboard::generation::{Generation, GenerationCounter};
use crate::domain::record::TransactionRecord;
use crate::engine::query::StatusSelection;
use crate::engine::summary::StatusSummary;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PageWindow, Paginated, paginate};
use crate::repository::TransactionReader;
use crate::repository::errors::RepositoryError;
use crate::session::SessionContext;

#[derive(Clone, Copy, Debug)]
pub struct ControllerSettings {
    pub page_size: usize,
    pub quiet_period: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_ITEMS_PER_PAGE,
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// Snapshot of what one fetch cycle asks for.
#[derive(Clone, Debug)]
pub struct RefreshTicket<R: TransactionRecord> {
    pub generation: Generation,
    pub criteria: R::Criteria,
    pub status: Option<R::Status>,
}

/// Result of a fetch cycle after soft failures were converted to empty data.
#[derive(Clone, Debug)]
pub enum FetchOutcome<R: TransactionRecord> {
    Loaded {
        summary: StatusSummary<R::Status>,
        visible: Vec<R>,
    },
    /// The backend rejected the session.
    Unauthorized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// A newer cycle was issued or the page was torn down.
    Discarded,
    SessionExpired,
}

/// Fetches summary and rows for one view.
///
/// Fetch failures are logged and replaced by empty data; only authentication
/// failures are reported to the caller.
pub async fn load_view<R, D>(
    reader: &D,
    status: Option<R::Status>,
    criteria: &R::Criteria,
) -> FetchOutcome<R>
where
    R: TransactionRecord,
    D: TransactionReader<R>,
{
    let (summary, visible) = tokio::join!(
        reader.fetch_status_summary(criteria),
        reader.fetch_transactions(status, criteria)
    );

    if matches!(&summary, Err(RepositoryError::Unauthorized))
        || matches!(&visible, Err(RepositoryError::Unauthorized))
    {
        return FetchOutcome::Unauthorized;
    }

    let summary = summary.unwrap_or_else(|err| {
        log::error!("Failed to fetch {} stats: {err}", R::TITLE);
        StatusSummary::empty()
    });
    let visible = visible.unwrap_or_else(|err| {
        log::error!("Failed to fetch {} transactions: {err}", R::TITLE);
        Vec::new()
    });

    if let Some(status) = status {
        if summary.get(status) != visible.len() {
            log::warn!(
                "{} {status} count {} disagrees with {} fetched rows",
                R::TITLE,
                summary.get(status),
                visible.len()
            );
        }
    }

    FetchOutcome::Loaded { summary, visible }
}

/// Single owner of a dashboard's committed filters, selection, page and data.
pub struct DashboardController<R: TransactionRecord, D> {
    reader: D,
    session: SessionContext,
    debouncer: Debouncer<R::Criteria>,
    commits: mpsc::UnboundedReceiver<R::Criteria>,
    criteria: R::Criteria,
    selection: StatusSelection<R::Status>,
    window: PageWindow,
    generations: GenerationCounter,
    summary: StatusSummary<R::Status>,
    visible: Vec<R>,
    phase: LoadPhase,
}

impl<R, D> DashboardController<R, D>
where
    R: TransactionRecord,
    D: TransactionReader<R>,
{
    pub fn new(reader: D, session: SessionContext, settings: ControllerSettings) -> Self {
        let (debouncer, commits) = Debouncer::new(settings.quiet_period);
        Self {
            reader,
            session,
            debouncer,
            commits,
            criteria: R::Criteria::default(),
            selection: StatusSelection::all(),
            window: PageWindow::new(settings.page_size),
            generations: GenerationCounter::new(),
            summary: StatusSummary::empty(),
            visible: Vec::new(),
            phase: LoadPhase::Loading,
        }
    }

    /// Records in-progress filter input; it is committed after the quiet period.
    pub fn input_filters(&mut self, raw: R::Criteria) {
        self.debouncer.push(raw);
    }

    /// Waits for the next debounced commit and starts its fetch cycle.
    ///
    /// Returns `None` once the controller is unmounted.
    pub async fn next_commit(&mut self) -> Option<RefreshTicket<R>> {
        if self.generations.is_retired() {
            return None;
        }
        let criteria = self.commits.recv().await?;
        Some(self.commit_filters(criteria))
    }

    /// Commits filters immediately, bypassing the debounce.
    pub fn commit_filters(&mut self, criteria: R::Criteria) -> RefreshTicket<R> {
        self.criteria = criteria;
        self.begin_refresh()
    }

    /// Toggles a status card; clicking the selected card clears the selection.
    pub fn select_status(&mut self, status: Option<R::Status>) -> RefreshTicket<R> {
        self.selection.toggle(status);
        self.begin_refresh()
    }

    /// Clears every filter and the status selection.
    pub fn reset(&mut self) -> RefreshTicket<R> {
        self.debouncer.cancel();
        self.criteria = R::Criteria::default();
        self.selection.clear();
        self.begin_refresh()
    }

    /// Issues a new generation for the current filters and selection.
    pub fn begin_refresh(&mut self) -> RefreshTicket<R> {
        self.phase = LoadPhase::Loading;
        self.window.reset(0);
        RefreshTicket {
            generation: self.generations.issue(),
            criteria: self.criteria.clone(),
            status: self.selection.get(),
        }
    }

    /// Runs the fetch cycle described by `ticket` without touching state.
    pub async fn fetch(&self, ticket: &RefreshTicket<R>) -> FetchOutcome<R> {
        load_view(&self.reader, ticket.status, &ticket.criteria).await
    }

    /// Applies a fetch result if its generation is still current.
    pub fn apply(&mut self, generation: Generation, outcome: FetchOutcome<R>) -> ApplyResult {
        if !self.generations.is_current(generation) {
            log::debug!(
                "Discarding stale {} results of generation {}",
                R::TITLE,
                generation.get()
            );
            return ApplyResult::Discarded;
        }

        match outcome {
            FetchOutcome::Loaded { summary, visible } => {
                self.window.reset(visible.len());
                self.summary = summary;
                self.visible = visible;
                self.phase = LoadPhase::Ready;
                ApplyResult::Applied
            }
            FetchOutcome::Unauthorized => {
                self.session.invalidate();
                self.summary = StatusSummary::empty();
                self.visible.clear();
                self.window.reset(0);
                self.phase = LoadPhase::Ready;
                ApplyResult::SessionExpired
            }
        }
    }

    /// Begins, fetches and applies a cycle in one go.
    pub async fn refresh(&mut self) -> ApplyResult {
        let ticket = self.begin_refresh();
        let outcome = self.fetch(&ticket).await;
        self.apply(ticket.generation, outcome)
    }

    /// Tears the page down: pending commits and in-flight cycles become no-ops.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.generations.retire();
        self.commits.close();
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.window.go_to(page)
    }

    pub fn next_page(&mut self) -> usize {
        self.window.next()
    }

    pub fn previous_page(&mut self) -> usize {
        self.window.previous()
    }

    /// Rows of the current page.
    pub fn page(&self) -> Paginated<R> {
        paginate(
            &self.visible,
            self.window.page_index(),
            self.window.page_size(),
        )
    }

    pub fn summary(&self) -> &StatusSummary<R::Status> {
        &self.summary
    }

    pub fn visible(&self) -> &[R] {
        &self.visible
    }

    pub fn criteria(&self) -> &R::Criteria {
        &self.criteria
    }

    pub fn selection(&self) -> Option<R::Status> {
        self.selection.get()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
