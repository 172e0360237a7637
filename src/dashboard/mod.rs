//! Page-level state for a transaction dashboard.
//!
//! Filter input is debounced into commits, each commit or status selection
//! starts a fetch cycle stamped with a generation, and only the latest cycle's
//! results are applied.

pub mod controller;
pub mod debounce;
pub mod generation;

pub use controller::{
    ApplyResult, ControllerSettings, DashboardController, FetchOutcome, LoadPhase, RefreshTicket,
    load_view,
};
pub use debounce::{DEFAULT_QUIET_PERIOD, DebounceState, Debouncer};
pub use generation::{Generation, GenerationCounter};
