pub mod api;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod listing_handler;
pub mod metadata;
pub mod output;
pub mod scheduler;
pub mod sheet_handler;
pub mod store;
pub mod team_handler;
pub mod utils;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================
pub use api::{router, ApiError};
pub use batch::{fetch_batch, FetchItem, FetchOutcome};
pub use client::{ScoresheetClient, DEFAULT_BASE_URL};
pub use config::RefreshConfig;
pub use error::{Result, ScrapeError};
pub use listing_handler::{extract_competition_id, parse_listing_html, Listing};
pub use metadata::{parse_gender, parse_listing_date, CompetitionId, CompetitionMeta, Gender};
pub use output::{print_sheet, write_sheet_csv};
pub use scheduler::{fast_refresh, full_refresh, RefreshScheduler};
pub use sheet_handler::{decode_row, parse_sheet, parse_sheet_html, AthleteResult, SheetContent, SheetLayout, SheetTable};
pub use store::{CacheRecord, CacheStore, CompetitionSummary, Records};
pub use team_handler::TeamEntry;
