use futures::future::join_all;
use tracing::{debug, warn};

use crate::client::ScoresheetClient;
use crate::metadata::CompetitionId;
use crate::sheet_handler::SheetContent;

/// One sheet to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchItem {
    pub id: CompetitionId,
    pub team: bool,
    pub open: bool,
}

/// Result for one item; `None` when the fetch or the parse failed
pub type FetchOutcome = (CompetitionId, Option<SheetContent>);

/// Fetches and parses every item concurrently.
/// All fetches run at once and are all awaited; a failure only blanks its own item.
/// Outcomes come back in input order.
pub async fn fetch_batch(client: &ScoresheetClient, items: &[FetchItem]) -> Vec<FetchOutcome> {
    let pending = items.iter().map(|item| async move {
        match client.fetch_sheet(item.id, item.team, !item.open).await {
            Ok(sheet) => {
                debug!(id = item.id, tables = sheet.len(), "Sheet fetched");
                (item.id, Some(sheet))
            }
            Err(e) => {
                warn!(id = item.id, error = %e, "Sheet fetch failed");
                (item.id, None)
            }
        }
    });

    join_all(pending).await
}
