use tracing::debug;

use crate::error::Result;
use crate::listing_handler::{parse_listing_html, Listing};
use crate::metadata::CompetitionId;
use crate::sheet_handler::{parse_sheet_html, SheetContent};

pub const DEFAULT_BASE_URL: &str = "http://scoresheet.ffhaltero.fr/scoresheet/";

/// HTTP access to the score sheet site
#[derive(Debug, Clone)]
pub struct ScoresheetClient {
    base_url: String,
    client: reqwest::Client,
}

impl ScoresheetClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self) -> &str {
        &self.base_url
    }

    pub fn sheet_url(&self, id: CompetitionId, team: bool) -> String {
        format!(
            "{}{}competition/view/{}",
            self.base_url,
            if team { "team/" } else { "" },
            id
        )
    }

    /// Fetches HTML content from a URL, treating non-success statuses as errors
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetches and parses the catalog page
    pub async fn fetch_listing(&self) -> Result<Listing> {
        let html = self.fetch_html(self.listing_url()).await?;
        Ok(parse_listing_html(&html))
    }

    /// Fetches and parses one competition page with the layout given by the flags
    pub async fn fetch_sheet(&self, id: CompetitionId, team: bool, closed: bool) -> Result<SheetContent> {
        let url = self.sheet_url(id, team);
        debug!(id, team, closed, %url, "Fetching sheet");
        let html = self.fetch_html(&url).await?;
        parse_sheet_html(&html, team, closed)
    }
}

impl Default for ScoresheetClient {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }
}
