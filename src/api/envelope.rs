//! Response envelope shared by every list endpoint.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{HotelDeskError, Result};
use crate::list::PageResult;
use crate::list::pagination::total_pages;

/// `{ success, data, message?, pagination? }`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "R: DeserializeOwned"))]
pub struct ListEnvelope<R> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<R>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

impl<R> ListEnvelope<R> {
    /// Convert into a page. `success: false` becomes a server error carrying
    /// the envelope's message.
    pub fn into_page(self, limit: usize) -> Result<PageResult<R>> {
        if !self.success {
            return Err(HotelDeskError::Server {
                status: None,
                message: self.message,
            });
        }

        let meta = self.pagination.unwrap_or_default();
        let total = meta.total.unwrap_or(0);
        let total_pages = match meta.total_pages {
            Some(pages) => pages as usize,
            None => total_pages(total, limit),
        };
        Ok(PageResult {
            records: self.data,
            total,
            total_pages,
        })
    }
}
