//! Shared query parameter types for API handlers.

use baralga_core::paging::PageParams;
use serde::Deserialize;

/// Page request parameters (`?page=&size=`).
///
/// Values are normalized by [`PageParams::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<PageQuery> for PageParams {
    fn from(query: PageQuery) -> Self {
        PageParams::new(query.page, query.size)
    }
}
