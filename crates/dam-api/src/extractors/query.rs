//! Query parameters for the children listing.

use serde::{Deserialize, Serialize};

use dam_service::directory::ListChildrenRequest;

/// `?order_by=name%20asc&limit=20&offset=40`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListChildrenQuery {
    /// `<field>[ <asc|desc>]`; defaults to `created_at desc`.
    pub order_by: Option<String>,
    /// Page size.
    pub limit: Option<i64>,
    /// Items to skip.
    pub offset: Option<i64>,
}

impl From<ListChildrenQuery> for ListChildrenRequest {
    fn from(q: ListChildrenQuery) -> Self {
        Self {
            order_by: q.order_by,
            limit: q.limit,
            offset: q.offset,
        }
    }
}
