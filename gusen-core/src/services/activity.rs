use std::sync::Arc;

use gusen_model::{LoginLogEntry, Page, PageRequest};

use crate::{database::LogStore, error::Result, pagination::PageWindow};

/// Read-only view of the login activity log.
pub struct ActivityLogService {
    logs: Arc<dyn LogStore>,
}

impl std::fmt::Debug for ActivityLogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLogService").finish_non_exhaustive()
    }
}

impl ActivityLogService {
    pub fn new(logs: Arc<dyn LogStore>) -> Self {
        Self { logs }
    }

    pub async fn list_logs(&self, request: &PageRequest) -> Result<Page<LoginLogEntry>> {
        let listing = self.logs.list(&PageWindow::from(request)).await?;
        Ok(listing.into_page(request))
    }
}
