//! Overview counts for the dashboard landing screen.

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::action::try_catch;
use super::action_result::ActionResult;
use super::auth::AccessToken;
use super::error::ActionError;
use super::ports::RecordStore;
use super::resources::Table;

/// Row counts per resource.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub clients: u64,
    pub work_locations: u64,
    pub positions: u64,
    pub workers: u64,
    pub assignments: u64,
}

impl DashboardSummary {
    fn slot(&mut self, table: Table) -> &mut u64 {
        match table {
            Table::Clients => &mut self.clients,
            Table::WorkLocations => &mut self.work_locations,
            Table::Positions => &mut self.positions,
            Table::TemporaryWorkers => &mut self.workers,
            Table::Assignments => &mut self.assignments,
        }
    }
}

/// Driving service for the overview screen.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Count every table concurrently; the first failure wins.
    pub async fn summary(&self, token: &AccessToken) -> ActionResult<DashboardSummary> {
        try_catch(|| async {
            let counts =
                try_join_all(Table::ALL.map(|table| self.store.count(token, table))).await?;
            let mut summary = DashboardSummary::default();
            for (table, count) in Table::ALL.into_iter().zip(counts) {
                *summary.slot(table) = count;
            }
            Ok::<_, ActionError>(summary)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockRecordStore;
    use crate::domain::{BackendError, ErrorCode};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn summary_reports_each_table() {
        let mut store = MockRecordStore::new();
        store.expect_count().times(5).returning(|_, table| {
            Ok(match table {
                Table::Clients => 3,
                Table::WorkLocations => 4,
                Table::Positions => 5,
                Table::TemporaryWorkers => 12,
                Table::Assignments => 7,
            })
        });

        let summary = DashboardService::new(Arc::new(store))
            .summary(&AccessToken::new("token"))
            .await
            .into_result()
            .expect("summary succeeds");
        assert_eq!(
            summary,
            DashboardSummary {
                clients: 3,
                work_locations: 4,
                positions: 5,
                workers: 12,
                assignments: 7,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn one_failing_count_fails_the_summary() {
        let mut store = MockRecordStore::new();
        store.expect_count().returning(|_, table| {
            if table == Table::Positions {
                Err(BackendError::api(401, Some("PGRST301".to_owned()), "JWT expired"))
            } else {
                Ok(1)
            }
        });

        let result = DashboardService::new(Arc::new(store))
            .summary(&AccessToken::new("token"))
            .await;
        assert_eq!(
            result.error().map(|error| error.code()),
            Some(ErrorCode::Unauthorized)
        );
    }
}
