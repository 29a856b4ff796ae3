//! Deal groupings for the pipeline board and contact pages.

use crate::entities::Deal;
use crate::metrics::{stage_rollup, StageRollup};
use crate::pipeline::Stage;
use crate::types::RecordId;
use serde::Serialize;

/// Owned copy of every deal, ready to lay out as a pipeline board.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PipelineBoard {
    pub deals: Vec<Deal>,
}

impl PipelineBoard {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    pub fn columns(&self) -> Vec<StageColumn<'_>> {
        partition_by_stage(&self.deals)
    }

    /// Totals for the forward stages only.
    pub fn rollup(&self) -> Vec<StageRollup> {
        stage_rollup(&self.deals)
    }

    pub fn column(&self, stage: Stage) -> StageColumn<'_> {
        column_for(&self.deals, stage)
    }
}

/// One pipeline board column.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumn<'a> {
    pub stage: Stage,
    pub deals: Vec<&'a Deal>,
    pub total_value: f64,
}

impl StageColumn<'_> {
    pub fn count(&self) -> usize {
        self.deals.len()
    }
}

/// Group deals into one column per stage, in [`Stage::ALL`] order.
///
/// Every stage gets a column, empty or not, and every deal lands in
/// exactly one column in input order.
pub fn partition_by_stage(deals: &[Deal]) -> Vec<StageColumn<'_>> {
    Stage::ALL
        .into_iter()
        .map(|stage| column_for(deals, stage))
        .collect()
}

/// Deals belonging to one contact, in input order.
pub fn deals_for_contact(deals: &[Deal], contact_id: RecordId) -> Vec<&Deal> {
    deals.iter().filter(|d| d.contact_id == contact_id).collect()
}

fn column_for(deals: &[Deal], stage: Stage) -> StageColumn<'_> {
    let in_stage: Vec<&Deal> = deals.iter().filter(|d| d.stage == stage).collect();
    let total_value = in_stage.iter().map(|d| d.value).sum();
    StageColumn {
        stage,
        deals: in_stage,
        total_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DealDraft;
    use chrono::{NaiveDate, Utc};

    fn deal_for(id: u32, contact: u32, value: f64, stage: Stage) -> Deal {
        let close = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        Deal::from_draft(
            RecordId(id),
            DealDraft::new(format!("D{id}"), value, RecordId(contact), close).with_stage(stage),
            Stage::Lead,
            Utc::now(),
        )
    }

    fn deal(id: u32, value: f64, stage: Stage) -> Deal {
        deal_for(id, 1, value, stage)
    }

    #[test]
    fn test_deals_for_contact_keeps_order() {
        let deals = vec![
            deal_for(7, 2, 100.0, Stage::Proposal),
            deal_for(3, 1, 200.0, Stage::Lead),
            deal_for(5, 2, 300.0, Stage::ClosedWon),
        ];

        let ids: Vec<_> = deals_for_contact(&deals, RecordId(2)).iter().map(|d| d.id.0).collect();
        assert_eq!(ids, vec![7, 5]);
        assert!(deals_for_contact(&deals, RecordId(9)).is_empty());
    }

    #[test]
    fn test_partition_keeps_every_deal() {
        let deals = vec![
            deal(1, 1000.0, Stage::Lead),
            deal(2, 500.0, Stage::Proposal),
            deal(3, 250.0, Stage::Lead),
            deal(4, 900.0, Stage::ClosedLost),
        ];
        let columns = partition_by_stage(&deals);

        assert_eq!(columns.len(), Stage::ALL.len());
        assert_eq!(columns.iter().map(StageColumn::count).sum::<usize>(), deals.len());

        let lead = &columns[0];
        assert_eq!(lead.stage, Stage::Lead);
        assert_eq!(lead.deals.iter().map(|d| d.id.0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(lead.total_value, 1250.0);

        assert_eq!(columns[1].count(), 0);
        assert_eq!(columns[1].total_value, 0.0);
        assert_eq!(columns[5].stage, Stage::ClosedLost);
        assert_eq!(columns[5].total_value, 900.0);
    }

    #[test]
    fn test_board_column_and_rollup() {
        let board = PipelineBoard::new(vec![
            deal(1, 1000.0, Stage::Qualified),
            deal(2, 400.0, Stage::ClosedLost),
        ]);
        assert_eq!(board.column(Stage::Qualified).count(), 1);
        assert_eq!(board.column(Stage::ClosedLost).total_value, 400.0);
        assert_eq!(board.rollup().len(), 5);
        assert_eq!(board.rollup()[1].value, 1000.0);
    }
}
