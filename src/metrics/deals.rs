//! Deal totals, stage rollups and upcoming closes.

use crate::entities::Deal;
use crate::pipeline::Stage;
use serde::Serialize;

/// Headline deal numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSummary {
    pub total_deals: usize,
    /// Sum of every deal's value, closed deals included.
    pub pipeline_value: f64,
    pub average_deal_size: f64,
    pub won_deals: usize,
    pub won_value: f64,
    /// Percentage of all deals that are `Closed Won`.
    pub win_rate: f64,
}

pub fn summarize_deals(deals: &[Deal]) -> DealSummary {
    let total_deals = deals.len();
    let pipeline_value: f64 = deals.iter().map(|d| d.value).sum();
    let won: Vec<&Deal> = deals.iter().filter(|d| d.stage == Stage::ClosedWon).collect();
    let won_value = won.iter().map(|d| d.value).sum();

    let (average_deal_size, win_rate) = if total_deals == 0 {
        (0.0, 0.0)
    } else {
        (
            pipeline_value / total_deals as f64,
            won.len() as f64 / total_deals as f64 * 100.0,
        )
    };

    DealSummary {
        total_deals,
        pipeline_value,
        average_deal_size,
        won_deals: won.len(),
        won_value,
        win_rate,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRollup {
    pub stage: Stage,
    pub count: usize,
    pub value: f64,
}

/// Count and summed value for each forward stage, in chain order.
///
/// `Closed Lost` deals are not part of the board.
pub fn stage_rollup(deals: &[Deal]) -> Vec<StageRollup> {
    Stage::FORWARD
        .into_iter()
        .map(|stage| {
            let (count, value) = deals
                .iter()
                .filter(|d| d.stage == stage)
                .fold((0, 0.0), |(n, sum), d| (n + 1, sum + d.value));
            StageRollup { stage, count, value }
        })
        .collect()
}

/// Open deals closing soonest, at most `limit`.
pub fn upcoming_deals(deals: &[Deal], limit: usize) -> Vec<&Deal> {
    let mut open: Vec<&Deal> = deals.iter().filter(|d| d.is_open()).collect();
    open.sort_by_key(|d| d.expected_close);
    open.truncate(limit);
    open
}
