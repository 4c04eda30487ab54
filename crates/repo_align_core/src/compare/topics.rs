//! Topics comparator.
//!
//! Topics compare as multisets: ordering differences alone never produce a
//! change, but duplicate counts matter. When the sets differ the comparator
//! emits one aggregate Update for the whole list rather than one change per
//! topic.

use github_gateway::RepoStateGateway;

use super::{display_list, gateway_error, sorted};
use crate::change::{Category, Change};
use crate::errors::AlignResult;

const CATEGORY: Category = Category::Topics;

pub(crate) async fn compare(
    desired: &[String],
    gateway: &dyn RepoStateGateway,
) -> AlignResult<Vec<Change>> {
    let current = gateway.get_topics().await.map_err(gateway_error(CATEGORY))?;

    let desired_sorted = sorted(desired);
    let current_sorted = sorted(&current);
    if desired_sorted == current_sorted {
        return Ok(Vec::new());
    }

    Ok(vec![Change::update(
        CATEGORY,
        "topics",
        display_list(&current_sorted),
        display_list(&desired_sorted),
    )])
}
