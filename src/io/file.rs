use crate::model::Order;
use std::path::Path;

/// Load an order from a JSON file.
pub fn load_order(path: &Path) -> Result<Order, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let order: Order =
        serde_json::from_str(&json).map_err(|e| format!("Invalid order JSON: {}", e))?;
    log::info!(
        "loaded order '{}' from {} ({} milestones, {} tasks, {} billing items)",
        order.title(),
        path.display(),
        order.milestones.len(),
        order.tasks.len(),
        order.billing_plan.len()
    );
    Ok(order)
}
