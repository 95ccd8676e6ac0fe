//! Demo binary: seeds a warehouse, moves some stock and prints the views.

use stockbook_api::InventoryService;
use stockbook_catalog::Attributes;
use stockbook_ledger::TransactionKind;

fn main() -> anyhow::Result<()> {
    stockbook_observability::init();

    let service = InventoryService::in_memory();
    service.register_warehouse("MDC")?;

    let mut attributes = Attributes::new();
    attributes.insert("color".to_string(), serde_json::json!("#00f"));
    service.register_product("PHN-001", "Fairphone 5", attributes)?;
    service.register_product("TAB-001", "Slate Tablet", Attributes::new())?;

    service.submit_transaction(TransactionKind::Shipment, "PHN-001", "MDC", 20)?;
    service.submit_transaction(TransactionKind::Shipment, "TAB-001", "MDC", 4)?;
    service.submit_transaction(TransactionKind::Sale, "PHN-001", "MDC", 3)?;
    service.submit_transaction(TransactionKind::Return, "PHN-001", "MDC", 1)?;

    // An oversell is a routine rejection, not a crash.
    if let Err(err) = service.submit_transaction(TransactionKind::Sale, "TAB-001", "MDC", 99) {
        tracing::info!(%err, "oversell rejected as expected");
    }

    for row in service.current_stock()? {
        tracing::info!(
            sku = %row.sku,
            name = %row.name,
            warehouse = %row.warehouse,
            quantity = row.quantity,
            "current stock"
        );
    }

    let summary = service.summary(5)?;
    tracing::info!(
        distinct_products = summary.distinct_products,
        units_on_hand = summary.units_on_hand,
        low_stock_items = summary.low_stock_items,
        "inventory summary"
    );

    for entry in service.ledger_history(Some(10))? {
        tracing::info!(
            entry_id = %entry.entry_id,
            reason = %entry.reason,
            change_amount = entry.change_amount,
            recorded_at = %entry.recorded_at,
            "ledger entry"
        );
    }

    Ok(())
}
