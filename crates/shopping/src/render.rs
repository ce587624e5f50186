use foodgram_shared::{Error, Result};

use crate::ShoppingItem;

/// Plain text list, one `"{name} - {amount} {unit}.\n"` line per item.
/// An empty list has nothing to export.
pub fn render(items: &[ShoppingItem]) -> Result<String> {
    if items.is_empty() {
        return Err(Error::AggregationEmpty);
    }

    Ok(items
        .iter()
        .map(|item| format!("{} - {} {}.\n", item.name, item.amount, item.measurement_unit))
        .collect())
}
