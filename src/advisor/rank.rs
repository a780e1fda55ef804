use ordered_float::OrderedFloat;

use crate::domain::AdviceItem;

/// Each advice category is capped at this many items.
pub const MAX_ADVICE_ITEMS: usize = 3;

/// Stable sort by (priority desc, estimated savings desc), then truncate to
/// the top [`MAX_ADVICE_ITEMS`]. Per-asset candidates are concatenated before
/// ranking, so the cap applies across all assets of a category.
pub fn rank(mut items: Vec<AdviceItem>) -> Vec<AdviceItem> {
    items.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| OrderedFloat(b.estimated_savings).cmp(&OrderedFloat(a.estimated_savings)))
    });
    items.truncate(MAX_ADVICE_ITEMS);
    items
}
