//! Creation-date ordering for fetched task items.
//!
//! Dated items are ordered by timestamp, earliest first, and always precede
//! undated items. Two undated items compare equal, and because
//! [`sort_by_created_at`] uses a stable sort they keep their original relative
//! order.

use std::cmp::Ordering;

use crate::domain::TaskItem;

/// Compares two items by `created_at`.
///
/// | `a.created_at` | `b.created_at` | result                 |
/// |----------------|----------------|------------------------|
/// | `Some(x)`      | `Some(y)`      | `x.cmp(&y)`            |
/// | `None`         | `Some(_)`      | `Greater` (a after b)  |
/// | `Some(_)`      | `None`         | `Less` (a before b)    |
/// | `None`         | `None`         | `Equal`                |
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use tasklist::ordering::compare_created_at;
/// use tasklist::TaskItem;
///
/// let dated = TaskItem::new("a");
/// let undated = TaskItem::new("b").without_timestamp();
/// assert_eq!(compare_created_at(&dated, &undated), Ordering::Less);
/// assert_eq!(compare_created_at(&undated, &dated), Ordering::Greater);
/// ```
pub fn compare_created_at(a: &TaskItem, b: &TaskItem) -> Ordering {
    match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts items in place by [`compare_created_at`]. Stable.
pub fn sort_by_created_at(items: &mut [TaskItem]) {
    items.sort_by(compare_created_at);
}

/// Returns `items` sorted by [`compare_created_at`].
pub fn sorted_by_created_at(mut items: Vec<TaskItem>) -> Vec<TaskItem> {
    sort_by_created_at(&mut items);
    items
}
