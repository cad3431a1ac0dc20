//! Item lookup by name and number.

use std::collections::HashMap;

use crate::error::{GsdError, Result};
use crate::types::GsdItem;

/// Case-insensitive name index over a frozen item list.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    by_name: HashMap<String, usize>,
    count: usize,
}

impl ItemIndex {
    /// Build the index. Names are folded to ASCII upper case; if two items
    /// fold to the same name the later one wins.
    pub fn build(items: &[GsdItem]) -> Self {
        let mut by_name = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if let Some(previous) = by_name.insert(item.name().to_ascii_uppercase(), idx) {
                tracing::warn!(
                    name = item.name(),
                    replaced = previous + 1,
                    by = item.number(),
                    "Duplicate item name, later item replaces earlier"
                );
            }
        }
        Self {
            by_name,
            count: items.len(),
        }
    }

    /// Storage index of the item called `name`, ignoring case.
    pub fn position(&self, name: &str) -> Result<usize> {
        self.by_name
            .get(&name.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| GsdError::not_found(name))
    }

    /// Storage index of item `number`, which must lie in 1..=count.
    pub fn check_number(&self, number: usize) -> Result<usize> {
        if number < 1 || number > self.count {
            return Err(GsdError::OutOfRange {
                number,
                count: self.count,
            });
        }
        Ok(number - 1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_ascii_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
