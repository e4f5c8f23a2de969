//! Static menu listing served on `GET /menu`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item name to price mapping. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    items: BTreeMap<String, f64>,
}

impl Menu {
    /// The fixed listing the restaurant serves.
    pub fn standard() -> Self {
        let items = [("Pizza", 12.99), ("Burger", 8.99), ("Soda", 2.50)]
            .into_iter()
            .map(|(name, price)| (name.to_string(), price))
            .collect();
        Self { items }
    }

    pub fn price(&self, name: &str) -> Option<f64> {
        self.items.get(name).copied()
    }

    pub fn items(&self) -> &BTreeMap<String, f64> {
        &self.items
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::standard()
    }
}
