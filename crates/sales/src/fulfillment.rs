use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use warehouse_core::{StockLedger, Stocked};
use warehouse_products::{Product, ProductName};

/// Order line: product and requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: ProductName,
    pub quantity: u64,
}

impl OrderLine {
    pub fn new(name: impl Into<ProductName>, quantity: u64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Outcome of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fulfillment {
    /// Every line was covered and product stock was decremented.
    Fulfilled,
    /// The first line (in order) that could not be covered. Nothing was applied.
    Rejected {
        product: ProductName,
        /// Cumulative quantity of this product up to and including the line.
        requested: u64,
        /// `None` when the product is not in the catalog.
        available: Option<u64>,
    },
}

impl Fulfillment {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Fulfillment::Fulfilled)
    }
}

/// Fulfil an order all-or-nothing.
///
/// Lines are validated in input order against the current stock, with repeated
/// product names summed. Decrements are applied only once every line has
/// validated, so a rejected order leaves all product stock as it was.
pub fn fulfill(lines: &[OrderLine], products: &mut StockLedger<Product>) -> Fulfillment {
    let mut demand: HashMap<&ProductName, u64> = HashMap::with_capacity(lines.len());

    for line in lines {
        let available = products.stock_of(&line.name);
        let requested = demand
            .get(&line.name)
            .copied()
            .unwrap_or(0)
            .checked_add(line.quantity);

        match (requested, available) {
            (Some(requested), Some(available)) if requested <= available => {
                demand.insert(&line.name, requested);
            }
            (requested, available) => {
                tracing::debug!(
                    product = %line.name,
                    requested = ?requested,
                    available = ?available,
                    "order line cannot be covered"
                );
                return Fulfillment::Rejected {
                    product: line.name.clone(),
                    requested: requested.unwrap_or(u64::MAX),
                    available,
                };
            }
        }
    }

    for (name, quantity) in demand {
        if let Some(product) = products.get_mut(name) {
            *product.stock_mut() -= quantity;
        }
    }

    Fulfillment::Fulfilled
}
