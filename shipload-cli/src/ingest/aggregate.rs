//! In-memory state built while reading the source files

use std::collections::{BTreeMap, BTreeSet};

/// Origin, destination and product counts accumulated for one shipment id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentAggregate {
    pub origin: String,
    pub destination: String,
    /// product name -> number of rows naming it
    pub products: BTreeMap<String, i64>,
}

impl ShipmentAggregate {
    fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            products: BTreeMap::new(),
        }
    }
}

/// Everything a single load writes to the database
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub product_names: BTreeSet<String>,
    pub shipments: BTreeMap<String, ShipmentAggregate>,
    /// Data rows consumed across all files
    pub rows_read: usize,
}

/// Outcome of recording one shipment row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentRowOutcome {
    /// First row for this shipment id, origin and destination were taken from it
    Opened,
    /// Later row agreeing with the stored origin and destination
    Counted,
    /// Later row whose origin or destination differs; only the product was counted
    ConflictingRoute,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product name; returns false if it was already present
    pub fn add_product(&mut self, name: &str) -> bool {
        if self.product_names.contains(name) {
            return false;
        }
        self.product_names.insert(name.to_string())
    }

    /// Count one occurrence of `product` in shipment `shipment_id`.
    ///
    /// The first row seen for an id fixes its origin and destination; those
    /// of later rows are ignored.
    pub fn add_shipment_row(
        &mut self,
        shipment_id: &str,
        origin: &str,
        destination: &str,
        product: &str,
    ) -> ShipmentRowOutcome {
        let mut outcome = ShipmentRowOutcome::Counted;
        let shipment = self
            .shipments
            .entry(shipment_id.to_string())
            .or_insert_with(|| {
                outcome = ShipmentRowOutcome::Opened;
                ShipmentAggregate::new(origin, destination)
            });

        if outcome == ShipmentRowOutcome::Counted
            && (shipment.origin != origin || shipment.destination != destination)
        {
            outcome = ShipmentRowOutcome::ConflictingRoute;
        }

        *shipment.products.entry(product.to_string()).or_insert(0) += 1;
        outcome
    }

    /// Total (shipment, product) pairs, i.e. rows the write phase inserts into `shipment_product`
    pub fn shipment_product_count(&self) -> usize {
        self.shipments.values().map(|s| s.products.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.product_names.is_empty() && self.shipments.is_empty()
    }
}
