//! Furniture footprint lookup.
//!
//! The furniture catalog lives outside this crate; hit testing only needs
//! each model's footprint, asked for through [`FurnitureCatalog`].

use crate::plan::Furniture;
use std::collections::HashMap;

/// Footprint used when the catalog has no entry for a model.
pub const DEFAULT_FOOTPRINT: Footprint = Footprint { width: 0.8, depth: 0.8 };

/// Unscaled plan-view size of a catalog model, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
}

pub trait FurnitureCatalog {
    fn footprint(&self, catalog_id: &str) -> Option<Footprint>;
}

/// A catalog that knows no models.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

impl FurnitureCatalog for NoCatalog {
    fn footprint(&self, _catalog_id: &str) -> Option<Footprint> {
        None
    }
}

/// In-memory catalog for hosts with a fixed model set, and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: HashMap<String, Footprint>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, catalog_id: impl Into<String>, width: f64, depth: f64) -> Self {
        self.items.insert(catalog_id.into(), Footprint { width, depth });
        self
    }
}

impl FurnitureCatalog for StaticCatalog {
    fn footprint(&self, catalog_id: &str) -> Option<Footprint> {
        self.items.get(catalog_id).copied()
    }
}

/// Scaled footprint of a placed item: width by `scale.x`, depth by `scale.z`.
pub fn item_footprint(item: &Furniture, catalog: &dyn FurnitureCatalog) -> Footprint {
    let base = catalog.footprint(&item.catalog_id).unwrap_or(DEFAULT_FOOTPRINT);
    Footprint {
        width: base.width * item.scale.x,
        depth: base.depth * item.scale.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Scale3;
    use kurbo::Point;

    #[test]
    fn test_missing_entry_falls_back() {
        let sofa = Furniture::new("f1", "sofa", Point::ZERO);
        assert_eq!(item_footprint(&sofa, &NoCatalog), DEFAULT_FOOTPRINT);
    }

    #[test]
    fn test_scaled_footprint() {
        let catalog = StaticCatalog::new().with_item("table", 1.6, 0.9);
        let mut table = Furniture::new("f1", "table", Point::ZERO);
        table.scale = Scale3 { x: 2.0, y: 5.0, z: 0.5 };

        let footprint = item_footprint(&table, &catalog);
        assert!((footprint.width - 3.2).abs() < 1e-12);
        assert!((footprint.depth - 0.45).abs() < 1e-12);
    }
}
