use super::config::{Item, MaterialParams, ProductParams};
use super::types::ItemId;

/// Immutable catalog of products and materials.
///
/// Items are addressed by their dense id. Materials and products are also
/// numbered among themselves in id order; those positions address the
/// per-material procurement and per-product sales components.
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    items: Vec<Item>,
    products: Vec<ItemId>,
    materials: Vec<ItemId>,
}

impl ItemRegistry {
    /// Items must already be validated (dense ids in order)
    pub fn new(items: Vec<Item>) -> Self {
        let products = items.iter().filter(|i| i.is_product()).map(|i| i.id).collect();
        let materials = items.iter().filter(|i| i.is_material()).map(|i| i.id).collect();
        Self {
            items,
            products,
            materials,
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Item ids of all products in id order
    pub fn products(&self) -> &[ItemId] {
        &self.products
    }

    /// Item ids of all materials in id order
    pub fn materials(&self) -> &[ItemId] {
        &self.materials
    }

    pub fn product_index(&self, id: ItemId) -> Option<usize> {
        self.products.iter().position(|p| *p == id)
    }

    pub fn material_index(&self, id: ItemId) -> Option<usize> {
        self.materials.iter().position(|m| *m == id)
    }

    pub fn product_params(&self, id: ItemId) -> Option<&ProductParams> {
        self.get(id).and_then(Item::as_product)
    }

    pub fn material_params(&self, id: ItemId) -> Option<&MaterialParams> {
        self.get(id).and_then(Item::as_material)
    }
}
