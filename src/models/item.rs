use serde::{Deserialize, Serialize};

/// One inventory record. The store owns every `Item`; handlers only ever see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub stock: i64,
    pub barcode: String,
    pub ingredients_text: String,
}

impl Item {
    pub fn from_new(id: u64, new: NewItem) -> Self {
        Self {
            id,
            sku: new.sku,
            name: new.name,
            brand: new.brand,
            price: new.price,
            stock: new.stock,
            barcode: new.barcode,
            ingredients_text: new.ingredients_text,
        }
    }

    /// Overwrites exactly the fields present in `patch`.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(barcode) = patch.barcode {
            self.barcode = barcode;
        }
        if let Some(ingredients_text) = patch.ingredients_text {
            self.ingredients_text = ingredients_text;
        }
    }
}

// ── Validated inputs ─────────────────────────────────────────────────────────

/// A validated create payload with optional fields already defaulted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewItem {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub stock: i64,
    pub barcode: String,
    pub ingredients_text: String,
}

/// A validated partial update. `None` means "leave as is".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub barcode: Option<String>,
    pub ingredients_text: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item::from_new(
            1,
            NewItem {
                sku: "SKU-1".to_string(),
                name: "Oat Milk".to_string(),
                brand: "Oatly".to_string(),
                price: 2.49,
                stock: 12,
                barcode: "7394376616037".to_string(),
                ingredients_text: "water, oats".to_string(),
            },
        )
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut item = sample();
        item.apply(ItemPatch {
            stock: Some(50),
            ..Default::default()
        });
        assert_eq!(item.stock, 50);
        assert_eq!(item.name, "Oat Milk");
        assert_eq!(item.brand, "Oatly");
        assert!((item.price - 2.49).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_patch_is_a_noop() {
        let mut item = sample();
        let before = item.clone();
        let patch = ItemPatch::default();
        assert!(patch.is_empty());
        item.apply(patch);
        assert_eq!(item, before);
    }

    #[test]
    fn serializes_flat_with_all_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "id",
            "sku",
            "name",
            "brand",
            "price",
            "stock",
            "barcode",
            "ingredients_text",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 8);
    }
}
