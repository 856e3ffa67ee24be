use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::NewItem;

static ADJECTIVES: &[&str] = &[
    "Organic", "Classic", "Crunchy", "Smoked", "Spicy", "Sweet", "Roasted", "Wholegrain",
    "Light", "Creamy", "Fresh", "Salted", "Unsalted", "Mild", "Extra", "Golden",
];

static NOUNS: &[&str] = &[
    "Oats", "Granola", "Peanut Butter", "Crackers", "Yogurt", "Cheddar", "Coffee", "Tea",
    "Pasta", "Rice", "Olive Oil", "Honey", "Salsa", "Tortillas", "Almonds", "Chocolate",
];

static BRANDS: &[&str] = &[
    "Green Valley", "Harvest Co.", "Blue Hill", "Sunny Farms", "Northwind", "Maple Leaf",
    "Riverside", "Golden Field",
];

/// The items a fresh store starts with.
pub fn sample_items() -> Vec<NewItem> {
    vec![
        NewItem {
            sku: "SKU-0001".to_string(),
            name: "Coca-Cola Classic".to_string(),
            brand: "Coca-Cola".to_string(),
            price: 1.99,
            stock: 48,
            barcode: "5449000000996".to_string(),
            ingredients_text: "Carbonated water, sugar, colour (caramel E150d), phosphoric acid, natural flavourings, caffeine".to_string(),
        },
        NewItem {
            sku: "SKU-0002".to_string(),
            name: "Nutella".to_string(),
            brand: "Ferrero".to_string(),
            price: 4.49,
            stock: 20,
            barcode: "3017620422003".to_string(),
            ingredients_text: "Sugar, palm oil, hazelnuts 13%, skimmed milk powder 8.7%, fat-reduced cocoa 7.4%, emulsifier: lecithins (soya), vanillin".to_string(),
        },
        NewItem {
            sku: "SKU-0003".to_string(),
            name: "Oat Drink".to_string(),
            brand: "Oatly".to_string(),
            price: 2.79,
            stock: 0,
            barcode: "7394376616037".to_string(),
            ingredients_text: "Water, oats 10%, rapeseed oil, calcium carbonate, salt".to_string(),
        },
    ]
}

/// Generate `count` random grocery items.
pub fn random_items(rng: &mut impl Rng, count: usize) -> Vec<NewItem> {
    (0..count)
        .map(|serial| {
            let adj = ADJECTIVES.choose(rng).unwrap_or(&"Classic");
            let noun = NOUNS.choose(rng).unwrap_or(&"Oats");
            let brand = BRANDS.choose(rng).unwrap_or(&"Green Valley");
            let cents: u32 = rng.gen_range(49..=2_999);

            NewItem {
                sku: format!("SEED-{:05}", serial),
                name: format!("{} {}", adj, noun),
                brand: brand.to_string(),
                price: cents as f64 / 100.0,
                stock: rng.gen_range(0..=500),
                barcode: random_barcode(rng),
                ingredients_text: String::new(),
            }
        })
        .collect()
}

fn random_barcode(rng: &mut impl Rng) -> String {
    (0..13).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}
