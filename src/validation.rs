//! Field checks shared by the create and partial-update endpoints.
//!
//! Every field is checked before anything is reported, so a caller gets one
//! message per failing field in a stable order: name, brand, price, stock,
//! sku, barcode, ingredients_text, then unknown keys (sorted).

use serde_json::{Map, Value};

use crate::models::{ItemPatch, NewItem};

pub const KNOWN_FIELDS: [&str; 7] = [
    "sku",
    "name",
    "brand",
    "price",
    "stock",
    "barcode",
    "ingredients_text",
];

pub fn validate_new(body: &Map<String, Value>) -> Result<NewItem, Vec<String>> {
    let mut errors = Vec::new();

    let name = required(&mut errors, body, "name", non_empty_string);
    let brand = required(&mut errors, body, "brand", non_empty_string);
    let price = required(&mut errors, body, "price", parse_price);
    let stock = required(&mut errors, body, "stock", parse_stock);
    let sku = present(&mut errors, body, "sku", optional_string);
    let barcode = present(&mut errors, body, "barcode", optional_string);
    let ingredients_text = present(&mut errors, body, "ingredients_text", optional_string);
    unknown_fields(&mut errors, body);

    match (name, brand, price, stock) {
        (Some(name), Some(brand), Some(price), Some(stock)) if errors.is_empty() => Ok(NewItem {
            sku: sku.unwrap_or_default(),
            name,
            brand,
            price,
            stock,
            barcode: barcode.unwrap_or_default(),
            ingredients_text: ingredients_text.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

pub fn validate_patch(body: &Map<String, Value>) -> Result<ItemPatch, Vec<String>> {
    let mut errors = Vec::new();

    let patch = ItemPatch {
        name: present(&mut errors, body, "name", non_empty_string),
        brand: present(&mut errors, body, "brand", non_empty_string),
        price: present(&mut errors, body, "price", parse_price),
        stock: present(&mut errors, body, "stock", parse_stock),
        sku: present(&mut errors, body, "sku", optional_string),
        barcode: present(&mut errors, body, "barcode", optional_string),
        ingredients_text: present(&mut errors, body, "ingredients_text", optional_string),
    };
    unknown_fields(&mut errors, body);

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

// ── Plumbing ─────────────────────────────────────────────────────────────────

type Parser<T> = fn(&str, &Value) -> Result<T, String>;

fn required<T>(
    errors: &mut Vec<String>,
    body: &Map<String, Value>,
    field: &str,
    parse: Parser<T>,
) -> Option<T> {
    match body.get(field) {
        Some(value) => record(errors, parse(field, value)),
        None => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

fn present<T>(
    errors: &mut Vec<String>,
    body: &Map<String, Value>,
    field: &str,
    parse: Parser<T>,
) -> Option<T> {
    body.get(field)
        .and_then(|value| record(errors, parse(field, value)))
}

fn record<T>(errors: &mut Vec<String>, result: Result<T, String>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}

fn unknown_fields(errors: &mut Vec<String>, body: &Map<String, Value>) {
    let mut unknown: Vec<&String> = body
        .keys()
        .filter(|k| !KNOWN_FIELDS.contains(&k.as_str()))
        .collect();
    unknown.sort();
    errors.extend(unknown.into_iter().map(|k| format!("unknown field: {k}")));
}

// ── Field parsers ────────────────────────────────────────────────────────────

fn non_empty_string(field: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(format!("{field} must be a non-empty string")),
    }
}

/// Null is accepted and stored as the empty string.
fn optional_string(field: &str, value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        _ => Err(format!("{field} must be a string")),
    }
}

fn parse_price(field: &str, value: &Value) -> Result<f64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if !p.is_finite() => Err(format!("{field} must be a number")),
        Some(p) if p < 0.0 => Err(format!("{field} must be >= 0")),
        Some(p) => Ok(p),
        None => Err(format!("{field} must be a number")),
    }
}

fn parse_stock(field: &str, value: &Value) -> Result<i64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(s) if s < 0 => Err(format!("{field} must be >= 0")),
        Some(s) => Ok(s),
        None => Err(format!("{field} must be an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn valid() -> Value {
        json!({ "name": "Test Item", "brand": "Test Brand", "price": 1.99, "stock": 10 })
    }

    // ── Create ─────────────────────────────────────────────────────────────────

    #[test]
    fn minimal_create_applies_defaults() {
        let item = validate_new(&obj(valid())).unwrap();
        assert_eq!(item.name, "Test Item");
        assert_eq!(item.stock, 10);
        assert!((item.price - 1.99).abs() < f64::EPSILON);
        assert_eq!(item.sku, "");
        assert_eq!(item.barcode, "");
        assert_eq!(item.ingredients_text, "");
    }

    #[test]
    fn negative_stock_is_rejected_and_zero_accepted() {
        let mut body = obj(valid());
        body.insert("stock".into(), json!(-1));
        let errors = validate_new(&body).unwrap_err();
        assert_eq!(errors, vec!["stock must be >= 0"]);

        body.insert("stock".into(), json!(0));
        assert_eq!(validate_new(&body).unwrap().stock, 0);
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut body = obj(valid());
        body.insert("price".into(), json!(-0.5));
        assert_eq!(validate_new(&body).unwrap_err(), vec!["price must be >= 0"]);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut body = obj(valid());
        body.insert("price".into(), json!("2.50"));
        body.insert("stock".into(), json!("7"));
        let item = validate_new(&body).unwrap();
        assert!((item.price - 2.5).abs() < f64::EPSILON);
        assert_eq!(item.stock, 7);
    }

    #[test]
    fn whole_float_stock_is_accepted_but_fractional_is_not() {
        let mut body = obj(valid());
        body.insert("stock".into(), json!(4.0));
        assert_eq!(validate_new(&body).unwrap().stock, 4);

        body.insert("stock".into(), json!(4.5));
        assert_eq!(validate_new(&body).unwrap_err(), vec!["stock must be an integer"]);
    }

    #[test]
    fn booleans_are_not_numbers() {
        let mut body = obj(valid());
        body.insert("price".into(), json!(true));
        body.insert("stock".into(), json!(false));
        assert_eq!(
            validate_new(&body).unwrap_err(),
            vec!["price must be a number", "stock must be an integer"]
        );
    }

    #[test]
    fn every_failing_field_is_reported_in_order() {
        let body = obj(json!({
            "name": "",
            "price": "cheap",
            "stock": -3,
            "sku": 12,
            "colour": "red",
            "aisle": 4,
        }));
        assert_eq!(
            validate_new(&body).unwrap_err(),
            vec![
                "name must be a non-empty string",
                "brand is required",
                "price must be a number",
                "stock must be >= 0",
                "sku must be a string",
                "unknown field: aisle",
                "unknown field: colour",
            ]
        );
    }

    #[test]
    fn whitespace_name_is_empty() {
        let mut body = obj(valid());
        body.insert("name".into(), json!("   "));
        assert_eq!(
            validate_new(&body).unwrap_err(),
            vec!["name must be a non-empty string"]
        );
    }

    #[test]
    fn null_optional_strings_become_empty() {
        let mut body = obj(valid());
        body.insert("barcode".into(), Value::Null);
        assert_eq!(validate_new(&body).unwrap().barcode, "");
    }

    #[test]
    fn id_is_not_accepted_on_create() {
        let mut body = obj(valid());
        body.insert("id".into(), json!(5));
        assert_eq!(validate_new(&body).unwrap_err(), vec!["unknown field: id"]);
    }

    // ── Patch ──────────────────────────────────────────────────────────────────

    #[test]
    fn patch_only_carries_present_fields() {
        let patch = validate_patch(&obj(json!({ "stock": 50 }))).unwrap();
        assert_eq!(
            patch,
            ItemPatch {
                stock: Some(50),
                ..Default::default()
            }
        );
    }

    #[test]
    fn patch_validates_supplied_fields() {
        let errors = validate_patch(&obj(json!({ "brand": "", "stock": -1 }))).unwrap_err();
        assert_eq!(errors, vec!["brand must be a non-empty string", "stock must be >= 0"]);
    }

    #[test]
    fn patch_rejects_unknown_fields() {
        let errors = validate_patch(&obj(json!({ "stock": 1, "colour": "red" }))).unwrap_err();
        assert_eq!(errors, vec!["unknown field: colour"]);
    }

    #[test]
    fn patch_null_optional_strings_become_empty() {
        let patch = validate_patch(&obj(json!({ "sku": null, "ingredients_text": null }))).unwrap();
        assert_eq!(patch.sku.as_deref(), Some(""));
        assert_eq!(patch.ingredients_text.as_deref(), Some(""));
        assert_eq!(patch.barcode, None);
    }

    #[test]
    fn non_finite_string_prices_are_rejected() {
        for raw in ["inf", "-inf", "NaN", "infinity"] {
            let mut body = obj(valid());
            body.insert("price".into(), json!(raw));
            assert_eq!(
                validate_new(&body).unwrap_err(),
                vec!["price must be a number"],
                "price {raw:?}"
            );
        }
        let errors = validate_patch(&obj(json!({ "price": "NaN" }))).unwrap_err();
        assert_eq!(errors, vec!["price must be a number"]);
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(validate_patch(&Map::new()).unwrap().is_empty());
    }
}
