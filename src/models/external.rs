use serde::{Deserialize, Serialize};

// ── Upstream wire format ─────────────────────────────────────────────────────
//
// The product database is untrusted: every field is optional and may be null.

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamProductResponse {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub product: Option<UpstreamProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamSearchResponse {
    #[serde(default)]
    pub products: Vec<UpstreamProduct>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpstreamProduct {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
}

impl UpstreamProductResponse {
    /// The product, if the upstream marked it as found.
    pub fn into_found(self) -> Option<UpstreamProduct> {
        match self.status {
            Some(1) => self.product,
            _ => None,
        }
    }
}

// ── Simplified product returned to our clients ───────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProduct {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub ingredients_text: String,
}

impl ExternalProduct {
    /// `barcode` wins over the upstream `code` when the caller already knows it.
    pub fn from_upstream(product: UpstreamProduct, barcode: Option<&str>) -> Self {
        Self {
            barcode: barcode
                .map(str::to_string)
                .or(product.code)
                .unwrap_or_default(),
            name: product.product_name.unwrap_or_default(),
            brand: product.brands.unwrap_or_default(),
            ingredients_text: product.ingredients_text.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_product_requires_status_one() {
        let body: UpstreamProductResponse = serde_json::from_str(
            r#"{"status": 1, "product": {"product_name": "Cola", "brands": "Coca-Cola"}}"#,
        )
        .unwrap();
        let product = body.into_found().expect("status 1 means found");
        assert_eq!(product.product_name.as_deref(), Some("Cola"));

        let missing: UpstreamProductResponse =
            serde_json::from_str(r#"{"status": 0, "status_verbose": "product not found"}"#)
                .unwrap();
        assert!(missing.into_found().is_none());
    }

    #[test]
    fn absent_and_null_fields_default_to_blank() {
        let product: UpstreamProduct =
            serde_json::from_str(r#"{"product_name": null, "unrelated": 3}"#).unwrap();
        let simplified = ExternalProduct::from_upstream(product, Some("123"));
        assert_eq!(
            simplified,
            ExternalProduct {
                barcode: "123".to_string(),
                name: String::new(),
                brand: String::new(),
                ingredients_text: String::new(),
            }
        );
    }

    #[test]
    fn search_results_take_barcode_from_code() {
        let body: UpstreamSearchResponse = serde_json::from_str(
            r#"{"count": 1, "products": [{"code": "3017620422003", "product_name": "Nutella"}]}"#,
        )
        .unwrap();
        let product = body.products.into_iter().next().unwrap();
        let simplified = ExternalProduct::from_upstream(product, None);
        assert_eq!(simplified.barcode, "3017620422003");
        assert_eq!(simplified.name, "Nutella");
    }
}
