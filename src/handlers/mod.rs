pub mod external;
pub mod inventory;
pub mod metrics;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};

use crate::error::{AppError, AppResult};

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// A request body that must be a JSON object.
///
/// Missing or wrong content type → 415; unparseable JSON or a non-object
/// body → 400. Both answer with an `{"error": ...}` body.
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(map))) => Ok(Self(map)),
            Ok(Json(_)) => Err(AppError::BadRequest(
                "request body must be a JSON object".to_string(),
            )),
            Err(JsonRejection::MissingJsonContentType(_)) => Err(AppError::UnsupportedMediaType),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// Item ids come in as raw path segments; anything that is not a valid id
/// cannot name an item, so it is reported as not found.
pub(crate) fn parse_item_id(raw: &str) -> AppResult<u64> {
    raw.parse::<u64>().map_err(|_| AppError::item_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_item_id("42").unwrap(), 42);
    }

    #[test]
    fn junk_ids_are_not_found() {
        let err = parse_item_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "item abc not found");
        assert!(parse_item_id("-1").is_err());
    }
}
