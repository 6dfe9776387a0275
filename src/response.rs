use serde::Serialize;
use utoipa::ToSchema;

/// Paging information; every field is omitted from the JSON when unset.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

/// Success envelope shared by every endpoint: `{message, data, meta}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn paged(message: impl Into<String>, data: T, page: i64, per_page: i64, total: i64) -> Self {
        Self::success(message, data, Some(Meta::new(page, per_page, total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_envelope_carries_meta() {
        let resp = ApiResponse::paged("Recipes", vec![1, 2], 2, 10, 12);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "message": "Recipes",
                "data": [1, 2],
                "meta": { "page": 2, "per_page": 10, "total": 12 }
            })
        );
    }

    #[test]
    fn empty_meta_serializes_as_empty_object() {
        let resp = ApiResponse::success("Health check", "ok", Some(Meta::empty()));
        assert_eq!(serde_json::to_value(&resp).unwrap()["meta"], json!({}));

        let resp = ApiResponse::success("Recipe", 1, None);
        assert!(serde_json::to_value(&resp).unwrap()["meta"].is_null());
    }
}
