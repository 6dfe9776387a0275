use serde::Deserialize;
use utoipa::ToSchema;

use crate::{entity::nutrition_facts, error::AppError};

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

/// Selectable nutrition columns for projected reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NutritionField {
    Calories,
    Proteins,
    Fats,
}

impl NutritionField {
    pub fn column(&self) -> nutrition_facts::Column {
        match self {
            NutritionField::Calories => nutrition_facts::Column::Calories,
            NutritionField::Proteins => nutrition_facts::Column::Proteins,
            NutritionField::Fats => nutrition_facts::Column::Fats,
        }
    }

    /// Parse a comma-separated field list, dropping blanks and duplicates.
    pub fn parse_list(raw: &str) -> Result<Vec<NutritionField>, AppError> {
        let mut fields = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let field = match name.to_ascii_lowercase().as_str() {
                "calories" => NutritionField::Calories,
                "proteins" => NutritionField::Proteins,
                "fats" => NutritionField::Fats,
                _ => {
                    return Err(AppError::bad_request(format!(
                        "Unknown nutrition field '{name}'. Allowed: calories, proteins, fats"
                    )));
                }
            };
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(fields)
    }
}

/// Parse a positive integer id supplied as text.
pub fn parse_id(raw: &str, message: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, (1, 20, 0))]
    #[case(Some(3), Some(10), (3, 10, 20))]
    #[case(Some(0), Some(500), (1, 100, 0))]
    #[case(Some(-2), Some(0), (1, 1, 0))]
    fn pagination_is_clamped(
        #[case] page: Option<i64>,
        #[case] per_page: Option<i64>,
        #[case] expected: (i64, i64, i64),
    ) {
        assert_eq!(Pagination { page, per_page }.normalize(), expected);
    }

    #[test]
    fn nutrition_fields_parse_and_dedupe() {
        let fields = NutritionField::parse_list(" calories, Fats,calories,, ").unwrap();
        assert_eq!(fields, vec![NutritionField::Calories, NutritionField::Fats]);
        assert!(NutritionField::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn unknown_nutrition_field_is_rejected() {
        let err = NutritionField::parse_list("calories; DROP TABLE users").unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case(" 7 ", Some(7))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("abc", None)]
    #[case("", None)]
    fn ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_id(raw, "bad id").ok(), expected);
    }
}
