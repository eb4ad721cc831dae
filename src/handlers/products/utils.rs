use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::ProductInput;

/// Typed fields extracted from an already-validated form. Parsing can
/// still fail here (a price in scientific notation, a non-UUID category
/// from a stale client); those surface as field errors, not 500s.
pub(super) struct ParsedFields {
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
}

pub(super) fn parse_fields(input: &ProductInput) -> Result<ParsedFields, ApiError> {
    let price = input
        .price
        .trim()
        .parse::<Decimal>()
        .map_err(|_| field_error("price", "The price must be a valid number"))?;

    let stock = input
        .stock
        .trim()
        .parse::<i64>()
        .map_err(|_| field_error("stock", "The stock must be a whole number"))? as i32;

    let category_id = Uuid::parse_str(input.category_id.trim())
        .map_err(|_| field_error("categoryId", "The category reference is not valid"))?;

    Ok(ParsedFields {
        price,
        stock,
        category_id,
    })
}

fn field_error(field: &str, message: &str) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert(field.to_string(), message.to_string());
    ApiError::validation_error("Please correct the errors in the form", Some(field_errors))
}

pub(super) fn normalized_details(input: &ProductInput) -> Option<String> {
    let details = input.details.trim();
    if details.is_empty() {
        None
    } else {
        Some(details.to_string())
    }
}
