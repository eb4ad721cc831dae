use super::{FieldCheck, ValidationReport};

/// Largest accepted image upload
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image content types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// An image file staged for upload, with just enough metadata to validate
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Raw product fields as staged by a form or decoded from a request.
/// Numbers stay strings here; parsing is part of validation.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    /// Present when editing an existing product
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category_id: String,
    pub is_personalizable: bool,
    pub details: String,
    pub image: Option<ImageFile>,
}

pub fn validate_name(name: &str) -> FieldCheck {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        FieldCheck::fail("The product name is required")
    } else if trimmed.chars().count() < 2 {
        FieldCheck::fail("The name must be at least 2 characters")
    } else if trimmed.chars().count() > 100 {
        FieldCheck::fail("The name cannot exceed 100 characters")
    } else {
        FieldCheck::ok()
    }
}

pub fn validate_description(description: &str) -> FieldCheck {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        FieldCheck::fail("The product description is required")
    } else if trimmed.chars().count() < 10 {
        FieldCheck::fail("The description must be at least 10 characters")
    } else if trimmed.chars().count() > 500 {
        FieldCheck::fail("The description cannot exceed 500 characters")
    } else {
        FieldCheck::ok()
    }
}

pub fn validate_price(price: &str) -> FieldCheck {
    if price.trim().is_empty() {
        return FieldCheck::fail("The price is required");
    }
    match price.trim().parse::<f64>() {
        Err(_) => FieldCheck::fail("The price must be a valid number"),
        Ok(value) if value <= 0.0 => FieldCheck::fail("The price must be greater than 0"),
        Ok(value) if value > 999_999.99 => {
            FieldCheck::fail("The price cannot exceed $999,999.99")
        }
        Ok(_) => FieldCheck::ok(),
    }
}

pub fn validate_stock(stock: &str) -> FieldCheck {
    if stock.trim().is_empty() {
        return FieldCheck::fail("The stock is required");
    }
    match stock.trim().parse::<i64>() {
        Err(_) => FieldCheck::fail("The stock must be a whole number"),
        Ok(value) if value < 0 => FieldCheck::fail("The stock cannot be negative"),
        Ok(value) if value > 999_999 => {
            FieldCheck::fail("The stock cannot exceed 999,999 units")
        }
        Ok(_) => FieldCheck::ok(),
    }
}

pub fn validate_category(category_id: &str) -> FieldCheck {
    if category_id.trim().is_empty() {
        FieldCheck::fail("A category must be selected")
    } else {
        FieldCheck::ok()
    }
}

/// The image is mandatory only for new products; an edit keeps the stored
/// one unless a replacement is staged.
pub fn validate_image(editing: bool, image: Option<&ImageFile>) -> FieldCheck {
    match image {
        None if !editing => FieldCheck::fail("A product image is required"),
        None => FieldCheck::ok(),
        Some(file) => {
            if file.size() > MAX_IMAGE_BYTES {
                FieldCheck::fail("The image cannot exceed 5MB")
            } else if !ALLOWED_IMAGE_TYPES.contains(&file.content_type.as_str()) {
                FieldCheck::fail("The image must be JPG, PNG, WebP or GIF")
            } else {
                FieldCheck::ok()
            }
        }
    }
}

pub fn validate_details(details: &str) -> FieldCheck {
    if details.chars().count() > 1000 {
        FieldCheck::fail("The details cannot exceed 1000 characters")
    } else {
        FieldCheck::ok()
    }
}

/// Run every product validator and aggregate the failures. Field keys
/// match the wire names the admin form renders against.
pub fn validate_product_data(input: &ProductInput) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.record("name", validate_name(&input.name));
    report.record("description", validate_description(&input.description));
    report.record("price", validate_price(&input.price));
    report.record("stock", validate_stock(&input.stock));
    report.record("categoryId", validate_category(&input.category_id));
    report.record("image", validate_image(input.id.is_some(), input.image.as_ref()));
    report.record("details", validate_details(&input.details));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProductInput {
        ProductInput {
            id: None,
            name: "AB".into(),
            description: "0123456789".into(),
            price: "19.99".into(),
            stock: "5".into(),
            category_id: "c1".into(),
            is_personalizable: false,
            details: String::new(),
            image: Some(ImageFile {
                file_name: "photo.jpg".into(),
                content_type: "image/jpeg".into(),
                bytes: vec![0u8; 1024 * 1024],
            }),
        }
    }

    #[test]
    fn minimal_valid_product_passes() {
        let report = validate_product_data(&valid_input());
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn price_rules() {
        for bad in ["", "abc", "0", "-5", "1000000"] {
            assert!(!validate_price(bad).is_valid, "price {:?} should fail", bad);
        }
        for good in ["0.01", "19.99", "999999.99"] {
            assert!(validate_price(good).is_valid, "price {:?} should pass", good);
        }
    }

    #[test]
    fn invalid_price_lands_in_error_map() {
        let mut input = valid_input();
        input.price = "not-a-price".into();
        let report = validate_product_data(&input);
        assert!(report.errors.contains_key("price"));

        input.price = "19.99".into();
        let report = validate_product_data(&input);
        assert!(!report.errors.contains_key("price"));
    }

    #[test]
    fn stock_rules() {
        for bad in ["", "5.5", "-1", "1000000"] {
            assert!(!validate_stock(bad).is_valid, "stock {:?} should fail", bad);
        }
        for good in ["0", "5", "999999"] {
            assert!(validate_stock(good).is_valid, "stock {:?} should pass", good);
        }
    }

    #[test]
    fn name_and_description_length_bounds() {
        assert!(!validate_name("").is_valid);
        assert!(!validate_name(" A ").is_valid);
        assert!(validate_name("AB").is_valid);
        assert!(!validate_name(&"x".repeat(101)).is_valid);

        assert!(!validate_description("too short").is_valid);
        assert!(validate_description("0123456789").is_valid);
        assert!(!validate_description(&"x".repeat(501)).is_valid);
    }

    #[test]
    fn image_required_only_on_create() {
        assert!(!validate_image(false, None).is_valid);
        assert!(validate_image(true, None).is_valid);
    }

    #[test]
    fn oversized_image_cites_limit() {
        let file = ImageFile {
            file_name: "big.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0u8; 6 * 1024 * 1024],
        };
        let check = validate_image(false, Some(&file));
        assert!(!check.is_valid);
        assert!(check.error.unwrap().contains("5MB"));
    }

    #[test]
    fn non_image_mime_rejected() {
        let file = ImageFile {
            file_name: "notes.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: vec![0u8; 100],
        };
        assert!(!validate_image(false, Some(&file)).is_valid);
    }

    #[test]
    fn details_optional_but_bounded() {
        assert!(validate_details("").is_valid);
        assert!(validate_details(&"x".repeat(1000)).is_valid);
        assert!(!validate_details(&"x".repeat(1001)).is_valid);
    }
}
