use serde_json::{json, Value};

use crate::database::models::{ClientAccount, ProductWithCategory};
use crate::database::repository::BestSeller;

/// Convert a product row into the public wire format. The store predates
/// this service and its consumers key on `_id`; the category reference is
/// embedded as `{_id, name}` when the join resolved, and falls back to the
/// bare id otherwise.
pub fn product_to_api_value(product: &ProductWithCategory) -> Value {
    json!({
        "_id": product.id,
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "stock": product.stock,
        "categoryId": category_ref(product),
        "isPersonalizable": product.is_personalizable,
        "details": product.details,
        "image": product.image_url,
        "rating": product.rating,
        "createdAt": product.created_at,
        "updatedAt": product.updated_at,
    })
}

fn category_ref(product: &ProductWithCategory) -> Value {
    match &product.category_name {
        Some(name) => json!({ "_id": product.category_id, "name": name }),
        None => json!(product.category_id),
    }
}

/// Convert a list of product rows to API values
pub fn products_to_api_values(products: &[ProductWithCategory]) -> Vec<Value> {
    products.iter().map(product_to_api_value).collect()
}

/// Categories go out as `{_id, name}` pairs for form selection
pub fn category_to_api_value(category: &crate::database::models::Category) -> Value {
    json!({ "_id": category.id, "name": category.name })
}

pub fn categories_to_api_values(categories: &[crate::database::models::Category]) -> Vec<Value> {
    categories.iter().map(category_to_api_value).collect()
}

/// Client account in the shape the profile screens read
pub fn client_to_api_value(client: &ClientAccount) -> Value {
    json!({
        "id": client.id,
        "name": client.full_name,
        "email": client.email,
        "phone": client.phone,
        "address": client.address,
        "profilePicture": client.profile_picture,
        "createdAt": client.created_at,
    })
}

/// Best-seller widget entry
pub fn best_seller_to_api_value(entry: &BestSeller) -> Value {
    json!({
        "_id": entry.id,
        "name": entry.name,
        "price": entry.price,
        "image": entry.image_url,
        "unitsSold": entry.units_sold,
    })
}
