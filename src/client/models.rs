use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product as it travels over the wire. Ids are the store's string ids;
/// numbers that back form fields stay close to their wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "categoryId")]
    pub category: CategoryRef,
    #[serde(rename = "isPersonalizable", default)]
    pub is_personalizable: bool,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A product's category arrives either populated (`{_id, name}`) or as the
/// bare reference id, depending on whether the backend resolved the join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        name: String,
    },
    Id(String),
}

impl CategoryRef {
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated { id, .. } => id,
            CategoryRef::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Populated { name, .. } => Some(name),
            CategoryRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Logged-in client profile as `/api/login/user-info` reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "profilePicture", default)]
    pub profile_picture: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_ref_handles_both_wire_shapes() {
        let populated: CategoryRef =
            serde_json::from_value(json!({ "_id": "c1", "name": "Flowers" })).unwrap();
        assert_eq!(populated.id(), "c1");
        assert_eq!(populated.name(), Some("Flowers"));

        let bare: CategoryRef = serde_json::from_value(json!("c2")).unwrap();
        assert_eq!(bare.id(), "c2");
        assert_eq!(bare.name(), None);
    }

    #[test]
    fn product_decodes_string_prices() {
        let p: ApiProduct = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Dried lavender bouquet",
            "description": "A bouquet of dried lavender",
            "price": "19.99",
            "stock": 5,
            "categoryId": "c1",
        }))
        .unwrap();
        assert_eq!(p.price, "19.99".parse::<Decimal>().unwrap());
        assert_eq!(p.category.id(), "c1");
    }
}
