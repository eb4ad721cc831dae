use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::validation::{validate_product_data, ImageFile, ProductInput};

use super::error::ClientError;
use super::http::{self, ApiClient};
use super::models::{ApiCategory, ApiProduct, CategoryRef};

/// Which admin screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    List,
    Form,
}

/// In-progress product edits. Numbers stay strings here, exactly as the
/// form inputs hold them; validation parses them.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
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

impl ProductForm {
    fn to_input(&self) -> ProductInput {
        ProductInput {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            stock: self.stock.clone(),
            category_id: self.category_id.clone(),
            is_personalizable: self.is_personalizable,
            details: self.details.clone(),
            image: self.image.clone(),
        }
    }
}

/// Controller behind the product admin screens: owns the cached lists, the
/// staged form, validation state, and every catalog CRUD call.
pub struct ProductAdmin {
    api: ApiClient,
    pub active_tab: ActiveTab,
    pub form: ProductForm,
    pub products: Vec<ApiProduct>,
    pub categories: Vec<ApiCategory>,
    pub loading: bool,
    pub validation_errors: HashMap<String, String>,
    pub is_submitting: bool,
}

impl ProductAdmin {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            active_tab: ActiveTab::List,
            form: ProductForm::default(),
            products: Vec::new(),
            categories: Vec::new(),
            loading: false,
            validation_errors: HashMap::new(),
            is_submitting: false,
        }
    }

    /// Initial load: products and categories fetched concurrently. Either
    /// list degrades to empty on failure; the first error is surfaced.
    pub async fn initialize(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let (products, categories) =
            futures::join!(load_products(&self.api), load_categories(&self.api));
        self.loading = false;

        let mut first_error = None;
        match products {
            Ok(list) => self.products = list,
            Err(e) => {
                self.products.clear();
                first_error = Some(e);
            }
        }
        match categories {
            Ok(list) => self.categories = list,
            Err(e) => {
                self.categories.clear();
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub async fn fetch_products(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = load_products(&self.api).await;
        self.loading = false;

        match result {
            Ok(list) => {
                self.products = list;
                Ok(())
            }
            Err(e) => {
                self.products.clear();
                Err(e)
            }
        }
    }

    pub async fn fetch_categories(&mut self) -> Result<(), ClientError> {
        match load_categories(&self.api).await {
            Ok(list) => {
                self.categories = list;
                Ok(())
            }
            Err(e) => {
                self.categories.clear();
                Err(e)
            }
        }
    }

    pub fn reset_form(&mut self) {
        self.form = ProductForm::default();
        self.validation_errors.clear();
    }

    /// Validate and create. Nothing goes over the wire when validation
    /// fails; on success the returned record is enriched with the matching
    /// category name and appended to the cached list.
    pub async fn create_product(&mut self) -> Result<Option<String>, ClientError> {
        // One submission in flight at a time
        if self.is_submitting {
            return Ok(None);
        }

        let input = self.form.to_input();
        let report = validate_product_data(&input);
        if !report.is_valid() {
            self.validation_errors = report.errors.clone();
            return Err(ClientError::Validation(report));
        }

        self.is_submitting = true;
        self.validation_errors.clear();
        let result = self.submit_create(&input).await;
        self.is_submitting = false;

        let body = result?;
        let message = http::response_message(&body);
        let record = http::decode_record(body);

        match serde_json::from_value::<ApiProduct>(record) {
            Ok(product) => {
                let enriched =
                    enrich_with_category(&self.categories, &input.category_id, product);
                self.products.push(enriched);
            }
            Err(e) => tracing::warn!("Could not decode the created product: {}", e),
        }

        self.reset_form();
        self.active_tab = ActiveTab::List;

        Ok(message.or_else(|| Some("Product created successfully".to_string())))
    }

    async fn submit_create(&self, input: &ProductInput) -> Result<Value, ClientError> {
        let form = multipart_form(input)?;
        let response = self
            .api
            .http()
            .post(self.api.url("/products"))
            .multipart(form)
            .send()
            .await?;
        http::handle_response(response).await
    }

    /// Delete by id, then re-fetch the whole list; there is no local splice.
    pub async fn delete_product(&mut self, id: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!("/products/{}", id)))
            .send()
            .await?;
        let body = http::handle_response(response).await?;
        let message =
            http::response_message(&body).or_else(|| Some("Product deleted".to_string()));

        self.fetch_products().await?;
        Ok(message)
    }

    /// Pure state population: copy an existing record into the form and
    /// switch to the form tab. No network.
    pub fn begin_edit(&mut self, product: &ApiProduct) {
        self.form = ProductForm {
            id: Some(product.id.clone()),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category_id: product.category.id().to_string(),
            is_personalizable: product.is_personalizable,
            details: product.details.clone().unwrap_or_default(),
            // The stored image stays unless a replacement is staged
            image: None,
        };
        self.validation_errors.clear();
        self.active_tab = ActiveTab::Form;
    }

    /// Persist a staged edit: multipart when a new image was selected,
    /// JSON otherwise. Failure leaves the form open with its state intact.
    pub async fn save_edit(&mut self) -> Result<Option<String>, ClientError> {
        if self.is_submitting {
            return Ok(None);
        }

        let input = self.form.to_input();
        let report = validate_product_data(&input);
        if !report.is_valid() {
            self.validation_errors = report.errors.clone();
            return Err(ClientError::Validation(report));
        }

        let Some(id) = self.form.id.clone() else {
            return Err(ClientError::Unsupported(
                "No product id staged for editing".to_string(),
            ));
        };

        self.is_submitting = true;
        self.validation_errors.clear();
        let result = self.submit_edit(&id, &input).await;
        self.is_submitting = false;

        let body = result?;
        let message =
            http::response_message(&body).or_else(|| Some("Product updated".to_string()));

        self.reset_form();
        self.active_tab = ActiveTab::List;
        self.fetch_products().await?;

        Ok(message)
    }

    async fn submit_edit(&self, id: &str, input: &ProductInput) -> Result<Value, ClientError> {
        let url = self.api.url(&format!("/products/{}", id));

        let response = if input.image.is_some() {
            self.api
                .http()
                .put(url)
                .multipart(multipart_form(input)?)
                .send()
                .await?
        } else {
            // Text-only edits travel as JSON
            let body = json!({
                "name": input.name.trim(),
                "description": input.description.trim(),
                "price": input.price.trim().parse::<f64>().unwrap_or(0.0),
                "stock": input.stock.trim().parse::<i64>().unwrap_or(0),
                "categoryId": input.category_id,
                "isPersonalizable": input.is_personalizable,
                "details": input.details,
            });
            self.api.http().put(url).json(&body).send().await?
        };

        http::handle_response(response).await
    }
}

async fn load_products(api: &ApiClient) -> Result<Vec<ApiProduct>, ClientError> {
    let response = api.http().get(api.url("/products")).send().await?;
    let body = http::handle_response(response).await?;
    Ok(http::decode_list(body))
}

async fn load_categories(api: &ApiClient) -> Result<Vec<ApiCategory>, ClientError> {
    let response = api.http().get(api.url("/categories")).send().await?;
    let body = http::handle_response(response).await?;
    Ok(http::decode_list(body))
}

/// Replace a bare category reference with the `{_id, name}` pair from the
/// already-fetched category list, when the id matches.
fn enrich_with_category(
    categories: &[ApiCategory],
    category_id: &str,
    mut product: ApiProduct,
) -> ApiProduct {
    if let Some(category) = categories.iter().find(|c| c.id == category_id) {
        product.category = CategoryRef::Populated {
            id: category.id.clone(),
            name: category.name.clone(),
        };
    }
    product
}

fn multipart_form(input: &ProductInput) -> Result<Form, ClientError> {
    let mut form = Form::new()
        .text("name", input.name.trim().to_string())
        .text("description", input.description.trim().to_string())
        .text("price", input.price.trim().to_string())
        .text("stock", input.stock.trim().to_string())
        .text("categoryId", input.category_id.clone())
        .text(
            "isPersonalizable",
            if input.is_personalizable { "true" } else { "false" },
        )
        .text("details", input.details.clone());

    if let Some(image) = &input.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ClientError::Unsupported(format!("Unsupported image type: {}", e)))?;
        form = form.part("images", part);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> ProductAdmin {
        // Port 9 is discard; nothing should ever connect in these tests
        ProductAdmin::new(ApiClient::new("http://127.0.0.1:9/api"))
    }

    fn sample_product(id: &str, category: CategoryRef) -> ApiProduct {
        ApiProduct {
            id: id.to_string(),
            name: "Dried lavender bouquet".into(),
            description: "A bouquet of dried lavender".into(),
            price: "19.99".parse().unwrap(),
            stock: 5,
            category,
            is_personalizable: false,
            details: None,
            image: None,
            rating: None,
        }
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let mut admin = admin();
        admin.form.name = "A".into(); // too short, and everything else is empty

        let err = admin.create_product().await.unwrap_err();
        match err {
            ClientError::Validation(report) => {
                assert!(report.errors.contains_key("name"));
                assert!(report.errors.contains_key("price"));
            }
            other => panic!("expected a validation failure, got {:?}", other),
        }
        assert!(!admin.is_submitting);
        // A failed validation leaves the screen where it was
        assert_eq!(admin.active_tab, ActiveTab::List);
        assert_eq!(admin.form.name, "A");
    }

    #[test]
    fn begin_edit_populates_form_and_switches_tab() {
        let mut admin = admin();
        let product = sample_product(
            "p1",
            CategoryRef::Populated { id: "c1".into(), name: "Flowers".into() },
        );

        admin.begin_edit(&product);

        assert_eq!(admin.active_tab, ActiveTab::Form);
        assert_eq!(admin.form.id.as_deref(), Some("p1"));
        assert_eq!(admin.form.price, "19.99");
        assert_eq!(admin.form.stock, "5");
        assert_eq!(admin.form.category_id, "c1");
        assert!(admin.form.image.is_none());
        assert!(admin.validation_errors.is_empty());
    }

    #[test]
    fn created_product_is_enriched_with_category_name() {
        let categories = vec![
            ApiCategory { id: "c1".into(), name: "Flowers".into() },
            ApiCategory { id: "c2".into(), name: "Frames".into() },
        ];
        let product = sample_product("p9", CategoryRef::Id("c1".into()));

        let enriched = enrich_with_category(&categories, "c1", product);
        assert_eq!(enriched.category.name(), Some("Flowers"));

        let unmatched = sample_product("p10", CategoryRef::Id("missing".into()));
        let untouched = enrich_with_category(&categories, "missing", unmatched);
        assert_eq!(untouched.category.name(), None);
    }
}
