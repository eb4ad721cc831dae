use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Category, ClientAccount, NewProduct, Order, ProductChanges, ProductWithCategory,
};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.stock, p.category_id, \
     c.name AS category_name, p.is_personalizable, p.details, p.image_url, p.rating, \
     p.created_at, p.updated_at";

// ---- products ----

pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductWithCategory>, DatabaseError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id \
         ORDER BY p.created_at DESC"
    );
    Ok(sqlx::query_as::<_, ProductWithCategory>(&sql).fetch_all(pool).await?)
}

pub async fn get_product(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ProductWithCategory>, DatabaseError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id \
         WHERE p.id = $1"
    );
    Ok(sqlx::query_as::<_, ProductWithCategory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn insert_product(
    pool: &PgPool,
    new: &NewProduct,
) -> Result<ProductWithCategory, DatabaseError> {
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO products \
           (id, name, description, price, stock, category_id, is_personalizable, details, image_url, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now(), now()) \
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.price)
    .bind(new.stock)
    .bind(new.category_id)
    .bind(new.is_personalizable)
    .bind(&new.details)
    .bind(&new.image_url)
    .fetch_one(pool)
    .await?;

    get_product(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("product {} vanished after insert", id)))
}

pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    changes: &ProductChanges,
) -> Result<ProductWithCategory, DatabaseError> {
    let updated = sqlx::query(
        "UPDATE products SET \
           name = $2, description = $3, price = $4, stock = $5, category_id = $6, \
           is_personalizable = $7, details = $8, \
           image_url = COALESCE($9, image_url), updated_at = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.price)
    .bind(changes.stock)
    .bind(changes.category_id)
    .bind(changes.is_personalizable)
    .bind(&changes.details)
    .bind(&changes.image_url)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(DatabaseError::NotFound(format!("product {} not found", id)));
    }

    get_product(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("product {} not found", id)))
}

pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(DatabaseError::NotFound(format!("product {} not found", id)));
    }
    Ok(())
}

// ---- categories ----

pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, DatabaseError> {
    Ok(
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await?,
    )
}

// ---- clients ----

pub async fn get_client(pool: &PgPool, id: Uuid) -> Result<Option<ClientAccount>, DatabaseError> {
    Ok(sqlx::query_as::<_, ClientAccount>(
        "SELECT id, full_name, email, phone, address, profile_picture, created_at \
         FROM clients WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Email is immutable and deliberately absent from the update set.
pub async fn update_client_profile(
    pool: &PgPool,
    id: Uuid,
    full_name: &str,
    phone: &str,
    address: &str,
    profile_picture: Option<&str>,
) -> Result<ClientAccount, DatabaseError> {
    let updated = sqlx::query(
        "UPDATE clients SET \
           full_name = $2, phone = $3, address = $4, \
           profile_picture = COALESCE($5, profile_picture) \
         WHERE id = $1",
    )
    .bind(id)
    .bind(full_name)
    .bind(phone)
    .bind(address)
    .bind(profile_picture)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(DatabaseError::NotFound(format!("client {} not found", id)));
    }

    get_client(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("client {} not found", id)))
}

pub async fn count_clients(pool: &PgPool) -> Result<i64, DatabaseError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM clients")
        .fetch_one(pool)
        .await?)
}

/// New-client registrations bucketed by calendar month, oldest first.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

pub async fn new_clients_by_month(
    pool: &PgPool,
    months: i32,
) -> Result<Vec<MonthlyCount>, DatabaseError> {
    Ok(sqlx::query_as::<_, MonthlyCount>(
        "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, \
                COUNT(*) AS count \
         FROM clients \
         WHERE created_at >= date_trunc('month', now()) - make_interval(months => $1) \
         GROUP BY 1 ORDER BY 1",
    )
    .bind(months)
    .fetch_all(pool)
    .await?)
}

// ---- orders ----

pub async fn get_order(pool: &PgPool, id: Uuid) -> Result<Option<Order>, DatabaseError> {
    Ok(sqlx::query_as::<_, Order>(
        "SELECT id, client_id, items, shipping, created_at FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

pub async fn list_orders(pool: &PgPool) -> Result<Vec<Order>, DatabaseError> {
    Ok(sqlx::query_as::<_, Order>(
        "SELECT id, client_id, items, shipping, created_at FROM orders ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn count_orders(pool: &PgPool) -> Result<i64, DatabaseError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?)
}

pub async fn count_products(pool: &PgPool) -> Result<i64, DatabaseError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?)
}

// ---- dashboard widgets ----

/// Product ranked by units sold across all orders
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BestSeller {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub units_sold: i64,
}

pub async fn best_sellers(pool: &PgPool, limit: i64) -> Result<Vec<BestSeller>, DatabaseError> {
    Ok(sqlx::query_as::<_, BestSeller>(
        "SELECT p.id, p.name, p.price, p.image_url, \
                SUM((item->>'quantity')::int)::bigint AS units_sold \
         FROM orders o \
         CROSS JOIN LATERAL jsonb_array_elements(o.items) AS item \
         JOIN products p ON p.id = (item->>'product_id')::uuid \
         GROUP BY p.id, p.name, p.price, p.image_url \
         ORDER BY units_sold DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

pub async fn top_rated(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ProductWithCategory>, DatabaseError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id \
         WHERE p.rating IS NOT NULL \
         ORDER BY p.rating DESC \
         LIMIT $1"
    );
    Ok(sqlx::query_as::<_, ProductWithCategory>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await?)
}
