pub mod category;
pub mod client;
pub mod order;
pub mod product;

pub use category::Category;
pub use client::ClientAccount;
pub use order::{Order, OrderItem, OrderSummary};
pub use product::{NewProduct, ProductChanges, ProductWithCategory};
