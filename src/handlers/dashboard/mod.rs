pub mod summary;
pub mod wheel;
pub mod widgets;

pub use summary::summary;
pub use wheel::{get_wheel, set_wheel};
pub use widgets::{best_sellers, top_rated};
