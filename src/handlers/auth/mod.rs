pub mod user_info;

pub use user_info::user_info;
