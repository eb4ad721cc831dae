pub mod stats;
pub mod update_profile;

pub use stats::{detailed_stats, new_clients_stats, total_clients};
pub use update_profile::update_profile;
