pub mod explodes;
pub mod sub_cache;
pub mod subparser;

pub use explodes::{explode, explode_node};
pub use sub_cache::{cache_key, SubscriptionCache, DEFAULT_CACHE_TTL};
pub use subparser::{split_subscription, NodeResolver};
