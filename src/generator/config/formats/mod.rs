pub mod clash;
pub mod delegate;
pub mod single;
pub mod v2ray;
pub mod v2rayn;

// Re-export all format converters
pub use clash::{proxy_to_clash_string, proxy_to_clash_yaml};
pub use delegate::{delegate_url, forward, forwardable_headers};
pub use single::proxy_to_single;
pub use v2ray::{proxy_to_v2ray_json, proxy_to_v2ray_string};
pub use v2rayn::{node_list, proxy_to_v2rayn};
