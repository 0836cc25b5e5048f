pub mod proxy_to_clash;
pub mod proxy_to_v2ray;

pub use proxy_to_clash::proxy_to_clash;
pub use proxy_to_v2ray::proxy_to_v2ray;
