pub mod base64;
pub mod http;
pub mod http_std;
pub mod url;

// Re-export common utilities
pub use http::{FetchError, HttpClient, HttpResponse};
pub use http_std::ReqwestClient;
pub use url::{url_decode, url_encode};
