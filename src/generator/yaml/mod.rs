pub mod clash;

pub use clash::{ClashProxy, ClashProxyGroup, ClashYamlOutput, CommonProxyOptions, RuleProvider, WsOptions};
