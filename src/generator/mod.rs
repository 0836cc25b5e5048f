//! Config compilation: resolved nodes plus a profile's rule selection in,
//! one client configuration (or a delegated converter response) out.

pub mod config;
pub mod exports;
pub mod yaml;

use thiserror::Error;

use crate::models::{OutputFormat, ProfileRecord, ResolvedNode};
use crate::rulesets::RuleSetTable;
use crate::utils::http::{FetchError, HttpClient, HttpResponse};

// Re-export format converters
pub use config::formats::{
    delegate_url, proxy_to_clash_string, proxy_to_clash_yaml, proxy_to_single,
    proxy_to_v2ray_json, proxy_to_v2ray_string, proxy_to_v2rayn,
};
pub use exports::{proxy_to_clash, proxy_to_v2ray};

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid converter address: {0}")]
    ConverterUrl(#[from] url::ParseError),

    #[error("Converter request failed: {0}")]
    Delegate(#[from] FetchError),
}

/// A locally compiled configuration with its framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledConfig {
    pub body: String,
    pub content_type: &'static str,
    pub file_extension: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    Config(CompiledConfig),
    /// Response of the external converter, to be relayed as-is
    Delegated(HttpResponse),
}

/// Compiles nodes into the output format a profile asks for.
pub struct ConfigCompiler<'a, H> {
    rule_sets: &'a RuleSetTable,
    http: &'a H,
    converter_host: &'a str,
}

impl<'a, H: HttpClient> ConfigCompiler<'a, H> {
    pub fn new(rule_sets: &'a RuleSetTable, http: &'a H, converter_host: &'a str) -> Self {
        Self {
            rule_sets,
            http,
            converter_host,
        }
    }

    /// Compiles `nodes` for `profile`.
    ///
    /// Formats that are not built locally are sent to the external converter
    /// with `request_headers`; its response is returned untouched, error
    /// statuses included.
    pub async fn compile(
        &self,
        nodes: &[ResolvedNode],
        profile: &ProfileRecord,
        request_headers: &[(String, String)],
    ) -> Result<Compiled, CompileError> {
        let format = OutputFormat::parse(&profile.output_format);
        let body = match &format {
            OutputFormat::Clash => proxy_to_clash_string(nodes, profile, self.rule_sets)?,
            OutputFormat::V2Ray => proxy_to_v2ray_string(nodes)?,
            OutputFormat::V2RayN => proxy_to_v2rayn(nodes),
            OutputFormat::Delegated(target) => {
                let url = delegate_url(self.converter_host, target, nodes, &profile.name)?;
                let response = config::formats::forward(self.http, &url, request_headers).await?;
                return Ok(Compiled::Delegated(response));
            }
        };

        Ok(Compiled::Config(CompiledConfig {
            body,
            content_type: format.content_type(),
            file_extension: format.file_extension(),
        }))
    }
}
