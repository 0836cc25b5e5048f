/// Output format a profile compiles to.
///
/// Parsed case-insensitively from the profile's `outputFormat`. Anything that
/// is not compiled locally is handed to the external converter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Clash,
    V2Ray,
    V2RayN,
    /// Delegated to the external converter, holds the lowercased target name
    Delegated(String),
}

impl OutputFormat {
    pub fn parse(format: &str) -> Self {
        let format = format.trim().to_lowercase();
        match format.as_str() {
            "clash" => OutputFormat::Clash,
            "v2ray" => OutputFormat::V2Ray,
            "v2rayn" => OutputFormat::V2RayN,
            _ => OutputFormat::Delegated(format),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OutputFormat::Clash => "clash",
            OutputFormat::V2Ray => "v2ray",
            OutputFormat::V2RayN => "v2rayn",
            OutputFormat::Delegated(target) => target,
        }
    }

    /// Content type of a locally compiled body.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::V2Ray => "application/json; charset=utf-8",
            OutputFormat::Clash | OutputFormat::V2RayN | OutputFormat::Delegated(_) => {
                "text/plain; charset=utf-8"
            }
        }
    }

    /// Extension of the suggested download filename.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Clash => "yaml",
            OutputFormat::V2Ray => "json",
            OutputFormat::V2RayN | OutputFormat::Delegated(_) => "txt",
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, OutputFormat::Delegated(_))
    }
}

impl From<&str> for OutputFormat {
    fn from(format: &str) -> Self {
        OutputFormat::parse(format)
    }
}
