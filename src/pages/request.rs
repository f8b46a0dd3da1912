//! Request parameters as seen by the page assemblers.

use serde::{Deserialize, Serialize};

/// Query and server parameters of one page request.
///
/// The transport that fills this in is not part of the crate; the CLI builds
/// it from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// `action` query parameter; `None` selects the category page.
    #[serde(default)]
    pub action: Option<String>,
    /// `module` query parameter: a module token of any specificity.
    #[serde(default)]
    pub module: String,
    /// `include_vers` query parameter; true only for the literal `true`.
    #[serde(default)]
    pub include_vers: bool,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub server_port: String,
    #[serde(default)]
    pub script_name: String,
}

impl RequestParams {
    /// Parameters for `action` on `module`.
    pub fn new(action: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            module: module.into(),
            ..Self::default()
        }
    }

    /// Interpret a raw `include_vers` value.
    pub fn parse_include_vers(value: Option<&str>) -> bool {
        value == Some("true")
    }

    /// Absolute URI of the page script, used for links back to the browser.
    ///
    /// ```rust
    /// use isoftrepo::pages::RequestParams;
    ///
    /// let request = RequestParams {
    ///     server_name: "repo.example.org".to_string(),
    ///     server_port: "443".to_string(),
    ///     script_name: "isoftrepo".to_string(),
    ///     ..RequestParams::default()
    /// };
    /// assert_eq!(request.server_script_uri(), "https://repo.example.org/isoftrepo");
    /// ```
    pub fn server_script_uri(&self) -> String {
        let scheme = if self.server_port == "443" {
            "https"
        } else {
            "http"
        };
        let separator = if self.script_name.starts_with('/') {
            ""
        } else {
            "/"
        };
        format!("{scheme}://{}{separator}{}", self.server_name, self.script_name)
    }
}
