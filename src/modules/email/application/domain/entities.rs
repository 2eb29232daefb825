use serde::Serialize;

/// An activation message waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationMail {
    pub to: String,
    pub activation_url: String,
}

impl ActivationMail {
    pub fn new(to: impl Into<String>, activation_url: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            activation_url: activation_url.into(),
        }
    }

    /// `<api_url>/api/user/activate/<link>`; a trailing slash on `api_url` is ignored.
    pub fn for_link(to: impl Into<String>, api_url: &str, link: &str) -> Self {
        let base = api_url.trim_end_matches('/');
        Self::new(to, format!("{base}/api/user/activate/{link}"))
    }
}
