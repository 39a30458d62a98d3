use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("browser window is unavailable")]
    MissingWindow,
    #[error("document is unavailable")]
    MissingDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("storage write failed for key `{key}`: {reason}")]
    Storage { key: String, reason: String },
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_names_selector() {
        let err = PageError::MissingElement(".hero-background".to_string());
        assert_eq!(err.to_string(), "missing element `.hero-background`");
    }

    #[test]
    fn config_error_wraps_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = PageError::from(json_err);
        assert!(err.to_string().starts_with("invalid site config:"));
    }
}
