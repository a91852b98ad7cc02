pub type GlyphdriftResult<T> = Result<T, GlyphdriftError>;

#[derive(thiserror::Error, Debug)]
pub enum GlyphdriftError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("font error: {0}")]
    Font(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphdriftError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            GlyphdriftError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(GlyphdriftError::font("x").to_string().contains("font error:"));
        assert!(
            GlyphdriftError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GlyphdriftError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
