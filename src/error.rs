use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("max_colors must be at least 1, got {0}")]
    InvalidMaxColors(u32),

    #[error("unexpected hex color {0:?}: expected 3, 6 or 8 hex digits")]
    InvalidHex(String),

    #[error("image contains no opaque pixels")]
    EmptyImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ThemeError::InvalidMaxColors(0).to_string(),
            "max_colors must be at least 1, got 0"
        );
        assert_eq!(
            ThemeError::InvalidHex("#12".into()).to_string(),
            "unexpected hex color \"#12\": expected 3, 6 or 8 hex digits"
        );
        assert_eq!(
            ThemeError::EmptyImage.to_string(),
            "image contains no opaque pixels"
        );
    }
}
