//! Filename sanitization for download links

use crate::error::RelayError;

/// Strip characters that are unsafe in filenames, keeping alphanumerics
/// (any script), spaces, hyphens and underscores.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Build a safe "{title}.{ext}" filename from a raw video title.
pub fn to_safe_filename(title: &str, ext: &str) -> Result<String, RelayError> {
    let stem = sanitize_title(title);
    if stem.is_empty() {
        return Err(RelayError::InvalidInput(
            "video title produces an empty filename".to_string(),
        ));
    }
    Ok(format!("{}.{}", stem, ext.trim_start_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("My Video"), "My Video");
        assert_eq!(sanitize_title("a/b\\c:d*e?f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_title("snake_case-name 1"), "snake_case-name 1");
        assert_eq!(sanitize_title("trailing!!! "), "trailing");
        assert_eq!(sanitize_title("***"), "");
    }

    #[test]
    fn test_sanitize_title_keeps_unicode() {
        assert_eq!(sanitize_title("日本語のタイトル"), "日本語のタイトル");
        assert_eq!(sanitize_title("café & crème"), "café  crème");
    }

    #[test]
    fn test_to_safe_filename() {
        assert_eq!(to_safe_filename("My Video", "mp4").unwrap(), "My Video.mp4");
        assert_eq!(to_safe_filename("clip", ".webm").unwrap(), "clip.webm");
        assert!(matches!(
            to_safe_filename("???", "mp4"),
            Err(RelayError::InvalidInput(_))
        ));
    }
}
