//! Content-Type lookup by file extension.

use mime_guess::mime;
use std::path::Path;

/// Returns the content type for `path` based on its extension.
///
/// Textual types are tagged as UTF-8. An unknown or missing extension yields
/// an empty string, which the serializer treats as "use the default".
///
/// ```
/// # use staticd::http::mime::content_type_for;
/// assert_eq!(content_type_for("file/index.html"), "text/html; charset=utf-8");
/// assert_eq!(content_type_for("file/logo.png"), "image/png");
/// assert_eq!(content_type_for("file/README"), "");
/// ```
pub fn content_type_for(path: impl AsRef<Path>) -> String {
    match mime_guess::from_path(path).first() {
        Some(guess) if guess.type_() == mime::TEXT && guess.get_param(mime::CHARSET).is_none() => {
            format!("{}; charset=utf-8", guess.essence_str())
        }
        Some(guess) => guess.to_string(),
        None => String::new(),
    }
}
