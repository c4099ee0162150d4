//! Telegram MarkdownV2 escaping.

/// Escapes every MarkdownV2 special character so `text` renders literally.
///
/// # Example
/// ```
/// use sport_slot_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("Sporthal (Noord) 19:00-20:00"), "Sporthal \\(Noord\\) 19:00\\-20:00");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}

/// Escapes the URL part of an inline link, where MarkdownV2 only reserves
/// `)` and `\`.
pub fn escape_link_url(url: &str) -> String {
    url.replace('\\', "\\\\").replace(')', "\\)")
}

/// Renders an inline link with escaped label and target.
pub fn link(label: &str, url: &str) -> String {
    format!("[{}]({})", escape_markdown(label), escape_link_url(url))
}
