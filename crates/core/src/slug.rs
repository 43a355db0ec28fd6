/// Derives the anchor id for a heading.
///
/// Lowercases the text, collapses every run of characters outside `[a-z0-9]`
/// into a single `-`, and drops leading/trailing dashes. Both the rendered
/// headings and the table of contents go through this function.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}
