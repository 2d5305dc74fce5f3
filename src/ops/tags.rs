/// Split a comma-separated tag entry into tags.
///
/// Each piece is trimmed, empty pieces are dropped, and a tag repeated later
/// in the input is kept only at its first position. Case is preserved.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for piece in input.split(',') {
        let tag = piece.trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Join tags back into the editable `a, b, c` form
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}
