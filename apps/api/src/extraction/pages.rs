/// Joins parsed pages into one string, each page preceded by a
/// `=== Page N ===` header (1-based).
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut out = String::new();
    for (index, page) in pages.iter().enumerate() {
        out.push_str(&format!("=== Page {} ===\n{}\n\n", index + 1, page.as_ref()));
    }
    out
}
