//! Line comment removal
//!
//! Structural scanning runs on comment-stripped text so that `rpc` or
//! `message` keywords inside comments never produce phantom blocks.

/// Remove every line-trailing `//...` comment up to (not including) the
/// newline, preserving all other characters and line breaks exactly.
///
/// Pure function; a document without comments comes back unchanged.
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        match line.find("//") {
            Some(pos) => {
                out.push_str(&line[..pos]);
                if line.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}
