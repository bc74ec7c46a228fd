//! Banner formatting for step announcements

/// Width of banner headers
const HEADER_WIDTH: usize = 79;

/// Render a centered banner line, e.g. `==== text ====`
pub fn header(text: &str, decor: char) -> String {
  let text = format!(" {} ", text);
  if text.len() >= HEADER_WIDTH {
    return text;
  }
  let pad = HEADER_WIDTH - text.len();
  let left = pad / 2;
  let right = pad - left;
  format!(
    "{}{}{}",
    decor.to_string().repeat(left),
    text,
    decor.to_string().repeat(right)
  )
}
