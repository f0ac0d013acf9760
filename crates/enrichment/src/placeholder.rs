use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Data URI for a fetched image body.
pub fn image_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Deterministic fallback graphic for a product whose image could not be
/// fetched: a gradient tile carrying the first character of the product
/// name, uppercased.
pub fn placeholder_data_uri(product_name: &str) -> String {
    let initial = product_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    let initial = escape_xml(&initial);

    let svg = format!(
        r##"<svg width="200" height="150" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" style="stop-color:#3B82F6;stop-opacity:1" />
      <stop offset="100%" style="stop-color:#1D4ED8;stop-opacity:1" />
    </linearGradient>
  </defs>
  <rect width="200" height="150" fill="url(#grad)"/>
  <text x="100" y="80" font-family="Arial, sans-serif" font-size="16" font-weight="bold" text-anchor="middle" fill="white">{initial}</text>
</svg>"##
    );

    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_deterministic() {
        assert_eq!(placeholder_data_uri("Laptop"), placeholder_data_uri("Laptop"));
        assert_ne!(placeholder_data_uri("Laptop"), placeholder_data_uri("Mouse"));
    }

    #[test]
    fn placeholder_uses_uppercased_initial() {
        let uri = placeholder_data_uri("keyboard");
        let encoded = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains(">K</text>"));
    }

    #[test]
    fn empty_name_falls_back_to_question_mark() {
        let uri = placeholder_data_uri("");
        let encoded = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains(">?</text>"));
    }
}
