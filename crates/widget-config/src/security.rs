//! Escaping utilities for values that end up inside HTML.
//!
//! Every value written into an attribute of the embed snippet or of the
//! preview surface MUST go through [`html::escape_attr`]. Theme values
//! written into stylesheets go through [`css::sanitize_value`].

/// HTML attribute escaping.
pub mod html {
    /// Escape a string for use inside a double-quoted attribute value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use goguide_widget_config::security::html;
    ///
    /// let safe = html::escape_attr(r#"'Inter', "PT Sans""#);
    /// assert_eq!(safe, "'Inter', &quot;PT Sans&quot;");
    /// ```
    #[must_use]
    pub fn escape_attr(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '"' => escaped.push_str("&quot;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Decode character references in an attribute value.
    ///
    /// Handles the named references attribute escaping produces plus decimal
    /// and hexadecimal numeric references. Anything unrecognized is kept
    /// literally.
    #[must_use]
    pub fn unescape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(amp) = rest.find('&') {
            out.push_str(&rest[..amp]);
            let tail = &rest[amp..];
            match tail.find(';').filter(|&end| end <= 10) {
                Some(end) => match decode_reference(&tail[1..end]) {
                    Some(ch) => {
                        out.push(ch);
                        rest = &tail[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                },
                None => {
                    out.push('&');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn decode_reference(name: &str) -> Option<char> {
        match name {
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "nbsp" => Some('\u{a0}'),
            _ => {
                let digits = name.strip_prefix('#')?;
                let code = match digits.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                    None => digits.parse().ok()?,
                };
                char::from_u32(code)
            }
        }
    }
}

/// CSS value hygiene.
pub mod css {
    /// Strip characters that could end a declaration, a rule or a `<style>`
    /// element from a theme value.
    ///
    /// ```rust
    /// use goguide_widget_config::security::css;
    ///
    /// assert_eq!(css::sanitize_value("#fff; } body { display:none"), "#fff  body  display:none");
    /// assert_eq!(css::sanitize_value("0 10px 40px rgba(0,0,0,0.25)"), "0 10px 40px rgba(0,0,0,0.25)");
    /// ```
    #[must_use]
    pub fn sanitize_value(value: &str) -> String {
        value
            .chars()
            .filter(|&ch| !matches!(ch, ';' | '{' | '}' | '<' | '>' | '\\') && !ch.is_control())
            .collect::<String>()
            .trim()
            .to_string()
    }
}
