//! Inline style and class-list helpers
//!
//! Inline styles are kept in the `style` attribute as `name: value;` pairs.

/// Convert a camelCase style key (`backgroundColor`) to its CSS property
/// name (`background-color`). Already-hyphenated names pass through.
pub fn css_property_name(key: &str) -> String {
    let key = key.trim();
    let mut name = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Parse a `style` attribute into ordered (property, value) pairs
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name, value.to_string()))
            }
        })
        .collect()
}

/// Render declarations back into `style` attribute form
pub fn format_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge style updates into an existing `style` attribute.
///
/// Existing properties are updated in place, new ones appended, and an empty
/// value removes the property.
pub fn merge_style<I, K, V>(existing: &str, updates: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut declarations = parse_style(existing);

    for (key, value) in updates {
        let name = css_property_name(key.as_ref());
        let value = value.as_ref().trim();
        let pos = declarations.iter().position(|(n, _)| *n == name);

        match (pos, value.is_empty()) {
            (Some(pos), true) => {
                declarations.remove(pos);
            }
            (Some(pos), false) => declarations[pos].1 = value.to_string(),
            (None, false) => declarations.push((name, value.to_string())),
            (None, true) => {}
        }
    }

    format_style(&declarations)
}

/// Look up one property of a `style` attribute
pub fn style_property(style: &str, key: &str) -> Option<String> {
    let name = css_property_name(key);
    parse_style(style)
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v)
}

/// Toggle `class_name` in a `class` attribute.
///
/// Returns the new attribute value and whether the class is now present.
pub fn toggle_class(classes: &str, class_name: &str) -> (String, bool) {
    let mut list: Vec<&str> = classes.split_whitespace().collect();
    let present = list.contains(&class_name);

    if present {
        list.retain(|c| *c != class_name);
    } else {
        list.push(class_name);
    }

    (list.join(" "), !present)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_property_name() {
        assert_eq!(css_property_name("backgroundColor"), "background-color");
        assert_eq!(css_property_name("color"), "color");
        assert_eq!(css_property_name("font-size"), "font-size");
    }

    #[test]
    fn test_merge_style() {
        let merged = merge_style("color: red; margin: 0", [("color", "blue"), ("fontSize", "12px")]);
        assert_eq!(merged, "color: blue; margin: 0; font-size: 12px;");

        let removed = merge_style(&merged, [("margin", "")]);
        assert_eq!(removed, "color: blue; font-size: 12px;");

        let untouched = merge_style("color: red;", Vec::<(&str, &str)>::new());
        assert_eq!(untouched, "color: red;");
    }

    #[test]
    fn test_parse_style_skips_garbage() {
        assert_eq!(
            parse_style(" ; color : red ;; nonsense ; width:"),
            vec![("color".to_string(), "red".to_string())]
        );
        assert_eq!(style_property("display: none;", "display"), Some("none".to_string()));
        assert_eq!(style_property("", "display"), None);
    }

    #[test]
    fn test_toggle_class() {
        assert_eq!(toggle_class("a b", "c"), ("a b c".to_string(), true));
        assert_eq!(toggle_class("a  c b", "c"), ("a b".to_string(), false));
        assert_eq!(toggle_class("", "x"), ("x".to_string(), true));
    }
}
