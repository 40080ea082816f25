//! Single-pass `{placeholder}` substitution for prompt templates.
//!
//! Substituted values are copied verbatim and never re-scanned, so a resume that
//! happens to contain `{position_name}` cannot pull another field into the prompt.

/// Replaces every `{key}` in `template` whose key appears in `values`.
/// Unknown placeholders and stray braces are left as-is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let substituted = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all_keys() {
        let out = render(
            "Write for {company} as a {role}.",
            &[("company", "TechCorp"), ("role", "Software Engineer")],
        );
        assert_eq!(out, "Write for TechCorp as a Software Engineer.");
    }

    #[test]
    fn test_render_repeated_key() {
        let out = render("{x} and {x}", &[("x", "a")]);
        assert_eq!(out, "a and a");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let out = render("{known} {unknown}", &[("known", "yes")]);
        assert_eq!(out, "yes {unknown}");
    }

    #[test]
    fn test_render_does_not_reexpand_values() {
        let out = render(
            "Role: {role}. Resume: {resume}",
            &[("role", "Engineer"), ("resume", "I wrote {role} templates")],
        );
        assert_eq!(out, "Role: Engineer. Resume: I wrote {role} templates");
    }

    #[test]
    fn test_render_keeps_stray_braces() {
        let out = render("fn main() { {x} }", &[("x", "body")]);
        assert_eq!(out, "fn main() { body }");

        let out = render("open { never closed", &[("x", "body")]);
        assert_eq!(out, "open { never closed");
    }

    #[test]
    fn test_render_multibyte_values_intact() {
        let out = render("{name}!", &[("name", "Zoë — 日本語")]);
        assert_eq!(out, "Zoë — 日本語!");
    }
}
