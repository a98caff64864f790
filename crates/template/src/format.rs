//! Token scanning and substitution.

use crate::field::{FieldBag, FieldValue, ToFields};
use regex_lite::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;
use sustainly_core::TemplateError;

/// `{` + identifier + `}` where an identifier starts with a letter or `_`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("token pattern is a valid regex")
});

/// Fill every `{Name}` token whose name is in `fields`.
///
/// Matching is exact and case-sensitive. Tokens without a matching field are
/// left as they are. Replacement values are inserted literally and never
/// scanned for further tokens.
pub fn format_string(template: &str, fields: &FieldBag) -> String {
    if fields.is_empty() {
        return template.to_string();
    }

    let lookup: HashMap<&str, &FieldValue> = fields.iter().collect();
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| match lookup.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fill a template from a typed field struct.
pub fn format_fields<F: ToFields + ?Sized>(
    template: &str,
    fields: &F,
) -> Result<String, TemplateError> {
    Ok(format_string(template, &fields.to_fields()?))
}

/// Distinct token identifiers in `template`, in first-occurrence order.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> FieldBag {
        let mut bag = FieldBag::new();
        for (name, value) in pairs {
            bag.insert(*name, *value).unwrap();
        }
        bag
    }

    #[test]
    fn unmatched_tokens_are_left_verbatim() {
        let out = format_string("Hello {Name}, {Unused}", &bag(&[("Name", "X")]));
        assert_eq!(out, "Hello X, {Unused}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let fields = bag(&[("Name", "{Name}"), ("Other", "{Name} and {Other}")]);
        let out = format_string("{Name} / {Other}", &fields);
        assert_eq!(out, "{Name} / {Name} and {Other}");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let out = format_string("{A}-{A}-{A}", &bag(&[("A", "x")]));
        assert_eq!(out, "x-x-x");
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let fields = bag(&[("Name", "X")]);
        assert_eq!(
            format_string("{name} {Names} {Name}", &fields),
            "{name} {Names} X"
        );
    }

    #[test]
    fn malformed_tokens_are_ignored() {
        let fields = bag(&[("Name", "X"), ("1st", "Y")]);
        let template = "{Name {Name { Name } {1st} {} {Name}}";
        assert_eq!(
            format_string(template, &fields),
            "{Name {Name { Name } {1st} {} X}"
        );
    }

    #[test]
    fn underscores_and_digits_are_identifier_chars() {
        let fields = bag(&[("_prev_week2", "7")]);
        assert_eq!(format_string("[{_prev_week2}]", &fields), "[7]");
    }

    #[test]
    fn null_values_render_empty() {
        let mut fields = FieldBag::new();
        fields.insert("Missing", FieldValue::Null).unwrap();
        assert_eq!(format_string("a{Missing}b", &fields), "ab");
    }

    #[test]
    fn numbers_render_with_invariant_format() {
        let fields = FieldBag::new()
            .with("Share", FieldValue::Percent(33.3333))
            .unwrap()
            .with("Count", 12_345u64)
            .unwrap()
            .with("Ratio", 0.5)
            .unwrap();
        assert_eq!(
            format_string("{Share} of {Count} at {Ratio}", &fields),
            "33.33% of 12345 at 0.5"
        );
    }

    #[test]
    fn two_passes_fill_disjoint_fields() {
        let template = "now {Current}, before {Previous}";
        let first = format_string(template, &bag(&[("Current", "10%")]));
        assert_eq!(first, "now 10%, before {Previous}");
        let second = format_string(&first, &bag(&[("Previous", "8%")]));
        assert_eq!(second, "now 10%, before 8%");
    }

    #[test]
    fn placeholders_are_distinct_and_ordered() {
        assert_eq!(
            placeholders("{B} {A} {B} {not valid} {C_1}"),
            vec!["B".to_string(), "A".to_string(), "C_1".to_string()]
        );
    }

    struct Greeting {
        name: &'static str,
        visits: u64,
    }

    impl ToFields for Greeting {
        fn to_fields(&self) -> Result<FieldBag, TemplateError> {
            FieldBag::new()
                .with("Name", self.name)?
                .with("Visits", self.visits)
        }
    }

    #[test]
    fn typed_fields_fill_template() {
        let out = format_fields(
            "{Name} visited {Visits} times",
            &Greeting {
                name: "Ada",
                visits: 3,
            },
        )
        .unwrap();
        assert_eq!(out, "Ada visited 3 times");
    }
}
