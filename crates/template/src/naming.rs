/// Inserts `separator` at every camel-case boundary of `value`.
///
/// A boundary sits before an upper-case letter that follows a non-upper-case
/// character, before the last upper-case letter of an acronym that is
/// followed by a lower-case letter (`HTTPServer` -> `HTTP-Server`). Digits
/// and other non-letters do not start a word, so `web2` stays `web2`.
/// No separator is inserted next to one that is already present.
#[must_use]
pub fn split_camel_case(value: &str, separator: char) -> String {
    let chars = value.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(value.len() + value.len() / 2);

    for (index, &current) in chars.iter().enumerate() {
        if index > 0 {
            let previous = chars[index - 1];
            let next = chars.get(index + 1).copied();
            let acronym_end = previous.is_ascii_uppercase()
                && current.is_ascii_uppercase()
                && next.is_some_and(|ch| ch.is_ascii_lowercase());
            let word_start = !previous.is_ascii_uppercase() && current.is_ascii_uppercase();

            if (acronym_end || word_start)
                && previous != separator
                && current != separator
            {
                out.push(separator);
            }
        }
        out.push(current);
    }

    out
}

/// Derives a container name from a resource name: `MyFooApp` -> `my-foo-app`.
#[must_use]
pub fn container_name_from(name: &str) -> String {
    split_camel_case(name.trim(), '-').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("MyFooApp", '-'), "My-Foo-App");
        assert_eq!(split_camel_case("HTTPServer", '-'), "HTTP-Server");
        assert_eq!(split_camel_case("fooBar", '_'), "foo_Bar");
        assert_eq!(split_camel_case("app2Go", '-'), "app2-Go");
    }

    #[test]
    fn test_split_camel_case_keeps_plain_words() {
        assert_eq!(split_camel_case("cheese", '-'), "cheese");
        assert_eq!(split_camel_case("web2", '-'), "web2");
        assert_eq!(split_camel_case("v1beta1", '-'), "v1beta1");
        assert_eq!(split_camel_case("", '-'), "");
        assert_eq!(split_camel_case("A", '-'), "A");
    }

    #[test]
    fn test_split_camel_case_does_not_double_separators() {
        assert_eq!(split_camel_case("my-App", '-'), "my-App");
        assert_eq!(split_camel_case("web-2", '-'), "web-2");
    }

    #[test]
    fn test_container_name_from() {
        assert_eq!(container_name_from("MyFooApp"), "my-foo-app");
        assert_eq!(container_name_from("MyApp"), "my-app");
        assert_eq!(container_name_from("cheese"), "cheese");
        assert_eq!(container_name_from("Web2"), "web2");
        assert_eq!(container_name_from(" QuickStart "), "quick-start");
    }
}
