/// Case convention applied to wire names.
///
/// Names are split into words at `_`, `-`, spaces and case boundaries;
/// an uppercase run followed by a lowercase letter starts a new word at
/// its last letter (`HTTPServer` is `HTTP` `Server`).
///
/// ```
/// use nodal_mapper::naming::Case;
///
/// assert_eq!(Case::Camel.apply("order_id"), "orderId");
/// assert_eq!(Case::Pascal.apply("orderId"), "OrderId");
/// assert_eq!(Case::Snake.apply("HTTPServer"), "http_server");
/// assert_eq!(Case::Kebab.apply("lineItems"), "line-items");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// `orderId`
    Camel,
    /// `OrderId`
    Pascal,
    /// `order_id`
    Snake,
    /// `order-id`
    Kebab,
    /// `ORDERID`, the name uppercased as is.
    Upper,
    /// `orderid`, the name lowercased as is.
    Lower,
}

impl Case {
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Upper => name.to_uppercase(),
            Self::Lower => name.to_lowercase(),
            Self::Snake => join_lower(&words(name), "_"),
            Self::Kebab => join_lower(&words(name), "-"),
            Self::Pascal => words(name).iter().map(|w| capitalize(w)).collect(),
            Self::Camel => {
                let words = words(name);
                let mut out = String::with_capacity(name.len());
                for (index, word) in words.iter().enumerate() {
                    if index == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
        }
    }
}

fn join_lower(words: &[&str], separator: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut start: Option<usize> = None;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push(&name[s..offset]);
            }
            continue;
        }
        let Some(s) = start else {
            start = Some(offset);
            continue;
        };
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);
        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next.is_some_and(char::is_lowercase)));
        if boundary {
            words.push(&name[s..offset]);
            start = Some(offset);
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::{Case, words};

    #[test]
    fn splits_words() {
        assert_eq!(words("orderId"), ["order", "Id"]);
        assert_eq!(words("HTTPServer"), ["HTTP", "Server"]);
        assert_eq!(words("line_items-2 x"), ["line", "items", "2", "x"]);
        assert_eq!(words("Value1"), ["Value1"]);
        assert!(words("__").is_empty());
    }

    #[test]
    fn converts() {
        assert_eq!(Case::Camel.apply("Value1"), "value1");
        assert_eq!(Case::Pascal.apply("value_one"), "ValueOne");
        assert_eq!(Case::Snake.apply("ValueOne"), "value_one");
        assert_eq!(Case::Upper.apply("ValueOne"), "VALUEONE");
        assert_eq!(Case::Lower.apply("ValueOne"), "valueone");
    }
}
