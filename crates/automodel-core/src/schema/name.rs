use super::db::Table;

use std::{fmt, ops::Deref};

/// English pluralization rules, tried in order. The first rule whose suffix
/// matches wins, so irregular forms must stay ahead of the generic suffix
/// rules. The final rule matches every word.
const RULES: &[Rule] = &[
    Rule::replace(Suffix::Literal(&["mouse", "louse"]), 4, "ice"),
    Rule::replace(Suffix::Literal(&["child"]), 5, "children"),
    Rule::replace(Suffix::Literal(&["booth"]), 5, "booths"),
    Rule::replace(Suffix::Literal(&["foot"]), 4, "feet"),
    Rule::replace(Suffix::Literal(&["ooth"]), 4, "eeth"),
    Rule::replace(Suffix::Literal(&["leaf", "loaf"]), 2, "aves"),
    Rule::replace(Suffix::Literal(&["sis"]), 3, "ses"),
    Rule::replace(Suffix::Literal(&["man"]), 3, "men"),
    Rule::replace(Suffix::Literal(&["ife"]), 3, "ives"),
    Rule::replace(Suffix::Literal(&["eau"]), 3, "eaux"),
    Rule::replace(Suffix::Literal(&["lf"]), 2, "lves"),
    Rule::replace(Suffix::Literal(&["s", "x", "z"]), 0, "es"),
    Rule::replace(Suffix::After('h', sibilant_h), 0, "es"),
    Rule::replace(Suffix::After('y', consonant_y), 1, "ies"),
    Rule::replace(Suffix::Any, 0, "s"),
];

struct Rule {
    when: Suffix,

    /// Number of trailing bytes replaced by `append`
    strip: usize,

    append: &'static str,
}

enum Suffix {
    /// The word ends with one of the literals
    Literal(&'static [&'static str]),

    /// The word ends with the character, and the rest of the word satisfies
    /// the predicate
    After(char, fn(&str) -> bool),

    /// Matches every word, including the empty one
    Any,
}

impl Rule {
    const fn replace(when: Suffix, strip: usize, append: &'static str) -> Rule {
        Rule {
            when,
            strip,
            append,
        }
    }

    fn apply(&self, word: &str) -> Option<String> {
        if !self.when.matches(word) {
            return None;
        }

        let stem = &word[..word.len() - self.strip];
        Some(format!("{stem}{}", self.append))
    }
}

impl Suffix {
    fn matches(&self, word: &str) -> bool {
        match self {
            Suffix::Literal(literals) => literals.iter().any(|lit| word.ends_with(lit)),
            Suffix::After(last, rest) => word
                .strip_suffix(*last)
                .is_some_and(|head| rest(head)),
            Suffix::Any => true,
        }
    }
}

/// `[^aeioudgkprt]h`
fn sibilant_h(head: &str) -> bool {
    head.chars()
        .next_back()
        .is_some_and(|c| !"aeioudgkprt".contains(c))
}

/// `(qu|[^aeiou])y`
fn consonant_y(head: &str) -> bool {
    head.ends_with("qu")
        || head
            .chars()
            .next_back()
            .is_some_and(|c| !"aeiou".contains(c))
}

/// Returns the English plural of `noun`.
///
/// ```
/// use automodel_core::schema::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("mouse"), "mice");
/// ```
pub fn pluralize(noun: &str) -> String {
    RULES
        .iter()
        .find_map(|rule| rule.apply(noun))
        .unwrap_or_else(|| format!("{noun}s"))
}

/// Turns a raw identifier (`order_item`, `orderItem`) into a class-style
/// label (`OrderItem`).
///
/// The identifier is split into runs of `[A-Z][a-z0-9]+`, `[a-z0-9]+` or
/// `[A-Z0-9]+`, tried in that order. Every other character separates runs
/// and is dropped. Each run gets its first letter upper-cased; the rest of
/// the run is left as is, so acronyms survive (`HTMLParser`).
pub fn humanize(identifier: &str) -> String {
    let bytes = identifier.as_bytes();
    let mut out = String::with_capacity(identifier.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let len = token_len(&bytes[pos..]);

        if len == 0 {
            pos += 1;
            continue;
        }

        // Tokens are ASCII, so byte offsets are char boundaries.
        let token = &identifier[pos..pos + len];
        out.push(token.as_bytes()[0].to_ascii_uppercase() as char);
        out.push_str(&token[1..]);

        pos += len;
    }

    out
}

fn token_len(s: &[u8]) -> usize {
    match s {
        [first, second, ..] if first.is_ascii_uppercase() && is_lower_or_digit(second) => {
            1 + run(&s[1..], is_lower_or_digit)
        }
        [first, ..] if is_lower_or_digit(first) => run(s, is_lower_or_digit),
        [first, ..] if first.is_ascii_uppercase() => {
            let len = run(s, is_upper_or_digit);

            // `HTMLParser`: the capital right before a lowercase letter
            // starts the next word.
            match s.get(len) {
                Some(next)
                    if len > 1 && next.is_ascii_lowercase() && s[len - 1].is_ascii_uppercase() =>
                {
                    len - 1
                }
                _ => len,
            }
        }
        _ => 0,
    }
}

fn run(s: &[u8], pred: fn(&u8) -> bool) -> usize {
    s.iter().take_while(|b| pred(b)).count()
}

fn is_lower_or_digit(b: &u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

fn is_upper_or_digit(b: &u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

/// Class-style name of the model generated for a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelName(String);

impl ModelName {
    pub fn from_table(table: &Table) -> ModelName {
        ModelName(humanize(&table.name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ModelName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ModelName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_plurals() {
        assert_eq!(pluralize("mouse"), "mice");
        assert_eq!(pluralize("louse"), "lice");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("grandchild"), "grandchildren");
        assert_eq!(pluralize("foot"), "feet");
        assert_eq!(pluralize("tooth"), "teeth");
        assert_eq!(pluralize("booth"), "booths");
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("loaf"), "loaves");
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("woman"), "women");
        assert_eq!(pluralize("wife"), "wives");
        assert_eq!(pluralize("bureau"), "bureaux");
        assert_eq!(pluralize("shelf"), "shelves");
    }

    #[test]
    fn suffix_plurals() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("quiz"), "quizes");
        assert_eq!(pluralize("church"), "churches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("path"), "paths");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("soliloquy"), "soliloquies");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("table"), "tables");
        assert_eq!(pluralize("book"), "books");
    }

    #[test]
    fn rule_order_is_significant() {
        // `booth` would otherwise fall through to `ooth` -> `eeth`
        assert_eq!(pluralize("booth"), "booths");
        // `sis` wins over the generic `s` rule
        assert_eq!(pluralize("thesis"), "theses");
    }

    #[test]
    fn pluralize_is_total() {
        for noun in ["", "h", "y", "s", "_", "BOOK", "order_item", "ü"] {
            assert!(!pluralize(noun).is_empty(), "noun={noun:?}");
        }
        assert_eq!(pluralize(""), "s");
        assert_eq!(pluralize("y"), "ys");
        assert_eq!(pluralize("h"), "hs");
    }

    #[test]
    fn humanize_identifiers() {
        assert_eq!(humanize("Order"), "Order");
        assert_eq!(humanize("order"), "Order");
        assert_eq!(humanize("order_item"), "OrderItem");
        assert_eq!(humanize("orderItem"), "OrderItem");
        assert_eq!(humanize("HTMLParser"), "HTMLParser");
        assert_eq!(humanize("user_ID"), "UserID");
        assert_eq!(humanize("book_tag2"), "BookTag2");
        assert_eq!(humanize("tbl-audit log"), "TblAuditLog");
        assert_eq!(humanize("AB1c"), "AB1C");
    }

    #[test]
    fn humanize_is_total() {
        assert_eq!(humanize(""), "");
        assert_eq!(humanize("__"), "");
        assert_eq!(humanize("café_menu"), "CafMenu");
    }

    #[test]
    fn humanize_is_idempotent() {
        for name in ["Order", "OrderItem", "HTMLParser", "BookTag2"] {
            assert_eq!(humanize(&humanize(name)), humanize(name));
        }
    }

    #[test]
    fn model_name_from_table() {
        let table = Table::new("order_item").in_schema("shop");
        assert_eq!(ModelName::from_table(&table), "OrderItem");
    }
}
