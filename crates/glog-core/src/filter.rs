//! FilterNormalizer — canonical include/exclude filter lists.
//!
//! Every filter option may be repeated and every value may hold a comma
//! list, so `-H web1,web2 -H db1` and `-H web1 -H web2,db1` are the same
//! filter. A leading `!` negates the whole set and is only allowed on the
//! first element.

use crate::error::{Error, Result};

/// Marker that negates a whole filter set when it prefixes the first element.
pub const NEGATION: char = '!';

/// Flatten `tokens` into one ordered list. Returns `None` when nothing is
/// left, so an empty filter is never sent as an empty-but-present list.
pub fn normalize<S: AsRef<str>>(tokens: &[S]) -> Result<Option<Vec<String>>> {
    let values: Vec<String> = tokens
        .iter()
        .flat_map(|token| token.as_ref().split(','))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(misplaced) = values.iter().skip(1).find(|v| v.starts_with(NEGATION)) {
        return Err(Error::NegationPosition {
            token: misplaced.clone(),
        });
    }

    Ok((!values.is_empty()).then_some(values))
}

/// The three normalised filter lists carried by a fetch request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub hostname: Option<Vec<String>>,
    pub tag: Option<Vec<String>>,
    pub message: Option<Vec<String>>,
}

impl Filters {
    /// Normalise all three lists; the first misplaced negation aborts.
    pub fn new<S: AsRef<str>>(hostname: &[S], tag: &[S], message: &[S]) -> Result<Self> {
        Ok(Self {
            hostname: normalize(hostname)?,
            tag: normalize(tag)?,
            message: normalize(message)?,
        })
    }

    /// Whether any list is active. Changes the wording of the empty-result
    /// notice.
    pub fn is_active(&self) -> bool {
        self.hostname.is_some() || self.tag.is_some() || self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_is_absent() {
        let none: [&str; 0] = [];
        assert_eq!(normalize(&none).unwrap(), None);
        assert_eq!(normalize(&["", ",,"]).unwrap(), None);
    }

    #[rstest]
    #[case(&["a,b", "c"], &["a", "b", "c"])]
    #[case(&["a,,b,"], &["a", "b"])]
    #[case(&["!a", "b,c"], &["!a", "b", "c"])]
    #[case(&["!a,b"], &["!a", "b"])]
    fn tokens_are_flattened_in_order(#[case] input: &[&str], #[case] expected: &[&str]) {
        assert_eq!(normalize(input).unwrap(), Some(strings(expected)));
    }

    #[rstest]
    #[case(&["a,b", "!c"], "!c")]
    #[case(&["a,!b"], "!b")]
    #[case(&["!a", "!b"], "!b")]
    fn negation_after_first_is_rejected(#[case] input: &[&str], #[case] offending: &str) {
        match normalize(input).unwrap_err() {
            Error::NegationPosition { token } => assert_eq!(token, offending),
            other => panic!("expected NegationPosition, got {other:?}"),
        }
    }

    #[test]
    fn empty_leading_value_does_not_hide_negation() {
        // ",!a" flattens to ["!a"], so the negation is first.
        assert_eq!(normalize(&[",!a"]).unwrap(), Some(strings(&["!a"])));
    }

    #[test]
    fn filters_report_activity() {
        let none: [&str; 0] = [];
        assert!(!Filters::new(&none, &none, &none).unwrap().is_active());
        assert!(Filters::new(&none, &["sshd"], &none).unwrap().is_active());
    }

    #[test]
    fn any_bad_list_fails_the_set() {
        let none: [&str; 0] = [];
        let err = Filters::new(&none, &none, &["ok", "!bad"]).unwrap_err();
        assert!(matches!(err, Error::NegationPosition { .. }));
    }
}
