//! Bulletpoint arithmetic and ordering.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Increment the first number in a bulletpoint.
///
/// Returns `None` when the label has no digits.
///
/// # Examples
/// ```
/// use novelle::tree::increment;
///
/// assert_eq!(increment("(2)").as_deref(), Some("(3)"));
/// assert_eq!(increment("§ 11a").as_deref(), Some("§ 12a"));
/// assert_eq!(increment("b)"), None);
/// ```
#[must_use]
pub fn increment(bulletpoint: &str) -> Option<String> {
    shift(bulletpoint, |n| n.checked_add(1))
}

/// Decrement the first number in a bulletpoint.
///
/// Returns `None` when the label has no digits or its number is 0.
#[must_use]
pub fn decrement(bulletpoint: &str) -> Option<String> {
    shift(bulletpoint, |n| n.checked_sub(1))
}

fn shift(bulletpoint: &str, op: impl Fn(u64) -> Option<u64>) -> Option<String> {
    let m = DIGIT_RUN.find(bulletpoint)?;
    let number: u64 = m.as_str().parse().ok()?;
    let shifted = op(number)?;
    Some(format!(
        "{}{shifted}{}",
        &bulletpoint[..m.start()],
        &bulletpoint[m.end()..]
    ))
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(u64, &'a str),
    Text(&'a str),
}

fn chunks(label: &str) -> Vec<Chunk<'_>> {
    let mut result = Vec::new();
    let mut last = 0;
    for m in DIGIT_RUN.find_iter(label) {
        if m.start() > last {
            result.push(Chunk::Text(&label[last..m.start()]));
        }
        let number = m.as_str().parse().unwrap_or(u64::MAX);
        result.push(Chunk::Number(number, m.as_str()));
        last = m.end();
    }
    if last < label.len() {
        result.push(Chunk::Text(&label[last..]));
    }
    result
}

/// Natural ordering of bulletpoints: digit runs compare by value.
///
/// `"(2)"` sorts before `"(10)"`, and `"§ 11"` before `"§ 11a"`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Number(x, xs), Chunk::Number(y, ys)) => x.cmp(y).then_with(|| xs.cmp(ys)),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Number(..), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(..)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}
