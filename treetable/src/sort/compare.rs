//! Value comparison for sorting.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use crate::node::TreeNode;
use crate::value::{FieldValue, RowData};

use super::SortMeta;

/// Compare two possibly-absent field values in ascending order.
///
/// - An absent value sorts before a present one; two absent values are equal.
/// - Two strings use [`natural_cmp`], so `"item2" < "item10"`.
/// - Everything else uses the ordinal comparison of [`FieldValue`]. Pairs the
///   ordinal comparison cannot order (mixed kinds, NaN) are ranked by kind so
///   the result is always a total order.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(FieldValue::String(x)), Some(FieldValue::String(y))) => natural_cmp(x, y),
        (Some(x), Some(y)) => x
            .partial_cmp(y)
            .unwrap_or_else(|| kind_rank(x).cmp(&kind_rank(y))),
    }
}

/// Compare the `field` values of two nodes in ascending order.
pub fn compare_fields<D: RowData>(a: &TreeNode<D>, b: &TreeNode<D>, field: &str) -> Ordering {
    let value1 = a.resolve_field(field);
    let value2 = b.resolve_field(field);
    compare_values(value1.as_ref(), value2.as_ref())
}

/// Compare two nodes over a descriptor chain, starting at `index`.
///
/// Ties on one descriptor fall through to the next; the direction of the
/// first deciding descriptor is applied. Returns `Equal` once the chain is
/// exhausted, which keeps the stable sort's original order.
pub fn compare_chain<D: RowData>(
    a: &TreeNode<D>,
    b: &TreeNode<D>,
    metas: &[SortMeta],
    index: usize,
) -> Ordering {
    let Some(meta) = metas.get(index) else {
        return Ordering::Equal;
    };
    match compare_fields(a, b, &meta.field) {
        Ordering::Equal => compare_chain(a, b, metas, index + 1),
        ordering => meta.order.apply(ordering),
    }
}

/// Rank used to order values the ordinal comparison leaves unordered.
fn kind_rank(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Bool(_) => 0,
        FieldValue::Int(_) => 1,
        FieldValue::Float(f) if !f.is_nan() => 1,
        FieldValue::Float(_) => 2,
        FieldValue::DateTime(_) => 3,
        FieldValue::String(_) => 4,
    }
}

/// Locale-style string collation with numeric awareness.
///
/// Digit runs compare by numeric value and text compares case-insensitively.
/// Remaining ties put lowercase before uppercase, then fall back to byte order
/// so only identical strings compare equal.
///
/// ```
/// use std::cmp::Ordering;
/// use treetable::sort::natural_cmp;
///
/// assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
/// assert_eq!(natural_cmp("Apple", "banana"), Ordering::Less);
/// assert_eq!(natural_cmp("a", "A"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    folded_cmp(a, b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn folded_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let run_a = take_digits(&mut left);
                let run_b = take_digits(&mut right);
                let ordering = numeric_run_cmp(&run_a, &run_b);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                let ordering = x.to_lowercase().cmp(y.to_lowercase());
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn numeric_run_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        if x.is_lowercase() && y.is_uppercase() {
            return Ordering::Less;
        }
        if x.is_uppercase() && y.is_lowercase() {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_runs_ignore_leading_zeros() {
        assert_eq!(numeric_run_cmp("007", "7"), Ordering::Equal);
        assert_eq!(numeric_run_cmp("9", "10"), Ordering::Less);
        assert_eq!(numeric_run_cmp("", "0"), Ordering::Equal);
    }

    #[test]
    fn leading_zero_tie_is_still_ordered() {
        assert_ne!(natural_cmp("v02", "v2"), Ordering::Equal);
        assert_eq!(natural_cmp("v02", "v2"), natural_cmp("v2", "v02").reverse());
    }

    #[test]
    fn case_only_differences() {
        assert_eq!(case_cmp("abc", "aBc"), Ordering::Less);
        assert_eq!(case_cmp("ABC", "abc"), Ordering::Greater);
        assert_eq!(case_cmp("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn nan_sorts_after_numbers() {
        let nan = FieldValue::Float(f64::NAN);
        let one = FieldValue::Int(1);
        assert_eq!(compare_values(Some(&one), Some(&nan)), Ordering::Less);
        assert_eq!(compare_values(Some(&nan), Some(&one)), Ordering::Greater);
    }
}
