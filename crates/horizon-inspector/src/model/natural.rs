//! Natural string ordering.
//!
//! Runs of ASCII digits compare by numeric value, so `"Crate 2"` sorts
//! before `"Crate 10"`. Other characters compare case-insensitively. Strings
//! that are equal under those rules fall back to an ordinal comparison, so
//! the ordering is total.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                compare_digit_runs(&l_digits, &r_digits)
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                fold(l).cmp(&fold(r))
            }
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a.cmp(b)
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    digits
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
