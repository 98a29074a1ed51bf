//! Number to English words on the Indian scale (crore, lakh, thousand)

use crate::error::{CalcError, CalcResult};

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Convert a rounded non-negative value to lowercase Indian-scale words.
///
/// Zero yields an empty string ("nothing to show"), not "zero".
pub fn to_indian_words(value: f64) -> CalcResult<String> {
    if !value.is_finite() {
        return Err(CalcError::InvalidArgument(format!(
            "cannot convert {} to words",
            value
        )));
    }
    let rounded = value.round();
    if rounded < 0.0 {
        return Err(CalcError::InvalidArgument(format!(
            "negative amount {} has no words",
            value
        )));
    }
    if rounded > u64::MAX as f64 {
        return Err(CalcError::InvalidArgument(format!(
            "{} is too large to convert",
            value
        )));
    }
    Ok(integer_to_words(rounded as u64))
}

/// Core converter for integers.
///
/// The crore quotient is converted recursively, so amounts past 999 crore
/// read as multiples of crore ("one lakh crore") rather than using larger
/// named scales.
pub fn integer_to_words(n: u64) -> String {
    let mut words: Vec<&str> = Vec::new();
    push_words(n, &mut words);
    words.join(" ")
}

fn push_words(n: u64, words: &mut Vec<&'static str>) {
    let crores = n / CRORE;
    let rest = n % CRORE;
    if crores > 0 {
        push_words(crores, words);
        words.push("crore");
    }

    let lakhs = rest / LAKH;
    let rest = rest % LAKH;
    if lakhs > 0 {
        push_below_thousand(lakhs, words);
        words.push("lakh");
    }

    let thousands = rest / THOUSAND;
    let rest = rest % THOUSAND;
    if thousands > 0 {
        push_below_thousand(thousands, words);
        words.push("thousand");
    }

    if rest > 0 {
        push_below_thousand(rest, words);
    }
}

/// Shared converter for 1..=999
fn push_below_thousand(n: u64, words: &mut Vec<&'static str>) {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;
    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("hundred");
    }
    if rest == 0 {
        return;
    }
    if rest < 20 {
        words.push(ONES[rest]);
    } else {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    }
}

/// Capitalise the first letter of every word
pub fn title_case(words: &str) -> String {
    words
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Caption for an amount field, e.g. "Ten Lakh Fifty Thousand Rupees".
/// Zero produces an empty caption.
pub fn amount_in_words(amount: f64) -> CalcResult<String> {
    let words = to_indian_words(amount)?;
    if words.is_empty() {
        return Ok(words);
    }
    let suffix = if amount.round() == 1.0 { "Rupee" } else { "Rupees" };
    Ok(format!("{} {}", title_case(&words), suffix))
}
