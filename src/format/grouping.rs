//! Indian digit grouping (##,##,###) for display and input fields

const RUPEE: char = '₹';
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Re-render a raw numeral with Indian grouping.
///
/// Existing commas are stripped first, so the function can be applied to
/// every keystroke of a text field. Input that is not a plain non-negative
/// decimal is returned unchanged; an empty field stays empty.
///
/// ```
/// use finance_calculator::format::format_indian_groups;
/// assert_eq!(format_indian_groups("12345678"), "1,23,45,678");
/// ```
pub fn format_indian_groups(raw: &str) -> String {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return String::new();
    }
    if !is_plain_decimal(&cleaned) {
        return raw.to_string();
    }

    let (int_part, frac_part) = match cleaned.find('.') {
        Some(idx) => cleaned.split_at(idx),
        None => (cleaned.as_str(), ""),
    };

    let mut out = group_integer_digits(int_part);
    out.push_str(frac_part);
    out
}

/// Strip grouping separators and parse the remaining numeral.
///
/// Returns `None` for empty or non-numeric text. A leading rupee sign and
/// interior whitespace are tolerated, as is a leading minus so negative
/// entries can be range-checked. Anything else `format_indian_groups` would
/// not group (exponents, a plus sign, `inf`) is rejected.
pub fn parse_formatted_number(display: &str) -> Option<f64> {
    let trimmed = display.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned: String = rest
        .trim_start()
        .trim_start_matches(RUPEE)
        .chars()
        .filter(|&c| c != ',' && !c.is_whitespace())
        .collect();
    if !is_plain_decimal(&cleaned) {
        return None;
    }
    let value = cleaned.parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Format a rupee amount rounded to the nearest rupee, e.g. `₹11,61,695`
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{RUPEE}0");
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{RUPEE}{}", group_integer_digits(&digits))
}

/// Short lakh/crore form used in chart labels, e.g. `₹11.62 L`, `₹1.50 Cr`
pub fn format_compact(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= CRORE {
        format!("{sign}{RUPEE}{:.2} Cr", abs / CRORE)
    } else if abs >= LAKH {
        format!("{sign}{RUPEE}{:.2} L", abs / LAKH)
    } else {
        format_rupees(amount)
    }
}

/// Digits with at most one decimal point, and at least one digit
fn is_plain_decimal(s: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in s.chars() {
        match c {
            '.' if seen_dot => return false,
            '.' => seen_dot = true,
            d if d.is_ascii_digit() => seen_digit = true,
            _ => return false,
        }
    }
    seen_digit
}

/// Last three digits form one group, the rest are paired from the right.
/// Leading zeros are dropped, keeping a single `0`.
fn group_integer_digits(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let digits = if significant.is_empty() && !digits.is_empty() {
        "0"
    } else {
        significant
    };
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 2);
    let lead = head.len() % 2;
    if lead == 1 {
        groups.push(&head[..1]);
    }
    let mut idx = lead;
    while idx < head.len() {
        groups.push(&head[idx..idx + 2]);
        idx += 2;
    }
    groups.push(tail);
    groups.join(",")
}
