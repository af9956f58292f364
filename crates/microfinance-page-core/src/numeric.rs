//! Number parsing with browser form semantics.
//!
//! Form fields arrive as raw text. The loan guard compares values the way the
//! page always has: `parseFloat` / `parseInt` over the field text, where a
//! failed parse yields NaN instead of an error. The strict variants accept
//! only complete numbers and mirror the server-side conversions.

/// Whitespace skipped before a number: the Unicode white space set, minus
/// NEL, plus the byte order mark.
fn is_leading_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{85}') || ch == '\u{feff}'
}

fn split_sign(raw: &str) -> (bool, &str) {
    if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = raw.strip_prefix('+') {
        (false, rest)
    } else {
        (false, raw)
    }
}

fn leading_digits(raw: &str) -> &str {
    let end = raw
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(raw.len());
    &raw[..end]
}

/// `parseFloat`: longest numeric prefix after leading whitespace, NaN when
/// there is none.
#[must_use]
pub fn parse_float(raw: &str) -> f64 {
    let trimmed = raw.trim_start_matches(is_leading_whitespace);
    let (negative, unsigned) = split_sign(trimmed);
    let sign = if negative { -1.0 } else { 1.0 };

    if unsigned.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let integer = leading_digits(unsigned);
    let mut rest = &unsigned[integer.len()..];
    let mut fraction = "";
    if let Some(after_point) = rest.strip_prefix('.') {
        fraction = leading_digits(after_point);
        rest = &after_point[fraction.len()..];
    }
    if integer.is_empty() && fraction.is_empty() {
        return f64::NAN;
    }

    let mut exponent = String::new();
    if let Some(after_marker) = rest.strip_prefix(['e', 'E']) {
        let (exp_negative, exp_unsigned) = split_sign(after_marker);
        let exp_digits = leading_digits(exp_unsigned);
        if !exp_digits.is_empty() {
            exponent.push('e');
            if exp_negative {
                exponent.push('-');
            }
            exponent.push_str(exp_digits);
        }
    }

    let literal = format!(
        "{}.{}{}",
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
        exponent
    );
    literal
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

/// `parseInt` without an explicit radix: decimal, or hexadecimal behind a
/// `0x` prefix. Stops at the first character that is not a digit.
#[must_use]
pub fn parse_int(raw: &str) -> f64 {
    let trimmed = raw.trim_start_matches(is_leading_whitespace);
    let (negative, unsigned) = split_sign(trimmed);

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let mut value: f64 = 0.0;
    let mut consumed = 0usize;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        value = value * f64::from(radix) + f64::from(digit);
        consumed += 1;
    }
    if consumed == 0 {
        return f64::NAN;
    }
    if negative { -value } else { value }
}

/// Whole-string finite decimal, surrounding whitespace allowed.
#[must_use]
pub fn parse_float_strict(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let is_decimal_text = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | 'e' | 'E'));
    if !is_decimal_text {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[must_use]
pub fn parse_int_strict(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
