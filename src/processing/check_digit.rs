// ICAO Doc 9303 check digits: weights 7, 3, 1 repeating, modulo 10.

const WEIGHTS: [u32; 3] = [7, 3, 1];

fn char_value(c: char) -> Option<u32> {
    match c {
        '<' => Some(0),
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Compute the check digit for an MRZ field, `None` if it contains a
/// character outside `A-Z0-9<`.
pub fn check_digit(field: &str) -> Option<char> {
    let mut sum = 0;
    for (i, c) in field.chars().enumerate() {
        sum += char_value(c)? * WEIGHTS[i % 3];
    }
    std::char::from_digit(sum % 10, 10)
}

/// True when `digit` is the check digit of `field`. A `<` digit counts as 0.
pub fn verify(field: &str, digit: char) -> bool {
    let digit = if digit == '<' { '0' } else { digit };
    check_digit(field) == Some(digit)
}
