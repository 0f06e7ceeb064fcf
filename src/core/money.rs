//! Parsing of free-text price expressions into comparable magnitudes.

const CURRENCY_GLYPHS: [char; 7] = ['৳', '$', '€', '£', '₹', '¥', '₨'];

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Parses a price expression such as `"৳ 80 Lac - 1.2 Cr"` into whole
/// currency units.
///
/// Only the lower bound of a hyphenated range is considered, so a listing is
/// compared by its starting price. Unit words after the number scale it:
/// crore (`cr`) by 10^7, lakh (`lac`) by 10^5 and `k` by 10^3. Anything that
/// carries no number yields `0`, which callers treat as unspecified.
pub fn parse_magnitude(text: &str) -> u64 {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_GLYPHS.contains(c))
        .collect();

    let lower_bound = normalized.split(['-', '–']).next().unwrap_or_default();

    let Some((number, rest)) = leading_number(lower_bound) else {
        return 0;
    };

    let magnitude = (number * unit_multiplier(rest)).round();
    if magnitude.is_finite() && magnitude > 0.0 {
        magnitude as u64
    } else {
        0
    }
}

/// Finds the first decimal number in `text`, returning it with the text that
/// follows it.
fn leading_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let start = bytes.iter().enumerate().position(|(i, b)| {
        b.is_ascii_digit()
            || (*b == b'.' && bytes.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
    })?;

    let mut end = start;
    let mut seen_dot = false;
    while let Some(b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    let token = text[start..end].trim_end_matches('.');
    token.parse::<f64>().ok().map(|n| (n, &text[end..]))
}

/// The first unit word after the number decides the scale. Words are
/// compared whole, so "concrete" or "acre" never read as crore.
fn unit_multiplier(rest: &str) -> f64 {
    rest.split(|c: char| !c.is_alphabetic())
        .find_map(|word| match word {
            "cr" | "crore" | "crores" => Some(CRORE),
            "lac" | "lacs" | "lakh" | "lakhs" => Some(LAKH),
            "k" => Some(THOUSAND),
            _ => None,
        })
        .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_garbage_yield_zero() {
        assert_eq!(parse_magnitude(""), 0);
        assert_eq!(parse_magnitude("garbage"), 0);
        assert_eq!(parse_magnitude("Contact for price"), 0);
        assert_eq!(parse_magnitude("৳ - "), 0);
    }

    #[test]
    fn test_range_uses_lower_bound() {
        assert_eq!(parse_magnitude("৳ 80 Lac - 1.2 Cr"), 8_000_000);
        assert_eq!(parse_magnitude("৳ 2.5 Cr - 3.8 Cr"), 25_000_000);
        assert_eq!(parse_magnitude("৳ 45k - 85k / month"), 45_000);
        assert_eq!(parse_magnitude("1 Crore – 2 Crore"), 10_000_000);
    }

    #[test]
    fn test_unit_multipliers() {
        assert_eq!(parse_magnitude("1.5 Crore"), 15_000_000);
        assert_eq!(parse_magnitude("1.2 cr"), 12_000_000);
        assert_eq!(parse_magnitude("95 Lakh"), 9_500_000);
        assert_eq!(parse_magnitude("45k"), 45_000);
        assert_eq!(parse_magnitude("৳ 5,000,000"), 5_000_000);
        assert_eq!(parse_magnitude("$750"), 750);
    }

    #[test]
    fn test_units_before_the_number_are_ignored() {
        // "tk" is a currency word, not a thousands suffix
        assert_eq!(parse_magnitude("Tk 50,00,000"), 5_000_000);
    }

    #[test]
    fn test_decimal_edge_cases() {
        assert_eq!(parse_magnitude(".5 cr"), 5_000_000);
        assert_eq!(parse_magnitude("12. lac"), 1_200_000);
        assert_eq!(parse_magnitude("1.2.3 k"), 1_200);
        assert_eq!(parse_magnitude("0"), 0);
    }

    #[test]
    fn test_unit_words_match_whole_words_only() {
        assert_eq!(parse_magnitude("৳ 30 Lac with concrete finish"), 3_000_000);
        assert_eq!(parse_magnitude("12 Lac per acre"), 1_200_000);
        assert_eq!(parse_magnitude("8 Lakhs near recreation park"), 800_000);
        assert_eq!(parse_magnitude("2 Crores"), 20_000_000);
        assert_eq!(parse_magnitude("500 sqft kitchen"), 500);
        assert_eq!(parse_magnitude("45k/month"), 45_000);
    }
}
