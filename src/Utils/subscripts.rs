/// eng
/// Conversions between plain digits and Unicode subscripts used in chemical notation,
/// Roman numerals for oxidation states and the small "valence marks" written over a formula.
/// ru
/// Перевод цифр в подстрочные индексы и обратно, римские цифры для валентностей.

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// "H2SO4" -> "H₂SO₄"
pub fn to_subscript(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => SUBSCRIPT_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// "H₂SO₄" -> "H2SO4"
pub fn normalize_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match SUBSCRIPT_DIGITS.iter().position(|&s| s == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// exponents: "23" -> "²³", "-1" -> "⁻¹"
pub fn to_superscript(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '-' => '⁻',
            '+' => '⁺',
            c if c.is_ascii_digit() => SUPERSCRIPT_DIGITS[(c as u8 - b'0') as usize],
            c => c,
        })
        .collect()
}

pub fn is_subscript_digit(c: char) -> bool {
    SUBSCRIPT_DIGITS.contains(&c)
}

/// index of an element or ion inside a formula; 1 is never written
pub fn index_to_subscript(index: usize) -> String {
    if index == 1 {
        String::new()
    } else {
        to_subscript(&index.to_string())
    }
}

/// Roman numeral of an oxidation state, 1..=8
pub fn roman(valence: u8) -> Option<&'static str> {
    match valence {
        1 => Some("I"),
        2 => Some("II"),
        3 => Some("III"),
        4 => Some("IV"),
        5 => Some("V"),
        6 => Some("VI"),
        7 => Some("VII"),
        8 => Some("VIII"),
        _ => None,
    }
}

/// small letters written over the symbol in a school notebook
pub fn valence_mark(valence: u8) -> Option<&'static str> {
    match valence {
        1 => Some("ₗ"),
        2 => Some("ₗₗ"),
        3 => Some("ₗₗₗ"),
        4 => Some("ₗᵥ"),
        5 => Some("ᵥ"),
        6 => Some("ᵥₗ"),
        7 => Some("ᵥₗₗ"),
        8 => Some("ᵥₗₗₗ"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscripts() {
        assert_eq!(to_subscript("Fe2(SO4)3"), "Fe₂(SO₄)₃");
        assert_eq!(normalize_subscripts("Fe₂(SO₄)₃"), "Fe2(SO4)3");
        assert_eq!(index_to_subscript(1), "");
        assert_eq!(index_to_subscript(12), "₁₂");
        assert!(is_subscript_digit('₇'));
        assert!(!is_subscript_digit('7'));
        assert_eq!(to_superscript("23"), "²³");
        assert_eq!(to_superscript("-1"), "⁻¹");
    }

    #[test]
    fn test_roman() {
        assert_eq!(roman(3), Some("III"));
        assert_eq!(roman(8), Some("VIII"));
        assert_eq!(roman(9), None);
        assert_eq!(valence_mark(4), Some("ₗᵥ"));
    }
}
