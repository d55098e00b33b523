/// Unicode subscript/superscript digits, Roman numerals for valences
pub mod subscripts;
/// rounding rules shared by all calculations
///  # Examples
/// ```
/// use ChemSchool::Utils::numbers::{round_half_up, format_number};
/// assert_eq!(round_half_up(0.123456, 5), 0.12346);
/// assert_eq!(format_number(18.0), "18");
/// ```
pub mod numbers;
