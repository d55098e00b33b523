/// eng
/// Physical quantities given as text: mass and volume with metric prefixes, numeric
/// expressions for particle counts.
/// ru
/// Физические величины: масса, объем, числовые выражения.
pub mod expression;
pub mod units;
