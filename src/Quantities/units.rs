//! # Units Module
//!
//! Mass and volume written the Russian way: "3,5 кг", "250мл", "2 дм³".
//! A quantity keeps the number as written and the power of ten of its unit relative to
//! the base unit (gram, cubic metre). For volume the prefix power is multiplied by 3:
//! 1 дм³ = 10⁻³ м³.
//!
//! ru
//! Масса и объем с приставками СИ: парсинг строки и перевод в другие единицы.
use crate::Utils::numbers::{format_number, round_half_up};
use crate::errors::{ChemError, ChemResult, SymbolKind};
use regex::Regex;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::OnceLock;

/// metric prefixes and their powers of ten
const PREFIXES: [(&str, i32); 20] = [
    ("да", 1),
    ("г", 2),
    ("к", 3),
    ("М", 6),
    ("Г", 9),
    ("Т", 12),
    ("П", 15),
    ("Э", 18),
    ("З", 21),
    ("И", 24),
    ("д", -1),
    ("с", -2),
    ("м", -3),
    ("мк", -6),
    ("н", -9),
    ("п", -12),
    ("ф", -15),
    ("а", -18),
    ("з", -21),
    ("и", -24),
];

/// Physical dimension of a quantity: base unit, degree of prefixes and unit aliases
pub trait Dimension {
    const BASE_UNIT: &'static str;
    const DEGREE: i32;
    /// units outside the prefix scheme; preferred when a quantity is displayed
    const ALIASES: &'static [(&'static str, i32)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Space;

impl Dimension for Mass {
    const BASE_UNIT: &'static str = "г";
    const DEGREE: i32 = 1;
    const ALIASES: &'static [(&'static str, i32)] = &[("т", 6)];
}

impl Dimension for Space {
    const BASE_UNIT: &'static str = "м³";
    const DEGREE: i32 = 3;
    const ALIASES: &'static [(&'static str, i32)] = &[("л", -3), ("мл", -6)];
}

/// power of ten of a unit relative to the base unit of the dimension
pub fn unit_exponent<D: Dimension>(unit: &str) -> Option<i32> {
    if unit == D::BASE_UNIT {
        return Some(0);
    }
    if let Some(&(_, exponent)) = D::ALIASES.iter().find(|(alias, _)| *alias == unit) {
        return Some(exponent);
    }
    let prefix = unit.strip_suffix(D::BASE_UNIT)?;
    PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|&(_, power)| power * D::DEGREE)
}

/// unit written for a power of ten: aliases first, then the prefixed base unit
pub fn unit_name<D: Dimension>(exponent: i32) -> Option<String> {
    if let Some(&(alias, _)) = D::ALIASES.iter().find(|(_, e)| *e == exponent) {
        return Some(alias.to_string());
    }
    if exponent == 0 {
        return Some(D::BASE_UNIT.to_string());
    }
    PREFIXES
        .iter()
        .find(|&&(_, power)| power * D::DEGREE == exponent)
        .map(|(prefix, _)| format!("{}{}", prefix, D::BASE_UNIT))
}

fn quantity_regex() -> &'static Regex {
    static QUANTITY: OnceLock<Regex> = OnceLock::new();
    QUANTITY.get_or_init(|| {
        Regex::new(r"^\s*(?P<sign>[+-])?(?P<number>\d+\.?\d*)\s*(?P<unit>\S+)\s*$")
            .expect("quantity pattern is valid")
    })
}

/// Number with a unit of dimension `D`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<D: Dimension> {
    value: f64,
    exponent: i32,
    _dimension: PhantomData<D>,
}

/// mass: "5кг", "3,5 т"
pub type Weight = Quantity<Mass>;
/// volume: "3л", "2 дм³"
pub type Volume = Quantity<Space>;

impl<D: Dimension> Quantity<D> {
    pub fn new(value: f64, unit: &str) -> ChemResult<Self> {
        let exponent =
            unit_exponent::<D>(unit).ok_or_else(|| ChemError::unknown(SymbolKind::Unit, unit))?;
        Ok(Self {
            value,
            exponent,
            _dimension: PhantomData,
        })
    }

    /// "3,5 кг": decimal comma or point, unit after optional spaces.
    /// A leading "+" is accepted, a negative mass or volume is an input format error.
    pub fn parse(input: &str) -> ChemResult<Self> {
        let text = input.replace(',', ".");
        let captures = quantity_regex()
            .captures(&text)
            .ok_or_else(|| ChemError::input_format(input, "expected a number followed by a unit"))?;
        if captures.name("sign").is_some_and(|m| m.as_str() == "-") {
            return Err(ChemError::input_format(input, "quantity can not be negative"));
        }
        let value: f64 = captures["number"]
            .parse()
            .map_err(|_| ChemError::input_format(input, "invalid number"))?;
        Self::new(value, &captures["unit"])
    }

    pub fn unit(&self) -> String {
        unit_name::<D>(self.exponent).unwrap_or_else(|| D::BASE_UNIT.to_string())
    }

    /// value in another unit of the same dimension, rounded to 5 decimals
    pub fn get_value(&self, unit: &str) -> ChemResult<f64> {
        let target =
            unit_exponent::<D>(unit).ok_or_else(|| ChemError::unknown(SymbolKind::Unit, unit))?;
        let diff = self.exponent - target;
        // 10^-k has no exact binary form, divide by 10^k instead
        let converted = if diff >= 0 {
            self.value * 10f64.powi(diff)
        } else {
            self.value / 10f64.powi(-diff)
        };
        Ok(round_half_up(converted, 5))
    }

    /// self / other without intermediate rounding: 3 мл / 1 м³ = 0.000003
    pub fn ratio_to(&self, other: &Self) -> ChemResult<f64> {
        if other.value == 0.0 {
            return Err(ChemError::Evaluation {
                expression: format!("{} / {}", self, other),
                reason: "division by zero".to_string(),
            });
        }
        let diff = self.exponent - other.exponent;
        let numerator = if diff >= 0 {
            self.value * 10f64.powi(diff)
        } else {
            self.value / 10f64.powi(-diff)
        };
        Ok(numerator / other.value)
    }
}

impl<D: Dimension> FromStr for Quantity<D> {
    type Err = ChemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<D: Dimension> fmt::Display for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weight_conversion() {
        let weight = Weight::parse("5кг").unwrap();
        assert_relative_eq!(weight.get_value("г").unwrap(), 5000.0);
        assert_relative_eq!(weight.get_value("т").unwrap(), 0.005);
        assert_relative_eq!(weight.get_value("мг").unwrap(), 5_000_000.0);

        let weight: Weight = "3,5 т".parse().unwrap();
        assert_relative_eq!(weight.get_value("кг").unwrap(), 3500.0);
        assert_relative_eq!(Weight::parse("1 мкг").unwrap().get_value("г").unwrap(), 0.0);
    }

    #[test]
    fn test_volume_conversion() {
        let volume = Volume::parse("3л").unwrap();
        assert_relative_eq!(volume.get_value("м³").unwrap(), 0.003);
        assert_relative_eq!(volume.get_value("мл").unwrap(), 3000.0);
        assert_relative_eq!(volume.get_value("дм³").unwrap(), 3.0);
        assert_relative_eq!(Volume::parse("2 км³").unwrap().get_value("м³").unwrap(), 2e9);
        assert_relative_eq!(Volume::parse("250 см³").unwrap().get_value("л").unwrap(), 0.25);
    }

    #[test]
    fn test_ratio() {
        let part = Volume::parse("3 мл").unwrap();
        let mixture = Volume::parse("1 м³").unwrap();
        assert_relative_eq!(part.ratio_to(&mixture).unwrap(), 3e-6, max_relative = 1e-12);
        let part = Volume::parse("300 мл").unwrap();
        let mixture = Volume::parse("1,5 л").unwrap();
        assert_relative_eq!(part.ratio_to(&mixture).unwrap(), 0.2, max_relative = 1e-12);
        assert!(matches!(
            part.ratio_to(&Volume::parse("0 л").unwrap()),
            Err(ChemError::Evaluation { .. })
        ));
    }

    #[test]
    fn test_display_prefers_aliases() {
        assert_eq!(Weight::parse("2Мг").unwrap().to_string(), "2т");
        assert_eq!(Volume::parse("1.5дм³").unwrap().to_string(), "1.5л");
        assert_eq!(Volume::parse("10 см³").unwrap().to_string(), "10мл");
        assert_eq!(Weight::parse("7 кг").unwrap().to_string(), "7кг");
        assert_eq!(Volume::parse("+2 м³").unwrap().to_string(), "2м³");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Weight::parse("кг"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(Weight::parse("5"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(Weight::parse("5 кг 3"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(
            Weight::parse("5 л"),
            Err(ChemError::UnknownSymbol { kind: SymbolKind::Unit, .. })
        ));
        assert!(matches!(
            Volume::parse("5 кг"),
            Err(ChemError::UnknownSymbol { .. })
        ));
        assert!(Weight::parse("5кг").unwrap().get_value("л").is_err());
        assert!(matches!(Weight::parse("-36 г"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(Volume::parse(" -2 м³"), Err(ChemError::InputFormat { .. })));
    }
}
