//! # Error Types
//!
//! One error enum for the whole crate. Every calculation either returns a complete,
//! fully formatted answer or one of these variants; nothing is partially applied and
//! no default value is substituted for a failed lookup.
//!
//! ru
//! Единый тип ошибок крейта. Любой расчет либо возвращает полный ответ, либо одну из
//! этих ошибок.

use thiserror::Error;

/// Result type alias used across the crate
pub type ChemResult<T> = Result<T, ChemError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChemError {
    /// string does not match the expected grammar (separator, number, parenthesis)
    #[error("Input format error in '{input}': {reason}")]
    InputFormat { input: String, reason: String },

    /// element symbol, unit, ion key or substance name is absent from the static tables
    #[error("Unknown {kind}: '{symbol}'")]
    UnknownSymbol { kind: SymbolKind, symbol: String },

    /// removing the anionic part does not leave exactly one base element
    #[error("Cannot isolate a single base element in '{formula}' (remaining: {remaining:?})")]
    AmbiguousComposition {
        formula: String,
        remaining: Vec<String>,
    },

    /// the reaction cannot be balanced with positive integer coefficients
    #[error("Not a real reaction (can't be balanced): {reason}")]
    BalancingFailure { reason: String },

    /// arithmetic failure while evaluating a numeric expression
    #[error("Evaluation error in '{expression}': {reason}")]
    Evaluation { expression: String, reason: String },

    /// configuration could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),
}

/// what kind of table lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Element,
    Ion,
    Unit,
    Name,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SymbolKind::Element => "element",
            SymbolKind::Ion => "ion",
            SymbolKind::Unit => "unit",
            SymbolKind::Name => "substance name",
        };
        write!(f, "{}", s)
    }
}

impl ChemError {
    pub fn input_format(input: &str, reason: &str) -> Self {
        ChemError::InputFormat {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown(kind: SymbolKind, symbol: &str) -> Self {
        ChemError::UnknownSymbol {
            kind,
            symbol: symbol.to_string(),
        }
    }

    pub fn balancing(reason: &str) -> Self {
        ChemError::BalancingFailure {
            reason: reason.to_string(),
        }
    }

    /// Message shown to the user by the presentation layer.
    /// ru: сообщение для пользователя
    pub fn user_message(&self) -> &'static str {
        match self {
            ChemError::BalancingFailure { .. } => "Ваша реакция не корректна или не существует!",
            ChemError::AmbiguousComposition { .. } => {
                "К сожалению, я не могу посчитать индексы для этого вещества"
            }
            ChemError::Settings(_) => "Не удалось загрузить настройки",
            _ => "Вы неправильно ввели данные для подсчета",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let e = ChemError::balancing("no solution");
        assert_eq!(e.user_message(), "Ваша реакция не корректна или не существует!");
        let e = ChemError::unknown(SymbolKind::Element, "Xx");
        assert_eq!(e.user_message(), "Вы неправильно ввели данные для подсчета");
        assert_eq!(e.to_string(), "Unknown element: 'Xx'");
    }
}
