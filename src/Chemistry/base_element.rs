//! # Base Element Module
//!
//! Splits a formula into its anionic part (an element or a group of polyatomic ions) and
//! the base element, then lists the valence pairs of the two parts.
//!
//! ru
//! Определение кислотного остатка (аниона) и основного элемента вещества.
//! Ключи анионов проверяются в фиксированном порядке: "HSO" раньше "SO", "SO" раньше "S".
//! Если первый подошедший ключ - одиночный элемент, анионом становится самый
//! электроотрицательный элемент формулы.
use crate::Chemistry::element_table::{ElementTable, Ion};
use crate::Chemistry::molmass::{ParsedFormula, parse_formula};
use crate::errors::{ChemError, ChemResult, SymbolKind};
use log::debug;

/// anionic part of a compound: the key that matched ("SO") and every ion it stands for
/// (SO₃, SO₄, S₂O₇), or a single element anion
#[derive(Debug, Clone, PartialEq)]
pub struct AnionSelection {
    pub key: &'static str,
    pub variants: Vec<&'static Ion>,
}

/// base element and the anionic part of a compound
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundParts {
    pub base: String,
    pub anion: AnionSelection,
}

fn key_elements(table: &ElementTable, key: &str) -> ChemResult<Vec<String>> {
    Ok(parse_formula(table, key)?
        .distinct()
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// Find the anionic component of a formula.
///
/// A key matches when all its elements are present in the formula and the formula contains
/// something else too (a lone ion has no counterpart). The first match ends the search;
/// group keys return their ion variants, otherwise the most electronegative element wins.
pub fn select_anion(table: &ElementTable, parsed: &ParsedFormula) -> ChemResult<AnionSelection> {
    let elements = parsed.distinct();
    for anion_key in table.anion_keys() {
        let key_elems = key_elements(table, anion_key.key)?;
        let is_subset = key_elems.iter().all(|e| elements.contains(&e.as_str()));
        if is_subset && key_elems.len() < elements.len() {
            if anion_key.group {
                debug!("anion key {} matched {:?}", anion_key.key, elements);
                let variants = anion_key
                    .variants
                    .iter()
                    .map(|v| table.ion(v))
                    .collect::<ChemResult<Vec<_>>>()?;
                return Ok(AnionSelection {
                    key: anion_key.key,
                    variants,
                });
            }
            break;
        }
    }

    // single element anion: the most electronegative element of the formula
    let mut best: Option<(&str, usize)> = None;
    for element in &elements {
        let rank = table
            .electronegativity_rank(element)
            .ok_or_else(|| ChemError::unknown(SymbolKind::Element, element))?;
        if best.is_none_or(|(_, r)| rank > r) {
            best = Some((element, rank));
        }
    }
    let (symbol, _) = best.ok_or_else(|| ChemError::input_format("", "empty formula"))?;
    let anion_key = table
        .anion_keys()
        .iter()
        .find(|k| k.key == symbol)
        .ok_or_else(|| ChemError::unknown(SymbolKind::Ion, symbol))?;
    debug!("anion {} chosen by electronegativity", symbol);
    Ok(AnionSelection {
        key: anion_key.key,
        variants: vec![table.ion(anion_key.key)?],
    })
}

/// Anionic part plus the single element left after removing the anion's elements.
pub fn split_compound(table: &ElementTable, formula: &str) -> ChemResult<CompoundParts> {
    let parsed = parse_formula(table, formula)?;
    let anion = select_anion(table, &parsed)?;
    let anion_elems = key_elements(table, anion.key)?;
    let remaining: Vec<String> = parsed
        .distinct()
        .into_iter()
        .filter(|e| !anion_elems.iter().any(|a| a == e))
        .map(str::to_string)
        .collect();
    if remaining.len() != 1 {
        return Err(ChemError::AmbiguousComposition {
            formula: formula.to_string(),
            remaining,
        });
    }
    Ok(CompoundParts {
        base: remaining[0].clone(),
        anion,
    })
}

/// Cartesian product (base valence, anion valence); base valences vary slowest.
pub fn resolve_valences(table: &ElementTable, base: &str, anion: &str) -> ChemResult<Vec<(u8, u8)>> {
    let anion_valence = table.ion(anion)?.valence;
    let base_valences = table.valences(base)?;
    Ok(base_valences
        .iter()
        .map(|&vb| (vb, anion_valence))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(selection: &AnionSelection) -> Vec<&str> {
        selection.variants.iter().map(|i| i.symbol).collect()
    }

    #[test]
    fn test_single_element_anion() {
        let table = ElementTable::shared();
        let parts = split_compound(&table, "FeO").unwrap();
        assert_eq!(parts.base, "Fe");
        assert_eq!(parts.anion.key, "O");
        assert_eq!(symbols(&parts.anion), vec!["O"]);

        // OH is the whole formula, so it is not an ion here
        let parts = split_compound(&table, "HO").unwrap();
        assert_eq!(parts.base, "H");
        assert_eq!(parts.anion.key, "O");

        let parts = split_compound(&table, "NaCl").unwrap();
        assert_eq!(parts.base, "Na");
        assert_eq!(parts.anion.key, "Cl");
    }

    #[test]
    fn test_polyatomic_groups() {
        let table = ElementTable::shared();
        let parts = split_compound(&table, "FeSO").unwrap();
        assert_eq!(parts.base, "Fe");
        assert_eq!(symbols(&parts.anion), vec!["SO₃", "SO₄", "S₂O₇"]);

        // the longer key must win over "SO"
        let parts = split_compound(&table, "NaHSO").unwrap();
        assert_eq!(parts.base, "Na");
        assert_eq!(parts.anion.key, "HSO");

        let parts = split_compound(&table, "H2SO4").unwrap();
        assert_eq!(parts.base, "H");
        assert_eq!(parts.anion.key, "SO");

        let parts = split_compound(&table, "NaOH").unwrap();
        assert_eq!(parts.base, "Na");
        assert_eq!(symbols(&parts.anion), vec!["OH"]);

        let parts = split_compound(&table, "HN").unwrap();
        assert_eq!(parts.base, "H");
        assert_eq!(symbols(&parts.anion), vec!["N", "N₃"]);
    }

    #[test]
    fn test_selection_errors() {
        let table = ElementTable::shared();
        assert!(matches!(
            split_compound(&table, "FeCuO"),
            Err(ChemError::AmbiguousComposition { ref remaining, .. }) if remaining.len() == 2
        ));
        // helium has no place in the electronegativity ranking
        assert!(matches!(
            split_compound(&table, "HeO"),
            Err(ChemError::UnknownSymbol { .. })
        ));
        // the most electronegative element of NaK is not an anion
        assert!(matches!(
            split_compound(&table, "NaK"),
            Err(ChemError::UnknownSymbol { kind: SymbolKind::Ion, .. })
        ));
    }

    #[test]
    fn test_resolve_valences() {
        let table = ElementTable::shared();
        assert_eq!(resolve_valences(&table, "Fe", "O").unwrap(), vec![(2, 2), (3, 2)]);
        assert_eq!(resolve_valences(&table, "Na", "SO₄").unwrap(), vec![(1, 2)]);
        assert!(resolve_valences(&table, "Ne", "O").is_err());
        assert!(resolve_valences(&table, "Fe", "XO₄").is_err());
    }
}
