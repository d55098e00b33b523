//! # Molmass Module
//!
//! Parses a chemical formula ("Fe2(SO4)3", "H₂O") into the sequence of its atoms and
//! calculates the relative molecular weight with the school-style derivation. The element
//! composition matrix of several formulas feeds the equation balancer.
use crate::Chemistry::element_table::ElementTable;
use crate::Utils::numbers::format_number;
use crate::Utils::subscripts::{index_to_subscript, normalize_subscripts, to_subscript};
use crate::errors::{ChemError, ChemResult, SymbolKind};
use crate::settings::Markup;
use log::debug;
use nalgebra::DMatrix;
use std::collections::HashMap;

/// largest index or group multiplier accepted in a formula
pub const MAX_INDEX: usize = 10_000;
/// largest number of atoms in one formula
pub const MAX_ATOMS: usize = 100_000;

/// Formula after parsing: every atom is a separate entry, order of the input is kept
/// ("H2O" -> [H, H, O]). Weight and valence logic treat it as a multiset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    symbols: Vec<String>,
}

impl ParsedFormula {
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// number of atoms of the element
    pub fn count(&self, symbol: &str) -> usize {
        self.symbols.iter().filter(|s| s.as_str() == symbol).count()
    }

    /// distinct elements in order of first occurrence
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for symbol in &self.symbols {
            if !seen.contains(&symbol.as_str()) {
                seen.push(symbol);
            }
        }
        seen
    }

    /// (element, number of atoms) in order of first occurrence
    pub fn grouped(&self) -> Vec<(&str, usize)> {
        self.distinct()
            .into_iter()
            .map(|symbol| (symbol, self.count(symbol)))
            .collect()
    }

    pub fn composition(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for symbol in &self.symbols {
            *counts.entry(symbol.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// true for simple substances like O2 or Fe
    pub fn is_elemental(&self) -> bool {
        self.distinct().len() == 1
    }

    /// canonical form with subscripts: "OHH" -> "OH₂"
    pub fn canonical(&self) -> String {
        self.grouped()
            .into_iter()
            .map(|(symbol, n)| format!("{}{}", symbol, index_to_subscript(n)))
            .collect()
    }
}

// number written right after position `start` (a closing bracket or an element symbol);
// returns (number, position after the last digit)
fn stoichio_after(chars: &[char], start: usize, input: &str) -> ChemResult<(usize, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return Ok((1, end));
    }
    let digits: String = chars[start..end].iter().collect();
    let number: usize = digits
        .parse()
        .map_err(|_| ChemError::input_format(input, "index is too large"))?;
    if number == 0 {
        return Err(ChemError::input_format(input, "index can not be zero"));
    }
    if number > MAX_INDEX {
        return Err(ChemError::input_format(
            input,
            &format!("index {} is larger than {}", number, MAX_INDEX),
        ));
    }
    Ok((number, end))
}

fn check_atoms(total: usize, input: &str) -> ChemResult<()> {
    if total > MAX_ATOMS {
        return Err(ChemError::input_format(
            input,
            &format!("more than {} atoms", MAX_ATOMS),
        ));
    }
    Ok(())
}

// formula without brackets: uppercase letter, lowercase letters, optional digits
fn parse_plain(table: &ElementTable, formula: &str, input: &str) -> ChemResult<Vec<String>> {
    let chars: Vec<char> = formula.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            return Err(ChemError::input_format(
                input,
                &format!("unexpected character '{}'", chars[i]),
            ));
        }
        let start = i;
        i += 1;
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            i += 1;
        }
        let element: String = chars[start..i].iter().collect();
        if !table.contains(&element) {
            return Err(ChemError::unknown(SymbolKind::Element, &element));
        }
        let (count, end) = stoichio_after(&chars, i, input)?;
        i = end;
        check_atoms(symbols.len() + count, input)?;
        symbols.extend(std::iter::repeat_n(element, count));
    }
    Ok(symbols)
}

/// Parse a chemical formula into the sequence of its atoms.
/// Subscript digits and whitespace are accepted. Only one group in parentheses is supported:
/// "Fe2(SO4)3" is fine, "Ca(OH)2(NO3)2" and nested groups are rejected with an input format error.
/// Elements outside the group come first, then the group repeated by its multiplier.
pub fn parse_formula(table: &ElementTable, formula: &str) -> ChemResult<ParsedFormula> {
    let cleaned: String = normalize_subscripts(formula)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(ChemError::input_format(formula, "empty formula"));
    }
    let opening = cleaned.matches('(').count();
    let closing = cleaned.matches(')').count();
    let symbols = if opening == 0 && closing == 0 {
        parse_plain(table, &cleaned, formula)?
    } else {
        if opening != 1 || closing != 1 {
            return Err(ChemError::input_format(
                formula,
                "only one group in parentheses is supported",
            ));
        }
        // both brackets are ASCII so byte positions are char boundaries
        let start_bracket = cleaned.find('(').unwrap_or_default();
        let end_bracket = cleaned.find(')').unwrap_or_default();
        if end_bracket < start_bracket + 2 {
            return Err(ChemError::input_format(formula, "unmatched or empty parentheses"));
        }
        let inside = &cleaned[start_bracket + 1..end_bracket];
        let tail: Vec<char> = cleaned[end_bracket + 1..].chars().collect();
        let (multiplier, digits_end) = stoichio_after(&tail, 0, formula)?;
        let rest: String = tail[digits_end..].iter().collect();
        let outside = format!("{}{}", &cleaned[..start_bracket], rest);

        let inside_symbols = parse_plain(table, inside, formula)?;
        let mut symbols = parse_plain(table, &outside, formula)?;
        check_atoms(symbols.len() + inside_symbols.len() * multiplier, formula)?;
        for _ in 0..multiplier {
            symbols.extend(inside_symbols.iter().cloned());
        }
        symbols
    };
    let parsed = ParsedFormula { symbols };
    debug!("parsed formula {} -> {}", formula, parsed.canonical());
    Ok(parsed)
}

/// relative molecular weight together with the school-style derivation
#[derive(Debug, Clone, PartialEq)]
pub struct MolecularWeight {
    /// formula as the user wrote it, with subscripts
    pub formula: String,
    /// "2Aᵣ(H) + Aᵣ(O)"
    pub terms: String,
    /// "2 * 1 + 16"
    pub substitution: String,
    pub value: f64,
}

impl MolecularWeight {
    /// Mᵣ(H₂O) = 2Aᵣ(H) + Aᵣ(O) = 2 * 1 + 16 = 18
    pub fn render(&self, markup: Markup) -> String {
        format!(
            "Mᵣ({}) = {} = {} = {}",
            self.formula,
            self.terms,
            self.substitution,
            markup.bold(&format_number(self.value))
        )
    }
}

/// Sum of atomic weights of a parsed formula. Terms follow the order of first occurrence.
pub fn molecular_weight(
    table: &ElementTable,
    formula: &str,
    parsed: &ParsedFormula,
) -> ChemResult<MolecularWeight> {
    let mut terms = Vec::new();
    let mut substitution = Vec::new();
    let mut value = 0.0;
    for (symbol, count) in parsed.grouped() {
        let weight = table.atomic_weight(symbol)?;
        value += weight * count as f64;
        if count == 1 {
            terms.push(format!("Aᵣ({})", symbol));
            substitution.push(format_number(weight));
        } else {
            terms.push(format!("{}Aᵣ({})", count, symbol));
            substitution.push(format!("{} * {}", count, format_number(weight)));
        }
    }
    let display: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(MolecularWeight {
        formula: to_subscript(&normalize_subscripts(&display)),
        terms: terms.join(" + "),
        substitution: substitution.join(" + "),
        value,
    })
}

/// Matrix of atomic composition: one row per formula, one column per element.
/// Elements are listed in order of first occurrence over all formulas.
pub fn create_elem_composition_matrix(
    table: &ElementTable,
    vec_of_formulae: &[&str],
) -> ChemResult<(DMatrix<f64>, Vec<String>)> {
    let mut unique_vec_of_elems: Vec<String> = Vec::new();
    let mut vec_of_compositions = Vec::new();
    for formula in vec_of_formulae {
        let parsed = parse_formula(table, formula)?;
        for symbol in parsed.distinct() {
            if !unique_vec_of_elems.iter().any(|e| e == symbol) {
                unique_vec_of_elems.push(symbol.to_string());
            }
        }
        vec_of_compositions.push(parsed.composition());
    }
    let num_rows = vec_of_compositions.len();
    let num_cols = unique_vec_of_elems.len();
    let mut matrix = DMatrix::zeros(num_rows, num_cols);
    for (substance_i, composition) in vec_of_compositions.iter().enumerate() {
        for (j, element_j) in unique_vec_of_elems.iter().enumerate() {
            if let Some(count) = composition.get(element_j) {
                matrix[(substance_i, j)] += *count as f64;
            }
        }
    }
    Ok((matrix, unique_vec_of_elems))
}
