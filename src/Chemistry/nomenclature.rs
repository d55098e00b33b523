//! # Nomenclature Module
//!
//! ## Aim
//! Builds every compound a base element can form with an anion: one candidate per pair of
//! valences, indices from the least common multiple of the two valences, the formula written
//! with subscripts and the Russian name.
//!
//! ## Main Functions
//! - `lcm`, `combine_indices`: index pair with base_valence * base_index == anion_valence * anion_index
//! - `compound_candidates`, `candidates_for_formula`: all candidates for a base/anion pair or for
//!   the letters of a formula ("FeSO" -> FeSO₃, Fe₂(SO₃)₃, FeSO₄, ...)
//! - `formulation_of_chemical_formulas`: the answer text with valence marks and numbered lines
//! - `making_formulas_by_name`: the same from a Russian name ("сульфат железа"), the named
//!   compound highlighted
//!
//! ## Example
//! ```
//! use ChemSchool::Chemistry::element_table::ElementTable;
//! use ChemSchool::Chemistry::nomenclature::candidates_for_formula;
//! let table = ElementTable::shared();
//! let formulas: Vec<String> = candidates_for_formula(&table, "FeO")
//!     .unwrap()
//!     .into_iter()
//!     .map(|c| c.formula)
//!     .collect();
//! assert_eq!(formulas, vec!["FeO", "Fe₂O₃"]);
//! ```
//!
//! ru
//! Составление формул по валентностям и названий веществ.
use crate::Chemistry::base_element::{resolve_valences, split_compound};
use crate::Chemistry::element_table::{ElementTable, Ion};
use crate::Utils::subscripts::{index_to_subscript, is_subscript_digit, roman, valence_mark};
use crate::errors::{ChemError, ChemResult, SymbolKind};
use crate::settings::Markup;
use log::debug;

/// least common multiple by counting up from the larger number
pub fn lcm(a: u32, b: u32) -> u32 {
    if a == 0 || b == 0 {
        return 0;
    }
    let mut candidate = a.max(b);
    while candidate % a != 0 || candidate % b != 0 {
        candidate += 1;
    }
    candidate
}

/// (base index, anion index): Fe(III) and O(II) give (2, 3)
pub fn combine_indices(base_valence: u8, anion_valence: u8) -> (usize, usize) {
    let l = lcm(base_valence as u32, anion_valence as u32);
    (
        (l / base_valence as u32) as usize,
        (l / anion_valence as u32) as usize,
    )
}

fn needs_brackets(symbol: &str) -> bool {
    symbol.chars().filter(char::is_ascii_uppercase).count() > 1
        || symbol.chars().last().is_some_and(is_subscript_digit)
}

/// symbol with its index; polyatomic ions and N₃ are bracketed when the index is above 1
pub fn formula_token(symbol: &str, index: usize) -> String {
    if index > 1 && needs_brackets(symbol) {
        format!("({}){}", symbol, index_to_subscript(index))
    } else {
        format!("{}{}", symbol, index_to_subscript(index))
    }
}

/// One compound of a base element with an anion for a fixed pair of valences
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCandidate {
    pub base: String,
    pub anion: &'static Ion,
    pub base_valence: u8,
    pub anion_valence: u8,
    pub base_index: usize,
    pub anion_index: usize,
    /// "Fe₂(SO₄)₃"
    pub formula: String,
    /// "сульфат железа (III)"
    pub name: String,
}

impl CompoundCandidate {
    pub fn base_token(&self) -> String {
        formula_token(&self.base, self.base_index)
    }

    pub fn anion_token(&self) -> String {
        formula_token(self.anion.symbol, self.anion_index)
    }
}

/// "<anion name> <base genitive>", the Roman numeral only for elements with several valences,
/// the acid name when the formula is a known acid
pub fn compound_name(
    table: &ElementTable,
    base: &str,
    anion: &Ion,
    base_valence: u8,
    formula: &str,
) -> ChemResult<String> {
    let mut name = format!("{} {}", anion.name, table.genitive(base)?);
    if table.valences(base)?.len() > 1 {
        if let Some(numeral) = roman(base_valence) {
            name.push_str(&format!(" ({})", numeral));
        }
    }
    if let Some(acid) = table.acid_name(formula) {
        name.push_str(&format!(" ({} кислота)", acid));
    }
    Ok(name)
}

pub fn compound_candidates(
    table: &ElementTable,
    base: &str,
    anion: &'static Ion,
) -> ChemResult<Vec<CompoundCandidate>> {
    resolve_valences(table, base, anion.symbol)?
        .into_iter()
        .map(|(base_valence, anion_valence)| {
            let (base_index, anion_index) = combine_indices(base_valence, anion_valence);
            let formula = format!(
                "{}{}",
                formula_token(base, base_index),
                formula_token(anion.symbol, anion_index)
            );
            let name = compound_name(table, base, anion, base_valence, &formula)?;
            Ok(CompoundCandidate {
                base: base.to_string(),
                anion,
                base_valence,
                anion_valence,
                base_index,
                anion_index,
                formula,
                name,
            })
        })
        .collect()
}

/// All candidates for the letters of a formula, ion variants in table order
pub fn candidates_for_formula(
    table: &ElementTable,
    formula: &str,
) -> ChemResult<Vec<CompoundCandidate>> {
    let parts = split_compound(table, formula)?;
    let mut candidates = Vec::new();
    for &ion in &parts.anion.variants {
        candidates.extend(compound_candidates(table, &parts.base, ion)?);
    }
    debug!(
        "{}: base {}, anion key {}, {} candidates",
        formula,
        parts.base,
        parts.anion.key,
        candidates.len()
    );
    Ok(candidates)
}

/// answer text together with the formulas it lists
#[derive(Debug, Clone, PartialEq)]
pub struct NomenclatureAnswer {
    pub text: String,
    pub formulas: Vec<String>,
    /// formulas matching the requested name, empty for a formula request
    pub highlighted: Vec<String>,
}

/// marks of both valences placed over the tokens of the numbered line below it
fn valence_line(number: usize, candidate: &CompoundCandidate) -> String {
    let base_tabs = "\t".repeat(candidate.base_token().chars().count().div_ceil(2));
    let anion_tabs = "\t".repeat(candidate.anion_token().chars().count().div_ceil(2) + 1);
    format!(
        "{}{}{}{}{}{}",
        "  ".repeat(number.to_string().len() + 2),
        base_tabs,
        valence_mark(candidate.base_valence).unwrap_or_default(),
        base_tabs,
        anion_tabs,
        valence_mark(candidate.anion_valence).unwrap_or_default()
    )
}

fn candidate_line(number: usize, candidate: &CompoundCandidate) -> String {
    format!("{}. {} - {}", number, candidate.formula, candidate.name)
}

fn render_candidates<F>(
    candidates: &[CompoundCandidate],
    markup: Markup,
    is_highlighted: F,
) -> NomenclatureAnswer
where
    F: Fn(&str) -> bool,
{
    let mut lines = vec!["Ответ:".to_string()];
    let mut highlighted = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let number = i + 1;
        lines.push(valence_line(number, candidate));
        let line = candidate_line(number, candidate);
        if is_highlighted(&line) {
            highlighted.push(candidate.formula.clone());
            lines.push(markup.bold(&line));
        } else {
            lines.push(line);
        }
    }
    NomenclatureAnswer {
        text: lines.join("\n"),
        formulas: candidates.iter().map(|c| c.formula.clone()).collect(),
        highlighted,
    }
}

fn simple_substance_answer(substances: &[(&str, &str)]) -> NomenclatureAnswer {
    let text = substances
        .iter()
        .enumerate()
        .map(|(i, (formula, name))| format!("{}. {} - {}", i + 1, formula, name))
        .collect::<Vec<_>>()
        .join("\n");
    NomenclatureAnswer {
        text,
        formulas: substances.iter().map(|(f, _)| f.to_string()).collect(),
        highlighted: Vec::new(),
    }
}

/// Every compound that can be written with the given letters ("FeO", "HSO", "CaOH").
/// O, H, N and F alone answer with their simple substances.
pub fn formulation_of_chemical_formulas(
    table: &ElementTable,
    letters: &str,
) -> ChemResult<NomenclatureAnswer> {
    let letters = letters.trim();
    if let Some(substances) = table.simple_substances(letters) {
        return Ok(simple_substance_answer(substances));
    }
    let candidates = candidates_for_formula(table, letters)?;
    Ok(render_candidates(&candidates, Markup::Plain, |_| false))
}

/// Compounds for a Russian name: "оксид железа", "железа оксид", "сульфат меди (ii)",
/// "серная кислота", "кислород". Candidates of the same letters are listed and the ones
/// matching the name are highlighted.
pub fn making_formulas_by_name(
    table: &ElementTable,
    name: &str,
    markup: Markup,
) -> ChemResult<NomenclatureAnswer> {
    let lowered = name.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let Some(&first) = words.first() else {
        return Err(ChemError::input_format(name, "empty name"));
    };

    if words.len() == 1 {
        if let Some(letters) = table.substance_by_name(first) {
            return formulation_of_chemical_formulas(table, letters);
        }
        if let Some(letters) = table.acid_by_name(first) {
            return acid_answer(table, letters, first, markup);
        }
        return Err(ChemError::unknown(SymbolKind::Name, first));
    }

    let second = words[1];
    let (anion_word, genitive_word) = if table.anion_by_name(first).is_some() {
        (first, second)
    } else if table.anion_by_name(second).is_some() {
        (second, first)
    } else {
        return match (table.acid_by_name(first), table.acid_by_name(second)) {
            (Some(letters), _) => acid_answer(table, letters, first, markup),
            (None, Some(letters)) => acid_answer(table, letters, second, markup),
            (None, None) => Err(ChemError::unknown(SymbolKind::Name, &lowered)),
        };
    };
    let anion = table
        .anion_by_name(anion_word)
        .ok_or_else(|| ChemError::unknown(SymbolKind::Name, anion_word))?;
    let base = table
        .element_by_genitive(genitive_word)
        .ok_or_else(|| ChemError::unknown(SymbolKind::Name, genitive_word))?;
    // "(iii)" after the name narrows the choice to one valence
    let numeral = words.get(2).copied().filter(|w| w.starts_with('('));

    let candidates = candidates_for_formula(table, &format!("{}{}", anion, base))?;
    let answer = render_candidates(&candidates, markup, |line| {
        let anion_matches =
            line.contains(&format!("({})", anion_word)) || line.contains(&format!(" {} ", anion_word));
        let numeral_matches = numeral.is_none_or(|n| line.to_lowercase().contains(n));
        anion_matches && line.contains(&format!(" {}", genitive_word)) && numeral_matches
    });
    debug!("{} -> {:?}", lowered, answer.highlighted);
    Ok(answer)
}

fn acid_answer(
    table: &ElementTable,
    letters: &str,
    adjective: &str,
    markup: Markup,
) -> ChemResult<NomenclatureAnswer> {
    let candidates = candidates_for_formula(table, letters)?;
    Ok(render_candidates(&candidates, markup, |line| {
        line.contains(&format!("({}", adjective))
            || line.contains(&format!(" {},", adjective))
            || line.contains(&format!(" {} ", adjective))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcm_is_minimal() {
        for a in 1..=8u32 {
            for b in 1..=8u32 {
                let l = lcm(a, b);
                assert_eq!(l % a, 0);
                assert_eq!(l % b, 0);
                assert!((a.max(b)..l).all(|m| m % a != 0 || m % b != 0));
            }
        }
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 3), 0);
    }

    #[test]
    fn test_combine_indices() {
        for vb in 1..=8u8 {
            for va in 1..=8u8 {
                let (ib, ia) = combine_indices(vb, va);
                assert_eq!(vb as usize * ib, va as usize * ia);
            }
        }
        assert_eq!(combine_indices(3, 2), (2, 3));
        assert_eq!(combine_indices(2, 2), (1, 1));
    }

    #[test]
    fn test_formula_token() {
        assert_eq!(formula_token("Fe", 2), "Fe₂");
        assert_eq!(formula_token("O", 1), "O");
        assert_eq!(formula_token("SO₄", 3), "(SO₄)₃");
        assert_eq!(formula_token("SO₄", 1), "SO₄");
        assert_eq!(formula_token("OH", 2), "(OH)₂");
        assert_eq!(formula_token("N₃", 2), "(N₃)₂");
        assert_eq!(formula_token("Cl", 3), "Cl₃");
    }
}
