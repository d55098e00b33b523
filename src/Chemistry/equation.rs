//! # Equation Module
//!
//! ## Aim
//! Balances a reaction skeleton ("Al + CuSO4 = Al2(SO4)3 + Cu"), determines the reaction type
//! and the sum of coefficients.
//!
//! ## Balancing
//! The composition matrix of all compounds (rows = compounds, columns = elements) is transposed
//! and the columns of products change sign, so balanced coefficients form the null space of the
//! element balance matrix. The null space is found exactly by Gauss-Jordan elimination over
//! arbitrary-precision rationals and scaled to integers by the lcm of the denominators.
//! A reaction is balanced only when the null space is one-dimensional, the vector spanning it
//! has all components of one sign and every coefficient (and their sum) fits in `u64`.
//!
//! ## Reaction type
//! - соединение (synthesis): several reactants, one product
//! - разложение (decomposition): one reactant, several products
//! - обмен (exchange): every reactant and every product is a compound of two or more elements
//! - замещение (substitution): everything else
//!
//! ru
//! Расстановка коэффициентов в уравнении реакции и определение типа реакции.
use crate::Chemistry::element_table::ElementTable;
use crate::Chemistry::molmass::{create_elem_composition_matrix, parse_formula};
use crate::Utils::subscripts::{normalize_subscripts, to_subscript};
use crate::errors::{ChemError, ChemResult};
use crate::settings::Markup;
use log::{debug, info};
use malachite::num::arithmetic::traits::Lcm;
use malachite::num::basic::traits::{One, Zero};
use malachite::{Natural, Rational};
use nalgebra::DMatrix;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionType {
    Synthesis,
    Decomposition,
    Substitution,
    Exchange,
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReactionType::Synthesis => "соединение",
            ReactionType::Decomposition => "разложение",
            ReactionType::Substitution => "замещение",
            ReactionType::Exchange => "обмен",
        };
        write!(f, "{}", name)
    }
}

/// Finds positive integer coefficients: reactants first, then products
pub trait Balancer {
    fn balance(
        &self,
        table: &ElementTable,
        reactants: &[String],
        products: &[String],
    ) -> ChemResult<Vec<u64>>;
}

/// Exact balancer on the element balance matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixBalancer;

impl Balancer for MatrixBalancer {
    fn balance(
        &self,
        table: &ElementTable,
        reactants: &[String],
        products: &[String],
    ) -> ChemResult<Vec<u64>> {
        let formulas: Vec<&str> = reactants
            .iter()
            .chain(products.iter())
            .map(String::as_str)
            .collect();
        let (composition, elements) = create_elem_composition_matrix(table, &formulas)?;
        // element balance: elements x compounds, products with negative sign
        let mut balance_matrix = composition.transpose();
        for j in reactants.len()..formulas.len() {
            balance_matrix.column_mut(j).neg_mut();
        }
        debug!("balance matrix over {:?}: {}", elements, balance_matrix);
        integer_null_vector(&balance_matrix)
    }
}

/// The positive integer vector spanning a one-dimensional null space, in lowest terms.
pub fn integer_null_vector(matrix: &DMatrix<f64>) -> ChemResult<Vec<u64>> {
    let (m, n) = matrix.shape();
    let mut rows: Vec<Vec<Rational>> = (0..m)
        .map(|i| {
            (0..n)
                .map(|j| Rational::from(matrix[(i, j)].round() as i64))
                .collect()
        })
        .collect();

    // reduced row echelon form; (row, column) of every pivot
    let mut pivots: Vec<(usize, usize)> = Vec::new();
    let mut r = 0;
    for c in 0..n {
        if r == m {
            break;
        }
        let Some(p) = (r..m).find(|&i| rows[i][c] != Rational::ZERO) else {
            continue;
        };
        rows.swap(r, p);
        let inverse = Rational::ONE / &rows[r][c];
        for x in rows[r].iter_mut() {
            *x = &*x * &inverse;
        }
        let pivot_row = rows[r].clone();
        for (i, row) in rows.iter_mut().enumerate() {
            if i == r || row[c] == Rational::ZERO {
                continue;
            }
            let factor = row[c].clone();
            for (x, y) in row.iter_mut().zip(pivot_row.iter()) {
                let delta = &factor * y;
                *x -= delta;
            }
        }
        pivots.push((r, c));
        r += 1;
    }

    let free: Vec<usize> = (0..n)
        .filter(|c| !pivots.iter().any(|&(_, pc)| pc == *c))
        .collect();
    if free.len() != 1 {
        return Err(ChemError::balancing(&format!(
            "{} independent solutions",
            free.len()
        )));
    }
    let f = free[0];
    let mut vector = vec![Rational::ZERO; n];
    vector[f] = Rational::ONE;
    for &(row, col) in &pivots {
        vector[col] = -rows[row][f].clone();
    }
    // the free component is 1, so the lcm of denominators gives the primitive integer vector
    let mut lcm = Natural::ONE;
    for x in &vector {
        lcm = lcm.lcm(x.denominator_ref());
    }
    let scale = Rational::from(&lcm);
    for x in vector.iter_mut() {
        *x = &*x * &scale;
    }
    if vector.iter().all(|x| *x < Rational::ZERO) {
        vector = vector.into_iter().map(|x| -x).collect();
    }
    if vector.iter().any(|x| *x <= Rational::ZERO) {
        return Err(ChemError::balancing(
            "no solution with positive coefficients",
        ));
    }
    vector
        .iter()
        .map(|x| {
            u64::try_from(x).map_err(|_| {
                ChemError::balancing(&format!("coefficient {} is too large", x))
            })
        })
        .collect()
}

/// Balanced reaction with its type
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionEquation {
    /// formulas with subscripts, as written in the skeleton
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    /// reactants first, then products
    pub coefficients: Vec<u64>,
    pub reaction_type: ReactionType,
}

impl ReactionEquation {
    pub fn coefficient_sum(&self) -> ChemResult<u64> {
        self.coefficients
            .iter()
            .try_fold(0u64, |sum, &k| sum.checked_add(k))
            .ok_or_else(|| ChemError::balancing("sum of coefficients is too large"))
    }

    /// "2H₂ + O₂ = 2H₂O", coefficients above 1 highlighted
    pub fn balanced(&self, markup: Markup) -> String {
        let side = |compounds: &[String], coefficients: &[u64]| {
            compounds
                .iter()
                .zip(coefficients)
                .map(|(compound, &k)| {
                    if k == 1 {
                        compound.clone()
                    } else {
                        format!("{}{}", markup.bold(&k.to_string()), compound)
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        let (left, right) = self.coefficients.split_at(self.reactants.len());
        format!(
            "{} = {}",
            side(&self.reactants, left),
            side(&self.products, right)
        )
    }

    pub fn render(&self, markup: Markup) -> ChemResult<String> {
        Ok(format!(
            "{}\nТип реакции: {}\nСумма коэффициентов реакции: {}",
            self.balanced(markup),
            markup.bold(&self.reaction_type.to_string()),
            markup.bold(&self.coefficient_sum()?.to_string())
        ))
    }
}

const SEPARATORS: [&str; 3] = ["=>", "->", "→"];

fn side_compounds(side: &str, input: &str) -> ChemResult<Vec<String>> {
    side.split('+')
        .map(|compound| {
            // a coefficient written in the skeleton is ignored
            let formula: String = compound
                .trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
                .to_string();
            if formula.is_empty() {
                return Err(ChemError::input_format(input, "empty compound"));
            }
            Ok(formula)
        })
        .collect()
}

/// Splits "A + B = C" into reactants and products. `=`, `->`, `=>` and `→` separate the sides.
pub fn parse_skeleton(input: &str) -> ChemResult<(Vec<String>, Vec<String>)> {
    let mut text = normalize_subscripts(input);
    for separator in SEPARATORS {
        text = text.replace(separator, "=");
    }
    let sides: Vec<&str> = text.split('=').collect();
    if sides.len() != 2 {
        let reason = if sides.len() == 1 {
            "no '=' between reactants and products"
        } else {
            "more than one '='"
        };
        return Err(ChemError::input_format(input, reason));
    }
    Ok((side_compounds(sides[0], input)?, side_compounds(sides[1], input)?))
}

pub fn classify(
    table: &ElementTable,
    reactants: &[String],
    products: &[String],
) -> ChemResult<ReactionType> {
    if reactants.len() > 1 && products.len() == 1 {
        return Ok(ReactionType::Synthesis);
    }
    if reactants.len() == 1 && products.len() > 1 {
        return Ok(ReactionType::Decomposition);
    }
    let mut all_compounds = true;
    for formula in reactants.iter().chain(products.iter()) {
        if parse_formula(table, formula)?.is_elemental() {
            all_compounds = false;
        }
    }
    Ok(if all_compounds {
        ReactionType::Exchange
    } else {
        ReactionType::Substitution
    })
}

pub fn balance_equation_with<B: Balancer>(
    table: &ElementTable,
    input: &str,
    balancer: &B,
) -> ChemResult<ReactionEquation> {
    let (reactants, products) = parse_skeleton(input)?;
    let reaction_type = classify(table, &reactants, &products)?;
    let coefficients = balancer.balance(table, &reactants, &products)?;
    let display = |formulas: Vec<String>| -> Vec<String> {
        formulas
            .iter()
            .map(|f| to_subscript(&f.replace(' ', "")))
            .collect()
    };
    let equation = ReactionEquation {
        reactants: display(reactants),
        products: display(products),
        coefficients,
        reaction_type,
    };
    let sum = equation.coefficient_sum()?;
    info!(
        "{} -> {} ({}, sum {})",
        input,
        equation.balanced(Markup::Plain),
        equation.reaction_type,
        sum
    );
    Ok(equation)
}

/// Balance and classify with the default balancer
pub fn balance_equation(table: &ElementTable, input: &str) -> ChemResult<ReactionEquation> {
    balance_equation_with(table, input, &MatrixBalancer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(input: &str) -> ChemResult<ReactionEquation> {
        balance_equation(&ElementTable::shared(), input)
    }

    #[test]
    fn test_synthesis_of_carbon_dioxide() {
        let equation = balance("C + O2 = CO2").unwrap();
        assert_eq!(equation.coefficients, vec![1, 1, 1]);
        assert_eq!(equation.reaction_type, ReactionType::Synthesis);
        assert_eq!(equation.coefficient_sum().unwrap(), 3);
        assert_eq!(equation.balanced(Markup::Plain), "C + O₂ = CO₂");
    }

    #[test]
    fn test_balancing() {
        let equation = balance("H2 + O2 = H2O").unwrap();
        assert_eq!(equation.coefficients, vec![2, 1, 2]);
        assert_eq!(equation.balanced(Markup::Plain), "2H₂ + O₂ = 2H₂O");
        assert_eq!(equation.balanced(Markup::Html), "<b>2</b>H₂ + O₂ = <b>2</b>H₂O");

        let equation = balance("Fe + O2 -> Fe2O3").unwrap();
        assert_eq!(equation.coefficients, vec![4, 3, 2]);
        assert_eq!(equation.coefficient_sum().unwrap(), 9);

        let equation = balance("KMnO4 → K2MnO4 + MnO2 + O2").unwrap();
        assert_eq!(equation.coefficients, vec![2, 1, 1, 1]);
        assert_eq!(equation.reaction_type, ReactionType::Decomposition);

        // group in parentheses and written coefficients
        let equation = balance("2Al + 3CuSO₄ => Al2(SO4)3 + Cu").unwrap();
        assert_eq!(equation.coefficients, vec![2, 3, 1, 3]);
        assert_eq!(equation.reactants, vec!["Al", "CuSO₄"]);
    }

    #[test]
    fn test_classification() {
        let equation = balance("Zn + HCl = ZnCl2 + H2").unwrap();
        assert_eq!(equation.reaction_type, ReactionType::Substitution);
        assert_eq!(equation.coefficients, vec![1, 2, 1, 1]);

        let equation = balance("NaOH + HCl = NaCl + H2O").unwrap();
        assert_eq!(equation.reaction_type, ReactionType::Exchange);
        assert_eq!(equation.coefficient_sum().unwrap(), 4);
    }

    #[test]
    fn test_render() {
        let equation = balance("H2 + O2 = H2O").unwrap();
        assert_eq!(
            equation.render(Markup::Html).unwrap(),
            "<b>2</b>H₂ + O₂ = <b>2</b>H₂O\nТип реакции: <b>соединение</b>\nСумма коэффициентов реакции: <b>5</b>"
        );
    }

    #[test]
    fn test_balancing_failures() {
        assert!(matches!(
            balance("C = O2"),
            Err(ChemError::BalancingFailure { .. })
        ));
        // two independent ways to balance
        assert!(matches!(
            balance("H2 + O2 = H2O + H2O2"),
            Err(ChemError::BalancingFailure { .. })
        ));
    }

    #[test]
    fn test_large_coefficients_are_exact() {
        // indices with no common factors give five and seven digit coefficients
        let equation = balance("Na97K89 + Cl2 = Na101Cl103 + K107Cl109").unwrap();
        assert_eq!(equation.coefficients, vec![10807, 1024419, 10379, 8989]);
        let &[a, b, c, d] = &equation.coefficients[..] else {
            panic!("four coefficients expected");
        };
        assert_eq!(97 * a, 101 * c);
        assert_eq!(89 * a, 107 * d);
        assert_eq!(2 * b, 103 * c + 109 * d);
        assert_eq!(equation.coefficient_sum().unwrap(), 1054594);
    }

    #[test]
    fn test_coefficients_beyond_u64() {
        // the first coefficient is the product of ten primes, about 6.5e20
        let skeleton = "Na97K89Li83Rb79Cs73Mg71Ca67Sr61Ba59Zn53 + Cl2 = \
            Na101Cl + K103Cl + Li107Cl + Rb109Cl + Cs113Cl + \
            Mg127Cl + Ca131Cl + Sr137Cl + Ba139Cl + Zn149Cl";
        assert!(matches!(
            balance(skeleton),
            Err(ChemError::BalancingFailure { .. })
        ));
    }

    #[test]
    fn test_coefficient_sum_overflow() {
        let equation = ReactionEquation {
            reactants: vec!["A".to_string()],
            products: vec!["B".to_string()],
            coefficients: vec![u64::MAX, 2],
            reaction_type: ReactionType::Synthesis,
        };
        assert!(matches!(
            equation.coefficient_sum(),
            Err(ChemError::BalancingFailure { .. })
        ));
        assert!(equation.render(Markup::Plain).is_err());
    }

    #[test]
    fn test_skeleton_errors() {
        assert!(matches!(balance("C + O2"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(
            balance("C + O2 = CO2 = CO"),
            Err(ChemError::InputFormat { .. })
        ));
        assert!(matches!(balance("C + = CO2"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(
            balance("Xx + O2 = XxO2"),
            Err(ChemError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_null_vector() {
        // 2 H2 + O2 = 2 H2O
        let matrix = DMatrix::from_row_slice(2, 3, &[2.0, 0.0, -2.0, 0.0, 2.0, -1.0]);
        assert_eq!(integer_null_vector(&matrix).unwrap(), vec![2, 1, 2]);
        // Fe + O2 = Fe2O3 needs fractions before scaling: 1, 3/4, 1/2
        let matrix = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, -2.0, 0.0, 2.0, -3.0]);
        assert_eq!(integer_null_vector(&matrix).unwrap(), vec![4, 3, 2]);
    }
}
