//! # Chemistry
//!
//! School chemistry computations on formula strings.
//!
//! - `element_table`: static reference data (elements, ions, acids, names)
//! - `molmass`: formula parser, molecular weight, composition matrix
//! - `base_element`: anionic part and base element of a compound, valence pairs
//! - `nomenclature`: indices by valences, formulas and Russian names
//! - `equation`: reaction equations, balancing and reaction type
//! - `reference_tables`: valence and ion tables as text
pub mod base_element;
pub mod element_table;
pub mod equation;
pub mod molmass;
pub mod nomenclature;
pub mod reference_tables;
