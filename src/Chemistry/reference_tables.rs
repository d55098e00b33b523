//! Reference tables printed by the terminal menu: valences of elements and
//! names/valences of anions.
use crate::Chemistry::element_table::ElementTable;
use crate::Utils::subscripts::{roman, to_subscript};
use prettytable::{Cell, Row, Table};

fn romans(valences: &[u8]) -> String {
    valences
        .iter()
        .filter_map(|&v| roman(v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Symbol, genitive name, relative atomic weight and valences of every element that has any
pub fn valence_table(table: &ElementTable) -> Table {
    let mut pretty = Table::new();
    pretty.add_row(Row::new(vec![
        Cell::new("Элемент"),
        Cell::new("Название (р. п.)"),
        Cell::new("Aᵣ"),
        Cell::new("Валентность"),
    ]));
    for element in table.elements().filter(|e| !e.valences.is_empty()) {
        pretty.add_row(Row::new(vec![
            Cell::new(element.symbol),
            Cell::new(element.genitive),
            Cell::new(&element.atomic_weight.to_string()),
            Cell::new(&romans(element.valences)),
        ]));
    }
    pretty
}

/// Anions and polyatomic ions with their names, valences and acids
pub fn ion_table(table: &ElementTable) -> Table {
    let mut pretty = Table::new();
    pretty.add_row(Row::new(vec![
        Cell::new("Ион"),
        Cell::new("Название"),
        Cell::new("Валентность"),
        Cell::new("Кислота"),
    ]));
    for ion in table.ions() {
        // acid of the ion: hydrogen index equals the valence of the ion
        let acid = match ion.valence {
            1 => format!("H{}", ion.symbol),
            v => format!("H{}{}", to_subscript(&v.to_string()), ion.symbol),
        };
        let acid = table.acid_name(&acid).map(|_| acid).unwrap_or_default();
        pretty.add_row(Row::new(vec![
            Cell::new(ion.symbol),
            Cell::new(ion.name),
            Cell::new(&romans(&[ion.valence])),
            Cell::new(&acid),
        ]));
    }
    pretty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valence_table() {
        let table = ElementTable::shared();
        let pretty = valence_table(&table);
        let text = pretty.to_string();
        assert!(text.contains("железа"));
        assert!(text.contains("II, III"));
        // noble gases have no valences
        assert!(!text.contains("гелия"));
        assert_eq!(
            pretty.len(),
            1 + table.elements().filter(|e| !e.valences.is_empty()).count()
        );
    }

    #[test]
    fn test_ion_table() {
        let table = ElementTable::shared();
        let pretty = ion_table(&table);
        assert_eq!(pretty.len(), 1 + table.ions().count());
        let text = pretty.to_string();
        assert!(text.contains("сульфат"));
        assert!(text.contains("H₂SO₄"));
        assert!(text.contains("H₃PO₄"));
    }
}
