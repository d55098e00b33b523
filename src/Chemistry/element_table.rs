//! # Element Table Module
//!
//! ## Aim
//! Static reference data of school chemistry: relative atomic weights (rounded the way
//! they are rounded in the school periodic table, Cl = 35.5), admissible valences,
//! Russian genitive names of elements, anions and polyatomic ions with their valences
//! and names, electronegativity ranking, acid names and the name -> formula
//! dictionaries used when a compound is given by its name.
//!
//! ## Main Data Structures
//! - `Element`: symbol, atomic weight, valences, genitive name
//! - `Ion`: symbol with subscripts ("SO₄"), single valence, name ("сульфат")
//! - `AnionKey`: composition key ("SO") tested against a formula and the ion variants it stands for
//! - `ElementTable`: the immutable container, built once and shared through `Arc`
//!
//! ## Usage
//! ```
//! use ChemSchool::Chemistry::element_table::ElementTable;
//! let table = ElementTable::shared();
//! assert_eq!(table.atomic_weight("O").unwrap(), 16.0);
//! assert_eq!(table.valences("Fe").unwrap(), &[2u8, 3]);
//! assert_eq!(table.ion("SO₄").unwrap().valence, 2);
//! ```
use crate::errors::{ChemError, ChemResult, SymbolKind};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// chemical element: symbol, relative atomic weight, admissible valences (empty for noble gases
/// and superheavy elements) and genitive name ("железа")
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_weight: f64,
    pub valences: &'static [u8],
    pub genitive: &'static str,
}

impl Element {
    const fn new(
        symbol: &'static str,
        atomic_weight: f64,
        valences: &'static [u8],
        genitive: &'static str,
    ) -> Self {
        Self {
            symbol,
            atomic_weight,
            valences,
            genitive,
        }
    }
}

/// anion or polyatomic ion with a fixed valence
#[derive(Debug, Clone, PartialEq)]
pub struct Ion {
    pub symbol: &'static str,
    pub valence: u8,
    pub name: &'static str,
}

impl Ion {
    const fn new(symbol: &'static str, valence: u8, name: &'static str) -> Self {
        Self {
            symbol,
            valence,
            name,
        }
    }
}

/// composition key of an anionic part: "SO" stands for SO₃, SO₄ and S₂O₇.
/// `group` keys stop the search and return all their variants, plain element keys fall back
/// to the electronegativity ranking
#[derive(Debug, Clone, PartialEq)]
pub struct AnionKey {
    pub key: &'static str,
    pub variants: &'static [&'static str],
    pub group: bool,
}

impl AnionKey {
    const fn group(key: &'static str, variants: &'static [&'static str]) -> Self {
        Self {
            key,
            variants,
            group: true,
        }
    }
    const fn single(key: &'static str, variants: &'static [&'static str]) -> Self {
        Self {
            key,
            variants,
            group: false,
        }
    }
}

const ELEMENTS: &[Element] = &[
    Element::new("H", 1.0, &[1], "водорода"),
    Element::new("He", 4.0, &[], "гелия"),
    Element::new("Li", 7.0, &[1], "лития"),
    Element::new("Be", 9.0, &[2], "бериллия"),
    Element::new("B", 11.0, &[3], "бора"),
    Element::new("C", 12.0, &[2, 4], "углерода"),
    Element::new("N", 14.0, &[1, 2, 3, 4, 5], "азота"),
    Element::new("O", 16.0, &[2], "кислорода"),
    Element::new("F", 19.0, &[1], "фтора"),
    Element::new("Ne", 20.0, &[], "неона"),
    Element::new("Na", 23.0, &[1], "натрия"),
    Element::new("Mg", 24.0, &[2], "магния"),
    Element::new("Al", 27.0, &[3], "алюминия"),
    Element::new("Si", 28.0, &[2, 4], "кремния"),
    Element::new("P", 31.0, &[3, 5], "фосфора"),
    Element::new("S", 32.0, &[2, 4, 6], "серы"),
    Element::new("Cl", 35.5, &[1, 3, 5, 7], "хлора"),
    Element::new("Ar", 40.0, &[], "аргона"),
    Element::new("K", 39.0, &[1], "калия"),
    Element::new("Ca", 40.0, &[2], "кальция"),
    Element::new("Sc", 45.0, &[3], "скандия"),
    Element::new("Ti", 48.0, &[2, 3, 4], "титана"),
    Element::new("V", 51.0, &[2, 3, 4, 6], "ванадия"),
    Element::new("Cr", 52.0, &[2, 3, 6], "хрома"),
    Element::new("Mn", 55.0, &[2, 3, 4, 6, 7], "марганца"),
    Element::new("Fe", 56.0, &[2, 3], "железа"),
    Element::new("Co", 59.0, &[2, 3], "кобальта"),
    Element::new("Ni", 59.0, &[2, 3, 4], "никеля"),
    Element::new("Cu", 64.0, &[1, 2], "меди"),
    Element::new("Zn", 65.0, &[2], "цинка"),
    Element::new("Ga", 70.0, &[3], "галлия"),
    Element::new("Ge", 73.0, &[2, 4], "германия"),
    Element::new("As", 75.0, &[3, 5], "мышьяка"),
    Element::new("Se", 79.0, &[2, 4, 6], "селена"),
    Element::new("Br", 80.0, &[1, 3, 5, 7], "брома"),
    Element::new("Kr", 84.0, &[2, 4, 6], "криптона"),
    Element::new("Rb", 85.0, &[1], "рубидия"),
    Element::new("Sr", 88.0, &[2], "стронция"),
    Element::new("Y", 89.0, &[3], "иттрия"),
    Element::new("Zr", 91.0, &[2, 3, 4], "циркония"),
    Element::new("Nb", 93.0, &[1, 2, 3, 4, 5], "ниобия"),
    Element::new("Mo", 96.0, &[2, 3, 4, 5, 6], "молибдена"),
    Element::new("Tc", 98.0, &[1, 2, 3, 4, 5, 6, 7], "технеция"),
    Element::new("Ru", 101.0, &[2, 3, 4, 5, 6, 7, 8], "рутения"),
    Element::new("Rh", 103.0, &[1, 2, 3, 4, 5], "родия"),
    Element::new("Pd", 106.0, &[1, 2, 3, 4], "палладия"),
    Element::new("Ag", 108.0, &[1, 2, 3], "серебра"),
    Element::new("Cd", 112.0, &[2], "кадмия"),
    Element::new("In", 115.0, &[3], "индия"),
    Element::new("Sn", 119.0, &[2, 4], "олова"),
    Element::new("Sb", 122.0, &[3, 5], "сурьмы"),
    Element::new("Te", 128.0, &[2, 4, 6], "теллура"),
    Element::new("I", 127.0, &[1, 3, 5, 7], "йода"),
    Element::new("Xe", 131.0, &[2, 4, 6, 8], "ксенона"),
    Element::new("Cs", 133.0, &[1], "цезия"),
    Element::new("Ba", 137.0, &[2], "бария"),
    // lanthanides
    Element::new("La", 139.0, &[3], "лантана"),
    Element::new("Ce", 141.0, &[3, 4], "церия"),
    Element::new("Pr", 141.0, &[3, 4], "празеодима"),
    Element::new("Nd", 144.0, &[3], "неодима"),
    Element::new("Pm", 145.0, &[3], "прометия"),
    Element::new("Sm", 150.0, &[2, 3], "самария"),
    Element::new("Eu", 152.0, &[2, 3], "европия"),
    Element::new("Gd", 157.0, &[3], "гадолиния"),
    Element::new("Tb", 159.0, &[3, 4], "тербия"),
    Element::new("Dy", 163.0, &[3], "диспрозия"),
    Element::new("Ho", 165.0, &[3], "гольмия"),
    Element::new("Er", 167.0, &[3], "эрбия"),
    Element::new("Tm", 169.0, &[2, 3], "тулия"),
    Element::new("Yb", 173.0, &[2, 3], "иттербия"),
    Element::new("Lu", 175.0, &[3], "лютеция"),
    Element::new("Hf", 178.0, &[2, 3, 4], "гафния"),
    Element::new("Ta", 181.0, &[1, 2, 3, 4, 5], "тантала"),
    Element::new("W", 184.0, &[2, 3, 4, 5, 6], "вольфрама"),
    Element::new("Re", 186.0, &[1, 2, 3, 4, 5, 6, 7], "рения"),
    Element::new("Os", 190.0, &[2, 3, 4, 5, 6, 8], "осмия"),
    Element::new("Ir", 192.0, &[1, 2, 3, 4, 5, 6], "иридия"),
    Element::new("Pt", 195.0, &[1, 2, 3, 4, 5], "платины"),
    Element::new("Au", 197.0, &[1, 2, 3], "золота"),
    Element::new("Hg", 201.0, &[2], "ртути"),
    Element::new("Tl", 204.0, &[1, 3], "таллия"),
    Element::new("Pb", 207.0, &[2, 4], "свинца"),
    Element::new("Bi", 209.0, &[3, 5], "висмута"),
    Element::new("Po", 209.0, &[2, 4, 6], "полония"),
    Element::new("At", 210.0, &[1], "астата"),
    Element::new("Rn", 222.0, &[], "радона"),
    Element::new("Fr", 223.0, &[1], "франция"),
    Element::new("Ra", 226.0, &[2], "радия"),
    // actinides
    Element::new("Ac", 227.0, &[3], "актиния"),
    Element::new("Th", 232.0, &[2, 3, 4], "тория"),
    Element::new("Pa", 231.0, &[4, 5], "протактиния"),
    Element::new("U", 238.0, &[3, 4], "урана"),
    Element::new("Np", 237.0, &[3, 4, 5, 6], "нептуния"),
    Element::new("Pu", 244.0, &[2, 3, 4], "плутония"),
    Element::new("Am", 243.0, &[3, 4, 5, 6], "америция"),
    Element::new("Cm", 247.0, &[3, 4], "кюрия"),
    Element::new("Bk", 247.0, &[3, 4], "берклия"),
    Element::new("Cf", 251.0, &[2, 3, 4], "калифорния"),
    Element::new("Es", 252.0, &[2, 3], "эйнштейния"),
    Element::new("Fm", 257.0, &[2, 3], "фермия"),
    Element::new("Md", 258.0, &[2, 3], "менделевия"),
    Element::new("No", 259.0, &[2, 3], "нобелия"),
    Element::new("Lr", 260.0, &[3], "лоуренция"),
    Element::new("Rf", 261.0, &[], "резерфордия"),
    Element::new("Db", 262.0, &[], "дубния"),
    Element::new("Sg", 266.0, &[], "сиборгия"),
    Element::new("Bh", 267.0, &[], "бория"),
    Element::new("Hs", 269.0, &[], "хассия"),
    Element::new("Mt", 268.0, &[], "мейтнерия"),
    Element::new("Ds", 271.0, &[], "дармштадтия"),
    Element::new("Rg", 282.0, &[], "рентгения"),
    Element::new("Cn", 285.0, &[], "коперниция"),
    Element::new("Nh", 286.0, &[], "нихония"),
    Element::new("Fl", 289.0, &[], "флеровия"),
    Element::new("Mc", 288.0, &[], "московия"),
    Element::new("Lv", 293.0, &[], "ливермория"),
    Element::new("Ts", 294.0, &[], "теннессина"),
    Element::new("Og", 294.0, &[], "оганесона"),
];

const IONS: &[Ion] = &[
    Ion::new("H", 1, "гидрид"),
    Ion::new("B", 3, "борид"),
    Ion::new("O", 2, "оксид"),
    Ion::new("At", 1, "астатид"),
    Ion::new("Br", 1, "бромид"),
    Ion::new("S", 2, "сульфид"),
    Ion::new("Cl", 1, "хлорид"),
    Ion::new("F", 1, "фторид"),
    Ion::new("I", 1, "иодид"),
    Ion::new("C", 4, "карбид"),
    Ion::new("N", 3, "нитрид"),
    Ion::new("Si", 4, "силицид"),
    Ion::new("P", 3, "фосфид"),
    Ion::new("As", 3, "арсенид"),
    Ion::new("Se", 2, "селенид"),
    Ion::new("Te", 2, "теллурид"),
    Ion::new("N₃", 1, "азид"),
    Ion::new("CO₃", 2, "карбонат"),
    Ion::new("NO₃", 1, "нитрат"),
    Ion::new("NO₂", 1, "нитрит"),
    Ion::new("OH", 1, "гидроксид"),
    Ion::new("PO₄", 3, "фосфат (ортофосфат)"),
    Ion::new("PO₃", 1, "метафосфат"),
    Ion::new("SiO₃", 2, "силикат"),
    Ion::new("SO₃", 2, "сульфит"),
    Ion::new("SO₄", 2, "сульфат"),
    Ion::new("BrO₂", 1, "бромит"),
    Ion::new("BrO₃", 1, "бромат"),
    Ion::new("BrO", 1, "гипобромит"),
    Ion::new("VO₃", 1, "ванадат"),
    Ion::new("WO₄", 2, "вольфрамат"),
    Ion::new("BeO₄", 2, "бериллат"),
    Ion::new("S₂O₇", 2, "дисульфат"),
    Ion::new("P₂O₇", 4, "дифосфат (пирофосфат)"),
    Ion::new("Cr₂O₇", 2, "дихромат"),
    Ion::new("IO₄", 1, "периодат"),
    Ion::new("IO", 1, "гипоиодит"),
    Ion::new("MnO₄", 1, "перманганат"),
    Ion::new("BO₂", 1, "метаборат"),
    Ion::new("BO₃", 3, "борат"),
    Ion::new("CrO₄", 2, "хромат"),
    Ion::new("CN", 1, "цианид"),
    Ion::new("AsO₂", 1, "метаарсенит"),
    Ion::new("AsO₃", 3, "ортоарсенит"),
    Ion::new("AsO₄", 3, "арсенат"),
    Ion::new("C₂O₄", 2, "оксалат"),
    Ion::new("ClO₂", 1, "хлорит"),
    Ion::new("ClO₃", 1, "хлорат"),
    Ion::new("ClO₄", 1, "перхлорат"),
    Ion::new("ClO", 1, "гипохлорит"),
    Ion::new("HCO₃", 1, "гидрокарбонат"),
    Ion::new("HSO₄", 1, "гидросульфат"),
    Ion::new("HSO₃", 1, "гидросульфит"),
    Ion::new("HPO₄", 2, "гидрофосфат (гидроортофосфат)"),
    Ion::new("H₂PO₄", 1, "дигидрофосфат (дигидроортофосфат)"),
    Ion::new("HPO₃", 2, "фосфит"),
    Ion::new("H₂PO₂", 1, "гипофосфит"),
];

// order matters: longer composite keys first, so that "SO" never shadows "HSO"
const ANION_KEYS: &[AnionKey] = &[
    AnionKey::group("HPO", &["HPO₃", "HPO₄", "H₂PO₄", "H₂PO₂"]),
    AnionKey::group("HSO", &["HSO₃", "HSO₄"]),
    AnionKey::group("HCO", &["HCO₃"]),
    AnionKey::group("ClO", &["ClO", "ClO₂", "ClO₃", "ClO₄"]),
    AnionKey::group("AsO", &["AsO₂", "AsO₃", "AsO₄"]),
    AnionKey::group("CN", &["CN"]),
    AnionKey::group("BO", &["BO₂", "BO₃"]),
    AnionKey::group("MnO", &["MnO₄"]),
    AnionKey::group("IO", &["IO", "IO₄"]),
    AnionKey::group("CrO", &["CrO₄", "Cr₂O₇"]),
    AnionKey::group("BeO", &["BeO₄"]),
    AnionKey::group("WO", &["WO₄"]),
    AnionKey::group("VO", &["VO₃"]),
    AnionKey::group("BrO", &["BrO", "BrO₂", "BrO₃"]),
    AnionKey::group("SO", &["SO₃", "SO₄", "S₂O₇"]),
    AnionKey::group("SiO", &["SiO₃"]),
    AnionKey::group("PO", &["PO₃", "PO₄", "P₂O₇"]),
    AnionKey::group("OH", &["OH"]),
    AnionKey::group("NO", &["NO₂", "NO₃"]),
    AnionKey::group("CO", &["CO₃", "C₂O₄"]),
    AnionKey::single("F", &["F"]),
    AnionKey::single("O", &["O"]),
    AnionKey::single("Cl", &["Cl"]),
    AnionKey::group("N", &["N", "N₃"]),
    AnionKey::single("Br", &["Br"]),
    AnionKey::single("I", &["I"]),
    AnionKey::single("S", &["S"]),
    AnionKey::single("Se", &["Se"]),
    AnionKey::single("C", &["C"]),
    AnionKey::single("At", &["At"]),
    AnionKey::single("H", &["H"]),
    AnionKey::single("P", &["P"]),
    AnionKey::single("As", &["As"]),
    AnionKey::single("Te", &["Te"]),
    AnionKey::single("B", &["B"]),
    AnionKey::single("Si", &["Si"]),
];

// from the least to the most electronegative
const ELECTRONEGATIVITY: &[&str] = &[
    "Fr", "Cs", "K", "Rb", "Ba", "Ra", "Na", "Sr", "Li", "Ca", "La", "Ac", "Yb", "Ce", "Pr", "Pm",
    "Am", "Nd", "Sm", "Gd", "Dy", "Y", "Er", "Tm", "Lu", "Cm", "Pu", "Th", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Hf", "Mg", "Zr", "Np", "Sc", "U", "Ta", "Pa", "Ti", "Mn", "Be", "Nb", "Al", "Tl",
    "Zn", "V", "Cr", "Cd", "In", "Ga", "Fe", "Pb", "Co", "Cu", "Re", "Si", "Tc", "Ni", "Ag", "Sn",
    "Hg", "Po", "Bi", "B", "Sb", "Te", "Mo", "As", "P", "H", "Ir", "Rn", "At", "Ru", "Pd", "Os",
    "Pt", "Rh", "W", "Au", "C", "Se", "S", "Xe", "I", "Kr", "Br", "N", "Cl", "O", "F",
];

const ACIDS: &[(&str, &str)] = &[
    ("HCl", "хлороводородная, или соляная,"),
    ("H₂S", "сероводородная"),
    ("H₂SO₃", "сернистая"),
    ("H₂SO₄", "серная"),
    ("HNO₂", "азотистая"),
    ("HNO₃", "азотная"),
    ("H₂CO₃", "угольная"),
    ("H₂SiO₃", "кремниевая"),
    ("HBr", "бромоводородная"),
    ("HF", "фтороводородная, или плавиковая,"),
    ("HI", "иодоводородная"),
    ("H₃PO₄", "ортофосфорная, или фосфорная,"),
    ("HPO₃", "метафосфорная"),
    ("HBrO₂", "бромистая"),
    ("HBrO₃", "бромноватая"),
    ("HBrO", "бромноватистая, или гипобромистая,"),
    ("HVO₃", "ванадиевая"),
    ("H₂WO₄", "вольфрамовая"),
    ("H₂S₂O₇", "дисерная"),
    ("H₂Cr₂O₇", "дихромовая"),
    ("H₄P₂O₇", "дифосфорная, или пирофосфорная,"),
    ("HIO₄", "иодная"),
    ("HIO", "иодноватистая"),
    ("HMnO₄", "марганцовая"),
    ("HBO₂", "метаборная"),
    ("HAsO₂", "метамышьяковистая"),
    ("H₃BO₃", "ортоборная, или борная,"),
    ("H₃AsO₃", "ортомышьяковистая"),
    ("H₃AsO₄", "ортомышьяковая"),
    ("H₂CrO₄", "хромовая"),
    ("HClO₂", "хлористая"),
    ("HClO₄", "хлорная"),
    ("HClO₃", "хлорноватая"),
    ("HClO", "хлорноватистая"),
    ("HCN", "циановодородная, или синильная,"),
    ("H₂C₂O₄", "этандиовая, или щавельная,"),
    ("HN₃", "азотистоводородная"),
];

/// simple substances formed by one element
const SIMPLE_SUBSTANCES: &[(&str, &[(&str, &str)])] = &[
    ("O", &[("O₂", "кислород"), ("O₃", "озон")]),
    ("H", &[("H₂", "водород")]),
    ("N", &[("N₂", "азот")]),
    ("F", &[("F₂", "фтор")]),
];

/// names of substances that are given by a single word
const SUBSTANCE_NAMES: &[(&str, &str)] = &[
    ("кислород", "O"),
    ("озон", "O"),
    ("водород", "H"),
    ("азот", "N"),
    ("фтор", "F"),
    ("хлороводород", "HCl"),
    ("сероводород", "HS"),
    ("бромистоводород", "HBr"),
    ("фтороводород", "HF"),
    ("иодоводород", "HI"),
    ("азотистоводород", "HN"),
    ("циановодород", "HCN"),
];

/// first word of a salt/oxide name -> anionic part
const ANION_NAMES: &[(&str, &str)] = &[
    ("гидрид", "H"),
    ("борид", "B"),
    ("оксид", "O"),
    ("астатид", "At"),
    ("бромид", "Br"),
    ("сульфид", "S"),
    ("хлорид", "Cl"),
    ("фторид", "F"),
    ("иодид", "I"),
    ("карбид", "C"),
    ("нитрид", "N"),
    ("силицид", "Si"),
    ("фосфид", "P"),
    ("арсенид", "As"),
    ("селенид", "Se"),
    ("теллурид", "Te"),
    ("карбонат", "CO₃"),
    ("нитрат", "NO₃"),
    ("нитрит", "NO₂"),
    ("гидроксид", "OH"),
    ("фосфат", "PO₄"),
    ("ортофосфат", "PO₄"),
    ("метафосфат", "PO₃"),
    ("силикат", "SiO₃"),
    ("сульфит", "SO₃"),
    ("сульфат", "SO₄"),
    ("бромит", "BrO₂"),
    ("бромат", "BrO₃"),
    ("гипобромит", "BrO"),
    ("ванадат", "VO₃"),
    ("вольфрамат", "WO₄"),
    ("бериллат", "BeO₄"),
    ("дисульфат", "S₂O₇"),
    ("дифосфат", "P₂O₇"),
    ("пирофосфат", "P₂O₇"),
    ("дихромат", "Cr₂O₇"),
    ("периодат", "IO₄"),
    ("гипоиодит", "IO"),
    ("перманганат", "MnO₄"),
    ("метаборат", "BO₂"),
    ("борат", "BO₃"),
    ("хромат", "CrO₄"),
    ("цианид", "CN"),
    ("метаарсенит", "AsO₂"),
    ("ортоарсенит", "AsO₃"),
    ("арсенат", "AsO₄"),
    ("оксалат", "C₂O₄"),
    ("хлорит", "ClO₂"),
    ("хлорат", "ClO₃"),
    ("перхлорат", "ClO₄"),
    ("гипохлорит", "ClO"),
    ("гидрокарбонат", "HCO₃"),
    ("гидросульфат", "HSO₄"),
    ("гидросульфит", "HSO₃"),
    ("гидрофосфат", "HPO₄"),
    ("гидроортофосфат", "HPO₄"),
    ("азид", "N₃"),
    ("дигидрофосфат", "H₂PO₄"),
    ("дигидроортофосфат", "H₂PO₄"),
    ("фосфит", "HPO₃"),
    ("гипофосфит", "H₂PO₂"),
];

/// adjective of an acid name -> letters of the acid (indices are derived by valences)
const ACID_NAMES: &[(&str, &str)] = &[
    ("хлороводородная", "HCl"),
    ("соляная", "HCl"),
    ("сероводородная", "HS"),
    ("сернистая", "HSO"),
    ("серная", "HSO"),
    ("азотистая", "HNO"),
    ("азотная", "HNO"),
    ("угольная", "HCO"),
    ("кремниевая", "HSiO"),
    ("бромоводородная", "HBr"),
    ("фтороводородная", "HF"),
    ("плавиковая", "HF"),
    ("иодоводородная", "HI"),
    ("азотистоводородная", "HN"),
    ("ортофосфорная", "HPO"),
    ("фосфорная", "HPO"),
    ("метафосфорная", "HPO"),
    ("бромистая", "HBrO"),
    ("бромноватая", "HBrO"),
    ("бромноватистая", "HBrO"),
    ("гипобромистая", "HBrO"),
    ("ванадиевая", "HVO"),
    ("вольфрамовая", "HWO"),
    ("дисерная", "HSO"),
    ("дифосфорная", "HPO"),
    ("пирофосфорная", "HPO"),
    ("дихромовая", "HCrO"),
    ("иодная", "HIO"),
    ("иодноватистая", "HIO"),
    ("марганцовая", "HMnO"),
    ("метаборная", "HBO"),
    ("метамышьяковистая", "HAsO"),
    ("ортоборная", "HBO"),
    ("борная", "HBO"),
    ("ортомышьяковистая", "HAsO"),
    ("ортомышьяковая", "HAsO"),
    ("хромовая", "HCrO"),
    ("хлористая", "HClO"),
    ("хлорная", "HClO"),
    ("хлорноватая", "HClO"),
    ("хлорноватистая", "HClO"),
    ("синильная", "HCN"),
    ("циановодородная", "HCN"),
    ("этандиовая", "HCO"),
    ("щавельная", "HCO"),
];

/// Immutable lookup tables. Built once per process by `shared()` and passed by reference
/// into every component; nothing in the crate mutates it after construction.
#[derive(Debug)]
pub struct ElementTable {
    elements: HashMap<&'static str, &'static Element>,
    ions: HashMap<&'static str, &'static Ion>,
    electronegativity: HashMap<&'static str, usize>,
    acids: HashMap<&'static str, &'static str>,
    genitive_to_symbol: HashMap<&'static str, &'static str>,
}

static SHARED_TABLE: OnceLock<Arc<ElementTable>> = OnceLock::new();

impl ElementTable {
    pub fn new() -> Self {
        let elements = ELEMENTS.iter().map(|e| (e.symbol, e)).collect();
        let ions = IONS.iter().map(|i| (i.symbol, i)).collect();
        let electronegativity = ELECTRONEGATIVITY
            .iter()
            .enumerate()
            .map(|(rank, &symbol)| (symbol, rank))
            .collect();
        let acids = ACIDS.iter().copied().collect();
        let genitive_to_symbol = ELEMENTS.iter().map(|e| (e.genitive, e.symbol)).collect();
        Self {
            elements,
            ions,
            electronegativity,
            acids,
            genitive_to_symbol,
        }
    }

    /// process-wide instance
    pub fn shared() -> Arc<ElementTable> {
        SHARED_TABLE
            .get_or_init(|| Arc::new(ElementTable::new()))
            .clone()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn element(&self, symbol: &str) -> ChemResult<&Element> {
        self.elements
            .get(symbol)
            .copied()
            .ok_or_else(|| ChemError::unknown(SymbolKind::Element, symbol))
    }

    /// all elements in periodic-table order
    pub fn elements(&self) -> impl Iterator<Item = &'static Element> {
        ELEMENTS.iter()
    }

    pub fn atomic_weight(&self, symbol: &str) -> ChemResult<f64> {
        Ok(self.element(symbol)?.atomic_weight)
    }

    /// admissible valences; an element without any (He, Ne, Rf, ...) is a lookup failure
    pub fn valences(&self, symbol: &str) -> ChemResult<&'static [u8]> {
        let valences = self.element(symbol)?.valences;
        if valences.is_empty() {
            return Err(ChemError::unknown(SymbolKind::Element, symbol));
        }
        Ok(valences)
    }

    pub fn genitive(&self, symbol: &str) -> ChemResult<&'static str> {
        Ok(self.element(symbol)?.genitive)
    }

    pub fn element_by_genitive(&self, genitive: &str) -> Option<&'static str> {
        self.genitive_to_symbol.get(genitive).copied()
    }

    pub fn ion(&self, symbol: &str) -> ChemResult<&'static Ion> {
        self.ions
            .get(symbol)
            .copied()
            .ok_or_else(|| ChemError::unknown(SymbolKind::Ion, symbol))
    }

    /// all anions and polyatomic ions in table order
    pub fn ions(&self) -> impl Iterator<Item = &'static Ion> {
        IONS.iter()
    }

    /// anion keys in the order they must be tested
    pub fn anion_keys(&self) -> &'static [AnionKey] {
        ANION_KEYS
    }

    /// position in the electronegativity ranking, higher is more electronegative
    pub fn electronegativity_rank(&self, symbol: &str) -> Option<usize> {
        self.electronegativity.get(symbol).copied()
    }

    /// formula written with subscripts, e.g. "H₂SO₄"
    pub fn acid_name(&self, formula: &str) -> Option<&'static str> {
        self.acids.get(formula).copied()
    }

    pub fn simple_substances(&self, symbol: &str) -> Option<&'static [(&'static str, &'static str)]> {
        SIMPLE_SUBSTANCES
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, substances)| *substances)
    }

    pub fn substance_by_name(&self, name: &str) -> Option<&'static str> {
        lookup(SUBSTANCE_NAMES, name)
    }

    pub fn anion_by_name(&self, name: &str) -> Option<&'static str> {
        lookup(ANION_NAMES, name)
    }

    pub fn acid_by_name(&self, name: &str) -> Option<&'static str> {
        lookup(ACID_NAMES, name)
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::new()
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
