//! Part-of-speech and dependency-label codes
//!
//! Codes are opaque comparable numbers. Matching only ever compares codes;
//! the name tables here exist for display and for mapping textual tags
//! from input adapters onto codes.

use rustc_hash::FxHashMap;
use std::fmt;

/// Opaque part-of-speech or dependency-label code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(pub u32);

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Standard part-of-speech tags
pub mod pos {
    use super::Code;

    pub const UNKNOWN: Code = Code(0);
    pub const ADJ: Code = Code(1);
    pub const ADP: Code = Code(2);
    pub const ADV: Code = Code(3);
    pub const CONJ: Code = Code(4);
    pub const DET: Code = Code(5);
    pub const NOUN: Code = Code(6);
    pub const NUM: Code = Code(7);
    pub const PRON: Code = Code(8);
    pub const PRT: Code = Code(9);
    pub const PUNCT: Code = Code(10);
    pub const VERB: Code = Code(11);
    pub const X: Code = Code(12);
    pub const AFFIX: Code = Code(13);

    pub(crate) const NAMES: &[&str] = &[
        "UNKNOWN", "ADJ", "ADP", "ADV", "CONJ", "DET", "NOUN", "NUM", "PRON", "PRT", "PUNCT",
        "VERB", "X", "AFFIX",
    ];
}

/// Standard dependency labels
pub mod label {
    use super::Code;

    pub const UNKNOWN: Code = Code(0);
    pub const ABBREV: Code = Code(1);
    pub const ACOMP: Code = Code(2);
    pub const ADVCL: Code = Code(3);
    pub const ADVMOD: Code = Code(4);
    pub const AMOD: Code = Code(5);
    pub const APPOS: Code = Code(6);
    pub const ATTR: Code = Code(7);
    pub const AUX: Code = Code(8);
    pub const AUXPASS: Code = Code(9);
    pub const CC: Code = Code(10);
    pub const CCOMP: Code = Code(11);
    pub const CONJ: Code = Code(12);
    pub const CSUBJ: Code = Code(13);
    pub const CSUBJPASS: Code = Code(14);
    pub const DEP: Code = Code(15);
    pub const DET: Code = Code(16);
    pub const DISCOURSE: Code = Code(17);
    pub const DOBJ: Code = Code(18);
    pub const EXPL: Code = Code(19);
    pub const GOESWITH: Code = Code(20);
    pub const IOBJ: Code = Code(21);
    pub const MARK: Code = Code(22);
    pub const MWE: Code = Code(23);
    pub const MWV: Code = Code(24);
    pub const NEG: Code = Code(25);
    pub const NN: Code = Code(26);
    pub const NPADVMOD: Code = Code(27);
    pub const NSUBJ: Code = Code(28);
    pub const NSUBJPASS: Code = Code(29);
    pub const NUM: Code = Code(30);
    pub const NUMBER: Code = Code(31);
    pub const P: Code = Code(32);
    pub const PARATAXIS: Code = Code(33);
    pub const PARTMOD: Code = Code(34);
    pub const PCOMP: Code = Code(35);
    pub const POBJ: Code = Code(36);
    pub const POSS: Code = Code(37);
    pub const POSTNEG: Code = Code(38);
    pub const PRECOMP: Code = Code(39);
    pub const PRECONJ: Code = Code(40);
    pub const PREDET: Code = Code(41);
    pub const PREF: Code = Code(42);
    pub const PREP: Code = Code(43);
    pub const PRONL: Code = Code(44);
    pub const PRT: Code = Code(45);
    pub const PS: Code = Code(46);
    pub const QUANTMOD: Code = Code(47);
    pub const RCMOD: Code = Code(48);
    pub const RCMODREL: Code = Code(49);
    pub const RDROP: Code = Code(50);
    pub const REF: Code = Code(51);
    pub const REMNANT: Code = Code(52);
    pub const REPARANDUM: Code = Code(53);
    pub const ROOT: Code = Code(54);
    pub const SNUM: Code = Code(55);
    pub const SUFF: Code = Code(56);
    pub const TMOD: Code = Code(57);
    pub const TOPIC: Code = Code(58);
    pub const VMOD: Code = Code(59);
    pub const VOCATIVE: Code = Code(60);
    pub const XCOMP: Code = Code(61);
    pub const SUFFIX: Code = Code(62);
    pub const TITLE: Code = Code(63);
    pub const ADVPHMOD: Code = Code(64);
    pub const AUXCAUS: Code = Code(65);
    pub const AUXVV: Code = Code(66);
    pub const DTMOD: Code = Code(67);
    pub const FOREIGN: Code = Code(68);
    pub const KW: Code = Code(69);
    pub const LIST: Code = Code(70);
    pub const NOMC: Code = Code(71);
    pub const NOMCSUBJ: Code = Code(72);
    pub const NOMCSUBJPASS: Code = Code(73);
    pub const NUMC: Code = Code(74);
    pub const COP: Code = Code(75);
    pub const DISLOCATED: Code = Code(76);
    pub const ASP: Code = Code(77);
    pub const GMOD: Code = Code(78);
    pub const GOBJ: Code = Code(79);
    pub const INFMOD: Code = Code(80);
    pub const MES: Code = Code(81);
    pub const NCOMP: Code = Code(82);

    pub(crate) const NAMES: &[&str] = &[
        "UNKNOWN", "ABBREV", "ACOMP", "ADVCL", "ADVMOD", "AMOD", "APPOS", "ATTR", "AUX",
        "AUXPASS", "CC", "CCOMP", "CONJ", "CSUBJ", "CSUBJPASS", "DEP", "DET", "DISCOURSE",
        "DOBJ", "EXPL", "GOESWITH", "IOBJ", "MARK", "MWE", "MWV", "NEG", "NN", "NPADVMOD",
        "NSUBJ", "NSUBJPASS", "NUM", "NUMBER", "P", "PARATAXIS", "PARTMOD", "PCOMP", "POBJ",
        "POSS", "POSTNEG", "PRECOMP", "PRECONJ", "PREDET", "PREF", "PREP", "PRONL", "PRT", "PS",
        "QUANTMOD", "RCMOD", "RCMODREL", "RDROP", "REF", "REMNANT", "REPARANDUM", "ROOT", "SNUM",
        "SUFF", "TMOD", "TOPIC", "VMOD", "VOCATIVE", "XCOMP", "SUFFIX", "TITLE", "ADVPHMOD",
        "AUXCAUS", "AUXVV", "DTMOD", "FOREIGN", "KW", "LIST", "NOMC", "NOMCSUBJ", "NOMCSUBJPASS",
        "NUMC", "COP", "DISLOCATED", "ASP", "GMOD", "GOBJ", "INFMOD", "MES", "NCOMP",
    ];
}

/// Read-only mapping between codes and human-readable names
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    names: FxHashMap<Code, String>,
    /// Lowercased name -> code
    codes: FxHashMap<String, Code>,
}

impl CodeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (code, name) pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (Code, &'a str)>) -> Self {
        let mut table = Self::new();
        for (code, name) in pairs {
            table.insert(code, name);
        }
        table
    }

    fn from_names(names: &[&str]) -> Self {
        Self::from_pairs(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (Code(i as u32), *name)),
        )
    }

    /// The standard part-of-speech table
    pub fn pos_tags() -> Self {
        Self::from_names(pos::NAMES)
    }

    /// The standard dependency-label table
    pub fn labels() -> Self {
        Self::from_names(label::NAMES)
    }

    pub fn insert(&mut self, code: Code, name: &str) {
        self.names.insert(code, name.to_string());
        self.codes.insert(name.to_lowercase(), code);
    }

    /// Name registered for `code`, if any
    pub fn name_of(&self, code: Code) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    /// Code registered under `name` (case-insensitive)
    pub fn code_of(&self, name: &str) -> Option<Code> {
        self.codes.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Name tables consulted when rendering nodes
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    pub pos_tags: CodeTable,
    pub labels: CodeTable,
}

impl Vocabulary {
    pub fn new(pos_tags: CodeTable, labels: CodeTable) -> Self {
        Self { pos_tags, labels }
    }

    /// The standard tag and label names
    pub fn standard() -> Self {
        Self::new(CodeTable::pos_tags(), CodeTable::labels())
    }

    /// Display name for a part-of-speech code, falling back to the raw code
    pub fn pos_name(&self, code: Code) -> String {
        display_name(&self.pos_tags, code)
    }

    /// Display name for a label code, falling back to the raw code
    pub fn label_name(&self, code: Code) -> String {
        display_name(&self.labels, code)
    }
}

fn display_name(table: &CodeTable, code: Code) -> String {
    match table.name_of(code) {
        Some(name) => name.to_string(),
        None => code.to_string(),
    }
}

/// Display name for a part-of-speech code with an optional vocabulary
pub fn pos_display(vocabulary: Option<&Vocabulary>, code: Code) -> String {
    match vocabulary {
        Some(v) => v.pos_name(code),
        None => code.to_string(),
    }
}

/// Display name for a label code with an optional vocabulary
pub fn label_display(vocabulary: Option<&Vocabulary>, code: Code) -> String {
    match vocabulary {
        Some(v) => v.label_name(code),
        None => code.to_string(),
    }
}

/// Name of a standard label, used by build tracing
pub(crate) fn standard_label_name(code: Code) -> Option<&'static str> {
    label::NAMES.get(code.0 as usize).copied()
}
