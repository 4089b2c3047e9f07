//! Typed record model for one JMdict entry and its nested blocks
//!
//! Construction happens during a single forward pass of the scanner; nothing
//! is mutated afterwards. Cross-record fields (`xref`, `ant`) are opaque
//! strings matching another record's headword or reading text and are not
//! validated here.

use serde::Serialize;

use crate::scanner::tags::SenseTag;

/// One dictionary record, uniquely keyed by `ent_seq`
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Record identifier, a positive integer kept as text
    pub ent_seq: String,
    /// Headword blocks (zero or more)
    pub k_ele: Vec<KanjiElement>,
    /// Reading blocks (the grammar requires at least one; a record without
    /// any is tolerated and serializes with the key omitted)
    pub r_ele: Vec<ReadingElement>,
    /// Sense blocks (same tolerance as `r_ele`)
    pub sense: Vec<Sense>,
}

impl Entry {
    pub fn new(ent_seq: String) -> Self {
        Self {
            ent_seq,
            k_ele: Vec::new(),
            r_ele: Vec::new(),
            sense: Vec::new(),
        }
    }
}

/// A written (kanji/graphic) form of an entry plus its annotations
#[derive(Debug, Clone, PartialEq)]
pub struct KanjiElement {
    pub keb: String,
    pub ke_inf: Vec<String>,
    pub ke_pri: Vec<String>,
}

impl KanjiElement {
    pub fn new(keb: String) -> Self {
        Self {
            keb,
            ke_inf: Vec::new(),
            ke_pri: Vec::new(),
        }
    }
}

/// A phonetic form of an entry plus its annotations and headword restrictions
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingElement {
    pub reb: String,
    /// True when this reading is not a true reading of any headword
    pub re_nokanji: bool,
    /// Headword strings this reading is restricted to
    pub re_restr: Vec<String>,
    pub re_inf: Vec<String>,
    pub re_pri: Vec<String>,
}

impl ReadingElement {
    pub fn new(reb: String) -> Self {
        Self {
            reb,
            re_nokanji: false,
            re_restr: Vec::new(),
            re_inf: Vec::new(),
            re_pri: Vec::new(),
        }
    }
}

/// One meaning/usage grouping within an entry
///
/// Holds the eleven recognized field kinds. Output order is the fixed
/// [`SenseTag::ALL`] order, not input order; kinds without values contribute
/// nothing to output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sense {
    stagk: Vec<String>,
    stagr: Vec<String>,
    pos: Vec<String>,
    xref: Vec<String>,
    ant: Vec<String>,
    field: Vec<String>,
    misc: Vec<String>,
    s_inf: Vec<String>,
    lsource: Vec<String>,
    dial: Vec<String>,
    gloss: Vec<String>,
}

impl Sense {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under the given field kind
    pub fn push(&mut self, tag: SenseTag, value: String) {
        self.values_mut(tag).push(value);
    }

    /// Values recorded under the given field kind
    pub fn values(&self, tag: SenseTag) -> &[String] {
        match tag {
            SenseTag::Stagk => &self.stagk,
            SenseTag::Stagr => &self.stagr,
            SenseTag::Pos => &self.pos,
            SenseTag::Xref => &self.xref,
            SenseTag::Ant => &self.ant,
            SenseTag::Field => &self.field,
            SenseTag::Misc => &self.misc,
            SenseTag::SInf => &self.s_inf,
            SenseTag::Lsource => &self.lsource,
            SenseTag::Dial => &self.dial,
            SenseTag::Gloss => &self.gloss,
        }
    }

    fn values_mut(&mut self, tag: SenseTag) -> &mut Vec<String> {
        match tag {
            SenseTag::Stagk => &mut self.stagk,
            SenseTag::Stagr => &mut self.stagr,
            SenseTag::Pos => &mut self.pos,
            SenseTag::Xref => &mut self.xref,
            SenseTag::Ant => &mut self.ant,
            SenseTag::Field => &mut self.field,
            SenseTag::Misc => &mut self.misc,
            SenseTag::SInf => &mut self.s_inf,
            SenseTag::Lsource => &mut self.lsource,
            SenseTag::Dial => &mut self.dial,
            SenseTag::Gloss => &mut self.gloss,
        }
    }

    /// Iterate the field kinds in fixed output order, skipping empty ones
    pub fn fields(&self) -> impl Iterator<Item = (SenseTag, &[String])> {
        SenseTag::ALL
            .iter()
            .map(move |tag| (*tag, self.values(*tag)))
            .filter(|(_, values)| !values.is_empty())
    }

    /// True when no field kind carries any value
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}

/// A single renderable field: scalar, boolean flag, or ordered list
///
/// Empty scalars, false flags and empty lists render to nothing; the field
/// key itself is omitted from output.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Scalar(&'a str),
    Flag(bool),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// True when this value contributes nothing to output
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Scalar(s) => s.is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::List(values) => values.is_empty(),
        }
    }
}

/// Character-entity abbreviations declared in the dictionary's header comments
///
/// Declared metadata only: the pipeline never expands entities into field
/// values. Categories and codes keep declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityTable {
    categories: Vec<EntityCategory>,
}

/// One entity category, e.g. part-of-speech or dialect codes
#[derive(Debug, Clone, Serialize)]
pub struct EntityCategory {
    /// Tag name the category was declared for, e.g. `pos`
    pub code: String,
    /// Human-readable category name from the declaration comment
    pub name: String,
    /// Short code to expansion, in declaration order
    pub entities: Vec<EntityDef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityDef {
    pub code: String,
    pub expansion: String,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new category; subsequent [`EntityTable::add_entity`] calls
    /// append to it
    pub fn add_category(&mut self, code: String, name: String) {
        self.categories.push(EntityCategory {
            code,
            name,
            entities: Vec::new(),
        });
    }

    /// Record one entity declaration under the current category
    pub fn add_entity(&mut self, code: String, expansion: String) {
        if let Some(category) = self.categories.last_mut() {
            category.entities.push(EntityDef { code, expansion });
        }
    }

    pub fn categories(&self) -> &[EntityCategory] {
        &self.categories
    }

    /// Look up an expansion by category and short code
    pub fn expansion(&self, category: &str, code: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.code == category)?
            .entities
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.expansion.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
