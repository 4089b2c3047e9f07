//! JSON rendering of the record model
//!
//! All whitespace decisions flow from a single [`Layout`] value derived from
//! the requested indent; rendering is a pure function of the model, the
//! layout and the nesting depth. `indent == 0` produces fully compact
//! single-line JSON with no interior whitespace; `indent > 0` puts every
//! object member and array element on its own line with `indent` spaces of
//! additional nesting per level.

pub mod escape;

use crate::model::{Entry, FieldValue, KanjiElement, ReadingElement, Sense};
use escape::escape;

/// Whitespace/newline/separator tokens for a given indent setting
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    indent: usize,
}

impl Layout {
    pub fn new(indent: u8) -> Self {
        Self {
            indent: indent as usize,
        }
    }

    /// Leading whitespace for a line at the given nesting depth
    pub fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }

    pub fn newline(&self) -> &'static str {
        if self.indent == 0 {
            ""
        } else {
            "\n"
        }
    }

    /// The space after a member's colon
    pub fn space(&self) -> &'static str {
        if self.indent == 0 {
            ""
        } else {
            " "
        }
    }

    pub fn is_compact(&self) -> bool {
        self.indent == 0
    }
}

/// Render a named field as an object-member fragment
///
/// Returns `None` for absent values: empty scalars, false flags and empty
/// lists contribute nothing, so the key itself is omitted (never `[]` or
/// `false`). `depth` is the nesting depth of the member's own line.
pub fn render_field(
    name: &str,
    value: FieldValue<'_>,
    layout: &Layout,
    depth: usize,
) -> Option<String> {
    if value.is_absent() {
        return None;
    }
    Some(match value {
        FieldValue::Scalar(s) => {
            format!("\"{}\":{}\"{}\"", name, layout.space(), escape(s))
        }
        FieldValue::Flag(_) => format!("\"{}\":{}true", name, layout.space()),
        FieldValue::List(values) => {
            let elements: Vec<String> = values
                .iter()
                .map(|v| format!("\"{}\"", escape(v)))
                .collect();
            array_member(name, &elements, layout, depth)
        }
    })
}

/// Join pre-rendered array elements under a member key
fn array_member(name: &str, elements: &[String], layout: &Layout, depth: usize) -> String {
    let mut out = format!("\"{}\":{}[", name, layout.space());
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(layout.newline());
        out.push_str(&layout.pad(depth + 1));
        out.push_str(element);
    }
    out.push_str(layout.newline());
    out.push_str(&layout.pad(depth));
    out.push(']');
    out
}

/// Join pre-rendered members into an object whose braces sit at `depth`
fn object(members: &[String], layout: &Layout, depth: usize) -> String {
    let mut out = String::from("{");
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(layout.newline());
        out.push_str(&layout.pad(depth + 1));
        out.push_str(member);
    }
    out.push_str(layout.newline());
    out.push_str(&layout.pad(depth));
    out.push('}');
    out
}

/// Render one headword block
pub fn render_kanji(ele: &KanjiElement, layout: &Layout, depth: usize) -> String {
    let mut members = Vec::new();
    members.extend(render_field(
        "keb",
        FieldValue::Scalar(&ele.keb),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "ke_inf",
        FieldValue::List(&ele.ke_inf),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "ke_pri",
        FieldValue::List(&ele.ke_pri),
        layout,
        depth + 1,
    ));
    object(&members, layout, depth)
}

/// Render one reading block
pub fn render_reading(ele: &ReadingElement, layout: &Layout, depth: usize) -> String {
    let mut members = Vec::new();
    members.extend(render_field(
        "reb",
        FieldValue::Scalar(&ele.reb),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "re_nokanji",
        FieldValue::Flag(ele.re_nokanji),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "re_restr",
        FieldValue::List(&ele.re_restr),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "re_inf",
        FieldValue::List(&ele.re_inf),
        layout,
        depth + 1,
    ));
    members.extend(render_field(
        "re_pri",
        FieldValue::List(&ele.re_pri),
        layout,
        depth + 1,
    ));
    object(&members, layout, depth)
}

/// Render one sense block; field keys follow the fixed vocabulary order,
/// not their appearance order in the input
pub fn render_sense(sense: &Sense, layout: &Layout, depth: usize) -> String {
    let members: Vec<String> = sense
        .fields()
        .filter_map(|(tag, values)| {
            render_field(tag.key(), FieldValue::List(values), layout, depth + 1)
        })
        .collect();
    object(&members, layout, depth)
}

/// Render one entry; keys in order `ent_seq`, `k_ele`, `r_ele`, `sense`,
/// with empty block lists omitted
pub fn render_entry(entry: &Entry, layout: &Layout, depth: usize) -> String {
    let mut members = Vec::new();
    members.extend(render_field(
        "ent_seq",
        FieldValue::Scalar(&entry.ent_seq),
        layout,
        depth + 1,
    ));
    if !entry.k_ele.is_empty() {
        let elements: Vec<String> = entry
            .k_ele
            .iter()
            .map(|k| render_kanji(k, layout, depth + 2))
            .collect();
        members.push(array_member("k_ele", &elements, layout, depth + 1));
    }
    if !entry.r_ele.is_empty() {
        let elements: Vec<String> = entry
            .r_ele
            .iter()
            .map(|r| render_reading(r, layout, depth + 2))
            .collect();
        members.push(array_member("r_ele", &elements, layout, depth + 1));
    }
    if !entry.sense.is_empty() {
        let elements: Vec<String> = entry
            .sense
            .iter()
            .map(|s| render_sense(s, layout, depth + 2))
            .collect();
        members.push(array_member("sense", &elements, layout, depth + 1));
    }
    object(&members, layout, depth)
}

/// Render a whole entry collection as one JSON array
pub fn render_document<'a, I>(entries: I, layout: &Layout) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut out = String::from("[");
    let mut first = true;
    for entry in entries {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(layout.newline());
        out.push_str(&layout.pad(1));
        out.push_str(&render_entry(entry, layout, 1));
    }
    out.push_str(layout.newline());
    out.push(']');
    out
}
