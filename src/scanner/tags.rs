//! Closed tag vocabulary of the record grammar
//!
//! Substring matching silently misclassifies when one tag name is a
//! substring of another (`stagk`/`stagr`, `sense`/`s_inf`). Everything here
//! matches exact opening tags on the trimmed line and dispatches through
//! closed enums.

/// Sub-block kinds inside an `<entry>` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    /// `<k_ele>` headword block
    KEle,
    /// `<r_ele>` reading block
    REle,
    /// `<sense>` sense block
    Sense,
}

impl BlockTag {
    /// Classify a line as a block opener
    pub fn classify(line: &str) -> Option<Self> {
        match line.trim() {
            "<k_ele>" => Some(BlockTag::KEle),
            "<r_ele>" => Some(BlockTag::REle),
            "<sense>" => Some(BlockTag::Sense),
            _ => None,
        }
    }
}

/// The eleven recognized field kinds within a sense block, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SenseTag {
    Stagk,
    Stagr,
    Pos,
    Xref,
    Ant,
    Field,
    Misc,
    SInf,
    Lsource,
    Dial,
    Gloss,
}

impl SenseTag {
    /// Fixed output order for sense field keys
    pub const ALL: [SenseTag; 11] = [
        SenseTag::Stagk,
        SenseTag::Stagr,
        SenseTag::Pos,
        SenseTag::Xref,
        SenseTag::Ant,
        SenseTag::Field,
        SenseTag::Misc,
        SenseTag::SInf,
        SenseTag::Lsource,
        SenseTag::Dial,
        SenseTag::Gloss,
    ];

    /// Output key and tag name
    pub fn key(&self) -> &'static str {
        match self {
            SenseTag::Stagk => "stagk",
            SenseTag::Stagr => "stagr",
            SenseTag::Pos => "pos",
            SenseTag::Xref => "xref",
            SenseTag::Ant => "ant",
            SenseTag::Field => "field",
            SenseTag::Misc => "misc",
            SenseTag::SInf => "s_inf",
            SenseTag::Lsource => "lsource",
            SenseTag::Dial => "dial",
            SenseTag::Gloss => "gloss",
        }
    }

    /// Classify a sense-block line by its leading tag; unknown tags yield None
    /// and are discarded by the caller.
    pub fn classify(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        Self::ALL
            .into_iter()
            .find(|tag| trimmed.starts_with(tag.opener()))
    }

    /// Opening tag token for this field kind
    ///
    /// `<lsource` has no closing `>` here because the interesting lines carry
    /// an `xml:lang` attribute before it.
    fn opener(&self) -> &'static str {
        match self {
            SenseTag::Stagk => "<stagk>",
            SenseTag::Stagr => "<stagr>",
            SenseTag::Pos => "<pos>",
            SenseTag::Xref => "<xref>",
            SenseTag::Ant => "<ant>",
            SenseTag::Field => "<field>",
            SenseTag::Misc => "<misc>",
            SenseTag::SInf => "<s_inf>",
            SenseTag::Lsource => "<lsource",
            SenseTag::Dial => "<dial>",
            SenseTag::Gloss => "<gloss>",
        }
    }

    /// Fields whose values arrive as `&code;` entity references and need the
    /// stray ampersand/semicolon leftovers stripped
    pub fn carries_entity_refs(&self) -> bool {
        matches!(
            self,
            SenseTag::Pos | SenseTag::Field | SenseTag::Misc | SenseTag::Dial
        )
    }
}

/// Strip the surrounding `<tag>`/`</tag>` tokens from a content line
///
/// Forward-only extraction: everything between the first `>` and the last
/// `</` is the value. Lines without both markers return the trimmed line.
pub fn strip_tag(line: &str) -> &str {
    let trimmed = line.trim();
    let start = match trimmed.find('>') {
        Some(pos) => pos + 1,
        None => return trimmed,
    };
    let end = match trimmed.rfind("</") {
        Some(pos) if pos >= start => pos,
        _ => return trimmed,
    };
    &trimmed[start..end]
}

/// Remove `&`/`;` markup-escape leftovers from an entity-valued field
pub fn strip_entity_refs(value: &str) -> String {
    value.chars().filter(|c| *c != '&' && *c != ';').collect()
}

/// Extract the `xml:lang` attribute value from an `<lsource>` line, if any
pub fn lang_attribute(line: &str) -> Option<&str> {
    let marker = "xml:lang=\"";
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}
