//! Forward-only line scanner and record parsers
//!
//! [`DictScanner`] holds the single parse cursor: one line buffer and a line
//! counter over a buffered reader. Each sub-parser reads exactly the lines it
//! needs and returns with the cursor at the first unconsumed line; there is
//! no lookahead beyond the current line and no backtracking. Entries are
//! produced lazily, one per pull, so the caller decides whether to accumulate
//! them or serialize and drop them immediately.

pub mod entities;
pub mod tags;

use std::io::BufRead;

use crate::error::{ParseError, ParseResult};
use crate::model::{EntityTable, Entry, KanjiElement, ReadingElement, Sense};
use tags::{lang_attribute, strip_entity_refs, strip_tag, BlockTag, SenseTag};

/// Stateful scanner over the dictionary's line stream
pub struct DictScanner<R> {
    reader: R,
    line: String,
    line_no: u64,
    entities: EntityTable,
    last_seq: Option<String>,
}

impl<R: BufRead> DictScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            entities: EntityTable::new(),
            last_seq: None,
        }
    }

    /// Pull the next entry from the stream
    ///
    /// Skips structural noise, records entity declarations found in header
    /// comment blocks, and returns `Ok(None)` at end of input. A record whose
    /// closing marker never arrives is a reported [`ParseError::UnexpectedEof`]
    /// naming the open block.
    pub fn next_entry(&mut self) -> ParseResult<Option<Entry>> {
        // Set when the entity-block parser stopped on a line that still
        // needs dispatching here, so it is not read over.
        let mut reprocess = false;
        loop {
            if !reprocess && !self.read_line()? {
                return Ok(None);
            }
            reprocess = false;
            if entities::is_comment(&self.line) {
                if entities::closes_comment(&self.line) {
                    if entities::parse_category_header(&self.line).is_some() {
                        reprocess = self.consume_entity_block()?;
                    }
                } else {
                    self.skip_comment()?;
                }
            } else if self.line.trim() == "<entry>" {
                return self.parse_entry().map(Some);
            }
            // anything else is whitespace/structural noise
        }
    }

    /// Entity declarations collected so far
    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    /// Consume the scanner, keeping the collected entity table
    pub fn into_entities(self) -> EntityTable {
        self.entities
    }

    /// 1-based number of the last line read
    pub fn line_number(&self) -> u64 {
        self.line_no
    }

    fn read_line(&mut self) -> ParseResult<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| ParseError::read(self.line_no + 1, e))?;
        if read == 0 {
            return Ok(false);
        }
        self.line_no += 1;
        Ok(true)
    }

    /// Read a line that the open block requires; EOF here is malformed input
    fn require_line(&mut self, block: &'static str) -> ParseResult<()> {
        if !self.read_line()? {
            return Err(ParseError::unexpected_eof(
                block,
                self.line_no,
                self.last_seq.clone(),
            ));
        }
        Ok(())
    }

    /// Consume a run of category declarations and their `<!ENTITY ...>` lines,
    /// starting with the category header in the current line buffer
    ///
    /// Back-to-back category headers continue the run. The first line that is
    /// neither a header nor a declaration ends it; `true` means that line is
    /// still in the buffer and needs top-level dispatch, so a record directly
    /// after the declarations is not read over. End of input simply ends the
    /// run, since the table is auxiliary metadata, not a record.
    fn consume_entity_block(&mut self) -> ParseResult<bool> {
        loop {
            if let Some((code, name)) = entities::parse_category_header(&self.line) {
                self.entities.add_category(code, name);
            } else if let Some((code, expansion)) = entities::parse_entity_decl(&self.line) {
                self.entities.add_entity(code, expansion);
            } else {
                return Ok(true);
            }
            if !self.read_line()? {
                return Ok(false);
            }
        }
    }

    /// Discard lines until the closing comment marker
    fn skip_comment(&mut self) -> ParseResult<()> {
        while self.read_line()? {
            if entities::closes_comment(&self.line) {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Parse one record; the `<entry>` opener has already been consumed
    fn parse_entry(&mut self) -> ParseResult<Entry> {
        // Identifier line follows the opening marker immediately
        self.require_line("entry")?;
        let ent_seq = strip_tag(&self.line).to_string();
        self.last_seq = Some(ent_seq.clone());
        let mut entry = Entry::new(ent_seq);

        loop {
            self.require_line("entry")?;
            if self.line.trim() == "</entry>" {
                return Ok(entry);
            }
            match BlockTag::classify(&self.line) {
                Some(BlockTag::KEle) => entry.k_ele.push(self.parse_kanji_block()?),
                Some(BlockTag::REle) => entry.r_ele.push(self.parse_reading_block()?),
                Some(BlockTag::Sense) => entry.sense.push(self.parse_sense_block()?),
                // stray whitespace/comment lines between blocks are tolerated
                None => {}
            }
        }
    }

    fn parse_kanji_block(&mut self) -> ParseResult<KanjiElement> {
        // First line after the opener is the written form
        self.require_line("k_ele")?;
        let mut ele = KanjiElement::new(strip_tag(&self.line).to_string());

        loop {
            self.require_line("k_ele")?;
            if self.line.trim() == "</k_ele>" {
                return Ok(ele);
            }
            let trimmed = self.line.trim_start();
            if trimmed.starts_with("<ke_inf>") {
                ele.ke_inf.push(strip_entity_refs(strip_tag(&self.line)));
            } else if trimmed.starts_with("<ke_pri>") {
                ele.ke_pri.push(strip_tag(&self.line).to_string());
            }
        }
    }

    fn parse_reading_block(&mut self) -> ParseResult<ReadingElement> {
        // First line after the opener is the phonetic form
        self.require_line("r_ele")?;
        let mut ele = ReadingElement::new(strip_tag(&self.line).to_string());

        // The next line either carries the no-kanji marker (consumed) or is
        // reprocessed below as a normal content line.
        self.require_line("r_ele")?;
        if self.line.trim_start().starts_with("<re_nokanji") {
            ele.re_nokanji = true;
            self.require_line("r_ele")?;
        }

        loop {
            if self.line.trim() == "</r_ele>" {
                return Ok(ele);
            }
            let trimmed = self.line.trim_start();
            if trimmed.starts_with("<re_restr>") {
                ele.re_restr.push(strip_tag(&self.line).to_string());
            } else if trimmed.starts_with("<re_inf>") {
                ele.re_inf.push(strip_entity_refs(strip_tag(&self.line)));
            } else if trimmed.starts_with("<re_pri>") {
                ele.re_pri.push(strip_tag(&self.line).to_string());
            }
            self.require_line("r_ele")?;
        }
    }

    fn parse_sense_block(&mut self) -> ParseResult<Sense> {
        let mut sense = Sense::new();

        loop {
            self.require_line("sense")?;
            if self.line.trim() == "</sense>" {
                return Ok(sense);
            }
            let Some(tag) = SenseTag::classify(&self.line) else {
                // unknown tags are discarded
                continue;
            };
            match tag {
                SenseTag::Lsource => {
                    // Recorded only with an explicit language attribute; the
                    // value kept is the language code. Untagged-language
                    // source lines are dropped.
                    if let Some(lang) = lang_attribute(&self.line) {
                        let lang = lang.to_string();
                        sense.push(tag, lang);
                    }
                }
                _ => {
                    let raw = strip_tag(&self.line);
                    let value = if tag.carries_entity_refs() {
                        strip_entity_refs(raw)
                    } else {
                        raw.to_string()
                    };
                    sense.push(tag, value);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for DictScanner<R> {
    type Item = ParseResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}
