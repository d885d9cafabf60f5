//! Document splitting
//!
//! Each splitter is a single forward pass over lines with an explicit scan
//! state. Blocks come out in document order, every block has at least one
//! line, and no line lands in two blocks.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants as C;

/// One extracted run of source lines
pub type Block = Vec<String>;

static BULLET_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(C::BULLET_POINT_PATTERN).expect("bullet pattern compiles"));

/// Default list-item pattern (`-`, `*` or `+` followed by whitespace)
pub fn bullet_pattern() -> &'static Regex {
    &BULLET_POINT
}

/// Number of leading space characters
pub fn indentation(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

// === Selection ===

/// Trim a selection and split it into lines, empty when nothing is left
pub fn reduce_selection(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(str::to_string).collect()
}

/// Byte offset of the start of the line containing `cursor`
pub fn line_start(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    text[..cursor].rfind('\n').map_or(0, |i| i + 1)
}

/// Lines from the start of the cursor's line to the end of the document
pub fn note_remainder(text: &str, cursor: usize) -> Vec<String> {
    reduce_selection(&text[line_start(text, cursor)..])
}

// === Headings ===

struct HeadingScan {
    heading: String,
    parent: Option<String>,
    current: Block,
    blocks: Vec<Block>,
}

impl HeadingScan {
    fn new(level: usize) -> Self {
        let marker = |n: usize| format!("{} ", C::HEADING_CHAR.to_string().repeat(n));
        let heading = marker(level);
        let parent = (level > 1).then(|| marker(level - 1));
        Self {
            heading,
            parent,
            current: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn is_parent(&self, line: &str) -> bool {
        self.parent.as_deref().is_some_and(|p| line.starts_with(p))
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(std::mem::take(&mut self.current));
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with(&self.heading) {
            self.flush();
            self.current.push(line.to_string());
        } else if !self.current.is_empty() && !self.is_parent(line) {
            self.current.push(line.to_string());
        } else if !self.current.is_empty() {
            // the parent heading line itself belongs to no block
            self.flush();
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Split a document into blocks that each start with a heading of `level`
///
/// Deeper headings stay inside the block. A heading one level up closes the
/// block and is itself dropped. Text before the first matching heading is
/// not emitted. Level 0 has no heading marker and yields no blocks.
pub fn split_by_heading<S: AsRef<str>>(lines: &[S], level: usize) -> Vec<Block> {
    if level == 0 {
        return Vec::new();
    }
    let mut scan = HeadingScan::new(level);
    for line in lines {
        scan.feed(line.as_ref());
    }
    let blocks = scan.finish();
    debug!("event=split_by_heading level={} blocks={}", level, blocks.len());
    blocks
}

// === Bullet Points ===

struct BulletScan<'p> {
    pattern: &'p Regex,
    base_indentation: Option<usize>,
    current: Block,
    blocks: Vec<Block>,
}

impl<'p> BulletScan<'p> {
    fn new(pattern: &'p Regex) -> Self {
        Self {
            pattern,
            base_indentation: None,
            current: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(std::mem::take(&mut self.current));
        }
    }

    fn start(&mut self, line: &str) {
        self.flush();
        self.current.push(line.to_string());
    }

    fn append(&mut self, line: &str) {
        if !self.current.is_empty() {
            self.current.push(line.to_string());
        }
    }

    fn feed(&mut self, line: &str) {
        if !self.pattern.is_match(line) {
            self.append(line);
            return;
        }

        let indent = indentation(line);
        let base = *self.base_indentation.get_or_insert(indent);

        if indent < base {
            self.start(line);
            self.base_indentation = Some(indent);
        } else if indent == base {
            self.start(line);
        } else {
            // sub-item; dropped when no top-level item is open
            self.append(line);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Split selected lines into one block per top-level list item
///
/// Deeper items and continuation lines stay with the open item. A shallower
/// item starts a new block and becomes the new top level. Lines before the
/// first item are ignored.
pub fn split_bullets<S: AsRef<str>>(lines: &[S], pattern: &Regex) -> Vec<Block> {
    let mut scan = BulletScan::new(pattern);
    for line in lines {
        scan.feed(line.as_ref());
    }
    let blocks = scan.finish();
    debug!("event=split_bullets lines={} blocks={}", lines.len(), blocks.len());
    blocks
}
