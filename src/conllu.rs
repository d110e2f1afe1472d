//! CoNLL-U input
//!
//! Reads CoNLL-U text into an [`Analysis`]: the flat, head-indexed token
//! list the tree builder consumes. Token indices run across the whole
//! document, the root token names itself as its head, and UPOS / DEPREL
//! strings are mapped onto the standard codes.
//!
//! CoNLL-U format: https://universaldependencies.org/format.html

use crate::builder::{Analysis, Token};
use crate::codes::{Code, CodeTable, label, pos};
use flate2::read::GzDecoder;
use log::debug;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Error while reading CoNLL-U input
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error at line {line_num}: {message}")]
    Syntax { line_num: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn syntax_error(line_num: usize, message: String) -> ParseError {
    ParseError::Syntax { line_num, message }
}

/// Universal Dependencies names without a direct counterpart in the tables
const POS_ALIASES: &[(&str, Code)] = &[
    ("propn", pos::NOUN),
    ("cconj", pos::CONJ),
    ("sconj", pos::CONJ),
    ("part", pos::PRT),
    ("aux", pos::VERB),
    ("intj", pos::X),
    ("sym", pos::X),
];

const LABEL_ALIASES: &[(&str, Code)] = &[
    ("obj", label::DOBJ),
    ("nsubj:pass", label::NSUBJPASS),
    ("obl", label::PREP),
];

/// Maps tag strings onto codes
struct CodeMapper {
    pos_tags: CodeTable,
    labels: CodeTable,
}

impl CodeMapper {
    fn new() -> Self {
        Self {
            pos_tags: CodeTable::pos_tags(),
            labels: CodeTable::labels(),
        }
    }

    fn pos_tag(&self, name: &str) -> Code {
        lookup(&self.pos_tags, POS_ALIASES, name).unwrap_or(pos::UNKNOWN)
    }

    fn label(&self, name: &str) -> Code {
        lookup(&self.labels, LABEL_ALIASES, name).unwrap_or(label::UNKNOWN)
    }
}

fn lookup(table: &CodeTable, aliases: &[(&str, Code)], name: &str) -> Option<Code> {
    let lowered = name.to_lowercase();
    aliases
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, code)| *code)
        .or_else(|| table.code_of(&lowered))
}

/// Parse CoNLL-U text
pub fn parse_conllu(text: &str) -> Result<Analysis, ParseError> {
    read_conllu(text.as_bytes())
}

/// Read a CoNLL-U file; files ending in `.gz` are decompressed
pub fn read_conllu_file(path: impl AsRef<Path>) -> Result<Analysis, ParseError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        read_conllu(BufReader::new(GzDecoder::new(file)))
    } else {
        read_conllu(BufReader::new(file))
    }
}

/// Read CoNLL-U from any buffered reader
pub fn read_conllu<R: BufRead>(reader: R) -> Result<Analysis, ParseError> {
    let mapper = CodeMapper::new();
    let mut analysis = Analysis::default();
    let mut block = Block::default();

    for (i, line) in reader.lines().enumerate() {
        let line_num = i + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            // Blank line = sentence boundary
            block.flush(&mut analysis, &mapper)?;
        } else if let Some(comment) = line.strip_prefix('#') {
            parse_comment(comment, &mut block, &mut analysis);
        } else {
            block.lines.push((line_num, line.to_string()));
        }
    }
    // Last sentence without trailing blank line
    block.flush(&mut analysis, &mapper)?;

    debug!(
        "Read {} sentences, {} tokens",
        analysis.sentences.len(),
        analysis.tokens.len()
    );
    Ok(analysis)
}

/// Lines of one sentence
#[derive(Default)]
struct Block {
    lines: Vec<(usize, String)>,
    text: Option<String>,
}

impl Block {
    fn flush(&mut self, analysis: &mut Analysis, mapper: &CodeMapper) -> Result<(), ParseError> {
        let lines = std::mem::take(&mut self.lines);
        let text = self.text.take();
        if lines.is_empty() {
            return Ok(());
        }

        let offset = analysis.tokens.len();
        let mut rows = Vec::with_capacity(lines.len());
        for (line_num, line) in &lines {
            if let Some(row) = parse_line(line, *line_num)? {
                rows.push(row);
            }
        }

        // CoNLL-U word id -> document-wide token index
        let positions: FxHashMap<usize, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.id, offset + i))
            .collect();

        for (i, row) in rows.iter().enumerate() {
            let index = offset + i;
            let head_index = match row.head {
                0 => index,
                head => *positions.get(&head).ok_or_else(|| {
                    syntax_error(
                        row.line_num,
                        format!("HEAD {} does not name a word in this sentence", head),
                    )
                })?,
            };
            analysis.tokens.push(Token::new(
                index,
                &row.form,
                &row.lemma,
                mapper.pos_tag(&row.upos),
                head_index,
                mapper.label(&row.deprel),
            ));
        }

        let text = text.unwrap_or_else(|| {
            rows.iter()
                .map(|row| row.form.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });
        analysis.sentences.push(text);
        Ok(())
    }
}

/// Parse a comment line (starts with #)
fn parse_comment(comment: &str, block: &mut Block, analysis: &mut Analysis) {
    let Some((key, value)) = comment.split_once('=') else {
        return;
    };
    match key.trim() {
        "text" => block.text = Some(value.trim().to_string()),
        "lang" if analysis.language.is_empty() => analysis.language = value.trim().to_string(),
        _ => {}
    }
}

/// The fields of a word line the builder needs
#[derive(Debug, PartialEq)]
struct Row {
    line_num: usize,
    id: usize,
    form: String,
    lemma: String,
    upos: String,
    head: usize,
    deprel: String,
}

/// Parse a single CoNLL-U line
///
/// Returns None for multiword tokens and empty nodes.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Row>, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() != 10 {
        return Err(syntax_error(
            line_num,
            format!("Expected 10 fields, found {}", fields.len()),
        ));
    }

    // Field 0: ID (ranges 1-2 and decimals 2.1 are skipped)
    if fields[0].contains('-') || fields[0].contains('.') {
        return Ok(None);
    }
    let id = fields[0]
        .parse()
        .map_err(|_| syntax_error(line_num, format!("Invalid ID: {}", fields[0])))?;

    let form = fields[1].to_string();
    let lemma = if fields[2] == "_" {
        form.clone()
    } else {
        fields[2].to_string()
    };

    let head = fields[6]
        .parse()
        .map_err(|_| syntax_error(line_num, format!("Invalid HEAD: {}", fields[6])))?;

    Ok(Some(Row {
        line_num,
        id,
        form,
        lemma,
        upos: fields[3].to_string(),
        head,
        deprel: fields[7].to_string(),
    }))
}
