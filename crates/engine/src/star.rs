// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reader for the pipeline's STAR metadata files
//!
//! Supports what the pipeline writes: `data_<name>` blocks holding either
//! `_key value` pairs or `loop_` tables, `#` comments and single or double
//! quoted values. Column annotations such as `_rlnImageName #1` are dropped.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StarError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl StarError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StarError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// A `loop_` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LoopTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataBlock {
    pub name: String,
    pub values: Vec<(String, String)>,
    pub loops: Vec<LoopTable>,
}

impl DataBlock {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First loop table carrying `column`
    pub fn table_with(&self, column: &str) -> Option<&LoopTable> {
        self.loops.iter().find(|t| t.has_column(column))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarFile {
    pub blocks: Vec<DataBlock>,
}

impl StarFile {
    pub fn read(path: &Path) -> Result<Self, StarError> {
        let text = std::fs::read_to_string(path).map_err(|source| StarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, StarError> {
        let mut parser = Parser::default();
        for (index, line) in text.lines().enumerate() {
            parser.line(index + 1, line)?;
        }
        Ok(parser.finish())
    }

    pub fn block(&self, name: &str) -> Option<&DataBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// First key-value match in any block
    pub fn value(&self, key: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| b.value(key))
    }

    /// First loop table in any block carrying `column`
    pub fn table_with(&self, column: &str) -> Option<&LoopTable> {
        self.blocks.iter().find_map(|b| b.table_with(column))
    }
}

#[derive(Default)]
struct Parser {
    blocks: Vec<DataBlock>,
    current: Option<DataBlock>,
    table: Option<LoopTable>,
}

impl Parser {
    fn line(&mut self, line_no: usize, raw: &str) -> Result<(), StarError> {
        let tokens = tokenize(raw);
        let Some(first) = tokens.first() else {
            // A blank line ends a loop once it has rows
            if self.table.as_ref().is_some_and(|t| !t.rows.is_empty()) {
                self.close_table();
            }
            return Ok(());
        };

        if let Some(name) = first.strip_prefix("data_") {
            self.close_block();
            self.current = Some(DataBlock {
                name: name.to_string(),
                ..DataBlock::default()
            });
            return Ok(());
        }

        if self.current.is_none() {
            return Err(syntax(line_no, "content before the first data block"));
        }

        if first == "loop_" {
            self.close_table();
            self.table = Some(LoopTable::default());
            return Ok(());
        }

        if first.starts_with('_') {
            if let Some(table) = self.table.as_mut().filter(|t| t.rows.is_empty()) {
                table.columns.push(first.clone());
                return Ok(());
            }
            self.close_table();
            let value = tokens
                .get(1)
                .cloned()
                .ok_or_else(|| syntax(line_no, &format!("{first} has no value")))?;
            if let Some(block) = self.current.as_mut() {
                block.values.push((first.clone(), value));
            }
            return Ok(());
        }

        let Some(table) = self.table.as_mut() else {
            return Err(syntax(line_no, "data row outside a loop"));
        };
        if tokens.len() != table.columns.len() {
            return Err(syntax(
                line_no,
                &format!(
                    "row has {} fields, loop has {} columns",
                    tokens.len(),
                    table.columns.len()
                ),
            ));
        }
        table.rows.push(tokens);
        Ok(())
    }

    fn close_table(&mut self) {
        if let (Some(table), Some(block)) = (self.table.take(), self.current.as_mut()) {
            block.loops.push(table);
        }
    }

    fn close_block(&mut self) {
        self.close_table();
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> StarFile {
        self.close_block();
        StarFile {
            blocks: self.blocks,
        }
    }
}

fn syntax(line: usize, message: &str) -> StarError {
    StarError::Syntax {
        line,
        message: message.to_string(),
    }
}

/// Split a line into tokens, honoring quotes and stopping at a comment
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            // Column annotations (`_rlnX #1`) are dropped along with comments
            break;
        }
        let mut token = String::new();
        if c == '"' || c == '\'' {
            chars.next();
            for ch in chars.by_ref() {
                if ch == c {
                    break;
                }
                token.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
#[path = "star_tests.rs"]
mod tests;
