use super::EnvStore;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const ENV_FILE_NAME: &str = ".env";

/// A `.env` file edited in place.
///
/// Unrelated lines and comments are kept; the target key is replaced where
/// it first appears (later duplicates are dropped) or appended.
#[derive(Debug, Clone)]
pub struct DotenvFile {
    path: PathBuf,
}

impl DotenvFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_directory(directory: &Path) -> Self {
        Self::new(directory.join(ENV_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnvStore for DotenvFile {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let existing = if self.path.is_file() {
            fs::read_to_string(&self.path)
                .with_context(|| format!("read {}", self.path.display()))?
        } else {
            String::new()
        };

        let entry = format!("{key}={}", quote_value(value));
        let mut lines = Vec::new();
        let mut written = false;
        for raw in split_entries(&existing) {
            if !defines_key(raw[0], key) {
                lines.extend(raw.iter().map(|line| line.to_string()));
            } else if !written {
                lines.push(entry.clone());
                written = true;
            }
        }
        if !written {
            lines.push(entry);
        }
        let mut text = lines.join("\n");
        text.push('\n');

        let dir = self
            .path
            .parent()
            .ok_or_else(|| anyhow!("{} has no parent directory", self.path.display()))?;
        let mut staged = NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        staged
            .write_all(text.as_bytes())
            .context("write staged .env")?;
        staged
            .persist(&self.path)
            .map_err(|err| err.error)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        // Only the target entry is parsed; other lines may use syntax dotenvy
        // rejects but the Node tooling accepts.
        let Some(raw) = split_entries(&text)
            .into_iter()
            .rev()
            .find(|raw| defines_key(raw[0], key))
        else {
            return Ok(None);
        };
        let entry = raw.join("\n");
        let mut found = None;
        for parsed in dotenvy::from_read_iter(entry.as_bytes()) {
            let (name, value) =
                parsed.with_context(|| format!("parse {key} in {}", self.path.display()))?;
            if name == key {
                found = Some(value);
            }
        }
        Ok(found)
    }
}

/// Group lines into entries. A quoted value left open on its first line
/// continues until the closing quote, so its inner lines are never taken
/// for entries of their own.
fn split_entries(text: &str) -> Vec<Vec<&str>> {
    let mut entries: Vec<Vec<&str>> = Vec::new();
    let mut open = None;
    for line in text.lines() {
        if let (Some(quote), Some(entry)) = (open, entries.last_mut()) {
            entry.push(line);
            if closes_quote(line, quote) {
                open = None;
            }
            continue;
        }
        entries.push(vec![line]);
        open = opening_quote(line);
    }
    entries
}

/// Quote character of a value that is still open at the end of `line`.
fn opening_quote(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let (_, value) = trimmed.split_once('=')?;
    let value = value.trim_start();
    let quote = value.chars().next().filter(|ch| matches!(ch, '"' | '\''))?;
    if closes_quote(&value[1..], quote) {
        None
    } else {
        Some(quote)
    }
}

fn closes_quote(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' && quote == '"' {
            escaped = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

fn defines_key(line: &str, key: &str) -> bool {
    let trimmed = line.trim_start();
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    trimmed
        .strip_prefix(key)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}

fn quote_value(value: &str) -> String {
    let bare = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || "-_./:@+,".contains(ch));
    if bare && !value.is_empty() {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '$' => quoted.push_str("\\$"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
