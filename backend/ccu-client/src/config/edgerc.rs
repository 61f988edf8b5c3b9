//! Minimal INI reader for `.edgerc` files.
//!
//! ```text
//! [default]
//! client_secret = xxxx
//! host = akab-xxxx.luna.akamaiapis.net
//! access_token = akab-xxxx
//! client_token = akab-xxxx
//! max-body = 131072
//! ```
//!
//! Section names and keys are case-insensitive; `-` and `_` in keys are
//! interchangeable. Lines starting with `#` or `;` are comments.

use std::collections::HashMap;

pub type Section = HashMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeRc {
    sections: HashMap<String, Section>,
}

impl EdgeRc {
    /// Parse file contents. The error string names the offending line.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let mut sections: HashMap<String, Section> = HashMap::new();
        let mut current: Option<String> = None;

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| format!("line {line_number}: unterminated section header"))?
                    .trim()
                    .to_lowercase();
                if name.is_empty() {
                    return Err(format!("line {line_number}: empty section name"));
                }
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| format!("line {line_number}: expected 'key = value'"))?;

            let section = current
                .as_ref()
                .ok_or_else(|| format!("line {line_number}: key outside of any section"))?;

            sections
                .entry(section.clone())
                .or_default()
                .insert(normalize_key(key), unquote(value.trim()).to_string());
        }

        Ok(Self { sections })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&name.to_lowercase())
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
