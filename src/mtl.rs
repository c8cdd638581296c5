//! Landsat MTL metadata parsing.
//!
//! MTL files are plain text made of `KEY = "VALUE"` or `KEY = VALUE` lines
//! wrapped in `GROUP = ...` / `END_GROUP = ...` blocks and a final `END`.
//! Every line with exactly one ` = ` separator becomes an entry; everything
//! else is skipped.

use crate::error::{Error, Result};
use std::{collections::HashMap, fmt, fs, path::Path};
use tracing::debug;

const SEPARATOR: &str = " = ";

/// A single MTL value, either coerced to a float or kept as text.
#[derive(Debug, Clone, PartialEq)]
pub enum MtlValue {
    Float(f64),
    Text(String),
}

impl MtlValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MtlValue::Float(v) => Some(*v),
            MtlValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MtlValue::Float(_) => None,
            MtlValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for MtlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MtlValue::Float(v) => write!(f, "{}", v),
            MtlValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// Parsed MTL metadata, keyed by field name.
pub type Mtl = HashMap<String, MtlValue>;

/// reads an MTL file and returns its key/value pairs.
/// filename: path to the MTL text file, must be an existing file
/// to_float: try to convert every value to a float, keeping the text when that fails
///
/// Lines are decoded as UTF-8, invalid bytes become U+FFFD.
pub fn mtl_to_map<P: AsRef<Path>>(filename: P, to_float: bool) -> Result<Mtl> {
    let filename = filename.as_ref();
    if !filename.is_file() {
        return Err(Error::NotAFile(filename.to_path_buf()));
    }

    let bytes = fs::read(filename)?;
    let mut mtl = Mtl::new();
    for line in bytes.split(|b| *b == b'\n') {
        insert_line(&mut mtl, &String::from_utf8_lossy(line), to_float);
    }

    debug!("read {} MTL entries from {:?}", mtl.len(), filename);
    Ok(mtl)
}

/// parses MTL text already held in memory, same rules as [`mtl_to_map`].
pub fn parse_mtl(text: &str, to_float: bool) -> Mtl {
    let mut mtl = Mtl::new();
    for line in text.lines() {
        insert_line(&mut mtl, line, to_float);
    }
    mtl
}

/// writes the entries back out as MTL lines, sorted by key.
pub fn write_mtl(mtl: &Mtl) -> String {
    let mut keys: Vec<&String> = mtl.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        out.push_str(key);
        out.push_str(SEPARATOR);
        out.push_str(&mtl[key].to_string());
        out.push('\n');
    }
    out
}

fn insert_line(mtl: &mut Mtl, line: &str, to_float: bool) {
    let parts: Vec<&str> = line.trim().split(SEPARATOR).collect();
    // GROUP headers have a separator too, but END / blank lines do not
    if parts.len() != 2 {
        return;
    }

    let key = parts[0].trim();
    let text = parts[1].trim().trim_matches('"');

    let value = if to_float {
        match text.parse::<f64>() {
            Ok(v) => MtlValue::Float(v),
            Err(_) => MtlValue::Text(text.to_string()),
        }
    } else {
        MtlValue::Text(text.to_string())
    };

    mtl.insert(key.to_string(), value);
}
