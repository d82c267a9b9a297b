//! Best-effort token translation between the analysis's working language
//! and the canonical language of rule-book text.
//!
//! Dictionaries are flat key/value maps, one per language, sharing keys.
//! The translator is built once from both maps and immutable thereafter;
//! there is no global dictionary state and no reload.

use normcheck_core::types::collections::FxHashMap;

/// Bidirectional dictionary lookup for usage/fulfillability tokens.
pub struct Translator {
    /// token in the source language -> shared translation key
    reverse: FxHashMap<String, String>,
    /// shared translation key -> token in the target language
    target: FxHashMap<String, String>,
}

impl Translator {
    /// Build a translator from two key/value dictionaries. `source` maps
    /// translation keys to tokens in the analysis's working language,
    /// `target` maps the same keys to the rule-book language.
    pub fn new(source: FxHashMap<String, String>, target: FxHashMap<String, String>) -> Self {
        let mut reverse = FxHashMap::default();
        for (key, value) in source {
            reverse.insert(value.trim().to_lowercase(), key);
        }
        Self { reverse, target }
    }

    /// Build a translator from two flat JSON objects of strings.
    /// Non-string values are skipped rather than rejected.
    pub fn from_json(source: &str, target: &str) -> Result<Self, serde_json::Error> {
        let source: FxHashMap<String, String> = parse_flat_map(source)?;
        let target: FxHashMap<String, String> = parse_flat_map(target)?;
        Ok(Self::new(source, target))
    }

    /// An empty translator; every token passes through unchanged.
    pub fn identity() -> Self {
        Self {
            reverse: FxHashMap::default(),
            target: FxHashMap::default(),
        }
    }

    /// Translate one token into the rule-book language.
    ///
    /// Reverse-lookup the token to its translation key and fetch the
    /// target value; failing that, try the token itself as a key in the
    /// target dictionary; failing both, return the token unchanged.
    /// Lossy by design — a miss degrades match quality, never aborts.
    pub fn translate(&self, token: &str) -> String {
        let lookup = token.trim().to_lowercase();
        if let Some(key) = self.reverse.get(&lookup) {
            if let Some(value) = self.target.get(key) {
                return value.clone();
            }
        }
        if let Some(value) = self.target.get(token.trim()) {
            return value.clone();
        }
        token.to_string()
    }

    /// Translate every token in a list.
    pub fn translate_all(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|t| self.translate(t)).collect()
    }
}

fn parse_flat_map(raw: &str) -> Result<FxHashMap<String, String>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let mut map = FxHashMap::default();
    if let serde_json::Value::Object(obj) = value {
        for (key, val) in obj {
            if let serde_json::Value::String(s) = val {
                map.insert(key, s);
            }
        }
    }
    Ok(map)
}
