// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::Fallible;
use crate::error::fail;

/// A phrase's identifier. The content layer uses both numbers and strings;
/// either way the progress map keys it by its string form.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PhraseId(String);

impl PhraseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhraseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PhraseId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PhraseId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for PhraseId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PhraseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(PhraseId::from(n)),
            Raw::Text(s) if !s.trim().is_empty() => Ok(PhraseId(s)),
            Raw::Text(_) => Err(serde::de::Error::custom("phrase id must not be empty")),
        }
    }
}

/// A learning item, as read from the content layer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub id: PhraseId,
    pub source_text: String,
    pub target_text: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub translation: String,
}

/// Parse a JSON array of phrases. Duplicate ids are an error, since the
/// progress map could not tell them apart.
pub fn load_phrases(content: &str) -> Fallible<Vec<Phrase>> {
    let phrases: Vec<Phrase> = serde_json::from_str(content)?;
    let mut seen: HashSet<&PhraseId> = HashSet::new();
    for phrase in &phrases {
        if !seen.insert(&phrase.id) {
            return fail(format!("duplicate phrase id: {}", phrase.id));
        }
    }
    Ok(phrases)
}
