use crate::error::{LeftRightError, LrResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, info};

/// Which hand should produce a character on a given layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
    Neutral,
}

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Qwerty,
    Azerty,
    Dvorak,
    Colemak,
}

impl KnownLayout {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Qwerty => "QWERTY",
            Self::Azerty => "AZERTY",
            Self::Dvorak => "Dvorak",
            Self::Colemak => "Colemak",
        }
    }

    /// (left hand, right hand) key sets, lower-case.
    pub fn key_sets(&self) -> (&'static str, &'static str) {
        match self {
            Self::Qwerty => (
                "qwertasdfgzxcvb12345`~!@#$%",
                "yuiophjklnm67890^&*()-_=+[]{};:'\",.<>/?\\|",
            ),
            // '$' and '!' sit on both sides in the source table; left wins on lookup.
            Self::Azerty => (
                "azertqsdfgwxcvb12345&é\"'(!@#$%",
                "yuiophjklmn67890-è_çà)=+^¨$£ù*;:!,.<>/?§",
            ),
            Self::Dvorak => (
                "'\",<.>pyaoeui;:qjkx12345`~!@#$%",
                "fgcrldhtnsbmwvz67890^&*()-_=+[]{}/?\\|",
            ),
            Self::Colemak => (
                "qwfpgarstdzxcvb12345`~!@#$%",
                "jluy;:hneiokm67890^&*()-_=+[]{}'\",.<>/?\\|",
            ),
        }
    }

    /// Published share of keystrokes per hand, in percent.
    pub fn baseline(&self) -> Option<HandBaseline> {
        match self {
            Self::Qwerty => Some(HandBaseline { left: 56, right: 44 }),
            Self::Dvorak => Some(HandBaseline { left: 44, right: 56 }),
            Self::Colemak => Some(HandBaseline { left: 48, right: 52 }),
            Self::Azerty => None,
        }
    }

    pub fn to_layout(&self) -> KeyboardLayout {
        let (left, right) = self.key_sets();
        KeyboardLayout::new(&self.to_string(), self.display_name(), left, right)
            .with_baseline(self.baseline())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandBaseline {
    pub left: u8,
    pub right: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardLayout {
    pub id: String,
    pub name: String,
    pub left_hand: HashSet<char>,
    pub right_hand: HashSet<char>,
    pub baseline: Option<HandBaseline>,
}

impl KeyboardLayout {
    pub fn new(id: &str, name: &str, left: &str, right: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            left_hand: left.chars().collect(),
            right_hand: right.chars().collect(),
            baseline: None,
        }
    }

    pub fn with_baseline(mut self, baseline: Option<HandBaseline>) -> Self {
        self.baseline = baseline;
        self
    }

    /// Classifies the character the user is *supposed* to type.
    pub fn classify(&self, c: char) -> Hand {
        let mut lower = c.to_lowercase();
        let lc = match (lower.next(), lower.next()) {
            (Some(l), None) => l,
            _ => return Hand::Neutral,
        };

        if lc == ' ' {
            Hand::Neutral
        } else if self.left_hand.contains(&lc) {
            Hand::Left
        } else if self.right_hand.contains(&lc) {
            Hand::Right
        } else {
            Hand::Neutral
        }
    }

    pub fn distribution(&self, text: &str) -> TextDistribution {
        TextDistribution::of(self, text)
    }
}

/// How a target text splits between the hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextDistribution {
    pub left: usize,
    pub right: usize,
    pub neutral: usize,
    pub left_percent: u32,
    pub right_percent: u32,
}

impl TextDistribution {
    pub fn of(layout: &KeyboardLayout, text: &str) -> Self {
        let (mut left, mut right, mut neutral) = (0, 0, 0);
        for c in text.chars() {
            match layout.classify(c) {
                Hand::Left => left += 1,
                Hand::Right => right += 1,
                Hand::Neutral => neutral += 1,
            }
        }

        let handed = left + right;
        let pct = |n: usize| {
            if handed == 0 {
                0
            } else {
                (n as f64 / handed as f64 * 100.0).round() as u32
            }
        };

        Self {
            left,
            right,
            neutral,
            left_percent: pct(left),
            right_percent: pct(right),
        }
    }
}

/// On-disk form of a custom layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub id: String,
    pub name: String,
    pub left_hand: String,
    pub right_hand: String,
    #[serde(default)]
    pub baseline: Option<HandBaseline>,
}

impl From<LayoutDefinition> for KeyboardLayout {
    fn from(def: LayoutDefinition) -> Self {
        KeyboardLayout::new(
            &def.id,
            &def.name,
            &def.left_hand.to_lowercase(),
            &def.right_hand.to_lowercase(),
        )
        .with_baseline(def.baseline)
    }
}

#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, KeyboardLayout>,
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new_with_defaults()
    }
}

impl LayoutRegistry {
    pub fn new_with_defaults() -> Self {
        let layouts = KnownLayout::iter()
            .map(|k| (k.to_string(), k.to_layout()))
            .collect();
        Self { layouts }
    }

    /// Loads a JSON array of layout definitions.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LrResult<Vec<KeyboardLayout>> {
        let content = fs::read_to_string(&path)?;
        let defs: Vec<LayoutDefinition> = serde_json::from_str(&content)?;

        let mut out = Vec::with_capacity(defs.len());
        for def in defs {
            leftright_protocol::validate_layout_key(&def.id)
                .map_err(|e| LeftRightError::Config(e.to_string()))?;
            out.push(KeyboardLayout::from(def));
        }
        info!("Loaded {} custom layouts from {:?}", out.len(), path.as_ref());
        Ok(out)
    }

    /// Adds or replaces layouts by id.
    pub fn merge(&mut self, layouts: Vec<KeyboardLayout>) {
        for layout in layouts {
            debug!("Registering layout '{}'", layout.id);
            self.layouts.insert(layout.id.clone(), layout);
        }
    }

    pub fn get(&self, id: &str) -> Option<&KeyboardLayout> {
        self.layouts.get(id)
    }

    pub fn require(&self, id: &str) -> LrResult<&KeyboardLayout> {
        self.get(id)
            .ok_or_else(|| LeftRightError::UnknownLayout(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyboardLayout> {
        self.layouts.values()
    }
}
