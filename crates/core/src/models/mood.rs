//! Mood labels and selection sets

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed emotion categories a user can log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodLabel {
    Happy,
    Sad,
    Afraid,
    Angry,
    Surprised,
    Disgusted,
}

impl MoodLabel {
    /// All labels in display order
    pub const ALL: [MoodLabel; 6] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Afraid,
        MoodLabel::Angry,
        MoodLabel::Surprised,
        MoodLabel::Disgusted,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "Happy",
            MoodLabel::Sad => "Sad",
            MoodLabel::Afraid => "Afraid",
            MoodLabel::Angry => "Angry",
            MoodLabel::Surprised => "Surprised",
            MoodLabel::Disgusted => "Disgusted",
        }
    }

    /// Emoji shown next to the label
    pub fn glyph(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "😊",
            MoodLabel::Sad => "😢",
            MoodLabel::Afraid => "😨",
            MoodLabel::Angry => "😠",
            MoodLabel::Surprised => "😲",
            MoodLabel::Disgusted => "🤢",
        }
    }

    /// Position in `ALL`, used as the UI index
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of mood labels
///
/// Membership is unique; insertion order is kept so entries render the
/// labels in the order they were picked. Equality ignores order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MoodLabel>", into = "Vec<MoodLabel>")]
pub struct MoodSet {
    labels: Vec<MoodLabel>,
}

impl MoodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, label: MoodLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Add the label if absent, remove it if present.
    /// Returns true when the label is selected afterwards.
    pub fn toggle(&mut self, label: MoodLabel) -> bool {
        if let Some(pos) = self.labels.iter().position(|m| *m == label) {
            self.labels.remove(pos);
            false
        } else {
            self.labels.push(label);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = MoodLabel> + '_ {
        self.labels.iter().copied()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Labels joined for display, e.g. "😊 Happy, 😲 Surprised"
    pub fn display(&self) -> String {
        self.labels
            .iter()
            .map(|m| format!("{} {}", m.glyph(), m.name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl PartialEq for MoodSet {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len() && self.labels.iter().all(|m| other.contains(*m))
    }
}

impl Eq for MoodSet {}

impl From<Vec<MoodLabel>> for MoodSet {
    fn from(labels: Vec<MoodLabel>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<MoodSet> for Vec<MoodLabel> {
    fn from(set: MoodSet) -> Self {
        set.labels
    }
}

impl FromIterator<MoodLabel> for MoodSet {
    fn from_iter<I: IntoIterator<Item = MoodLabel>>(iter: I) -> Self {
        let mut set = MoodSet::new();
        for label in iter {
            if !set.contains(label) {
                set.labels.push(label);
            }
        }
        set
    }
}
