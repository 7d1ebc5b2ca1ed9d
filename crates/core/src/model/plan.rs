use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// Root study-plan document.
///
/// Every field defaults to empty when it is missing (or `null`) in an incoming
/// document, so model output with a partial shape still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    #[serde(deserialize_with = "null_as_default")]
    pub milestones: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub weeks: Weeks,
    #[serde(deserialize_with = "null_as_default")]
    pub mentor_notes: String,
}

impl Plan {
    /// Looks up a week by its 1-based number.
    #[must_use]
    pub fn week(&self, number: u32) -> Option<&WeekEntry> {
        self.weeks.get(&week_label(number))
    }

    /// Number of tasks across all weeks.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.weeks.iter().map(|(_, entry)| entry.tasks.len()).sum()
    }
}

/// One week's worth of work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekEntry {
    #[serde(rename = "Tasks", deserialize_with = "null_as_default")]
    pub tasks: Vec<String>,
    #[serde(rename = "Resources", deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
    #[serde(rename = "Reflection", deserialize_with = "null_as_default")]
    pub reflection: String,
    #[serde(rename = "Mentor_Tip", deserialize_with = "null_as_default")]
    pub mentor_tip: String,
}

/// Canonical label for a 1-based week number, e.g. `"Week 3"`.
#[must_use]
pub fn week_label(number: u32) -> String {
    format!("Week {number}")
}

//
// ─── WEEKS ─────────────────────────────────────────────────────────────────────
//

/// Week entries keyed by label, in insertion order.
///
/// Serializes as a JSON object whose key order is the week order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Weeks(Vec<(String, WeekEntry)>);

impl Weeks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&WeekEntry> {
        self.0
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut WeekEntry> {
        self.0
            .iter_mut()
            .find(|(existing, _)| existing == label)
            .map(|(_, entry)| entry)
    }

    /// Inserts or replaces a week.
    ///
    /// A replaced week keeps its original position; the previous entry is returned.
    pub fn insert(&mut self, label: impl Into<String>, entry: WeekEntry) -> Option<WeekEntry> {
        let label = label.into();
        match self.get_mut(&label) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.0.push((label, entry));
                None
            }
        }
    }

    /// Builds weeks from entries whose labels are already distinct.
    pub(crate) fn from_distinct(entries: Vec<(String, WeekEntry)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WeekEntry)> {
        self.0.iter().map(|(label, entry)| (label.as_str(), entry))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }
}

impl FromIterator<(String, WeekEntry)> for Weeks {
    fn from_iter<I: IntoIterator<Item = (String, WeekEntry)>>(iter: I) -> Self {
        let mut weeks = Weeks::new();
        for (label, entry) in iter {
            weeks.insert(label, entry);
        }
        weeks
    }
}

impl Serialize for Weeks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, entry) in &self.0 {
            map.serialize_entry(label, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Weeks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeeksVisitor;

        impl<'de> Visitor<'de> for WeeksVisitor {
            type Value = Weeks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of week labels to week entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Weeks, A::Error> {
                let mut weeks = Weeks::new();
                while let Some((label, entry)) = access.next_entry::<String, WeekEntry>()? {
                    weeks.insert(label, entry);
                }
                Ok(weeks)
            }
        }

        deserializer.deserialize_map(WeeksVisitor)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tasks: &[&str]) -> WeekEntry {
        WeekEntry {
            tasks: tasks.iter().map(ToString::to_string).collect(),
            ..WeekEntry::default()
        }
    }

    #[test]
    fn weeks_keep_document_order() {
        let raw = r#"{
            "milestones": ["a"],
            "weeks": {
                "Week 2": {"Tasks": ["second"]},
                "Week 1": {"Tasks": ["first"]},
                "Week 10": {"Tasks": []}
            },
            "mentor_notes": "n"
        }"#;

        let plan: Plan = serde_json::from_str(raw).unwrap();

        let labels: Vec<_> = plan.weeks.labels().collect();
        assert_eq!(labels, vec!["Week 2", "Week 1", "Week 10"]);
        assert_eq!(plan.week(1).unwrap().tasks, vec!["first".to_string()]);
    }

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let raw = r#"{"weeks": {"Week 1": {"Tasks": null, "Mentor_Tip": "tip"}}, "mentor_notes": null}"#;

        let plan: Plan = serde_json::from_str(raw).unwrap();

        assert!(plan.milestones.is_empty());
        assert_eq!(plan.mentor_notes, "");
        let week = plan.week(1).unwrap();
        assert!(week.tasks.is_empty());
        assert!(week.resources.is_empty());
        assert_eq!(week.reflection, "");
        assert_eq!(week.mentor_tip, "tip");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut weeks = Weeks::new();
        weeks.insert(week_label(1), entry(&["a"]));
        weeks.insert(week_label(2), entry(&["b"]));

        let previous = weeks.insert(week_label(1), entry(&["c"]));

        assert_eq!(previous, Some(entry(&["a"])));
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks.labels().next(), Some("Week 1"));
        assert_eq!(weeks.get("Week 1"), Some(&entry(&["c"])));
    }

    #[test]
    fn serializes_with_capitalized_week_keys() {
        let mut plan = Plan::default();
        plan.weeks.insert(week_label(1), entry(&["t"]));

        let value = serde_json::to_value(&plan).unwrap();

        let week = &value["weeks"]["Week 1"];
        assert_eq!(week["Tasks"][0], "t");
        assert!(week.get("Resources").is_some());
        assert!(week.get("Reflection").is_some());
        assert!(week.get("Mentor_Tip").is_some());
        assert_eq!(value["mentor_notes"], "");
    }

    #[test]
    fn total_tasks_sums_weeks() {
        let plan = Plan {
            weeks: [
                (week_label(1), entry(&["a", "b"])),
                (week_label(2), entry(&["c"])),
            ]
            .into_iter()
            .collect(),
            ..Plan::default()
        };

        assert_eq!(plan.total_tasks(), 3);
        assert!(plan.week(3).is_none());
    }
}
