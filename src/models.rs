use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FrequencyGoal {
    #[default]
    Daily,
    Weekly,
    Monthly,
    ThreeTimesWeekly,
    /// Anything the backend stored outside the four known goals.
    Other(String),
}

impl FrequencyGoal {
    pub const OPTIONS: [FrequencyGoal; 4] = [
        FrequencyGoal::Daily,
        FrequencyGoal::Weekly,
        FrequencyGoal::Monthly,
        FrequencyGoal::ThreeTimesWeekly,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FrequencyGoal::Daily => "Diaria",
            FrequencyGoal::Weekly => "Semanal",
            FrequencyGoal::Monthly => "Mensual",
            FrequencyGoal::ThreeTimesWeekly => "3 veces/semana",
            FrequencyGoal::Other(value) => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FrequencyGoal::Daily => "Daily",
            FrequencyGoal::Weekly => "Weekly",
            FrequencyGoal::Monthly => "Monthly",
            FrequencyGoal::ThreeTimesWeekly => "3x/week",
            FrequencyGoal::Other(value) => value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FrequencyGoal::Other(_))
    }
}

impl From<String> for FrequencyGoal {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Diaria" => FrequencyGoal::Daily,
            "Semanal" => FrequencyGoal::Weekly,
            "Mensual" => FrequencyGoal::Monthly,
            "3 veces/semana" => FrequencyGoal::ThreeTimesWeekly,
            _ => FrequencyGoal::Other(value),
        }
    }
}

impl From<FrequencyGoal> for String {
    fn from(goal: FrequencyGoal) -> Self {
        match goal {
            FrequencyGoal::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FrequencyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    #[serde(rename = "nombre", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "descripcion", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "meta_frecuencia", default, deserialize_with = "null_as_default")]
    pub frequency: FrequencyGoal,
}

/// Reads a JSON `null` as the type's default so one sparse row does not
/// fail the whole listing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Habit body sent on create; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NewHabit {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "meta_frecuencia")]
    pub frequency: FrequencyGoal,
}

impl NewHabit {
    pub fn with_id(self, id: i64) -> Habit {
        Habit {
            id,
            name: self.name,
            description: self.description,
            frequency: self.frequency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(rename = "habito_id")]
    pub habit_id: i64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "completado")]
    pub completed: bool,
    #[serde(rename = "notas")]
    pub notes: String,
    #[serde(rename = "habito_nombre", skip_serializing_if = "Option::is_none")]
    pub habit_name: Option<String>,
}

/// A record exactly as the backend sent it, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "habito_id", default)]
    pub habit_id: serde_json::Value,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
    #[serde(rename = "completado", default)]
    pub completed: bool,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "habito_nombre", default)]
    pub habit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    #[serde(rename = "habito_id")]
    pub habit_id: i64,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "completado")]
    pub completed: bool,
    #[serde(rename = "notas")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinRow {
    pub habit_id: i64,
    pub name: String,
    pub description: String,
    pub goal: String,
    pub date: String,
    pub completed: &'static str,
    pub notes: String,
}
