use crate::api::ApiClient;
use crate::errors::FormError;
use crate::models::{NewRecord, RawRecord, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordForm {
    /// Blank or non-numeric input reads as 0, meaning no habit selected.
    #[serde(default, deserialize_with = "lenient_habit_id")]
    pub habit_id: i64,
    #[serde(default)]
    pub date: String,
    /// `"true"` or `"false"` from the select; anything else counts as false.
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub notes: String,
}

impl RecordForm {
    /// Fresh form for `today`, preselecting `habit_id` (0 for none).
    pub fn blank(habit_id: i64, today: NaiveDate) -> Self {
        Self {
            habit_id,
            date: today.format("%Y-%m-%d").to_string(),
            completed: "true".to_string(),
            notes: String::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }

    pub fn validate(&self) -> Result<NewRecord, FormError> {
        if self.habit_id == 0 {
            return Err(FormError::NoHabitSelected);
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;
        Ok(NewRecord {
            habit_id: self.habit_id,
            date: date.format("%Y-%m-%d").to_string(),
            completed: self.is_completed(),
            notes: self.notes.clone(),
        })
    }
}

fn lenient_habit_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(0))
}

/// Coerces a foreign key the way a loose JSON number cast would:
/// numbers and numeric strings survive, everything else becomes 0.
pub fn coerce_habit_id(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(true) => 1,
        _ => 0,
    }
}

/// Assigns positional ids where missing. The backend's order is kept.
pub fn normalize(raw: Vec<RawRecord>) -> Vec<Record> {
    raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let habit_id = coerce_habit_id(&raw.habit_id);
            if habit_id == 0 {
                warn!("record at position {} has no usable habito_id", index + 1);
            }
            Record {
                id: raw.id.unwrap_or(index as i64 + 1),
                habit_id,
                date: raw.date.unwrap_or_default(),
                completed: raw.completed,
                notes: raw.notes.unwrap_or_default(),
                habit_name: raw.habit_name.filter(|name| !name.is_empty()),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    /// Newest first by id, for the history list.
    records: Vec<Record>,
    /// Same records in the order the backend listed them.
    server_order: Vec<Record>,
    revision: u64,
}

impl RecordStore {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn server_order(&self) -> &[Record] {
        &self.server_order
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load(&mut self, raw: Vec<RawRecord>) {
        self.server_order = normalize(raw);
        self.records = self.server_order.clone();
        self.records.sort_by(|a, b| b.id.cmp(&a.id));
        self.revision = self.revision.wrapping_add(1);
    }

    /// Refetches the list. A failure keeps what was loaded before.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), FormError> {
        let raw = api.list_records().await.map_err(|err| {
            error!("failed to load records: {err}");
            err
        })?;
        info!("loaded {} records", raw.len());
        self.load(raw);
        Ok(())
    }

    /// Posts a record and then reloads the whole list instead of patching it.
    pub async fn create(&mut self, api: &ApiClient, form: &RecordForm) -> Result<(), FormError> {
        let record = form.validate()?;
        api.create_record(&record).await.map_err(|err| {
            error!("failed to create record: {err}");
            err
        })?;
        info!(habit_id = record.habit_id, date = %record.date, "record created");
        // The record exists now; a failed reload is only logged.
        let _ = self.refresh(api).await;
        Ok(())
    }
}
