use crate::api::ApiClient;
use crate::errors::FormError;
use crate::models::{FrequencyGoal, Habit, NewHabit};
use serde::Deserialize;
use tracing::{error, info};

/// Fields posted by the create and edit habit forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: String,
}

impl HabitForm {
    fn validate_fields(&self) -> Result<NewHabit, FormError> {
        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.frequency.trim().is_empty()
        {
            return Err(FormError::MissingFields);
        }
        let frequency = FrequencyGoal::from(self.frequency.clone());
        if !frequency.is_known() {
            return Err(FormError::UnknownFrequency);
        }
        Ok(NewHabit {
            name: self.name.clone(),
            description: self.description.clone(),
            frequency,
        })
    }
}

impl From<&Habit> for HabitForm {
    fn from(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency.as_str().to_string(),
        }
    }
}

/// In-memory habit list, newest first.
#[derive(Debug, Clone, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
    revision: u64,
    load_failed: bool,
}

impl HabitStore {
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: i64) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    /// Bumped on every change so derived views know when to rebuild.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the last fetch from the backend failed.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Replaces the list with a server listing, which arrives oldest first.
    pub fn load(&mut self, mut habits: Vec<Habit>) {
        habits.reverse();
        self.habits = habits;
        self.touch();
    }

    /// Fetches the list. On failure the list is emptied and not retried.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), FormError> {
        match api.list_habits().await {
            Ok(habits) => {
                info!("loaded {} habits", habits.len());
                self.load_failed = false;
                self.load(habits);
                Ok(())
            }
            Err(err) => {
                error!("failed to load habits: {err}");
                self.load_failed = true;
                self.load(Vec::new());
                Err(err.into())
            }
        }
    }

    pub fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        let wanted = name.to_lowercase();
        self.habits
            .iter()
            .filter(|habit| Some(habit.id) != except)
            .any(|habit| habit.name.to_lowercase() == wanted)
    }

    pub fn validate_new(&self, form: &HabitForm) -> Result<NewHabit, FormError> {
        let habit = form.validate_fields()?;
        if self.name_taken(&habit.name, None) {
            return Err(FormError::DuplicateName);
        }
        Ok(habit)
    }

    pub fn validate_edit(&self, id: i64, form: &HabitForm) -> Result<Habit, FormError> {
        let habit = form.validate_fields()?;
        if self.name_taken(&habit.name, Some(id)) {
            return Err(FormError::NameTaken);
        }
        Ok(habit.with_id(id))
    }

    pub fn prepend(&mut self, habit: Habit) {
        self.habits.insert(0, habit);
        self.touch();
    }

    /// Swaps in `habit` where the id matches; no-op when the id is unknown.
    pub fn replace(&mut self, habit: Habit) {
        if let Some(slot) = self.habits.iter_mut().find(|h| h.id == habit.id) {
            *slot = habit;
            self.touch();
        }
    }

    pub fn remove(&mut self, id: i64) {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        if self.habits.len() != before {
            self.touch();
        }
    }

    pub async fn create(&mut self, api: &ApiClient, form: &HabitForm) -> Result<Habit, FormError> {
        let new_habit = self.validate_new(form)?;
        let created = api.create_habit(&new_habit).await.map_err(|err| {
            error!("failed to create habit: {err}");
            err
        })?;
        info!(id = created.id, name = %created.name, "habit created");
        self.prepend(created.clone());
        Ok(created)
    }

    /// Sends the edit and keeps the local copy; the server's echo is ignored.
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: i64,
        form: &HabitForm,
    ) -> Result<Habit, FormError> {
        let habit = self.validate_edit(id, form)?;
        api.update_habit(&habit).await.map_err(|err| {
            error!("failed to update habit {id}: {err}");
            err
        })?;
        info!(id, "habit updated");
        self.replace(habit.clone());
        Ok(habit)
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), FormError> {
        api.delete_habit(id).await.map_err(|err| {
            error!("failed to delete habit {id}: {err}");
            err
        })?;
        info!(id, "habit deleted");
        self.remove(id);
        Ok(())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
