// Activity Registry - in-memory rosters for extracurricular activities
//
// Activity names are fixed at startup (seeded once, never added or removed).
// Only signup (append) and unregister (remove-by-value) touch a roster, and
// both run their checks under the same write lock as the mutation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ActivityError;

// ============================================================================
// ACTIVITY
// ============================================================================

/// One extracurricular activity and its roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub description: String,

    /// Free text, e.g. "Fridays, 3:30 PM - 5:00 PM"
    pub schedule: String,

    /// Advisory capacity - signup does not check it
    pub max_participants: u32,

    /// Emails in signup order, no duplicates
    pub participants: Vec<String>,
}

impl Activity {
    pub fn new(description: &str, schedule: &str, max_participants: u32) -> Self {
        Activity {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Builder-style seeding of the roster (skips duplicates)
    pub fn with_participants(mut self, emails: &[&str]) -> Self {
        for email in emails {
            if !self.has_participant(email) {
                self.participants.push(email.to_string());
            }
        }
        self
    }

    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    /// Remaining capacity, saturating at zero when over-subscribed
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

// ============================================================================
// ACTIVITY REGISTRY
// ============================================================================

/// Registry of all activities, keyed by name.
///
/// Cloning is cheap and every clone shares the same rosters, so the
/// registry can sit directly in the axum state.
#[derive(Debug, Clone)]
pub struct ActivityRegistry {
    activities: Arc<RwLock<BTreeMap<String, Activity>>>,
}

impl ActivityRegistry {
    /// Create a registry seeded with the school's activities
    pub fn new() -> Self {
        Self::with_activities(default_activities())
    }

    /// Create a registry from an explicit set of activities
    pub fn with_activities<I>(activities: I) -> Self
    where
        I: IntoIterator<Item = (String, Activity)>,
    {
        ActivityRegistry {
            activities: Arc::new(RwLock::new(activities.into_iter().collect())),
        }
    }

    // Every critical section leaves the map consistent, so a poisoned lock
    // still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Activity>> {
        self.activities.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Activity>> {
        self.activities.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every activity
    pub fn list(&self) -> BTreeMap<String, Activity> {
        self.read().clone()
    }

    /// Snapshot of a single activity
    pub fn get(&self, name: &str) -> Option<Activity> {
        self.read().get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// False for unknown activities as well as unknown emails
    pub fn is_registered(&self, name: &str, email: &str) -> bool {
        self.read()
            .get(name)
            .is_some_and(|activity| activity.has_participant(email))
    }

    /// Append `email` to the roster of `name`.
    ///
    /// The existence and duplicate checks run under the write lock, so two
    /// concurrent signups for the same email cannot both succeed.
    pub fn add_participant(&self, name: &str, email: &str) -> Result<(), ActivityError> {
        let mut activities = self.write();

        let activity = activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::not_found(name))?;

        if activity.has_participant(email) {
            return Err(ActivityError::AlreadySignedUp {
                email: email.to_string(),
                activity: name.to_string(),
            });
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    /// Remove `email` from the roster of `name`, keeping the order of the rest.
    pub fn remove_participant(&self, name: &str, email: &str) -> Result<(), ActivityError> {
        let mut activities = self.write();

        let activity = activities
            .get_mut(name)
            .ok_or_else(|| ActivityError::not_found(name))?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or_else(|| ActivityError::NotRegistered {
                email: email.to_string(),
                activity: name.to_string(),
            })?;

        activity.participants.remove(position);
        Ok(())
    }

    /// Number of activities
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for ActivityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

/// The activities offered at Mergington High School
pub fn default_activities() -> Vec<(String, Activity)> {
    vec![
        (
            "Chess Club".to_string(),
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
            )
            .with_participants(&["michael@mergington.edu", "daniel@mergington.edu"]),
        ),
        (
            "Programming Class".to_string(),
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
            )
            .with_participants(&["emma@mergington.edu", "sophia@mergington.edu"]),
        ),
        (
            "Gym Class".to_string(),
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
            )
            .with_participants(&["john@mergington.edu", "olivia@mergington.edu"]),
        ),
        (
            "Soccer Team".to_string(),
            Activity::new(
                "Join the school soccer team and compete in matches",
                "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
                22,
            )
            .with_participants(&["liam@mergington.edu", "noah@mergington.edu"]),
        ),
        (
            "Basketball Team".to_string(),
            Activity::new(
                "Practice and play basketball with the school team",
                "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(&["ava@mergington.edu", "mia@mergington.edu"]),
        ),
        (
            "Art Club".to_string(),
            Activity::new(
                "Explore your creativity through painting and drawing",
                "Thursdays, 3:30 PM - 5:00 PM",
                15,
            )
            .with_participants(&["amelia@mergington.edu", "harper@mergington.edu"]),
        ),
        (
            "Drama Club".to_string(),
            Activity::new(
                "Act, direct, and produce plays and performances",
                "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
                20,
            )
            .with_participants(&["ella@mergington.edu", "scarlett@mergington.edu"]),
        ),
        (
            "Math Club".to_string(),
            Activity::new(
                "Solve challenging problems and participate in math competitions",
                "Tuesdays, 3:30 PM - 4:30 PM",
                10,
            )
            .with_participants(&["james@mergington.edu", "benjamin@mergington.edu"]),
        ),
        (
            "Debate Team".to_string(),
            Activity::new(
                "Develop public speaking and argumentation skills",
                "Fridays, 4:00 PM - 5:30 PM",
                12,
            )
            .with_participants(&["charlotte@mergington.edu", "henry@mergington.edu"]),
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
