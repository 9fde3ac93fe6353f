use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::Activity;

/// Handle shared by every request handler. Signup and unregister hold the
/// write guard for their whole check-then-mutate sequence.
pub type SharedDirectory = Arc<RwLock<ActivityDirectory>>;

/// In-memory mapping of activity name to activity record, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityDirectory {
    activities: IndexMap<String, Activity>,
}

impl ActivityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory populated with the school's nine activities and their starting rosters.
    pub fn seeded() -> Self {
        let mut dir = Self::new();
        for (name, activity) in seed_activities() {
            dir.insert(name, activity);
        }
        dir
    }

    pub fn into_shared(self) -> SharedDirectory {
        Arc::new(RwLock::new(self))
    }

    /// Inserts or replaces the record stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) -> Option<Activity> {
        self.activities.insert(name.into(), activity)
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.activities.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Activity)> {
        self.activities.iter()
    }
}

fn seed_activities() -> Vec<(&'static str, Activity)> {
    vec![
        (
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        ),
        (
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            ),
        ),
        (
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
                &["john@mergington.edu", "olivia@mergington.edu"],
            ),
        ),
        (
            "Basketball Team",
            Activity::new(
                "Competitive basketball training and inter-school matches",
                "Tuesdays and Thursdays, 4:00 PM - 6:00 PM",
                15,
                &["james@mergington.edu", "liam@mergington.edu"],
            ),
        ),
        (
            "Swimming Club",
            Activity::new(
                "Swimming lessons and competitive swim team training",
                "Mondays and Wednesdays, 3:30 PM - 5:00 PM",
                25,
                &["ava@mergington.edu", "noah@mergington.edu"],
            ),
        ),
        (
            "Art Club",
            Activity::new(
                "Explore painting, drawing, and various art mediums",
                "Wednesdays, 3:30 PM - 5:00 PM",
                18,
                &["isabella@mergington.edu", "mia@mergington.edu"],
            ),
        ),
        (
            "Drama Club",
            Activity::new(
                "Acting, theater production, and performance arts",
                "Mondays and Thursdays, 3:30 PM - 5:30 PM",
                24,
                &["william@mergington.edu", "charlotte@mergington.edu"],
            ),
        ),
        (
            "Debate Team",
            Activity::new(
                "Develop critical thinking and public speaking skills",
                "Fridays, 4:00 PM - 6:00 PM",
                16,
                &["ethan@mergington.edu", "amelia@mergington.edu"],
            ),
        ),
        (
            "Robotics Club",
            Activity::new(
                "Build and program robots for competitions",
                "Tuesdays and Thursdays, 3:30 PM - 5:30 PM",
                20,
                &["benjamin@mergington.edu", "harper@mergington.edu"],
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_holds_nine_activities_with_two_participants_each() {
        let dir = ActivityDirectory::seeded();
        assert_eq!(dir.len(), 9);
        for (name, activity) in dir.iter() {
            assert_eq!(activity.participants.len(), 2, "{}", name);
            assert!(activity.max_participants > 0, "{}", name);
        }
    }

    #[test]
    fn chess_club_seed_roster_is_in_signup_order() {
        let dir = ActivityDirectory::seeded();
        let chess = dir.get("Chess Club").unwrap();
        assert_eq!(
            chess.participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );
        assert_eq!(chess.max_participants, 12);
    }

    #[test]
    fn serializes_as_name_keyed_map() {
        let dir = ActivityDirectory::seeded();
        let value = serde_json::to_value(&dir).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        let art = &obj["Art Club"];
        assert_eq!(art["schedule"], "Wednesdays, 3:30 PM - 5:00 PM");
        assert_eq!(art["max_participants"], 18);
        assert!(art["participants"].is_array());
        assert!(art.get("name").is_none());
    }

    #[test]
    fn listing_keeps_seed_order() {
        let dir = ActivityDirectory::seeded();
        let names: Vec<&str> = dir.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, SEED_ORDER);

        let json = serde_json::to_string(&dir).unwrap();
        let positions: Vec<usize> = SEED_ORDER
            .iter()
            .map(|n| json.find(&format!("\"{}\":", n)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    const SEED_ORDER: [&str; 9] = [
        "Chess Club",
        "Programming Class",
        "Gym Class",
        "Basketball Team",
        "Swimming Club",
        "Art Club",
        "Drama Club",
        "Debate Team",
        "Robotics Club",
    ];

    #[test]
    fn names_are_unique_keys() {
        let mut dir = ActivityDirectory::new();
        assert!(dir.insert("Art Club", Activity::new("a", "b", 1, &[])).is_none());
        assert!(dir.insert("Art Club", Activity::new("c", "d", 2, &[])).is_some());
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get("Art Club").unwrap().description, "c");
    }
}
