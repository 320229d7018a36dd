use crate::workout::{Activity, Workout, WorkoutId, WorkoutKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ListDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// One row of the workout list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<ListDetail>,
}

impl ListEntry {
    pub fn css_class(&self) -> String {
        format!("workout workout--{}", self.kind)
    }
}

impl From<&Workout> for ListEntry {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut details = vec![
            detail(kind.icon(), workout.distance().to_string(), "km"),
            detail("⏱", workout.duration().to_string(), "min"),
        ];

        let metric = workout.metric();
        details.push(detail("⚡️", format!("{:.1}", metric.value()), metric.unit()));
        details.push(match *workout.activity() {
            Activity::Running { cadence, .. } => detail("🦶🏼", cadence.to_string(), "spm"),
            Activity::Cycling { elevation_gain, .. } => detail("⛰", elevation_gain.to_string(), "m"),
        });

        Self {
            id: workout.id().clone(),
            kind,
            title: workout.description().to_string(),
            details,
        }
    }
}

fn detail(icon: &'static str, value: String, unit: &'static str) -> ListDetail {
    ListDetail { icon, value, unit }
}
