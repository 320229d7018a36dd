use crate::workout::{Workout, WorkoutId};

/// All workouts of the session in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutCollection {
    workouts: Vec<Workout>,
}

impl WorkoutCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id() == id)
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn last(&self) -> Option<&Workout> {
        self.workouts.last()
    }

    /// Swaps in a whole new set of workouts at once. Only used when rehydrating.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl From<Vec<Workout>> for WorkoutCollection {
    fn from(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }
}
