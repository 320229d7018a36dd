//! Property tests for metrics, validation and the stored round trip.

use chrono::{DateTime, FixedOffset};
use proptest::prelude::*;
use workout_tracker_lib::{
    Coords, Field, Metric, MemoryStore, NewWorkout, ValidationError, Workout, WorkoutId, WorkoutKind,
    WorkoutRepository,
};

fn created_at() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..4_000_000_000_000, -48i32..=56).prop_map(|(millis, quarters)| {
        let offset = FixedOffset::east_opt(quarters * 900).unwrap();
        DateTime::from_timestamp_millis(millis).unwrap().with_timezone(&offset)
    })
}

fn workout() -> impl Strategy<Value = Workout> {
    (
        prop_oneof![Just(WorkoutKind::Running), Just(WorkoutKind::Cycling)],
        -90.0f64..=90.0,
        -180.0f64..=180.0,
        0.01f64..1000.0,
        0.1f64..2000.0,
        1u32..400,
        0.0f64..9000.0,
        created_at(),
        0u64..10_000_000_000,
    )
        .prop_map(|(kind, lat, lng, distance, duration, cadence, elevation, created_at, id)| {
            let specific = match kind {
                WorkoutKind::Running => cadence as f64,
                WorkoutKind::Cycling => elevation,
            };
            let new = NewWorkout {
                kind,
                coords: Coords(lat, lng),
                distance,
                duration,
                specific,
            };
            Workout::create(new, WorkoutId::from(format!("{id:010}")), created_at).unwrap()
        })
}

fn new_workout(kind: WorkoutKind, distance: f64, duration: f64, specific: f64) -> NewWorkout {
    NewWorkout {
        kind,
        coords: Coords(0.0, 0.0),
        distance,
        duration,
        specific,
    }
}

fn epoch() -> DateTime<FixedOffset> {
    DateTime::from_timestamp_millis(0).unwrap().fixed_offset()
}

proptest! {
    #[test]
    fn running_pace_is_duration_over_distance(distance in 0.001f64..1e4, duration in 0.001f64..1e4, cadence in 1u32..500) {
        let workout = Workout::create(new_workout(WorkoutKind::Running, distance, duration, cadence as f64), "1".into(), epoch()).unwrap();
        prop_assert_eq!(workout.metric(), Metric::Pace(duration / distance));
        prop_assert_eq!(workout.compute_metric(), workout.metric());
    }

    #[test]
    fn cycling_speed_is_distance_per_hour(distance in 0.001f64..1e4, duration in 0.001f64..1e4, elevation in 0.0f64..1e4) {
        let workout = Workout::create(new_workout(WorkoutKind::Cycling, distance, duration, elevation), "1".into(), epoch()).unwrap();
        prop_assert_eq!(workout.metric(), Metric::Speed(distance / (duration / 60.0)));
    }

    #[test]
    fn non_positive_distance_or_duration_is_rejected(
        kind in prop_oneof![Just(WorkoutKind::Running), Just(WorkoutKind::Cycling)],
        bad in -1e4f64..=0.0,
        good in 0.1f64..1e3,
    ) {
        let distance = Workout::create(new_workout(kind, bad, good, 100.0), "1".into(), epoch());
        prop_assert_eq!(distance, Err(ValidationError::NotPositive(Field::Distance)));

        let duration = Workout::create(new_workout(kind, good, bad, 100.0), "1".into(), epoch());
        prop_assert_eq!(duration, Err(ValidationError::NotPositive(Field::Duration)));
    }

    #[test]
    fn non_positive_cadence_is_rejected(cadence in -1000i32..=0) {
        let result = Workout::create(new_workout(WorkoutKind::Running, 5.0, 25.0, cadence as f64), "1".into(), epoch());
        prop_assert_eq!(result, Err(ValidationError::NotPositive(Field::Cadence)));
    }

    #[test]
    fn save_then_load_round_trips(workouts in prop::collection::vec(workout(), 1..12)) {
        let mut repository = WorkoutRepository::new(MemoryStore::new(), "workouts");
        repository.save(&workouts).unwrap();
        prop_assert_eq!(repository.load(), workouts);
    }

    #[test]
    fn saving_twice_equals_saving_once(workouts in prop::collection::vec(workout(), 0..8)) {
        let mut once = WorkoutRepository::new(MemoryStore::new(), "workouts");
        once.save(&workouts).unwrap();

        let mut twice = WorkoutRepository::new(MemoryStore::new(), "workouts");
        twice.save(&workouts).unwrap();
        twice.save(&workouts).unwrap();

        prop_assert_eq!(once.load(), twice.load());
    }
}
