use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{coords::Coords, error::ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 2] = [WorkoutKind::Running, WorkoutKind::Cycling];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }

    /// The one input field that only applies to this kind.
    pub fn specific_field(self) -> Field {
        match self {
            WorkoutKind::Running => Field::Cadence,
            WorkoutKind::Cycling => Field::ElevationGain,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::ElevationGain => "elevation gain",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        WorkoutId(value.to_string())
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        WorkoutId(value)
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ID_DIGITS: u64 = 10_000_000_000;

/// Hands out ids made of the last ten digits of the creation time in
/// milliseconds. Two workouts created in the same millisecond get consecutive
/// ids instead of a duplicate.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn next(&mut self, created_at: &DateTime<FixedOffset>) -> WorkoutId {
        let millis = created_at.timestamp_millis().rem_euclid(ID_DIGITS as i64) as u64;
        let value = match self.last {
            Some(last) if millis <= last => (last + 1) % ID_DIGITS,
            _ => millis,
        };
        self.last = Some(value);
        WorkoutId(format!("{value:010}"))
    }

    /// Account for ids issued in an earlier session.
    pub fn observe(&mut self, id: &WorkoutId) {
        if let Ok(value) = id.as_str().parse::<u64>() {
            if value < ID_DIGITS && self.last.is_none_or(|last| value > last) {
                self.last = Some(value);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Minutes per kilometer.
    Pace(f64),
    /// Kilometers per hour.
    Speed(f64),
}

impl Metric {
    pub fn value(self) -> f64 {
        match self {
            Metric::Pace(value) | Metric::Speed(value) => value,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Pace(_) => "min/km",
            Metric::Speed(_) => "km/h",
        }
    }
}

/// The kind specific part of a workout, with its derived metric computed once
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    Running { cadence: u32, pace: f64 },
    Cycling { elevation_gain: f64, speed: f64 },
}

impl Activity {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Activity::Running { .. } => WorkoutKind::Running,
            Activity::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    fn metric(&self) -> Metric {
        match *self {
            Activity::Running { pace, .. } => Metric::Pace(pace),
            Activity::Cycling { speed, .. } => Metric::Speed(speed),
        }
    }
}

fn pace(distance: f64, duration: f64) -> f64 {
    duration / distance
}

fn speed(distance: f64, duration: f64) -> f64 {
    distance / (duration / 60.0)
}

/// Raw numbers for a workout that has not been validated yet. `specific` is
/// the cadence for running and the elevation gain for cycling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewWorkout {
    pub kind: WorkoutKind,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub specific: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    distance: f64,
    duration: f64,
    activity: Activity,
    description: String,
}

impl Workout {
    /// The only way to build a workout, used for form input and for records
    /// read back from storage alike.
    pub fn create(new: NewWorkout, id: WorkoutId, created_at: DateTime<FixedOffset>) -> Result<Self, ValidationError> {
        let coords = new.coords.validate()?;
        let distance = finite_positive(new.distance, Field::Distance)?;
        let duration = finite_positive(new.duration, Field::Duration)?;

        let activity = match new.kind {
            WorkoutKind::Running => {
                let cadence = finite_positive(new.specific, Field::Cadence)?;
                if cadence.fract() != 0.0 || cadence > u32::MAX as f64 {
                    return Err(ValidationError::NotWhole(Field::Cadence));
                }
                Activity::Running {
                    cadence: cadence as u32,
                    pace: pace(distance, duration),
                }
            }
            WorkoutKind::Cycling => {
                let elevation_gain = finite(new.specific, Field::ElevationGain)?;
                if elevation_gain < 0.0 {
                    return Err(ValidationError::Negative(Field::ElevationGain));
                }
                Activity::Cycling {
                    elevation_gain,
                    speed: speed(distance, duration),
                }
            }
        };

        let description = describe(new.kind, &created_at);

        Ok(Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            activity,
            description,
        })
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> WorkoutKind {
        self.activity.kind()
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn describe(&self) -> String {
        describe(self.kind(), &self.created_at)
    }

    /// The metric cached at construction.
    pub fn metric(&self) -> Metric {
        self.activity.metric()
    }

    /// Recomputes the metric from distance and duration.
    pub fn compute_metric(&self) -> Metric {
        match self.activity {
            Activity::Running { .. } => Metric::Pace(pace(self.distance, self.duration)),
            Activity::Cycling { .. } => Metric::Speed(speed(self.distance, self.duration)),
        }
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.activity {
            Activity::Running { cadence, .. } => Some(cadence),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { elevation_gain, .. } => Some(elevation_gain),
            Activity::Running { .. } => None,
        }
    }

    /// Cadence or elevation gain, whichever this kind carries.
    pub fn specific_value(&self) -> f64 {
        match self.activity {
            Activity::Running { cadence, .. } => cadence as f64,
            Activity::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }
}

fn describe(kind: WorkoutKind, created_at: &DateTime<FixedOffset>) -> String {
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}

fn finite(value: f64, field: Field) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite(field))
    }
}

fn finite_positive(value: f64, field: Field) -> Result<f64, ValidationError> {
    let value = finite(value, field)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600).unwrap().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn running(distance: f64, duration: f64, cadence: f64) -> Result<Workout, ValidationError> {
        let new = NewWorkout {
            kind: WorkoutKind::Running,
            coords: Coords(17.0, -39.0),
            distance,
            duration,
            specific: cadence,
        };
        Workout::create(new, "1".into(), at(2024, 3, 7, 9))
    }

    fn cycling(distance: f64, duration: f64, elevation: f64) -> Result<Workout, ValidationError> {
        let new = NewWorkout {
            kind: WorkoutKind::Cycling,
            coords: Coords(12.0, -59.0),
            distance,
            duration,
            specific: elevation,
        };
        Workout::create(new, "2".into(), at(2024, 12, 25, 18))
    }

    #[test]
    fn running_caches_pace_and_description() {
        let workout = running(125.0, 90.0, 200.0).unwrap();
        assert_eq!(workout.metric(), Metric::Pace(0.72));
        assert_eq!(workout.compute_metric(), workout.metric());
        assert_eq!(workout.cadence(), Some(200));
        assert_eq!(workout.description(), "Running on March 7");
        assert_eq!(workout.describe(), workout.description());
    }

    #[test]
    fn cycling_speed() {
        let workout = cycling(17.0, 120.0, 550.0).unwrap();
        assert_eq!(workout.metric(), Metric::Speed(8.5));
        assert_eq!(workout.metric().unit(), "km/h");
        assert_eq!(workout.description(), "Cycling on December 25");
    }

    #[test]
    fn description_uses_the_stored_offset() {
        // 23:30 UTC on the 6th is already the 7th at +02:00
        let created_at = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .from_utc_datetime(&chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap().and_hms_opt(23, 30, 0).unwrap());
        let new = NewWorkout {
            kind: WorkoutKind::Running,
            coords: Coords(0.0, 0.0),
            distance: 1.0,
            duration: 1.0,
            specific: 1.0,
        };
        let workout = Workout::create(new, "3".into(), created_at).unwrap();
        assert_eq!(workout.description(), "Running on March 7");
    }

    #[test]
    fn rejects_zero_distance_before_dividing() {
        assert_eq!(running(0.0, 10.0, 150.0), Err(ValidationError::NotPositive(Field::Distance)));
        assert_eq!(cycling(0.0, 10.0, 5.0), Err(ValidationError::NotPositive(Field::Distance)));
    }

    #[test]
    fn rejects_bad_cadence() {
        assert_eq!(running(5.0, 30.0, 0.0), Err(ValidationError::NotPositive(Field::Cadence)));
        assert_eq!(running(5.0, 30.0, f64::NAN), Err(ValidationError::NotFinite(Field::Cadence)));
        assert_eq!(running(5.0, 30.0, 170.5), Err(ValidationError::NotWhole(Field::Cadence)));
    }

    #[test]
    fn elevation_gain_may_be_zero_but_not_negative() {
        assert_eq!(cycling(20.0, 60.0, 0.0).unwrap().elevation_gain(), Some(0.0));
        assert_eq!(cycling(20.0, 60.0, -1.0), Err(ValidationError::Negative(Field::ElevationGain)));
        assert_eq!(cycling(20.0, 60.0, f64::INFINITY), Err(ValidationError::NotFinite(Field::ElevationGain)));
    }

    #[test]
    fn rejects_invalid_coordinates() {
        let new = NewWorkout {
            kind: WorkoutKind::Cycling,
            coords: Coords(95.0, 0.0),
            distance: 1.0,
            duration: 1.0,
            specific: 0.0,
        };
        assert!(matches!(
            Workout::create(new, "4".into(), at(2024, 1, 1, 0)),
            Err(ValidationError::CoordinatesOutOfRange { .. })
        ));
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("running".parse::<WorkoutKind>(), Ok(WorkoutKind::Running));
        assert_eq!(" Cycling ".parse::<WorkoutKind>(), Ok(WorkoutKind::Cycling));
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn ids_are_ten_digits_and_unique_within_a_millisecond() {
        let mut ids = IdGenerator::default();
        let created_at = at(2024, 3, 7, 9);
        let first = ids.next(&created_at);
        let second = ids.next(&created_at);

        assert_eq!(first.as_str().len(), 10);
        assert_ne!(first, second);
        assert_eq!(second.as_str().parse::<u64>().unwrap(), first.as_str().parse::<u64>().unwrap() + 1);
    }

    #[test]
    fn observed_ids_are_not_reissued() {
        let mut ids = IdGenerator::default();
        let created_at = at(2024, 3, 7, 9);
        let expected = created_at.timestamp_millis() as u64 % ID_DIGITS;

        ids.observe(&WorkoutId::from(format!("{:010}", expected + 5)));
        let next = ids.next(&created_at);
        assert_eq!(next.as_str(), format!("{:010}", expected + 6));
    }
}
