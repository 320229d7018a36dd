use crate::{
    coords::Coords,
    error::ValidationError,
    workout::{Field, NewWorkout, WorkoutKind},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Hidden,
    Open(Coords),
}

/// Entry form for a new workout, anchored to the last point picked on the map.
///
/// Field values are kept as typed, numbers are only parsed on `validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    state: FormState,
    kind: WorkoutKind,
    distance: String,
    duration: String,
    cadence: String,
    elevation_gain: String,
    display_suppressed: bool,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            state: FormState::Hidden,
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation_gain: String::new(),
            display_suppressed: false,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new point replaces any pending one and discards its unsubmitted values.
    pub fn open(&mut self, point: Coords) {
        if self.is_open() {
            self.clear_fields();
        }
        self.state = FormState::Open(point);
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Hidden;
    }

    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.kind = kind;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::ElevationGain => &self.elevation_gain,
        }
    }

    /// Cadence and elevation gain are never visible together.
    pub fn is_field_visible(&self, field: Field) -> bool {
        match field {
            Field::Distance | Field::Duration => true,
            Field::Cadence | Field::ElevationGain => self.kind.specific_field() == field,
        }
    }

    pub fn validate(&self) -> Result<NewWorkout, ValidationError> {
        let FormState::Open(coords) = self.state else {
            return Err(ValidationError::NoPointSelected);
        };

        let specific_field = self.kind.specific_field();
        let distance = parse_number(&self.distance);
        let duration = parse_number(&self.duration);
        let specific = parse_number(self.field(specific_field));

        for (value, field) in [
            (distance, Field::Distance),
            (duration, Field::Duration),
            (specific, specific_field),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite(field));
            }
        }

        let mut must_be_positive = vec![(distance, Field::Distance), (duration, Field::Duration)];
        if self.kind == WorkoutKind::Running {
            must_be_positive.push((specific, Field::Cadence));
        }
        if let Some((_, field)) = must_be_positive.into_iter().find(|(value, _)| *value <= 0.0) {
            return Err(ValidationError::NotPositive(field));
        }

        Ok(NewWorkout {
            kind: self.kind,
            coords,
            distance,
            duration,
            specific,
        })
    }

    /// Clears the numbers and hides the form. The form also stays out of the
    /// layout until `restore_display` is called.
    pub fn finish_submission(&mut self) {
        self.clear_fields();
        self.state = FormState::Hidden;
        self.display_suppressed = true;
    }

    pub fn restore_display(&mut self) {
        self.display_suppressed = false;
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FormState::Open(_))
    }

    pub fn pending_point(&self) -> Option<Coords> {
        match self.state {
            FormState::Open(point) => Some(point),
            FormState::Hidden => None,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn is_display_suppressed(&self) -> bool {
        self.display_suppressed
    }

    fn clear_fields(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation_gain.clear();
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Duration => &mut self.duration,
            Field::Cadence => &mut self.cadence,
            Field::ElevationGain => &mut self.elevation_gain,
        }
    }
}

// Blank reads as zero, anything unparsable as NaN.
fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or(f64::NAN)
}
