use play_flattener::ShotEvent;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A shot mirrored onto the attacking half: `x_coordinate` is `>= 0` or missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedEvent(ShotEvent);

impl NormalizedEvent {
    /// Mirror a single event. A negative x flips the sign of both axes; a missing
    /// x never triggers the flip.
    pub fn new(mut event: ShotEvent) -> Self {
        if let Some(x) = event.x_coordinate.filter(|x| *x < 0.0) {
            event.x_coordinate = Some(-x);
            event.y_coordinate = event.y_coordinate.map(|y| -y);
        }
        Self(event)
    }

    pub fn into_inner(self) -> ShotEvent {
        self.0
    }
}

impl Deref for NormalizedEvent {
    type Target = ShotEvent;

    fn deref(&self) -> &ShotEvent {
        &self.0
    }
}

pub fn normalize_coordinates<I>(events: I) -> Vec<NormalizedEvent>
where
    I: IntoIterator<Item = ShotEvent>,
{
    events.into_iter().map(NormalizedEvent::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_flattener::PlayType;
    use proptest::prelude::*;

    fn shot(x: Option<f64>, y: Option<f64>) -> ShotEvent {
        let mut event = ShotEvent::new(PlayType::Shot);
        event.x_coordinate = x;
        event.y_coordinate = y;
        event
    }

    #[test]
    fn test_negative_x_mirrors_both_axes() {
        let event = NormalizedEvent::new(shot(Some(-10.0), Some(5.0)));
        assert_eq!(event.coordinates(), Some((10.0, -5.0)));
    }

    #[test]
    fn test_positive_x_unchanged() {
        let event = NormalizedEvent::new(shot(Some(20.0), Some(-7.0)));
        assert_eq!(event.coordinates(), Some((20.0, -7.0)));

        let on_line = NormalizedEvent::new(shot(Some(0.0), Some(3.0)));
        assert_eq!(on_line.coordinates(), Some((0.0, 3.0)));
    }

    #[test]
    fn test_missing_coordinates_pass_through() {
        let no_x = NormalizedEvent::new(shot(None, Some(8.0)));
        assert_eq!(no_x.x_coordinate, None);
        assert_eq!(no_x.y_coordinate, Some(8.0));

        let no_y = NormalizedEvent::new(shot(Some(-44.0), None));
        assert_eq!(no_y.x_coordinate, Some(44.0));
        assert_eq!(no_y.y_coordinate, None);
    }

    fn finite() -> impl Strategy<Value = f64> {
        prop_oneof![
            -100.0f64..=100.0,
            any::<f64>().prop_filter("finite", |v| v.is_finite()),
            Just(0.0),
            Just(-0.0),
        ]
    }

    proptest! {
        #[test]
        fn test_normalization_mirrors_only_negative_x(x in finite(), y in finite()) {
            let after = NormalizedEvent::new(shot(Some(x), Some(y)));
            let (nx, ny) = after.coordinates().unwrap();

            prop_assert!(nx >= 0.0);
            if x < 0.0 {
                prop_assert_eq!((nx, ny), (-x, -y));
            } else {
                prop_assert_eq!((nx, ny), (x, y));
            }
        }

        #[test]
        fn test_normalization_is_idempotent(x in finite(), y in proptest::option::of(finite())) {
            let once = NormalizedEvent::new(shot(Some(x), y));
            let twice = NormalizedEvent::new(once.clone().into_inner());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_batch_keeps_order_and_length(xs in proptest::collection::vec(finite(), 0..40)) {
            let events = xs.iter().map(|x| shot(Some(*x), Some(1.0)));
            let normalized = normalize_coordinates(events);

            prop_assert_eq!(normalized.len(), xs.len());
            for (x, event) in xs.iter().zip(&normalized) {
                prop_assert_eq!(event.x_coordinate, Some(x.abs()));
            }
        }
    }
}
