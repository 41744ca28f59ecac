use crate::{
    clock::{Clock, SystemClock},
    error::Error,
    FlakeId,
};
use jiff::Timestamp;
use std::sync::Mutex;
use typed_builder::TypedBuilder;

const MAX_MILLIS: u64 = (1_u64 << 41) - 1;
const MAX_SEQUENCE: u8 = (1_u8 << 7) - 1;

/// Default epoch: 2025-01-01T00:00:00Z.
const DEFAULT_EPOCH_SECONDS: i64 = 1_735_689_600;

/// Configures a [`Flake`] generator instance.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct FlakeSettings {
    /// Zero point of the 41-bit millisecond field.
    #[builder(default = default_epoch())]
    pub start_epoch: Timestamp,
}

impl Default for FlakeSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

fn default_epoch() -> Timestamp {
    Timestamp::from_second(DEFAULT_EPOCH_SECONDS).unwrap_or(Timestamp::UNIX_EPOCH)
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_millis: Option<u64>,
    sequence: u8,
}

/// Time-ordered id generator with random entropy.
///
/// The millisecond field is a logical clock: it never goes below the last
/// issued value, and moves one millisecond ahead when the sequence for the
/// current millisecond is used up. Generation therefore never waits, and
/// `(millis, sequence)` is strictly increasing within one generator.
pub struct Flake<C: Clock> {
    start_millis: i64,
    clock: C,
    state: Mutex<GeneratorState>,
}

impl Flake<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: FlakeSettings) -> Result<Self, Error> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> Flake<C> {
    pub fn with_clock(settings: FlakeSettings, clock: C) -> Result<Self, Error> {
        let now = clock.now();
        if settings.start_epoch > now {
            return Err(Error::EpochAhead {
                epoch: settings.start_epoch,
                now,
            });
        }

        Ok(Self {
            start_millis: settings.start_epoch.as_millisecond(),
            clock,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    /// Generates the next unique [`FlakeId`].
    pub fn next_id(&self) -> Result<FlakeId, Error> {
        let mut state = self.state.lock().map_err(|_| Error::StatePoisoned)?;

        // A clock reading before the epoch counts as the epoch itself.
        let elapsed = (self.clock.now().as_millisecond() - self.start_millis).max(0) as u64;

        let millis = match state.last_millis {
            None => {
                state.sequence = 0;
                elapsed
            }
            Some(last) if elapsed > last => {
                state.sequence = 0;
                elapsed
            }
            // Same millisecond, or the clock stepped backwards: keep counting
            // on the last logical millisecond.
            Some(last) if state.sequence < MAX_SEQUENCE => {
                state.sequence += 1;
                last
            }
            Some(last) => {
                state.sequence = 0;
                last + 1
            }
        };

        if millis > MAX_MILLIS {
            return Err(Error::OverTimeLimit);
        }

        state.last_millis = Some(millis);

        Ok(FlakeId::new()
            .with_millis(millis)
            .with_sequence(state.sequence)
            .with_entropy(rand::random::<u16>()))
    }
}
