use rand::Rng;

/// Whether crossing the reward threshold pays out, and whether the first zone hides that fact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TaskSignal {
    pub is_rewarded: bool,
    pub is_ambiguous: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SignalConfig {
    Fixed(TaskSignal),
    Random { p_rewarded: f64, p_ambiguous: f64 },
}

impl TaskSignal {
    pub const REWARDED: TaskSignal = TaskSignal {
        is_rewarded: true,
        is_ambiguous: false,
    };

    pub fn new(is_rewarded: bool, is_ambiguous: bool) -> Self {
        TaskSignal {
            is_rewarded,
            is_ambiguous,
        }
    }
}

impl SignalConfig {
    pub fn random() -> Self {
        SignalConfig::Random {
            p_rewarded: 0.5,
            p_ambiguous: 0.2,
        }
    }

    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> TaskSignal {
        match *self {
            SignalConfig::Fixed(signal) => signal,
            SignalConfig::Random {
                p_rewarded,
                p_ambiguous,
            } => {
                let is_rewarded = rng.random_bool(p_rewarded);
                let is_ambiguous = rng.random_bool(p_ambiguous);
                TaskSignal::new(is_rewarded, is_ambiguous)
            }
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig::Fixed(TaskSignal::REWARDED)
    }
}
