use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of die faces. The engine only ever asks for one uniform 1..=6 value
/// at a time, so tests can swap in a [`ScriptedRoller`].
pub trait DieRoller {
    fn roll_die(&mut self) -> u8;
}

impl<T: DieRoller + ?Sized> DieRoller for &mut T {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

impl<T: DieRoller + ?Sized> DieRoller for Box<T> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// A fair d6 backed by a seedable `StdRng`.
pub struct RngRoller {
    rng: StdRng,
}

impl RngRoller {
    /// Seeded for reproducible games, or from OS entropy when `seed` is `None`.
    pub fn seeded(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        RngRoller { rng }
    }
}

impl DieRoller for RngRoller {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of faces, wrapping around when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRoller {
    faces: VecDeque<u8>,
}

impl ScriptedRoller {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces: VecDeque<u8> = faces.into_iter().collect();
        debug_assert!(faces.iter().all(|f| (1..=6).contains(f)), "faces must be 1..=6");
        ScriptedRoller { faces }
    }
}

impl DieRoller for ScriptedRoller {
    fn roll_die(&mut self) -> u8 {
        match self.faces.pop_front() {
            Some(face) => {
                self.faces.push_back(face);
                face
            }
            None => 1,
        }
    }
}

/// Redraws this many times before giving up on a fresh face.
const BIASED_ATTEMPTS: usize = 16;

/// A d6 that never lands on `previous`, so a shaking die visibly changes.
///
/// Only used for cosmetic animation frames. A roller that keeps returning
/// `previous` (a one-value script, say) falls back to the next face up.
pub fn biased_d6<R: DieRoller + ?Sized>(roller: &mut R, previous: Option<u8>) -> u8 {
    let Some(previous) = previous else {
        return roller.roll_die();
    };
    for _ in 0..BIASED_ATTEMPTS {
        let face = roller.roll_die();
        if face != previous {
            return face;
        }
    }
    previous % 6 + 1
}
