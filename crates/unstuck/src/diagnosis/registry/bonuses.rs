use super::WeightSeed;
use crate::diagnosis::domain::{TimeBucket, Trouble};

pub(super) const TROUBLE: &[(Trouble, WeightSeed)] = &[
    (
        Trouble::Action,
        &[("MOTIVATION", 2), ("OVERTHINK", 1), ("PERFECT", 1), ("TIME", 1)],
    ),
    (Trouble::Decide, &[("OVERTHINK", 2), ("PRIORITY", 2), ("INFO", 1)]),
    (Trouble::Focus, &[("DISTRACT", 2), ("ENERGY", 1), ("TIME", 1)]),
    (Trouble::Tired, &[("ENERGY", 3), ("TIME", 1), ("MOTIVATION", 1)]),
    (Trouble::NoTime, &[("TIME", 3), ("PRIORITY", 1), ("DISTRACT", 1)]),
];

pub(super) const TIME: &[(TimeBucket, WeightSeed)] = &[
    (TimeBucket::UpToFifteen, &[("TIME", 2), ("PRIORITY", 1)]),
    (TimeBucket::AboutThirty, &[("TIME", 1)]),
    (TimeBucket::HourOrMore, &[]),
];
