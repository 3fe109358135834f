
use rand::{Rng, seq::IndexedRandom};

use crate::{config::Layout, error::TaskError};

/// Position of the near end of the first section.
pub const ORIGIN: f32 = -1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Section {
    pub index: usize,
    pub length: f32,
    pub motor_gain: f32,
}

/// Ordered corridor sections. `boundaries` holds the origin followed by the far end of each
/// section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionPlan {
    sections: Vec<Section>,
    boundaries: Vec<f32>,
}

impl SectionPlan {
    pub fn generate<R: Rng + ?Sized>(layout: &Layout, rng: &mut R) -> Result<Self, TaskError> {
        layout.validate()?;

        match layout {
            Layout::Randomized {
                num_sections,
                min_section_length,
                max_section_length,
                motor_gains,
                change_probability,
            } => Ok(Self::randomized(
                *num_sections,
                *min_section_length,
                *max_section_length,
                motor_gains,
                *change_probability,
                rng,
            )),
            Layout::Explicit {
                num_sections,
                sections_length,
                motor_gains,
                random_gain: false,
            } => Self::explicit(*num_sections, sections_length, motor_gains),
            Layout::Explicit {
                num_sections,
                sections_length,
                motor_gains,
                random_gain: true,
            } => {
                let gains = (0..*num_sections)
                    .filter_map(|_| motor_gains.choose(rng).copied())
                    .collect::<Vec<_>>();
                Self::explicit(*num_sections, sections_length, &gains)
            }
            Layout::SingleSection {
                min_length,
                max_length,
            } => Ok(Self::single(rng.random_range(*min_length..*max_length))),
            Layout::Fixed { total_length } => Ok(Self::single(*total_length)),
        }
    }

    /// Draws every length from `[min_length, max_length)`. The first section keeps a unit gain;
    /// each later one takes a gain from `motor_gains` with probability `change_probability`.
    fn randomized<R: Rng + ?Sized>(
        num_sections: usize,
        min_length: u32,
        max_length: u32,
        motor_gains: &[f32],
        change_probability: f64,
        rng: &mut R,
    ) -> Self {
        let sections = (0..num_sections).map(|index| {
            let length = rng.random_range(min_length..max_length);
            let motor_gain = if index > 0 && rng.random_bool(change_probability) {
                motor_gains.choose(rng).copied().unwrap_or(1.0)
            } else {
                1.0
            };
            (length as f32, motor_gain)
        });

        Self::from_sections(sections.collect::<Vec<_>>())
    }

    pub fn explicit(
        num_sections: usize,
        lengths: &[u32],
        motor_gains: &[f32],
    ) -> Result<Self, TaskError> {
        Layout::Explicit {
            num_sections,
            sections_length: lengths.to_vec(),
            motor_gains: motor_gains.to_vec(),
            random_gain: false,
        }
        .validate()?;

        Ok(Self::from_sections(
            lengths
                .iter()
                .zip(motor_gains)
                .map(|(&length, &gain)| (length as f32, gain))
                .collect::<Vec<_>>(),
        ))
    }

    pub fn single(total_length: u32) -> Self {
        Self::from_sections(vec![(total_length as f32, 1.0)])
    }

    fn from_sections(sections: Vec<(f32, f32)>) -> Self {
        let mut boundaries = Vec::with_capacity(sections.len() + 1);
        boundaries.push(ORIGIN);

        let sections = sections
            .into_iter()
            .enumerate()
            .map(|(index, (length, motor_gain))| {
                let end = boundaries[index] + length;
                boundaries.push(end);
                Section {
                    index,
                    length,
                    motor_gain,
                }
            })
            .collect();

        SectionPlan {
            sections,
            boundaries,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn boundaries(&self) -> &[f32] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.sections.iter().map(|section| section.length).sum()
    }

    pub fn origin(&self) -> f32 {
        self.boundaries[0]
    }

    /// Far end of the last section.
    pub fn end(&self) -> f32 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Index of the section containing `x`, clamped to the first and last sections.
    pub fn section_at(&self, x: f32) -> usize {
        self.boundaries[1..]
            .partition_point(|&boundary| boundary <= x)
            .min(self.sections.len().saturating_sub(1))
    }

    pub fn motor_gain_at(&self, x: f32) -> f32 {
        self.sections
            .get(self.section_at(x))
            .map_or(1.0, |section| section.motor_gain)
    }
}
