use rand::Rng;

/// A discrete action, indexed from zero.
pub trait Action: Copy + Send + Sync + Sized {
    const SIZE: usize;

    fn as_u32(&self) -> u32;
    fn from_u32(value: u32) -> Option<Self>;

    /// The action with the highest score, or `None` if `scores` is empty.
    fn argmax(scores: &[f32]) -> Option<Self> {
        debug_assert_eq!(Self::SIZE, scores.len());
        let (index, _) = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        Self::from_u32(index as u32)
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R) -> Option<Self> {
        Self::from_u32(rng.random_range(0..Self::SIZE as u32))
    }
}

/// A fixed-width feature vector.
pub trait Observation: Clone + Send + Sync {
    const SIZE: usize;

    fn write_features<T: Extend<f32>>(&self, out: &mut T);

    fn features(&self) -> Vec<f32> {
        let mut features = Vec::with_capacity(Self::SIZE);
        self.write_features(&mut features);
        features
    }
}

pub trait Model<O, A>: Send + Sync {
    fn react(&self, observation: &O) -> A;
}

impl<F, O, A> Model<O, A> for F
where
    F: Fn(&O) -> A + Send + Sync,
{
    fn react(&self, observation: &O) -> A {
        self(observation)
    }
}
