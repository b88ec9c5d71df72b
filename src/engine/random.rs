/// Uniform source in `[0, 1)`. Scoring only ever asks for this, so tests can
/// swap in a seeded or scripted generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f64 {
        self.f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// `low + floor(u * span)`, clamped so a misbehaving source cannot escape
/// the range.
pub fn draw(rng: &mut impl RandomSource, low: u32, span: u32) -> u32 {
    if span == 0 {
        return low;
    }
    let u = rng.next_unit().clamp(0.0, 1.0);
    let offset = ((u * span as f64).floor() as u32).min(span - 1);
    low + offset
}

pub fn seeded(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}
