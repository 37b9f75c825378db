use crate::particles::Dot;
use rand::Rng;

pub const AMBIENT_COLOR: [u8; 3] = [0x00, 0xd4, 0xff];

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientParticle {
    /// Start position as a fraction of the area.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub duration_secs: f32,
    pub delay_secs: f32,
}

/// The looping background field. Every particle rises one area height per
/// cycle and shares the same horizontal drift.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientField {
    particles: Vec<AmbientParticle>,
    drift_x: f32,
}

impl AmbientField {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| AmbientParticle {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                size: rng.random_range(1.0..4.0),
                opacity: rng.random_range(0.2..0.7),
                duration_secs: rng.random_range(10.0..20.0),
                delay_secs: rng.random_range(0.0..5.0),
            })
            .collect();

        Self {
            particles,
            drift_x: rng.random_range(-100.0..100.0),
        }
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[AmbientParticle] {
        &self.particles
    }

    pub fn sample(&self, elapsed_secs: f32, width: f32, height: f32) -> Vec<Dot> {
        self.particles
            .iter()
            .filter_map(|particle| {
                let running = elapsed_secs - particle.delay_secs;
                if running < 0.0 {
                    return None;
                }

                let progress = (running % particle.duration_secs) / particle.duration_secs;

                Some(Dot {
                    x: particle.x * width + self.drift_x * progress,
                    y: particle.y * height - height * progress,
                    radius: particle.size / 2.0,
                    color: AMBIENT_COLOR,
                    alpha: particle.opacity * fade(progress),
                })
            })
            .collect()
    }
}

// Fade in over the first 10% of a cycle, out over the last 10%.
fn fade(progress: f32) -> f32 {
    if progress < 0.1 {
        progress / 0.1
    } else if progress > 0.9 {
        (1.0 - progress) / 0.1
    } else {
        1.0
    }
}
