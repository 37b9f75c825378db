use crate::particles::Dot;
use rand::Rng;
use std::time::Duration;

pub const FIRE_RED: [u8; 3] = [0xff, 0x44, 0x44];
pub const FIRE_ORANGE: [u8; 3] = [0xff, 0xa5, 0x00];

pub const RISE_PX: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BurstParticle {
    pub spawn_offset: Duration,
    /// Horizontal position as a fraction of the icon width.
    pub x: f32,
    pub size: f32,
    pub rise_secs: f32,
    pub color: [u8; 3],
}

/// One-shot burst shown over the fire icon. Particle `i` appears `i * stagger`
/// after the burst starts and is dropped `lifetime` after it appeared.
#[derive(Debug, Clone, PartialEq)]
pub struct FireBurst {
    particles: Vec<BurstParticle>,
    lifetime: Duration,
}

impl FireBurst {
    pub fn new(count: usize, stagger: Duration, lifetime: Duration, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|i| BurstParticle {
                spawn_offset: stagger * i as u32,
                x: rng.random_range(0.0..1.0),
                size: rng.random_range(2.0..8.0),
                rise_secs: rng.random_range(1.0..3.0),
                color: if i % 2 == 0 { FIRE_RED } else { FIRE_ORANGE },
            })
            .collect();

        Self {
            particles,
            lifetime,
        }
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    /// Particles that have been spawned and not yet removed.
    pub fn live(&self, elapsed: Duration) -> impl Iterator<Item = &BurstParticle> {
        let lifetime = self.lifetime;
        self.particles.iter().filter(move |particle| {
            elapsed >= particle.spawn_offset && elapsed < particle.spawn_offset + lifetime
        })
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.particles
            .iter()
            .all(|particle| elapsed >= particle.spawn_offset + self.lifetime)
    }

    pub fn sample(&self, elapsed: Duration, width: f32, height: f32) -> Vec<Dot> {
        self.live(elapsed)
            .filter_map(|particle| {
                let age = (elapsed - particle.spawn_offset).as_secs_f32();
                let progress = age / particle.rise_secs;
                if progress >= 1.0 {
                    return None;
                }

                Some(Dot {
                    x: particle.x * width,
                    y: height / 2.0 - RISE_PX * progress,
                    radius: particle.size / 2.0 * (1.0 - progress),
                    color: particle.color,
                    alpha: 1.0 - progress,
                })
            })
            .collect()
    }
}
