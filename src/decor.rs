// Seasonal decoration injector
// Cosmetic overlay appended once at startup. The backdrop and marker classes
// always go in; the animated ornaments are skipped when the user prefers
// reduced motion. Injection is guarded by an explicit initialized flag so a
// second call is a no-op instead of duplicating elements.

use rand::Rng;
use tracing::debug;

pub const ORNAMENT_COUNT: usize = 12;
pub const MAX_START_OFFSET_MS: u32 = 4000;

const MARKER_CLASSES: &[&str] = &["seasonal", "decorated"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPreference {
    Full,
    Reduced,
}

// One animated overlay element with a randomized animation-start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ornament {
    pub start_offset_ms: u32,
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub backdrop: bool,
    pub marker_classes: Vec<String>,
    pub ornaments: Vec<Ornament>,
}

#[derive(Debug, Default)]
pub struct Decorator {
    initialized: bool,
}

impl Decorator {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns false when decorations were already injected.
    pub fn inject(
        &mut self,
        scene: &mut Scene,
        motion: MotionPreference,
        rng: &mut impl Rng,
    ) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        scene.backdrop = true;
        scene
            .marker_classes
            .extend(MARKER_CLASSES.iter().map(|c| c.to_string()));

        if motion == MotionPreference::Full {
            for _ in 0..ORNAMENT_COUNT {
                scene.ornaments.push(Ornament {
                    start_offset_ms: rng.gen_range(0..MAX_START_OFFSET_MS),
                });
            }
        }

        debug!(ornaments = scene.ornaments.len(), "decorations injected");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_inject_appends_backdrop_markers_and_ornaments() {
        let mut decorator = Decorator::new();
        let mut scene = Scene::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(decorator.inject(&mut scene, MotionPreference::Full, &mut rng));
        assert!(scene.backdrop);
        assert_eq!(scene.marker_classes, vec!["seasonal", "decorated"]);
        assert_eq!(scene.ornaments.len(), ORNAMENT_COUNT);
        for ornament in &scene.ornaments {
            assert!(ornament.start_offset_ms < MAX_START_OFFSET_MS);
        }
    }

    #[test]
    fn test_reduced_motion_skips_ornaments_only() {
        let mut decorator = Decorator::new();
        let mut scene = Scene::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(decorator.inject(&mut scene, MotionPreference::Reduced, &mut rng));
        assert!(scene.backdrop);
        assert!(!scene.marker_classes.is_empty());
        assert!(scene.ornaments.is_empty());
    }

    #[test]
    fn test_second_injection_is_a_no_op() {
        let mut decorator = Decorator::new();
        let mut scene = Scene::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(decorator.inject(&mut scene, MotionPreference::Full, &mut rng));
        let after_first = scene.clone();

        assert!(!decorator.inject(&mut scene, MotionPreference::Full, &mut rng));
        assert_eq!(scene.ornaments.len(), after_first.ornaments.len());
        assert_eq!(scene.marker_classes.len(), after_first.marker_classes.len());
    }
}
