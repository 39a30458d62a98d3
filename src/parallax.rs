use crate::throttle::Throttle;

#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxEffect {
    speed: f64,
    throttle: Throttle,
}

impl ParallaxEffect {
    pub fn new(speed: f64, throttle_ms: u32) -> Self {
        Self {
            speed,
            throttle: Throttle::new(throttle_ms),
        }
    }

    /// Offset for the background at `scroll_y`. Unclamped: it keeps growing
    /// with page length.
    pub fn offset(&self, scroll_y: f64) -> f64 {
        scroll_y * self.speed
    }

    /// Throttled scroll handler; `None` when the event falls inside the
    /// current window.
    pub fn on_scroll(&mut self, now_ms: f64, scroll_y: f64) -> Option<f64> {
        let offset = self.offset(scroll_y);
        self.throttle.call(now_ms, || offset)
    }
}

pub fn translate_y(offset: f64) -> String {
    format!("translateY({offset:.2}px)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_half_the_scroll_position() {
        let effect = ParallaxEffect::new(0.5, 16);

        assert_eq!(effect.offset(0.0), 0.0);
        assert_eq!(effect.offset(300.0), 150.0);
        assert_eq!(effect.offset(12_345.0), 6_172.5);
    }

    #[test]
    fn offset_is_monotonic_in_scroll_position() {
        let effect = ParallaxEffect::new(0.5, 16);
        let offsets: Vec<f64> = (0..200).map(|step| effect.offset(f64::from(step) * 37.0)).collect();

        assert!(offsets.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn scroll_events_are_capped_by_throttle() {
        let mut effect = ParallaxEffect::new(0.5, 16);

        assert_eq!(effect.on_scroll(0.0, 100.0), Some(50.0));
        assert_eq!(effect.on_scroll(8.0, 140.0), None);
        assert_eq!(effect.on_scroll(16.0, 180.0), Some(90.0));
    }

    #[test]
    fn translate_formats_pixels() {
        assert_eq!(translate_y(90.0), "translateY(90.00px)");
    }
}
