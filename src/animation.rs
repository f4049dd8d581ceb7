//! Number Animations
//!
//! Frame math for the dashboard counters and the theme statistics. The DOM side
//! only ticks a timer and writes whatever these return.

/// Fixed-step counter: adds `target / (duration / tick)` per tick until it
/// reaches the target, displaying the floor of the running value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    current: f64,
    step: f64,
    target: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        let target = target as f64;
        Self {
            current: 0.0,
            step: if ticks > 0.0 { target / ticks } else { target },
            target,
            done: false,
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    /// Value to display on the next tick; the last frame is exactly the target
    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        self.current += self.step;
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        Some(self.current.floor() as i64)
    }
}

/// Progress-based tween: value at `elapsed_ms` of a `duration_ms` run.
/// Returns the floored value and whether the run is finished.
pub fn tween_value(start: i64, end: i64, elapsed_ms: f64, duration_ms: f64) -> (i64, bool) {
    let progress = if duration_ms <= 0.0 { 1.0 } else { (elapsed_ms / duration_ms).clamp(0.0, 1.0) };
    let range = (end - start) as f64;
    ((start as f64 + range * progress).floor() as i64, progress >= 1.0)
}

/// Leading integer of an element's text, like the templates render it ("42", "1.234" → 1)
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_ends_on_target() {
        let frames: Vec<i64> = CounterAnimation::new(120, 1000, 16).collect();
        assert_eq!(*frames.last().unwrap(), 120);
        assert!(frames.len() >= 62 && frames.len() <= 64, "{} frames", frames.len());
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_counter_small_target() {
        let frames: Vec<i64> = CounterAnimation::new(3, 1000, 16).collect();
        assert_eq!(frames.first(), Some(&0));
        assert_eq!(frames.last(), Some(&3));
    }

    #[test]
    fn test_counter_zero_target() {
        let mut anim = CounterAnimation::new(0, 1000, 16);
        assert_eq!(anim.next(), Some(0));
        assert_eq!(anim.next(), None);
    }

    #[test]
    fn test_tween_value() {
        assert_eq!(tween_value(0, 1000, 0.0, 2000.0), (0, false));
        assert_eq!(tween_value(0, 1000, 1000.0, 2000.0), (500, false));
        assert_eq!(tween_value(0, 1000, 2500.0, 2000.0), (1000, true));
        assert_eq!(tween_value(0, 7, 1000.0, 2000.0), (3, false));
        assert_eq!(tween_value(0, 5, 10.0, 0.0), (5, true));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int(" 17 pedidos"), Some(17));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
