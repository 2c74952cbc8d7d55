//! Decorative dashboard effects: count-up counters, click ripples, hover
//! transforms and staggered insight fade-in. Pure geometry and timing; the
//! page applies the results.

use std::time::Duration;

pub const RIPPLE_DURATION: Duration = Duration::from_millis(600);

/// Count-up animation for a numeric stat card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    pub target: u64,
    pub percent: bool,
}

impl CounterAnimation {
    /// Parse the card's final text. Non-numeric text is not animated.
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        let target = digits.parse().ok()?;
        Some(Self {
            target,
            percent: text.contains('%'),
        })
    }

    /// Text for each frame, ending exactly at the target
    pub fn frames(&self, steps: u32) -> Vec<String> {
        if self.target == 0 {
            return vec![self.label(0)];
        }

        let steps = steps.max(1) as u128;
        (1..=steps)
            .map(|step| (self.target as u128 * step / steps) as u64)
            .map(|value| self.label(value))
            .collect()
    }

    fn label(&self, value: u64) -> String {
        if self.percent {
            format!("{}%", value)
        } else {
            value.to_string()
        }
    }
}

/// Ripple circle placed under the pointer, relative to the clicked element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Ripple {
    pub fn at(rect: Rect, client_x: f64, client_y: f64) -> Self {
        let size = rect.width.max(rect.height);
        Self {
            size,
            x: client_x - rect.left - size / 2.0,
            y: client_y - rect.top - size / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    RecentChat,
    StatsCard,
}

/// CSS transform for an element entering or leaving hover
pub fn hover_transform(target: HoverTarget, hovered: bool) -> &'static str {
    match (target, hovered) {
        (HoverTarget::RecentChat, true) => "translateX(5px)",
        (HoverTarget::RecentChat, false) => "translateX(0)",
        (HoverTarget::StatsCard, true) => "translateY(-5px) scale(1.02)",
        (HoverTarget::StatsCard, false) => "translateY(0) scale(1)",
    }
}

/// Delay before the n-th insight fades in
pub fn stagger_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_parse() {
        assert_eq!(
            CounterAnimation::parse("42"),
            Some(CounterAnimation {
                target: 42,
                percent: false
            })
        );
        assert_eq!(
            CounterAnimation::parse("60%"),
            Some(CounterAnimation {
                target: 60,
                percent: true
            })
        );
        assert_eq!(CounterAnimation::parse("n/a"), None);
    }

    #[test]
    fn test_counter_frames_end_on_target() {
        let counter = CounterAnimation::parse("60%").unwrap();
        let frames = counter.frames(50);
        assert_eq!(frames.len(), 50);
        assert_eq!(frames.first().unwrap(), "1%");
        assert_eq!(frames.last().unwrap(), "60%");

        let zero = CounterAnimation::parse("0").unwrap();
        assert_eq!(zero.frames(50), vec!["0"]);

        let small = CounterAnimation::parse("3").unwrap();
        let frames = small.frames(0);
        assert_eq!(frames, vec!["3"]);
    }

    #[test]
    fn test_ripple_centred_on_pointer() {
        let rect = Rect {
            left: 10.0,
            top: 20.0,
            width: 100.0,
            height: 40.0,
        };
        let ripple = Ripple::at(rect, 60.0, 40.0);
        assert_eq!(ripple.size, 100.0);
        assert_eq!(ripple.x, 0.0);
        assert_eq!(ripple.y, -30.0);
    }

    #[test]
    fn test_hover_and_stagger() {
        assert_eq!(hover_transform(HoverTarget::RecentChat, true), "translateX(5px)");
        assert_eq!(
            hover_transform(HoverTarget::StatsCard, false),
            "translateY(0) scale(1)"
        );
        assert_eq!(
            stagger_delay(3, Duration::from_millis(200)),
            Duration::from_millis(600)
        );
        assert_eq!(
            stagger_delay(usize::MAX, Duration::from_secs(u64::MAX)),
            Duration::MAX
        );
        assert_eq!(
            stagger_delay(u32::MAX as usize, Duration::from_millis(200)),
            Duration::from_millis(200) * u32::MAX
        );
    }
}
