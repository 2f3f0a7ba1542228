//! Timed opacity fades for the page intro.
//!
//! A [`Sequence`] is a flat list of tweens with absolute start times. It holds
//! no clock; callers sample it with the seconds elapsed since the intro began.

/// Easing curves named after their GSAP counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power3Out,
    Power2InOut,
}

impl Ease {
    pub fn apply(self, p: f64) -> f64 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Ease::Linear => p,
            Ease::Power2Out => 1.0 - (1.0 - p).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - p).powi(4),
            Ease::Power2InOut => {
                if p < 0.5 {
                    4.0 * p * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub selector: &'static str,
    pub from: f64,
    pub to: f64,
    /// Start time in seconds from the beginning of the sequence.
    pub delay: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn fade_in(selector: &'static str, delay: f64, duration: f64, ease: Ease) -> Self {
        Self {
            selector,
            from: 0.0,
            to: 1.0,
            delay,
            duration,
            ease,
        }
    }

    pub fn fade_out(selector: &'static str, delay: f64, duration: f64, ease: Ease) -> Self {
        Self {
            selector,
            from: 1.0,
            to: 0.0,
            delay,
            duration,
            ease,
        }
    }

    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }

    pub fn value_at(&self, t: f64) -> f64 {
        let progress = if self.duration <= 0.0 {
            if t >= self.delay { 1.0 } else { 0.0 }
        } else {
            (t - self.delay) / self.duration
        };
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    tweens: Vec<Tween>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, tween: Tween) -> Self {
        self.tweens.push(tween);
        self
    }

    /// Appends tweens that start when the tween most recently added for
    /// `after` finishes.
    pub fn on_complete(mut self, after: &str, tweens: impl IntoIterator<Item = Tween>) -> Self {
        let start = self
            .tweens
            .iter()
            .rev()
            .find(|t| t.selector == after)
            .map(Tween::end)
            .unwrap_or(0.0);
        self.tweens.extend(tweens.into_iter().map(|mut t| {
            t.delay += start;
            t
        }));
        self
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Every distinct selector, in first-appearance order.
    pub fn selectors(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for tween in &self.tweens {
            if !out.contains(&tween.selector) {
                out.push(tween.selector);
            }
        }
        out
    }

    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.duration()
    }

    /// Opacity of `selector` at `t`. The tween with the latest start not after
    /// `t` wins; before any has started the first tween's `from` applies.
    pub fn sample(&self, selector: &str, t: f64) -> Option<f64> {
        let first = self
            .tweens
            .iter()
            .filter(|tw| tw.selector == selector)
            .min_by(|a, b| a.delay.total_cmp(&b.delay))?;
        let active = self
            .tweens
            .iter()
            .filter(|tw| tw.selector == selector && tw.delay <= t)
            .max_by(|a, b| a.delay.total_cmp(&b.delay));
        Some(match active {
            Some(tw) => tw.value_at(t),
            None => first.from,
        })
    }
}

/// The page intro: headline words fade in and out, then the background and
/// page chrome appear.
pub fn default_intro() -> Sequence {
    use Ease::*;

    Sequence::new()
        .then(Tween::fade_in("#Page", 0.0, 1.0, Power2Out))
        .then(Tween::fade_in("#intro-text", 0.3, 1.0, Power3Out))
        .then(Tween::fade_in("#first-word", 0.6, 1.0, Power2Out))
        .then(Tween::fade_in("#second-word", 0.9, 1.0, Power2Out))
        .then(Tween::fade_out("#first-word", 2.0, 1.0, Power2InOut))
        .then(Tween::fade_out("#second-word", 2.2, 1.0, Power2InOut))
        .on_complete(
            "#second-word",
            [
                Tween::fade_in("#background canvas", 0.0, 1.5, Power3Out),
                Tween::fade_in("#Frame", 0.0, 1.5, Power3Out),
                Tween::fade_in("#SiteHeader", 0.0, 1.0, Power3Out),
                Tween::fade_in("#Content", 0.0, 1.0, Power3Out),
            ],
        )
        .then(Tween::fade_in("#Copyright", 3.2, 1.0, Power2Out))
        .then(Tween::fade_in("#Theme", 3.2, 1.0, Power2Out))
}
