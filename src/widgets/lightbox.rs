//! Image lightbox.
//!
//! A full-screen overlay showing one image of the page's gallery sequence at
//! a time.
//!
//! # States
//!
//! ```text
//! Closed --Open(i)--> Open(i) --Next/Prev--> Open(i±1)
//!    ^                   |
//!    +----(transition)---+ Close / Escape / backdrop click
//! ```
//!
//! - **Open(i)** clamps `i`, swaps the image in, refreshes the prev/next
//!   affordances, shows the modal and locks page scroll.
//! - **Next/Prev** are no-ops at the ends of the sequence, and while an
//!   image swap is still fading.
//! - **Close** runs the exit transition; scroll unlocks once it finishes.
//!   Input is ignored until the lightbox is fully closed.
//!
//! # Inputs
//!
//! Trigger clicks, the close/prev/next buttons, a backdrop click,
//! `Escape`/`ArrowLeft`/`ArrowRight` (trailing-edge debounced), and
//! horizontal swipes that start and end on the backdrop.

use super::gesture::{Point, SwipeTracker};
use super::modal::Modal;
use super::navigation::{Direction, ImageDescriptor, Navigator};
use super::{Effect, Key, Timer, Widget};
use crate::config::LightboxConfig;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxSettings {
    pub swipe_threshold: f64,
    pub transition: Duration,
    pub image_fade: Duration,
    pub key_debounce: Duration,
}

impl LightboxSettings {
    pub fn from_config(config: &LightboxConfig) -> Self {
        Self {
            swipe_threshold: config.swipe_threshold,
            transition: config.transition(),
            image_fade: config.image_fade(),
            key_debounce: config.key_debounce(),
        }
    }
}

impl Default for LightboxSettings {
    fn default() -> Self {
        Self::from_config(&LightboxConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightboxEvent {
    /// Click on the trigger carrying `data-index`.
    Open(usize),
    Next,
    Prev,
    Close,
    /// Click on the dimmed area around the image.
    BackdropClick,
    KeyDown(Key),
    TouchStart { on_backdrop: bool, at: Point },
    TouchEnd { on_backdrop: bool, at: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { index: usize },
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    navigator: Navigator,
    modal: Modal,
    settings: LightboxSettings,
    /// Set while an image swap is fading; blocks navigation.
    transitioning: bool,
    swipe: SwipeTracker,
    pending_key: Option<Key>,
    key_generation: u64,
}

impl Lightbox {
    pub fn new(images: Vec<ImageDescriptor>, settings: LightboxSettings) -> Self {
        Self {
            navigator: Navigator::new(images),
            modal: Modal::new(settings.transition),
            settings,
            transitioning: false,
            swipe: SwipeTracker::default(),
            pending_key: None,
            key_generation: 0,
        }
    }

    pub fn state(&self) -> LightboxState {
        if self.modal.is_shown() {
            LightboxState::Open {
                index: self.navigator.index(),
            }
        } else {
            LightboxState::Closed
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    fn open(&mut self, index: usize, effects: &mut Vec<Effect>) {
        if self.navigator.is_empty() {
            return;
        }
        self.navigator.set_index(index);
        self.update_image(effects);
        self.push_controls(effects);
        if self.modal.show(effects) {
            effects.push(Effect::LockScroll);
        }
    }

    fn close(&mut self, effects: &mut Vec<Effect>) {
        self.swipe.cancel();
        self.modal.hide(effects);
    }

    fn navigate(&mut self, direction: Direction, effects: &mut Vec<Effect>) {
        if !self.modal.is_shown() || self.transitioning {
            return;
        }
        if !self.navigator.step(direction) {
            return;
        }
        self.update_image(effects);
        self.push_controls(effects);
    }

    fn update_image(&mut self, effects: &mut Vec<Effect>) {
        if self.transitioning {
            return;
        }
        self.transitioning = true;
        effects.push(Effect::DimImage);
        effects.push(Effect::Schedule {
            timer: Timer::ImageFade,
            after: self.settings.image_fade,
        });
    }

    fn push_controls(&self, effects: &mut Vec<Effect>) {
        effects.push(Effect::Controls {
            prev_enabled: !self.navigator.is_at_start(),
            next_enabled: !self.navigator.is_at_end(),
        });
    }

    fn key(&mut self, key: Key, effects: &mut Vec<Effect>) {
        if !self.modal.is_shown() {
            return;
        }
        match key {
            Key::Escape => self.close(effects),
            Key::ArrowLeft => self.navigate(Direction::Prev, effects),
            Key::ArrowRight => self.navigate(Direction::Next, effects),
            Key::Other(_) => {}
        }
    }
}

impl Widget for Lightbox {
    type Event = LightboxEvent;

    fn handle(&mut self, event: LightboxEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            LightboxEvent::Open(index) => self.open(index, &mut effects),
            LightboxEvent::Next => self.navigate(Direction::Next, &mut effects),
            LightboxEvent::Prev => self.navigate(Direction::Prev, &mut effects),
            LightboxEvent::Close | LightboxEvent::BackdropClick => {
                if self.modal.is_shown() {
                    self.close(&mut effects);
                }
            }
            LightboxEvent::KeyDown(key) => {
                self.key_generation += 1;
                self.pending_key = Some(key);
                effects.push(Effect::Schedule {
                    timer: Timer::KeyDebounce(self.key_generation),
                    after: self.settings.key_debounce,
                });
            }
            LightboxEvent::TouchStart { on_backdrop, at } => {
                if self.modal.is_shown() && on_backdrop {
                    self.swipe.begin(at);
                }
            }
            LightboxEvent::TouchEnd { on_backdrop, at } => {
                if self.modal.is_shown()
                    && on_backdrop
                    && let Some(direction) = self.swipe.finish(at, self.settings.swipe_threshold)
                {
                    self.navigate(direction, &mut effects);
                }
            }
        }
        effects
    }

    fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        let mut effects = Vec::new();
        match timer {
            Timer::Frame => self.modal.frame(&mut effects),
            Timer::Hide => {
                if self.modal.hide_elapsed(&mut effects) {
                    effects.push(Effect::UnlockScroll);
                }
            }
            Timer::ImageFade => {
                if self.transitioning {
                    self.transitioning = false;
                    if let Some(image) = self.navigator.current() {
                        effects.push(Effect::ShowImage(image.clone()));
                    }
                }
            }
            Timer::KeyDebounce(generation) => {
                if generation == self.key_generation
                    && let Some(key) = self.pending_key.take()
                {
                    self.key(key, &mut effects);
                }
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_images, seeded_rng};
    use crate::widgets::dom::Harness;
    use rand::Rng;

    fn lightbox(n: usize) -> Lightbox {
        Lightbox::new(sample_images(n), LightboxSettings::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn open_clamps_and_shows() {
        let mut lb = lightbox(3);
        let fx = lb.handle(LightboxEvent::Open(7));
        assert_eq!(lb.state(), LightboxState::Open { index: 2 });
        assert!(fx.contains(&Effect::DimImage));
        assert!(fx.contains(&Effect::Display));
        assert!(fx.contains(&Effect::LockScroll));
        assert!(fx.contains(&Effect::Controls {
            prev_enabled: true,
            next_enabled: false
        }));
    }

    #[test]
    fn open_with_no_images_is_noop() {
        let mut lb = lightbox(0);
        assert!(lb.handle(LightboxEvent::Open(0)).is_empty());
        assert_eq!(lb.state(), LightboxState::Closed);
    }

    #[test]
    fn image_swaps_after_fade() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(1));
        assert!(lb.is_transitioning());
        let fx = lb.on_timer(Timer::ImageFade);
        assert_eq!(fx, vec![Effect::ShowImage(sample_images(3)[1].clone())]);
        assert!(!lb.is_transitioning());
    }

    #[test]
    fn navigation_blocked_during_fade() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(0));
        assert!(lb.handle(LightboxEvent::Next).is_empty());
        assert_eq!(lb.state(), LightboxState::Open { index: 0 });

        lb.on_timer(Timer::ImageFade);
        let fx = lb.handle(LightboxEvent::Next);
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
        assert!(fx.contains(&Effect::Controls {
            prev_enabled: true,
            next_enabled: true
        }));
    }

    #[test]
    fn boundaries_are_noops() {
        let mut lb = lightbox(2);
        lb.handle(LightboxEvent::Open(0));
        lb.on_timer(Timer::ImageFade);
        assert!(lb.handle(LightboxEvent::Prev).is_empty());
        lb.handle(LightboxEvent::Next);
        lb.on_timer(Timer::ImageFade);
        assert!(lb.handle(LightboxEvent::Next).is_empty());
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
    }

    #[test]
    fn navigation_ignored_while_closed() {
        let mut lb = lightbox(3);
        assert!(lb.handle(LightboxEvent::Next).is_empty());
        assert!(lb.handle(LightboxEvent::Close).is_empty());
    }

    #[test]
    fn navigation_ignored_while_hiding() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(1));
        lb.on_timer(Timer::ImageFade);
        lb.handle(LightboxEvent::Close);

        assert!(lb.handle(LightboxEvent::Next).is_empty());
        assert!(lb.handle(LightboxEvent::Prev).is_empty());
        lb.handle(LightboxEvent::TouchStart { on_backdrop: true, at: Point::new(200.0, 100.0) });
        let fx = lb.handle(LightboxEvent::TouchEnd { on_backdrop: true, at: Point::new(100.0, 100.0) });
        assert!(fx.is_empty());
        assert_eq!(lb.navigator().index(), 1);

        assert_eq!(lb.on_timer(Timer::Hide), vec![Effect::Conceal, Effect::UnlockScroll]);
        assert_eq!(lb.navigator().index(), 1);
    }

    #[test]
    fn close_unlocks_after_transition() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(0));
        let fx = lb.handle(LightboxEvent::Close);
        assert_eq!(lb.state(), LightboxState::Closed);
        assert!(fx.contains(&Effect::Fade));
        assert!(!fx.contains(&Effect::UnlockScroll));

        let fx = lb.on_timer(Timer::Hide);
        assert_eq!(fx, vec![Effect::Conceal, Effect::UnlockScroll]);
    }

    #[test]
    fn backdrop_click_closes() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(0));
        let fx = lb.handle(LightboxEvent::BackdropClick);
        assert!(fx.contains(&Effect::Fade));
    }

    #[test]
    fn keys_are_debounced() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(0));
        lb.on_timer(Timer::ImageFade);

        lb.handle(LightboxEvent::KeyDown(Key::ArrowRight));
        lb.handle(LightboxEvent::KeyDown(Key::ArrowRight));
        // First key's timer is stale
        assert!(lb.on_timer(Timer::KeyDebounce(1)).is_empty());
        lb.on_timer(Timer::KeyDebounce(2));
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut lb = lightbox(3);
        let fx = lb.handle(LightboxEvent::KeyDown(Key::ArrowRight));
        assert_eq!(fx.len(), 1);
        assert!(lb.on_timer(Timer::KeyDebounce(1)).is_empty());
        assert_eq!(lb.state(), LightboxState::Closed);
    }

    #[test]
    fn escape_closes() {
        let mut h = Harness::new(lightbox(3));
        h.dispatch(LightboxEvent::Open(0));
        h.settle();
        h.dispatch(LightboxEvent::KeyDown(Key::Escape));
        h.advance(ms(150));
        assert_eq!(h.widget().state(), LightboxState::Closed);
        h.settle();
        assert!(!h.page().is_open());
        assert_eq!(h.page().body.style("overflow"), None);
    }

    #[test]
    fn swipe_left_goes_next_swipe_right_goes_prev() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(1));
        lb.on_timer(Timer::ImageFade);

        lb.handle(LightboxEvent::TouchStart { on_backdrop: true, at: Point::new(200.0, 100.0) });
        lb.handle(LightboxEvent::TouchEnd { on_backdrop: true, at: Point::new(120.0, 110.0) });
        assert_eq!(lb.state(), LightboxState::Open { index: 2 });
        lb.on_timer(Timer::ImageFade);

        lb.handle(LightboxEvent::TouchStart { on_backdrop: true, at: Point::new(100.0, 100.0) });
        lb.handle(LightboxEvent::TouchEnd { on_backdrop: true, at: Point::new(180.0, 90.0) });
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
    }

    #[test]
    fn short_or_vertical_swipes_do_nothing() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(1));
        lb.on_timer(Timer::ImageFade);
        for end in [Point::new(140.0, 100.0), Point::new(40.0, 200.0), Point::new(150.0, 100.0)] {
            lb.handle(LightboxEvent::TouchStart { on_backdrop: true, at: Point::new(100.0, 100.0) });
            let fx = lb.handle(LightboxEvent::TouchEnd { on_backdrop: true, at: end });
            assert!(fx.is_empty(), "{end:?}");
        }
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
    }

    #[test]
    fn touches_off_backdrop_ignored() {
        let mut lb = lightbox(3);
        lb.handle(LightboxEvent::Open(1));
        lb.on_timer(Timer::ImageFade);
        lb.handle(LightboxEvent::TouchStart { on_backdrop: false, at: Point::new(200.0, 100.0) });
        let fx = lb.handle(LightboxEvent::TouchEnd { on_backdrop: true, at: Point::new(50.0, 100.0) });
        assert!(fx.is_empty());
        assert_eq!(lb.state(), LightboxState::Open { index: 1 });
    }

    #[test]
    fn controls_dimmed_at_ends_on_page() {
        let mut h = Harness::new(lightbox(2));
        h.dispatch(LightboxEvent::Open(0));
        h.settle();
        assert!(h.page().is_open());
        assert_eq!(h.page().image.attr("src"), Some("img-0.jpg"));
        assert_eq!(h.page().caption.text(), "Caption 0");
        assert_eq!(h.page().prev.style("opacity"), Some("0.3"));
        assert_eq!(h.page().prev.style("pointer-events"), Some("none"));
        assert_eq!(h.page().next.style("opacity"), Some("1"));

        h.dispatch(LightboxEvent::Next);
        h.settle();
        assert_eq!(h.page().image.attr("src"), Some("img-1.jpg"));
        assert_eq!(h.page().next.style("pointer-events"), Some("none"));
        assert_eq!(h.page().prev.style("pointer-events"), Some("auto"));
    }

    #[test]
    fn random_clicks_keep_cursor_in_bounds() {
        let n = 6;
        let mut h = Harness::new(lightbox(n));
        let mut rng = seeded_rng(42);
        for _ in 0..400 {
            let event = match rng.gen_range(0..5) {
                0 => LightboxEvent::Open(rng.gen_range(0..n * 2)),
                1 | 2 => LightboxEvent::Next,
                3 => LightboxEvent::Prev,
                _ => LightboxEvent::Close,
            };
            h.dispatch(event);
            h.advance(ms(rng.gen_range(0..400)));
            assert!(h.widget().navigator().index() < n);
            if let LightboxState::Open { index } = h.widget().state() {
                assert!(index < n);
            }
        }
    }

    #[test]
    fn next_at_last_and_prev_at_first_change_nothing_on_page() {
        let mut h = Harness::new(lightbox(3));
        h.dispatch(LightboxEvent::Open(2));
        h.settle();
        let before = h.page().clone();
        h.dispatch(LightboxEvent::Next);
        h.settle();
        assert_eq!(h.page(), &before);

        h.dispatch(LightboxEvent::Open(0));
        h.settle();
        let before = h.page().clone();
        h.dispatch(LightboxEvent::Prev);
        h.settle();
        assert_eq!(h.page(), &before);
    }
}
