//! Pointer tracking: fingers on the keyboard, latched keys and key repeat
//!
//! [`Pointers`] turns raw touch events into key actions:
//! - presses, swipes to another slot of the key, releases and repeats are
//!   forwarded to a [`KeyActionSink`]
//! - latching keys (modifiers) outlive their finger until the next key is
//!   committed; a second press locks them when they carry [`Flags::LOCK`]
//! - held keys repeat through a [`TimerService`], with the interval of
//!   precise-repeat keys following the swipe distance
//!
//! All entry points are expected on one thread, timer callbacks included.
//! Unknown pointer ids are normal (ghost events) and ignored.

mod direction;
mod handler;
mod pointer;
pub mod repeat;

pub use direction::Direction;
pub use handler::{KeyActionSink, KeyGeometry};
pub use pointer::PointerId;

use crate::config::Config;
use crate::keyboard::{same_value, Flags, KeyId, KeyValue};
use crate::timer::{TimerService, TimerToken};

use pointer::Pointer;

/// Touches at the top edge of the input surface are clamped to `y == 0`.
/// They are moved well above the surface so upward swipes still register.
pub const EDGE_CLAMPED_Y: f32 = -400.;

/// The pointer tracking engine
#[derive(Debug)]
pub struct Pointers<G, S, T> {
    ptrs: Vec<Pointer>,
    config: Config,
    geometry: G,
    sink: S,
    timers: T,
}

impl<G, S, T> Pointers<G, S, T>
where
    G: KeyGeometry,
    S: KeyActionSink,
    T: TimerService,
{
    pub fn new(config: Config, geometry: G, sink: S, timers: T) -> Self {
        Self {
            ptrs: Vec::new(),
            config,
            geometry,
            sink,
            timers,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the configuration; running timers keep their current deadline
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of tracked pointers, latched ones included
    pub fn len(&self) -> usize {
        self.ptrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ptrs.is_empty()
    }

    /// Union of the flags of every tracked pointer
    pub fn modifier_flags(&self) -> Flags {
        self.current_modifier_flags(false)
    }

    /// Union of the flags of every tracked pointer
    ///
    /// With `skip_latched`, latched keys that aren't locked are left out.
    pub fn current_modifier_flags(&self, skip_latched: bool) -> Flags {
        self.ptrs
            .iter()
            .filter(|p| !(skip_latched && p.is_latched_unlocked()))
            .fold(Flags::empty(), |acc, p| acc | p.flags)
    }

    /// Whether any pointer, latched or not, is on `key`
    pub fn is_key_down(&self, key: KeyId) -> bool {
        self.ptrs.iter().any(|p| p.key == key)
    }

    /// Whether finger `pointer_id` is tracked
    pub fn is_pointer_down(&self, pointer_id: i32) -> bool {
        self.index_of(pointer_id).is_some()
    }

    /// Flags of the pointer whose value is named `name`
    ///
    /// These can differ from the value's own flags: LOCK is removed and
    /// LOCKED added when the key is locked, LATCH is removed once latched.
    pub fn flags_of(&self, name: &str) -> Option<Flags> {
        self.ptrs
            .iter()
            .find(|p| p.value.as_ref().is_some_and(|v| v.name() == name))
            .map(|p| p.flags)
    }

    /// Values of the latched (finger-less) pointers
    pub fn latched_values(&self) -> impl Iterator<Item = &KeyValue> {
        self.ptrs
            .iter()
            .filter(|p| p.is_latched())
            .filter_map(|p| p.value.as_ref())
    }

    /// Drop every pointer, latched ones included, without notifying the sink
    pub fn clear(&mut self) {
        for ptr in &mut self.ptrs {
            if let Some(token) = ptr.timeout.take() {
                self.timers.cancel(token);
            }
        }
        self.ptrs.clear();
    }

    // ========================================================================
    // Touch events
    // ========================================================================

    pub fn on_touch_down(&mut self, x: f32, y: f32, pointer_id: i32, key: KeyId) {
        // Ghost touches can happen while a modulated key's pointer travels
        // over other keys
        if self.is_modulated_key_pressed() {
            tracing::trace!("Ignoring press of {} while a modulated key is held", pointer_id);
            return;
        }

        let stale = self.index_of(pointer_id);
        debug_assert!(stale.is_none(), "pointer {} pressed twice", pointer_id);
        if let Some(idx) = stale {
            tracing::warn!("Pointer {} pressed twice, voiding the first press", pointer_id);
            self.stop_key_repeat(idx);
            self.ptrs.remove(idx);
            self.sink.on_flags_changed();
        }

        let modifiers = self.current_modifier_flags(self.is_other_pointer_down());
        let selected = self.geometry.resolve_candidate(key, Direction::Center);
        let value = selected
            .as_ref()
            .and_then(|v| self.sink.on_key_press(v, modifiers));

        let start_repeat = value.as_ref().is_some_and(|v| !v.flags.is_special());
        let ptr = Pointer::new(
            PointerId::Touch(pointer_id),
            key,
            selected,
            value,
            x,
            y,
            modifiers,
        );
        tracing::debug!(
            "Pointer {} down on key {}: {} (modifiers: {:?})",
            pointer_id,
            key,
            ptr.value_name(),
            modifiers
        );
        self.ptrs.push(ptr);

        if start_repeat {
            self.start_key_repeat(self.ptrs.len() - 1);
        }
    }

    pub fn on_touch_move(&mut self, x: f32, y: f32, pointer_id: i32) {
        let Some(idx) = self.index_of(pointer_id) else {
            return;
        };

        let y = if y == 0. { EDGE_CLAMPED_Y } else { y };

        let ptr = &mut self.ptrs[idx];
        let dx = x - ptr.down_x;
        let dy = y - ptr.down_y;
        let dist = dx.abs() + dy.abs();
        ptr.ptr_dist = dist;

        let direction = Direction::classify(dx, dy, dist, self.config.swipe_dist_px);
        let selected = self.geometry.resolve_candidate(ptr.key, direction);
        if same_value(selected.as_ref(), ptr.selected_value.as_ref()) {
            return;
        }
        ptr.selected_value = selected;

        let Some(selected) = ptr.selected_value.as_ref() else {
            return;
        };
        let Some(new_value) = self.sink.on_key_swipe(selected, ptr.modifier_flags) else {
            return;
        };

        tracing::debug!(
            "Pointer {} swiped {:?}: {} -> {}",
            pointer_id,
            direction,
            ptr.value_name(),
            new_value
        );

        let old_flags = ptr.flags;
        ptr.flags = new_value.flags;
        // Keep the repeat going between modulated keys
        let keep_repeat = (old_flags & new_value.flags).is_precise_repeat();
        let start_repeat = !new_value.flags.is_special();
        ptr.value = Some(new_value);

        if !keep_repeat {
            self.stop_key_repeat(idx);
            if start_repeat {
                self.start_key_repeat(idx);
            }
        }
    }

    pub fn on_touch_up(&mut self, pointer_id: i32) {
        let Some(idx) = self.index_of(pointer_id) else {
            return;
        };
        self.stop_key_repeat(idx);

        if let Some(latched_idx) = self.find_latched_twin(idx) {
            // Same key pressed again while latched
            let ptr = self.ptrs.remove(idx);
            let latched_idx = if latched_idx > idx {
                latched_idx - 1
            } else {
                latched_idx
            };

            let latched = &mut self.ptrs[latched_idx];
            if latched.flags.contains(Flags::LOCK) {
                latched.flags.remove(Flags::LOCK);
                latched.flags.insert(Flags::LOCKED);
                tracing::debug!("Locked {}", latched.value_name());
                self.sink.on_flags_changed();
            } else {
                self.stop_key_repeat(latched_idx);
                let latched = self.ptrs.remove(latched_idx);
                tracing::debug!("Unlatched {}", latched.value_name());
                self.release(ptr);
            }
        } else if self.ptrs[idx].flags.contains(Flags::LATCH) {
            let ptr = &mut self.ptrs[idx];
            ptr.flags.remove(Flags::LATCH);
            ptr.id = PointerId::Latched;
            tracing::debug!("Latched {}", ptr.value_name());
            self.sink.on_flags_changed();
        } else {
            let ptr = self.ptrs.remove(idx);
            self.clear_latched();
            self.release(ptr);
        }
    }

    pub fn on_touch_cancel(&mut self, pointer_id: i32) {
        let Some(idx) = self.index_of(pointer_id) else {
            return;
        };
        self.stop_key_repeat(idx);
        let ptr = self.ptrs.remove(idx);
        tracing::debug!("Pointer {} cancelled ({})", pointer_id, ptr.value_name());
        self.sink.on_flags_changed();
    }

    // ========================================================================
    // Key repeat
    // ========================================================================

    /// Deliver a fired timer; returns false when no pointer owns `token`
    /// anymore (the timer was cancelled after it was queued)
    pub fn on_timer_fired(&mut self, token: TimerToken) -> bool {
        let Some(ptr) = self.ptrs.iter_mut().find(|p| p.timeout == Some(token)) else {
            tracing::trace!("Dropping stale {}", token);
            return false;
        };

        let interval = repeat::next_interval(
            &self.config,
            ptr.flags,
            ptr.ptr_dist,
            &mut ptr.repeating_ptr_dist,
        );
        if let Some(value) = ptr.value.as_ref() {
            self.sink.on_key_hold(value, ptr.modifier_flags);
        }
        self.timers.schedule(token, interval);
        true
    }

    fn start_key_repeat(&mut self, idx: usize) {
        self.stop_key_repeat(idx);
        let ptr = &mut self.ptrs[idx];
        let token = TimerToken::next();
        ptr.timeout = Some(token);
        self.timers
            .schedule(token, repeat::initial_delay(&self.config, ptr.flags));
    }

    fn stop_key_repeat(&mut self, idx: usize) {
        let ptr = &mut self.ptrs[idx];
        if let Some(token) = ptr.timeout.take() {
            self.timers.cancel(token);
            ptr.repeating_ptr_dist = None;
        }
    }

    // ========================================================================
    // Pointer management
    // ========================================================================

    fn index_of(&self, pointer_id: i32) -> Option<usize> {
        let id = PointerId::Touch(pointer_id);
        self.ptrs.iter().position(|p| p.id == id)
    }

    /// The latched pointer on the same key and value as `self.ptrs[idx]`
    fn find_latched_twin(&self, idx: usize) -> Option<usize> {
        let target = &self.ptrs[idx];
        let value = target.value.as_ref()?;
        self.ptrs
            .iter()
            .position(|p| p.key == target.key && p.is_latched() && p.has_value(value))
    }

    /// Commit of a key: drop latched keys that aren't locked, and keys still
    /// held down lose the right to latch once released
    fn clear_latched(&mut self) {
        let timers = &mut self.timers;
        self.ptrs.retain_mut(|p| {
            if p.is_latched_unlocked() {
                if let Some(token) = p.timeout.take() {
                    timers.cancel(token);
                }
                tracing::debug!("Cleared latched {}", p.value_name());
                return false;
            }
            p.flags.remove(Flags::LATCH);
            true
        });
    }

    fn release(&mut self, ptr: Pointer) {
        match ptr.value.as_ref() {
            Some(value) => {
                tracing::debug!("Released {} (modifiers: {:?})", value, ptr.modifier_flags);
                self.sink.on_key_release(value, ptr.modifier_flags);
            }
            None => self.sink.on_flags_changed(),
        }
    }

    /// Whether another finger is down on a non-special key
    fn is_other_pointer_down(&self) -> bool {
        self.ptrs
            .iter()
            .any(|p| !p.is_latched() && !p.flags.is_special())
    }

    fn is_modulated_key_pressed(&self) -> bool {
        self.ptrs.iter().any(|p| p.flags.is_precise_repeat())
    }
}
