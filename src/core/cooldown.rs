//! Dual cooldown arbitration for actors with several independent attacks.

use std::collections::HashMap;
use std::hash::Hash;

/// Gates a set of actions behind their own cooldowns plus one shared cooldown.
///
/// An action may start only when its own cooldown and the shared "any action just
/// happened" cooldown have both elapsed. Triggering stamps both, so two limbs can
/// alternate but never fire within `global_cooldown` of each other.
#[derive(Debug, Clone)]
pub struct CooldownGate<K> {
    global_cooldown: f32,
    last_any: Option<f32>,
    actions: HashMap<K, ActionCooldown>,
}

#[derive(Debug, Clone, Copy)]
struct ActionCooldown {
    cooldown: f32,
    last_used: Option<f32>,
}

impl<K: Copy + Eq + Hash> CooldownGate<K> {
    pub fn new(global_cooldown: f32) -> Self {
        Self {
            global_cooldown: global_cooldown.max(0.0),
            last_any: None,
            actions: HashMap::new(),
        }
    }

    /// Registers an action with its own cooldown.
    pub fn with_action(mut self, key: K, cooldown: f32) -> Self {
        self.actions.insert(
            key,
            ActionCooldown {
                cooldown: cooldown.max(0.0),
                last_used: None,
            },
        );
        self
    }

    /// Whether `key` may start at time `now`. Unknown actions are never ready.
    pub fn is_ready(&self, key: K, now: f32) -> bool {
        let Some(action) = self.actions.get(&key) else {
            return false;
        };
        elapsed(action.last_used, action.cooldown, now) && self.global_ready(now)
    }

    pub fn global_ready(&self, now: f32) -> bool {
        elapsed(self.last_any, self.global_cooldown, now)
    }

    /// Starts `key` if permitted, stamping both cooldowns.
    pub fn try_trigger(&mut self, key: K, now: f32) -> bool {
        if !self.is_ready(key, now) {
            return false;
        }
        if let Some(action) = self.actions.get_mut(&key) {
            action.last_used = Some(now);
        }
        self.last_any = Some(now);
        true
    }

    /// Forgets the latest use of `key`, along with the shared stamp when `key` set it.
    pub fn clear(&mut self, key: K) {
        let Some(action) = self.actions.get_mut(&key) else {
            return;
        };
        if let Some(used) = action.last_used.take() {
            if self.last_any == Some(used) {
                self.last_any = None;
            }
        }
    }

    /// First ready action in the caller's preferred order.
    pub fn first_ready(&self, keys: impl IntoIterator<Item = K>, now: f32) -> Option<K> {
        keys.into_iter().find(|key| self.is_ready(*key, now))
    }

    /// Seconds until `key` could start, accounting for the shared cooldown.
    pub fn remaining(&self, key: K, now: f32) -> f32 {
        let own = self
            .actions
            .get(&key)
            .map_or(f32::INFINITY, |a| remaining(a.last_used, a.cooldown, now));
        own.max(remaining(self.last_any, self.global_cooldown, now))
    }
}

fn elapsed(last: Option<f32>, cooldown: f32, now: f32) -> bool {
    remaining(last, cooldown, now) <= 0.0
}

fn remaining(last: Option<f32>, cooldown: f32, now: f32) -> f32 {
    match last {
        Some(at) => (at + cooldown - now).max(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Limb {
        Left,
        Right,
    }

    fn twin_limbs() -> CooldownGate<Limb> {
        CooldownGate::new(0.5)
            .with_action(Limb::Left, 2.0)
            .with_action(Limb::Right, 2.0)
    }

    #[test]
    fn test_shared_cooldown_blocks_other_limb() {
        let mut gate = twin_limbs();
        assert!(gate.try_trigger(Limb::Left, 0.0));

        // Right limb is off its own cooldown but the shared one is still running
        assert!(!gate.is_ready(Limb::Right, 0.3));
        assert!(!gate.try_trigger(Limb::Right, 0.3));

        assert!(gate.try_trigger(Limb::Right, 0.5));
    }

    #[test]
    fn test_own_cooldown_blocks_same_limb() {
        let mut gate = twin_limbs();
        assert!(gate.try_trigger(Limb::Left, 0.0));
        assert!(!gate.is_ready(Limb::Left, 1.0));
        assert!((gate.remaining(Limb::Left, 1.0) - 1.0).abs() < 1e-5);
        assert!(gate.try_trigger(Limb::Left, 2.0));
    }

    #[test]
    fn test_limbs_alternate() {
        let mut gate = twin_limbs();
        let order = [Limb::Left, Limb::Right];

        let mut fired = Vec::new();
        let mut now = 0.0;
        while now < 3.0 {
            if let Some(limb) = gate.first_ready(order, now) {
                assert!(gate.try_trigger(limb, now));
                fired.push(limb);
            }
            now += 0.25;
        }

        assert_eq!(fired, vec![Limb::Left, Limb::Right, Limb::Left, Limb::Right]);
    }

    #[test]
    fn test_clear_releases_own_and_shared_stamp() {
        let mut gate = twin_limbs();
        assert!(gate.try_trigger(Limb::Left, 0.0));
        gate.clear(Limb::Left);
        assert!(gate.is_ready(Limb::Left, 0.1));
        assert!(gate.is_ready(Limb::Right, 0.1));

        // A newer stamp from the other limb keeps the shared cooldown running
        assert!(gate.try_trigger(Limb::Left, 1.0));
        assert!(gate.try_trigger(Limb::Right, 1.5));
        gate.clear(Limb::Left);
        assert!(!gate.is_ready(Limb::Left, 1.6));
        assert!(gate.is_ready(Limb::Left, 2.0));
    }

    #[test]
    fn test_unknown_action_never_ready() {
        let gate: CooldownGate<u8> = CooldownGate::new(0.0).with_action(0, 1.0);
        assert!(gate.is_ready(0, 0.0));
        assert!(!gate.is_ready(1, 100.0));
    }
}
