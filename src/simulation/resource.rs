//! Depletable resource nodes
//!
//! A resource holds a finite quantity that agents drain in fixed bites.
//! Hitting zero arms a removal deadline; the node stays visible (but
//! untargetable) until the world prunes it after the grace period.

use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceId, TimeMs, Vec2};

/// A stationary node agents harvest from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    /// Fixed at creation, never moves
    pub position: Vec2,
    pub quantity: u32,
    /// Absolute removal time, armed exactly once when quantity reaches 0
    pub removal_deadline: Option<TimeMs>,
}

impl Resource {
    /// Create a fresh resource with a full quantity and no deadline
    pub fn new(id: ResourceId, position: Vec2, quantity: u32) -> Self {
        Self {
            id,
            position,
            quantity,
            removal_deadline: None,
        }
    }

    /// Whether agents may target this resource
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Remove up to `amount` units, returning the amount actually taken.
    ///
    /// The harvest that drains the last unit arms the removal deadline at
    /// `now + grace_period_ms`. Harvesting an empty resource returns 0 and
    /// leaves the deadline untouched.
    pub fn harvest(&mut self, amount: u32, now: TimeMs, grace_period_ms: u64) -> u32 {
        let taken = amount.min(self.quantity);
        self.quantity -= taken;
        if self.quantity == 0 && self.removal_deadline.is_none() {
            self.removal_deadline = Some(now + grace_period_ms);
        }
        taken
    }

    /// Whether the removal deadline has passed
    pub fn is_expired(&self, now: TimeMs) -> bool {
        self.removal_deadline.map_or(false, |deadline| deadline <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resource(quantity: u32) -> Resource {
        Resource::new(ResourceId(0), Vec2::new(100.0, 100.0), quantity)
    }

    #[test]
    fn test_resource_starts_available() {
        let resource = sample_resource(100);
        assert!(resource.is_available());
        assert_eq!(resource.quantity, 100);
        assert!(resource.removal_deadline.is_none());
    }

    #[test]
    fn test_harvest_decrements_and_returns_amount() {
        let mut resource = sample_resource(100);
        let taken = resource.harvest(10, 0, 6000);
        assert_eq!(taken, 10);
        assert_eq!(resource.quantity, 90);
        assert!(resource.removal_deadline.is_none());
    }

    #[test]
    fn test_harvest_clamps_to_remaining() {
        let mut resource = sample_resource(7);
        let taken = resource.harvest(10, 0, 6000);
        assert_eq!(taken, 7);
        assert_eq!(resource.quantity, 0);
        assert!(!resource.is_available());
    }

    #[test]
    fn test_harvest_on_empty_returns_zero() {
        let mut resource = sample_resource(10);
        resource.harvest(10, 50, 6000);
        let taken = resource.harvest(10, 60, 6000);
        assert_eq!(taken, 0);
        assert_eq!(resource.quantity, 0);
    }

    #[test]
    fn test_depletion_arms_deadline_once() {
        let mut resource = sample_resource(10);
        resource.harvest(10, 100, 6000);
        assert_eq!(resource.removal_deadline, Some(6100));

        // A later zero-harvest must not push the deadline back
        resource.harvest(10, 5000, 6000);
        assert_eq!(resource.removal_deadline, Some(6100));
    }

    #[test]
    fn test_deadline_not_armed_while_stocked() {
        let mut resource = sample_resource(100);
        for _ in 0..9 {
            resource.harvest(10, 0, 6000);
        }
        assert_eq!(resource.quantity, 10);
        assert!(resource.removal_deadline.is_none());
    }

    #[test]
    fn test_is_expired_boundary() {
        let mut resource = sample_resource(10);
        resource.harvest(10, 100, 6000);

        assert!(!resource.is_expired(6099), "still within the grace period");
        assert!(resource.is_expired(6100), "expires exactly at the deadline");
        assert!(resource.is_expired(9999));
    }

    #[test]
    fn test_never_expires_while_stocked() {
        let resource = sample_resource(100);
        assert!(!resource.is_expired(u64::MAX));
    }
}
