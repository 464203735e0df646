//! Charger inventory and availability transitions

use serde::Serialize;

use super::error::{DomainError, DomainResult};

/// Physical connector standard of a charger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectorType {
    Type2,
    Ccs,
    Chademo,
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type2 => write!(f, "Type2"),
            Self::Ccs => write!(f, "CCS"),
            Self::Chademo => write!(f, "CHAdeMO"),
        }
    }
}

/// Charger operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargerStatus {
    Available,
    Occupied,
    OutOfService,
}

impl Default for ChargerStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl std::fmt::Display for ChargerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Occupied => write!(f, "Occupied"),
            Self::OutOfService => write!(f, "OutOfService"),
        }
    }
}

/// A charger installed at an EV slot.
///
/// Created once at facility setup, never destroyed; the status is mutated only
/// through the pool's transition methods.
#[derive(Debug, Clone, Serialize)]
pub struct Charger {
    pub charger_id: String,
    pub connector_type: ConnectorType,
    pub max_kw: f64,
    pub status: ChargerStatus,
}

impl Charger {
    pub fn new(charger_id: impl Into<String>, connector_type: ConnectorType, max_kw: f64) -> Self {
        Self {
            charger_id: charger_id.into(),
            connector_type,
            max_kw,
            status: ChargerStatus::default(),
        }
    }
}

/// The facility's pool of chargers.
///
/// Backed by a vector so `find_available` walks chargers in stable
/// registration order.
#[derive(Debug, Default)]
pub struct ChargerPool {
    chargers: Vec<Charger>,
}

impl ChargerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new charger, initially `Available`.
    pub fn register(
        &mut self,
        charger_id: impl Into<String>,
        connector_type: ConnectorType,
        max_kw: f64,
    ) -> DomainResult<()> {
        let charger_id = charger_id.into();
        if self.get(&charger_id).is_some() {
            return Err(DomainError::DuplicateCharger(charger_id));
        }
        self.chargers
            .push(Charger::new(charger_id, connector_type, max_kw));
        Ok(())
    }

    /// First available charger in registration order, if any.
    pub fn find_available(&self) -> Option<&str> {
        self.chargers
            .iter()
            .find(|c| c.status == ChargerStatus::Available)
            .map(|c| c.charger_id.as_str())
    }

    /// Transition `Available` → `Occupied`.
    pub fn occupy(&mut self, charger_id: &str) -> DomainResult<()> {
        let charger = self.get_mut(charger_id)?;
        if charger.status != ChargerStatus::Available {
            return Err(DomainError::ChargerUnavailable {
                charger_id: charger.charger_id.clone(),
                status: charger.status,
            });
        }
        charger.status = ChargerStatus::Occupied;
        Ok(())
    }

    /// Transition back to `Available`.
    ///
    /// Idempotent: releasing an already-available charger is a no-op. An
    /// out-of-service charger stays out of service until
    /// [`ChargerPool::return_to_service`].
    pub fn release(&mut self, charger_id: &str) -> DomainResult<()> {
        let charger = self.get_mut(charger_id)?;
        if charger.status == ChargerStatus::Occupied {
            charger.status = ChargerStatus::Available;
        }
        Ok(())
    }

    /// Take a charger out of rotation for maintenance.
    pub fn mark_out_of_service(&mut self, charger_id: &str) -> DomainResult<()> {
        self.get_mut(charger_id)?.status = ChargerStatus::OutOfService;
        Ok(())
    }

    /// Put an out-of-service charger back into rotation.
    pub fn return_to_service(&mut self, charger_id: &str) -> DomainResult<()> {
        let charger = self.get_mut(charger_id)?;
        if charger.status == ChargerStatus::OutOfService {
            charger.status = ChargerStatus::Available;
        }
        Ok(())
    }

    /// Current status of a charger.
    pub fn status(&self, charger_id: &str) -> DomainResult<ChargerStatus> {
        Ok(self.get_or_err(charger_id)?.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charger> {
        self.chargers.iter()
    }

    pub fn len(&self) -> usize {
        self.chargers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chargers.is_empty()
    }

    fn get(&self, charger_id: &str) -> Option<&Charger> {
        self.chargers.iter().find(|c| c.charger_id == charger_id)
    }

    fn get_or_err(&self, charger_id: &str) -> DomainResult<&Charger> {
        self.get(charger_id)
            .ok_or_else(|| DomainError::ChargerNotFound(charger_id.to_string()))
    }

    fn get_mut(&mut self, charger_id: &str) -> DomainResult<&mut Charger> {
        self.chargers
            .iter_mut()
            .find(|c| c.charger_id == charger_id)
            .ok_or_else(|| DomainError::ChargerNotFound(charger_id.to_string()))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> ChargerPool {
        let mut pool = ChargerPool::new();
        pool.register("EV001", ConnectorType::Type2, 22.0).unwrap();
        pool.register("EV002", ConnectorType::Ccs, 50.0).unwrap();
        pool
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut pool = sample_pool();
        assert_eq!(
            pool.register("EV001", ConnectorType::Chademo, 100.0),
            Err(DomainError::DuplicateCharger("EV001".to_string()))
        );
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn find_available_follows_registration_order() {
        let mut pool = sample_pool();
        assert_eq!(pool.find_available(), Some("EV001"));
        pool.occupy("EV001").unwrap();
        assert_eq!(pool.find_available(), Some("EV002"));
        pool.occupy("EV002").unwrap();
        assert_eq!(pool.find_available(), None);
    }

    #[test]
    fn occupy_fails_when_already_occupied() {
        let mut pool = sample_pool();
        pool.occupy("EV001").unwrap();
        assert_eq!(
            pool.occupy("EV001"),
            Err(DomainError::ChargerUnavailable {
                charger_id: "EV001".to_string(),
                status: ChargerStatus::Occupied,
            })
        );
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = sample_pool();
        pool.occupy("EV001").unwrap();
        pool.release("EV001").unwrap();
        assert_eq!(pool.status("EV001").unwrap(), ChargerStatus::Available);
        // Releasing again is a no-op, not an error
        pool.release("EV001").unwrap();
        assert_eq!(pool.status("EV001").unwrap(), ChargerStatus::Available);
    }

    #[test]
    fn unknown_charger_is_reported() {
        let mut pool = sample_pool();
        let missing = DomainError::ChargerNotFound("EV999".to_string());
        assert_eq!(pool.occupy("EV999"), Err(missing.clone()));
        assert_eq!(pool.release("EV999"), Err(missing.clone()));
        assert_eq!(pool.status("EV999"), Err(missing));
    }

    #[test]
    fn out_of_service_is_skipped_and_sticky() {
        let mut pool = sample_pool();
        pool.mark_out_of_service("EV001").unwrap();
        assert_eq!(pool.find_available(), Some("EV002"));
        assert_eq!(
            pool.occupy("EV001"),
            Err(DomainError::ChargerUnavailable {
                charger_id: "EV001".to_string(),
                status: ChargerStatus::OutOfService,
            })
        );
        // Release does not override maintenance state
        pool.release("EV001").unwrap();
        assert_eq!(pool.status("EV001").unwrap(), ChargerStatus::OutOfService);
        pool.return_to_service("EV001").unwrap();
        assert_eq!(pool.status("EV001").unwrap(), ChargerStatus::Available);
    }
}
