//! Vehicle records and the closed vehicle-kind taxonomy

use serde::Serialize;

use super::error::{DomainError, DomainResult};

/// Vehicle kind accepted by the facility.
///
/// A closed set: placement rules and charging eligibility are derived from the
/// kind by exhaustive match, never from per-vehicle flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleKind {
    Car,
    Truck,
    Motorcycle,
    Bus,
    ElectricCar,
    ElectricBike,
}

impl VehicleKind {
    /// Electric kinds park in EV slots and may hold a charging session.
    pub fn is_electric(self) -> bool {
        matches!(self, Self::ElectricCar | Self::ElectricBike)
    }

    /// Regular-slot units consumed when parked.
    ///
    /// EV slots are single-vehicle by construction, so this only matters for
    /// non-electric kinds.
    pub fn space_requirement(self) -> usize {
        match self {
            Self::Bus => 2,
            Self::Truck => 3,
            Self::Car | Self::Motorcycle | Self::ElectricCar | Self::ElectricBike => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Motorcycle => "Motorcycle",
            Self::Bus => "Bus",
            Self::ElectricCar => "ElectricCar",
            Self::ElectricBike => "ElectricBike",
        }
    }

    /// Parse a presentation-layer kind selector.
    ///
    /// Case-insensitive; `-` and `_` separators are accepted. Anything outside
    /// the closed set fails with [`DomainError::UnknownKind`].
    pub fn parse(selector: &str) -> DomainResult<Self> {
        let normalized: String = selector
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "car" => Ok(Self::Car),
            "truck" => Ok(Self::Truck),
            "motorcycle" => Ok(Self::Motorcycle),
            "bus" => Ok(Self::Bus),
            "electriccar" => Ok(Self::ElectricCar),
            "electricbike" => Ok(Self::ElectricBike),
            _ => Err(DomainError::UnknownKind(selector.to_string())),
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle admitted to the facility.
///
/// Identity is the registration id, unique among currently parked vehicles.
/// The record is owned by whichever slot array holds it; charging sessions
/// reference it by registration id only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub registration_id: String,
    pub make: String,
    pub model: String,
    pub color: String,
    pub kind: VehicleKind,
    /// Charge level in percent, `Some` for electric kinds only.
    charge: Option<f64>,
}

impl Vehicle {
    /// Construct a vehicle record (the registry factory).
    ///
    /// `initial_charge` is ignored for non-electric kinds and defaults to 0
    /// for electric ones. The stored level is clamped to [0, 100].
    pub fn new(
        kind: VehicleKind,
        registration_id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
        initial_charge: Option<f64>,
    ) -> Self {
        let charge = kind
            .is_electric()
            .then(|| clamp_charge(initial_charge.unwrap_or(0.0)));
        Self {
            registration_id: registration_id.into(),
            make: make.into(),
            model: model.into(),
            color: color.into(),
            kind,
            charge,
        }
    }

    /// Current charge level in percent; `None` for non-electric kinds.
    pub fn charge(&self) -> Option<f64> {
        self.charge
    }

    /// Set the charge level, clamped to [0, 100]. No-op for non-electric kinds.
    pub fn set_charge(&mut self, value: f64) {
        if let Some(charge) = self.charge.as_mut() {
            *charge = clamp_charge(value);
        }
    }

    /// Raise (or lower) the charge level by `delta` percent, clamped to [0, 100].
    pub fn add_charge(&mut self, delta: f64) {
        if let Some(charge) = self.charge.as_mut() {
            *charge = clamp_charge(*charge + delta);
        }
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {} ({})",
            self.kind, self.make, self.model, self.registration_id
        )?;
        if let Some(charge) = self.charge {
            write!(f, " [Charge: {}%]", charge)?;
        }
        Ok(())
    }
}

fn clamp_charge(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_requirements_per_kind() {
        assert_eq!(VehicleKind::Car.space_requirement(), 1);
        assert_eq!(VehicleKind::Motorcycle.space_requirement(), 1);
        assert_eq!(VehicleKind::ElectricCar.space_requirement(), 1);
        assert_eq!(VehicleKind::ElectricBike.space_requirement(), 1);
        assert_eq!(VehicleKind::Bus.space_requirement(), 2);
        assert_eq!(VehicleKind::Truck.space_requirement(), 3);
    }

    #[test]
    fn electric_kinds() {
        assert!(VehicleKind::ElectricCar.is_electric());
        assert!(VehicleKind::ElectricBike.is_electric());
        assert!(!VehicleKind::Car.is_electric());
        assert!(!VehicleKind::Bus.is_electric());
    }

    #[test]
    fn parse_selector() {
        assert_eq!(VehicleKind::parse("car").unwrap(), VehicleKind::Car);
        assert_eq!(
            VehicleKind::parse("electric_car").unwrap(),
            VehicleKind::ElectricCar
        );
        assert_eq!(
            VehicleKind::parse("Electric-Bike").unwrap(),
            VehicleKind::ElectricBike
        );
        assert_eq!(
            VehicleKind::parse("hovercraft"),
            Err(DomainError::UnknownKind("hovercraft".to_string()))
        );
    }

    #[test]
    fn non_electric_has_no_charge() {
        let mut car = Vehicle::new(VehicleKind::Car, "KDA001", "Toyota", "Corolla", "Red", None);
        assert_eq!(car.charge(), None);
        car.set_charge(50.0);
        assert_eq!(car.charge(), None);
    }

    #[test]
    fn electric_charge_defaults_to_zero() {
        let ev = Vehicle::new(
            VehicleKind::ElectricCar,
            "TESLA1",
            "Tesla",
            "Model 3",
            "White",
            None,
        );
        assert_eq!(ev.charge(), Some(0.0));
    }

    #[test]
    fn charge_is_clamped_on_every_write() {
        let mut ev = Vehicle::new(
            VehicleKind::ElectricBike,
            "EB001",
            "Zero",
            "FXE",
            "Black",
            Some(150.0),
        );
        assert_eq!(ev.charge(), Some(100.0));
        ev.set_charge(-20.0);
        assert_eq!(ev.charge(), Some(0.0));
        ev.add_charge(30.5);
        assert_eq!(ev.charge(), Some(30.5));
        ev.add_charge(1000.0);
        assert_eq!(ev.charge(), Some(100.0));
        ev.add_charge(-250.0);
        assert_eq!(ev.charge(), Some(0.0));
    }

    #[test]
    fn display_includes_charge_for_electric_only() {
        let car = Vehicle::new(VehicleKind::Car, "KDA001", "Toyota", "Corolla", "Red", None);
        assert_eq!(car.to_string(), "Car: Toyota Corolla (KDA001)");
        let ev = Vehicle::new(
            VehicleKind::ElectricCar,
            "TESLA1",
            "Tesla",
            "Model 3",
            "White",
            Some(85.5),
        );
        assert_eq!(
            ev.to_string(),
            "ElectricCar: Tesla Model 3 (TESLA1) [Charge: 85.5%]"
        );
    }
}
