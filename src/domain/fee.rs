//! Parking fee strategy

use rust_decimal::Decimal;

use super::vehicle::VehicleKind;

/// Pluggable pricing strategy consulted when a vehicle is parked.
pub trait FeeStrategy: Send + Sync {
    /// Parking fee for a vehicle category.
    fn fee_for(&self, kind: VehicleKind) -> Decimal;
}

/// Flat fees: one price for regular vehicles, a discounted one for electric.
#[derive(Debug, Clone)]
pub struct FlatRateFee {
    pub regular: Decimal,
    pub electric: Decimal,
}

impl Default for FlatRateFee {
    fn default() -> Self {
        Self {
            regular: Decimal::new(100, 0),
            electric: Decimal::new(50, 0),
        }
    }
}

impl FeeStrategy for FlatRateFee {
    fn fee_for(&self, kind: VehicleKind) -> Decimal {
        if kind.is_electric() {
            self.electric
        } else {
            self.regular
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electric_kinds_get_the_discounted_fee() {
        let fees = FlatRateFee::default();
        assert_eq!(fees.fee_for(VehicleKind::Car), Decimal::new(100, 0));
        assert_eq!(fees.fee_for(VehicleKind::Truck), Decimal::new(100, 0));
        assert_eq!(fees.fee_for(VehicleKind::ElectricCar), Decimal::new(50, 0));
        assert_eq!(fees.fee_for(VehicleKind::ElectricBike), Decimal::new(50, 0));
    }
}
