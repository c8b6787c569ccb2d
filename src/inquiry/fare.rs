//! Car rental rate card

use crate::models::{CarRentalRequest, Nat, PricingMode, VehicleType};

/// Daily allowance added when a driver is requested
pub const DRIVER_ALLOWANCE_PER_DAY: u128 = 500;

/// Distance a driver covers in one working day, used to size the allowance
/// on per-kilometre trips
pub const KM_PER_DRIVER_DAY: u128 = 250;

pub fn rate_per_km(vehicle: VehicleType) -> u128 {
    match vehicle {
        VehicleType::Sedan => 12,
        VehicleType::Suv => 16,
    }
}

pub fn rate_per_day(vehicle: VehicleType) -> u128 {
    match vehicle {
        VehicleType::Sedan => 2500,
        VehicleType::Suv => 3500,
    }
}

/// Quote a fare for the request, or `None` when the estimate it depends on
/// was not provided or the arithmetic would overflow.
pub fn estimate_fare(request: &CarRentalRequest) -> Option<Nat> {
    let (base, days) = match request.pricing_mode.unwrap_or_default() {
        PricingMode::PerKm => {
            let km = request.estimated_distance?.get();
            let days = km.div_ceil(KM_PER_DRIVER_DAY).max(1);
            (km.checked_mul(rate_per_km(request.vehicle_type))?, days)
        }
        PricingMode::PerDay => {
            let days = request.estimated_days?.get();
            (days.checked_mul(rate_per_day(request.vehicle_type))?, days)
        }
    };

    let allowance = if request.driver_required {
        days.checked_mul(DRIVER_ALLOWANCE_PER_DAY)?
    } else {
        0
    };

    base.checked_add(allowance).map(Nat::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: PricingMode, distance: Option<u128>, days: Option<u128>) -> CarRentalRequest {
        CarRentalRequest {
            vehicle_type: VehicleType::Sedan,
            driver_required: false,
            estimated_distance: distance.map(Nat::new),
            pricing_mode: Some(mode),
            estimated_days: days.map(Nat::new),
        }
    }

    #[test]
    fn test_per_km_fare() {
        let fare = estimate_fare(&request(PricingMode::PerKm, Some(100), None));
        assert_eq!(fare, Some(Nat::new(1200)));
    }

    #[test]
    fn test_per_km_driver_allowance_by_day() {
        let mut req = request(PricingMode::PerKm, Some(300), None);
        req.vehicle_type = VehicleType::Suv;
        req.driver_required = true;
        // 300 km at 16 plus two driver days
        assert_eq!(estimate_fare(&req), Some(Nat::new(4800 + 1000)));
    }

    #[test]
    fn test_per_day_fare() {
        let mut req = request(PricingMode::PerDay, None, Some(3));
        req.driver_required = true;
        assert_eq!(estimate_fare(&req), Some(Nat::new(7500 + 1500)));
    }

    #[test]
    fn test_missing_estimate_yields_no_quote() {
        assert_eq!(estimate_fare(&request(PricingMode::PerKm, None, Some(3))), None);
        assert_eq!(estimate_fare(&request(PricingMode::PerDay, Some(50), None)), None);
    }

    #[test]
    fn test_mode_defaults_to_per_km() {
        let mut req = request(PricingMode::PerKm, Some(10), None);
        req.pricing_mode = None;
        assert_eq!(estimate_fare(&req), Some(Nat::new(120)));
    }

    #[test]
    fn test_overflow_yields_no_quote() {
        let req = request(PricingMode::PerDay, None, Some(u128::MAX));
        assert_eq!(estimate_fare(&req), None);
    }
}
