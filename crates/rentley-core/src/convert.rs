// ── Wire-to-domain conversions ──
//
// DTO shapes stay in rentley-api; everything consumer-facing goes
// through these From impls so optionality and nesting quirks are
// normalized in one place.

use rentley_api::types::{LocationDto, RentalDto, UserDto, VehicleDto};

use crate::model::{
    Location, Principal, Rental, RentalStatus, RoleRef, Vehicle, VehicleStatus,
};

impl From<UserDto> for Principal {
    fn from(dto: UserDto) -> Self {
        Self {
            user_id: dto.user_id,
            username: dto.username,
            first_name: dto.first_name.unwrap_or_default(),
            last_name: dto.last_name.unwrap_or_default(),
            email: dto.email,
            phone_number: dto.phone_number,
            role: dto.user_role.map(|r| RoleRef {
                id: r.role_id,
                name: r.role_name,
            }),
            role_name: dto.role,
        }
    }
}

impl From<LocationDto> for Location {
    fn from(dto: LocationDto) -> Self {
        Self {
            id: dto.location_id,
            name: dto.location_name,
            address: dto.address,
            city: dto.city.map(|c| c.city_name),
        }
    }
}

impl From<VehicleDto> for Vehicle {
    fn from(dto: VehicleDto) -> Self {
        let (brand, model, year) = match dto.model {
            Some(m) => (
                m.brand.map(|b| b.brand_name),
                Some(m.model_name),
                m.year,
            ),
            None => (None, None, None),
        };

        Self {
            id: dto.vehicle_id,
            registration: dto.vehicle_registration,
            daily_rate: dto.daily_rental_rate,
            brand,
            model,
            year,
            color: dto.color,
            mileage: dto.mileage,
            status: dto.current_status.map(|s| VehicleStatus {
                name: s.status_name,
                available_for_rent: s.is_available_for_rent,
            }),
            location: dto.current_location.map(Location::from),
        }
    }
}

impl From<RentalDto> for Rental {
    fn from(dto: RentalDto) -> Self {
        let (status, status_name) = match dto.rental_status {
            Some(s) => (RentalStatus::from_id(s.status_id), Some(s.status_name)),
            None => (None, None),
        };

        let (vehicle_label, vehicle_registration) = match dto.vehicle {
            Some(v) => {
                let v = Vehicle::from(v);
                (Some(v.label()), Some(v.registration))
            }
            None => (None, None),
        };

        Self {
            id: dto.rental_id,
            planned_pickup: dto.planned_pickup_date,
            planned_return: dto.planned_return_date,
            total_amount: dto.total_amount,
            status,
            status_name,
            vehicle_label,
            vehicle_registration,
            customer_name: dto.customer.map(|c| Principal::from(c).display_name()),
            pickup_location: dto.pickup_location.map(|l| l.location_name),
            return_location: dto.return_location.map(|l| l.location_name),
            notes: dto.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rentley_api::types::UserRoleDto;

    fn user_dto() -> UserDto {
        serde_json::from_value(serde_json::json!({
            "userId": 7,
            "username": "ayse",
            "firstName": "Ayşe",
            "lastName": "Demir"
        }))
        .expect("valid user dto")
    }

    #[test]
    fn user_with_structured_role_converts() {
        let mut dto = user_dto();
        dto.user_role = Some(UserRoleDto {
            role_id: 2,
            role_name: "Mudur".into(),
            description: None,
        });

        let principal = Principal::from(dto);
        assert_eq!(principal.raw_role_name(), Some("Mudur"));
        assert_eq!(principal.display_name(), "Ayşe Demir");
    }

    #[test]
    fn rental_with_unknown_status_id_keeps_raw_name() {
        let dto: RentalDto = serde_json::from_value(serde_json::json!({
            "rentalId": 42,
            "rentalStatus": { "statusId": 9, "statusName": "Quarantined" }
        }))
        .expect("valid rental dto");

        let rental = Rental::from(dto);
        assert_eq!(rental.status, None);
        assert_eq!(rental.status_label(), "Quarantined");
    }
}
