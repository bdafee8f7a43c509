//! Customer model
//!
//! Customers are inert reference data for the booking core: the protocols
//! only need a stable key to attach to bookings. The full field set is kept
//! for the front-desk screens.

use serde::{Deserialize, Serialize};

fn default_members() -> u32 {
    1
}

fn default_id_type() -> String {
    "Aadhaar".to_string()
}

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub guest_name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub mobile_number: String,
    /// Party size
    #[serde(default = "default_members")]
    pub members_count: u32,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    /// Free-text amount field maintained by the desk staff
    #[serde(default)]
    pub amount: String,
    #[serde(default = "default_id_type")]
    pub id_type: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub id_image_urls: Vec<String>,
    /// Comma-separated room numbers chosen at check-in (legacy field,
    /// still read by the booking-detail view)
    #[serde(default)]
    pub selected_rooms: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl CustomerRecord {
    /// Room numbers parsed out of the `selected_rooms` CSV
    pub fn selected_room_numbers(&self) -> Vec<u32> {
        self.selected_rooms
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }
}

/// Create-customer payload accepted by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub guest_name: String,
    #[serde(default)]
    pub father_name: String,
    pub mobile_number: String,
    #[serde(default = "default_members")]
    pub members_count: u32,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub id_image_urls: Vec<String>,
    #[serde(default)]
    pub selected_rooms: String,
}

impl CustomerCreate {
    /// Build the stored record, stamping timestamps
    pub fn into_record(self, now_ms: i64) -> CustomerRecord {
        CustomerRecord {
            guest_name: self.guest_name,
            father_name: self.father_name,
            mobile_number: self.mobile_number,
            members_count: self.members_count,
            vehicle_number: self.vehicle_number,
            address: self.address,
            city: self.city,
            amount: self.amount,
            id_type: default_id_type(),
            id_number: self.id_number,
            id_image_urls: self.id_image_urls,
            selected_rooms: self.selected_rooms,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_rooms_csv_parses_loosely() {
        let customer: CustomerRecord = serde_json::from_str(
            r#"{"guest_name": "Guest", "selected_rooms": "3, 4, x, 11"}"#,
        )
        .unwrap();
        assert_eq!(customer.selected_room_numbers(), vec![3, 4, 11]);
    }

    #[test]
    fn partial_record_gets_defaults() {
        let customer: CustomerRecord =
            serde_json::from_str(r#"{"guest_name": "Guest"}"#).unwrap();
        assert_eq!(customer.members_count, 1);
        assert_eq!(customer.id_type, "Aadhaar");
        assert!(customer.selected_room_numbers().is_empty());
    }
}
