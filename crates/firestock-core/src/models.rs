//! Inventory entities exchanged with the backend.
//!
//! Wire format is camelCase JSON; enum values are SCREAMING_SNAKE_CASE.
//! Create and update requests share one input type per entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::overlap::{has_overlap, AssignmentInterval};

// =============================================================================
// CATALOG
// =============================================================================

/// A kind of equipment, e.g. "Fire helmet F1".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A concrete size/model of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub maintenance_interval_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub product_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_interval_days: Option<u32>,
}

// =============================================================================
// ITEMS AND LOCATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Available,
    Assigned,
    InMaintenance,
    Defective,
    Retired,
}

/// One physical piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub variant_id: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub inventory_number: Option<String>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_maintenance_due: Option<DateTime<Utc>>,
}

impl Item {
    /// Whether the next maintenance date has passed at `now`.
    pub fn is_maintenance_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_due.is_some_and(|due| due < now)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    pub variant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_number: Option<String>,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<DateTime<Utc>>,
}

/// A storage location (station, room, shelf, vehicle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

// =============================================================================
// PEOPLE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
}

impl Person {
    /// "Last, First" as shown in lists.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

// =============================================================================
// MAINTENANCE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceKind {
    #[default]
    Inspection,
    Cleaning,
    Repair,
    PressureTest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub item_id: String,
    pub kind: MaintenanceKind,
    pub performed_at: DateTime<Utc>,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub next_due: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInput {
    pub item_id: String,
    pub kind: MaintenanceKind,
    pub performed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due: Option<DateTime<Utc>>,
}

// =============================================================================
// ORDERS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Open,
    Ordered,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPosition {
    pub variant_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub person_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub positions: Vec<OrderPosition>,
}

impl Order {
    /// Sum of position quantities.
    pub fn total_quantity(&self) -> u32 {
        self.positions.iter().map(|p| p.quantity).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub positions: Vec<OrderPosition>,
}

// =============================================================================
// APPOINTMENTS AND VISITS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentKind {
    #[default]
    Fitting,
    Handover,
    Return,
    Visit,
}

/// A scheduled appointment at the equipment store, or a recorded visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub kind: AppointmentKind,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub kind: AppointmentKind,
    pub starts_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

/// An item handed to a person or placed at a location for a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAssignment {
    pub id: String,
    pub item_id: String,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    pub assigned_from: DateTime<Utc>,
    #[serde(default)]
    pub assigned_until: Option<DateTime<Utc>>,
}

impl ItemAssignment {
    pub fn interval(&self) -> AssignmentInterval {
        AssignmentInterval::new(self.id.clone(), self.assigned_from, self.assigned_until)
    }

    pub fn is_active(&self) -> bool {
        self.assigned_until.is_none()
    }
}

impl From<&ItemAssignment> for AssignmentInterval {
    fn from(a: &ItemAssignment) -> Self {
        a.interval()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAssignmentInput {
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub assigned_from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_until: Option<DateTime<Utc>>,
}

impl ItemAssignmentInput {
    /// Whether this range collides with another assignment of the same item.
    ///
    /// `editing_id` is the assignment being edited, if any; it never counts
    /// against itself.
    pub fn conflicts_with(&self, existing: &[ItemAssignment], editing_id: Option<&str>) -> bool {
        let intervals: Vec<AssignmentInterval> = existing
            .iter()
            .filter(|a| a.item_id == self.item_id)
            .map(AssignmentInterval::from)
            .collect();
        has_overlap(
            self.assigned_from,
            self.assigned_until,
            &intervals,
            editing_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn assignment(id: &str, item: &str, from: DateTime<Utc>, until: Option<DateTime<Utc>>) -> ItemAssignment {
        ItemAssignment {
            id: id.to_string(),
            item_id: item.to_string(),
            person_id: Some("p-1".to_string()),
            location_id: None,
            assigned_from: from,
            assigned_until: until,
        }
    }

    #[test]
    fn test_item_deserializes_with_defaults() {
        let item: Item = serde_json::from_str(r#"{"id":"i-1","variantId":"v-1"}"#).unwrap();
        assert_eq!(item.status, ItemStatus::Available);
        assert!(item.serial_number.is_none());
    }

    #[test]
    fn test_item_status_wire_format() {
        let json = serde_json::to_string(&ItemStatus::InMaintenance).unwrap();
        assert_eq!(json, "\"IN_MAINTENANCE\"");
    }

    #[test]
    fn test_item_maintenance_overdue() {
        let mut item: Item = serde_json::from_str(r#"{"id":"i-1","variantId":"v-1"}"#).unwrap();
        assert!(!item.is_maintenance_overdue(day(2024, 6, 1)));
        item.next_maintenance_due = Some(day(2024, 5, 1));
        assert!(item.is_maintenance_overdue(day(2024, 6, 1)));
    }

    #[test]
    fn test_person_display_name() {
        let person = Person {
            id: "p-1".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Berg".to_string(),
            email: None,
            department_id: None,
        };
        assert_eq!(person.display_name(), "Berg, Anna");
    }

    #[test]
    fn test_input_skips_absent_fields() {
        let input = ProductInput {
            name: "Helmet".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Helmet" }));
    }

    #[test]
    fn test_order_total_quantity() {
        let order = Order {
            id: "o-1".to_string(),
            status: OrderStatus::Open,
            ordered_at: day(2024, 1, 1),
            supplier: None,
            positions: vec![
                OrderPosition {
                    variant_id: "v-1".to_string(),
                    quantity: 3,
                    person_id: None,
                },
                OrderPosition {
                    variant_id: "v-2".to_string(),
                    quantity: 2,
                    person_id: None,
                },
            ],
        };
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn test_assignment_conflict_same_item() {
        let existing = vec![assignment("a-1", "i-1", day(2024, 1, 1), None)];
        let input = ItemAssignmentInput {
            item_id: "i-1".to_string(),
            assigned_from: day(2024, 3, 1),
            ..Default::default()
        };
        assert!(input.conflicts_with(&existing, None));
    }

    #[test]
    fn test_assignment_other_item_does_not_conflict() {
        let existing = vec![assignment("a-1", "i-2", day(2024, 1, 1), None)];
        let input = ItemAssignmentInput {
            item_id: "i-1".to_string(),
            assigned_from: day(2024, 3, 1),
            ..Default::default()
        };
        assert!(!input.conflicts_with(&existing, None));
    }

    #[test]
    fn test_editing_assignment_ignores_itself() {
        let existing = vec![assignment(
            "a-1",
            "i-1",
            day(2024, 1, 1),
            Some(day(2024, 2, 1)),
        )];
        let input = ItemAssignmentInput {
            item_id: "i-1".to_string(),
            assigned_from: day(2024, 1, 1),
            assigned_until: Some(day(2024, 2, 15)),
            ..Default::default()
        };
        assert!(!input.conflicts_with(&existing, Some("a-1")));
    }
}
