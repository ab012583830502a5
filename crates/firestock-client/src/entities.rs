//! Endpoint bindings for the inventory entity families.

use std::sync::Arc;

use firestock_core::{
    Appointment, AppointmentInput, Department, DepartmentInput, Item, ItemAssignment,
    ItemAssignmentInput, ItemInput, Location, LocationInput, MaintenanceInput, MaintenanceRecord,
    Order, OrderInput, Person, PersonInput, Product, ProductInput, Variant, VariantInput,
};

use crate::controller::PaginatedListController;
use crate::endpoints::RestEndpoints;
use crate::transport::HttpTransport;

// =============================================================================
// COLLECTION PATHS
// =============================================================================

pub const PRODUCTS: &str = "/products";
pub const VARIANTS: &str = "/variants";
pub const ITEMS: &str = "/items";
pub const LOCATIONS: &str = "/locations";
pub const PERSONS: &str = "/persons";
pub const DEPARTMENTS: &str = "/departments";
pub const MAINTENANCE: &str = "/maintenance";
pub const ORDERS: &str = "/orders";
pub const APPOINTMENTS: &str = "/appointments";
pub const ITEM_ASSIGNMENTS: &str = "/item-assignments";

/// Every collection path, for listings and CLI help.
pub const ALL_PATHS: [&str; 10] = [
    PRODUCTS,
    VARIANTS,
    ITEMS,
    LOCATIONS,
    PERSONS,
    DEPARTMENTS,
    MAINTENANCE,
    ORDERS,
    APPOINTMENTS,
    ITEM_ASSIGNMENTS,
];

// =============================================================================
// ENDPOINT TYPES
// =============================================================================

pub type ProductEndpoints = RestEndpoints<Product, ProductInput>;
pub type VariantEndpoints = RestEndpoints<Variant, VariantInput>;
pub type ItemEndpoints = RestEndpoints<Item, ItemInput>;
pub type LocationEndpoints = RestEndpoints<Location, LocationInput>;
pub type PersonEndpoints = RestEndpoints<Person, PersonInput>;
pub type DepartmentEndpoints = RestEndpoints<Department, DepartmentInput>;
pub type MaintenanceEndpoints = RestEndpoints<MaintenanceRecord, MaintenanceInput>;
pub type OrderEndpoints = RestEndpoints<Order, OrderInput>;
pub type AppointmentEndpoints = RestEndpoints<Appointment, AppointmentInput>;
pub type ItemAssignmentEndpoints = RestEndpoints<ItemAssignment, ItemAssignmentInput>;

// =============================================================================
// CONTROLLER TYPES
// =============================================================================

pub type ProductList = PaginatedListController<ProductEndpoints>;
pub type VariantList = PaginatedListController<VariantEndpoints>;
pub type ItemList = PaginatedListController<ItemEndpoints>;
pub type LocationList = PaginatedListController<LocationEndpoints>;
pub type PersonList = PaginatedListController<PersonEndpoints>;
pub type DepartmentList = PaginatedListController<DepartmentEndpoints>;
pub type MaintenanceList = PaginatedListController<MaintenanceEndpoints>;
pub type OrderList = PaginatedListController<OrderEndpoints>;
pub type AppointmentList = PaginatedListController<AppointmentEndpoints>;
pub type ItemAssignmentList = PaginatedListController<ItemAssignmentEndpoints>;

// =============================================================================
// CONSTRUCTORS
// =============================================================================

pub fn products(transport: Arc<HttpTransport>) -> ProductEndpoints {
    RestEndpoints::new(transport, PRODUCTS)
}

pub fn variants(transport: Arc<HttpTransport>) -> VariantEndpoints {
    RestEndpoints::new(transport, VARIANTS)
}

pub fn items(transport: Arc<HttpTransport>) -> ItemEndpoints {
    RestEndpoints::new(transport, ITEMS)
}

pub fn locations(transport: Arc<HttpTransport>) -> LocationEndpoints {
    RestEndpoints::new(transport, LOCATIONS)
}

pub fn persons(transport: Arc<HttpTransport>) -> PersonEndpoints {
    RestEndpoints::new(transport, PERSONS)
}

pub fn departments(transport: Arc<HttpTransport>) -> DepartmentEndpoints {
    RestEndpoints::new(transport, DEPARTMENTS)
}

pub fn maintenance(transport: Arc<HttpTransport>) -> MaintenanceEndpoints {
    RestEndpoints::new(transport, MAINTENANCE)
}

pub fn orders(transport: Arc<HttpTransport>) -> OrderEndpoints {
    RestEndpoints::new(transport, ORDERS)
}

pub fn appointments(transport: Arc<HttpTransport>) -> AppointmentEndpoints {
    RestEndpoints::new(transport, APPOINTMENTS)
}

pub fn item_assignments(transport: Arc<HttpTransport>) -> ItemAssignmentEndpoints {
    RestEndpoints::new(transport, ITEM_ASSIGNMENTS)
}

/// Map a user-facing name ("products", "item-assignments", "/orders") to its
/// collection path.
pub fn resolve_path(name: &str) -> Option<&'static str> {
    let wanted = name.trim().trim_matches('/').to_ascii_lowercase().replace('_', "-");
    ALL_PATHS
        .iter()
        .copied()
        .find(|path| path.trim_start_matches('/') == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use firestock_core::CrudEndpoints;

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("products"), Some(PRODUCTS));
        assert_eq!(resolve_path("/Orders/"), Some(ORDERS));
        assert_eq!(resolve_path("item_assignments"), Some(ITEM_ASSIGNMENTS));
        assert_eq!(resolve_path("vehicles"), None);
    }

    #[test]
    fn test_constructors_use_collection_paths() {
        let transport = Arc::new(HttpTransport::new(ClientConfig::default()).unwrap());
        assert_eq!(products(transport.clone()).name(), PRODUCTS);
        assert_eq!(item_assignments(transport.clone()).name(), ITEM_ASSIGNMENTS);
        assert_eq!(maintenance(transport).name(), MAINTENANCE);
    }
}
