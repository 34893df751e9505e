/// Router Module Index
///
/// Organizes the application's routing logic by concern. Access control is not
/// decided here: the product router declares every catalog route, and the
/// mutation handlers themselves require the admin role via the access guard, so
/// a route cannot end up writable by accident when the modules are re-wired.

/// Session endpoints (login, logout, refresh) and the health probe.
pub mod public;

/// Catalog endpoints. Reads are anonymous; mutations demand the admin role.
pub mod products;
