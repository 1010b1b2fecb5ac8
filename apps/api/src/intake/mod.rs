// Upload Intake: the client side of the two gateways.
// Holds the per-session view model; no business logic beyond orchestration.

pub mod client;
pub mod schema;
pub mod session;
