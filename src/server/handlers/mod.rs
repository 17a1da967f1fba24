pub mod geocoding;
pub mod recommendations;
pub mod routes;
