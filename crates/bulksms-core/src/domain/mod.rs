pub mod contact;
pub mod country;
pub mod gateway;
pub mod ids;
pub mod phone;

pub use contact::{Contact, ContactStatus};
pub use country::{known_country, CountryCode, KnownCountry, KNOWN_COUNTRIES};
pub use gateway::{GatewayConfig, GatewayMode};
pub use ids::ContactId;
pub use phone::{normalize_phone, validate_canonical_phone};
