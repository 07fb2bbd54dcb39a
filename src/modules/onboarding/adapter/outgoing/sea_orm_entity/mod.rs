pub mod media_assets;
pub mod profile_languages;
pub mod profile_rates;
pub mod profile_services;
pub mod profile_setups;
pub mod profiles;
pub mod subscriptions;
pub mod users;
