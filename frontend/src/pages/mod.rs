pub mod dashboard;
pub mod login;
pub mod password_recovery;
pub mod profile;
pub mod register;
pub mod reservations;
pub mod vehicles;
