pub mod appointment;
pub mod billing_record;
pub mod drug;
pub mod inventory_item;
pub mod lab_test;
pub mod patient;
pub mod staff;
pub mod user;
