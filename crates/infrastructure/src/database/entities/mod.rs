pub mod attendance_dates;
pub mod attendance_register;
pub mod attendant_evaluations;
pub mod captains;
pub mod credit_collections;
pub mod credit_sales;
pub mod customers;
pub mod employees;
pub mod fuel_sales;
pub mod pump_targets;
pub mod shop_sales;
pub mod shop_targets;
pub mod users;
pub mod weekly_evaluations;
