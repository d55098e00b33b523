#[allow(non_snake_case)]
pub mod Chemistry;
#[allow(non_snake_case)]
pub mod Quantities;
#[allow(non_snake_case)]
pub mod Utils;
pub mod calculations;
pub mod calculator_api;
pub mod cli;
pub mod errors;
pub mod settings;
