//! Domain core for the agro registry.
//!
//! Pure validation logic with no I/O: tax identifiers (CPF / CNPJ), land
//! allocation rules for farms, the Brazilian state code set, and the
//! report type that entity handlers accumulate violations into.

pub mod error;
pub mod land_allocation;
pub mod states;
pub mod tax_id;
pub mod types;
pub mod validation;
