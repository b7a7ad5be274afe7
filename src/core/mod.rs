pub mod address_space;
pub mod builder;
pub mod definition;
pub mod errors;
pub mod execution;
pub mod nodes;
pub mod types;
pub mod values;

#[cfg(test)]
mod tests;
