pub mod entities;
pub mod errors;
pub mod filtering;
pub mod value_objects;
