pub mod draft;
pub mod error;
pub mod generator;
pub mod model;
pub mod points;
pub mod roster;
pub mod rules;
pub mod squad;
pub mod validate;
