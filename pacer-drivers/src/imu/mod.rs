//! Inertial measurement unit drivers

pub mod lsm6ds;

pub use lsm6ds::Lsm6ds;
