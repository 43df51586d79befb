pub mod mockito;
pub mod seed;
pub mod setup;
