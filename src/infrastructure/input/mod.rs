//! Input synthesis adapters

pub mod enigo;

pub use self::enigo::EnigoPasteSynthesizer;
