//! Register definitions for the ADXL345 and L3G4200D
//!
//! Configuration registers with bit fields are generated with
//! `device-driver`. Sample and offset-trim bytes are plain two's-complement
//! bytes, so only their addresses are listed here; the drivers read them one
//! byte per transaction and decode them with [`crate::twos_complement`].

pub mod adxl345;
pub mod l3g4200d;

pub use adxl345::Adxl345Registers;
pub use l3g4200d::L3g4200dRegisters;
