//! Hazardous materials: functionality which can be misused and needs to be used with care.
//!
//! <div class="warning">
//! Functionality provided in this module is low-level and intended for constructing higher-level
//! primitives as opposed to being used directly.
//! </div>

pub use crate::{
    block::xor_in_place,
    gf::{Field, R64, R128, R256, R512, R1024, mul128},
};
