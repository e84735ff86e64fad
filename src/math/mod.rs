//! Value types for points, directions and transforms.
//!
//! Everything in here is `Copy` and side-effect free.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
pub mod vec5;
