//! Tilegrid Core Types and Definitions
//!
//! This crate provides the foundational value types shared by the Tilegrid
//! layout solver and the workspace built on top of it. It includes:
//!
//! - **Segments**: Real-valued stack intervals and integer grid intervals ([`segment`] module)
//! - **Geometry**: Stack, grid and screen rectangles ([`geometry`] module)
//! - **Scale**: Screen-to-grid mapping along one axis ([`scale::GridScale`])
//! - **Bounds**: Hit-testing of box edges and corners ([`bound`] module)
//! - **Colors**: CSS color handling for rendering ([`color::Color`])

pub mod bound;
pub mod color;
pub mod geometry;
pub mod scale;
pub mod segment;
