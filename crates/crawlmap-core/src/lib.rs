//! Crawlmap Core Types
//!
//! This crate provides the foundational geometry shared by the crawlmap
//! layout engine and its consumers:
//!
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`] and
//!   [`geometry::Bounds`] used for simulation space and viewport space.

pub mod geometry;
