//! Format implementations
//!
//! Each submodule implements one external format. Decode-capable formats
//! provide a `parser`, encode-capable ones a `serializer`; the `mod.rs` of
//! each wires them into a [`Format`](crate::format::Format) implementation.

pub mod html;
pub mod legacy;
pub mod markdown;
pub mod ooxml;
pub mod rtf;
