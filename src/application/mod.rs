//! Application layer - ports, stage services and the generation pipeline

pub mod dto;
pub mod ports;
pub mod services;
