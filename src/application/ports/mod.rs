//! Ports - interfaces the application requires from the outside world

pub mod outbound;
