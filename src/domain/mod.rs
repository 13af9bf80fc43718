// Domain layer: book/member records and the clock port. No I/O.

pub mod model;
pub mod ports;
