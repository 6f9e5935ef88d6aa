//! Embassy async tasks
//!
//! Tasks share the stitch controller by `&'static` reference; it owns the
//! queue and trigger signal between them.

pub mod needle_sensor;
pub mod status;
pub mod stitch_worker;
pub mod test_pattern;

pub use needle_sensor::needle_sensor_task;
pub use status::status_task;
pub use stitch_worker::stitch_worker_task;
pub use test_pattern::test_pattern_task;
