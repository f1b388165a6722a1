pub mod record;
pub mod wall_clock;
pub mod zone;

pub use record::{NonTemporalField, RecordId, StoredRecord};
pub use wall_clock::WallClockValue;
pub use zone::ZoneLabel;
