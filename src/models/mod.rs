// Domain models

mod counters;
mod palette;
mod series;
mod snapshot;

pub use counters::{ByteCounters, CounterSnapshot};
pub use palette::{Appearance, ColorScheme, DARK, EMPTY_RECTANGLE, LIGHT, Rgba};
pub use series::MetricSeries;
pub use snapshot::{HostInfo, MemoryInfo, SystemSnapshot, TickSample, UNKNOWN_CPU};
