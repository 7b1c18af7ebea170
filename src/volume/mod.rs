pub mod io;
pub mod stats;
pub mod traits;
pub mod u8;

pub use self::io::GrayVolumeU8;
pub use self::stats::VolumeStats;
pub use self::traits::VolumeView;
pub use self::u8::VolumeU8;
