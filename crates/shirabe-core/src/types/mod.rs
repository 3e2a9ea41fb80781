pub mod episode;
pub mod format;
pub mod result;

pub use episode::Identification;
pub use format::Format3D;
pub use result::EpisodeInfo;
