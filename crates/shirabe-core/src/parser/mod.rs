pub mod episode_path;
pub mod expression;
pub mod extension;
pub mod flags;
pub mod format3d;

pub use episode_path::{EpisodePathParser, PathParseResult};
pub use expression::{CompiledExpression, ExpressionMatch};
pub use extension::{ExtensionClassifier, FileClass};
pub use flags::FlagExtractor;
pub use format3d::Format3DDetector;
