pub mod boolean;
pub mod codec;
pub mod config;
pub mod error;
pub mod fallback;
pub mod group;
pub mod registry;
pub mod report;

pub use boolean::normalize_boolean;
pub use codec::ValueCodec;
pub use config::{SettingDecl, SettingsManifest};
pub use error::CodecError;
pub use fallback::{FallbackConverter, FallbackRegistry};
pub use group::{apply_group, collect_group};
pub use registry::SerializerRegistry;
pub use report::{ConversionReporter, LogReporter};
