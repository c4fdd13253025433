pub mod extract;
pub mod resolve;

pub use extract::extract_urls;
pub use resolve::{ensure_language_dir, file_name, language_code, VoiceAsset};
