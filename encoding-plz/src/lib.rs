pub mod chain;
pub mod content_encoding;
pub mod encoding_info;

pub use chain::{Classification, EncodingChain};
pub use content_encoding::ContentEncoding;
pub use encoding_info::EncodingInfo;
