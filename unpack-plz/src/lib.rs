pub mod body;
pub mod closer;
pub mod config;
pub mod decoded;
pub mod decompression;
pub mod error;
pub mod limit;
pub mod middleware;

pub use body::{Body, BodyStream};
pub use config::Config;
pub use decoded::Decoded;
pub use encoding_plz::{ContentEncoding, EncodingChain};
pub use error::{CloseError, UnpackError};
pub use middleware::{Handler, Unpack, unpack_request};
