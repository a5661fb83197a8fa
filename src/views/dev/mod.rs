//! Developer tools

mod base64;
mod json_formatter;
mod regex_tester;
mod timestamp;
mod url_encoder;
mod uuid_generator;

pub use self::base64::Base64Converter;
pub(crate) use self::base64::decode_payload;
pub use json_formatter::JsonFormatter;
pub use regex_tester::RegexTester;
pub use timestamp::TimestampConverter;
pub use url_encoder::UrlEncoder;
pub use uuid_generator::UuidGenerator;
