mod error;
mod log_line;
mod parser;
mod reader;

pub use error::{ParseError, ReaderError};
pub use log_line::{LogEvent, LogLine, SkillLevels};
pub use parser::LogParser;
pub use reader::Reader;
