pub mod combat_log;
pub mod fight;
pub mod game_data;
pub mod performance;
pub mod pipeline;

// Re-exports for convenience
pub use combat_log::{LogEvent, LogLine, LogParser, ParseError, Reader, ReaderError, SkillLevels};
pub use fight::{Fight, FightSegmenter, SegmentConfig};
pub use game_data::{CombatClass, Weapon, WeaponCatalog, WeaponCatalogError};
pub use performance::{EvaluatorConfig, FightPerformance, PerformanceEvaluator};
pub use pipeline::{ParseOutcome, SkippedLine, parse_file_content, parse_file_content_with};
