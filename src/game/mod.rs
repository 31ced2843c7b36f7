pub mod bacteria;
pub mod config;
pub mod session;

pub use bacteria::{BacteriaRegistry, Bacterium};
pub use config::GameConfig;
pub use session::{GameEvent, GameSession, Phase};
