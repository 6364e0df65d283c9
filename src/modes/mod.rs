pub mod leaderboard;
pub mod play;

pub use leaderboard::print_leaderboard;
pub use play::PlayMode;
