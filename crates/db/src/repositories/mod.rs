//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod game_category_repo;
pub mod game_repo;
pub mod player_repo;
pub mod player_score_repo;
pub mod user_repo;

pub use game_category_repo::GameCategoryRepo;
pub use game_repo::GameRepo;
pub use player_repo::PlayerRepo;
pub use player_score_repo::PlayerScoreRepo;
pub use user_repo::UserRepo;
