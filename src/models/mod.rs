//! Data structures for the scoreboard: managers, championships, matches,
//! seasons, and the dataset snapshot they live in.

mod championship;
mod dataset;
mod game;
mod manager;
mod season;
mod standings;

pub use championship::Championship;
pub use dataset::{Dataset, LeagueError};
pub use game::{
    first_string_field, raw_team_pair, Game, MatchdayBlock, AWAY_SCORE_KEYS, AWAY_TEAM_KEYS,
    HOME_SCORE_KEYS, HOME_TEAM_KEYS, MAX_GAMES_PER_MATCHDAY, MAX_SCORE,
};
pub use manager::{generate_id, is_valid_name, Manager, MAX_NAME_LENGTH};
pub use season::{PenaltyKey, SeasonEntry, SeasonKey};
pub use standings::{ChampionEntry, PantheonEntry, StandingRow, TeamStats};
