//! League scoreboard web app: library with models, computation, and
//! persistence glue.

pub mod logic;
pub mod models;
pub mod store;
pub mod transfer;

pub use logic::{
    accumulate, aggregate_meta, build_pantheon, dual_champions, is_season_complete, normalize,
    parse_score, rank, recompute, resolve_champion, season_progress, shortened_matchdays,
    total_matchdays, DerivedViews, MetaStandings, SeasonProgress, SUB_SEASON_MATCHDAYS,
};
pub use models::{
    ChampionEntry, Championship, Dataset, Game, LeagueError, Manager, MatchdayBlock,
    PantheonEntry, PenaltyKey, SeasonEntry, SeasonKey, StandingRow, TeamStats,
    MAX_GAMES_PER_MATCHDAY, MAX_SCORE,
};
pub use store::{FileStore, Store, StoreError, SyncEvent, SyncQueue};
pub use transfer::{
    import_dataset, validate_payload, Document, Entities, ImportError, DOCUMENT_VERSION_V1,
    DOCUMENT_VERSION_V2, MAX_IMPORT_BYTES,
};
