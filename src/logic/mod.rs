//! Scoreboard computation: normalization, accumulation, ranking, season
//! completion, champions, meta aggregation, and the pantheon roll-up.

mod accumulate;
mod champion;
mod completion;
mod exceptions;
mod meta;
mod normalize;
mod pantheon;
mod rank;
mod recompute;

pub use accumulate::accumulate;
pub use champion::resolve_champion;
pub use completion::{is_season_complete, season_progress, total_matchdays, SeasonProgress};
pub use exceptions::{
    dual_champions, shortened_matchdays, DualChampions, ShortenedSeason, DUAL_CHAMPIONS,
    SHORTENED_SEASONS, SUB_SEASON_MATCHDAYS,
};
pub use meta::{aggregate_meta, MetaStandings};
pub use normalize::{normalize, parse_score};
pub use pantheon::build_pantheon;
pub use rank::rank;
pub use recompute::{recompute, DerivedViews};
