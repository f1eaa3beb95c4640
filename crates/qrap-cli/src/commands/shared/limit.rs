use qrap_core::pagination::Pagination;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub fn effective_limit(global: Option<u32>, fallback: u32) -> u32 {
    global.unwrap_or(fallback)
}

/// Build the page request for a list command. Out-of-range limits are
/// replaced by the engine's default.
#[must_use]
pub fn pagination(offset: i64, ctx: &AppContext, flags: &GlobalFlags) -> Pagination {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    Pagination::new(offset, i64::from(limit))
}
