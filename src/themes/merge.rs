use std::collections::HashMap;

use crate::models::theme::{Theme, ThemeActivationStatus, ThemeWithStatus};

/// Attach the stored activation flag to every platform theme.
///
/// Themes without a stored row are reported as inactive. Rows for themes the
/// platform no longer returns are dropped, and the platform's order is kept.
#[must_use]
pub fn merge_theme_statuses(
    themes: Vec<Theme>,
    statuses: &[ThemeActivationStatus],
) -> Vec<ThemeWithStatus> {
    let by_theme: HashMap<&str, bool> = statuses
        .iter()
        .map(|status| (status.theme_id.as_str(), status.is_active))
        .collect();

    themes
        .into_iter()
        .map(|theme| {
            let is_active = by_theme.get(theme.id.as_str()).copied().unwrap_or(false);
            ThemeWithStatus {
                id: theme.id,
                name: theme.name,
                role: theme.role,
                is_active,
            }
        })
        .collect()
}
