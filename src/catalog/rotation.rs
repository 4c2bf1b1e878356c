use time::{macros::datetime, OffsetDateTime};

/// Day zero of the rotation. All clients share it, so every client sees the
/// same window on the same calendar day.
pub const EPOCH: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

/// Images served per day.
pub const DAILY_LIMIT: i64 = 5;

/// Whole days elapsed since [`EPOCH`].
pub fn day_index(now: OffsetDateTime) -> i64 {
    (now - EPOCH).abs().whole_days()
}

/// Catalog offset of today's window, or `None` when the catalog holds fewer
/// than [`DAILY_LIMIT`] images. The window advances one slot per day and
/// wraps over `catalog_size / DAILY_LIMIT` full sets; the tail
/// `catalog_size % DAILY_LIMIT` images never rotate in. That exclusion is
/// long-standing observed behavior, kept as-is pending product
/// clarification.
pub fn daily_offset(now: OffsetDateTime, catalog_size: i64) -> Option<i64> {
    let total_sets = catalog_size / DAILY_LIMIT;
    if total_sets == 0 {
        return None;
    }
    let set_index = day_index(now) % total_sets;
    Some(set_index * DAILY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_index_starts_at_zero_on_epoch() {
        assert_eq!(day_index(EPOCH), 0);
        assert_eq!(day_index(datetime!(2024-01-01 23:59 UTC)), 0);
        assert_eq!(day_index(datetime!(2024-01-02 00:00 UTC)), 1);
    }

    #[test]
    fn twelve_images_rotate_over_two_sets() {
        // 12 images -> 2 full sets; images 10 and 11 never appear.
        assert_eq!(daily_offset(datetime!(2024-01-01 12:00 UTC), 12), Some(0));
        assert_eq!(daily_offset(datetime!(2024-01-02 12:00 UTC), 12), Some(5));
        assert_eq!(daily_offset(datetime!(2024-01-03 12:00 UTC), 12), Some(0));
    }

    #[test]
    fn same_day_yields_same_offset() {
        let morning = datetime!(2024-03-07 00:01 UTC);
        let evening = datetime!(2024-03-07 23:58 UTC);
        assert_eq!(daily_offset(morning, 37), daily_offset(evening, 37));
    }

    #[test]
    fn catalog_smaller_than_window_selects_nothing() {
        assert_eq!(daily_offset(EPOCH, 0), None);
        assert_eq!(daily_offset(EPOCH, 4), None);
    }

    #[test]
    fn exact_multiple_uses_every_image() {
        let mut seen = std::collections::HashSet::new();
        for day in 0..3 {
            let now = EPOCH + time::Duration::days(day);
            let offset = daily_offset(now, 15).expect("three sets");
            for i in offset..offset + DAILY_LIMIT {
                seen.insert(i);
            }
        }
        assert_eq!(seen.len(), 15);
    }
}
