use crate::store::Store;

/// Filter an already-fetched list by a free-text query.
///
/// A blank query returns the list unchanged. Otherwise keeps stores whose name or
/// address contains the query, ignoring letter case. Input order is preserved.
pub fn filter_stores(stores: &[Store], query: &str) -> Vec<Store> {
    if query.trim().is_empty() {
        return stores.to_vec();
    }
    let needle = query.to_lowercase();
    stores
        .iter()
        .filter(|s| matches_query(s, &needle))
        .cloned()
        .collect()
}

fn matches_query(store: &Store, needle: &str) -> bool {
    store.name.to_lowercase().contains(needle) || store.address.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeatingStatus;
    use chrono::Utc;

    fn store(id: &str, name: &str, address: &str) -> Store {
        Store {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            has_seating: SeatingStatus::Unknown,
            last_updated: Utc::now(),
            reported_by: None,
            notes: None,
            latitude: None,
            longitude: None,
        }
    }

    fn sample() -> Vec<Store> {
        vec![
            store("1", "GS25 Sinchon", "Sinchon-ro 134"),
            store("2", "CU Hongdae", "Yanghwa-ro 188"),
            store("3", "7-Eleven Gangnam", "Gangnam-daero 396"),
        ]
    }

    #[test]
    fn blank_query_returns_everything() {
        let all = sample();
        assert_eq!(filter_stores(&all, ""), all);
        assert_eq!(filter_stores(&all, "   "), all);
    }

    #[test]
    fn matches_name_or_address_case_insensitively() {
        let all = sample();
        let ids = |q: &str| filter_stores(&all, q).into_iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids("gs25"), vec!["1"]);
        assert_eq!(ids("YANGHWA"), vec!["2"]);
        assert_eq!(ids("-ro"), vec!["1", "2"]);
        assert!(ids("busan").is_empty());
    }

    #[test]
    fn works_on_hangul() {
        let all = vec![store("1", "세븐일레븐 강남역점", "서울특별시 강남구"), store("2", "CU 홍대입구역점", "마포구")];
        let hits = filter_stores(&all, "강남");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }
}
