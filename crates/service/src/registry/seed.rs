use chrono::{DateTime, Utc};
use models::{SeatingStatus, Store};

/// Canned records written by the sample-data endpoint, keyed by fixed ids.
pub fn sample_stores(now: DateTime<Utc>) -> Vec<Store> {
    let sample = |id: &str, name: &str, address: &str, has_seating: SeatingStatus, reported_by: &str, notes: &str| Store {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        has_seating,
        last_updated: now,
        reported_by: Some(reported_by.to_string()),
        notes: Some(notes.to_string()),
        latitude: None,
        longitude: None,
    };

    vec![
        sample(
            "sample_1",
            "세븐일레븐 강남역점",
            "서울특별시 강남구 강남대로 지하 396",
            SeatingStatus::Yes,
            "관리자",
            "2인용 테이블 3개, 4인용 테이블 2개",
        ),
        sample(
            "sample_2",
            "CU 홍대입구역점",
            "서울특별시 마포구 양화로 지하 188",
            SeatingStatus::No,
            "관리자",
            "서서 취식할 수 있는 높은 테이블만 있음",
        ),
        sample(
            "sample_3",
            "GS25 신촌점",
            "서울특별시 서대문구 신촌로 134",
            SeatingStatus::Yes,
            "관리자",
            "창가쪽 2인용 테이블 4개",
        ),
        sample(
            "sample_4",
            "emart24 역삼점",
            "서울특별시 강남구 역삼동 678-9",
            SeatingStatus::Unknown,
            "",
            "",
        ),
    ]
}
