//! Built-in sample reviews used to seed an empty review collection on
//! first start.

use chrono::{DateTime, TimeZone, Utc};

use critiq_shared::ids::avatar_url;
use critiq_shared::models::{Author, Category, Review};

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The two sample reviews shipped with the application.
///
/// Like counts start at zero with an empty liker set so the
/// `likes == liked_by.len()` invariant holds from the first load.
pub(crate) fn sample_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "sample-review-1".to_string(),
            title: "Amazing Spider-Man: No Way Home".to_string(),
            description: "An incredible movie that brings together all Spider-Man \
                          universes. The action sequences are phenomenal and the \
                          story is emotionally engaging."
                .to_string(),
            category: Category::Movies,
            rating: 5,
            images: vec![
                "https://images.unsplash.com/photo-1489599833894-42cc2c935b32?w=300".to_string(),
            ],
            author: Author {
                id: "sample1".to_string(),
                username: "MovieBuff".to_string(),
                avatar: avatar_url("MovieBuff"),
            },
            created_at: seed_date(2024, 1, 15),
            updated_at: seed_date(2024, 1, 15),
            likes: 0,
            liked_by: vec![],
            tags: vec![
                "superhero".to_string(),
                "action".to_string(),
                "marvel".to_string(),
            ],
            pros: vec![
                "Great acting".to_string(),
                "Amazing visual effects".to_string(),
                "Nostalgic".to_string(),
            ],
            cons: vec!["A bit long".to_string(), "Complex plot".to_string()],
        },
        Review {
            id: "sample-review-2".to_string(),
            title: "The Midnight Library".to_string(),
            description: "A thought-provoking book about life, choices, and infinite \
                          possibilities. Matt Haig creates a beautiful metaphor for \
                          exploring regret and hope."
                .to_string(),
            category: Category::Books,
            rating: 4,
            images: vec![
                "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=300".to_string(),
            ],
            author: Author {
                id: "sample2".to_string(),
                username: "BookLover".to_string(),
                avatar: avatar_url("BookLover"),
            },
            created_at: seed_date(2024, 1, 10),
            updated_at: seed_date(2024, 1, 10),
            likes: 0,
            liked_by: vec![],
            tags: vec![
                "philosophy".to_string(),
                "fiction".to_string(),
                "inspiring".to_string(),
            ],
            pros: vec![
                "Meaningful message".to_string(),
                "Well written".to_string(),
                "Unique concept".to_string(),
            ],
            cons: vec![
                "Predictable ending".to_string(),
                "Some slow parts".to_string(),
            ],
        },
    ]
}
