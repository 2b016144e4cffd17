#![allow(dead_code)]

use reading_club::domain::entities::{Club, MemberRole, NewClub};
use reading_club::domain::repositories::{ClubRepository, MemberRepository};
use reading_club::infrastructure::persistence::{
    PgChapterRepository, PgClubRepository, PgMemberRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (username, display_name) VALUES ($1, $1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_club(pool: &PgPool, owner_id: i64, chapters: &[&str]) -> Club {
    club_repository(pool)
        .create(NewClub {
            name: "Tuesday readers".to_string(),
            book_title: "Piranesi".to_string(),
            book_author: Some("Susanna Clarke".to_string()),
            cover_url: None,
            owner_id,
            chapters: chapters.iter().map(|c| c.to_string()).collect(),
        })
        .await
        .unwrap()
}

pub async fn join_club(pool: &PgPool, club_id: i64, user_id: i64) {
    let joined = member_repository(pool)
        .add(club_id, user_id, MemberRole::Member)
        .await
        .unwrap();
    assert!(joined);
}

pub async fn progress_rows(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM progress WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn club_repository(pool: &PgPool) -> PgClubRepository {
    PgClubRepository::new(Arc::new(pool.clone()))
}

pub fn member_repository(pool: &PgPool) -> PgMemberRepository {
    PgMemberRepository::new(Arc::new(pool.clone()))
}

pub fn chapter_repository(pool: &PgPool) -> PgChapterRepository {
    PgChapterRepository::new(Arc::new(pool.clone()))
}
