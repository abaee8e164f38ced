//! Eager loading of related rows.
//!
//! Each helper runs on the connection the calling repository already holds,
//! so a `get` with include flags reads from one connection within one call.

use std::collections::HashMap;

use sqlx::PgConnection;

use crate::domain::models::UserInclude;
use crate::infrastructure::entities::*;
use crate::shared::error::AppError;

pub(super) async fn users_by_ids(
    conn: &mut PgConnection,
    ids: &[i64],
    include: UserInclude,
) -> Result<HashMap<i64, UserEntity>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let mut users = sqlx::query_as::<_, UserEntity>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    attach_user_relations(conn, &mut users, include).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

pub(super) async fn communities_by_ids(
    conn: &mut PgConnection,
    ids: &[i64],
) -> Result<HashMap<i64, CommunityEntity>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let communities = sqlx::query_as::<_, CommunityEntity>(&format!(
        "SELECT {COMMUNITY_COLUMNS} FROM communities WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(communities.into_iter().map(|c| (c.id, c)).collect())
}

/// Fill the email / sessions / access_tokens of `users` as requested.
pub(super) async fn attach_user_relations(
    conn: &mut PgConnection,
    users: &mut [UserEntity],
    include: UserInclude,
) -> Result<(), AppError> {
    if users.is_empty() {
        return Ok(());
    }
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();

    if include.email {
        let emails = sqlx::query_as::<_, EmailEntity>(&format!(
            "SELECT {EMAIL_COLUMNS} FROM emails WHERE user_id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;
        let mut by_user: HashMap<i64, EmailEntity> =
            emails.into_iter().map(|e| (e.user_id, e)).collect();
        for user in users.iter_mut() {
            user.email = by_user.remove(&user.id).map(Box::new);
        }
    }

    if include.sessions {
        let sessions = sqlx::query_as::<_, SessionEntity>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;
        let mut by_user: HashMap<i64, Vec<SessionEntity>> = HashMap::new();
        for session in sessions {
            by_user.entry(session.user_id).or_default().push(session);
        }
        for user in users.iter_mut() {
            user.sessions = Some(by_user.remove(&user.id).unwrap_or_default());
        }
    }

    if include.access_tokens {
        let tokens = sqlx::query_as::<_, AccessTokenEntity>(&format!(
            "SELECT {ACCESS_TOKEN_COLUMNS} FROM access_tokens WHERE user_id = ANY($1) \
             ORDER BY created_at DESC"
        ))
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;
        let mut by_user: HashMap<i64, Vec<AccessTokenEntity>> = HashMap::new();
        for token in tokens {
            by_user.entry(token.user_id).or_default().push(token);
        }
        for user in users.iter_mut() {
            user.access_tokens = Some(by_user.remove(&user.id).unwrap_or_default());
        }
    }

    Ok(())
}

/// Attach each row's owning user, keyed by `user_id`.
pub(super) async fn attach_users<T>(
    conn: &mut PgConnection,
    rows: &mut [T],
    user_id: impl Fn(&T) -> i64,
    set: impl Fn(&mut T, Option<Box<UserEntity>>),
) -> Result<(), AppError> {
    let ids: Vec<i64> = rows.iter().map(&user_id).collect();
    let users = users_by_ids(conn, &ids, UserInclude::NONE).await?;
    for row in rows.iter_mut() {
        let user = users.get(&user_id(row)).cloned().map(Box::new);
        set(row, user);
    }
    Ok(())
}

/// Attach each row's community, keyed by `community_id`.
pub(super) async fn attach_communities<T>(
    conn: &mut PgConnection,
    rows: &mut [T],
    community_id: impl Fn(&T) -> i64,
    set: impl Fn(&mut T, Option<Box<CommunityEntity>>),
) -> Result<(), AppError> {
    let ids: Vec<i64> = rows.iter().map(&community_id).collect();
    let communities = communities_by_ids(conn, &ids).await?;
    for row in rows.iter_mut() {
        let community = communities.get(&community_id(row)).cloned().map(Box::new);
        set(row, community);
    }
    Ok(())
}
